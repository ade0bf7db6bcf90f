//! Entity IRIs and the ontologies that own them.
//!
//! Every class, property, resource and value is named by an IRI. Class and
//! property IRIs have the form `<ontology IRI>#<local name>`.

use crate::vocab::{DELIMITER, KNORA_API_V2};

/// The IRI prefixes under which ontologies are recognized.
///
/// Entity IRIs outside these prefixes (`rdfs:label`, `owl:Class`, ...) are
/// external and never map to an ontology.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OntologyPrefixes {
    project_entity_base: String,
}

impl OntologyPrefixes {
    /// Creates the prefix set for a server whose project ontologies live under
    /// `project_entity_base` (e.g. `http://0.0.0.0:3333/ontology/`).
    pub fn new(project_entity_base: impl Into<String>) -> Self {
        Self {
            project_entity_base: project_entity_base.into(),
        }
    }

    /// Returns the base of project ontology IRIs.
    pub fn project_entity_base(&self) -> &str {
        &self.project_entity_base
    }
}

/// Splits an entity IRI into ontology IRI and local name.
///
/// Returns `None` unless the IRI contains exactly one delimiter.
pub fn split_entity_iri(entity_iri: &str) -> Option<(&str, &str)> {
    let mut segments = entity_iri.split(DELIMITER);
    let ontology = segments.next()?;
    let local = segments.next()?;
    if segments.next().is_some() {
        return None;
    }
    Some((ontology, local))
}

/// Returns the IRI of the ontology that defines `entity_iri`.
///
/// The entity must belong to the system ontology or live under the project
/// ontology base, and must split into exactly two segments on `#`. Anything
/// else is external and yields `None`.
pub fn ontology_iri_of<'a>(entity_iri: &'a str, prefixes: &OntologyPrefixes) -> Option<&'a str> {
    let (ontology, _) = split_entity_iri(entity_iri)?;
    if ontology == KNORA_API_V2 {
        return Some(ontology);
    }
    let base = prefixes.project_entity_base();
    if !base.is_empty() && ontology.len() > base.len() && ontology.starts_with(base) {
        return Some(ontology);
    }
    None
}

/// Returns the local name of an entity IRI (`Thing` for `...anything/v2#Thing`).
pub fn local_name(entity_iri: &str) -> &str {
    entity_iri
        .rsplit_once(DELIMITER)
        .map_or(entity_iri, |(_, local)| local)
}
