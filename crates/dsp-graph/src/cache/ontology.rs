//! Ontology metadata cache.

use std::sync::Arc;

use futures::future::try_join_all;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CoalescingCache};
use crate::codec::decode_ontology;
use crate::config::ApiConfig;
use crate::error::{DecodeError, Result};
use crate::model::{ontology_iri_of, EntityDefinitions, Ontology, OntologyPrefixes};
use crate::source::OntologySource;

/// Fetches, decodes and memoizes ontologies, one fetch per ontology IRI.
///
/// Dependencies are recorded on each [`Ontology`] but never resolved
/// eagerly; [`OntologyCache::entity_definitions`] pulls in exactly the
/// ontologies a class needs.
pub struct OntologyCache {
    source: Arc<dyn OntologySource>,
    prefixes: OntologyPrefixes,
    ontologies: CoalescingCache<Ontology>,
    definitions: CoalescingCache<EntityDefinitions>,
}

impl std::fmt::Debug for OntologyCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OntologyCache")
            .field("prefixes", &self.prefixes)
            .field("ontologies", &self.ontologies)
            .field("definitions", &self.definitions)
            .finish()
    }
}

impl OntologyCache {
    pub fn new(source: Arc<dyn OntologySource>, prefixes: OntologyPrefixes) -> Self {
        Self {
            source,
            prefixes,
            ontologies: CoalescingCache::new("ontology"),
            definitions: CoalescingCache::new("entity definitions"),
        }
    }

    /// Creates a cache recognizing the project ontologies of the configured server.
    pub fn from_config(source: Arc<dyn OntologySource>, config: &ApiConfig) -> Self {
        Self::new(source, config.ontology_prefixes())
    }

    pub fn prefixes(&self) -> &OntologyPrefixes {
        &self.prefixes
    }

    /// Returns the ontology `ontology_iri`, fetching it on first use.
    ///
    /// Fetch and parse failures are reported as [`DecodeError::MetadataFetch`]
    /// and are not cached.
    pub async fn resolve(&self, ontology_iri: &str) -> Result<Arc<Ontology>> {
        self.ontologies
            .get_or_fetch(ontology_iri, || self.load(ontology_iri))
            .await
    }

    async fn load(&self, ontology_iri: &str) -> Result<Ontology> {
        let metadata_error = |cause: String| DecodeError::MetadataFetch {
            ontology: ontology_iri.to_owned(),
            cause,
        };
        let document = self
            .source
            .fetch_ontology(ontology_iri)
            .await
            .map_err(|e| metadata_error(format!("{e:#}")))?;
        let ontology = decode_ontology(ontology_iri, &document, &self.prefixes)
            .map_err(|e| metadata_error(e.to_string()))?;
        debug!(
            ontology = ontology_iri,
            classes = ontology.classes.len(),
            properties = ontology.properties.len(),
            depends_on = ontology.depends_on().len(),
            "decoded ontology"
        );
        Ok(ontology)
    }

    /// Returns the class `class_iri` together with the definitions of every
    /// property its cardinalities name, resolving their ontologies as needed.
    ///
    /// Properties outside the recognized ontologies (such as `rdfs:label`)
    /// are skipped.
    pub async fn entity_definitions(&self, class_iri: &str) -> Result<Arc<EntityDefinitions>> {
        self.definitions
            .get_or_fetch(class_iri, || self.collect_definitions(class_iri))
            .await
    }

    async fn collect_definitions(&self, class_iri: &str) -> Result<EntityDefinitions> {
        let unknown_class = || DecodeError::UnknownClass {
            class: class_iri.to_owned(),
        };
        let home_iri = ontology_iri_of(class_iri, &self.prefixes).ok_or_else(unknown_class)?;
        let home = self.resolve(home_iri).await?;
        let class = home.class(class_iri).cloned().ok_or_else(unknown_class)?;

        let mut foreign: Vec<&str> = class
            .cardinalities
            .iter()
            .filter_map(|c| ontology_iri_of(&c.property, &self.prefixes))
            .filter(|iri| *iri != home_iri)
            .collect();
        foreign.sort_unstable();
        foreign.dedup();
        let foreign = try_join_all(foreign.into_iter().map(|iri| self.resolve(iri))).await?;

        let mut properties = FxHashMap::default();
        for cardinality in &class.cardinalities {
            let Some(owner) = ontology_iri_of(&cardinality.property, &self.prefixes) else {
                continue;
            };
            let ontology = if owner == home_iri {
                Some(&home)
            } else {
                foreign.iter().find(|o| o.id == owner)
            };
            match ontology.and_then(|o| o.property(&cardinality.property)) {
                Some(definition) => {
                    properties.insert(cardinality.property.clone(), definition.clone());
                }
                None => warn!(
                    class = class_iri,
                    property = %cardinality.property,
                    "cardinality names a property its ontology does not define"
                ),
            }
        }

        Ok(EntityDefinitions { class, properties })
    }

    /// Returns true if the ontology is cached.
    pub fn contains(&self, ontology_iri: &str) -> bool {
        self.ontologies.contains(ontology_iri)
    }

    /// Number of cached ontologies.
    pub fn len(&self) -> usize {
        self.ontologies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ontologies.is_empty()
    }

    /// Counters of the ontology map.
    pub fn stats(&self) -> CacheStats {
        self.ontologies.stats()
    }
}
