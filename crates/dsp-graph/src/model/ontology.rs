//! Ontology definitions: classes, properties and their cardinalities.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::model::iri::{ontology_iri_of, OntologyPrefixes};

/// How many values of a property an instance may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardinalityKind {
    /// `owl:cardinality 1`
    ExactlyOne,
    /// `owl:maxCardinality 1`
    ZeroOrOne,
    /// `owl:minCardinality 0`
    ZeroOrMore,
    /// `owl:minCardinality 1`
    OneOrMore,
}

impl CardinalityKind {
    /// Returns true if at least one value is required.
    pub fn is_required(self) -> bool {
        matches!(self, CardinalityKind::ExactlyOne | CardinalityKind::OneOrMore)
    }

    /// Returns true if more than one value is allowed.
    pub fn allows_many(self) -> bool {
        matches!(self, CardinalityKind::ZeroOrMore | CardinalityKind::OneOrMore)
    }
}

/// A property a class permits, with its multiplicity and display position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cardinality {
    pub property: String,
    pub kind: CardinalityKind,
    /// `salsah-gui:guiOrder`, if the ontology sets one.
    pub gui_order: Option<i64>,
}

/// Whether a class describes resources or standoff markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Resource,
    Standoff,
}

/// A class definition (immutable once built).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDefinition {
    pub id: String,
    pub kind: ClassKind,
    pub label: Option<String>,
    pub comment: Option<String>,
    /// Super-class IRIs in document order.
    pub sub_class_of: Vec<String>,
    /// Cardinalities in document order.
    pub cardinalities: Vec<Cardinality>,
    pub can_be_instantiated: bool,
}

impl ClassDefinition {
    /// Returns the cardinality this class declares for `property`.
    pub fn cardinality(&self, property: &str) -> Option<&Cardinality> {
        self.cardinalities.iter().find(|c| c.property == property)
    }
}

/// Whether a property points at values or carries system metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Points at a value object (`isResourceProperty`).
    Resource,
    /// Resource metadata such as `arkUrl` or `creationDate`.
    System,
}

/// A property definition (immutable once built).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDefinition {
    pub id: String,
    pub kind: PropertyKind,
    pub label: Option<String>,
    pub comment: Option<String>,
    /// Super-property IRIs in document order.
    pub sub_property_of: Vec<String>,
    pub subject_type: Option<String>,
    pub object_type: Option<String>,
    pub is_editable: bool,
    pub is_link_property: bool,
    pub is_link_value_property: bool,
    pub gui_element: Option<String>,
    pub gui_attributes: Vec<String>,
}

/// A fully loaded ontology.
///
/// The dependency set is computed once, in [`Ontology::new`], after the class
/// and property maps are complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ontology {
    pub id: String,
    pub last_modification_date: Option<String>,
    pub classes: FxHashMap<String, ClassDefinition>,
    pub properties: FxHashMap<String, PropertyDefinition>,
    depends_on: BTreeSet<String>,
}

impl Ontology {
    /// Builds an ontology and analyzes its direct dependencies.
    pub fn new(
        id: impl Into<String>,
        last_modification_date: Option<String>,
        classes: FxHashMap<String, ClassDefinition>,
        properties: FxHashMap<String, PropertyDefinition>,
        prefixes: &OntologyPrefixes,
    ) -> Self {
        let id = id.into();
        let depends_on = direct_dependencies(&id, &classes, &properties, prefixes);
        Self {
            id,
            last_modification_date,
            classes,
            properties,
            depends_on,
        }
    }

    /// Ontologies this one refers to, never including itself.
    pub fn depends_on(&self) -> &BTreeSet<String> {
        &self.depends_on
    }

    pub fn class(&self, iri: &str) -> Option<&ClassDefinition> {
        self.classes.get(iri)
    }

    pub fn property(&self, iri: &str) -> Option<&PropertyDefinition> {
        self.properties.get(iri)
    }
}

/// Collects the ontologies referenced by classes (cardinality properties and
/// super-classes) and properties (object/subject types and super-properties).
fn direct_dependencies(
    own_iri: &str,
    classes: &FxHashMap<String, ClassDefinition>,
    properties: &FxHashMap<String, PropertyDefinition>,
    prefixes: &OntologyPrefixes,
) -> BTreeSet<String> {
    let class_refs = classes.values().flat_map(|class| {
        class
            .cardinalities
            .iter()
            .map(|c| c.property.as_str())
            .chain(class.sub_class_of.iter().map(String::as_str))
    });
    let property_refs = properties.values().flat_map(|prop| {
        prop.object_type
            .iter()
            .chain(prop.subject_type.iter())
            .chain(prop.sub_property_of.iter())
            .map(String::as_str)
    });

    let mut referenced: BTreeSet<String> = class_refs
        .chain(property_refs)
        .filter_map(|entity| ontology_iri_of(entity, prefixes))
        .map(str::to_owned)
        .collect();
    referenced.remove(own_iri);
    referenced
}

/// The definitions needed to decode instances of one class: the class itself
/// and every property its cardinalities mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDefinitions {
    pub class: ClassDefinition,
    pub properties: FxHashMap<String, PropertyDefinition>,
}

impl EntityDefinitions {
    pub fn property(&self, iri: &str) -> Option<&PropertyDefinition> {
        self.properties.get(iri)
    }

    /// Returns true if `iri` is a property that points at values.
    pub fn is_resource_property(&self, iri: &str) -> bool {
        self.property(iri)
            .is_some_and(|p| p.kind == PropertyKind::Resource)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::vocab::KNORA_API_V2;

    const ANYTHING: &str = "http://0.0.0.0:3333/ontology/0001/anything/v2";

    fn prefixes() -> OntologyPrefixes {
        OntologyPrefixes::new("http://0.0.0.0:3333/ontology/")
    }

    fn class(id: &str, supers: &[&str], props: &[&str]) -> ClassDefinition {
        ClassDefinition {
            id: id.to_string(),
            kind: ClassKind::Resource,
            label: None,
            comment: None,
            sub_class_of: supers.iter().map(|s| s.to_string()).collect(),
            cardinalities: props
                .iter()
                .map(|p| Cardinality {
                    property: p.to_string(),
                    kind: CardinalityKind::ZeroOrMore,
                    gui_order: None,
                })
                .collect(),
            can_be_instantiated: true,
        }
    }

    fn property(id: &str, object_type: Option<&str>, supers: &[&str]) -> PropertyDefinition {
        PropertyDefinition {
            id: id.to_string(),
            kind: PropertyKind::Resource,
            label: None,
            comment: None,
            sub_property_of: supers.iter().map(|s| s.to_string()).collect(),
            subject_type: None,
            object_type: object_type.map(str::to_string),
            is_editable: true,
            is_link_property: false,
            is_link_value_property: false,
            gui_element: None,
            gui_attributes: Vec::new(),
        }
    }

    #[test]
    fn test_dependencies_strip_self_and_externals() {
        let thing = format!("{ANYTHING}#Thing");
        let has_text = format!("{ANYTHING}#hasText");
        let mut classes = FxHashMap::default();
        classes.insert(
            thing.clone(),
            class(
                &thing,
                &[&format!("{KNORA_API_V2}#Resource")],
                &[&has_text, "http://www.w3.org/2000/01/rdf-schema#label"],
            ),
        );
        let mut properties = FxHashMap::default();
        properties.insert(
            has_text.clone(),
            property(
                &has_text,
                Some(&format!("{KNORA_API_V2}#TextValue")),
                &[&format!("{KNORA_API_V2}#hasValue")],
            ),
        );

        let onto = Ontology::new(ANYTHING, None, classes, properties, &prefixes());
        let deps: Vec<&str> = onto.depends_on().iter().map(String::as_str).collect();
        assert_eq!(deps, vec![KNORA_API_V2]);
    }

    #[test]
    fn test_dependencies_across_project_ontologies() {
        let other = "http://0.0.0.0:3333/ontology/0001/something/v2";
        let thing = format!("{ANYTHING}#Thing");
        let mut classes = FxHashMap::default();
        classes.insert(thing.clone(), class(&thing, &[&format!("{other}#Something")], &[]));

        let onto = Ontology::new(ANYTHING, None, classes, FxHashMap::default(), &prefixes());
        assert!(onto.depends_on().contains(other));
        assert_eq!(onto.depends_on().len(), 1);
    }

    #[test]
    fn test_cardinality_helpers() {
        assert!(CardinalityKind::ExactlyOne.is_required());
        assert!(!CardinalityKind::ExactlyOne.allows_many());
        assert!(CardinalityKind::OneOrMore.is_required());
        assert!(CardinalityKind::ZeroOrMore.allows_many());
        assert!(!CardinalityKind::ZeroOrOne.is_required());
    }

    proptest! {
        #[test]
        fn prop_dependencies_never_contain_self(
            locals in proptest::collection::vec("[a-zA-Z]{1,8}", 1..8),
            foreign in proptest::collection::vec("[a-z]{1,8}", 0..4),
        ) {
            let mut classes = FxHashMap::default();
            let mut properties = FxHashMap::default();
            for (i, local) in locals.iter().enumerate() {
                let class_iri = format!("{ANYTHING}#C{local}{i}");
                let prop_iri = format!("{ANYTHING}#p{local}{i}");
                let mut refs = vec![prop_iri.clone()];
                refs.extend(foreign.iter().map(|f| format!("http://0.0.0.0:3333/ontology/0002/{f}/v2#p")));
                let refs: Vec<&str> = refs.iter().map(String::as_str).collect();
                classes.insert(class_iri.clone(), class(&class_iri, &[&class_iri], &refs));
                properties.insert(prop_iri.clone(), property(&prop_iri, Some(&class_iri), &[&prop_iri]));
            }

            let onto = Ontology::new(ANYTHING, None, classes, properties, &prefixes());
            prop_assert!(!onto.depends_on().contains(ANYTHING));
            for dep in onto.depends_on() {
                prop_assert!(dep.starts_with("http://0.0.0.0:3333/ontology/0002/"));
            }
        }
    }
}
