//! Ontology payload decoding.
//!
//! An ontology arrives as the `allentities` document: ontology metadata at the
//! top level and every class and property in `@graph`.

use rustc_hash::FxHashMap;
use serde_json::Value as Json;

use crate::codec::json::{
    as_node, has_type, id_ref, id_refs, node_id, one_or_many, opt_bool, opt_i64, opt_ref,
    opt_text, required, text, Node,
};
use crate::error::{DecodeError, Result};
use crate::model::{
    Cardinality, CardinalityKind, ClassDefinition, ClassKind, Ontology, OntologyPrefixes,
    PropertyDefinition, PropertyKind,
};
use crate::vocab::{jsonld, knora_api, owl, rdfs, salsah_gui};

// =============================================================================
// DOCUMENT
// =============================================================================

/// Decodes an ontology document into an [`Ontology`] with its dependency set.
pub fn decode_ontology(
    ontology_iri: &str,
    document: &Json,
    prefixes: &OntologyPrefixes,
) -> Result<Ontology> {
    let root = as_node(document, "ontology document is not an object")?;
    let last_modification_date = opt_text(root, knora_api::LAST_MODIFICATION_DATE);

    let entities: Vec<&Json> = match root.get(jsonld::GRAPH) {
        Some(Json::Array(items)) => items.iter().collect(),
        Some(_) => {
            return Err(DecodeError::MalformedGraphShape {
                context: "ontology @graph is not an array",
            });
        }
        // A bare ontology node has no entities; anything else is a single entity.
        None if has_type(root, owl::ONTOLOGY) || root.is_empty() => Vec::new(),
        None => vec![document],
    };

    let mut classes = FxHashMap::default();
    let mut properties = FxHashMap::default();
    for entity in entities {
        let node = as_node(entity, "ontology entity is not an object")?;
        match classify(node)? {
            Some(EntityKind::Class(kind)) => {
                let class = decode_class(node, kind)?;
                classes.insert(class.id.clone(), class);
            }
            Some(EntityKind::Property(kind)) => {
                let property = decode_property(node, kind)?;
                properties.insert(property.id.clone(), property);
            }
            None => {}
        }
    }

    Ok(Ontology::new(
        ontology_iri,
        last_modification_date,
        classes,
        properties,
        prefixes,
    ))
}

enum EntityKind {
    Class(ClassKind),
    Property(PropertyKind),
}

/// Sorts an entity into one of the four buckets, or none for entities the
/// decoder has no use for (value classes, datatypes, ...).
fn classify(node: &Node) -> Result<Option<EntityKind>> {
    if opt_bool(node, knora_api::IS_RESOURCE_CLASS)? == Some(true) {
        return Ok(Some(EntityKind::Class(ClassKind::Resource)));
    }
    if opt_bool(node, knora_api::IS_STANDOFF_CLASS)? == Some(true) {
        return Ok(Some(EntityKind::Class(ClassKind::Standoff)));
    }
    if opt_bool(node, knora_api::IS_RESOURCE_PROPERTY)? == Some(true) {
        return Ok(Some(EntityKind::Property(PropertyKind::Resource)));
    }
    // Any resource marker, even `false`, rules out the system bucket.
    let is_owl_property = has_type(node, owl::DATATYPE_PROPERTY) || has_type(node, owl::OBJECT_PROPERTY);
    if is_owl_property && !node.contains_key(knora_api::IS_RESOURCE_PROPERTY) {
        return Ok(Some(EntityKind::Property(PropertyKind::System)));
    }
    Ok(None)
}

// =============================================================================
// CLASSES
// =============================================================================

fn decode_class(node: &Node, kind: ClassKind) -> Result<ClassDefinition> {
    let id = required(node_id(node), jsonld::ID)?.to_owned();

    let mut sub_class_of = Vec::new();
    let mut cardinalities = Vec::new();
    if let Some(supers) = node.get(rdfs::SUB_CLASS_OF) {
        for entry in one_or_many(supers) {
            match entry.as_object() {
                Some(restriction) if has_type(restriction, owl::RESTRICTION) => {
                    cardinalities.push(decode_restriction(restriction)?);
                }
                _ => {
                    let super_class = id_ref(entry).ok_or(DecodeError::InvalidField {
                        field: rdfs::SUB_CLASS_OF,
                        expected: "a class reference or restriction",
                    })?;
                    sub_class_of.push(super_class.to_owned());
                }
            }
        }
    }

    Ok(ClassDefinition {
        id,
        kind,
        label: opt_text(node, rdfs::LABEL),
        comment: opt_text(node, rdfs::COMMENT),
        sub_class_of,
        cardinalities,
        can_be_instantiated: opt_bool(node, knora_api::CAN_BE_INSTANTIATED)?.unwrap_or(false),
    })
}

fn decode_restriction(node: &Node) -> Result<Cardinality> {
    let property = node
        .get(owl::ON_PROPERTY)
        .and_then(id_ref)
        .ok_or(DecodeError::MissingField {
            field: owl::ON_PROPERTY,
        })?
        .to_owned();

    let kind = if let Some(n) = opt_i64(node, owl::CARDINALITY)? {
        cardinality_kind(owl::CARDINALITY, n)?
    } else if let Some(n) = opt_i64(node, owl::MAX_CARDINALITY)? {
        cardinality_kind(owl::MAX_CARDINALITY, n)?
    } else if let Some(n) = opt_i64(node, owl::MIN_CARDINALITY)? {
        cardinality_kind(owl::MIN_CARDINALITY, n)?
    } else {
        return Err(DecodeError::MissingField {
            field: owl::CARDINALITY,
        });
    };

    Ok(Cardinality {
        property,
        kind,
        gui_order: opt_i64(node, salsah_gui::GUI_ORDER)?,
    })
}

fn cardinality_kind(field: &'static str, n: i64) -> Result<CardinalityKind> {
    match (field, n) {
        (owl::CARDINALITY, 1) => Ok(CardinalityKind::ExactlyOne),
        (owl::MAX_CARDINALITY, 1) => Ok(CardinalityKind::ZeroOrOne),
        (owl::MIN_CARDINALITY, 0) => Ok(CardinalityKind::ZeroOrMore),
        (owl::MIN_CARDINALITY, 1) => Ok(CardinalityKind::OneOrMore),
        _ => Err(DecodeError::InvalidField {
            field,
            expected: "a supported cardinality",
        }),
    }
}

// =============================================================================
// PROPERTIES
// =============================================================================

fn decode_property(node: &Node, kind: PropertyKind) -> Result<PropertyDefinition> {
    let id = required(node_id(node), jsonld::ID)?.to_owned();

    let gui_attributes = node
        .get(salsah_gui::GUI_ATTRIBUTE)
        .map(|attrs| one_or_many(attrs).filter_map(text).collect())
        .unwrap_or_default();

    Ok(PropertyDefinition {
        id,
        kind,
        label: opt_text(node, rdfs::LABEL),
        comment: opt_text(node, rdfs::COMMENT),
        sub_property_of: node.get(rdfs::SUB_PROPERTY_OF).map(id_refs).unwrap_or_default(),
        subject_type: opt_ref(node, knora_api::SUBJECT_TYPE),
        object_type: opt_ref(node, knora_api::OBJECT_TYPE),
        is_editable: opt_bool(node, knora_api::IS_EDITABLE)?.unwrap_or(false),
        is_link_property: opt_bool(node, knora_api::IS_LINK_PROPERTY)?.unwrap_or(false),
        is_link_value_property: opt_bool(node, knora_api::IS_LINK_VALUE_PROPERTY)?.unwrap_or(false),
        gui_element: opt_ref(node, salsah_gui::GUI_ELEMENT),
        gui_attributes,
    })
}
