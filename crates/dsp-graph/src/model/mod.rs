//! Core data types: ontologies, list nodes, values and resources.

mod iri;
mod list;
mod ontology;
mod resource;
mod value;

pub use iri::{local_name, ontology_iri_of, split_entity_iri, OntologyPrefixes};
pub use list::ListNode;
pub use ontology::{
    Cardinality, CardinalityKind, ClassDefinition, ClassKind, EntityDefinitions, Ontology,
    PropertyDefinition, PropertyKind,
};
pub use resource::{DecodedResource, PropertyValues, ResourceMetadata};
pub use value::{
    CalendarDate, DateValue, DecodedValue, LinkValue, Point2D, RegionGeometry, StillImageFile,
    TextValue, ValueKind, ValueMetadata, ValueTag,
};
