//! Decoded resources.

use std::sync::Arc;

use crate::model::{DecodedValue, EntityDefinitions};
use crate::util::DateTimeStamp;

/// Values grouped by property, in the order properties first appear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyValues {
    entries: Vec<(String, Vec<DecodedValue>)>,
}

impl PropertyValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value, opening a new group if the property is new.
    pub fn push(&mut self, value: DecodedValue) {
        match self.entries.iter_mut().find(|(p, _)| *p == value.property) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((value.property.clone(), vec![value])),
        }
    }

    pub fn get(&self, property: &str) -> Option<&[DecodedValue]> {
        self.entries
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, values)| values.as_slice())
    }

    /// Iterates over `(property, values)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DecodedValue])> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v.as_slice()))
    }

    /// Property IRIs in first-seen order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    /// Iterates over every value of every property.
    pub fn values(&self) -> impl Iterator<Item = &DecodedValue> {
        self.entries.iter().flat_map(|(_, values)| values.iter())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<DecodedValue> for PropertyValues {
    fn from_iter<I: IntoIterator<Item = DecodedValue>>(iter: I) -> Self {
        let mut values = PropertyValues::new();
        for value in iter {
            values.push(value);
        }
        values
    }
}

/// System metadata of a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceMetadata {
    pub label: Option<String>,
    pub ark_url: Option<String>,
    pub version_ark_url: Option<String>,
    pub attached_to_user: Option<String>,
    pub attached_to_project: Option<String>,
    pub has_permissions: Option<String>,
    pub user_has_permission: Option<String>,
    pub creation_date: Option<DateTimeStamp>,
    pub last_modification_date: Option<DateTimeStamp>,
}

/// A resource with its values decoded and its embedded neighbours resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedResource {
    pub id: String,
    pub class: String,
    pub class_label: Option<String>,
    pub class_comment: Option<String>,
    pub metadata: ResourceMetadata,
    pub properties: PropertyValues,
    /// Embedded resources this one links to, in document order.
    pub outgoing_references: Vec<Arc<DecodedResource>>,
    /// Embedded resources that link to this one, in document order.
    pub incoming_references: Vec<Arc<DecodedResource>>,
    /// Definitions the resource was decoded against.
    pub entity_definitions: Arc<EntityDefinitions>,
}

impl DecodedResource {
    /// Returns the values of `property`, or an empty slice.
    pub fn values(&self, property: &str) -> &[DecodedValue] {
        self.properties.get(property).unwrap_or(&[])
    }

    pub fn label(&self) -> Option<&str> {
        self.metadata.label.as_deref()
    }
}
