//! Value types attached to resources.
//!
//! Every value on the wire names its kind with a type tag IRI. The closed set
//! of known kinds is [`ValueTag`]; anything else decodes to
//! [`ValueKind::Unknown`].

use std::sync::Arc;

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::model::DecodedResource;
use crate::util::{format_partial_date, DatePrecision, DateTimeStamp};
use crate::vocab::knora_api;

/// Value kinds the decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueTag {
    Boolean,
    Color,
    Date,
    Integer,
    Decimal,
    Interval,
    List,
    Uri,
    Text,
    Link,
    Geometry,
    StillImageFile,
}

lazy_static! {
    static ref TAGS_BY_IRI: FxHashMap<&'static str, ValueTag> =
        ValueTag::ALL.iter().map(|tag| (tag.type_iri(), *tag)).collect();
}

impl ValueTag {
    pub const ALL: [ValueTag; 12] = [
        ValueTag::Boolean,
        ValueTag::Color,
        ValueTag::Date,
        ValueTag::Integer,
        ValueTag::Decimal,
        ValueTag::Interval,
        ValueTag::List,
        ValueTag::Uri,
        ValueTag::Text,
        ValueTag::Link,
        ValueTag::Geometry,
        ValueTag::StillImageFile,
    ];

    /// Returns the wire type tag.
    pub fn type_iri(self) -> &'static str {
        match self {
            ValueTag::Boolean => knora_api::BOOLEAN_VALUE,
            ValueTag::Color => knora_api::COLOR_VALUE,
            ValueTag::Date => knora_api::DATE_VALUE,
            ValueTag::Integer => knora_api::INT_VALUE,
            ValueTag::Decimal => knora_api::DECIMAL_VALUE,
            ValueTag::Interval => knora_api::INTERVAL_VALUE,
            ValueTag::List => knora_api::LIST_VALUE,
            ValueTag::Uri => knora_api::URI_VALUE,
            ValueTag::Text => knora_api::TEXT_VALUE,
            ValueTag::Link => knora_api::LINK_VALUE,
            ValueTag::Geometry => knora_api::GEOM_VALUE,
            ValueTag::StillImageFile => knora_api::STILL_IMAGE_FILE_VALUE,
        }
    }

    /// Looks up a wire type tag.
    pub fn from_type_iri(iri: &str) -> Option<ValueTag> {
        TAGS_BY_IRI.get(iri).copied()
    }
}

/// One end of a date value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDate {
    /// `GREGORIAN`, `JULIAN` or `ISLAMIC`.
    pub calendar: String,
    /// `CE`, `BCE`, ... when the calendar has eras.
    pub era: Option<String>,
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub precision: DatePrecision,
}

impl CalendarDate {
    /// Renders `YYYY[/M[/D]]`.
    pub fn display(&self) -> String {
        format_partial_date(self.year, self.month, self.day, self.precision)
    }
}

/// A date value: one date, or a period when start and end differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValue {
    Single(CalendarDate),
    Period { start: CalendarDate, end: CalendarDate },
}

impl DateValue {
    pub fn display(&self) -> String {
        match self {
            DateValue::Single(date) => date.display(),
            DateValue::Period { start, end } => format!("{} - {}", start.display(), end.display()),
        }
    }
}

/// Text in one of its three wire representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextValue {
    Plain(String),
    /// Standoff XML with the IRI of the mapping used to produce it.
    Xml { xml: String, mapping: Option<String> },
    /// Read-only HTML rendering.
    Html(String),
}

impl TextValue {
    pub fn as_str(&self) -> &str {
        match self {
            TextValue::Plain(text) | TextValue::Html(text) => text,
            TextValue::Xml { xml, .. } => xml,
        }
    }
}

/// A link between two resources.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkValue {
    /// IRI of the resource on the other end.
    pub linked_resource_iri: String,
    /// True if the link points at the resource carrying this value.
    pub incoming: bool,
    /// The other resource, when the document embeds it.
    pub linked_resource: Option<Arc<DecodedResource>>,
}

/// A point of a region outline, in relative image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

/// A region drawn on an image, parsed from the JSON payload of a geometry value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionGeometry {
    pub status: String,
    pub line_color: String,
    pub line_width: f64,
    pub points: Vec<Point2D>,
    /// `rectangle`, `circle` or `polygon`.
    #[serde(rename = "type")]
    pub shape: String,
    #[serde(default, rename = "original_index")]
    pub original_index: Option<i64>,
    #[serde(default)]
    pub radius: Option<Point2D>,
}

/// A still image attached to a representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StillImageFile {
    pub filename: String,
    pub url: String,
    pub dim_x: Option<i64>,
    pub dim_y: Option<i64>,
    pub iiif_base_url: Option<String>,
}

/// The kind-specific payload of a decoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Boolean(bool),
    Color(String),
    Date(DateValue),
    Integer(i64),
    Decimal(f64),
    Interval { start: f64, end: f64 },
    /// Reference to a list node with its resolved label.
    List { node: String, label: String },
    Uri(String),
    Text(TextValue),
    Link(LinkValue),
    Geometry {
        /// The raw payload as sent.
        source: String,
        geometry: RegionGeometry,
    },
    StillImageFile(StillImageFile),
    /// A value whose type tag is not in [`ValueTag::ALL`].
    Unknown,
}

impl ValueKind {
    /// Returns the known tag, or `None` for [`ValueKind::Unknown`].
    pub fn tag(&self) -> Option<ValueTag> {
        Some(match self {
            ValueKind::Boolean(_) => ValueTag::Boolean,
            ValueKind::Color(_) => ValueTag::Color,
            ValueKind::Date(_) => ValueTag::Date,
            ValueKind::Integer(_) => ValueTag::Integer,
            ValueKind::Decimal(_) => ValueTag::Decimal,
            ValueKind::Interval { .. } => ValueTag::Interval,
            ValueKind::List { .. } => ValueTag::List,
            ValueKind::Uri(_) => ValueTag::Uri,
            ValueKind::Text(_) => ValueTag::Text,
            ValueKind::Link(_) => ValueTag::Link,
            ValueKind::Geometry { .. } => ValueTag::Geometry,
            ValueKind::StillImageFile(_) => ValueTag::StillImageFile,
            ValueKind::Unknown => return None,
        })
    }

    /// Renders the string shown to users for this value.
    pub fn display(&self) -> String {
        match self {
            ValueKind::Boolean(true) => "TRUE".to_string(),
            ValueKind::Boolean(false) => "FALSE".to_string(),
            ValueKind::Color(color) => color.clone(),
            ValueKind::Date(date) => date.display(),
            ValueKind::Integer(int) => int.to_string(),
            ValueKind::Decimal(decimal) => decimal.to_string(),
            ValueKind::Interval { start, end } => format!("{start} - {end}"),
            ValueKind::List { label, .. } => label.clone(),
            ValueKind::Uri(uri) => uri.clone(),
            ValueKind::Text(text) => text.as_str().to_string(),
            ValueKind::Link(link) => link.linked_resource_iri.clone(),
            ValueKind::Geometry { .. } => "GEOMETRY".to_string(),
            ValueKind::StillImageFile(file) => file.url.clone(),
            ValueKind::Unknown => String::new(),
        }
    }

    pub fn as_link(&self) -> Option<&LinkValue> {
        match self {
            ValueKind::Link(link) => Some(link),
            _ => None,
        }
    }
}

/// Metadata every value carries regardless of kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueMetadata {
    pub attached_to_user: Option<String>,
    pub ark_url: Option<String>,
    pub version_ark_url: Option<String>,
    pub has_permissions: Option<String>,
    pub user_has_permission: Option<String>,
    pub creation_date: Option<DateTimeStamp>,
    pub uuid: Option<String>,
    pub comment: Option<String>,
}

/// A value decoded from a resource, labeled with the property it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedValue {
    /// Value IRI; absent on values that were never persisted.
    pub id: Option<String>,
    /// The wire type tag, kept verbatim for unknown kinds.
    pub type_iri: String,
    pub property: String,
    pub property_label: Option<String>,
    pub property_comment: Option<String>,
    pub display: String,
    pub metadata: ValueMetadata,
    pub kind: ValueKind,
}
