//! Value decoding.
//!
//! Each value node names its kind with `@type`; [`ValueTag::from_type_iri`]
//! selects the handler. Unknown tags are not errors: they decode to
//! [`ValueKind::Unknown`] and log a warning.

use serde_json::Value as Json;
use tracing::warn;

use crate::cache::ListNodeCache;
use crate::codec::json::{
    as_node, id_ref, node_id, node_type, opt_bool, opt_f64, opt_i64, opt_ref, opt_str, required,
    required_str, Node,
};
use crate::error::{DecodeError, Result};
use crate::model::{
    CalendarDate, DateValue, DecodedValue, EntityDefinitions, LinkValue, RegionGeometry,
    StillImageFile, TextValue, ValueKind, ValueMetadata, ValueTag,
};
use crate::util::{parse_datetime_stamp, DatePrecision};
use crate::vocab::{jsonld, knora_api};

/// Decodes one value of `property` against the class definitions.
///
/// Link values embedding the linked resource are returned without it
/// (`linked_resource` is `None`); [`crate::codec::ResourceDecoder`] resolves
/// embedded resources.
pub async fn decode_value(
    property: &str,
    raw: &Json,
    definitions: &EntityDefinitions,
    lists: &ListNodeCache,
) -> Result<DecodedValue> {
    decode_value_with_embedded(property, raw, definitions, lists)
        .await
        .map(|(value, _)| value)
}

/// Like [`decode_value`], but also hands back the embedded resource node of
/// a link value, if any.
pub(crate) async fn decode_value_with_embedded<'a>(
    property: &str,
    raw: &'a Json,
    definitions: &EntityDefinitions,
    lists: &ListNodeCache,
) -> Result<(DecodedValue, Option<&'a Json>)> {
    let definition = definitions
        .property(property)
        .ok_or_else(|| DecodeError::UnknownProperty {
            property: property.to_owned(),
            class: definitions.class.id.clone(),
        })?;
    let node = as_node(raw, "value is not an object")?;
    let type_iri = required(node_type(node), jsonld::TYPE)?;

    let mut embedded = None;
    let kind = match ValueTag::from_type_iri(type_iri) {
        Some(ValueTag::Boolean) => ValueKind::Boolean(required(
            opt_bool(node, knora_api::BOOLEAN_VALUE_AS_BOOLEAN)?,
            knora_api::BOOLEAN_VALUE_AS_BOOLEAN,
        )?),
        Some(ValueTag::Color) => {
            ValueKind::Color(required_str(node, knora_api::COLOR_VALUE_AS_COLOR)?.to_owned())
        }
        Some(ValueTag::Date) => ValueKind::Date(decode_date(node)?),
        Some(ValueTag::Integer) => ValueKind::Integer(required(
            opt_i64(node, knora_api::INT_VALUE_AS_INT)?,
            knora_api::INT_VALUE_AS_INT,
        )?),
        Some(ValueTag::Decimal) => ValueKind::Decimal(required(
            opt_f64(node, knora_api::DECIMAL_VALUE_AS_DECIMAL)?,
            knora_api::DECIMAL_VALUE_AS_DECIMAL,
        )?),
        Some(ValueTag::Interval) => ValueKind::Interval {
            start: required(
                opt_f64(node, knora_api::INTERVAL_VALUE_HAS_START)?,
                knora_api::INTERVAL_VALUE_HAS_START,
            )?,
            end: required(
                opt_f64(node, knora_api::INTERVAL_VALUE_HAS_END)?,
                knora_api::INTERVAL_VALUE_HAS_END,
            )?,
        },
        Some(ValueTag::List) => decode_list(node, lists).await?,
        Some(ValueTag::Uri) => {
            ValueKind::Uri(required_str(node, knora_api::URI_VALUE_AS_URI)?.to_owned())
        }
        Some(ValueTag::Text) => ValueKind::Text(decode_text(node)?),
        Some(ValueTag::Link) => {
            let (link, target) = decode_link(node)?;
            embedded = target;
            ValueKind::Link(link)
        }
        Some(ValueTag::Geometry) => decode_geometry(node)?,
        Some(ValueTag::StillImageFile) => ValueKind::StillImageFile(decode_still_image(node)?),
        None => {
            warn!(type_iri, property, "unknown value type, keeping generic value");
            ValueKind::Unknown
        }
    };

    let value = DecodedValue {
        id: node_id(node).map(str::to_owned),
        type_iri: type_iri.to_owned(),
        property: property.to_owned(),
        property_label: definition.label.clone(),
        property_comment: definition.comment.clone(),
        display: kind.display(),
        metadata: decode_value_metadata(node)?,
        kind,
    };
    Ok((value, embedded))
}

fn decode_value_metadata(node: &Node) -> Result<ValueMetadata> {
    let creation_date = opt_str(node, knora_api::VALUE_CREATION_DATE)?
        .map(|s| {
            parse_datetime_stamp(s).map_err(|_| DecodeError::InvalidField {
                field: knora_api::VALUE_CREATION_DATE,
                expected: "an RFC 3339 timestamp",
            })
        })
        .transpose()?;

    Ok(ValueMetadata {
        attached_to_user: opt_ref(node, knora_api::ATTACHED_TO_USER),
        ark_url: opt_str(node, knora_api::ARK_URL)?.map(str::to_owned),
        version_ark_url: opt_str(node, knora_api::VERSION_ARK_URL)?.map(str::to_owned),
        has_permissions: opt_str(node, knora_api::HAS_PERMISSIONS)?.map(str::to_owned),
        user_has_permission: opt_str(node, knora_api::USER_HAS_PERMISSION)?.map(str::to_owned),
        creation_date,
        uuid: opt_str(node, knora_api::VALUE_HAS_UUID)?.map(str::to_owned),
        comment: opt_str(node, knora_api::VALUE_HAS_COMMENT)?.map(str::to_owned),
    })
}

// =============================================================================
// DATES
// =============================================================================

fn calendar_field(node: &Node, key: &'static str) -> Result<Option<u32>> {
    opt_i64(node, key)?
        .map(|n| {
            u32::try_from(n).map_err(|_| DecodeError::InvalidField {
                field: key,
                expected: "a non-negative number",
            })
        })
        .transpose()
}

fn decode_date(node: &Node) -> Result<DateValue> {
    let calendar = required_str(node, knora_api::DATE_VALUE_HAS_CALENDAR)?.to_owned();

    let year = |key: &'static str| -> Result<Option<i32>> {
        opt_i64(node, key)?
            .map(|n| {
                i32::try_from(n).map_err(|_| DecodeError::InvalidField {
                    field: key,
                    expected: "a year",
                })
            })
            .transpose()
    };

    let start_year = required(
        year(knora_api::DATE_VALUE_HAS_START_YEAR)?,
        knora_api::DATE_VALUE_HAS_START_YEAR,
    )?;
    let start_month = calendar_field(node, knora_api::DATE_VALUE_HAS_START_MONTH)?;
    let start_day = calendar_field(node, knora_api::DATE_VALUE_HAS_START_DAY)?;
    let start = CalendarDate {
        calendar: calendar.clone(),
        era: opt_str(node, knora_api::DATE_VALUE_HAS_START_ERA)?.map(str::to_owned),
        year: start_year,
        month: start_month,
        day: start_day,
        precision: DatePrecision::from_fields(start_month, start_day),
    };

    // Without an end year the date is a single point.
    let Some(end_year) = year(knora_api::DATE_VALUE_HAS_END_YEAR)? else {
        return Ok(DateValue::Single(start));
    };
    let end_month = calendar_field(node, knora_api::DATE_VALUE_HAS_END_MONTH)?;
    let end_day = calendar_field(node, knora_api::DATE_VALUE_HAS_END_DAY)?;
    let end = CalendarDate {
        calendar,
        era: opt_str(node, knora_api::DATE_VALUE_HAS_END_ERA)?.map(str::to_owned),
        year: end_year,
        month: end_month,
        day: end_day,
        precision: DatePrecision::from_fields(end_month, end_day),
    };

    if start == end {
        Ok(DateValue::Single(start))
    } else {
        Ok(DateValue::Period { start, end })
    }
}

// =============================================================================
// LISTS, TEXT, FILES
// =============================================================================

async fn decode_list(node: &Node, lists: &ListNodeCache) -> Result<ValueKind> {
    let list_node = node
        .get(knora_api::LIST_VALUE_AS_LIST_NODE)
        .and_then(id_ref)
        .ok_or(DecodeError::MissingField {
            field: knora_api::LIST_VALUE_AS_LIST_NODE,
        })?;
    let resolved = lists.resolve(list_node).await?;
    Ok(ValueKind::List {
        node: list_node.to_owned(),
        label: resolved.label.clone(),
    })
}

fn decode_text(node: &Node) -> Result<TextValue> {
    if let Some(text) = opt_str(node, knora_api::VALUE_AS_STRING)? {
        return Ok(TextValue::Plain(text.to_owned()));
    }
    if let Some(xml) = opt_str(node, knora_api::TEXT_VALUE_AS_XML)? {
        return Ok(TextValue::Xml {
            xml: xml.to_owned(),
            mapping: opt_ref(node, knora_api::TEXT_VALUE_HAS_MAPPING),
        });
    }
    if let Some(html) = opt_str(node, knora_api::TEXT_VALUE_AS_HTML)? {
        return Ok(TextValue::Html(html.to_owned()));
    }
    Err(DecodeError::MissingField {
        field: knora_api::VALUE_AS_STRING,
    })
}

fn decode_geometry(node: &Node) -> Result<ValueKind> {
    let source = required_str(node, knora_api::GEOMETRY_VALUE_AS_GEOMETRY)?;
    let geometry: RegionGeometry =
        serde_json::from_str(source).map_err(|_| DecodeError::InvalidField {
            field: knora_api::GEOMETRY_VALUE_AS_GEOMETRY,
            expected: "a region geometry",
        })?;
    Ok(ValueKind::Geometry {
        source: source.to_owned(),
        geometry,
    })
}

fn decode_still_image(node: &Node) -> Result<StillImageFile> {
    Ok(StillImageFile {
        filename: required_str(node, knora_api::FILE_VALUE_HAS_FILENAME)?.to_owned(),
        url: required_str(node, knora_api::FILE_VALUE_AS_URL)?.to_owned(),
        dim_x: opt_i64(node, knora_api::STILL_IMAGE_FILE_VALUE_HAS_DIM_X)?,
        dim_y: opt_i64(node, knora_api::STILL_IMAGE_FILE_VALUE_HAS_DIM_Y)?,
        iiif_base_url: opt_str(node, knora_api::STILL_IMAGE_FILE_VALUE_HAS_IIIF_BASE_URL)?
            .map(str::to_owned),
    })
}

// =============================================================================
// LINKS
// =============================================================================

const LINK_MARKERS: [&str; 4] = [
    knora_api::LINK_VALUE_HAS_TARGET,
    knora_api::LINK_VALUE_HAS_TARGET_IRI,
    knora_api::LINK_VALUE_HAS_SOURCE,
    knora_api::LINK_VALUE_HAS_SOURCE_IRI,
];

/// Reads the direction and the other end of a link value.
///
/// Exactly one of the four markers must be present. An embedded node is
/// returned alongside the link so the caller can decode it.
fn decode_link(node: &Node) -> Result<(LinkValue, Option<&Json>)> {
    let present: Vec<&str> = LINK_MARKERS
        .into_iter()
        .filter(|marker| node.contains_key(*marker))
        .collect();
    let [marker] = present.as_slice() else {
        return Err(DecodeError::MalformedLinkValue {
            value: node_id(node).unwrap_or_default().to_owned(),
            markers: present.len(),
        });
    };

    let incoming = matches!(
        *marker,
        knora_api::LINK_VALUE_HAS_SOURCE | knora_api::LINK_VALUE_HAS_SOURCE_IRI
    );
    let embeds = matches!(
        *marker,
        knora_api::LINK_VALUE_HAS_TARGET | knora_api::LINK_VALUE_HAS_SOURCE
    );
    let other = &node[*marker];

    let (linked_resource_iri, embedded) = if embeds {
        let resource = as_node(other, "embedded link resource is not an object")?;
        (required(node_id(resource), jsonld::ID)?, Some(other))
    } else {
        let iri = id_ref(other).ok_or(DecodeError::InvalidField {
            field: if incoming {
                knora_api::LINK_VALUE_HAS_SOURCE_IRI
            } else {
                knora_api::LINK_VALUE_HAS_TARGET_IRI
            },
            expected: "a resource reference",
        })?;
        (iri, None)
    };

    let link = LinkValue {
        linked_resource_iri: linked_resource_iri.to_owned(),
        incoming,
        linked_resource: None,
    };
    Ok((link, embedded))
}
