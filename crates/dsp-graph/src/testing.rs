//! Shared test fixtures: a small project ontology, the parts of the system
//! ontology it uses, and a list tree.

use serde_json::{json, Value as Json};

use crate::model::OntologyPrefixes;
use crate::source::StaticSource;
use crate::vocab::{knora_api, owl, rdfs, salsah_gui, KNORA_API_V2};

pub(crate) const PROJECT_BASE: &str = "http://0.0.0.0:3333/ontology/";
pub(crate) const ANYTHING: &str = "http://0.0.0.0:3333/ontology/0001/anything/v2";

pub(crate) const TREE_LIST: &str = "http://rdfh.ch/lists/0001/treeList";
pub(crate) const TREE_LIST_01: &str = "http://rdfh.ch/lists/0001/treeList01";
pub(crate) const TREE_LIST_011: &str = "http://rdfh.ch/lists/0001/treeList011";
pub(crate) const TREE_LIST_02: &str = "http://rdfh.ch/lists/0001/treeList02";

pub(crate) fn prefixes() -> OntologyPrefixes {
    OntologyPrefixes::new(PROJECT_BASE)
}

pub(crate) fn anything(local: &str) -> String {
    format!("{ANYTHING}#{local}")
}

pub(crate) fn system(local: &str) -> String {
    format!("{KNORA_API_V2}#{local}")
}

fn restriction(property: &str, kind: &str, n: i64, gui_order: Option<i64>) -> Json {
    let mut r = json!({
        "@type": owl::RESTRICTION,
        (owl::ON_PROPERTY): {"@id": property},
    });
    r[kind] = json!(n);
    if let Some(order) = gui_order {
        r[salsah_gui::GUI_ORDER] = json!(order);
    }
    r
}

fn resource_property(local: &str, label: &str, object_type: Json) -> Json {
    json!({
        "@id": anything(local),
        "@type": owl::OBJECT_PROPERTY,
        (rdfs::LABEL): label,
        (knora_api::IS_RESOURCE_PROPERTY): true,
        (knora_api::IS_EDITABLE): true,
        (knora_api::SUBJECT_TYPE): {"@id": anything("Thing")},
        (knora_api::OBJECT_TYPE): object_type,
        (rdfs::SUB_PROPERTY_OF): {"@id": system("hasValue")},
    })
}

/// The `anything` project ontology, reduced to what the tests use.
pub(crate) fn anything_ontology() -> Json {
    let thing_restrictions = vec![
        json!({"@id": system("Resource")}),
        restriction(rdfs::LABEL, owl::CARDINALITY, 1, None),
        restriction(&system("arkUrl"), owl::CARDINALITY, 1, None),
        restriction(&system("hasIncomingLinkValue"), owl::MIN_CARDINALITY, 0, None),
        restriction(&system("hasGeometry"), owl::MIN_CARDINALITY, 0, None),
        restriction(&anything("hasText"), owl::MIN_CARDINALITY, 0, Some(1)),
        restriction(&anything("hasInteger"), owl::MIN_CARDINALITY, 0, Some(2)),
        restriction(&anything("hasBoolean"), owl::MAX_CARDINALITY, 1, Some(3)),
        restriction(&anything("hasDate"), owl::MIN_CARDINALITY, 0, Some(4)),
        restriction(&anything("hasDecimal"), owl::MIN_CARDINALITY, 0, Some(5)),
        restriction(&anything("hasInterval"), owl::MIN_CARDINALITY, 0, Some(6)),
        restriction(&anything("hasListItem"), owl::MIN_CARDINALITY, 0, Some(7)),
        restriction(&anything("hasUri"), owl::MIN_CARDINALITY, 0, Some(8)),
        restriction(&anything("hasColor"), owl::MIN_CARDINALITY, 0, Some(9)),
        restriction(&anything("hasTimeStamp"), owl::MIN_CARDINALITY, 0, Some(10)),
        restriction(&anything("hasOtherThing"), owl::MIN_CARDINALITY, 0, Some(11)),
        restriction(&anything("hasOtherThingValue"), owl::MIN_CARDINALITY, 0, Some(11)),
    ];

    let mut has_text = resource_property("hasText", "Text", json!({"@id": system("TextValue")}));
    has_text[salsah_gui::GUI_ELEMENT] = json!({"@id": "http://api.knora.org/ontology/salsah-gui/v2#SimpleText"});
    has_text[salsah_gui::GUI_ATTRIBUTE] = json!(["size=80", "maxlength=255"]);
    has_text[rdfs::COMMENT] = json!("A text");

    let mut has_other_thing =
        resource_property("hasOtherThing", "Another thing", json!({"@id": anything("Thing")}));
    has_other_thing[knora_api::IS_LINK_PROPERTY] = json!(true);
    has_other_thing[rdfs::SUB_PROPERTY_OF] = json!({"@id": system("hasLinkTo")});

    let mut has_other_thing_value = resource_property(
        "hasOtherThingValue",
        "Another thing",
        json!({"@id": system("LinkValue")}),
    );
    has_other_thing_value[knora_api::IS_LINK_VALUE_PROPERTY] = json!(true);
    has_other_thing_value[rdfs::SUB_PROPERTY_OF] = json!({"@id": system("hasLinkToValue")});

    json!({
        "@id": ANYTHING,
        "@type": owl::ONTOLOGY,
        (knora_api::LAST_MODIFICATION_DATE): {
            "@type": "http://www.w3.org/2001/XMLSchema#dateTimeStamp",
            "@value": "2017-12-19T15:23:42.166Z"
        },
        "@graph": [
            {
                "@id": anything("Thing"),
                "@type": owl::CLASS,
                (rdfs::LABEL): "Thing",
                (rdfs::COMMENT): "'The whole world is full of things, which means there's a real need for someone to go searching for them.'",
                (knora_api::IS_RESOURCE_CLASS): true,
                (knora_api::CAN_BE_INSTANTIATED): true,
                (rdfs::SUB_CLASS_OF): thing_restrictions,
            },
            {
                "@id": anything("ThingPicture"),
                "@type": owl::CLASS,
                (rdfs::LABEL): [{"@language": "de", "@value": "Dingbild"}],
                (knora_api::IS_RESOURCE_CLASS): true,
                (knora_api::CAN_BE_INSTANTIATED): true,
                (rdfs::SUB_CLASS_OF): [
                    {"@id": system("StillImageRepresentation")},
                    restriction(rdfs::LABEL, owl::CARDINALITY, 1, None),
                    restriction(&system("hasStillImageFileValue"), owl::CARDINALITY, 1, None),
                ],
            },
            {
                "@id": anything("StandoffEventTag"),
                "@type": owl::CLASS,
                (rdfs::LABEL): "Represents an event in a TextValue",
                (knora_api::IS_STANDOFF_CLASS): true,
                (rdfs::SUB_CLASS_OF): {"@id": system("StandoffDateTag")},
            },
            {
                "@id": anything("ThingValueType"),
                "@type": owl::CLASS,
            },
            has_text,
            resource_property("hasInteger", "Integer", json!({"@id": system("IntValue")})),
            resource_property("hasBoolean", "Boolean value", json!({"@id": system("BooleanValue")})),
            resource_property("hasDate", "Date", json!({"@id": system("DateValue")})),
            resource_property("hasDecimal", "Decimal number", json!({"@id": system("DecimalValue")})),
            resource_property("hasInterval", "Time interval", json!({"@id": system("IntervalValue")})),
            resource_property("hasListItem", "List element", json!({"@id": system("ListValue")})),
            resource_property("hasUri", "URI", json!({"@id": system("UriValue")})),
            resource_property("hasColor", "Color", json!({"@id": system("ColorValue")})),
            resource_property("hasTimeStamp", "Timestamp", json!({"@id": system("TimeValue")})),
            has_other_thing,
            has_other_thing_value,
        ]
    })
}

fn system_property(local: &str, resource: bool, object_type: &str) -> Json {
    let rdf_type = if resource {
        owl::OBJECT_PROPERTY
    } else {
        owl::DATATYPE_PROPERTY
    };
    let mut p = json!({
        "@id": system(local),
        "@type": rdf_type,
        (rdfs::LABEL): local,
        (knora_api::OBJECT_TYPE): {"@id": object_type},
    });
    if resource {
        p[knora_api::IS_RESOURCE_PROPERTY] = json!(true);
        p[rdfs::SUB_PROPERTY_OF] = json!({"@id": system("hasValue")});
    }
    p
}

/// The parts of the system ontology the fixtures refer to.
pub(crate) fn knora_api_ontology() -> Json {
    let mut has_incoming = system_property("hasIncomingLinkValue", true, &system("LinkValue"));
    has_incoming[knora_api::IS_LINK_VALUE_PROPERTY] = json!(true);
    has_incoming[rdfs::LABEL] = json!("has incoming link");

    json!({
        "@id": KNORA_API_V2,
        "@type": owl::ONTOLOGY,
        "@graph": [
            {
                "@id": system("Resource"),
                "@type": owl::CLASS,
                (rdfs::LABEL): "Resource",
                (knora_api::IS_RESOURCE_CLASS): true,
                (rdfs::SUB_CLASS_OF): [
                    restriction(rdfs::LABEL, owl::CARDINALITY, 1, None),
                    restriction(&system("arkUrl"), owl::CARDINALITY, 1, None),
                    restriction(&system("hasIncomingLinkValue"), owl::MIN_CARDINALITY, 0, None),
                ],
            },
            {
                "@id": system("StillImageRepresentation"),
                "@type": owl::CLASS,
                (rdfs::LABEL): "Representation (Image)",
                (knora_api::IS_RESOURCE_CLASS): true,
                (rdfs::SUB_CLASS_OF): {"@id": system("Resource")},
            },
            {
                "@id": system("LinkValue"),
                "@type": owl::CLASS,
                (system("isValueClass")): true,
            },
            system_property("hasValue", false, &system("Value")),
            system_property("hasLinkTo", true, &system("Resource")),
            system_property("hasLinkToValue", true, &system("LinkValue")),
            has_incoming,
            system_property("hasStillImageFileValue", true, &system("StillImageFileValue")),
            system_property("hasGeometry", true, &system("GeomValue")),
            system_property("arkUrl", false, "http://www.w3.org/2001/XMLSchema#anyURI"),
            system_property("creationDate", false, "http://www.w3.org/2001/XMLSchema#dateTimeStamp"),
        ]
    })
}

/// A two-level list whose first child is labeled "Category A".
pub(crate) fn tree_list() -> Json {
    json!({
        "@id": TREE_LIST,
        "@type": knora_api::LIST_NODE,
        (rdfs::LABEL): "Tree list root",
        (knora_api::IS_ROOT_NODE): true,
        (knora_api::HAS_SUB_LIST_NODE): [
            tree_list_01(),
            {
                "@id": TREE_LIST_02,
                "@type": knora_api::LIST_NODE,
                (rdfs::LABEL): "Category B",
                (knora_api::LIST_NODE_POSITION): 1,
                (knora_api::HAS_ROOT_NODE): {"@id": TREE_LIST},
            }
        ]
    })
}

pub(crate) fn tree_list_01() -> Json {
    json!({
        "@id": TREE_LIST_01,
        "@type": knora_api::LIST_NODE,
        (rdfs::LABEL): "Category A",
        (rdfs::COMMENT): "First category",
        (knora_api::LIST_NODE_POSITION): 0,
        (knora_api::HAS_ROOT_NODE): {"@id": TREE_LIST},
        (knora_api::HAS_SUB_LIST_NODE): {
            "@id": TREE_LIST_011,
            "@type": knora_api::LIST_NODE,
            (rdfs::LABEL): "Category A.1",
            (knora_api::LIST_NODE_POSITION): 0,
            (knora_api::HAS_ROOT_NODE): {"@id": TREE_LIST},
        }
    })
}

/// A source preloaded with every fixture.
pub(crate) fn source() -> StaticSource {
    StaticSource::new()
        .with_ontology(ANYTHING, anything_ontology())
        .with_ontology(KNORA_API_V2, knora_api_ontology())
        .with_list_node(TREE_LIST, tree_list())
        .with_list_node(TREE_LIST_01, tree_list_01())
}
