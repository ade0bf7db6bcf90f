//! Well-known IRIs of the API v2 complex schema.
//!
//! Documents reach the decoder compacted against an empty context, so every
//! key and type tag is a full IRI. Constants are grouped by vocabulary.

/// The system ontology every project ontology builds on.
pub const KNORA_API_V2: &str = "http://api.knora.org/ontology/knora-api/v2";

/// Separates an ontology IRI from the local name of one of its entities.
pub const DELIMITER: char = '#';

macro_rules! knora_api {
    ($($name:ident = $local:literal;)*) => {
        $(pub const $name: &str = concat!("http://api.knora.org/ontology/knora-api/v2#", $local);)*
    };
}

/// JSON-LD keywords.
pub mod jsonld {
    pub const ID: &str = "@id";
    pub const TYPE: &str = "@type";
    pub const VALUE: &str = "@value";
    pub const GRAPH: &str = "@graph";
    pub const CONTEXT: &str = "@context";
}

/// knora-api: entity markers, metadata and value fields.
pub mod knora_api {
    knora_api! {
        // entity discriminators
        IS_RESOURCE_CLASS = "isResourceClass";
        IS_STANDOFF_CLASS = "isStandoffClass";
        IS_RESOURCE_PROPERTY = "isResourceProperty";
        IS_EDITABLE = "isEditable";
        IS_LINK_PROPERTY = "isLinkProperty";
        IS_LINK_VALUE_PROPERTY = "isLinkValueProperty";
        CAN_BE_INSTANTIATED = "canBeInstantiated";
        OBJECT_TYPE = "objectType";
        SUBJECT_TYPE = "subjectType";

        // resource and value metadata
        ARK_URL = "arkUrl";
        VERSION_ARK_URL = "versionArkUrl";
        ATTACHED_TO_USER = "attachedToUser";
        ATTACHED_TO_PROJECT = "attachedToProject";
        HAS_PERMISSIONS = "hasPermissions";
        USER_HAS_PERMISSION = "userHasPermission";
        CREATION_DATE = "creationDate";
        LAST_MODIFICATION_DATE = "lastModificationDate";
        DELETE_DATE = "deleteDate";
        IS_DELETED = "isDeleted";
        VALUE_CREATION_DATE = "valueCreationDate";
        VALUE_HAS_UUID = "valueHasUUID";
        VALUE_HAS_COMMENT = "valueHasComment";

        // value type tags
        BOOLEAN_VALUE = "BooleanValue";
        COLOR_VALUE = "ColorValue";
        DATE_VALUE = "DateValue";
        INT_VALUE = "IntValue";
        DECIMAL_VALUE = "DecimalValue";
        INTERVAL_VALUE = "IntervalValue";
        LIST_VALUE = "ListValue";
        URI_VALUE = "UriValue";
        TEXT_VALUE = "TextValue";
        LINK_VALUE = "LinkValue";
        GEOM_VALUE = "GeomValue";
        STILL_IMAGE_FILE_VALUE = "StillImageFileValue";

        // value fields
        BOOLEAN_VALUE_AS_BOOLEAN = "booleanValueAsBoolean";
        COLOR_VALUE_AS_COLOR = "colorValueAsColor";
        DATE_VALUE_HAS_CALENDAR = "dateValueHasCalendar";
        DATE_VALUE_HAS_START_YEAR = "dateValueHasStartYear";
        DATE_VALUE_HAS_START_MONTH = "dateValueHasStartMonth";
        DATE_VALUE_HAS_START_DAY = "dateValueHasStartDay";
        DATE_VALUE_HAS_START_ERA = "dateValueHasStartEra";
        DATE_VALUE_HAS_END_YEAR = "dateValueHasEndYear";
        DATE_VALUE_HAS_END_MONTH = "dateValueHasEndMonth";
        DATE_VALUE_HAS_END_DAY = "dateValueHasEndDay";
        DATE_VALUE_HAS_END_ERA = "dateValueHasEndEra";
        INT_VALUE_AS_INT = "intValueAsInt";
        DECIMAL_VALUE_AS_DECIMAL = "decimalValueAsDecimal";
        INTERVAL_VALUE_HAS_START = "intervalValueHasStart";
        INTERVAL_VALUE_HAS_END = "intervalValueHasEnd";
        LIST_VALUE_AS_LIST_NODE = "listValueAsListNode";
        URI_VALUE_AS_URI = "uriValueAsUri";
        VALUE_AS_STRING = "valueAsString";
        TEXT_VALUE_AS_XML = "textValueAsXml";
        TEXT_VALUE_AS_HTML = "textValueAsHtml";
        TEXT_VALUE_HAS_MAPPING = "textValueHasMapping";
        LINK_VALUE_HAS_TARGET = "linkValueHasTarget";
        LINK_VALUE_HAS_TARGET_IRI = "linkValueHasTargetIri";
        LINK_VALUE_HAS_SOURCE = "linkValueHasSource";
        LINK_VALUE_HAS_SOURCE_IRI = "linkValueHasSourceIri";
        GEOMETRY_VALUE_AS_GEOMETRY = "geometryValueAsGeometry";
        FILE_VALUE_HAS_FILENAME = "fileValueHasFilename";
        FILE_VALUE_AS_URL = "fileValueAsUrl";
        STILL_IMAGE_FILE_VALUE_HAS_DIM_X = "stillImageFileValueHasDimX";
        STILL_IMAGE_FILE_VALUE_HAS_DIM_Y = "stillImageFileValueHasDimY";
        STILL_IMAGE_FILE_VALUE_HAS_IIIF_BASE_URL = "stillImageFileValueHasIIIFBaseUrl";

        // list nodes
        LIST_NODE = "ListNode";
        IS_ROOT_NODE = "isRootNode";
        HAS_ROOT_NODE = "hasRootNode";
        HAS_SUB_LIST_NODE = "hasSubListNode";
        LIST_NODE_POSITION = "listNodePosition";
    }
}

/// RDFS vocabulary.
pub mod rdfs {
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    pub const SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
}

/// OWL vocabulary.
pub mod owl {
    pub const ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
    pub const CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    pub const RESTRICTION: &str = "http://www.w3.org/2002/07/owl#Restriction";
    pub const ON_PROPERTY: &str = "http://www.w3.org/2002/07/owl#onProperty";
    pub const CARDINALITY: &str = "http://www.w3.org/2002/07/owl#cardinality";
    pub const MIN_CARDINALITY: &str = "http://www.w3.org/2002/07/owl#minCardinality";
    pub const MAX_CARDINALITY: &str = "http://www.w3.org/2002/07/owl#maxCardinality";
    pub const OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    pub const DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
}

/// GUI hints attached to classes and properties.
pub mod salsah_gui {
    pub const GUI_ORDER: &str = "http://api.knora.org/ontology/salsah-gui/v2#guiOrder";
    pub const GUI_ELEMENT: &str = "http://api.knora.org/ontology/salsah-gui/v2#guiElement";
    pub const GUI_ATTRIBUTE: &str = "http://api.knora.org/ontology/salsah-gui/v2#guiAttribute";
}
