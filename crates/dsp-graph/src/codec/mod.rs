//! JSON-LD decoding for API v2 documents.
//!
//! Documents are expected in the complex schema, expanded to full IRIs
//! (compacted against an empty context). The ontology and list node codecs
//! are synchronous; value and resource decoding consult the caches and are
//! async.

pub(crate) mod json;
pub mod list_node;
pub mod ontology;
pub mod resource;
pub mod value;

pub use list_node::decode_list_node;
pub use ontology::decode_ontology;
pub use resource::ResourceDecoder;
pub use value::decode_value;
