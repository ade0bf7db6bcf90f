//! dsp-graph: ontology metadata cache and resource graph decoder for DSP
//! (Knora) API v2 clients.
//!
//! Resource documents returned by the API are JSON-LD graphs whose values
//! only make sense together with the ontologies that define their classes
//! and properties. This crate turns such documents into typed
//! [`DecodedResource`]s, fetching every ontology and list node it needs
//! exactly once.
//!
//! # Overview
//!
//! - **Metadata caches**: [`OntologyCache`] and [`ListNodeCache`] memoize
//!   decoded metadata and coalesce concurrent requests for the same IRI
//!   onto a single fetch. Failures are reported to every waiter and are
//!   never cached.
//! - **Value decoding**: each value node is dispatched on its type tag to a
//!   typed [`ValueKind`]; unknown tags degrade to [`ValueKind::Unknown`].
//! - **Resource decoding**: [`ResourceDecoder`] decodes every node of a
//!   document independently and follows embedded link targets recursively.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use dsp_graph::vocab::{knora_api, owl, rdfs};
//! use dsp_graph::{ApiConfig, ListNodeCache, OntologyCache, ResourceDecoder, StaticSource};
//! use serde_json::json;
//!
//! let anything = "http://0.0.0.0:3333/ontology/0001/anything/v2";
//! let has_integer = format!("{anything}#hasInteger");
//!
//! // Serve one small ontology from memory
//! let source = Arc::new(StaticSource::new().with_ontology(anything, json!({
//!     "@id": anything,
//!     "@graph": [
//!         {
//!             "@id": format!("{anything}#Thing"),
//!             "@type": owl::CLASS,
//!             (rdfs::LABEL): "Thing",
//!             (knora_api::IS_RESOURCE_CLASS): true,
//!             (rdfs::SUB_CLASS_OF): {
//!                 "@type": owl::RESTRICTION,
//!                 (owl::ON_PROPERTY): {"@id": has_integer},
//!                 (owl::MIN_CARDINALITY): 0
//!             }
//!         },
//!         {
//!             "@id": has_integer,
//!             "@type": owl::OBJECT_PROPERTY,
//!             (rdfs::LABEL): "Integer",
//!             (knora_api::IS_RESOURCE_PROPERTY): true
//!         }
//!     ]
//! })));
//!
//! let config = ApiConfig::new("http", "0.0.0.0").with_port(3333);
//! let ontologies = Arc::new(OntologyCache::from_config(source.clone(), &config));
//! let lists = Arc::new(ListNodeCache::new(source));
//! let decoder = ResourceDecoder::new(ontologies, lists);
//!
//! // Decode a resource document
//! let document = json!({
//!     "@id": "http://rdfh.ch/0001/a-thing",
//!     "@type": format!("{anything}#Thing"),
//!     (rdfs::LABEL): "A thing",
//!     (has_integer.clone()): {"@type": knora_api::INT_VALUE, (knora_api::INT_VALUE_AS_INT): 42}
//! });
//! let resources = futures::executor::block_on(decoder.decode_all(&document))?;
//!
//! assert_eq!(resources[0].label(), Some("A thing"));
//! assert_eq!(resources[0].values(&has_integer)[0].display, "42");
//! # Ok::<(), dsp_graph::DecodeError>(())
//! ```
//!
//! # Modules
//!
//! - [`source`]: Traits the caches fetch raw documents through
//! - [`cache`]: Coalescing ontology and list node caches
//! - [`codec`]: JSON-LD decoders for ontologies, list nodes, values and resources
//! - [`model`]: Decoded data types
//! - [`config`]: Server location and decoder options
//! - [`error`]: Error types
//! - [`vocab`]: Well-known IRIs

pub mod cache;
pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod source;
pub mod util;
pub mod vocab;

#[cfg(test)]
mod testing;

// Re-export commonly used types at crate root
pub use cache::{CacheStats, ListNodeCache, OntologyCache};
pub use codec::{decode_list_node, decode_ontology, decode_value, ResourceDecoder};
pub use config::{ApiConfig, DecoderOptions};
pub use error::{DecodeError, ErrorCode, Result};
pub use model::{
    DecodedResource, DecodedValue, EntityDefinitions, ListNode, LinkValue, Ontology,
    OntologyPrefixes, PropertyValues, ValueKind, ValueTag,
};
pub use source::{ListNodeSource, OntologySource, StaticSource};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
