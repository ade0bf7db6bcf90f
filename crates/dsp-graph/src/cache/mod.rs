//! Metadata caches shared by decoders.
//!
//! Both caches are explicit objects owned by the application and handed to
//! [`crate::codec::ResourceDecoder`] behind an `Arc`.

mod coalesce;
mod list_node;
mod ontology;

pub use coalesce::{CacheStats, CoalescingCache};
pub use list_node::ListNodeCache;
pub use ontology::OntologyCache;
