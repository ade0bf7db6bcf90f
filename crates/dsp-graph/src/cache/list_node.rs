//! List node label cache.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheStats, CoalescingCache};
use crate::codec::decode_list_node;
use crate::error::{DecodeError, Result};
use crate::model::ListNode;
use crate::source::ListNodeSource;

/// Fetches and memoizes list nodes, one fetch per node IRI.
///
/// A fetched node arrives with its subtree; every descendant is seeded into
/// the cache so that later lookups for it are hits.
pub struct ListNodeCache {
    source: Arc<dyn ListNodeSource>,
    nodes: CoalescingCache<ListNode>,
}

impl std::fmt::Debug for ListNodeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListNodeCache")
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl ListNodeCache {
    pub fn new(source: Arc<dyn ListNodeSource>) -> Self {
        Self {
            source,
            nodes: CoalescingCache::new("list node"),
        }
    }

    /// Returns the list node `node_iri`, fetching it on first use.
    pub async fn resolve(&self, node_iri: &str) -> Result<Arc<ListNode>> {
        self.nodes
            .get_or_fetch(node_iri, || self.load(node_iri))
            .await
    }

    async fn load(&self, node_iri: &str) -> Result<ListNode> {
        let fetch_error = |cause: String| DecodeError::ListNodeFetch {
            node: node_iri.to_owned(),
            cause,
        };
        let document = self
            .source
            .fetch_list_node(node_iri)
            .await
            .map_err(|e| fetch_error(format!("{e:#}")))?;
        let node = decode_list_node(&document).map_err(|e| fetch_error(e.to_string()))?;

        let mut seeded = 0usize;
        for child in node.descendants() {
            if self.nodes.seed(child.id.clone(), child.clone()) {
                seeded += 1;
            }
        }
        debug!(node = node_iri, seeded, "decoded list node");
        Ok(node)
    }

    pub fn contains(&self, node_iri: &str) -> bool {
        self.nodes.contains(node_iri)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.nodes.stats()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use futures::future::join_all;
    use serde_json::Value as Json;

    use super::*;
    use crate::source::StaticSource;
    use crate::testing::{self, TREE_LIST, TREE_LIST_01, TREE_LIST_011};

    /// Holds every fetch open long enough for concurrent lookups to overlap.
    struct SlowSource(StaticSource);

    #[async_trait]
    impl ListNodeSource for SlowSource {
        async fn fetch_list_node(&self, node_iri: &str) -> anyhow::Result<Json> {
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.0.fetch_list_node(node_iri).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_resolves_share_one_fetch() {
        let source = Arc::new(SlowSource(testing::source()));
        let cache = ListNodeCache::new(source.clone());

        let results = join_all((0..4).map(|_| cache.resolve(TREE_LIST_01))).await;
        let node = results[0].as_ref().unwrap();
        assert_eq!(node.label, "Category A");
        assert!(results.iter().all(|r| Arc::ptr_eq(r.as_ref().unwrap(), node)));
        assert_eq!(source.0.list_node_fetches(), 1);

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.coalesced, 3);
        assert_eq!(stats.hits, 0);
    }

    #[tokio::test]
    async fn test_resolved_node_is_memoized() {
        let source = Arc::new(testing::source());
        let cache = ListNodeCache::new(source.clone());

        let first = cache.resolve(TREE_LIST_01).await.unwrap();
        let second = cache.resolve(TREE_LIST_01).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.list_node_fetches(), 1);
        assert_eq!(cache.stats().hits, 1);
    }

    #[tokio::test]
    async fn test_subtree_is_seeded() {
        let source = Arc::new(testing::source());
        let cache = ListNodeCache::new(source.clone());

        cache.resolve(TREE_LIST).await.unwrap();
        assert!(cache.contains(TREE_LIST_011));
        assert_eq!(cache.len(), 4);

        let child = cache.resolve(TREE_LIST_011).await.unwrap();
        assert_eq!(child.label, "Category A.1");
        assert_eq!(source.list_node_fetches(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_reported_and_retried() {
        let source = Arc::new(StaticSource::new());
        let cache = ListNodeCache::new(source.clone());

        for _ in 0..2 {
            match cache.resolve(TREE_LIST_01).await {
                Err(DecodeError::ListNodeFetch { node, .. }) => assert_eq!(node, TREE_LIST_01),
                other => panic!("unexpected result: {other:?}"),
            }
        }
        assert_eq!(source.list_node_fetches(), 2);
        assert!(cache.is_empty());
    }
}
