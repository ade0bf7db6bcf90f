//! Transport seams.
//!
//! The caches never talk to the network. Applications supply an
//! [`OntologySource`] and a [`ListNodeSource`] that return the compacted
//! JSON-LD the API serves; [`StaticSource`] serves fixtures from memory.

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::anyhow;
use async_trait::async_trait;
use rustc_hash::FxHashMap;
use serde_json::Value as Json;

/// Fetches ontology documents (`GET /v2/ontologies/allentities/{iri}`).
#[async_trait]
pub trait OntologySource: Send + Sync {
    async fn fetch_ontology(&self, ontology_iri: &str) -> anyhow::Result<Json>;
}

/// Fetches list nodes together with their subtree.
#[async_trait]
pub trait ListNodeSource: Send + Sync {
    async fn fetch_list_node(&self, node_iri: &str) -> anyhow::Result<Json>;
}

/// In-memory source serving preloaded documents.
///
/// Counts every fetch, so tests can assert how often a cache went to the
/// source.
#[derive(Debug, Default)]
pub struct StaticSource {
    ontologies: FxHashMap<String, Json>,
    list_nodes: FxHashMap<String, Json>,
    ontology_fetches: AtomicUsize,
    list_node_fetches: AtomicUsize,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ontology(mut self, iri: impl Into<String>, document: Json) -> Self {
        self.ontologies.insert(iri.into(), document);
        self
    }

    pub fn with_list_node(mut self, iri: impl Into<String>, document: Json) -> Self {
        self.list_nodes.insert(iri.into(), document);
        self
    }

    /// Number of ontology fetches served or refused so far.
    pub fn ontology_fetches(&self) -> usize {
        self.ontology_fetches.load(Ordering::SeqCst)
    }

    /// Number of list node fetches served or refused so far.
    pub fn list_node_fetches(&self) -> usize {
        self.list_node_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OntologySource for StaticSource {
    async fn fetch_ontology(&self, ontology_iri: &str) -> anyhow::Result<Json> {
        self.ontology_fetches.fetch_add(1, Ordering::SeqCst);
        self.ontologies
            .get(ontology_iri)
            .cloned()
            .ok_or_else(|| anyhow!("ontology not found: {ontology_iri}"))
    }
}

#[async_trait]
impl ListNodeSource for StaticSource {
    async fn fetch_list_node(&self, node_iri: &str) -> anyhow::Result<Json> {
        self.list_node_fetches.fetch_add(1, Ordering::SeqCst);
        self.list_nodes
            .get(node_iri)
            .cloned()
            .ok_or_else(|| anyhow!("list node not found: {node_iri}"))
    }
}
