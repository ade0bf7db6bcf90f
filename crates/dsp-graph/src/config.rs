//! Connection and decoder settings.

use serde::Deserialize;

use crate::model::OntologyPrefixes;

/// Default bound on how deep embedded link targets are followed.
pub const DEFAULT_MAX_EMBEDDING_DEPTH: usize = 32;

/// Location of the API server.
///
/// The caches never talk to the network themselves; the config is only used
/// to derive the base IRI that project ontologies share.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// `http` or `https`.
    pub protocol: String,
    /// Host name without scheme or port.
    pub host: String,
    /// Explicit port, if not the protocol default.
    #[serde(default)]
    pub port: Option<u16>,
    /// Path prefix of the API (usually empty).
    #[serde(default)]
    pub path: String,
}

impl ApiConfig {
    pub fn new(protocol: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
            port: None,
            path: String::new(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Base URL requests are issued against, e.g. `https://api.example.org:443/api`.
    pub fn api_url(&self) -> String {
        format!("{}://{}{}", self.protocol, self.authority(), self.path)
    }

    /// Base that every project ontology IRI starts with.
    ///
    /// Ontology IRIs always use `http`, whatever protocol serves the API.
    pub fn project_entity_base(&self) -> String {
        format!("http://{}/ontology/", self.authority())
    }

    /// Prefixes used to map entity IRIs to their ontology.
    pub fn ontology_prefixes(&self) -> OntologyPrefixes {
        OntologyPrefixes::new(self.project_entity_base())
    }

    fn authority(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }
}

/// Options for the resource decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DecoderOptions {
    /// Maximum number of embedded resources on one link chain.
    #[serde(default = "default_max_embedding_depth")]
    pub max_embedding_depth: usize,
}

fn default_max_embedding_depth() -> usize {
    DEFAULT_MAX_EMBEDDING_DEPTH
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_embedding_depth: DEFAULT_MAX_EMBEDDING_DEPTH,
        }
    }
}
