//! Error types for ontology resolution and resource graph decoding.

use thiserror::Error;

/// Coarse error classes, stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Ontology could not be fetched or parsed
    MetadataFetch,
    /// E002: List node could not be fetched or parsed
    ListNodeFetch,
    /// E003: Class or property not defined by the resolved ontologies
    UnknownEntity,
    /// E004: Link value with zero or several direction markers
    MalformedLinkValue,
    /// E005: Document, node or field has the wrong JSON shape
    MalformedGraph,
    /// E006: Embedded resources recurse into themselves or too deep
    EmbeddingLimit,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::MetadataFetch => "E001",
            ErrorCode::ListNodeFetch => "E002",
            ErrorCode::UnknownEntity => "E003",
            ErrorCode::MalformedLinkValue => "E004",
            ErrorCode::MalformedGraph => "E005",
            ErrorCode::EmbeddingLimit => "E006",
        }
    }
}

/// Error raised while resolving metadata or decoding a resource graph.
///
/// Errors are `Clone` so that a single failed fetch can be delivered to
/// every caller that was coalesced onto it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    // === E001 ===
    #[error("[E001] failed to load ontology {ontology}: {cause}")]
    MetadataFetch { ontology: String, cause: String },

    // === E002 ===
    #[error("[E002] failed to load list node {node}: {cause}")]
    ListNodeFetch { node: String, cause: String },

    // === E003 ===
    #[error("[E003] class {class} is not defined by its ontology")]
    UnknownClass { class: String },

    #[error("[E003] property {property} is not defined for class {class}")]
    UnknownProperty { property: String, class: String },

    // === E004 ===
    #[error("[E004] link value {value} must carry exactly one target or source, found {markers}")]
    MalformedLinkValue { value: String, markers: usize },

    // === E005 ===
    #[error("[E005] malformed graph: {context}")]
    MalformedGraphShape { context: &'static str },

    #[error("[E005] missing field {field}")]
    MissingField { field: &'static str },

    #[error("[E005] field {field} is not {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    // === E006 ===
    #[error("[E006] resource {resource} is embedded inside itself")]
    CyclicEmbedding { resource: String },

    #[error("[E006] resource {resource} is embedded {depth} levels deep (limit: {max})")]
    EmbeddingTooDeep {
        resource: String,
        depth: usize,
        max: usize,
    },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::MetadataFetch { .. } => ErrorCode::MetadataFetch,
            DecodeError::ListNodeFetch { .. } => ErrorCode::ListNodeFetch,
            DecodeError::UnknownClass { .. } | DecodeError::UnknownProperty { .. } => {
                ErrorCode::UnknownEntity
            }
            DecodeError::MalformedLinkValue { .. } => ErrorCode::MalformedLinkValue,
            DecodeError::MalformedGraphShape { .. }
            | DecodeError::MissingField { .. }
            | DecodeError::InvalidField { .. } => ErrorCode::MalformedGraph,
            DecodeError::CyclicEmbedding { .. } | DecodeError::EmbeddingTooDeep { .. } => {
                ErrorCode::EmbeddingLimit
            }
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_group_variants() {
        let missing = DecodeError::MissingField { field: "@id" };
        let shape = DecodeError::MalformedGraphShape { context: "x" };
        assert_eq!(missing.code(), shape.code());
        assert_eq!(missing.code().code(), "E005");

        let cycle = DecodeError::CyclicEmbedding { resource: "r".into() };
        assert_eq!(cycle.code(), ErrorCode::EmbeddingLimit);
    }

    #[test]
    fn test_message_names_identifier() {
        let err = DecodeError::MetadataFetch {
            ontology: "http://0.0.0.0:3333/ontology/0001/anything/v2".into(),
            cause: "connection refused".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("[E001]"));
        assert!(msg.contains("anything/v2"));
        assert!(msg.contains("connection refused"));
    }
}
