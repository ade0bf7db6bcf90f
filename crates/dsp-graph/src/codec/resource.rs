//! Resource graph decoding.
//!
//! A document holds either an `@graph` array of resource nodes or a single
//! resource node. Each top-level node is decoded independently: one bad
//! node does not affect its siblings. Link values may embed the linked
//! resource in full; those are decoded recursively along the link chain.

use std::sync::Arc;

use futures::future::{join_all, try_join_all, BoxFuture};
use futures::FutureExt;
use lazy_static::lazy_static;
use rustc_hash::FxHashSet;
use serde_json::Value as Json;
use tracing::{debug, debug_span, Instrument};

use crate::cache::{ListNodeCache, OntologyCache};
use crate::codec::json::{as_node, node_id, node_type, one_or_many, opt_ref, opt_str, opt_text, required, Node};
use crate::codec::value::decode_value_with_embedded;
use crate::config::DecoderOptions;
use crate::error::{DecodeError, Result};
use crate::model::{
    ontology_iri_of, DecodedResource, DecodedValue, EntityDefinitions, PropertyKind,
    ResourceMetadata, ValueKind,
};
use crate::util::{parse_datetime_stamp, DateTimeStamp};
use crate::vocab::{jsonld, knora_api, rdfs, KNORA_API_V2};

lazy_static! {
    /// Resource-level keys read into [`ResourceMetadata`] or ignored, never values.
    static ref RESOURCE_METADATA_KEYS: FxHashSet<&'static str> = [
        rdfs::LABEL,
        knora_api::ARK_URL,
        knora_api::VERSION_ARK_URL,
        knora_api::ATTACHED_TO_USER,
        knora_api::ATTACHED_TO_PROJECT,
        knora_api::HAS_PERMISSIONS,
        knora_api::USER_HAS_PERMISSION,
        knora_api::CREATION_DATE,
        knora_api::LAST_MODIFICATION_DATE,
        knora_api::DELETE_DATE,
        knora_api::IS_DELETED,
    ]
    .into_iter()
    .collect();
}

/// Decodes resource documents against the shared metadata caches.
///
/// ```ignore
/// let decoder = ResourceDecoder::new(ontologies, lists);
/// for resource in decoder.decode(&document).await? {
///     let resource = resource?;
///     println!("{} ({})", resource.id, resource.class);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ResourceDecoder {
    ontologies: Arc<OntologyCache>,
    lists: Arc<ListNodeCache>,
    options: DecoderOptions,
}

impl ResourceDecoder {
    pub fn new(ontologies: Arc<OntologyCache>, lists: Arc<ListNodeCache>) -> Self {
        Self {
            ontologies,
            lists,
            options: DecoderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DecoderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    pub fn ontologies(&self) -> &Arc<OntologyCache> {
        &self.ontologies
    }

    pub fn lists(&self) -> &Arc<ListNodeCache> {
        &self.lists
    }

    /// Decodes every top-level resource of `document`, in document order.
    ///
    /// The outer error covers the document shape only; each node carries its
    /// own result.
    pub async fn decode(&self, document: &Json) -> Result<Vec<Result<DecodedResource>>> {
        let nodes = top_level_nodes(document)?;
        debug!(resources = nodes.len(), "decoding resource document");
        Ok(join_all(nodes.into_iter().map(|node| self.decode_resource(node))).await)
    }

    /// Like [`ResourceDecoder::decode`], failing on the first failed node.
    pub async fn decode_all(&self, document: &Json) -> Result<Vec<DecodedResource>> {
        self.decode(document).await?.into_iter().collect()
    }

    /// Decodes a single resource node.
    pub async fn decode_resource(&self, node: &Json) -> Result<DecodedResource> {
        self.decode_node(node, &[]).await
    }

    /// Decodes `raw`, reached through the embedding chain `ancestors`.
    fn decode_node<'a>(
        &'a self,
        raw: &'a Json,
        ancestors: &'a [String],
    ) -> BoxFuture<'a, Result<DecodedResource>> {
        async move {
            let node = as_node(raw, "resource is not an object")?;
            let id = required(node_id(node), jsonld::ID)?;

            if ancestors.iter().any(|ancestor| ancestor == id) {
                return Err(DecodeError::CyclicEmbedding {
                    resource: id.to_owned(),
                });
            }
            let depth = ancestors.len();
            if depth > self.options.max_embedding_depth {
                return Err(DecodeError::EmbeddingTooDeep {
                    resource: id.to_owned(),
                    depth,
                    max: self.options.max_embedding_depth,
                });
            }

            let span = debug_span!("decode_resource", resource = id, depth);
            self.decode_fields(node, id, ancestors).instrument(span).await
        }
        .boxed()
    }

    async fn decode_fields(
        &self,
        node: &Node,
        id: &str,
        ancestors: &[String],
    ) -> Result<DecodedResource> {
        let class = required(node_type(node), jsonld::TYPE)?;
        let definitions = self.ontologies.entity_definitions(class).await?;

        let fields: Vec<(&str, &Json)> = node
            .iter()
            .filter(|(key, _)| self.is_value_field(key, &definitions))
            .flat_map(|(key, values)| one_or_many(values).map(move |raw| (key.as_str(), raw)))
            .collect();

        let mut chain = ancestors.to_vec();
        chain.push(id.to_owned());
        let chain = chain.as_slice();

        let values = try_join_all(
            fields
                .into_iter()
                .map(|(property, raw)| self.decode_field(property, raw, &definitions, chain)),
        )
        .await?;

        let mut outgoing_references = Vec::new();
        let mut incoming_references = Vec::new();
        for link in values.iter().filter_map(|value| value.kind.as_link()) {
            if let Some(resource) = &link.linked_resource {
                if link.incoming {
                    incoming_references.push(resource.clone());
                } else {
                    outgoing_references.push(resource.clone());
                }
            }
        }

        debug!(values = values.len(), "decoded resource");
        Ok(DecodedResource {
            id: id.to_owned(),
            class: class.to_owned(),
            class_label: definitions.class.label.clone(),
            class_comment: definitions.class.comment.clone(),
            metadata: decode_resource_metadata(node)?,
            properties: values.into_iter().collect(),
            outgoing_references,
            incoming_references,
            entity_definitions: definitions,
        })
    }

    async fn decode_field(
        &self,
        property: &str,
        raw: &Json,
        definitions: &EntityDefinitions,
        chain: &[String],
    ) -> Result<DecodedValue> {
        let (mut value, embedded) =
            decode_value_with_embedded(property, raw, definitions, &self.lists).await?;
        if let Some(embedded) = embedded {
            let resource = self.decode_node(embedded, chain).await?;
            if let ValueKind::Link(link) = &mut value.kind {
                link.linked_resource = Some(Arc::new(resource));
            }
        }
        Ok(value)
    }

    /// True if `key` holds values to decode.
    ///
    /// Keywords and resource metadata never do, nor do system properties.
    /// Undefined keys are skipped unless they belong to a project ontology;
    /// those are kept so the value decoder reports them as unknown.
    fn is_value_field(&self, key: &str, definitions: &EntityDefinitions) -> bool {
        if key.starts_with('@') || RESOURCE_METADATA_KEYS.contains(key) {
            return false;
        }
        match definitions.property(key) {
            Some(definition) => definition.kind == PropertyKind::Resource,
            None => matches!(
                ontology_iri_of(key, self.ontologies.prefixes()),
                Some(ontology) if ontology != KNORA_API_V2
            ),
        }
    }
}

/// Splits a document into its top-level resource nodes.
fn top_level_nodes(document: &Json) -> Result<Vec<&Json>> {
    let root = as_node(document, "document is not an object")?;
    if let Some(graph) = root.get(jsonld::GRAPH) {
        return match graph {
            Json::Array(nodes) => Ok(nodes.iter().collect()),
            _ => Err(DecodeError::MalformedGraphShape {
                context: "@graph is not an array",
            }),
        };
    }
    if root.keys().all(|key| key == jsonld::CONTEXT) {
        return Ok(Vec::new());
    }
    Ok(vec![document])
}

fn timestamp(node: &Node, key: &'static str) -> Result<Option<DateTimeStamp>> {
    opt_str(node, key)?
        .map(|s| {
            parse_datetime_stamp(s).map_err(|_| DecodeError::InvalidField {
                field: key,
                expected: "an RFC 3339 timestamp",
            })
        })
        .transpose()
}

fn decode_resource_metadata(node: &Node) -> Result<ResourceMetadata> {
    Ok(ResourceMetadata {
        label: opt_text(node, rdfs::LABEL),
        ark_url: opt_str(node, knora_api::ARK_URL)?.map(str::to_owned),
        version_ark_url: opt_str(node, knora_api::VERSION_ARK_URL)?.map(str::to_owned),
        attached_to_user: opt_ref(node, knora_api::ATTACHED_TO_USER),
        attached_to_project: opt_ref(node, knora_api::ATTACHED_TO_PROJECT),
        has_permissions: opt_str(node, knora_api::HAS_PERMISSIONS)?.map(str::to_owned),
        user_has_permission: opt_str(node, knora_api::USER_HAS_PERMISSION)?.map(str::to_owned),
        creation_date: timestamp(node, knora_api::CREATION_DATE)?,
        last_modification_date: timestamp(node, knora_api::LAST_MODIFICATION_DATE)?,
    })
}
