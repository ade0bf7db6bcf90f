//! List node payload decoding.

use serde_json::Value as Json;

use crate::codec::json::{as_node, node_id, one_or_many, opt_bool, opt_i64, opt_ref, opt_text, required};
use crate::error::Result;
use crate::model::ListNode;
use crate::vocab::{jsonld, knora_api, rdfs};

/// Decodes a list node and its `hasSubListNode` subtree.
pub fn decode_list_node(document: &Json) -> Result<ListNode> {
    let node = as_node(document, "list node is not an object")?;

    let children = match node.get(knora_api::HAS_SUB_LIST_NODE) {
        Some(children) => one_or_many(children)
            .map(decode_list_node)
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    Ok(ListNode {
        id: required(node_id(node), jsonld::ID)?.to_owned(),
        label: required(opt_text(node, rdfs::LABEL), rdfs::LABEL)?,
        comment: opt_text(node, rdfs::COMMENT),
        is_root_node: opt_bool(node, knora_api::IS_ROOT_NODE)?.unwrap_or(false),
        root_node: opt_ref(node, knora_api::HAS_ROOT_NODE),
        position: opt_i64(node, knora_api::LIST_NODE_POSITION)?,
        children,
    })
}
