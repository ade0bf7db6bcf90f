//! Nodes of hierarchical lists referenced by list values.

/// A list node with its label and, when fetched as part of a subtree, its
/// children in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    pub id: String,
    pub label: String,
    pub comment: Option<String>,
    pub is_root_node: bool,
    /// IRI of the root of the list this node belongs to.
    pub root_node: Option<String>,
    pub position: Option<i64>,
    pub children: Vec<ListNode>,
}

impl ListNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            comment: None,
            is_root_node: false,
            root_node: None,
            position: None,
            children: Vec::new(),
        }
    }

    /// Iterates over every node below this one, depth first.
    pub fn descendants(&self) -> impl Iterator<Item = &ListNode> + '_ {
        let mut stack: Vec<&ListNode> = self.children.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}
