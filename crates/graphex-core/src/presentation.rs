//! Presentation graph: rendering attributes only.

use indexmap::IndexMap;
use serde::Serialize;

use crate::encode::{DEFAULT_NODE_SIZE, get_color};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationNode {
    pub id: String,
    pub label: String,
    pub tooltip: String,
    pub color: &'static str,
    pub size: f64,
}

impl PresentationNode {
    /// Minimal node standing in for an edge endpoint never seen as a vertex.
    pub fn stub(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: id.to_string(),
            tooltip: id.to_string(),
            color: get_color(id),
            size: DEFAULT_NODE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationEdge {
    pub src_id: String,
    pub dst_id: String,
    pub label: String,
    pub tooltip: String,
}

/// Nodes keyed by id with first-seen-wins semantics, edges appended as a
/// sequence (duplicates allowed).
#[derive(Debug, Clone, Default)]
pub struct PresentationGraph {
    nodes: IndexMap<String, PresentationNode>,
    edges: Vec<PresentationEdge>,
}

impl PresentationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Insert `node` unless its id is already present. Returns whether the
    /// node was inserted.
    pub fn add_node(&mut self, node: PresentationNode) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }
        self.nodes.insert(node.id.clone(), node);
        true
    }

    /// Make sure `id` exists, creating a stub if needed.
    pub fn ensure_node(&mut self, id: &str) {
        if !self.nodes.contains_key(id) {
            self.nodes.insert(id.to_string(), PresentationNode::stub(id));
        }
    }

    pub fn add_edge(&mut self, edge: PresentationEdge) {
        self.edges.push(edge);
    }

    pub fn node(&self, id: &str) -> Option<&PresentationNode> {
        self.nodes.get(id)
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut PresentationNode> {
        self.nodes.values_mut()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &PresentationNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[PresentationEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
