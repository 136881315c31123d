//! Analytic multigraph: full property fidelity, parallel edges kept.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::value::{Properties, Scalar};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticNode {
    pub id: String,
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticEdge {
    pub type_name: String,
    pub properties: Properties,
}

/// Directed multigraph keyed by vertex id.
///
/// Re-adding a node merges attributes into the existing ones: every key of
/// the new mapping overwrites, keys it does not mention are kept.
#[derive(Debug, Clone, Default)]
pub struct AnalyticGraph {
    graph: DiGraph<AnalyticNode, AnalyticEdge>,
    index: HashMap<String, NodeIndex>,
}

impl AnalyticGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Insert or update the node `id`, merging `properties` into it.
    pub fn upsert_node(&mut self, id: &str, properties: Properties) {
        let index = self.ensure_node(id);
        let node = &mut self.graph[index];
        for (key, value) in properties {
            node.properties.insert(key, value);
        }
    }

    /// Make sure `id` exists; a new node starts without attributes.
    pub fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&index) = self.index.get(id) {
            return index;
        }
        let index = self.graph.add_node(AnalyticNode {
            id: id.to_string(),
            properties: Properties::new(),
        });
        self.index.insert(id.to_string(), index);
        index
    }

    /// Append a parallel edge, creating missing endpoints.
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str, edge: AnalyticEdge) {
        let src = self.ensure_node(src_id);
        let dst = self.ensure_node(dst_id);
        self.graph.add_edge(src, dst, edge);
    }

    pub fn node(&self, id: &str) -> Option<&AnalyticNode> {
        self.index.get(id).map(|&index| &self.graph[index])
    }

    pub fn property(&self, id: &str, key: &str) -> Option<&Scalar> {
        self.node(id).and_then(|node| node.properties.get(key))
    }

    /// In-degree plus out-degree; a self-loop counts twice.
    pub fn degree(&self, id: &str) -> usize {
        self.in_degree(id) + self.out_degree(id)
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.count_edges(id, Direction::Incoming)
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.count_edges(id, Direction::Outgoing)
    }

    fn count_edges(&self, id: &str, direction: Direction) -> usize {
        self.index
            .get(id)
            .map(|&index| self.graph.edges_directed(index, direction).count())
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &AnalyticNode> {
        self.graph.node_weights()
    }

    /// Edges in insertion order as `(source, target, edge)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &AnalyticEdge)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].id.as_str(),
                self.graph[edge.target()].id.as_str(),
                edge.weight(),
            )
        })
    }
}
