//! Typed graph elements produced by the normalizer.

use crate::value::Properties;

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Vertex(Vertex),
    Edge(Edge),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub id: String,
    /// Type labels in declaration order; never empty for executor output.
    pub tags: Vec<String>,
    /// Union of every tag's properties, later tags winning on collisions.
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub src_id: String,
    pub dst_id: String,
    pub type_name: String,
    pub properties: Properties,
}

impl Element {
    pub fn as_vertex(&self) -> Option<&Vertex> {
        match self {
            Element::Vertex(v) => Some(v),
            Element::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&Edge> {
        match self {
            Element::Edge(e) => Some(e),
            Element::Vertex(_) => None,
        }
    }
}
