//! Fold of the element stream into the two graph accumulators.

use tracing::{debug, trace};

use crate::analytic::{AnalyticEdge, AnalyticGraph};
use crate::cell::ResultTable;
use crate::element::{Edge, Element, Vertex};
use crate::encode::{DEFAULT_NODE_SIZE, edge_label, get_color, node_size, tooltip, vertex_label};
use crate::normalize::normalize_table;
use crate::presentation::{PresentationEdge, PresentationGraph, PresentationNode};
use crate::value::{Properties, Scalar};

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Normalize rows on the rayon pool before folding.
    pub parallel: bool,
}

impl BuildOptions {
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Incrementally builds the presentation and analytic graphs.
///
/// Both accumulators are fed by the same fold but follow different
/// overwrite rules: the presentation graph keeps the first sighting of a
/// vertex, the analytic graph merges every sighting into the node.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    presentation: PresentationGraph,
    analytic: AnalyticGraph,
    options: BuildOptions,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Normalize and fold one result table.
    pub fn add_table(&mut self, table: &ResultTable) {
        let elements = normalize_table(table, self.options.parallel);
        debug!(
            rows = table.rows.len(),
            elements = elements.len(),
            "folding result table"
        );
        self.add_elements(&elements);
    }

    pub fn add_elements<'a>(&mut self, elements: impl IntoIterator<Item = &'a Element>) {
        for element in elements {
            self.add_element(element);
        }
    }

    pub fn add_element(&mut self, element: &Element) {
        match element {
            Element::Vertex(vertex) => self.add_vertex(vertex),
            Element::Edge(edge) => self.add_edge(edge),
        }
    }

    pub fn add_vertex(&mut self, vertex: &Vertex) {
        let label = vertex_label(vertex);

        let mut properties = vertex.properties.clone();
        if !properties.contains_key("id") {
            properties.insert("id".to_string(), Scalar::from(vertex.id.as_str()));
        }

        if !self.presentation.contains_node(&vertex.id) {
            self.presentation.add_node(PresentationNode {
                id: vertex.id.clone(),
                label,
                tooltip: tooltip(&properties),
                color: get_color(&vertex.id),
                size: DEFAULT_NODE_SIZE,
            });
        } else {
            trace!(id = %vertex.id, "vertex already presented, keeping first sighting");
        }

        let mut attributes = Properties::new();
        if vertex.tags.len() > 1 {
            attributes.insert("type".to_string(), Scalar::from(vertex.tags[0].as_str()));
        }
        attributes.extend(properties);
        self.analytic.upsert_node(&vertex.id, attributes);
    }

    pub fn add_edge(&mut self, edge: &Edge) {
        self.presentation.ensure_node(&edge.src_id);
        self.presentation.ensure_node(&edge.dst_id);
        self.presentation.add_edge(PresentationEdge {
            src_id: edge.src_id.clone(),
            dst_id: edge.dst_id.clone(),
            label: edge_label(edge),
            tooltip: tooltip(&edge.properties),
        });

        let mut properties = edge.properties.clone();
        properties.insert(
            "edge_type".to_string(),
            Scalar::from(edge.type_name.as_str()),
        );
        self.analytic.add_edge(
            &edge.src_id,
            &edge.dst_id,
            AnalyticEdge {
                type_name: edge.type_name.clone(),
                properties,
            },
        );
    }

    /// Graphs built so far, without the sizing pass.
    pub fn presentation(&self) -> &PresentationGraph {
        &self.presentation
    }

    pub fn analytic(&self) -> &AnalyticGraph {
        &self.analytic
    }

    /// Run the degree sizing pass and freeze the result.
    pub fn finish(self) -> ResultGraph {
        let GraphBuilder {
            mut presentation,
            analytic,
            ..
        } = self;

        for node in presentation.nodes_mut() {
            if analytic.contains_node(&node.id) {
                node.size = node_size(analytic.degree(&node.id));
            }
        }

        ResultGraph {
            presentation,
            analytic,
        }
    }
}

/// Both graphs of one execution, sizes applied.
#[derive(Debug, Clone, Default)]
pub struct ResultGraph {
    presentation: PresentationGraph,
    analytic: AnalyticGraph,
}

impl ResultGraph {
    pub fn presentation(&self) -> &PresentationGraph {
        &self.presentation
    }

    pub fn analytic(&self) -> &AnalyticGraph {
        &self.analytic
    }

    pub fn into_parts(self) -> (PresentationGraph, AnalyticGraph) {
        (self.presentation, self.analytic)
    }

    pub fn is_empty(&self) -> bool {
        self.presentation.is_empty()
    }

    /// A graph is only drawn when it has at least one node and one edge.
    pub fn is_renderable(&self) -> bool {
        self.presentation.node_count() > 0 && self.presentation.edge_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vertex(id: &str, tags: &[&str], props: Vec<(&str, Scalar)>) -> Vertex {
        Vertex {
            id: id.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            properties: props.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }

    fn edge(src: &str, dst: &str, type_name: &str, props: Vec<(&str, Scalar)>) -> Edge {
        Edge {
            src_id: src.to_string(),
            dst_id: dst.to_string(),
            type_name: type_name.to_string(),
            properties: props.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }

    #[test]
    fn test_vertex_gets_id_property() {
        let mut builder = GraphBuilder::new();
        builder.add_vertex(&vertex("p1", &["person"], vec![("name", Scalar::from("Alice"))]));
        let graph = builder.finish();

        let node = graph.presentation().node("p1").unwrap();
        assert_eq!(node.label, "Alice");
        assert_eq!(node.tooltip, r#"{"name":"Alice","id":"p1"}"#);
        assert_eq!(graph.analytic().property("p1", "id"), Some(&Scalar::from("p1")));
        assert_eq!(graph.analytic().property("p1", "type"), None);
    }

    #[test]
    fn test_existing_id_property_is_kept() {
        let mut builder = GraphBuilder::new();
        builder.add_vertex(&vertex("p1", &["person"], vec![("id", Scalar::Int(7))]));
        let graph = builder.finish();
        assert_eq!(graph.analytic().property("p1", "id"), Some(&Scalar::Int(7)));
    }

    #[test]
    fn test_multi_tag_vertex_records_first_tag_as_type() {
        let mut builder = GraphBuilder::new();
        builder.add_vertex(&vertex("p1", &["player", "bachelor"], vec![]));
        let graph = builder.finish();

        let node = graph.analytic().node("p1").unwrap();
        let keys: Vec<_> = node.properties.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["type", "id"]);
        assert_eq!(graph.analytic().property("p1", "type"), Some(&Scalar::from("player")));
        assert_eq!(
            graph.presentation().node("p1").unwrap().label,
            "tag: ['player', 'bachelor'], id: p1"
        );
    }

    #[test]
    fn test_asymmetric_overwrite() {
        let mut builder = GraphBuilder::new();
        builder.add_vertex(&vertex("v", &["t"], vec![("name", Scalar::from("A"))]));
        builder.add_vertex(&vertex("v", &["t"], vec![("name", Scalar::from("B"))]));
        let graph = builder.finish();

        assert_eq!(graph.presentation().node("v").unwrap().label, "A");
        assert_eq!(graph.analytic().property("v", "name"), Some(&Scalar::from("B")));
    }

    #[test]
    fn test_edge_stubs_persist_after_vertex_arrives() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(&edge("a", "b", "knows", vec![]));
        builder.add_vertex(&vertex("a", &["person"], vec![("name", Scalar::from("Alice"))]));
        let graph = builder.finish();

        let stub = graph.presentation().node("a").unwrap();
        assert_eq!(stub.label, "a");
        assert_eq!(stub.tooltip, "a");
        assert_eq!(graph.analytic().property("a", "name"), Some(&Scalar::from("Alice")));
    }

    #[test]
    fn test_edge_attributes() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(&edge("a", "b", "serve", vec![("start_year", Scalar::Int(1997))]));
        let graph = builder.finish();

        let presented = &graph.presentation().edges()[0];
        assert_eq!(presented.label, "start_y..: 1997\nserve");
        assert_eq!(presented.tooltip, r#"{"start_year":1997}"#);

        let (src, dst, analytic) = graph.analytic().edges().next().unwrap();
        assert_eq!((src, dst), ("a", "b"));
        assert_eq!(analytic.properties.get("edge_type"), Some(&Scalar::from("serve")));
        assert_eq!(analytic.properties.get("start_year"), Some(&Scalar::Int(1997)));
    }

    #[test]
    fn test_degree_sizing() {
        let mut builder = GraphBuilder::new();
        builder.add_vertex(&vertex("lonely", &["t"], vec![]));
        builder.add_edge(&edge("hub", "x", "e", vec![]));
        builder.add_edge(&edge("hub", "y", "e", vec![]));
        builder.add_edge(&edge("z", "hub", "e", vec![]));
        let graph = builder.finish();

        let size = |id: &str| graph.presentation().node(id).unwrap().size;
        assert!((size("lonely") - 2f64.ln() * 10.0).abs() < 1e-12);
        assert!((size("hub") - 5f64.ln() * 10.0).abs() < 1e-12);
        assert!((size("x") - 3f64.ln() * 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_alice_knows_stub() {
        let alice = vertex("A", &["person"], vec![("name", Scalar::from("Alice"))]);
        let mut builder = GraphBuilder::new();
        builder.add_vertex(&alice);
        builder.add_vertex(&alice);
        builder.add_edge(&edge("A", "B", "knows", vec![]));
        let graph = builder.finish();

        let labels: Vec<_> = graph.presentation().nodes().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["Alice", "B"]);
        assert_eq!(graph.presentation().edges()[0].label, "knows");
        assert_eq!(graph.analytic().edge_count(), 1);
        assert_eq!(graph.analytic().out_degree("A"), 1);
        assert_eq!(graph.analytic().degree("A"), 1);
        assert_eq!(graph.analytic().degree("B"), 1);
    }

    #[test]
    fn test_multi_edges_are_kept() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(&edge("a", "b", "knows", vec![]));
        builder.add_edge(&edge("a", "b", "knows", vec![]));
        let graph = builder.finish();

        assert_eq!(graph.presentation().edge_count(), 2);
        assert_eq!(graph.analytic().edge_count(), 2);
        assert!(graph.is_renderable());
    }

    #[test]
    fn test_vertex_only_graph_is_not_renderable() {
        let mut builder = GraphBuilder::new();
        builder.add_vertex(&vertex("a", &["t"], vec![]));
        let graph = builder.finish();
        assert!(!graph.is_empty());
        assert!(!graph.is_renderable());
        assert!(ResultGraph::default().is_empty());
    }
}
