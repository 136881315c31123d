//! Analytic graph to GEXF.

use std::fs;
use std::path::Path;

use tracing::info;

use graphex_core::{AnalyticGraph, Properties};
use graphex_error::{Error, Result};

use crate::builder::GexfBuilder;
use crate::schema::{AttrClass, AttributeSchema};

const CREATOR: &str = "graphex";

/// Serialize `graph` to GEXF text.
///
/// Node labels are the vertex ids; edge labels are the edge types. Each edge
/// gets a sequential id so parallel edges stay distinct.
pub fn write_gexf(graph: &AnalyticGraph) -> String {
    let mut node_schema = AttributeSchema::new();
    for node in graph.nodes() {
        for (title, value) in &node.properties {
            node_schema.observe(title, value);
        }
    }
    let mut edge_schema = AttributeSchema::new();
    for (_, _, edge) in graph.edges() {
        for (title, value) in &edge.properties {
            edge_schema.observe(title, value);
        }
    }

    let mut builder = GexfBuilder::new(CREATOR);
    builder
        .attributes(AttrClass::Node, &node_schema.attributes())
        .attributes(AttrClass::Edge, &edge_schema.attributes());

    builder.start_nodes();
    for node in graph.nodes() {
        builder.node(&node.id, &node.id, &attvalues(&node_schema, &node.properties));
    }
    builder.end_nodes();

    builder.start_edges();
    for (id, (source, target, edge)) in graph.edges().enumerate() {
        builder.edge(
            id,
            source,
            target,
            &edge.type_name,
            &attvalues(&edge_schema, &edge.properties),
        );
    }
    builder.end_edges();

    builder.build()
}

fn attvalues(schema: &AttributeSchema, properties: &Properties) -> Vec<(usize, String)> {
    properties
        .iter()
        .filter(|(_, value)| !value.is_null())
        .filter_map(|(title, value)| Some((schema.id_of(title)?, value.to_string())))
        .collect()
}

/// Write `graph` as GEXF to `path`. The in-memory graph is untouched on
/// failure.
pub fn write_gexf_file(graph: &AnalyticGraph, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let xml = write_gexf(graph);
    fs::write(path, xml).map_err(|e| {
        Error::from(e)
            .with_operation("gexf::write_file")
            .with_context("path", path.display().to_string())
    })?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "wrote gexf"
    );
    Ok(())
}
