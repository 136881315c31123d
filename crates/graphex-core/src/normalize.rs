//! Flattening of raw result cells into typed graph elements.
//!
//! Dispatch per cell shape:
//!
//! - scalar, geometry, unknown: nothing
//! - vertex: one [`Element::Vertex`]
//! - edge: one [`Element::Edge`]
//! - path: all of its vertices, then all of its edges
//! - list: every item, recursively, in order

use rayon::prelude::*;
use tracing::debug;

use crate::cell::{RawCell, RawEdge, RawVertex, ResultTable};
use crate::element::{Edge, Element, Vertex};
use crate::value::Properties;

/// Normalize a single cell.
pub fn normalize(cell: &RawCell) -> Vec<Element> {
    let mut out = Vec::new();
    normalize_into(cell, &mut out);
    out
}

/// Normalize a single cell, appending to `out`.
pub fn normalize_into(cell: &RawCell, out: &mut Vec<Element>) {
    match cell {
        RawCell::Scalar(_) | RawCell::Geometry(_) => {}
        RawCell::Vertex(vertex) => out.push(Element::Vertex(unwrap_vertex(vertex))),
        RawCell::Edge(edge) => out.push(Element::Edge(unwrap_edge(edge))),
        RawCell::Path(path) => {
            out.extend(
                path.nodes
                    .iter()
                    .map(|vertex| Element::Vertex(unwrap_vertex(vertex))),
            );
            out.extend(
                path.relationships
                    .iter()
                    .map(|edge| Element::Edge(unwrap_edge(edge))),
            );
        }
        RawCell::List(items) => {
            for item in items {
                normalize_into(item, out);
            }
        }
        RawCell::Unknown => debug!("ignoring cell of unrecognized shape"),
    }
}

/// Normalize one row, cells in declared column order.
pub fn normalize_row(row: &[RawCell]) -> Vec<Element> {
    let mut out = Vec::new();
    for cell in row {
        normalize_into(cell, &mut out);
    }
    out
}

/// Normalize a whole table row-major.
///
/// With `parallel` set, rows are normalized on the rayon pool; the collect
/// keeps row order, so the resulting stream is identical to the sequential
/// one.
pub fn normalize_table(table: &ResultTable, parallel: bool) -> Vec<Element> {
    if !parallel {
        return table.rows.iter().flat_map(|row| normalize_row(row)).collect();
    }

    let per_row: Vec<Vec<Element>> = table
        .rows
        .par_iter()
        .map(|row| normalize_row(row))
        .collect();
    per_row.into_iter().flatten().collect()
}

fn unwrap_vertex(raw: &RawVertex) -> Vertex {
    let mut properties = Properties::new();
    for tag in &raw.tags {
        for (key, value) in &tag.props {
            properties.insert(key.clone(), value.cast());
        }
    }

    Vertex {
        id: raw.id.clone(),
        tags: raw.tags.iter().map(|tag| tag.name.clone()).collect(),
        properties,
    }
}

fn unwrap_edge(raw: &RawEdge) -> Edge {
    Edge {
        src_id: raw.src.clone(),
        dst_id: raw.dst.clone(),
        type_name: raw.name.clone(),
        properties: raw
            .props
            .iter()
            .map(|(key, value)| (key.clone(), value.cast()))
            .collect(),
    }
}
