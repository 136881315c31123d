//! Deterministic visual encoding: color, labels, tooltips, node size and
//! the force layout handed to the renderer.

use crate::element::{Edge, Vertex};
use crate::value::Properties;

/// Solarized dark. Order matters: the palette index is `hash % 9`.
pub const PALETTE: [&str; 9] = [
    "#93A1A1", "#B58900", "#CB4B16", "#DC322F", "#D33682", "#6C71C4", "#268BD2", "#2AA198",
    "#859900",
];

/// Size of nodes the degree pass never touched.
pub const DEFAULT_NODE_SIZE: f64 = 10.0;

const EDGE_KEY_WIDTH: usize = 7;
const EDGE_VALUE_WIDTH: usize = 8;

/// Parameters of the repulsion solver. Fixed, not user-configurable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepulsionLayout {
    pub node_distance: f64,
    pub central_gravity: f64,
    pub spring_length: f64,
    pub spring_strength: f64,
    pub damping: f64,
}

pub const REPULSION_LAYOUT: RepulsionLayout = RepulsionLayout {
    node_distance: 90.0,
    central_gravity: 0.2,
    spring_length: 200.0,
    spring_strength: 0.05,
    damping: 0.09,
};

/// Map an id onto the palette with a 31-multiplier string hash reduced
/// modulo 2^32.
pub fn get_color(id: &str) -> &'static str {
    let hash = id
        .chars()
        .fold(0u32, |hash, c| hash.wrapping_mul(31).wrapping_add(c as u32));
    PALETTE[hash as usize % PALETTE.len()]
}

/// Cut `s` to `limit` code points, marking the cut with `".."`.
pub fn truncate(s: &str, limit: usize) -> String {
    match s.char_indices().nth(limit) {
        Some((byte_index, _)) => format!("{}..", &s[..byte_index]),
        None => s.to_string(),
    }
}

/// Display label of a vertex.
///
/// `name` if present, else the first property whose key contains "name"
/// (case-insensitive), else a tag/id summary.
pub fn vertex_label(vertex: &Vertex) -> String {
    if let Some(name) = vertex.properties.get("name") {
        return name.to_string();
    }

    vertex
        .properties
        .iter()
        .find(|(key, _)| key.to_lowercase().contains("name"))
        .map(|(_, value)| value.to_string())
        .unwrap_or_else(|| {
            let tags: Vec<String> = vertex.tags.iter().map(|t| format!("'{t}'")).collect();
            format!("tag: [{}], id: {}", tags.join(", "), vertex.id)
        })
}

/// Edge label: the first property abbreviated, then the type on its own
/// line. Just the type when there are no properties.
pub fn edge_label(edge: &Edge) -> String {
    match edge.properties.first() {
        Some((key, value)) => format!(
            "{}: {}\n{}",
            truncate(key, EDGE_KEY_WIDTH),
            truncate(&value.to_string(), EDGE_VALUE_WIDTH),
            edge.type_name
        ),
        None => edge.type_name.clone(),
    }
}

/// Hover text listing a property mapping.
pub fn tooltip(properties: &Properties) -> String {
    serde_json::to_string(properties).unwrap_or_default()
}

/// `ln(degree + 2) * 10`; the +2 keeps isolated nodes visible.
pub fn node_size(degree: usize) -> f64 {
    ((degree + 2) as f64).ln() * 10.0
}
