//! Interactive vis-network page.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use graphex_core::{PresentationGraph, REPULSION_LAYOUT};
use graphex_error::{Error, Result};

const BACKGROUND: &str = "#002B36";
const FONT_COLOR: &str = "#93A1A1";
pub const VIS_NETWORK_CDN: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";
const DIMMED_COLOR: &str = "rgba(200,200,200,0.5)";

/// Where the page gets the vis-network library from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisScript {
    /// `<script src=...>`; the page needs network access to draw.
    Url(String),
    /// The library source embedded in the page, which then works offline.
    Inline(String),
}

impl VisScript {
    /// Embed a local copy of the standalone vis-network bundle.
    pub fn inline_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| {
            Error::from(e)
                .with_operation("html::inline_script")
                .with_context("path", path.display().to_string())
        })?;
        Ok(VisScript::Inline(source))
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, VisScript::Inline(_))
    }

    fn tag(&self) -> String {
        match self {
            VisScript::Url(url) => format!("<script src=\"{}\"></script>", escape_html(url)),
            VisScript::Inline(source) => {
                format!("<script>\n{}\n</script>", source.replace("</script", "<\\/script"))
            }
        }
    }
}

impl Default for VisScript {
    fn default() -> Self {
        VisScript::Url(VIS_NETWORK_CDN.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HtmlOptions {
    pub title: String,
    /// CSS height of the canvas.
    pub height: String,
    pub script: VisScript,
    /// Clicking a node dims everything outside its neighborhood.
    pub highlight_neighbors: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            title: "graphex".to_string(),
            height: "600px".to_string(),
            script: VisScript::default(),
            highlight_neighbors: true,
        }
    }
}

#[derive(Serialize)]
struct VisNode<'a> {
    id: &'a str,
    label: &'a str,
    title: &'a str,
    color: &'a str,
    size: f64,
    shape: &'static str,
}

#[derive(Serialize)]
struct VisEdge<'a> {
    from: &'a str,
    to: &'a str,
    label: &'a str,
    title: &'a str,
}

/// `{"nodes": [...], "edges": [...]}` as vis-network expects it.
pub fn vis_data(graph: &PresentationGraph) -> Value {
    let nodes: Vec<VisNode<'_>> = graph
        .nodes()
        .map(|node| VisNode {
            id: &node.id,
            label: &node.label,
            title: &node.tooltip,
            color: node.color,
            size: node.size,
            shape: "dot",
        })
        .collect();
    let edges: Vec<VisEdge<'_>> = graph
        .edges()
        .iter()
        .map(|edge| VisEdge {
            from: &edge.src_id,
            to: &edge.dst_id,
            label: &edge.label,
            title: &edge.tooltip,
        })
        .collect();
    json!({ "nodes": nodes, "edges": edges })
}

fn vis_options() -> Value {
    json!({
        "nodes": { "font": { "color": FONT_COLOR } },
        "edges": {
            "arrows": { "to": { "enabled": true } },
            "font": { "color": FONT_COLOR, "strokeWidth": 0 },
            "smooth": { "type": "dynamic" }
        },
        "physics": {
            "enabled": true,
            "solver": "repulsion",
            "repulsion": {
                "nodeDistance": REPULSION_LAYOUT.node_distance,
                "centralGravity": REPULSION_LAYOUT.central_gravity,
                "springLength": REPULSION_LAYOUT.spring_length,
                "springConstant": REPULSION_LAYOUT.spring_strength,
                "damping": REPULSION_LAYOUT.damping
            }
        }
    })
}

/// JSON safe to inline in a `<script>` block.
fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const HIGHLIGHT_SCRIPT: &str = r#"
  const baseColors = {};
  data.nodes.forEach((n) => { baseColors[n.id] = n.color; });
  network.on("click", (params) => {
    const nodes = network.body.data.nodes;
    if (params.nodes.length === 0) {
      nodes.update(data.nodes.map((n) => ({ id: n.id, color: baseColors[n.id] })));
      return;
    }
    const focus = params.nodes[0];
    const keep = new Set(network.getConnectedNodes(focus));
    keep.add(focus);
    nodes.update(data.nodes.map((n) => ({
      id: n.id,
      color: keep.has(n.id) ? baseColors[n.id] : DIMMED,
    })));
  });"#;

/// Render the page drawing `graph`. It is self-contained when the library is
/// inlined through [`VisScript::Inline`].
pub fn render_html(graph: &PresentationGraph, options: &HtmlOptions) -> String {
    let highlight = if options.highlight_neighbors {
        HIGHLIGHT_SCRIPT.replace("DIMMED", &format!("\"{DIMMED_COLOR}\""))
    } else {
        String::new()
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
{script}
<style>
  body {{ margin: 0; background-color: {background}; }}
  #graph {{ width: 100%; height: {height}; background-color: {background}; }}
</style>
</head>
<body>
<div id="graph"></div>
<script>
  const data = {data};
  const options = {options};
  const network = new vis.Network(
    document.getElementById("graph"),
    {{ nodes: new vis.DataSet(data.nodes), edges: new vis.DataSet(data.edges) }},
    options
  );{highlight}
</script>
</body>
</html>
"#,
        title = escape_html(&options.title),
        script = options.script.tag(),
        background = BACKGROUND,
        height = escape_html(&options.height),
        data = script_json(&vis_data(graph)),
        options = script_json(&vis_options()),
    )
}

/// Write the page for `graph` to `path`.
///
/// Only renderable graphs (at least one node and one edge) are drawn.
pub fn write_html(graph: &PresentationGraph, options: &HtmlOptions, path: &Path) -> Result<()> {
    if graph.node_count() == 0 || graph.edge_count() == 0 {
        return Err(Error::invalid_argument(
            "graph needs at least one node and one edge to be drawn",
        )
        .with_operation("html::write"));
    }
    fs::write(path, render_html(graph, options)).map_err(|e| {
        Error::from(e)
            .with_operation("html::write")
            .with_context("path", path.display().to_string())
    })?;
    info!(path = %path.display(), "wrote html");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphex_error::ErrorKind;
    use graphex_core::{PresentationEdge, PresentationNode};

    fn graph() -> PresentationGraph {
        let mut graph = PresentationGraph::new();
        let mut node = PresentationNode::stub("a");
        node.label = "</script><b>".to_string();
        graph.add_node(node);
        graph.ensure_node("b");
        graph.add_edge(PresentationEdge {
            src_id: "a".to_string(),
            dst_id: "b".to_string(),
            label: "knows".to_string(),
            tooltip: "{}".to_string(),
        });
        graph
    }

    #[test]
    fn test_vis_data() {
        let data = vis_data(&graph());
        assert_eq!(data["nodes"].as_array().map(Vec::len), Some(2));
        assert_eq!(data["nodes"][1]["label"], "b");
        assert_eq!(data["edges"][0]["from"], "a");
        assert_eq!(data["edges"][0]["to"], "b");
        assert_eq!(data["nodes"][0]["size"], 10.0);
    }

    #[test]
    fn test_page_settings() {
        let options = HtmlOptions {
            title: "Tom & Jerry".to_string(),
            ..HtmlOptions::default()
        };
        let page = render_html(&graph(), &options);

        assert!(page.contains("<title>Tom &amp; Jerry</title>"));
        assert!(page.contains("height: 600px"));
        assert!(page.contains("background-color: #002B36"));
        assert!(page.contains("\"solver\":\"repulsion\""));
        assert!(page.contains("\"nodeDistance\":90.0"));
        assert!(!page.contains("</script><b>"));
    }

    #[test]
    fn test_script_sources() {
        let page = render_html(&graph(), &HtmlOptions::default());
        assert!(page.contains(&format!("<script src=\"{VIS_NETWORK_CDN}\"></script>")));
        assert!(page.contains("network.getConnectedNodes(focus)"));
        assert!(page.contains("\"rgba(200,200,200,0.5)\""));

        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("vis-network.min.js");
        fs::write(&bundle, "var vis = {}; // \"</script>\" inside").unwrap();
        let options = HtmlOptions {
            script: VisScript::inline_file(&bundle).unwrap(),
            highlight_neighbors: false,
            ..HtmlOptions::default()
        };
        assert!(options.script.is_inline());

        let page = render_html(&graph(), &options);
        assert!(!page.contains("unpkg.com"));
        assert!(page.contains("var vis = {}; // \"<\\/script>\" inside"));
        assert!(!page.contains("getConnectedNodes"));
    }

    #[test]
    fn test_missing_inline_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let err = VisScript::inline_file(&dir.path().join("absent.js")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }

    #[test]
    fn test_unrenderable_graph_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut graph = PresentationGraph::new();
        graph.ensure_node("a");
        let err = write_html(&graph, &HtmlOptions::default(), &dir.path().join("g.html"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
