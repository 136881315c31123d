//! GEXF back into a flat document, for verification and re-import.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use graphex_core::Properties;
use graphex_error::{Error, Result};

use crate::schema::{AttrClass, AttrType, Attribute};

#[derive(Debug, Clone, PartialEq)]
pub struct GexfNode {
    pub id: String,
    pub label: Option<String>,
    /// Values keyed by attribute title, typed by their declaration.
    pub attributes: Properties,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GexfEdge {
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    pub label: Option<String>,
    pub attributes: Properties,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GexfDocument {
    pub directed: bool,
    pub node_attributes: Vec<Attribute>,
    pub edge_attributes: Vec<Attribute>,
    pub nodes: Vec<GexfNode>,
    pub edges: Vec<GexfEdge>,
}

impl GexfDocument {
    pub fn node(&self, id: &str) -> Option<&GexfNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

enum Open {
    Node(GexfNode),
    Edge(GexfEdge),
}

#[derive(Default)]
struct ReadState {
    doc: GexfDocument,
    saw_graph: bool,
    class: Option<AttrClass>,
    open: Option<Open>,
}

impl ReadState {
    fn start(&mut self, element: &BytesStart<'_>, empty: bool) -> Result<()> {
        let mut attrs = element_attributes(element)?;
        match element.local_name().as_ref() {
            b"graph" => {
                self.saw_graph = true;
                self.doc.directed = attrs
                    .get("defaultedgetype")
                    .is_none_or(|kind| kind == "directed");
            }
            b"attributes" => {
                let class = attrs.get("class").map(String::as_str).unwrap_or("node");
                let class = AttrClass::parse(class).ok_or_else(|| {
                    Error::invalid_format(format!("unknown attribute class '{class}'"))
                })?;
                self.class = Some(class);
                if empty {
                    self.class = None;
                }
            }
            b"attribute" => {
                let id = required(&mut attrs, "attribute", "id")?;
                let title = attrs.remove("title").unwrap_or_else(|| id.clone());
                let kind = attrs.get("type").map(String::as_str).unwrap_or("string");
                let kind = AttrType::parse(kind).ok_or_else(|| {
                    Error::invalid_format(format!("unknown attribute type '{kind}'"))
                })?;
                let attribute = Attribute { id, title, kind };
                match self.class {
                    Some(AttrClass::Edge) => self.doc.edge_attributes.push(attribute),
                    _ => self.doc.node_attributes.push(attribute),
                }
            }
            b"node" => {
                let node = GexfNode {
                    id: required(&mut attrs, "node", "id")?,
                    label: attrs.remove("label"),
                    attributes: Properties::new(),
                };
                self.open = Some(Open::Node(node));
                if empty {
                    self.close();
                }
            }
            b"edge" => {
                let edge = GexfEdge {
                    id: attrs.remove("id"),
                    source: required(&mut attrs, "edge", "source")?,
                    target: required(&mut attrs, "edge", "target")?,
                    label: attrs.remove("label"),
                    attributes: Properties::new(),
                };
                self.open = Some(Open::Edge(edge));
                if empty {
                    self.close();
                }
            }
            b"attvalue" => self.attvalue(&mut attrs)?,
            _ => {}
        }
        Ok(())
    }

    fn attvalue(&mut self, attrs: &mut HashMap<String, String>) -> Result<()> {
        let key = required(attrs, "attvalue", "for")?;
        let text = required(attrs, "attvalue", "value")?;
        let (declared, properties) = match self.open.as_mut() {
            Some(Open::Node(node)) => (&self.doc.node_attributes, &mut node.attributes),
            Some(Open::Edge(edge)) => (&self.doc.edge_attributes, &mut edge.attributes),
            None => return Err(Error::invalid_format("attvalue outside of a node or edge")),
        };
        let attribute = declared
            .iter()
            .find(|a| a.id == key)
            .ok_or_else(|| Error::invalid_format(format!("undeclared attribute '{key}'")))?;
        let value = attribute.kind.decode(&text).ok_or_else(|| {
            Error::invalid_format(format!(
                "value '{text}' is not a valid {}",
                attribute.kind.as_str()
            ))
        })?;
        properties.insert(attribute.title.clone(), value);
        Ok(())
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"node" | b"edge" => self.close(),
            b"attributes" => self.class = None,
            _ => {}
        }
    }

    fn close(&mut self) {
        match self.open.take() {
            Some(Open::Node(node)) => self.doc.nodes.push(node),
            Some(Open::Edge(edge)) => self.doc.edges.push(edge),
            None => {}
        }
    }
}

fn element_attributes(element: &BytesStart<'_>) -> Result<HashMap<String, String>> {
    let mut out = HashMap::new();
    for attr in element.attributes() {
        let attr = attr.map_err(|e| Error::invalid_format(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = normalize_whitespace(&String::from_utf8_lossy(&attr.value));
        let value = unescape(&raw)
            .map_err(|e| Error::invalid_format(e.to_string()))?
            .into_owned();
        out.insert(key, value);
    }
    Ok(out)
}

/// Attribute-value normalization: literal line breaks and tabs read as a
/// space. Character references such as `&#10;` are untouched.
fn normalize_whitespace(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => ' ',
            c => c,
        })
        .collect()
}

fn required(
    attrs: &mut HashMap<String, String>,
    element: &str,
    name: &str,
) -> Result<String> {
    attrs
        .remove(name)
        .ok_or_else(|| Error::invalid_format(format!("<{element}> without '{name}'")))
}

/// Parse GEXF text.
pub fn read_gexf(xml: &str) -> Result<GexfDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut state = ReadState::default();

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::invalid_format(format!(
                "malformed gexf at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;
        match event {
            Event::Start(element) => state.start(&element, false)?,
            Event::Empty(element) => state.start(&element, true)?,
            Event::End(element) => state.end(element.local_name().as_ref()),
            Event::Eof => break,
            _ => {}
        }
    }

    if !state.saw_graph {
        return Err(Error::invalid_format("missing <graph> element"));
    }
    Ok(state.doc)
}

pub fn read_gexf_file(path: impl AsRef<Path>) -> Result<GexfDocument> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path).map_err(|e| {
        Error::from(e)
            .with_operation("gexf::read_file")
            .with_context("path", path.display().to_string())
    })?;
    read_gexf(&xml)
}
