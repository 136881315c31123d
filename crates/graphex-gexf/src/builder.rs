//! GEXF text builder.

use std::borrow::Cow;
use std::fmt::Write;

use quick_xml::escape::escape;

use crate::schema::{AttrClass, Attribute};

pub const GEXF_NAMESPACE: &str = "http://www.gexf.net/1.2draft";

fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// Escape text for a double-quoted attribute value.
///
/// Whitespace other than the space character is written as a character
/// reference; XML readers normalize literal newlines and tabs in attribute
/// values to spaces.
fn escape_attr(value: &str) -> Cow<'_, str> {
    let escaped = escape(value);
    if !escaped.contains(['\n', '\r', '\t']) {
        return escaped;
    }
    let mut out = String::with_capacity(escaped.len() + 8);
    for c in escaped.chars() {
        match c {
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Builds a directed, static GEXF 1.2 document.
///
/// Calls must follow document order: attribute tables, then the node
/// section, then the edge section.
pub struct GexfBuilder {
    output: String,
    indent: usize,
}

impl GexfBuilder {
    pub fn new(creator: &str) -> Self {
        let mut output = String::with_capacity(4096);
        output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(output, "<gexf xmlns=\"{GEXF_NAMESPACE}\" version=\"1.2\">");
        let _ = writeln!(output, "  <meta>");
        let _ = writeln!(output, "    <creator>{}</creator>", escape(creator));
        let _ = writeln!(output, "  </meta>");
        let _ = writeln!(
            output,
            "  <graph mode=\"static\" defaultedgetype=\"directed\">"
        );
        Self { output, indent: 2 }
    }

    /// Declare the attribute table of `class`. Empty tables are skipped.
    pub fn attributes(&mut self, class: AttrClass, attributes: &[Attribute]) -> &mut Self {
        if attributes.is_empty() {
            return self;
        }
        self.line(&format!("<attributes class=\"{}\">", class.as_str()));
        self.indent += 1;
        for attribute in attributes {
            self.line(&format!(
                "<attribute id=\"{}\" title=\"{}\" type=\"{}\"/>",
                escape_attr(&attribute.id),
                escape_attr(&attribute.title),
                attribute.kind.as_str()
            ));
        }
        self.indent -= 1;
        self.line("</attributes>");
        self
    }

    pub fn start_nodes(&mut self) -> &mut Self {
        self.open("<nodes>")
    }

    pub fn end_nodes(&mut self) -> &mut Self {
        self.close("</nodes>")
    }

    pub fn start_edges(&mut self) -> &mut Self {
        self.open("<edges>")
    }

    pub fn end_edges(&mut self) -> &mut Self {
        self.close("</edges>")
    }

    /// Add a node with `(attribute id, value)` pairs.
    pub fn node(&mut self, id: &str, label: &str, values: &[(usize, String)]) -> &mut Self {
        let head = format!("<node id=\"{}\" label=\"{}\"", escape_attr(id), escape_attr(label));
        self.element(&head, "</node>", values)
    }

    /// Add an edge with `(attribute id, value)` pairs.
    pub fn edge(
        &mut self,
        id: usize,
        source: &str,
        target: &str,
        label: &str,
        values: &[(usize, String)],
    ) -> &mut Self {
        let head = format!(
            "<edge id=\"{id}\" source=\"{}\" target=\"{}\" label=\"{}\"",
            escape_attr(source),
            escape_attr(target),
            escape_attr(label)
        );
        self.element(&head, "</edge>", values)
    }

    /// Finish building and return the GEXF string.
    pub fn build(mut self) -> String {
        self.output.push_str("  </graph>\n</gexf>\n");
        self.output
    }

    fn element(&mut self, head: &str, tail: &str, values: &[(usize, String)]) -> &mut Self {
        if values.is_empty() {
            return self.line(&format!("{head}/>"));
        }
        self.open(&format!("{head}>"));
        self.open("<attvalues>");
        for (id, value) in values {
            self.line(&format!(
                "<attvalue for=\"{id}\" value=\"{}\"/>",
                escape_attr(value.as_str())
            ));
        }
        self.close("</attvalues>");
        self.close(tail)
    }

    fn line(&mut self, text: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        self.output.push_str(text);
        self.output.push('\n');
        self
    }

    fn open(&mut self, text: &str) -> &mut Self {
        self.line(text);
        self.indent += 1;
        self
    }

    fn close(&mut self, text: &str) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        self.line(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AttrType;

    #[test]
    fn test_document_shape() {
        let mut builder = GexfBuilder::new("graphex");
        builder.attributes(
            AttrClass::Node,
            &[Attribute {
                id: "0".to_string(),
                title: "name".to_string(),
                kind: AttrType::String,
            }],
        );
        builder.start_nodes();
        builder.node("a", "a", &[(0, "Tom & \"Jerry\"".to_string())]);
        builder.node("b", "b", &[]);
        builder.end_nodes();
        builder.start_edges();
        builder.edge(0, "a", "b", "knows", &[]);
        builder.end_edges();
        let xml = builder.build();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(xml.contains("<attribute id=\"0\" title=\"name\" type=\"string\"/>"));
        assert!(xml.contains("value=\"Tom &amp; &quot;Jerry&quot;\""));
        assert!(xml.contains("      <node id=\"b\" label=\"b\"/>\n"));
        assert!(xml.contains("<edge id=\"0\" source=\"a\" target=\"b\" label=\"knows\"/>"));
        assert!(xml.ends_with("  </graph>\n</gexf>\n"));
    }

    #[test]
    fn test_attribute_whitespace_uses_character_references() {
        assert_eq!(escape_attr("plain"), "plain");
        assert_eq!(escape_attr("a\tb\r\nc & d"), "a&#9;b&#13;&#10;c &amp; d");

        let mut builder = GexfBuilder::new("graphex");
        builder.start_nodes();
        builder.node("a\nb", "a\nb", &[(0, "line1\nline2".to_string())]);
        builder.end_nodes();
        let xml = builder.build();

        assert!(xml.contains("<node id=\"a&#10;b\" label=\"a&#10;b\">"));
        assert!(xml.contains("value=\"line1&#10;line2\""));
        assert!(!xml.contains("line1\nline2"));
    }

    #[test]
    fn test_empty_attribute_table_is_skipped() {
        let mut builder = GexfBuilder::new("graphex");
        builder.attributes(AttrClass::Edge, &[]);
        assert!(!builder.build().contains("<attributes"));
    }
}
