//! Tabular view of raw statement results.

use std::fmt::Write as _;
use std::path::Path;

use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::info;

use graphex_core::{RawCell, RawEdge, RawTag, RawValue, RawVertex, ResultTable};
use graphex_error::{Error, ErrorKind, Result};

/// Text form of a cell. Composite values use the console notation, e.g.
/// `("player100" :player{age: 42})`.
pub fn cell_text(cell: &RawCell) -> String {
    let mut out = String::new();
    write_cell(&mut out, cell);
    out
}

fn write_cell(out: &mut String, cell: &RawCell) {
    match cell {
        RawCell::Scalar(value) => {
            let _ = write!(out, "{value}");
        }
        RawCell::Vertex(vertex) => write_vertex(out, vertex),
        RawCell::Edge(edge) => write_edge(out, edge),
        RawCell::Path(path) => {
            out.push('<');
            if let Some(first) = path.nodes.first() {
                write_vertex(out, first);
            }
            for (edge, next) in path.relationships.iter().zip(path.nodes.iter().skip(1)) {
                out.push_str("-[:");
                out.push_str(&edge.name);
                write_props(out, edge.props.iter());
                out.push_str("]->");
                write_vertex(out, next);
            }
            out.push('>');
        }
        RawCell::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_cell(out, item);
            }
            out.push(']');
        }
        RawCell::Geometry(text) => out.push_str(text),
        RawCell::Unknown => {}
    }
}

fn write_vertex(out: &mut String, vertex: &RawVertex) {
    let _ = write!(out, "(\"{}\"", vertex.id);
    for RawTag { name, props } in &vertex.tags {
        let _ = write!(out, " :{name}");
        write_props(out, props.iter());
    }
    out.push(')');
}

fn write_edge(out: &mut String, edge: &RawEdge) {
    let _ = write!(out, "(\"{}\")-[:{}", edge.src, edge.name);
    write_props(out, edge.props.iter());
    let _ = write!(out, "]->(\"{}\")", edge.dst);
}

fn write_props<'a>(out: &mut String, props: impl Iterator<Item = (&'a String, &'a RawValue)>) {
    out.push('{');
    for (i, (key, value)) in props.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        match value {
            RawValue::Str(s) => {
                let _ = write!(out, "{key}: \"{s}\"");
            }
            other => {
                let _ = write!(out, "{key}: {other}");
            }
        }
    }
    out.push('}');
}

/// A result table with every cell reduced to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn from_result(table: &ResultTable) -> Self {
        Self {
            columns: table.columns.clone(),
            rows: table
                .rows
                .iter()
                .map(|row| row.iter().map(cell_text).collect())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Comma separated text, header first.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        self.write_records(&mut writer)?;
        let bytes = writer
            .into_inner()
            .map_err(|e| Error::new(ErrorKind::SerializationFailed, e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| {
            Error::new(ErrorKind::SerializationFailed, e.to_string())
                .with_operation("table::to_csv")
        })
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| {
            csv_error(e)
                .with_operation("table::write_csv")
                .with_context("path", path.display().to_string())
        })?;
        self.write_records(&mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), rows = self.rows.len(), "wrote csv");
        Ok(())
    }

    fn write_records<W: std::io::Write>(&self, writer: &mut csv::Writer<W>) -> Result<()> {
        writer.write_record(&self.columns).map_err(csv_error)?;
        for row in &self.rows {
            writer.write_record(row).map_err(csv_error)?;
        }
        Ok(())
    }

    /// psql-style text table for terminal output.
    pub fn to_terminal(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.columns.iter().cloned());
        for row in &self.rows {
            builder.push_record(row.iter().cloned());
        }
        builder.build().with(Style::psql()).to_string()
    }
}

fn csv_error(err: csv::Error) -> Error {
    let kind = match err.kind() {
        csv::ErrorKind::Io(_) => ErrorKind::IoFailed,
        _ => ErrorKind::SerializationFailed,
    };
    Error::new(kind, err.to_string()).set_source(err)
}
