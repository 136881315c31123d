//! Raw query results as delivered by a [`QueryExecutor`](crate::QueryExecutor).

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::value::RawValue;

/// One cell of a tabular query result.
///
/// Recorded results encode cells as `{"type": "...", "value": ...}`. A
/// `type` outside the known set decodes to [`RawCell::Unknown`] whatever its
/// value holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RawCell {
    Scalar(RawValue),
    Vertex(RawVertex),
    Edge(RawEdge),
    Path(RawPath),
    List(Vec<RawCell>),
    /// Geometry values are opaque; only their text form is kept.
    Geometry(String),
    /// Any cell type this crate does not know about, e.g. maps and sets.
    Unknown,
}

impl<'de> Deserialize<'de> for RawCell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            #[serde(rename = "type")]
            kind: String,
            #[serde(default)]
            value: Value,
        }

        let Envelope { kind, value } = Envelope::deserialize(deserializer)?;
        let cell = match kind.as_str() {
            "scalar" => serde_json::from_value(value).map(RawCell::Scalar),
            "vertex" => serde_json::from_value(value).map(RawCell::Vertex),
            "edge" => serde_json::from_value(value).map(RawCell::Edge),
            "path" => serde_json::from_value(value).map(RawCell::Path),
            "list" => serde_json::from_value(value).map(RawCell::List),
            "geometry" => serde_json::from_value(value).map(RawCell::Geometry),
            _ => Ok(RawCell::Unknown),
        };
        cell.map_err(D::Error::custom)
    }
}

/// A vertex exactly as returned: per-tag property mappings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVertex {
    #[serde(deserialize_with = "de_vid")]
    pub id: String,
    pub tags: Vec<RawTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTag {
    pub name: String,
    #[serde(default)]
    pub props: IndexMap<String, RawValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEdge {
    #[serde(deserialize_with = "de_vid")]
    pub src: String,
    #[serde(deserialize_with = "de_vid")]
    pub dst: String,
    /// Edge type name.
    pub name: String,
    #[serde(default)]
    pub props: IndexMap<String, RawValue>,
}

/// A walk: `nodes[0] -relationships[0]-> nodes[1] -> ...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPath {
    pub nodes: Vec<RawVertex>,
    pub relationships: Vec<RawEdge>,
}

/// Vertex ids may be integers or strings depending on the space's id type.
fn de_vid<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Vid {
        Int(i64),
        Str(String),
    }

    Ok(match Vid::deserialize(deserializer)? {
        Vid::Int(i) => i.to_string(),
        Vid::Str(s) => s,
    })
}

/// Column names plus row-major cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<RawCell>>,
}

impl ResultTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<RawCell>>) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, in row order.
    pub fn column_values(&self, name: &str) -> Option<Vec<&RawCell>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().filter_map(|row| row.get(index)).collect())
    }
}

/// Outcome of one statement: either a table or a non-zero error code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementResult {
    pub statement: String,
    #[serde(default)]
    pub error_code: i32,
    #[serde(default)]
    pub error_msg: String,
    #[serde(flatten)]
    pub table: ResultTable,
}

impl StatementResult {
    pub fn success(statement: impl Into<String>, table: ResultTable) -> Self {
        Self {
            statement: statement.into(),
            error_code: 0,
            error_msg: String::new(),
            table,
        }
    }

    pub fn failure(statement: impl Into<String>, code: i32, message: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            error_code: code,
            error_msg: message.into(),
            table: ResultTable::default(),
        }
    }

    pub fn is_succeeded(&self) -> bool {
        self.error_code == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_vertex_cell_with_integer_id() {
        let cell: RawCell = serde_json::from_str(
            r#"{"type": "vertex", "value": {"id": 100, "tags": [{"name": "player", "props": {"age": 42}}]}}"#,
        )
        .unwrap();
        let RawCell::Vertex(vertex) = cell else {
            panic!("expected a vertex cell");
        };
        assert_eq!(vertex.id, "100");
        assert_eq!(vertex.tags[0].name, "player");
        assert_eq!(vertex.tags[0].props["age"], RawValue::Int(42));
    }

    #[test]
    fn test_decode_list_and_scalar_cells() {
        let cell: RawCell = serde_json::from_str(
            r#"{"type": "list", "value": [{"type": "scalar", "value": "x"}, {"type": "geometry", "value": "POINT(3 8)"}]}"#,
        )
        .unwrap();
        assert_eq!(
            cell,
            RawCell::List(vec![
                RawCell::Scalar(RawValue::Str("x".to_string())),
                RawCell::Geometry("POINT(3 8)".to_string()),
            ])
        );
        assert!(cell.is_composite());
    }

    #[test]
    fn test_decode_unrecognized_cell_shapes() {
        let cells: Vec<RawCell> = serde_json::from_str(
            r#"[
                {"type": "map", "value": {"a": 1, "b": [1, 2]}},
                {"type": "set", "value": [1, 2, 3]},
                {"type": "dataset"}
            ]"#,
        )
        .unwrap();
        assert_eq!(cells, vec![RawCell::Unknown, RawCell::Unknown, RawCell::Unknown]);
    }

    #[test]
    fn test_unrecognized_cell_does_not_fail_the_row() {
        let result: StatementResult = serde_json::from_str(
            r#"{"statement": "RETURN {a: 1} AS m, 2 AS n", "columns": ["m", "n"],
                "rows": [[{"type": "map", "value": {"a": 1}}, {"type": "scalar", "value": 2}]]}"#,
        )
        .unwrap();
        assert_eq!(
            result.table.rows[0],
            vec![RawCell::Unknown, RawCell::Scalar(RawValue::Int(2))]
        );
    }

    #[test]
    fn test_known_cell_with_bad_value_is_an_error() {
        let err = serde_json::from_str::<RawCell>(r#"{"type": "vertex", "value": 3}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_decode_statement_result() {
        let result: StatementResult = serde_json::from_str(
            r#"{"statement": "SHOW SPACES", "columns": ["Name"], "rows": [[{"type": "scalar", "value": "basketballplayer"}]]}"#,
        )
        .unwrap();
        assert!(result.is_succeeded());
        assert_eq!(result.table.columns, vec!["Name"]);
        assert_eq!(result.table.column_values("Name").map(|v| v.len()), Some(1));
        assert!(result.table.column_values("Missing").is_none());
    }

    #[test]
    fn test_decode_failed_statement() {
        let result: StatementResult = serde_json::from_str(
            r#"{"statement": "GO FROM", "error_code": -1004, "error_msg": "SyntaxError: syntax error near `FROM'"}"#,
        )
        .unwrap();
        assert!(!result.is_succeeded());
        assert!(result.table.is_empty());
    }
}
