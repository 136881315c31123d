//! Query execution seam.
//!
//! The core never talks to a database itself. Anything able to turn a
//! statement into a [`StatementResult`] can drive it, including
//! [`RecordedExecutor`], which replays results captured earlier.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, info};

use graphex_error::{Error, Result};

use crate::cell::StatementResult;

/// Error code reported for statements a [`RecordedExecutor`] cannot answer.
pub const NOT_RECORDED_CODE: i32 = -1;

pub trait QueryExecutor {
    /// Run one statement. Failures are reported through the result's error
    /// code, never by panicking.
    fn execute(&mut self, statement: &str) -> StatementResult;
}

/// Split a query on `;`, trimming pieces and dropping empty ones.
pub fn split_statements(query: &str) -> Vec<String> {
    query
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Execute every statement of `query` in order.
///
/// With a `space`, `USE <space>` is issued before each statement; a failing
/// switch is reported as that statement's failure.
pub fn run_statements<E: QueryExecutor + ?Sized>(
    executor: &mut E,
    query: &str,
    space: Option<&str>,
) -> Vec<StatementResult> {
    split_statements(query)
        .into_iter()
        .map(|statement| {
            if let Some(space) = space {
                let switched = executor.execute(&format!("USE {space}"));
                if !switched.is_succeeded() {
                    debug!(space, code = switched.error_code, "space switch failed");
                    return StatementResult::failure(
                        statement,
                        switched.error_code,
                        switched.error_msg,
                    );
                }
            }
            let mut result = executor.execute(&statement);
            result.statement = statement;
            result
        })
        .collect()
}

fn is_use_statement(statement: &str) -> bool {
    statement
        .get(..4)
        .is_some_and(|head| head.eq_ignore_ascii_case("use "))
}

#[derive(Debug, Deserialize)]
struct RecordedDocument {
    statements: Vec<StatementResult>,
}

/// Replays a recorded-results document.
///
/// ```json
/// {"statements": [{"statement": "MATCH ...", "columns": [...], "rows": [...]}]}
/// ```
///
/// Statements are matched on their trimmed text. When a statement is
/// recorded more than once the first recording answers.
#[derive(Debug, Clone, Default)]
pub struct RecordedExecutor {
    recorded: IndexMap<String, StatementResult>,
}

impl RecordedExecutor {
    pub fn new(results: impl IntoIterator<Item = StatementResult>) -> Self {
        let mut recorded = IndexMap::new();
        for result in results {
            let key = result.statement.trim().to_string();
            recorded.entry(key).or_insert(result);
        }
        Self { recorded }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let document: RecordedDocument = serde_json::from_str(json)
            .map_err(|e| Error::deserialization_failed("recorded results", e))?;
        Ok(Self::new(document.statements))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        let json = fs::read_to_string(path)
            .map_err(|e| Error::from(e).with_operation("executor::from_path"))?;
        let executor = Self::from_json(&json)
            .map_err(|e| e.with_context("path", path.display().to_string()))?;
        info!(
            path = %path.display(),
            statements = executor.len(),
            "loaded recorded results"
        );
        Ok(executor)
    }

    /// Recorded statement texts, in recording order.
    pub fn statements(&self) -> Vec<&str> {
        self.recorded.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.recorded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recorded.is_empty()
    }
}

impl QueryExecutor for RecordedExecutor {
    fn execute(&mut self, statement: &str) -> StatementResult {
        let statement = statement.trim();
        if let Some(result) = self.recorded.get(statement) {
            return result.clone();
        }
        if is_use_statement(statement) {
            return StatementResult::success(statement, Default::default());
        }
        let err = Error::statement_not_recorded(statement);
        debug!(statement, "{err}");
        StatementResult::failure(statement, NOT_RECORDED_CODE, err.message())
    }
}
