//! Statement results to graph, tables and failures.

use std::time::Instant;

use tracing::{info, warn};

use graphex_error::Error;

use crate::builder::{BuildOptions, GraphBuilder, ResultGraph};
use crate::cell::{ResultTable, StatementResult};

/// A successful statement's raw table, kept for tabular output.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementTable {
    pub statement: String,
    pub table: ResultTable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFailure {
    pub statement: String,
    pub code: i32,
    pub message: String,
}

impl QueryFailure {
    pub fn to_error(&self) -> Error {
        Error::query_failed(&self.statement, self.code, &self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Materialization {
    pub graph: ResultGraph,
    pub tables: Vec<StatementTable>,
    pub failures: Vec<QueryFailure>,
}

impl Materialization {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Fold every successful statement into one graph.
///
/// A failed statement contributes nothing to the graph and does not affect
/// the statements around it.
pub fn materialize(results: &[StatementResult], options: BuildOptions) -> Materialization {
    let start = Instant::now();
    let mut builder = GraphBuilder::with_options(options);
    let mut tables = Vec::new();
    let mut failures = Vec::new();

    for result in results {
        if !result.is_succeeded() {
            warn!(
                statement = %result.statement,
                code = result.error_code,
                "statement failed: {}",
                result.error_msg
            );
            failures.push(QueryFailure {
                statement: result.statement.clone(),
                code: result.error_code,
                message: result.error_msg.clone(),
            });
            continue;
        }

        builder.add_table(&result.table);
        tables.push(StatementTable {
            statement: result.statement.clone(),
            table: result.table.clone(),
        });
    }

    let graph = builder.finish();
    info!(
        statements = results.len(),
        failed = failures.len(),
        nodes = graph.presentation().node_count(),
        edges = graph.presentation().edge_count(),
        "materialized result graph in {:.2?}",
        start.elapsed()
    );

    Materialization {
        graph,
        tables,
        failures,
    }
}
