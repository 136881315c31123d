//! graphex command-line interface.
//!
pub mod config;
pub mod options;
pub mod output;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use graphex_core::{
    BuildOptions, Materialization, QueryExecutor, RecordedExecutor, materialize, run_statements,
};
use graphex_error::{Error, Result};
use graphex_render::{HtmlOptions, VisScript};

pub use config::GraphexConfig;
pub use options::{DEFAULT_STEM, InputOptions, OutputOptions, OutputSelection, ProcessingOptions};
pub use output::{OutputPaths, render_tables, write_outputs};

/// Options for running graphex, command line and config file merged.
#[derive(Debug, Clone)]
pub struct GraphexOptions {
    pub results: PathBuf,
    /// `None` replays every recorded statement.
    pub query: Option<String>,
    pub space: Option<String>,
    pub out_dir: PathBuf,
    pub stem: String,
    pub outputs: OutputSelection,
    pub parallel: bool,
    pub show_table: bool,
    pub html: HtmlOptions,
}

impl GraphexOptions {
    pub fn new(results: impl Into<PathBuf>) -> Self {
        Self {
            results: results.into(),
            query: None,
            space: None,
            out_dir: PathBuf::from("."),
            stem: DEFAULT_STEM.to_string(),
            outputs: OutputSelection::all(),
            parallel: false,
            show_table: false,
            html: HtmlOptions::default(),
        }
    }

    /// Merge command-line options over the optional config file.
    pub fn resolve(
        input: InputOptions,
        output: OutputOptions,
        processing: ProcessingOptions,
    ) -> Result<Self> {
        let config = match &processing.config {
            Some(path) => GraphexConfig::load(path)?,
            None => GraphexConfig::default(),
        };

        let query = match (input.query, &input.query_file) {
            (Some(query), _) => Some(query),
            (None, Some(path)) => Some(fs::read_to_string(path).map_err(|e| {
                Error::from(e)
                    .with_operation("options::query_file")
                    .with_context("path", path.display().to_string())
            })?),
            (None, None) => None,
        };

        let defaults = HtmlOptions::default();
        let script = match output.vis_js.as_ref().or(config.html.vis_js.as_ref()) {
            Some(path) => VisScript::inline_file(path)?,
            None => defaults.script,
        };
        let highlight_neighbors = !output.no_highlight
            && config
                .html
                .highlight_neighbors
                .unwrap_or(defaults.highlight_neighbors);
        let outputs = output.selection();
        Ok(Self {
            results: input.results,
            query,
            space: input.space,
            out_dir: output
                .out_dir
                .or(config.output.dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            stem: output
                .stem
                .or(config.output.stem)
                .unwrap_or_else(|| DEFAULT_STEM.to_string()),
            outputs,
            parallel: processing.parallel,
            show_table: processing.show_table,
            html: HtmlOptions {
                title: config.html.title.unwrap_or(defaults.title),
                height: config.html.height.unwrap_or(defaults.height),
                script,
                highlight_neighbors,
            },
        })
    }
}

/// What a run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub materialization: Materialization,
    pub written: OutputPaths,
}

/// Main entry point
pub fn run_main(opts: &GraphexOptions) -> Result<RunSummary> {
    let start = Instant::now();
    let mut executor = RecordedExecutor::from_path(&opts.results)?;
    let materialization = execute(&mut executor, opts);
    info!("Query execution: {:.2}s", start.elapsed().as_secs_f64());

    let written = write_outputs(opts, &materialization)?;
    Ok(RunSummary {
        materialization,
        written,
    })
}

/// Run the configured statements on `executor` and fold the results.
pub fn execute(executor: &mut RecordedExecutor, opts: &GraphexOptions) -> Materialization {
    let query = match &opts.query {
        Some(query) => query.clone(),
        None => executor.statements().join(";"),
    };
    run_on(executor, &query, opts)
}

fn run_on<E: QueryExecutor>(
    executor: &mut E,
    query: &str,
    opts: &GraphexOptions,
) -> Materialization {
    let results = run_statements(executor, query, opts.space.as_deref());
    materialize(&results, BuildOptions::default().parallel(opts.parallel))
}
