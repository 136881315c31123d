//! Output generation (GEXF, HTML, CSV).

use std::fmt::Write;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use graphex_core::Materialization;
use graphex_error::{Error, Result};
use graphex_gexf::write_gexf_file;
use graphex_render::{TableView, write_html};

use crate::GraphexOptions;

/// Files written by one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPaths {
    pub gexf: Option<PathBuf>,
    pub html: Option<PathBuf>,
    pub csv: Vec<PathBuf>,
}

impl OutputPaths {
    pub fn all(&self) -> Vec<&PathBuf> {
        self.gexf
            .iter()
            .chain(self.html.iter())
            .chain(self.csv.iter())
            .collect()
    }
}

/// Write every selected output into `opts.out_dir`.
///
/// The GEXF file is always written, empty graphs included. The HTML page is
/// only written for a renderable graph. CSV files are numbered `<stem>_1.csv`,
/// `<stem>_2.csv`, ... over the non-empty successful tables.
pub fn write_outputs(
    opts: &GraphexOptions,
    materialization: &Materialization,
) -> Result<OutputPaths> {
    let write_start = Instant::now();
    fs::create_dir_all(&opts.out_dir).map_err(|e| {
        Error::from(e)
            .with_operation("output::create_dir")
            .with_context("path", opts.out_dir.display().to_string())
    })?;

    let mut written = OutputPaths::default();
    let graph = &materialization.graph;

    if opts.outputs.gexf {
        if graph.analytic().is_empty() {
            info!("no graph elements, writing an empty gexf document");
        }
        let path = opts.out_dir.join(format!("{}.gexf", opts.stem));
        write_gexf_file(graph.analytic(), &path)?;
        written.gexf = Some(path);
    }

    if opts.outputs.html {
        if graph.is_renderable() {
            let path = opts.out_dir.join(format!("{}.html", opts.stem));
            write_html(graph.presentation(), &opts.html, &path)?;
            written.html = Some(path);
        } else {
            info!("graph has no edges to draw, skipping html");
        }
    }

    if opts.outputs.csv {
        let views = materialization
            .tables
            .iter()
            .map(|t| TableView::from_result(&t.table))
            .filter(|view| !view.is_empty());
        for (n, view) in views.enumerate() {
            let path = opts.out_dir.join(format!("{}_{}.csv", opts.stem, n + 1));
            view.write_csv(&path)?;
            written.csv.push(path);
        }
    }

    info!(
        files = written.all().len(),
        "Output writing: {:.2}s",
        write_start.elapsed().as_secs_f64()
    );
    Ok(written)
}

/// Text tables of every successful statement, each headed by its statement.
pub fn render_tables(materialization: &Materialization) -> String {
    let mut out = String::new();
    for table in &materialization.tables {
        let _ = writeln!(out, "{}", table.statement);
        let _ = writeln!(out, "{}", TableView::from_result(&table.table).to_terminal());
        let _ = writeln!(out);
    }
    out
}
