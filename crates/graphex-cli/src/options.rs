//! Command-line options.

use std::path::PathBuf;

use clap::Args;

pub const DEFAULT_STEM: &str = "nebulagraph_export";

/// Where the statements come from.
#[derive(Args, Debug, Clone, Default)]
pub struct InputOptions {
    /// Recorded results document to replay (JSON).
    #[arg(short = 'r', long = "results", value_name = "FILE")]
    pub results: PathBuf,

    /// Statements to run, separated by ';'. Defaults to every recorded
    /// statement.
    #[arg(
        short = 'q',
        long = "query",
        value_name = "TEXT",
        conflicts_with = "query_file"
    )]
    pub query: Option<String>,

    /// Read the statements from a file instead.
    #[arg(long = "query-file", value_name = "FILE")]
    pub query_file: Option<PathBuf>,

    /// Graph space switched to before every statement.
    #[arg(long, value_name = "NAME")]
    pub space: Option<String>,
}

/// Which files to produce and where.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputOptions {
    /// Output directory [default: current directory]
    #[arg(short = 'o', long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// File name stem of every output [default: nebulagraph_export]
    #[arg(long, value_name = "NAME")]
    pub stem: Option<String>,

    /// Write the GEXF exchange file.
    #[arg(long)]
    pub gexf: bool,

    /// Write the interactive HTML page.
    #[arg(long)]
    pub html: bool,

    /// Write one CSV file per result table.
    #[arg(long)]
    pub csv: bool,

    /// Local vis-network bundle to embed, making the HTML page work offline.
    #[arg(long = "vis-js", value_name = "FILE")]
    pub vis_js: Option<PathBuf>,

    /// Do not dim the rest of the graph when a node is clicked.
    #[arg(long = "no-highlight")]
    pub no_highlight: bool,
}

/// Processing behavior.
#[derive(Args, Debug, Clone, Default)]
pub struct ProcessingOptions {
    /// Normalize result rows in parallel. Output order is unchanged.
    #[arg(long)]
    pub parallel: bool,

    /// Print every result table to stdout.
    #[arg(long = "show-table")]
    pub show_table: bool,

    /// TOML configuration file.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Output kinds to produce. Selecting none selects all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSelection {
    pub gexf: bool,
    pub html: bool,
    pub csv: bool,
}

impl OutputSelection {
    pub fn all() -> Self {
        Self {
            gexf: true,
            html: true,
            csv: true,
        }
    }

    pub fn from_flags(gexf: bool, html: bool, csv: bool) -> Self {
        if !(gexf || html || csv) {
            return Self::all();
        }
        Self { gexf, html, csv }
    }
}

impl Default for OutputSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl OutputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    pub fn with_stem(mut self, stem: impl Into<String>) -> Self {
        self.stem = Some(stem.into());
        self
    }

    pub fn selection(&self) -> OutputSelection {
        OutputSelection::from_flags(self.gexf, self.html, self.csv)
    }
}
