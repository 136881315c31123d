use std::time::Instant;

use clap::Parser;

use graphex::{
    GraphexOptions, InputOptions, OutputOptions, ProcessingOptions, render_tables, run_main,
};
use graphex_error::Result;

#[derive(Parser, Debug)]
#[command(
    name = "graphex",
    about = "graphex: graph query results to Gephi and the browser",
    version
)]
pub struct Cli {
    #[command(flatten)]
    input: InputOptions,

    #[command(flatten)]
    output: OutputOptions,

    #[command(flatten)]
    processing: ProcessingOptions,
}

pub fn run(args: Cli) -> Result<()> {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = GraphexOptions::resolve(args.input, args.output, args.processing)?;
    let summary = run_main(&opts)?;

    for failure in &summary.materialization.failures {
        eprintln!(
            "Warning: statement `{}` failed ({}): {}",
            failure.statement, failure.code, failure.message
        );
        let error = failure.to_error();
        tracing::warn!(kind = error.kind().as_str(), %error, "statement skipped");
    }

    if opts.show_table {
        print!("{}", render_tables(&summary.materialization));
    }

    for path in summary.written.all() {
        eprintln!("Wrote {}", path.display());
    }
    if !summary.materialization.graph.is_renderable() {
        eprintln!("No graph to visualize: results need at least one node and one edge.");
    }

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    Ok(())
}

pub fn main() -> Result<()> {
    let args = Cli::parse();
    run(args)
}
