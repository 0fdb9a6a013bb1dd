use anyhow::{Context, Result};
use clap::Parser;
use hntn_results::{milestone, pipeline, Config};
use log::LevelFilter;
use std::path::PathBuf;

/// Compare baseline and hypothesis training logs and write one CSV per metric.
#[derive(Parser, Debug)]
#[command(name = "process-results", version)]
struct Args {
    /// Dataset identifier used in log and report file names (default from config: fb15k_237)
    dataset: Option<String>,

    /// Directory holding the *_baseline.log and *_hypothesis.log files
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Directory the CSV reports are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Keep only epochs divisible by this
    #[arg(long)]
    cadence: Option<u64>,

    /// Fail when an epoch does not have three values per run
    #[arg(long)]
    strict: bool,

    /// Show per-record detail on the console
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load()?;
    if let Some(dataset) = args.dataset {
        config.run.dataset = dataset;
    }
    if let Some(results_dir) = args.results_dir {
        config.paths.results_dir = results_dir;
    }
    if let Some(output_dir) = args.output_dir {
        config.paths.output_dir = output_dir;
    }
    if let Some(cadence) = args.cadence {
        config.run.cadence = cadence;
    }
    if args.strict {
        config.run.strict_columns = true;
    }
    if args.verbose {
        config.logging.detail = LevelFilter::Debug.to_string();
    }
    config.validate()?;

    let diag = config.diagnostics()?;
    diag.init_logger();

    milestone!(diag, "START!");
    let options = config.run_options();
    let summary = pipeline::run(&options, &diag)
        .with_context(|| format!("Failed to process results for dataset {}", config.run.dataset))?;
    milestone!(
        diag,
        "Wrote {} reports ({} baseline epochs, {} hypothesis epochs)",
        summary.written.len(),
        summary.baseline_epochs,
        summary.hypothesis_epochs
    );
    milestone!(diag, "DONE!");

    Ok(())
}
