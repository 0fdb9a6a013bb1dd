//! End-to-end run: parse the baseline and hypothesis logs, then write one
//! comparison table per metric.

use std::path::PathBuf;

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::layout::{RunKind, RunLayout};
use crate::report::ReportWriter;
use crate::results::{LogParser, Metric, ParseResult};
use crate::{detail, milestone};

/// Options for a single run; usually built from [`crate::Config`].
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub layout: RunLayout,
    pub cadence: u64,
    pub strict_columns: bool,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// `(metric, path, data rows)` in report order.
    pub written: Vec<(Metric, PathBuf, usize)>,
    pub baseline_epochs: usize,
    pub hypothesis_epochs: usize,
}

/// Distinct epoch labels seen across all metrics of a run.
fn epoch_count(results: &ParseResult) -> usize {
    let mut epochs: Vec<&str> = results.iter().flat_map(|(_, s)| s.epochs()).collect();
    epochs.sort_unstable();
    epochs.dedup();
    epochs.len()
}

fn parse_run(
    parser: &LogParser,
    layout: &RunLayout,
    kind: RunKind,
    diag: &Diagnostics,
) -> Result<ParseResult> {
    let path = layout.log_path(kind);
    detail!(diag, "path: {}", path.display());

    milestone!(diag, "Parsing {} results...", kind.as_str());
    let results = parser.parse_file(&path, diag)?;
    milestone!(diag, "Parsing {} results complete!", kind.as_str());

    Ok(results)
}

/// Parse both runs and write all six reports. Any failure aborts the run; reports
/// written before the failure stay on disk.
pub fn run(options: &RunOptions, diag: &Diagnostics) -> Result<RunSummary> {
    let parser = LogParser::new(options.cadence)?;

    let baseline = parse_run(&parser, &options.layout, RunKind::Baseline, diag)?;
    let hypothesis = parse_run(&parser, &options.layout, RunKind::Hypothesis, diag)?;

    milestone!(diag, "Writing results...");
    let writer = ReportWriter::new(&options.layout, options.strict_columns, diag);
    let written = writer.write_all(&baseline, &hypothesis)?;
    milestone!(diag, "Writing results complete!");

    Ok(RunSummary {
        written,
        baseline_epochs: epoch_count(&baseline),
        hypothesis_epochs: epoch_count(&hypothesis),
    })
}
