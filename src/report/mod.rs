//! Comparison reports: merge a hypothesis run with its baseline, one CSV per metric.

mod table;

pub use table::{ComparisonTable, Row, COLUMN_SUFFIXES};

use std::fs::{self, File};
use std::path::PathBuf;

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::layout::RunLayout;
use crate::results::{Metric, ParseResult};
use crate::{detail, milestone};

/// Writes comparison tables to the paths given by a [`RunLayout`].
pub struct ReportWriter<'a> {
    layout: &'a RunLayout,
    strict_columns: bool,
    diag: &'a Diagnostics,
}

impl<'a> ReportWriter<'a> {
    pub fn new(layout: &'a RunLayout, strict_columns: bool, diag: &'a Diagnostics) -> Self {
        Self {
            layout,
            strict_columns,
            diag,
        }
    }

    /// Merge and write one metric. The merge runs before the file is opened, so an
    /// alignment failure leaves the destination untouched.
    pub fn write_metric(
        &self,
        metric: Metric,
        baseline: &ParseResult,
        hypothesis: &ParseResult,
    ) -> Result<(PathBuf, usize)> {
        let table = ComparisonTable::merge(
            metric,
            baseline.series(metric),
            hypothesis.series(metric),
            self.strict_columns,
        )?;

        for row in table.rows() {
            if row.values.len() != COLUMN_SUFFIXES.len() {
                self.diag.warn(format_args!(
                    "{} '{}' has {} values for {} columns",
                    metric,
                    row.epoch,
                    row.values.len(),
                    COLUMN_SUFFIXES.len()
                ));
            }
            detail!(self.diag, "result: {:?}", row.values);
        }

        let path = self.layout.report_path(metric);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&path)?;
        table.write_to(file)?;
        detail!(self.diag, "wrote {} rows to {}", table.len(), path.display());

        Ok((path, table.len()))
    }

    /// Write all six metrics in report order. Stops at the first failure; files
    /// already written are left in place.
    pub fn write_all(
        &self,
        baseline: &ParseResult,
        hypothesis: &ParseResult,
    ) -> Result<Vec<(Metric, PathBuf, usize)>> {
        let mut written = Vec::with_capacity(Metric::ALL.len());
        for metric in Metric::ALL {
            let (path, rows) = self.write_metric(metric, baseline, hypothesis)?;
            milestone!(self.diag, "✓ {} ({} rows)", path.display(), rows);
            written.push((metric, path, rows));
        }
        Ok(written)
    }
}
