use std::io::Write;

use csv::{Terminator, WriterBuilder};

use crate::error::{Result, ResultsError};
use crate::results::{Metric, MetricSeries};

/// Column suffixes: three hypothesis splits followed by three baseline splits.
pub const COLUMN_SUFFIXES: [&str; 6] = [
    "training_hypothesis",
    "validation_hypothesis",
    "test_hypothesis",
    "training_baseline",
    "validation_baseline",
    "test_baseline",
];

/// One output row: hypothesis values then baseline values for a single epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub epoch: String,
    pub values: Vec<f64>,
}

/// Per-metric comparison of a hypothesis run against its baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    metric: Metric,
    rows: Vec<Row>,
}

impl ComparisonTable {
    /// Build rows in hypothesis epoch order. Every hypothesis epoch must exist in the
    /// baseline; epochs only present in the baseline are ignored.
    ///
    /// With `strict` set, a row whose value count differs from the header width is an
    /// error instead of being kept as-is.
    pub fn merge(
        metric: Metric,
        baseline: &MetricSeries,
        hypothesis: &MetricSeries,
        strict: bool,
    ) -> Result<Self> {
        let mut rows = Vec::with_capacity(hypothesis.len());

        for (epoch, observed) in hypothesis.iter() {
            let reference = baseline.get(epoch).ok_or_else(|| ResultsError::MissingEpoch {
                metric,
                epoch: epoch.to_string(),
            })?;

            let mut values = Vec::with_capacity(observed.len() + reference.len());
            values.extend_from_slice(observed);
            values.extend_from_slice(reference);

            if strict && values.len() != COLUMN_SUFFIXES.len() {
                return Err(ResultsError::ColumnMismatch {
                    metric,
                    epoch: epoch.to_string(),
                    expected: COLUMN_SUFFIXES.len(),
                    found: values.len(),
                });
            }

            rows.push(Row {
                epoch: epoch.to_string(),
                values,
            });
        }

        Ok(Self { metric, rows })
    }

    pub fn header(&self) -> Vec<String> {
        COLUMN_SUFFIXES
            .iter()
            .map(|suffix| format!("{}_{}", self.metric.key(), suffix))
            .collect()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize header and rows as CRLF-terminated CSV. Rows are written with
    /// whatever width they have.
    pub fn write_to<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .terminator(Terminator::CRLF)
            .from_writer(out);

        writer.write_record(self.header())?;
        for row in &self.rows {
            writer.write_record(row.values.iter().map(|v| format!("{:?}", v)))?;
        }
        writer.flush()?;
        Ok(())
    }
}
