//! Training log parser.
//!
//! Extracts `(epoch, metric, value)` records from lines shaped like
//! `Epoch: 10, Hits @1_evaluation: 0.42`, keeps epochs on the reporting cadence,
//! and accumulates them into a [`ParseResult`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;

use super::{Metric, ParseResult};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::{detail, milestone};

/// Only epochs divisible by this are kept unless configured otherwise.
pub const DEFAULT_CADENCE: u64 = 10;

/// Groups: 1 = epoch label, 2 = metric reading, 3 = metric label.
const LINE_PATTERN: &str = r"(Epoch: [0-9]+), (([a-zA-Z0-9\s@]+)_[a-z]+: [0-9]+\.?[0-9]*)";

/// One matched log line, before cadence filtering and metric dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Verbatim epoch label, e.g. `"Epoch: 10"`.
    pub epoch: String,
    /// Metric label as logged, e.g. `"Hits @1"`.
    pub label: String,
    pub value: f64,
}

pub struct LogParser {
    pattern: Regex,
    cadence: u64,
}

impl LogParser {
    /// Build a parser keeping epochs where `epoch % cadence == 0`.
    pub fn new(cadence: u64) -> Result<Self> {
        if cadence == 0 {
            return Err(crate::error::ResultsError::Config(
                "cadence must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            pattern: Regex::new(LINE_PATTERN)?,
            cadence,
        })
    }

    /// Match a single (already trimmed) line. Returns `None` when the line does not
    /// have the expected shape; cadence is not applied here.
    pub fn parse_line(&self, line: &str) -> Option<LogRecord> {
        let caps = self.pattern.captures(line)?;
        let epoch = caps.get(1)?.as_str();
        let reading = caps.get(2)?.as_str();
        let label = caps.get(3)?.as_str();

        let value = reading.split(':').nth(1)?.trim().parse::<f64>().ok()?;

        Some(LogRecord {
            epoch: epoch.to_string(),
            label: label.to_string(),
            value,
        })
    }

    /// True when the record's epoch falls on the reporting cadence.
    ///
    /// The remainder is folded digit by digit, so epoch numbers of any length work.
    pub fn on_cadence(&self, record: &LogRecord) -> bool {
        let cadence = u128::from(self.cadence);
        let remainder = record
            .epoch
            .bytes()
            .filter(u8::is_ascii_digit)
            .fold(0u128, |r, d| (r * 10 + u128::from(d - b'0')) % cadence);
        remainder == 0
    }

    /// Parse every line from `reader` into the six metric series.
    pub fn parse_reader<R: BufRead>(&self, reader: R, diag: &Diagnostics) -> Result<ParseResult> {
        let mut results = ParseResult::new();

        for chunk in reader.lines() {
            let chunk = chunk?;
            // A bare '\r' also ends a line.
            for line in chunk.split('\r') {
                self.accumulate(line.trim(), &mut results, diag);
            }
        }

        Ok(results)
    }

    fn accumulate(&self, line: &str, results: &mut ParseResult, diag: &Diagnostics) {
        detail!(diag, "line: {}", line);

        let Some(record) = self.parse_line(line) else {
            return;
        };
        detail!(diag, "record: {:?}", record);

        if !self.on_cadence(&record) {
            return;
        }

        let Some(metric) = Metric::from_label(&record.label) else {
            detail!(diag, "unrecognized metric: {}", record.label);
            return;
        };

        let series = results.series_mut(metric);
        series.push(&record.epoch, record.value);
        detail!(diag, "results_{}: {}", metric, series);
    }

    /// Open `path` and parse it. Fails if the file cannot be opened or read.
    pub fn parse_file(&self, path: &Path, diag: &Diagnostics) -> Result<ParseResult> {
        let file = File::open(path)?;
        let results = self.parse_reader(BufReader::new(file), diag)?;

        for (metric, series) in results.iter() {
            milestone!(diag, "results_{}: {}", metric, series);
        }

        Ok(results)
    }
}

/// Convenience wrapper: build a parser with `cadence` and parse the file at `path`.
pub fn parse_results(path: &Path, cadence: u64, diag: &Diagnostics) -> Result<ParseResult> {
    LogParser::new(cadence)?.parse_file(path, diag)
}
