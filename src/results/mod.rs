//! Parsed training results: the metric catalogue, per-metric series, and the log parser.
//!
//! A [`ParseResult`] holds one [`MetricSeries`] per [`Metric`], each mapping an epoch
//! label (e.g. `"Epoch: 10"`) to the values observed for that epoch in encounter order.

pub mod parser;

pub use parser::{parse_results, LogParser, LogRecord, DEFAULT_CADENCE};

use std::collections::HashMap;
use std::fmt;

/// The six evaluation metrics reported by a training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Cost,
    HitsAt10,
    HitsAt3,
    HitsAt1,
    MeanRank,
    MeanReciprocalRank,
}

impl Metric {
    /// All metrics in report order.
    pub const ALL: [Metric; 6] = [
        Metric::Cost,
        Metric::HitsAt10,
        Metric::HitsAt3,
        Metric::HitsAt1,
        Metric::MeanRank,
        Metric::MeanReciprocalRank,
    ];

    /// Label as it appears in the training log, before the `_<suffix>`.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Cost => "Mean evaluation cost",
            Metric::HitsAt10 => "Hits @10",
            Metric::HitsAt3 => "Hits @3",
            Metric::HitsAt1 => "Hits @1",
            Metric::MeanRank => "Mean rank",
            Metric::MeanReciprocalRank => "Mean reciprocal rank",
        }
    }

    /// Key used in output file names and CSV column headers.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Cost => "cost",
            Metric::HitsAt10 => "hits_at_10",
            Metric::HitsAt3 => "hits_at_3",
            Metric::HitsAt1 => "hits_at_1",
            Metric::MeanRank => "mean_rank",
            Metric::MeanReciprocalRank => "mean_reciprocal_rank",
        }
    }

    /// Exact, case-sensitive lookup of a log label.
    pub fn from_label(label: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.label() == label)
    }

    fn index(self) -> usize {
        match self {
            Metric::Cost => 0,
            Metric::HitsAt10 => 1,
            Metric::HitsAt3 => 2,
            Metric::HitsAt1 => 3,
            Metric::MeanRank => 4,
            Metric::MeanReciprocalRank => 5,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Epoch label -> observed values, keeping first-seen key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSeries {
    order: Vec<String>,
    values: HashMap<String, Vec<f64>>,
}

impl MetricSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `epoch`, creating the entry on first sight.
    pub fn push(&mut self, epoch: &str, value: f64) {
        match self.values.get_mut(epoch) {
            Some(observed) => observed.push(value),
            None => {
                self.order.push(epoch.to_string());
                self.values.insert(epoch.to_string(), vec![value]);
            }
        }
    }

    pub fn get(&self, epoch: &str) -> Option<&[f64]> {
        self.values.get(epoch).map(Vec::as_slice)
    }

    pub fn contains(&self, epoch: &str) -> bool {
        self.values.contains_key(epoch)
    }

    /// Epoch labels in insertion order.
    pub fn epochs(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `(epoch, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.order
            .iter()
            .map(move |epoch| (epoch.as_str(), self.values[epoch].as_slice()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl fmt::Display for MetricSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (epoch, values)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{}': {:?}", epoch, values)?;
        }
        f.write_str("}")
    }
}

/// The six series produced by parsing one log file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResult {
    series: [MetricSeries; 6],
}

impl ParseResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series(&self, metric: Metric) -> &MetricSeries {
        &self.series[metric.index()]
    }

    pub fn series_mut(&mut self, metric: Metric) -> &mut MetricSeries {
        &mut self.series[metric.index()]
    }

    /// Series paired with their metric, in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, &MetricSeries)> {
        Metric::ALL.into_iter().map(move |m| (m, self.series(m)))
    }

    /// True when no series holds any epoch.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(MetricSeries::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_exact_match() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_label(metric.label()), Some(metric));
        }
        assert_eq!(Metric::from_label("hits @10"), None);
        assert_eq!(Metric::from_label("Hits @10 "), None);
        assert_eq!(Metric::from_label("Hits @5"), None);
    }

    #[test]
    fn test_metric_keys_unique() {
        let mut keys: Vec<_> = Metric::ALL.iter().map(|m| m.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 6);
        assert_eq!(Metric::MeanReciprocalRank.to_string(), "mean_reciprocal_rank");
    }

    #[test]
    fn test_series_keeps_insertion_order_and_duplicates() {
        let mut series = MetricSeries::new();
        series.push("Epoch: 20", 1.0);
        series.push("Epoch: 0", 2.0);
        series.push("Epoch: 20", 3.0);

        let epochs: Vec<_> = series.epochs().collect();
        assert_eq!(epochs, vec!["Epoch: 20", "Epoch: 0"]);
        assert_eq!(series.get("Epoch: 20"), Some(&[1.0, 3.0][..]));
        assert_eq!(series.get("Epoch: 0"), Some(&[2.0][..]));
        assert!(series.get("Epoch: 10").is_none());
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_series_display() {
        let mut series = MetricSeries::new();
        series.push("Epoch: 0", 0.5);
        series.push("Epoch: 0", 0.25);
        assert_eq!(series.to_string(), "{'Epoch: 0': [0.5, 0.25]}");
    }

    #[test]
    fn test_parse_result_series_are_independent() {
        let mut result = ParseResult::new();
        assert!(result.is_empty());
        result.series_mut(Metric::HitsAt3).push("Epoch: 10", 0.3);

        assert!(!result.is_empty());
        assert_eq!(result.series(Metric::HitsAt3).len(), 1);
        for (metric, series) in result.iter() {
            if metric != Metric::HitsAt3 {
                assert!(series.is_empty(), "{} should be empty", metric);
            }
        }
    }
}
