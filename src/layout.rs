use std::path::PathBuf;

use crate::results::Metric;

pub const DEFAULT_PREFIX: &str = "hntn_train_validate_and_test";
pub const DEFAULT_DIMENSION_TAG: &str = "200d";

/// Which side of the comparison a log belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Baseline,
    Hypothesis,
}

impl RunKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RunKind::Baseline => "baseline",
            RunKind::Hypothesis => "hypothesis",
        }
    }
}

/// Resolves input log and output report paths for one dataset.
///
/// Names follow `<prefix>_<dataset>_<dimension_tag>_<suffix>`, e.g.
/// `hntn_train_validate_and_test_fb15k_237_200d_baseline.log`.
#[derive(Debug, Clone, PartialEq)]
pub struct RunLayout {
    pub results_dir: PathBuf,
    pub output_dir: PathBuf,
    pub dataset: String,
    pub prefix: String,
    pub dimension_tag: String,
}

impl RunLayout {
    pub fn new(
        results_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        dataset: impl Into<String>,
    ) -> Self {
        Self {
            results_dir: results_dir.into(),
            output_dir: output_dir.into(),
            dataset: dataset.into(),
            prefix: DEFAULT_PREFIX.to_string(),
            dimension_tag: DEFAULT_DIMENSION_TAG.to_string(),
        }
    }

    fn stem(&self) -> String {
        format!("{}_{}_{}", self.prefix, self.dataset, self.dimension_tag)
    }

    /// `<results_dir>/<stem>_{baseline,hypothesis}.log`
    pub fn log_path(&self, kind: RunKind) -> PathBuf {
        self.results_dir
            .join(format!("{}_{}.log", self.stem(), kind.as_str()))
    }

    /// `<output_dir>/<stem>_<metric-key>.csv`
    pub fn report_path(&self, metric: Metric) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.csv", self.stem(), metric.key()))
    }
}
