pub mod config;
pub mod diagnostics;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod report;
pub mod results;

pub use config::Config;
pub use diagnostics::Diagnostics;
pub use error::{ResultsError, Result};
pub use layout::{RunKind, RunLayout};
pub use pipeline::{run, RunOptions, RunSummary};
pub use report::{ComparisonTable, ReportWriter};
pub use results::{parse_results, LogParser, Metric, MetricSeries, ParseResult};
