use thiserror::Error;

use crate::results::Metric;

/// Main error type for hntn-results
#[derive(Error, Debug)]
pub enum ResultsError {
    /// File system I/O errors (missing log, unwritable output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Log line pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Hypothesis epoch has no counterpart in the baseline run
    #[error("Epoch '{epoch}' for metric {metric} is missing from the baseline results")]
    MissingEpoch { metric: Metric, epoch: String },

    /// Row does not carry one observation per header column (strict mode only)
    #[error("Epoch '{epoch}' for metric {metric} has {found} values, expected {expected}")]
    ColumnMismatch {
        metric: Metric,
        epoch: String,
        expected: usize,
        found: usize,
    },
}

/// Convenient Result type using ResultsError
pub type Result<T> = std::result::Result<T, ResultsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResultsError::Config("Test error".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Test error"));
    }

    #[test]
    fn test_missing_epoch_display() {
        let err = ResultsError::MissingEpoch {
            metric: Metric::HitsAt10,
            epoch: "Epoch: 20".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Epoch: 20"));
        assert!(msg.contains("hits_at_10"));
        assert!(msg.contains("baseline"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ResultsError = io_err.into();
        assert!(matches!(err, ResultsError::Io(_)));
    }

    #[test]
    fn test_error_from_regex() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: ResultsError = regex_err.into();
        assert!(matches!(err, ResultsError::Pattern(_)));
    }
}
