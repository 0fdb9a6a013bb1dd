//! Two-tier diagnostics handle.
//!
//! `detail` carries fine-grained trace (every parsed record, every accumulated series,
//! resolved paths); `milestone` carries coarse progress (phase start/end, per-file
//! summaries). Each tier has its own threshold and is forwarded to the `log` facade
//! only when enabled. The handle is built once and passed by reference.

use std::fmt;
use std::io::Write;

use log::{Level, LevelFilter};

/// Log target for fine-grained trace.
pub const DETAIL_TARGET: &str = "hntn_results::detail";
/// Log target for progress milestones.
pub const MILESTONE_TARGET: &str = "hntn_results::milestone";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    detail: LevelFilter,
    milestone: LevelFilter,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(LevelFilter::Off, LevelFilter::Info)
    }
}

impl Diagnostics {
    pub fn new(detail: LevelFilter, milestone: LevelFilter) -> Self {
        Self { detail, milestone }
    }

    /// Handle that drops everything except warnings; handy in tests.
    pub fn quiet() -> Self {
        Self::new(LevelFilter::Off, LevelFilter::Off)
    }

    pub fn detail_enabled(&self) -> bool {
        Level::Debug <= self.detail
    }

    pub fn milestone_enabled(&self) -> bool {
        Level::Info <= self.milestone
    }

    /// Emit fine-grained trace. Prefer the `detail!` macro so formatting is skipped
    /// when the tier is off.
    pub fn detail(&self, args: fmt::Arguments<'_>) {
        if self.detail_enabled() {
            log::debug!(target: DETAIL_TARGET, "{}", args);
        }
    }

    pub fn milestone(&self, args: fmt::Arguments<'_>) {
        if self.milestone_enabled() {
            log::info!(target: MILESTONE_TARGET, "{}", args);
        }
    }

    /// Warnings bypass both tier thresholds.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        log::warn!(target: MILESTONE_TARGET, "{}", args);
    }

    /// Most verbose of the two tiers; used as the console sink's default filter.
    pub fn max_level(&self) -> LevelFilter {
        self.detail.max(self.milestone).max(LevelFilter::Warn)
    }

    /// Install `env_logger` on stdout as `<timestamp>:<target>:<LEVEL>:<message>`.
    ///
    /// `RUST_LOG` overrides the default filter when set. Calling this twice is a no-op.
    pub fn init_logger(&self) {
        let mut builder = env_logger::Builder::new();
        builder
            .filter_level(self.max_level())
            .parse_env(env_logger::Env::default())
            .target(env_logger::Target::Stdout)
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{}:{}:{}:{}",
                    buf.timestamp_millis(),
                    record.target(),
                    record.level(),
                    record.args()
                )
            });
        let _ = builder.try_init();
    }
}

/// `detail!(diag, "fmt", args..)`: trace that is only formatted when the detail tier is on.
#[macro_export]
macro_rules! detail {
    ($diag:expr, $($arg:tt)+) => {
        if $diag.detail_enabled() {
            $diag.detail(format_args!($($arg)+));
        }
    };
}

/// `milestone!(diag, "fmt", args..)`
#[macro_export]
macro_rules! milestone {
    ($diag:expr, $($arg:tt)+) => {
        $diag.milestone(format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers() {
        let diag = Diagnostics::default();
        assert!(!diag.detail_enabled());
        assert!(diag.milestone_enabled());
        assert_eq!(diag.max_level(), LevelFilter::Info);
    }

    #[test]
    fn test_tiers_independent() {
        let diag = Diagnostics::new(LevelFilter::Trace, LevelFilter::Off);
        assert!(diag.detail_enabled());
        assert!(!diag.milestone_enabled());
        assert_eq!(diag.max_level(), LevelFilter::Trace);

        let diag = Diagnostics::new(LevelFilter::Info, LevelFilter::Info);
        assert!(!diag.detail_enabled(), "detail is emitted at debug level");
    }

    #[test]
    fn test_quiet_still_routes_warnings() {
        let diag = Diagnostics::quiet();
        assert!(!diag.detail_enabled());
        assert!(!diag.milestone_enabled());
        assert_eq!(diag.max_level(), LevelFilter::Warn);
    }
}
