use anyhow::{Context, Result};
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::diagnostics::Diagnostics;
use crate::layout::{RunLayout, DEFAULT_DIMENSION_TAG, DEFAULT_PREFIX};
use crate::pipeline::RunOptions;
use crate::results::DEFAULT_CADENCE;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "HNTN_RESULTS_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "results.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input and output locations
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Dataset naming and report shaping
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_dimension_tag")]
    pub dimension_tag: String,
    #[serde(default = "default_cadence")]
    pub cadence: u64,
    /// Reject rows that do not carry exactly three values per run.
    #[serde(default)]
    pub strict_columns: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            prefix: default_prefix(),
            dimension_tag: default_dimension_tag(),
            cadence: default_cadence(),
            strict_columns: false,
        }
    }
}

fn default_dataset() -> String {
    "fb15k_237".to_string()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_dimension_tag() -> String {
    DEFAULT_DIMENSION_TAG.to_string()
}

fn default_cadence() -> u64 {
    DEFAULT_CADENCE
}

/// Diagnostics thresholds, as `log` level names
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_detail_level")]
    pub detail: String,
    #[serde(default = "default_milestone_level")]
    pub milestone: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            detail: default_detail_level(),
            milestone: default_milestone_level(),
        }
    }
}

fn default_detail_level() -> String {
    "off".to_string()
}

fn default_milestone_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration.
    ///
    /// Loads environment variables from .env file (if present) first. Then:
    /// 1. Path in the HNTN_RESULTS_CONFIG environment variable (must exist)
    /// 2. ./results.toml if it exists
    /// 3. Built-in defaults
    pub fn load() -> Result<Self> {
        // .env is optional
        let _ = dotenv::dotenv();

        let config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file without validating it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.run.cadence == 0 {
            anyhow::bail!("run.cadence must be greater than 0");
        }

        if self.run.dataset.trim().is_empty() {
            anyhow::bail!("run.dataset must not be empty");
        }

        parse_level(&self.logging.detail).context("Invalid logging.detail")?;
        parse_level(&self.logging.milestone).context("Invalid logging.milestone")?;

        Ok(())
    }

    /// Input/output path resolver for the configured dataset
    pub fn layout(&self) -> RunLayout {
        let mut layout = RunLayout::new(
            self.paths.results_dir.clone(),
            self.paths.output_dir.clone(),
            self.run.dataset.clone(),
        );
        layout.prefix = self.run.prefix.clone();
        layout.dimension_tag = self.run.dimension_tag.clone();
        layout
    }

    /// Everything `pipeline::run` needs
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            layout: self.layout(),
            cadence: self.run.cadence,
            strict_columns: self.run.strict_columns,
        }
    }

    /// Diagnostics handle for the configured thresholds
    pub fn diagnostics(&self) -> Result<Diagnostics> {
        Ok(Diagnostics::new(
            parse_level(&self.logging.detail)?,
            parse_level(&self.logging.milestone)?,
        ))
    }
}

fn parse_level(name: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(name.trim())
        .map_err(|_| anyhow::anyhow!("unknown log level '{}' (use off|error|warn|info|debug|trace)", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate process-wide cwd and env so they don't race.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    /// Restores cwd when dropped (e.g. on panic).
    struct CwdGuard(PathBuf);
    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = std::env::set_current_dir(&self.0);
        }
    }

    fn with_config_env(config_path: Option<&Path>, f: impl FnOnce()) {
        let original = std::env::var(CONFIG_ENV).ok();
        match config_path {
            Some(p) => std::env::set_var(CONFIG_ENV, p),
            None => std::env::remove_var(CONFIG_ENV),
        }
        f();
        std::env::remove_var(CONFIG_ENV);
        if let Some(val) = original {
            std::env::set_var(CONFIG_ENV, val);
        }
    }

    #[test]
    fn test_defaults_without_file() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let _cwd = CwdGuard(std::env::current_dir().unwrap());
        std::env::set_current_dir(temp_dir.path()).unwrap();
        with_config_env(None, || {
            let config = Config::load().unwrap();
            assert_eq!(config.run.dataset, "fb15k_237");
            assert_eq!(config.run.cadence, 10);
            assert!(!config.run.strict_columns);
            assert_eq!(config.paths.results_dir, PathBuf::from("results"));
            assert_eq!(config.paths.output_dir, PathBuf::from("."));
            let diag = config.diagnostics().unwrap();
            assert!(!diag.detail_enabled());
            assert!(diag.milestone_enabled());
        });
    }

    #[test]
    fn test_load_from_cwd_file() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(DEFAULT_CONFIG_FILE),
            "[run]\ndataset = \"wn18rr\"\ncadence = 5\n\n[logging]\ndetail = \"debug\"\n",
        )
        .unwrap();
        let _cwd = CwdGuard(std::env::current_dir().unwrap());
        std::env::set_current_dir(temp_dir.path()).unwrap();
        with_config_env(None, || {
            let config = Config::load().unwrap();
            assert_eq!(config.run.dataset, "wn18rr");
            assert_eq!(config.run.cadence, 5);
            assert_eq!(config.run.prefix, DEFAULT_PREFIX);
            assert!(config.diagnostics().unwrap().detail_enabled());
        });
    }

    #[test]
    fn test_load_from_env_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("custom.toml");
        fs::write(
            &config_path,
            "[paths]\nresults_dir = \"logs\"\noutput_dir = \"tables\"\n\n[run]\nstrict_columns = true\n",
        )
        .unwrap();
        with_config_env(Some(&config_path), || {
            let config = Config::load().unwrap();
            assert!(config.run.strict_columns);
            let layout = config.layout();
            assert_eq!(layout.results_dir, PathBuf::from("logs"));
            assert_eq!(layout.output_dir, PathBuf::from("tables"));
            assert_eq!(layout.dataset, "fb15k_237");
        });
    }

    #[test]
    fn test_missing_env_path_is_error() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        with_config_env(Some(Path::new("nonexistent.toml")), || {
            let config = Config::load();
            assert!(config.is_err());
            assert!(format!("{:#}", config.unwrap_err()).contains("nonexistent.toml"));
        });
    }

    #[test]
    fn test_validate_rejects_zero_cadence() {
        let mut config = Config::default();
        config.run.cadence = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_level() {
        let mut config = Config::default();
        config.logging.milestone = "loud".to_string();
        let err = config.validate().unwrap_err();
        assert!(format!("{:#}", err).contains("loud"));
    }

    #[test]
    fn test_validate_rejects_empty_dataset() {
        let mut config = Config::default();
        config.run.dataset = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
