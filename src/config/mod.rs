//! Layered configuration for the demo binary.
//!
//! Precedence, lowest to highest: hardcoded defaults, TOML config file,
//! `LAZYROW_*` environment variables, CLI arguments. The file lives at
//! `~/.config/lazyrow/config.toml` unless `--config` points elsewhere.
//!
//! Geometry values are carried as plain numbers here; they are validated
//! once, when the `ListLayout` is constructed, so a bad config fails fast
//! at startup rather than mid-scroll.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read an explicitly requested config file.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - anything unspecified falls back to the
/// defaults below. Unknown keys are rejected to catch typos.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Number of items in the gallery.
    #[serde(default)]
    pub items: Option<usize>,

    /// Item height in content units (terminal rows in the demo).
    #[serde(default)]
    pub item_height: Option<f64>,

    /// Padding between rows.
    #[serde(default)]
    pub padding: Option<f64>,

    /// Buffer rows preloaded beyond the viewport, each side.
    #[serde(default)]
    pub buffer_rows: Option<usize>,

    /// Items per row.
    #[serde(default)]
    pub columns: Option<usize>,

    /// Seed for the simulated network.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Minimum simulated load delay in milliseconds.
    #[serde(default)]
    pub delay_min_ms: Option<u64>,

    /// Maximum simulated load delay in milliseconds.
    #[serde(default)]
    pub delay_max_ms: Option<u64>,

    /// Simulated failure probability in `[0, 1]`.
    #[serde(default)]
    pub fail_rate: Option<f64>,

    /// Delay before a failed load is retried, in milliseconds.
    #[serde(default)]
    pub retry_delay_ms: Option<u64>,

    /// Maximum retries per slot after the initial attempt.
    #[serde(default)]
    pub max_retries: Option<u32>,

    /// Log file path.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Fully resolved configuration after the precedence chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Number of items in the gallery.
    pub items: usize,
    /// Item height in content units.
    pub item_height: f64,
    /// Padding between rows.
    pub padding: f64,
    /// Buffer rows each side of the viewport.
    pub buffer_rows: usize,
    /// Items per row.
    pub columns: usize,
    /// Simulated network seed.
    pub seed: u64,
    /// Minimum simulated delay.
    pub delay_min_ms: u64,
    /// Maximum simulated delay.
    pub delay_max_ms: u64,
    /// Simulated failure probability.
    pub fail_rate: f64,
    /// Retry delay.
    pub retry_delay_ms: u64,
    /// Retry budget per slot.
    pub max_retries: u32,
    /// Log file path.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            items: 50,
            item_height: 8.0,
            padding: 1.0,
            buffer_rows: 3,
            columns: 1,
            seed: 0,
            // A believably slow connection: 5-8 s per item, 5% failures,
            // one retry after 500 ms.
            delay_min_ms: 5000,
            delay_max_ms: 8000,
            fail_rate: 0.05,
            retry_delay_ms: 500,
            max_retries: 1,
            log_file_path: default_log_path(),
        }
    }
}

/// Default log location: `<data dir>/lazyrow/lazyrow.log`.
fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("lazyrow")
        .join("lazyrow.log")
}

/// Default config file location: `<config dir>/lazyrow/config.toml`.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lazyrow").join("config.toml"))
}

/// Load the config file.
///
/// An explicit path must exist and parse; a missing file at the *default*
/// location is not an error (returns `None`).
///
/// # Errors
///
/// Returns [`ConfigError`] when an explicitly requested file cannot be
/// read, or when any file fails to parse.
pub fn load_config_with_precedence(
    explicit_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    let (path, required) = match explicit_path {
        Some(path) => (Some(path), true),
        None => (default_config_path(), false),
    };
    let Some(path) = path else { return Ok(None) };

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::ReadError {
                path,
                reason: err.to_string(),
            })
        }
    };

    let parsed = toml::from_str(&contents).map_err(|err| ConfigError::ParseError {
        path: path.clone(),
        reason: err.to_string(),
    })?;
    Ok(Some(parsed))
}

/// Merge a (possibly absent) config file over the defaults.
pub fn merge_config(file: Option<ConfigFile>) -> ResolvedConfig {
    let mut config = ResolvedConfig::default();
    let Some(file) = file else { return config };

    if let Some(items) = file.items {
        config.items = items;
    }
    if let Some(item_height) = file.item_height {
        config.item_height = item_height;
    }
    if let Some(padding) = file.padding {
        config.padding = padding;
    }
    if let Some(buffer_rows) = file.buffer_rows {
        config.buffer_rows = buffer_rows;
    }
    if let Some(columns) = file.columns {
        config.columns = columns;
    }
    if let Some(seed) = file.seed {
        config.seed = seed;
    }
    if let Some(delay_min_ms) = file.delay_min_ms {
        config.delay_min_ms = delay_min_ms;
    }
    if let Some(delay_max_ms) = file.delay_max_ms {
        config.delay_max_ms = delay_max_ms;
    }
    if let Some(fail_rate) = file.fail_rate {
        config.fail_rate = fail_rate;
    }
    if let Some(retry_delay_ms) = file.retry_delay_ms {
        config.retry_delay_ms = retry_delay_ms;
    }
    if let Some(max_retries) = file.max_retries {
        config.max_retries = max_retries;
    }
    if let Some(log_file_path) = file.log_file_path {
        config.log_file_path = log_file_path;
    }
    config
}

/// Apply `LAZYROW_*` environment variable overrides.
///
/// Unparseable values are ignored rather than fatal, matching how the
/// defaults-first chain degrades elsewhere.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(items) = env_parse::<usize>("LAZYROW_ITEMS") {
        config.items = items;
    }
    if let Some(buffer_rows) = env_parse::<usize>("LAZYROW_BUFFER_ROWS") {
        config.buffer_rows = buffer_rows;
    }
    if let Some(seed) = env_parse::<u64>("LAZYROW_SEED") {
        config.seed = seed;
    }
    if let Some(fail_rate) = env_parse::<f64>("LAZYROW_FAIL_RATE") {
        config.fail_rate = fail_rate;
    }
    if let Ok(path) = std::env::var("LAZYROW_LOG_FILE") {
        if !path.is_empty() {
            config.log_file_path = PathBuf::from(path);
        }
    }
    config
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok()?.parse().ok()
}

/// CLI overrides, applied last.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// `--items`
    pub items: Option<usize>,
    /// `--buffer`
    pub buffer_rows: Option<usize>,
    /// `--columns`
    pub columns: Option<usize>,
    /// `--seed`
    pub seed: Option<u64>,
    /// `--fail-rate`
    pub fail_rate: Option<f64>,
    /// `--fast` (shrink simulated delays for demos)
    pub fast: bool,
}

/// Apply CLI argument overrides on top of everything else.
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(items) = cli.items {
        config.items = items;
    }
    if let Some(buffer_rows) = cli.buffer_rows {
        config.buffer_rows = buffer_rows;
    }
    if let Some(columns) = cli.columns {
        config.columns = columns;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(fail_rate) = cli.fail_rate {
        config.fail_rate = fail_rate;
    }
    if cli.fast {
        config.delay_min_ms = 300;
        config.delay_max_ms = 1200;
    }
    config
}
