//! Engine configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for the match service and the command line.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct CheckersConfig {
    /// Most finished matches kept for replay; unbounded when absent.
    ///
    /// Must be at least 1 when given.
    #[serde(default)]
    max_saved_replays: Option<usize>,

    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

#[instrument]
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for CheckersConfig {
    fn default() -> Self {
        Self {
            max_saved_replays: None,
            log_filter: default_log_filter(),
        }
    }
}

impl CheckersConfig {
    /// Creates a configuration with a replay limit and default logging.
    pub fn with_max_saved_replays(max_saved_replays: Option<usize>) -> Self {
        Self {
            max_saved_replays,
            ..Self::default()
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.max_saved_replays == Some(0) {
            return Err(ConfigError::new(
                "max_saved_replays must be at least 1; omit it to keep every replay".to_string(),
            ));
        }

        info!(
            max_saved_replays = ?config.max_saved_replays,
            log_filter = %config.log_filter,
            "Config loaded successfully"
        );
        Ok(config)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
