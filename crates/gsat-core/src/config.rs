//! Configuration loading and typed config structures for the scoring engine.
//!
//! The configuration lives in `gsat-config.yaml`. Every section and field
//! has a default, so an empty file (or no file at all) yields a working
//! five-option setup. The loaded value is passed explicitly to every entry
//! point; nothing here is global.

use std::path::Path;

use gsat_types::ScoreRuleId;
use serde::{Deserialize, Serialize};

use crate::options::{DEFAULT_OPTION_COUNT, MAX_OPTIONS};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Question shape and default rule.
    #[serde(default)]
    pub scoring: ScoringSection,

    /// Monte Carlo limits.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Presentation rounding.
    #[serde(default)]
    pub display: DisplayConfig,

    /// HTTP bind address.
    #[serde(default)]
    pub server: ServerConfig,

    /// Log filter.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ScoringConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `GSAT_HOST` and `GSAT_PORT` override the server address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.server.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns any error of [`from_file`](Self::from_file) for an existing
    /// file.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.server.apply_env_overrides();
        Ok(config)
    }

    /// Check that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.scoring.option_count;
        if n == 0 || n > MAX_OPTIONS {
            return Err(ConfigError::Invalid {
                field: "scoring.option_count",
                reason: format!("{n} is outside 1..={MAX_OPTIONS}"),
            });
        }
        let sim = &self.simulation;
        if sim.max_trial_count == 0 {
            return Err(ConfigError::Invalid {
                field: "simulation.max_trial_count",
                reason: String::from("must be positive"),
            });
        }
        if sim.default_trial_count == 0 || sim.default_trial_count > sim.max_trial_count {
            return Err(ConfigError::Invalid {
                field: "simulation.default_trial_count",
                reason: format!(
                    "{} is outside 1..={}",
                    sim.default_trial_count, sim.max_trial_count
                ),
            });
        }
        if sim.batch_size == 0 {
            return Err(ConfigError::Invalid {
                field: "simulation.batch_size",
                reason: String::from("must be positive"),
            });
        }
        if self.display.precision > MAX_PRECISION {
            return Err(ConfigError::Invalid {
                field: "display.precision",
                reason: format!("{} exceeds {MAX_PRECISION}", self.display.precision),
            });
        }
        Ok(())
    }
}

/// Most decimal places `display.precision` may request.
pub const MAX_PRECISION: u8 = 12;

/// Question shape and default rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringSection {
    /// Options per question (`N`).
    #[serde(default = "default_option_count")]
    pub option_count: u32,

    /// Rule used when a request names none.
    #[serde(default = "default_rule")]
    pub default_rule: ScoreRuleId,
}

impl Default for ScoringSection {
    fn default() -> Self {
        Self {
            option_count: default_option_count(),
            default_rule: default_rule(),
        }
    }
}

/// Monte Carlo limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Trials run when a request names no count.
    #[serde(default = "default_trial_count")]
    pub default_trial_count: u32,

    /// Upper bound on trials per run, bounding worst-case latency.
    #[serde(default = "default_max_trial_count")]
    pub max_trial_count: u32,

    /// Trials between cancellation checks.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_trial_count: default_trial_count(),
            max_trial_count: default_max_trial_count(),
            batch_size: default_batch_size(),
        }
    }
}

/// Presentation rounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Decimal places for means, deviations, and probabilities.
    #[serde(default = "default_precision")]
    pub precision: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

/// HTTP bind address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Apply `GSAT_HOST` / `GSAT_PORT` when set. An unparsable port is
    /// ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("GSAT_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("GSAT_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            self.port = port;
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Log filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const fn default_option_count() -> u32 {
    DEFAULT_OPTION_COUNT
}

const fn default_rule() -> ScoreRuleId {
    ScoreRuleId::Custom
}

const fn default_trial_count() -> u32 {
    1_000
}

const fn default_max_trial_count() -> u32 {
    1_000_000
}

const fn default_batch_size() -> u32 {
    10_000
}

const fn default_precision() -> u8 {
    4
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    String::from("info")
}
