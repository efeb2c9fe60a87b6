//! Top-level engine configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{defaults, DecaySchedule, FeedbackMode, LoggingConfig};
use crate::errors::ConfigError;

/// Configuration for a route decision engine.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`ROUTEWISE_*`)
/// 2. Project config (`routewise.toml` in the given root)
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Softmax temperature. Lower is more exploitative.
    pub temperature: f64,
    /// Prior alpha for unseen (context, route) pairs.
    pub prior_alpha: f64,
    /// Prior beta for unseen (context, route) pairs.
    pub prior_beta: f64,
    /// Capacity of the short-term memory window.
    pub memory_capacity: usize,
    /// Pull-toward-prior strength in (0, 1]. 1.0 is a no-op.
    pub decay_factor: f64,
    /// When decay fires.
    pub decay_schedule: DecaySchedule,
    /// Evicted records younger than this do not trigger `on_eviction` decay
    /// (seconds).
    pub staleness_threshold_secs: u64,
    /// Whether feedback for unoffered routes is rejected.
    pub feedback_mode: FeedbackMode,
    /// Outcomes at or above this count as a success in windowed rates.
    pub success_threshold: f64,
    pub logging: LoggingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            temperature: defaults::DEFAULT_TEMPERATURE,
            prior_alpha: defaults::DEFAULT_PRIOR_ALPHA,
            prior_beta: defaults::DEFAULT_PRIOR_BETA,
            memory_capacity: defaults::DEFAULT_MEMORY_CAPACITY,
            decay_factor: defaults::DEFAULT_DECAY_FACTOR,
            decay_schedule: DecaySchedule::default(),
            staleness_threshold_secs: defaults::DEFAULT_STALENESS_THRESHOLD_SECS,
            feedback_mode: FeedbackMode::default(),
            success_threshold: defaults::DEFAULT_SUCCESS_THRESHOLD,
            logging: LoggingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration for a project rooted at `root`.
    ///
    /// A missing `routewise.toml` falls back to defaults; a malformed one is
    /// an error. Environment overrides are applied last, then the result is
    /// validated.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(defaults::DEFAULT_CONFIG_FILENAME);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file without env overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate every field. Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_temperature(self.temperature)?;
        if !(self.prior_alpha.is_finite() && self.prior_alpha > 0.0) {
            return Err(ConfigError::invalid("prior_alpha", "must be finite and > 0"));
        }
        if !(self.prior_beta.is_finite() && self.prior_beta > 0.0) {
            return Err(ConfigError::invalid("prior_beta", "must be finite and > 0"));
        }
        if self.memory_capacity == 0 {
            return Err(ConfigError::invalid("memory_capacity", "must be greater than 0"));
        }
        validate_decay_factor(self.decay_factor)?;
        if let DecaySchedule::EveryKUpdates { k: 0 } = self.decay_schedule {
            return Err(ConfigError::invalid("decay_schedule", "k must be greater than 0"));
        }
        if !(0.0..=1.0).contains(&self.success_threshold) {
            return Err(ConfigError::invalid(
                "success_threshold",
                "must be between 0.0 and 1.0",
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Pattern: `ROUTEWISE_TEMPERATURE`, `ROUTEWISE_MEMORY_CAPACITY`, etc.
    /// Unparseable numbers are rejected rather than silently ignored.
    fn apply_env_overrides(config: &mut EngineConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_parse::<f64>("ROUTEWISE_TEMPERATURE", "temperature")? {
            config.temperature = v;
        }
        if let Some(v) = env_parse::<f64>("ROUTEWISE_PRIOR_ALPHA", "prior_alpha")? {
            config.prior_alpha = v;
        }
        if let Some(v) = env_parse::<f64>("ROUTEWISE_PRIOR_BETA", "prior_beta")? {
            config.prior_beta = v;
        }
        if let Some(v) = env_parse::<usize>("ROUTEWISE_MEMORY_CAPACITY", "memory_capacity")? {
            config.memory_capacity = v;
        }
        if let Some(v) = env_parse::<f64>("ROUTEWISE_DECAY_FACTOR", "decay_factor")? {
            config.decay_factor = v;
        }
        if let Some(v) = env_parse::<u64>(
            "ROUTEWISE_STALENESS_THRESHOLD_SECS",
            "staleness_threshold_secs",
        )? {
            config.staleness_threshold_secs = v;
        }
        if let Ok(val) = std::env::var("ROUTEWISE_DECAY_SCHEDULE") {
            config.decay_schedule = val.parse()?;
        }
        if let Ok(val) = std::env::var("ROUTEWISE_FEEDBACK_MODE") {
            config.feedback_mode = val.parse()?;
        }
        if let Some(v) = env_parse::<f64>("ROUTEWISE_SUCCESS_THRESHOLD", "success_threshold")? {
            config.success_threshold = v;
        }
        if let Ok(val) = std::env::var("ROUTEWISE_LOG") {
            config.logging.log_level = val;
        }
        Ok(())
    }
}

/// Reject a non-positive or non-finite softmax temperature.
pub fn validate_temperature(temperature: f64) -> Result<(), ConfigError> {
    if temperature.is_finite() && temperature > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            "temperature",
            format!("must be finite and > 0, got {temperature}"),
        ))
    }
}

/// Reject a decay factor outside (0, 1].
pub fn validate_decay_factor(factor: f64) -> Result<(), ConfigError> {
    if factor > 0.0 && factor <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            "decay_factor",
            format!("must be in (0, 1], got {factor}"),
        ))
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, field: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::invalid(field, format!("{key}={val:?} is not a valid value"))),
        Err(_) => Ok(None),
    }
}
