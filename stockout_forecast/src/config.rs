//! Forecaster and brief configuration
//!
//! Sources are layered in this order:
//! 1. Built-in defaults
//! 2. An optional TOML/JSON/YAML file
//! 3. Environment variables (`STOCKOUT__WINDOW_DAYS`, `STOCKOUT__BRIEF__MAX_ATTEMPTS`, ...)

use crate::error::{ForecastError, Result};
use crate::status::RunwayThresholds;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Trailing window of sales that influences the estimate
pub const DEFAULT_WINDOW_DAYS: u32 = 30;
/// More distinct sale dates than this switches from the mean to a trend fit
pub const DEFAULT_MIN_TREND_POINTS: usize = 5;
/// Smallest burn rate a product with recent sales can be assigned
pub const DEFAULT_BURN_RATE_FLOOR: f64 = 0.1;
/// Runway below which a product is critical
pub const DEFAULT_CRITICAL_DAYS: f64 = 7.0;
/// Runway below which a healthy product is shown as a warning
pub const DEFAULT_WARNING_DAYS: f64 = 30.0;

const ENV_PREFIX: &str = "STOCKOUT";

/// Models tried for briefs, most preferred first
pub const DEFAULT_MODEL_PRIORITY: [&str; 6] = [
    "gemini-2.5-flash",
    "gemini-2.0-flash",
    "gemini-1.5-flash",
    "gemini-1.5-pro",
    "gemini-1.0-pro",
    "gemini-pro",
];

/// Settings for the stockout forecaster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    /// Length of the recency window in days
    pub window_days: u32,
    /// Point count that must be exceeded before a trend is fitted
    pub min_trend_points: usize,
    /// Lower clamp applied to every estimated burn rate
    pub burn_rate_floor: f64,
    /// Runway below which a product is critical
    pub critical_days: f64,
    /// Runway below which a product is shown as a warning
    pub warning_days: f64,
    /// Brief generation settings
    pub brief: BriefConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            min_trend_points: DEFAULT_MIN_TREND_POINTS,
            burn_rate_floor: DEFAULT_BURN_RATE_FLOOR,
            critical_days: DEFAULT_CRITICAL_DAYS,
            warning_days: DEFAULT_WARNING_DAYS,
            brief: BriefConfig::default(),
        }
    }
}

/// Retry and model selection settings for supply chain briefs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BriefConfig {
    /// Generation attempts before giving up on rate limits
    pub max_attempts: u32,
    /// Backoff before attempt `n + 1` is `backoff_base_secs ^ n` seconds
    pub backoff_base_secs: u64,
    /// Preferred models, most preferred first
    pub model_priority: Vec<String>,
    /// Number of lowest stock-ratio items included in the prompt
    pub top_items: usize,
}

impl Default for BriefConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff_base_secs: 3,
            model_priority: DEFAULT_MODEL_PRIORITY.iter().map(|m| m.to_string()).collect(),
            top_items: 10,
        }
    }
}

impl ForecastConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            debug!(path = %path.display(), "loading forecast config file");
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let loaded: ForecastConfig = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject settings the forecaster cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.window_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "window_days must be positive".to_string(),
            ));
        }

        if !self.burn_rate_floor.is_finite() || self.burn_rate_floor <= 0.0 {
            return Err(ForecastError::InvalidParameter(
                "burn_rate_floor must be a positive number".to_string(),
            ));
        }

        if self.critical_days < 0.0 || self.warning_days < self.critical_days {
            return Err(ForecastError::InvalidParameter(format!(
                "warning_days ({}) must be at least critical_days ({}), and both non-negative",
                self.warning_days, self.critical_days
            )));
        }

        if self.brief.max_attempts == 0 {
            return Err(ForecastError::InvalidParameter(
                "brief.max_attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Display tier thresholds
    pub fn thresholds(&self) -> RunwayThresholds {
        RunwayThresholds {
            critical_days: self.critical_days,
            warning_days: self.warning_days,
        }
    }
}
