//! Stock health labels and runway thresholds

use serde::{Deserialize, Serialize};
use std::fmt;

/// Health label attached to a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    /// The product has never sold
    #[serde(rename = "No Data")]
    NoData,
    /// The product has sales history but nothing recent
    Stable,
    /// Runway below the critical threshold
    Critical,
    /// Runway between the critical and warning thresholds (display only)
    Warning,
    /// Runway at or beyond the relevant threshold
    Healthy,
}

impl StockStatus {
    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::NoData => "No Data",
            StockStatus::Stable => "Stable",
            StockStatus::Critical => "Critical",
            StockStatus::Warning => "Warning",
            StockStatus::Healthy => "Healthy",
        }
    }

    /// Three-level display bucketing of a runway in days.
    ///
    /// The forecaster only ever separates `Critical` from `Healthy`; the
    /// `Warning` tier exists for presentation.
    pub fn from_runway(days_to_stockout: f64, thresholds: &RunwayThresholds) -> Self {
        if days_to_stockout < thresholds.critical_days {
            StockStatus::Critical
        } else if days_to_stockout < thresholds.warning_days {
            StockStatus::Warning
        } else {
            StockStatus::Healthy
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Runway cut-offs, in days, for the display tiers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunwayThresholds {
    pub critical_days: f64,
    pub warning_days: f64,
}

impl Default for RunwayThresholds {
    fn default() -> Self {
        Self {
            critical_days: 7.0,
            warning_days: 30.0,
        }
    }
}
