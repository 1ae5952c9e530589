//! Burn rate models over aggregated daily sales

use crate::data::DailyAggregate;
use crate::error::Result;
use std::fmt::Debug;

/// Estimates next-day consumption from daily sales totals
pub trait BurnRateModel: Debug + Send + Sync {
    /// Projected units consumed on the day after the last observation.
    ///
    /// The estimate is raw: callers apply any floor.
    fn estimate(&self, daily: &[DailyAggregate]) -> Result<f64>;

    /// Name of the model
    fn name(&self) -> &str;
}

pub mod mean;
pub mod trend;

pub use mean::DailyMean;
pub use trend::TrendProjection;

/// Daily totals as `(offset, quantity)` points
pub(crate) fn to_points(daily: &[DailyAggregate]) -> Vec<(f64, f64)> {
    daily
        .iter()
        .map(|d| (d.days_since_window_start as f64, d.total_quantity as f64))
        .collect()
}
