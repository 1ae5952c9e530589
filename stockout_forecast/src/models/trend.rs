//! Least squares trend extrapolated past the last observed day

use crate::data::DailyAggregate;
use crate::error::{ForecastError, Result};
use crate::models::{to_points, BurnRateModel};
use stock_math::LinearRegression;
use tracing::debug;

/// Fits quantity against day offset and evaluates the line `steps_ahead`
/// days past the latest offset
#[derive(Debug, Clone)]
pub struct TrendProjection {
    /// Name of the model
    name: String,
    /// Days past the last observation to project
    steps_ahead: i64,
}

impl TrendProjection {
    /// Create a new trend projection
    pub fn new(steps_ahead: i64) -> Result<Self> {
        if steps_ahead <= 0 {
            return Err(ForecastError::InvalidParameter(
                "steps_ahead must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Trend Projection (steps_ahead={})", steps_ahead),
            steps_ahead,
        })
    }

    /// Project the day after the last observation
    pub fn next_day() -> Self {
        Self {
            name: "Trend Projection (steps_ahead=1)".to_string(),
            steps_ahead: 1,
        }
    }

    /// Fit the underlying line without projecting
    pub fn fit(&self, daily: &[DailyAggregate]) -> Result<LinearRegression> {
        Ok(LinearRegression::fit(&to_points(daily))?)
    }
}

impl BurnRateModel for TrendProjection {
    fn estimate(&self, daily: &[DailyAggregate]) -> Result<f64> {
        let line = self.fit(daily)?;

        let latest = daily
            .iter()
            .map(|d| d.days_since_window_start)
            .max()
            .ok_or_else(|| ForecastError::DataError("No daily sales to fit".to_string()))?;

        let projected = line.predict((latest + self.steps_ahead) as f64);
        debug!(
            slope = line.slope(),
            intercept = line.intercept(),
            points = line.points(),
            projected,
            "fitted consumption trend"
        );

        Ok(projected)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
