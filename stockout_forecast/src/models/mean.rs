//! Arithmetic mean of daily totals, used when there are too few points to trust a slope

use crate::data::DailyAggregate;
use crate::error::{ForecastError, Result};
use crate::models::BurnRateModel;

/// Mean of the aggregated daily quantities
#[derive(Debug, Clone, Default)]
pub struct DailyMean;

impl DailyMean {
    pub fn new() -> Self {
        Self
    }
}

impl BurnRateModel for DailyMean {
    fn estimate(&self, daily: &[DailyAggregate]) -> Result<f64> {
        if daily.is_empty() {
            return Err(ForecastError::DataError(
                "No daily sales to average".to_string(),
            ));
        }

        let values: Vec<f64> = daily.iter().map(|d| d.total_quantity as f64).collect();
        Ok(stock_math::mean(&values)?)
    }

    fn name(&self) -> &str {
        "Daily Mean"
    }
}
