//! Burn rate and stockout projection for a single inventory item
//!
//! The pipeline is a pure function of the item, the sales history and the
//! evaluation time:
//!
//! 1. keep the item's own sales; none at all means [`StockStatus::NoData`]
//! 2. keep sales inside the trailing window; none means [`StockStatus::Stable`]
//! 3. sum sales per calendar date
//! 4. fit a trend when there are enough dates, otherwise average
//! 5. clamp to the burn rate floor and divide the stock by it
//! 6. classify the runway as critical or healthy

use crate::config::{
    ForecastConfig, DEFAULT_BURN_RATE_FLOOR, DEFAULT_CRITICAL_DAYS, DEFAULT_MIN_TREND_POINTS,
    DEFAULT_WINDOW_DAYS,
};
use crate::data::{aggregate_daily, DailyAggregate, InventoryItem, SaleRecord};
use crate::error::Result;
use crate::models::{BurnRateModel, DailyMean, TrendProjection};
use crate::status::{RunwayThresholds, StockStatus};
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use serde::Serialize;
use stock_math::round_to;
use tracing::{debug, warn};

/// Outcome of forecasting one item
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastResult {
    /// Projected units consumed per day, rounded to 2 decimals
    pub burn_rate: f64,
    /// Days until stock runs out, rounded to 1 decimal; infinite when nothing is being consumed
    pub days_to_stockout: f64,
    pub status: StockStatus,
}

impl ForecastResult {
    /// The product has never sold
    pub fn no_data() -> Self {
        Self {
            burn_rate: 0.0,
            days_to_stockout: f64::INFINITY,
            status: StockStatus::NoData,
        }
    }

    /// The product has history but no sales inside the window
    pub fn stable() -> Self {
        Self {
            burn_rate: 0.0,
            days_to_stockout: f64::INFINITY,
            status: StockStatus::Stable,
        }
    }

    /// Status for display, splitting healthy runways into warning and healthy.
    ///
    /// The rounded runway is bucketed, so a critical 6.97 days shown as 7.0
    /// displays as a warning. `NoData` and `Stable` are passed through untouched.
    pub fn display_status(&self, thresholds: &RunwayThresholds) -> StockStatus {
        match self.status {
            StockStatus::NoData | StockStatus::Stable => self.status,
            _ => StockStatus::from_runway(self.days_to_stockout, thresholds),
        }
    }
}

/// Days of stock left at `burn_rate` units per day
pub fn project_runway(current_stock: u32, burn_rate: f64) -> f64 {
    if burn_rate <= 0.0 {
        return f64::INFINITY;
    }
    if current_stock == 0 {
        return 0.0;
    }
    current_stock as f64 / burn_rate
}

/// Projects burn rate and runway from recent sales
#[derive(Debug, Clone)]
pub struct StockoutForecaster {
    window_days: u32,
    min_trend_points: usize,
    burn_rate_floor: f64,
    critical_days: f64,
    trend: TrendProjection,
    mean: DailyMean,
}

impl Default for StockoutForecaster {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            min_trend_points: DEFAULT_MIN_TREND_POINTS,
            burn_rate_floor: DEFAULT_BURN_RATE_FLOOR,
            critical_days: DEFAULT_CRITICAL_DAYS,
            trend: TrendProjection::next_day(),
            mean: DailyMean::new(),
        }
    }
}

impl StockoutForecaster {
    /// Create a forecaster with the default window, threshold and floor
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forecaster from validated configuration
    pub fn with_config(config: &ForecastConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            window_days: config.window_days,
            min_trend_points: config.min_trend_points,
            burn_rate_floor: config.burn_rate_floor,
            critical_days: config.critical_days,
            ..Self::default()
        })
    }

    /// Forecast as of the current local time
    pub fn forecast(&self, item: &InventoryItem, sales_history: &[SaleRecord]) -> ForecastResult {
        self.forecast_at(item, sales_history, Local::now().naive_local())
    }

    /// Forecast as of `as_of`
    pub fn forecast_at(
        &self,
        item: &InventoryItem,
        sales_history: &[SaleRecord],
        as_of: NaiveDateTime,
    ) -> ForecastResult {
        let product_sales: Vec<&SaleRecord> = sales_history
            .iter()
            .filter(|sale| sale.product_id == item.id)
            .collect();

        if product_sales.is_empty() {
            debug!(product_id = item.id, "no sales history");
            return ForecastResult::no_data();
        }

        // A window reaching past the calendar's start keeps everything
        let cutoff = as_of.checked_sub_signed(Duration::days(i64::from(self.window_days)));
        let recent_sales: Vec<&SaleRecord> = product_sales
            .into_iter()
            .filter(|sale| {
                cutoff.map_or(true, |cutoff| {
                    sale.sale_date.and_time(NaiveTime::default()) >= cutoff
                })
            })
            .collect();

        if recent_sales.is_empty() {
            debug!(product_id = item.id, ?cutoff, "no sales inside the window");
            return ForecastResult::stable();
        }

        let daily = aggregate_daily(recent_sales);
        let burn_rate = self.estimate(item.id, &daily).max(self.burn_rate_floor);
        let days_to_stockout = project_runway(item.current_stock, burn_rate);

        let status = if days_to_stockout < self.critical_days {
            StockStatus::Critical
        } else {
            StockStatus::Healthy
        };

        debug!(
            product_id = item.id,
            burn_rate,
            days_to_stockout,
            %status,
            "forecast complete"
        );

        ForecastResult {
            burn_rate: round_to(burn_rate, 2),
            days_to_stockout: round_to(days_to_stockout, 1),
            status,
        }
    }

    /// Forecast every item against the same history and evaluation time
    pub fn forecast_all(
        &self,
        items: &[InventoryItem],
        sales_history: &[SaleRecord],
        as_of: NaiveDateTime,
    ) -> Vec<(i64, ForecastResult)> {
        items
            .iter()
            .map(|item| (item.id, self.forecast_at(item, sales_history, as_of)))
            .collect()
    }

    /// Raw next-day consumption, before the floor is applied
    fn estimate(&self, product_id: i64, daily: &[DailyAggregate]) -> f64 {
        if daily.len() > self.min_trend_points {
            match self.trend.estimate(daily) {
                Ok(rate) => {
                    debug!(product_id, model = self.trend.name(), points = daily.len(), rate);
                    return rate;
                }
                Err(err) => {
                    warn!(product_id, error = %err, "trend fit failed, averaging instead");
                }
            }
        }

        match self.mean.estimate(daily) {
            Ok(rate) => {
                debug!(product_id, model = self.mean.name(), points = daily.len(), rate);
                rate
            }
            Err(err) => {
                warn!(product_id, error = %err, "no estimate available");
                0.0
            }
        }
    }

    /// Length of the recency window in days
    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Point count that must be exceeded before a trend is fitted
    pub fn min_trend_points(&self) -> usize {
        self.min_trend_points
    }
}
