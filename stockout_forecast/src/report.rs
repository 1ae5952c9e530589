//! Inventory-wide forecast report

use crate::config::ForecastConfig;
use crate::data::{InventoryItem, SaleRecord};
use crate::error::Result;
use crate::forecaster::{ForecastResult, StockoutForecaster};
use crate::status::StockStatus;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use tracing::info;

/// One forecast row
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub item: InventoryItem,
    pub forecast: ForecastResult,
    /// Status with the warning tier applied
    pub display_status: StockStatus,
}

/// Counts across the whole inventory
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total_items: usize,
    pub critical: usize,
    pub warning: usize,
    pub healthy: usize,
    pub no_data: usize,
    pub stable: usize,
    /// Items whose stock is below their reorder point
    pub below_reorder: usize,
    pub total_inventory_value: f64,
}

/// Forecasts for every item, evaluated at one point in time
#[derive(Debug, Clone, Serialize)]
pub struct InventoryReport {
    pub as_of: NaiveDateTime,
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
}

impl InventoryReport {
    /// Forecast every item and tally the display statuses
    pub fn build(
        items: &[InventoryItem],
        sales_history: &[SaleRecord],
        as_of: NaiveDateTime,
        config: &ForecastConfig,
    ) -> Result<Self> {
        let forecaster = StockoutForecaster::with_config(config)?;
        let thresholds = config.thresholds();

        let mut summary = ReportSummary {
            total_items: items.len(),
            ..ReportSummary::default()
        };

        let rows: Vec<ReportRow> = items
            .iter()
            .map(|item| {
                let forecast = forecaster.forecast_at(item, sales_history, as_of);
                let display_status = forecast.display_status(&thresholds);

                match display_status {
                    StockStatus::Critical => summary.critical += 1,
                    StockStatus::Warning => summary.warning += 1,
                    StockStatus::Healthy => summary.healthy += 1,
                    StockStatus::NoData => summary.no_data += 1,
                    StockStatus::Stable => summary.stable += 1,
                }
                if item.below_reorder_point() {
                    summary.below_reorder += 1;
                }
                summary.total_inventory_value += item.stock_value();

                ReportRow {
                    item: item.clone(),
                    forecast,
                    display_status,
                }
            })
            .collect();

        info!(
            items = summary.total_items,
            critical = summary.critical,
            warning = summary.warning,
            below_reorder = summary.below_reorder,
            "inventory report built"
        );

        Ok(Self {
            as_of,
            rows,
            summary,
        })
    }

    /// Rows that need attention, shortest runway first
    pub fn attention_list(&self) -> Vec<&ReportRow> {
        let mut rows: Vec<&ReportRow> = self
            .rows
            .iter()
            .filter(|row| {
                matches!(
                    row.display_status,
                    StockStatus::Critical | StockStatus::Warning
                )
            })
            .collect();
        rows.sort_by(|a, b| {
            a.forecast
                .days_to_stockout
                .total_cmp(&b.forecast.days_to_stockout)
        });
        rows
    }
}

impl fmt::Display for InventoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<4} {:<38} {:>6} {:>8} {:>10} {:<8}",
            "ID", "Product", "Stock", "Burn", "Runway", "Status"
        )?;
        for row in &self.rows {
            let runway = if row.forecast.days_to_stockout.is_finite() {
                format!("{:.1}d", row.forecast.days_to_stockout)
            } else {
                "∞".to_string()
            };
            writeln!(
                f,
                "{:<4} {:<38} {:>6} {:>8.2} {:>10} {:<8}",
                row.item.id,
                row.item.product_name,
                row.item.current_stock,
                row.forecast.burn_rate,
                runway,
                row.display_status
            )?;
        }
        writeln!(
            f,
            "\n{} items: {} critical, {} warning, {} healthy, {} no data, {} stable; {} below reorder point",
            self.summary.total_items,
            self.summary.critical,
            self.summary.warning,
            self.summary.healthy,
            self.summary.no_data,
            self.summary.stable,
            self.summary.below_reorder
        )
    }
}
