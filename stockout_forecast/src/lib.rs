//! # Stockout Forecast
//!
//! Burn rate estimation and stockout projection for inventory monitoring.
//!
//! ## Features
//!
//! - Per-item burn rate from the last 30 days of sales
//! - Trend extrapolation once there are enough sale dates, a daily mean otherwise
//! - Days-until-stockout projection with critical/healthy classification
//! - Warning tier for display, inventory-wide reports
//! - In-memory inventory store with a demo catalog
//! - Supply chain briefs through a pluggable text generation provider
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use stockout_forecast::{InventoryItem, SaleRecord, StockStatus, StockoutForecaster};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
//! let sales: Vec<SaleRecord> = (0..30)
//!     .map(|day| SaleRecord::new(1, today - chrono::Duration::days(day), 20))
//!     .collect();
//!
//! let forecaster = StockoutForecaster::new();
//! let result = forecaster.forecast_at(
//!     &InventoryItem::new(1, 50),
//!     &sales,
//!     today.and_hms_opt(12, 0, 0).unwrap(),
//! );
//!
//! assert_eq!(result.burn_rate, 20.0);
//! assert_eq!(result.days_to_stockout, 2.5);
//! assert_eq!(result.status, StockStatus::Critical);
//! ```

pub mod brief;
pub mod config;
pub mod data;
pub mod error;
pub mod forecaster;
pub mod models;
pub mod report;
pub mod status;
pub mod store;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::data::{DataLoader, InventoryItem, SaleRecord};
pub use crate::error::ForecastError;
pub use crate::forecaster::{ForecastResult, StockoutForecaster};
pub use crate::report::InventoryReport;
pub use crate::status::StockStatus;
pub use crate::store::{InventoryStore, MemoryStore};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
