//! # Stockout Workspace
//!
//! Umbrella crate re-exporting the workspace members:
//!
//! - [`stock_math`]: least squares fit, mean and rounding
//! - [`stockout_forecast`]: burn rate estimation, stockout projection and reporting
//!
//! ## Example
//!
//! ```
//! use stockout_workspace::forecast::{InventoryItem, StockStatus, StockoutForecaster};
//!
//! let result = StockoutForecaster::new().forecast(&InventoryItem::new(1, 10), &[]);
//! assert_eq!(result.status, StockStatus::NoData);
//! ```

pub use stock_math as math;
pub use stockout_forecast as forecast;
