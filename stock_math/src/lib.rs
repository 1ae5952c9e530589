//! # Stock Math
//!
//! Numeric building blocks for stock depletion forecasting.
//! This crate provides the least squares trend fit, the arithmetic mean and
//! the fixed-decimal rounding used when projecting burn rates.

use thiserror::Error;

pub mod regression;
pub mod stats;

pub use regression::LinearRegression;
pub use stats::{mean, round_to};

/// Errors that can occur in forecasting calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for stock math operations
pub type Result<T> = std::result::Result<T, MathError>;
