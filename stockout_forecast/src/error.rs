//! Error types for the stockout_forecast crate

use stock_math::MathError;
use thiserror::Error;

/// Custom error types for the stockout_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to record validation or loading
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to input validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from the numeric layer
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error while layering configuration sources
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from JSON serialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error raised by an inventory store
    #[error("Store error: {0}")]
    StoreError(String),

    /// Error raised by a text generation provider
    #[error("Generation error: {0}")]
    GenerationError(String),
}

impl ForecastError {
    /// Whether a provider error signals a rate limit or exhausted quota
    pub fn is_rate_limited(&self) -> bool {
        match self {
            ForecastError::GenerationError(msg) => {
                msg.contains("429") || msg.to_lowercase().contains("quota")
            }
            _ => false,
        }
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
