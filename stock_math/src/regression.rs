//! Ordinary least squares trend fitting
//!
//! Fits `y = slope * x + intercept` over arbitrary `(x, y)` points, so gaps
//! between observations (days without sales) keep their true spacing.

use crate::{MathError, Result};

/// A straight line fitted by ordinary least squares
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRegression {
    slope: f64,
    intercept: f64,
    points: usize,
    r_squared: Option<f64>,
}

impl LinearRegression {
    /// Fit a line through the given `(x, y)` points
    pub fn fit(points: &[(f64, f64)]) -> Result<Self> {
        if points.len() < 2 {
            return Err(MathError::InsufficientData(format!(
                "Linear regression needs at least 2 points, got {}",
                points.len()
            )));
        }

        if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(MathError::InvalidInput(
                "Regression points must be finite".to_string(),
            ));
        }

        let n = points.len() as f64;
        let x_mean = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let y_mean = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;

        for &(x, y) in points {
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        if denominator.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: x values are too similar".to_string(),
            ));
        }

        let slope = numerator / denominator;
        let intercept = y_mean - slope * x_mean;

        // Coefficient of determination; undefined for a flat series
        let mut ss_total = 0.0;
        let mut ss_residual = 0.0;
        for &(x, y) in points {
            ss_total += (y - y_mean).powi(2);
            ss_residual += (y - (slope * x + intercept)).powi(2);
        }
        let r_squared = if ss_total.abs() < 1e-10 {
            None
        } else {
            Some(1.0 - ss_residual / ss_total)
        };

        Ok(Self {
            slope,
            intercept,
            points: points.len(),
            r_squared,
        })
    }

    /// Evaluate the fitted line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Get the slope (trend direction and strength)
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Get the intercept
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Number of points the line was fitted on
    pub fn points(&self) -> usize {
        self.points
    }

    /// Get the R-squared value, if the series was not flat
    pub fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }
}
