//! Ordinary least-squares regression of y on x.

use serde::{Deserialize, Serialize};

/// Fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
}

impl Regression {
    pub const UNDEFINED: Regression = Regression {
        slope: f64::NAN,
        intercept: f64::NAN,
    };

    /// Value of the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    pub fn is_defined(&self) -> bool {
        !self.slope.is_nan() && !self.intercept.is_nan()
    }
}

/// Fit `ys` against `xs`, minimising squared residuals.
///
/// Only the first `min(xs.len(), ys.len())` pairs are used. Fewer than two
/// points, or no spread in x, gives NaN slope and intercept.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Regression {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return Regression::UNDEFINED;
    }

    let nf = n as f64;
    let x_mean = xs[..n].iter().sum::<f64>() / nf;
    let y_mean = ys[..n].iter().sum::<f64>() / nf;

    let mut ss_xy = 0.0;
    let mut ss_xx = 0.0;
    for (x, y) in xs[..n].iter().zip(&ys[..n]) {
        let dx = x - x_mean;
        ss_xy += dx * (y - y_mean);
        ss_xx += dx * dx;
    }

    // 0/0 when every x is equal
    let slope = ss_xy / ss_xx;
    if slope.is_nan() || slope.is_infinite() {
        return Regression::UNDEFINED;
    }

    Regression {
        slope,
        intercept: y_mean - slope * x_mean,
    }
}
