//! Windowed linear-regression CAGR.
//!
//! The series is cut into one-year windows advancing by six months. Each
//! window with at least two points gets a least-squares line of value
//! against elapsed years; the window's growth is the fitted value one year
//! after its start over the fitted value at its start. Window rates are then
//! averaged, weighted by how much of a year each window's points span.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::regression::linear_regression;
use crate::data::{zip_series, GrowthSample, Observation, Window, MS_PER_YEAR};
use crate::validation::{ensure_same_length, ValidationResult};
use crate::windows::{WindowConfig, WindowPartitioner};

/// Growth sample for one window.
///
/// Rate is NaN when the window has fewer than two observations or the
/// fitted line is undefined.
pub fn growth_sample(window: &Window<'_>) -> GrowthSample {
    let origin = match window.first() {
        Some(first) => first.timestamp,
        None => {
            return GrowthSample {
                rate: f64::NAN,
                fraction_of_year: 0.0,
            }
        }
    };

    let (years, values): (Vec<f64>, Vec<f64>) = window
        .observations()
        .map(|o| (o.offset_ms(origin) / MS_PER_YEAR, o.value))
        .unzip();

    let fit = linear_regression(&years, &values);
    let rate = fit.predict(1.0) / fit.intercept - 1.0;

    GrowthSample {
        rate,
        fraction_of_year: window.span_years(),
    }
}

/// Time-weighted mean of the usable samples.
///
/// NaN when no sample is usable or the usable samples carry no weight.
pub fn weighted_growth(samples: &[GrowthSample]) -> f64 {
    let (weighted, total_weight) = samples
        .iter()
        .filter(|s| s.is_usable())
        .fold((0.0, 0.0), |(weighted, total), s| {
            (weighted + s.rate * s.fraction_of_year, total + s.fraction_of_year)
        });

    if total_weight == 0.0 {
        return f64::NAN;
    }

    weighted / total_weight
}

/// Regression-based growth estimator over overlapping windows.
#[derive(Debug, Clone, Default)]
pub struct GrowthEstimator {
    partitioner: WindowPartitioner,
}

impl GrowthEstimator {
    /// Create an estimator with a custom window geometry.
    pub fn new(config: WindowConfig) -> ValidationResult<Self> {
        Ok(Self {
            partitioner: WindowPartitioner::new(config)?,
        })
    }

    pub fn config(&self) -> &WindowConfig {
        self.partitioner.config()
    }

    /// Per-window samples for a series, including unusable ones.
    pub fn samples(&self, observations: &[Observation]) -> ValidationResult<Vec<GrowthSample>> {
        let windows = self.partitioner.partition(observations)?;

        let samples = windows
            .iter()
            .map(|window| {
                let sample = growth_sample(window);
                debug!(
                    window = window.index,
                    points = window.len(),
                    rate = sample.rate,
                    fraction_of_year = sample.fraction_of_year,
                    "Window growth"
                );
                sample
            })
            .collect();

        Ok(samples)
    }

    /// Aggregate growth rate for a series. NaN when no window is usable.
    pub fn estimate_series(&self, observations: &[Observation]) -> ValidationResult<f64> {
        let samples = self.samples(observations)?;
        Ok(weighted_growth(&samples))
    }

    /// Aggregate growth rate for paired values and timestamps.
    pub fn estimate(&self, values: &[f64], timestamps: &[DateTime<Utc>]) -> ValidationResult<f64> {
        ensure_same_length("values", values.len(), "timestamps", timestamps.len())?;
        self.estimate_series(&zip_series(values, timestamps))
    }
}

/// Robust CAGR: one-year windows, six-month overlap, regression per window.
///
/// Fails when the two sequences differ in length or a value is not finite.
/// Returns NaN when no window holds two or more observations.
pub fn linear_regression_cagr(values: &[f64], timestamps: &[DateTime<Utc>]) -> ValidationResult<f64> {
    GrowthEstimator::default().estimate(values, timestamps)
}
