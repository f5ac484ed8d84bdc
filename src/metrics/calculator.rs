//! Performance metrics calculator.
//!
//! Calculates the full set of statistics for a valuation series.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::growth::GrowthEstimator;
use super::statistics;
use crate::data::Observation;
use crate::validation::{ensure_positive, ValidationError, ValidationResult};
use crate::windows::WindowConfig;

/// Settings shared by every series a calculator evaluates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Observations per year, used to annualize per-period ratios.
    pub periods_per_year: f64,
    /// Annual risk-free rate for the Sharpe ratio.
    pub risk_free_rate: f64,
    /// Annual minimum acceptable return for the Sortino ratio.
    pub minimum_acceptable_return: f64,
    /// Window geometry for the robust CAGR.
    pub window: WindowConfig,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            periods_per_year: 252.0,
            risk_free_rate: 0.0,
            minimum_acceptable_return: 0.0,
            window: WindowConfig::default(),
        }
    }
}

impl MetricsConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> ValidationResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ValidationError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        ensure_positive("periods_per_year", self.periods_per_year)?;
        self.window.validate()
    }

    fn risk_free_per_period(&self) -> f64 {
        self.risk_free_rate / self.periods_per_year
    }

    fn target_per_period(&self) -> f64 {
        self.minimum_acceptable_return / self.periods_per_year
    }
}

/// Performance statistics for one series.
///
/// Rates and ratios are fractions (0.10 is 10%). Anything undefined for the
/// input, such as growth over a single observation, is NaN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    // Series
    pub observations: usize,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub start_value: f64,
    pub end_value: f64,

    // Growth
    pub total_return: f64,
    pub cagr: f64,
    pub robust_cagr: f64,

    // Risk
    pub max_drawdown: f64,
    pub avg_drawdown: f64,
    pub volatility: f64,

    // Risk-adjusted
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub calmar_ratio: f64,
    pub robust_calmar_ratio: f64,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            observations: 0,
            start: None,
            end: None,
            start_value: f64::NAN,
            end_value: f64::NAN,
            total_return: f64::NAN,
            cagr: f64::NAN,
            robust_cagr: f64::NAN,
            max_drawdown: f64::NAN,
            avg_drawdown: f64::NAN,
            volatility: f64::NAN,
            sharpe_ratio: f64::NAN,
            sortino_ratio: f64::NAN,
            calmar_ratio: f64::NAN,
            robust_calmar_ratio: f64::NAN,
        }
    }
}

impl PerformanceMetrics {
    /// Generate a summary report.
    pub fn summary(&self) -> String {
        let period = match (self.start, self.end) {
            (Some(start), Some(end)) => format!(
                "{} to {}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
            _ => "n/a".to_string(),
        };

        format!(
            "Performance Summary\n\
             ====================\n\
             \n\
             Observations: {} ({})\n\
             Start Value: {:.2}\n\
             End Value: {:.2}\n\
             \n\
             Total Return: {:.2}%\n\
             CAGR: {:.2}%\n\
             Robust CAGR: {:.2}%\n\
             \n\
             Max Drawdown: {:.2}%\n\
             Avg Drawdown: {:.2}%\n\
             Volatility: {:.2}%\n\
             \n\
             Sharpe Ratio: {:.2}\n\
             Sortino Ratio: {:.2}\n\
             Calmar Ratio: {:.2}\n\
             Robust Calmar Ratio: {:.2}",
            self.observations,
            period,
            self.start_value,
            self.end_value,
            self.total_return * 100.0,
            self.cagr * 100.0,
            self.robust_cagr * 100.0,
            self.max_drawdown * 100.0,
            self.avg_drawdown * 100.0,
            self.volatility * 100.0,
            self.sharpe_ratio,
            self.sortino_ratio,
            self.calmar_ratio,
            self.robust_calmar_ratio
        )
    }
}

/// Metrics calculator.
#[derive(Debug, Clone)]
pub struct MetricsCalculator {
    config: MetricsConfig,
    growth: GrowthEstimator,
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self {
            config: MetricsConfig::default(),
            growth: GrowthEstimator::default(),
        }
    }
}

impl MetricsCalculator {
    pub fn new(config: MetricsConfig) -> ValidationResult<Self> {
        config.validate()?;
        let growth = GrowthEstimator::new(config.window)?;
        Ok(Self { config, growth })
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Calculate all metrics for a series in timestamp order.
    pub fn calculate(&self, series: &[Observation]) -> ValidationResult<PerformanceMetrics> {
        let (first, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Ok(PerformanceMetrics::default()),
        };

        let values: Vec<f64> = series.iter().map(|o| o.value).collect();

        // Partitioning validates the values
        let robust_cagr = self.growth.estimate_series(series)?;

        let cagr = if series.len() > 1 {
            statistics::cagr(first.value, last.value, first.timestamp, last.timestamp)?
        } else {
            f64::NAN
        };

        let drawdowns = statistics::drawdowns(&values);
        let max_drawdown = statistics::max_drawdown(&values);
        let underwater: Vec<f64> = drawdowns.iter().filter(|&&d| d < 0.0).map(|d| -d).collect();
        let avg_drawdown = if underwater.is_empty() {
            0.0
        } else {
            statistics::mean(&underwater)
        };

        let returns = statistics::returns(&values);
        let periods = self.config.periods_per_year;
        let volatility = statistics::std_dev(&returns) * periods.sqrt();
        let sharpe_ratio = statistics::annualized_sharpe_ratio(
            &returns,
            self.config.risk_free_per_period(),
            periods,
        );
        let sortino_ratio = statistics::annualized_sortino_ratio(
            &returns,
            self.config.target_per_period(),
            periods,
        );

        debug!(
            observations = series.len(),
            cagr,
            robust_cagr,
            max_drawdown,
            "Calculated metrics"
        );

        Ok(PerformanceMetrics {
            observations: series.len(),
            start: Some(first.timestamp),
            end: Some(last.timestamp),
            start_value: first.value,
            end_value: last.value,
            total_return: last.value / first.value - 1.0,
            cagr,
            robust_cagr,
            max_drawdown,
            avg_drawdown,
            volatility,
            sharpe_ratio,
            sortino_ratio,
            calmar_ratio: statistics::calmar_ratio(cagr, max_drawdown),
            robust_calmar_ratio: statistics::calmar_ratio(robust_cagr, max_drawdown),
        })
    }

    /// Calculate metrics for many independent series in parallel.
    ///
    /// Results are in input order; one failing series does not affect the others.
    pub fn calculate_many(
        &self,
        series: &[Vec<Observation>],
    ) -> Vec<ValidationResult<PerformanceMetrics>> {
        info!("Calculating metrics for {} series", series.len());

        let results: Vec<_> = series.par_iter().map(|s| self.calculate(s)).collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            info!("{} of {} series failed validation", failed, series.len());
        }

        results
    }
}
