//! Performance metrics module.
//!
//! Provides performance calculations over a valuation series:
//! - Windowed linear-regression CAGR (robust CAGR)
//! - Endpoint CAGR, total return
//! - Drawdown series and maximum drawdown
//! - Sharpe, Sortino, and Calmar ratios

pub mod calculator;
pub mod growth;
pub mod regression;
pub mod statistics;

pub use calculator::{MetricsCalculator, MetricsConfig, PerformanceMetrics};
pub use growth::{growth_sample, linear_regression_cagr, weighted_growth, GrowthEstimator};
pub use regression::{linear_regression, Regression};
pub use statistics::{
    annualized_sharpe_ratio, annualized_sortino_ratio, cagr, calmar_ratio, downside_deviation,
    drawdowns, max_drawdown, mean, returns, sharpe_ratio, sortino_ratio, std_dev,
};
