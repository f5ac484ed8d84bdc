pub mod data;
pub mod metrics;
pub mod validation;
pub mod windows;

// Re-export commonly used types
pub use data::{GrowthSample, Observation, Window, MS_PER_YEAR};
pub use metrics::{
    cagr, calmar_ratio, drawdowns, linear_regression, linear_regression_cagr, max_drawdown,
    sharpe_ratio, sortino_ratio, GrowthEstimator, MetricsCalculator, MetricsConfig,
    PerformanceMetrics, Regression,
};
pub use validation::{ValidationError, ValidationResult};
pub use windows::{partition, WindowConfig, WindowPartitioner};
