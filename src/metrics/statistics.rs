//! Return, drawdown, and risk-adjusted ratio statistics.
//!
//! All functions are pure over slices. Undefined results are NaN rather
//! than errors; only `cagr` validates its dates.

use chrono::{DateTime, Utc};
use statrs::statistics::Statistics;

use crate::data::MS_PER_YEAR;
use crate::validation::{ensure_chronological, ValidationResult};

/// Simple period returns `v[i] / v[i - 1] - 1`.
pub fn returns(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Drawdown at each point, `value / running_max - 1` (zero or negative).
pub fn drawdowns(values: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    values
        .iter()
        .map(|&value| {
            peak = peak.max(value);
            value / peak - 1.0
        })
        .collect()
}

/// Largest decline from a running peak, as a positive fraction.
///
/// Zero for a series that never falls, NaN for an empty one.
pub fn max_drawdown(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    -drawdowns(values).into_iter().fold(0.0, f64::min)
}

/// Arithmetic mean. NaN when empty.
pub fn mean(xs: &[f64]) -> f64 {
    xs.iter().mean()
}

/// Sample standard deviation (n - 1). NaN for fewer than two elements.
pub fn std_dev(xs: &[f64]) -> f64 {
    xs.iter().std_dev()
}

/// Compound annual growth rate between two dated values.
///
/// Years are 365-day years. Fails unless `start` is strictly before `end`.
pub fn cagr(
    start_value: f64,
    end_value: f64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> ValidationResult<f64> {
    ensure_chronological(start, end)?;
    let years = (end - start).num_milliseconds() as f64 / MS_PER_YEAR;
    Ok((end_value / start_value).powf(1.0 / years) - 1.0)
}

/// Per-period Sharpe ratio of `returns` over a constant risk-free rate.
pub fn sharpe_ratio(returns: &[f64], risk_free: f64) -> f64 {
    let excess: Vec<f64> = returns.iter().map(|r| r - risk_free).collect();
    let sd = std_dev(&excess);
    if sd == 0.0 {
        return f64::NAN;
    }
    mean(&excess) / sd
}

/// Sharpe ratio scaled by `sqrt(periods_per_year)`.
pub fn annualized_sharpe_ratio(returns: &[f64], risk_free: f64, periods_per_year: f64) -> f64 {
    sharpe_ratio(returns, risk_free) * periods_per_year.sqrt()
}

/// Root mean square of shortfalls below `target`, over all periods.
pub fn downside_deviation(returns: &[f64], target: f64) -> f64 {
    if returns.is_empty() {
        return f64::NAN;
    }
    let shortfall = returns
        .iter()
        .map(|r| (r - target).min(0.0).powi(2))
        .sum::<f64>();
    (shortfall / returns.len() as f64).sqrt()
}

/// Per-period Sortino ratio against a minimum acceptable return.
///
/// NaN when no period falls below `target`.
pub fn sortino_ratio(returns: &[f64], target: f64) -> f64 {
    let dd = downside_deviation(returns, target);
    if dd == 0.0 {
        return f64::NAN;
    }
    let excess: Vec<f64> = returns.iter().map(|r| r - target).collect();
    mean(&excess) / dd
}

/// Sortino ratio scaled by `sqrt(periods_per_year)`.
pub fn annualized_sortino_ratio(returns: &[f64], target: f64, periods_per_year: f64) -> f64 {
    sortino_ratio(returns, target) * periods_per_year.sqrt()
}

/// Growth per unit of worst drawdown. NaN when there was no drawdown.
pub fn calmar_ratio(cagr: f64, max_drawdown: f64) -> f64 {
    if max_drawdown == 0.0 {
        return f64::NAN;
    }
    cagr / max_drawdown
}
