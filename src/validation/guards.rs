//! Precondition guards for metric inputs.
//!
//! Validates:
//! - Element kinds (every value is a finite number)
//! - Paired sequence lengths
//! - Window geometry (positive size, overlap below size)
//! - Date ordering for endpoint CAGR

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Kind of an element that failed the finite-number guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    NaN,
    PositiveInfinity,
    NegativeInfinity,
}

impl ValueKind {
    /// Classify a value, returning `None` for finite numbers.
    pub fn of(value: f64) -> Option<Self> {
        if value.is_nan() {
            Some(Self::NaN)
        } else if value == f64::INFINITY {
            Some(Self::PositiveInfinity)
        } else if value == f64::NEG_INFINITY {
            Some(Self::NegativeInfinity)
        } else {
            None
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NaN => write!(f, "NaN"),
            Self::PositiveInfinity => write!(f, "+inf"),
            Self::NegativeInfinity => write!(f, "-inf"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Mismatched lengths: {left_name} has {left} elements, {right_name} has {right}")]
    LengthMismatch {
        left_name: &'static str,
        left: usize,
        right_name: &'static str,
        right: usize,
    },

    #[error("{argument} must contain only finite numbers, found {}", describe(.offending))]
    NonFinite {
        argument: &'static str,
        offending: Vec<(usize, ValueKind)>,
    },

    #[error("{argument} must be a positive number, got {value}")]
    NonPositive { argument: &'static str, value: f64 },

    #[error("overlap_ms must be non-negative, got {overlap_ms}")]
    NegativeOverlap { overlap_ms: f64 },

    #[error("overlap_ms ({overlap_ms}) must be less than window_size_ms ({window_size_ms})")]
    OverlapTooLarge {
        overlap_ms: f64,
        window_size_ms: f64,
    },

    #[error(
        "window_size_ms ({window_size_ms}) with overlap_ms ({overlap_ms}) needs more than {limit} windows to cover {span_ms} ms"
    )]
    TooManyWindows {
        window_size_ms: f64,
        overlap_ms: f64,
        span_ms: f64,
        limit: usize,
    },

    #[error("start ({start}) must be strictly before end ({end})")]
    InvalidDateRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid config: {0}")]
    Config(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

fn describe(offending: &[(usize, ValueKind)]) -> String {
    offending
        .iter()
        .map(|(index, kind)| format!("[{}] = {}", index, kind))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Require every element to be a finite number.
pub fn ensure_finite(argument: &'static str, values: &[f64]) -> ValidationResult<()> {
    let offending: Vec<(usize, ValueKind)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, &v)| ValueKind::of(v).map(|kind| (i, kind)))
        .collect();

    if offending.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite {
            argument,
            offending,
        })
    }
}

/// Require two paired sequences to have the same length.
pub fn ensure_same_length(
    left_name: &'static str,
    left: usize,
    right_name: &'static str,
    right: usize,
) -> ValidationResult<()> {
    if left == right {
        Ok(())
    } else {
        Err(ValidationError::LengthMismatch {
            left_name,
            left,
            right_name,
            right,
        })
    }
}

/// Require a strictly positive, finite number.
pub fn ensure_positive(argument: &'static str, value: f64) -> ValidationResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositive { argument, value })
    }
}

/// Require `0 <= overlap_ms < window_size_ms`.
pub fn ensure_overlap(overlap_ms: f64, window_size_ms: f64) -> ValidationResult<()> {
    if !overlap_ms.is_finite() || overlap_ms < 0.0 {
        return Err(ValidationError::NegativeOverlap { overlap_ms });
    }
    if overlap_ms >= window_size_ms {
        return Err(ValidationError::OverlapTooLarge {
            overlap_ms,
            window_size_ms,
        });
    }
    Ok(())
}

/// Require `start < end`.
pub fn ensure_chronological(start: DateTime<Utc>, end: DateTime<Utc>) -> ValidationResult<()> {
    if start < end {
        Ok(())
    } else {
        Err(ValidationError::InvalidDateRange { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_finite_values_pass() {
        assert!(ensure_finite("values", &[1.0, -2.5, 0.0]).is_ok());
        assert!(ensure_finite("values", &[]).is_ok());
    }

    #[test]
    fn test_non_finite_values_are_listed() {
        let err = ensure_finite("values", &[1.0, f64::NAN, 2.0, f64::NEG_INFINITY]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonFinite {
                argument: "values",
                offending: vec![(1, ValueKind::NaN), (3, ValueKind::NegativeInfinity)],
            }
        );
        let message = err.to_string();
        assert!(message.contains("[1] = NaN"));
        assert!(message.contains("[3] = -inf"));
    }

    #[test]
    fn test_length_mismatch_names_both_lengths() {
        let err = ensure_same_length("values", 0, "timestamps", 1).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Mismatched lengths"));
        assert!(message.contains("values has 0"));
        assert!(message.contains("timestamps has 1"));
    }

    #[test]
    fn test_positive_guard() {
        assert!(ensure_positive("window_size_ms", 1.0).is_ok());
        assert!(ensure_positive("window_size_ms", 0.0).is_err());
        assert!(ensure_positive("window_size_ms", -5.0).is_err());
        assert!(ensure_positive("window_size_ms", f64::NAN).is_err());
    }

    #[test]
    fn test_overlap_guard() {
        assert!(ensure_overlap(0.0, 10.0).is_ok());
        assert!(ensure_overlap(9.9, 10.0).is_ok());
        assert!(matches!(
            ensure_overlap(10.0, 10.0),
            Err(ValidationError::OverlapTooLarge { .. })
        ));
        assert!(matches!(
            ensure_overlap(-1.0, 10.0),
            Err(ValidationError::NegativeOverlap { .. })
        ));
    }

    #[test]
    fn test_chronological_guard() {
        let a = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert!(ensure_chronological(a, b).is_ok());
        assert!(ensure_chronological(b, a).is_err());
        assert!(ensure_chronological(a, a).is_err());
    }
}
