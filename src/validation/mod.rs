//! Validation module for metric inputs.
//!
//! Guards return typed errors that carry the offending values:
//! - Element kinds (finite numbers only)
//! - Paired lengths
//! - Window geometry and date ordering

pub mod guards;

pub use guards::{
    ensure_chronological, ensure_finite, ensure_overlap, ensure_positive, ensure_same_length,
    ValidationError, ValidationResult, ValueKind,
};
