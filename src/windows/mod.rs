//! Time-window partitioning module.
//!
//! Splits a series into fixed-length windows:
//! - Size: fixed wall-clock duration
//! - Overlap: fixed, strictly below the size
//! - Empty windows are kept

pub mod partition;

pub use partition::{partition, WindowConfig, WindowPartitioner, MAX_WINDOWS};
