//! Overlapping time-window partitioning.
//!
//! Splits a series into fixed-length windows that advance by
//! `window_size_ms - overlap_ms`, measured from the first observation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::{Observation, Window, MS_PER_YEAR};
use crate::validation::{
    ensure_finite, ensure_overlap, ensure_positive, ValidationError, ValidationResult,
};

/// Upper bound on windows produced for one series.
pub const MAX_WINDOWS: usize = 1_000_000;

/// Configuration for window partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window length in milliseconds.
    pub window_size_ms: f64,
    /// Time shared by consecutive windows, in milliseconds.
    #[serde(default)]
    pub overlap_ms: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_size_ms: MS_PER_YEAR,
            overlap_ms: MS_PER_YEAR / 2.0,
        }
    }
}

impl WindowConfig {
    /// Windows of `window_size_ms` with no overlap.
    pub fn non_overlapping(window_size_ms: f64) -> Self {
        Self {
            window_size_ms,
            overlap_ms: 0.0,
        }
    }

    /// Distance between consecutive window starts.
    pub fn stride_ms(&self) -> f64 {
        self.window_size_ms - self.overlap_ms
    }

    pub fn validate(&self) -> ValidationResult<()> {
        ensure_positive("window_size_ms", self.window_size_ms)?;
        ensure_overlap(self.overlap_ms, self.window_size_ms)
    }
}

/// Partitioner with a validated window geometry.
#[derive(Debug, Clone)]
pub struct WindowPartitioner {
    config: WindowConfig,
}

impl Default for WindowPartitioner {
    /// One-year windows overlapping by half a year.
    fn default() -> Self {
        Self {
            config: WindowConfig::default(),
        }
    }
}

impl WindowPartitioner {
    /// Create a partitioner, rejecting invalid geometry.
    pub fn new(config: WindowConfig) -> ValidationResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Number of windows needed to cover a span of `span_ms`.
    ///
    /// `ceil(span / stride)`, at least one. Without overlap a span that is an
    /// exact multiple of the stride ends on an open boundary, so one more
    /// window is added to keep the last observation covered; the count is
    /// then `ceil(span / stride) + 1`.
    ///
    /// Fails when the geometry would need more than [`MAX_WINDOWS`] windows.
    pub fn window_count(&self, span_ms: f64) -> ValidationResult<usize> {
        if span_ms <= 0.0 {
            return Ok(1);
        }

        let stride = self.config.stride_ms();
        let count = (span_ms / stride).ceil();
        if !count.is_finite() || count > MAX_WINDOWS as f64 {
            return Err(ValidationError::TooManyWindows {
                window_size_ms: self.config.window_size_ms,
                overlap_ms: self.config.overlap_ms,
                span_ms,
                limit: MAX_WINDOWS,
            });
        }

        let count = (count as usize).max(1);
        let last_end = (count - 1) as f64 * stride + self.config.window_size_ms;
        if last_end <= span_ms {
            Ok(count + 1)
        } else {
            Ok(count)
        }
    }

    /// Split a series into windows.
    ///
    /// Empty windows are kept so window `i` always starts at `i * stride`.
    /// An empty series produces no windows. Timestamps must be increasing;
    /// window bounds are found by binary search over the offsets.
    pub fn partition<'a>(&self, observations: &'a [Observation]) -> ValidationResult<Vec<Window<'a>>> {
        let values: Vec<f64> = observations.iter().map(|o| o.value).collect();
        ensure_finite("observations", &values)?;

        let (first, last) = match (observations.first(), observations.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Ok(Vec::new()),
        };

        let origin = first.timestamp;
        let offsets: Vec<f64> = observations.iter().map(|o| o.offset_ms(origin)).collect();
        let span_ms = last.offset_ms(origin);
        let stride = self.config.stride_ms();
        let count = self.window_count(span_ms)?;

        let windows: Vec<Window<'a>> = (0..count)
            .map(|index| {
                let start_ms = index as f64 * stride;
                let end_ms = start_ms + self.config.window_size_ms;
                let lo = offsets.partition_point(|&offset| offset < start_ms);
                let hi = offsets.partition_point(|&offset| offset < end_ms);
                let members = (lo..hi.max(lo)).collect();
                Window::new(index, start_ms, end_ms, observations, members)
            })
            .collect();

        debug!(
            windows = windows.len(),
            empty = windows.iter().filter(|w| w.is_empty()).count(),
            span_ms,
            stride_ms = stride,
            "Partitioned series"
        );

        Ok(windows)
    }
}

/// Split `observations` into windows of `window_size_ms`, each overlapping
/// the previous one by `overlap_ms`.
pub fn partition(
    observations: &[Observation],
    window_size_ms: f64,
    overlap_ms: f64,
) -> ValidationResult<Vec<Window<'_>>> {
    WindowPartitioner::new(WindowConfig {
        window_size_ms,
        overlap_ms,
    })?
    .partition(observations)
}
