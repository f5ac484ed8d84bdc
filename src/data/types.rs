//! Core data types for performance statistics.
//!
//! A series is a slice of [`Observation`]s in strictly increasing
//! timestamp order. Windows borrow the series rather than copying it.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds in one year of 365 days.
pub const MS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0 * 1000.0;

/// A single portfolio valuation at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// When the value was sampled
    pub timestamp: DateTime<Utc>,

    /// Portfolio value
    pub value: f64,
}

impl Observation {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Build from Unix epoch milliseconds. `None` if out of range.
    pub fn from_millis(millis: i64, value: f64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(|timestamp| Self { timestamp, value })
    }

    /// Build from a calendar date at midnight UTC.
    pub fn on_date(date: NaiveDate, value: f64) -> Self {
        Self {
            timestamp: Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
            value,
        }
    }

    /// Milliseconds elapsed since `origin` (negative if before it).
    pub fn offset_ms(&self, origin: DateTime<Utc>) -> f64 {
        (self.timestamp - origin).num_milliseconds() as f64
    }
}

/// Pair values with timestamps into a series.
///
/// Callers validate the lengths; extra elements on either side are dropped.
pub fn zip_series(values: &[f64], timestamps: &[DateTime<Utc>]) -> Vec<Observation> {
    values
        .iter()
        .zip(timestamps)
        .map(|(&value, &timestamp)| Observation::new(timestamp, value))
        .collect()
}

/// A time-bounded view into a series.
///
/// Covers the half-open interval `[start_ms, end_ms)` measured from the
/// first observation of the series. Members are kept as positions into
/// the borrowed series.
#[derive(Debug, Clone, PartialEq)]
pub struct Window<'a> {
    /// Window number (0-indexed).
    pub index: usize,
    /// Interval start, ms after the series origin.
    pub start_ms: f64,
    /// Interval end (exclusive), ms after the series origin.
    pub end_ms: f64,
    series: &'a [Observation],
    members: Vec<usize>,
}

impl<'a> Window<'a> {
    pub(crate) fn new(
        index: usize,
        start_ms: f64,
        end_ms: f64,
        series: &'a [Observation],
        members: Vec<usize>,
    ) -> Self {
        Self {
            index,
            start_ms,
            end_ms,
            series,
            members,
        }
    }

    /// Interval length in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.end_ms - self.start_ms
    }

    /// Positions of member observations in the source series.
    pub fn indices(&self) -> &[usize] {
        &self.members
    }

    /// Member observations in series order.
    pub fn observations(&self) -> impl Iterator<Item = &'a Observation> + '_ {
        let series = self.series;
        self.members.iter().map(move |&i| &series[i])
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn first(&self) -> Option<&'a Observation> {
        let series = self.series;
        self.members.first().map(|&i| &series[i])
    }

    pub fn last(&self) -> Option<&'a Observation> {
        let series = self.series;
        self.members.last().map(|&i| &series[i])
    }

    /// Time between first and last member, in years. Zero for fewer than two members.
    pub fn span_years(&self) -> f64 {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => last.offset_ms(first.timestamp) / MS_PER_YEAR,
            _ => 0.0,
        }
    }
}

/// Growth rate derived from one window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthSample {
    /// Implied annual growth rate (NaN when undefined).
    pub rate: f64,
    /// Time covered by the window's members, in years.
    pub fraction_of_year: f64,
}

impl GrowthSample {
    /// Whether this sample takes part in aggregation.
    pub fn is_usable(&self) -> bool {
        !self.rate.is_nan()
    }
}
