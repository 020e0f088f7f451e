//! Time spans and the strict pairwise overlap test.
//!
//! Two spans overlap when `a.start < b.end && a.end > b.start`. Touching
//! endpoints (one ends exactly when the other starts) do NOT overlap.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// A naive local wall-clock span. Callers keep `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Strict overlap; adjacent spans are not overlapping.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Inclusive overlap; a shared boundary instant counts as contact.
    ///
    /// Used for window membership, never for slot clustering.
    pub fn touches(&self, other: &Interval) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

/// Free-function form of [`Interval::overlaps`].
pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    a.overlaps(b)
}

/// 00:00:00.000 on `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// 23:59:59.999 on `date`, the last instant a day window includes.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    // 23:59:59.999 is always a valid time of day.
    let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(last)
}

/// Fractional hour of the day (`15:45` → `15.75`), ignoring seconds.
pub fn fractional_hour(instant: &NaiveDateTime) -> f64 {
    instant.hour() as f64 + instant.minute() as f64 / 60.0
}
