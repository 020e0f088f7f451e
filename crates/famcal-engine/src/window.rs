//! Window resolution and anchor navigation for the four view modes.
//!
//! A window is always made of whole calendar days: it starts at 00:00:00.000
//! of its first day and ends at 23:59:59.999 of its last, whatever the
//! anchor's time of day.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::interval::{end_of_day, start_of_day, Interval};

/// View granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    Day,
    Week,
    Month,
    #[default]
    Schedule,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::Schedule,
        ViewMode::Day,
        ViewMode::Week,
        ViewMode::Month,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Day => "Day",
            ViewMode::Week => "Week",
            ViewMode::Month => "Month",
            ViewMode::Schedule => "Schedule",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        ViewMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::InvalidViewMode(s.to_string()))
    }
}

/// Navigation request from prev/today/next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Prev,
    Next,
    Today,
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prev" | "previous" => Ok(Direction::Prev),
            "next" => Ok(Direction::Next),
            "today" => Ok(Direction::Today),
            _ => Err(EngineError::InvalidDirection(s.to_string())),
        }
    }
}

/// The full-day-aligned span a view displays. `start <= end` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Window {
    /// Window covering `first..=last` calendar days.
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: start_of_day(first),
            end: end_of_day(last),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end.date()
    }

    /// Number of calendar days covered.
    pub fn day_count(&self) -> i64 {
        (self.last_day() - self.first_day()).num_days() + 1
    }

    /// Inclusive membership: a span touching either boundary instant is in.
    pub fn contains_span(&self, span: &Interval) -> bool {
        span.touches(&Interval::new(self.start, self.end))
    }
}

/// Sunday on or before `date`, clamped to `NaiveDate::MIN`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(offset)).unwrap_or(NaiveDate::MIN)
}

/// `date` plus `days`, clamped to `NaiveDate::MAX`.
pub(crate) fn add_days_clamped(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

/// Last calendar day of `date`'s month (day 0 of the next month).
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Resolve the window a view shows for `anchor`.
///
/// - Day / Schedule: the anchor's calendar day.
/// - Week: Sunday through Saturday of the anchor's week.
/// - Month: the 1st through the last day of the anchor's month.
///
/// Weeks at the edges of chrono's date range are clamped to that range.
pub fn resolve_window(anchor: NaiveDateTime, mode: ViewMode) -> Window {
    let day = anchor.date();
    let window = match mode {
        ViewMode::Day | ViewMode::Schedule => Window::days(day, day),
        ViewMode::Week => {
            let first = week_start(day);
            Window::days(first, add_days_clamped(first, 6))
        }
        ViewMode::Month => {
            let first = day.with_day(1).unwrap_or(day);
            Window::days(first, last_day_of_month(day))
        }
    };
    log::trace!(
        "resolved {} window for {}: {} .. {}",
        mode,
        anchor,
        window.start,
        window.end
    );
    window
}

/// Step the anchor one unit of the view's granularity, or reset it to `now`.
///
/// Month steps clamp to the target month's length (Jan 31 → Feb 28/29) and
/// keep the anchor's time of day. Steps that would leave chrono's supported
/// range leave the anchor unchanged.
pub fn advance(
    anchor: NaiveDateTime,
    mode: ViewMode,
    direction: Direction,
    now: NaiveDateTime,
) -> NaiveDateTime {
    let stepped = match (direction, mode) {
        (Direction::Today, _) => Some(now),
        (Direction::Next, ViewMode::Day | ViewMode::Schedule) => {
            anchor.checked_add_days(Days::new(1))
        }
        (Direction::Prev, ViewMode::Day | ViewMode::Schedule) => {
            anchor.checked_sub_days(Days::new(1))
        }
        (Direction::Next, ViewMode::Week) => anchor.checked_add_days(Days::new(7)),
        (Direction::Prev, ViewMode::Week) => anchor.checked_sub_days(Days::new(7)),
        (Direction::Next, ViewMode::Month) => anchor.checked_add_months(Months::new(1)),
        (Direction::Prev, ViewMode::Month) => anchor.checked_sub_months(Months::new(1)),
    };
    let target = stepped.unwrap_or(anchor);
    log::debug!("advance {:?} in {} view: {} -> {}", direction, mode, anchor, target);
    target
}

/// Parse an anchor or instant: `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM`, or
/// `YYYY-MM-DDTHH:MM:SS[.fff]`. Bare dates mean midnight.
pub fn parse_instant(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(dt);
    }
    s.parse::<NaiveDate>()
        .map(start_of_day)
        .map_err(|e| EngineError::InvalidDateTime(format!("'{}': {}", s, e)))
}
