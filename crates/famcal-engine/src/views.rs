//! View models for the month grid, week columns, and schedule day.
//!
//! These only bucket and arrange engine output; rendering is left to the host.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::interval::start_of_day;
use crate::layout::{layout_day_with, LayoutBox, LayoutOptions};
use crate::model::Event;
use crate::select::{events_starting_on, sort_for_list, DayIndex};
use crate::window::{add_days_clamped, resolve_window, week_start, ViewMode};

/// Cells in a month grid: six weeks of seven days.
pub const MONTH_GRID_CELLS: usize = 42;

/// One day of the week view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayColumn {
    pub date: NaiveDate,
    pub is_today: bool,
    pub events: Vec<Event>,
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCell {
    pub date: NaiveDate,
    /// False for the leading/trailing days of adjacent months.
    pub in_month: bool,
    pub is_today: bool,
    /// The day's events; always empty outside the month.
    pub events: Vec<Event>,
    /// The day's holidays, shown in every cell.
    pub holidays: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub cells: Vec<MonthCell>,
}

/// A day in schedule mode: all-day strip plus positioned timed events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub all_day: Vec<Event>,
    pub timed: Vec<LayoutBox>,
}

fn owned(events: &[&Event]) -> Vec<Event> {
    events.iter().map(|&e| e.clone()).collect()
}

/// Build the 42-cell grid for `anchor`'s month, starting on the Sunday on or
/// before the 1st.
pub fn month_grid(anchor: NaiveDate, events: &[Event], today: NaiveDate) -> MonthGrid {
    let window = resolve_window(start_of_day(anchor), ViewMode::Month);
    let (first, last) = (window.first_day(), window.last_day());
    let grid_start = week_start(first);
    let index = DayIndex::build(events);

    let cells = grid_start
        .iter_days()
        .take(MONTH_GRID_CELLS)
        .map(|date| {
            let in_month = date.month() == first.month() && date.year() == first.year();
            let day_events = index.on(date);
            MonthCell {
                date,
                in_month,
                is_today: date == today,
                events: if in_month { owned(day_events) } else { Vec::new() },
                holidays: day_events
                    .iter()
                    .filter(|e| e.is_holiday)
                    .map(|&e| e.clone())
                    .collect(),
            }
        })
        .collect();

    MonthGrid { first, last, cells }
}

/// Seven columns, Sunday through Saturday, for `anchor`'s week.
pub fn week_columns(anchor: NaiveDate, events: &[Event], today: NaiveDate) -> Vec<DayColumn> {
    let index = DayIndex::build(events);
    week_start(anchor)
        .iter_days()
        .take(7)
        .map(|date| DayColumn {
            date,
            is_today: date == today,
            events: owned(index.on(date)),
        })
        .collect()
}

/// Sunday and Saturday of the week after `anchor`'s.
pub fn next_week_range(anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = add_days_clamped(week_start(anchor), 7);
    (start, add_days_clamped(start, 6))
}

/// Label for the next-week teaser cell: `Dec 7 - 13` or `Dec 28 - Jan 3`.
pub fn next_week_label(anchor: NaiveDate) -> String {
    let (start, end) = next_week_range(anchor);
    if start.month() == end.month() {
        format!("{} - {}", start.format("%b %-d"), end.day())
    } else {
        format!("{} - {}", start.format("%b %-d"), end.format("%b %-d"))
    }
}

/// Day-view list for `day`: events starting that day, all-day first, then
/// by start time.
pub fn day_list(day: NaiveDate, events: &[Event]) -> Vec<Event> {
    let mut listed = events_starting_on(events, day);
    sort_for_list(&mut listed);
    listed
}

/// Split `day`'s events into the all-day strip and the timed layout.
pub fn schedule_day(day: NaiveDate, events: &[Event], options: &LayoutOptions) -> ScheduleDay {
    let all_day = events
        .iter()
        .filter(|e| e.is_all_day && e.start_date() == day)
        .cloned()
        .collect();
    ScheduleDay {
        date: day,
        all_day,
        timed: layout_day_with(events, day, options),
    }
}
