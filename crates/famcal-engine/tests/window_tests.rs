//! Tests for window resolution and anchor navigation.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use famcal_engine::window::{last_day_of_month, week_start};
use famcal_engine::{advance, parse_instant, resolve_window, Direction, ViewMode};

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn assert_full_day_bounds(start: NaiveDateTime, end: NaiveDateTime) {
    assert_eq!((start.hour(), start.minute(), start.second()), (0, 0, 0));
    assert_eq!(start.nanosecond(), 0);
    assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
    assert_eq!(end.nanosecond(), 999_000_000);
}

// ── resolve_window ──────────────────────────────────────────────────────────

#[test]
fn day_window_covers_anchor_day_ignoring_time() {
    let w = resolve_window(at(2025, 12, 2, 11, 53), ViewMode::Day);
    assert_eq!(w.first_day(), date(2025, 12, 2));
    assert_eq!(w.last_day(), date(2025, 12, 2));
    assert_full_day_bounds(w.start, w.end);
}

#[test]
fn schedule_window_matches_day_window() {
    let anchor = at(2025, 12, 2, 23, 59);
    assert_eq!(
        resolve_window(anchor, ViewMode::Schedule),
        resolve_window(anchor, ViewMode::Day)
    );
}

#[test]
fn week_window_starts_on_sunday() {
    // Dec 2, 2025 is a Tuesday; its week runs Sun Nov 30 .. Sat Dec 6.
    let w = resolve_window(at(2025, 12, 2, 9, 0), ViewMode::Week);
    assert_eq!(w.first_day(), date(2025, 11, 30));
    assert_eq!(w.first_day().weekday(), Weekday::Sun);
    assert_eq!(w.last_day(), date(2025, 12, 6));
    assert_eq!(w.day_count(), 7);
    assert_full_day_bounds(w.start, w.end);
}

#[test]
fn week_window_anchor_on_sunday_and_saturday() {
    let sunday = resolve_window(at(2025, 11, 30, 0, 0), ViewMode::Week);
    let saturday = resolve_window(at(2025, 12, 6, 23, 0), ViewMode::Week);
    assert_eq!(sunday, saturday);
}

#[test]
fn month_window_spans_first_to_last_day() {
    let w = resolve_window(at(2025, 12, 17, 8, 0), ViewMode::Month);
    assert_eq!(w.first_day(), date(2025, 12, 1));
    assert_eq!(w.last_day(), date(2025, 12, 31));
    assert_full_day_bounds(w.start, w.end);
}

#[test]
fn month_window_leap_february() {
    let leap = resolve_window(at(2024, 2, 10, 0, 0), ViewMode::Month);
    assert_eq!(leap.last_day(), date(2024, 2, 29));

    let common = resolve_window(at(2025, 2, 10, 0, 0), ViewMode::Month);
    assert_eq!(common.last_day(), date(2025, 2, 28));
}

#[test]
fn last_day_of_month_handles_december() {
    assert_eq!(last_day_of_month(date(2025, 12, 5)), date(2025, 12, 31));
    assert_eq!(last_day_of_month(date(2025, 4, 30)), date(2025, 4, 30));
}

#[test]
fn week_start_is_identity_on_sunday() {
    assert_eq!(week_start(date(2025, 11, 30)), date(2025, 11, 30));
    assert_eq!(week_start(date(2025, 12, 6)), date(2025, 11, 30));
}

#[test]
fn windows_at_the_calendar_edges_clamp_instead_of_overflowing() {
    for day in [NaiveDate::MIN, NaiveDate::MAX] {
        let anchor = day.and_hms_opt(12, 0, 0).unwrap();
        for mode in ViewMode::ALL {
            let w = resolve_window(anchor, mode);
            assert!(w.start <= w.end, "{mode} at {day}");
            assert!(w.first_day() <= day && day <= w.last_day(), "{mode} at {day}");
            assert_full_day_bounds(w.start, w.end);
        }
    }

    let last_week = resolve_window(NaiveDate::MAX.and_hms_opt(0, 0, 0).unwrap(), ViewMode::Week);
    assert_eq!(last_week.last_day(), NaiveDate::MAX);
}

// ── advance ─────────────────────────────────────────────────────────────────

#[test]
fn day_and_schedule_step_one_day() {
    let anchor = at(2025, 12, 31, 10, 0);
    let now = at(2025, 12, 2, 11, 53);
    assert_eq!(
        advance(anchor, ViewMode::Day, Direction::Next, now),
        at(2026, 1, 1, 10, 0)
    );
    assert_eq!(
        advance(anchor, ViewMode::Schedule, Direction::Prev, now),
        at(2025, 12, 30, 10, 0)
    );
}

#[test]
fn week_steps_seven_days() {
    let anchor = at(2025, 12, 2, 0, 0);
    let now = anchor;
    assert_eq!(
        advance(anchor, ViewMode::Week, Direction::Next, now),
        at(2025, 12, 9, 0, 0)
    );
    assert_eq!(
        advance(anchor, ViewMode::Week, Direction::Prev, now),
        at(2025, 11, 25, 0, 0)
    );
}

#[test]
fn month_next_from_jan_31_clamps_to_february() {
    let now = at(2025, 12, 2, 0, 0);
    assert_eq!(
        advance(at(2025, 1, 31, 9, 30), ViewMode::Month, Direction::Next, now),
        at(2025, 2, 28, 9, 30)
    );
    assert_eq!(
        advance(at(2024, 1, 31, 9, 30), ViewMode::Month, Direction::Next, now),
        at(2024, 2, 29, 9, 30)
    );
}

#[test]
fn month_prev_from_31st_clamps_into_30_day_month() {
    let now = at(2025, 12, 2, 0, 0);
    assert_eq!(
        advance(at(2025, 12, 31, 0, 0), ViewMode::Month, Direction::Prev, now),
        at(2025, 11, 30, 0, 0)
    );
}

#[test]
fn today_resets_to_now_for_every_mode() {
    let anchor = at(2030, 6, 15, 8, 0);
    let now = at(2025, 12, 2, 11, 53);
    for mode in ViewMode::ALL {
        assert_eq!(advance(anchor, mode, Direction::Today, now), now);
    }
}

// ── parsing ─────────────────────────────────────────────────────────────────

#[test]
fn view_mode_parses_case_insensitively() {
    assert_eq!("week".parse::<ViewMode>().unwrap(), ViewMode::Week);
    assert_eq!("Schedule".parse::<ViewMode>().unwrap(), ViewMode::Schedule);
    assert!("fortnight".parse::<ViewMode>().is_err());
}

#[test]
fn direction_parses() {
    assert_eq!("prev".parse::<Direction>().unwrap(), Direction::Prev);
    assert_eq!("NEXT".parse::<Direction>().unwrap(), Direction::Next);
    assert_eq!("today".parse::<Direction>().unwrap(), Direction::Today);
    assert!("sideways".parse::<Direction>().is_err());
}

#[test]
fn parse_instant_accepts_dates_and_datetimes() {
    assert_eq!(parse_instant("2025-12-02").unwrap(), at(2025, 12, 2, 0, 0));
    assert_eq!(
        parse_instant("2025-12-02T15:45:00").unwrap(),
        at(2025, 12, 2, 15, 45)
    );
    assert_eq!(
        parse_instant("2025-12-02T15:45").unwrap(),
        at(2025, 12, 2, 15, 45)
    );
    assert!(parse_instant("12/02/2025").is_err());
}
