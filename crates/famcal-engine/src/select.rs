//! Event selection: participant-activity filter and window filter.
//!
//! Both filters are pure predicates, so each can be applied alone, composed,
//! or repeated without changing the result. Output preserves input order.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::model::Event;
use crate::window::Window;

/// Whether any of the event's attributed participants is active.
///
/// Events attributed to nobody never pass.
pub fn is_active(event: &Event, active: &HashSet<&str>) -> bool {
    event
        .attributed_participants()
        .iter()
        .any(|id| active.contains(id.as_str()))
}

/// Whether the event touches the window (boundary instants included).
pub fn in_window(event: &Event, window: &Window) -> bool {
    window.contains_span(&event.interval())
}

/// Keep events attributed to at least one active participant.
pub fn select_by_participants<S: AsRef<str>>(events: &[Event], active_ids: &[S]) -> Vec<Event> {
    let active: HashSet<&str> = active_ids.iter().map(AsRef::as_ref).collect();
    let selected: Vec<Event> = events
        .iter()
        .filter(|e| is_active(e, &active))
        .cloned()
        .collect();
    log::trace!(
        "participant filter kept {}/{} events ({} active)",
        selected.len(),
        events.len(),
        active.len()
    );
    selected
}

/// Keep events inside the window.
pub fn select_in_window(events: &[Event], window: &Window) -> Vec<Event> {
    events
        .iter()
        .filter(|e| in_window(e, window))
        .cloned()
        .collect()
}

/// Both filters, ANDed.
pub fn select_events<S: AsRef<str>>(
    events: &[Event],
    active_ids: &[S],
    window: &Window,
) -> Vec<Event> {
    let active: HashSet<&str> = active_ids.iter().map(AsRef::as_ref).collect();
    events
        .iter()
        .filter(|e| is_active(e, &active) && in_window(e, window))
        .cloned()
        .collect()
}

/// Events whose start falls on `day`.
pub fn events_starting_on(events: &[Event], day: NaiveDate) -> Vec<Event> {
    events
        .iter()
        .filter(|e| e.start_date() == day)
        .cloned()
        .collect()
}

/// List order: all-day events first, then by start, then by id.
pub fn sort_for_list(events: &mut [Event]) {
    events.sort_by(|a, b| {
        b.is_all_day
            .cmp(&a.is_all_day)
            .then_with(|| a.start.cmp(&b.start))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Events grouped by the calendar day they start on.
///
/// Avoids a full scan per day when a view needs many day buckets.
#[derive(Debug, Clone, Default)]
pub struct DayIndex<'a> {
    days: BTreeMap<NaiveDate, Vec<&'a Event>>,
}

impl<'a> DayIndex<'a> {
    pub fn build(events: &'a [Event]) -> Self {
        let mut days: BTreeMap<NaiveDate, Vec<&'a Event>> = BTreeMap::new();
        for event in events {
            days.entry(event.start_date()).or_default().push(event);
        }
        Self { days }
    }

    /// The day's events in input order; empty if none.
    pub fn on(&self, day: NaiveDate) -> &[&'a Event] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days that have at least one event, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }
}
