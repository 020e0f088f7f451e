//! Overlap layout for a single day's timed events.
//!
//! Events that overlap (strict test, see [`crate::interval`]) share the
//! column horizontally. Each event gets a slot `(slot_index, total_slots)`
//! within its cluster, where the cluster is sorted by event id:
//!
//! - `width = 1 / total_slots`
//! - `left = slot_index / total_slots`
//!
//! Vertical placement only depends on the event's own times:
//! `top = start_hour * hour_height`, `height = (end_hour - start_hour) * hour_height`
//! with fractional hours.
//!
//! ## Cluster modes
//!
//! [`ClusterMode::PerEvent`] (the default) builds each event's cluster from
//! the event plus everything that overlaps it directly. In a chain where A
//! overlaps B and B overlaps C but A and C are disjoint, B sees 3 slots while
//! A and C each see 2, so widths are not consistent along the chain.
//! [`ClusterMode::ConnectedComponents`] instead uses the connected components
//! of the overlap graph, giving every member of a chain the same slot count.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::interval::fractional_hour;
use crate::model::Event;

/// Pixels per hour in the day grid.
pub const DEFAULT_HOUR_HEIGHT: f64 = 120.0;

/// How overlapping events are grouped into clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterMode {
    /// Each event's cluster is itself plus its direct overlaps.
    #[default]
    PerEvent,
    /// Clusters are connected components of the overlap graph.
    #[serde(rename = "connected", alias = "connected-components")]
    ConnectedComponents,
}

impl fmt::Display for ClusterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterMode::PerEvent => f.write_str("per-event"),
            ClusterMode::ConnectedComponents => f.write_str("connected"),
        }
    }
}

impl FromStr for ClusterMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-event" | "per_event" | "perevent" => Ok(ClusterMode::PerEvent),
            "connected" | "connected-components" | "components" => {
                Ok(ClusterMode::ConnectedComponents)
            }
            _ => Err(EngineError::InvalidClusterMode(s.to_string())),
        }
    }
}

/// Layout tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    pub hour_height: f64,
    pub mode: ClusterMode,
}

impl LayoutOptions {
    /// Options with a checked hour height; it must be finite and positive.
    pub fn new(hour_height: f64, mode: ClusterMode) -> Result<Self, EngineError> {
        if !(hour_height.is_finite() && hour_height > 0.0) {
            return Err(EngineError::InvalidHourHeight(hour_height));
        }
        Ok(Self { hour_height, mode })
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            hour_height: DEFAULT_HOUR_HEIGHT,
            mode: ClusterMode::default(),
        }
    }
}

/// An event's horizontal slot inside its cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAssignment {
    pub slot_index: usize,
    pub total_slots: usize,
}

impl SlotAssignment {
    /// Fraction of the column width, in `(0, 1]`.
    pub fn width(&self) -> f64 {
        1.0 / self.total_slots as f64
    }

    /// Fraction of the column width to the left of the slot, in `[0, 1)`.
    pub fn left(&self) -> f64 {
        self.slot_index as f64 / self.total_slots as f64
    }
}

/// A positioned event. `left`/`width` are fractions of the day column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBox {
    pub event: Event,
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
    pub slot: SlotAssignment,
}

impl LayoutBox {
    pub fn left_percent(&self) -> f64 {
        self.left * 100.0
    }

    pub fn width_percent(&self) -> f64 {
        self.width * 100.0
    }
}

/// Timed (not all-day) events starting on `day`, ordered by start then id.
pub fn timed_events_on(events: &[Event], day: NaiveDate) -> Vec<&Event> {
    let mut timed: Vec<&Event> = events
        .iter()
        .filter(|e| !e.is_all_day && e.start_date() == day)
        .collect();
    timed.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    timed
}

/// Assign slots to already day-filtered timed events.
///
/// The result lines up index-for-index with `events`.
pub fn assign_slots(events: &[&Event], mode: ClusterMode) -> Vec<SlotAssignment> {
    let clusters = match mode {
        ClusterMode::PerEvent => per_event_clusters(events),
        ClusterMode::ConnectedComponents => component_clusters(events),
    };

    clusters
        .into_iter()
        .enumerate()
        .map(|(i, mut cluster)| {
            // Ties on duplicate ids fall back to input position.
            cluster.sort_by(|&a, &b| events[a].id.cmp(&events[b].id).then(a.cmp(&b)));
            let slot_index = cluster.iter().position(|&m| m == i).unwrap_or(0);
            SlotAssignment {
                slot_index,
                total_slots: cluster.len(),
            }
        })
        .collect()
}

/// For every event, the indices of itself and every event it overlaps.
fn per_event_clusters(events: &[&Event]) -> Vec<Vec<usize>> {
    (0..events.len())
        .map(|i| {
            let span = events[i].interval();
            (0..events.len())
                .filter(|&j| j == i || span.overlaps(&events[j].interval()))
                .collect()
        })
        .collect()
}

/// For every event, the indices of its connected component.
fn component_clusters(events: &[&Event]) -> Vec<Vec<usize>> {
    let mut sets = DisjointSet::new(events.len());
    for i in 0..events.len() {
        for j in (i + 1)..events.len() {
            if events[i].interval().overlaps(&events[j].interval()) {
                sets.union(i, j);
            }
        }
    }

    let roots: Vec<usize> = (0..events.len()).map(|i| sets.find(i)).collect();
    roots
        .iter()
        .map(|&root| {
            roots
                .iter()
                .enumerate()
                .filter(|&(_, &r)| r == root)
                .map(|(j, _)| j)
                .collect()
        })
        .collect()
}

/// Minimal union-find with path halving.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            // Smaller index wins so roots are deterministic.
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi] = lo;
        }
    }
}

/// Lay out `day`'s timed events with default options.
pub fn layout_day(events: &[Event], day: NaiveDate) -> Vec<LayoutBox> {
    layout_day_with(events, day, &LayoutOptions::default())
}

/// Lay out `day`'s timed events.
///
/// All-day events and events starting on other days are ignored. Events with
/// `start > end` are not rejected; they come back with a negative height.
pub fn layout_day_with(
    events: &[Event],
    day: NaiveDate,
    options: &LayoutOptions,
) -> Vec<LayoutBox> {
    let timed = timed_events_on(events, day);
    let slots = assign_slots(&timed, options.mode);

    if log::log_enabled!(log::Level::Debug) {
        let widest = slots.iter().map(|s| s.total_slots).max().unwrap_or(0);
        log::debug!(
            "laid out {} timed events on {} ({} mode, widest cluster {})",
            timed.len(),
            day,
            options.mode,
            widest
        );
    }

    timed
        .into_iter()
        .zip(slots)
        .map(|(event, slot)| {
            let start_hour = fractional_hour(&event.start);
            let end_hour = fractional_hour(&event.end);
            LayoutBox {
                event: event.clone(),
                top: start_hour * options.hour_height,
                height: (end_hour - start_hour) * options.hour_height,
                left: slot.left(),
                width: slot.width(),
                slot,
            }
        })
        .collect()
}
