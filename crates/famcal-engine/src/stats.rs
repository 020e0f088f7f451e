//! Per-participant event counts over a resolved window.
//!
//! Counts ignore the active-participant filter: a participant hidden from the
//! view still shows how many events they have in the window.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::model::{Event, Participant};
use crate::select::in_window;
use crate::window::{resolve_window, ViewMode, Window};

/// Counts for one participant.
///
/// `completed_tasks` is always zero; there is no completion model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
}

/// Participant id → stats, for every roster participant.
pub type StatsMap = BTreeMap<String, ParticipantStats>;

/// Count window events for each participant.
///
/// An event counts once for every participant named in either its
/// `participant_id` or its `participant_ids`. Every roster participant gets
/// an entry, zero when they have nothing in the window.
pub fn aggregate_participant_stats(
    events: &[Event],
    window: &Window,
    participants: &[Participant],
) -> StatsMap {
    let in_range: Vec<&Event> = events.iter().filter(|e| in_window(e, window)).collect();

    let stats: StatsMap = participants
        .iter()
        .map(|p| {
            let total_tasks = in_range.iter().filter(|e| e.involves(&p.id)).count();
            (
                p.id.clone(),
                ParticipantStats {
                    total_tasks,
                    completed_tasks: 0,
                },
            )
        })
        .collect();

    log::debug!(
        "aggregated stats for {} participants over {} window events ({} .. {})",
        stats.len(),
        in_range.len(),
        window.start,
        window.end
    );
    stats
}

/// A roster participant with their window counts, for filter-chip style UIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSummary {
    #[serde(flatten)]
    pub participant: Participant,
    pub total_tasks: usize,
    pub completed_tasks: usize,
}

/// Join stats onto the roster, keeping roster order.
pub fn apply_stats(participants: &[Participant], stats: &StatsMap) -> Vec<ParticipantSummary> {
    participants
        .iter()
        .map(|p| {
            let s = stats.get(&p.id).copied().unwrap_or_default();
            ParticipantSummary {
                participant: p.clone(),
                total_tasks: s.total_tasks,
                completed_tasks: s.completed_tasks,
            }
        })
        .collect()
}

/// Remembers the last aggregation keyed on `(anchor day, view mode)`.
///
/// The memo does not watch the event list or roster; call
/// [`StatsMemo::invalidate`] whenever either changes.
#[derive(Debug, Clone, Default)]
pub struct StatsMemo {
    last: Option<((NaiveDate, ViewMode), StatsMap)>,
}

impl StatsMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &mut self,
        anchor: NaiveDateTime,
        mode: ViewMode,
        events: &[Event],
        participants: &[Participant],
    ) -> &StatsMap {
        let key = (anchor.date(), mode);
        let hit = matches!(&self.last, Some((cached, _)) if *cached == key);
        if hit {
            log::trace!("stats memo hit for {} {}", key.0, mode);
        } else {
            self.last = None;
        }
        let (_, stats) = self.last.get_or_insert_with(|| {
            let window = resolve_window(anchor, mode);
            (key, aggregate_participant_stats(events, &window, participants))
        });
        stats
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }
}
