//! Participants, events, and the snapshot they arrive in.
//!
//! The engine never mutates these; every query takes them by reference and
//! returns derived values.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interval::Interval;
use crate::palette::PaletteKey;

/// A calendar participant from the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: PaletteKey,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: PaletteKey) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
        }
    }
}

/// A calendar event.
///
/// Attribution is either a single `participant_id` or the ordered
/// `participant_ids` list; a non-empty list takes precedence. An event with
/// neither belongs to nobody.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participant_ids: Vec<String>,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub is_holiday: bool,
}

impl Event {
    /// A timed event owned by nobody; attach participants with the builders.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            location: None,
            participant_id: None,
            participant_ids: Vec::new(),
            is_all_day: false,
            is_holiday: false,
        }
    }

    pub fn with_participant(mut self, id: impl Into<String>) -> Self {
        self.participant_id = Some(id.into());
        self
    }

    pub fn with_participants<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participant_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn all_day(mut self) -> Self {
        self.is_all_day = true;
        self
    }

    pub fn holiday(mut self) -> Self {
        self.is_holiday = true;
        self
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    /// Calendar day the event starts on; views bucket events by this.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Participants the event is attributed to, list first.
    pub fn attributed_participants(&self) -> &[String] {
        if !self.participant_ids.is_empty() {
            &self.participant_ids
        } else {
            self.participant_id.as_slice()
        }
    }

    /// Whether `participant_id` appears in either attribution field.
    pub fn involves(&self, participant_id: &str) -> bool {
        self.participant_id.as_deref() == Some(participant_id)
            || self.participant_ids.iter().any(|id| id == participant_id)
    }

    /// More than one listed participant (painted striped).
    pub fn is_joint(&self) -> bool {
        self.participant_ids.len() > 1
    }
}

/// Roster plus event list, as supplied wholesale by the host application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSnapshot {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl CalendarSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: CalendarSnapshot = serde_json::from_str(json)?;
        log::debug!(
            "loaded snapshot: {} participants, {} events",
            snapshot.participants.len(),
            snapshot.events.len()
        );
        Ok(snapshot)
    }

    /// Ids of every roster participant, in roster order.
    pub fn participant_ids(&self) -> Vec<String> {
        self.participants.iter().map(|p| p.id.clone()).collect()
    }
}
