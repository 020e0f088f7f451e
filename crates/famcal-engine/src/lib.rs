//! # famcal-engine
//!
//! Event selection, temporal aggregation, and overlap layout for a family
//! calendar with day, week, month, and schedule views.
//!
//! Every operation is a pure function over an immutable snapshot of
//! participants and events. Instants are naive local wall-clock times.
//!
//! ## Modules
//!
//! - [`interval`] - Time spans and the strict overlap test
//! - [`model`] - Participants, events, and the JSON snapshot
//! - [`palette`] - Closed colour categories and per-event styles
//! - [`window`] - View windows and prev/next/today navigation
//! - [`select`] - Participant-activity and window filters, day index
//! - [`stats`] - Per-participant event counts over a window
//! - [`layout`] - Slot assignment for overlapping timed events in a day
//! - [`views`] - Month grid, week columns, schedule day
//! - [`error`] - Error types

pub mod error;
pub mod interval;
pub mod layout;
pub mod model;
pub mod palette;
pub mod select;
pub mod stats;
pub mod views;
pub mod window;

pub use error::EngineError;
pub use interval::{overlaps, Interval};
pub use layout::{layout_day, layout_day_with, ClusterMode, LayoutBox, LayoutOptions};
pub use model::{CalendarSnapshot, Event, Participant};
pub use palette::{event_style, EventStyle, PaletteKey};
pub use select::{select_by_participants, select_events, select_in_window, DayIndex};
pub use stats::{aggregate_participant_stats, ParticipantStats, StatsMemo};
pub use window::{advance, parse_instant, resolve_window, Direction, ViewMode, Window};
