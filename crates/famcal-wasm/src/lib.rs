//! WASM bindings for famcal-engine.
//!
//! Exposes window resolution, navigation, event selection, participant stats,
//! and day layout to a JavaScript renderer via `wasm-bindgen`. All complex
//! types are passed as JSON strings using the engine's camelCase schema.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p famcal-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/famcal-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/famcal_wasm.wasm
//! ```

use chrono::NaiveDateTime;
use famcal_engine::layout::DEFAULT_HOUR_HEIGHT;
use famcal_engine::{
    CalendarSnapshot, ClusterMode, Direction, Event, LayoutOptions, Participant, ViewMode, Window,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: parse inputs and serialize outputs across the JS boundary
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_instant(s: &str) -> Result<NaiveDateTime, JsValue> {
    famcal_engine::parse_instant(s).map_err(js_err)
}

fn parse_view(s: &str) -> Result<ViewMode, JsValue> {
    s.parse().map_err(js_err)
}

fn from_json<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Resolve the window a view displays for `anchor`.
///
/// Returns `{"start": ..., "end": ...}` with naive ISO datetimes.
#[wasm_bindgen(js_name = "resolveWindow")]
pub fn resolve_window(anchor: &str, view: &str) -> Result<String, JsValue> {
    let window = famcal_engine::resolve_window(parse_instant(anchor)?, parse_view(view)?);
    to_json(&window)
}

/// Step `anchor` by one view unit (`prev`/`next`) or reset it to `now` (`today`).
///
/// Returns the new anchor as a JSON string literal.
#[wasm_bindgen(js_name = "advance")]
pub fn advance(anchor: &str, view: &str, direction: &str, now: &str) -> Result<String, JsValue> {
    let direction: Direction = direction.parse().map_err(js_err)?;
    let next = famcal_engine::advance(
        parse_instant(anchor)?,
        parse_view(view)?,
        direction,
        parse_instant(now)?,
    );
    to_json(&next)
}

/// Filter events by active participant ids and, when `window_json` is given,
/// by window membership.
///
/// - `events_json` -- JSON array of events
/// - `active_ids_json` -- JSON array of participant id strings
/// - `window_json` -- optional `{start, end}` window
#[wasm_bindgen(js_name = "selectEvents")]
pub fn select_events(
    events_json: &str,
    active_ids_json: &str,
    window_json: Option<String>,
) -> Result<String, JsValue> {
    let events: Vec<Event> = from_json("events", events_json)?;
    let active: Vec<String> = from_json("participant ids", active_ids_json)?;

    let selected = match window_json {
        Some(json) => {
            let window: Window = from_json("window", &json)?;
            famcal_engine::select_events(&events, &active, &window)
        }
        None => famcal_engine::select_by_participants(&events, &active),
    };
    to_json(&selected)
}

/// Per-participant counts over the window for `anchor` in `view`.
///
/// `snapshot_json` is `{participants, events}`. Returns an object keyed by
/// participant id with `{totalTasks, completedTasks}` values.
#[wasm_bindgen(js_name = "aggregateParticipantStats")]
pub fn aggregate_participant_stats(
    snapshot_json: &str,
    anchor: &str,
    view: &str,
) -> Result<String, JsValue> {
    let snapshot = CalendarSnapshot::from_json(snapshot_json).map_err(js_err)?;
    let window = famcal_engine::resolve_window(parse_instant(anchor)?, parse_view(view)?);
    let stats = famcal_engine::aggregate_participant_stats(
        &snapshot.events,
        &window,
        &snapshot.participants,
    );
    to_json(&stats)
}

/// Lay out `day`'s timed events.
///
/// `clustering` is `per-event` (default) or `connected`; `hour_height`
/// defaults to 120.
#[wasm_bindgen(js_name = "layoutDay")]
pub fn layout_day(
    events_json: &str,
    day: &str,
    hour_height: Option<f64>,
    clustering: Option<String>,
) -> Result<String, JsValue> {
    let events: Vec<Event> = from_json("events", events_json)?;
    let day = parse_instant(day)?.date();

    let mode = match clustering {
        Some(mode) => mode.parse::<ClusterMode>().map_err(js_err)?,
        None => ClusterMode::default(),
    };
    let hour_height = hour_height.unwrap_or(DEFAULT_HOUR_HEIGHT);
    let options = LayoutOptions::new(hour_height, mode).map_err(js_err)?;

    to_json(&famcal_engine::layout_day_with(&events, day, &options))
}

/// Style for each event: solid palette key or striped colour stops.
///
/// Returns an array of `{id, style, background}` where `background` is a
/// ready-to-use CSS value.
#[wasm_bindgen(js_name = "eventStyles")]
pub fn event_styles(events_json: &str, participants_json: &str) -> Result<String, JsValue> {
    #[derive(Serialize)]
    struct StyleDto<'a> {
        id: &'a str,
        style: famcal_engine::EventStyle,
        background: String,
    }

    let events: Vec<Event> = from_json("events", events_json)?;
    let participants: Vec<Participant> = from_json("participants", participants_json)?;

    let dtos: Vec<StyleDto<'_>> = events
        .iter()
        .map(|e| {
            let style = famcal_engine::event_style(e, &participants);
            StyleDto {
                id: &e.id,
                background: style.css_background(),
                style,
            }
        })
        .collect();
    to_json(&dtos)
}
