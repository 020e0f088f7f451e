//! Native tests for the JSON bridge.
//!
//! Only the success paths run natively; error paths build a `JsValue`, which
//! needs a wasm32 target.

use famcal_wasm::{
    advance, aggregate_participant_stats, event_styles, layout_day, resolve_window, select_events,
};
use serde_json::{json, Value};

fn events() -> Value {
    json!([
        {"id": "2", "title": "Hh", "start": "2025-12-01T15:45:00", "end": "2025-12-01T16:45:00", "participantId": "u2"},
        {"id": "3", "title": "Hn", "start": "2025-12-01T15:45:00", "end": "2025-12-01T16:45:00", "participantIds": ["u2", "u5"]},
        {"id": "4", "title": "Yh", "start": "2025-12-01T15:45:00", "end": "2025-12-01T16:45:00", "participantId": "u1"}
    ])
}

fn parse(s: Result<String, wasm_bindgen::JsValue>) -> Value {
    serde_json::from_str(&s.ok().expect("bridge call should succeed")).unwrap()
}

#[test]
fn resolve_window_roundtrips_as_json() {
    let w = parse(resolve_window("2025-12-02", "Week"));
    assert_eq!(w["start"], "2025-11-30T00:00:00");
    assert_eq!(w["end"], "2025-12-06T23:59:59.999");
}

#[test]
fn advance_returns_new_anchor() {
    let next = parse(advance("2025-12-31", "month", "prev", "2025-12-02"));
    assert_eq!(next, "2025-11-30T00:00:00");
}

#[test]
fn select_events_with_and_without_window() {
    let all = parse(select_events(&events().to_string(), r#"["u5"]"#, None));
    assert_eq!(all.as_array().unwrap().len(), 1);

    let window = r#"{"start": "2025-12-02T00:00:00", "end": "2025-12-02T23:59:59.999"}"#;
    let none = parse(select_events(
        &events().to_string(),
        r#"["u1","u2"]"#,
        Some(window.to_string()),
    ));
    assert!(none.as_array().unwrap().is_empty());
}

#[test]
fn stats_are_keyed_by_participant() {
    let snapshot = json!({
        "participants": [
            {"id": "u1", "name": "A", "color": "yellow"},
            {"id": "u2", "name": "A1", "color": "calBlue"},
            {"id": "u5", "name": "Test2", "color": "pink"}
        ],
        "events": events()
    });
    let stats = parse(aggregate_participant_stats(&snapshot.to_string(), "2025-12-01", "Day"));
    assert_eq!(stats["u2"]["totalTasks"], 2);
    assert_eq!(stats["u5"]["totalTasks"], 1);
    assert_eq!(stats["u1"]["completedTasks"], 0);
}

#[test]
fn layout_day_assigns_thirds() {
    let boxes = parse(layout_day(&events().to_string(), "2025-12-01", None, None));
    let boxes = boxes.as_array().unwrap();
    assert_eq!(boxes.len(), 3);
    for (i, b) in boxes.iter().enumerate() {
        assert_eq!(b["slot"]["slotIndex"], i as u64);
        assert_eq!(b["slot"]["totalSlots"], 3);
    }
}

#[test]
fn layout_day_honours_explicit_hour_height_and_clustering() {
    let json = events().to_string();
    let boxes = parse(layout_day(&json, "2025-12-01", Some(60.0), Some("connected".into())));
    let first = &boxes.as_array().unwrap()[0];
    assert_eq!(first["top"], 945.0);
    assert_eq!(first["height"], 60.0);
    assert_eq!(first["slot"]["totalSlots"], 3);
}

#[test]
fn event_styles_include_css() {
    let participants = r#"[{"id": "u2", "name": "A1", "color": "calBlue"}, {"id": "u5", "name": "Test2", "color": "pink"}]"#;
    let styles = parse(event_styles(&events().to_string(), participants));
    assert_eq!(styles[0]["style"]["kind"], "solid");
    assert_eq!(styles[0]["background"], "#B3CDE0");
    assert_eq!(styles[1]["style"]["kind"], "striped");
    assert!(styles[1]["background"].as_str().unwrap().starts_with("linear-gradient(135deg"));
}
