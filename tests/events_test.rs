//! Wire decoding of captured key events.

use keystroke_metrics::events::{parse_events, parse_session, KeyEvent, KeyEventType};

#[test]
fn decodes_browser_capture() {
    let events = parse_events(
        r#"[
            {"type": "keydown", "key": "a", "timestamp": 12.5},
            {"type": "keyup", "key": "a", "timestamp": 97.25, "code": "KeyA", "repeat": false}
        ]"#,
    )
    .unwrap();
    assert_eq!(events[0], KeyEvent::key_down("a", 12.5));
    assert_eq!(events[1], KeyEvent::key_up("a", 97.25));
}

#[test]
fn unrecognised_or_missing_type_is_other() {
    let events = parse_events(
        r#"[
            {"type": "keypress", "key": "a", "timestamp": 1},
            {"key": "a", "timestamp": 2},
            {"type": null, "key": "a", "timestamp": 3},
            {"type": 7, "key": "a", "timestamp": 4}
        ]"#,
    )
    .unwrap();
    assert!(events.iter().all(|e| e.event_type == KeyEventType::Other));
}

#[test]
fn unusable_key_is_none() {
    let events = parse_events(
        r#"[
            {"type": "keydown", "timestamp": 1},
            {"type": "keydown", "key": null, "timestamp": 2},
            {"type": "keydown", "key": 65, "timestamp": 3}
        ]"#,
    )
    .unwrap();
    assert!(events.iter().all(|e| e.key().is_none()));
    assert!(events.iter().all(|e| e.event_type == KeyEventType::KeyDown));
}

#[test]
fn missing_timestamp_is_rejected() {
    assert!(parse_events(r#"[{"type": "keydown", "key": "a"}]"#).is_err());
}

#[test]
fn session_accepts_bare_array() {
    let session = parse_session(r#"[{"type": "keyup", "key": "Enter", "timestamp": 0}]"#).unwrap();
    assert_eq!(session.events.len(), 1);
    assert!(session.extras.is_empty());
}

#[test]
fn session_keeps_numeric_extras() {
    let session = parse_session(
        r#"{"events": [], "retry_count": 3, "user": "ada", "elapsed": 1.5}"#,
    )
    .unwrap();
    assert!(session.events.is_empty());
    assert_eq!(session.extras.len(), 2);
    assert_eq!(session.extras["retry_count"], 3.0);
    assert_eq!(session.extras["elapsed"], 1.5);
}

#[test]
fn serializes_with_wire_names() {
    let json = serde_json::to_value(KeyEvent::key_down("Backspace", 5.0)).unwrap();
    assert_eq!(json["type"], "keydown");
    assert_eq!(json["key"], "Backspace");
    assert_eq!(json["timestamp"], 5.0);
}

#[test]
fn session_errors_name_the_bad_field() {
    let bare = parse_session(r#"[{"type": "keydown", "key": "a"}]"#).unwrap_err();
    assert!(bare.to_string().contains("timestamp"), "{}", bare);

    let wrapped = parse_session(
        r#"{"events": [{"type": "keyup", "key": "a", "timestamp": 1}, {"type": "keydown"}], "retry_count": 1}"#,
    )
    .unwrap_err();
    assert!(wrapped.to_string().contains("timestamp"), "{}", wrapped);
}

#[test]
fn session_object_needs_events_array() {
    let missing = parse_session(r#"{"retry_count": 1}"#).unwrap_err();
    assert!(missing.to_string().contains("events"), "{}", missing);
    assert!(parse_session(r#"{"events": 3}"#).is_err());
    assert!(parse_session("42").is_err());
}
