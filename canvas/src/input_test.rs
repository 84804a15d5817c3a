use super::*;

// =============================================================
// classify
// =============================================================

#[test]
fn mouse_events_map_to_phases() {
    assert_eq!(classify("mousedown"), Some((PointerPhase::Down, PointerKind::Mouse)));
    assert_eq!(classify("mousemove"), Some((PointerPhase::Move, PointerKind::Mouse)));
    assert_eq!(classify("mouseup"), Some((PointerPhase::Up, PointerKind::Mouse)));
    assert_eq!(classify("mouseleave"), Some((PointerPhase::Leave, PointerKind::Mouse)));
}

#[test]
fn touch_events_map_to_phases() {
    assert_eq!(classify("touchstart"), Some((PointerPhase::Down, PointerKind::Touch)));
    assert_eq!(classify("touchmove"), Some((PointerPhase::Move, PointerKind::Touch)));
    assert_eq!(classify("touchend"), Some((PointerPhase::Up, PointerKind::Touch)));
    assert_eq!(classify("touchcancel"), Some((PointerPhase::Up, PointerKind::Touch)));
}

#[test]
fn pointer_events_map_to_phases() {
    assert_eq!(classify("pointerdown").map(|(p, _)| p), Some(PointerPhase::Down));
    assert_eq!(classify("pointermove").map(|(p, _)| p), Some(PointerPhase::Move));
    assert_eq!(classify("pointerup").map(|(p, _)| p), Some(PointerPhase::Up));
    assert_eq!(classify("pointerleave").map(|(p, _)| p), Some(PointerPhase::Leave));
}

#[test]
fn unknown_events_are_ignored() {
    assert_eq!(classify("click"), None);
    assert_eq!(classify("MouseDown"), None);
    assert!(PointerEvent::from_raw("wheel", 0.0, 0.0).is_none());
}

// =============================================================
// PointerEvent
// =============================================================

#[test]
fn from_raw_carries_position() {
    let ev = PointerEvent::from_raw("touchmove", 3.0, 4.0);
    assert_eq!(ev, Some(PointerEvent::new(PointerPhase::Move, PointerKind::Touch, Point::new(3.0, 4.0))));
}

#[test]
fn pointer_kind_defaults_to_mouse() {
    assert_eq!(PointerKind::default(), PointerKind::Mouse);
}

#[test]
fn pointer_event_deserializes_without_kind() {
    let raw = r#"{"phase":"down","position":{"x":1.0,"y":2.0}}"#;
    let ev: PointerEvent = serde_json::from_str(raw).unwrap();
    assert_eq!(ev.phase, PointerPhase::Down);
    assert_eq!(ev.kind, PointerKind::Mouse);
    assert_eq!(ev.position, Point::new(1.0, 2.0));
}
