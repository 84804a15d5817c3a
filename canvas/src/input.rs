//! Input model: raw pointer/touch events normalized for the eraser.
//!
//! Hosts deliver DOM-style event names (`mousedown`, `touchmove`, ...) with
//! world coordinates. This module folds mouse, touch and pointer variants into
//! one `PointerEvent` whose `phase` selects the state-machine trigger.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Which device produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// Where in a press/drag/release cycle the event falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Press; starts a drag.
    Down,
    /// Movement, pressed or not.
    Move,
    /// Release or touch cancel; ends a drag.
    Up,
    /// The pointer left the surface; position becomes unavailable.
    Leave,
}

/// A normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    #[serde(default)]
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    #[must_use]
    pub fn new(phase: PointerPhase, kind: PointerKind, position: Point) -> Self {
        Self { phase, kind, position }
    }

    /// Normalize a raw DOM event. Unknown names yield `None`.
    #[must_use]
    pub fn from_raw(name: &str, x: f64, y: f64) -> Option<Self> {
        let (phase, kind) = classify(name)?;
        Some(Self { phase, kind, position: Point::new(x, y) })
    }
}

/// Map a DOM event name to its phase and device.
#[must_use]
pub fn classify(name: &str) -> Option<(PointerPhase, PointerKind)> {
    let mapped = match name {
        "mousedown" => (PointerPhase::Down, PointerKind::Mouse),
        "touchstart" => (PointerPhase::Down, PointerKind::Touch),
        "pointerdown" => (PointerPhase::Down, PointerKind::Pen),
        "mousemove" => (PointerPhase::Move, PointerKind::Mouse),
        "touchmove" => (PointerPhase::Move, PointerKind::Touch),
        "pointermove" => (PointerPhase::Move, PointerKind::Pen),
        "mouseup" => (PointerPhase::Up, PointerKind::Mouse),
        "touchend" | "touchcancel" => (PointerPhase::Up, PointerKind::Touch),
        "pointerup" => (PointerPhase::Up, PointerKind::Pen),
        "mouseleave" => (PointerPhase::Leave, PointerKind::Mouse),
        "pointerleave" => (PointerPhase::Leave, PointerKind::Pen),
        _ => return None,
    };
    Some(mapped)
}
