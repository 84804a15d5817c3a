//! Stroke controller: the pencil that captures free-hand lines on the surface.
//!
//! `start_stroke` arms the pencil and marks it as the active drawing tool.
//! While armed, each pointer-down opens a new line shape, each move appends a
//! point pair to it, and each pointer-up closes it. A single erase gesture can
//! therefore leave several lines behind.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, PENCIL_TOOL};
use crate::geometry::Point;
use crate::scene::{Scene, ShapeId};

/// How line ends are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    /// Parse the lowercase name. `None` for anything unrecognized.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "butt" => Some(Self::Butt),
            "round" => Some(Self::Round),
            "square" => Some(Self::Square),
            _ => None,
        }
    }
}

/// How line segments are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

impl LineJoin {
    /// Parse the lowercase name. `None` for anything unrecognized.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "miter" => Some(Self::Miter),
            "round" => Some(Self::Round),
            "bevel" => Some(Self::Bevel),
            _ => None,
        }
    }
}

/// Visual style applied to captured lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color as a CSS color string.
    pub stroke: String,
    /// Stroke width in world units.
    pub stroke_width: f64,
    /// Whether captured lines can be dragged afterwards.
    pub draggable: bool,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

impl Default for StrokeStyle {
    /// The erase brush: blue, 15 wide, rounded, not draggable.
    fn default() -> Self {
        Self {
            stroke: DEFAULT_STROKE_COLOR.to_owned(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            draggable: false,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
        }
    }
}

/// The drawing surface: active-tool marker, armed pencil, and pointer position.
#[derive(Debug, Default)]
pub struct DrawingSurface {
    active_drawing: Option<String>,
    pencil: Option<StrokeStyle>,
    capturing: Option<ShapeId>,
    pointer: Option<Point>,
}

impl DrawingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the pencil with `style` and mark it as the active drawing tool.
    pub fn start_stroke(&mut self, style: StrokeStyle) {
        self.capturing = None;
        self.pencil = Some(style);
        self.active_drawing = Some(PENCIL_TOOL.to_owned());
    }

    /// Close any open line, disarm the pencil, and clear the active marker.
    /// Calling it again has no further effect.
    pub fn stop_stroke(&mut self) {
        self.capturing = None;
        self.pencil = None;
        self.active_drawing = None;
    }

    /// Set or clear the active drawing marker directly.
    pub fn set_active_drawing(&mut self, tool: Option<&str>) {
        self.active_drawing = tool.map(str::to_owned);
    }

    #[must_use]
    pub fn active_drawing(&self) -> Option<&str> {
        self.active_drawing.as_deref()
    }

    /// Whether the pencil is armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.pencil.is_some()
    }

    /// Style of the armed pencil.
    #[must_use]
    pub fn style(&self) -> Option<&StrokeStyle> {
        self.pencil.as_ref()
    }

    /// The line currently receiving points, if any.
    #[must_use]
    pub fn capturing(&self) -> Option<ShapeId> {
        self.capturing
    }

    /// Current pointer position; `None` when the pointer is off the surface.
    #[must_use]
    pub fn pointer_position(&self) -> Option<Point> {
        self.pointer
    }

    pub fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }

    /// Open a new line at `at` when armed. Returns the new line's id.
    pub fn begin_line(&mut self, scene: &mut Scene, at: Point) -> Option<ShapeId> {
        let style = self.pencil.clone()?;
        let id = scene.add_line(style, &[at.x, at.y]);
        self.capturing = Some(id);
        Some(id)
    }

    /// Append `at` to the open line. Returns false when nothing is capturing.
    pub fn extend_line(&mut self, scene: &mut Scene, at: Point) -> bool {
        let Some(id) = self.capturing else {
            return false;
        };
        let Some(line) = scene.get_mut(id).and_then(|s| s.line_mut()) else {
            self.capturing = None;
            return false;
        };
        line.push_point(at);
        true
    }

    /// Close the open line, leaving the pencil armed.
    pub fn finish_line(&mut self) -> Option<ShapeId> {
        self.capturing.take()
    }
}
