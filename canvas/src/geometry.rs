//! Geometry gate: points, bounding boxes, and the selection range test.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Center-anchored box describing where a shape sits in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Zero-size bounds at a single point.
    #[must_use]
    pub fn at(point: Point) -> Self {
        Self { x: point.x, y: point.y, width: 0.0, height: 0.0 }
    }

    /// Build bounds from min/max corners.
    #[must_use]
    pub fn from_corners(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            x: (min_x + max_x) / 2.0,
            y: (min_y + max_y) / 2.0,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Smallest bounds covering both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Bounds) -> Self {
        let (a_min_x, a_min_y, a_max_x, a_max_y) = self.corners();
        let (b_min_x, b_min_y, b_max_x, b_max_y) = other.corners();
        Self::from_corners(
            a_min_x.min(b_min_x),
            a_min_y.min(b_min_y),
            a_max_x.max(b_max_x),
            a_max_y.max(b_max_y),
        )
    }

    /// `(min_x, min_y, max_x, max_y)`.
    #[must_use]
    pub fn corners(&self) -> (f64, f64, f64, f64) {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        (self.x - hw, self.y - hh, self.x + hw, self.y + hh)
    }

    /// Inclusive point test, used for hit-testing.
    #[must_use]
    pub fn covers(&self, pt: Point) -> bool {
        let (min_x, min_y, max_x, max_y) = self.corners();
        pt.x >= min_x && pt.x <= max_x && pt.y >= min_y && pt.y <= max_y
    }
}

/// Axis-aligned box a stroke is confined to while erasing one target.
///
/// Captured once when the target is picked and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRange {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl SelectionRange {
    /// Range spanning center ± half-extent of the given bounds.
    #[must_use]
    pub fn from_bounds(bounds: Bounds) -> Self {
        let (x_min, y_min, x_max, y_max) = bounds.corners();
        Self { x_min, x_max, y_min, y_max }
    }

    /// Strict containment: points on the boundary are outside.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let inside_x = x > self.x_min && x < self.x_max;
        let inside_y = y > self.y_min && y < self.y_max;
        inside_x && inside_y
    }
}

/// Containment against a range that may not be set yet. An unset range
/// satisfies nothing.
#[must_use]
pub fn contains(range: Option<&SelectionRange>, x: f64, y: f64) -> bool {
    range.is_some_and(|r| r.contains(x, y))
}
