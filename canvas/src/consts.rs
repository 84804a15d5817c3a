//! Shared constants for the canvas crate.

// ── Eraser ──────────────────────────────────────────────────────

/// Default prefix for synthesized erase-group names (`<prefix>_<id>`).
pub const ERASER_GROUP: &str = "ERASER_GROUP";

/// Active-drawing marker set while the pencil is armed.
pub const PENCIL_TOOL: &str = "Pencil";

// ── Stroke ──────────────────────────────────────────────────────

/// Color of the erase brush.
pub const DEFAULT_STROKE_COLOR: &str = "blue";

/// Width of the erase brush in world units.
pub const DEFAULT_STROKE_WIDTH: f64 = 15.0;
