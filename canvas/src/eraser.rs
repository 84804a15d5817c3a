//! Selection state machine for the erase-by-group gesture.
//!
//! The user picks a target shape, draws strokes confined to the target's
//! bounding box, and on completion the strokes are grouped with the target so
//! they act as a mask on it.
//!
//! ## State transitions
//!
//! ```text
//! Idle           -> TargetSelected  (on_erase with a hit shape)
//! TargetSelected -> Erasing         (drawing flag flips true: on_drawing)
//! Erasing        -> Idle            (drawing flag flips false: on_end_drawing)
//! Any            -> Idle            (on_erase with no hit, or stop_drawing)
//! ```
//!
//! The drawing flag is toggled, never set, by `on_erase`; handlers fire only
//! when the flag actually changes. Pointer handlers are inert outside
//! `Erasing`.

#[cfg(test)]
#[path = "eraser_test.rs"]
mod eraser_test;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::config::EraserConfig;
use crate::geometry::{self, SelectionRange};
use crate::scene::{Shape, ShapeId};

/// Gesture phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No target picked.
    #[default]
    Idle,
    /// Target recorded, stroke capture not yet started.
    TargetSelected,
    /// Stroke capture running; pointer moves are trimmed to the range.
    Erasing,
}

/// Reaction when a drag leaves the selection range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutsideRangePolicy {
    /// Do nothing; trimming alone keeps the stroke inside.
    #[default]
    Ignore,
    /// Close the open line. The pencil stays armed, so the next press starts a new one.
    FinishLine,
}

/// Mutable record driving one gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// Shape being erased.
    pub target: Option<ShapeId>,
    /// Group the target and its strokes end up in. Empty means none.
    pub group_name: String,
    /// Bounds of the target when it was picked.
    pub range: Option<SelectionRange>,
    /// Index of the last non-group shape that existed when the stroke began.
    /// `None` when the scene had no non-group shapes at that point.
    pub current_start_erase_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EraseError {
    #[error("shape not found: {0}")]
    ShapeNotFound(ShapeId),
    #[error("erase gesture already in progress on {active}; refusing to start on {requested}")]
    GestureInProgress { active: ShapeId, requested: ShapeId },
}

/// What a finished gesture produced.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSummary {
    pub group: String,
    /// Group container, if the group exists after attaching.
    pub container: Option<ShapeId>,
    /// Final group membership.
    pub members: Vec<ShapeId>,
    /// Lines drawn during the gesture, newest first.
    pub new_lines: Vec<ShapeId>,
}

/// Result of an `on_erase` call.
#[derive(Debug, Clone, PartialEq)]
pub enum EraseOutcome {
    /// Nothing was hit. Any running gesture was ended.
    Cancelled { ended: Option<GestureSummary> },
    /// A gesture started on `target`.
    Started { target: ShapeId, group: String },
    /// The running gesture was toggled off.
    Ended(Option<GestureSummary>),
}

/// Result of one pointer-move evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveReport {
    /// Whether the pointer is inside the selection range.
    pub inside: bool,
    /// Line that was trimmed, if any points were removed.
    pub trimmed_line: Option<ShapeId>,
    /// Number of points (pairs) removed.
    pub removed: usize,
    /// Line closed by the outside-range policy.
    pub finished_line: Option<ShapeId>,
}

/// Synthesized group name for a target: `<prefix>_<id>`.
#[must_use]
pub fn create_group_name(prefix: &str, id: ShapeId) -> String {
    format!("{prefix}_{id}")
}

/// The erase-by-group state machine.
#[derive(Debug, Default)]
pub struct Eraser {
    config: EraserConfig,
    state: SelectionState,
    phase: Phase,
    is_drawing: bool,
    is_dragging: bool,
    selecting_shapes: Vec<ShapeId>,
}

impl Eraser {
    #[must_use]
    pub fn new(config: EraserConfig) -> Self {
        Self { config, ..Self::default() }
    }

    // --- Queries ---

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Shapes that will be attached alongside the new strokes.
    #[must_use]
    pub fn selecting_shapes(&self) -> &[ShapeId] {
        &self.selecting_shapes
    }

    #[must_use]
    pub fn config(&self) -> &EraserConfig {
        &self.config
    }

    // --- Entry point ---

    /// Start, or toggle off, an erase gesture on the shape that was hit.
    ///
    /// `group_prefix` overrides the configured prefix for synthesized names.
    /// With no hit, drawing is force-stopped. While `Erasing`, only a hit on
    /// the gesture's own shapes is accepted, and it ends the gesture.
    ///
    /// # Errors
    ///
    /// `GestureInProgress` when another shape is hit mid-gesture;
    /// `ShapeNotFound` when `hit` is not in the scene.
    pub fn on_erase(
        &mut self,
        board: &mut Board,
        hit: Option<ShapeId>,
        group_prefix: Option<&str>,
    ) -> Result<EraseOutcome, EraseError> {
        let Some(hit) = hit else {
            debug!("erase with no target, stopping");
            let ended = self.stop_drawing(board);
            return Ok(EraseOutcome::Cancelled { ended });
        };

        if self.phase == Phase::Erasing {
            if !self.belongs_to_gesture(board, hit) {
                let active = self.state.target.unwrap_or(hit);
                warn!(active, requested = hit, "rejected overlapping erase gesture");
                return Err(EraseError::GestureInProgress { active, requested: hit });
            }
            let ended = self.set_drawing(board, !self.is_drawing);
            return Ok(EraseOutcome::Ended(ended));
        }

        let shape = board.scene.get(hit).ok_or(EraseError::ShapeNotFound(hit))?;
        let prefix = group_prefix.unwrap_or(&self.config.group_prefix);
        let group_name = match shape.group_name() {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => create_group_name(prefix, hit),
        };
        let bounds = board.scene.bounds(hit).ok_or(EraseError::ShapeNotFound(hit))?;
        if let Some(shape) = board.scene.get_mut(hit) {
            shape.draggable = false;
        }

        self.state.target = Some(hit);
        self.state.group_name.clone_from(&group_name);
        self.state.range = Some(SelectionRange::from_bounds(bounds));
        self.selecting_shapes = vec![hit];
        self.phase = Phase::TargetSelected;
        info!(target = hit, group = %group_name, "erase target selected");

        // Outside `Erasing` the flag is always down, so this toggle raises it.
        self.set_drawing(board, true);
        Ok(EraseOutcome::Started { target: hit, group: group_name })
    }

    // --- Cancellation ---

    /// End stroke capture and clear the active-drawing marker. Groups already
    /// attached are left alone.
    pub fn stop_active_drawing(&mut self, board: &mut Board) {
        board.surface.stop_stroke();
    }

    /// Stop capture and lower the drawing flag, ending a running gesture.
    /// A second call is a no-op.
    pub fn stop_drawing(&mut self, board: &mut Board) -> Option<GestureSummary> {
        self.stop_active_drawing(board);
        self.set_drawing(board, false)
    }

    // --- Pointer handlers ---

    pub fn on_mouse_start(&mut self) {
        if self.phase == Phase::Erasing {
            self.is_dragging = true;
        }
    }

    pub fn on_mouse_end(&mut self) {
        self.is_dragging = false;
    }

    /// Evaluate the pointer against the range and trim the newest stroke.
    ///
    /// Returns `None` outside `Erasing` or when the pointer is off the surface.
    pub fn on_mouse_moving(&mut self, board: &mut Board) -> Option<MoveReport> {
        if self.phase != Phase::Erasing {
            return None;
        }
        let pos = board.surface.pointer_position()?;
        let inside = geometry::contains(self.state.range.as_ref(), pos.x, pos.y);

        let (trimmed_line, removed) = self.trim_last_line(board);

        let mut finished_line = None;
        if self.is_dragging && !inside {
            match self.config.outside_range {
                OutsideRangePolicy::Ignore => {}
                OutsideRangePolicy::FinishLine => finished_line = board.surface.finish_line(),
            }
        }

        Some(MoveReport { inside, trimmed_line, removed, finished_line })
    }

    // --- Transitions ---

    fn set_drawing(&mut self, board: &mut Board, value: bool) -> Option<GestureSummary> {
        if self.is_drawing == value {
            return None;
        }
        self.is_drawing = value;
        if value {
            self.on_drawing(board);
            None
        } else {
            self.on_end_drawing(board)
        }
    }

    fn on_drawing(&mut self, board: &mut Board) {
        let Some(target) = self.state.target else {
            return;
        };
        if self.state.group_name.is_empty() {
            return;
        }
        let name = self.state.group_name.clone();

        let group = board.groups.find_or_create(&mut board.scene, &name);
        let container = group.container;
        if !group.children.is_empty() {
            self.selecting_shapes = board
                .scene
                .non_group_shapes()
                .filter(|s| s.parent == Some(container) || s.id == target)
                .map(|s| s.id)
                .collect();
        }

        self.state.current_start_erase_index = board.scene.non_group_count().checked_sub(1);
        board.groups.ungroup(&mut board.scene, &name);
        board.selection.deselect_all();

        self.stop_active_drawing(board);
        board.surface.start_stroke(self.config.stroke.clone());
        self.phase = Phase::Erasing;
        info!(
            target,
            group = %name,
            members = self.selecting_shapes.len(),
            start_index = ?self.state.current_start_erase_index,
            "erase stroke started"
        );
    }

    fn on_end_drawing(&mut self, board: &mut Board) -> Option<GestureSummary> {
        if self.state.group_name.is_empty() {
            self.reset();
            return None;
        }
        self.stop_active_drawing(board);

        let first_new = self.state.current_start_erase_index.map_or(0, |i| i + 1);
        let shapes: Vec<&Shape> = board.scene.non_group_shapes().collect();
        let new_lines: Vec<ShapeId> = shapes
            .iter()
            .skip(first_new)
            .rev()
            .filter(|s| s.has_points())
            .map(|s| s.id)
            .collect();

        let name = std::mem::take(&mut self.state.group_name);
        let mut to_attach = self.selecting_shapes.clone();
        to_attach.extend(new_lines.iter().copied());

        // An empty list would mean "attach everything".
        if to_attach.is_empty() {
            warn!(group = %name, "nothing to attach at gesture end");
        } else {
            board.groups.attach(&mut board.scene, &to_attach, &name);
        }

        let group = board.groups.find(&name);
        let container = group.map(|g| g.container);
        let members = group.map(|g| g.children.clone()).unwrap_or_default();
        if let Some(container) = container {
            board.selection.add(container);
        }

        info!(group = %name, members = members.len(), new_lines = new_lines.len(), "erase gesture ended");
        self.reset();
        Some(GestureSummary { group: name, container, members, new_lines })
    }

    // --- Helpers ---

    fn reset(&mut self) {
        self.state = SelectionState::default();
        self.selecting_shapes.clear();
        self.is_dragging = false;
        self.phase = Phase::Idle;
    }

    fn is_new_index(&self, index: usize) -> bool {
        self.state.current_start_erase_index.map_or(true, |start| index > start)
    }

    /// Whether `id` is the target, a snapshotted member, or a stroke from this gesture.
    fn belongs_to_gesture(&self, board: &Board, id: ShapeId) -> bool {
        if self.state.target == Some(id) || self.selecting_shapes.contains(&id) {
            return true;
        }
        board
            .scene
            .non_group_shapes()
            .position(|s| s.id == id)
            .is_some_and(|index| self.is_new_index(index))
    }

    /// Pop trailing points of the newest gesture stroke while they fall outside the range.
    fn trim_last_line(&self, board: &mut Board) -> (Option<ShapeId>, usize) {
        let Some(last) = board.scene.non_group_count().checked_sub(1) else {
            return (None, 0);
        };
        if !self.is_new_index(last) {
            return (None, 0);
        }
        let range = self.state.range;
        let Some(shape) = board.scene.non_group_at_mut(last) else {
            return (None, 0);
        };
        let id = shape.id;
        let Some(line) = shape.line_mut() else {
            return (None, 0);
        };

        let mut removed = 0;
        while let Some(pt) = line.last_point() {
            if geometry::contains(range.as_ref(), pt.x, pt.y) {
                break;
            }
            line.pop_point();
            removed += 1;
        }

        if removed == 0 {
            return (None, 0);
        }
        debug!(line = id, removed, remaining = line.point_count(), "stroke trimmed to range");
        (Some(id), removed)
    }
}
