use serde::Serialize;
use tracing::debug;

use crate::board::Board;
use crate::config::EraserConfig;
use crate::eraser::{EraseError, EraseOutcome, Eraser, GestureSummary, Phase};
use crate::geometry::Point;
use crate::group::Group;
use crate::hit::hit_test;
use crate::input::{PointerEvent, PointerPhase};
use crate::scene::ShapeId;
use crate::stroke::StrokeStyle;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "data", rename_all = "snake_case")]
pub enum Action {
    GestureStarted { target: ShapeId, group: String },
    GestureCancelled,
    StrokeStarted { id: ShapeId },
    StrokeTrimmed { id: ShapeId, removed: usize },
    StrokeFinished { id: ShapeId },
    GroupAttached { name: String, members: Vec<ShapeId> },
    SelectionChanged(Vec<ShapeId>),
    RenderNeeded,
}

/// Core engine state: the board and the eraser that drives it.
///
/// Hosts feed pointer events in and apply the returned actions.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub board: Board,
    pub eraser: Eraser,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EraserConfig) -> Self {
        Self { board: Board::new(), eraser: Eraser::new(config) }
    }

    // --- Data inputs ---

    /// Add a plain shape centered at `(x, y)`.
    pub fn add_shape(&mut self, x: f64, y: f64, width: f64, height: f64) -> ShapeId {
        self.board.scene.add_shape(x, y, width, height)
    }

    /// Add a pre-existing line from flat absolute points.
    pub fn add_line(&mut self, style: StrokeStyle, points: &[f64]) -> ShapeId {
        self.board.scene.add_line(style, points)
    }

    // --- Gesture control ---

    /// Start or toggle off an erase gesture on whatever is under `world_pt`.
    ///
    /// # Errors
    ///
    /// Propagates `EraseError` from the state machine.
    pub fn erase(&mut self, world_pt: Point, group_prefix: Option<&str>) -> Result<Vec<Action>, EraseError> {
        let hit = hit_test(&self.board.scene, world_pt);
        debug!(x = world_pt.x, y = world_pt.y, ?hit, "erase requested");
        let outcome = self.eraser.on_erase(&mut self.board, hit, group_prefix)?;

        let mut actions = Vec::new();
        match outcome {
            EraseOutcome::Cancelled { ended } => {
                if let Some(summary) = ended {
                    self.push_summary(&mut actions, summary);
                }
                actions.push(Action::GestureCancelled);
            }
            EraseOutcome::Started { target, group } => {
                actions.push(Action::GestureStarted { target, group });
                actions.push(Action::SelectionChanged(Vec::new()));
            }
            EraseOutcome::Ended(ended) => {
                if let Some(summary) = ended {
                    self.push_summary(&mut actions, summary);
                }
            }
        }
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Force the running gesture, if any, to finish.
    pub fn end_gesture(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(summary) = self.eraser.stop_drawing(&mut self.board) {
            self.push_summary(&mut actions, summary);
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Input events ---

    /// Dispatch a normalized pointer event.
    pub fn handle(&mut self, event: &PointerEvent) -> Vec<Action> {
        match event.phase {
            PointerPhase::Down => self.on_pointer_down(event.position),
            PointerPhase::Move => self.on_pointer_move(event.position),
            PointerPhase::Up => self.on_pointer_up(event.position),
            PointerPhase::Leave => self.on_pointer_leave(),
        }
    }

    /// Dispatch a raw DOM-style event. Unrecognized names are ignored.
    pub fn handle_raw(&mut self, name: &str, x: f64, y: f64) -> Vec<Action> {
        match PointerEvent::from_raw(name, x, y) {
            Some(event) => self.handle(&event),
            None => Vec::new(),
        }
    }

    pub fn on_pointer_down(&mut self, world_pt: Point) -> Vec<Action> {
        self.board.surface.set_pointer(Some(world_pt));
        self.eraser.on_mouse_start();
        match self.board.surface.begin_line(&mut self.board.scene, world_pt) {
            Some(id) => vec![Action::StrokeStarted { id }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    pub fn on_pointer_move(&mut self, world_pt: Point) -> Vec<Action> {
        self.board.surface.set_pointer(Some(world_pt));
        let extended = self.board.surface.extend_line(&mut self.board.scene, world_pt);

        let mut actions = Vec::new();
        if let Some(report) = self.eraser.on_mouse_moving(&mut self.board) {
            if let Some(id) = report.trimmed_line {
                actions.push(Action::StrokeTrimmed { id, removed: report.removed });
            }
            if let Some(id) = report.finished_line {
                actions.push(Action::StrokeFinished { id });
            }
        }
        if extended || !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    pub fn on_pointer_up(&mut self, world_pt: Point) -> Vec<Action> {
        self.board.surface.set_pointer(Some(world_pt));
        self.eraser.on_mouse_end();
        match self.board.surface.finish_line() {
            Some(id) => vec![Action::StrokeFinished { id }],
            None => Vec::new(),
        }
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.board.surface.set_pointer(None);
        Vec::new()
    }

    // --- Queries ---

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.eraser.phase()
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.eraser.is_drawing()
    }

    /// Currently highlighted shapes.
    #[must_use]
    pub fn selection(&self) -> &[ShapeId] {
        self.board.selection.selected()
    }

    #[must_use]
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.board.groups.find(name)
    }

    fn push_summary(&self, actions: &mut Vec<Action>, summary: GestureSummary) {
        actions.push(Action::GroupAttached { name: summary.group, members: summary.members });
        actions.push(Action::SelectionChanged(self.board.selection.selected().to_vec()));
    }
}
