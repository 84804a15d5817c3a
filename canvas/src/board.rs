//! The board: the scene plus the collaborators the eraser drives.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use crate::group::GroupRegistry;
use crate::scene::{Scene, ShapeId};
use crate::stroke::DrawingSurface;

/// Highlighted shapes, in the order they were added.
#[derive(Debug, Default)]
pub struct SelectionOverlay {
    selected: Vec<ShapeId>,
}

impl SelectionOverlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every highlight.
    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Highlight `id`. Adding an already-selected shape is a no-op.
    pub fn add(&mut self, id: ShapeId) {
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
    }

    #[must_use]
    pub fn contains(&self, id: ShapeId) -> bool {
        self.selected.contains(&id)
    }

    #[must_use]
    pub fn selected(&self) -> &[ShapeId] {
        &self.selected
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Scene graph, group registry, drawing surface, and selection overlay.
///
/// Fields are public so handlers can borrow them independently.
#[derive(Debug, Default)]
pub struct Board {
    pub scene: Scene,
    pub groups: GroupRegistry,
    pub surface: DrawingSurface,
    pub selection: SelectionOverlay,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
