//! Scene model: shapes, their variants, and the ordered in-memory store.
//!
//! Shapes are kept in creation order. That order is load-bearing: the eraser
//! records an index into the non-group shapes when a gesture begins and later
//! treats everything past that index as "drawn during this gesture".
//!
//! Positions are shape *centers*. A shape inside a group stores its position
//! relative to the group container; [`Scene::absolute_position`] resolves the
//! parent chain.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::geometry::{Bounds, Point};
use crate::stroke::StrokeStyle;

/// Unique identifier for a shape, assigned in creation order.
pub type ShapeId = u64;

/// Point buffer and style of a free-hand line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineData {
    /// Flat `x, y` pairs relative to the owning shape's position.
    pub points: Vec<f64>,
    pub style: StrokeStyle,
}

impl LineData {
    #[must_use]
    pub fn new(style: StrokeStyle) -> Self {
        Self { points: Vec::new(), style }
    }

    /// Append one point (two scalars).
    pub fn push_point(&mut self, pt: Point) {
        self.points.push(pt.x);
        self.points.push(pt.y);
    }

    /// The last recorded point, if the buffer holds at least one full pair.
    #[must_use]
    pub fn last_point(&self) -> Option<Point> {
        match self.points.as_slice() {
            [.., x, y] => Some(Point::new(*x, *y)),
            _ => None,
        }
    }

    /// Drop the last point (two scalars). Returns false when there is no full pair.
    pub fn pop_point(&mut self) -> bool {
        if self.points.len() < 2 {
            return false;
        }
        self.points.truncate(self.points.len() - 2);
        true
    }

    /// Number of complete points in the buffer.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len() / 2
    }
}

/// A regular drawable shape.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalShape {
    pub width: f64,
    pub height: f64,
    /// Present for line/stroke shapes only.
    pub line: Option<LineData>,
}

/// A group container.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupShape {
    pub name: String,
}

/// Closed set of shape variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Normal(NormalShape),
    Group(GroupShape),
}

/// One item in the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// Center x, relative to `parent` when grouped.
    pub x: f64,
    /// Center y, relative to `parent` when grouped.
    pub y: f64,
    /// Container shape of the group this shape belongs to.
    pub parent: Option<ShapeId>,
    pub draggable: bool,
}

impl Shape {
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ShapeKind::Group(_))
    }

    /// Group name if this shape is a group container.
    #[must_use]
    pub fn group_name(&self) -> Option<&str> {
        match &self.kind {
            ShapeKind::Group(g) => Some(&g.name),
            ShapeKind::Normal(_) => None,
        }
    }

    #[must_use]
    pub fn line(&self) -> Option<&LineData> {
        match &self.kind {
            ShapeKind::Normal(n) => n.line.as_ref(),
            ShapeKind::Group(_) => None,
        }
    }

    pub fn line_mut(&mut self) -> Option<&mut LineData> {
        match &mut self.kind {
            ShapeKind::Normal(n) => n.line.as_mut(),
            ShapeKind::Group(_) => None,
        }
    }

    /// Whether this shape carries a non-empty point buffer.
    #[must_use]
    pub fn has_points(&self) -> bool {
        self.line().is_some_and(|l| !l.points.is_empty())
    }
}

/// Ordered in-memory store of shapes.
#[derive(Debug)]
pub struct Scene {
    shapes: Vec<Shape>,
    next_id: ShapeId,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self { shapes: Vec::new(), next_id: 1 }
    }

    fn push(&mut self, kind: ShapeKind, x: f64, y: f64, draggable: bool) -> ShapeId {
        let id = self.next_id;
        self.next_id = id + 1;
        self.shapes.push(Shape { id, kind, x, y, parent: None, draggable });
        id
    }

    /// Add a plain shape centered at `(x, y)`.
    pub fn add_shape(&mut self, x: f64, y: f64, width: f64, height: f64) -> ShapeId {
        self.push(ShapeKind::Normal(NormalShape { width, height, line: None }), x, y, true)
    }

    /// Add a line shape at the origin. `points` are flat absolute `x, y` pairs;
    /// a trailing odd scalar is dropped.
    pub fn add_line(&mut self, style: StrokeStyle, points: &[f64]) -> ShapeId {
        let draggable = style.draggable;
        let mut line = LineData::new(style);
        for pair in points.chunks_exact(2) {
            line.push_point(Point::new(pair[0], pair[1]));
        }
        self.push(
            ShapeKind::Normal(NormalShape { width: 0.0, height: 0.0, line: Some(line) }),
            0.0,
            0.0,
            draggable,
        )
    }

    /// Add a group container. Only the group registry creates these.
    pub(crate) fn add_group(&mut self, name: &str) -> ShapeId {
        self.push(ShapeKind::Group(GroupShape { name: name.to_owned() }), 0.0, 0.0, true)
    }

    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    /// Remove a shape, returning it if it was present. Children of a removed
    /// container keep their stale `parent`; callers dissolve groups first.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let idx = self.shapes.iter().position(|s| s.id == id)?;
        Some(self.shapes.remove(idx))
    }

    /// All shapes in creation order, groups included.
    pub fn shapes(&self) -> impl DoubleEndedIterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Non-group shapes in creation order.
    pub fn non_group_shapes(&self) -> impl DoubleEndedIterator<Item = &Shape> {
        self.shapes.iter().filter(|s| !s.is_group())
    }

    /// Ids of all non-group shapes in creation order.
    #[must_use]
    pub fn non_group_ids(&self) -> Vec<ShapeId> {
        self.non_group_shapes().map(|s| s.id).collect()
    }

    #[must_use]
    pub fn non_group_count(&self) -> usize {
        self.non_group_shapes().count()
    }

    /// Mutable access to the `index`-th non-group shape.
    pub fn non_group_at_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.shapes.iter_mut().filter(|s| !s.is_group()).nth(index)
    }

    /// Direct children of a group container, in creation order.
    #[must_use]
    pub fn children_of(&self, container: ShapeId) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|s| s.parent == Some(container))
            .map(|s| s.id)
            .collect()
    }

    /// Name of the group a shape belongs to.
    #[must_use]
    pub fn group_name_of(&self, id: ShapeId) -> Option<&str> {
        let parent = self.get(id)?.parent?;
        self.get(parent)?.group_name()
    }

    /// Position in world space, accumulating parent offsets.
    #[must_use]
    pub fn absolute_position(&self, id: ShapeId) -> Option<Point> {
        let shape = self.get(id)?;
        let mut pos = Point::new(shape.x, shape.y);
        let mut parent = shape.parent;
        // Group nesting is one level in practice; the bound guards malformed cycles.
        let mut depth = 0;
        while let Some(pid) = parent {
            let Some(p) = self.get(pid) else { break };
            pos.x += p.x;
            pos.y += p.y;
            parent = p.parent;
            depth += 1;
            if depth > self.shapes.len() {
                break;
            }
        }
        Some(pos)
    }

    /// World-space bounds of a shape. Groups cover the union of their children.
    #[must_use]
    pub fn bounds(&self, id: ShapeId) -> Option<Bounds> {
        let shape = self.get(id)?;
        let origin = self.absolute_position(id)?;
        match &shape.kind {
            ShapeKind::Normal(NormalShape { line: Some(line), .. }) => {
                Some(points_bounds(origin, &line.points).unwrap_or_else(|| Bounds::at(origin)))
            }
            ShapeKind::Normal(n) => Some(Bounds { x: origin.x, y: origin.y, width: n.width, height: n.height }),
            ShapeKind::Group(_) => {
                let merged = self
                    .children_of(id)
                    .into_iter()
                    .filter_map(|child| self.bounds(child))
                    .reduce(|acc, b| acc.union(&b));
                Some(merged.unwrap_or_else(|| Bounds::at(origin)))
            }
        }
    }

    /// Move a shape by `(dx, dy)`. Returns false if it doesn't exist.
    pub fn translate(&mut self, id: ShapeId, dx: f64, dy: f64) -> bool {
        let Some(shape) = self.get_mut(id) else {
            return false;
        };
        shape.x += dx;
        shape.y += dy;
        true
    }

    /// Number of shapes, groups included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

fn points_bounds(origin: Point, points: &[f64]) -> Option<Bounds> {
    let mut pairs = points.chunks_exact(2);
    let first = pairs.next()?;
    let (mut min_x, mut min_y) = (first[0], first[1]);
    let (mut max_x, mut max_y) = (first[0], first[1]);
    for pair in pairs {
        min_x = min_x.min(pair[0]);
        max_x = max_x.max(pair[0]);
        min_y = min_y.min(pair[1]);
        max_y = max_y.max(pair[1]);
    }
    Some(Bounds::from_corners(origin.x + min_x, origin.y + min_y, origin.x + max_x, origin.y + max_y))
}
