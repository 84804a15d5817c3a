#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geometry::Point;
use crate::scene::{Scene, ShapeId};

/// Topmost shape whose bounds cover `world_pt`.
///
/// Later shapes sit above earlier ones. A hit on a grouped shape resolves to
/// its group container, so picking any member picks the whole group. Lines
/// with no points left are invisible and never hit.
#[must_use]
pub fn hit_test(scene: &Scene, world_pt: Point) -> Option<ShapeId> {
    let hit = scene
        .non_group_shapes()
        .rev()
        .filter(|s| s.line().is_none_or(|l| !l.points.is_empty()))
        .find(|s| scene.bounds(s.id).is_some_and(|b| b.covers(world_pt)))?;
    Some(hit.parent.unwrap_or(hit.id))
}
