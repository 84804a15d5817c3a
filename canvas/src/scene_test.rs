#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Helpers
// =============================================================

fn line_scene(points: &[f64]) -> (Scene, ShapeId) {
    let mut scene = Scene::new();
    let id = scene.add_line(StrokeStyle::default(), points);
    (scene, id)
}

// =============================================================
// Ids and ordering
// =============================================================

#[test]
fn new_scene_is_empty() {
    let scene = Scene::new();
    assert!(scene.is_empty());
    assert_eq!(scene.len(), 0);
    assert_eq!(scene.non_group_count(), 0);
}

#[test]
fn ids_are_assigned_in_creation_order() {
    let mut scene = Scene::default();
    let a = scene.add_shape(0.0, 0.0, 1.0, 1.0);
    let b = scene.add_shape(0.0, 0.0, 1.0, 1.0);
    let c = scene.add_line(StrokeStyle::default(), &[]);
    assert_eq!(a, 1);
    assert!(a < b && b < c);
    assert_eq!(scene.non_group_ids(), vec![a, b, c]);
}

#[test]
fn ids_are_not_reused_after_remove() {
    let mut scene = Scene::new();
    let a = scene.add_shape(0.0, 0.0, 1.0, 1.0);
    assert!(scene.remove(a).is_some());
    let b = scene.add_shape(0.0, 0.0, 1.0, 1.0);
    assert_ne!(a, b);
    assert!(scene.remove(a).is_none());
}

#[test]
fn non_group_queries_skip_groups() {
    let mut scene = Scene::new();
    let a = scene.add_shape(0.0, 0.0, 1.0, 1.0);
    let g = scene.add_group("G");
    let b = scene.add_shape(0.0, 0.0, 1.0, 1.0);
    assert_eq!(scene.len(), 3);
    assert_eq!(scene.non_group_ids(), vec![a, b]);
    assert_eq!(scene.non_group_at_mut(1).map(|s| s.id), Some(b));
    assert!(scene.get(g).is_some_and(Shape::is_group));
    assert_eq!(scene.get(g).and_then(Shape::group_name), Some("G"));
}

// =============================================================
// Variants
// =============================================================

#[test]
fn plain_shape_has_no_line() {
    let mut scene = Scene::new();
    let a = scene.add_shape(1.0, 2.0, 3.0, 4.0);
    let shape = scene.get(a).cloned();
    let Some(shape) = shape else { panic!("shape missing") };
    assert!(shape.line().is_none());
    assert!(!shape.has_points());
    assert!(shape.draggable);
    assert_eq!(shape.group_name(), None);
}

#[test]
fn line_drops_trailing_odd_scalar() {
    let (scene, id) = line_scene(&[1.0, 2.0, 3.0]);
    let line = scene.get(id).and_then(Shape::line).cloned();
    assert_eq!(line.map(|l| l.points), Some(vec![1.0, 2.0]));
}

#[test]
fn line_inherits_draggable_from_style() {
    let (scene, id) = line_scene(&[0.0, 0.0]);
    assert_eq!(scene.get(id).map(|s| s.draggable), Some(false));
}

#[test]
fn line_data_pops_in_pairs() {
    let mut line = LineData::new(StrokeStyle::default());
    line.push_point(Point::new(1.0, 2.0));
    line.push_point(Point::new(3.0, 4.0));
    assert_eq!(line.point_count(), 2);
    assert_eq!(line.last_point(), Some(Point::new(3.0, 4.0)));
    assert!(line.pop_point());
    assert_eq!(line.points, vec![1.0, 2.0]);
    assert!(line.pop_point());
    assert!(!line.pop_point());
    assert_eq!(line.last_point(), None);
}

// =============================================================
// Positions and bounds
// =============================================================

#[test]
fn bounds_of_plain_shape_are_centered() {
    let mut scene = Scene::new();
    let a = scene.add_shape(5.0, 5.0, 10.0, 6.0);
    assert_eq!(scene.bounds(a).map(|b| b.corners()), Some((0.0, 2.0, 10.0, 8.0)));
}

#[test]
fn bounds_of_line_cover_points() {
    let (scene, id) = line_scene(&[1.0, 1.0, 4.0, -2.0, 2.0, 3.0]);
    assert_eq!(scene.bounds(id).map(|b| b.corners()), Some((1.0, -2.0, 4.0, 3.0)));
}

#[test]
fn bounds_of_empty_line_collapse_to_position() {
    let (scene, id) = line_scene(&[]);
    let b = scene.bounds(id);
    assert_eq!(b.map(|b| (b.x, b.y, b.width, b.height)), Some((0.0, 0.0, 0.0, 0.0)));
}

#[test]
fn absolute_position_adds_parent_offset() {
    let mut scene = Scene::new();
    let g = scene.add_group("G");
    let a = scene.add_shape(1.0, 1.0, 2.0, 2.0);
    if let Some(s) = scene.get_mut(a) {
        s.parent = Some(g);
    }
    assert!(scene.translate(g, 10.0, 20.0));
    assert_eq!(scene.absolute_position(a), Some(Point::new(11.0, 21.0)));
    assert_eq!(scene.children_of(g), vec![a]);
    assert_eq!(scene.group_name_of(a), Some("G"));
}

#[test]
fn bounds_of_group_union_children() {
    let mut scene = Scene::new();
    let g = scene.add_group("G");
    let a = scene.add_shape(0.0, 0.0, 2.0, 2.0);
    let b = scene.add_shape(10.0, 10.0, 2.0, 2.0);
    for id in [a, b] {
        if let Some(s) = scene.get_mut(id) {
            s.parent = Some(g);
        }
    }
    assert_eq!(scene.bounds(g).map(|b| b.corners()), Some((-1.0, -1.0, 11.0, 11.0)));
}

#[test]
fn bounds_of_empty_group_is_a_point() {
    let mut scene = Scene::new();
    let g = scene.add_group("G");
    assert_eq!(scene.bounds(g).map(|b| b.width), Some(0.0));
}

#[test]
fn translate_missing_shape_is_false() {
    let mut scene = Scene::new();
    assert!(!scene.translate(42, 1.0, 1.0));
    assert!(scene.bounds(42).is_none());
    assert!(scene.absolute_position(42).is_none());
}
