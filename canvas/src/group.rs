//! Group lifecycle: named, ephemeral containers that batch shapes together.
//!
//! Each live group has a container shape in the scene. Children store their
//! position relative to that container, so attaching and ungrouping convert
//! between relative and absolute coordinates. Membership is exclusive: a
//! shape sits in at most one group, and attaching it elsewhere detaches it
//! from the old one first.

#[cfg(test)]
#[path = "group_test.rs"]
mod group_test;

use std::collections::HashMap;

use tracing::debug;

use crate::geometry::Point;
use crate::scene::{Scene, ShapeId};

/// A named group and its members.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub name: String,
    /// Container shape holding the group's offset.
    pub container: ShapeId,
    /// Member shapes in attach order.
    pub children: Vec<ShapeId>,
}

/// Registry mapping group names to live groups. A name maps to at most one group.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: HashMap<String, Group>,
}

impl GroupRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the group named `name`, creating an empty one if absent.
    pub fn find_or_create(&mut self, scene: &mut Scene, name: &str) -> &Group {
        self.groups.entry(name.to_owned()).or_insert_with(|| {
            let container = scene.add_group(name);
            debug!(group = name, container, "group created");
            Group { name: name.to_owned(), container, children: Vec::new() }
        })
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Move `shapes` into the group named `name`, creating it if needed.
    ///
    /// An empty `shapes` slice attaches every non-group shape in the scene.
    /// Unknown ids and group shapes are skipped. Positions are rebased onto
    /// the container so absolute placement is unchanged.
    pub fn attach(&mut self, scene: &mut Scene, shapes: &[ShapeId], name: &str) -> &Group {
        let targets = if shapes.is_empty() { scene.non_group_ids() } else { shapes.to_vec() };
        let container = self.find_or_create(scene, name).container;
        let offset = scene.absolute_position(container).unwrap_or(Point::new(0.0, 0.0));

        let mut attached = Vec::new();
        for id in targets {
            let Some(shape) = scene.get(id) else {
                debug!(shape = id, group = name, "attach skipped missing shape");
                continue;
            };
            if shape.is_group() {
                debug!(shape = id, group = name, "attach skipped group shape");
                continue;
            }
            if shape.parent == Some(container) {
                continue;
            }
            self.detach(scene, id);
            let Some(abs) = scene.absolute_position(id) else {
                continue;
            };
            if let Some(shape) = scene.get_mut(id) {
                shape.x = abs.x - offset.x;
                shape.y = abs.y - offset.y;
                shape.parent = Some(container);
                attached.push(id);
            }
        }

        let group = self.groups.entry(name.to_owned()).or_insert_with(|| Group {
            name: name.to_owned(),
            container,
            children: Vec::new(),
        });
        debug!(group = name, count = attached.len(), "shapes attached");
        group.children.extend(attached);
        group
    }

    /// Dissolve the group named `name`, releasing its children to the scene
    /// root at their absolute positions. Returns the dissolved group, or
    /// `None` if no such group exists.
    pub fn ungroup(&mut self, scene: &mut Scene, name: &str) -> Option<Group> {
        let group = self.groups.remove(name)?;
        let offset = scene.absolute_position(group.container);
        for &child in &group.children {
            let Some(shape) = scene.get_mut(child) else {
                continue;
            };
            if let Some(offset) = offset {
                shape.x += offset.x;
                shape.y += offset.y;
            }
            shape.parent = None;
        }
        scene.remove(group.container);
        debug!(group = name, released = group.children.len(), "group dissolved");
        Some(group)
    }

    /// Name of the group `shape` currently belongs to.
    #[must_use]
    pub fn group_of(&self, shape: ShapeId) -> Option<&str> {
        self.groups
            .values()
            .find(|g| g.children.contains(&shape))
            .map(|g| g.name.as_str())
    }

    /// Number of live groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Live group names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.groups.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Release `id` from whatever group holds it, converting to absolute position.
    fn detach(&mut self, scene: &mut Scene, id: ShapeId) {
        let Some(parent) = scene.get(id).and_then(|s| s.parent) else {
            return;
        };
        let abs = scene.absolute_position(id);
        for group in self.groups.values_mut() {
            if group.container == parent {
                group.children.retain(|c| *c != id);
            }
        }
        if let Some(shape) = scene.get_mut(id) {
            if let Some(abs) = abs {
                shape.x = abs.x;
                shape.y = abs.y;
            }
            shape.parent = None;
        }
    }
}
