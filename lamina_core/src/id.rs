// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Object handles.
//!
//! Every drawable in a [`Scene`](crate::scene::Scene) is addressed by an
//! [`ObjectId`], whether it is a leaf shape, a group, a selection or a clip
//! path. Relations between objects (owner, selection, clip host) are stored as
//! raw slot indices inside the scene, with [`INVALID`] meaning "none"; the
//! public API only ever hands out full handles.

use core::fmt;

/// Slot index meaning "no object" in the scene's relation arrays.
pub const INVALID: u32 = u32::MAX;

/// A handle to an object in a [`Scene`](crate::scene::Scene).
///
/// A handle stays the same while the object moves between containers or in
/// and out of selections; only destroying the object (or disposing a
/// container) retires it. The generation counter makes a retired handle
/// detectable after its slot has been reused, and scene accessors panic on
/// such stale handles.
///
/// `Debug` prints the slot and generation (`ObjectId(3@gen1)`); `Display`
/// prints only the slot (`#3`), which is what dumps and log lines use.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl ObjectId {
    /// Returns the slot index. Slot indices are what
    /// [`SceneChanges`](crate::scene::SceneChanges) reports.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation of the slot this handle was issued for.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({}@gen{})", self.idx, self.generation)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RectShape;
    use crate::geometry::Geometry;
    use crate::scene::Scene;

    #[test]
    fn handles_survive_membership_changes() {
        let mut scene = Scene::new();
        let a = scene.create_object(Box::new(RectShape::default()), Geometry::default());
        let group = scene.create_container(&[a], Default::default()).unwrap();
        let sel = scene.create_selection(&[a]);
        scene.dispose_selection(sel).unwrap();
        scene.remove(group, &[a]);
        assert!(scene.is_alive(a));
        assert_eq!(format!("{a}"), format!("#{}", a.index()));
    }

    #[test]
    fn reused_slots_get_a_new_generation() {
        let mut scene = Scene::new();
        let first = scene.create_object(Box::new(RectShape::default()), Geometry::default());
        scene.destroy_object(first);
        let second = scene.create_object(Box::new(RectShape::default()), Geometry::default());
        assert_eq!(second.index(), first.index());
        assert_ne!(second, first);
        assert!(!scene.is_alive(first));
        assert_eq!(
            format!("{second:?}"),
            format!("ObjectId({}@gen{})", second.index(), second.generation())
        );
    }
}
