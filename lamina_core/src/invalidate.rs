// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change signals and dirty-flag propagation.
//!
//! Containers do not subscribe to their members. Every mutation that goes
//! through the scene API raises the matching [`Signal`] itself, and external
//! code that mutated an object through other means calls
//! [`Scene::notify`] directly.
//!
//! Dirty flags mark render caches that must be redrawn. An object's flag
//! propagates to its owner only while the owner (or one of its ancestors)
//! keeps a cache, and never to a selection, which has no cache of its own.

use tracing::trace;

use crate::collection;
use crate::container::ContainerKind;
use crate::dirty;
use crate::id::{INVALID, ObjectId};
use crate::layout::{LayoutContext, LayoutMode, LayoutTrigger};
use crate::scene::Scene;

/// A change notification raised by an object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Geometry was changed interactively.
    Modified,
    /// A property was changed programmatically.
    Changed,
    /// The object was selected for individual editing.
    Selected,
    /// The object stopped being individually edited.
    Deselected,
}

impl Scene {
    /// Lets the containers holding an object react to a change.
    ///
    /// [`Signal::Modified`] and [`Signal::Changed`] lay out the object's
    /// selection, then its owner, then the container it clips when that
    /// container follows its clip path. [`Signal::Selected`] and
    /// [`Signal::Deselected`] update the active objects of an interactive
    /// owner.
    pub fn notify(&mut self, id: ObjectId, signal: Signal) {
        self.validate(id);
        self.notify_at(id.idx, signal);
    }

    /// Raises the dirty flag of an object and of every cache it is drawn
    /// into.
    pub fn invalidate(&mut self, id: ObjectId) {
        self.validate(id);
        self.mark_dirty(id.idx);
    }

    /// Whether the object is drawn into some container's render cache.
    #[must_use]
    pub fn is_on_a_cache(&self, id: ObjectId) -> bool {
        self.validate(id);
        self.is_on_a_cache_at(id.idx)
    }

    /// Whether the object keeps its own render cache: it is a caching
    /// container with no member being edited individually.
    #[must_use]
    pub fn should_cache(&self, id: ObjectId) -> bool {
        self.validate(id);
        self.should_cache_at(id.idx)
    }

    pub(crate) fn notify_at(&mut self, idx: u32, signal: Signal) {
        let target = self.id_at(idx);
        match signal {
            Signal::Modified | Signal::Changed => {
                let selection = self.selection[idx as usize];
                if selection != INVALID {
                    self.relayout_for(selection, target);
                }
                let owner = self.owner[idx as usize];
                if owner != INVALID {
                    self.relayout_for(owner, target);
                }
                let host = self.clip_host[idx as usize];
                if host != INVALID
                    && self
                        .state(host)
                        .is_some_and(|state| state.layout == LayoutMode::ClipPath)
                {
                    self.relayout_for(host, target);
                }
            }
            Signal::Selected | Signal::Deselected => {
                let owner = self.owner[idx as usize];
                if owner == INVALID {
                    return;
                }
                let Some(state) = self.state_mut(owner) else {
                    return;
                };
                if !state.interactive {
                    return;
                }
                let changed = if signal == Signal::Selected {
                    if state.active.contains(&idx) {
                        false
                    } else {
                        state.active.push(idx);
                        true
                    }
                } else {
                    collection::remove(&mut state.active, idx)
                };
                if changed {
                    trace!(?target, ?signal, "active objects changed");
                    self.mark_dirty(owner);
                }
            }
        }
    }

    pub(crate) fn mark_dirty(&mut self, idx: u32) {
        if self.kind_at(idx) == Some(ContainerKind::Selection) {
            return;
        }
        self.dirty_flag[idx as usize] = true;
        self.dirty.mark(idx, dirty::CACHE);

        let host = self.clip_host[idx as usize];
        if host != INVALID {
            self.mark_dirty(host);
        }
        let owner = self.owner[idx as usize];
        if owner == INVALID || !self.is_on_a_cache_at(owner) {
            return;
        }
        let selected = self.selection[idx as usize] != INVALID;
        if selected && !self.options.preserve_object_stacking {
            return;
        }
        trace!(object = idx, owner, "dirty bubbles to owner");
        self.mark_dirty(owner);
    }

    pub(crate) fn is_on_a_cache_at(&self, idx: u32) -> bool {
        let mut current = idx;
        while current != INVALID {
            if self.should_cache_at(current) {
                return true;
            }
            current = self.owner[current as usize];
        }
        false
    }

    pub(crate) fn should_cache_at(&self, idx: u32) -> bool {
        self.state(idx).is_some_and(|state| {
            state.kind == ContainerKind::Group
                && self.flags[idx as usize].object_caching
                && state.active.is_empty()
        })
    }

    fn relayout_for(&mut self, container: u32, target: ObjectId) {
        let ctx = LayoutContext::new(LayoutTrigger::ObjectModified).with_targets(vec![target]);
        self.perform_layout(container, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasOptions;
    use crate::container::ContainerOptions;
    use crate::content::RectShape;
    use crate::geometry::{Geometry, GeometryPatch};

    fn rect(scene: &mut Scene, left: f64) -> ObjectId {
        scene.create_object(
            Box::new(RectShape::default()),
            Geometry::sized(left, 0.0, 10.0, 10.0),
        )
    }

    fn group_of_two(scene: &mut Scene) -> (ObjectId, ObjectId, ObjectId) {
        let a = rect(scene, 0.0);
        let b = rect(scene, 20.0);
        let group = scene
            .create_container(&[a, b], ContainerOptions::default().interactive(true))
            .unwrap();
        scene.clear_all_dirty();
        (group, a, b)
    }

    #[test]
    fn member_changes_dirty_a_caching_owner() {
        let mut scene = Scene::new();
        let (group, a, _) = group_of_two(&mut scene);
        assert!(scene.should_cache(group));
        assert!(scene.is_on_a_cache(a));
        scene.set_geometry(a, GeometryPatch::size(12.0, 12.0));
        assert!(scene.is_dirty(a));
        assert!(scene.is_dirty(group));
    }

    #[test]
    fn non_caching_owner_stays_clean() {
        let mut scene = Scene::with_options(CanvasOptions {
            object_caching: false,
            ..CanvasOptions::default()
        });
        let (group, a, _) = group_of_two(&mut scene);
        assert!(!scene.should_cache(group));
        scene.invalidate(a);
        assert!(scene.is_dirty(a));
        assert!(!scene.is_dirty(group));
    }

    #[test]
    fn active_members_disable_the_owner_cache() {
        let mut scene = Scene::new();
        let (group, a, b) = group_of_two(&mut scene);
        scene.notify(a, Signal::Selected);
        assert_eq!(scene.active_objects(group), [a]);
        assert!(scene.is_dirty(group));
        assert!(!scene.should_cache(group));

        scene.clear_all_dirty();
        scene.invalidate(b);
        assert!(!scene.is_dirty(group));

        scene.notify(a, Signal::Deselected);
        assert!(scene.active_objects(group).is_empty());
        assert!(scene.should_cache(group));
    }

    #[test]
    fn selection_is_never_dirty_and_respects_stacking() {
        let mut scene = Scene::new();
        let (group, a, _) = group_of_two(&mut scene);
        let sel = scene.create_selection(&[a]);
        scene.clear_all_dirty();

        scene.invalidate(a);
        assert!(scene.is_dirty(a));
        assert!(!scene.is_dirty(group));
        assert!(!scene.is_dirty(sel));

        scene.set_options(CanvasOptions {
            preserve_object_stacking: true,
            ..CanvasOptions::default()
        });
        scene.invalidate(a);
        assert!(scene.is_dirty(group));
        assert!(!scene.is_dirty(sel));
    }

    #[test]
    fn modified_relays_out_the_owner() {
        let mut scene = Scene::new();
        let (group, a, _) = group_of_two(&mut scene);
        assert_eq!(scene.geometry(group).width, 30.0);
        let g = scene.geometry(a);
        scene.modify(a, GeometryPatch::position(g.left - 10.0, g.top));
        assert_eq!(scene.geometry(group).width, 40.0);
    }

    #[test]
    fn external_mutation_is_picked_up_by_notify() {
        let mut scene = Scene::new();
        let (group, _, b) = group_of_two(&mut scene);
        scene.set_geometry(b, GeometryPatch::size(30.0, 10.0));
        assert_eq!(scene.geometry(group).width, 30.0);
        scene.notify(b, Signal::Changed);
        assert_eq!(scene.geometry(group).width, 50.0);
    }
}
