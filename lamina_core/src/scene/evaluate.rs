// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change collection.
//!
//! Mutations record what they touched in the scene's dirty channels.
//! [`Scene::evaluate`] drains every channel and reports the touched slots as
//! [`SceneChanges`], so a renderer can update incrementally.
//!
//! [`SceneChanges`] uses raw slot indices (`u32`) rather than [`ObjectId`]
//! handles; [`Scene::id_of_slot`] maps them back while the slot is live.
//!
//! [`ObjectId`]: crate::id::ObjectId

use super::store::Scene;
use crate::dirty;

/// The set of changes recorded since the previous [`Scene::evaluate`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneChanges {
    /// Objects whose own geometry changed.
    pub geometry: Vec<u32>,
    /// Objects whose render cache was invalidated.
    pub cache: Vec<u32>,
    /// Objects created.
    pub added: Vec<u32>,
    /// Objects destroyed.
    pub removed: Vec<u32>,
    /// Whether membership or the canvas stack changed.
    pub topology_changed: bool,
}

impl SceneChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.geometry.clear();
        self.cache.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
            && self.cache.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.topology_changed
    }
}

impl Scene {
    /// Drains all dirty channels and returns the recorded changes.
    pub fn evaluate(&mut self) -> SceneChanges {
        let mut changes = SceneChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut SceneChanges) {
        changes.clear();

        changes
            .geometry
            .extend(self.dirty.drain(dirty::GEOMETRY).deterministic().run());
        changes
            .cache
            .extend(self.dirty.drain(dirty::CACHE).deterministic().run());
        changes.topology_changed = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .count()
            > 0;

        // Move lifecycle lists.
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }
}
