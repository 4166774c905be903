// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transient multi-object selections.
//!
//! A selection is a container that never takes ownership: members keep their
//! persistent owner and only gain a `selection` back-reference. While
//! selected, a member's geometry is expressed in the selection plane, which is
//! what lets the selection move, rotate or scale its members as one unit.
//! Leaving the selection converts the geometry back into the owner's plane.
//!
//! Selections sit on top of the canvas stack and are never nested, cached or
//! used as clip paths.

use tracing::{debug, trace};

use crate::collection;
use crate::container::{ContainerKind, ContainerState};
use crate::dirty;
use crate::error::SceneError;
use crate::geometry::{Geometry, invert};
use crate::id::{INVALID, ObjectId};
use crate::layout::{LayoutContext, LayoutMode, LayoutTrigger};
use crate::observer::MembershipEvent;
use crate::scene::Scene;

impl Scene {
    /// Creates a selection over `objects` and puts it on top of the canvas.
    ///
    /// Members keep their owner. Objects that cannot be selected (other
    /// selections, clip paths) are skipped; objects held by another selection
    /// move to this one.
    pub fn create_selection(&mut self, objects: &[ObjectId]) -> ObjectId {
        let state = ContainerState::new(ContainerKind::Selection, LayoutMode::FitContent);
        let idx = self.allocate(Geometry::default(), None, Some(state));
        self.flags[idx as usize].object_caching = false;
        self.canvas.push(idx);
        self.on_canvas[idx as usize] = true;
        let id = self.id_at(idx);

        let mut members = Vec::with_capacity(objects.len());
        for &object in objects {
            self.validate(object);
            match self.enter_selection(idx, object.idx, usize::MAX, false) {
                Ok(()) => members.push(object),
                Err(err) => debug!(selection = ?id, ?object, %err, "not selectable"),
            }
        }
        let ctx = LayoutContext::new(LayoutTrigger::Initialization).with_targets(members);
        self.perform_layout(idx, ctx);
        id
    }

    /// Returns whether the object is a selection.
    #[must_use]
    pub fn is_selection(&self, id: ObjectId) -> bool {
        self.validate(id);
        self.kind_at(id.idx) == Some(ContainerKind::Selection)
    }

    /// Disposes a selection, returning every member to its owner's plane.
    ///
    /// Owners of the released members are laid out once afterwards.
    ///
    /// # Errors
    ///
    /// Fails if the object is not a selection.
    pub fn dispose_selection(&mut self, selection: ObjectId) -> Result<(), SceneError> {
        self.validate(selection);
        let sel = selection.idx;
        let members = match self.state(sel) {
            Some(state) if state.kind == ContainerKind::Selection => state.objects.clone(),
            Some(_) => return Err(SceneError::NotAContainer(selection)),
            None => return Err(SceneError::NotAContainer(selection)),
        };

        let mut owners: Vec<(u32, Vec<ObjectId>)> = Vec::new();
        for &member in &members {
            self.exit_selection(sel, member);
            let owner = self.owner[member as usize];
            if owner == INVALID {
                continue;
            }
            let id = self.id_at(member);
            match owners.iter_mut().find(|(o, _)| *o == owner) {
                Some((_, targets)) => targets.push(id),
                None => owners.push((owner, vec![id])),
            }
        }

        if collection::remove(&mut self.canvas, sel) {
            self.dirty.mark(sel, dirty::TOPOLOGY);
        }
        debug!(?selection, members = members.len(), "selection disposed");
        self.free_slot(sel);

        for (owner, targets) in owners {
            let ctx = LayoutContext::new(LayoutTrigger::ObjectModified).with_targets(targets);
            self.perform_layout(owner, ctx);
        }
        Ok(())
    }

    /// The enter protocol of selections. `index` is clamped.
    ///
    /// With `convert`, the member's canvas-plane appearance is preserved in
    /// the selection plane. Without it, the member is moved to the canvas
    /// plane and the initial layout converts it.
    pub(crate) fn enter_selection(
        &mut self,
        sel: u32,
        object: u32,
        index: usize,
        convert: bool,
    ) -> Result<(), SceneError> {
        let sel_id = self.id_at(sel);
        let object_id = self.id_at(object);
        if self.kind_at(object) == Some(ContainerKind::Selection) {
            return Err(SceneError::TransientContainer(object_id));
        }
        if self
            .state(sel)
            .is_some_and(|state| state.objects.contains(&object))
        {
            return Err(SceneError::DuplicateMember {
                container: sel_id,
                object: object_id,
            });
        }
        if self.clip_host[object as usize] != INVALID {
            return Err(SceneError::ClipPathInUse(object_id));
        }

        let previous = self.selection[object as usize];
        if previous != INVALID {
            let change = self.remove(self.id_at(previous), &[object_id]);
            debug_assert!(change.is_complete(), "selected object refused to leave");
            for (object, err) in change.rejected {
                trace!(?object, %err, "object kept by its previous selection");
            }
        }

        let world = self.world_at(object);
        let matrix = if convert {
            invert(self.world_at(sel)) * world
        } else {
            world
        };
        self.apply_matrix_at(object, matrix);
        self.selection[object as usize] = sel;
        if let Some(state) = self.state_mut(sel) {
            collection::insert_at(&mut state.objects, index, object);
        }
        self.dirty.mark(sel, dirty::TOPOLOGY);

        let event = MembershipEvent::Entered {
            container: sel_id,
            object: object_id,
        };
        self.emit(|observer| observer.on_membership(&event));
        Ok(())
    }

    /// The exit protocol of selections. `object` must be a member.
    pub(crate) fn exit_selection(&mut self, sel: u32, object: u32) {
        let world = self.world_at(object);
        self.selection[object as usize] = INVALID;
        if let Some(state) = self.state_mut(sel) {
            collection::remove(&mut state.objects, object);
        }
        let owner = self.owner[object as usize];
        let matrix = if owner == INVALID {
            world
        } else {
            invert(self.world_at(owner)) * world
        };
        self.apply_matrix_at(object, matrix);
        self.set_coords_at(object);
        self.mark_dirty(object);
        self.dirty.mark(sel, dirty::TOPOLOGY);

        let event = MembershipEvent::Exited {
            container: self.id_at(sel),
            object: self.id_at(object),
        };
        self.emit(|observer| observer.on_membership(&event));
    }

    /// Takes `object` out of its selection, if any, and lays the selection
    /// out again.
    pub(crate) fn leave_selection(&mut self, object: u32) {
        let sel = self.selection[object as usize];
        if sel == INVALID {
            return;
        }
        self.exit_selection(sel, object);
        let ctx = LayoutContext::new(LayoutTrigger::Removed).with_targets(vec![self.id_at(object)]);
        self.perform_layout(sel, ctx);
    }
}
