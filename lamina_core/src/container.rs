// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Containers: objects that own an ordered list of members.
//!
//! A member's geometry is expressed in its container's plane, which is the
//! container's object space (centered on the container). The enter and exit
//! protocols rewrite a member's geometry when it crosses a plane boundary so
//! that its canvas-plane appearance is unchanged, unless the caller asks for
//! plane-relative insertion with [`Scene::add_relative`].
//!
//! Every membership operation processes objects one at a time. Rejected
//! objects are reported in the returned [`MembershipChange`] and leave the
//! scene untouched; accepted ones trigger a single layout pass.

use tracing::{debug, warn};

use crate::collection;
use crate::dirty;
use crate::error::SceneError;
use crate::geometry::{Geometry, OriginX, OriginY, invert};
use crate::id::{INVALID, ObjectId};
use crate::layout::{ExplicitBox, LayoutContext, LayoutMode, LayoutOverrides, LayoutTrigger};
use crate::observer::MembershipEvent;
use crate::scene::Scene;

/// The two container variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// A persistent container that owns its members.
    Group,
    /// A transient multi-object grouping that does not take ownership.
    Selection,
}

/// Container bookkeeping stored in the scene slot of a container.
#[derive(Clone, Debug)]
pub(crate) struct ContainerState {
    pub(crate) kind: ContainerKind,
    pub(crate) objects: Vec<u32>,
    pub(crate) layout: LayoutMode,
    pub(crate) sub_target_check: bool,
    pub(crate) interactive: bool,
    pub(crate) clip_path: u32,
    pub(crate) active: Vec<u32>,
    pub(crate) first_layout_done: bool,
    pub(crate) layout_in_progress: bool,
    /// Constructor values, consumed by the initial layout.
    pub(crate) explicit: ExplicitBox,
}

impl ContainerState {
    pub(crate) fn new(kind: ContainerKind, layout: LayoutMode) -> Self {
        Self {
            kind,
            objects: Vec::new(),
            layout,
            sub_target_check: false,
            interactive: false,
            clip_path: INVALID,
            active: Vec::new(),
            first_layout_done: false,
            layout_in_progress: false,
            explicit: ExplicitBox::default(),
        }
    }
}

/// Construction options of a container.
///
/// ```
/// use lamina_core::container::ContainerOptions;
/// use lamina_core::layout::LayoutMode;
///
/// let options = ContainerOptions::new(LayoutMode::Fixed)
///     .at(10.0, 20.0)
///     .sized(100.0, 50.0)
///     .interactive(true);
/// assert_eq!(options.width, Some(100.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerOptions {
    /// Layout mode.
    pub layout: LayoutMode,
    /// Members keep up-to-date canvas-plane corners.
    pub sub_target_check: bool,
    /// Members are individually selectable.
    pub interactive: bool,
    /// Render caching; the canvas default when `None`.
    pub object_caching: Option<bool>,
    /// Explicit `left`.
    pub left: Option<f64>,
    /// Explicit `top`.
    pub top: Option<f64>,
    /// Explicit width.
    pub width: Option<f64>,
    /// Explicit height.
    pub height: Option<f64>,
    /// Rotation in degrees.
    pub angle: f64,
    /// Horizontal skew in degrees.
    pub skew_x: f64,
    /// Vertical skew in degrees.
    pub skew_y: f64,
    /// Horizontal scale.
    pub scale_x: f64,
    /// Vertical scale.
    pub scale_y: f64,
    /// Horizontal mirror.
    pub flip_x: bool,
    /// Vertical mirror.
    pub flip_y: bool,
    /// Opacity.
    pub opacity: f64,
    /// Horizontal anchor of `left`.
    pub origin_x: OriginX,
    /// Vertical anchor of `top`.
    pub origin_y: OriginY,
    /// Clip path object.
    pub clip_path: Option<ObjectId>,
    /// Members are already expressed in the container plane; the initial
    /// layout keeps the constructor geometry.
    pub objects_relative_to_group: bool,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self::new(LayoutMode::FitContent)
    }
}

impl ContainerOptions {
    /// Options with the given layout mode and everything else default.
    #[must_use]
    pub fn new(layout: LayoutMode) -> Self {
        Self {
            layout,
            sub_target_check: false,
            interactive: false,
            object_caching: None,
            left: None,
            top: None,
            width: None,
            height: None,
            angle: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            flip_x: false,
            flip_y: false,
            opacity: 1.0,
            origin_x: OriginX::Left,
            origin_y: OriginY::Top,
            clip_path: None,
            objects_relative_to_group: false,
        }
    }

    /// Sets an explicit position.
    #[must_use]
    pub fn at(mut self, left: f64, top: f64) -> Self {
        self.left = Some(left);
        self.top = Some(top);
        self
    }

    /// Sets an explicit size.
    #[must_use]
    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets the rotation.
    #[must_use]
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the clip path.
    #[must_use]
    pub fn with_clip_path(mut self, clip: ObjectId) -> Self {
        self.clip_path = Some(clip);
        self
    }

    /// Makes members individually selectable.
    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Keeps canvas-plane corners of members up to date.
    #[must_use]
    pub fn sub_target_check(mut self, sub_target_check: bool) -> Self {
        self.sub_target_check = sub_target_check;
        self
    }

    /// Declares the members as already container-relative.
    #[must_use]
    pub fn relative_objects(mut self) -> Self {
        self.objects_relative_to_group = true;
        self
    }

    fn geometry(&self) -> Geometry {
        Geometry {
            left: self.left.unwrap_or(0.0),
            top: self.top.unwrap_or(0.0),
            width: self.width.unwrap_or(0.0),
            height: self.height.unwrap_or(0.0),
            angle: self.angle,
            skew_x: self.skew_x,
            skew_y: self.skew_y,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            flip_x: self.flip_x,
            flip_y: self.flip_y,
            origin_x: self.origin_x,
            origin_y: self.origin_y,
            stroke_width: 0.0,
            opacity: self.opacity,
        }
    }
}

/// Outcome of a membership operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MembershipChange {
    /// Objects that entered or left.
    pub accepted: Vec<ObjectId>,
    /// Objects that were refused, with the reason.
    pub rejected: Vec<(ObjectId, SceneError)>,
}

impl MembershipChange {
    /// Whether every object was accepted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }

    fn reject(&mut self, object: ObjectId, err: SceneError) {
        warn!(?object, %err, "membership change rejected");
        self.rejected.push((object, err));
    }
}

impl Scene {
    /// Creates a container holding `objects` and runs its initial layout.
    ///
    /// Objects enter without plane conversion: they are taken to be in the
    /// new container's parent plane, or already container-relative when
    /// [`ContainerOptions::objects_relative_to_group`] is set. Objects held by
    /// another container leave it first. Repeated handles are ignored.
    ///
    /// # Errors
    ///
    /// Fails without creating anything if an object is a selection or clips a
    /// container, or if the clip path is already in use.
    pub fn create_container(
        &mut self,
        objects: &[ObjectId],
        options: ContainerOptions,
    ) -> Result<ObjectId, SceneError> {
        let mut members: Vec<ObjectId> = Vec::with_capacity(objects.len());
        for &object in objects {
            self.validate(object);
            if self.kind_at(object.idx) == Some(ContainerKind::Selection) {
                return Err(SceneError::TransientContainer(object));
            }
            if self.clip_host[object.idx as usize] != INVALID {
                return Err(SceneError::ClipPathInUse(object));
            }
            if members.contains(&object) {
                debug!(?object, "repeated constructor member ignored");
                continue;
            }
            members.push(object);
        }
        if let Some(clip) = options.clip_path {
            self.validate(clip);
            if !self.is_free_clip(clip.idx) || members.contains(&clip) {
                return Err(SceneError::ClipPathInUse(clip));
            }
        }

        let mut state = ContainerState::new(ContainerKind::Group, options.layout);
        state.sub_target_check = options.sub_target_check;
        state.interactive = options.interactive;
        state.explicit = ExplicitBox {
            left: options.left,
            top: options.top,
            width: options.width,
            height: options.height,
        };
        let idx = self.allocate(options.geometry(), None, Some(state));
        self.flags[idx as usize].object_caching =
            options.object_caching.unwrap_or(self.options.object_caching);
        let id = self.id_at(idx);

        for &object in &members {
            if let Err(err) = self.enter_group(idx, object.idx, usize::MAX, false) {
                warn!(container = ?id, ?object, %err, "constructor member rejected");
            }
        }
        if let Some(clip) = options.clip_path {
            self.attach_clip(idx, clip.idx);
        }

        let mut ctx = LayoutContext::new(LayoutTrigger::Initialization).with_targets(members);
        ctx.objects_relative = options.objects_relative_to_group;
        self.perform_layout(idx, ctx);
        Ok(id)
    }

    /// Adds objects on top of a container, preserving their canvas-plane
    /// appearance.
    pub fn add(&mut self, container: ObjectId, objects: &[ObjectId]) -> MembershipChange {
        self.insert_members(container, usize::MAX, objects, true)
    }

    /// Adds objects on top of a container, keeping their stored geometry as
    /// container-plane coordinates.
    pub fn add_relative(&mut self, container: ObjectId, objects: &[ObjectId]) -> MembershipChange {
        self.insert_members(container, usize::MAX, objects, false)
    }

    /// Inserts objects at `index` (clamped) in a container's stacking order,
    /// preserving their canvas-plane appearance.
    pub fn insert_at(
        &mut self,
        container: ObjectId,
        index: usize,
        objects: &[ObjectId],
    ) -> MembershipChange {
        self.insert_members(container, index, objects, true)
    }

    /// Removes objects from a container. Removed objects keep their
    /// canvas-plane appearance and are no longer on the canvas.
    pub fn remove(&mut self, container: ObjectId, objects: &[ObjectId]) -> MembershipChange {
        self.validate(container);
        let c = container.idx;
        let mut change = MembershipChange::default();
        let Some(kind) = self.kind_at(c) else {
            for &object in objects {
                change.reject(object, SceneError::NotAContainer(container));
            }
            return change;
        };

        let mut owners = Vec::new();
        for &object in objects {
            self.validate(object);
            let is_member = self
                .state(c)
                .is_some_and(|state| state.objects.contains(&object.idx));
            if !is_member {
                change.reject(object, SceneError::NotAMember { container, object });
                continue;
            }
            match kind {
                ContainerKind::Group => self.exit_group(c, object.idx, true),
                ContainerKind::Selection => {
                    self.exit_selection(c, object.idx);
                    let owner = self.owner[object.idx as usize];
                    if owner != INVALID && !owners.contains(&owner) {
                        owners.push(owner);
                    }
                }
            }
            change.accepted.push(object);
        }

        if !change.accepted.is_empty() {
            let ctx =
                LayoutContext::new(LayoutTrigger::Removed).with_targets(change.accepted.clone());
            self.perform_layout(c, ctx);
            for owner in owners {
                let returned = self.members_returned_to(owner, &change.accepted);
                let ctx = LayoutContext::new(LayoutTrigger::ObjectModified).with_targets(returned);
                self.perform_layout(owner, ctx);
            }
        }
        change
    }

    /// Removes every member of a container.
    pub fn remove_all(&mut self, container: ObjectId) -> MembershipChange {
        let members: Vec<ObjectId> = self.objects(container).collect();
        self.remove(container, &members)
    }

    /// Returns whether the object is a container or a selection.
    #[must_use]
    pub fn is_container(&self, id: ObjectId) -> bool {
        self.validate(id);
        self.is_container_at(id.idx)
    }

    /// Returns the container variant, or `None` for leaf objects.
    #[must_use]
    pub fn container_kind(&self, id: ObjectId) -> Option<ContainerKind> {
        self.validate(id);
        self.kind_at(id.idx)
    }

    /// Returns a container's layout mode.
    #[must_use]
    pub fn layout_mode(&self, id: ObjectId) -> Option<LayoutMode> {
        self.validate(id);
        self.state(id.idx).map(|state| state.layout)
    }

    /// Replaces a container's layout mode and lays it out once with
    /// [`LayoutTrigger::LayoutChange`].
    ///
    /// Returns `false` (and does not lay out) if the mode is unchanged or the
    /// object is not a container.
    pub fn set_layout_mode(&mut self, container: ObjectId, mode: LayoutMode) -> bool {
        self.validate(container);
        let c = container.idx;
        let Some(state) = self.state_mut(c) else {
            return false;
        };
        if state.layout == mode {
            return false;
        }
        let previous = core::mem::replace(&mut state.layout, mode);
        let mut ctx = LayoutContext::new(LayoutTrigger::LayoutChange);
        ctx.previous_mode = Some(previous);
        self.perform_layout(c, ctx);
        true
    }

    /// Requests an [`LayoutTrigger::Imperative`] layout, with optional
    /// explicit values.
    pub fn trigger_layout(&mut self, container: ObjectId, overrides: Option<LayoutOverrides>) {
        self.validate(container);
        let ctx = LayoutContext::new(LayoutTrigger::Imperative)
            .with_overrides(overrides.unwrap_or_default());
        self.perform_layout(container.idx, ctx);
    }

    /// Signals a transient update: the container is invalidated and the
    /// signal bubbles, but no geometry is recomputed.
    pub fn progress(&mut self, container: ObjectId) {
        self.validate(container);
        self.perform_layout(container.idx, LayoutContext::new(LayoutTrigger::Progress));
    }

    /// Returns a container's clip path.
    #[must_use]
    pub fn clip_path(&self, container: ObjectId) -> Option<ObjectId> {
        self.validate(container);
        let clip = self.state(container.idx)?.clip_path;
        (clip != INVALID).then(|| self.id_at(clip))
    }

    /// Sets or clears a container's clip path.
    ///
    /// A replaced clip stays alive as a detached root object. Containers in
    /// [`LayoutMode::ClipPath`] are laid out again.
    ///
    /// # Errors
    ///
    /// Fails if `container` is not a group, or if the clip is held by a
    /// container, clips another container, or encloses `container`.
    pub fn set_clip_path(
        &mut self,
        container: ObjectId,
        clip: Option<ObjectId>,
    ) -> Result<(), SceneError> {
        self.validate(container);
        let c = container.idx;
        match self.kind_at(c) {
            None => return Err(SceneError::NotAContainer(container)),
            Some(ContainerKind::Selection) => {
                return Err(SceneError::TransientContainer(container));
            }
            Some(ContainerKind::Group) => {}
        }
        if let Some(clip) = clip {
            self.validate(clip);
            let current = self.state(c).map_or(INVALID, |state| state.clip_path);
            if clip.idx != current
                && (!self.is_free_clip(clip.idx) || self.encloses(clip.idx, c))
            {
                return Err(SceneError::ClipPathInUse(clip));
            }
        }

        let old = self.state(c).map_or(INVALID, |state| state.clip_path);
        if old != INVALID && Some(old) != clip.map(|clip| clip.idx) {
            self.clip_host[old as usize] = INVALID;
            self.set_canvas_flag(old, false);
            if let Some(state) = self.state_mut(c) {
                state.clip_path = INVALID;
            }
        }
        if let Some(clip) = clip {
            self.attach_clip(c, clip.idx);
        }
        self.mark_dirty(c);
        self.clip_path_changed(c);
        Ok(())
    }

    /// Lays out a [`LayoutMode::ClipPath`] container again after its clip
    /// was replaced or removed.
    pub(crate) fn clip_path_changed(&mut self, c: u32) {
        let relayout = self
            .state(c)
            .is_some_and(|state| state.first_layout_done && state.layout == LayoutMode::ClipPath);
        if relayout {
            self.perform_layout(c, LayoutContext::new(LayoutTrigger::Imperative));
        }
    }

    /// Returns the members currently being edited individually.
    #[must_use]
    pub fn active_objects(&self, container: ObjectId) -> Vec<ObjectId> {
        self.validate(container);
        self.state(container.idx)
            .map(|state| state.active.iter().map(|&idx| self.id_at(idx)).collect())
            .unwrap_or_default()
    }

    /// Returns whether members of the container are individually selectable.
    #[must_use]
    pub fn is_interactive(&self, container: ObjectId) -> bool {
        self.validate(container);
        self.state(container.idx).is_some_and(|state| state.interactive)
    }

    /// Makes members individually selectable, or not. Turning it off
    /// forgets the active members.
    pub fn set_interactive(&mut self, container: ObjectId, interactive: bool) {
        self.validate(container);
        let Some(state) = self.state_mut(container.idx) else {
            return;
        };
        state.interactive = interactive;
        if !interactive && !state.active.is_empty() {
            state.active.clear();
            self.mark_dirty(container.idx);
        }
    }

    /// Returns whether members keep up-to-date canvas-plane corners.
    #[must_use]
    pub fn sub_target_check(&self, container: ObjectId) -> bool {
        self.validate(container);
        self.state(container.idx)
            .is_some_and(|state| state.sub_target_check)
    }

    /// Returns whether the container finished its initial layout.
    #[must_use]
    pub fn is_initialized(&self, container: ObjectId) -> bool {
        self.validate(container);
        self.state(container.idx)
            .is_some_and(|state| state.first_layout_done)
    }

    /// Disposes a container.
    ///
    /// Members leave any selection, then leave the container with their
    /// canvas-plane appearance preserved and their back-references cleared.
    /// The clip path is destroyed, the container leaves its own container
    /// or the canvas, and its slot is freed.
    ///
    /// # Errors
    ///
    /// Fails if the object is not a container.
    pub fn dispose(&mut self, container: ObjectId) -> Result<(), SceneError> {
        self.validate(container);
        let c = container.idx;
        match self.kind_at(c) {
            None => return Err(SceneError::NotAContainer(container)),
            Some(ContainerKind::Selection) => return self.dispose_selection(container),
            Some(ContainerKind::Group) => {}
        }

        self.leave_selection(c);
        let members = self.state(c).map(|state| state.objects.clone()).unwrap_or_default();
        for member in members {
            self.exit_group(c, member, true);
        }

        let clip = self.state(c).map_or(INVALID, |state| state.clip_path);
        if clip != INVALID {
            self.clip_host[clip as usize] = INVALID;
            if let Some(state) = self.state_mut(c) {
                state.clip_path = INVALID;
            }
            if self.is_container_at(clip) {
                self.dispose(self.id_at(clip))?;
            } else {
                self.free_slot(clip);
            }
        }

        let owner = self.owner[c as usize];
        if owner != INVALID {
            let _ = self.remove(self.id_at(owner), &[container]);
        } else if collection::remove(&mut self.canvas, c) {
            self.dirty.mark(c, dirty::TOPOLOGY);
        }
        debug!(?container, "disposed");
        self.free_slot(c);
        Ok(())
    }

    // -- Z-order --

    /// Moves an object to the top of its container (or the canvas).
    pub fn bring_to_front(&mut self, id: ObjectId) -> bool {
        self.restack(id, collection::bring_to_front)
    }

    /// Moves an object to the bottom of its container (or the canvas).
    pub fn send_to_back(&mut self, id: ObjectId) -> bool {
        self.restack(id, collection::send_to_back)
    }

    /// Moves an object one step up.
    pub fn bring_forward(&mut self, id: ObjectId) -> bool {
        self.restack(id, collection::bring_forward)
    }

    /// Moves an object one step down.
    pub fn send_backwards(&mut self, id: ObjectId) -> bool {
        self.restack(id, collection::send_backwards)
    }

    /// Moves an object to `index` in its container (or the canvas).
    pub fn move_to(&mut self, id: ObjectId, index: usize) -> bool {
        self.restack(id, |items, item| collection::move_to(items, item, index))
    }

    // -- Protocols --

    fn insert_members(
        &mut self,
        container: ObjectId,
        index: usize,
        objects: &[ObjectId],
        preserve_world: bool,
    ) -> MembershipChange {
        self.validate(container);
        let c = container.idx;
        let mut change = MembershipChange::default();
        let Some(kind) = self.kind_at(c) else {
            for &object in objects {
                change.reject(object, SceneError::NotAContainer(container));
            }
            return change;
        };

        for &object in objects {
            self.validate(object);
            let entered = match kind {
                ContainerKind::Group => {
                    let at = index.saturating_add(change.accepted.len());
                    self.enter_group(c, object.idx, at, preserve_world)
                }
                ContainerKind::Selection => {
                    let at = index.saturating_add(change.accepted.len());
                    self.enter_selection(c, object.idx, at, true)
                }
            };
            match entered {
                Ok(()) => change.accepted.push(object),
                Err(err) => change.reject(object, err),
            }
        }

        if !change.accepted.is_empty() {
            let ctx =
                LayoutContext::new(LayoutTrigger::Added).with_targets(change.accepted.clone());
            self.perform_layout(c, ctx);
        }
        change
    }

    /// Checks whether `object` may become a member of the group `container`.
    pub(crate) fn can_enter_group(&self, container: u32, object: u32) -> Result<(), SceneError> {
        let container_id = self.id_at(container);
        let object_id = self.id_at(object);
        let Some(state) = self.state(container) else {
            return Err(SceneError::NotAContainer(container_id));
        };
        if self.kind_at(object) == Some(ContainerKind::Selection) {
            return Err(SceneError::TransientContainer(object_id));
        }
        if object == container || self.encloses(object, container) {
            return Err(SceneError::Cycle {
                container: container_id,
                object: object_id,
            });
        }
        if state.objects.contains(&object) {
            return Err(SceneError::DuplicateMember {
                container: container_id,
                object: object_id,
            });
        }
        if self.clip_host[object as usize] != INVALID {
            return Err(SceneError::ClipPathInUse(object_id));
        }
        Ok(())
    }

    /// The enter protocol of groups.
    pub(crate) fn enter_group(
        &mut self,
        container: u32,
        object: u32,
        index: usize,
        preserve_world: bool,
    ) -> Result<(), SceneError> {
        self.can_enter_group(container, object)?;
        let object_id = self.id_at(object);

        self.leave_selection(object);
        let previous = self.owner[object as usize];
        if previous != INVALID {
            let _ = self.remove(self.id_at(previous), &[object_id]);
        }
        if collection::remove(&mut self.canvas, object) {
            self.dirty.mark(object, dirty::TOPOLOGY);
        }

        if preserve_world {
            let world = self.world_at(object);
            let container_world = self.world_at(container);
            self.apply_matrix_at(object, invert(container_world) * world);
        }
        self.owner[object as usize] = container;
        let sub_target_check = match self.state_mut(container) {
            Some(state) => {
                collection::insert_at(&mut state.objects, index, object);
                state.sub_target_check
            }
            None => false,
        };
        self.set_canvas_flag(object, self.on_canvas[container as usize]);
        if sub_target_check {
            self.set_coords_at(object);
        }
        self.dirty.mark(container, dirty::TOPOLOGY);

        let event = MembershipEvent::Entered {
            container: self.id_at(container),
            object: object_id,
        };
        self.emit(|observer| observer.on_membership(&event));
        Ok(())
    }

    /// The exit protocol of groups. `object` must be a member.
    pub(crate) fn exit_group(&mut self, container: u32, object: u32, preserve_world: bool) {
        self.leave_selection(object);
        if preserve_world {
            let world = self.world_at(object);
            self.apply_matrix_at(object, world);
        }
        self.owner[object as usize] = INVALID;
        if let Some(state) = self.state_mut(container) {
            collection::remove(&mut state.active, object);
            collection::remove(&mut state.objects, object);
        }
        self.set_canvas_flag(object, false);
        self.set_coords_at(object);
        self.dirty.mark(container, dirty::TOPOLOGY);

        let event = MembershipEvent::Exited {
            container: self.id_at(container),
            object: self.id_at(object),
        };
        self.emit(|observer| observer.on_membership(&event));
    }

    /// Whether `ancestor` is a structural ancestor of `idx`.
    pub(crate) fn encloses(&self, ancestor: u32, idx: u32) -> bool {
        let mut parent = self.structural_parent(idx);
        while parent != INVALID {
            if parent == ancestor {
                return true;
            }
            parent = self.structural_parent(parent);
        }
        false
    }

    fn is_free_clip(&self, idx: u32) -> bool {
        self.owner[idx as usize] == INVALID
            && self.selection[idx as usize] == INVALID
            && self.clip_host[idx as usize] == INVALID
            && self.kind_at(idx) != Some(ContainerKind::Selection)
    }

    fn attach_clip(&mut self, container: u32, clip: u32) {
        if collection::remove(&mut self.canvas, clip) {
            self.dirty.mark(clip, dirty::TOPOLOGY);
        }
        self.clip_host[clip as usize] = container;
        if let Some(state) = self.state_mut(container) {
            state.clip_path = clip;
        }
        self.set_canvas_flag(clip, self.on_canvas[container as usize]);
    }

    fn members_returned_to(&self, owner: u32, objects: &[ObjectId]) -> Vec<ObjectId> {
        objects
            .iter()
            .copied()
            .filter(|object| self.owner[object.idx as usize] == owner)
            .collect()
    }

    fn restack(&mut self, id: ObjectId, op: impl FnOnce(&mut Vec<u32>, u32) -> bool) -> bool {
        self.validate(id);
        let idx = id.idx;
        let owner = self.owner[idx as usize];
        let changed = if owner != INVALID {
            self.state_mut(owner)
                .is_some_and(|state| op(&mut state.objects, idx))
        } else {
            op(&mut self.canvas, idx)
        };
        if changed {
            if owner != INVALID {
                self.dirty.mark(owner, dirty::TOPOLOGY);
                self.mark_dirty(owner);
            } else {
                self.dirty.mark(idx, dirty::TOPOLOGY);
            }
        }
        changed
    }
}
