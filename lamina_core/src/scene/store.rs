// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays object storage with allocation, geometry and canvas
//! management.

use core::fmt;

use kurbo::{Affine, Point, Vec2};
use tracing::{trace, warn};
use understory_dirty::{CycleHandling, DirtyTracker};

use super::traverse::Objects;
use crate::collection;
use crate::config::CanvasOptions;
use crate::container::{ContainerKind, ContainerState};
use crate::content::Shape;
use crate::dirty;
use crate::geometry::{Geometry, GeometryPatch};
use crate::id::{INVALID, ObjectId};
use crate::invalidate::Signal;
use crate::observer::{ObserverId, SceneObserver};

/// Per-object behavior flags set by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectFlags {
    /// A clip path with this flag is positioned in the canvas plane instead
    /// of its host's plane.
    pub absolute_positioned: bool,
    /// The object is stretched to its container's size by every layout pass
    /// and does not contribute to fitting.
    pub fill_parent: bool,
    /// Containers with this flag keep a render cache that members invalidate.
    pub object_caching: bool,
}

impl Default for ObjectFlags {
    fn default() -> Self {
        Self {
            absolute_positioned: false,
            fill_parent: false,
            object_caching: true,
        }
    }
}

/// Struct-of-arrays storage for every object of a canvas.
///
/// Objects are addressed by [`ObjectId`] handles. Each object occupies a slot
/// in parallel arrays; destroyed objects are recycled via a free list, and
/// generation counters make stale handles panic instead of aliasing a new
/// object.
///
/// Besides geometry and content, every slot records non-owning relations to
/// other slots: the persistent container (`owner`), the transient selection
/// currently holding the object, and the container it clips. These relations
/// are only written by the membership protocols.
pub struct Scene {
    // -- Local properties (set by callers) --
    pub(crate) geometry: Vec<Geometry>,
    pub(crate) content: Vec<Option<Box<dyn Shape>>>,
    pub(crate) flags: Vec<ObjectFlags>,

    // -- Cached derived values --
    pub(crate) own_matrix: Vec<Affine>,
    pub(crate) corners: Vec<Option<[Point; 4]>>,

    // -- Relations --
    pub(crate) owner: Vec<u32>,
    pub(crate) selection: Vec<u32>,
    pub(crate) clip_host: Vec<u32>,
    pub(crate) container: Vec<Option<ContainerState>>,

    // -- Render state --
    pub(crate) dirty_flag: Vec<bool>,
    pub(crate) on_canvas: Vec<bool>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Canvas --
    pub(crate) canvas: Vec<u32>,
    pub(crate) options: CanvasOptions,

    // -- Observers --
    pub(crate) observers: Vec<(ObserverId, Box<dyn SceneObserver>)>,
    next_observer: u32,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("len", &self.len)
            .field("free", &self.free_list.len())
            .field("canvas", &self.canvas)
            .field("options", &self.options)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty scene with default canvas options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(CanvasOptions::default())
    }

    /// Creates an empty scene.
    #[must_use]
    pub fn with_options(options: CanvasOptions) -> Self {
        Self {
            geometry: Vec::new(),
            content: Vec::new(),
            flags: Vec::new(),
            own_matrix: Vec::new(),
            corners: Vec::new(),
            owner: Vec::new(),
            selection: Vec::new(),
            clip_host: Vec::new(),
            container: Vec::new(),
            dirty_flag: Vec::new(),
            on_canvas: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            canvas: Vec::new(),
            options,
            observers: Vec::new(),
            next_observer: 0,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    /// Returns the canvas options.
    #[must_use]
    pub fn options(&self) -> CanvasOptions {
        self.options
    }

    /// Replaces the canvas options.
    ///
    /// Existing containers keep their caching flag.
    pub fn set_options(&mut self, options: CanvasOptions) {
        self.options = options;
    }

    // -- Allocation API --

    /// Creates a leaf object and returns its handle.
    ///
    /// The object starts dirty, detached from the canvas and from every
    /// container.
    pub fn create_object(&mut self, shape: Box<dyn Shape>, geometry: Geometry) -> ObjectId {
        let idx = self.allocate(geometry, Some(shape), None);
        self.id_at(idx)
    }

    /// Destroys an object, freeing its slot for reuse.
    ///
    /// The object first leaves its selection, its container, the canvas, or
    /// the container it clips. Containers are [disposed](Self::dispose).
    /// A container laid out by its clip path is laid out again without it.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_object(&mut self, id: ObjectId) {
        self.validate(id);
        let idx = id.idx;
        if self.container[idx as usize].is_some() {
            if let Err(err) = self.dispose(id) {
                warn!(object = ?id, %err, "dispose failed while destroying");
            }
            return;
        }

        let host = self.clip_host[idx as usize];
        if host != INVALID {
            if let Some(state) = self.container[host as usize].as_mut() {
                state.clip_path = INVALID;
            }
            self.clip_host[idx as usize] = INVALID;
            self.mark_dirty(host);
            self.clip_path_changed(host);
        }
        let selection = self.selection[idx as usize];
        if selection != INVALID {
            let _ = self.remove(self.id_at(selection), &[id]);
        }
        let owner = self.owner[idx as usize];
        if owner != INVALID {
            let _ = self.remove(self.id_at(owner), &[id]);
        }
        if collection::remove(&mut self.canvas, idx) {
            self.dirty.mark(idx, dirty::TOPOLOGY);
        }
        self.free_slot(idx);
    }

    /// Returns whether the given handle refers to a live object.
    #[must_use]
    pub fn is_alive(&self, id: ObjectId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the handle of the live object in slot `idx`, as found in
    /// [`SceneChanges`](super::SceneChanges).
    #[must_use]
    pub fn id_of_slot(&self, idx: u32) -> Option<ObjectId> {
        let id = (idx < self.len).then(|| self.id_at(idx))?;
        self.is_alive(id).then_some(id)
    }

    // -- Geometry API --

    /// Returns the geometry of an object, in the plane of its container.
    #[must_use]
    pub fn geometry(&self, id: ObjectId) -> Geometry {
        self.validate(id);
        self.geometry[id.idx as usize]
    }

    /// Returns the own matrix, mapping object space to the containing plane.
    #[must_use]
    pub fn transform(&self, id: ObjectId) -> Affine {
        self.validate(id);
        self.own_matrix[id.idx as usize]
    }

    /// Returns the matrix mapping object space to the canvas plane.
    #[must_use]
    pub fn world_transform(&self, id: ObjectId) -> Affine {
        self.validate(id);
        self.world_at(id.idx)
    }

    /// Returns the half-extents of the object's box in its containing plane.
    #[must_use]
    pub fn half_extents(&self, id: ObjectId, ignore_angle: bool) -> Vec2 {
        self.validate(id);
        self.geometry[id.idx as usize].half_extents(ignore_angle)
    }

    /// Returns the center of the object in its containing plane.
    #[must_use]
    pub fn center(&self, id: ObjectId) -> Point {
        self.validate(id);
        self.geometry[id.idx as usize].center()
    }

    /// Returns the opacity including every enclosing container.
    #[must_use]
    pub fn effective_opacity(&self, id: ObjectId) -> f64 {
        self.validate(id);
        let mut opacity = self.geometry[id.idx as usize].opacity;
        let mut parent = self.plane_parent(id.idx);
        while parent != INVALID {
            opacity *= self.geometry[parent as usize].opacity;
            parent = self.plane_parent(parent);
        }
        opacity
    }

    /// Applies a geometry patch and invalidates render caches.
    ///
    /// Containers holding the object are not laid out; use
    /// [`modify`](Self::modify) for that. Returns whether anything changed.
    pub fn set_geometry(&mut self, id: ObjectId, patch: GeometryPatch) -> bool {
        self.validate(id);
        self.set_geometry_at(id.idx, patch)
    }

    /// Applies a geometry patch, then lets the containers holding the object
    /// react as to [`Signal::Modified`].
    pub fn modify(&mut self, id: ObjectId, patch: GeometryPatch) -> bool {
        self.validate(id);
        self.modify_at(id.idx, patch)
    }

    /// Recomputes the cached canvas-plane corners of an object.
    pub fn set_coords(&mut self, id: ObjectId) {
        self.validate(id);
        self.set_coords_at(id.idx);
    }

    /// Returns the cached canvas-plane corners (top-left, top-right,
    /// bottom-right, bottom-left), if computed.
    #[must_use]
    pub fn corners(&self, id: ObjectId) -> Option<[Point; 4]> {
        self.validate(id);
        self.corners[id.idx as usize]
    }

    // -- Relation getters --

    /// Returns the persistent container of an object.
    #[must_use]
    pub fn owner(&self, id: ObjectId) -> Option<ObjectId> {
        self.validate(id);
        self.slot_id(self.owner[id.idx as usize])
    }

    /// Returns the selection currently holding an object.
    #[must_use]
    pub fn selection(&self, id: ObjectId) -> Option<ObjectId> {
        self.validate(id);
        self.slot_id(self.selection[id.idx as usize])
    }

    /// Returns the container whose plane the object's geometry is expressed
    /// in: its selection if any, otherwise its owner.
    #[must_use]
    pub fn effective_group(&self, id: ObjectId) -> Option<ObjectId> {
        self.validate(id);
        self.slot_id(self.effective_group_at(id.idx))
    }

    /// Returns the container an object clips.
    #[must_use]
    pub fn clip_host(&self, id: ObjectId) -> Option<ObjectId> {
        self.validate(id);
        self.slot_id(self.clip_host[id.idx as usize])
    }

    /// Returns an iterator over the members of a container, back to front.
    ///
    /// Non-containers have no members.
    #[must_use]
    pub fn objects(&self, id: ObjectId) -> Objects<'_> {
        self.validate(id);
        match &self.container[id.idx as usize] {
            Some(state) => Objects::new(self, &state.objects),
            None => Objects::new(self, &[]),
        }
    }

    // -- Content and flags --

    /// Returns the shape of a leaf object.
    #[must_use]
    pub fn shape(&self, id: ObjectId) -> Option<&dyn Shape> {
        self.validate(id);
        self.content[id.idx as usize].as_deref()
    }

    /// Replaces the shape of a leaf object and invalidates render caches.
    ///
    /// Containers ignore the call.
    pub fn set_shape(&mut self, id: ObjectId, shape: Box<dyn Shape>) {
        self.validate(id);
        if self.container[id.idx as usize].is_some() {
            return;
        }
        self.content[id.idx as usize] = Some(shape);
        self.mark_dirty(id.idx);
    }

    /// Returns the behavior flags of an object.
    #[must_use]
    pub fn flags(&self, id: ObjectId) -> ObjectFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Sets the behavior flags of an object and invalidates render caches.
    pub fn set_flags(&mut self, id: ObjectId, flags: ObjectFlags) {
        self.validate(id);
        self.flags[id.idx as usize] = flags;
        self.mark_dirty(id.idx);
    }

    /// Returns whether the object needs redrawing.
    #[must_use]
    pub fn is_dirty(&self, id: ObjectId) -> bool {
        self.validate(id);
        self.dirty_flag[id.idx as usize]
    }

    /// Clears the dirty flag of an object, as after redrawing its cache.
    pub fn clear_dirty(&mut self, id: ObjectId) {
        self.validate(id);
        self.dirty_flag[id.idx as usize] = false;
    }

    /// Clears the dirty flag of every object.
    pub fn clear_all_dirty(&mut self) {
        self.dirty_flag.fill(false);
    }

    // -- Canvas API --

    /// Puts a root object on top of the canvas stack.
    ///
    /// Returns `false` if the object belongs to a container or clips one, or
    /// is already on the canvas.
    pub fn attach(&mut self, id: ObjectId) -> bool {
        self.validate(id);
        let idx = id.idx;
        if self.owner[idx as usize] != INVALID
            || self.clip_host[idx as usize] != INVALID
            || self.canvas.contains(&idx)
        {
            return false;
        }
        self.canvas.push(idx);
        self.set_canvas_flag(idx, true);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        true
    }

    /// Takes a root object off the canvas stack.
    pub fn detach(&mut self, id: ObjectId) -> bool {
        self.validate(id);
        let idx = id.idx;
        if !collection::remove(&mut self.canvas, idx) {
            return false;
        }
        self.set_canvas_flag(idx, false);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        true
    }

    /// Returns an iterator over the canvas stack, back to front.
    #[must_use]
    pub fn canvas_objects(&self) -> Objects<'_> {
        Objects::new(self, &self.canvas)
    }

    /// Returns whether the object is (transitively) on the canvas.
    #[must_use]
    pub fn is_on_canvas(&self, id: ObjectId) -> bool {
        self.validate(id);
        self.on_canvas[id.idx as usize]
    }

    // -- Observers --

    /// Registers an observer.
    pub fn add_observer(&mut self, observer: Box<dyn SceneObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    /// Unregisters an observer and hands it back.
    pub fn remove_observer(&mut self, id: ObserverId) -> Option<Box<dyn SceneObserver>> {
        let index = self.observers.iter().position(|(i, _)| *i == id)?;
        Some(self.observers.remove(index).1)
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: ObjectId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ObjectId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    pub(crate) fn id_at(&self, idx: u32) -> ObjectId {
        ObjectId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    fn slot_id(&self, idx: u32) -> Option<ObjectId> {
        (idx != INVALID).then(|| self.id_at(idx))
    }

    pub(crate) fn allocate(
        &mut self,
        geometry: Geometry,
        content: Option<Box<dyn Shape>>,
        container: Option<ContainerState>,
    ) -> u32 {
        let own_matrix = geometry.own_matrix();
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.geometry[i] = geometry;
            self.content[i] = content;
            self.flags[i] = ObjectFlags::default();
            self.own_matrix[i] = own_matrix;
            self.corners[i] = None;
            self.owner[i] = INVALID;
            self.selection[i] = INVALID;
            self.clip_host[i] = INVALID;
            self.container[i] = container;
            self.dirty_flag[i] = true;
            self.on_canvas[i] = false;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.geometry.push(geometry);
            self.content.push(content);
            self.flags.push(ObjectFlags::default());
            self.own_matrix.push(own_matrix);
            self.corners.push(None);
            self.owner.push(INVALID);
            self.selection.push(INVALID);
            self.clip_host.push(INVALID);
            self.container.push(container);
            self.dirty_flag.push(true);
            self.on_canvas.push(false);
            self.generation.push(0);
            idx
        };

        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        self.dirty.mark(idx, dirty::CACHE);
        idx
    }

    /// Releases a slot. Relations must already be torn down.
    pub(crate) fn free_slot(&mut self, idx: u32) {
        let i = idx as usize;
        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[i] = self.generation[i].wrapping_add(1);
        self.content[i] = None;
        self.container[i] = None;
        self.owner[i] = INVALID;
        self.selection[i] = INVALID;
        self.clip_host[i] = INVALID;
        self.on_canvas[i] = false;

        self.free_list.push(idx);
        self.pending_removed.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
    }

    pub(crate) fn is_container_at(&self, idx: u32) -> bool {
        self.container[idx as usize].is_some()
    }

    pub(crate) fn kind_at(&self, idx: u32) -> Option<ContainerKind> {
        self.container[idx as usize].as_ref().map(|state| state.kind)
    }

    pub(crate) fn state(&self, idx: u32) -> Option<&ContainerState> {
        self.container[idx as usize].as_ref()
    }

    pub(crate) fn state_mut(&mut self, idx: u32) -> Option<&mut ContainerState> {
        self.container[idx as usize].as_mut()
    }

    pub(crate) fn effective_group_at(&self, idx: u32) -> u32 {
        let selection = self.selection[idx as usize];
        if selection != INVALID {
            selection
        } else {
            self.owner[idx as usize]
        }
    }

    /// The object whose plane `idx`'s geometry is expressed in.
    pub(crate) fn plane_parent(&self, idx: u32) -> u32 {
        let group = self.effective_group_at(idx);
        if group != INVALID {
            return group;
        }
        let host = self.clip_host[idx as usize];
        if host != INVALID && !self.flags[idx as usize].absolute_positioned {
            return host;
        }
        INVALID
    }

    /// The persistent parent of `idx`: its owner, or the container it clips.
    pub(crate) fn structural_parent(&self, idx: u32) -> u32 {
        let owner = self.owner[idx as usize];
        if owner != INVALID {
            owner
        } else {
            self.clip_host[idx as usize]
        }
    }

    pub(crate) fn world_at(&self, idx: u32) -> Affine {
        let mut matrix = self.own_matrix[idx as usize];
        let mut parent = self.plane_parent(idx);
        while parent != INVALID {
            matrix = self.own_matrix[parent as usize] * matrix;
            parent = self.plane_parent(parent);
        }
        matrix
    }

    /// Stores geometry and refreshes the cached own matrix. No invalidation.
    pub(crate) fn write_geometry(&mut self, idx: u32, geometry: Geometry) {
        self.geometry[idx as usize] = geometry;
        self.own_matrix[idx as usize] = geometry.own_matrix();
        self.dirty.mark(idx, dirty::GEOMETRY);
    }

    pub(crate) fn apply_matrix_at(&mut self, idx: u32, matrix: Affine) {
        let mut geometry = self.geometry[idx as usize];
        geometry.apply_matrix(matrix);
        self.write_geometry(idx, geometry);
    }

    pub(crate) fn set_geometry_at(&mut self, idx: u32, patch: GeometryPatch) -> bool {
        let mut geometry = self.geometry[idx as usize];
        if !patch.apply(&mut geometry) {
            return false;
        }
        self.write_geometry(idx, geometry);
        self.mark_dirty(idx);
        true
    }

    pub(crate) fn modify_at(&mut self, idx: u32, patch: GeometryPatch) -> bool {
        if !self.set_geometry_at(idx, patch) {
            return false;
        }
        self.notify_at(idx, Signal::Modified);
        true
    }

    pub(crate) fn set_coords_at(&mut self, idx: u32) {
        let geometry = self.geometry[idx as usize];
        let world = self.world_at(idx);
        let hx = (geometry.width + geometry.stroke_width) / 2.0;
        let hy = (geometry.height + geometry.stroke_width) / 2.0;
        self.corners[idx as usize] = Some([
            world * Point::new(-hx, -hy),
            world * Point::new(hx, -hy),
            world * Point::new(hx, hy),
            world * Point::new(-hx, hy),
        ]);
    }

    /// Sets the canvas flag of `idx` and everything a group holds.
    pub(crate) fn set_canvas_flag(&mut self, idx: u32, on: bool) {
        self.on_canvas[idx as usize] = on;
        let Some(state) = self.state(idx) else {
            return;
        };
        if state.kind == ContainerKind::Selection {
            return;
        }
        let mut nested = state.objects.clone();
        if state.clip_path != INVALID {
            nested.push(state.clip_path);
        }
        trace!(container = idx, on, members = nested.len(), "canvas flag");
        for member in nested {
            self.set_canvas_flag(member, on);
        }
    }

    pub(crate) fn emit(&mut self, mut f: impl FnMut(&mut dyn SceneObserver)) {
        for (_, observer) in &mut self.observers {
            f(observer.as_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RectShape;

    fn rect(scene: &mut Scene, left: f64, top: f64, width: f64, height: f64) -> ObjectId {
        scene.create_object(
            Box::new(RectShape::default()),
            Geometry::sized(left, top, width, height),
        )
    }

    #[test]
    fn create_and_destroy() {
        let mut scene = Scene::new();
        let id = rect(&mut scene, 0.0, 0.0, 1.0, 1.0);
        assert!(scene.is_alive(id));
        scene.destroy_object(id);
        assert!(!scene.is_alive(id));
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut scene = Scene::new();
        let id1 = rect(&mut scene, 0.0, 0.0, 1.0, 1.0);
        scene.destroy_object(id1);
        let id2 = rect(&mut scene, 0.0, 0.0, 1.0, 1.0);
        assert!(!scene.is_alive(id1));
        assert!(scene.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    #[should_panic(expected = "stale ObjectId")]
    fn destroyed_handle_panics_on_geometry() {
        let mut scene = Scene::new();
        let id = rect(&mut scene, 0.0, 0.0, 1.0, 1.0);
        scene.destroy_object(id);
        let _ = scene.geometry(id);
    }

    #[test]
    fn set_geometry_refreshes_matrix_and_dirties() {
        let mut scene = Scene::new();
        let id = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        scene.clear_dirty(id);
        assert!(!scene.set_geometry(id, GeometryPatch::position(0.0, 0.0)));
        assert!(!scene.is_dirty(id));
        assert!(scene.set_geometry(id, GeometryPatch::position(10.0, 0.0)));
        assert!(scene.is_dirty(id));
        assert_eq!(scene.transform(id).translation(), Vec2::new(15.0, 5.0));
    }

    #[test]
    fn coords_are_world_corners() {
        let mut scene = Scene::new();
        let id = rect(&mut scene, 10.0, 20.0, 4.0, 2.0);
        scene.set_coords(id);
        let corners = scene.corners(id).unwrap();
        assert_eq!(corners[0], Point::new(10.0, 20.0));
        assert_eq!(corners[2], Point::new(14.0, 22.0));
    }

    #[test]
    fn attach_and_detach() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0, 0.0, 1.0, 1.0);
        let b = rect(&mut scene, 0.0, 0.0, 1.0, 1.0);
        assert!(scene.attach(a));
        assert!(scene.attach(b));
        assert!(!scene.attach(a));
        assert_eq!(scene.canvas_objects().collect::<Vec<_>>(), [a, b]);
        assert!(scene.is_on_canvas(a));
        assert!(scene.detach(a));
        assert!(!scene.is_on_canvas(a));
        assert_eq!(scene.canvas_objects().collect::<Vec<_>>(), [b]);
    }

    #[test]
    fn observers_can_be_removed() {
        struct Nop;
        impl SceneObserver for Nop {}

        let mut scene = Scene::new();
        let first = scene.add_observer(Box::new(Nop));
        let second = scene.add_observer(Box::new(Nop));
        assert_ne!(first, second);
        assert!(scene.remove_observer(first).is_some());
        assert!(scene.remove_observer(first).is_none());
        assert_eq!(scene.observers.len(), 1);
    }
}
