// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Running layout passes against the scene.

use kurbo::{Affine, Point, Size, Vec2};
use tracing::{debug, warn};

use super::{
    ClipInput, ExplicitBox, LayoutContext, LayoutInput, LayoutMode, LayoutResult, LayoutTrigger,
    compute_layout,
};
use crate::dirty;
use crate::geometry::{
    GeometryPatch, OriginX, OriginY, bounds_in_plane, inverse_transform_vector, invert,
};
use crate::id::INVALID;
use crate::observer::{LayoutEvent, SkipReason};
use crate::scene::Scene;

impl Scene {
    /// Runs one layout pass on container `idx`, then bubbles.
    pub(crate) fn perform_layout(&mut self, idx: u32, mut ctx: LayoutContext) {
        let id = self.id_at(idx);
        let trigger = ctx.trigger;
        let skip = match self.state(idx) {
            None => Some(SkipReason::Disposed),
            Some(state) if !state.first_layout_done && trigger != LayoutTrigger::Initialization => {
                Some(SkipReason::BeforeFirstLayout)
            }
            Some(state) if state.layout_in_progress => Some(SkipReason::Reentrant),
            Some(_) => None,
        };
        if let Some(reason) = skip {
            match reason {
                SkipReason::Disposed => {
                    warn!(container = ?id, ?trigger, "layout requested on a disposed container");
                }
                SkipReason::BeforeFirstLayout | SkipReason::Reentrant => {
                    debug!(container = ?id, ?trigger, ?reason, "layout request dropped");
                }
            }
            self.emit(|observer| observer.on_layout_skipped(id, trigger, reason));
            return;
        }

        let Some(mode) = self.begin_pass(idx) else {
            return;
        };
        let input = self.layout_input(idx, &ctx);
        let result = compute_layout(mode, &input, &ctx);
        if let Some(result) = result {
            self.apply_layout(idx, mode, &input, result, &ctx);
        }
        if trigger == LayoutTrigger::Initialization
            && let Some(state) = self.state_mut(idx)
        {
            state.first_layout_done = true;
            state.explicit = ExplicitBox::default();
            if state.layout == LayoutMode::SvgImport {
                state.layout = LayoutMode::FitContent;
            }
        }
        if result.is_some() || trigger == LayoutTrigger::Initialization {
            self.stretch_fill_parent(idx);
        }
        self.end_pass(idx);

        debug!(container = ?id, ?trigger, ?result, depth = ctx.path.len(), "layout");
        let event = LayoutEvent {
            container: id,
            trigger,
            result,
            path: ctx.path.clone(),
        };
        self.emit(|observer| observer.on_layout(&event));

        if !ctx.bubbles {
            return;
        }
        ctx.path.push(id);
        let next = if trigger == LayoutTrigger::Progress {
            LayoutTrigger::Progress
        } else {
            LayoutTrigger::ObjectModified
        };
        for parent in [self.selection[idx as usize], self.owner[idx as usize]] {
            if parent == INVALID {
                continue;
            }
            let mut up = LayoutContext::new(next).with_targets(vec![id]);
            up.path.clone_from(&ctx.path);
            self.perform_layout(parent, up);
        }
    }

    /// Raises the re-entrancy guard and returns the current mode.
    fn begin_pass(&mut self, idx: u32) -> Option<LayoutMode> {
        let state = self.state_mut(idx)?;
        state.layout_in_progress = true;
        Some(state.layout)
    }

    /// Lowers the re-entrancy guard and refreshes derived state.
    fn end_pass(&mut self, idx: u32) {
        let sub_target_check = match self.state_mut(idx) {
            Some(state) => {
                state.layout_in_progress = false;
                state.sub_target_check
            }
            None => false,
        };
        self.set_coords_at(idx);
        if sub_target_check {
            let members = self.state(idx).map(|s| s.objects.clone()).unwrap_or_default();
            for member in members {
                self.set_coords_at(member);
            }
        }
        self.mark_dirty(idx);
    }

    /// Captures everything the layout strategies need.
    pub(crate) fn layout_input(&self, idx: u32, ctx: &LayoutContext) -> LayoutInput {
        let Some(state) = self.state(idx) else {
            return LayoutInput::empty();
        };
        let geometry = self.geometry[idx as usize];
        let init = ctx.trigger == LayoutTrigger::Initialization;
        let to_local = invert(self.world_at(idx));

        let mut child_bounds = Vec::with_capacity(state.objects.len());
        let mut added_bounds = Vec::new();
        for &member in &state.objects {
            if self.flags[member as usize].fill_parent {
                continue;
            }
            let matrix = if init || self.plane_parent(member) == idx {
                self.own_matrix[member as usize]
            } else {
                to_local * self.world_at(member)
            };
            let g = self.geometry[member as usize];
            let bounds = bounds_in_plane(matrix, g.width, g.height, g.stroke_width);
            child_bounds.push(bounds);
            if ctx.trigger == LayoutTrigger::Added
                && ctx.targets.iter().any(|target| target.idx == member)
            {
                added_bounds.push(bounds);
            }
        }

        LayoutInput {
            center: geometry.center(),
            matrix: self.own_matrix[idx as usize],
            size: Size::new(geometry.width, geometry.height),
            explicit: if init {
                state.explicit
            } else {
                ExplicitBox::default()
            },
            child_bounds,
            added_bounds,
            child_count: state.objects.len(),
            clip: self.clip_input(idx, state.clip_path),
        }
    }

    fn clip_input(&self, idx: u32, clip: u32) -> Option<ClipInput> {
        if clip == INVALID {
            return None;
        }
        let g = self.geometry[clip as usize];
        if self.flags[clip as usize].absolute_positioned {
            let parent = self.plane_parent(idx);
            let to_parent = if parent == INVALID {
                Affine::IDENTITY
            } else {
                invert(self.world_at(parent))
            };
            let matrix = to_parent * self.own_matrix[clip as usize];
            let bounds = bounds_in_plane(matrix, g.width, g.height, g.stroke_width);
            Some(ClipInput {
                absolute: true,
                center_in_parent: matrix * Point::ZERO,
                local_center: Point::ZERO,
                size: bounds.size(),
            })
        } else {
            let bounds =
                bounds_in_plane(self.own_matrix[clip as usize], g.width, g.height, g.stroke_width);
            Some(ClipInput {
                absolute: false,
                center_in_parent: Point::ZERO,
                local_center: g.center(),
                size: bounds.size(),
            })
        }
    }

    /// Moves and resizes the container, then shifts its members back so that
    /// their canvas-plane position is unchanged.
    fn apply_layout(
        &mut self,
        idx: u32,
        mode: LayoutMode,
        input: &LayoutInput,
        result: LayoutResult,
        ctx: &LayoutContext,
    ) {
        let init = ctx.trigger == LayoutTrigger::Initialization;
        let previous = if init { Point::ZERO } else { input.center };
        let mut delta = previous - result.center + result.correction;
        if !init {
            delta = inverse_transform_vector(input.matrix, delta);
        }

        // The container moves first: member offsets are expressed in its new
        // frame.
        let mut geometry = self.geometry[idx as usize];
        geometry.width = result.size.width;
        geometry.height = result.size.height;
        if init && mode == LayoutMode::SvgImport {
            geometry.origin_x = OriginX::Left;
            geometry.origin_y = OriginY::Top;
        }
        geometry.set_position_by_origin(result.center, OriginX::Center, OriginY::Center);
        if init {
            if let Some(left) = input.explicit.left {
                geometry.left = left;
            }
            if let Some(top) = input.explicit.top {
                geometry.top = top;
            }
        }
        self.write_geometry(idx, geometry);

        let (members, clip) = match self.state(idx) {
            Some(state) => (state.objects.clone(), state.clip_path),
            None => return,
        };
        if !ctx.objects_relative && delta != Vec2::ZERO {
            for member in members {
                if self.effective_group_at(member) == idx {
                    self.shift_member(member, delta);
                }
            }
        }

        if clip != INVALID && !self.flags[clip as usize].absolute_positioned {
            if init && mode == LayoutMode::ClipPath {
                let center = self.geometry[clip as usize].center();
                self.shift_member(clip, Point::ZERO - center);
            } else if delta != Vec2::ZERO {
                self.shift_member(clip, delta);
            }
        }
    }

    /// Translates a member within its container plane.
    ///
    /// Fill-parent containers are re-centred by the stretch step, so their
    /// members absorb the shift instead. Other nested containers move with
    /// their frame and the walk continues through everything they hold.
    fn shift_member(&mut self, member: u32, delta: Vec2) {
        if self.flags[member as usize].fill_parent
            && let Some(state) = self.state(member)
        {
            let nested = state.objects.clone();
            let local = inverse_transform_vector(self.own_matrix[member as usize], delta);
            for child in nested {
                if self.effective_group_at(child) == member {
                    self.shift_member(child, local);
                }
            }
            return;
        }
        let mut geometry = self.geometry[member as usize];
        geometry.left += delta.x;
        geometry.top += delta.y;
        self.write_geometry(member, geometry);
        if self.corners[member as usize].is_some() {
            self.set_coords_at(member);
        }
        self.refresh_nested(member);
    }

    /// Marks everything expressed in the plane of `idx` as moved, recursively,
    /// and refreshes corners that were already cached.
    fn refresh_nested(&mut self, idx: u32) {
        let Some(state) = self.state(idx) else {
            return;
        };
        let mut nested = state.objects.clone();
        if state.clip_path != INVALID {
            nested.push(state.clip_path);
        }
        for child in nested {
            if self.plane_parent(child) != idx {
                continue;
            }
            self.dirty.mark(child, dirty::GEOMETRY);
            if self.corners[child as usize].is_some() {
                self.set_coords_at(child);
            }
            self.mark_dirty(child);
            self.refresh_nested(child);
        }
    }

    /// Sizes fill-parent members to the container and centers them.
    fn stretch_fill_parent(&mut self, idx: u32) {
        let Some(state) = self.state(idx) else {
            return;
        };
        let fillers: Vec<u32> = state
            .objects
            .iter()
            .copied()
            .filter(|&member| self.flags[member as usize].fill_parent)
            .collect();
        if fillers.is_empty() {
            return;
        }
        let size = Size::new(self.geometry[idx as usize].width, self.geometry[idx as usize].height);
        for member in fillers {
            let mut target = self.geometry[member as usize];
            target.width = size.width;
            target.height = size.height;
            target.set_position_by_origin(Point::ZERO, OriginX::Center, OriginY::Center);
            let patch = GeometryPatch {
                left: Some(target.left),
                top: Some(target.top),
                ..GeometryPatch::size(size.width, size.height)
            };
            // Raises a member signal while this container's guard is up.
            self.modify_at(member, patch);
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::RefCell;
    use std::rc::Rc;

    use kurbo::Rect;

    use super::*;
    use crate::container::ContainerOptions;
    use crate::content::RectShape;
    use crate::geometry::Geometry;
    use crate::id::ObjectId;
    use crate::layout::LayoutOverrides;
    use crate::observer::SceneObserver;
    use crate::scene::ObjectFlags;

    #[derive(Default)]
    struct Log {
        layouts: Vec<(ObjectId, LayoutTrigger, Vec<ObjectId>)>,
        skipped: Vec<(ObjectId, SkipReason)>,
    }

    struct Recorder(Rc<RefCell<Log>>);

    impl SceneObserver for Recorder {
        fn on_layout(&mut self, event: &LayoutEvent) {
            self.0
                .borrow_mut()
                .layouts
                .push((event.container, event.trigger, event.path.clone()));
        }

        fn on_layout_skipped(&mut self, container: ObjectId, _: LayoutTrigger, reason: SkipReason) {
            self.0.borrow_mut().skipped.push((container, reason));
        }
    }

    fn rect(scene: &mut Scene, left: f64, top: f64, width: f64, height: f64) -> ObjectId {
        scene.create_object(
            Box::new(RectShape::default()),
            Geometry::sized(left, top, width, height),
        )
    }

    fn observed(scene: &mut Scene) -> Rc<RefCell<Log>> {
        let log = Rc::new(RefCell::new(Log::default()));
        scene.add_observer(Box::new(Recorder(Rc::clone(&log))));
        log
    }

    #[test]
    fn bubbling_reaches_every_ancestor_with_a_path() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        let inner = scene.create_container(&[a], ContainerOptions::default()).unwrap();
        let outer = scene
            .create_container(&[inner], ContainerOptions::default())
            .unwrap();
        let log = observed(&mut scene);

        let g = scene.geometry(a);
        scene.modify(a, GeometryPatch::size(g.width * 2.0, g.height));

        let layouts = &log.borrow().layouts;
        assert_eq!(
            *layouts,
            [
                (inner, LayoutTrigger::ObjectModified, vec![]),
                (outer, LayoutTrigger::ObjectModified, vec![inner]),
            ]
        );
        assert_eq!(scene.geometry(outer).width, 20.0);
    }

    #[test]
    fn nested_world_positions_survive_growth() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        let b = rect(&mut scene, 30.0, 0.0, 10.0, 10.0);
        let inner = scene.create_container(&[a], ContainerOptions::default()).unwrap();
        let outer = scene
            .create_container(&[inner, b], ContainerOptions::default())
            .unwrap();
        let world_a = scene.world_transform(a) * Point::ZERO;
        let world_b = scene.world_transform(b) * Point::ZERO;

        let c = rect(&mut scene, -50.0, -50.0, 10.0, 10.0);
        scene.add(inner, &[c]);
        let near = |p: Point, q: Point| (p - q).hypot() < 1e-9;
        assert!(near(scene.world_transform(a) * Point::ZERO, world_a));
        assert!(near(scene.world_transform(b) * Point::ZERO, world_b));
        assert_eq!(scene.geometry(outer).width, 90.0);
    }

    #[test]
    fn shifts_reach_members_of_nested_groups() {
        let mut scene = Scene::new();
        let r = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        let s = rect(&mut scene, 30.0, 0.0, 10.0, 10.0);
        let inner = scene.create_container(&[r], ContainerOptions::default()).unwrap();
        let outer = scene
            .create_container(&[inner, s], ContainerOptions::default())
            .unwrap();
        assert_eq!(scene.center(inner), Point::new(-15.0, 0.0));
        scene.set_coords(r);
        scene.clear_all_dirty();
        let _ = scene.evaluate();

        scene.modify(
            s,
            GeometryPatch {
                left: Some(30.0),
                ..GeometryPatch::default()
            },
        );
        assert_eq!(scene.center(outer), Point::new(30.0, 5.0));
        assert_eq!(scene.center(inner), Point::new(-25.0, 0.0));

        let g = scene.geometry(r);
        assert_eq!((g.left, g.top), (-5.0, -5.0));
        assert_eq!(scene.world_transform(r) * Point::ZERO, Point::new(5.0, 5.0));
        assert_eq!(
            scene.corners(r),
            Some([
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ])
        );
        assert!(scene.is_dirty(r));
        assert!(scene.evaluate().geometry.contains(&r.index()));
    }

    #[test]
    fn progress_keeps_geometry_and_dirties() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        let group = scene.create_container(&[a], ContainerOptions::default()).unwrap();
        scene.set_geometry(a, GeometryPatch::size(50.0, 50.0));
        let before = scene.geometry(group);
        scene.clear_all_dirty();
        for _ in 0..3 {
            scene.progress(group);
        }
        assert_eq!(scene.geometry(group), before);
        assert!(scene.is_dirty(group));
    }

    #[test]
    fn fill_parent_member_is_stretched_without_reentry() {
        let mut scene = Scene::new();
        let background = rect(&mut scene, 0.0, 0.0, 1.0, 1.0);
        scene.set_flags(
            background,
            ObjectFlags {
                fill_parent: true,
                ..ObjectFlags::default()
            },
        );
        let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        let b = rect(&mut scene, 30.0, 10.0, 10.0, 10.0);
        let log = observed(&mut scene);
        let group = scene
            .create_container(&[background, a, b], ContainerOptions::default())
            .unwrap();

        let g = scene.geometry(background);
        assert_eq!((g.width, g.height), (40.0, 20.0));
        assert_eq!(scene.center(background), Point::ZERO);
        assert_eq!(scene.geometry(group).width, 40.0);
        assert_eq!(log.borrow().skipped, [(group, SkipReason::Reentrant)]);
    }

    #[test]
    fn requests_before_initialization_are_dropped() {
        let mut scene = Scene::new();
        let log = observed(&mut scene);
        let group = scene.create_container(&[], ContainerOptions::default()).unwrap();
        let idx = group.idx;
        if let Some(state) = scene.state_mut(idx) {
            state.first_layout_done = false;
        }
        scene.trigger_layout(group, None);
        assert_eq!(log.borrow().skipped, [(group, SkipReason::BeforeFirstLayout)]);
    }

    #[test]
    fn absolute_clip_path_drives_the_box() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        let clip = rect(&mut scene, 40.0, 40.0, 20.0, 20.0);
        scene.set_flags(
            clip,
            ObjectFlags {
                absolute_positioned: true,
                ..ObjectFlags::default()
            },
        );
        let group = scene
            .create_container(
                &[a],
                ContainerOptions::new(LayoutMode::ClipPath).with_clip_path(clip),
            )
            .unwrap();
        assert_eq!(scene.center(group), Point::new(50.0, 50.0));
        let g = scene.geometry(group);
        assert_eq!((g.width, g.height), (20.0, 20.0));
        assert_eq!(scene.world_transform(a) * Point::ZERO, Point::new(5.0, 5.0));
    }

    #[test]
    fn relative_clip_is_recentred_on_initialization() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0, 0.0, 20.0, 20.0);
        let clip = rect(&mut scene, 0.0, -10.0, 10.0, 10.0);
        let group = scene
            .create_container(
                &[a],
                ContainerOptions::new(LayoutMode::ClipPath).with_clip_path(clip),
            )
            .unwrap();
        assert_eq!(scene.center(group), Point::new(15.0, 5.0));
        assert_eq!(scene.center(clip), Point::ZERO);
        assert_eq!(scene.geometry(group).width, 10.0);
    }

    #[test]
    fn svg_import_becomes_fit_content() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 10.0, 20.0, 10.0, 10.0);
        let group = scene
            .create_container(&[a], ContainerOptions::new(LayoutMode::SvgImport))
            .unwrap();
        assert_eq!(scene.layout_mode(group), Some(LayoutMode::FitContent));
        let g = scene.geometry(group);
        assert_eq!((g.left, g.top), (10.0, 20.0));
        assert_eq!(g.origin_x, OriginX::Left);
    }

    #[test]
    fn correction_shifts_members() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        let group = scene
            .create_container(&[a], ContainerOptions::new(LayoutMode::Fixed))
            .unwrap();
        scene.trigger_layout(
            group,
            Some(LayoutOverrides {
                correction: Some(Vec2::new(3.0, 0.0)),
                ..LayoutOverrides::default()
            }),
        );
        assert_eq!(scene.center(group), Point::new(5.0, 5.0));
        assert_eq!(scene.center(a), Point::new(3.0, 0.0));
    }

    #[test]
    fn layout_input_reports_selected_members_in_owner_plane() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        let b = rect(&mut scene, 20.0, 0.0, 10.0, 10.0);
        let group = scene
            .create_container(&[a, b], ContainerOptions::default())
            .unwrap();
        scene.create_selection(&[b]);
        let input = scene.layout_input(group.idx, &LayoutContext::new(LayoutTrigger::Removed));
        let near = |r: Rect, s: Rect| {
            (r.x0 - s.x0).abs() < 1e-9
                && (r.y0 - s.y0).abs() < 1e-9
                && (r.x1 - s.x1).abs() < 1e-9
                && (r.y1 - s.y1).abs() < 1e-9
        };
        assert!(near(input.child_bounds[1], Rect::new(5.0, -5.0, 15.0, 5.0)));
    }
}
