// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end container behavior through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Affine, Point};
use lamina_core::container::ContainerOptions;
use lamina_core::content::RectShape;
use lamina_core::geometry::{Geometry, GeometryPatch};
use lamina_core::layout::{LayoutMode, LayoutTrigger};
use lamina_core::observer::{LayoutEvent, SceneObserver, SkipReason};
use lamina_core::scene::{ObjectFlags, Scene};
use lamina_core::{ObjectId, SceneError};

fn rect(scene: &mut Scene, left: f64, top: f64, width: f64, height: f64) -> ObjectId {
    scene.create_object(
        Box::new(RectShape::default()),
        Geometry::sized(left, top, width, height),
    )
}

fn assert_near(a: Point, b: Point) {
    assert!((a - b).hypot() < 1e-6, "{a:?} != {b:?}");
}

fn assert_affine_near(a: Affine, b: Affine) {
    for (x, y) in a.as_coeffs().iter().zip(b.as_coeffs()) {
        assert!((x - y).abs() < 1e-6, "{a:?} != {b:?}");
    }
}

#[derive(Default)]
struct Events {
    layouts: Vec<(ObjectId, LayoutTrigger)>,
    skipped: Vec<(ObjectId, LayoutTrigger, SkipReason)>,
}

struct Recorder(Rc<RefCell<Events>>);

impl SceneObserver for Recorder {
    fn on_layout(&mut self, event: &LayoutEvent) {
        self.0
            .borrow_mut()
            .layouts
            .push((event.container, event.trigger));
    }

    fn on_layout_skipped(&mut self, container: ObjectId, trigger: LayoutTrigger, reason: SkipReason) {
        self.0
            .borrow_mut()
            .skipped
            .push((container, trigger, reason));
    }
}

fn record(scene: &mut Scene) -> Rc<RefCell<Events>> {
    let events = Rc::new(RefCell::new(Events::default()));
    scene.add_observer(Box::new(Recorder(Rc::clone(&events))));
    events
}

/// The two-rectangle group used by the first scenarios.
fn two_rect_group(scene: &mut Scene) -> (ObjectId, ObjectId, ObjectId) {
    let a = rect(scene, 10.0, -30.0, 30.0, 10.0);
    let b = rect(scene, -40.0, -10.0, 10.0, 40.0);
    let group = scene
        .create_container(&[a, b], ContainerOptions::new(LayoutMode::FitContent))
        .unwrap();
    (group, a, b)
}

#[test]
fn fit_content_measures_the_union_of_members() {
    let mut scene = Scene::new();
    let (group, a, _) = two_rect_group(&mut scene);
    let g = scene.geometry(group);
    assert_eq!((g.width, g.height), (80.0, 60.0));
    assert_eq!(scene.center(group), Point::ZERO);
    // The group is centered on the canvas origin, so local and canvas
    // coordinates agree.
    assert_eq!(scene.geometry(a).left, 10.0);
    assert_eq!(scene.geometry(a).top, -30.0);
}

#[test]
fn added_member_grows_the_group() {
    let mut scene = Scene::new();
    let (group, a, _) = two_rect_group(&mut scene);
    let events = record(&mut scene);
    let world_a = scene.world_transform(a);

    let c = rect(&mut scene, 0.0, 0.0, 100.0, 100.0);
    let change = scene.add_relative(group, &[c]);
    assert_eq!(change.accepted, [c]);

    let g = scene.geometry(group);
    assert_eq!((g.width, g.height), (140.0, 130.0));
    assert_eq!(scene.center(group), Point::new(30.0, 35.0));
    assert_eq!(events.borrow().layouts, [(group, LayoutTrigger::Added)]);
    assert_affine_near(scene.world_transform(a), world_a);
}

#[test]
fn selection_layers_over_ownership() {
    let mut scene = Scene::new();
    let (group, a, b) = two_rect_group(&mut scene);
    scene.attach(group);

    let sel = scene.create_selection(&[a, b]);
    for object in [a, b] {
        assert_eq!(scene.owner(object), Some(group));
        assert_eq!(scene.selection(object), Some(sel));
    }
    assert_eq!(scene.objects(group).collect::<Vec<_>>(), [a, b]);

    scene.dispose_selection(sel).unwrap();
    for object in [a, b] {
        assert_eq!(scene.owner(object), Some(group));
        assert_eq!(scene.selection(object), None);
        assert_eq!(scene.effective_group(object), Some(group));
    }
    let g = scene.geometry(group);
    assert!((g.width - 80.0).abs() < 1e-9);
}

#[test]
fn absolute_clip_path_sets_center_and_size() {
    let mut scene = Scene::new();
    let clip = rect(&mut scene, 40.0, 40.0, 20.0, 20.0);
    scene.set_flags(
        clip,
        ObjectFlags {
            absolute_positioned: true,
            ..ObjectFlags::default()
        },
    );
    let member = rect(&mut scene, 0.0, 0.0, 5.0, 5.0);
    let clipped = scene
        .create_container(
            &[member],
            ContainerOptions::new(LayoutMode::ClipPath).with_clip_path(clip),
        )
        .unwrap();
    assert_eq!(scene.center(clipped), Point::new(50.0, 50.0));
    let g = scene.geometry(clipped);
    assert_eq!((g.width, g.height), (20.0, 20.0));

    // Nested in a rotated container, the center is expressed in that plane.
    let other = rect(&mut scene, 200.0, 0.0, 10.0, 10.0);
    let outer = scene
        .create_container(&[other], ContainerOptions::default().with_angle(30.0))
        .unwrap();
    scene.add(outer, &[clipped]);
    scene.trigger_layout(clipped, None);
    let expected = scene.world_transform(outer).inverse() * Point::new(50.0, 50.0);
    assert_near(scene.center(clipped), expected);
}

#[test]
fn layout_change_fires_once() {
    let mut scene = Scene::new();
    let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = rect(&mut scene, 50.0, 0.0, 10.0, 10.0);
    let group = scene
        .create_container(
            &[a, b],
            ContainerOptions::new(LayoutMode::Fixed).sized(300.0, 300.0),
        )
        .unwrap();
    let events = record(&mut scene);

    assert!(scene.set_layout_mode(group, LayoutMode::FitContent));
    assert!(!scene.set_layout_mode(group, LayoutMode::FitContent));
    let changes = events
        .borrow()
        .layouts
        .iter()
        .filter(|(_, trigger)| *trigger == LayoutTrigger::LayoutChange)
        .count();
    assert_eq!(changes, 1);
    assert_eq!(scene.geometry(group).width, 60.0);
}

#[test]
fn single_ownership_holds_across_moves() {
    let mut scene = Scene::new();
    let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let first = scene.create_container(&[a], ContainerOptions::default()).unwrap();
    let second = scene.create_container(&[], ContainerOptions::default()).unwrap();

    scene.add(second, &[a]);
    assert_eq!(scene.owner(a), Some(second));
    assert_eq!(scene.objects(first).count(), 0);
    assert_eq!(scene.objects(second).collect::<Vec<_>>(), [a]);
}

#[test]
fn transitive_cycles_are_rejected_and_leave_the_tree_alone() {
    let mut scene = Scene::new();
    let leaf = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let c1 = scene.create_container(&[leaf], ContainerOptions::default()).unwrap();
    let c2 = scene.create_container(&[c1], ContainerOptions::default()).unwrap();
    let c3 = scene.create_container(&[c2], ContainerOptions::default()).unwrap();
    let before = scene.geometry(c1);

    let change = scene.add(c1, &[c3]);
    assert_eq!(
        change.rejected,
        [(
            c3,
            SceneError::Cycle {
                container: c1,
                object: c3
            }
        )]
    );
    assert_eq!(scene.owner(c3), None);
    assert_eq!(scene.owner(c2), Some(c3));
    assert_eq!(scene.geometry(c1), before);
}

#[test]
fn enter_then_exit_restores_the_world_transform() {
    let mut scene = Scene::new();
    let anchor = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let container = scene
        .create_container(
            &[anchor],
            ContainerOptions::default().with_angle(37.0),
        )
        .unwrap();
    scene.set_geometry(
        container,
        GeometryPatch {
            scale_x: Some(2.0),
            skew_x: Some(10.0),
            ..GeometryPatch::default()
        },
    );
    let object = scene.create_object(
        Box::new(RectShape::default()),
        Geometry::sized(80.0, -20.0, 15.0, 25.0).with_angle(-12.0),
    );
    let world = scene.world_transform(object);

    scene.add(container, &[object]);
    assert_affine_near(scene.world_transform(object), world);
    scene.remove(container, &[object]);
    assert_affine_near(scene.world_transform(object), world);
}

#[test]
fn progress_never_moves_the_container() {
    let mut scene = Scene::new();
    let (group, a, _) = two_rect_group(&mut scene);
    scene.set_geometry(a, GeometryPatch::size(500.0, 500.0));
    let before = scene.geometry(group);
    for _ in 0..10 {
        scene.clear_all_dirty();
        scene.progress(group);
        assert!(scene.is_dirty(group));
    }
    assert_eq!(scene.geometry(group), before);
}

#[test]
fn reentrant_request_is_dropped() {
    let mut scene = Scene::new();
    let filler = rect(&mut scene, 0.0, 0.0, 1.0, 1.0);
    scene.set_flags(
        filler,
        ObjectFlags {
            fill_parent: true,
            ..ObjectFlags::default()
        },
    );
    let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let group = scene
        .create_container(&[filler, a], ContainerOptions::default())
        .unwrap();
    let events = record(&mut scene);

    let g = scene.geometry(a);
    scene.modify(a, GeometryPatch::size(g.width + 10.0, g.height));
    let events = events.borrow();
    assert_eq!(
        events.skipped,
        [(group, LayoutTrigger::ObjectModified, SkipReason::Reentrant)]
    );
    assert_eq!(scene.geometry(group).width, 20.0);
    assert_eq!(scene.geometry(filler).width, 20.0);
}

#[test]
fn dispose_restores_members_to_the_canvas_plane() {
    let mut scene = Scene::new();
    let (group, a, b) = two_rect_group(&mut scene);
    scene.set_geometry(
        group,
        GeometryPatch {
            angle: Some(90.0),
            ..GeometryPatch::default()
        },
    );
    let world_a = scene.world_transform(a);
    scene.dispose(group).unwrap();
    assert!(!scene.is_alive(group));
    assert_eq!(scene.owner(b), None);
    assert_affine_near(scene.transform(a), world_a);
}
