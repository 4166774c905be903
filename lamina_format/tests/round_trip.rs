// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serialize, rebuild, serialize again.

use futures::executor::block_on;
use lamina_core::ObjectId;
use lamina_core::container::ContainerOptions;
use lamina_core::content::RectShape;
use lamina_core::geometry::{Geometry, GeometryPatch};
use lamina_core::layout::LayoutMode;
use lamina_core::scene::{ObjectFlags, Scene};
use lamina_core::surface::Color;
use lamina_format::{FILL_PARENT, OBJECT_CACHING, Registry, deserialize, serialize};

fn rect(scene: &mut Scene, left: f64, top: f64, color: Color) -> ObjectId {
    scene.create_object(
        Box::new(RectShape {
            fill: Some(color),
            stroke: Some(Color::BLACK),
            rx: 2.0,
            ry: 2.0,
        }),
        Geometry::sized(left, top, 30.0, 20.0).with_stroke_width(1.0),
    )
}

fn nested_scene() -> (Scene, ObjectId) {
    let mut scene = Scene::new();
    let a = rect(&mut scene, 0.0, 0.0, Color::rgb(255, 0, 0));
    let b = rect(&mut scene, 40.0, 10.0, Color::rgb(0, 255, 0));
    let inner = scene
        .create_container(&[a, b], ContainerOptions::default().with_angle(15.0))
        .unwrap();

    let c = rect(&mut scene, -50.0, 60.0, Color::rgb(0, 0, 255));
    scene.set_geometry(
        c,
        GeometryPatch {
            angle: Some(-30.0),
            scale_x: Some(1.5),
            ..GeometryPatch::default()
        },
    );
    let clip = rect(&mut scene, -60.0, -10.0, Color::BLACK);
    scene.set_flags(
        clip,
        ObjectFlags {
            absolute_positioned: true,
            ..ObjectFlags::default()
        },
    );
    let outer = scene
        .create_container(
            &[inner, c],
            ContainerOptions::new(LayoutMode::FitContentLazy)
                .with_clip_path(clip)
                .interactive(true),
        )
        .unwrap();
    (scene, outer)
}

#[test]
fn records_survive_a_round_trip() {
    let (scene, outer) = nested_scene();
    let include = [OBJECT_CACHING, FILL_PARENT];
    let first = serialize(&scene, outer, &include);

    let mut rebuilt = Scene::new();
    let copy = block_on(deserialize(&Registry::with_defaults(), &mut rebuilt, &first)).unwrap();
    let second = serialize(&rebuilt, copy, &include);
    assert_eq!(first, second);
}

#[test]
fn rebuilt_objects_keep_their_world_transforms() {
    let (scene, outer) = nested_scene();
    let record = serialize(&scene, outer, &[]);
    let mut rebuilt = Scene::new();
    let copy = block_on(deserialize(&Registry::with_defaults(), &mut rebuilt, &record)).unwrap();

    let original: Vec<_> = scene.objects(outer).collect();
    let restored: Vec<_> = rebuilt.objects(copy).collect();
    for (a, b) in original.iter().zip(&restored) {
        let (wa, wb) = (scene.world_transform(*a), rebuilt.world_transform(*b));
        for (x, y) in wa.as_coeffs().iter().zip(wb.as_coeffs()) {
            assert!((x - y).abs() < 1e-9, "{wa:?} != {wb:?}");
        }
    }
    assert_eq!(rebuilt.layout_mode(copy), Some(LayoutMode::FitContentLazy));
    assert!(rebuilt.is_interactive(copy));
}

#[test]
fn relative_clip_path_groups_rebuild_in_place() {
    let mut scene = Scene::new();
    let a = rect(&mut scene, 0.0, 0.0, Color::rgb(255, 0, 0));
    let clip = rect(&mut scene, 5.0, -10.0, Color::BLACK);
    let group = scene
        .create_container(
            &[a],
            ContainerOptions::new(LayoutMode::ClipPath).with_clip_path(clip),
        )
        .unwrap();
    scene.set_geometry(
        group,
        GeometryPatch {
            angle: Some(30.0),
            ..GeometryPatch::default()
        },
    );
    assert_eq!(scene.center(clip).to_vec2().hypot(), 0.0);

    let record = serialize(&scene, group, &[]);
    assert_eq!(record["layout"], "clip-path");
    assert_eq!(record["clipPath"]["absolutePositioned"], false);

    let mut rebuilt = Scene::new();
    let copy = block_on(deserialize(&Registry::with_defaults(), &mut rebuilt, &record)).unwrap();
    assert_eq!(rebuilt.layout_mode(copy), Some(LayoutMode::ClipPath));
    let copy_clip = rebuilt.clip_path(copy).unwrap();
    assert!(!rebuilt.flags(copy_clip).absolute_positioned);
    let copy_member = rebuilt.objects(copy).next().unwrap();

    for (original, restored) in [(group, copy), (clip, copy_clip), (a, copy_member)] {
        let (wa, wb) = (scene.world_transform(original), rebuilt.world_transform(restored));
        for (x, y) in wa.as_coeffs().iter().zip(wb.as_coeffs()) {
            assert!((x - y).abs() < 1e-9, "{wa:?} != {wb:?}");
        }
    }
    assert_eq!(serialize(&rebuilt, copy, &[]), record);
}
