// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export of the canvas state.
//!
//! Unlike a serialized record, a snapshot shows what the engine computed:
//! world transforms, cached corners, relations and dirty flags. It is meant
//! for diffing and inspection tools, not for loading back.

use lamina_core::ObjectId;
use lamina_core::container::ContainerKind;
use lamina_core::scene::Scene;
use serde_json::{Map, Value, json};

/// Snapshot of every object on the canvas stack, back to front.
#[must_use]
pub fn snapshot(scene: &Scene) -> Value {
    let objects: Vec<Value> = scene
        .canvas_objects()
        .map(|id| object_snapshot(scene, id))
        .collect();
    json!({
        "preserveObjectStacking": scene.options().preserve_object_stacking,
        "objects": objects,
    })
}

/// Snapshot of one object and everything it holds.
#[must_use]
pub fn object_snapshot(scene: &Scene, id: ObjectId) -> Value {
    let geometry = scene.geometry(id);
    let center = scene.center(id);
    let mut node = Map::new();
    node.insert("index".into(), id.index().into());
    node.insert("generation".into(), id.generation().into());
    node.insert("kind".into(), kind(scene, id).into());
    node.insert("center".into(), json!([center.x, center.y]));
    node.insert("size".into(), json!([geometry.width, geometry.height]));
    node.insert("angle".into(), geometry.angle.into());
    node.insert(
        "world".into(),
        json!(scene.world_transform(id).as_coeffs()),
    );
    if let Some(corners) = scene.corners(id) {
        let corners: Vec<Value> = corners.iter().map(|p| json!([p.x, p.y])).collect();
        node.insert("corners".into(), corners.into());
    }
    node.insert("dirty".into(), scene.is_dirty(id).into());
    node.insert("owner".into(), relation(scene.owner(id)));
    node.insert("selection".into(), relation(scene.selection(id)));

    if scene.is_container(id) {
        if let Some(mode) = scene.layout_mode(id) {
            node.insert(
                "layout".into(),
                serde_json::to_value(mode).unwrap_or(Value::Null),
            );
        }
        node.insert("initialized".into(), scene.is_initialized(id).into());
        let active: Vec<Value> = scene
            .active_objects(id)
            .iter()
            .map(|object| object.index().into())
            .collect();
        node.insert("active".into(), active.into());
        if let Some(clip) = scene.clip_path(id) {
            node.insert("clipPath".into(), object_snapshot(scene, clip));
        }
        let members: Vec<Value> = scene
            .objects(id)
            .map(|member| object_snapshot(scene, member))
            .collect();
        node.insert("objects".into(), members.into());
    }
    Value::Object(node)
}

fn kind(scene: &Scene, id: ObjectId) -> &'static str {
    match scene.container_kind(id) {
        Some(ContainerKind::Group) => "group",
        Some(ContainerKind::Selection) => "selection",
        None => scene.shape(id).map_or("object", |shape| shape.type_name()),
    }
}

fn relation(id: Option<ObjectId>) -> Value {
    id.map_or(Value::Null, |id| id.index().into())
}
