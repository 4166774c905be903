// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene to records.

use kurbo::Affine;
use lamina_core::ObjectId;
use lamina_core::geometry::{Geometry, invert};
use lamina_core::scene::Scene;
use serde_json::Value;
use tracing::warn;

use crate::record::{GROUP_TYPE, ObjectRecord};

/// Optional property that adds `objectCaching` to every record.
pub const OBJECT_CACHING: &str = "objectCaching";
/// Optional property that adds `fillParent` to every record.
pub const FILL_PARENT: &str = "fillParent";

/// Serializes an object, and for containers every member and the clip path,
/// into a JSON value.
///
/// See [`to_record`] for the plane the geometry is written in.
#[must_use]
pub fn serialize(scene: &Scene, id: ObjectId, include: &[&str]) -> Value {
    serde_json::to_value(to_record(scene, id, include)).unwrap_or_else(|err| {
        warn!(?id, %err, "record is not representable as JSON");
        Value::Null
    })
}

/// Builds the record tree of an object.
///
/// The object's geometry is written in its owner's plane, so an object that
/// is currently selected is recorded where it would be once deselected.
/// Members are written in their container's plane.
#[must_use]
pub fn to_record(scene: &Scene, id: ObjectId, include: &[&str]) -> ObjectRecord {
    record_in(scene, id, scene.owner(id), include)
}

fn record_in(
    scene: &Scene,
    id: ObjectId,
    plane: Option<ObjectId>,
    include: &[&str],
) -> ObjectRecord {
    let mut record = ObjectRecord::with_geometry(None, &geometry_in(scene, id, plane));
    if scene.is_container(id) {
        record.type_name = Some(GROUP_TYPE.to_owned());
        record.layout = scene.layout_mode(id);
        record.sub_target_check = Some(scene.sub_target_check(id));
        record.interactive = Some(scene.is_interactive(id));
        record.objects = Some(
            scene
                .objects(id)
                .map(|member| record_in(scene, member, Some(id), include))
                .collect(),
        );
        record.clip_path = scene.clip_path(id).map(|clip| {
            let mut clip_record = record_in(scene, clip, scene.effective_group(clip), include);
            clip_record.absolute_positioned = Some(scene.flags(clip).absolute_positioned);
            Box::new(clip_record)
        });
    } else if let Some(shape) = scene.shape(id) {
        record.type_name = Some(shape.type_name().to_owned());
        record.fields = shape.to_record(include);
    }

    let flags = scene.flags(id);
    if include.contains(&OBJECT_CACHING) {
        record.object_caching = Some(flags.object_caching);
    }
    if include.contains(&FILL_PARENT) {
        record.fill_parent = Some(flags.fill_parent);
    }
    record
}

/// Geometry of `id` expressed in the plane of `plane` (the canvas for
/// `None`).
fn geometry_in(scene: &Scene, id: ObjectId, plane: Option<ObjectId>) -> Geometry {
    let mut geometry = scene.geometry(id);
    if scene.effective_group(id) == plane {
        return geometry;
    }
    let parent = plane.map_or(Affine::IDENTITY, |plane| scene.world_transform(plane));
    geometry.apply_matrix(invert(parent) * scene.world_transform(id));
    geometry
}
