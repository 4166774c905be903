// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Records to scene.
//!
//! Rebuilding runs in two phases. The first resolves the shape of every leaf
//! record through the [`Registry`], driving all factories of a subtree
//! concurrently; nothing touches the scene yet, so a failure leaves it
//! unchanged. The second builds the objects bottom-up in one synchronous
//! pass.

use futures::FutureExt;
use futures::future::{LocalBoxFuture, try_join_all};
use lamina_core::ObjectId;
use lamina_core::container::ContainerOptions;
use lamina_core::content::Shape;
use lamina_core::scene::Scene;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::FormatError;
use crate::record::ObjectRecord;
use crate::registry::Registry;

/// Rebuilds an object tree from a serialized record.
///
/// Containers are created with
/// [`objects_relative_to_group`](ContainerOptions::objects_relative_to_group),
/// so member geometry is taken as recorded. The new root is not attached to
/// the canvas.
///
/// # Errors
///
/// Fails if the value is not a record, if a record's type cannot be
/// resolved, or if a factory fails.
pub async fn deserialize(
    registry: &Registry,
    scene: &mut Scene,
    value: &Value,
) -> Result<ObjectId, FormatError> {
    let record = ObjectRecord::deserialize(value)?;
    let resolved = resolve(registry, &record).await?;
    let id = build(scene, resolved)?;
    debug!(?id, "object tree rebuilt");
    Ok(id)
}

/// A record whose shapes are ready.
enum Resolved<'a> {
    Shape {
        record: &'a ObjectRecord,
        shape: Box<dyn Shape>,
    },
    Container {
        record: &'a ObjectRecord,
        members: Vec<Resolved<'a>>,
        clip: Option<Box<Resolved<'a>>>,
    },
}

fn resolve<'a>(
    registry: &'a Registry,
    record: &'a ObjectRecord,
) -> LocalBoxFuture<'a, Result<Resolved<'a>, FormatError>> {
    async move {
        if !record.is_container() {
            let shape = registry.build(record)?.await?;
            return Ok(Resolved::Shape { record, shape });
        }

        let objects = record.objects.as_deref().unwrap_or_default();
        let members = try_join_all(objects.iter().map(|member| resolve(registry, member)));
        let clip = async {
            match &record.clip_path {
                Some(clip) => resolve(registry, clip).await.map(|clip| Some(Box::new(clip))),
                None => Ok::<_, FormatError>(None),
            }
        };
        let (members, clip) = futures::try_join!(members, clip)?;
        Ok(Resolved::Container {
            record,
            members,
            clip,
        })
    }
    .boxed_local()
}

fn build(scene: &mut Scene, resolved: Resolved<'_>) -> Result<ObjectId, FormatError> {
    match resolved {
        Resolved::Shape { record, shape } => {
            let id = scene.create_object(shape, record.geometry());
            apply_flags(scene, id, record);
            Ok(id)
        }
        Resolved::Container {
            record,
            members,
            clip,
        } => {
            let members = members
                .into_iter()
                .map(|member| build(scene, member))
                .collect::<Result<Vec<_>, _>>()?;
            let clip_path = clip.map(|clip| build(scene, *clip)).transpose()?;

            let geometry = record.geometry();
            let options = ContainerOptions {
                layout: record.layout.unwrap_or_default(),
                sub_target_check: record.sub_target_check.unwrap_or(false),
                interactive: record.interactive.unwrap_or(false),
                object_caching: record.object_caching,
                left: Some(geometry.left),
                top: Some(geometry.top),
                width: Some(geometry.width),
                height: Some(geometry.height),
                angle: geometry.angle,
                skew_x: geometry.skew_x,
                skew_y: geometry.skew_y,
                scale_x: geometry.scale_x,
                scale_y: geometry.scale_y,
                flip_x: geometry.flip_x,
                flip_y: geometry.flip_y,
                opacity: geometry.opacity,
                origin_x: geometry.origin_x,
                origin_y: geometry.origin_y,
                clip_path,
                objects_relative_to_group: true,
            };
            let id = scene.create_container(&members, options)?;
            apply_flags(scene, id, record);
            Ok(id)
        }
    }
}

fn apply_flags(scene: &mut Scene, id: ObjectId, record: &ObjectRecord) {
    let current = scene.flags(id);
    let mut flags = current;
    if let Some(absolute) = record.absolute_positioned {
        flags.absolute_positioned = absolute;
    }
    if let Some(caching) = record.object_caching {
        flags.object_caching = caching;
    }
    if let Some(fill_parent) = record.fill_parent {
        flags.fill_parent = fill_parent;
    }
    if flags != current {
        scene.set_flags(id, flags);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use futures::executor::block_on;
    use lamina_core::content::RectShape;
    use lamina_core::layout::LayoutMode;
    use serde_json::json;

    use super::*;

    #[test]
    fn containers_keep_recorded_member_geometry() {
        let value = json!({
            "type": "group",
            "left": 100.0,
            "top": 50.0,
            "width": 40.0,
            "height": 20.0,
            "layout": "fixed",
            "objects": [
                { "type": "rect", "left": -20.0, "top": -10.0, "width": 10.0, "height": 10.0 },
                { "type": "rect", "left": 10.0, "top": 0.0, "width": 10.0, "height": 10.0 }
            ]
        });
        let mut scene = Scene::new();
        let group = block_on(deserialize(&Registry::with_defaults(), &mut scene, &value)).unwrap();

        assert_eq!(scene.layout_mode(group), Some(LayoutMode::Fixed));
        let g = scene.geometry(group);
        assert_eq!((g.left, g.top, g.width, g.height), (100.0, 50.0, 40.0, 20.0));
        let members: Vec<_> = scene.objects(group).collect();
        assert_eq!(members.len(), 2);
        assert_eq!(scene.geometry(members[0]).left, -20.0);
        assert_eq!(scene.owner(members[1]), Some(group));
    }

    #[test]
    fn failures_leave_the_scene_untouched() {
        let value = json!({
            "type": "group",
            "objects": [
                { "type": "rect" },
                { "type": "group", "objects": [{ "type": "image" }] }
            ]
        });
        let mut scene = Scene::new();
        let err = block_on(deserialize(&Registry::with_defaults(), &mut scene, &value)).unwrap_err();
        assert!(matches!(err, FormatError::UnresolvedType(name) if name == "image"));
        assert!(scene.evaluate().added.is_empty());
    }

    #[test]
    fn every_leaf_is_resolved_once() {
        let calls = Rc::new(Cell::new(0));
        let mut registry = Registry::new();
        let counter = Rc::clone(&calls);
        registry.register("rect", move |_| {
            counter.set(counter.get() + 1);
            async { Ok::<_, FormatError>(Box::new(RectShape::default()) as Box<dyn Shape>) }
                .boxed_local()
        });
        let value = json!({
            "type": "group",
            "objects": [{ "type": "rect" }, { "type": "rect" }],
            "clipPath": { "type": "rect", "absolutePositioned": true }
        });
        let mut scene = Scene::new();
        let group = block_on(deserialize(&registry, &mut scene, &value)).unwrap();

        assert_eq!(calls.get(), 3);
        let clip = scene.clip_path(group).unwrap();
        assert!(scene.flags(clip).absolute_positioned);
    }

    #[test]
    fn malformed_input_is_a_json_error() {
        let mut scene = Scene::new();
        let err = block_on(deserialize(
            &Registry::with_defaults(),
            &mut scene,
            &json!({ "type": "group", "objects": 3 }),
        ))
        .unwrap_err();
        assert!(matches!(err, FormatError::Json(_)));
    }
}
