// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: an ordered sequence of draw items for one frame.

use kurbo::{Affine, Size};
use lamina_core::ObjectId;
use lamina_core::container::ContainerKind;
use lamina_core::scene::Scene;

/// What a renderer may do with a container's cached raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheState {
    /// The cache is valid and can be drawn as-is.
    Reuse,
    /// The container caches, but its cache is stale and must be redrawn.
    Refresh,
    /// The container does not cache; its members are drawn directly.
    Direct,
}

/// What a render item stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A leaf object with a shape.
    Shape,
    /// A container. Its members follow with a greater depth.
    Container(CacheState),
}

/// A clip region applied to a render item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipItem {
    /// The clip path object.
    pub object: ObjectId,
    /// Canvas-plane transform of the clip's own space.
    pub world_transform: Affine,
    /// Size of the clip's box in its own space.
    pub size: Size,
}

/// A single draw command in the render plan.
///
/// Items are produced in back-to-front order, matching the canvas stack and
/// the members' stacking order.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderItem {
    /// The object this item originates from.
    pub object: ObjectId,
    /// Leaf or container.
    pub kind: ItemKind,
    /// Number of containers enclosing the item in the walk.
    pub depth: usize,
    /// Canvas-plane transform of the object's own space.
    pub world_transform: Affine,
    /// Opacity accumulated from enclosing containers.
    pub effective_opacity: f64,
    /// Unscaled box size.
    pub size: Size,
    /// Stroke width.
    pub stroke_width: f64,
    /// Clip paths of the enclosing containers, outermost first.
    pub clips: Vec<ClipItem>,
}

/// An ordered list of draw commands for a single frame.
///
/// Objects held by a selection are drawn by their owner when the canvas
/// preserves object stacking; otherwise they are lifted out of their owner
/// and drawn on top, in selection order, where the selection sits in the
/// canvas stack.
#[derive(Clone, Debug, Default)]
pub struct RenderPlan {
    /// Draw items in back-to-front order.
    pub items: Vec<RenderItem>,
}

impl RenderPlan {
    /// Creates an empty render plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the plan for the current canvas stack.
    #[must_use]
    pub fn build(scene: &Scene) -> Self {
        let mut plan = Self::new();
        plan.rebuild(scene);
        plan
    }

    /// Clears the plan and rebuilds it, reusing the allocation.
    pub fn rebuild(&mut self, scene: &Scene) {
        self.clear();
        let lift_selected = !scene.options().preserve_object_stacking;
        for root in scene.canvas_objects() {
            if scene.is_selection(root) {
                if lift_selected {
                    for member in scene.objects(root) {
                        let clips = clip_chain(scene, member);
                        self.walk(scene, member, 0, &clips, false);
                    }
                }
                continue;
            }
            self.walk(scene, root, 0, &[], lift_selected);
        }
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of containers whose cache must be redrawn.
    #[must_use]
    pub fn refresh_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.kind == ItemKind::Container(CacheState::Refresh))
            .count()
    }

    fn walk(
        &mut self,
        scene: &Scene,
        id: ObjectId,
        depth: usize,
        clips: &[ClipItem],
        skip_selected: bool,
    ) {
        if skip_selected && scene.selection(id).is_some() {
            return;
        }
        let geometry = scene.geometry(id);
        let kind = match scene.container_kind(id) {
            None => ItemKind::Shape,
            Some(ContainerKind::Selection) => return,
            Some(ContainerKind::Group) => ItemKind::Container(cache_state(scene, id)),
        };
        self.items.push(RenderItem {
            object: id,
            kind,
            depth,
            world_transform: scene.world_transform(id),
            effective_opacity: scene.effective_opacity(id),
            size: Size::new(geometry.width, geometry.height),
            stroke_width: geometry.stroke_width,
            clips: clips.to_vec(),
        });
        if kind == ItemKind::Shape {
            return;
        }

        let mut nested = clips.to_vec();
        if let Some(clip) = clip_item(scene, id) {
            nested.push(clip);
        }
        for member in scene.objects(id) {
            self.walk(scene, member, depth + 1, &nested, skip_selected);
        }
    }
}

fn cache_state(scene: &Scene, id: ObjectId) -> CacheState {
    if !scene.should_cache(id) {
        CacheState::Direct
    } else if scene.is_dirty(id) {
        CacheState::Refresh
    } else {
        CacheState::Reuse
    }
}

fn clip_item(scene: &Scene, container: ObjectId) -> Option<ClipItem> {
    let clip = scene.clip_path(container)?;
    let geometry = scene.geometry(clip);
    Some(ClipItem {
        object: clip,
        world_transform: scene.world_transform(clip),
        size: Size::new(geometry.width, geometry.height),
    })
}

/// Clips of the owner chain of an object, outermost first.
fn clip_chain(scene: &Scene, id: ObjectId) -> Vec<ClipItem> {
    let mut clips = Vec::new();
    let mut owner = scene.owner(id);
    while let Some(container) = owner {
        if let Some(clip) = clip_item(scene, container) {
            clips.push(clip);
        }
        owner = scene.owner(container);
    }
    clips.reverse();
    clips
}

#[cfg(test)]
mod tests {
    use lamina_core::config::CanvasOptions;
    use lamina_core::container::ContainerOptions;
    use lamina_core::content::RectShape;
    use lamina_core::geometry::Geometry;

    use super::*;

    fn rect(scene: &mut Scene, left: f64) -> ObjectId {
        scene.create_object(
            Box::new(RectShape::default()),
            Geometry::sized(left, 0.0, 10.0, 10.0),
        )
    }

    fn objects(plan: &RenderPlan) -> Vec<ObjectId> {
        plan.items.iter().map(|item| item.object).collect()
    }

    #[test]
    fn walk_is_back_to_front_and_depth_first() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0);
        let b = rect(&mut scene, 20.0);
        let c = rect(&mut scene, 40.0);
        let group = scene
            .create_container(&[a, b], ContainerOptions::default())
            .unwrap();
        scene.attach(group);
        scene.attach(c);

        let plan = RenderPlan::build(&scene);
        assert_eq!(objects(&plan), [group, a, b, c]);
        assert_eq!(plan.items[1].depth, 1);
        assert_eq!(plan.items[3].depth, 0);
        assert_eq!(plan.items[0].kind, ItemKind::Container(CacheState::Refresh));
        assert_eq!(plan.refresh_count(), 1);
    }

    #[test]
    fn cache_states_follow_dirty_and_caching() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0);
        let group = scene.create_container(&[a], ContainerOptions::default()).unwrap();
        scene.attach(group);
        scene.clear_all_dirty();
        assert_eq!(
            RenderPlan::build(&scene).items[0].kind,
            ItemKind::Container(CacheState::Reuse)
        );

        let b = rect(&mut scene, 0.0);
        let direct = scene
            .create_container(
                &[b],
                ContainerOptions {
                    object_caching: Some(false),
                    ..ContainerOptions::default()
                },
            )
            .unwrap();
        scene.attach(direct);
        assert_eq!(
            RenderPlan::build(&scene).items[2].kind,
            ItemKind::Container(CacheState::Direct)
        );
    }

    #[test]
    fn selected_members_are_lifted_on_top() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0);
        let b = rect(&mut scene, 20.0);
        let group = scene
            .create_container(&[a, b], ContainerOptions::default())
            .unwrap();
        scene.attach(group);
        let c = rect(&mut scene, 50.0);
        scene.attach(c);
        scene.create_selection(&[b, a]);

        let plan = RenderPlan::build(&scene);
        assert_eq!(objects(&plan), [group, c, b, a]);
    }

    #[test]
    fn preserved_stacking_draws_members_in_place() {
        let mut scene = Scene::with_options(CanvasOptions {
            preserve_object_stacking: true,
            ..CanvasOptions::default()
        });
        let a = rect(&mut scene, 0.0);
        let b = rect(&mut scene, 20.0);
        let group = scene
            .create_container(&[a, b], ContainerOptions::default())
            .unwrap();
        scene.attach(group);
        scene.create_selection(&[b, a]);

        let plan = RenderPlan::build(&scene);
        assert_eq!(objects(&plan), [group, a, b]);
        // World transforms account for the selection plane.
        let world = scene.world_transform(a);
        assert_eq!(plan.items[1].world_transform, world);
    }

    #[test]
    fn clips_apply_to_members() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0);
        let clip = rect(&mut scene, 0.0);
        let group = scene
            .create_container(&[a], ContainerOptions::default().with_clip_path(clip))
            .unwrap();
        scene.attach(group);
        scene.create_selection(&[a]);

        let plan = RenderPlan::build(&scene);
        assert_eq!(objects(&plan), [group, a]);
        assert!(plan.items[0].clips.is_empty());
        assert_eq!(plan.items[1].clips.len(), 1);
        assert_eq!(plan.items[1].clips[0].object, clip);
    }
}
