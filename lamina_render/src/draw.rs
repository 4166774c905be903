// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plan playback.

use kurbo::{Point, Rect};
use lamina_core::geometry::invert;
use lamina_core::scene::{Scene, SceneChanges};
use lamina_core::surface::{RenderContext, Surface};
use tracing::debug;

use crate::plan::{ItemKind, RenderItem, RenderPlan};

/// Draws every shape item of `plan` onto `surface`.
///
/// Each shape is drawn inside its own save/restore pair: the clips of its
/// enclosing containers are applied in their own spaces first, then the
/// surface is moved into the shape's space.
pub fn draw(scene: &Scene, plan: &RenderPlan, surface: &mut dyn Surface) {
    for item in &plan.items {
        if item.kind == ItemKind::Shape {
            draw_item(scene, item, surface);
        }
    }
}

fn draw_item(scene: &Scene, item: &RenderItem, surface: &mut dyn Surface) {
    let Some(shape) = scene.shape(item.object) else {
        return;
    };
    if item.effective_opacity <= 0.0 {
        return;
    }
    surface.save();
    for clip in &item.clips {
        surface.transform(clip.world_transform);
        surface.clip_rect(Rect::from_center_size(Point::ZERO, clip.size));
        surface.transform(invert(clip.world_transform));
    }
    surface.transform(item.world_transform);
    surface.set_alpha(item.effective_opacity);
    shape.render(
        surface,
        &RenderContext {
            size: item.size,
            stroke_width: item.stroke_width,
            opacity: item.effective_opacity,
        },
    );
    surface.restore();
}

/// Frame driver: drains scene changes, rebuilds the plan and draws it.
#[derive(Debug, Default)]
pub struct Renderer {
    plan: RenderPlan,
    changes: SceneChanges,
    frames: u64,
}

impl Renderer {
    /// Creates a renderer with empty buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders one frame and returns the changes it consumed.
    ///
    /// Dirty flags are cleared afterwards, so the next plan reports every
    /// untouched caching container as reusable.
    pub fn render(&mut self, scene: &mut Scene, surface: &mut dyn Surface) -> &SceneChanges {
        self.changes.clear();
        scene.evaluate_into(&mut self.changes);
        self.plan.rebuild(scene);
        draw(scene, &self.plan, surface);
        scene.clear_all_dirty();
        self.frames += 1;
        debug!(
            frame = self.frames,
            items = self.plan.items.len(),
            refreshed = self.plan.refresh_count(),
            "frame rendered"
        );
        &self.changes
    }

    /// The plan of the last frame.
    #[must_use]
    pub fn plan(&self) -> &RenderPlan {
        &self.plan
    }

    /// Number of frames rendered.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
