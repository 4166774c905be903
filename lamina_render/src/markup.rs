// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vector markup export.
//!
//! Every object becomes a `<g>` element whose transform expresses the object
//! in the plane of the element it is nested in, so nesting the output
//! reproduces the world transforms of the scene. Containers with a clip path
//! emit a `<clipPath>` definition ahead of their group.

use kurbo::{Affine, Point, Rect, Size};
use lamina_core::ObjectId;
use lamina_core::geometry::invert;
use lamina_core::scene::Scene;
use lamina_core::surface::RenderContext;
use tracing::trace;

/// Vector markup of one object and, for containers, its members.
///
/// The outermost transform is the object's world transform.
#[must_use]
pub fn to_markup(scene: &Scene, id: ObjectId) -> String {
    let mut writer = MarkupWriter::default();
    writer.object(scene, id, Affine::IDENTITY);
    writer.out
}

/// Vector markup of the whole canvas stack inside an `<svg>` root.
///
/// Selections are not exported; their members appear inside their owners.
#[must_use]
pub fn canvas_to_markup(scene: &Scene, size: Size) -> String {
    let mut writer = MarkupWriter::default();
    writer.out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        number(size.width),
        number(size.height)
    ));
    for root in scene.canvas_objects() {
        writer.object(scene, root, Affine::IDENTITY);
    }
    writer.out.push_str("</svg>");
    trace!(clips = writer.clip_count, "canvas exported");
    writer.out
}

#[derive(Debug, Default)]
struct MarkupWriter {
    out: String,
    clip_count: usize,
}

impl MarkupWriter {
    /// Writes `id` relative to a parent element whose world transform is
    /// `parent_world`.
    fn object(&mut self, scene: &Scene, id: ObjectId, parent_world: Affine) {
        if scene.is_selection(id) {
            return;
        }
        let world = scene.world_transform(id);
        let local = invert(parent_world) * world;
        let geometry = scene.geometry(id);

        if !scene.is_container(id) {
            let Some(shape) = scene.shape(id) else {
                return;
            };
            self.out
                .push_str(&format!(r#"<g transform="{}">"#, matrix(local)));
            self.out.push_str(&shape.to_markup(&RenderContext {
                size: Size::new(geometry.width, geometry.height),
                stroke_width: geometry.stroke_width,
                opacity: geometry.opacity,
            }));
            self.out.push_str("</g>");
            return;
        }

        let clip = scene
            .clip_path(id)
            .map(|clip| self.clip_definition(scene, clip, world));
        self.out
            .push_str(&format!(r#"<g transform="{}""#, matrix(local)));
        if let Some(clip_id) = &clip {
            self.out
                .push_str(&format!(r#" clip-path="url(#{clip_id})""#));
        }
        if geometry.opacity < 1.0 {
            self.out
                .push_str(&format!(r#" opacity="{}""#, number(geometry.opacity)));
        }
        self.out.push('>');
        for member in scene.objects(id) {
            self.object(scene, member, world);
        }
        self.out.push_str("</g>");
    }

    /// Writes a `<clipPath>` for `clip` in the space of a container whose
    /// world transform is `container_world`, returning its element id.
    fn clip_definition(&mut self, scene: &Scene, clip: ObjectId, container_world: Affine) -> String {
        let clip_id = format!("CLIPPATH_{}", self.clip_count);
        self.clip_count += 1;

        let transform = invert(container_world) * scene.world_transform(clip);
        let geometry = scene.geometry(clip);
        let ctx = RenderContext {
            size: Size::new(geometry.width, geometry.height),
            stroke_width: geometry.stroke_width,
            opacity: 1.0,
        };
        let body = match scene.shape(clip) {
            Some(shape) => shape.to_markup(&ctx),
            None => {
                let bounds = Rect::from_center_size(Point::ZERO, ctx.size);
                format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" />"#,
                    number(bounds.x0),
                    number(bounds.y0),
                    number(bounds.width()),
                    number(bounds.height())
                )
            }
        };
        self.out.push_str(&format!(
            r#"<clipPath id="{clip_id}"><g transform="{}">{body}</g></clipPath>"#,
            matrix(transform)
        ));
        clip_id
    }
}

fn matrix(transform: Affine) -> String {
    let [a, b, c, d, e, f] = transform.as_coeffs();
    format!(
        "matrix({} {} {} {} {} {})",
        number(a),
        number(b),
        number(c),
        number(d),
        number(e),
        number(f)
    )
}

/// Formats a number rounded to six decimals, without a negative zero.
fn number(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 {
        "0".to_owned()
    } else {
        format!("{rounded}")
    }
}
