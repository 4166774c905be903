// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout strategies.

use kurbo::{Point, Rect, Size};

use super::{LayoutContext, LayoutInput, LayoutMode, LayoutResult, LayoutTrigger};

/// Computes new container geometry, or `None` when the container keeps its
/// current geometry.
///
/// | mode | trigger | result |
/// |---|---|---|
/// | any | `Progress` | `None` |
/// | `FitContentLazy` | `Added` with earlier members present | current box grown by the added bounds |
/// | `FitContent`, `FitContentLazy`, `SvgImport` | other | union of member bounds |
/// | `Fixed` | `Initialization`, `Imperative` | declared size, centered on the members |
/// | `ClipPath` | any, with a clip | the clip's center and size |
///
/// On `Imperative` passes, [`LayoutContext::overrides`] replace the computed
/// values. An initialization of members that are already container-relative
/// keeps the constructor geometry.
#[must_use]
pub fn compute_layout(
    mode: LayoutMode,
    input: &LayoutInput,
    ctx: &LayoutContext,
) -> Option<LayoutResult> {
    let computed = match ctx.trigger {
        LayoutTrigger::Progress => return None,
        LayoutTrigger::Initialization if ctx.objects_relative => return None,
        _ => match mode {
            LayoutMode::Fixed => fixed(input, ctx),
            LayoutMode::FitContent | LayoutMode::SvgImport => fit_content(input, ctx),
            LayoutMode::FitContentLazy => fit_content_lazy(input, ctx),
            LayoutMode::ClipPath => clip_path(input, ctx),
        },
    };

    if ctx.trigger != LayoutTrigger::Imperative || ctx.overrides.is_empty() {
        return computed;
    }
    let mut result = computed.unwrap_or_else(|| LayoutResult::new(input.center, input.size));
    let overrides = &ctx.overrides;
    if let Some(center) = overrides.center {
        result.center = center;
    }
    if let Some(width) = overrides.width {
        result.size.width = width;
    }
    if let Some(height) = overrides.height {
        result.size.height = height;
    }
    if let Some(correction) = overrides.correction {
        result.correction = correction;
    }
    Some(result)
}

fn union(bounds: &[Rect]) -> Option<Rect> {
    let (first, rest) = bounds.split_first()?;
    Some(rest.iter().fold(*first, |acc, r| acc.union(*r)))
}

fn fit_content(input: &LayoutInput, ctx: &LayoutContext) -> Option<LayoutResult> {
    let explicit = input.explicit;
    let init = ctx.trigger == LayoutTrigger::Initialization;
    match union(&input.child_bounds) {
        // Members are still in the parent plane during initialization.
        Some(bbox) if init => Some(LayoutResult::new(
            bbox.center(),
            Size::new(
                explicit.width.unwrap_or(bbox.width()),
                explicit.height.unwrap_or(bbox.height()),
            ),
        )),
        Some(bbox) => Some(LayoutResult::new(
            input.matrix * bbox.center(),
            bbox.size(),
        )),
        None if init => Some(LayoutResult::new(
            input.center,
            Size::new(
                explicit.width.unwrap_or(0.0),
                explicit.height.unwrap_or(0.0),
            ),
        )),
        None => None,
    }
}

fn fit_content_lazy(input: &LayoutInput, ctx: &LayoutContext) -> Option<LayoutResult> {
    if ctx.trigger != LayoutTrigger::Added || input.child_count <= ctx.targets.len() {
        return fit_content(input, ctx);
    }
    let current = Rect::from_center_size(Point::ZERO, input.size);
    let grown = input
        .added_bounds
        .iter()
        .fold(current, |acc, r| acc.union(*r));
    Some(LayoutResult::new(
        input.matrix * grown.center(),
        grown.size(),
    ))
}

fn fixed(input: &LayoutInput, ctx: &LayoutContext) -> Option<LayoutResult> {
    match ctx.trigger {
        LayoutTrigger::Initialization => {
            let explicit = input.explicit;
            if explicit.is_complete() {
                return Some(LayoutResult::new(input.center, input.size));
            }
            let bbox = union(&input.child_bounds);
            let size = Size::new(
                explicit
                    .width
                    .or(bbox.map(|b| b.width()))
                    .unwrap_or(0.0),
                explicit
                    .height
                    .or(bbox.map(|b| b.height()))
                    .unwrap_or(0.0),
            );
            let center = bbox.map_or(input.center, |b| b.center());
            Some(LayoutResult::new(center, size))
        }
        LayoutTrigger::Imperative => {
            let center = union(&input.child_bounds)
                .map_or(input.center, |b| input.matrix * b.center());
            Some(LayoutResult::new(center, input.size))
        }
        _ => None,
    }
}

fn clip_path(input: &LayoutInput, ctx: &LayoutContext) -> Option<LayoutResult> {
    let Some(clip) = input.clip else {
        return fit_content(input, ctx);
    };
    if clip.absolute {
        return Some(LayoutResult::new(clip.center_in_parent, clip.size));
    }
    if ctx.trigger == LayoutTrigger::Initialization {
        let base = union(&input.child_bounds).map_or(input.center, |b| b.center());
        return Some(LayoutResult::new(
            base + clip.local_center.to_vec2(),
            clip.size,
        ));
    }
    Some(LayoutResult::new(input.matrix * clip.local_center, clip.size))
}
