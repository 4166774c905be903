// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawable content of leaf objects.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::surface::{Color, RenderContext, Surface};

/// The drawing and export contract of a leaf object.
///
/// Geometry lives in the [`Scene`](crate::scene::Scene); a shape only knows
/// how to draw and describe a box of the size given in its
/// [`RenderContext`], centered on the origin of its own space.
pub trait Shape: fmt::Debug {
    /// Registry discriminator written as the record's `type`.
    fn type_name(&self) -> &'static str;

    /// Draws the shape. The surface is already in the object's own space.
    fn render(&self, surface: &mut dyn Surface, ctx: &RenderContext);

    /// Vector markup of the shape in its own space.
    fn to_markup(&self, ctx: &RenderContext) -> String;

    /// Shape-specific record fields. Geometry is written by the caller.
    ///
    /// `include` lists optional properties to add beyond the defaults.
    fn to_record(&self, include: &[&str]) -> Map<String, Value>;
}

/// A filled and/or stroked rectangle, optionally with rounded corners.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RectShape {
    /// Fill color.
    pub fill: Option<Color>,
    /// Stroke color.
    pub stroke: Option<Color>,
    /// Horizontal corner radius.
    pub rx: f64,
    /// Vertical corner radius.
    pub ry: f64,
}

impl RectShape {
    /// A rectangle filled with `color`.
    #[must_use]
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    /// The registry discriminator.
    pub const TYPE_NAME: &'static str = "rect";
}

impl Shape for RectShape {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn render(&self, surface: &mut dyn Surface, ctx: &RenderContext) {
        let bounds = ctx.bounds();
        if let Some(fill) = self.fill {
            surface.fill_rect(bounds, fill);
        }
        if let Some(stroke) = self.stroke
            && ctx.stroke_width > 0.0
        {
            surface.stroke_rect(bounds, stroke, ctx.stroke_width);
        }
    }

    fn to_markup(&self, ctx: &RenderContext) -> String {
        let bounds = ctx.bounds();
        let fill = self.fill.map_or_else(|| "none".to_owned(), |c| c.to_string());
        let stroke = self.stroke.map_or_else(|| "none".to_owned(), |c| c.to_string());
        let mut markup = format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            bounds.x0,
            bounds.y0,
            bounds.width(),
            bounds.height()
        );
        if self.rx != 0.0 || self.ry != 0.0 {
            markup.push_str(&format!(r#" rx="{}" ry="{}""#, self.rx, self.ry));
        }
        markup.push_str(&format!(
            r#" fill="{fill}" stroke="{stroke}" stroke-width="{}""#,
            ctx.stroke_width
        ));
        if ctx.opacity < 1.0 {
            markup.push_str(&format!(r#" opacity="{}""#, ctx.opacity));
        }
        markup.push_str(" />");
        markup
    }

    fn to_record(&self, _include: &[&str]) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}
