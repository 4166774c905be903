// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing surface contract.
//!
//! The scene never rasterizes anything itself. Renderers position the surface
//! in an object's own space through [`Surface::transform`] and then hand it to
//! the object's [`Shape`](crate::content::Shape), which draws a box centered
//! on the origin.

use core::fmt;

use kurbo::{Affine, Rect, Size};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#rrggbb` or `#rrggbbaa`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        let byte = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color `{text}`")))
    }
}

/// Per-object drawing parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderContext {
    /// Unscaled box size.
    pub size: Size,
    /// Stroke width.
    pub stroke_width: f64,
    /// Opacity including every enclosing container.
    pub opacity: f64,
}

impl RenderContext {
    /// The object's box in its own space, centered on the origin.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(kurbo::Point::ZERO, self.size)
    }
}

/// A 2D drawing target.
///
/// State changes made between [`save`](Self::save) and the matching
/// [`restore`](Self::restore) are undone by the restore.
pub trait Surface {
    /// Pushes the current transform, alpha and clip.
    fn save(&mut self);
    /// Pops the state pushed by the last [`save`](Self::save).
    fn restore(&mut self);
    /// Post-multiplies the current transform.
    fn transform(&mut self, matrix: Affine);
    /// Sets the global alpha.
    fn set_alpha(&mut self, alpha: f64);
    /// Intersects the clip with a rectangle in the current space.
    fn clip_rect(&mut self, rect: Rect);
    /// Fills a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Strokes a rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(Color::from_hex("#ff8000"), Some(Color::rgb(255, 128, 0)));
        let translucent = Color::from_hex("#00000080").unwrap();
        assert_eq!(translucent.a, 128);
        assert_eq!(translucent.to_string(), "#00000080");
        assert_eq!(Color::from_hex("ff8000"), None);
        assert_eq!(Color::from_hex("#ff80"), None);
    }
}
