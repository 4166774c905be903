// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Object geometry and the 2D affine conventions used throughout the scene.
//!
//! Every object is described by a position anchored at an origin (`left`,
//! `top`, [`OriginX`], [`OriginY`]), a box size, a stroke width, and a
//! rotation/scale/skew decomposition. The object's *own matrix* maps its
//! object space (a box centered on the origin) into the plane of whatever
//! contains it:
//!
//! ```text
//! own = translate(center) · rotate(angle) · scale(±sx, ±sy) · skewX · skewY
//! ```
//!
//! [`decompose`] inverts that composition (with `skewY = 0`), which is how
//! objects are moved between coordinate planes without changing their
//! appearance.

use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Horizontal anchor of an object's `left` coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginX {
    /// `left` is the left edge.
    #[default]
    Left,
    /// `left` is the horizontal center.
    Center,
    /// `left` is the right edge.
    Right,
}

impl OriginX {
    /// Offset of the anchor from the center, as a fraction of the width.
    #[must_use]
    pub const fn offset(self) -> f64 {
        match self {
            Self::Left => -0.5,
            Self::Center => 0.0,
            Self::Right => 0.5,
        }
    }
}

/// Vertical anchor of an object's `top` coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginY {
    /// `top` is the top edge.
    #[default]
    Top,
    /// `top` is the vertical center.
    Center,
    /// `top` is the bottom edge.
    Bottom,
}

impl OriginY {
    /// Offset of the anchor from the center, as a fraction of the height.
    #[must_use]
    pub const fn offset(self) -> f64 {
        match self {
            Self::Top => -0.5,
            Self::Center => 0.0,
            Self::Bottom => 0.5,
        }
    }
}

/// Position, size and transform properties of a drawable object.
///
/// Angles are in degrees. `left`/`top` are expressed in the plane of the
/// object's containing container (or the canvas for root objects).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Horizontal position of the origin anchor.
    pub left: f64,
    /// Vertical position of the origin anchor.
    pub top: f64,
    /// Box width before scaling.
    pub width: f64,
    /// Box height before scaling.
    pub height: f64,
    /// Clockwise rotation in degrees around the center.
    pub angle: f64,
    /// Horizontal skew in degrees.
    pub skew_x: f64,
    /// Vertical skew in degrees.
    pub skew_y: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Mirror horizontally.
    pub flip_x: bool,
    /// Mirror vertically.
    pub flip_y: bool,
    /// Horizontal anchor of `left`.
    pub origin_x: OriginX,
    /// Vertical anchor of `top`.
    pub origin_y: OriginY,
    /// Stroke width, added to both box dimensions.
    pub stroke_width: f64,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
            angle: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            flip_x: false,
            flip_y: false,
            origin_x: OriginX::Left,
            origin_y: OriginY::Top,
            stroke_width: 0.0,
            opacity: 1.0,
        }
    }
}

impl Geometry {
    /// A box at `(left, top)` of the given size, all other properties default.
    #[must_use]
    pub fn sized(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
            ..Self::default()
        }
    }

    /// Returns a copy with the given rotation.
    #[must_use]
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Returns a copy with the given scale factors.
    #[must_use]
    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    /// Returns a copy with the given skew angles.
    #[must_use]
    pub fn with_skew(mut self, skew_x: f64, skew_y: f64) -> Self {
        self.skew_x = skew_x;
        self.skew_y = skew_y;
        self
    }

    /// Returns a copy with the given origin anchors.
    #[must_use]
    pub fn with_origin(mut self, origin_x: OriginX, origin_y: OriginY) -> Self {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
        self
    }

    /// Returns a copy with the given stroke width.
    #[must_use]
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    /// The scale/flip/skew part of the own matrix.
    #[must_use]
    pub fn dimensions_matrix(&self) -> Affine {
        let sx = if self.flip_x { -self.scale_x } else { self.scale_x };
        let sy = if self.flip_y { -self.scale_y } else { self.scale_y };
        let mut matrix = Affine::new([sx, 0.0, 0.0, sy, 0.0, 0.0]);
        if self.skew_x != 0.0 {
            matrix *= Affine::new([1.0, 0.0, self.skew_x.to_radians().tan(), 1.0, 0.0, 0.0]);
        }
        if self.skew_y != 0.0 {
            matrix *= Affine::new([1.0, self.skew_y.to_radians().tan(), 0.0, 1.0, 0.0, 0.0]);
        }
        matrix
    }

    /// Size of the stroked box after scale and skew, before rotation.
    #[must_use]
    pub fn transformed_dimensions(&self) -> Vec2 {
        let dim_x = self.width + self.stroke_width;
        let dim_y = self.height + self.stroke_width;
        if self.skew_x == 0.0 && self.skew_y == 0.0 {
            return Vec2::new((dim_x * self.scale_x).abs(), (dim_y * self.scale_y).abs());
        }
        size_after_transform(dim_x, dim_y, self.dimensions_matrix())
    }

    /// Half of [`transformed_dimensions`](Self::transformed_dimensions),
    /// widened to the axis-aligned extents of the rotated box unless
    /// `ignore_angle` is set.
    #[must_use]
    pub fn half_extents(&self, ignore_angle: bool) -> Vec2 {
        let half = self.transformed_dimensions() / 2.0;
        if ignore_angle || self.angle == 0.0 {
            return half;
        }
        rotated_extents(half, self.angle)
    }

    /// Center of the object in its containing plane.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left, self.top) + self.anchor_to_center(self.origin_x, self.origin_y)
    }

    /// Moves the object so that the given anchor lands on `point`.
    pub fn set_position_by_origin(&mut self, point: Point, origin_x: OriginX, origin_y: OriginY) {
        let center = point + self.anchor_to_center(origin_x, origin_y);
        let position = center - self.anchor_to_center(self.origin_x, self.origin_y);
        self.left = position.x;
        self.top = position.y;
    }

    /// The own matrix, mapping object space into the containing plane.
    #[must_use]
    pub fn own_matrix(&self) -> Affine {
        let mut matrix = Affine::translate(self.center().to_vec2());
        if self.angle != 0.0 {
            matrix *= Affine::rotate(self.angle.to_radians());
        }
        matrix * self.dimensions_matrix()
    }

    /// Rewrites rotation, scale, skew and position so that
    /// [`own_matrix`](Self::own_matrix) equals `matrix`.
    ///
    /// Flips are folded into the scale and angle.
    pub fn apply_matrix(&mut self, matrix: Affine) {
        let parts = decompose(matrix);
        self.flip_x = false;
        self.flip_y = false;
        self.angle = parts.angle;
        self.scale_x = parts.scale_x;
        self.scale_y = parts.scale_y;
        self.skew_x = parts.skew_x;
        self.skew_y = 0.0;
        self.set_position_by_origin(
            parts.translation.to_point(),
            OriginX::Center,
            OriginY::Center,
        );
    }

    fn anchor_to_center(&self, origin_x: OriginX, origin_y: OriginY) -> Vec2 {
        let dims = self.transformed_dimensions();
        let offset = Vec2::new(-origin_x.offset() * dims.x, -origin_y.offset() * dims.y);
        if self.angle == 0.0 {
            offset
        } else {
            rotate_vec(offset, self.angle)
        }
    }
}

/// Sparse geometry update. Only present fields are applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeometryPatch {
    /// New `left`, if being updated.
    pub left: Option<f64>,
    /// New `top`, if being updated.
    pub top: Option<f64>,
    /// New width, if being updated.
    pub width: Option<f64>,
    /// New height, if being updated.
    pub height: Option<f64>,
    /// New angle, if being updated.
    pub angle: Option<f64>,
    /// New horizontal skew, if being updated.
    pub skew_x: Option<f64>,
    /// New vertical skew, if being updated.
    pub skew_y: Option<f64>,
    /// New horizontal scale, if being updated.
    pub scale_x: Option<f64>,
    /// New vertical scale, if being updated.
    pub scale_y: Option<f64>,
    /// New stroke width, if being updated.
    pub stroke_width: Option<f64>,
    /// New opacity, if being updated.
    pub opacity: Option<f64>,
}

impl GeometryPatch {
    /// A patch that moves the origin anchor.
    #[must_use]
    pub fn position(left: f64, top: f64) -> Self {
        Self {
            left: Some(left),
            top: Some(top),
            ..Self::default()
        }
    }

    /// A patch that resizes the box.
    #[must_use]
    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Writes every present field into `geometry`. Returns whether anything
    /// changed.
    pub fn apply(&self, geometry: &mut Geometry) -> bool {
        let before = *geometry;
        let fields = [
            (self.left, &mut geometry.left),
            (self.top, &mut geometry.top),
            (self.width, &mut geometry.width),
            (self.height, &mut geometry.height),
            (self.angle, &mut geometry.angle),
            (self.skew_x, &mut geometry.skew_x),
            (self.skew_y, &mut geometry.skew_y),
            (self.scale_x, &mut geometry.scale_x),
            (self.scale_y, &mut geometry.scale_y),
            (self.stroke_width, &mut geometry.stroke_width),
            (self.opacity, &mut geometry.opacity),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        *geometry != before
    }
}

/// The result of [`decompose`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposed {
    /// Rotation in degrees.
    pub angle: f64,
    /// Horizontal scale.
    pub scale_x: f64,
    /// Vertical scale (negative when the matrix mirrors).
    pub scale_y: f64,
    /// Horizontal skew in degrees.
    pub skew_x: f64,
    /// Translation component.
    pub translation: Vec2,
}

/// QR-decomposes an affine matrix into rotation, scale, horizontal skew and
/// translation. The vertical skew of the result is always zero.
#[must_use]
pub fn decompose(matrix: Affine) -> Decomposed {
    let [a, b, c, d, e, f] = matrix.as_coeffs();
    let denom = a * a + b * b;
    let scale_x = denom.sqrt();
    let (scale_y, skew_x) = if denom > 0.0 {
        ((a * d - c * b) / scale_x, (a * c + b * d).atan2(denom))
    } else {
        (0.0, 0.0)
    };
    Decomposed {
        angle: b.atan2(a).to_degrees(),
        scale_x,
        scale_y,
        skew_x: skew_x.to_degrees(),
        translation: Vec2::new(e, f),
    }
}

/// Axis-aligned bounds, in the plane `matrix` maps into, of a `width` ×
/// `height` box with the given stroke.
///
/// The box is measured by its rotated half-extents around its center, so the
/// result depends only on the decomposed angle, scale and skew of `matrix`.
#[must_use]
pub fn bounds_in_plane(matrix: Affine, width: f64, height: f64, stroke_width: f64) -> Rect {
    let parts = decompose(matrix);
    let probe = Geometry {
        width,
        height,
        stroke_width,
        angle: parts.angle,
        scale_x: parts.scale_x,
        scale_y: parts.scale_y,
        skew_x: parts.skew_x,
        ..Geometry::default()
    };
    let half = probe.half_extents(false);
    let center = parts.translation.to_point();
    Rect::new(
        center.x - half.x,
        center.y - half.y,
        center.x + half.x,
        center.y + half.y,
    )
}

/// Applies only the linear part of `matrix` to `v`.
#[must_use]
pub fn transform_vector(matrix: Affine, v: Vec2) -> Vec2 {
    let [a, b, c, d, _, _] = matrix.as_coeffs();
    Vec2::new(a * v.x + c * v.y, b * v.x + d * v.y)
}

/// Applies the inverse of the linear part of `matrix` to `v`.
///
/// A singular matrix leaves `v` unchanged.
#[must_use]
pub fn inverse_transform_vector(matrix: Affine, v: Vec2) -> Vec2 {
    let [a, b, c, d, _, _] = matrix.as_coeffs();
    let det = a * d - b * c;
    if det.abs() < f64::EPSILON {
        return v;
    }
    Vec2::new((d * v.x - c * v.y) / det, (a * v.y - b * v.x) / det)
}

/// Inverse of `matrix`, or the identity when it is singular.
#[must_use]
pub fn invert(matrix: Affine) -> Affine {
    if matrix.determinant().abs() < f64::EPSILON {
        Affine::IDENTITY
    } else {
        matrix.inverse()
    }
}

fn rotate_vec(v: Vec2, degrees: f64) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

fn rotated_extents(half: Vec2, degrees: f64) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    Vec2::new(half.x * cos + half.y * sin, half.x * sin + half.y * cos)
}

fn size_after_transform(width: f64, height: f64, matrix: Affine) -> Vec2 {
    let (hx, hy) = (width / 2.0, height / 2.0);
    let corners = [
        Point::new(-hx, -hy),
        Point::new(hx, -hy),
        Point::new(-hx, hy),
        Point::new(hx, hy),
    ];
    let mut bounds = Rect::from_points(matrix * corners[0], matrix * corners[0]);
    for corner in &corners[1..] {
        bounds = bounds.union_pt(matrix * *corner);
    }
    Vec2::new(bounds.width(), bounds.height())
}
