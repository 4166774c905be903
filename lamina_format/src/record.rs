// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The persisted record shape.

use lamina_core::geometry::{Geometry, OriginX, OriginY};
use lamina_core::layout::LayoutMode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Discriminator of container records.
pub const GROUP_TYPE: &str = "group";

/// One serialized object.
///
/// Geometry is always written. Container fields (`layout`, `subTargetCheck`,
/// `interactive`, `objects`) are present only on container records, and
/// `absolutePositioned` only on clip path records. Shape-specific fields are
/// kept in [`fields`](Self::fields).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectRecord {
    /// Registry discriminator. Missing only in legacy records.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Position of the `originX` anchor.
    pub left: f64,
    /// Position of the `originY` anchor.
    pub top: f64,
    /// Unscaled width.
    pub width: f64,
    /// Unscaled height.
    pub height: f64,
    /// Rotation in degrees.
    pub angle: f64,
    /// Horizontal scale.
    pub scale_x: f64,
    /// Vertical scale.
    pub scale_y: f64,
    /// Horizontal skew in degrees.
    pub skew_x: f64,
    /// Vertical skew in degrees.
    pub skew_y: f64,
    /// Horizontal anchor of `left`.
    pub origin_x: OriginX,
    /// Vertical anchor of `top`.
    pub origin_y: OriginY,
    /// Stroke width.
    pub stroke_width: f64,
    /// Horizontal mirror.
    pub flip_x: bool,
    /// Vertical mirror.
    pub flip_y: bool,
    /// Own opacity.
    pub opacity: f64,
    /// Layout mode of a container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutMode>,
    /// Whether a container keeps member corners up to date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_target_check: Option<bool>,
    /// Whether a container's members are individually selectable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,
    /// Member records of a container, back to front.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<Vec<ObjectRecord>>,
    /// Record of the container's clip path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_path: Option<Box<ObjectRecord>>,
    /// Whether a clip path is positioned in the canvas plane.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_positioned: Option<bool>,
    /// Written when `objectCaching` is requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_caching: Option<bool>,
    /// Written when `fillParent` is requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_parent: Option<bool>,
    /// Shape-specific fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Default for ObjectRecord {
    fn default() -> Self {
        Self::with_geometry(None, &Geometry::default())
    }
}

impl ObjectRecord {
    /// A record carrying `geometry` and nothing else.
    #[must_use]
    pub fn with_geometry(type_name: Option<String>, geometry: &Geometry) -> Self {
        Self {
            type_name,
            left: geometry.left,
            top: geometry.top,
            width: geometry.width,
            height: geometry.height,
            angle: geometry.angle,
            scale_x: geometry.scale_x,
            scale_y: geometry.scale_y,
            skew_x: geometry.skew_x,
            skew_y: geometry.skew_y,
            origin_x: geometry.origin_x,
            origin_y: geometry.origin_y,
            stroke_width: geometry.stroke_width,
            flip_x: geometry.flip_x,
            flip_y: geometry.flip_y,
            opacity: geometry.opacity,
            layout: None,
            sub_target_check: None,
            interactive: None,
            objects: None,
            clip_path: None,
            absolute_positioned: None,
            object_caching: None,
            fill_parent: None,
            fields: Map::new(),
        }
    }

    /// The geometry described by the record.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        Geometry {
            left: self.left,
            top: self.top,
            width: self.width,
            height: self.height,
            angle: self.angle,
            skew_x: self.skew_x,
            skew_y: self.skew_y,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            flip_x: self.flip_x,
            flip_y: self.flip_y,
            origin_x: self.origin_x,
            origin_y: self.origin_y,
            stroke_width: self.stroke_width,
            opacity: self.opacity,
        }
    }

    /// Whether the record describes a container.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.type_name.as_deref() == Some(GROUP_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_fields_take_geometry_defaults() {
        let record: ObjectRecord =
            serde_json::from_value(json!({ "type": "rect", "width": 4.0 })).unwrap();
        assert_eq!(record.scale_x, 1.0);
        assert_eq!(record.opacity, 1.0);
        assert_eq!(record.origin_x, OriginX::Left);
        assert!(record.fields.is_empty());
    }

    #[test]
    fn unknown_fields_are_kept_for_the_shape() {
        let value = json!({ "type": "rect", "fill": "#ff0000", "rx": 2.0 });
        let record: ObjectRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.fields["fill"], "#ff0000");
        assert_eq!(record.fields["rx"], 2.0);

        let written = serde_json::to_value(&record).unwrap();
        assert_eq!(written["fill"], "#ff0000");
        assert_eq!(written["originX"], "left");
        assert!(written.get("layout").is_none());
    }
}
