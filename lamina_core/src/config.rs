// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas-wide configuration.

use serde::{Deserialize, Serialize};

/// Options of the canvas hosting a [`Scene`](crate::scene::Scene).
///
/// Loadable from JSON with camelCase keys; missing keys take their defaults.
///
/// ```
/// use lamina_core::config::CanvasOptions;
///
/// let options: CanvasOptions =
///     serde_json::from_str(r#"{ "preserveObjectStacking": true }"#).unwrap();
/// assert!(options.preserve_object_stacking);
/// assert!(options.object_caching);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasOptions {
    /// Selected objects keep their stacking position instead of being drawn
    /// on top by the selection.
    pub preserve_object_stacking: bool,
    /// Default render caching for newly created containers.
    pub object_caching: bool,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            preserve_object_stacking: false,
            object_caching: true,
        }
    }
}

impl CanvasOptions {
    /// Parses options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
