// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON object-graph serialization for lamina scenes.
//!
//! Objects are written as nested camelCase [`ObjectRecord`]s: geometry on
//! every record, layout settings and member records on container records,
//! and shape-specific fields produced by each
//! [`Shape`](lamina_core::content::Shape).
//!
//! Reading goes through a [`Registry`] of shape factories. Factories return
//! futures, so shapes that need external resources can load them while the
//! rest of the tree resolves:
//!
//! ```
//! use futures::executor::block_on;
//! use lamina_core::scene::Scene;
//! use lamina_format::{Registry, deserialize, serialize};
//! use serde_json::json;
//!
//! let record = json!({
//!     "type": "group",
//!     "width": 10.0,
//!     "height": 10.0,
//!     "objects": [{ "type": "rect", "left": -5.0, "top": -5.0, "width": 10.0, "height": 10.0 }]
//! });
//! let mut scene = Scene::new();
//! let group = block_on(deserialize(&Registry::with_defaults(), &mut scene, &record)).unwrap();
//! assert_eq!(serialize(&scene, group, &[])["objects"][0]["width"], 10.0);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod deserialize;
mod error;
mod record;
mod registry;
mod serialize;

pub use deserialize::deserialize;
pub use error::FormatError;
pub use record::{GROUP_TYPE, ObjectRecord};
pub use registry::{GRADIENT_TYPE, Registry, ShapeFactory, ShapeFuture};
pub use serialize::{FILL_PARENT, OBJECT_CACHING, serialize, to_record};
