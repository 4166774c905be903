// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plans, surface playback and vector export for lamina scenes.
//!
//! This crate sits between [`lamina_core`]'s scene and whatever actually
//! puts pixels or markup somewhere. It provides:
//!
//! - [`RenderPlan`]: the canvas stack flattened into back-to-front
//!   [`RenderItem`]s, with clip chains and container cache states
//! - [`draw`] and [`Renderer`]: plan playback against a
//!   [`Surface`](lamina_core::surface::Surface)
//! - [`to_markup`] and [`canvas_to_markup`]: SVG-style vector export
//! - [`RecordingSurface`]: a surface that records its calls
//!
//! ```
//! use lamina_core::container::ContainerOptions;
//! use lamina_core::content::RectShape;
//! use lamina_core::geometry::Geometry;
//! use lamina_core::scene::Scene;
//! use lamina_render::{RecordingSurface, Renderer};
//!
//! let mut scene = Scene::new();
//! let a = scene.create_object(Box::new(RectShape::default()), Geometry::sized(0.0, 0.0, 10.0, 10.0));
//! let group = scene.create_container(&[a], ContainerOptions::default()).unwrap();
//! scene.attach(group);
//!
//! let mut renderer = Renderer::new();
//! let mut surface = RecordingSurface::new();
//! renderer.render(&mut scene, &mut surface);
//! assert_eq!(renderer.plan().items.len(), 2);
//! assert!(!scene.is_dirty(group));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod draw;
mod markup;
mod plan;
mod recording;

pub use draw::{Renderer, draw};
pub use markup::{canvas_to_markup, to_markup};
pub use plan::{CacheState, ClipItem, ItemKind, RenderItem, RenderPlan};
pub use recording::{RecordingSurface, SurfaceCall};
