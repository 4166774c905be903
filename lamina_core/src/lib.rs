// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Object arena, container layout and invalidation for 2D canvas scene graphs.
//!
//! `lamina_core` keeps every drawable object of a canvas in a struct-of-arrays
//! [`Scene`](scene::Scene) addressed by generational
//! [`ObjectId`](id::ObjectId) handles. Objects compose into containers whose
//! members are expressed in the container's plane, and containers recompute
//! their own geometry whenever membership or member geometry changes.
//!
//! # Architecture
//!
//! ```text
//!   mutation (add / remove / modify / notify)
//!       │
//!       ▼
//!   enter / exit protocol ──► plane conversion of the member
//!       │
//!       ▼
//!   LayoutContext ──► compute_layout() ──► LayoutResult
//!                                               │
//!                 ┌─────────────────────────────┘
//!                 ▼
//!   apply: move container, shift members ──► mark_dirty ──► bubble to owner
//! ```
//!
//! **[`scene`]**: Struct-of-arrays object storage: geometry, content,
//! relations (owner, selection, clip host), dirty flags and the canvas stack.
//!
//! **[`container`]**: Membership operations, the enter/exit protocols,
//! clip paths, disposal and z-order.
//!
//! **[`layout`]**: Layout modes and triggers, the pure
//! [`compute_layout`](layout::compute_layout) decision table, and result
//! application with the per-container re-entrancy guard.
//!
//! Selections (transient multi-object containers) are created with
//! [`Scene::create_selection`](scene::Scene::create_selection).
//!
//! **[`invalidate`]**: Change signals and the dirty-flag bubbling rules.
//!
//! **[`dirty`]**: Change channels drained by
//! [`Scene::evaluate`](scene::Scene::evaluate).
//!
//! **[`observer`]**: Synchronous layout and membership notifications.
//!
//! **[`geometry`]**: Object geometry, own matrices and matrix
//! decomposition on top of `kurbo`.
//!
//! **[`content`]** and **[`surface`]**: The drawing and export contract of
//! leaf objects and the surface they draw on.
//!
//! # Example
//!
//! ```
//! use lamina_core::container::ContainerOptions;
//! use lamina_core::content::RectShape;
//! use lamina_core::geometry::Geometry;
//! use lamina_core::scene::Scene;
//!
//! let mut scene = Scene::new();
//! let a = scene.create_object(Box::new(RectShape::default()), Geometry::sized(0.0, 0.0, 10.0, 10.0));
//! let b = scene.create_object(Box::new(RectShape::default()), Geometry::sized(30.0, 0.0, 10.0, 10.0));
//! let group = scene.create_container(&[a, b], ContainerOptions::default()).unwrap();
//!
//! assert_eq!(scene.geometry(group).width, 40.0);
//! assert_eq!(scene.owner(a), Some(group));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod collection;
pub mod config;
pub mod container;
pub mod content;
pub mod dirty;
pub mod error;
pub mod geometry;
pub mod id;
pub mod invalidate;
pub mod layout;
pub mod observer;
pub mod scene;
mod selection;
pub mod surface;

pub use error::SceneError;
pub use id::ObjectId;
