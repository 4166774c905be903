// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Object arena.
//!
//! Every drawable of a canvas, leaf or container, is an *object* in a single
//! [`Scene`]. Each object has:
//!
//! - An identity ([`ObjectId`](crate::id::ObjectId)), a generational handle
//!   that becomes stale when the object is destroyed.
//! - [`Geometry`](crate::geometry::Geometry) expressed in the plane of the
//!   container it is held by (or the canvas), with a cached own matrix.
//! - Non-owning relations: the persistent container (`owner`), the transient
//!   selection holding it, and the container it clips.
//! - A dirty flag that tells renderers the object's cache is stale.
//!
//! Objects are stored in struct-of-arrays layout with index-based handles.
//!
//! # Dirty tracking
//!
//! Mutations mark the dirty channels in [`dirty`](crate::dirty);
//! [`Scene::evaluate`] drains them into [`SceneChanges`].

mod evaluate;
mod store;
mod traverse;

pub use evaluate::SceneChanges;
pub use store::{ObjectFlags, Scene};
pub use traverse::Objects;
