// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The scene records changes per object in an
//! [`understory_dirty::DirtyTracker`]. Every channel is local-only: marking an
//! object never marks its members or its container through tracker
//! dependencies. Upward propagation of render-cache invalidation follows the
//! container rules in [`invalidate`](crate::invalidate) instead, since a
//! member only invalidates its container while that container is caching.
//!
//! # Consumption
//!
//! [`Scene::evaluate`](crate::scene::Scene::evaluate) drains every channel and
//! surfaces the results as [`SceneChanges`](crate::scene::SceneChanges).

use understory_dirty::Channel;

/// Geometry (position, size or transform) of the object itself changed.
pub const GEOMETRY: Channel = Channel::new(0);

/// The object's render cache is stale. Raised together with the dirty flag.
pub const CACHE: Channel = Channel::new(1);

/// Membership or canvas stack changed.
pub const TOPOLOGY: Channel = Channel::new(2);
