// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout and membership notifications.
//!
//! Observers are registered on the [`Scene`](crate::scene::Scene) and are
//! called synchronously from inside mutations. They receive plain event
//! values and have no access to the scene, so they cannot start another
//! mutation from within a layout pass.

use crate::id::ObjectId;
use crate::layout::{LayoutResult, LayoutTrigger};

/// A completed layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutEvent {
    /// The container that was laid out.
    pub container: ObjectId,
    /// Why it was laid out.
    pub trigger: LayoutTrigger,
    /// The applied geometry, or `None` when the container kept its geometry.
    pub result: Option<LayoutResult>,
    /// Containers visited before this one in the same bubbling chain.
    pub path: Vec<ObjectId>,
}

/// Why a layout request was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The container was already running a pass.
    Reentrant,
    /// The container has not finished its initial layout.
    BeforeFirstLayout,
    /// The slot no longer holds a container.
    Disposed,
}

/// An object entering or leaving a container or selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MembershipEvent {
    /// `object` became a member of `container`.
    Entered {
        /// The receiving container.
        container: ObjectId,
        /// The new member.
        object: ObjectId,
    },
    /// `object` left `container`.
    Exited {
        /// The former container.
        container: ObjectId,
        /// The former member.
        object: ObjectId,
    },
}

/// Receives scene notifications. Every method defaults to doing nothing.
pub trait SceneObserver {
    /// A layout pass finished.
    fn on_layout(&mut self, event: &LayoutEvent) {
        let _ = event;
    }

    /// A layout request was dropped.
    fn on_layout_skipped(&mut self, container: ObjectId, trigger: LayoutTrigger, reason: SkipReason) {
        let _ = (container, trigger, reason);
    }

    /// Membership changed.
    fn on_membership(&mut self, event: &MembershipEvent) {
        let _ = event;
    }
}

/// Handle returned by [`Scene::add_observer`](crate::scene::Scene::add_observer).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub(crate) u32);
