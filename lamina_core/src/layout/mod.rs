// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container layout.
//!
//! A layout pass turns a [`LayoutContext`] into new container geometry in two
//! steps:
//!
//! 1. The scene captures a [`LayoutInput`] snapshot of the container and its
//!    members, and [`compute_layout`] picks a [`LayoutResult`] according to
//!    the container's [`LayoutMode`]. This step is pure.
//! 2. The result is applied: the container is resized and recentred, and the
//!    members it owns are shifted by the opposite displacement so their world
//!    position survives. The pass then bubbles to the containers holding the
//!    container itself.
//!
//! Passes are synchronous and non-reentrant per container. A request that
//! arrives while the same container is mid-pass is dropped and reported to
//! observers as [`SkipReason::Reentrant`](crate::observer::SkipReason).

mod apply;
mod strategy;

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

use crate::id::ObjectId;

pub use strategy::compute_layout;

/// How a container derives its own size and center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Keeps the declared size. Only initialization and imperative requests
    /// move the container.
    Fixed,
    /// Fits the union of the members' bounds on every change.
    #[default]
    FitContent,
    /// Like [`FitContent`](Self::FitContent), but additions grow the current
    /// box by the added members only.
    FitContentLazy,
    /// Takes size and center from the container's clip path.
    ClipPath,
    /// Fit-content with a top-left anchored origin. Only meaningful at
    /// construction; becomes [`FitContent`](Self::FitContent) afterwards.
    SvgImport,
}

/// Why a layout pass was requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutTrigger {
    /// The single pass run by the container's constructor.
    Initialization,
    /// A member (or nested container) changed geometry.
    ObjectModified,
    /// Members were added.
    Added,
    /// Members were removed.
    Removed,
    /// The layout mode was replaced.
    LayoutChange,
    /// Explicit caller request.
    Imperative,
    /// Frequent transient update. Never recomputes geometry.
    Progress,
}

/// Caller-supplied values that take precedence over computed ones on
/// [`LayoutTrigger::Imperative`] passes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutOverrides {
    /// New center in the container's parent plane.
    pub center: Option<Point>,
    /// New width.
    pub width: Option<f64>,
    /// New height.
    pub height: Option<f64>,
    /// Extra member displacement, in the parent plane.
    pub correction: Option<Vec2>,
}

impl LayoutOverrides {
    /// Whether no value is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.center.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.correction.is_none()
    }
}

/// A layout request.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutContext {
    /// Why the pass runs.
    pub trigger: LayoutTrigger,
    /// The objects that caused the request (added, removed or modified).
    pub targets: Vec<ObjectId>,
    /// Explicit values for imperative passes.
    pub overrides: LayoutOverrides,
    /// Containers already visited while bubbling, innermost first.
    pub path: Vec<ObjectId>,
    /// Whether the pass continues to the containers holding this one.
    pub bubbles: bool,
    /// Members are already expressed in the container plane, so the pass
    /// must not move them.
    pub objects_relative: bool,
    /// The mode replaced by a [`LayoutTrigger::LayoutChange`].
    pub previous_mode: Option<LayoutMode>,
}

impl LayoutContext {
    /// A bubbling request with no targets.
    #[must_use]
    pub fn new(trigger: LayoutTrigger) -> Self {
        Self {
            trigger,
            targets: Vec::new(),
            overrides: LayoutOverrides::default(),
            path: Vec::new(),
            bubbles: true,
            objects_relative: false,
            previous_mode: None,
        }
    }

    /// Sets the objects that caused the request.
    #[must_use]
    pub fn with_targets(mut self, targets: Vec<ObjectId>) -> Self {
        self.targets = targets;
        self
    }

    /// Sets imperative overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: LayoutOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Stops the pass from bubbling to ancestors.
    #[must_use]
    pub fn local(mut self) -> Self {
        self.bubbles = false;
        self
    }
}

/// New container geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutResult {
    /// Center in the container's parent plane.
    pub center: Point,
    /// Declared width and height.
    pub size: Size,
    /// Extra member displacement beyond the center shift, in the parent plane.
    pub correction: Vec2,
}

impl LayoutResult {
    /// A result without correction.
    #[must_use]
    pub fn new(center: Point, size: Size) -> Self {
        Self {
            center,
            size,
            correction: Vec2::ZERO,
        }
    }
}

/// Values passed explicitly to a container's constructor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExplicitBox {
    /// Explicit `left`.
    pub left: Option<f64>,
    /// Explicit `top`.
    pub top: Option<f64>,
    /// Explicit width.
    pub width: Option<f64>,
    /// Explicit height.
    pub height: Option<f64>,
}

impl ExplicitBox {
    /// Whether position and size were all given.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.left.is_some() && self.top.is_some() && self.width.is_some() && self.height.is_some()
    }
}

/// The container's clip path as seen by the layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipInput {
    /// Whether the clip is positioned in the canvas plane.
    pub absolute: bool,
    /// Clip center in the container's parent plane (absolute clips).
    pub center_in_parent: Point,
    /// Clip center in the container plane (relative clips).
    pub local_center: Point,
    /// Size of the clip's bounds.
    pub size: Size,
}

/// Snapshot of everything [`compute_layout`] needs.
///
/// Member bounds are expressed in the container plane, except during
/// [`LayoutTrigger::Initialization`], where members have not been converted
/// yet and are still in the parent plane.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutInput {
    /// Current center in the parent plane.
    pub center: Point,
    /// Current own matrix of the container.
    pub matrix: kurbo::Affine,
    /// Current declared size.
    pub size: Size,
    /// Constructor values (only during initialization).
    pub explicit: ExplicitBox,
    /// Bounds of every member that contributes to fitting.
    pub child_bounds: Vec<Rect>,
    /// Bounds of the contributing targets of an [`LayoutTrigger::Added`] pass.
    pub added_bounds: Vec<Rect>,
    /// Number of members, including those excluded from fitting.
    pub child_count: usize,
    /// The clip path, if any.
    pub clip: Option<ClipInput>,
}

impl LayoutInput {
    /// An input for a container at the origin with no members.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            center: Point::ZERO,
            matrix: kurbo::Affine::IDENTITY,
            size: Size::ZERO,
            explicit: ExplicitBox::default(),
            child_bounds: Vec::new(),
            added_bounds: Vec::new(),
            child_count: 0,
            clip: None,
        }
    }
}
