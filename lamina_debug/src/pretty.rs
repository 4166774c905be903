// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable scene output.
//!
//! [`dump_tree`] renders an object and its members as indented lines.
//! [`PrettyPrintObserver`] implements [`SceneObserver`] and writes one line
//! per notification to a [`Write`](std::io::Write) destination (default:
//! stderr).

use std::fmt::Write as _;
use std::io::Write;

use lamina_core::ObjectId;
use lamina_core::container::ContainerKind;
use lamina_core::layout::LayoutTrigger;
use lamina_core::observer::{LayoutEvent, MembershipEvent, SceneObserver, SkipReason};
use lamina_core::scene::Scene;

/// Renders `root` and everything it holds, one object per line.
///
/// Each line shows the kind, slot index, center in the containing plane and
/// unscaled size. Dirty objects are marked with `*`; clip paths follow their
/// container, prefixed with `clip:`.
#[must_use]
pub fn dump_tree(scene: &Scene, root: ObjectId) -> String {
    let mut out = String::new();
    write_node(scene, root, 0, "", &mut out);
    out
}

/// [`dump_tree`] for every object on the canvas stack, back to front.
#[must_use]
pub fn dump_canvas(scene: &Scene) -> String {
    let mut out = String::new();
    for root in scene.canvas_objects() {
        write_node(scene, root, 0, "", &mut out);
    }
    out
}

fn write_node(scene: &Scene, id: ObjectId, depth: usize, prefix: &str, out: &mut String) {
    let geometry = scene.geometry(id);
    let center = scene.center(id);
    let _ = write!(
        out,
        "{:indent$}{prefix}{} {} center=({:.1}, {:.1}) size={:.1}x{:.1}",
        "",
        kind_name(scene, id),
        id,
        center.x,
        center.y,
        geometry.width,
        geometry.height,
        indent = depth * 2,
    );
    if geometry.angle != 0.0 {
        let _ = write!(out, " angle={:.1}", geometry.angle);
    }
    if let Some(selection) = scene.selection(id) {
        let _ = write!(out, " selected-by={selection}");
    }
    if scene.is_dirty(id) {
        out.push_str(" *");
    }
    out.push('\n');

    if let Some(clip) = scene.clip_path(id) {
        write_node(scene, clip, depth + 1, "clip:", out);
    }
    for member in scene.objects(id) {
        write_node(scene, member, depth + 1, "", out);
    }
}

fn kind_name(scene: &Scene, id: ObjectId) -> &'static str {
    match scene.container_kind(id) {
        Some(ContainerKind::Group) => "group",
        Some(ContainerKind::Selection) => "selection",
        None => scene.shape(id).map_or("object", |shape| shape.type_name()),
    }
}

fn trigger_name(trigger: LayoutTrigger) -> &'static str {
    match trigger {
        LayoutTrigger::Initialization => "initialization",
        LayoutTrigger::ObjectModified => "object_modified",
        LayoutTrigger::Added => "added",
        LayoutTrigger::Removed => "removed",
        LayoutTrigger::LayoutChange => "layout_change",
        LayoutTrigger::Imperative => "imperative",
        LayoutTrigger::Progress => "progress",
    }
}

/// Writes human-readable notification lines to a
/// [`Write`](std::io::Write) destination.
pub struct PrettyPrintObserver<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintObserver<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintObserver").finish_non_exhaustive()
    }
}

impl PrettyPrintObserver {
    /// Creates an observer that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates an observer that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintObserver<W> {
    /// Creates an observer that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SceneObserver for PrettyPrintObserver<W> {
    fn on_layout(&mut self, e: &LayoutEvent) {
        let _ = match &e.result {
            Some(result) => writeln!(
                self.writer,
                "[layout] container={} trigger={} center=({:.1}, {:.1}) size={:.1}x{:.1} depth={}",
                e.container,
                trigger_name(e.trigger),
                result.center.x,
                result.center.y,
                result.size.width,
                result.size.height,
                e.path.len(),
            ),
            None => writeln!(
                self.writer,
                "[layout] container={} trigger={} unchanged depth={}",
                e.container,
                trigger_name(e.trigger),
                e.path.len(),
            ),
        };
    }

    fn on_layout_skipped(&mut self, container: ObjectId, trigger: LayoutTrigger, reason: SkipReason) {
        let reason = match reason {
            SkipReason::Reentrant => "reentrant",
            SkipReason::BeforeFirstLayout => "before_first_layout",
            SkipReason::Disposed => "disposed",
        };
        let trigger = trigger_name(trigger);
        let _ = writeln!(
            self.writer,
            "[skip] container={container} trigger={trigger} reason={reason}",
        );
    }

    fn on_membership(&mut self, e: &MembershipEvent) {
        let (tag, container, object) = match *e {
            MembershipEvent::Entered { container, object } => ("enter", container, object),
            MembershipEvent::Exited { container, object } => ("exit", container, object),
        };
        let _ = writeln!(self.writer, "[{tag}] container={container} object={object}");
    }
}
