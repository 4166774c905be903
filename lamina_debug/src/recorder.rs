// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory notification recording.
//!
//! A [`LayoutRecorder`] is handed to the scene as an observer; the
//! [`RecorderHandle`] it was created with stays with the caller and reads
//! the same log.

use std::cell::RefCell;
use std::rc::Rc;

use lamina_core::ObjectId;
use lamina_core::layout::LayoutTrigger;
use lamina_core::observer::{LayoutEvent, MembershipEvent, ObserverId, SceneObserver, SkipReason};
use lamina_core::scene::Scene;

/// One recorded notification.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A completed layout pass.
    Layout(LayoutEvent),
    /// A dropped layout request.
    Skipped {
        /// The container the request was for.
        container: ObjectId,
        /// The requested trigger.
        trigger: LayoutTrigger,
        /// Why it was dropped.
        reason: SkipReason,
    },
    /// A membership change.
    Membership(MembershipEvent),
}

/// Shared view of a recorder's log.
#[derive(Clone, Debug, Default)]
pub struct RecorderHandle {
    log: Rc<RefCell<Vec<RecordedEvent>>>,
}

impl RecorderHandle {
    /// A copy of every recorded event, in order.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.log.borrow().clone()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    /// Forgets every recorded event.
    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    /// Container and trigger of every completed layout pass.
    #[must_use]
    pub fn layouts(&self) -> Vec<(ObjectId, LayoutTrigger)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RecordedEvent::Layout(layout) => Some((layout.container, layout.trigger)),
                _ => None,
            })
            .collect()
    }

    /// Every dropped layout request.
    #[must_use]
    pub fn skipped(&self) -> Vec<(ObjectId, LayoutTrigger, SkipReason)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                RecordedEvent::Skipped {
                    container,
                    trigger,
                    reason,
                } => Some((container, trigger, reason)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: RecordedEvent) {
        self.log.borrow_mut().push(event);
    }
}

/// A [`SceneObserver`] that records every notification.
#[derive(Debug)]
pub struct LayoutRecorder {
    handle: RecorderHandle,
}

impl LayoutRecorder {
    /// Creates a recorder and the handle that reads its log.
    #[must_use]
    pub fn new() -> (Self, RecorderHandle) {
        let handle = RecorderHandle::default();
        (
            Self {
                handle: handle.clone(),
            },
            handle,
        )
    }

    /// Registers a new recorder on `scene`.
    pub fn install(scene: &mut Scene) -> (ObserverId, RecorderHandle) {
        let (recorder, handle) = Self::new();
        (scene.add_observer(Box::new(recorder)), handle)
    }
}

impl SceneObserver for LayoutRecorder {
    fn on_layout(&mut self, event: &LayoutEvent) {
        self.handle.push(RecordedEvent::Layout(event.clone()));
    }

    fn on_layout_skipped(&mut self, container: ObjectId, trigger: LayoutTrigger, reason: SkipReason) {
        self.handle.push(RecordedEvent::Skipped {
            container,
            trigger,
            reason,
        });
    }

    fn on_membership(&mut self, event: &MembershipEvent) {
        self.handle.push(RecordedEvent::Membership(*event));
    }
}

#[cfg(test)]
mod tests {
    use lamina_core::container::ContainerOptions;
    use lamina_core::content::RectShape;
    use lamina_core::geometry::{Geometry, GeometryPatch};

    use super::*;

    fn rect(scene: &mut Scene, left: f64) -> ObjectId {
        scene.create_object(
            Box::new(RectShape::default()),
            Geometry::sized(left, 0.0, 10.0, 10.0),
        )
    }

    #[test]
    fn bubbling_is_recorded_bottom_up() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0);
        let inner = scene.create_container(&[a], ContainerOptions::default()).unwrap();
        let outer = scene
            .create_container(&[inner], ContainerOptions::default())
            .unwrap();
        let (_, log) = LayoutRecorder::install(&mut scene);

        scene.modify(a, GeometryPatch::size(20.0, 10.0));
        assert_eq!(
            log.layouts(),
            [
                (inner, LayoutTrigger::ObjectModified),
                (outer, LayoutTrigger::ObjectModified),
            ]
        );
        let RecordedEvent::Layout(last) = log.events().pop().unwrap() else {
            panic!("expected a layout event");
        };
        assert_eq!(last.path, [inner]);
    }

    #[test]
    fn membership_changes_are_recorded() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0);
        let group = scene.create_container(&[], ContainerOptions::default()).unwrap();
        let (id, log) = LayoutRecorder::install(&mut scene);

        scene.add(group, &[a]);
        assert_eq!(
            log.events()[0],
            RecordedEvent::Membership(MembershipEvent::Entered {
                container: group,
                object: a,
            })
        );
        assert_eq!(log.layouts(), [(group, LayoutTrigger::Added)]);

        log.clear();
        assert!(scene.remove_observer(id).is_some());
        scene.remove(group, &[a]);
        assert!(log.is_empty());
    }
}
