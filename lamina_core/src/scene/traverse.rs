// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered member iteration.

use core::slice;

use super::store::Scene;
use crate::id::ObjectId;

/// An iterator over an ordered object sequence, back to front.
///
/// Created by [`Scene::objects`] and [`Scene::canvas_objects`].
#[derive(Debug)]
pub struct Objects<'a> {
    scene: &'a Scene,
    iter: slice::Iter<'a, u32>,
}

impl<'a> Objects<'a> {
    pub(crate) fn new(scene: &'a Scene, items: &'a [u32]) -> Self {
        Self {
            scene,
            iter: items.iter(),
        }
    }
}

impl Iterator for Objects<'_> {
    type Item = ObjectId;

    fn next(&mut self) -> Option<ObjectId> {
        self.iter.next().map(|&idx| self.scene.id_at(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for Objects<'_> {
    fn next_back(&mut self) -> Option<ObjectId> {
        self.iter.next_back().map(|&idx| self.scene.id_at(idx))
    }
}

impl ExactSizeIterator for Objects<'_> {}
