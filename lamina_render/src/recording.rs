// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A surface that records calls instead of drawing.

use kurbo::{Affine, Rect};
use lamina_core::surface::{Color, Surface};

/// A recorded surface call.
///
/// Drawing calls carry the transform, alpha and number of active clips in
/// effect when they were made.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCall {
    /// [`Surface::save`].
    Save,
    /// [`Surface::restore`].
    Restore,
    /// [`Surface::transform`].
    Transform(Affine),
    /// [`Surface::set_alpha`].
    SetAlpha(f64),
    /// [`Surface::clip_rect`].
    ClipRect(Rect),
    /// [`Surface::fill_rect`].
    Fill {
        /// Rectangle in the current space.
        rect: Rect,
        /// Fill color.
        color: Color,
        /// Current transform.
        transform: Affine,
        /// Current alpha.
        alpha: f64,
        /// Number of clips in effect.
        clips: usize,
    },
    /// [`Surface::stroke_rect`].
    Stroke {
        /// Rectangle in the current space.
        rect: Rect,
        /// Stroke color.
        color: Color,
        /// Line width.
        width: f64,
        /// Current transform.
        transform: Affine,
    },
}

#[derive(Clone, Copy, Debug)]
struct State {
    transform: Affine,
    alpha: f64,
    clips: usize,
}

impl Default for State {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            alpha: 1.0,
            clips: 0,
        }
    }
}

/// A [`Surface`] that records every call.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
    state: State,
    stack: Vec<State>,
}

impl RecordingSurface {
    /// Creates an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded calls, in order.
    #[must_use]
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Only the fill calls.
    pub fn fills(&self) -> impl Iterator<Item = &SurfaceCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, SurfaceCall::Fill { .. }))
    }

    /// Whether every save was matched by a restore.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.stack.is_empty()
    }

    /// Forgets the recording and resets the state.
    pub fn clear(&mut self) {
        self.calls.clear();
        self.state = State::default();
        self.stack.clear();
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.stack.push(self.state);
        self.calls.push(SurfaceCall::Save);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
        self.calls.push(SurfaceCall::Restore);
    }

    fn transform(&mut self, matrix: Affine) {
        self.state.transform *= matrix;
        self.calls.push(SurfaceCall::Transform(matrix));
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha;
        self.calls.push(SurfaceCall::SetAlpha(alpha));
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.state.clips += 1;
        self.calls.push(SurfaceCall::ClipRect(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(SurfaceCall::Fill {
            rect,
            color,
            transform: self.state.transform,
            alpha: self.state.alpha,
            clips: self.state.clips,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.calls.push(SurfaceCall::Stroke {
            rect,
            color,
            width,
            transform: self.state.transform,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_undoes_state() {
        let mut surface = RecordingSurface::new();
        surface.save();
        surface.transform(Affine::translate((5.0, 0.0)));
        surface.set_alpha(0.5);
        surface.clip_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        surface.restore();
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);

        assert!(surface.is_balanced());
        let Some(SurfaceCall::Fill {
            transform,
            alpha,
            clips,
            ..
        }) = surface.fills().next()
        else {
            panic!("no fill recorded");
        };
        assert_eq!(*transform, Affine::IDENTITY);
        assert_eq!(*alpha, 1.0);
        assert_eq!(*clips, 0);
    }
}
