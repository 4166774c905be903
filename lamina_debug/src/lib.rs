// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics for lamina scenes.
//!
//! - [`pretty::dump_tree`] renders an object tree as indented text, and
//!   [`pretty::PrettyPrintObserver`] writes one line per scene notification.
//! - [`snapshot::snapshot`] exports the canvas as a JSON tree.
//! - [`recorder::LayoutRecorder`] keeps every notification in a log shared
//!   with a cloneable [`recorder::RecorderHandle`].

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod pretty;
pub mod recorder;
pub mod snapshot;
