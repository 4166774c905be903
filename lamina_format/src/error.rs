// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for serialization.

use lamina_core::SceneError;
use thiserror::Error;

/// A failure while reading or rebuilding a record tree.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The input is not a valid record.
    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),

    /// No factory is registered for the record's `type`.
    #[error("no factory registered for type `{0}`")]
    UnresolvedType(String),

    /// The record is well-formed JSON but cannot describe an object.
    #[error("invalid record: {0}")]
    Invalid(String),

    /// The scene refused to build a container from the record.
    #[error(transparent)]
    Scene(#[from] SceneError),
}
