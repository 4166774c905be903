// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for scene mutations.

use thiserror::Error;

use crate::id::ObjectId;

/// A rejected structural mutation.
///
/// Membership operations process each object independently; a rejection for
/// one object is reported alongside the accepted ones in a
/// [`MembershipChange`](crate::container::MembershipChange) and leaves the
/// scene unchanged for that object.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The object is the container itself or one of its ancestors.
    #[error("adding {object:?} to {container:?} would create a cycle")]
    Cycle {
        /// The receiving container.
        container: ObjectId,
        /// The rejected object.
        object: ObjectId,
    },

    /// The object is already a direct member of the container.
    #[error("{object:?} is already a member of {container:?}")]
    DuplicateMember {
        /// The receiving container.
        container: ObjectId,
        /// The rejected object.
        object: ObjectId,
    },

    /// The object is not a direct member of the container.
    #[error("{object:?} is not a member of {container:?}")]
    NotAMember {
        /// The container that was asked to release the object.
        container: ObjectId,
        /// The rejected object.
        object: ObjectId,
    },

    /// The handle does not refer to a container.
    #[error("{0:?} is not a container")]
    NotAContainer(ObjectId),

    /// Selections cannot be members of other containers.
    #[error("{0:?} is a selection and cannot be nested")]
    TransientContainer(ObjectId),

    /// The object already clips another container or is a member somewhere.
    #[error("{0:?} cannot be used as a clip path")]
    ClipPathInUse(ObjectId),
}
