//! Scene and hierarchy errors
//!
//! None of these are fatal: every operation that can fail reports the
//! failure and leaves the scene untouched, so the frame loop keeps running.

use crate::foundation::collections::ActorId;
use thiserror::Error;

/// Errors reported by actor, hierarchy, and scene operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The handle does not refer to a live actor
    #[error("actor {0:?} does not exist")]
    ActorNotFound(ActorId),

    /// The actor is alive but not registered in this scene
    #[error("actor {0:?} is not part of this scene")]
    NotInScene(ActorId),

    /// An actor index is outside the scene's actor list
    #[error("actor index {index} out of range (scene holds {len} actors)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of actors in the scene
        len: usize,
    },

    /// A scene index is outside the scene manager's list
    #[error("scene index {index} out of range ({len} scenes registered)")]
    SceneNotFound {
        /// Requested index
        index: usize,
        /// Number of registered scenes
        len: usize,
    },

    /// The child is not attached to the given parent
    #[error("actor {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// Parent handle
        parent: ActorId,
        /// Child handle
        child: ActorId,
    },

    /// The child is already attached to the given parent
    #[error("actor {child:?} is already a child of {parent:?}")]
    AlreadyChild {
        /// Parent handle
        parent: ActorId,
        /// Child handle
        child: ActorId,
    },

    /// An actor cannot be its own parent
    #[error("actor {0:?} cannot be parented to itself")]
    SelfParent(ActorId),

    /// Attaching would make an actor its own ancestor
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    HierarchyCycle {
        /// Parent handle
        parent: ActorId,
        /// Child handle
        child: ActorId,
    },
}

/// Result alias for scene operations
pub type SceneResult<T> = Result<T, SceneError>;
