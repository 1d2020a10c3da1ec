//! # ECS Error Types
//!
//! Every failure the core can report is a broken calling contract rather
//! than a transient condition, so nothing here is retryable.

use thiserror::Error;

use crate::ecs::Entity;

/// Errors returned by the ECS core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The entity's signature does not have the requested component's bit.
    #[error("{entity} has no component {component}")]
    ComponentAbsent {
        /// The entity that was queried.
        entity: Entity,
        /// Type name of the missing component.
        component: &'static str,
    },

    /// Pool access beyond the pool's current size.
    #[error("pool index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        /// The requested slot.
        index: usize,
        /// The pool size at the time of the access.
        len: usize,
    },

    /// The requested system type was never added, or was removed.
    #[error("system not registered: {0}")]
    SystemNotRegistered(&'static str),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for ECS operations.
pub type EcsResult<T> = Result<T, EcsError>;
