//! # Game Error Types

use kestrel_core::EcsError;
use thiserror::Error;

/// Errors returned by the game layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// A registry operation failed.
    #[error("ecs: {0}")]
    Ecs(#[from] EcsError),

    /// Invalid configuration file or values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
