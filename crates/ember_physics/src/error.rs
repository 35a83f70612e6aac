//! Error types for the physics system

use thiserror::Error;

use crate::body::{KinematicBodyHandle, StaticBodyHandle};

/// Physics system errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Kinematic body not found, or the handle is stale
    #[error("Kinematic body not found: {0:?}")]
    KinematicBodyNotFound(KinematicBodyHandle),

    /// Static body not found, or the handle is stale
    #[error("Static body not found: {0:?}")]
    StaticBodyNotFound(StaticBodyHandle),

    /// Invalid configuration
    #[error("Invalid physics configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
