//! Error type for physics setup and input validation

/// Errors raised when configuring or driving a rigid body
#[derive(Debug, thiserror::Error)]
pub enum PhysicsError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
