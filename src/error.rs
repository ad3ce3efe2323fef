//! Error types shared by the tracker, the transition layer and the config loader.

use thiserror::Error;

/// Errors that can occur while configuring or driving motion components
#[derive(Error, Debug)]
pub enum MotionError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown transition type: {0}")]
    UnknownTransition(String),

    #[error("Already running")]
    AlreadyRunning,

    #[error("Tracker has been torn down")]
    TornDown,

    #[error("Input source error: {0}")]
    InputSource(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for motion operations
pub type MotionResult<T> = Result<T, MotionError>;
