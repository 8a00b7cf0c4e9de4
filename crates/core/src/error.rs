// Central Error Type for the timed task library

use thiserror::Error;

/// Library-level error type
#[derive(Error, Debug)]
pub enum TaskError {
    /// The OS refused to create the worker thread
    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias using TaskError
pub type Result<T> = std::result::Result<T, TaskError>;
