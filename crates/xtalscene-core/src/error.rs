//! Error types for scene-tree operations.

use thiserror::Error;

/// The error type for scene-tree operations.
#[derive(Error, Debug)]
pub enum SceneError {
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for scene-tree operations.
pub type Result<T> = std::result::Result<T, SceneError>;
