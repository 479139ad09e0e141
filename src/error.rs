//! Core error types for fieldpack

use thiserror::Error;

/// Main error type for fieldpack operations
#[derive(Error, Debug)]
pub enum FieldpackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Workspace error: {0}")]
    Workspace(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),
}

/// Result type alias for fieldpack operations
pub type Result<T> = std::result::Result<T, FieldpackError>;

impl From<serde_json::Error> for FieldpackError {
    fn from(err: serde_json::Error) -> Self {
        FieldpackError::Serialization(err.to_string())
    }
}

impl From<geojson::Error> for FieldpackError {
    fn from(err: geojson::Error) -> Self {
        FieldpackError::Geometry(err.to_string())
    }
}
