//! Error types for the generation domain

use thiserror::Error;

/// Errors that can occur while loading a description or generating a project.
///
/// Malformed schema fragments are not represented here: schema translation is
/// total and degrades them to a permissive validator. Name collisions are not
/// either, since deduplication always terminates with a unique name.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("no mappable operations found in OpenAPI description")]
    NoOperations,

    #[error("OpenAPI {0} is not supported; use OpenAPI 3.x")]
    UnsupportedSpecVersion(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("OpenAPI loading error: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
