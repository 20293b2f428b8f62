//! Application layer error types

use std::path::PathBuf;
use thiserror::Error;

/// Application layer errors
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("input not found: {0}")]
    InputNotFound(String),

    #[error("failed to read input {source_name}: {message}")]
    InputUnreadable {
        source_name: String,
        message: String,
    },

    #[error("invalid OpenAPI description: {0}")]
    InvalidSpec(String),

    #[error("OpenAPI {0} is not supported; use OpenAPI 3.x")]
    UnsupportedSpecVersion(String),

    #[error("no mappable operations found in OpenAPI description")]
    NoOperations,

    #[error("output directory {} is not empty; use --force to overwrite", .0.display())]
    OutputNotEmpty(PathBuf),

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("Generation error: {0}")]
    GenerationError(#[from] crate::generation::GenerationError),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),
}

impl ApplicationError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            ApplicationError::InputNotFound(_) | ApplicationError::InputUnreadable { .. } => 2,
            ApplicationError::OutputNotEmpty(_) => 3,
            ApplicationError::NoOperations => 4,
            ApplicationError::InvalidSpec(_)
            | ApplicationError::UnsupportedSpecVersion(_)
            | ApplicationError::OutputError(_)
            | ApplicationError::GenerationError(_)
            | ApplicationError::ValidationError(_) => 1,
        }
    }
}

/// Validation errors for requests
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
