//! Port interfaces for the generation domain

use crate::generation::{ApiDescription, GenerationError};
use async_trait::async_trait;

/// Loads and normalizes an API description
#[async_trait]
pub trait OpenApiLoader: Send + Sync {
    /// Load a description from a source (file path or URL)
    async fn load(&self, source: &str) -> Result<ApiDescription, GenerationError>;
}
