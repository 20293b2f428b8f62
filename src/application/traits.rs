//! Port interfaces for the application layer

use async_trait::async_trait;
use std::path::Path;

use crate::application::ApplicationError;
use crate::generation::Artifact;

/// Service for writing generated artifacts to the output destination
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Write all artifacts below `output_dir`, overwriting existing files
    async fn write_artifacts(
        &self,
        output_dir: &Path,
        artifacts: &[Artifact],
    ) -> Result<(), ApplicationError>;

    /// Ensure a directory exists
    async fn ensure_directory(&self, path: &Path) -> Result<(), ApplicationError>;

    /// Whether `path` is missing or an empty directory
    async fn is_empty(&self, path: &Path) -> Result<bool, ApplicationError>;
}
