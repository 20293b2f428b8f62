//! File-based API description loader
//!
//! This loader handles only file I/O. Parsing is done by the OpenApiParser.

use async_trait::async_trait;
use tokio::fs;

use super::parser::{OpenApiParser, parse_document};
use crate::generation::{ApiDescription, GenerationError, OpenApiLoader};

/// Loads API descriptions from local files
pub struct FileOpenApiLoader;

impl FileOpenApiLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OpenApiLoader for FileOpenApiLoader {
    async fn load(&self, source: &str) -> Result<ApiDescription, GenerationError> {
        let content = fs::read_to_string(source)
            .await
            .map_err(GenerationError::IoError)?;
        tracing::debug!(source = %source, bytes = content.len(), "Read API description");

        let document = parse_document(&content, source)?;
        OpenApiParser::new(document).parse()
    }
}

impl Default for FileOpenApiLoader {
    fn default() -> Self {
        Self::new()
    }
}
