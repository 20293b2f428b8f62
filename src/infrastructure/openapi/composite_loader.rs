//! Loader that dispatches on the kind of source

use async_trait::async_trait;

use super::{FileOpenApiLoader, HttpOpenApiLoader};
use crate::generation::{ApiDescription, GenerationError, OpenApiLoader};

/// Uses the HTTP loader for URLs and the file loader for everything else
pub struct CompositeOpenApiLoader {
    http: HttpOpenApiLoader,
    file: FileOpenApiLoader,
}

impl CompositeOpenApiLoader {
    pub fn new() -> Self {
        Self {
            http: HttpOpenApiLoader::new(),
            file: FileOpenApiLoader::new(),
        }
    }
}

impl Default for CompositeOpenApiLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OpenApiLoader for CompositeOpenApiLoader {
    async fn load(&self, source: &str) -> Result<ApiDescription, GenerationError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            tracing::debug!(source = %source, "Loading API description over HTTP");
            self.http.load(source).await
        } else {
            tracing::debug!(source = %source, "Loading API description from file");
            self.file.load(source).await
        }
    }
}
