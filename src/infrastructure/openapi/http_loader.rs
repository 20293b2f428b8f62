//! HTTP-based API description loader

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::parser::{OpenApiParser, parse_document};
use crate::generation::{ApiDescription, GenerationError, OpenApiLoader};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Loads API descriptions from HTTP/HTTPS URLs
pub struct HttpOpenApiLoader {
    client: Client,
}

impl HttpOpenApiLoader {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {e}");
                Client::new()
            });

        Self { client }
    }
}

impl Default for HttpOpenApiLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OpenApiLoader for HttpOpenApiLoader {
    async fn load(&self, source: &str) -> Result<ApiDescription, GenerationError> {
        if !source.starts_with("http://") && !source.starts_with("https://") {
            return Err(GenerationError::LoadError(format!(
                "HttpOpenApiLoader only handles HTTP(S) URLs, got: {source}"
            )));
        }

        let response = self.client.get(source).send().await.map_err(|e| {
            GenerationError::LoadError(format!(
                "Failed to fetch API description from {source}: {e}"
            ))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::LoadError(format!(
                "HTTP {status} when fetching {source}"
            )));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let content = response.text().await.map_err(|e| {
            GenerationError::LoadError(format!("Failed to read response body: {e}"))
        })?;

        // The content type takes precedence over the URL extension
        let hint = if content_type.contains("json") {
            "response.json"
        } else if content_type.contains("yaml") {
            "response.yaml"
        } else {
            source
        };
        let document = parse_document(&content, hint)?;
        OpenApiParser::new(document).parse()
    }
}
