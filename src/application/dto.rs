//! Data Transfer Objects for application layer

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::ValidationError;

/// Request to generate a tool server project
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateServerRequest {
    /// File path or `http(s)://` URL of the OpenAPI description
    pub input: String,
    pub output_dir: PathBuf,
    /// Overwrite a non-empty output directory
    #[serde(default)]
    pub force: bool,
    /// Replaces the first server URL of the description
    #[serde(default)]
    pub base_url: Option<String>,
}

impl GenerateServerRequest {
    pub fn new(input: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            force: false,
            base_url: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.input.trim().is_empty() {
            return Err(ValidationError::MissingField("input".to_string()));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingField("output_dir".to_string()));
        }

        if let Some(base_url) = &self.base_url {
            let parsed = url::Url::parse(base_url).map_err(|e| ValidationError::InvalidBaseUrl {
                url: base_url.clone(),
                reason: e.to_string(),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ValidationError::InvalidBaseUrl {
                    url: base_url.clone(),
                    reason: format!("unsupported scheme '{}'", parsed.scheme()),
                });
            }
        }

        Ok(())
    }
}

/// Response from server generation
#[derive(Debug, Clone, Serialize)]
pub struct GenerateServerResponse {
    pub artifacts_count: usize,
    pub tools_count: usize,
    pub output_path: PathBuf,
    pub metadata: crate::generation::GenerationMetadata,
}
