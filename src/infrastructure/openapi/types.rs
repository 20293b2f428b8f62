//! Normalized API description handed to the generation domain

use serde::Serialize;

use crate::generation::Operation;

/// Result of parsing an OpenAPI 3.x document
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDescription {
    /// Value of the document's `openapi` field
    pub version: String,
    /// First server URL without trailing slash, or empty
    pub base_url: String,
    /// Operations in sorted path order, then fixed method order
    pub operations: Vec<Operation>,
}

impl ApiDescription {
    /// Replaces the base origin, trimming any trailing slash
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}
