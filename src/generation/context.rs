//! Generation metadata shared by the emitter and the application layer

use serde::{Deserialize, Serialize};

/// Default name of the generated project
pub const DEFAULT_PROJECT_NAME: &str = "generated-mcp";

/// Default version of the generated project
pub const DEFAULT_PROJECT_VERSION: &str = "1.0.0";

/// Metadata about the generated project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    pub project_name: String,
    pub version: String,
}

impl Default for GenerationMetadata {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            version: DEFAULT_PROJECT_VERSION.to_string(),
        }
    }
}
