//! Use case for generating a tool server project

use std::sync::Arc;

use crate::application::{
    ApplicationError, GenerateServerRequest, GenerateServerResponse, OutputService,
};
use crate::generation::{GenerationError, GenerationOrchestrator, OpenApiLoader};

/// Use case for generating a tool server project
pub struct GenerateServerUseCase {
    openapi_loader: Arc<dyn OpenApiLoader>,
    generation_orchestrator: Arc<GenerationOrchestrator>,
    output_service: Arc<dyn OutputService>,
}

impl GenerateServerUseCase {
    pub fn new(
        openapi_loader: Arc<dyn OpenApiLoader>,
        generation_orchestrator: Arc<GenerationOrchestrator>,
        output_service: Arc<dyn OutputService>,
    ) -> Self {
        Self {
            openapi_loader,
            generation_orchestrator,
            output_service,
        }
    }

    pub async fn execute(
        &self,
        request: GenerateServerRequest,
    ) -> Result<GenerateServerResponse, ApplicationError> {
        // 1. Validate request
        request.validate()?;

        // 2. Load and normalize the description
        let mut description = self
            .openapi_loader
            .load(&request.input)
            .await
            .map_err(|e| load_error(&request.input, e))?;

        if let Some(base_url) = &request.base_url {
            tracing::debug!(base_url = %base_url, "Overriding server URL");
            description = description.with_base_url(base_url);
        }

        tracing::info!(
            input = %request.input,
            version = %description.version,
            operations = description.operations.len(),
            "Loaded OpenAPI description"
        );

        // 3. Generate
        let result = self
            .generation_orchestrator
            .generate(&description)
            .map_err(|e| match e {
                GenerationError::NoOperations => ApplicationError::NoOperations,
                other => ApplicationError::GenerationError(other),
            })?;

        // 4. Refuse to clobber existing work
        if !request.force && !self.output_service.is_empty(&request.output_dir).await? {
            return Err(ApplicationError::OutputNotEmpty(request.output_dir));
        }

        // 5. Write
        self.output_service
            .ensure_directory(&request.output_dir)
            .await?;
        self.output_service
            .write_artifacts(&request.output_dir, &result.artifacts)
            .await?;

        Ok(GenerateServerResponse {
            artifacts_count: result.artifacts.len(),
            tools_count: result.tools.len(),
            output_path: request.output_dir,
            metadata: result.metadata,
        })
    }
}

/// Classifies a loader failure by what the user has to fix
fn load_error(input: &str, error: GenerationError) -> ApplicationError {
    match error {
        GenerationError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
            ApplicationError::InputNotFound(input.to_string())
        }
        GenerationError::IoError(e) => ApplicationError::InputUnreadable {
            source_name: input.to_string(),
            message: e.to_string(),
        },
        GenerationError::LoadError(message) => ApplicationError::InputUnreadable {
            source_name: input.to_string(),
            message,
        },
        GenerationError::UnsupportedSpecVersion(version) => {
            ApplicationError::UnsupportedSpecVersion(version)
        }
        GenerationError::ValidationError(message) => ApplicationError::InvalidSpec(message),
        GenerationError::SerializationError(e) => ApplicationError::InvalidSpec(e.to_string()),
        GenerationError::NoOperations => ApplicationError::NoOperations,
    }
}
