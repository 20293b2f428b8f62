//! Generation orchestration - coordinates naming and emission

use crate::generation::{
    ApiDescription, GenerationError, GenerationResult, ProjectEmitter, naming,
};

/// Runs the whole generation pipeline for one description.
///
/// Naming is completed for the full set before any per-tool synthesis starts.
/// Any error aborts the run; there is no partial result.
#[derive(Debug, Clone, Default)]
pub struct GenerationOrchestrator {
    emitter: ProjectEmitter,
}

impl GenerationOrchestrator {
    pub fn new(emitter: ProjectEmitter) -> Self {
        Self { emitter }
    }

    /// Execute the generation workflow
    pub fn generate(
        &self,
        description: &ApiDescription,
    ) -> Result<GenerationResult, GenerationError> {
        if description.operations.is_empty() {
            return Err(GenerationError::NoOperations);
        }

        tracing::debug!(
            operations = description.operations.len(),
            base_url = %description.base_url,
            "Orchestrator starting generation"
        );

        let tools = naming::operations_to_tools(&description.operations, &description.base_url);
        let artifacts = self.emitter.emit(&tools)?;

        tracing::info!(tools = tools.len(), "Generated tool registrations");

        Ok(GenerationResult {
            artifacts,
            tools,
            metadata: self.emitter.metadata().clone(),
        })
    }
}
