//! One-call helpers over a default [`DefinitionService`].
//!
//! Each call builds its own service; there is no shared instance. Hold a
//! `DefinitionService` yourself to reuse configuration across calls.

use std::path::Path;

use crate::compile::{CompilationResult, DefinitionService};
use crate::error::ExportError;
use crate::model::AgentDefinition;
use crate::validate::ValidationResult;

pub fn validate(definition: &AgentDefinition) -> ValidationResult {
    DefinitionService::new().validate(definition)
}

/// Export without validation. Use [`compile_agent`] before submitting.
pub fn export_yaml(definition: &AgentDefinition) -> Result<String, ExportError> {
    DefinitionService::new().export(definition)
}

/// Validate, export, and write to `output_path` when one is given.
pub fn compile_agent(
    definition: &AgentDefinition,
    output_path: Option<&Path>,
) -> Result<CompilationResult, ExportError> {
    let service = DefinitionService::new();
    match output_path {
        Some(path) => service.compile_to_file(definition, path),
        None => service.compile(definition),
    }
}
