//! Validate → export → (optionally) write.
//!
//! Export only ever runs on a definition that validated. A failed validation
//! is an `Ok` result without YAML; failed serialization or I/O is an `Err`.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::SdkConfig;
use crate::error::ExportError;
use crate::export::{DefinitionWriter, YamlExporter};
use crate::model::AgentDefinition;
use crate::validate::{DefinitionValidator, ValidationResult, Validator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationResult {
    pub validation_result: ValidationResult,
    pub yaml_content: Option<String>,
    /// Set only after the artifact was written.
    pub output_path: Option<PathBuf>,
}

impl CompilationResult {
    fn failed(validation_result: ValidationResult) -> Self {
        Self {
            validation_result,
            yaml_content: None,
            output_path: None,
        }
    }

    pub fn is_successful(&self) -> bool {
        self.validation_result.is_valid() && self.yaml_content.is_some()
    }
}

/// Caller-owned entry point bundling a validator and a writer.
pub struct DefinitionService {
    validator: Box<dyn DefinitionValidator + Send + Sync>,
    writer: Box<dyn DefinitionWriter + Send + Sync>,
}

impl Default for DefinitionService {
    fn default() -> Self {
        Self::with_config(&SdkConfig::default())
    }
}

impl DefinitionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &SdkConfig) -> Self {
        Self {
            validator: Box::new(Validator::with_options(config.analyzer.clone())),
            writer: Box::new(YamlExporter::new(config.export.clone())),
        }
    }

    /// Swap in other validator / writer implementations.
    pub fn from_parts(
        validator: impl DefinitionValidator + Send + Sync + 'static,
        writer: impl DefinitionWriter + Send + Sync + 'static,
    ) -> Self {
        Self {
            validator: Box::new(validator),
            writer: Box::new(writer),
        }
    }

    pub fn validate(&self, definition: &AgentDefinition) -> ValidationResult {
        self.validator.validate(definition)
    }

    /// Export without validating. Prefer [`DefinitionService::compile`].
    pub fn export(&self, definition: &AgentDefinition) -> Result<String, ExportError> {
        self.writer.export(definition)
    }

    /// Export and write without validating. Prefer [`DefinitionService::compile_to_file`].
    pub fn export_to_file(
        &self,
        definition: &AgentDefinition,
        path: &Path,
    ) -> Result<(), ExportError> {
        let yaml = self.writer.export(definition)?;
        self.writer.write(&yaml, path)
    }

    pub fn compile(&self, definition: &AgentDefinition) -> Result<CompilationResult, ExportError> {
        let validation_result = self.validate(definition);
        if !validation_result.is_valid() {
            warn!(
                agent = %definition.name,
                errors = validation_result.blocking().count(),
                "validation failed; skipping export"
            );
            return Ok(CompilationResult::failed(validation_result));
        }

        let yaml = self.writer.export(definition)?;
        info!(
            agent = %definition.name,
            warnings = validation_result.warnings().count(),
            "compiled agent definition"
        );
        Ok(CompilationResult {
            validation_result,
            yaml_content: Some(yaml),
            output_path: None,
        })
    }

    pub fn compile_to_file(
        &self,
        definition: &AgentDefinition,
        path: &Path,
    ) -> Result<CompilationResult, ExportError> {
        let mut result = self.compile(definition)?;
        if let Some(yaml) = &result.yaml_content {
            self.writer.write(yaml, path)?;
            info!(agent = %definition.name, path = %path.display(), "wrote compiled artifact");
            result.output_path = Some(path.to_path_buf());
        }
        Ok(result)
    }
}
