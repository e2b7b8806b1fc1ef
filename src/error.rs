//! Error types raised at the crate's boundaries.
//!
//! Validation findings are never errors: they are `ValidationError` values
//! collected into a `ValidationResult`. The types here cover the two places
//! that do fail: assembling entities through the builders, and exporting or
//! writing the YAML artifact.

use std::path::PathBuf;

use thiserror::Error;

/// Construction-time failures reported by the fluent builders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error(
        "Required field '{field}' is not set in {builder}. Please call .{field}(...) before .build()"
    )]
    MissingRequiredField {
        field: &'static str,
        builder: &'static str,
    },

    #[error("Invalid value for '{field}': '{value}'. {constraint}")]
    InvalidValue {
        field: &'static str,
        value: String,
        constraint: String,
    },

    #[error(
        "Node '{node}' references undefined {resource_type} '{reference}'. Please ensure the {resource_type} is defined before building."
    )]
    InvalidReference {
        node: String,
        resource_type: String,
        reference: String,
    },

    #[error(
        "Duplicate {entity_type} name '{name}' in {scope}. Each {entity_type} must have a unique name within its scope."
    )]
    DuplicateName {
        entity_type: &'static str,
        name: String,
        scope: String,
    },

    #[error("{parent} has no {collection}. At least one entry is required.")]
    EmptyCollection {
        collection: &'static str,
        parent: String,
    },
}

/// Failures while serializing or persisting the YAML artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize agent definition to YAML: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid SDK configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
