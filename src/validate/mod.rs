//! Validation pipeline: schema validation + static analysis.
//!
//! Both passes are pure functions of the definition. Their findings are
//! concatenated (schema first, analysis second) into one `ValidationResult`.

pub mod analyzer;
pub mod graph;
pub mod rules;
pub mod schema;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::AgentDefinition;

pub use analyzer::{AnalyzerOptions, StaticAnalyzer};
pub use schema::SchemaValidator;

// =============================================================================
// FINDINGS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks compilation and submission.
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MissingRequiredField,
    InvalidValueFormat,
    DuplicateName,
    DuplicateIoName,
    InvalidSchemaShape,
    MissingEntryNode,
    InvalidReference,
    CircularDependency,
    UnreachableNode,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            ErrorCode::InvalidValueFormat => "INVALID_VALUE_FORMAT",
            ErrorCode::DuplicateName => "DUPLICATE_NAME",
            ErrorCode::DuplicateIoName => "DUPLICATE_IO_NAME",
            ErrorCode::InvalidSchemaShape => "INVALID_SCHEMA_SHAPE",
            ErrorCode::MissingEntryNode => "MISSING_ENTRY_NODE",
            ErrorCode::InvalidReference => "INVALID_REFERENCE",
            ErrorCode::CircularDependency => "CIRCULAR_DEPENDENCY",
            ErrorCode::UnreachableNode => "UNREACHABLE_NODE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<&str> for ErrorCode {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// One issue found in an agent definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub code: ErrorCode,
    /// JSON-Path-like location, e.g. `workflows[0].nodes[1].reference`.
    pub path: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationError {
    pub fn error(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            code,
            path: path.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            code,
            path: path.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.severity == Severity::Warning {
            write!(f, "warning: ")?;
        }
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)
    }
}

/// Every finding of one validation run, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// True when no finding has `Severity::Error`. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        !self.errors.iter().any(ValidationError::is_error)
    }

    pub fn has_warnings(&self) -> bool {
        self.errors.iter().any(|e| e.severity == Severity::Warning)
    }

    /// All findings, errors and warnings alike.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn blocking(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(|e| e.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(|e| e.severity == Severity::Warning)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

// =============================================================================
// SEAMS
// =============================================================================

/// Structural, type and format checks.
pub trait SchemaCheck {
    fn validate_schema(&self, definition: &AgentDefinition) -> Vec<ValidationError>;
}

/// Reference resolution, cycle and reachability checks over the workflow graphs.
pub trait GraphAnalysis {
    fn analyze(&self, definition: &AgentDefinition) -> Vec<ValidationError>;
}

pub trait DefinitionValidator {
    fn validate(&self, definition: &AgentDefinition) -> ValidationResult;
}

// =============================================================================
// AGGREGATOR
// =============================================================================

/// Runs a schema check and a graph analysis and merges their findings.
#[derive(Debug, Clone)]
pub struct Validator<S = SchemaValidator, A = StaticAnalyzer> {
    schema: S,
    analyzer: A,
}

impl Default for Validator {
    fn default() -> Self {
        Validator::with_options(AnalyzerOptions::default())
    }
}

impl Validator {
    pub fn with_options(options: AnalyzerOptions) -> Self {
        Validator {
            schema: SchemaValidator,
            analyzer: StaticAnalyzer::new(options),
        }
    }
}

impl<S: SchemaCheck, A: GraphAnalysis> Validator<S, A> {
    pub fn new(schema: S, analyzer: A) -> Self {
        Validator { schema, analyzer }
    }
}

impl<S: SchemaCheck, A: GraphAnalysis> DefinitionValidator for Validator<S, A> {
    fn validate(&self, definition: &AgentDefinition) -> ValidationResult {
        let mut errors = self.schema.validate_schema(definition);
        let schema_count = errors.len();
        errors.extend(self.analyzer.analyze(definition));

        debug!(
            agent = %definition.name,
            schema = schema_count,
            analysis = errors.len() - schema_count,
            "validated agent definition"
        );

        ValidationResult::new(errors)
    }
}

/// Validate with the default schema validator and analyzer.
pub fn validate_definition(definition: &AgentDefinition) -> ValidationResult {
    Validator::default().validate(definition)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(Vec<ValidationError>);

    impl SchemaCheck for Canned {
        fn validate_schema(&self, _: &AgentDefinition) -> Vec<ValidationError> {
            self.0.clone()
        }
    }

    impl GraphAnalysis for Canned {
        fn analyze(&self, _: &AgentDefinition) -> Vec<ValidationError> {
            self.0.clone()
        }
    }

    fn empty_agent() -> AgentDefinition {
        AgentDefinition {
            name: "empty".into(),
            version: "1.0.0".into(),
            description: "nothing".into(),
            workflows: vec![],
            modules: vec![],
            prompts: vec![],
            tools: vec![],
            task_goal: None,
            completion_criteria: None,
            eip_dependencies: vec![],
        }
    }

    #[test]
    fn concatenates_schema_then_analysis() {
        let schema = Canned(vec![ValidationError::error(
            ErrorCode::DuplicateName,
            "modules[1].name",
            "dup",
        )]);
        let analyzer = Canned(vec![ValidationError::warning(
            ErrorCode::UnreachableNode,
            "workflows[0].nodes[2]",
            "unreachable",
        )]);

        let result = Validator::new(schema, analyzer).validate(&empty_agent());

        let codes: Vec<_> = result.errors().iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![ErrorCode::DuplicateName, ErrorCode::UnreachableNode]);
        assert!(!result.is_valid());
        assert!(result.has_warnings());
        assert_eq!(result.blocking().count(), 1);
        assert_eq!(result.warnings().count(), 1);
    }

    #[test]
    fn warnings_alone_keep_result_valid() {
        let result = ValidationResult::new(vec![ValidationError::warning(
            ErrorCode::DuplicateIoName,
            "workflows[0].nodes[0].inputs[1]",
            "dup",
        )]);
        assert!(result.is_valid());
        assert!(result.has_warnings());
    }

    #[test]
    fn display_and_serialized_code() {
        let err = ValidationError::error(
            ErrorCode::InvalidReference,
            "workflows[0].nodes[0].reference",
            "Node 'a' references undefined module 'm'",
        );
        assert_eq!(
            err.to_string(),
            "[INVALID_REFERENCE] workflows[0].nodes[0].reference: Node 'a' references undefined module 'm'"
        );
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "INVALID_REFERENCE");
        assert_eq!(json["severity"], "error");
        assert!(err.code == "INVALID_REFERENCE");
    }

    #[test]
    fn default_pipeline_accepts_minimal_agent() {
        let result = validate_definition(&empty_agent());
        assert!(result.is_valid());
        assert!(result.is_empty());
    }
}
