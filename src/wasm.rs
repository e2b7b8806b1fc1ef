//! WASM entry points for browser use.
//!
//! Definitions arrive as JSON in the entity model's serde shape.

use wasm_bindgen::prelude::*;

use crate::compile::DefinitionService;
use crate::model::AgentDefinition;
use crate::validate::ValidationError;

/// Validate an agent definition JSON.
/// Returns a JSON array of error DTOs (empty when the definition is clean).
#[wasm_bindgen]
pub fn validate_definition(json: &str) -> JsValue {
    let result = validate_definition_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_definition_inner(json: &str) -> Vec<ErrorDto> {
    let definition = match parse(json) {
        Ok(d) => d,
        Err(dto) => return vec![dto],
    };

    DefinitionService::new()
        .validate(&definition)
        .into_errors()
        .into_iter()
        .map(ErrorDto::from)
        .collect()
}

/// Full pipeline: parse → validate → export.
/// Returns `{status: "success", yaml, warnings}` or `{status: "errors", errors}`.
#[wasm_bindgen]
pub fn compile_definition(json: &str) -> JsValue {
    let result = compile_definition_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn compile_definition_inner(json: &str) -> CompileResult {
    let definition = match parse(json) {
        Ok(d) => d,
        Err(dto) => return CompileResult::Errors { errors: vec![dto] },
    };

    let compiled = match DefinitionService::new().compile(&definition) {
        Ok(c) => c,
        Err(e) => {
            return CompileResult::Errors {
                errors: vec![ErrorDto {
                    code: "EXPORT_ERROR".into(),
                    path: String::new(),
                    message: e.to_string(),
                    severity: "error".into(),
                }],
            };
        }
    };

    let findings = compiled.validation_result.into_errors();
    match compiled.yaml_content {
        Some(yaml) => CompileResult::Success {
            yaml,
            warnings: findings.into_iter().map(ErrorDto::from).collect(),
        },
        None => CompileResult::Errors {
            errors: findings.into_iter().map(ErrorDto::from).collect(),
        },
    }
}

fn parse(json: &str) -> Result<AgentDefinition, ErrorDto> {
    serde_json::from_str::<AgentDefinition>(json).map_err(|e| ErrorDto {
        code: "PARSE_ERROR".into(),
        path: String::new(),
        message: format!("Failed to parse agent definition JSON: {}", e),
        severity: "error".into(),
    })
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct ErrorDto {
    code: String,
    path: String,
    message: String,
    severity: String,
}

impl From<ValidationError> for ErrorDto {
    fn from(e: ValidationError) -> Self {
        let severity = if e.is_error() { "error" } else { "warning" };
        ErrorDto {
            code: e.code.to_string(),
            path: e.path,
            message: e.message,
            severity: severity.into(),
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "status")]
enum CompileResult {
    #[serde(rename = "success")]
    Success { yaml: String, warnings: Vec<ErrorDto> },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}
