//! Schema validation: required fields, naming/version formats, name
//! uniqueness and the shape of attached JSON schemas.
//!
//! Every rule appends to the shared error list and keeps going, so one call
//! reports every schema issue in the definition.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use super::rules::{NAME_CONSTRAINT, VERSION_CONSTRAINT, is_valid_name, is_valid_version};
use super::{ErrorCode, SchemaCheck, ValidationError};
use crate::model::schema::{DeclaredType, PRIMITIVE_TYPES, SchemaShape, SchemaType};
use crate::model::{AgentDefinition, Node, Workflow};

#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl SchemaCheck for SchemaValidator {
    fn validate_schema(&self, definition: &AgentDefinition) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        validate_agent_fields(definition, &mut errors);
        validate_workflows(&definition.workflows, &mut errors);
        validate_resources(definition, &mut errors);
        validate_eip_dependencies(definition, &mut errors);

        errors
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn require(value: &str, path: &str, field: &str, errors: &mut Vec<ValidationError>) -> bool {
    if is_blank(value) {
        errors.push(ValidationError::error(
            ErrorCode::MissingRequiredField,
            path,
            format!("Required field '{field}' is missing or empty"),
        ));
        return false;
    }
    true
}

/// Required + `[a-z0-9-]+`.
fn require_name(name: &str, path: &str, entity: &str, errors: &mut Vec<ValidationError>) {
    if !require(name, path, "name", errors) {
        return;
    }
    if !is_valid_name(name) {
        errors.push(ValidationError::error(
            ErrorCode::InvalidValueFormat,
            path,
            format!("Invalid {entity} name '{name}'. {NAME_CONSTRAINT}"),
        ));
    }
}

fn require_description(description: &str, parent: &str, errors: &mut Vec<ValidationError>) {
    require(
        description,
        &format!("{parent}.description"),
        "description",
        errors,
    );
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

fn validate_agent_fields(definition: &AgentDefinition, errors: &mut Vec<ValidationError>) {
    require_name(&definition.name, "agent.name", "agent", errors);

    if require(&definition.version, "agent.version", "version", errors)
        && !is_valid_version(&definition.version)
    {
        errors.push(ValidationError::error(
            ErrorCode::InvalidValueFormat,
            "agent.version",
            format!(
                "Invalid version '{}'. {VERSION_CONSTRAINT}",
                definition.version
            ),
        ));
    }

    require(
        &definition.description,
        "agent.description",
        "description",
        errors,
    );

    if let Some(goal) = &definition.task_goal {
        require(goal, "agent.task_goal", "task_goal", errors);
    }

    if let Some(criteria) = &definition.completion_criteria {
        require(
            &criteria.success,
            "agent.completion_criteria.success",
            "success",
            errors,
        );
        require(
            &criteria.failure,
            "agent.completion_criteria.failure",
            "failure",
            errors,
        );
    }
}

// ---------------------------------------------------------------------------
// Workflows and nodes
// ---------------------------------------------------------------------------

fn validate_workflows(workflows: &[Workflow], errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();

    for (wi, workflow) in workflows.iter().enumerate() {
        let path = format!("workflows[{wi}]");
        require_name(&workflow.name, &format!("{path}.name"), "workflow", errors);
        require_description(&workflow.description, &path, errors);

        if !is_blank(&workflow.name) && !seen.insert(workflow.name.as_str()) {
            errors.push(ValidationError::error(
                ErrorCode::DuplicateName,
                format!("{path}.name"),
                format!("Duplicate workflow name '{}'", workflow.name),
            ));
        }

        let mut node_names = HashSet::new();
        for (ni, node) in workflow.nodes.iter().enumerate() {
            let node_path = format!("{path}.nodes[{ni}]");
            validate_node(node, &node_path, errors);

            if !is_blank(&node.name) && !node_names.insert(node.name.as_str()) {
                errors.push(ValidationError::error(
                    ErrorCode::DuplicateName,
                    format!("{node_path}.name"),
                    format!(
                        "Duplicate node name '{}' in workflow '{}'",
                        node.name, workflow.name
                    ),
                ));
            }
        }
    }
}

fn validate_node(node: &Node, path: &str, errors: &mut Vec<ValidationError>) {
    require_name(&node.name, &format!("{path}.name"), "node", errors);
    require_description(&node.description, path, errors);

    let reference_path = format!("{path}.reference");
    if require(&node.reference, &reference_path, "reference", errors)
        && !is_valid_name(&node.reference)
    {
        errors.push(ValidationError::error(
            ErrorCode::InvalidValueFormat,
            reference_path,
            format!(
                "Invalid {} reference '{}'. {NAME_CONSTRAINT}",
                node.node_type, node.reference
            ),
        ));
    }
    validate_io_names(&node.inputs, &format!("{path}.inputs"), errors);
    validate_io_names(&node.outputs, &format!("{path}.outputs"), errors);
}

/// Empty names are errors; repeated names are warnings.
fn validate_io_names(names: &[String], path: &str, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for (i, name) in names.iter().enumerate() {
        if is_blank(name) {
            errors.push(ValidationError::error(
                ErrorCode::InvalidValueFormat,
                format!("{path}[{i}]"),
                "Input/output names must be non-empty strings",
            ));
            continue;
        }
        if !seen.insert(name.as_str()) {
            errors.push(ValidationError::warning(
                ErrorCode::DuplicateIoName,
                format!("{path}[{i}]"),
                format!("Duplicate input/output name '{name}'"),
            ));
        }
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

fn validate_resources(definition: &AgentDefinition, errors: &mut Vec<ValidationError>) {
    // Modules, prompts and tools share one namespace.
    let mut declared: HashMap<&str, &'static str> = HashMap::new();

    for (i, module) in definition.modules.iter().enumerate() {
        let path = format!("modules[{i}]");
        check_resource_name(&module.name, "module", &path, &mut declared, errors);
        require_description(&module.description, &path, errors);
        check_schema(module.input_schema.as_ref(), &format!("{path}.input_schema"), errors);
        check_schema(module.output_schema.as_ref(), &format!("{path}.output_schema"), errors);
    }

    for (i, prompt) in definition.prompts.iter().enumerate() {
        let path = format!("prompts[{i}]");
        check_resource_name(&prompt.name, "prompt", &path, &mut declared, errors);
        require_description(&prompt.description, &path, errors);
        require(&prompt.template, &format!("{path}.template"), "template", errors);
    }

    for (i, tool) in definition.tools.iter().enumerate() {
        let path = format!("tools[{i}]");
        check_resource_name(&tool.name, "tool", &path, &mut declared, errors);
        require_description(&tool.description, &path, errors);
        check_schema(tool.input_schema.as_ref(), &format!("{path}.input_schema"), errors);
        check_schema(tool.output_schema.as_ref(), &format!("{path}.output_schema"), errors);
        if let Some(binding) = &tool.eip_binding {
            require(
                &binding.provider,
                &format!("{path}.eip_binding.provider"),
                "provider",
                errors,
            );
            require(
                &binding.service,
                &format!("{path}.eip_binding.service"),
                "service",
                errors,
            );
        }
    }
}

fn check_resource_name<'a>(
    name: &'a str,
    kind: &'static str,
    path: &str,
    declared: &mut HashMap<&'a str, &'static str>,
    errors: &mut Vec<ValidationError>,
) {
    let name_path = format!("{path}.name");
    require_name(name, &name_path, kind, errors);
    if is_blank(name) {
        return;
    }

    match declared.get(name) {
        Some(first) => errors.push(ValidationError::error(
            ErrorCode::DuplicateName,
            name_path,
            format!("Duplicate resource name '{name}': {kind} conflicts with an existing {first}"),
        )),
        None => {
            declared.insert(name, kind);
        }
    }
}

/// Shallow shape check: must be a mapping whose `type`, if present, names
/// JSON Schema primitive types.
fn check_schema(schema: Option<&Value>, path: &str, errors: &mut Vec<ValidationError>) {
    let Some(schema) = schema else { return };

    let SchemaShape::Object(object) = SchemaShape::of(schema) else {
        errors.push(ValidationError::error(
            ErrorCode::InvalidSchemaShape,
            path,
            format!(
                "Schema must be an object, found {}",
                SchemaShape::of(schema).kind()
            ),
        ));
        return;
    };

    let bad_type = match object.declared_type() {
        DeclaredType::Absent => None,
        DeclaredType::Single(SchemaType::Unknown(name)) => Some(format!("'{name}'")),
        DeclaredType::Single(_) => None,
        DeclaredType::Union(types) if types.is_empty() => Some("an empty list".to_string()),
        DeclaredType::Union(types) => types
            .into_iter()
            .find(|t| !t.is_known())
            .map(|t| match t {
                SchemaType::Unknown(name) => format!("'{name}'"),
                other => format!("{other:?}"),
            }),
        DeclaredType::Malformed(value) => Some(value.to_string()),
    };

    if let Some(found) = bad_type {
        errors.push(ValidationError::error(
            ErrorCode::InvalidSchemaShape,
            format!("{path}.type"),
            format!(
                "Schema type must be one of {}, found {found}",
                PRIMITIVE_TYPES.join(", ")
            ),
        ));
    }
}

// ---------------------------------------------------------------------------
// EIP dependencies
// ---------------------------------------------------------------------------

fn validate_eip_dependencies(definition: &AgentDefinition, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for (i, dep) in definition.eip_dependencies.iter().enumerate() {
        let path = format!("eip_dependencies[{i}]");
        let provider = require(&dep.provider, &format!("{path}.provider"), "provider", errors);
        let service = require(&dep.service, &format!("{path}.service"), "service", errors);

        if provider && service && !seen.insert((dep.provider.as_str(), dep.service.as_str())) {
            errors.push(ValidationError::error(
                ErrorCode::DuplicateName,
                path,
                format!(
                    "Duplicate EIP dependency '{}/{}'",
                    dep.provider, dep.service
                ),
            ));
        }
    }
}
