//! Fluent builders for the entity model.
//!
//! Builders catch construction mistakes early (missing fields, bad names,
//! duplicates, dangling resource references) and report them as
//! `BuilderError`. They are a convenience only: the validation pipeline
//! accepts definitions however they were assembled.

use std::collections::HashSet;

use serde_json::Value;

use super::types::*;
use crate::error::BuilderError;
use crate::validate::rules::{NAME_CONSTRAINT, VERSION_CONSTRAINT, is_valid_name, is_valid_version};

fn check_name(field: &'static str, name: &str) -> Result<(), BuilderError> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(BuilderError::InvalidValue {
            field,
            value: name.to_string(),
            constraint: NAME_CONSTRAINT.to_string(),
        })
    }
}

fn required(
    value: Option<String>,
    field: &'static str,
    builder: &'static str,
) -> Result<String, BuilderError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(BuilderError::MissingRequiredField { field, builder }),
    }
}

fn strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

// =============================================================================
// NODE
// =============================================================================

#[derive(Debug, Clone)]
pub struct NodeBuilder {
    name: String,
    description: Option<String>,
    reference: Option<(NodeType, String)>,
    inputs: Vec<String>,
    outputs: Vec<String>,
    next_nodes: Vec<String>,
}

impl NodeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            reference: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            next_nodes: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn uses_module(mut self, name: impl Into<String>) -> Self {
        self.reference = Some((NodeType::Module, name.into()));
        self
    }

    pub fn uses_prompt(mut self, name: impl Into<String>) -> Self {
        self.reference = Some((NodeType::Prompt, name.into()));
        self
    }

    pub fn uses_tool(mut self, name: impl Into<String>) -> Self {
        self.reference = Some((NodeType::Tool, name.into()));
        self
    }

    pub fn inputs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs.extend(strings(names));
        self
    }

    pub fn outputs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs.extend(strings(names));
        self
    }

    /// Append a successor node.
    pub fn next_node(mut self, name: impl Into<String>) -> Self {
        self.next_nodes.push(name.into());
        self
    }

    pub fn build(self) -> Result<Node, BuilderError> {
        check_name("name", &self.name)?;
        let description = required(self.description, "description", "NodeBuilder")?;
        let (node_type, reference) = match self.reference {
            Some((kind, reference)) if !reference.is_empty() => (kind, reference),
            _ => {
                return Err(BuilderError::MissingRequiredField {
                    field: "reference",
                    builder: "NodeBuilder",
                });
            }
        };

        Ok(Node {
            name: self.name,
            description,
            node_type,
            reference,
            inputs: self.inputs,
            outputs: self.outputs,
            next_nodes: self.next_nodes,
        })
    }
}

// =============================================================================
// WORKFLOW
// =============================================================================

#[derive(Debug, Clone)]
pub struct WorkflowBuilder {
    name: String,
    description: Option<String>,
    nodes: Vec<Node>,
    entry_node: Option<String>,
}

impl WorkflowBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            nodes: Vec::new(),
            entry_node: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn add_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn entry_node(mut self, name: impl Into<String>) -> Self {
        self.entry_node = Some(name.into());
        self
    }

    pub fn build(self) -> Result<Workflow, BuilderError> {
        check_name("name", &self.name)?;
        let description = required(self.description, "description", "WorkflowBuilder")?;

        if self.nodes.is_empty() {
            return Err(BuilderError::EmptyCollection {
                collection: "nodes",
                parent: format!("Workflow '{}'", self.name),
            });
        }

        let mut names = HashSet::new();
        for node in &self.nodes {
            if !names.insert(node.name.as_str()) {
                return Err(BuilderError::DuplicateName {
                    entity_type: "node",
                    name: node.name.clone(),
                    scope: format!("workflow '{}'", self.name),
                });
            }
        }

        let entry_node = required(self.entry_node, "entry_node", "WorkflowBuilder")?;
        if !names.contains(entry_node.as_str()) {
            return Err(BuilderError::InvalidValue {
                field: "entry_node",
                value: entry_node,
                constraint: format!("Entry node must be one of the nodes of workflow '{}'.", self.name),
            });
        }

        Ok(Workflow {
            name: self.name,
            description,
            nodes: self.nodes,
            entry_node: Some(entry_node),
        })
    }
}

// =============================================================================
// RESOURCES
// =============================================================================

#[derive(Debug, Clone)]
pub struct ModuleBuilder {
    name: String,
    description: Option<String>,
    input_schema: Option<Value>,
    output_schema: Option<Value>,
}

impl ModuleBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_schema: None,
            output_schema: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn input_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }

    pub fn output_schema(mut self, schema: Value) -> Self {
        self.output_schema = Some(schema);
        self
    }

    pub fn build(self) -> Result<Module, BuilderError> {
        check_name("name", &self.name)?;
        Ok(Module {
            description: required(self.description, "description", "ModuleBuilder")?,
            name: self.name,
            input_schema: self.input_schema,
            output_schema: self.output_schema,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    name: String,
    description: Option<String>,
    template: Option<String>,
    variables: Vec<String>,
}

impl PromptBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            template: None,
            variables: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn variables<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variables.extend(strings(names));
        self
    }

    pub fn build(self) -> Result<Prompt, BuilderError> {
        check_name("name", &self.name)?;
        Ok(Prompt {
            description: required(self.description, "description", "PromptBuilder")?,
            template: required(self.template, "template", "PromptBuilder")?,
            name: self.name,
            variables: self.variables,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ToolBuilder {
    name: String,
    description: Option<String>,
    input_schema: Option<Value>,
    output_schema: Option<Value>,
    eip_binding: Option<EipBinding>,
}

impl ToolBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_schema: None,
            output_schema: None,
            eip_binding: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn input_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }

    pub fn output_schema(mut self, schema: Value) -> Self {
        self.output_schema = Some(schema);
        self
    }

    pub fn eip_binding(mut self, provider: impl Into<String>, service: impl Into<String>) -> Self {
        self.eip_binding = Some(EipBinding {
            provider: provider.into(),
            service: service.into(),
        });
        self
    }

    pub fn build(self) -> Result<Tool, BuilderError> {
        check_name("name", &self.name)?;
        Ok(Tool {
            description: required(self.description, "description", "ToolBuilder")?,
            name: self.name,
            input_schema: self.input_schema,
            output_schema: self.output_schema,
            eip_binding: self.eip_binding,
        })
    }
}

// =============================================================================
// AGENT
// =============================================================================

#[derive(Debug, Clone)]
pub struct AgentBuilder {
    name: String,
    version: Option<String>,
    description: Option<String>,
    workflows: Vec<Workflow>,
    modules: Vec<Module>,
    prompts: Vec<Prompt>,
    tools: Vec<Tool>,
    task_goal: Option<String>,
    completion_criteria: Option<CompletionCriteria>,
    eip_dependencies: Vec<EipDependency>,
}

impl AgentBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            description: None,
            workflows: Vec::new(),
            modules: Vec::new(),
            prompts: Vec::new(),
            tools: Vec::new(),
            task_goal: None,
            completion_criteria: None,
            eip_dependencies: Vec::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn add_workflow(mut self, workflow: Workflow) -> Self {
        self.workflows.push(workflow);
        self
    }

    pub fn add_module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }

    pub fn add_prompt(mut self, prompt: Prompt) -> Self {
        self.prompts.push(prompt);
        self
    }

    pub fn add_tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn task_goal(mut self, goal: impl Into<String>) -> Self {
        self.task_goal = Some(goal.into());
        self
    }

    pub fn completion_criteria(
        mut self,
        success: impl Into<String>,
        failure: impl Into<String>,
    ) -> Self {
        self.completion_criteria = Some(CompletionCriteria {
            success: success.into(),
            failure: failure.into(),
        });
        self
    }

    pub fn add_eip_dependency(mut self, dependency: EipDependency) -> Self {
        self.eip_dependencies.push(dependency);
        self
    }

    pub fn build(self) -> Result<AgentDefinition, BuilderError> {
        check_name("name", &self.name)?;

        let version = required(self.version, "version", "AgentBuilder")?;
        if !is_valid_version(&version) {
            return Err(BuilderError::InvalidValue {
                field: "version",
                value: version,
                constraint: VERSION_CONSTRAINT.to_string(),
            });
        }
        let description = required(self.description, "description", "AgentBuilder")?;

        let mut workflow_names = HashSet::new();
        for workflow in &self.workflows {
            if !workflow_names.insert(workflow.name.as_str()) {
                return Err(BuilderError::DuplicateName {
                    entity_type: "workflow",
                    name: workflow.name.clone(),
                    scope: format!("agent '{}'", self.name),
                });
            }
        }

        let mut resource_names = HashSet::new();
        let all_resources = self
            .modules
            .iter()
            .map(|m| m.name.as_str())
            .chain(self.prompts.iter().map(|p| p.name.as_str()))
            .chain(self.tools.iter().map(|t| t.name.as_str()));
        for name in all_resources {
            if !resource_names.insert(name) {
                return Err(BuilderError::DuplicateName {
                    entity_type: "resource",
                    name: name.to_string(),
                    scope: format!("agent '{}'", self.name),
                });
            }
        }

        let definition = AgentDefinition {
            name: self.name,
            version,
            description,
            workflows: self.workflows,
            modules: self.modules,
            prompts: self.prompts,
            tools: self.tools,
            task_goal: self.task_goal,
            completion_criteria: self.completion_criteria,
            eip_dependencies: self.eip_dependencies,
        };

        for workflow in &definition.workflows {
            for node in &workflow.nodes {
                if !definition.has_resource(node.node_type, &node.reference) {
                    return Err(BuilderError::InvalidReference {
                        node: node.name.clone(),
                        resource_type: node.node_type.to_string(),
                        reference: node.reference.clone(),
                    });
                }
            }
        }

        Ok(definition)
    }
}
