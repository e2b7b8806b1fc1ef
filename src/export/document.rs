//! Borrowed serialization views that fix the artifact's key order.
//!
//! Field order here is the key order in the YAML output. Empty collections
//! and empty schemas are left out entirely.

use serde::Serialize;
use serde_json::Value;

use crate::model::{AgentDefinition, Module, Node, NodeType, Prompt, Tool, Workflow};

fn is_empty<T>(items: &[T]) -> bool {
    items.is_empty()
}

fn schema_absent(schema: &Option<&Value>) -> bool {
    match schema {
        None | Some(Value::Null) => true,
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}

#[derive(Serialize)]
pub(super) struct AgentDocument<'a> {
    name: &'a str,
    version: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    workflows: Vec<WorkflowDocument<'a>>,
    #[serde(skip_serializing_if = "is_empty")]
    modules: Vec<ModuleDocument<'a>>,
    #[serde(skip_serializing_if = "is_empty")]
    prompts: Vec<PromptDocument<'a>>,
    #[serde(skip_serializing_if = "is_empty")]
    tools: Vec<ToolDocument<'a>>,
}

impl<'a> From<&'a AgentDefinition> for AgentDocument<'a> {
    fn from(def: &'a AgentDefinition) -> Self {
        AgentDocument {
            name: &def.name,
            version: &def.version,
            description: &def.description,
            workflows: def.workflows.iter().map(WorkflowDocument::from).collect(),
            modules: def.modules.iter().map(ModuleDocument::from).collect(),
            prompts: def.prompts.iter().map(PromptDocument::from).collect(),
            tools: def.tools.iter().map(ToolDocument::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct WorkflowDocument<'a> {
    name: &'a str,
    description: &'a str,
    entry_node: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty")]
    nodes: Vec<NodeDocument<'a>>,
}

impl<'a> From<&'a Workflow> for WorkflowDocument<'a> {
    fn from(wf: &'a Workflow) -> Self {
        WorkflowDocument {
            name: &wf.name,
            description: &wf.description,
            entry_node: wf.entry_node.as_deref(),
            nodes: wf.nodes.iter().map(NodeDocument::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct NodeDocument<'a> {
    name: &'a str,
    description: &'a str,
    #[serde(rename = "type")]
    node_type: NodeType,
    reference: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    next_nodes: &'a [String],
    #[serde(skip_serializing_if = "is_empty")]
    inputs: &'a [String],
    #[serde(skip_serializing_if = "is_empty")]
    outputs: &'a [String],
}

impl<'a> From<&'a Node> for NodeDocument<'a> {
    fn from(node: &'a Node) -> Self {
        NodeDocument {
            name: &node.name,
            description: &node.description,
            node_type: node.node_type,
            reference: &node.reference,
            next_nodes: &node.next_nodes,
            inputs: &node.inputs,
            outputs: &node.outputs,
        }
    }
}

#[derive(Serialize)]
struct ModuleDocument<'a> {
    name: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "schema_absent")]
    input_schema: Option<&'a Value>,
    #[serde(skip_serializing_if = "schema_absent")]
    output_schema: Option<&'a Value>,
}

impl<'a> From<&'a Module> for ModuleDocument<'a> {
    fn from(module: &'a Module) -> Self {
        ModuleDocument {
            name: &module.name,
            description: &module.description,
            input_schema: module.input_schema.as_ref(),
            output_schema: module.output_schema.as_ref(),
        }
    }
}

#[derive(Serialize)]
struct PromptDocument<'a> {
    name: &'a str,
    description: &'a str,
    template: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    variables: &'a [String],
}

impl<'a> From<&'a Prompt> for PromptDocument<'a> {
    fn from(prompt: &'a Prompt) -> Self {
        PromptDocument {
            name: &prompt.name,
            description: &prompt.description,
            template: &prompt.template,
            variables: &prompt.variables,
        }
    }
}

#[derive(Serialize)]
struct ToolDocument<'a> {
    name: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "schema_absent")]
    input_schema: Option<&'a Value>,
    #[serde(skip_serializing_if = "schema_absent")]
    output_schema: Option<&'a Value>,
}

impl<'a> From<&'a Tool> for ToolDocument<'a> {
    fn from(tool: &'a Tool) -> Self {
        ToolDocument {
            name: &tool.name,
            description: &tool.description,
            input_schema: tool.input_schema.as_ref(),
            output_schema: tool.output_schema.as_ref(),
        }
    }
}
