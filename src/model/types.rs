//! Value types describing an agent definition.
//!
//! These are plain data: validation and export read them, nothing mutates them.
//! They deserialize from the same JSON shape the WASM entry points accept.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// AGENT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub name: String,
    pub version: String,
    pub description: String,
    #[serde(default)]
    pub workflows: Vec<Workflow>,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub prompts: Vec<Prompt>,
    #[serde(default)]
    pub tools: Vec<Tool>,
    #[serde(default)]
    pub task_goal: Option<String>,
    #[serde(default)]
    pub completion_criteria: Option<CompletionCriteria>,
    #[serde(default)]
    pub eip_dependencies: Vec<EipDependency>,
}

impl AgentDefinition {
    /// Names of the declared resources of one kind, in declaration order.
    pub fn resource_names(&self, kind: NodeType) -> Vec<&str> {
        match kind {
            NodeType::Module => self.modules.iter().map(|m| m.name.as_str()).collect(),
            NodeType::Prompt => self.prompts.iter().map(|p| p.name.as_str()).collect(),
            NodeType::Tool => self.tools.iter().map(|t| t.name.as_str()).collect(),
        }
    }

    pub fn has_resource(&self, kind: NodeType, name: &str) -> bool {
        match kind {
            NodeType::Module => self.modules.iter().any(|m| m.name == name),
            NodeType::Prompt => self.prompts.iter().any(|p| p.name == name),
            NodeType::Tool => self.tools.iter().any(|t| t.name == name),
        }
    }
}

/// Success / failure conditions the platform reports against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionCriteria {
    pub success: String,
    pub failure: String,
}

/// An external integration provider the agent depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EipDependency {
    pub provider: String,
    pub service: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub config_hints: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EipBinding {
    pub provider: String,
    pub service: String,
}

// =============================================================================
// WORKFLOW
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub entry_node: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Module,
    Prompt,
    Tool,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Module => "module",
            NodeType::Prompt => "prompt",
            NodeType::Tool => "tool",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub reference: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub next_nodes: Vec<String>,
}

// =============================================================================
// RESOURCES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub input_schema: Option<Value>,
    #[serde(default)]
    pub output_schema: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub name: String,
    pub description: String,
    pub template: String,
    #[serde(default)]
    pub variables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub input_schema: Option<Value>,
    #[serde(default)]
    pub output_schema: Option<Value>,
    #[serde(default)]
    pub eip_binding: Option<EipBinding>,
}
