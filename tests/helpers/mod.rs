use agent_sdk::model::*;
use serde_json::json;

// =============================================================================
// Entity builders (struct literals, bypassing builder checks)
// =============================================================================

pub fn module(name: &str) -> Module {
    Module {
        name: name.into(),
        description: format!("{name} module"),
        input_schema: None,
        output_schema: None,
    }
}

pub fn prompt(name: &str) -> Prompt {
    Prompt {
        name: name.into(),
        description: format!("{name} prompt"),
        template: "Summarize {text}".into(),
        variables: vec!["text".into()],
    }
}

pub fn tool(name: &str) -> Tool {
    Tool {
        name: name.into(),
        description: format!("{name} tool"),
        input_schema: None,
        output_schema: None,
        eip_binding: None,
    }
}

pub fn node(name: &str, node_type: NodeType, reference: &str, next: &[&str]) -> Node {
    Node {
        name: name.into(),
        description: format!("{name} step"),
        node_type,
        reference: reference.into(),
        inputs: vec![],
        outputs: vec![],
        next_nodes: next.iter().map(|s| s.to_string()).collect(),
    }
}

/// Node referencing the shared `worker` module.
pub fn step(name: &str, next: &[&str]) -> Node {
    node(name, NodeType::Module, "worker", next)
}

pub fn workflow(name: &str, entry: Option<&str>, nodes: Vec<Node>) -> Workflow {
    Workflow {
        name: name.into(),
        description: format!("{name} workflow"),
        nodes,
        entry_node: entry.map(str::to_string),
    }
}

pub fn agent(workflows: Vec<Workflow>) -> AgentDefinition {
    AgentDefinition {
        name: "test-agent".into(),
        version: "1.0.0".into(),
        description: "Agent under test".into(),
        workflows,
        modules: vec![module("worker")],
        prompts: vec![],
        tools: vec![],
        task_goal: None,
        completion_criteria: None,
        eip_dependencies: vec![],
    }
}

/// Valid name/version/description and nothing else.
pub fn minimal_agent() -> AgentDefinition {
    AgentDefinition {
        modules: vec![],
        ..agent(vec![])
    }
}

/// One module, one workflow, one node.
pub fn greeting_agent() -> AgentDefinition {
    AgentDefinition {
        name: "greeting-agent".into(),
        version: "1.0.0".into(),
        description: "A friendly agent that generates personalized greetings".into(),
        workflows: vec![Workflow {
            name: "greet-user".into(),
            description: "Simple greeting workflow".into(),
            nodes: vec![Node {
                name: "generate-greeting".into(),
                description: "Generates a personalized greeting".into(),
                node_type: NodeType::Module,
                reference: "greeting-generator".into(),
                inputs: vec!["user_name".into()],
                outputs: vec!["greeting".into()],
                next_nodes: vec![],
            }],
            entry_node: Some("generate-greeting".into()),
        }],
        modules: vec![Module {
            name: "greeting-generator".into(),
            description: "Generates a personalized greeting message".into(),
            input_schema: Some(json!({
                "type": "object",
                "properties": {"user_name": {"type": "string"}},
                "required": ["user_name"]
            })),
            output_schema: Some(json!({
                "type": "object",
                "properties": {"greeting": {"type": "string"}}
            })),
        }],
        prompts: vec![],
        tools: vec![],
        task_goal: None,
        completion_criteria: None,
        eip_dependencies: vec![],
    }
}

// =============================================================================
// Assertions
// =============================================================================

pub fn codes(errors: &[agent_sdk::ValidationError]) -> Vec<&'static str> {
    errors.iter().map(|e| e.code.as_str()).collect()
}
