//! Entity model: agents, workflows, nodes and the resources nodes point at.

pub mod builder;
pub mod schema;
pub mod types;

pub use builder::{
    AgentBuilder, ModuleBuilder, NodeBuilder, PromptBuilder, ToolBuilder, WorkflowBuilder,
};
pub use types::*;
