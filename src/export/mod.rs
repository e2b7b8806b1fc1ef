//! YAML export: AgentDefinition → deterministic YAML artifact.
//!
//! Public API: `DefinitionWriter` (export + write) and its YAML implementation.

mod document;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::ExportOptions;
use crate::error::ExportError;
use crate::model::AgentDefinition;
use document::AgentDocument;

/// Serializes definitions and persists the result.
pub trait DefinitionWriter {
    fn export(&self, definition: &AgentDefinition) -> Result<String, ExportError>;

    fn write(&self, content: &str, path: &Path) -> Result<(), ExportError>;
}

/// Block-style YAML, 2-space indentation, keys in artifact order, Unicode
/// passed through unescaped.
#[derive(Debug, Clone, Default)]
pub struct YamlExporter {
    options: ExportOptions,
}

impl YamlExporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }
}

impl DefinitionWriter for YamlExporter {
    fn export(&self, definition: &AgentDefinition) -> Result<String, ExportError> {
        let yaml = serde_yaml::to_string(&AgentDocument::from(definition))?;
        debug!(agent = %definition.name, bytes = yaml.len(), "exported agent definition");
        Ok(yaml)
    }

    fn write(&self, content: &str, path: &Path) -> Result<(), ExportError> {
        let io_err = |source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };

        if self.options.create_parent_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        fs::write(path, content).map_err(io_err)?;

        debug!(path = %path.display(), bytes = content.len(), "wrote agent definition");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Module, Node, NodeType, Prompt, Workflow};
    use serde_json::json;

    fn sample() -> AgentDefinition {
        AgentDefinition {
            name: "greeting-agent".into(),
            version: "1.0.0".into(),
            description: "A friendly agent".into(),
            workflows: vec![Workflow {
                name: "greet-user".into(),
                description: "Greets the user".into(),
                nodes: vec![Node {
                    name: "generate-greeting".into(),
                    description: "Generates a greeting".into(),
                    node_type: NodeType::Module,
                    reference: "greeting-generator".into(),
                    inputs: vec!["user_name".into()],
                    outputs: vec![],
                    next_nodes: vec![],
                }],
                entry_node: Some("generate-greeting".into()),
            }],
            modules: vec![Module {
                name: "greeting-generator".into(),
                description: "Generates a greeting message".into(),
                input_schema: Some(json!({"type": "object"})),
                output_schema: Some(json!({})),
            }],
            prompts: vec![],
            tools: vec![],
            task_goal: None,
            completion_criteria: None,
            eip_dependencies: vec![],
        }
    }

    #[test]
    fn omits_empty_collections_and_schemas() {
        let yaml = YamlExporter::default().export(&sample()).unwrap();
        assert!(!yaml.contains("prompts"));
        assert!(!yaml.contains("tools"));
        assert!(!yaml.contains("outputs"));
        assert!(!yaml.contains("next_nodes"));
        assert!(!yaml.contains("output_schema"));
        assert!(yaml.contains("input_schema"));
    }

    #[test]
    fn top_level_key_order() {
        let mut def = sample();
        def.prompts.push(Prompt {
            name: "ask".into(),
            description: "asks".into(),
            template: "Hello {name}".into(),
            variables: vec!["name".into()],
        });
        let yaml = YamlExporter::default().export(&def).unwrap();
        let keys: Vec<&str> = yaml
            .lines()
            .filter(|l| !l.starts_with(' ') && !l.starts_with('-'))
            .filter_map(|l| l.split(':').next())
            .collect();
        assert_eq!(
            keys,
            vec!["name", "version", "description", "workflows", "modules", "prompts"]
        );
    }

    #[test]
    fn export_is_deterministic() {
        let exporter = YamlExporter::default();
        assert_eq!(
            exporter.export(&sample()).unwrap(),
            exporter.export(&sample()).unwrap()
        );
    }

    #[test]
    fn write_without_parent_creation_fails_on_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("agent.yaml");
        let exporter = YamlExporter::new(ExportOptions {
            create_parent_dirs: false,
        });
        let err = exporter.write("name: x\n", &path).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(!path.exists());
    }
}
