//! Integration tests for the YAML artifact.

#[allow(dead_code)]
mod helpers;

use agent_sdk::api::export_yaml;
use agent_sdk::model::AgentDefinition;
use helpers::*;

fn meeting_transcriber() -> AgentDefinition {
    serde_json::from_str(include_str!("fixtures/meeting_transcriber.json"))
        .expect("fixture should deserialize")
}

#[test]
fn greeting_agent_artifact() {
    let yaml = export_yaml(&greeting_agent()).unwrap();
    insta::assert_snapshot!(yaml, @r"
    name: greeting-agent
    version: 1.0.0
    description: A friendly agent that generates personalized greetings
    workflows:
    - name: greet-user
      description: Simple greeting workflow
      entry_node: generate-greeting
      nodes:
      - name: generate-greeting
        description: Generates a personalized greeting
        type: module
        reference: greeting-generator
        inputs:
        - user_name
        outputs:
        - greeting
    modules:
    - name: greeting-generator
      description: Generates a personalized greeting message
      input_schema:
        type: object
        properties:
          user_name:
            type: string
        required:
        - user_name
      output_schema:
        type: object
        properties:
          greeting:
            type: string
    ");
}

#[test]
fn round_trip_reproduces_definition() {
    let def = greeting_agent();
    let yaml = export_yaml(&def).unwrap();
    let parsed: AgentDefinition = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed, def);
}

#[test]
fn round_trip_key_sets() {
    let yaml = export_yaml(&meeting_transcriber()).unwrap();
    let doc: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

    let keys = |v: &serde_yaml::Value| -> Vec<String> {
        v.as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap().to_string())
            .collect()
    };

    assert_eq!(
        keys(&doc),
        vec!["name", "version", "description", "workflows", "modules", "prompts", "tools"]
    );
    let wf = &doc["workflows"][0];
    assert_eq!(keys(wf), vec!["name", "description", "entry_node", "nodes"]);
    assert_eq!(
        keys(&wf["nodes"][0]),
        vec!["name", "description", "type", "reference", "next_nodes", "inputs", "outputs"]
    );
    // Last node has no successors.
    assert_eq!(
        keys(&wf["nodes"][2]),
        vec!["name", "description", "type", "reference", "inputs", "outputs"]
    );
    assert_eq!(wf["nodes"][1]["type"].as_str(), Some("tool"));
    assert_eq!(
        keys(&doc["prompts"][0]),
        vec!["name", "description", "template", "variables"]
    );
}

#[test]
fn unicode_is_not_escaped() {
    let yaml = export_yaml(&meeting_transcriber()).unwrap();
    assert!(yaml.contains("將會議錄音轉為逐字稿並產生摘要"), "{yaml}");
    assert!(!yaml.contains("\\u"));
}

#[test]
fn output_is_block_style() {
    let yaml = export_yaml(&meeting_transcriber()).unwrap();
    for flow in [": {", ": [", "- {", "- ["] {
        assert!(!yaml.contains(flow), "{yaml}");
    }
}

#[test]
fn repeated_exports_are_identical() {
    let def = meeting_transcriber();
    assert_eq!(export_yaml(&def).unwrap(), export_yaml(&def.clone()).unwrap());
}

#[test]
fn minimal_agent_has_only_scalar_keys() {
    let yaml = export_yaml(&minimal_agent()).unwrap();
    assert_eq!(
        yaml,
        "name: test-agent\nversion: 1.0.0\ndescription: Agent under test\n"
    );
}
