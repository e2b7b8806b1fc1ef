//! Static analysis over each workflow's node graph.
//!
//! Per workflow, in declared order:
//! 1. entry node is set and names a node (`MISSING_ENTRY_NODE`)
//! 2. node references resolve to a resource of the node's kind (`INVALID_REFERENCE`)
//! 3. `next_nodes` targets name nodes of the same workflow (`INVALID_REFERENCE`)
//! 4. no cycle is reachable from the entry node (`CIRCULAR_DEPENDENCY`)
//! 5. every node is reachable from the entry node (`UNREACHABLE_NODE`)
//!
//! Steps 2-5 are skipped when step 1 fails.

use std::collections::HashSet;

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::graph::WorkflowGraph;
use super::{ErrorCode, GraphAnalysis, Severity, ValidationError};
use crate::model::{AgentDefinition, Workflow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerOptions {
    /// Unreachable nodes do not block submission by default: the platform may
    /// invoke sub-graphs directly.
    pub unreachable_severity: Severity,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            unreachable_severity: Severity::Warning,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticAnalyzer {
    options: AnalyzerOptions,
}

impl StaticAnalyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self { options }
    }
}

impl GraphAnalysis for StaticAnalyzer {
    fn analyze(&self, definition: &AgentDefinition) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (index, workflow) in definition.workflows.iter().enumerate() {
            let before = errors.len();
            self.analyze_workflow(definition, index, workflow, &mut errors);
            debug!(
                workflow = %workflow.name,
                nodes = workflow.nodes.len(),
                findings = errors.len() - before,
                "analyzed workflow graph"
            );
        }
        errors
    }
}

impl StaticAnalyzer {
    fn analyze_workflow(
        &self,
        definition: &AgentDefinition,
        index: usize,
        workflow: &Workflow,
        errors: &mut Vec<ValidationError>,
    ) {
        if workflow.nodes.is_empty() {
            return;
        }

        let base = format!("workflows[{index}]");
        let graph = WorkflowGraph::build(workflow);
        let Some(entry) = check_entry_node(workflow, &graph, &base, errors) else {
            return;
        };

        check_resource_references(definition, workflow, &base, errors);
        check_next_node_links(workflow, &graph, &base, errors);

        let visited = check_cycles(workflow, &graph, entry, &base, errors);
        self.check_reachability(workflow, &graph, &visited, &base, errors);
    }

    fn check_reachability(
        &self,
        workflow: &Workflow,
        graph: &WorkflowGraph,
        visited: &[bool],
        base: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        for idx in graph.graph.node_indices() {
            if visited[idx.index()] {
                continue;
            }
            let pos = graph.position(idx);
            // Shadowed by an earlier node of the same name.
            if graph.index_of(&workflow.nodes[pos].name) != Some(idx) {
                continue;
            }
            errors.push(ValidationError {
                code: ErrorCode::UnreachableNode,
                path: format!("{base}.nodes[{pos}]"),
                message: format!(
                    "Node '{}' is not reachable from entry node in workflow '{}'",
                    workflow.nodes[pos].name, workflow.name
                ),
                severity: self.options.unreachable_severity,
            });
        }
    }
}

fn check_entry_node(
    workflow: &Workflow,
    graph: &WorkflowGraph,
    base: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<NodeIndex> {
    let declared = workflow.entry_node.as_deref().filter(|n| !n.trim().is_empty());
    let Some(name) = declared else {
        errors.push(ValidationError::error(
            ErrorCode::MissingEntryNode,
            format!("{base}.entry_node"),
            format!("Workflow '{}' has no entry_node specified", workflow.name),
        ));
        return None;
    };

    let idx = graph.index_of(name);
    if idx.is_none() {
        errors.push(ValidationError::error(
            ErrorCode::MissingEntryNode,
            format!("{base}.entry_node"),
            format!(
                "Workflow '{}' entry_node '{}' does not match any node",
                workflow.name, name
            ),
        ));
    }
    idx
}

fn check_resource_references(
    definition: &AgentDefinition,
    workflow: &Workflow,
    base: &str,
    errors: &mut Vec<ValidationError>,
) {
    for (pos, node) in workflow.nodes.iter().enumerate() {
        // An empty reference is a schema finding.
        if node.reference.trim().is_empty() {
            continue;
        }
        if !definition.has_resource(node.node_type, &node.reference) {
            errors.push(ValidationError::error(
                ErrorCode::InvalidReference,
                format!("{base}.nodes[{pos}].reference"),
                format!(
                    "Node '{}' references undefined {} '{}'",
                    node.name, node.node_type, node.reference
                ),
            ));
        }
    }
}

fn check_next_node_links(
    workflow: &Workflow,
    graph: &WorkflowGraph,
    base: &str,
    errors: &mut Vec<ValidationError>,
) {
    for link in &graph.dangling {
        errors.push(ValidationError::error(
            ErrorCode::InvalidReference,
            format!("{base}.nodes[{}].next_nodes[{}]", link.node, link.slot),
            format!(
                "Node '{}' links to undefined node '{}' in workflow '{}'",
                workflow.nodes[link.node].name, link.target, workflow.name
            ),
        ));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    New,
    OnStack,
    Done,
}

/// Depth-first walk from `entry`. Reports one error per node that closes a
/// cycle and returns the visited set, indexed by vertex.
fn check_cycles(
    workflow: &Workflow,
    graph: &WorkflowGraph,
    entry: NodeIndex,
    base: &str,
    errors: &mut Vec<ValidationError>,
) -> Vec<bool> {
    let mut marks = vec![Mark::New; graph.node_count()];
    let mut reported = HashSet::new();
    let mut stack = vec![(entry, graph.successors(entry), 0usize)];
    marks[entry.index()] = Mark::OnStack;

    while let Some((node, successors, cursor)) = stack.last_mut() {
        let node = *node;
        let Some(&(next, label)) = successors.get(*cursor) else {
            marks[node.index()] = Mark::Done;
            stack.pop();
            continue;
        };
        *cursor += 1;

        match marks[next.index()] {
            Mark::New => {
                marks[next.index()] = Mark::OnStack;
                stack.push((next, graph.successors(next), 0));
            }
            Mark::OnStack => {
                if !reported.insert(next) {
                    continue;
                }
                let name = |idx: NodeIndex| workflow.nodes[graph.position(idx)].name.as_str();
                let start = stack.iter().position(|(n, _, _)| *n == next).unwrap_or(0);
                let mut cycle: Vec<&str> = stack[start..].iter().map(|(n, _, _)| name(*n)).collect();
                cycle.push(name(next));

                errors.push(ValidationError::error(
                    ErrorCode::CircularDependency,
                    format!(
                        "{base}.nodes[{}].next_nodes[{}]",
                        graph.position(node),
                        label.slot
                    ),
                    format!(
                        "Circular dependency in workflow '{}': {}",
                        workflow.name,
                        cycle.join(" -> ")
                    ),
                ));
            }
            Mark::Done => {}
        }
    }

    marks.into_iter().map(|m| m != Mark::New).collect()
}
