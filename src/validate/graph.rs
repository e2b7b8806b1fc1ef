//! petgraph-based directed graph over the nodes of one workflow.
//!
//! Vertices are node positions in `Workflow::nodes`; edges come from
//! `next_nodes`. Edge targets that name no node are kept aside as dangling
//! links instead of being added to the graph.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::model::Workflow;

/// Where an edge was declared: `nodes[node].next_nodes[slot]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeLabel {
    pub slot: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingLink {
    pub node: usize,
    pub slot: usize,
    pub target: String,
}

pub struct WorkflowGraph {
    /// Vertex weight is the node's position in the workflow.
    pub graph: DiGraph<usize, EdgeLabel>,
    pub node_indices: HashMap<String, NodeIndex>,
    pub dangling: Vec<DanglingLink>,
}

impl WorkflowGraph {
    pub fn build(workflow: &Workflow) -> Self {
        let mut graph = DiGraph::with_capacity(workflow.nodes.len(), workflow.nodes.len());
        let mut node_indices = HashMap::new();
        let mut positions = Vec::with_capacity(workflow.nodes.len());

        for (pos, node) in workflow.nodes.iter().enumerate() {
            let idx = graph.add_node(pos);
            positions.push(idx);
            // Duplicate names resolve to the first declaration.
            node_indices.entry(node.name.clone()).or_insert(idx);
        }

        let mut dangling = Vec::new();
        for (pos, node) in workflow.nodes.iter().enumerate() {
            for (slot, target) in node.next_nodes.iter().enumerate() {
                match node_indices.get(target) {
                    Some(&t) => {
                        graph.add_edge(positions[pos], t, EdgeLabel { slot });
                    }
                    None => dangling.push(DanglingLink {
                        node: pos,
                        slot,
                        target: target.clone(),
                    }),
                }
            }
        }

        WorkflowGraph {
            graph,
            node_indices,
            dangling,
        }
    }

    pub fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.node_indices.get(name).copied()
    }

    /// Position of the vertex in `Workflow::nodes`.
    pub fn position(&self, idx: NodeIndex) -> usize {
        self.graph[idx]
    }

    /// Outgoing edges of `idx` in the order they were declared in `next_nodes`.
    pub fn successors(&self, idx: NodeIndex) -> Vec<(NodeIndex, EdgeLabel)> {
        let mut out: Vec<_> = self
            .graph
            .edges(idx)
            .map(|e| (e.target(), *e.weight()))
            .collect();
        out.sort_by_key(|(_, label)| label.slot);
        out
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, NodeType};

    fn node(name: &str, next: &[&str]) -> Node {
        Node {
            name: name.into(),
            description: "step".into(),
            node_type: NodeType::Module,
            reference: "m".into(),
            inputs: vec![],
            outputs: vec![],
            next_nodes: next.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn successors_follow_declared_order() {
        let wf = Workflow {
            name: "wf".into(),
            description: "d".into(),
            nodes: vec![node("a", &["c", "b"]), node("b", &[]), node("c", &[])],
            entry_node: Some("a".into()),
        };
        let g = WorkflowGraph::build(&wf);
        let a = g.index_of("a").unwrap();
        let names: Vec<_> = g
            .successors(a)
            .into_iter()
            .map(|(idx, _)| wf.nodes[g.position(idx)].name.as_str())
            .collect();
        assert_eq!(names, vec!["c", "b"]);
    }

    #[test]
    fn unknown_targets_are_dangling() {
        let wf = Workflow {
            name: "wf".into(),
            description: "d".into(),
            nodes: vec![node("a", &["ghost"])],
            entry_node: Some("a".into()),
        };
        let g = WorkflowGraph::build(&wf);
        assert_eq!(
            g.dangling,
            vec![DanglingLink {
                node: 0,
                slot: 0,
                target: "ghost".into()
            }]
        );
        assert_eq!(g.graph.edge_count(), 0);
        assert_eq!(g.node_count(), 1);
    }
}
