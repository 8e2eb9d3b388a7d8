//! Conversion from the core dependency graph to the shape Sigma.js and
//! Graphology expect.

use lexlogic_core::graph::{DependencyGraph, NodeKind};

use super::models::{GraphData, GraphEdge, GraphNode, NodeAttributes};

// =============================================================================
// Node Styling
// =============================================================================

fn category(kind: NodeKind) -> &'static str {
    kind.as_str()
}

/// Rules are drawn larger than the atoms they depend on.
fn size(kind: NodeKind) -> u32 {
    match kind {
        NodeKind::Atom => 8,
        NodeKind::Rule => 12,
    }
}

/// Graphology key. Atom and rule ids may coincide, so the kind is part of it.
fn node_key(kind: NodeKind, id: &str) -> String {
    format!("{}:{}", category(kind), id)
}

// =============================================================================
// Conversion
// =============================================================================

pub fn to_graph_data(graph: &DependencyGraph) -> GraphData {
    let nodes = graph
        .nodes
        .iter()
        .map(|node| GraphNode {
            key: node_key(node.kind, &node.id),
            attributes: NodeAttributes {
                label: node.label.clone(),
                category: category(node.kind).to_string(),
                color: node.color.clone(),
                size: size(node.kind),
                atom_id: match node.kind {
                    NodeKind::Atom => node.id.parse().ok(),
                    NodeKind::Rule => None,
                },
            },
        })
        .collect();

    let edges = graph
        .edges
        .iter()
        .map(|edge| {
            let source = node_key(NodeKind::Rule, &edge.source);
            let target = node_key(edge.target_kind, &edge.target);
            GraphEdge {
                key: format!("{}->{}", source, target),
                source,
                target,
            }
        })
        .collect();

    GraphData { nodes, edges }
}
