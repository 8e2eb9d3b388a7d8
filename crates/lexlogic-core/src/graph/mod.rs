//! Rule/atom dependency graph.
//!
//! Atoms are the leaves. Every rule head becomes a node, and each rule
//! points at the atoms and other rule heads its body mentions.
//!
//! ```
//! use lexlogic_core::graph::GraphBuilder;
//! # use lexlogic_core::models::{Atom, Rule};
//! # let atoms: Vec<Atom> = Vec::new();
//! # let rules: Vec<Rule> = Vec::new();
//! let graph = GraphBuilder::new().build(&atoms, &rules);
//! assert!(graph.edges.is_empty());
//! ```

mod builder;

use serde::{Deserialize, Serialize};

pub use builder::GraphBuilder;

/// Fill color for rule-head nodes.
pub const RULE_COLOR: &str = "#ed64a6";

// ============================================================================
// Policies
// ============================================================================

/// How rules that share a head become nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeadPolicy {
    /// One node per distinct head string, carrying the first rule's id.
    #[default]
    MergeByHead,
    /// One node per rule.
    NodePerRule,
}

/// How a rule body is read for references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceExtraction {
    /// Every `[a-z0-9_]+` run after the last `:-`.
    #[default]
    Lexical,
    /// Goal functors from a real parse, falling back to `Lexical` when the
    /// definition does not parse.
    Parsed,
}

// ============================================================================
// Graph
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Atom,
    Rule,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Atom => "atom",
            NodeKind::Rule => "rule",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub color: String,
}

/// Directed edge from a rule head to something its body references.
///
/// Atom and rule ids come from separate tables and may coincide, so the
/// edge records which kind of node it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// `"{source}-{kind}:{target}"`, e.g. `"10-atom:1"`
    pub id: String,
    pub source: String,
    pub target: String,
    pub target_kind: NodeKind,
}

impl GraphEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, target_kind: NodeKind) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("{}-{}:{}", source, target_kind.as_str(), target),
            source,
            target,
            target_kind,
        }
    }

    pub fn to_atom(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(source, target, NodeKind::Atom)
    }

    pub fn to_rule(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(source, target, NodeKind::Rule)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl DependencyGraph {
    /// First node with the given id. Atom and rule ids come from separate
    /// tables, so atom nodes are checked first.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Node an edge points at.
    pub fn target(&self, edge: &GraphEdge) -> Option<&GraphNode> {
        self.nodes
            .iter()
            .find(|n| n.kind == edge.target_kind && n.id == edge.target)
    }

    /// Edges leaving the rule node `id`.
    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.source == id)
    }

    pub fn atom_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Atom)
    }

    pub fn rule_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Rule)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
