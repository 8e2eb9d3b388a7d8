use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::{
    DependencyGraph, GraphEdge, GraphNode, HeadPolicy, NodeKind, ReferenceExtraction, RULE_COLOR,
};
use crate::color::atom_color;
use crate::logic::{body_tokens, parse_clause, predicate_name};
use crate::models::{Atom, Rule};

/// Builds a [`DependencyGraph`] from atoms and rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder {
    head_policy: HeadPolicy,
    extraction: ReferenceExtraction,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head_policy(mut self, policy: HeadPolicy) -> Self {
        self.head_policy = policy;
        self
    }

    pub fn extraction(mut self, extraction: ReferenceExtraction) -> Self {
        self.extraction = extraction;
        self
    }

    pub fn build(&self, atoms: &[Atom], rules: &[Rule]) -> DependencyGraph {
        let mut assembly = Assembly::default();

        for atom in atoms {
            assembly.add_atom(atom);
        }

        // Node id for every rule, in input order.
        let rule_nodes: Vec<String> = rules
            .iter()
            .map(|rule| assembly.add_rule(rule, self.head_policy))
            .collect();

        for (rule, source) in rules.iter().zip(&rule_nodes) {
            for reference in self.references(rule) {
                assembly.link(source, &reference);
            }
        }

        debug!(
            nodes = assembly.graph.nodes.len(),
            edges = assembly.graph.edges.len(),
            "Built dependency graph"
        );
        assembly.graph
    }

    /// Predicate names referenced from a rule body.
    fn references(&self, rule: &Rule) -> Vec<String> {
        if self.extraction == ReferenceExtraction::Parsed {
            match parse_clause(&rule.definition) {
                Ok(clause) => {
                    return clause
                        .referenced_predicates()
                        .into_iter()
                        .map(str::to_string)
                        .collect()
                }
                Err(e) => {
                    debug!(rule_id = rule.id, error = %e, "Falling back to lexical references");
                }
            }
        }

        body_tokens(&rule.definition)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

/// Mutable state while a graph is assembled.
#[derive(Default)]
struct Assembly {
    graph: DependencyGraph,
    /// Head text to node id, for merging.
    heads: HashMap<String, String>,
    /// Predicate name to atom node ids.
    atoms_by_name: HashMap<String, Vec<String>>,
    /// Predicate name to rule node ids.
    rules_by_name: HashMap<String, Vec<String>>,
    seen_edges: HashSet<(String, String, NodeKind)>,
}

impl Assembly {
    fn add_atom(&mut self, atom: &Atom) {
        let id = atom.id.to_string();
        self.atoms_by_name
            .entry(predicate_name(&atom.predicate).to_string())
            .or_default()
            .push(id.clone());
        self.graph.nodes.push(GraphNode {
            color: atom_color(atom.id).hover.to_string(),
            id,
            label: atom.predicate.clone(),
            kind: NodeKind::Atom,
        });
    }

    /// Returns the id of the node the rule belongs to.
    fn add_rule(&mut self, rule: &Rule, policy: HeadPolicy) -> String {
        let head = rule.head();

        if policy == HeadPolicy::MergeByHead {
            if let Some(existing) = self.heads.get(head) {
                return existing.clone();
            }
        }

        let id = rule.id.to_string();
        self.heads.insert(head.to_string(), id.clone());
        self.rules_by_name
            .entry(predicate_name(head).to_string())
            .or_default()
            .push(id.clone());
        self.graph.nodes.push(GraphNode {
            id: id.clone(),
            label: head.to_string(),
            kind: NodeKind::Rule,
            color: RULE_COLOR.to_string(),
        });
        id
    }

    /// Connect `source` to every atom and other rule head named `name`.
    fn link(&mut self, source: &str, name: &str) {
        let atoms = self
            .atoms_by_name
            .get(name)
            .into_iter()
            .flatten()
            .map(|id| (id.clone(), NodeKind::Atom));
        let rules = self
            .rules_by_name
            .get(name)
            .into_iter()
            .flatten()
            .filter(|id| id.as_str() != source)
            .map(|id| (id.clone(), NodeKind::Rule));
        let targets: Vec<(String, NodeKind)> = atoms.chain(rules).collect();

        for (target, kind) in targets {
            if self.seen_edges.insert((source.to_string(), target.clone(), kind)) {
                self.graph.edges.push(GraphEdge::new(source, target, kind));
            }
        }
    }
}
