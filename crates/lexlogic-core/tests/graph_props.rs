//! Property tests: any set of atoms and rules yields a graph with one node per
//! atom and rule head, whose edges all run from rules to existing nodes.

use std::collections::HashSet;

use chrono::Utc;
use lexlogic_core::graph::NodeKind;
use lexlogic_core::models::{Atom, Rule};
use lexlogic_core::{GraphBuilder, HeadPolicy, ReferenceExtraction};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const NAMES: [&str; 6] = ["bird", "flies", "penguin", "has_wings", "swims", "egg"];

fn arb_name() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(NAMES.to_vec())
}

fn arb_policy() -> impl Strategy<Value = HeadPolicy> {
    prop_oneof![Just(HeadPolicy::MergeByHead), Just(HeadPolicy::NodePerRule)]
}

fn arb_extraction() -> impl Strategy<Value = ReferenceExtraction> {
    prop_oneof![
        Just(ReferenceExtraction::Lexical),
        Just(ReferenceExtraction::Parsed)
    ]
}

/// Atoms with ids `1..=n`.
fn arb_atoms() -> impl Strategy<Value = Vec<Atom>> {
    proptest::collection::vec(arb_name(), 0..8).prop_map(|names| {
        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Atom {
                id: i as i64 + 1,
                regulation_fragment_id: 1,
                predicate: format!("{}(X)", name),
                description: String::new(),
                is_negated: false,
                is_fact: true,
                spans: Vec::new(),
            })
            .collect()
    })
}

/// Rules with ids `1..=m`, so they collide with atom ids.
fn arb_rules() -> impl Strategy<Value = Vec<Rule>> {
    proptest::collection::vec(
        (arb_name(), proptest::collection::vec(arb_name(), 0..4)),
        0..8,
    )
    .prop_map(|clauses| {
        clauses
            .into_iter()
            .enumerate()
            .map(|(i, (head, body))| {
                let definition = if body.is_empty() {
                    format!("{}(X).", head)
                } else {
                    let body: Vec<String> = body.iter().map(|b| format!("{}(X)", b)).collect();
                    format!("{}(X) :- {}.", head, body.join(", "))
                };
                Rule {
                    id: i as i64 + 1,
                    regulation_fragment_id: 1,
                    description: String::new(),
                    definition,
                    is_goal: false,
                    created_at: Utc::now(),
                }
            })
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Merging by head gives one node per atom plus one per distinct head.
    #[test]
    fn node_count_is_atoms_plus_distinct_heads(
        atoms in arb_atoms(),
        rules in arb_rules(),
        extraction in arb_extraction(),
    ) {
        let graph = GraphBuilder::new().extraction(extraction).build(&atoms, &rules);

        let heads: HashSet<&str> = rules.iter().map(|r| r.head()).collect();
        prop_assert_eq!(graph.atom_nodes().count(), atoms.len());
        prop_assert_eq!(graph.rule_nodes().count(), heads.len());
        prop_assert_eq!(graph.nodes.len(), atoms.len() + heads.len());
    }

    /// One node per rule when heads are not merged.
    #[test]
    fn node_per_rule_keeps_every_rule(atoms in arb_atoms(), rules in arb_rules()) {
        let graph = GraphBuilder::new()
            .head_policy(HeadPolicy::NodePerRule)
            .build(&atoms, &rules);
        prop_assert_eq!(graph.nodes.len(), atoms.len() + rules.len());
    }

    /// Every edge leaves a rule node and lands on an existing node, rules
    /// never point at themselves and no edge is repeated.
    #[test]
    fn edges_are_sound(
        atoms in arb_atoms(),
        rules in arb_rules(),
        policy in arb_policy(),
        extraction in arb_extraction(),
    ) {
        let graph = GraphBuilder::new()
            .head_policy(policy)
            .extraction(extraction)
            .build(&atoms, &rules);

        let rule_ids: HashSet<&str> = graph.rule_nodes().map(|n| n.id.as_str()).collect();
        for edge in &graph.edges {
            prop_assert!(rule_ids.contains(edge.source.as_str()), "{:?}", edge);

            let target = graph.target(edge);
            prop_assert!(target.is_some(), "{:?}", edge);
            let target = target.unwrap();
            prop_assert_eq!(target.kind, edge.target_kind);
            if target.kind == NodeKind::Rule {
                prop_assert_ne!(&edge.source, &edge.target);
            }
        }

        let ids: HashSet<&str> = graph.edges.iter().map(|e| e.id.as_str()).collect();
        prop_assert_eq!(ids.len(), graph.edges.len());
    }

    /// A rule links to an atom exactly when its body names that atom.
    #[test]
    fn atom_edges_follow_body_names(atoms in arb_atoms(), rules in arb_rules()) {
        let graph = GraphBuilder::new()
            .head_policy(HeadPolicy::NodePerRule)
            .build(&atoms, &rules);

        for rule in &rules {
            let source = rule.id.to_string();
            let body = rule.definition.split_once(":-").map(|(_, b)| b).unwrap_or("");
            let expected: HashSet<String> = atoms
                .iter()
                .filter(|a| {
                    let name = a.predicate.split('(').next().unwrap_or("");
                    body.split(|c: char| !(c.is_ascii_lowercase() || c == '_'))
                        .any(|token| token == name)
                })
                .map(|a| a.id.to_string())
                .collect();
            let actual: HashSet<String> = graph
                .edges_from(&source)
                .filter(|e| e.target_kind == NodeKind::Atom)
                .map(|e| e.target.clone())
                .collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
