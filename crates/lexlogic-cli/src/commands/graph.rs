//! Dependency graph output.

use color_eyre::Result;
use lexlogic_core::client::{AtomApi, RuleApi};
use lexlogic_core::config::GraphConfig;
use lexlogic_core::graph::{DependencyGraph, NodeKind};
use lexlogic_core::models::FragmentId;
use lexlogic_core::{GraphBuilder, HeadPolicy, ReferenceExtraction};

use crate::output::{dimmed, heading, swatch};

/// Builder settings: the configured ones, overridden by command-line flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphOptions {
    pub head_policy: HeadPolicy,
    pub extraction: ReferenceExtraction,
}

impl GraphOptions {
    pub fn from_config(config: &GraphConfig, per_rule: bool, parsed: bool) -> Self {
        Self {
            head_policy: if per_rule {
                HeadPolicy::NodePerRule
            } else {
                config.head_policy
            },
            extraction: if parsed {
                ReferenceExtraction::Parsed
            } else {
                config.extraction
            },
        }
    }

    pub fn builder(&self) -> GraphBuilder {
        GraphBuilder::new()
            .head_policy(self.head_policy)
            .extraction(self.extraction)
    }
}

pub async fn print<B: AtomApi + RuleApi>(
    backend: &B,
    fragment: FragmentId,
    options: GraphOptions,
    json: bool,
) -> Result<()> {
    let (atoms, rules) = tokio::try_join!(backend.list_atoms(fragment), backend.list_rules(fragment))?;
    let graph = options.builder().build(&atoms, &rules);

    if json {
        println!("{}", serde_json::to_string_pretty(&graph)?);
    } else {
        for line in describe(&graph) {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Each rule node followed by what its body points at.
fn describe(graph: &DependencyGraph) -> Vec<String> {
    let mut lines = vec![dimmed(&format!(
        "{} atoms, {} rule nodes, {} edges",
        graph.atom_nodes().count(),
        graph.rule_nodes().count(),
        graph.edges.len()
    ))
    .to_string()];

    for rule in graph.rule_nodes() {
        lines.push(format!(
            "{} {} {}",
            swatch(&rule.color),
            heading(&rule.label),
            dimmed(&format!("#{}", rule.id))
        ));
        for edge in graph.edges_from(&rule.id) {
            let Some(target) = graph.target(edge) else {
                continue;
            };
            let kind = match target.kind {
                NodeKind::Atom => "atom",
                NodeKind::Rule => "rule",
            };
            lines.push(format!(
                "    -> {} {} {}",
                swatch(&target.color),
                target.label,
                dimmed(&format!("{} #{}", kind, target.id))
            ));
        }
    }
    lines
}
