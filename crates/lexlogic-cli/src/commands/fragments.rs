//! Fragment listing, creation, highlighted display and cost.

use std::path::Path;

use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use lexlogic_core::client::{AtomApi, FragmentApi};
use lexlogic_core::color::atom_color;
use lexlogic_core::models::{AtomId, CreateRegulationFragment, Formalism, FragmentId, LlmIdentifier};
use lexlogic_core::{Config, Highlighter, HoverState};

use crate::output::{dimmed, heading, print_info, print_success, render_fragments, swatch};

pub async fn list<B: FragmentApi>(backend: &B) -> Result<()> {
    let fragments = backend.list_fragments().await?;
    if fragments.is_empty() {
        print_info("No regulation fragments");
        return Ok(());
    }

    for fragment in fragments {
        println!(
            "{:>5}  {}  {}",
            fragment.id,
            heading(&fragment.title),
            dimmed(&format!(
                "{} · {} · {}",
                fragment.llm_identifier.display_name(),
                fragment.formalism.display_name(),
                fragment.created_at.format("%Y-%m-%d %H:%M")
            ))
        );
    }
    Ok(())
}

/// Print the fragment text with every atom span colored, followed by the
/// atom list.
pub async fn show<B: FragmentApi + AtomApi>(
    backend: &B,
    config: &Config,
    id: FragmentId,
    focus: Option<AtomId>,
    annotated: bool,
) -> Result<()> {
    let (fragment, atoms) = tokio::try_join!(backend.get_fragment(id), backend.list_atoms(id))?;
    let highlighter = Highlighter::new(config.highlight.overlap_policy);

    println!("{}", heading(&fragment.title));
    if let Some(source) = &fragment.source {
        println!("{}", dimmed(source));
    }
    println!();

    if annotated {
        println!("{}", highlighter.annotate(&fragment.content, &atoms)?);
    } else {
        let hover = HoverState::new();
        hover.set(focus);
        let fragments = highlighter.highlight(&fragment.content, &atoms)?;
        println!("{}", render_fragments(&fragments, &hover));
    }

    if atoms.is_empty() {
        println!();
        print_info("No atoms extracted yet");
        return Ok(());
    }

    println!();
    println!("{}", heading("Atoms"));
    for atom in &atoms {
        let color = atom_color(atom.id);
        let mut flags = Vec::new();
        if atom.is_negated {
            flags.push("negated");
        }
        if atom.is_fact {
            flags.push("fact");
        }
        println!(
            "{} {:>5}  {}  {} {}",
            swatch(color.hover),
            atom.id,
            atom.predicate,
            atom.description,
            dimmed(&flags.join(", "))
        );
    }
    Ok(())
}

pub async fn cost<B: FragmentApi>(backend: &B, id: FragmentId) -> Result<()> {
    let (fragment, price) = tokio::try_join!(backend.get_fragment(id), backend.fragment_cost(id))?;

    println!("{}", heading(&fragment.title));
    println!(
        "  model:      {}",
        fragment.llm_identifier.display_name()
    );
    println!(
        "  tokens:     {} in / {} out",
        fragment.used_tokens_in.unwrap_or(0),
        fragment.used_tokens_out.unwrap_or(0)
    );
    println!("  estimated:  ${:.4}", fragment.spent());
    println!("  reported:   ${:.4}", price.price);
    Ok(())
}

/// Create a fragment from the text in `file`.
pub async fn create<B: FragmentApi>(
    backend: &B,
    title: String,
    file: &Path,
    source: Option<String>,
    llm: LlmIdentifier,
) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .wrap_err_with(|| format!("Failed to read {}", file.display()))?;
    let payload = new_fragment(title, content, source, llm)?;

    let fragment = backend.create_fragment(&payload).await?;
    print_success(&format!("Created fragment {} ({})", fragment.id, fragment.title));
    Ok(())
}

fn new_fragment(
    title: String,
    content: String,
    source: Option<String>,
    llm: LlmIdentifier,
) -> Result<CreateRegulationFragment> {
    let title = title.trim().to_string();
    let content = content.trim().to_string();
    if title.is_empty() {
        bail!("Fragment title must not be empty");
    }
    if content.is_empty() {
        bail!("Fragment text must not be empty");
    }

    Ok(CreateRegulationFragment {
        title,
        content,
        source: source.filter(|s| !s.trim().is_empty()),
        llm_identifier: llm,
        formalism: Formalism::Prolog,
    })
}

/// Delete a fragment together with its atoms, rules and logs.
pub async fn delete<B: FragmentApi>(backend: &B, id: FragmentId) -> Result<()> {
    backend.delete_fragment(id).await?;
    print_success(&format!("Deleted fragment {}", id));
    Ok(())
}
