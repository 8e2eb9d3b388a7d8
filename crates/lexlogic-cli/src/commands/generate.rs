//! Atom and rule (re)generation and clearing.

use clap::ValueEnum;
use color_eyre::Result;
use lexlogic_core::client::{AtomApi, RuleApi};
use lexlogic_core::models::{FragmentId, RegenerateFeedback};

use crate::output::{print_error, print_success, spinner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Atoms,
    Rules,
}

impl Target {
    fn noun(self) -> &'static str {
        match self {
            Target::Atoms => "atoms",
            Target::Rules => "rules",
        }
    }
}

pub async fn generate<B: AtomApi + RuleApi>(backend: &B, target: Target, fragment: FragmentId) -> Result<()> {
    let pb = spinner(format!("Generating {} for fragment {}...", target.noun(), fragment));
    let result = match target {
        Target::Atoms => backend.generate_atoms(fragment).await,
        Target::Rules => backend.generate_rules(fragment).await,
    };
    pb.finish_and_clear();

    if let Err(e) = result {
        print_error(&format!("Generation failed: {}", e));
        return Err(e.into());
    }
    report(backend, target, fragment).await
}

pub async fn regenerate<B: AtomApi + RuleApi>(
    backend: &B,
    target: Target,
    fragment: FragmentId,
    feedback: String,
) -> Result<()> {
    let feedback = RegenerateFeedback { feedback };
    let pb = spinner(format!("Regenerating {} for fragment {}...", target.noun(), fragment));
    let result = match target {
        Target::Atoms => backend.regenerate_atoms(fragment, &feedback).await,
        Target::Rules => backend.regenerate_rules(fragment, &feedback).await,
    };
    pb.finish_and_clear();

    if let Err(e) = result {
        print_error(&format!("Regeneration failed: {}", e));
        return Err(e.into());
    }
    report(backend, target, fragment).await
}

async fn report<B: AtomApi + RuleApi>(backend: &B, target: Target, fragment: FragmentId) -> Result<()> {
    let count = match target {
        Target::Atoms => backend.list_atoms(fragment).await?.len(),
        Target::Rules => backend.list_rules(fragment).await?.len(),
    };
    print_success(&format!("Fragment {} now has {} {}", fragment, count, target.noun()));
    Ok(())
}

/// Delete every atom or rule of a fragment.
pub async fn clear<B: AtomApi + RuleApi>(backend: &B, target: Target, fragment: FragmentId) -> Result<()> {
    match target {
        Target::Atoms => backend.delete_atoms(fragment).await?,
        Target::Rules => backend.delete_rules(fragment).await?,
    }
    print_success(&format!("Cleared {} of fragment {}", target.noun(), fragment));
    Ok(())
}
