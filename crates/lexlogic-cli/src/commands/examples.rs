//! Running example facts against a fragment's program.

use std::path::Path;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use lexlogic_core::client::{AtomApi, ReasoningApi};
use lexlogic_core::models::{FragmentId, PrologQuery, PrologResponse, QueryStatus};
use lexlogic_core::ExampleStore;

use crate::output::{dimmed, heading, print_error, print_info, print_success, spinner};

/// Run the facts in `path` as-is.
pub async fn run_file<B: ReasoningApi>(backend: &B, fragment: FragmentId, path: &Path) -> Result<()> {
    let facts = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read facts from {}", path.display()))?;
    run(backend, fragment, &PrologQuery { facts }).await
}

/// Ask the backend for example facts, bind them to the fragment's atoms and
/// print the resulting program; with `execute`, run it too.
pub async fn generated<B: AtomApi + ReasoningApi>(backend: &B, fragment: FragmentId, execute: bool) -> Result<()> {
    let pb = spinner("Generating examples...");
    let result = tokio::try_join!(backend.generate_examples(fragment), backend.list_atoms(fragment));
    pb.finish_and_clear();
    let (examples, atoms) = result?;

    for example in &examples.examples {
        println!("{} {}", dimmed("%"), dimmed(&example.description));
    }

    let mut store = ExampleStore::new();
    let loaded = store.load_generated(fragment, &examples, &atoms);
    if loaded == 0 {
        print_info("No generated fact matched an atom of this fragment");
        return Ok(());
    }

    let query = store.query(fragment, &atoms)?;
    println!("{}", query.facts);

    if execute {
        println!();
        run(backend, fragment, &query).await?;
    }
    Ok(())
}

async fn run<B: ReasoningApi>(backend: &B, fragment: FragmentId, query: &PrologQuery) -> Result<()> {
    let pb = spinner("Running example...");
    let result = backend.run_example(fragment, query).await;
    pb.finish_and_clear();

    let response = result?;
    for line in describe(&response) {
        println!("{}", line);
    }
    match response.error_message() {
        Some(message) => print_error(message),
        None if response.status == QueryStatus::Success => print_success("Query succeeded"),
        None => print_info("No solutions"),
    }
    Ok(())
}

/// One line per solution with its bindings.
fn describe(response: &PrologResponse) -> Vec<String> {
    response
        .answers
        .iter()
        .filter(|answer| answer.status == QueryStatus::Success)
        .enumerate()
        .map(|(i, answer)| {
            let bindings = answer
                .answers
                .iter()
                .map(|binding| format!("{} = {}", binding.variable, binding.value))
                .collect::<Vec<_>>()
                .join(", ");
            if bindings.is_empty() {
                format!("{} true", heading(&format!("{}.", i + 1)))
            } else {
                format!("{} {}", heading(&format!("{}.", i + 1)), bindings)
            }
        })
        .collect()
}
