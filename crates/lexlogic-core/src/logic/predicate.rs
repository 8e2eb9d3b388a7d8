//! Helpers for predicate strings such as `bird(X)` that need no full parse.

use super::LogicError;
use crate::models::Atom;

/// Number of top-level arguments. `rain` and `rain()` have arity 0.
pub fn arity(predicate: &str) -> Result<usize, LogicError> {
    Ok(arguments(predicate)?.len())
}

/// Trimmed top-level argument strings: `owns(P, item(A))` gives `P` and `item(A)`.
pub fn arguments(predicate: &str) -> Result<Vec<&str>, LogicError> {
    Ok(argument_list(predicate)?.unwrap_or_default())
}

/// Top-level argument strings, or `None` when there are no parentheses.
fn argument_list(predicate: &str) -> Result<Option<Vec<&str>>, LogicError> {
    let Some(open) = predicate.find('(') else {
        return Ok(None);
    };
    let close = predicate
        .rfind(')')
        .filter(|&close| close > open)
        .ok_or_else(|| LogicError::UnbalancedParens(predicate.to_string()))?;

    let content = &predicate[open + 1..close];
    if content.trim().is_empty() {
        return Ok(Some(Vec::new()));
    }

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in content.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(content[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    args.push(content[start..].trim());
    Ok(Some(args))
}

/// Replace every leaf argument with a fresh wildcard variable `_X{n}`,
/// numbering across all predicates, and terminate each with `.`.
pub fn mask_variables<S: AsRef<str>>(predicates: &[S]) -> Result<Vec<String>, LogicError> {
    let mut counter = 1;
    predicates
        .iter()
        .map(|p| mask(p.as_ref().trim(), &mut counter).map(|masked| format!("{}.", masked)))
        .collect()
}

fn mask(predicate: &str, counter: &mut usize) -> Result<String, LogicError> {
    let Some(args) = argument_list(predicate)? else {
        let var = format!("_X{}", counter);
        *counter += 1;
        return Ok(var);
    };
    let name = predicate.split('(').next().unwrap_or(predicate);
    let masked = args
        .iter()
        .map(|arg| mask(arg, counter))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("{}({})", name, masked.join(", ")))
}

/// `:- dynamic name/arity.` declaration for an atom, annotated with the
/// original predicate. Derived atoms get a commented-out declaration.
pub fn dynamic_declaration(atom: &Atom) -> Result<String, LogicError> {
    let predicate = atom.predicate.trim();
    let name = predicate.split('(').next().unwrap_or(predicate).trim();
    let arity = arity(predicate)?;

    Ok(if atom.is_fact {
        format!(":- dynamic {}/{}. % {}", name, arity, predicate)
    } else {
        format!(
            "%:- dynamic {}/{}. % {}; This is a derived predicate, not a fact.",
            name, arity, predicate
        )
    })
}

/// Declarations for every atom, one per line.
pub fn dynamic_declarations(atoms: &[Atom]) -> Result<String, LogicError> {
    let lines = atoms
        .iter()
        .map(dynamic_declaration)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}
