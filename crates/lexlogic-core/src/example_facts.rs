//! Hand-built example facts for running a fragment's program.
//!
//! Constants are values such as `alice`. A fact instantiates one atom, binding
//! each variable of the atom's predicate to a constant. Rendering the facts
//! gives the program text sent with a [`PrologQuery`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::logic::{arguments, predicate_name, LogicError};
use crate::models::{Atom, AtomId, ExampleFact, ExampleSet, FragmentId, PrologQuery};

static PLAIN_ATOM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z][a-zA-Z0-9_]*|-?[0-9]+(\.[0-9]+)?)$").expect("static regex"));

#[derive(Debug, Error)]
pub enum ExampleError {
    #[error("Constant value must not be empty")]
    EmptyConstant,

    #[error("Unknown constant: {0}")]
    UnknownConstant(ConstantId),

    #[error("Unknown fact: {0}")]
    UnknownFact(FactId),

    #[error("Fact {fact} refers to unknown atom {atom_id}")]
    UnknownAtom { fact: FactId, atom_id: AtomId },

    #[error("Variable {variable} of {predicate} is not bound")]
    UnboundVariable { predicate: String, variable: String },

    #[error(transparent)]
    Logic(#[from] LogicError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ConstantId(Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FactId(Uuid);

impl fmt::Display for ConstantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constant {
    pub id: ConstantId,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    pub id: FactId,
    pub atom_id: AtomId,
    /// Variable name to bound constant.
    pub bindings: BTreeMap<String, ConstantId>,
}

/// Constants and facts of one fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FragmentExamples {
    pub constants: Vec<Constant>,
    pub facts: Vec<Fact>,
}

impl FragmentExamples {
    fn constant(&self, id: ConstantId) -> Option<&Constant> {
        self.constants.iter().find(|c| c.id == id)
    }

    /// Existing constant with this value, or a new one.
    fn intern(&mut self, value: &str) -> ConstantId {
        if let Some(existing) = self.constants.iter().find(|c| c.value == value) {
            return existing.id;
        }
        let id = ConstantId(Uuid::new_v4());
        self.constants.push(Constant {
            id,
            value: value.to_string(),
        });
        id
    }
}

/// Example constants and facts, kept per fragment.
#[derive(Debug, Default)]
pub struct ExampleStore {
    fragments: HashMap<FragmentId, FragmentExamples>,
}

impl ExampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, fragment: FragmentId) -> Option<&FragmentExamples> {
        self.fragments.get(&fragment)
    }

    fn entry(&mut self, fragment: FragmentId) -> &mut FragmentExamples {
        self.fragments.entry(fragment).or_default()
    }

    pub fn add_constant(
        &mut self,
        fragment: FragmentId,
        value: impl Into<String>,
    ) -> Result<ConstantId, ExampleError> {
        let value = value.into();
        let value = value.trim();
        if value.is_empty() {
            return Err(ExampleError::EmptyConstant);
        }
        let id = ConstantId(Uuid::new_v4());
        self.entry(fragment).constants.push(Constant {
            id,
            value: value.to_string(),
        });
        Ok(id)
    }

    /// Removes the constant and every binding to it.
    pub fn remove_constant(&mut self, fragment: FragmentId, id: ConstantId) -> bool {
        let Some(examples) = self.fragments.get_mut(&fragment) else {
            return false;
        };
        let before = examples.constants.len();
        examples.constants.retain(|c| c.id != id);
        for fact in &mut examples.facts {
            fact.bindings.retain(|_, bound| *bound != id);
        }
        examples.constants.len() != before
    }

    pub fn add_fact(&mut self, fragment: FragmentId, atom_id: AtomId) -> FactId {
        let id = FactId(Uuid::new_v4());
        self.entry(fragment).facts.push(Fact {
            id,
            atom_id,
            bindings: BTreeMap::new(),
        });
        id
    }

    pub fn remove_fact(&mut self, fragment: FragmentId, id: FactId) -> bool {
        let Some(examples) = self.fragments.get_mut(&fragment) else {
            return false;
        };
        let before = examples.facts.len();
        examples.facts.retain(|f| f.id != id);
        examples.facts.len() != before
    }

    /// Bind `variable` of a fact to a constant, or unbind it with `None`.
    pub fn bind(
        &mut self,
        fragment: FragmentId,
        fact: FactId,
        variable: &str,
        constant: Option<ConstantId>,
    ) -> Result<(), ExampleError> {
        let examples = self
            .fragments
            .get_mut(&fragment)
            .ok_or(ExampleError::UnknownFact(fact))?;

        if let Some(constant) = constant {
            if examples.constant(constant).is_none() {
                return Err(ExampleError::UnknownConstant(constant));
            }
        }

        let target = examples
            .facts
            .iter_mut()
            .find(|f| f.id == fact)
            .ok_or(ExampleError::UnknownFact(fact))?;

        match constant {
            Some(constant) => {
                target.bindings.insert(variable.to_string(), constant);
            }
            None => {
                target.bindings.remove(variable);
            }
        }
        Ok(())
    }

    pub fn reset(&mut self, fragment: FragmentId) {
        self.fragments.remove(&fragment);
    }

    /// Import backend-generated examples. Each generated fact is matched to
    /// the atom with the same predicate text, else to one with the same name
    /// and arity; facts with no matching atom are skipped. Returns the number
    /// of facts added.
    pub fn load_generated(
        &mut self,
        fragment: FragmentId,
        examples: &ExampleSet,
        atoms: &[Atom],
    ) -> usize {
        let entry = self.entry(fragment);
        let mut added = 0;

        for generated in examples.examples.iter().flat_map(|e| &e.facts) {
            let Some(atom) = matching_atom(atoms, generated) else {
                warn!(predicate = %generated.predicate, "Generated fact matches no atom");
                continue;
            };

            let mut bindings = BTreeMap::new();
            for argument in &generated.arguments {
                let constant = entry.intern(argument.value.trim());
                bindings.insert(argument.variable.clone(), constant);
            }

            entry.facts.push(Fact {
                id: FactId(Uuid::new_v4()),
                atom_id: atom.id,
                bindings,
            });
            added += 1;
        }

        added
    }

    /// Render the fragment's facts as sorted, newline-separated Prolog facts.
    pub fn facts_program(
        &self,
        fragment: FragmentId,
        atoms: &[Atom],
    ) -> Result<String, ExampleError> {
        let Some(examples) = self.fragments.get(&fragment) else {
            return Ok(String::new());
        };

        let mut lines = examples
            .facts
            .iter()
            .map(|fact| render_fact(examples, fact, atoms))
            .collect::<Result<Vec<_>, _>>()?;
        lines.sort();
        Ok(lines.join("\n"))
    }

    pub fn query(&self, fragment: FragmentId, atoms: &[Atom]) -> Result<PrologQuery, ExampleError> {
        Ok(PrologQuery {
            facts: self.facts_program(fragment, atoms)?,
        })
    }
}

fn matching_atom<'a>(atoms: &'a [Atom], fact: &ExampleFact) -> Option<&'a Atom> {
    let predicate = fact.predicate.trim();
    if let Some(atom) = atoms.iter().find(|a| a.predicate.trim() == predicate) {
        return Some(atom);
    }

    let name = predicate_name(predicate);
    let arity = if predicate.contains('(') {
        arguments(predicate).ok()?.len()
    } else {
        fact.arguments.len()
    };
    atoms.iter().find(|a| {
        predicate_name(a.predicate.trim()) == name
            && arguments(&a.predicate).map_or(false, |args| args.len() == arity)
    })
}

fn render_fact(
    examples: &FragmentExamples,
    fact: &Fact,
    atoms: &[Atom],
) -> Result<String, ExampleError> {
    let atom = atoms
        .iter()
        .find(|a| a.id == fact.atom_id)
        .ok_or(ExampleError::UnknownAtom {
            fact: fact.id,
            atom_id: fact.atom_id,
        })?;

    let predicate = atom.predicate.trim();
    let name = predicate.split('(').next().unwrap_or(predicate).trim();
    let variables = arguments(predicate)?;
    if variables.is_empty() {
        return Ok(format!("{}.", name));
    }

    let values = variables
        .iter()
        .map(|variable| {
            fact.bindings
                .get(*variable)
                .and_then(|id| examples.constant(*id))
                .map(|c| quote_constant(&c.value))
                .ok_or_else(|| ExampleError::UnboundVariable {
                    predicate: predicate.to_string(),
                    variable: variable.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!("{}({}).", name, values.join(", ")))
}

/// Plain atoms and numbers as-is, anything else single-quoted.
pub fn quote_constant(value: &str) -> String {
    if PLAIN_ATOM.is_match(value) {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}
