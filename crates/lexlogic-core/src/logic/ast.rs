//! Syntax tree for parsed clauses.

use std::fmt;

use serde::Serialize;

/// Infix operators that read as comparisons rather than predicate calls.
pub const COMPARISON_OPS: &[&str] = &[
    "=", "\\=", "==", "\\==", "=:=", "=\\=", "<", ">", "=<", ">=", "is",
];

/// A Prolog term.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Term {
    Atom { name: String },
    Var { name: String },
    Number { value: String },
    Str { value: String },
    Compound { functor: String, args: Vec<Term> },
    List { items: Vec<Term>, tail: Option<Box<Term>> },
}

impl Term {
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom { name: name.into() }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Term::Var { name: name.into() }
    }

    pub fn compound(functor: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Compound {
            functor: functor.into(),
            args,
        }
    }

    /// Name of a callable term.
    pub fn name(&self) -> Option<&str> {
        match self {
            Term::Atom { name } => Some(name),
            Term::Compound { functor, .. } => Some(functor),
            _ => None,
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Term::Compound { args, .. } => args.len(),
            _ => 0,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Term::Atom { .. } | Term::Compound { .. })
    }

    /// True for goals built from an infix operator such as `A >= 18`.
    pub fn is_operator(&self) -> bool {
        self.name()
            .and_then(|n| n.chars().next())
            .map_or(false, |c| !c.is_alphanumeric() && c != '_' && c != '\'')
            || matches!(self, Term::Compound { functor, args } if functor == "is" && args.len() == 2)
    }

    /// `name/arity` for callable terms.
    pub fn indicator(&self) -> Option<String> {
        self.name().map(|name| format!("{}/{}", name, self.arity()))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom { name } => write!(f, "{}", name),
            Term::Var { name } => write!(f, "{}", name),
            Term::Number { value } => write!(f, "{}", value),
            Term::Str { value } => write!(f, "\"{}\"", value),
            Term::Compound { functor, args } => {
                if let ([lhs, rhs], true) = (args.as_slice(), self.is_operator()) {
                    return write!(f, "{} {} {}", lhs, functor, rhs);
                }
                write!(f, "{}(", functor)?;
                write_joined(f, args)?;
                write!(f, ")")
            }
            Term::List { items, tail } => {
                write!(f, "[")?;
                write_joined(f, items)?;
                if let Some(tail) = tail {
                    write!(f, "|{}", tail)?;
                }
                write!(f, "]")
            }
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, terms: &[Term]) -> fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", term)?;
    }
    Ok(())
}

/// Body of a rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Body {
    Goal(Term),
    Not(Box<Body>),
    And(Vec<Body>),
    Or(Vec<Body>),
}

impl Body {
    /// Every goal in source order, negated ones included.
    pub fn goals(&self) -> Vec<&Term> {
        let mut out = Vec::new();
        self.collect_goals(&mut out);
        out
    }

    fn collect_goals<'a>(&'a self, out: &mut Vec<&'a Term>) {
        match self {
            Body::Goal(term) => out.push(term),
            Body::Not(inner) => inner.collect_goals(out),
            Body::And(parts) | Body::Or(parts) => {
                for part in parts {
                    part.collect_goals(out);
                }
            }
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Goal(term) => write!(f, "{}", term),
            Body::Not(inner) => write!(f, "\\+ {}", inner),
            Body::And(parts) => write_body_joined(f, parts, ", "),
            Body::Or(parts) => {
                write!(f, "(")?;
                write_body_joined(f, parts, "; ")?;
                write!(f, ")")
            }
        }
    }
}

fn write_body_joined(f: &mut fmt::Formatter<'_>, parts: &[Body], sep: &str) -> fmt::Result {
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", part)?;
    }
    Ok(())
}

/// A fact (no body) or a rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clause {
    pub head: Term,
    pub body: Option<Body>,
}

impl Clause {
    pub fn is_fact(&self) -> bool {
        self.body.is_none()
    }

    /// Names of user predicates called from the body, deduplicated in first
    /// occurrence order. Operator goals are skipped.
    pub fn referenced_predicates(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let Some(body) = &self.body else {
            return names;
        };
        for goal in body.goals() {
            if goal.is_operator() {
                continue;
            }
            if let Some(name) = goal.name() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            Some(body) => write!(f, "{} :- {}.", self.head, body),
            None => write!(f, "{}.", self.head),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator() {
        let t = Term::compound("bird", vec![Term::var("X")]);
        assert_eq!(t.indicator().as_deref(), Some("bird/1"));
        assert_eq!(Term::atom("raining").indicator().as_deref(), Some("raining/0"));
        assert_eq!(Term::var("X").indicator(), None);
    }

    #[test]
    fn test_operator_detection() {
        let cmp = Term::compound(">=", vec![Term::var("A"), Term::var("B")]);
        assert!(cmp.is_operator());
        let is = Term::compound("is", vec![Term::var("A"), Term::var("B")]);
        assert!(is.is_operator());
        assert!(!Term::compound("bird", vec![Term::var("X")]).is_operator());
    }

    #[test]
    fn test_display() {
        let clause = Clause {
            head: Term::compound("flies", vec![Term::var("X")]),
            body: Some(Body::And(vec![
                Body::Goal(Term::compound("bird", vec![Term::var("X")])),
                Body::Not(Box::new(Body::Goal(Term::compound(
                    "penguin",
                    vec![Term::var("X")],
                )))),
            ])),
        };
        assert_eq!(clause.to_string(), "flies(X) :- bird(X), \\+ penguin(X).");
    }
}
