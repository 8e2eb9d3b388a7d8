//! Lexical reading of rule text, tolerant of anything the parser rejects.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::LogicError;
use crate::models::NECK;

static LEADING_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_]+").expect("static regex"));
static NAME_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9_]+").expect("static regex"));
static LITERAL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\)[,;]").expect("static regex"));

/// Leading run of `[a-z0-9_]`, or the whole text when there is none.
pub fn predicate_name(text: &str) -> &str {
    LEADING_NAME
        .find(text)
        .map(|m| m.as_str())
        .unwrap_or(text)
}

/// Every `[a-z0-9_]+` run in the text after the last `:-`, in order and with
/// repeats. Facts have no body tokens.
pub fn body_tokens(definition: &str) -> Vec<&str> {
    match definition.rsplit_once(NECK) {
        Some((_, body)) => NAME_TOKEN.find_iter(body).map(|m| m.as_str()).collect(),
        None => Vec::new(),
    }
}

/// Split a rule into trimmed head and tail at the first `:-`.
pub fn split_clause(definition: &str) -> Result<(&str, &str), LogicError> {
    definition
        .split_once(NECK)
        .map(|(head, tail)| (head.trim(), tail.trim()))
        .ok_or_else(|| LogicError::MissingNeck(definition.trim().to_string()))
}

/// One body literal together with the separator that followed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Literal {
    pub text: String,
    /// `,` or `;`; `None` for the final literal.
    pub separator: Option<char>,
}

impl Literal {
    pub fn is_disjunctive(&self) -> bool {
        self.separator == Some(';')
    }
}

/// Split a rule tail into literals at each `)` followed by `,` or `;`.
/// The terminating `.` is dropped and each literal keeps its closing `)`.
pub fn split_literals(tail: &str) -> Vec<Literal> {
    let tail = tail.trim();
    let tail = tail.strip_suffix('.').unwrap_or(tail);

    let mut literals = Vec::new();
    let mut start = 0;
    for boundary in LITERAL_BOUNDARY.find_iter(tail) {
        // The boundary is `)` plus one ASCII separator.
        let close = boundary.start() + 1;
        literals.push(Literal {
            text: tail[start..close].trim().to_string(),
            separator: tail[close..boundary.end()].chars().next(),
        });
        start = boundary.end();
    }

    let rest = tail[start..].trim();
    if !rest.is_empty() {
        literals.push(Literal {
            text: rest.to_string(),
            separator: None,
        });
    }
    literals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_name() {
        assert_eq!(predicate_name("bird(X)"), "bird");
        assert_eq!(predicate_name("has_wings"), "has_wings");
        assert_eq!(predicate_name("Bird(X)"), "Bird(X)");
        assert_eq!(predicate_name(""), "");
    }

    #[test]
    fn test_body_tokens_after_last_neck() {
        assert_eq!(
            body_tokens("flies(X) :- bird(X), not(penguin(X))."),
            vec!["bird", "not", "penguin"]
        );
        assert!(body_tokens("bird(tweety).").is_empty());
    }

    #[test]
    fn test_body_tokens_skip_variables_and_keep_repeats() {
        assert_eq!(
            body_tokens("p(X) :- q(X, Y), q(Y, 1)."),
            vec!["q", "q", "1"]
        );
    }

    #[test]
    fn test_split_clause() {
        assert_eq!(
            split_clause("  flies(X) :- bird(X).  ").unwrap(),
            ("flies(X)", "bird(X).")
        );
        assert_eq!(
            split_clause("bird(tweety)."),
            Err(LogicError::MissingNeck("bird(tweety).".to_string()))
        );
    }

    #[test]
    fn test_split_literals() {
        let lits = split_literals("bird(X), \\+ penguin(X); ostrich(X).");
        assert_eq!(
            lits,
            vec![
                Literal {
                    text: "bird(X)".into(),
                    separator: Some(',')
                },
                Literal {
                    text: "\\+ penguin(X)".into(),
                    separator: Some(';')
                },
                Literal {
                    text: "ostrich(X)".into(),
                    separator: None
                },
            ]
        );
        assert!(lits[1].is_disjunctive());
    }

    #[test]
    fn test_split_literals_keeps_comparisons_attached() {
        let lits = split_literals("age(P, A), A >= 18.");
        assert_eq!(lits.len(), 2);
        assert_eq!(lits[1].text, "A >= 18");
    }

    #[test]
    fn test_split_literals_empty() {
        assert!(split_literals(" . ").is_empty());
    }
}
