use thiserror::Error;

/// Errors produced while reading Horn-clause text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogicError {
    #[error("Unexpected character {found:?} at offset {offset}")]
    Lex { offset: usize, found: String },

    #[error("Parse error at offset {offset}: {message}")]
    Parse { offset: usize, message: String },

    #[error("Maximum nesting depth exceeded at offset {offset}")]
    TooDeep { offset: usize },

    #[error("Rule definition has no ':-' separator: {0}")]
    MissingNeck(String),

    #[error("Missing closing bracket in predicate: {0}")]
    UnbalancedParens(String),
}
