//! Reading rule and atom text.
//!
//! Two levels are offered. The heuristic functions reproduce the lexical
//! conventions the web client has always used and never fail on odd input.
//! The parser reads the Prolog subset the backend generates into a
//! [`Clause`] and reports errors with byte offsets.

mod ast;
mod error;
mod heuristic;
mod lexer;
mod parser;
mod predicate;

pub use ast::{Body, Clause, Term, COMPARISON_OPS};
pub use error::LogicError;
pub use heuristic::{body_tokens, predicate_name, split_clause, split_literals, Literal};
pub use lexer::{tokenize, Token};
pub use parser::{parse_clause, parse_program};
pub use predicate::{arguments, arity, dynamic_declaration, dynamic_declarations, mask_variables};
