//! Tokenizer for the Prolog subset the backend generates.

use std::ops::Range;

use logos::Logos;

use super::LogicError;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"%[^\n]*")]
pub enum Token<'src> {
    #[token(":-")]
    Neck,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("|")]
    Bar,

    /// Negation as failure.
    #[token("\\+")]
    NotProvable,

    /// Clause terminator.
    #[token(".")]
    End,

    /// Comparison and arithmetic operators.
    #[regex(r"=|\\=|==|\\==|=:=|=\\=|<|>|=<|>=|\+|-|\*|/", |lex| lex.slice())]
    Op(&'src str),

    #[regex(r"[a-z][a-zA-Z0-9_]*", |lex| lex.slice())]
    Atom(&'src str),

    /// Quoted atom, quotes included.
    #[regex(r"'([^'\\]|\\.)*'", |lex| lex.slice())]
    QuotedAtom(&'src str),

    #[regex(r"[A-Z_][a-zA-Z0-9_]*", |lex| lex.slice())]
    Var(&'src str),

    #[regex(r"[0-9]+", number)]
    Number(&'src str),

    /// Double-quoted string, quotes included.
    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice())]
    Str(&'src str),
}

/// Extends an integer with its fractional part, leaving a trailing `.`
/// to terminate the clause.
fn number<'src>(lex: &mut logos::Lexer<'src, Token<'src>>) -> &'src str {
    let rest = lex.remainder().as_bytes();
    if rest.len() > 1 && rest[0] == b'.' && rest[1].is_ascii_digit() {
        let digits = rest[1..].iter().take_while(|b| b.is_ascii_digit()).count();
        lex.bump(1 + digits);
    }
    lex.slice()
}

/// Tokenize `src`, failing on the first character no token accepts.
pub fn tokenize(src: &str) -> Result<Vec<(Token<'_>, Range<usize>)>, LogicError> {
    let mut tokens = Vec::new();
    let mut lex = Token::lexer(src);

    while let Some(result) = lex.next() {
        match result {
            Ok(token) => tokens.push((token, lex.span())),
            Err(()) => {
                return Err(LogicError::Lex {
                    offset: lex.span().start,
                    found: lex.slice().to_string(),
                })
            }
        }
    }

    Ok(tokens)
}
