//! Recursive-descent parser over [`Token`]s.
//!
//! Grammar:
//!
//! ```text
//! clause  := term [":-" body] "."
//! body    := conj (";" conj)*
//! conj    := unary ("," unary)*
//! unary   := "\+" unary | "not" "(" body ")" | "(" body ")" | goal
//! goal    := expr [cmp expr]
//! expr    := mul (("+" | "-") mul)*
//! mul     := primary (("*" | "/") primary)*
//! primary := var | number | string | "-" number | atom ["(" args ")"]
//!          | "[" [args ["|" expr]] "]" | "(" expr ")"
//! ```

use std::ops::Range;

use super::ast::{Body, Clause, Term, COMPARISON_OPS};
use super::lexer::{tokenize, Token};
use super::LogicError;

/// Maximum recursion depth to prevent stack overflow on pathological input.
const MAX_DEPTH: usize = 64;

/// Parse exactly one clause.
pub fn parse_clause(src: &str) -> Result<Clause, LogicError> {
    let tokens = tokenize(src)?;
    let mut parser = Parser::new(&tokens, src.len());
    let clause = parser.clause()?;
    if !parser.at_end() {
        return Err(parser.error("unexpected input after clause"));
    }
    Ok(clause)
}

/// Parse a sequence of clauses.
pub fn parse_program(src: &str) -> Result<Vec<Clause>, LogicError> {
    let tokens = tokenize(src)?;
    let mut parser = Parser::new(&tokens, src.len());
    let mut clauses = Vec::new();
    while !parser.at_end() {
        clauses.push(parser.clause()?);
    }
    Ok(clauses)
}

struct Parser<'t, 'src> {
    tokens: &'t [(Token<'src>, Range<usize>)],
    pos: usize,
    depth: usize,
    eof: usize,
}

impl<'t, 'src> Parser<'t, 'src> {
    fn new(tokens: &'t [(Token<'src>, Range<usize>)], eof: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            eof,
        }
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    fn enter(&mut self) -> Result<(), LogicError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            Err(LogicError::TooDeep {
                offset: self.offset(),
            })
        } else {
            Ok(())
        }
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<Token<'src>> {
        self.tokens.get(self.pos).map(|(t, _)| *t)
    }

    fn peek_at(&self, ahead: usize) -> Option<Token<'src>> {
        self.tokens.get(self.pos + ahead).map(|(t, _)| *t)
    }

    fn advance(&mut self) -> Option<Token<'src>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: Token<'_>) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token<'_>, what: &str) -> Result<(), LogicError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(&format!("expected {}", what)))
        }
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, span)| span.start)
            .unwrap_or(self.eof)
    }

    fn error(&self, message: &str) -> LogicError {
        let found = match self.peek() {
            Some(_) => format!("{}, found {:?}", message, self.tokens[self.pos].0),
            None => format!("{}, found end of input", message),
        };
        LogicError::Parse {
            offset: self.offset(),
            message: found,
        }
    }

    // ========================================================================
    // Clauses and bodies
    // ========================================================================

    fn clause(&mut self) -> Result<Clause, LogicError> {
        let head = self.primary()?;
        if !head.is_callable() {
            return Err(LogicError::Parse {
                offset: self.tokens.get(self.pos.saturating_sub(1)).map_or(0, |(_, s)| s.start),
                message: format!("clause head must be an atom or compound term, got {}", head),
            });
        }

        let body = if self.eat(Token::Neck) {
            Some(self.body()?)
        } else {
            None
        };

        self.expect(Token::End, "'.'")?;
        Ok(Clause { head, body })
    }

    fn body(&mut self) -> Result<Body, LogicError> {
        self.enter()?;
        let mut parts = vec![self.conjunction()?];
        while self.eat(Token::Semicolon) {
            parts.push(self.conjunction()?);
        }
        self.leave();
        Ok(collapse(parts, Body::Or))
    }

    fn conjunction(&mut self) -> Result<Body, LogicError> {
        let mut parts = vec![self.unary()?];
        while self.eat(Token::Comma) {
            parts.push(self.unary()?);
        }
        Ok(collapse(parts, Body::And))
    }

    fn unary(&mut self) -> Result<Body, LogicError> {
        self.enter()?;
        let result = match self.peek() {
            Some(Token::NotProvable) => {
                self.advance();
                self.unary().map(|inner| Body::Not(Box::new(inner)))
            }
            Some(Token::Atom("not")) if self.peek_at(1) == Some(Token::LParen) => {
                self.pos += 2;
                let inner = self.body()?;
                self.expect(Token::RParen, "')'")?;
                Ok(Body::Not(Box::new(inner)))
            }
            Some(Token::LParen) => {
                self.advance();
                let inner = self.body()?;
                self.expect(Token::RParen, "')'")?;
                Ok(inner)
            }
            _ => self.goal().map(Body::Goal),
        };
        self.leave();
        result
    }

    // ========================================================================
    // Terms
    // ========================================================================

    fn goal(&mut self) -> Result<Term, LogicError> {
        let lhs = self.expr()?;
        let op = match self.peek() {
            Some(Token::Op(op)) if COMPARISON_OPS.contains(&op) => op,
            Some(Token::Atom("is")) => "is",
            _ => return Ok(lhs),
        };
        self.advance();
        let rhs = self.expr()?;
        Ok(Term::compound(op, vec![lhs, rhs]))
    }

    fn expr(&mut self) -> Result<Term, LogicError> {
        let mut lhs = self.mul()?;
        while let Some(Token::Op(op @ ("+" | "-"))) = self.peek() {
            self.advance();
            let rhs = self.mul()?;
            lhs = Term::compound(op, vec![lhs, rhs]);
        }
        Ok(lhs)
    }

    fn mul(&mut self) -> Result<Term, LogicError> {
        let mut lhs = self.primary()?;
        while let Some(Token::Op(op @ ("*" | "/"))) = self.peek() {
            self.advance();
            let rhs = self.primary()?;
            lhs = Term::compound(op, vec![lhs, rhs]);
        }
        Ok(lhs)
    }

    fn primary(&mut self) -> Result<Term, LogicError> {
        self.enter()?;
        let term = match self.peek() {
            Some(Token::Var(name)) => {
                self.advance();
                Term::var(name)
            }
            Some(Token::Number(value)) => {
                self.advance();
                Term::Number {
                    value: value.to_string(),
                }
            }
            Some(Token::Op("-")) if matches!(self.peek_at(1), Some(Token::Number(_))) => {
                self.advance();
                match self.advance() {
                    Some(Token::Number(value)) => Term::Number {
                        value: format!("-{}", value),
                    },
                    _ => return Err(self.error("expected number")),
                }
            }
            Some(Token::Str(raw)) => {
                self.advance();
                Term::Str {
                    value: unquote(raw).to_string(),
                }
            }
            Some(Token::Atom(name)) => {
                self.advance();
                self.callable(name)?
            }
            Some(Token::QuotedAtom(raw)) => {
                self.advance();
                self.callable(unquote(raw))?
            }
            Some(Token::LBracket) => {
                self.advance();
                self.list()?
            }
            Some(Token::LParen) => {
                self.advance();
                let inner = self.expr()?;
                self.expect(Token::RParen, "')'")?;
                inner
            }
            _ => return Err(self.error("expected term")),
        };
        self.leave();
        Ok(term)
    }

    fn callable(&mut self, name: &str) -> Result<Term, LogicError> {
        if !self.eat(Token::LParen) {
            return Ok(Term::atom(name));
        }
        let args = self.arguments()?;
        self.expect(Token::RParen, "')'")?;
        Ok(Term::compound(name, args))
    }

    fn arguments(&mut self) -> Result<Vec<Term>, LogicError> {
        let mut args = vec![self.goal()?];
        while self.eat(Token::Comma) {
            args.push(self.goal()?);
        }
        Ok(args)
    }

    fn list(&mut self) -> Result<Term, LogicError> {
        if self.eat(Token::RBracket) {
            return Ok(Term::List {
                items: Vec::new(),
                tail: None,
            });
        }
        let items = self.arguments()?;
        let tail = if self.eat(Token::Bar) {
            Some(Box::new(self.expr()?))
        } else {
            None
        };
        self.expect(Token::RBracket, "']'")?;
        Ok(Term::List { items, tail })
    }
}

fn collapse(mut parts: Vec<Body>, join: fn(Vec<Body>) -> Body) -> Body {
    if parts.len() == 1 {
        parts.remove(0)
    } else {
        join(parts)
    }
}

fn unquote(raw: &str) -> &str {
    raw.get(1..raw.len().saturating_sub(1)).unwrap_or(raw)
}
