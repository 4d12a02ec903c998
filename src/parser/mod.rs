//! Expression-language parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`chars`]: Character classification (code point → category)
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`grammar`]: The LL(1) table, `(non-terminal, lookahead) → production`
//! - [`builders`]: Reduction functions that assemble AST nodes
//! - [`parser`]: The two-stack predictive parser (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! Every compound form is fully parenthesized and prefix-headed:
//! `(+ a b)`, `(− a b)`, `(× a b)`, `(= a b)`, `(? c t f)`, `(λ x body)`,
//! `(≜ name value body)` and application `(f a1 … ak)`. A bare group `(x)` is
//! just `x`.
//!
//! # Parser Implementation
//!
//! Table-driven and non-recursive: an explicit control stack of grammar symbols
//! and reduction markers, and a value stack of synthesized attributes.

pub mod ast;
pub mod builders;
pub mod chars;
pub mod grammar;
pub mod lexer;
pub mod parser;

use ast::{Node, SourceLocation};
use lexer::LexError;
use parser::{ParseError, Parser};
use std::fmt;

/// Any failure of the source → AST pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Lex(LexError),
    Parse(ParseError),
}

impl Error {
    /// Where in the source the fault was detected, if known.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            Error::Lex(e) => Some(e.location()),
            Error::Parse(e) => e.location(),
        }
    }

    /// True for stack-machine defects rather than malformed input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Parse(e) if e.is_internal())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lex(e) => write!(f, "{}", e),
            Error::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Lex(e) => Some(e),
            Error::Parse(e) => Some(e),
        }
    }
}

impl From<LexError> for Error {
    fn from(err: LexError) -> Self {
        Error::Lex(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

/// Tokenize and parse `text` into a single AST root.
pub fn parse_source(text: &str) -> Result<Node, Error> {
    let tokens = lexer::tokenize(text)?;
    Ok(Parser::new(&tokens).parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_surfaces() {
        let err = parse_source("(+ 1 12.5)").unwrap_err();
        assert!(matches!(err, Error::Lex(_)));
        assert_eq!(err.location().map(|l| l.index), Some(5));
        assert!(!err.is_internal());
    }

    #[test]
    fn test_parse_error_surfaces() {
        let err = parse_source("(x").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert_eq!(err.location().map(|l| l.index), Some(2));
    }
}
