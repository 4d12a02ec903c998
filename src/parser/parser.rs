//! Table-driven predictive parser
//!
//! The parser never recurses. It drives two explicit stacks:
//!
//! - the **control stack** holds grammar symbols still to be processed and
//!   deferred-reduction markers;
//! - the **value stack** holds synthesized attributes: token payloads for
//!   `NUMBER`/`IDENTIFIER` and built nodes for reduced non-terminals.
//!
//! Expanding a non-terminal pushes a reduction marker recording the current
//! value-stack height, then the production's right-hand side in reverse. When
//! the marker is popped again, every value above that height belongs to the
//! production; they are handed to its builder and replaced by the result.

use crate::parser::ast::{Node, SourceLocation};
use crate::parser::builders::StackValue;
use crate::parser::grammar::{self, NonTerminal, Production, Symbol};
use crate::parser::lexer::{Token, TokenKind, TokenValue};
use crate::snapshot::{ControlEntry, ControlKind, Snapshot, SnapshotManager, Step};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A terminal on the control stack did not match the lookahead
    UnexpectedToken {
        found: TokenKind,
        expected: TokenKind,
        location: SourceLocation,
    },

    /// No table entry for the non-terminal under the lookahead
    NoProduction {
        nonterminal: NonTerminal,
        found: TokenKind,
        expected: Vec<TokenKind>,
        location: SourceLocation,
    },

    /// The program was complete but tokens remain before END
    TrailingInput {
        found: TokenKind,
        location: SourceLocation,
    },

    /// The token sequence does not end with END
    MissingEnd,

    /// Stack-machine consistency violation; a defect in the grammar table or
    /// a builder, never caused by user input
    Internal { message: String },
}

impl ParseError {
    /// Location of the offending token, when there is one.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            ParseError::UnexpectedToken { location, .. }
            | ParseError::NoProduction { location, .. }
            | ParseError::TrailingInput { location, .. } => Some(*location),
            ParseError::MissingEnd | ParseError::Internal { .. } => None,
        }
    }

    /// Kind of the offending token, when there is one.
    pub fn found(&self) -> Option<TokenKind> {
        match self {
            ParseError::UnexpectedToken { found, .. }
            | ParseError::NoProduction { found, .. }
            | ParseError::TrailingInput { found, .. } => Some(*found),
            ParseError::MissingEnd | ParseError::Internal { .. } => None,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, ParseError::Internal { .. })
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken {
                found,
                expected,
                location,
            } => write!(
                f,
                "Syntax error at index {}: unexpected token {}; expected {}",
                location.index, found, expected
            ),
            ParseError::NoProduction {
                nonterminal,
                found,
                expected,
                location,
            } => {
                let expected: Vec<&str> = expected.iter().map(|k| k.name()).collect();
                write!(
                    f,
                    "Syntax error at index {}: while expanding {}, got {}; expected one of {{{}}}",
                    location.index,
                    nonterminal,
                    found,
                    expected.join(", ")
                )
            }
            ParseError::TrailingInput { found, location } => write!(
                f,
                "Syntax error at index {}: input not fully consumed, found {}",
                location.index, found
            ),
            ParseError::MissingEnd => write!(f, "Syntax error: missing END token"),
            ParseError::Internal { message } => {
                write!(f, "Internal parser error: {}", message)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Control stack entry
#[derive(Debug, Clone, Copy)]
enum Control {
    Symbol(Symbol),
    Reduce {
        nonterminal: NonTerminal,
        production: &'static Production,
        mark: usize,
    },
}

impl Control {
    fn view(&self) -> ControlEntry {
        let kind = match self {
            Control::Symbol(Symbol::Terminal(_)) => ControlKind::Terminal,
            Control::Symbol(Symbol::NonTerminal(_)) => ControlKind::NonTerminal,
            Control::Reduce { .. } => ControlKind::Reduce,
        };
        ControlEntry {
            text: self.to_string(),
            kind,
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Control::Symbol(symbol) => write!(f, "{}", symbol),
            Control::Reduce {
                nonterminal,
                production,
                mark,
            } => write!(f, "⟨reduce {} {} @{}⟩", nonterminal, production.name, mark),
        }
    }
}

/// Predictive parser over a lexed token sequence
pub struct Parser<'t> {
    tokens: &'t [Token],
    position: usize,
    control: Vec<Control>,
    values: Vec<StackValue>,
    history: Option<SnapshotManager>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            control: Vec::new(),
            values: Vec::new(),
            history: None,
        }
    }

    /// Record a [`Snapshot`] after every step, within `memory_limit` bytes.
    pub fn with_trace(mut self, memory_limit: usize) -> Self {
        self.history = Some(SnapshotManager::new(memory_limit));
        self
    }

    /// Parse the token sequence into a single AST root.
    pub fn parse(mut self) -> Result<Node, ParseError> {
        self.run()
    }

    /// Parse and hand back the recorded history alongside the outcome.
    pub fn parse_traced(mut self) -> (Result<Node, ParseError>, SnapshotManager) {
        let result = self.run();
        if let Err(e) = &result {
            self.record(Step::Failed {
                message: e.to_string(),
            });
        }
        let history = self.history.take().unwrap_or_else(|| SnapshotManager::new(0));
        (result, history)
    }

    fn run(&mut self) -> Result<Node, ParseError> {
        if self.tokens.last().map(|t| t.kind) != Some(TokenKind::End) {
            return Err(ParseError::MissingEnd);
        }

        self.control
            .push(Control::Symbol(Symbol::NonTerminal(NonTerminal::Program)));
        self.record(Step::Start);

        while let Some(entry) = self.control.pop() {
            let step = self.step(entry)?;
            self.record(step);
        }

        self.finish()
    }

    /// Process one popped control entry.
    fn step(&mut self, entry: Control) -> Result<Step, ParseError> {
        match entry {
            Control::Reduce {
                nonterminal,
                production,
                mark,
            } => {
                if mark > self.values.len() {
                    return Err(ParseError::Internal {
                        message: format!(
                            "reduction mark {} above value stack height {}",
                            mark,
                            self.values.len()
                        ),
                    });
                }
                let children = self.values.split_off(mark);
                let value = (production.builder)(children)?;
                self.values.push(value);
                Ok(Step::Reduce {
                    nonterminal,
                    production: production.name,
                })
            }

            Control::Symbol(Symbol::NonTerminal(nonterminal)) => {
                let lookahead = self.peek();
                let production = grammar::lookup(nonterminal, lookahead.kind).ok_or_else(|| {
                    ParseError::NoProduction {
                        nonterminal,
                        found: lookahead.kind,
                        expected: grammar::expected(nonterminal),
                        location: lookahead.location,
                    }
                })?;

                self.control.push(Control::Reduce {
                    nonterminal,
                    production,
                    mark: self.values.len(),
                });
                self.control
                    .extend(production.rhs.iter().rev().map(|&s| Control::Symbol(s)));

                Ok(Step::Expand {
                    nonterminal,
                    lookahead: lookahead.kind,
                    production: production.to_string(),
                })
            }

            Control::Symbol(Symbol::Terminal(expected)) => {
                let token = self.peek();
                if token.kind != expected {
                    return Err(ParseError::UnexpectedToken {
                        found: token.kind,
                        expected,
                        location: token.location,
                    });
                }

                match &token.value {
                    Some(TokenValue::Number(n)) if expected == TokenKind::Number => {
                        self.values.push(StackValue::Number(*n));
                    }
                    Some(TokenValue::Name(name)) if expected == TokenKind::Identifier => {
                        self.values.push(StackValue::Name(name.clone()));
                    }
                    _ if matches!(expected, TokenKind::Number | TokenKind::Identifier) => {
                        return Err(ParseError::Internal {
                            message: format!("{} token without a payload", expected),
                        });
                    }
                    _ => {}
                }
                self.advance();
                Ok(Step::Match { kind: expected })
            }
        }
    }

    /// Check the post-conditions and extract the root.
    fn finish(&mut self) -> Result<Node, ParseError> {
        let end = self.tokens.len() - 1;
        if self.position != end {
            let token = self.peek();
            return Err(ParseError::TrailingInput {
                found: token.kind,
                location: token.location,
            });
        }

        if self.values.len() != 1 {
            return Err(ParseError::Internal {
                message: format!(
                    "value stack holds {} entries after parsing, expected 1",
                    self.values.len()
                ),
            });
        }

        self.record(Step::Accept);
        match self.values.pop() {
            Some(StackValue::Node(node)) => Ok(node),
            other => Err(ParseError::Internal {
                message: format!("parse produced a non-node root: {:?}", other),
            }),
        }
    }

    fn record(&mut self, step: Step) {
        let Some(history) = self.history.as_mut() else {
            return;
        };
        if history.is_truncated() {
            return;
        }
        history.record(Snapshot {
            control: self.control.iter().map(Control::view).collect(),
            values: self.values.iter().map(StackValue::to_string).collect(),
            position: self.position,
            step,
        });
    }

    /// Current lookahead. The END token is never consumed, so the cursor
    /// stays inside the sequence.
    fn peek(&self) -> &'t Token {
        let tokens = self.tokens;
        &tokens[self.position.min(tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::{BinOp, Number};
    use crate::parser::lexer::tokenize;

    fn parse(source: &str) -> Result<Node, ParseError> {
        let tokens = tokenize(source).unwrap();
        Parser::new(&tokens).parse()
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse("42").unwrap(), Node::Number(Number::Int(42)));
    }

    #[test]
    fn test_parse_binary() {
        assert_eq!(
            parse("(+ 2 3)").unwrap(),
            Node::BinaryOp {
                op: BinOp::Add,
                left: Box::new(Node::Number(Number::Int(2))),
                right: Box::new(Node::Number(Number::Int(3))),
            }
        );
    }

    #[test]
    fn test_grouping_collapses() {
        assert_eq!(parse("(x)").unwrap(), parse("x").unwrap());
        assert_eq!(parse("((x))").unwrap(), parse("x").unwrap());
    }

    #[test]
    fn test_unmatched_rparen() {
        let err = parse(")").unwrap_err();
        match err {
            ParseError::NoProduction {
                nonterminal,
                found,
                expected,
                ..
            } => {
                assert_eq!(nonterminal, NonTerminal::Program);
                assert_eq!(found, TokenKind::RParen);
                assert_eq!(
                    expected,
                    vec![TokenKind::Identifier, TokenKind::LParen, TokenKind::Number]
                );
            }
            other => panic!("Expected NoProduction, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_arity() {
        let err = parse("(+ 2 3 4)").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                found: TokenKind::Number,
                expected: TokenKind::RParen,
                location: SourceLocation::new(7, 1, 8),
            }
        );
    }

    #[test]
    fn test_missing_rparen() {
        let err = parse("(+ 2").unwrap_err();
        assert!(matches!(
            err,
            ParseError::NoProduction {
                nonterminal: NonTerminal::Expr,
                found: TokenKind::End,
                ..
            }
        ));
    }

    #[test]
    fn test_trailing_input() {
        let err = parse("1 2").unwrap_err();
        assert_eq!(
            err,
            ParseError::TrailingInput {
                found: TokenKind::Number,
                location: SourceLocation::new(2, 1, 3),
            }
        );
    }

    #[test]
    fn test_missing_end() {
        let mut tokens = tokenize("x").unwrap();
        tokens.pop();
        assert_eq!(Parser::new(&tokens).parse().unwrap_err(), ParseError::MissingEnd);
        assert_eq!(Parser::new(&[]).parse().unwrap_err(), ParseError::MissingEnd);
    }

    #[test]
    fn test_empty_program() {
        let err = parse("").unwrap_err();
        assert_eq!(err.found(), Some(TokenKind::End));
    }

    #[test]
    fn test_error_message_lists_expected() {
        let err = parse("(λ 1 x)").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Syntax error at index 3: unexpected token NUMBER; expected IDENTIFIER"
        );
        let err = parse("(+ 1 )").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Syntax error at index 5: while expanding EXPR, got RPAREN; expected one of {IDENTIFIER, LPAREN, NUMBER}"
        );
    }

    #[test]
    fn test_trace_records_every_step() {
        let tokens = tokenize("(+ 2 3)").unwrap();
        let (result, history) = Parser::new(&tokens).with_trace(1024 * 1024).parse_traced();
        assert!(result.is_ok());

        let first = history.get(0).unwrap();
        assert_eq!(first.step, Step::Start);
        assert_eq!(first.control.len(), 1);
        assert_eq!(first.control[0].text, "PROGRAM");
        assert_eq!(first.control[0].kind, ControlKind::NonTerminal);

        let last = history.last().unwrap();
        assert_eq!(last.step, Step::Accept);
        assert!(last.control.is_empty());
        assert_eq!(last.values, vec!["(+ 2 3)"]);
        assert_eq!(last.position, 5);
    }

    #[test]
    fn test_trace_records_failure() {
        let tokens = tokenize("(+ 2").unwrap();
        let (result, history) = Parser::new(&tokens).with_trace(1024 * 1024).parse_traced();
        assert!(result.is_err());
        assert!(matches!(history.last().unwrap().step, Step::Failed { .. }));
    }

    #[test]
    fn test_untraced_history_is_empty() {
        let tokens = tokenize("x").unwrap();
        let (result, history) = Parser::new(&tokens).parse_traced();
        assert!(result.is_ok());
        assert!(history.is_empty());
    }
}
