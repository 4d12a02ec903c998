//! Recorded parse session
//!
//! A [`ParseSession`] runs the full pipeline once with tracing enabled and then
//! lets a viewer move back and forth through the recorded machine states. The
//! history is fixed after construction; navigation only moves a cursor over it.

use crate::parser::ast::Node;
use crate::parser::lexer::{tokenize, Token};
use crate::parser::parser::Parser;
use crate::parser::Error;
use crate::snapshot::{Snapshot, SnapshotManager};
use std::fmt;

/// Why a navigation request could not move the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    AtStart,
    AtEnd,
    NoHistory,
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::AtStart => write!(f, "Already at the first step"),
            NavigationError::AtEnd => write!(f, "No more steps (parse finished)"),
            NavigationError::NoHistory => write!(f, "No steps recorded"),
        }
    }
}

impl std::error::Error for NavigationError {}

pub struct ParseSession {
    source: String,
    tokens: Vec<Token>,
    history: SnapshotManager,
    outcome: Result<Node, Error>,
    history_position: usize,
}

impl ParseSession {
    /// Lex and parse `source`, recording every stack-machine step.
    ///
    /// A lexical error leaves the session with no tokens and no steps.
    pub fn trace(source: &str, memory_limit: usize) -> Self {
        let (tokens, history, outcome) = match tokenize(source) {
            Ok(tokens) => {
                let (result, history) = Parser::new(&tokens)
                    .with_trace(memory_limit)
                    .parse_traced();
                (tokens, history, result.map_err(Error::from))
            }
            Err(e) => (Vec::new(), SnapshotManager::new(memory_limit), Err(Error::Lex(e))),
        };

        ParseSession {
            source: source.to_string(),
            tokens,
            history,
            outcome,
            history_position: 0,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn outcome(&self) -> &Result<Node, Error> {
        &self.outcome
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> Option<&Snapshot> {
        self.history.get(self.history_position)
    }

    /// Lookahead token of the current snapshot
    pub fn current_token(&self) -> Option<&Token> {
        self.current().and_then(|s| self.tokens.get(s.position))
    }

    pub fn history_position(&self) -> usize {
        self.history_position
    }

    pub fn total_snapshots(&self) -> usize {
        self.history.len()
    }

    /// True when the recorded history stops short of the end of the parse
    pub fn is_truncated(&self) -> bool {
        self.history.is_truncated()
    }

    pub fn is_at_end(&self) -> bool {
        self.history_position + 1 >= self.history.len()
    }

    pub fn step_forward(&mut self) -> Result<(), NavigationError> {
        if self.history.is_empty() {
            return Err(NavigationError::NoHistory);
        }
        if self.is_at_end() {
            return Err(NavigationError::AtEnd);
        }
        self.history_position += 1;
        Ok(())
    }

    pub fn step_backward(&mut self) -> Result<(), NavigationError> {
        if self.history.is_empty() {
            return Err(NavigationError::NoHistory);
        }
        if self.history_position == 0 {
            return Err(NavigationError::AtStart);
        }
        self.history_position -= 1;
        Ok(())
    }

    pub fn rewind_to_start(&mut self) -> Result<(), NavigationError> {
        if self.history.is_empty() {
            return Err(NavigationError::NoHistory);
        }
        self.history_position = 0;
        Ok(())
    }

    pub fn jump_to_end(&mut self) -> Result<(), NavigationError> {
        if self.history.is_empty() {
            return Err(NavigationError::NoHistory);
        }
        self.history_position = self.history.len() - 1;
        Ok(())
    }
}
