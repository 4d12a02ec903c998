// Snapshot management for stepping through a parse

use crate::parser::grammar::NonTerminal;
use crate::parser::lexer::TokenKind;
use std::fmt;

/// What the stack machine did to reach a snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Start,
    Expand {
        nonterminal: NonTerminal,
        lookahead: TokenKind,
        production: String,
    },
    Match {
        kind: TokenKind,
    },
    Reduce {
        nonterminal: NonTerminal,
        production: &'static str,
    },
    Accept,
    Failed {
        message: String,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Start => write!(f, "start: push PROGRAM"),
            Step::Expand {
                nonterminal,
                lookahead,
                production,
            } => write!(f, "expand {} on {}: {}", nonterminal, lookahead, production),
            Step::Match { kind } => write!(f, "match {}", kind),
            Step::Reduce {
                nonterminal,
                production,
            } => write!(f, "reduce {} ({})", nonterminal, production),
            Step::Accept => write!(f, "accept"),
            Step::Failed { message } => write!(f, "error: {}", message),
        }
    }
}

/// Category of a rendered control stack entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Terminal,
    NonTerminal,
    Reduce,
}

/// A control stack entry, rendered for display
#[derive(Debug, Clone, PartialEq)]
pub struct ControlEntry {
    pub text: String,
    pub kind: ControlKind,
}

/// Snapshot of parser state, rendered for display
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub control: Vec<ControlEntry>, // bottom first
    pub values: Vec<String>,        // bottom first
    pub position: usize,            // index of the lookahead token
    pub step: Step,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        let control: usize = self
            .control
            .iter()
            .map(|e| e.text.len() + std::mem::size_of::<ControlEntry>())
            .sum();
        let values: usize = self
            .values
            .iter()
            .map(|s| s.len() + std::mem::size_of::<String>())
            .sum();
        std::mem::size_of::<Snapshot>() + control + values
    }
}

/// Manages the recorded parse history
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
    truncated: bool,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
            truncated: false,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Record a snapshot, silently stopping once the memory budget runs out.
    pub fn record(&mut self, snapshot: Snapshot) {
        if self.truncated {
            return;
        }
        if self.push(snapshot).is_err() {
            self.truncated = true;
        }
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// True once a snapshot was dropped for lack of memory
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(values: &[&str]) -> Snapshot {
        Snapshot {
            control: vec![ControlEntry {
                text: "PROGRAM".to_string(),
                kind: ControlKind::NonTerminal,
            }],
            values: values.iter().map(|s| s.to_string()).collect(),
            position: 0,
            step: Step::Start,
        }
    }

    #[test]
    fn test_push_within_limit() {
        let mut manager = SnapshotManager::new(1024 * 1024);
        manager.push(snapshot(&["1"])).unwrap();
        manager.push(snapshot(&["1", "2"])).unwrap();
        assert_eq!(manager.len(), 2);
        assert!(manager.memory_usage() > 0);
        assert!(!manager.is_truncated());
    }

    #[test]
    fn test_record_truncates_at_limit() {
        let one = snapshot(&["x"]).estimated_size();
        let mut manager = SnapshotManager::new(one * 2);
        for _ in 0..5 {
            manager.record(snapshot(&["x"]));
        }
        assert_eq!(manager.len(), 2);
        assert!(manager.is_truncated());
        assert!(manager.memory_usage() <= manager.memory_limit());
    }

    #[test]
    fn test_step_display() {
        let step = Step::Reduce {
            nonterminal: NonTerminal::ParenBody,
            production: "plus",
        };
        assert_eq!(step.to_string(), "reduce PAREN-BODY (plus)");
    }
}
