//! # Introduction
//!
//! Tabula lexes and parses a small, fully parenthesized lambda language with
//! an explicit LL(1) stack machine, capturing a snapshot of both stacks after
//! every step. The snapshot history is then navigated forward and backward
//! through a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Stack machine → AST
//!                                 ↓
//!                             Snapshots → TUI
//! ```
//!
//! 1. [`parser`]: character classes, tokenizer, grammar table, reduction
//!    builders and the two-stack parser; [`parser::parse_source`] is the
//!    one-call entry point.
//! 2. [`snapshot`]: rendered stack states with a memory-bounded history.
//! 3. [`session`]: a traced parse plus a cursor over its history.
//! 4. [`samples`]: the built-in sample programs and their harness.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Language
//!
//! Numbers (`0`, `42`, `0.25`), identifiers, and the forms `(+ a b)`,
//! `(− a b)`, `(× a b)`, `(= a b)`, `(? c t f)`, `(λ x body)`,
//! `(≜ name value body)` and application `(f a1 … ak)`.

pub mod constants;
pub mod parser;
pub mod samples;
pub mod session;
pub mod snapshot;
pub mod ui;
