//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source text with the lookahead token (or lexical error) highlighted
//! - [`tokens`]: The token stream with the parser cursor
//! - [`stack`]: Control stack and value stack of the current snapshot
//! - [`result`]: The current step and, at the end, the AST or the error
//! - [`status`]: Status bar with keybindings and position in the history
//! - `utils`: Shared block, scrolling and color helpers
//!
//! Each pane module exports a `render_*` function that draws from borrowed
//! data plus a mutable scroll offset owned by the app.

mod utils;

pub mod result;
pub mod source;
pub mod stack;
pub mod status;
pub mod tokens;

// Re-export render functions for convenience
pub use result::{render_result_pane, ResultRenderData};
pub use source::{render_source_pane, SourceHighlight};
pub use stack::{render_control_pane, render_value_pane};
pub use status::{render_status_bar, StatusRenderData};
pub use tokens::render_tokens_pane;
