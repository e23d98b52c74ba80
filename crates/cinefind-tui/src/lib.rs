//! Terminal UI components for cinefind.
//!
//! Uses `ratatui` + `crossterm` for rendering. The shell owns all state;
//! the search input and result card are pure rendering units over it.

/// Result card rendering.
pub mod card;
/// Search input line.
pub mod search_input;
/// Application shell (state, debounce, fetch, event loop).
pub mod shell;

pub use shell::{ShellOptions, run_shell};
