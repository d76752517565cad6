//! Headless engine for the simulated terminal: the command interpreter, tab
//! completion over the command table, and the view-routing shell reducer.
//!
//! Rendering hosts own the input line and the display; this crate owns what a
//! submitted line means and how the shell state transitions in response.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod interpreter;
pub mod state;

pub use interpreter::{complete, completions, interpret, unknown_output, CommandSpec, COMMANDS};
pub use state::{reduce_shell, ShellAction, ShellEffect, ShellState};
