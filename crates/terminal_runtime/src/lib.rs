//! Host-facing runtime for the simulated terminal.
//!
//! [`TerminalSession`] bundles the shell engine and the three data panels
//! behind one facade: hosts feed it input lines and panel events, then render
//! from its state. [`fixtures`] supplies the stock demo datasets.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod fixtures;
mod session;

pub use session::{SessionData, TerminalSession};
