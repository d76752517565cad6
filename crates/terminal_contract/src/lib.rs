//! Shared contracts between the simulated terminal shell, the data panels, and
//! rendering hosts.
//!
//! This crate is intentionally host-agnostic. It defines the panel vocabulary,
//! interpreter outcomes, and transcript payloads without depending on any
//! rendering layer or on the shell engine itself.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the mutually exclusive data-display panels reachable from the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelId {
    /// Admin analytics dashboard with the paginated user table.
    Dashboard,
    /// System communications view (conversations and threads).
    Messages,
    /// Critical notifications and alerts view.
    Important,
}

impl PanelId {
    /// Stable lowercase name used in transcript entries and loading messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Messages => "messages",
            Self::Important => "important",
        }
    }

    /// Human-readable message recorded when the shell navigates to this panel.
    pub fn loading_message(self) -> String {
        format!("Loading {}...", self.name())
    }
}

/// Which view the host should currently render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ActiveView {
    /// The interactive shell prompt.
    Shell,
    /// One of the data panels.
    Panel {
        /// Panel currently occupying the view.
        panel: PanelId,
    },
}

impl Default for ActiveView {
    fn default() -> Self {
        Self::Shell
    }
}

/// Outcome of interpreting one submitted command line.
///
/// Exactly one variant is produced per processed input; there is no failure
/// mode, only the [`CommandResult::Unknown`] classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CommandResult {
    /// Emit fixed text into the transcript.
    Text {
        /// Output text for the transcript entry.
        output: String,
    },
    /// Wipe the transcript without appending an entry.
    ClearTranscript,
    /// Switch the active view to a panel.
    Navigate {
        /// Destination panel.
        panel: PanelId,
    },
    /// Hide the terminal permanently for this session.
    Terminate,
    /// The input matched no recognized command.
    Unknown {
        /// Trimmed original input, preserved for the error message.
        input: String,
    },
}

/// One command/output pair in the shell transcript.
///
/// Entries are append-only; they are never edited or removed except by a full
/// transcript clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Command text as submitted (trimmed).
    pub command: String,
    /// Output text rendered beneath the command.
    pub output: String,
    /// Instant the entry was recorded, supplied by the host.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn panel_names_are_stable() {
        assert_eq!(PanelId::Dashboard.name(), "dashboard");
        assert_eq!(PanelId::Messages.name(), "messages");
        assert_eq!(PanelId::Important.name(), "important");
    }

    #[test]
    fn loading_message_uses_panel_name() {
        assert_eq!(PanelId::Dashboard.loading_message(), "Loading dashboard...");
        assert_eq!(PanelId::Important.loading_message(), "Loading important...");
    }

    #[test]
    fn command_result_round_trips_as_tagged_json() {
        let result = CommandResult::Navigate {
            panel: PanelId::Messages,
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["kind"], "navigate");
        assert_eq!(json["panel"], "messages");
        let back: CommandResult = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, result);
    }
}
