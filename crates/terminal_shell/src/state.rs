//! Shell state and the view-routing reducer.
//!
//! [`reduce_shell`] is the authoritative transition engine: it owns the
//! transcript and the active view, consumes interpreter outcomes, and emits
//! side-effect intents for the host to execute. Every transition runs to
//! completion; there is no intermediate state a host can observe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use terminal_contract::{ActiveView, CommandResult, PanelId, TranscriptEntry};

use crate::interpreter::{interpret, unknown_output};

/// Complete state of one simulated terminal session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellState {
    /// Append-only command/output log shown inside the shell view.
    pub transcript: Vec<TranscriptEntry>,
    /// View the host should render.
    pub active_view: ActiveView,
    /// False once the session has terminated. Terminal state: no action can
    /// make the session visible again; a fresh [`ShellState`] is required.
    pub visible: bool,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            transcript: Vec::new(),
            active_view: ActiveView::Shell,
            visible: true,
        }
    }
}

/// Actions accepted by [`reduce_shell`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShellAction {
    /// The user submitted one input line at the prompt.
    Submit {
        /// Raw input line.
        line: String,
        /// Submission instant, stamped onto any resulting transcript entry.
        at: DateTime<Utc>,
    },
    /// A panel signalled its "back to terminal" affordance.
    ///
    /// This transition never consults the interpreter; it records a synthetic
    /// transcript entry instead.
    ReturnFromPanel {
        /// Panel being left.
        panel: PanelId,
        /// Instant of the return.
        at: DateTime<Utc>,
    },
}

/// Side-effect intents emitted by [`reduce_shell`] for the host to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEffect {
    /// Move input focus into the newly active panel.
    FocusPanel(PanelId),
    /// Move input focus back to the shell prompt.
    FocusPrompt,
    /// Tear down the terminal view; the session is over.
    CloseTerminal,
}

/// Applies one [`ShellAction`] to the session state.
///
/// Blank submissions and any action arriving after termination are strict
/// no-ops: the state is left untouched and no effects are emitted.
pub fn reduce_shell(state: &mut ShellState, action: ShellAction) -> Vec<ShellEffect> {
    if !state.visible {
        return Vec::new();
    }
    match action {
        ShellAction::Submit { line, at } => submit(state, &line, at),
        ShellAction::ReturnFromPanel { panel, at } => return_from_panel(state, panel, at),
    }
}

fn submit(state: &mut ShellState, line: &str, at: DateTime<Utc>) -> Vec<ShellEffect> {
    let command = line.trim();
    if command.is_empty() {
        return Vec::new();
    }

    match interpret(command, at) {
        CommandResult::ClearTranscript => {
            // Wipe first; nothing may be appended afterwards in this
            // transition, so the cleared transcript stays empty.
            state.transcript.clear();
            Vec::new()
        }
        CommandResult::Navigate { panel } => {
            append(state, command, panel.loading_message(), at);
            state.active_view = ActiveView::Panel { panel };
            vec![ShellEffect::FocusPanel(panel)]
        }
        CommandResult::Terminate => {
            append(state, command, "Goodbye!".to_string(), at);
            state.visible = false;
            vec![ShellEffect::CloseTerminal]
        }
        CommandResult::Text { output } => {
            append(state, command, output, at);
            Vec::new()
        }
        CommandResult::Unknown { input } => {
            append(state, command, unknown_output(&input), at);
            Vec::new()
        }
    }
}

fn return_from_panel(state: &mut ShellState, panel: PanelId, at: DateTime<Utc>) -> Vec<ShellEffect> {
    // One return transition per panel exit: ignore a return signal from a
    // panel that is not the active view.
    if state.active_view != (ActiveView::Panel { panel }) {
        return Vec::new();
    }
    state.active_view = ActiveView::Shell;
    append(
        state,
        &format!("exit {}", panel.name()),
        "Returned to terminal".to_string(),
        at,
    );
    vec![ShellEffect::FocusPrompt]
}

fn append(state: &mut ShellState, command: &str, output: String, at: DateTime<Utc>) {
    state.transcript.push(TranscriptEntry {
        command: command.to_string(),
        output,
        timestamp: at,
    });
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).single().expect("valid date")
    }

    fn submit(state: &mut ShellState, line: &str) -> Vec<ShellEffect> {
        reduce_shell(
            state,
            ShellAction::Submit {
                line: line.to_string(),
                at: at(),
            },
        )
    }

    #[test]
    fn blank_submission_is_a_strict_no_op() {
        let mut state = ShellState::default();
        submit(&mut state, "whoami");
        let before = state.clone();

        let effects = submit(&mut state, "   \t  ");

        assert_eq!(state, before);
        assert!(effects.is_empty());
    }

    #[test]
    fn text_commands_append_one_entry_and_keep_the_shell_view() {
        let mut state = ShellState::default();
        submit(&mut state, "whoami");

        assert_eq!(state.active_view, ActiveView::Shell);
        assert!(state.visible);
        assert_eq!(state.transcript.len(), 1);
        assert_eq!(state.transcript[0].command, "whoami");
        assert_eq!(state.transcript[0].output, "arch_004@admybrand.com");
        assert_eq!(state.transcript[0].timestamp, at());
    }

    #[test]
    fn clear_empties_the_transcript_without_appending() {
        let mut state = ShellState::default();
        submit(&mut state, "whoami");
        submit(&mut state, "pwd");
        submit(&mut state, "nonsense");
        assert_eq!(state.transcript.len(), 3);

        submit(&mut state, "clear");

        assert_eq!(state.transcript.len(), 0);
        assert_eq!(state.active_view, ActiveView::Shell);
        assert!(state.visible);
    }

    #[test]
    fn navigation_switches_the_view_and_records_a_loading_entry() {
        let mut state = ShellState::default();
        let effects = submit(&mut state, "CD DASHBOARD");

        assert_eq!(
            state.active_view,
            ActiveView::Panel {
                panel: PanelId::Dashboard
            }
        );
        assert_eq!(state.transcript.len(), 1);
        assert_eq!(state.transcript[0].command, "CD DASHBOARD");
        assert!(state.transcript[0].output.contains("Loading dashboard..."));
        assert_eq!(effects, vec![ShellEffect::FocusPanel(PanelId::Dashboard)]);
    }

    #[test]
    fn unknown_input_renders_the_command_not_found_message() {
        let mut state = ShellState::default();
        submit(&mut state, "foo");

        assert_eq!(
            state.transcript[0].output,
            "Command not found: foo. Type 'help' for available commands."
        );
        assert_eq!(state.active_view, ActiveView::Shell);
    }

    #[test]
    fn terminate_hides_the_session_and_is_absorbing() {
        let mut state = ShellState::default();
        let effects = submit(&mut state, "exit");

        assert!(!state.visible);
        assert_eq!(state.transcript.last().expect("entry").output, "Goodbye!");
        assert_eq!(effects, vec![ShellEffect::CloseTerminal]);

        // No action can resurrect the session.
        let after_exit = state.clone();
        assert!(submit(&mut state, "help").is_empty());
        assert!(reduce_shell(
            &mut state,
            ShellAction::ReturnFromPanel {
                panel: PanelId::Dashboard,
                at: at(),
            },
        )
        .is_empty());
        assert_eq!(state, after_exit);
    }

    #[test]
    fn return_from_panel_appends_one_synthetic_entry() {
        let mut state = ShellState::default();
        submit(&mut state, "cd msg");
        assert_eq!(
            state.active_view,
            ActiveView::Panel {
                panel: PanelId::Messages
            }
        );

        let effects = reduce_shell(
            &mut state,
            ShellAction::ReturnFromPanel {
                panel: PanelId::Messages,
                at: at(),
            },
        );

        assert_eq!(state.active_view, ActiveView::Shell);
        let entry = state.transcript.last().expect("entry");
        assert_eq!(entry.command, "exit messages");
        assert_eq!(entry.output, "Returned to terminal");
        assert_eq!(effects, vec![ShellEffect::FocusPrompt]);

        // A stray second return signal must not append a duplicate entry.
        let before = state.clone();
        let effects = reduce_shell(
            &mut state,
            ShellAction::ReturnFromPanel {
                panel: PanelId::Messages,
                at: at(),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn transcript_history_survives_panel_round_trips() {
        let mut state = ShellState::default();
        submit(&mut state, "whoami");
        submit(&mut state, "cd important");
        reduce_shell(
            &mut state,
            ShellAction::ReturnFromPanel {
                panel: PanelId::Important,
                at: at(),
            },
        );

        let commands: Vec<&str> = state
            .transcript
            .iter()
            .map(|entry| entry.command.as_str())
            .collect();
        assert_eq!(commands, vec!["whoami", "cd important", "exit important"]);
    }
}
