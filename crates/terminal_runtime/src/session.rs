use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use panel_dashboard::DashboardPanel;
use panel_important::ImportantPanel;
use panel_messages::{ChatMessage, MessagesPanel};
use query_engine::{ConfigError, Record};
use terminal_contract::{ActiveView, PanelId, TranscriptEntry};
use terminal_shell::{complete, reduce_shell, ShellAction, ShellEffect, ShellState};

use crate::fixtures;

/// Datasets a host injects when opening a session.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    /// User rows backing the dashboard table.
    pub dashboard_rows: Vec<Record>,
    /// Conversation list rows.
    pub conversations: Vec<Record>,
    /// Message threads keyed by conversation id.
    pub threads: BTreeMap<String, Vec<ChatMessage>>,
    /// Notice rows backing the important panel.
    pub notices: Vec<Record>,
}

/// One live terminal session: the shell plus its three data panels.
///
/// The session is the single mutation entry point. Hosts submit input lines
/// and panel return events here, execute the returned [`ShellEffect`]s, and
/// render from the accessors. Panel interactions (search, filters, paging,
/// selection) go through the `*_mut` accessors while that panel is active.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalSession {
    shell: ShellState,
    dashboard: DashboardPanel,
    messages: MessagesPanel,
    important: ImportantPanel,
}

impl TerminalSession {
    /// Opens a session over host-supplied datasets.
    ///
    /// # Errors
    ///
    /// Fails fast with [`ConfigError`] when any dataset row is missing a
    /// field its panel expects or a field does not match its declared kind.
    pub fn new(data: SessionData) -> Result<Self, ConfigError> {
        Ok(Self {
            shell: ShellState::default(),
            dashboard: DashboardPanel::new(data.dashboard_rows)?,
            messages: MessagesPanel::new(data.conversations, data.threads)?,
            important: ImportantPanel::new(data.notices)?,
        })
    }

    /// Opens a session over the stock demo datasets.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError`] only if the stock datasets are malformed,
    /// which the fixture tests rule out.
    pub fn with_fixtures() -> Result<Self, ConfigError> {
        Self::new(fixtures::session_data())
    }

    /// Submits one input line at the prompt.
    pub fn submit(&mut self, line: &str, at: DateTime<Utc>) -> Vec<ShellEffect> {
        reduce_shell(
            &mut self.shell,
            ShellAction::Submit {
                line: line.to_string(),
                at,
            },
        )
    }

    /// Routes a panel's "back to terminal" signal into the shell.
    pub fn return_from_panel(&mut self, panel: PanelId, at: DateTime<Utc>) -> Vec<ShellEffect> {
        reduce_shell(&mut self.shell, ShellAction::ReturnFromPanel { panel, at })
    }

    /// Resolves a tab-completion request for the current input line.
    pub fn complete(&self, input: &str) -> Option<&'static str> {
        complete(input)
    }

    /// Shell transcript, oldest entry first.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.shell.transcript
    }

    /// View the host should render.
    pub fn active_view(&self) -> ActiveView {
        self.shell.active_view
    }

    /// False once the session has terminated.
    pub fn is_visible(&self) -> bool {
        self.shell.visible
    }

    /// Dashboard panel state.
    pub fn dashboard(&self) -> &DashboardPanel {
        &self.dashboard
    }

    /// Mutable dashboard panel, for search/filter/sort/paging edits.
    pub fn dashboard_mut(&mut self) -> &mut DashboardPanel {
        &mut self.dashboard
    }

    /// Messages panel state.
    pub fn messages(&self) -> &MessagesPanel {
        &self.messages
    }

    /// Mutable messages panel, for search and selection edits.
    pub fn messages_mut(&mut self) -> &mut MessagesPanel {
        &mut self.messages
    }

    /// Important panel state.
    pub fn important(&self) -> &ImportantPanel {
        &self.important
    }

    /// Mutable important panel, for search and filter edits.
    pub fn important_mut(&mut self) -> &mut ImportantPanel {
        &mut self.important
    }
}
