//! Controller for the system communications view: a searchable conversation
//! list plus the message thread of the selected conversation.
//!
//! Conversations flow through the shared query engine (search by name, most
//! recent activity first); threads are plain per-conversation data owned by
//! the panel and untouched by queries.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use query_engine::{apply, ConfigError, FieldKind, Query, QueryView, Record, Schema};
use serde::{Deserialize, Serialize};

/// Record fields the conversation list expects on every row.
pub mod fields {
    /// Display name of the counterpart.
    pub const NAME: &str = "name";
    /// Preview of the latest message.
    pub const LAST_MESSAGE: &str = "last_message";
    /// Unread message count.
    pub const UNREAD: &str = "unread";
    /// Instant of the latest activity; drives the list order.
    pub const LAST_ACTIVE: &str = "last_active";
}

/// Delivery state of an outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryStatus {
    /// Accepted by the server.
    Sent,
    /// Reached the recipient.
    Delivered,
    /// Seen by the recipient.
    Read,
}

/// Direction of one message relative to the session user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Sent to the session user.
    Incoming,
    /// Sent by the session user.
    Outgoing,
}

/// One message inside a conversation thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Display name of the author.
    pub sender: String,
    /// Message body.
    pub body: String,
    /// Instant the message was sent.
    pub sent_at: DateTime<Utc>,
    /// Delivery state.
    pub status: DeliveryStatus,
    /// Direction relative to the session user.
    pub direction: Direction,
}

/// Owns the conversation records, their threads, and the list query.
#[derive(Debug, Clone, PartialEq)]
pub struct MessagesPanel {
    conversations: Vec<Record>,
    threads: BTreeMap<String, Vec<ChatMessage>>,
    schema: Schema,
    query: Query,
    view: QueryView,
    selected: Option<String>,
}

impl MessagesPanel {
    /// Builds the controller over host-supplied conversations and threads.
    /// The most recently active conversation is selected initially.
    ///
    /// # Errors
    ///
    /// Fails fast with [`ConfigError`] when a conversation record is missing
    /// an expected field or its activity instant is not a timestamp.
    pub fn new(
        conversations: Vec<Record>,
        threads: BTreeMap<String, Vec<ChatMessage>>,
    ) -> Result<Self, ConfigError> {
        let schema = Schema::new()
            .with(fields::NAME, FieldKind::Text)
            .with(fields::LAST_MESSAGE, FieldKind::Text)
            .with(fields::UNREAD, FieldKind::Numeric)
            .with(fields::LAST_ACTIVE, FieldKind::Timestamp);

        let mut query = Query::sorted_by(fields::LAST_ACTIVE);
        query.search_fields = vec![fields::NAME.to_string()];

        let view = apply(&conversations, &schema, &query)?;
        let selected = view.rows.first().map(|record| record.id.as_str().to_string());
        Ok(Self {
            conversations,
            threads,
            schema,
            query,
            view,
            selected,
        })
    }

    /// Replaces the conversation search text and refreshes the list.
    ///
    /// The selection is kept even when the selected conversation is filtered
    /// out of the visible list.
    pub fn set_search(&mut self, text: impl Into<String>) -> Result<(), ConfigError> {
        self.query.search_text = text.into();
        self.view = apply(&self.conversations, &self.schema, &self.query)?;
        Ok(())
    }

    /// Selects the conversation with id `id`.
    ///
    /// Selecting an id that names no conversation leaves the current
    /// selection unchanged and returns `false`.
    pub fn select(&mut self, id: &str) -> bool {
        let exists = self
            .conversations
            .iter()
            .any(|record| record.id.as_str() == id);
        if exists {
            self.selected = Some(id.to_string());
        }
        exists
    }

    /// Filtered conversation list, most recent activity first.
    pub fn conversations(&self) -> &QueryView {
        &self.view
    }

    /// Currently selected conversation record, if any.
    pub fn selected(&self) -> Option<&Record> {
        let id = self.selected.as_deref()?;
        self.conversations
            .iter()
            .find(|record| record.id.as_str() == id)
    }

    /// Message thread of the selected conversation; empty when nothing is
    /// selected or the conversation has no messages.
    pub fn thread(&self) -> &[ChatMessage] {
        self.selected
            .as_deref()
            .and_then(|id| self.threads.get(id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Current search text.
    pub fn search_text(&self) -> &str {
        &self.query.search_text
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use query_engine::FieldValue;

    use super::*;

    fn minutes_ago(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 15, 0, 0).single().expect("valid date")
            - chrono::Duration::minutes(minutes)
    }

    fn conversation(id: &str, name: &str, unread: f64, last: &str, minutes: i64) -> Record {
        Record::new(id)
            .with(fields::NAME, FieldValue::text(name))
            .with(fields::LAST_MESSAGE, FieldValue::text(last))
            .with(fields::UNREAD, FieldValue::number(unread))
            .with(fields::LAST_ACTIVE, FieldValue::timestamp(minutes_ago(minutes)))
    }

    fn sample() -> Vec<Record> {
        vec![
            conversation("support", "Support Desk", 0.0, "Ticket resolved", 60),
            conversation("admin", "System Admin", 3.0, "Server maintenance scheduled", 2),
            conversation("dev", "Dev Team", 2.0, "New deployment ready", 180),
            conversation("security", "Security Team", 1.0, "Login attempt detected", 15),
        ]
    }

    fn thread_for(id: &str) -> (String, Vec<ChatMessage>) {
        (
            id.to_string(),
            vec![ChatMessage {
                sender: "System Admin".to_string(),
                body: format!("thread for {id}"),
                sent_at: minutes_ago(5),
                status: DeliveryStatus::Read,
                direction: Direction::Incoming,
            }],
        )
    }

    fn panel() -> MessagesPanel {
        let threads = [thread_for("admin"), thread_for("security")]
            .into_iter()
            .collect();
        MessagesPanel::new(sample(), threads).expect("panel")
    }

    fn names(panel: &MessagesPanel) -> Vec<String> {
        panel
            .conversations()
            .rows
            .iter()
            .map(|record| record.field(fields::NAME).expect("name").display_form())
            .collect()
    }

    #[test]
    fn conversations_are_ordered_by_most_recent_activity() {
        let panel = panel();
        assert_eq!(
            names(&panel),
            vec!["System Admin", "Security Team", "Support Desk", "Dev Team"]
        );
    }

    #[test]
    fn most_recent_conversation_is_selected_initially() {
        let panel = panel();
        assert_eq!(panel.selected().expect("selection").id.as_str(), "admin");
        assert_eq!(panel.thread().len(), 1);
    }

    #[test]
    fn search_filters_by_name_case_insensitively() {
        let mut panel = panel();
        panel.set_search("TEAM").expect("search");
        assert_eq!(names(&panel), vec!["Security Team", "Dev Team"]);
        assert_eq!(panel.conversations().total_matched, 2);
    }

    #[test]
    fn search_does_not_disturb_the_selection() {
        let mut panel = panel();
        panel.set_search("support").expect("search");
        assert_eq!(names(&panel), vec!["Support Desk"]);
        assert_eq!(panel.selected().expect("selection").id.as_str(), "admin");
    }

    #[test]
    fn selecting_a_missing_conversation_is_rejected() {
        let mut panel = panel();
        assert!(panel.select("security"));
        assert_eq!(panel.selected().expect("selection").id.as_str(), "security");

        assert!(!panel.select("nobody"));
        assert_eq!(panel.selected().expect("selection").id.as_str(), "security");
    }

    #[test]
    fn conversations_without_threads_read_as_empty() {
        let mut panel = panel();
        panel.select("dev");
        assert!(panel.thread().is_empty());
    }
}
