//! Stock demo datasets for the three panels.
//!
//! All instants are fixed; the data reads as a snapshot taken on
//! 2024-01-15 at 15:00 UTC, so conversation recency and notice ordering are
//! reproducible in tests.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use panel_messages::{ChatMessage, DeliveryStatus, Direction};
use query_engine::{FieldValue, Record};

use crate::SessionData;

/// Bundles all stock datasets for [`crate::TerminalSession::with_fixtures`].
pub fn session_data() -> SessionData {
    SessionData {
        dashboard_rows: dashboard_rows(),
        conversations: conversations(),
        threads: threads(),
        notices: notices(),
    }
}

fn snapshot() -> DateTime<Utc> {
    stamp(2024, 1, 15, 15, 0, 0)
}

fn stamp(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(year, month, day, hour, min, sec).single() {
        Some(at) => at,
        // All fixture instants are valid calendar dates.
        None => DateTime::UNIX_EPOCH,
    }
}

/// The ten stock user rows of the dashboard table, newest signup first.
pub fn dashboard_rows() -> Vec<Record> {
    let rows = [
        (1, "john_doe", "john@example.com", "active", "$1,234", 15),
        (2, "jane_smith", "jane@example.com", "pending", "$2,567", 14),
        (3, "mike_wilson", "mike@example.com", "active", "$899", 13),
        (4, "sarah_jones", "sarah@example.com", "inactive", "$3,456", 12),
        (5, "tom_brown", "tom@example.com", "active", "$1,789", 11),
        (6, "lisa_davis", "lisa@example.com", "pending", "$2,123", 10),
        (7, "kevin_miller", "kevin@example.com", "active", "$4,567", 9),
        (8, "emma_taylor", "emma@example.com", "active", "$1,345", 8),
        (9, "david_clark", "david@example.com", "inactive", "$987", 7),
        (10, "anna_white", "anna@example.com", "active", "$2,890", 6),
    ];
    rows.into_iter()
        .map(|(id, user, email, status, revenue, day)| {
            Record::new(id.to_string())
                .with(panel_dashboard::fields::USER, FieldValue::text(user))
                .with(panel_dashboard::fields::EMAIL, FieldValue::text(email))
                .with(panel_dashboard::fields::STATUS, FieldValue::text(status))
                .with(panel_dashboard::fields::REVENUE, FieldValue::text(revenue))
                .with(
                    panel_dashboard::fields::DATE,
                    FieldValue::timestamp(stamp(2024, 1, day, 0, 0, 0)),
                )
        })
        .collect()
}

/// The four stock conversations; activity instants are offsets from the
/// snapshot so "2 minutes ago" stays 2 minutes ago.
pub fn conversations() -> Vec<Record> {
    let rows = [
        ("admin", "System Admin", 3.0, "Server maintenance scheduled", 2),
        ("security", "Security Team", 1.0, "Login attempt detected", 15),
        ("support", "Support Desk", 0.0, "Ticket resolved", 60),
        ("dev", "Dev Team", 2.0, "New deployment ready", 180),
    ];
    rows.into_iter()
        .map(|(id, name, unread, last, minutes_ago)| {
            Record::new(id)
                .with(panel_messages::fields::NAME, FieldValue::text(name))
                .with(panel_messages::fields::LAST_MESSAGE, FieldValue::text(last))
                .with(panel_messages::fields::UNREAD, FieldValue::number(unread))
                .with(
                    panel_messages::fields::LAST_ACTIVE,
                    FieldValue::timestamp(snapshot() - chrono::Duration::minutes(minutes_ago)),
                )
        })
        .collect()
}

/// The stock message threads; only the admin conversation has history.
pub fn threads() -> BTreeMap<String, Vec<ChatMessage>> {
    let admin = vec![
        message(
            "System Admin",
            "Server maintenance will be performed tonight at 2:00 AM UTC. \
             Expected downtime: 30 minutes.",
            14,
            30,
            DeliveryStatus::Read,
            Direction::Incoming,
        ),
        message(
            "arch_004",
            "Acknowledged. Will monitor systems during maintenance window.",
            14,
            32,
            DeliveryStatus::Delivered,
            Direction::Outgoing,
        ),
        message(
            "System Admin",
            "Database backup completed successfully. All systems nominal.",
            14,
            45,
            DeliveryStatus::Delivered,
            Direction::Incoming,
        ),
        message(
            "System Admin",
            "Please review the new security protocols document in the important section.",
            14,
            58,
            DeliveryStatus::Sent,
            Direction::Incoming,
        ),
    ];
    BTreeMap::from([("admin".to_string(), admin)])
}

fn message(
    sender: &str,
    body: &str,
    hour: u32,
    min: u32,
    status: DeliveryStatus,
    direction: Direction,
) -> ChatMessage {
    ChatMessage {
        sender: sender.to_string(),
        body: body.to_string(),
        sent_at: stamp(2024, 1, 15, hour, min, 0),
        status,
        direction,
    }
}

/// The six stock notices.
pub fn notices() -> Vec<Record> {
    vec![
        notice(
            "1",
            "Security Protocol Update",
            "New authentication requirements have been implemented. All users \
             must update their passwords and enable 2FA within 48 hours.",
            "security",
            "high",
            "active",
            stamp(2024, 1, 15, 14, 30, 0),
            Some(stamp(2024, 1, 17, 23, 59, 59)),
        ),
        notice(
            "2",
            "Scheduled Maintenance Window",
            "Database optimization and server updates will be performed \
             tonight. Expected downtime: 30 minutes starting at 2:00 AM UTC.",
            "maintenance",
            "high",
            "pending",
            stamp(2024, 1, 15, 10, 15, 0),
            Some(stamp(2024, 1, 16, 2, 0, 0)),
        ),
        notice(
            "3",
            "System Performance Alert",
            "CPU usage has been consistently above 85% for the past hour. \
             Monitoring team is investigating potential causes.",
            "alert",
            "medium",
            "active",
            stamp(2024, 1, 15, 13, 45, 0),
            None,
        ),
        notice(
            "4",
            "Privacy Policy Update",
            "Updated privacy policy has been published. Please review changes \
             in data handling procedures and user consent requirements.",
            "policy",
            "medium",
            "active",
            stamp(2024, 1, 14, 9, 0, 0),
            None,
        ),
        notice(
            "5",
            "Critical Security Patch",
            "Security vulnerability patched in authentication module. All \
             services have been updated and are running the latest version.",
            "security",
            "high",
            "resolved",
            stamp(2024, 1, 13, 16, 20, 0),
            None,
        ),
        notice(
            "6",
            "Backup System Verification",
            "Weekly backup integrity check completed successfully. All backup \
             files verified and accessible.",
            "maintenance",
            "low",
            "resolved",
            stamp(2024, 1, 13, 3, 0, 0),
            None,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn notice(
    id: &str,
    title: &str,
    description: &str,
    kind: &str,
    priority: &str,
    status: &str,
    timestamp: DateTime<Utc>,
    due_date: Option<DateTime<Utc>>,
) -> Record {
    let mut record = Record::new(id)
        .with(panel_important::fields::TITLE, FieldValue::text(title))
        .with(
            panel_important::fields::DESCRIPTION,
            FieldValue::text(description),
        )
        .with(panel_important::fields::KIND, FieldValue::text(kind))
        .with(panel_important::fields::PRIORITY, FieldValue::text(priority))
        .with(panel_important::fields::STATUS, FieldValue::text(status))
        .with(
            panel_important::fields::TIMESTAMP,
            FieldValue::timestamp(timestamp),
        );
    if let Some(due) = due_date {
        record = record.with(panel_important::fields::DUE_DATE, FieldValue::timestamp(due));
    }
    record
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn stock_datasets_construct_a_session() {
        let session = crate::TerminalSession::with_fixtures().expect("fixtures are well formed");
        assert_eq!(session.dashboard().view().total_matched, 10);
        assert_eq!(session.messages().conversations().total_matched, 4);
        assert_eq!(session.important().view().total_matched, 6);
    }

    #[test]
    fn only_deadline_bearing_notices_carry_due_dates() {
        let with_due: Vec<String> = notices()
            .iter()
            .filter(|record| record.field(panel_important::fields::DUE_DATE).is_some())
            .map(|record| record.id.as_str().to_string())
            .collect();
        assert_eq!(with_due, vec!["1", "2"]);
    }
}
