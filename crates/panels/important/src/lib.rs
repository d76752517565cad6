//! Controller for the critical notifications view: searchable, filterable by
//! notice type and priority, highest priority first.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use query_engine::{apply, ConfigError, FieldKind, Filter, Query, QueryView, Record, Schema};
use serde::{Deserialize, Serialize};

/// Record fields every notice carries.
pub mod fields {
    /// Short headline.
    pub const TITLE: &str = "title";
    /// Full notice text.
    pub const DESCRIPTION: &str = "description";
    /// Notice category (`security`, `maintenance`, `update`, `alert`,
    /// `policy`).
    pub const KIND: &str = "type";
    /// Priority level (`low`, `medium`, `high`).
    pub const PRIORITY: &str = "priority";
    /// Lifecycle state (`active`, `pending`, `resolved`).
    pub const STATUS: &str = "status";
    /// Instant the notice was raised.
    pub const TIMESTAMP: &str = "timestamp";
    /// Optional deadline; not referenced by queries.
    pub const DUE_DATE: &str = "due_date";
}

/// Notice-type filter choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeFilter {
    /// Accept every type.
    #[default]
    All,
    /// Security notices.
    Security,
    /// Maintenance windows.
    Maintenance,
    /// Product updates.
    Update,
    /// Operational alerts.
    Alert,
    /// Policy changes.
    Policy,
}

impl TypeFilter {
    fn as_filter(self) -> Filter {
        let value = match self {
            Self::All => return Filter::Any,
            Self::Security => "security",
            Self::Maintenance => "maintenance",
            Self::Update => "update",
            Self::Alert => "alert",
            Self::Policy => "policy",
        };
        Filter::Equals {
            value: value.to_string(),
        }
    }
}

/// Priority filter choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriorityFilter {
    /// Accept every priority.
    #[default]
    All,
    /// High priority only.
    High,
    /// Medium priority only.
    Medium,
    /// Low priority only.
    Low,
}

impl PriorityFilter {
    fn as_filter(self) -> Filter {
        let value = match self {
            Self::All => return Filter::Any,
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        Filter::Equals {
            value: value.to_string(),
        }
    }
}

/// Owns the notice records and the query driving the visible list.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportantPanel {
    records: Vec<Record>,
    schema: Schema,
    type_filter: TypeFilter,
    priority_filter: PriorityFilter,
    query: Query,
    view: QueryView,
}

impl ImportantPanel {
    /// Builds the controller over host-supplied notices, in any order.
    ///
    /// Notices sort highest priority first and newest first within a
    /// priority.
    ///
    /// # Errors
    ///
    /// Fails fast with [`ConfigError`] when a notice is missing an expected
    /// field or carries a priority outside `low`/`medium`/`high`.
    pub fn new(records: Vec<Record>) -> Result<Self, ConfigError> {
        let schema = Schema::new()
            .with(fields::TITLE, FieldKind::Text)
            .with(fields::DESCRIPTION, FieldKind::Text)
            .with(fields::KIND, FieldKind::Text)
            .with(
                fields::PRIORITY,
                FieldKind::Rank {
                    order: vec!["low".to_string(), "medium".to_string(), "high".to_string()],
                },
            )
            .with(fields::STATUS, FieldKind::Text)
            .with(fields::TIMESTAMP, FieldKind::Timestamp);

        // Store the notices newest-first; the rank sort is stable, so every
        // later view reads priority-then-recency.
        let records = apply(&records, &schema, &Query::sorted_by(fields::TIMESTAMP))?.rows;

        let mut query = Query::sorted_by(fields::PRIORITY);
        query.search_fields = vec![fields::TITLE.to_string(), fields::DESCRIPTION.to_string()];
        query.filters.insert(fields::KIND.to_string(), Filter::Any);
        query
            .filters
            .insert(fields::PRIORITY.to_string(), Filter::Any);

        let view = apply(&records, &schema, &query)?;
        Ok(Self {
            records,
            schema,
            type_filter: TypeFilter::All,
            priority_filter: PriorityFilter::All,
            query,
            view,
        })
    }

    /// Replaces the search text and refreshes the list.
    pub fn set_search(&mut self, text: impl Into<String>) -> Result<(), ConfigError> {
        self.query.search_text = text.into();
        self.refresh()
    }

    /// Replaces the type filter and refreshes the list.
    pub fn set_type_filter(&mut self, filter: TypeFilter) -> Result<(), ConfigError> {
        self.type_filter = filter;
        self.query
            .filters
            .insert(fields::KIND.to_string(), filter.as_filter());
        self.refresh()
    }

    /// Replaces the priority filter and refreshes the list.
    pub fn set_priority_filter(&mut self, filter: PriorityFilter) -> Result<(), ConfigError> {
        self.priority_filter = filter;
        self.query
            .filters
            .insert(fields::PRIORITY.to_string(), filter.as_filter());
        self.refresh()
    }

    /// Filtered notice list, highest priority first.
    pub fn view(&self) -> &QueryView {
        &self.view
    }

    /// Current search text.
    pub fn search_text(&self) -> &str {
        &self.query.search_text
    }

    /// Current type filter.
    pub fn type_filter(&self) -> TypeFilter {
        self.type_filter
    }

    /// Current priority filter.
    pub fn priority_filter(&self) -> PriorityFilter {
        self.priority_filter
    }

    fn refresh(&mut self) -> Result<(), ConfigError> {
        self.view = apply(&self.records, &self.schema, &self.query)?;
        Ok(())
    }
}
