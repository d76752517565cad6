//! Controller for the admin analytics dashboard's paginated user table.
//!
//! The controller owns its records and query parameters; every edit re-runs
//! the query engine and caches the resulting page. Page clamping lives here,
//! not in the engine: the requested page is folded back into
//! `[1, total_pages]` whenever search or filter edits shrink the match set.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use query_engine::{apply, ConfigError, FieldKind, Filter, Query, QueryView, Record, Schema};
use serde::{Deserialize, Serialize};

/// Fixed page size of the user table.
pub const ITEMS_PER_PAGE: usize = 8;

/// Record fields the dashboard expects on every row.
pub mod fields {
    /// Account name column.
    pub const USER: &str = "user";
    /// Contact address column.
    pub const EMAIL: &str = "email";
    /// Account status column.
    pub const STATUS: &str = "status";
    /// Revenue column, currency-as-text.
    pub const REVENUE: &str = "revenue";
    /// Signup/activity date column.
    pub const DATE: &str = "date";
}

/// Categorical status filter choices offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    /// Accept every status.
    #[default]
    All,
    /// Only `active` rows.
    Active,
    /// Only `pending` rows.
    Pending,
    /// Only `inactive` rows.
    Inactive,
}

impl StatusFilter {
    fn as_filter(self) -> Filter {
        match self {
            Self::All => Filter::Any,
            Self::Active => Filter::Equals {
                value: "active".to_string(),
            },
            Self::Pending => Filter::Equals {
                value: "pending".to_string(),
            },
            Self::Inactive => Filter::Equals {
                value: "inactive".to_string(),
            },
        }
    }
}

/// Sortable columns of the user table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortField {
    /// Most recent first.
    #[default]
    Date,
    /// Largest amount first.
    Revenue,
    /// Alphabetical by account name.
    User,
}

impl SortField {
    fn field_name(self) -> &'static str {
        match self {
            Self::Date => fields::DATE,
            Self::Revenue => fields::REVENUE,
            Self::User => fields::USER,
        }
    }
}

/// Owns the user records and the query driving the visible table page.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardPanel {
    records: Vec<Record>,
    schema: Schema,
    status_filter: StatusFilter,
    sort_field: SortField,
    query: Query,
    view: QueryView,
}

impl DashboardPanel {
    /// Builds the controller over host-supplied user rows and computes the
    /// initial view (sorted by date, all statuses, page 1).
    ///
    /// # Errors
    ///
    /// Fails fast with [`ConfigError`] when a record is missing one of the
    /// expected columns or a column does not match its declared kind.
    pub fn new(records: Vec<Record>) -> Result<Self, ConfigError> {
        let schema = Schema::new()
            .with(fields::USER, FieldKind::Text)
            .with(fields::EMAIL, FieldKind::Text)
            .with(fields::STATUS, FieldKind::Text)
            .with(fields::REVENUE, FieldKind::Numeric)
            .with(fields::DATE, FieldKind::Timestamp);

        let mut query = Query::sorted_by(fields::DATE);
        query.search_fields = vec![fields::USER.to_string(), fields::EMAIL.to_string()];
        query.filters.insert(fields::STATUS.to_string(), Filter::Any);
        query.page_size = Some(ITEMS_PER_PAGE);

        let view = apply(&records, &schema, &query)?;
        Ok(Self {
            records,
            schema,
            status_filter: StatusFilter::All,
            sort_field: SortField::Date,
            query,
            view,
        })
    }

    /// Replaces the search text and refreshes the view.
    pub fn set_search(&mut self, text: impl Into<String>) -> Result<(), ConfigError> {
        self.query.search_text = text.into();
        self.refresh()
    }

    /// Replaces the status filter and refreshes the view.
    pub fn set_status_filter(&mut self, filter: StatusFilter) -> Result<(), ConfigError> {
        self.status_filter = filter;
        self.query
            .filters
            .insert(fields::STATUS.to_string(), filter.as_filter());
        self.refresh()
    }

    /// Replaces the sort column and refreshes the view.
    pub fn set_sort_field(&mut self, sort_field: SortField) -> Result<(), ConfigError> {
        self.sort_field = sort_field;
        self.query.sort_field = sort_field.field_name().to_string();
        self.refresh()
    }

    /// Jumps to `page`, clamped into `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize) -> Result<(), ConfigError> {
        self.query.page = page.clamp(1, self.view.total_pages);
        self.refresh()
    }

    /// Advances one page, saturating at the last page.
    pub fn next_page(&mut self) -> Result<(), ConfigError> {
        self.set_page(self.query.page.saturating_add(1))
    }

    /// Steps back one page, saturating at page 1.
    pub fn prev_page(&mut self) -> Result<(), ConfigError> {
        self.set_page(self.query.page.saturating_sub(1).max(1))
    }

    /// Current table page plus match totals for pagination controls.
    pub fn view(&self) -> &QueryView {
        &self.view
    }

    /// Current 1-based page number.
    pub fn page(&self) -> usize {
        self.query.page
    }

    /// Current search text.
    pub fn search_text(&self) -> &str {
        &self.query.search_text
    }

    /// Current status filter.
    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    /// Current sort column.
    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    /// 1-based inclusive result range shown on this page (`"Showing a-b of
    /// n"`), or `None` when nothing matched.
    pub fn result_range(&self) -> Option<(usize, usize)> {
        if self.view.total_matched == 0 {
            return None;
        }
        let start = (self.query.page - 1) * ITEMS_PER_PAGE + 1;
        let end = (start + self.view.rows.len()).saturating_sub(1);
        Some((start, end))
    }

    fn refresh(&mut self) -> Result<(), ConfigError> {
        self.view = apply(&self.records, &self.schema, &self.query)?;
        // A shrunken match set can strand the requested page past the end;
        // fold it back and recompute so the visible slice is never empty
        // while matches exist.
        if self.query.page > self.view.total_pages {
            self.query.page = self.view.total_pages;
            self.view = apply(&self.records, &self.schema, &self.query)?;
        }
        Ok(())
    }
}
