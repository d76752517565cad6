//! Generic search/filter/sort/paginate engine shared by every data panel.
//!
//! The engine is a pure function over an in-memory record collection: given
//! the same records, schema, and query it always produces the same view, and
//! it keeps no state between calls. Records are opaque field maps; the panel
//! that owns them declares how each field sorts through a [`Schema`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable unique key identifying one record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a record id from trusted caller input.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Scalar value held by one record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldValue {
    /// Free text, including numeric-as-text forms such as `$1,234`.
    Text {
        /// The text payload.
        value: String,
    },
    /// Plain numeric value.
    Number {
        /// The numeric payload.
        value: f64,
    },
    /// Point in time.
    Timestamp {
        /// The instant payload.
        value: DateTime<Utc>,
    },
}

impl FieldValue {
    /// Convenience constructor for [`FieldValue::Text`].
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Convenience constructor for [`FieldValue::Number`].
    pub fn number(value: f64) -> Self {
        Self::Number { value }
    }

    /// Convenience constructor for [`FieldValue::Timestamp`].
    pub fn timestamp(value: DateTime<Utc>) -> Self {
        Self::Timestamp { value }
    }

    /// String form used for searching and for exact filter comparison.
    pub fn display_form(&self) -> String {
        match self {
            Self::Text { value } => value.clone(),
            Self::Number { value } => format!("{value}"),
            Self::Timestamp { value } => value.to_rfc3339(),
        }
    }
}

/// One immutable row of domain data.
///
/// The engine never mutates records; it only reorders and filters copies of
/// them into views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable unique key.
    pub id: RecordId,
    /// Field name to scalar value.
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Creates an empty record with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(id),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field insertion used when loading datasets.
    pub fn with(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Returns the value of `name`, if present.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

/// How values of one field compare during the sort stage.
///
/// The sort direction is implicit in the kind: timestamps and magnitudes are
/// most-significant-first, text is ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldKind {
    /// Ascending case-insensitive lexicographic order.
    Text,
    /// Descending numeric magnitude; text values are parsed after stripping
    /// currency symbols and grouping separators.
    Numeric,
    /// Descending (most recent first).
    Timestamp,
    /// Descending by position in an explicit low-to-high rank order.
    Rank {
        /// Accepted values, lowest rank first.
        order: Vec<String>,
    },
}

/// Field-kind declarations for one record collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Schema {
    fields: BTreeMap<String, FieldKind>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field declaration.
    pub fn with(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.insert(name.into(), kind);
        self
    }

    /// Returns the declared kind of `name`, if any.
    pub fn kind(&self, name: &str) -> Option<&FieldKind> {
        self.fields.get(name)
    }
}

/// Categorical filter choice for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Filter {
    /// Sentinel accepting every value.
    Any,
    /// Exact, case-sensitive match against the field's string form.
    Equals {
        /// Required value.
        value: String,
    },
}

/// Search/filter/sort/page parameters driving one panel's visible subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Case-insensitive substring needle; empty matches every record.
    pub search_text: String,
    /// Fields probed by the search stage, in order.
    pub search_fields: Vec<String>,
    /// Per-field categorical filters, AND-composed.
    pub filters: BTreeMap<String, Filter>,
    /// Field driving the sort stage.
    pub sort_field: String,
    /// Requested page, starting at 1. Callers clamp; the engine does not.
    pub page: usize,
    /// Page size, at least 1; `None` disables the pagination stage.
    pub page_size: Option<usize>,
}

impl Query {
    /// Creates a query sorting by `sort_field`, with no search, no filters,
    /// and no pagination.
    pub fn sorted_by(sort_field: impl Into<String>) -> Self {
        Self {
            search_text: String::new(),
            search_fields: Vec::new(),
            filters: BTreeMap::new(),
            sort_field: sort_field.into(),
            page: 1,
            page_size: None,
        }
    }
}

/// Ordered, filtered, optionally paginated view over a record collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryView {
    /// Records on the requested page (or the full matched sequence when
    /// pagination is disabled).
    pub rows: Vec<Record>,
    /// Number of records matching search and filters, across all pages.
    pub total_matched: usize,
    /// Number of pages; at least 1 even when nothing matched.
    pub total_pages: usize,
}

/// Configuration defect detected while applying a query.
///
/// These indicate a mismatch between a panel's schema/query and its records,
/// not a runtime condition: per the engine contract they are caught by tests
/// and construction-time validation, never mapped to an empty result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The query referenced a field the schema does not declare.
    #[error("field `{field}` is not declared in the schema")]
    UnknownField {
        /// Offending field name.
        field: String,
    },
    /// A record is missing a field the query referenced.
    #[error("record `{record}` has no field `{field}`")]
    MissingField {
        /// Record id.
        record: String,
        /// Missing field name.
        field: String,
    },
    /// A numeric-kind value did not parse as a numeric magnitude.
    #[error("field `{field}` of record `{record}` does not parse as a numeric amount")]
    MalformedAmount {
        /// Record id.
        record: String,
        /// Offending field name.
        field: String,
    },
    /// A timestamp-kind field held a non-timestamp value.
    #[error("field `{field}` of record `{record}` is not a timestamp")]
    NotATimestamp {
        /// Record id.
        record: String,
        /// Offending field name.
        field: String,
    },
    /// A rank-kind value was absent from the declared rank order.
    #[error("value `{value}` of field `{field}` is outside the declared rank order")]
    UnrankedValue {
        /// Offending field name.
        field: String,
        /// Value with no rank.
        value: String,
    },
    /// The query requested a page size of zero.
    #[error("page size must be at least 1")]
    InvalidPageSize,
}

/// Applies `query` to `records` and returns the resulting view.
///
/// Stages run in order: search (case-insensitive substring over the search
/// fields), filters (exact AND-composed equality), stable sort by the query's
/// sort field, then pagination when a page size is set.
///
/// Pagination never fails: `total_pages` is at least 1, and a page beyond the
/// matched range yields empty `rows` with the totals intact. Clamping the
/// requested page into `[1, total_pages]` is the caller's responsibility.
///
/// # Errors
///
/// Returns [`ConfigError`] when the query references a field missing from the
/// schema or from any record, when a declared kind does not match the values
/// it sorts, or when the page size is zero.
pub fn apply(records: &[Record], schema: &Schema, query: &Query) -> Result<QueryView, ConfigError> {
    if query.page_size == Some(0) {
        return Err(ConfigError::InvalidPageSize);
    }
    validate(records, schema, query)?;

    let needle = query.search_text.to_lowercase();
    let mut matched: Vec<&Record> = records
        .iter()
        .filter(|record| matches_search(record, &query.search_fields, &needle))
        .filter(|record| matches_filters(record, &query.filters))
        .collect();

    let sort_kind = schema
        .kind(&query.sort_field)
        .ok_or_else(|| ConfigError::UnknownField {
            field: query.sort_field.clone(),
        })?;
    let mut keyed = Vec::with_capacity(matched.len());
    for record in &matched {
        keyed.push(sort_key(record, &query.sort_field, sort_kind)?);
    }
    let mut order: Vec<usize> = (0..matched.len()).collect();
    order.sort_by(|&left, &right| compare_keys(&keyed[left], &keyed[right]));
    matched = order.iter().map(|&index| matched[index]).collect();

    let total_matched = matched.len();
    let (rows, total_pages) = match query.page_size {
        None => (matched.into_iter().cloned().collect(), 1),
        Some(page_size) => {
            let total_pages = total_matched.div_ceil(page_size).max(1);
            let start = query.page.saturating_sub(1).saturating_mul(page_size);
            let rows = matched
                .into_iter()
                .skip(start)
                .take(page_size)
                .cloned()
                .collect();
            (rows, total_pages)
        }
    };

    Ok(QueryView {
        rows,
        total_matched,
        total_pages,
    })
}

fn validate(records: &[Record], schema: &Schema, query: &Query) -> Result<(), ConfigError> {
    let mut referenced: Vec<&String> = Vec::new();
    referenced.extend(&query.search_fields);
    referenced.extend(query.filters.keys());
    referenced.push(&query.sort_field);

    for field in referenced {
        if schema.kind(field).is_none() {
            return Err(ConfigError::UnknownField {
                field: field.clone(),
            });
        }
        for record in records {
            if record.field(field).is_none() {
                return Err(ConfigError::MissingField {
                    record: record.id.as_str().to_string(),
                    field: field.clone(),
                });
            }
        }
    }
    Ok(())
}

fn matches_search(record: &Record, search_fields: &[String], needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    search_fields.iter().any(|field| {
        record
            .field(field)
            .map(|value| value.display_form().to_lowercase().contains(needle))
            .unwrap_or(false)
    })
}

fn matches_filters(record: &Record, filters: &BTreeMap<String, Filter>) -> bool {
    filters.iter().all(|(field, filter)| match filter {
        Filter::Any => true,
        Filter::Equals { value } => record
            .field(field)
            .map(|held| held.display_form() == *value)
            .unwrap_or(false),
    })
}

enum SortKey {
    Text(String),
    Magnitude(f64),
    Instant(DateTime<Utc>),
    Rank(usize),
}

fn sort_key(record: &Record, field: &str, kind: &FieldKind) -> Result<SortKey, ConfigError> {
    let value = record.field(field).ok_or_else(|| ConfigError::MissingField {
        record: record.id.as_str().to_string(),
        field: field.to_string(),
    })?;
    match kind {
        FieldKind::Text => Ok(SortKey::Text(value.display_form().to_lowercase())),
        FieldKind::Numeric => match value {
            FieldValue::Number { value } => Ok(SortKey::Magnitude(*value)),
            other => parse_amount(&other.display_form())
                .map(SortKey::Magnitude)
                .ok_or_else(|| ConfigError::MalformedAmount {
                    record: record.id.as_str().to_string(),
                    field: field.to_string(),
                }),
        },
        FieldKind::Timestamp => match value {
            FieldValue::Timestamp { value } => Ok(SortKey::Instant(*value)),
            _ => Err(ConfigError::NotATimestamp {
                record: record.id.as_str().to_string(),
                field: field.to_string(),
            }),
        },
        FieldKind::Rank { order } => {
            let form = value.display_form();
            order
                .iter()
                .position(|step| *step == form)
                .map(SortKey::Rank)
                .ok_or(ConfigError::UnrankedValue {
                    field: field.to_string(),
                    value: form,
                })
        }
    }
}

fn compare_keys(left: &SortKey, right: &SortKey) -> Ordering {
    match (left, right) {
        (SortKey::Text(left), SortKey::Text(right)) => left.cmp(right),
        (SortKey::Magnitude(left), SortKey::Magnitude(right)) => right.total_cmp(left),
        (SortKey::Instant(left), SortKey::Instant(right)) => right.cmp(left),
        (SortKey::Rank(left), SortKey::Rank(right)) => right.cmp(left),
        // Keys for one sort field always share a variant.
        _ => Ordering::Equal,
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !matches!(ch, '$' | '€' | '£' | ',' | ' '))
        .collect();
    cleaned.parse::<f64>().ok()
}
