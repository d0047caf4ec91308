//! Bucket filters: map an item to the bucket keys it belongs to.
//!
//! | Filter          | Source                      | Keys                      |
//! |-----------------|-----------------------------|---------------------------|
//! | `FieldFilter`   | data field (default plural) | the value(s) of the field |
//! | `ArchiveFilter` | date field                  | one key per strftime fmt  |
//! | closure         | anything                    | whatever it returns       |
//!
//! `None` or an empty list means the item is skipped for that collection.

use std::fmt::Write;

use chrono::{
    DateTime, NaiveDate, NaiveDateTime,
    format::{Item as FormatItem, StrftimeItems},
};
use serde_json::Value;

use crate::{
    data::{Item, value_to_key},
    error::{CollectionError, Result},
};

/// Resolves which buckets of one collection an item belongs to.
pub trait BucketFilter: Send + Sync {
    fn resolve(&self, item: &Item) -> Option<Vec<String>>;
}

impl<F> BucketFilter for F
where
    F: Fn(&Item) -> Option<Vec<String>> + Send + Sync,
{
    fn resolve(&self, item: &Item) -> Option<Vec<String>> {
        self(item)
    }
}

// ============================================================================
// Field Filter
// ============================================================================

/// Reads bucket keys from a data field.
///
/// A scalar becomes a single key; an array contributes each scalar element.
#[derive(Debug, Clone)]
pub struct FieldFilter {
    field: String,
}

impl FieldFilter {
    pub fn new(collection: &str, field: impl Into<String>) -> Result<Self> {
        let field = field.into();
        if field.is_empty() {
            return Err(CollectionError::configuration(collection, "filter field is empty"));
        }
        Ok(Self { field })
    }

    /// Filter reading the field named after the collection plural.
    pub(crate) fn for_plural(plural: &str) -> Self {
        Self {
            field: plural.to_string(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl BucketFilter for FieldFilter {
    fn resolve(&self, item: &Item) -> Option<Vec<String>> {
        match item.field(&self.field)? {
            Value::Array(values) => Some(values.iter().filter_map(value_to_key).collect()),
            value => value_to_key(value).map(|key| vec![key]),
        }
    }
}

// ============================================================================
// Archive Filter
// ============================================================================

/// Buckets items by a date field.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` and RFC 3339 strings.
/// With `formats = ["%Y", "%b"]`, a post dated `2014-01-05` lands in
/// buckets `"2014"` and `"Jan"`.
#[derive(Debug, Clone)]
pub struct ArchiveFilter {
    field: String,
    formats: Vec<String>,
}

impl ArchiveFilter {
    pub fn new(collection: &str, field: impl Into<String>, formats: Vec<String>) -> Result<Self> {
        let field = field.into();
        if field.is_empty() {
            return Err(CollectionError::configuration(collection, "archive date field is empty"));
        }
        if formats.is_empty() {
            return Err(CollectionError::configuration(collection, "archive needs at least one format"));
        }
        if let Some(bad) = formats
            .iter()
            .find(|fmt| StrftimeItems::new(fmt).any(|item| matches!(item, FormatItem::Error)))
        {
            return Err(CollectionError::configuration(
                collection,
                format!("invalid archive format `{bad}`"),
            ));
        }
        Ok(Self { field, formats })
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl BucketFilter for ArchiveFilter {
    fn resolve(&self, item: &Item) -> Option<Vec<String>> {
        let date = parse_date(item.field(&self.field)?.as_str()?)?;

        let keys: Vec<String> = self
            .formats
            .iter()
            .filter_map(|fmt| {
                let mut key = String::new();
                // time specifiers have nothing to render on a bare date
                write!(key, "{}", date.format(fmt)).ok()?;
                Some(key)
            })
            .collect();
        (!keys.is_empty()).then_some(keys)
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}
