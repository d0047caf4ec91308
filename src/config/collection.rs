//! `[[collection]]` section configuration.
//!
//! Each entry describes one collection: its names, how items are bucketed,
//! how buckets are ordered and how pages are cut.

use super::defaults;
use crate::{
    collection::{ArchiveFilter, BucketFilter, CollectionOptions, FieldFilter},
    error::CollectionError,
    order::{Comparator, SortOrder},
};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Pagination
// ============================================================================

/// `[collection.pagination]` - page size and item ordering.
///
/// # Example
/// ```toml
/// [collection.pagination]
/// limit = 10
/// sort_by = "date"
/// sort_order = "desc"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationConfig {
    /// Entries per page.
    #[serde(default = "defaults::pagination::limit")]
    #[educe(Default = defaults::pagination::limit())]
    pub limit: usize,

    /// Dotted data path to sort by before paging.
    pub sort_by: Option<String>,

    /// Direction applied to the ordering.
    pub sort_order: SortOrder,
}

impl PaginationConfig {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}

// ============================================================================
// Filter
// ============================================================================

/// `[collection.filter]` - how an item maps to bucket keys.
///
/// # Example
/// ```toml
/// [collection.filter]
/// kind = "archive"
/// field = "date"
/// formats = ["%Y", "%Y-%m"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FilterConfig {
    /// Read bucket keys from a data field (string or list of strings).
    Field { field: String },

    /// Bucket by a date field, one key per strftime format.
    Archive {
        #[serde(default = "defaults::filter::date_field")]
        field: String,
        #[serde(default = "defaults::filter::archive_formats")]
        formats: Vec<String>,
    },
}

impl FilterConfig {
    /// Build the filter, validating its parameters.
    pub fn build(&self, collection: &str) -> Result<Arc<dyn BucketFilter>, CollectionError> {
        let filter: Arc<dyn BucketFilter> = match self {
            Self::Field { field } => Arc::new(FieldFilter::new(collection, field)?),
            Self::Archive { field, formats } => {
                Arc::new(ArchiveFilter::new(collection, field, formats.clone())?)
            }
        };
        Ok(filter)
    }
}

// ============================================================================
// Collection
// ============================================================================

/// One `[[collection]]` entry.
///
/// # Example
/// ```toml
/// [[collection]]
/// name = "tag"
/// plural = "tags"
/// sort_by = "size"
/// sort_order = "desc"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct CollectionConfig {
    /// Singular name (e.g., "tag").
    #[serde(default = "defaults::collection::name")]
    #[educe(Default = defaults::collection::name())]
    pub name: String,

    /// Plural name and registry key (defaults to `name`).
    pub plural: Option<String>,

    /// Bucket ordering field: "key", "size" or "length".
    pub sort_by: Option<String>,

    /// Bucket ordering direction.
    pub sort_order: SortOrder,

    /// Buckets created up front, even if no item lands in them.
    pub items: Vec<String>,

    pub pagination: PaginationConfig,

    /// Defaults to reading the data field named after `plural`.
    pub filter: Option<FilterConfig>,
}

impl CollectionConfig {
    /// Plural name with the `name` fallback applied.
    pub fn plural(&self) -> &str {
        self.plural
            .as_deref()
            .filter(|plural| !plural.is_empty())
            .unwrap_or(&self.name)
    }

    /// Turn this entry into options for [`crate::collection::CollectionIndex`].
    pub fn to_options(&self) -> Result<CollectionOptions, CollectionError> {
        let mut options = CollectionOptions::new(&self.name)
            .plural(self.plural())
            .sort_order(self.sort_order)
            .pagination(self.pagination.clone())
            .items(self.items.clone());

        if let Some(field) = &self.sort_by {
            options = options.compare(Comparator::by_field(field));
        }
        if let Some(filter) = &self.filter {
            options.filter = Some(filter.build(self.plural())?);
        }
        Ok(options)
    }
}
