//! A whole collection (e.g., "tags"): a sorted set of buckets.

use std::{collections::BTreeMap, fmt, sync::Arc};

use serde::{Serialize, Serializer, ser::SerializeMap};

use super::{Bucket, BucketFilter, FieldFilter};
use crate::{
    config::PaginationConfig,
    data::Item,
    error::{CollectionError, Result},
    order::{Comparator, SortOrder},
    paginate::{Page, Paginator},
};

/// Construction options for [`CollectionIndex`].
///
/// ```ignore
/// let options = CollectionOptions::new("tag").plural("tags");
/// ```
#[derive(Clone)]
pub struct CollectionOptions {
    /// Singular name (e.g., "tag")
    pub name: String,
    /// Plural name, used as registry key and default filter field
    pub plural: Option<String>,
    /// Defaults to [`FieldFilter`] on the plural name
    pub filter: Option<Arc<dyn BucketFilter>>,
    /// Bucket ordering
    pub compare: Comparator<Bucket>,
    pub sort_order: SortOrder,
    pub pagination: PaginationConfig,
    /// Buckets created up front
    pub items: Vec<String>,
}

impl Default for CollectionOptions {
    fn default() -> Self {
        Self::new("collection")
    }
}

impl fmt::Debug for CollectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionOptions")
            .field("name", &self.name)
            .field("plural", &self.plural)
            .field("filter", &self.filter.as_ref().map(|_| ".."))
            .field("compare", &self.compare)
            .field("sort_order", &self.sort_order)
            .field("pagination", &self.pagination)
            .field("items", &self.items)
            .finish()
    }
}

impl CollectionOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plural: None,
            filter: None,
            compare: Comparator::Default,
            sort_order: SortOrder::Asc,
            pagination: PaginationConfig::default(),
            items: Vec::new(),
        }
    }

    pub fn plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    pub fn filter(mut self, filter: impl BucketFilter + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn compare(mut self, compare: Comparator<Bucket>) -> Self {
        self.compare = compare;
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    pub fn pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn items(mut self, items: Vec<String>) -> Self {
        self.items = items;
        self
    }

    /// Name with the `"collection"` fallback applied.
    pub fn resolved_name(&self) -> &str {
        if self.name.is_empty() { "collection" } else { &self.name }
    }

    /// Plural with the name fallback applied.
    pub fn resolved_plural(&self) -> &str {
        self.plural
            .as_deref()
            .filter(|plural| !plural.is_empty())
            .unwrap_or_else(|| self.resolved_name())
    }
}

/// Buckets keyed by name, plus the filter deciding which items land where.
pub struct CollectionIndex {
    name: String,
    plural: String,
    buckets: BTreeMap<String, Bucket>,
    filter: Arc<dyn BucketFilter>,
    compare: Comparator<Bucket>,
    sort_order: SortOrder,
    pagination: PaginationConfig,
}

impl fmt::Debug for CollectionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionIndex")
            .field("name", &self.name)
            .field("plural", &self.plural)
            .field("buckets", &self.buckets.keys().collect::<Vec<_>>())
            .field("compare", &self.compare)
            .field("sort_order", &self.sort_order)
            .finish_non_exhaustive()
    }
}

impl Default for CollectionIndex {
    fn default() -> Self {
        Self::new(CollectionOptions::default())
    }
}

impl CollectionIndex {
    pub fn new(options: CollectionOptions) -> Self {
        let name = options.resolved_name().to_string();
        let plural = options.resolved_plural().to_string();
        let filter = options
            .filter
            .unwrap_or_else(|| Arc::new(FieldFilter::for_plural(&plural)));

        let buckets = options
            .items
            .into_iter()
            .map(|key| (key.clone(), Bucket::new(key)))
            .collect();

        Self {
            name,
            plural,
            buckets,
            filter,
            compare: options.compare,
            sort_order: options.sort_order,
            pagination: options.pagination,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plural(&self) -> &str {
        &self.plural
    }

    pub fn pagination(&self) -> &PaginationConfig {
        &self.pagination
    }

    /// Get or create the bucket `key`, then add `item` to it if given.
    pub fn add(&mut self, key: &str, item: Option<Arc<Item>>) -> Result<()> {
        if item.as_ref().is_some_and(|item| item.key().is_none()) {
            return Err(CollectionError::MissingIdentity);
        }

        let bucket = self
            .buckets
            .entry(key.to_string())
            .or_insert_with(|| Bucket::new(key));

        if let Some(item) = item {
            bucket.add(item)?;
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Bucket> {
        self.buckets.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Bucket> {
        self.buckets.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.buckets.contains_key(key)
    }

    /// Bucket keys this collection's filter assigns to `item`.
    pub fn resolve(&self, item: &Item) -> Vec<String> {
        self.filter.resolve(item).unwrap_or_default()
    }

    /// Buckets ordered by `comparator`, or by the collection's own ordering.
    ///
    /// An explicit comparator is applied as given; the configured sort order
    /// only applies to the collection's own ordering.
    pub fn sort(&self, comparator: Option<&Comparator<Bucket>>) -> Vec<&Bucket> {
        let mut buckets: Vec<&Bucket> = self.buckets.values().collect();
        match comparator {
            Some(comparator) => comparator.sort(&mut buckets, SortOrder::Asc),
            None => self.compare.sort(&mut buckets, self.sort_order),
        }
        buckets
    }

    pub fn keys(&self) -> Vec<&str> {
        self.sort(None).into_iter().map(Bucket::key).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.sort(None).into_iter()
    }

    pub fn for_each(&self, f: impl FnMut(&Bucket)) {
        self.iter().for_each(f);
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Pages of buckets, labelled with the collection plural.
    ///
    /// Without `options`, buckets follow the collection's own ordering (the
    /// same as [`keys`](Self::keys)) and only the configured page size is
    /// used; the configured `sort_by` orders items inside buckets. Explicit
    /// `options` replace the page size, and their `sort_by` orders buckets
    /// by a bucket field (`key`, `size`).
    pub fn pages(&self, options: Option<&PaginationConfig>) -> Result<Vec<Page<&Bucket>>> {
        let buckets = match options {
            Some(PaginationConfig {
                sort_by: Some(field),
                sort_order,
                ..
            }) => {
                let mut buckets: Vec<&Bucket> = self.buckets.values().collect();
                Comparator::<Bucket>::by_field(field).sort(&mut buckets, *sort_order);
                buckets
            }
            _ => self.sort(None),
        };
        let limit = options.unwrap_or(&self.pagination).limit;
        Ok(Paginator::new(buckets, limit)?
            .with_label(&self.plural)
            .into_pages())
    }
}

impl Serialize for CollectionIndex {
    /// `{ bucket_key: [item, ...] }` in the collection's order.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let buckets = self.sort(None);
        let mut map = serializer.serialize_map(Some(buckets.len()))?;
        for bucket in buckets {
            map.serialize_entry(bucket.key(), bucket.items())?;
        }
        map.end()
    }
}
