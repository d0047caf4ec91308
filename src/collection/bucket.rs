//! A named bucket inside a collection (e.g., the "feature" tag).

use std::{borrow::Cow, cmp::Ordering, sync::Arc};

use serde::{Serialize, ser::SerializeStruct};
use serde_json::Value;

use super::ItemSet;
use crate::{
    config::PaginationConfig,
    data::Item,
    error::Result,
    order::Sortable,
    paginate::Page,
};

/// A bucket key plus the items related to it.
///
/// Equality and ordering only look at the key.
#[derive(Debug, Clone)]
pub struct Bucket {
    key: String,
    items: ItemSet,
}

impl Bucket {
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_items(key, ItemSet::new())
    }

    pub fn with_items(key: impl Into<String>, items: ItemSet) -> Self {
        Self {
            key: key.into(),
            items,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Add a related item. Returns `true` if it was not already present.
    pub fn add(&mut self, item: Arc<Item>) -> Result<bool> {
        self.items.add(item)
    }

    /// Related item by identity key.
    pub fn get(&self, key: &str) -> Option<&Arc<Item>> {
        self.items.get(key)
    }

    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut ItemSet {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Arc<Item>> {
        self.items.iter()
    }

    pub fn for_each(&self, f: impl FnMut(Arc<Item>)) {
        self.items.for_each(f);
    }

    /// Pages of related items (e.g., one listing page per tag).
    pub fn pages(&self, config: &PaginationConfig) -> Result<Vec<Page<Arc<Item>>>> {
        Ok(self.items.paginate(config)?.with_label(&self.key).into_pages())
    }
}

impl PartialEq for Bucket {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Bucket {}

impl PartialOrd for Bucket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bucket {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Sortable for Bucket {
    fn sort_key(&self) -> &str {
        &self.key
    }

    /// Buckets expose `key` and `size` (alias `length`).
    fn sort_field(&self, field: &str) -> Option<Cow<'_, Value>> {
        match field {
            "key" => Some(Cow::Owned(Value::from(self.key.as_str()))),
            "size" | "length" => Some(Cow::Owned(Value::from(self.len()))),
            _ => None,
        }
    }
}

impl Serialize for Bucket {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Bucket", 3)?;
        state.serialize_field("key", &self.key)?;
        state.serialize_field("size", &self.len())?;
        state.serialize_field("items", &self.items)?;
        state.end()
    }
}
