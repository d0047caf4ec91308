//! Named collection store and item dispatch.
//!
//! # Dispatch
//!
//! ```text
//! add_item(post2 { tags: [a, b], archives: [2013] })
//!    │
//!    ├── "tags"     filter → [a, b]  → tags.a += post2, tags.b += post2
//!    ├── "archives" filter → [2013]  → archives.2013 += post2
//!    └── "authors"  filter → None    → skipped
//! ```
//!
//! Collections are visited in creation order. `create_collection` is
//! get-or-create: the first call for a plural wins.

use std::sync::{Arc, LazyLock};

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;

use crate::{
    collection::{CollectionIndex, CollectionOptions},
    config::IndexConfig,
    data::Item,
    error::{CollectionError, Result},
    log,
};

/// Process-wide registry, for hosts that want ambient access.
///
/// Reset with `GLOBAL_REGISTRY.write().clear()` between builds.
pub static GLOBAL_REGISTRY: LazyLock<RwLock<Registry>> =
    LazyLock::new(|| RwLock::new(Registry::new()));

/// Collections keyed by plural name, in creation order.
#[derive(Debug, Default)]
pub struct Registry {
    collections: Vec<CollectionIndex>,
    by_plural: FxHashMap<String, usize>,
    /// Cached JSON output. Invalidated on any write operation.
    json_cache: Mutex<Option<String>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry with one collection per `[[collection]]` entry.
    ///
    /// The config is validated first, so a zero page limit or a broken
    /// filter is reported here rather than at `pages()` time.
    pub fn from_config(config: &IndexConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let mut registry = Self::new();
        for collection in &config.collections {
            let options = collection.to_options()?;
            let created = registry.create_collection(options);
            log!("config"; "collection `{}` ({})", created.plural(), created.name());
        }
        Ok(registry)
    }

    /// Get or create the collection for `options`' plural.
    ///
    /// Options are ignored when the plural is already registered.
    pub fn create_collection(&mut self, options: CollectionOptions) -> &mut CollectionIndex {
        self.invalidate();
        let plural = options.resolved_plural();

        let index = match self.by_plural.get(plural) {
            Some(&index) => index,
            None => {
                let index = self.collections.len();
                self.by_plural.insert(plural.to_string(), index);
                self.collections.push(CollectionIndex::new(options));
                index
            }
        };
        &mut self.collections[index]
    }

    /// Ensure collection `plural` exists and holds an (empty) bucket `key`.
    pub fn add_collection_item(&mut self, plural: &str, key: &str) -> Result<()> {
        self.create_collection(CollectionOptions::new(plural)).add(key, None)
    }

    /// Insert `item` into every bucket the collections' filters assign it.
    ///
    /// Returns the number of buckets that gained the item. Fails without
    /// touching any collection if the item is unidentifiable but would have
    /// been inserted somewhere.
    pub fn add_item(&mut self, item: Arc<Item>) -> Result<usize> {
        let targets: Vec<(usize, Vec<String>)> = self
            .collections
            .iter()
            .enumerate()
            .map(|(index, collection)| (index, collection.resolve(&item)))
            .filter(|(_, keys)| !keys.is_empty())
            .collect();

        if targets.is_empty() {
            return Ok(0);
        }
        if item.key().is_none() {
            return Err(CollectionError::MissingIdentity);
        }

        self.invalidate();
        let mut inserted = 0;
        for (index, keys) in targets {
            let collection = &mut self.collections[index];
            for key in keys {
                let before = collection.get(&key).map_or(0, |bucket| bucket.len());
                collection.add(&key, Some(Arc::clone(&item)))?;
                if collection.get(&key).map_or(0, |bucket| bucket.len()) > before {
                    inserted += 1;
                }
            }
        }
        Ok(inserted)
    }

    /// Dispatch a batch of items, logging a summary.
    pub fn add_items(&mut self, items: impl IntoIterator<Item = Arc<Item>>) -> Result<usize> {
        let mut count = 0;
        let mut inserted = 0;
        for item in items {
            inserted += self.add_item(item)?;
            count += 1;
        }
        log!("registry"; "indexed {count} items into {inserted} buckets across {} collections", self.len());
        Ok(inserted)
    }

    pub fn get(&self, plural: &str) -> Option<&CollectionIndex> {
        self.by_plural.get(plural).map(|&index| &self.collections[index])
    }

    pub fn get_mut(&mut self, plural: &str) -> Option<&mut CollectionIndex> {
        self.invalidate();
        let index = *self.by_plural.get(plural)?;
        Some(&mut self.collections[index])
    }

    /// All collections, in creation order.
    pub fn collections(&self) -> &[CollectionIndex] {
        &self.collections
    }

    pub fn for_each(&self, f: impl FnMut(&CollectionIndex)) {
        self.collections.iter().for_each(f);
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Drop every collection.
    pub fn clear(&mut self) {
        self.collections.clear();
        self.by_plural.clear();
        self.invalidate();
    }

    /// Serialize all collections as `{ plural: { bucket: [item, ...] } }`.
    ///
    /// First call generates JSON, subsequent calls return the cached value
    /// until the registry is mutated. Failed renders are not cached.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut cache = self.json_cache.lock();
        if let Some(ref json) = *cache {
            return Ok(json.clone());
        }

        let snapshot = self
            .collections
            .iter()
            .map(|collection| {
                let value = serde_json::to_value(collection)?;
                Ok((collection.plural().to_string(), value))
            })
            .collect::<serde_json::Result<serde_json::Map<String, serde_json::Value>>>()?;
        let json = serde_json::to_string_pretty(&snapshot)?;
        *cache = Some(json.clone());
        Ok(json)
    }

    fn invalidate(&mut self) {
        *self.json_cache.get_mut() = None;
    }
}
