//! Ordered, deduplicated set of items backing one bucket.

use std::{borrow::Cow, fmt, sync::Arc};

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{
    config::PaginationConfig,
    data::Item,
    error::{CollectionError, Result},
    order::{Comparator, EqualsFn, SortOrder, Sortable},
    paginate::{Page, Paginator, paginate},
};

impl Sortable for Item {
    fn sort_key(&self) -> &str {
        self.key().unwrap_or_default()
    }

    fn sort_field(&self, field: &str) -> Option<Cow<'_, Value>> {
        self.field(field).map(Cow::Borrowed)
    }
}

fn identity_equals(a: &Item, b: &Item) -> bool {
    a.key() == b.key()
}

/// Construction options for [`ItemSet`].
#[derive(Clone, Default)]
pub struct ItemSetOptions {
    /// Initial members, inserted in order.
    pub items: Vec<Arc<Item>>,
    /// Uniqueness predicate (defaults to identity-key equality).
    pub equals: Option<EqualsFn<Item>>,
    /// Iteration ordering (defaults to identity key, ascending).
    pub compare: Comparator<Item>,
}

/// Members are kept in insertion order; uniqueness is checked with the
/// `equals` predicate against every existing member.
#[derive(Clone)]
pub struct ItemSet {
    items: Vec<Arc<Item>>,
    equals: EqualsFn<Item>,
    compare: Comparator<Item>,
}

impl Default for ItemSet {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            equals: Arc::new(identity_equals),
            compare: Comparator::Default,
        }
    }
}

impl fmt::Debug for ItemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemSet")
            .field("items", &self.items.iter().map(|i| i.key()).collect::<Vec<_>>())
            .field("compare", &self.compare)
            .finish()
    }
}

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ItemSetOptions) -> Result<Self> {
        let mut set = Self {
            items: Vec::with_capacity(options.items.len()),
            equals: options.equals.unwrap_or_else(|| Arc::new(identity_equals)),
            compare: options.compare,
        };
        for item in options.items {
            set.add(item)?;
        }
        Ok(set)
    }

    /// Insert `item` unless an equal member already exists.
    ///
    /// Returns `true` when the item was inserted. The stored member is never
    /// replaced by a later equal item.
    pub fn add(&mut self, item: Arc<Item>) -> Result<bool> {
        if item.key().is_none() {
            return Err(CollectionError::MissingIdentity);
        }
        if self.contains(&item) {
            return Ok(false);
        }
        self.items.push(item);
        Ok(true)
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.items.iter().any(|member| (self.equals)(member, item))
    }

    /// Member whose identity key is `key`.
    pub fn get(&self, key: &str) -> Option<&Arc<Item>> {
        self.items.iter().find(|member| member.key() == Some(key))
    }

    /// First member, in insertion order, whose data at `path` equals `value`.
    ///
    /// ```ignore
    /// set.get_by_field("Cincinnati", "address.city");
    /// set.get_by_field(&2014, "year");
    /// ```
    pub fn get_by_field<V>(&self, value: &V, path: &str) -> Option<&Arc<Item>>
    where
        V: ?Sized,
        Value: PartialEq<V>,
    {
        self.items
            .iter()
            .find(|member| member.field(path).is_some_and(|found| found == value))
    }

    /// First member, in insertion order, matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&Item) -> bool) -> Option<&Arc<Item>> {
        self.items.iter().find(|member| predicate(member))
    }

    /// All members sorted by `comparator`.
    pub fn sorted(&self, comparator: &Comparator<Item>) -> Vec<Arc<Item>> {
        let mut items = self.items.clone();
        comparator.sort(&mut items, SortOrder::Asc);
        items
    }

    /// Members in the set's own order.
    pub fn iter(&self) -> impl Iterator<Item = Arc<Item>> {
        self.sorted(&self.compare).into_iter()
    }

    pub fn for_each(&self, f: impl FnMut(Arc<Item>)) {
        self.iter().for_each(f);
    }

    /// Members in insertion order.
    pub fn as_slice(&self) -> &[Arc<Item>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pages of `limit` members in the set's own order.
    pub fn pages(&self, limit: usize) -> Result<Vec<Page<Arc<Item>>>> {
        paginate(&self.sorted(&self.compare), limit)
    }

    /// Paginator honouring `sort_by` and `sort_order` from `config`.
    pub fn paginate(&self, config: &PaginationConfig) -> Result<Paginator<Arc<Item>>> {
        let comparator = match &config.sort_by {
            Some(field) => Comparator::by_field(field),
            None => self.compare.clone(),
        };
        let mut items = self.items.clone();
        comparator.sort(&mut items, config.sort_order);
        Paginator::new(items, config.limit)
    }
}

impl Serialize for ItemSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.sorted(&self.compare))
    }
}
