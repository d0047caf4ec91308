//! Tola Collect - collection and bucket indexing for static sites.
//!
//! Groups content items into named collections ("tags", "categories",
//! "archives") made of sorted buckets, and paginates buckets and items for
//! rendering.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   add_item    ┌──────────────────────────────────────────┐
//! │ host: pages  │ ────────────► │ Registry                                 │
//! │ (Arc<Item>)  │               │  ├── CollectionIndex "tags"              │
//! └──────────────┘               │  │    filter(item) → ["a", "b"]          │
//!                                │  │    ├── Bucket "a" ── ItemSet          │
//!                                │  │    └── Bucket "b" ── ItemSet          │
//!                                │  └── CollectionIndex "archives"          │
//!                                │       filter(item) → ["2014"]            │
//!                                └──────────────────────────────────────────┘
//!                                         │ sort / pages / to_json
//!                                         ▼
//!                                ┌──────────────────────────────────────────┐
//!                                │ Page { page_number, items, next, ... }   │
//!                                └──────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut registry = Registry::new();
//! registry.create_collection(CollectionOptions::new("tag").plural("tags"));
//!
//! for page in pages {
//!     registry.add_item(Arc::new(page))?;
//! }
//!
//! if let Some(tags) = registry.get("tags") {
//!     for bucket in tags.iter() {
//!         let listing = bucket.pages(tags.pagination())?;
//!     }
//! }
//! ```

pub mod collection;
pub mod config;
pub mod data;
pub mod error;
pub mod logger;
pub mod order;
pub mod paginate;
pub mod registry;

pub use collection::{
    ArchiveFilter, Bucket, BucketFilter, CollectionIndex, CollectionOptions, FieldFilter, ItemSet,
    ItemSetOptions,
};
pub use config::{CollectionConfig, FilterConfig, IndexConfig, PaginationConfig};
pub use data::Item;
pub use error::{CollectionError, Result};
pub use order::{Comparator, SortOrder, Sortable};
pub use paginate::{DEFAULT_LIMIT, Page, Paginator, paginate};
pub use registry::{GLOBAL_REGISTRY, Registry};
