//! Collections, buckets and item sets.
//!
//! # Structure
//!
//! ```text
//! CollectionIndex "tags"
//! ├── Bucket "a"  ── ItemSet [post1, post2, post3]
//! ├── Bucket "b"  ── ItemSet [post2, post4, post6]
//! └── Bucket "c"  ── ItemSet [post3, post5, post6]
//! ```
//!
//! Buckets are kept sorted by key. Item sets keep insertion order and sort
//! on demand. The same `Arc<Item>` is shared by every bucket it lands in.

mod bucket;
mod filter;
mod index;
mod item_set;

pub use bucket::Bucket;
pub use filter::{ArchiveFilter, BucketFilter, FieldFilter};
pub use index::{CollectionIndex, CollectionOptions};
pub use item_set::{ItemSet, ItemSetOptions};
