//! Content items and nested data access.
//!
//! An [`Item`] is a single unit of content handed over by the host (usually a
//! page with its front-matter already parsed). The engine never copies items:
//! every bucket that holds one shares the same `Arc<Item>`.
//!
//! Item data is a JSON-like tree, addressed with dotted paths:
//!
//! ```text
//! data = { "address": { "city": "Cincinnati" }, "tags": ["a", "b"] }
//!
//! "address.city" → "Cincinnati"
//! "tags.1"       → "b"
//! "address.zip"  → None
//! ```

mod path;
mod types;

pub use path::{lookup, lookup_in, value_to_key};
pub use types::Item;
