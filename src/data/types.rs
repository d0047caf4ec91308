//! The item type shared by every collection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::path::lookup_in;

/// A content unit placed into zero or more buckets.
///
/// Identified by `name`, falling back to `src`. Empty strings count as
/// missing, so `{ name: "", src: "a.md" }` is identified by `"a.md"`.
///
/// # JSON
///
/// ```json
/// { "name": "post1", "src": "posts/1.md", "data": { "tags": ["a"] } }
/// ```
///
/// The data bag is also accepted under `locals` or `metadata`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Identity key (e.g., "post1")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Source path, used as identity when `name` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Front-matter style data used for filtering, sorting and searching
    #[serde(default, alias = "locals", alias = "metadata")]
    pub data: Map<String, Value>,
}

impl Item {
    /// Create an item identified by `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Create an item identified only by its source path.
    pub fn from_src(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Self::default()
        }
    }

    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    /// Replace the data bag. Non-object values leave the bag empty.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self
    }

    /// Set one top-level data field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Identity key: `name`, else `src`.
    pub fn key(&self) -> Option<&str> {
        [&self.name, &self.src]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|key| !key.is_empty())
    }

    /// Nested data value at a dotted path.
    pub fn field(&self, path: &str) -> Option<&Value> {
        lookup_in(&self.data, path)
    }
}
