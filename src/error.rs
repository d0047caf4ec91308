//! Errors raised by the collection engine.
//!
//! Lookup misses are not errors: every `get` returns an `Option`.

use thiserror::Error;

pub type Result<T, E = CollectionError> = std::result::Result<T, E>;

/// Structural errors surfaced to the caller of the offending operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollectionError {
    #[error("pagination limit must be positive, got {0}")]
    InvalidLimit(usize),

    #[error("item has neither `name` nor `src` to identify it")]
    MissingIdentity,

    #[error("collection `{collection}` is misconfigured: {reason}")]
    Configuration { collection: String, reason: String },
}

impl CollectionError {
    pub(crate) fn configuration(collection: &str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            collection: collection.to_string(),
            reason: reason.into(),
        }
    }
}
