//! Errors raised while loading `collections.toml`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::CollectionError;

/// Failures of the configuration layer, before any collection exists.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read collection config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed collection config")]
    Toml(#[from] toml::de::Error),

    #[error("invalid [[collection]] entry: {0}")]
    Validation(String),

    #[error("[collection.filter] for `{plural}` is invalid")]
    Filter {
        plural: String,
        #[source]
        source: CollectionError,
    },
}
