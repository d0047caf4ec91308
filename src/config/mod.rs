//! Collection configuration management for `collections.toml`.
//!
//! # Sections
//!
//! | Section                     | Purpose                                  |
//! |-----------------------------|------------------------------------------|
//! | `[[collection]]`            | Names, bucket ordering, initial buckets  |
//! | `[collection.pagination]`   | Page size and item ordering              |
//! | `[collection.filter]`       | How items map to bucket keys             |
//!
//! # Example
//!
//! ```toml
//! [[collection]]
//! name = "tag"
//! plural = "tags"
//!
//! [collection.pagination]
//! limit = 10
//! sort_by = "date"
//! sort_order = "desc"
//!
//! [[collection]]
//! name = "archive"
//! plural = "archives"
//!
//! [collection.filter]
//! kind = "archive"
//! field = "date"
//! formats = ["%Y", "%Y-%m"]
//! ```

mod collection;
pub mod defaults;
mod error;

pub use collection::{CollectionConfig, FilterConfig, PaginationConfig};
pub use error::ConfigError;

use anyhow::{Context, Result, bail};
use educe::Educe;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing `collections.toml`
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Path the config was loaded from (set after loading)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Collections, in registration order
    #[serde(default, rename = "collection")]
    pub collections: Vec<CollectionConfig>,
}

impl IndexConfig {
    /// Parse configuration from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: IndexConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)
            .with_context(|| format!("Failed to load `{}`", path.display()))?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate names, pagination limits and filter parameters
    pub fn validate(&self) -> Result<()> {
        let mut plurals = FxHashSet::default();

        for collection in &self.collections {
            if collection.name.is_empty() {
                bail!(ConfigError::Validation("name must not be empty".into()));
            }

            let plural = collection.plural();
            if !plurals.insert(plural) {
                bail!(ConfigError::Validation(format!(
                    "plural `{plural}` is declared more than once"
                )));
            }

            if collection.pagination.limit == 0 {
                bail!(ConfigError::Validation(format!(
                    "pagination limit for `{plural}` must be positive"
                )));
            }

            if let Err(source) = collection.to_options() {
                bail!(ConfigError::Filter {
                    plural: plural.to_string(),
                    source,
                });
            }
        }

        Ok(())
    }
}
