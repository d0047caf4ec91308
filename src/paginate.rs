//! Pagination over an ordered sequence.
//!
//! # Page Layout
//!
//! ```text
//! 25 items, limit = 10
//!
//! page 1: items[0..10)   previous = None  next = Some(2)
//! page 2: items[10..20)  previous = Some(1) next = Some(3)
//! page 3: items[20..25)  previous = Some(2) next = None
//! ```
//!
//! An empty input produces no pages at all.

use std::sync::OnceLock;

use serde::Serialize;

use crate::error::{CollectionError, Result};

/// Items per page when nothing else is configured.
pub const DEFAULT_LIMIT: usize = 10;

/// One page of an ordered sequence plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// 1-based page number
    pub page_number: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub first_page: usize,
    pub last_page: usize,
    pub previous_page: Option<usize>,
    pub next_page: Option<usize>,
    /// Collection plural this page belongs to (e.g., "tags")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub items: Vec<T>,
    /// Items on this page
    pub item_count: usize,
    /// Items across all pages
    pub total_item_count: usize,
}

/// Slice `items` into pages of at most `limit` entries.
pub fn paginate<T: Clone>(items: &[T], limit: usize) -> Result<Vec<Page<T>>> {
    check_limit(limit)?;
    Ok(build_pages(items, limit, None))
}

fn check_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(CollectionError::InvalidLimit(limit));
    }
    Ok(())
}

fn build_pages<T: Clone>(items: &[T], limit: usize, label: Option<&str>) -> Vec<Page<T>> {
    let total_pages = items.len().div_ceil(limit);

    items
        .chunks(limit)
        .enumerate()
        .map(|(index, chunk)| {
            let page_number = index + 1;
            Page {
                page_number,
                limit,
                total_pages,
                first_page: 1,
                last_page: total_pages,
                previous_page: (page_number > 1).then(|| page_number - 1),
                next_page: (page_number < total_pages).then(|| page_number + 1),
                label: label.map(str::to_string),
                items: chunk.to_vec(),
                item_count: chunk.len(),
                total_item_count: items.len(),
            }
        })
        .collect()
}

/// Lazily computed, cached pagination over a snapshot of items.
///
/// The snapshot is taken at construction. Build a new `Paginator` after the
/// backing collection changes.
#[derive(Debug)]
pub struct Paginator<T> {
    items: Vec<T>,
    limit: usize,
    label: Option<String>,
    pages: OnceLock<Vec<Page<T>>>,
}

impl<T: Clone> Paginator<T> {
    pub fn new(items: Vec<T>, limit: usize) -> Result<Self> {
        check_limit(limit)?;
        Ok(Self {
            items,
            limit,
            label: None,
            pages: OnceLock::new(),
        })
    }

    /// Tag every page with a collection name.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self.pages = OnceLock::new();
        self
    }

    /// All pages, computed on first access.
    pub fn pages(&self) -> &[Page<T>] {
        self.pages
            .get_or_init(|| build_pages(&self.items, self.limit, self.label.as_deref()))
    }

    /// A single page by 1-based number. `0` is read as the first page.
    pub fn page(&self, number: usize) -> Option<&Page<T>> {
        self.pages().get(number.max(1) - 1)
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.limit)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Consume the paginator, returning the computed pages.
    pub fn into_pages(self) -> Vec<Page<T>> {
        let Self {
            items,
            limit,
            label,
            pages,
        } = self;
        pages
            .into_inner()
            .unwrap_or_else(|| build_pages(&items, limit, label.as_deref()))
    }
}
