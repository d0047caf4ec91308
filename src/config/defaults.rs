//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [[collection]] Section Defaults
// ============================================================================

pub mod collection {
    pub fn name() -> String {
        "collection".into()
    }
}

// ============================================================================
// [collection.pagination] Section Defaults
// ============================================================================

pub mod pagination {
    pub fn limit() -> usize {
        crate::paginate::DEFAULT_LIMIT
    }
}

// ============================================================================
// [collection.filter] Section Defaults
// ============================================================================

pub mod filter {
    pub fn date_field() -> String {
        "date".into()
    }

    pub fn archive_formats() -> Vec<String> {
        vec!["%Y".into()]
    }
}
