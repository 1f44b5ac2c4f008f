//! Paging errors

use thiserror::Error;

/// Everything a paged retrieval can fail with.
///
/// Only the caller-input variants originate here; the rest are surfaced by the
/// source adapter and passed through unchanged.
#[derive(Debug, Error)]
pub enum PagingError {
    #[error("Invalid page number {0}: pages are numbered from 1")]
    InvalidPageNumber(u32),

    #[error("Invalid page size {0}: must be at least 1")]
    InvalidPageSize(u32),

    #[error("Page size {requested} exceeds the configured maximum of {max}")]
    PageSizeTooLarge { requested: u32, max: u32 },

    #[error("Cannot sort by unknown column '{column}'")]
    UnresolvableSortColumn { column: String },

    #[error("Paged retrieval was cancelled")]
    Cancelled,

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Source error: {0}")]
    Source(String),
}

impl PagingError {
    /// Whether the failure was caused by the request itself (bad paging input
    /// or a sort column outside the allow-list) rather than by the source.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            PagingError::InvalidPageNumber(_)
                | PagingError::InvalidPageSize(_)
                | PagingError::PageSizeTooLarge { .. }
                | PagingError::UnresolvableSortColumn { .. }
        )
    }

    pub(crate) fn unresolvable(column: &str) -> Self {
        PagingError::UnresolvableSortColumn {
            column: column.to_string(),
        }
    }
}

/// Result type for paging operations
pub type PagingResult<T> = Result<T, PagingError>;
