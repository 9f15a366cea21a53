//! # Catalog Errors

use crate::catalog::{IndexOutOfRange, ValidationError};
use thiserror::Error;

/// Everything a catalog operation can fail with
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The course code is already used somewhere in the catalog
    #[error("A course with this course code already exists: {0}")]
    DuplicateCourseCode(String),

    /// Form input failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A stale or bogus flattened index; a caller bug, not user error
    #[error(transparent)]
    IndexOutOfRange(#[from] IndexOutOfRange),

    /// A loaded catalog document broke a catalog invariant
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// The mutation was applied in memory but could not be written to the store
    #[error("failed to persist catalog")]
    Persist(#[source] anyhow::Error),
}

impl CatalogError {
    /// Whether the message should be shown to the user as-is
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::DuplicateCourseCode(_) | Self::Validation(_))
    }
}
