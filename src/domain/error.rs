//! Error types for the HealthConnect catalog core.
//!
//! This module defines the centralized error type [`CatalogError`] and a type alias
//! [`Result`] used throughout the crate. Errors only arise at the edges: loading
//! catalogs, building a [`RecordStore`](crate::domain::RecordStore) snapshot, and
//! reading configuration. Filtering, sorting and cart mutation are total and never
//! produce one of these.

use crate::domain::item::{ItemId, Variant};
use thiserror::Error;

/// The main error type for catalog operations.
///
/// Most variants carry a human-readable description; I/O failures wrap the
/// underlying `std::io::Error` via `#[from]`.
///
/// # Examples
///
/// ```
/// use healthconnect::domain::{CatalogError, ItemId};
///
/// let err = CatalogError::DuplicateItemId(ItemId(7));
/// assert_eq!(err.to_string(), "Duplicate item id 7 in catalog snapshot");
/// ```
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading or decoding a catalog source failed.
    ///
    /// The string describes which source and what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Two items in one snapshot share an identifier.
    #[error("Duplicate item id {0} in catalog snapshot")]
    DuplicateItemId(ItemId),

    /// An item of the wrong variant was offered to a record store.
    #[error("Item {id} does not belong to the {expected} catalog")]
    VariantMismatch {
        /// Identifier of the offending item.
        id: ItemId,
        /// Variant the store was built for.
        expected: Variant,
    },

    /// A variant name did not match `doctors` or `medicines`.
    #[error("Unknown catalog variant: {0}")]
    UnknownVariant(String),
}

/// A specialized `Result` type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
