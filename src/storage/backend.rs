//! Catalog source abstraction.
//!
//! A [`CatalogSource`] hands out full catalog snapshots. The caller turns each
//! snapshot into a [`RecordStore`](crate::domain::RecordStore), which is where ids
//! are checked for uniqueness; sources only decode.

use crate::domain::error::Result;
use crate::domain::{CatalogItem, Variant};

/// Provider of catalog snapshots, one list per variant.
///
/// # Implementations
///
/// - [`JsonCatalog`](crate::storage::JsonCatalog): one JSON file per variant
/// - [`MemoryCatalog`](crate::storage::MemoryCatalog): items held in memory
///
/// # Examples
///
/// ```
/// use healthconnect::domain::Variant;
/// use healthconnect::storage::{CatalogSource, MemoryCatalog};
///
/// let source = MemoryCatalog::default();
/// assert!(source.load(Variant::Doctors)?.is_empty());
/// # Ok::<(), healthconnect::CatalogError>(())
/// ```
pub trait CatalogSource: Send {
    /// Returns the current snapshot for `variant`, in source order.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read or decoded.
    fn load(&self, variant: Variant) -> Result<Vec<CatalogItem>>;
}
