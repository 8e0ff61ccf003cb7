//! In-memory catalog source.

use crate::domain::error::Result;
use crate::domain::{CatalogItem, Variant};
use crate::storage::backend::CatalogSource;

/// Catalog source backed by vectors held in memory.
///
/// Items are split by their own variant, so mixed input is fine.
///
/// # Examples
///
/// ```
/// use healthconnect::domain::{CatalogItem, Variant};
/// use healthconnect::storage::{CatalogSource, MemoryCatalog};
///
/// let items: Vec<CatalogItem> = serde_json::from_str(r#"[
///     {"variant":"medicine","id":1,"name":"Vitamin D3","price":18.99,"category":"Vitamins"}
/// ]"#)?;
/// let source = MemoryCatalog::from_items(items);
/// assert_eq!(source.load(Variant::Medicines)?.len(), 1);
/// assert!(source.load(Variant::Doctors)?.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    doctors: Vec<CatalogItem>,
    medicines: Vec<CatalogItem>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        let mut source = Self::default();
        for item in items {
            source.slot_mut(item.variant()).push(item);
        }
        source
    }

    /// Replaces the snapshot of one variant.
    pub fn replace(&mut self, variant: Variant, items: Vec<CatalogItem>) {
        *self.slot_mut(variant) = items;
    }

    fn slot_mut(&mut self, variant: Variant) -> &mut Vec<CatalogItem> {
        match variant {
            Variant::Doctors => &mut self.doctors,
            Variant::Medicines => &mut self.medicines,
        }
    }
}

impl CatalogSource for MemoryCatalog {
    fn load(&self, variant: Variant) -> Result<Vec<CatalogItem>> {
        let items = match variant {
            Variant::Doctors => &self.doctors,
            Variant::Medicines => &self.medicines,
        };
        tracing::trace!(%variant, count = items.len(), "memory catalog load");
        Ok(items.clone())
    }
}
