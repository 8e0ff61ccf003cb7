//! Immutable, session-scoped record store.
//!
//! A [`RecordStore`] is one snapshot of a catalog for one [`Variant`]. It is validated
//! once on construction (unique ids, matching variant) and never mutated afterwards;
//! a catalog reload produces a fresh store. The items live behind an `Arc<[_]>`, so
//! cloning a store is cheap and a snapshot can be shared freely without locking.

use crate::domain::error::{CatalogError, Result};
use crate::domain::item::{CatalogItem, ItemId, Variant};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct RecordStore {
    variant: Variant,
    items: Arc<[CatalogItem]>,
    index: Arc<HashMap<ItemId, usize>>,
}

impl RecordStore {
    /// Builds a snapshot from `items`, preserving their order.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateItemId`] if two items share an id
    /// - [`CatalogError::VariantMismatch`] if an item is not of `variant`
    ///
    /// # Examples
    ///
    /// ```
    /// use healthconnect::domain::{RecordStore, Variant};
    ///
    /// let store = RecordStore::new(Variant::Medicines, vec![])?;
    /// assert!(store.is_empty());
    /// # Ok::<(), healthconnect::CatalogError>(())
    /// ```
    pub fn new(variant: Variant, items: Vec<CatalogItem>) -> Result<Self> {
        let _span = tracing::debug_span!("record_store_new", %variant, count = items.len()).entered();

        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if item.variant() != variant {
                return Err(CatalogError::VariantMismatch {
                    id: item.id(),
                    expected: variant,
                });
            }
            if index.insert(item.id(), position).is_some() {
                return Err(CatalogError::DuplicateItemId(item.id()));
            }
        }

        tracing::debug!("record store built");

        Ok(Self {
            variant,
            items: items.into(),
            index: Arc::new(index),
        })
    }

    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// All items in their original (relevance) order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.index.get(&id).and_then(|&position| self.items.get(position))
    }

    /// Price used for cart totals; `None` when the id is not in this snapshot.
    #[must_use]
    pub fn price_of(&self, id: ItemId) -> Option<f64> {
        self.get(id).map(CatalogItem::price)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct categories in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(CatalogItem::category)
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// Distinct tags across all items, sorted.
    #[must_use]
    pub fn tags(&self) -> BTreeSet<&str> {
        self.items
            .iter()
            .flat_map(|item| item.tags().iter().map(String::as_str))
            .collect()
    }
}
