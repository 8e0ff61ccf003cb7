//! Per-session selection/cart state.
//!
//! [`CartState`] maps item ids to a quantity of at least one. An entry exists exactly
//! while its quantity is positive: decrementing the last unit deletes it, so zero or
//! negative quantities are never stored. The cart is owned by the session, not by a
//! screen, and is untouched by filter or sort changes.

use crate::domain::item::ItemId;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    entries: BTreeMap<ItemId, u32>,
}

impl CartState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `id`, creating the entry at 1 when absent.
    ///
    /// ```
    /// use healthconnect::domain::{CartState, ItemId};
    ///
    /// let mut cart = CartState::new();
    /// cart.add(ItemId(5));
    /// cart.add(ItemId(5));
    /// assert_eq!(cart.quantity(ItemId(5)), 2);
    /// ```
    pub fn add(&mut self, id: ItemId) {
        let quantity = self.entries.entry(id).or_insert(0);
        *quantity = quantity.saturating_add(1);
        tracing::trace!(%id, quantity = *quantity, "cart add");
    }

    /// Removes one unit of `id`; the entry is deleted when its last unit goes.
    ///
    /// Removing an id that is not in the cart does nothing.
    pub fn remove(&mut self, id: ItemId) {
        let Some(quantity) = self.entries.get_mut(&id) else {
            tracing::trace!(%id, "cart remove on absent id ignored");
            return;
        };

        if *quantity > 1 {
            *quantity -= 1;
            tracing::trace!(%id, quantity = *quantity, "cart remove");
        } else {
            self.entries.remove(&id);
            tracing::trace!(%id, "cart entry dropped");
        }
    }

    /// Sum of `quantity × price` over all entries.
    ///
    /// Ids the lookup cannot price contribute nothing.
    ///
    /// ```
    /// use healthconnect::domain::{CartState, ItemId};
    ///
    /// let mut cart = CartState::new();
    /// cart.add(ItemId(1));
    /// cart.add(ItemId(1));
    /// cart.add(ItemId(2));
    /// let total = cart.total(|id| (id == ItemId(1)).then_some(2.5));
    /// assert!((total - 5.0).abs() < f64::EPSILON);
    /// ```
    pub fn total<F>(&self, price_lookup: F) -> f64
    where
        F: Fn(ItemId) -> Option<f64>,
    {
        self.entries
            .iter()
            .map(|(&id, &quantity)| price_lookup(id).unwrap_or(0.0) * f64::from(quantity))
            .sum()
    }

    /// Total number of units across all entries (the "cart size").
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.entries.values().map(|&quantity| u64::from(quantity)).sum()
    }

    /// Quantity held for `id`, 0 when absent.
    #[must_use]
    pub fn quantity(&self, id: ItemId) -> u32 {
        self.entries.get(&id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of distinct ids in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(id, quantity)` pairs in ascending id order.
    pub fn lines(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.entries.iter().map(|(&id, &quantity)| (id, quantity))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
