//! Checkout order drafts.
//!
//! An [`OrderDraft`] is the snapshot of a cart at checkout time, priced against the
//! record store the cart was filled from. It is handed to whatever places orders;
//! nothing here charges or reserves anything.

use crate::domain::cart::CartState;
use crate::domain::item::{CatalogItem, ItemId};
use crate::domain::store::RecordStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a freshly drafted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub item_id: ItemId,
    /// Empty when the id is no longer in the catalog snapshot.
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub line_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    /// `ORD` followed by the creation time in Unix milliseconds.
    pub order_number: String,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    /// Unix timestamp (seconds).
    pub created_at: i64,
    pub lines: Vec<OrderLine>,
    pub total: f64,
    /// Lines that need a prescription uploaded before the order can ship.
    pub prescription_items: Vec<ItemId>,
}

impl OrderDraft {
    /// Prices every cart entry against `store`.
    ///
    /// Entries whose id is missing from the store are kept with a unit price of 0,
    /// matching how [`CartState::total`] treats them.
    ///
    /// # Examples
    ///
    /// ```
    /// use healthconnect::domain::{CartState, OrderDraft, RecordStore, Variant};
    ///
    /// let store = RecordStore::new(Variant::Medicines, vec![])?;
    /// let draft = OrderDraft::from_cart(&CartState::new(), &store, chrono::Utc::now());
    /// assert!(draft.lines.is_empty());
    /// assert!(draft.order_number.starts_with("ORD"));
    /// # Ok::<(), healthconnect::CatalogError>(())
    /// ```
    #[must_use]
    pub fn from_cart(cart: &CartState, store: &RecordStore, now: DateTime<Utc>) -> Self {
        let lines: Vec<OrderLine> = cart
            .lines()
            .map(|(item_id, quantity)| {
                let item = store.get(item_id);
                let unit_price = item.map_or(0.0, CatalogItem::price);
                OrderLine {
                    item_id,
                    name: item.map(|i| i.name().to_string()).unwrap_or_default(),
                    unit_price,
                    quantity,
                    line_total: unit_price * f64::from(quantity),
                }
            })
            .collect();

        let prescription_items = cart
            .lines()
            .filter_map(|(id, _)| store.get(id))
            .filter(|item| matches!(item, CatalogItem::Medicine(m) if m.prescription_required))
            .map(CatalogItem::id)
            .collect();

        let total = cart.total(|id| store.price_of(id));

        tracing::debug!(lines = lines.len(), total, "order draft built");

        Self {
            order_number: format!("ORD{}", now.timestamp_millis()),
            order_status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            created_at: now.timestamp(),
            lines,
            total,
            prescription_items,
        }
    }

    #[must_use]
    pub fn requires_prescription(&self) -> bool {
        !self.prescription_items.is_empty()
    }
}
