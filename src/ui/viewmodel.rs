//! View model types representing a renderable catalog screen.
//!
//! View models are computed by [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. They carry display-ready strings only; prices are
//! already formatted and highlight ranges already resolved.
//!
//! # Example
//!
//! ```rust
//! use healthconnect::domain::ItemId;
//! use healthconnect::ui::viewmodel::{DisplayItem, FilterSummary, FooterInfo, HeaderInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Medicine Store (1 of 1) ".to_string() },
//!     search_bar: None,
//!     filters: FilterSummary {
//!         category: "All Categories".to_string(),
//!         tags: vec![],
//!         flag: None,
//!         sort: "price".to_string(),
//!     },
//!     display_items: vec![DisplayItem {
//!         id: ItemId(1),
//!         name: "Paracetamol 500mg".to_string(),
//!         subtitle: "Acetaminophen · Pain Relief".to_string(),
//!         detail: "★ 4.5 (234) · PharmaCorp".to_string(),
//!         price: "$12.99".to_string(),
//!         badges: vec![],
//!         cart_quantity: 0,
//!         is_selected: true,
//!         highlight_ranges: vec![(0, 4)],
//!     }],
//!     selected_index: 0,
//!     empty_state: None,
//!     footer: FooterInfo {
//!         cart_summary: "0 items in cart · $0.00".to_string(),
//!         keybindings: "q: quit".to_string(),
//!     },
//! };
//! assert_eq!(vm.display_items.len(), 1);
//! ```

use crate::domain::ItemId;

/// Complete view model for one catalog screen.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Present while the search bar is open.
    pub search_bar: Option<SearchBarInfo>,

    /// Current filter and sort selections, in words.
    pub filters: FilterSummary,

    /// The window of results that fits the viewport.
    pub display_items: Vec<DisplayItem>,

    /// Index of the cursor within `display_items`.
    pub selected_index: usize,

    /// Present when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    pub footer: FooterInfo,
}

/// One result row.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub id: ItemId,
    pub name: String,
    /// Specialty for doctors, generic name and category for medicines.
    pub subtitle: String,
    /// Rating line with variant-specific extras.
    pub detail: String,
    /// Consultation fee or unit price, formatted.
    pub price: String,
    /// Short markers such as "Rx" or "available today".
    pub badges: Vec<String>,
    /// Units of this item in the session cart.
    pub cart_quantity: u32,
    pub is_selected: bool,

    /// Character ranges of `name` matching the search term.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Whether keystrokes currently go into the query.
    pub is_typing: bool,
}

/// Filter and sort selections as shown above the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSummary {
    pub category: String,
    pub tags: Vec<String>,
    /// Label of the flag filter when it is on.
    pub flag: Option<String>,
    pub sort: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Item count and cart total, e.g. "2 items in cart · $25.98".
    pub cart_summary: String,
    pub keybindings: String,
}
