//! Screen controller state and view model computation.
//!
//! [`AppState`] is the single source of truth for one catalog screen: the record
//! store snapshot, the active [`FilterCriteria`], the derived result list and the
//! cursor. Derived state is only refreshed by an explicit [`AppState::recompute`]
//! call; mutating `criteria` directly has no effect on `results` until then.
//!
//! The cart is deliberately not part of this struct. It belongs to the session and
//! is passed alongside, so changing filters can never reset it.
//!
//! # Example
//!
//! ```rust
//! use healthconnect::app::AppState;
//! use healthconnect::domain::{CartState, RecordStore, SortKey, Variant};
//! use healthconnect::query::FilterCriteria;
//!
//! let store = RecordStore::new(Variant::Doctors, vec![])?;
//! let mut state = AppState::new(store, FilterCriteria::sorted_by(Some(SortKey::Distance)));
//! state.criteria.flag_required = true;
//! state.recompute();
//! let viewmodel = state.compute_viewmodel(&CartState::new(), 24);
//! assert!(viewmodel.display_items.is_empty());
//! # Ok::<(), healthconnect::CatalogError>(())
//! ```

use super::modes::{InputMode, SearchFocus};
use crate::domain::{CartState, CatalogItem, ItemId, RecordStore, Variant};
use crate::query::{self, FilterCriteria};
use crate::ui::helpers::{format_money, substring_ranges};
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FilterSummary, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel,
};

/// Rows taken by header, filter line, borders and footer.
const CHROME_ROWS: usize = 7;

/// Extra rows taken by the search bar.
const SEARCH_BAR_ROWS: usize = 2;

/// Rows one result occupies (name line + detail line).
const ROWS_PER_ITEM: usize = 2;

/// State of one catalog screen.
#[derive(Debug, Clone)]
pub struct AppState {
    store: RecordStore,

    /// Active filter and sort selections. Call [`recompute`](Self::recompute) after
    /// changing them.
    pub criteria: FilterCriteria,

    /// Ids of the filtered, sorted items, in display order.
    results: Vec<ItemId>,

    /// Zero-based cursor into `results`; clamped on every recompute.
    selected_index: usize,

    pub input_mode: InputMode,
}

impl AppState {
    /// Creates a screen over `store` and evaluates `criteria` once.
    #[must_use]
    pub fn new(store: RecordStore, criteria: FilterCriteria) -> Self {
        let mut state = Self {
            store,
            criteria,
            results: vec![],
            selected_index: 0,
            input_mode: InputMode::Normal,
        };
        state.recompute();
        state
    }

    #[must_use]
    pub const fn store(&self) -> &RecordStore {
        &self.store
    }

    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.store.variant()
    }

    /// Ids of the current results, in display order.
    #[must_use]
    pub fn result_ids(&self) -> &[ItemId] {
        &self.results
    }

    /// The current results, in display order.
    #[must_use]
    pub fn results(&self) -> Vec<&CatalogItem> {
        self.results.iter().filter_map(|&id| self.store.get(id)).collect()
    }

    /// Re-runs the filter pipeline and sort stage over the whole record store.
    ///
    /// The cursor stays on the previously selected item when it survives the new
    /// criteria; otherwise it is clamped into range.
    pub fn recompute(&mut self) {
        let _span = tracing::debug_span!("recompute",
            variant = %self.store.variant(),
            total_items = self.store.len(),
            query_len = self.criteria.search_term.len()
        )
        .entered();

        let previous = self.results.get(self.selected_index).copied();

        self.results = query::run(self.store.items(), &self.criteria)
            .into_iter()
            .map(CatalogItem::id)
            .collect();

        self.selected_index = previous
            .and_then(|id| self.results.iter().position(|&r| r == id))
            .unwrap_or_else(|| self.selected_index.min(self.results.len().saturating_sub(1)));

        tracing::debug!(result_count = self.results.len(), "results recomputed");
    }

    /// Replaces the criteria wholesale and recomputes.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    /// Swaps in a new catalog snapshot (for example after a reload) and recomputes.
    pub fn replace_store(&mut self, store: RecordStore) {
        tracing::debug!(old = self.store.len(), new = store.len(), "record store replaced");
        self.store = store;
        self.recompute();
    }

    /// Moves the cursor down one result, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.results.len();
    }

    /// Moves the cursor up one result, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.results.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.results.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Zero-based cursor into the current results.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Moves the cursor to `index`, clamped to the last result.
    pub fn select(&mut self, index: usize) {
        self.selected_index = index.min(self.results.len().saturating_sub(1));
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&CatalogItem> {
        self.results
            .get(self.selected_index)
            .and_then(|&id| self.store.get(id))
    }

    /// Computes a renderable view model for a viewport `rows` lines tall.
    ///
    /// Only the window of results around the cursor that fits the viewport is
    /// included; `selected_index` in the view model is relative to that window.
    #[must_use]
    pub fn compute_viewmodel(&self, cart: &CartState, rows: usize) -> UIViewModel {
        let visible = self.calculate_visible_items(rows);
        let total = self.results.len();

        let mut start = self.selected_index.saturating_sub(visible / 2);
        let end = (start + visible).min(total);
        if end - start < visible && total >= visible {
            start = end.saturating_sub(visible);
        }

        let display_items = self.results[start..end]
            .iter()
            .enumerate()
            .filter_map(|(offset, &id)| {
                self.store
                    .get(id)
                    .map(|item| self.compute_display_item(item, start + offset, cart))
            })
            .collect();

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            filters: self.compute_filter_summary(),
            display_items,
            selected_index: self.selected_index.saturating_sub(start),
            empty_state: self.compute_empty_state(),
            footer: self.compute_footer(cart),
        }
    }

    fn compute_display_item(&self, item: &CatalogItem, absolute_idx: usize, cart: &CartState) -> DisplayItem {
        let highlight_ranges = if self.criteria.search_term.is_empty() {
            vec![]
        } else {
            substring_ranges(item.name(), &self.criteria.search_term)
        };

        let (detail, price, badges) = match item {
            CatalogItem::Doctor(d) => {
                let mut detail = format!(
                    "★ {:.1} ({}) · {} yrs · {:.1} mi",
                    d.rating, d.reviews, d.experience, d.distance
                );
                if !d.next_available.is_empty() {
                    detail.push_str(&format!(" · next: {}", d.next_available));
                }
                let badges = if d.available_today {
                    vec!["available today".to_string()]
                } else {
                    vec![]
                };
                (detail, format_money(d.consultation_fee), badges)
            }
            CatalogItem::Medicine(m) => {
                let detail = format!("★ {:.1} ({}) · {}", m.rating, m.reviews, m.manufacturer);
                let price = match m.original_price {
                    Some(original) if original > m.price => {
                        format!("{} (was {})", format_money(m.price), format_money(original))
                    }
                    _ => format_money(m.price),
                };
                let mut badges = vec![];
                if m.prescription_required {
                    badges.push("Rx".to_string());
                }
                if !m.in_stock {
                    badges.push("out of stock".to_string());
                }
                (detail, price, badges)
            }
        };

        DisplayItem {
            id: item.id(),
            name: item.name().to_string(),
            subtitle: item.subtitle(),
            detail,
            price,
            badges,
            cart_quantity: cart.quantity(item.id()),
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: format!(
                " {} ({} of {}) ",
                self.variant().title(),
                self.results.len(),
                self.store.len()
            ),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.criteria.search_term.clone(),
                is_typing: focus == SearchFocus::Typing,
            }),
            InputMode::Normal => None,
        }
    }

    fn compute_filter_summary(&self) -> FilterSummary {
        let variant = self.variant();
        FilterSummary {
            category: match &self.criteria.category {
                query::CategoryFilter::All => variant.all_category_label().to_string(),
                query::CategoryFilter::Only(category) => category.clone(),
            },
            tags: self.criteria.selected_tags.iter().cloned().collect(),
            flag: self
                .criteria
                .flag_required
                .then(|| variant.flag_label().to_string()),
            sort: self
                .criteria
                .sort_key
                .map_or_else(|| "relevance".to_string(), |key| key.to_string()),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        let noun = self.variant().item_noun();
        if self.store.is_empty() {
            Some(EmptyState {
                message: format!("No {noun} records loaded"),
            })
        } else if self.results.is_empty() {
            Some(EmptyState {
                message: format!("No {noun} matches the current filters"),
            })
        } else {
            None
        }
    }

    fn compute_footer(&self, cart: &CartState) -> FooterInfo {
        let keybindings = match (self.input_mode, self.variant()) {
            (InputMode::Search(SearchFocus::Typing), _) => {
                "ESC: exit search  Enter: results  Type to filter".to_string()
            }
            (InputMode::Search(SearchFocus::Navigating), _) => {
                "ESC: exit search  /: edit query  j/k: navigate  +/-: cart".to_string()
            }
            (InputMode::Normal, Variant::Doctors) => {
                "j/k: navigate  /: search  b: book  v: video consult  q: quit".to_string()
            }
            (InputMode::Normal, Variant::Medicines) => {
                "j/k: navigate  /: search  +/-: cart  c: checkout  q: quit".to_string()
            }
        };

        let count = cart.item_count();
        let cart_summary = format!(
            "{count} {} in cart · {}",
            if count == 1 { "item" } else { "items" },
            format_money(cart.total(|id| self.store.price_of(id)))
        );

        FooterInfo {
            cart_summary,
            keybindings,
        }
    }

    /// Number of results that fit in `total_rows` after the screen chrome.
    const fn calculate_visible_items(&self, total_rows: usize) -> usize {
        let chrome = match self.input_mode {
            InputMode::Normal => CHROME_ROWS,
            InputMode::Search(_) => CHROME_ROWS + SEARCH_BAR_ROWS,
        };
        let rows = total_rows.saturating_sub(chrome) / ROWS_PER_ITEM;
        if rows == 0 {
            1
        } else {
            rows
        }
    }
}
