//! Event handling and state transition logic.
//!
//! [`handle_event`] takes one discrete UI event, mutates the screen state and the
//! session cart, re-evaluates the query when the criteria changed, and returns the
//! side effects for the runtime to execute. Every event runs to completion before
//! the next one is handled; there is no hidden re-evaluation anywhere else.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`
//! - **Search input**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`,
//!   `Char`, `Backspace`, `Escape`, `SetSearchTerm`
//! - **Criteria**: `SelectCategory`, `SetTag`, `ClearTags`, `SetFlagRequired`,
//!   `SetSortKey`, `ResetFilters`
//! - **Cart**: `AddToCart`, `RemoveFromCart`, `AddSelected`, `RemoveSelected`, `ClearCart`
//! - **Requests**: `BookSelected`, `Checkout`, `Quit`
//! - **Data**: `CatalogReloaded`
//!
//! # Example
//!
//! ```rust
//! use healthconnect::app::{handle_event, AppState, Event};
//! use healthconnect::domain::{CartState, RecordStore, Variant};
//! use healthconnect::query::FilterCriteria;
//!
//! let mut state = AppState::new(RecordStore::new(Variant::Doctors, vec![])?, FilterCriteria::default());
//! let mut cart = CartState::new();
//! let (rerender, actions) = handle_event(&mut state, &mut cart, &Event::KeyDown)?;
//! assert!(rerender);
//! assert!(actions.is_empty());
//! # Ok::<(), healthconnect::CatalogError>(())
//! ```

use super::actions::{Action, ConsultKind};
use super::modes::{InputMode, SearchFocus};
use super::state::AppState;
use crate::domain::error::Result;
use crate::domain::{CartState, CatalogItem, ItemId, OrderDraft, RecordStore, Variant};
use crate::query::{resolve_sort_key, CategoryFilter};

/// Discrete events from the UI or the data layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Moves the cursor down one result (wraps to top).
    KeyDown,
    /// Moves the cursor up one result (wraps to bottom).
    KeyUp,
    /// Leaves the screen.
    Quit,

    /// Opens the search bar with an empty term.
    SearchMode,
    /// Focuses the search input (from navigating).
    FocusSearchBar,
    /// Focuses the results list (from typing).
    FocusResults,
    /// Closes the search bar and clears the term.
    ExitSearch,
    /// Appends a character to the search term (search mode only).
    Char(char),
    /// Removes the last character of the search term (search mode only).
    Backspace,
    /// Same as `ExitSearch`, from any mode.
    Escape,
    /// Replaces the whole search term, as a text field's change event does.
    SetSearchTerm(String),

    /// Picks a category by its label; the variant's "All ..." label selects all.
    SelectCategory(String),
    /// Checks or unchecks one tag.
    SetTag {
        tag: String,
        selected: bool,
    },
    ClearTags,
    SetFlagRequired(bool),
    /// Picks a sort key by name; unknown names keep the current order.
    SetSortKey(String),
    /// Clears every filter, keeping the sort.
    ResetFilters,

    AddToCart(ItemId),
    RemoveFromCart(ItemId),
    /// Adds one unit of the item under the cursor.
    AddSelected,
    /// Removes one unit of the item under the cursor.
    RemoveSelected,
    ClearCart,

    /// Requests an appointment with the doctor under the cursor.
    BookSelected {
        consult: ConsultKind,
    },
    /// Drafts an order from the cart.
    Checkout,

    /// A fresh catalog snapshot arrived from the record store provider.
    CatalogReloaded {
        items: Vec<CatalogItem>,
    },
}

/// Processes an event, mutates state, and returns the actions to execute.
///
/// The returned `bool` tells the runtime whether the view needs re-rendering.
///
/// # Errors
///
/// Only `CatalogReloaded` can fail: when the new snapshot has duplicate ids or
/// foreign-variant items it is rejected and the current store stays in place.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, cart: &mut CartState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", variant = %state.variant(), event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::Quit => Ok((false, vec![Action::Close])),
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.criteria.search_term.clear();
            state.recompute();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.criteria.search_term.is_empty() {
                state.input_mode = InputMode::Normal;
                return Ok((true, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch | Event::Escape => {
            tracing::debug!(query = %state.criteria.search_term, "exiting search mode");
            state.input_mode = InputMode::Normal;
            state.criteria.search_term.clear();
            state.recompute();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !matches!(state.input_mode, InputMode::Search(SearchFocus::Typing)) {
                return Ok((false, vec![]));
            }
            state.criteria.search_term.push(*c);
            tracing::trace!(query = %state.criteria.search_term, char = %c, "search term updated");
            state.recompute();
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !matches!(state.input_mode, InputMode::Search(SearchFocus::Typing)) {
                return Ok((false, vec![]));
            }
            state.criteria.search_term.pop();
            state.recompute();
            Ok((true, vec![]))
        }
        Event::SetSearchTerm(term) => {
            if &state.criteria.search_term == term {
                return Ok((false, vec![]));
            }
            state.criteria.search_term.clone_from(term);
            state.recompute();
            Ok((true, vec![]))
        }
        Event::SelectCategory(label) => {
            let category = CategoryFilter::from_label(label, state.variant());
            tracing::debug!(?category, "category selected");
            state.criteria.category = category;
            state.recompute();
            Ok((true, vec![]))
        }
        Event::SetTag { tag, selected } => {
            state.criteria.set_tag(tag, *selected);
            state.recompute();
            Ok((true, vec![]))
        }
        Event::ClearTags => {
            state.criteria.selected_tags.clear();
            state.recompute();
            Ok((true, vec![]))
        }
        Event::SetFlagRequired(required) => {
            state.criteria.flag_required = *required;
            state.recompute();
            Ok((true, vec![]))
        }
        Event::SetSortKey(name) => {
            state.criteria.sort_key = resolve_sort_key(name);
            state.recompute();
            Ok((true, vec![]))
        }
        Event::ResetFilters => {
            state.criteria.clear_filters();
            state.input_mode = InputMode::Normal;
            state.recompute();
            Ok((true, vec![]))
        }
        Event::AddToCart(id) => Ok((add_to_cart(state, cart, *id), vec![])),
        Event::RemoveFromCart(id) => {
            if !cart.contains(*id) {
                return Ok((false, vec![]));
            }
            cart.remove(*id);
            Ok((true, vec![]))
        }
        Event::AddSelected => {
            let Some(id) = state.selected_item().map(CatalogItem::id) else {
                tracing::debug!("no item selected");
                return Ok((false, vec![]));
            };
            Ok((add_to_cart(state, cart, id), vec![]))
        }
        Event::RemoveSelected => {
            let Some(id) = state.selected_item().map(CatalogItem::id) else {
                tracing::debug!("no item selected");
                return Ok((false, vec![]));
            };
            if !cart.contains(id) {
                return Ok((false, vec![]));
            }
            cart.remove(id);
            Ok((true, vec![]))
        }
        Event::ClearCart => {
            if cart.is_empty() {
                return Ok((false, vec![]));
            }
            cart.clear();
            Ok((true, vec![]))
        }
        Event::BookSelected { consult } => match state.selected_item() {
            Some(CatalogItem::Doctor(doctor)) => {
                tracing::debug!(doctor_id = %doctor.id, ?consult, "booking requested");
                Ok((false, vec![Action::BookAppointment {
                    doctor_id: doctor.id,
                    doctor_name: doctor.name.clone(),
                    slot: doctor.next_available.clone(),
                    consult: *consult,
                }]))
            }
            Some(CatalogItem::Medicine(_)) | None => {
                tracing::debug!("no doctor selected to book");
                Ok((false, vec![]))
            }
        },
        Event::Checkout => {
            if state.variant() != Variant::Medicines {
                tracing::debug!(variant = %state.variant(), "checkout outside the medicine store ignored");
                return Ok((false, vec![]));
            }
            if cart.is_empty() {
                tracing::debug!("checkout with empty cart ignored");
                return Ok((false, vec![]));
            }
            let draft = OrderDraft::from_cart(cart, state.store(), chrono::Utc::now());
            tracing::debug!(
                order_number = %draft.order_number,
                total = draft.total,
                requires_prescription = draft.requires_prescription(),
                "checkout requested"
            );
            Ok((false, vec![Action::PlaceOrder(draft)]))
        }
        Event::CatalogReloaded { items } => {
            let store = RecordStore::new(state.variant(), items.clone())?;
            if store.items() == state.store().items() {
                tracing::debug!("catalog unchanged, skipping render");
                return Ok((false, vec![]));
            }
            state.replace_store(store);
            Ok((true, vec![]))
        }
    }
}

/// Adds one unit unless the item is a medicine that is out of stock and not yet in
/// the cart. Returns whether the cart changed.
fn add_to_cart(state: &AppState, cart: &mut CartState, id: ItemId) -> bool {
    if let Some(item) = state.store().get(id) {
        if !item.in_stock() && !cart.contains(id) {
            tracing::debug!(%id, "out of stock, not added");
            return false;
        }
    }
    cart.add(id);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Doctor, Medicine, SortKey, Variant};
    use crate::query::FilterCriteria;

    fn medicine(id: u64, category: &str, price: f64, in_stock: bool) -> CatalogItem {
        CatalogItem::Medicine(Medicine {
            id: ItemId(id),
            name: format!("Medicine {id}"),
            generic_name: String::new(),
            manufacturer: String::new(),
            price,
            original_price: None,
            category: category.to_string(),
            in_stock,
            quantity: 1,
            rating: 4.0,
            reviews: 0,
            prescription_required: id == 2,
            description: String::new(),
            dosage: String::new(),
            side_effects: vec![],
            contraindications: vec![],
        })
    }

    fn store_screen() -> AppState {
        let store = RecordStore::new(
            Variant::Medicines,
            vec![
                medicine(1, "Pain Relief", 12.99, true),
                medicine(2, "Antibiotics", 24.99, true),
                medicine(3, "Vitamins", 18.99, false),
            ],
        )
        .unwrap();
        AppState::new(store, FilterCriteria::default())
    }

    fn ids(state: &AppState) -> Vec<u64> {
        state.result_ids().iter().map(|id| id.0).collect()
    }

    #[test]
    fn typing_filters_only_in_search_mode() {
        let mut state = store_screen();
        let mut cart = CartState::new();

        let (rerender, _) = handle_event(&mut state, &mut cart, &Event::Char('2')).unwrap();
        assert!(!rerender);
        assert_eq!(ids(&state), vec![1, 2, 3]);

        handle_event(&mut state, &mut cart, &Event::SearchMode).unwrap();
        handle_event(&mut state, &mut cart, &Event::Char('2')).unwrap();
        assert_eq!(ids(&state), vec![2]);

        handle_event(&mut state, &mut cart, &Event::Backspace).unwrap();
        assert_eq!(ids(&state), vec![1, 2, 3]);

        handle_event(&mut state, &mut cart, &Event::Char('3')).unwrap();
        handle_event(&mut state, &mut cart, &Event::Escape).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(ids(&state), vec![1, 2, 3]);
    }

    #[test]
    fn focus_results_with_empty_term_leaves_search() {
        let mut state = store_screen();
        let mut cart = CartState::new();
        handle_event(&mut state, &mut cart, &Event::SearchMode).unwrap();
        handle_event(&mut state, &mut cart, &Event::FocusResults).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);

        handle_event(&mut state, &mut cart, &Event::SearchMode).unwrap();
        handle_event(&mut state, &mut cart, &Event::Char('m')).unwrap();
        handle_event(&mut state, &mut cart, &Event::FocusResults).unwrap();
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));
    }

    #[test]
    fn filter_changes_never_touch_the_cart() {
        let mut state = store_screen();
        let mut cart = CartState::new();
        handle_event(&mut state, &mut cart, &Event::AddToCart(ItemId(1))).unwrap();
        handle_event(&mut state, &mut cart, &Event::AddToCart(ItemId(2))).unwrap();
        let before = cart.clone();

        for event in [
            Event::SelectCategory("Vitamins".to_string()),
            Event::SetFlagRequired(true),
            Event::SetSortKey("price".to_string()),
            Event::SetSearchTerm("nothing matches".to_string()),
            Event::ResetFilters,
            Event::SelectCategory("All Categories".to_string()),
        ] {
            handle_event(&mut state, &mut cart, &event).unwrap();
        }

        assert_eq!(cart, before);
        assert_eq!(ids(&state), vec![1, 3, 2]);
    }

    #[test]
    fn unknown_sort_key_keeps_store_order() {
        let mut state = store_screen();
        let mut cart = CartState::new();
        handle_event(&mut state, &mut cart, &Event::SetSortKey("price".to_string())).unwrap();
        assert_eq!(state.criteria.sort_key, Some(SortKey::Price));
        assert_eq!(ids(&state), vec![1, 3, 2]);

        handle_event(&mut state, &mut cart, &Event::SetSortKey("popularity".to_string())).unwrap();
        assert_eq!(state.criteria.sort_key, None);
        assert_eq!(ids(&state), vec![1, 2, 3]);
    }

    #[test]
    fn out_of_stock_items_cannot_be_added_fresh() {
        let mut state = store_screen();
        let mut cart = CartState::new();

        let (changed, _) = handle_event(&mut state, &mut cart, &Event::AddToCart(ItemId(3))).unwrap();
        assert!(!changed);
        assert!(cart.is_empty());

        // ids outside the snapshot are the core's business, not the screen's
        handle_event(&mut state, &mut cart, &Event::AddToCart(ItemId(99))).unwrap();
        assert_eq!(cart.quantity(ItemId(99)), 1);
    }

    #[test]
    fn selected_item_cart_round_trip() {
        let mut state = store_screen();
        let mut cart = CartState::new();
        handle_event(&mut state, &mut cart, &Event::KeyDown).unwrap();
        handle_event(&mut state, &mut cart, &Event::AddSelected).unwrap();
        handle_event(&mut state, &mut cart, &Event::AddSelected).unwrap();
        assert_eq!(cart.quantity(ItemId(2)), 2);

        handle_event(&mut state, &mut cart, &Event::RemoveSelected).unwrap();
        handle_event(&mut state, &mut cart, &Event::RemoveSelected).unwrap();
        let (changed, _) = handle_event(&mut state, &mut cart, &Event::RemoveSelected).unwrap();
        assert!(!changed);
        assert!(cart.is_empty());
    }

    #[test]
    fn checkout_drafts_order_from_cart() {
        let mut state = store_screen();
        let mut cart = CartState::new();

        let (_, actions) = handle_event(&mut state, &mut cart, &Event::Checkout).unwrap();
        assert!(actions.is_empty());

        cart.add(ItemId(1));
        cart.add(ItemId(2));
        let (_, actions) = handle_event(&mut state, &mut cart, &Event::Checkout).unwrap();
        let [Action::PlaceOrder(draft)] = actions.as_slice() else {
            panic!("expected a single PlaceOrder action, got {actions:?}");
        };
        assert!((draft.total - 37.98).abs() < 1e-9);
        assert_eq!(draft.prescription_items, vec![ItemId(2)]);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn booking_needs_a_selected_doctor() {
        let mut cart = CartState::new();
        let mut medicines = store_screen();
        let (_, actions) = handle_event(
            &mut medicines,
            &mut cart,
            &Event::BookSelected { consult: ConsultKind::InPerson },
        )
        .unwrap();
        assert!(actions.is_empty());

        let doctor = CatalogItem::Doctor(Doctor {
            id: ItemId(7),
            name: "Dr. Emily Rodriguez".to_string(),
            specialty: "Pediatrician".to_string(),
            rating: 4.7,
            reviews: 89,
            experience: 15,
            location: String::new(),
            distance: 3.1,
            consultation_fee: 100.0,
            available_today: true,
            accepts_insurance: vec![],
            next_available: "Today 5:30 PM".to_string(),
            languages: vec![],
        });
        let mut doctors = AppState::new(
            RecordStore::new(Variant::Doctors, vec![doctor]).unwrap(),
            FilterCriteria::default(),
        );
        let (_, actions) = handle_event(
            &mut doctors,
            &mut cart,
            &Event::BookSelected { consult: ConsultKind::Video },
        )
        .unwrap();
        assert_eq!(
            actions,
            vec![Action::BookAppointment {
                doctor_id: ItemId(7),
                doctor_name: "Dr. Emily Rodriguez".to_string(),
                slot: "Today 5:30 PM".to_string(),
                consult: ConsultKind::Video,
            }]
        );
    }

    #[test]
    fn reload_keeps_cart_and_rejects_bad_snapshots() {
        let mut state = store_screen();
        let mut cart = CartState::new();
        cart.add(ItemId(1));

        let items = vec![medicine(1, "Pain Relief", 10.0, true), medicine(4, "Vitamins", 3.0, true)];
        let (rerender, _) =
            handle_event(&mut state, &mut cart, &Event::CatalogReloaded { items: items.clone() }).unwrap();
        assert!(rerender);
        assert_eq!(ids(&state), vec![1, 4]);
        assert_eq!(cart.quantity(ItemId(1)), 1);

        let (rerender, _) = handle_event(&mut state, &mut cart, &Event::CatalogReloaded { items }).unwrap();
        assert!(!rerender);

        let duplicated = vec![medicine(5, "Vitamins", 1.0, true), medicine(5, "Vitamins", 1.0, true)];
        assert!(handle_event(&mut state, &mut cart, &Event::CatalogReloaded { items: duplicated }).is_err());
        assert_eq!(ids(&state), vec![1, 4]);
    }

    #[test]
    fn reload_with_new_prices_rerenders() {
        let mut state = store_screen();
        let mut cart = CartState::new();
        cart.add(ItemId(1));

        let items = vec![
            medicine(1, "Pain Relief", 99.0, true),
            medicine(2, "Antibiotics", 24.99, true),
            medicine(3, "Vitamins", 18.99, false),
        ];
        let (rerender, _) = handle_event(&mut state, &mut cart, &Event::CatalogReloaded { items }).unwrap();
        assert!(rerender);
        assert_eq!(ids(&state), vec![1, 2, 3]);

        let vm = state.compute_viewmodel(&cart, 24);
        assert_eq!(vm.display_items[0].price, "$99.00");
        assert_eq!(vm.footer.cart_summary, "1 item in cart · $99.00");
    }

    #[test]
    fn checkout_only_runs_in_the_medicine_store() {
        let mut doctors = AppState::new(
            RecordStore::new(Variant::Doctors, vec![]).unwrap(),
            FilterCriteria::default(),
        );
        let mut cart = CartState::new();
        cart.add(ItemId(7));

        let (rerender, actions) = handle_event(&mut doctors, &mut cart, &Event::Checkout).unwrap();
        assert!(!rerender);
        assert!(actions.is_empty());
        assert_eq!(cart.quantity(ItemId(7)), 1);
    }
}
