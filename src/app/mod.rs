//! Application layer coordinating screen state, events, and actions.
//!
//! This layer sits between the runtime (main.rs) and the domain/query layers. One
//! [`AppState`] backs one catalog screen; the session [`CartState`](crate::domain::CartState)
//! is passed alongside it so that filter changes can never reach the cart.
//!
//! # Architecture
//!
//! ```text
//! Input → Event → handle_event → state/cart mutations → Actions → runtime
//!                      ↑                                              │
//!                      └──────────── CatalogReloaded ─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Requests emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode state machine types
//! - [`state`]: Screen state and view model computation
//!
//! # Example
//!
//! ```rust
//! use healthconnect::app::{handle_event, AppState, Event};
//! use healthconnect::domain::{CartState, RecordStore, Variant};
//! use healthconnect::query::FilterCriteria;
//!
//! let mut state = AppState::new(RecordStore::new(Variant::Medicines, vec![])?, FilterCriteria::default());
//! let mut cart = CartState::new();
//! let (_, actions) = handle_event(&mut state, &mut cart, &Event::Quit)?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), healthconnect::CatalogError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::{Action, ConsultKind};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, SearchFocus};
pub use state::AppState;
