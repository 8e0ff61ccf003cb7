//! Domain layer for the HealthConnect catalog core.
//!
//! This module contains the catalog types and session state, independent of how
//! catalogs are loaded or how results are rendered.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Doctor and medicine records behind the uniform [`CatalogItem`] shape
//! - [`store`]: Immutable per-session [`RecordStore`] snapshot
//! - [`cart`]: Per-session [`CartState`]
//! - [`order`]: Checkout [`OrderDraft`] built from a cart
//!
//! # Examples
//!
//! ```
//! use healthconnect::domain::{CartState, ItemId, RecordStore, Result, Variant};
//!
//! fn empty_session() -> Result<(RecordStore, CartState)> {
//!     Ok((RecordStore::new(Variant::Doctors, vec![])?, CartState::new()))
//! }
//! # empty_session().unwrap();
//! ```

pub mod cart;
pub mod error;
pub mod item;
pub mod order;
pub mod store;

pub use cart::CartState;
pub use error::{CatalogError, Result};
pub use item::{CatalogItem, Doctor, ItemId, Medicine, SortKey, Variant};
pub use order::{OrderDraft, OrderLine, OrderStatus, PaymentStatus};
pub use store::RecordStore;
