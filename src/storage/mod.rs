//! Storage layer: where catalog snapshots come from.
//!
//! # Modules
//!
//! - `backend`: The [`CatalogSource`] trait
//! - `json`: One JSON file per variant, bare array or API envelope
//! - `memory`: Items held in memory, for tests and embedding

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::CatalogSource;
pub use json::JsonCatalog;
pub use memory::MemoryCatalog;
