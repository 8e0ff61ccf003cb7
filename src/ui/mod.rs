//! User interface layer: view models and a plain-text renderer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → impl Write
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready types for one catalog screen
//! - [`renderer`]: Writes a view model as text
//! - [`helpers`]: Money formatting and search match highlighting

pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use renderer::render;
pub use viewmodel::{DisplayItem, EmptyState, FilterSummary, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
