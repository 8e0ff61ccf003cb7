//! Input mode state types for a catalog screen.
//!
//! A screen is either in **Normal** mode, where keys drive navigation, filters and
//! the cart, or in **Search** mode, where typed characters edit the search term.
//! Search mode has two focuses: typing into the search bar, or moving through the
//! results while the search bar stays open.
//!
//! # Example
//!
//! ```rust
//! use healthconnect::app::modes::{InputMode, SearchFocus};
//!
//! let mode = InputMode::Search(SearchFocus::Typing);
//! assert!(mode.is_search());
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Characters go into the search term.
    Typing,

    /// Navigation keys move through the filtered results.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation, filter and cart commands.
    #[default]
    Normal,

    /// Search bar open with the given focus.
    Search(SearchFocus),
}

impl InputMode {
    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Search(_))
    }
}
