//! Plain-text renderer for catalog screen view models.
//!
//! Layout:
//!
//! ```text
//! [Header]
//! [Border]
//! [Search bar + border]          (search mode only)
//! [Filter summary]
//! [Border]
//! [Result rows, two lines each]  (or the empty state message)
//! [Border]
//! [Cart summary]
//! [Keybindings]
//! ```
//!
//! # Example
//!
//! ```rust
//! use healthconnect::app::AppState;
//! use healthconnect::domain::{CartState, RecordStore, Variant};
//! use healthconnect::query::FilterCriteria;
//! use healthconnect::ui::render;
//!
//! let state = AppState::new(RecordStore::new(Variant::Doctors, vec![])?, FilterCriteria::default());
//! let mut out = Vec::new();
//! render(&state.compute_viewmodel(&CartState::new(), 24), &mut out)?;
//! assert!(String::from_utf8_lossy(&out).contains("No doctor records loaded"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::ui::helpers::write_highlighted;
use crate::ui::viewmodel::{DisplayItem, FilterSummary, SearchBarInfo, UIViewModel};
use std::io::{self, Write};

const WIDTH: usize = 72;
const NAME_COLUMN: usize = 40;

/// Writes the whole screen for `vm` to `out`.
pub fn render(vm: &UIViewModel, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", vm.header.title)?;
    render_border(out)?;

    if let Some(search) = &vm.search_bar {
        render_search_bar(out, search)?;
        render_border(out)?;
    }

    render_filters(out, &vm.filters)?;
    render_border(out)?;

    if let Some(empty) = &vm.empty_state {
        writeln!(out, "  {}", empty.message)?;
    } else {
        for item in &vm.display_items {
            render_row(out, item)?;
        }
    }

    render_border(out)?;
    writeln!(out, "{}", vm.footer.cart_summary)?;
    writeln!(out, "{}", vm.footer.keybindings)?;
    out.flush()
}

fn render_border(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "─".repeat(WIDTH))
}

fn render_search_bar(out: &mut impl Write, search: &SearchBarInfo) -> io::Result<()> {
    let cursor = if search.is_typing { "_" } else { "" };
    writeln!(out, "Search: {}{cursor}", search.query)
}

fn render_filters(out: &mut impl Write, filters: &FilterSummary) -> io::Result<()> {
    write!(out, "{}", filters.category)?;
    if !filters.tags.is_empty() {
        write!(out, " | {}", filters.tags.join(", "))?;
    }
    if let Some(flag) = &filters.flag {
        write!(out, " | {flag}")?;
    }
    writeln!(out, " | sort: {}", filters.sort)
}

/// Two lines per item: name with cart quantity and price, then subtitle and detail.
fn render_row(out: &mut impl Write, item: &DisplayItem) -> io::Result<()> {
    write!(out, "{}", if item.is_selected { "> " } else { "  " })?;
    write_highlighted(out, &item.name, &item.highlight_ranges, item.is_selected)?;

    let mut name_len = item.name.chars().count();
    if item.cart_quantity > 0 {
        let in_cart = format!(" ×{}", item.cart_quantity);
        name_len += in_cart.chars().count();
        write!(out, "{in_cart}")?;
    }
    write!(out, "{}", " ".repeat(NAME_COLUMN.saturating_sub(name_len)))?;
    write!(out, " {}", item.price)?;
    for badge in &item.badges {
        write!(out, " [{badge}]")?;
    }
    writeln!(out)?;

    writeln!(out, "    {} · {}", item.subtitle, item.detail)
}
