//! Shared formatting and highlighting helpers.
//!
//! All ranges are character indices, never byte indices, so names with
//! non-ASCII characters highlight correctly.

use std::io::{self, Write};

/// Formats an amount in dollars with two decimals.
///
/// ```rust
/// use healthconnect::ui::helpers::format_money;
///
/// assert_eq!(format_money(12.5), "$12.50");
/// ```
#[must_use]
pub fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Finds every non-overlapping, case-insensitive occurrence of `term` in `text`.
///
/// Returns `(start, end)` character ranges in ascending order. An empty term
/// matches nothing.
///
/// ```rust
/// use healthconnect::ui::helpers::substring_ranges;
///
/// assert_eq!(substring_ranges("Dr. Sarah Johnson", "sa"), vec![(4, 6)]);
/// ```
#[must_use]
pub fn substring_ranges(text: &str, term: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = term.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return vec![];
    }

    // Lowercasing can change the char count (e.g. 'İ'), so compare char by char
    // and give up on chars whose lowercase form is not a single char.
    let haystack: Vec<Option<char>> = text
        .chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => Some(l),
                _ => None,
            }
        })
        .collect();

    let mut ranges = vec![];
    let mut pos = 0;
    while pos + needle.len() <= haystack.len() {
        let matched = haystack[pos..pos + needle.len()]
            .iter()
            .zip(&needle)
            .all(|(h, n)| *h == Some(*n));
        if matched {
            ranges.push((pos, pos + needle.len()));
            pos += needle.len();
        } else {
            pos += 1;
        }
    }
    ranges
}

/// Writes `text` with each range wrapped in square brackets.
///
/// Highlighting is skipped on the selected row, where the cursor marker already
/// draws attention.
pub fn write_highlighted(
    out: &mut impl Write,
    text: &str,
    ranges: &[(usize, usize)],
    is_selected: bool,
) -> io::Result<()> {
    if ranges.is_empty() || is_selected {
        return write!(out, "{text}");
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }
        let normal: String = chars[current_pos..start].iter().collect();
        let highlighted: String = chars[start..end].iter().collect();
        write!(out, "{normal}[{highlighted}]")?;
        current_pos = end;
    }

    let remaining: String = chars[current_pos..].iter().collect();
    write!(out, "{remaining}")
}
