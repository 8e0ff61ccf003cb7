//! Filter pipeline.
//!
//! Four predicate stages run in a fixed order and are combined with AND: an item
//! survives only if every stage passes it. Inside the tag stage the selected tags
//! are combined with OR. No stage fails; an empty result is just an empty `Vec`.

use super::criteria::FilterCriteria;
use crate::domain::CatalogItem;

/// One predicate step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Case-insensitive substring match on the searchable fields.
    Text,
    /// Exact category match unless the criteria select "all".
    Category,
    /// At least one selected tag present on the item.
    Tags,
    /// Item flag set whenever the criteria require it.
    Flag,
}

impl Stage {
    /// Evaluation order of the pipeline.
    pub const ORDER: [Self; 4] = [Self::Text, Self::Category, Self::Tags, Self::Flag];

    fn passes(self, item: &CatalogItem, prepared: &Prepared<'_>) -> bool {
        match self {
            Self::Text => matches_text(item, &prepared.term),
            Self::Category => prepared.criteria.category.matches(item.category()),
            Self::Tags => {
                let selected = &prepared.criteria.selected_tags;
                selected.is_empty() || item.tags().iter().any(|tag| selected.contains(tag))
            }
            Self::Flag => !prepared.criteria.flag_required || item.flag(),
        }
    }
}

/// Criteria with the search term lowercased once per pipeline run.
struct Prepared<'c> {
    criteria: &'c FilterCriteria,
    term: String,
}

/// Returns the items that pass every stage, in their input order.
///
/// # Examples
///
/// ```
/// use healthconnect::domain::CatalogItem;
/// use healthconnect::query::{apply, FilterCriteria};
///
/// let items: Vec<CatalogItem> = vec![];
/// assert!(apply(&items, &FilterCriteria::default()).is_empty());
/// ```
pub fn apply<'a, I>(items: I, criteria: &FilterCriteria) -> Vec<&'a CatalogItem>
where
    I: IntoIterator<Item = &'a CatalogItem>,
{
    let _span = tracing::debug_span!("apply_filters",
        query_len = criteria.search_term.len(),
        category = ?criteria.category,
        tag_count = criteria.selected_tags.len(),
        flag_required = criteria.flag_required
    )
    .entered();

    let prepared = Prepared {
        criteria,
        term: criteria.search_term.to_lowercase(),
    };

    let filtered: Vec<&CatalogItem> = items
        .into_iter()
        .filter(|item| Stage::ORDER.iter().all(|stage| stage.passes(item, &prepared)))
        .collect();

    tracing::debug!(filtered_count = filtered.len(), "filters applied");
    filtered
}

/// Text stage on its own; `term_lower` must already be lowercase.
#[must_use]
pub fn matches_text(item: &CatalogItem, term_lower: &str) -> bool {
    term_lower.is_empty()
        || item
            .searchable_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(term_lower))
}
