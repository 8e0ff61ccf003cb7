//! Filter criteria for one screen.

use crate::domain::{SortKey, Variant};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Category stage selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// Sentinel that lets every category through.
    #[default]
    All,
    /// Exact, case-sensitive category (or specialty) match.
    Only(String),
}

impl CategoryFilter {
    /// Maps a picker label to a filter.
    ///
    /// `"all"` (any case) and the variant's own "All ..." label become
    /// [`CategoryFilter::All`]; anything else is taken verbatim.
    ///
    /// ```
    /// use healthconnect::domain::Variant;
    /// use healthconnect::query::CategoryFilter;
    ///
    /// assert_eq!(CategoryFilter::from_label("All Specialties", Variant::Doctors), CategoryFilter::All);
    /// assert_eq!(
    ///     CategoryFilter::from_label("Cardiologist", Variant::Doctors),
    ///     CategoryFilter::Only("Cardiologist".to_string()),
    /// );
    /// ```
    #[must_use]
    pub fn from_label(label: &str, variant: Variant) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("all") || label == variant.all_category_label() {
            Self::All
        } else {
            Self::Only(label.to_string())
        }
    }

    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// The active filter and sort selections of a screen.
///
/// Nothing here is validated: a category or tag that no item carries simply
/// matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring; empty passes everything.
    pub search_term: String,
    pub category: CategoryFilter,
    /// An item passes when it carries at least one of these; empty passes everything.
    pub selected_tags: BTreeSet<String>,
    /// When set, only items whose flag is true pass.
    pub flag_required: bool,
    /// `None` keeps the filtered order as is.
    pub sort_key: Option<SortKey>,
}

impl FilterCriteria {
    /// Criteria with every stage inactive and the given sort.
    #[must_use]
    pub fn sorted_by(sort_key: Option<SortKey>) -> Self {
        Self {
            sort_key,
            ..Self::default()
        }
    }

    /// Whether any filtering stage would drop items.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search_term.is_empty()
            || !self.category.is_all()
            || !self.selected_tags.is_empty()
            || self.flag_required
    }

    /// Selects or deselects a tag, mirroring a checkbox.
    pub fn set_tag(&mut self, tag: &str, selected: bool) {
        if selected {
            self.selected_tags.insert(tag.to_string());
        } else {
            self.selected_tags.remove(tag);
        }
    }

    /// Resets every filter stage while keeping the sort selection.
    pub fn clear_filters(&mut self) {
        *self = Self::sorted_by(self.sort_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_criteria_are_inactive() {
        let criteria = FilterCriteria::default();
        assert!(!criteria.has_active_filters());
        assert!(criteria.category.is_all());
        assert_eq!(criteria.sort_key, None);
    }

    #[test]
    fn tags_toggle_like_checkboxes() {
        let mut criteria = FilterCriteria::default();
        criteria.set_tag("Aetna", true);
        criteria.set_tag("Cigna", true);
        criteria.set_tag("Aetna", false);
        assert_eq!(criteria.selected_tags.iter().collect::<Vec<_>>(), vec!["Cigna"]);
        assert!(criteria.has_active_filters());
    }

    #[test]
    fn clear_filters_keeps_sort() {
        let mut criteria = FilterCriteria {
            search_term: "derm".to_string(),
            flag_required: true,
            sort_key: Some(SortKey::Rating),
            ..FilterCriteria::default()
        };
        criteria.clear_filters();
        assert!(!criteria.has_active_filters());
        assert_eq!(criteria.sort_key, Some(SortKey::Rating));
    }

    #[test]
    fn category_labels() {
        assert!(CategoryFilter::from_label("ALL", Variant::Medicines).is_all());
        assert!(CategoryFilter::from_label("All Categories", Variant::Medicines).is_all());
        // the doctors' sentinel is just another (unknown) category on the medicine screen
        assert!(!CategoryFilter::from_label("All Specialties", Variant::Medicines).is_all());
        assert!(!CategoryFilter::Only("Vitamins".to_string()).matches("vitamins"));
    }
}
