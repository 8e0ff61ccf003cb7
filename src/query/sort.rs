//! Sort stage.
//!
//! Orders the filtered items by one [`SortKey`]. The sort is stable: the incoming
//! order already encodes relevance, so items with equal keys keep it. Items that
//! have no value for the key (medicines have no distance) go last, also in their
//! incoming order.

use crate::domain::{CatalogItem, SortKey};
use std::cmp::Ordering;

/// Sorts `items` by `key`; `None` leaves the order untouched.
///
/// # Examples
///
/// ```
/// use healthconnect::domain::SortKey;
/// use healthconnect::query::sort;
///
/// assert!(sort(Vec::new(), Some(SortKey::Price)).is_empty());
/// ```
#[must_use]
pub fn sort(mut items: Vec<&CatalogItem>, key: Option<SortKey>) -> Vec<&CatalogItem> {
    let Some(key) = key else {
        return items;
    };

    let _span = tracing::debug_span!("sort_items", %key, count = items.len()).entered();

    // slice::sort_by is a stable merge sort
    items.sort_by(|a, b| compare(a, b, key));
    items
}

/// Resolves a raw sort selection, logging and discarding unknown names.
///
/// ```
/// use healthconnect::domain::SortKey;
/// use healthconnect::query::resolve_sort_key;
///
/// assert_eq!(resolve_sort_key("experience"), Some(SortKey::Experience));
/// assert_eq!(resolve_sort_key("newest"), None);
/// ```
#[must_use]
pub fn resolve_sort_key(name: &str) -> Option<SortKey> {
    let key = SortKey::parse(name);
    if key.is_none() {
        tracing::warn!(sort_key = %name, "unrecognised sort key, keeping current order");
    }
    key
}

fn compare(a: &CatalogItem, b: &CatalogItem, key: SortKey) -> Ordering {
    match (a.sort_value(key), b.sort_value(key)) {
        (Some(x), Some(y)) if key.is_descending() => y.total_cmp(&x),
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Doctor, ItemId, Medicine};

    fn doctor(id: u64, distance: f64, rating: f64, experience: u32, fee: f64) -> CatalogItem {
        CatalogItem::Doctor(Doctor {
            id: ItemId(id),
            name: format!("Doctor {id}"),
            specialty: "General".to_string(),
            rating,
            reviews: 0,
            experience,
            location: String::new(),
            distance,
            consultation_fee: fee,
            available_today: true,
            accepts_insurance: vec![],
            next_available: String::new(),
            languages: vec![],
        })
    }

    fn ids(items: &[&CatalogItem]) -> Vec<u64> {
        items.iter().map(|item| item.id().0).collect()
    }

    fn sample() -> Vec<CatalogItem> {
        vec![
            doctor(1, 2.3, 4.8, 12, 150.0),
            doctor(2, 1.8, 4.9, 8, 120.0),
            doctor(3, 3.1, 4.7, 15, 100.0),
        ]
    }

    #[test]
    fn directions_per_key() {
        let items = sample();
        let refs = || items.iter().collect::<Vec<_>>();

        assert_eq!(ids(&sort(refs(), Some(SortKey::Distance))), vec![2, 1, 3]);
        assert_eq!(ids(&sort(refs(), Some(SortKey::Rating))), vec![2, 1, 3]);
        assert_eq!(ids(&sort(refs(), Some(SortKey::Experience))), vec![3, 1, 2]);
        assert_eq!(ids(&sort(refs(), Some(SortKey::Price))), vec![3, 2, 1]);
    }

    #[test]
    fn no_key_is_identity() {
        let items = sample();
        let sorted = sort(items.iter().collect(), None);
        assert_eq!(ids(&sorted), vec![1, 2, 3]);
    }

    #[test]
    fn equal_keys_keep_their_relative_order() {
        let items = vec![
            doctor(1, 1.0, 4.5, 3, 50.0),
            doctor(2, 0.5, 4.9, 3, 50.0),
            doctor(3, 1.0, 4.5, 3, 40.0),
            doctor(4, 1.0, 4.5, 9, 50.0),
        ];
        let refs = || items.iter().collect::<Vec<_>>();

        assert_eq!(ids(&sort(refs(), Some(SortKey::Distance))), vec![2, 1, 3, 4]);
        assert_eq!(ids(&sort(refs(), Some(SortKey::Rating))), vec![2, 1, 3, 4]);
        assert_eq!(ids(&sort(refs(), Some(SortKey::Experience))), vec![4, 1, 2, 3]);
        assert_eq!(ids(&sort(refs(), Some(SortKey::Price))), vec![3, 1, 2, 4]);
    }

    #[test]
    fn items_without_the_key_go_last() {
        let medicine = CatalogItem::Medicine(Medicine {
            id: ItemId(10),
            name: "Vitamin D3".to_string(),
            generic_name: String::new(),
            manufacturer: String::new(),
            price: 18.99,
            original_price: None,
            category: "Vitamins".to_string(),
            in_stock: true,
            quantity: 100,
            rating: 4.3,
            reviews: 0,
            prescription_required: false,
            description: String::new(),
            dosage: String::new(),
            side_effects: vec![],
            contraindications: vec![],
        });
        let near = doctor(1, 5.0, 4.0, 1, 10.0);
        let far = doctor(2, 9.0, 4.0, 1, 10.0);

        let sorted = sort(vec![&medicine, &far, &near], Some(SortKey::Distance));
        assert_eq!(ids(&sorted), vec![1, 2, 10]);
    }

    #[test]
    fn unknown_sort_names_resolve_to_none() {
        assert_eq!(resolve_sort_key("Price"), Some(SortKey::Price));
        assert_eq!(resolve_sort_key(""), None);
        assert_eq!(resolve_sort_key("alphabetical"), None);
    }
}
