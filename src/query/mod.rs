//! Catalog query engine: filter pipeline and sort stage.
//!
//! ```text
//! RecordStore items ──► apply(criteria) ──► sort(criteria.sort_key) ──► results
//!                       text → category → tags → flag
//! ```
//!
//! Both steps borrow from the record store and return references, so a full
//! re-evaluation on every criteria change allocates only the result vector.
//!
//! # Modules
//!
//! - [`criteria`]: [`FilterCriteria`] and [`CategoryFilter`]
//! - [`filter`]: The four-stage [`apply`] pipeline
//! - [`sort`]: The stable [`sort`](sort::sort) stage

pub mod criteria;
pub mod filter;
pub mod sort;

pub use criteria::{CategoryFilter, FilterCriteria};
pub use filter::{apply, Stage};
pub use sort::{resolve_sort_key, sort};

use crate::domain::CatalogItem;

/// Runs the filter pipeline and then the sort stage.
///
/// # Examples
///
/// ```
/// use healthconnect::domain::{CatalogItem, SortKey};
/// use healthconnect::query::{run, FilterCriteria};
///
/// let items: Vec<CatalogItem> = serde_json::from_str(r#"[
///     {"variant":"medicine","id":1,"name":"B","price":9.5,"category":"Vitamins"},
///     {"variant":"medicine","id":2,"name":"A","price":3.0,"category":"Vitamins"}
/// ]"#).unwrap();
///
/// let results = run(&items, &FilterCriteria::sorted_by(Some(SortKey::Price)));
/// assert_eq!(results[0].name(), "A");
/// ```
pub fn run<'a, I>(items: I, criteria: &FilterCriteria) -> Vec<&'a CatalogItem>
where
    I: IntoIterator<Item = &'a CatalogItem>,
{
    sort(apply(items, criteria), criteria.sort_key)
}
