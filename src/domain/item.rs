//! Catalog item domain model.
//!
//! A catalog item is either a [`Doctor`] or a [`Medicine`]. The two records carry very
//! different fields, but the query core only ever sees them through one uniform shape:
//! an id, some searchable text, a single category, a set of tags, one gating flag and
//! a handful of numeric sort values. [`CatalogItem`] provides that shape.
//!
//! | accessor     | doctor                | medicine                |
//! |--------------|-----------------------|-------------------------|
//! | `category()` | specialty             | category                |
//! | `tags()`     | accepted insurance    | (none)                  |
//! | `flag()`     | available today       | prescription required   |
//! | `price()`    | consultation fee      | price                   |

use crate::domain::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a catalog item, unique within one record store snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which catalog a screen is browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// The doctor search screen.
    Doctors,
    /// The medicine store screen.
    Medicines,
}

impl Variant {
    /// Heading shown above the result list.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Doctors => "Find Doctors",
            Self::Medicines => "Medicine Store",
        }
    }

    /// Label of the "match every category" entry in the category picker.
    #[must_use]
    pub const fn all_category_label(self) -> &'static str {
        match self {
            Self::Doctors => "All Specialties",
            Self::Medicines => "All Categories",
        }
    }

    /// Singular noun for one record of this variant.
    #[must_use]
    pub const fn item_noun(self) -> &'static str {
        match self {
            Self::Doctors => "doctor",
            Self::Medicines => "medicine",
        }
    }

    /// Name of the boolean flag the flag stage tests for this variant.
    #[must_use]
    pub const fn flag_label(self) -> &'static str {
        match self {
            Self::Doctors => "available today",
            Self::Medicines => "prescription required",
        }
    }

    /// Sort a fresh screen starts with: nearest first for doctors, catalog
    /// order for medicines.
    #[must_use]
    pub const fn default_sort(self) -> Option<SortKey> {
        match self {
            Self::Doctors => Some(SortKey::Distance),
            Self::Medicines => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctors => f.write_str("doctors"),
            Self::Medicines => f.write_str("medicines"),
        }
    }
}

impl FromStr for Variant {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doctors" | "doctor" => Ok(Self::Doctors),
            "medicines" | "medicine" => Ok(Self::Medicines),
            other => Err(CatalogError::UnknownVariant(other.to_string())),
        }
    }
}

/// Comparator keys the sort stage understands.
///
/// `Distance` and `Price` sort ascending; `Rating` and `Experience` descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Distance,
    Rating,
    Experience,
    Price,
}

impl SortKey {
    /// Every key, in the order the sort picker lists them.
    pub const ALL: [Self; 4] = [Self::Distance, Self::Rating, Self::Experience, Self::Price];

    /// Parses a sort key name, returning `None` for anything unrecognised.
    ///
    /// ```
    /// use healthconnect::domain::SortKey;
    ///
    /// assert_eq!(SortKey::parse("Rating"), Some(SortKey::Rating));
    /// assert_eq!(SortKey::parse("popularity"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "distance" => Some(Self::Distance),
            "rating" => Some(Self::Rating),
            "experience" => Some(Self::Experience),
            "price" => Some(Self::Price),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Rating => "rating",
            Self::Experience => "experience",
            Self::Price => "price",
        }
    }

    /// Whether larger values come first.
    #[must_use]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::Rating | Self::Experience)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A doctor listed in the search screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: ItemId,
    pub name: String,
    pub specialty: String,
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    /// Years in practice.
    pub experience: u32,
    #[serde(default)]
    pub location: String,
    /// Miles from the patient.
    pub distance: f64,
    pub consultation_fee: f64,
    #[serde(default)]
    pub available_today: bool,
    #[serde(default)]
    pub accepts_insurance: Vec<String>,
    #[serde(default)]
    pub next_available: String,
    #[serde(default)]
    pub languages: Vec<String>,
}

/// A medicine sold in the store screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub generic_name: String,
    #[serde(default)]
    pub manufacturer: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    pub category: String,
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,
    /// Units on hand.
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub prescription_required: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub side_effects: Vec<String>,
    #[serde(default)]
    pub contraindications: Vec<String>,
}

const fn in_stock_default() -> bool {
    true
}

/// One record of the catalog, tagged by variant on the wire.
///
/// ```
/// use healthconnect::domain::{CatalogItem, ItemId};
///
/// let json = r#"{
///     "variant": "medicine", "id": 1, "name": "Paracetamol 500mg",
///     "genericName": "Acetaminophen", "price": 12.99, "category": "Pain Relief"
/// }"#;
/// let item: CatalogItem = serde_json::from_str(json).unwrap();
/// assert_eq!(item.id(), ItemId(1));
/// assert_eq!(item.category(), "Pain Relief");
/// assert!(item.tags().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum CatalogItem {
    Doctor(Doctor),
    Medicine(Medicine),
}

impl CatalogItem {
    #[must_use]
    pub const fn id(&self) -> ItemId {
        match self {
            Self::Doctor(d) => d.id,
            Self::Medicine(m) => m.id,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Doctor(d) => &d.name,
            Self::Medicine(m) => &m.name,
        }
    }

    #[must_use]
    pub const fn variant(&self) -> Variant {
        match self {
            Self::Doctor(_) => Variant::Doctors,
            Self::Medicine(_) => Variant::Medicines,
        }
    }

    /// Specialty for doctors, category for medicines.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::Doctor(d) => &d.specialty,
            Self::Medicine(m) => &m.category,
        }
    }

    /// Accepted insurance providers for doctors; medicines carry no tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        match self {
            Self::Doctor(d) => &d.accepts_insurance,
            Self::Medicine(_) => &[],
        }
    }

    /// `available_today` for doctors, `prescription_required` for medicines.
    #[must_use]
    pub const fn flag(&self) -> bool {
        match self {
            Self::Doctor(d) => d.available_today,
            Self::Medicine(m) => m.prescription_required,
        }
    }

    /// Consultation fee for doctors, unit price for medicines.
    #[must_use]
    pub const fn price(&self) -> f64 {
        match self {
            Self::Doctor(d) => d.consultation_fee,
            Self::Medicine(m) => m.price,
        }
    }

    /// Whether the item can currently be put in a cart. Doctors are always bookable.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        match self {
            Self::Doctor(_) => true,
            Self::Medicine(m) => m.in_stock,
        }
    }

    #[must_use]
    pub const fn rating(&self) -> f64 {
        match self {
            Self::Doctor(d) => d.rating,
            Self::Medicine(m) => m.rating,
        }
    }

    /// Numeric value of `key` for this item, `None` when the variant has no such field.
    #[must_use]
    pub fn sort_value(&self, key: SortKey) -> Option<f64> {
        match (self, key) {
            (Self::Doctor(d), SortKey::Distance) => Some(d.distance),
            (Self::Doctor(d), SortKey::Rating) => Some(d.rating),
            (Self::Doctor(d), SortKey::Experience) => Some(f64::from(d.experience)),
            (Self::Doctor(d), SortKey::Price) => Some(d.consultation_fee),
            (Self::Medicine(m), SortKey::Rating) => Some(m.rating),
            (Self::Medicine(m), SortKey::Price) => Some(m.price),
            (Self::Medicine(_), SortKey::Distance | SortKey::Experience) => None,
        }
    }

    /// Fields the text stage searches, each matched on its own.
    #[must_use]
    pub fn searchable_fields(&self) -> Vec<&str> {
        match self {
            Self::Doctor(d) => vec![d.name.as_str(), d.specialty.as_str()],
            Self::Medicine(m) => vec![m.name.as_str(), m.generic_name.as_str(), m.category.as_str()],
        }
    }

    /// Space-joined concatenation of [`searchable_fields`](Self::searchable_fields).
    #[must_use]
    pub fn searchable_text(&self) -> String {
        self.searchable_fields().join(" ")
    }

    /// Secondary line shown under the name.
    #[must_use]
    pub fn subtitle(&self) -> String {
        match self {
            Self::Doctor(d) if d.location.is_empty() => d.specialty.clone(),
            Self::Doctor(d) => format!("{} · {}", d.specialty, d.location),
            Self::Medicine(m) if m.generic_name.is_empty() => m.category.clone(),
            Self::Medicine(m) => format!("{} · {}", m.generic_name, m.category),
        }
    }
}
