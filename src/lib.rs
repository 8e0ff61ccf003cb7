//! HealthConnect: catalog query engine for a patient portal.
//!
//! The portal has two catalog screens, a doctor search and a medicine store. Both
//! hold a read-only snapshot of records, narrow it with a fixed filter pipeline,
//! order it with a sort stage, and (for medicines) keep a session cart keyed by
//! item id. This crate implements that core plus a line-driven terminal front end.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Line-driven shim (main.rs)                         │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Screen controller
//! │  - Event handling                                   │
//! │  - Action emission                                  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Query Layer   │   │ Storage Layer │
//! │ (ui/)         │   │ (query/)      │   │ (storage/)    │
//! │ - View models │   │ - Filter      │   │ - JSON files  │
//! │ - Text render │   │ - Sort        │   │ - In-memory   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/)                                   │
//! │  - Doctors, medicines, record store                 │
//! │  - Cart and order drafts, error types               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Observability (tracing to stderr, optional OTLP/JSON span export) and path
//! helpers sit beside the layers in `observability/` and `infrastructure/`.
//!
//! # Configuration
//!
//! Read from `$XDG_CONFIG_HOME/healthconnect/config.toml` or the file given with
//! `--config`. Every key is optional:
//!
//! ```toml
//! doctors_catalog = "~/healthconnect/doctors.json"
//! medicines_catalog = "~/healthconnect/medicines.json"
//! default_variant = "medicines"
//! default_sort = "rating"
//! rows = 30
//! trace_level = "debug"
//! trace_file = "~/.local/share/healthconnect/otlp.json"
//! ```
//!
//! # Example
//!
//! ```rust
//! use healthconnect::domain::{CartState, CatalogItem, ItemId, Variant};
//! use healthconnect::storage::MemoryCatalog;
//! use healthconnect::{handle_event, initialize, Config, Event};
//!
//! let items: Vec<CatalogItem> = serde_json::from_str(r#"[
//!     {"variant":"medicine","id":1,"name":"Paracetamol 500mg","price":12.99,"category":"Pain Relief"},
//!     {"variant":"medicine","id":2,"name":"Vitamin D3 1000IU","price":18.99,"category":"Vitamins"}
//! ]"#)?;
//! let source = MemoryCatalog::from_items(items);
//!
//! let mut state = initialize(&Config::default(), &source, Variant::Medicines)?;
//! let mut cart = CartState::new();
//!
//! handle_event(&mut state, &mut cart, &Event::SelectCategory("Vitamins".to_string()))?;
//! handle_event(&mut state, &mut cart, &Event::AddSelected)?;
//! assert_eq!(cart.quantity(ItemId(2)), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod query;
pub mod storage;
pub mod ui;

pub use app::{handle_event, Action, AppState, ConsultKind, Event, InputMode, SearchFocus};
pub use domain::{CartState, CatalogError, CatalogItem, ItemId, RecordStore, Result, SortKey, Variant};
pub use query::FilterCriteria;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use storage::{CatalogSource, JsonCatalog};

/// Runtime configuration, deserialized from TOML.
///
/// Missing keys take their defaults; unknown keys are rejected so typos surface.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Doctor catalog file. `~` is expanded. Default: `<data dir>/doctors.json`.
    pub doctors_catalog: Option<String>,

    /// Medicine catalog file. `~` is expanded. Default: `<data dir>/medicines.json`.
    pub medicines_catalog: Option<String>,

    /// Screen shown first. Default: `doctors`.
    pub default_variant: Variant,

    /// Sort applied to both screens at start, by key name.
    ///
    /// When unset, doctors start sorted by distance and medicines in catalog order.
    pub default_sort: Option<String>,

    /// Viewport height in lines. Default: 24
    pub rows: usize,

    /// Tracing filter directive, overridden by `RUST_LOG`. Default: `"info"`
    pub trace_level: String,

    /// OTLP/JSON span export file. Export is off when unset.
    pub trace_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            doctors_catalog: None,
            medicines_catalog: None,
            default_variant: Variant::Doctors,
            default_sort: None,
            rows: 24,
            trace_level: "info".to_string(),
            trace_file: None,
        }
    }
}

impl Config {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the document is not valid TOML or a key
    /// has the wrong type or an unknown name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use healthconnect::{Config, Variant};
    ///
    /// let config = Config::from_toml_str("default_variant = \"medicines\"\nrows = 40")?;
    /// assert_eq!(config.default_variant, Variant::Medicines);
    /// assert_eq!(config.rows, 40);
    /// assert_eq!(config.trace_level, "info");
    /// # Ok::<(), healthconnect::CatalogError>(())
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| CatalogError::Config(format!("failed to parse config TOML: {e}")))
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, or
    /// [`CatalogError::Config`] if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = ?path, "config loaded");
        Ok(config)
    }

    /// Loads `explicit` if given, else the default config file if it exists, else
    /// the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] for whichever file is read.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match infrastructure::default_config_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Resolved catalog file for `variant`.
    #[must_use]
    pub fn catalog_path(&self, variant: Variant) -> Option<PathBuf> {
        let configured = match variant {
            Variant::Doctors => self.doctors_catalog.as_deref(),
            Variant::Medicines => self.medicines_catalog.as_deref(),
        };
        configured.map(infrastructure::expand_tilde).or_else(|| {
            infrastructure::get_data_dir().map(|dir| dir.join(format!("{variant}.json")))
        })
    }

    /// JSON catalog source over the resolved catalog files.
    #[must_use]
    pub fn catalog_source(&self) -> JsonCatalog {
        JsonCatalog::new(self.catalog_path(Variant::Doctors), self.catalog_path(Variant::Medicines))
    }

    /// Sort a screen of `variant` starts with.
    ///
    /// An unrecognised `default_sort` name logs a warning and means no sort.
    #[must_use]
    pub fn initial_sort(&self, variant: Variant) -> Option<SortKey> {
        self.default_sort
            .as_deref()
            .map_or_else(|| variant.default_sort(), query::resolve_sort_key)
    }
}

/// Loads the `variant` catalog from `source` and builds its screen state.
///
/// # Errors
///
/// Returns an error if the source fails to load, or if the snapshot has duplicate
/// ids or items of the other variant.
pub fn initialize(config: &Config, source: &dyn CatalogSource, variant: Variant) -> Result<AppState> {
    let _span = tracing::debug_span!("initialize", %variant).entered();

    let store = RecordStore::new(variant, source.load(variant)?)?;
    let criteria = FilterCriteria::sorted_by(config.initial_sort(variant));
    tracing::debug!(items = store.len(), sort = ?criteria.sort_key, "screen initialized");

    Ok(AppState::new(store, criteria))
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::MemoryCatalog;

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        assert!(matches!(Config::from_toml_str("rows = \"many\""), Err(CatalogError::Config(_))));
        assert!(matches!(Config::from_toml_str("colour = 1"), Err(CatalogError::Config(_))));
        assert!(matches!(
            Config::from_toml_str("default_variant = \"nurses\""),
            Err(CatalogError::Config(_))
        ));
    }

    #[test]
    fn initial_sort_follows_config_then_variant() {
        let config = Config::default();
        assert_eq!(config.initial_sort(Variant::Doctors), Some(SortKey::Distance));
        assert_eq!(config.initial_sort(Variant::Medicines), None);

        let config = Config {
            default_sort: Some("price".to_string()),
            ..Config::default()
        };
        assert_eq!(config.initial_sort(Variant::Doctors), Some(SortKey::Price));

        let config = Config {
            default_sort: Some("popularity".to_string()),
            ..Config::default()
        };
        assert_eq!(config.initial_sort(Variant::Doctors), None);
    }

    #[test]
    fn explicit_catalog_paths_win() {
        let config = Config {
            doctors_catalog: Some("/srv/catalogs/doctors.json".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.catalog_path(Variant::Doctors),
            Some(PathBuf::from("/srv/catalogs/doctors.json"))
        );
    }

    #[test]
    fn initialize_builds_an_empty_screen() {
        let state = initialize(&Config::default(), &MemoryCatalog::default(), Variant::Doctors).unwrap();
        assert!(state.results().is_empty());
        assert_eq!(state.criteria.sort_key, Some(SortKey::Distance));
    }
}
