//! JSON file catalog source.
//!
//! Each variant lives in its own file. A file holds either a bare JSON array of
//! records, or the envelope the portal API responds with:
//!
//! ```json
//! {
//!   "success": true,
//!   "doctors": [
//!     {
//!       "id": 1,
//!       "name": "Dr. Sarah Johnson",
//!       "specialty": "Cardiologist",
//!       "rating": 4.8,
//!       "experience": 12,
//!       "distance": 2.3,
//!       "consultationFee": 150,
//!       "availableToday": true,
//!       "acceptsInsurance": ["Blue Cross", "Aetna"]
//!     }
//!   ]
//! }
//! ```
//!
//! Records carry no variant tag; the file they come from decides it.

use crate::domain::error::{CatalogError, Result};
use crate::domain::{CatalogItem, Doctor, Medicine, Variant};
use crate::storage::backend::CatalogSource;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// JSON file catalog source.
///
/// Files are read on every [`load`](CatalogSource::load), so a reload picks up
/// edits made since the last one. A variant without a configured path, or whose
/// file does not exist yet, loads as an empty catalog.
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    doctors: Option<PathBuf>,
    medicines: Option<PathBuf>,
}

impl JsonCatalog {
    /// # Examples
    ///
    /// ```no_run
    /// use healthconnect::domain::Variant;
    /// use healthconnect::storage::{CatalogSource, JsonCatalog};
    ///
    /// let source = JsonCatalog::new(Some("doctors.json".into()), None);
    /// let doctors = source.load(Variant::Doctors)?;
    /// # Ok::<(), healthconnect::CatalogError>(())
    /// ```
    #[must_use]
    pub const fn new(doctors: Option<PathBuf>, medicines: Option<PathBuf>) -> Self {
        Self { doctors, medicines }
    }

    #[must_use]
    pub fn path_for(&self, variant: Variant) -> Option<&Path> {
        match variant {
            Variant::Doctors => self.doctors.as_deref(),
            Variant::Medicines => self.medicines.as_deref(),
        }
    }

    fn read_file(path: &Path, variant: Variant) -> Result<Vec<CatalogItem>> {
        let contents = std::fs::read_to_string(path)?;
        let items = match variant {
            Variant::Doctors => parse_records::<Doctor>(&contents, variant)
                .map_err(|e| describe(path, &e))?
                .into_iter()
                .map(CatalogItem::Doctor)
                .collect(),
            Variant::Medicines => parse_records::<Medicine>(&contents, variant)
                .map_err(|e| describe(path, &e))?
                .into_iter()
                .map(CatalogItem::Medicine)
                .collect(),
        };
        Ok(items)
    }
}

impl CatalogSource for JsonCatalog {
    fn load(&self, variant: Variant) -> Result<Vec<CatalogItem>> {
        let _span = tracing::debug_span!("json_catalog_load", %variant).entered();

        let Some(path) = self.path_for(variant) else {
            tracing::debug!("no catalog file configured");
            return Ok(vec![]);
        };

        if !path.exists() {
            tracing::warn!(path = ?path, "catalog file not found, starting empty");
            return Ok(vec![]);
        }

        let items = Self::read_file(path, variant)?;
        tracing::debug!(path = ?path, count = items.len(), "catalog loaded");
        Ok(items)
    }
}

/// Accepts a bare array or a `{ "success": .., "<variant>": [..] }` envelope.
fn parse_records<T: DeserializeOwned>(contents: &str, variant: Variant) -> std::result::Result<Vec<T>, String> {
    let value: Value = serde_json::from_str(contents).map_err(|e| format!("failed to parse JSON: {e}"))?;

    let list = match value {
        Value::Array(_) => value,
        Value::Object(mut envelope) => {
            if envelope.get("success").and_then(Value::as_bool) == Some(false) {
                let message = envelope
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("no message");
                return Err(format!("source reported failure: {message}"));
            }
            let key = variant.to_string();
            envelope
                .remove(&key)
                .ok_or_else(|| format!("envelope has no \"{key}\" list"))?
        }
        _ => return Err("expected a JSON array or object".to_string()),
    };

    serde_json::from_value(list).map_err(|e| format!("invalid {variant} record: {e}"))
}

fn describe(path: &Path, reason: &str) -> CatalogError {
    CatalogError::Storage(format!("{}: {reason}", path.display()))
}
