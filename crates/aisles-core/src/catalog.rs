//! The compiled-in store catalog.
//!
//! Records are loaded once from `data/stores.yaml` and never mutated; every
//! listing the UI shows is derived from this sequence.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::projection::GeoPoint;
use crate::{ConfigError, CoreError};

const SEED_YAML: &str = include_str!("../data/stores.yaml");

pub type StoreId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cuisine {
    Japanese,
    Chinese,
    Indian,
    Korean,
    Thai,
    Vietnamese,
}

impl Cuisine {
    /// Every cuisine, in filter-chip order.
    pub const ALL: [Cuisine; 6] = [
        Cuisine::Japanese,
        Cuisine::Chinese,
        Cuisine::Indian,
        Cuisine::Korean,
        Cuisine::Thai,
        Cuisine::Vietnamese,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Cuisine::Japanese => "Japanese",
            Cuisine::Chinese => "Chinese",
            Cuisine::Indian => "Indian",
            Cuisine::Korean => "Korean",
            Cuisine::Thai => "Thai",
            Cuisine::Vietnamese => "Vietnamese",
        }
    }
}

impl std::fmt::Display for Cuisine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cuisine {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cuisine::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownCuisine(s.to_string()))
    }
}

/// The active cuisine filter: everything, or a single cuisine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CuisineFilter {
    #[default]
    All,
    Only(Cuisine),
}

impl CuisineFilter {
    /// Filter chips in display order, `All` first.
    #[must_use]
    pub fn chips() -> Vec<CuisineFilter> {
        std::iter::once(CuisineFilter::All)
            .chain(Cuisine::ALL.into_iter().map(CuisineFilter::Only))
            .collect()
    }

    #[must_use]
    pub fn admits(self, cuisine: Cuisine) -> bool {
        match self {
            CuisineFilter::All => true,
            CuisineFilter::Only(only) => only == cuisine,
        }
    }

    /// The next chip, wrapping from the last cuisine back to `All`.
    #[must_use]
    pub fn next(self) -> CuisineFilter {
        self.step(1)
    }

    /// The previous chip, wrapping from `All` to the last cuisine.
    #[must_use]
    pub fn prev(self) -> CuisineFilter {
        self.step(Cuisine::ALL.len())
    }

    fn step(self, by: usize) -> CuisineFilter {
        let chips = CuisineFilter::chips();
        let current = chips.iter().position(|c| *c == self).unwrap_or(0);
        chips[(current + by) % chips.len()]
    }
}

impl std::fmt::Display for CuisineFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CuisineFilter::All => f.write_str("All"),
            CuisineFilter::Only(cuisine) => cuisine.fmt(f),
        }
    }
}

impl FromStr for CuisineFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CuisineFilter::All);
        }
        s.parse().map(CuisineFilter::Only)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub id: StoreId,
    pub name: String,
    #[serde(rename = "type")]
    pub cuisine: Cuisine,
    pub address: String,
    pub phone: String,
    pub hours: String,
    pub lat: f64,
    pub lng: f64,
    pub description: String,
    /// Average rating in `[0, 5]`.
    pub rating: f64,
    pub specialties: Vec<String>,
}

impl StoreRecord {
    #[must_use]
    pub fn position(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    region: String,
    stores: Vec<StoreRecord>,
}

/// Immutable sequence of store records plus the region they belong to.
#[derive(Debug, Clone)]
pub struct Catalog {
    region: String,
    stores: Vec<StoreRecord>,
}

impl Catalog {
    /// Load the catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the embedded YAML does not parse or fails
    /// validation.
    pub fn seed() -> Result<Self, ConfigError> {
        Self::from_yaml(SEED_YAML)
    }

    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::CatalogParse` for malformed YAML and
    /// `ConfigError::Validation` when a record breaks a catalog invariant.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        validate_stores(&file.stores)?;
        tracing::debug!(region = %file.region, stores = file.stores.len(), "catalog loaded");
        Ok(Self {
            region: file.region,
            stores: file.stores,
        })
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[must_use]
    pub fn stores(&self) -> &[StoreRecord] {
        &self.stores
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: StoreId) -> Option<&StoreRecord> {
        self.stores.iter().find(|s| s.id == id)
    }

    /// Like [`Catalog::get`], but an unknown id is an error.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownStore` when no record has `id`.
    pub fn require(&self, id: StoreId) -> Result<&StoreRecord, CoreError> {
        self.get(id).ok_or(CoreError::UnknownStore(id))
    }
}

fn validate_stores(stores: &[StoreRecord]) -> Result<(), ConfigError> {
    if stores.is_empty() {
        return Err(ConfigError::Validation(
            "catalog must contain at least one store".to_string(),
        ));
    }

    let mut seen_ids = HashSet::new();

    for store in stores {
        if store.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store {} has an empty name",
                store.id
            )));
        }

        if !seen_ids.insert(store.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate store id {} ('{}')",
                store.id, store.name
            )));
        }

        if !(0.0..=5.0).contains(&store.rating) {
            return Err(ConfigError::Validation(format!(
                "store '{}' has rating {} outside 0..=5",
                store.name, store.rating
            )));
        }

        if !store.lat.is_finite() || !store.lng.is_finite() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has non-finite coordinates",
                store.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
