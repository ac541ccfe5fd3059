//! Country and city reference data
//!
//! `WorldData` loads the two JSON documents produced by the data-gathering
//! scripts: an array of countries and an object mapping each country's
//! `iso2` code to its cities.

use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::error::Result;
use crate::core::types::Entity;

/// A country record; only `name` and `iso2` are interpreted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub iso2: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Country {
    pub fn new(name: impl Into<String>, iso2: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            iso2: iso2.into(),
            attributes: Map::new(),
        }
    }
}

/// Lookup from pool names to pool members
pub trait ReferenceData {
    /// Code of the pool whose display name matches, ignoring case
    fn resolve_code(&self, display_name: &str) -> Option<&str>;

    /// Members of the pool with `code`; empty when unknown
    fn members_of(&self, code: &str) -> &[Entity];

    /// Every sub-pool, in reference-data order
    fn countries(&self) -> &[Country];
}

/// Reference data held in memory
#[derive(Debug, Clone, Default)]
pub struct WorldData {
    countries: Vec<Country>,
    cities: AHashMap<String, Vec<Entity>>,
}

impl WorldData {
    pub fn new(countries: Vec<Country>, cities: AHashMap<String, Vec<Entity>>) -> Self {
        Self { countries, cities }
    }

    /// Parse both documents from JSON strings
    pub fn from_json(countries_json: &str, cities_json: &str) -> Result<Self> {
        let countries: Vec<Country> = serde_json::from_str(countries_json)?;
        let cities: AHashMap<String, Vec<Entity>> = serde_json::from_str(cities_json)?;
        Ok(Self::new(countries, cities))
    }

    /// Load both documents from disk
    pub fn load(countries_path: &Path, cities_path: &Path) -> Result<Self> {
        let countries_json = std::fs::read_to_string(countries_path)?;
        let cities_json = std::fs::read_to_string(cities_path)?;
        let data = Self::from_json(&countries_json, &cities_json)?;

        tracing::info!(
            "Loaded {} countries and {} city lists",
            data.countries.len(),
            data.cities.len()
        );
        Ok(data)
    }

    /// Add a country together with its cities
    pub fn insert_country(&mut self, country: Country, cities: Vec<Entity>) {
        self.cities.insert(country.iso2.clone(), cities);
        self.countries.push(country);
    }

    pub fn total_cities(&self) -> usize {
        self.cities.values().map(Vec::len).sum()
    }
}

impl ReferenceData for WorldData {
    fn resolve_code(&self, display_name: &str) -> Option<&str> {
        let wanted = display_name.to_lowercase();
        self.countries
            .iter()
            .find(|c| !c.name.is_empty() && c.name.to_lowercase() == wanted)
            .map(|c| c.iso2.as_str())
    }

    fn members_of(&self, code: &str) -> &[Entity] {
        self.cities.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    fn countries(&self) -> &[Country] {
        &self.countries
    }
}
