//! Core type definitions used throughout the codebase

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A draw participant (a city, or a country winner in the global draw)
///
/// Only `name` is interpreted. Every other key of the source record is kept
/// verbatim in `attributes` and written back out on serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Case-insensitive name comparison
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An entity and the day it left its pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EliminationRecord {
    pub date: NaiveDate,
    pub entity: Entity,
}

impl EliminationRecord {
    pub fn new(date: NaiveDate, entity: Entity) -> Self {
        Self { date, entity }
    }
}

/// Ordered outcome of one draw run
///
/// The front record is the winner (removed last, latest date) and the back
/// record is the loser (removed first, earliest date). Ranks are 1-indexed
/// from the front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationResult {
    records: Vec<EliminationRecord>,
}

impl SimulationResult {
    /// Build from records already in winner-first order
    pub fn from_records(records: Vec<EliminationRecord>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn winner(&self) -> Option<&EliminationRecord> {
        self.records.first()
    }

    pub fn loser(&self) -> Option<&EliminationRecord> {
        self.records.last()
    }

    pub fn records(&self) -> &[EliminationRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EliminationRecord> {
        self.records.iter()
    }

    /// Records paired with their rank (1 = winner)
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &EliminationRecord)> {
        self.records.iter().enumerate().map(|(i, r)| (i + 1, r))
    }

    /// First record, from the front, whose entity name matches `name`
    pub fn find(&self, name: &str) -> Option<(usize, &EliminationRecord)> {
        self.ranked().find(|(_, r)| r.entity.name_matches(name))
    }
}

impl<'a> IntoIterator for &'a SimulationResult {
    type Item = &'a EliminationRecord;
    type IntoIter = std::slice::Iter<'a, EliminationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
