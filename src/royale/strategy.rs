//! Global pool composition
//!
//! How the per-country pools feed the world draw. Both strategies walk the
//! countries in reference-data order and log one line per country.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::calendar::advance_by;
use crate::core::types::Entity;
use crate::data::reference::ReferenceData;
use crate::royale::draw::run_simulation;

/// How country pools are combined into the world pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompositionStrategy {
    /// Every country runs its own draw from the same day; only the winners
    /// enter the world draw, which starts once the longest country draw ends
    #[default]
    Simultaneous,
    /// Every city enters the world draw directly
    Sequential,
}

impl CompositionStrategy {
    pub fn from_simultaneous(simultaneous: bool) -> Self {
        if simultaneous {
            CompositionStrategy::Simultaneous
        } else {
            CompositionStrategy::Sequential
        }
    }

    /// Build the world pool and the day its draw starts
    pub fn compose<R: Rng + ?Sized>(
        self,
        data: &dyn ReferenceData,
        starting_date: NaiveDate,
        rng: &mut R,
        logs: &mut Vec<String>,
    ) -> Composition {
        let mut pool = Vec::new();
        let mut longest_simulation = 0;

        for country in data.countries() {
            let cities = data.members_of(&country.iso2);

            if cities.is_empty() {
                logs.push(format!("Country: {} | Cities: 0", country.name));
                continue;
            }

            match self {
                CompositionStrategy::Sequential => {
                    pool.extend_from_slice(cities);
                    logs.push(format!("Country: {} | Cities: {}", country.name, cities.len()));
                }
                CompositionStrategy::Simultaneous => {
                    let result = run_simulation(Some(starting_date), cities, rng);
                    if let Some(winner) = result.winner() {
                        pool.push(winner.entity.clone());
                    }

                    if result.len() > longest_simulation {
                        longest_simulation = result.len();
                        logs.push(format!(
                            "Country: {} | Cities: {} (Longest so far!)",
                            country.name,
                            cities.len()
                        ));
                    } else {
                        logs.push(format!("Country: {} | Cities: {}", country.name, cities.len()));
                    }
                }
            }
        }

        // Country draws all start on `starting_date`; the world waits for the longest one
        let starting_date = advance_by(starting_date, longest_simulation as u64);

        Composition {
            pool,
            starting_date,
            longest_simulation,
        }
    }
}

/// The world pool ready to be drawn
#[derive(Debug, Clone)]
pub struct Composition {
    pub pool: Vec<Entity>,
    pub starting_date: NaiveDate,
    /// Length of the longest country draw (0 when no country draws ran)
    pub longest_simulation: usize,
}
