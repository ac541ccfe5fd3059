//! Country and world royale orchestration

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::calendar::{file_timestamp, today};
use crate::core::error::{Result, RoyaleError};
use crate::core::types::{Entity, SimulationResult};
use crate::data::reference::ReferenceData;
use crate::data::report::{ConsoleSink, ReportSink};
use crate::royale::analysis::{analyze, AnalysisSummary, TrackedOutcome};
use crate::royale::draw::run_simulation;
use crate::royale::strategy::CompositionStrategy;

/// Pool name used for the world draw
pub const WORLD_POOL_NAME: &str = "World";

/// What a caller wants done with a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    pub save_to_file: bool,
    pub print_to_console: bool,
}

impl RunOptions {
    /// Neither saves nor prints
    pub fn quiet() -> Self {
        Self {
            save_to_file: false,
            print_to_console: false,
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            save_to_file: false,
            print_to_console: true,
        }
    }
}

/// Summary, ordered results and log lines of one royale
///
/// When the pool could not be resolved or was empty, `summary` is `None`,
/// `results` is empty and the logs say why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoyaleOutcome {
    pub summary: Option<AnalysisSummary>,
    pub results: SimulationResult,
    pub logs: Vec<String>,
}

impl RoyaleOutcome {
    fn skipped(logs: Vec<String>) -> Self {
        Self {
            summary: None,
            results: SimulationResult::empty(),
            logs,
        }
    }

    /// True for the default shape returned when no draw ran
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.results.is_empty()
    }

    pub fn winner(&self) -> Option<&Entity> {
        self.results.winner().map(|r| &r.entity)
    }

    pub fn tracked_outcome(&self) -> Option<&TrackedOutcome> {
        self.summary.as_ref().and_then(AnalysisSummary::tracked_outcome)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Runs royales against one set of reference data and sinks
#[derive(Clone, Copy)]
pub struct RoyaleRunner<'a> {
    data: &'a dyn ReferenceData,
    reports: &'a dyn ReportSink,
    console: &'a dyn ConsoleSink,
    options: RunOptions,
}

impl<'a> RoyaleRunner<'a> {
    pub fn new(data: &'a dyn ReferenceData, reports: &'a dyn ReportSink, console: &'a dyn ConsoleSink) -> Self {
        Self {
            data,
            reports,
            console,
            options: RunOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Draw among the cities of one country
    ///
    /// An unknown country or one without cities is not an error: the outcome
    /// is empty and the logs explain it. Only sink failures return `Err`.
    pub fn run_country<R: Rng + ?Sized>(
        &self,
        starting_date: Option<NaiveDate>,
        country_name: &str,
        tracked_name: Option<&str>,
        rng: &mut R,
    ) -> Result<RoyaleOutcome> {
        let mut logs = vec![
            "--- Country City Royale ---\n".to_string(),
            "There can only be one LUCKIEST CITY IN THE COUNTRY!\n".to_string(),
        ];

        let cities = match self.resolve_pool(country_name, &mut logs) {
            Ok(cities) => cities,
            Err(e) if e.is_recoverable() => {
                tracing::warn!("Country royale skipped: {}", e);
                self.emit(&logs);
                return Ok(RoyaleOutcome::skipped(logs));
            }
            Err(e) => return Err(e),
        };

        let results = run_simulation(starting_date, cities, rng);
        let (summary, analysis) = analyze(&results, country_name, tracked_name);
        logs.push(analysis.clone());

        if self.options.save_to_file {
            let slug = country_name.to_lowercase().replace(' ', "_");
            let destination = format!("{}-city-royale-{}.txt", slug, file_timestamp());
            self.reports.persist(&analysis, &results, &destination)?;
        }

        self.emit(&logs);
        Ok(RoyaleOutcome { summary, results, logs })
    }

    /// Draw among the cities of the whole world
    ///
    /// `strategy` decides whether countries first hold their own draws
    /// (simultaneously, from `starting_date`) or all cities meet directly.
    pub fn run_global<R: Rng + ?Sized>(
        &self,
        starting_date: Option<NaiveDate>,
        tracked_name: Option<&str>,
        strategy: CompositionStrategy,
        rng: &mut R,
    ) -> Result<RoyaleOutcome> {
        let starting_date = starting_date.unwrap_or_else(today);

        let mut logs = vec![
            "--- Global City Royale ---\n".to_string(),
            "There can only be one LUCKIEST CITY IN THE WORLD!\n".to_string(),
            "Running country-level simulations...\n".to_string(),
        ];

        let composition = strategy.compose(self.data, starting_date, rng, &mut logs);
        tracing::info!(
            "World pool ready: {} entities, draw starts {} ({:?})",
            composition.pool.len(),
            composition.starting_date,
            strategy
        );

        let results = run_simulation(Some(composition.starting_date), &composition.pool, rng);
        let (summary, analysis) = analyze(&results, WORLD_POOL_NAME, tracked_name);
        logs.push(analysis.clone());

        if self.options.save_to_file {
            let destination = format!("global-city-royale-{}.txt", file_timestamp());
            self.reports.persist(&analysis, &results, &destination)?;
        }

        self.emit(&logs);
        Ok(RoyaleOutcome { summary, results, logs })
    }

    fn resolve_pool(&self, country_name: &str, logs: &mut Vec<String>) -> Result<&'a [Entity]> {
        let data = self.data;

        let code = match data.resolve_code(country_name) {
            Some(code) => code,
            None => {
                let err = RoyaleError::PoolNotFound(country_name.to_string());
                logs.push(err.to_string());
                return Err(err);
            }
        };
        logs.push(format!("Country Code: {}", code));

        let cities = data.members_of(code);
        if cities.is_empty() {
            let err = RoyaleError::EmptyPool(country_name.to_string());
            logs.push(format!("{}\n", err));
            return Err(err);
        }
        logs.push(format!("Number of cities found for {}: {}\n", country_name, cities.len()));

        Ok(cities)
    }

    fn emit(&self, logs: &[String]) {
        if self.options.print_to_console {
            self.console.emit(logs);
        }
    }
}
