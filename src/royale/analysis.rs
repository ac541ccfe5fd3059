//! Result analysis
//!
//! Derives the summary and the human-readable report of a draw run. Both come
//! from the same `SimulationResult` and nothing else, so analysing a result
//! twice gives the same answer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::calendar::format_day;
use crate::core::types::{EliminationRecord, SimulationResult};

/// Report text for an empty result
pub const NO_RESULTS_MESSAGE: &str = "No results to analyze.";

/// How a tracked entity fared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TrackedOutcome {
    Winner,
    Loser,
    Eliminated {
        #[serde(rename = "elimination_index")]
        rank: usize,
        #[serde(rename = "elimination_date")]
        date: NaiveDate,
    },
    NotFound,
}

/// Tracked entity name and its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedAnalysis {
    pub city_name: String,
    #[serde(flatten)]
    pub outcome: TrackedOutcome,
}

/// Summary of one draw run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub name: String,
    pub total_cities: usize,
    pub winner: EliminationRecord,
    pub loser: EliminationRecord,
    /// Day the loser was eliminated
    pub start_date: NaiveDate,
    /// Day the winner was eliminated
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracked_city_analysis: Option<TrackedAnalysis>,
}

impl AnalysisSummary {
    pub fn tracked_outcome(&self) -> Option<&TrackedOutcome> {
        self.tracked_city_analysis.as_ref().map(|t| &t.outcome)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Classify `tracked_name` against `results`
///
/// The first match from the front decides: rank 1 is the winner, the last
/// rank is the loser, anything between was eliminated on its record's day.
pub fn classify(results: &SimulationResult, tracked_name: &str) -> TrackedOutcome {
    match results.find(tracked_name) {
        None => TrackedOutcome::NotFound,
        Some((1, _)) => TrackedOutcome::Winner,
        Some((rank, _)) if rank == results.len() => TrackedOutcome::Loser,
        Some((rank, record)) => TrackedOutcome::Eliminated {
            rank,
            date: record.date,
        },
    }
}

fn tracked_lines(tracked: &TrackedAnalysis, pool_name: &str) -> Vec<String> {
    let name = &tracked.city_name;
    let headline = format!("{} is the ULTIMATE {}", name, pool_name.to_uppercase());

    let line = match &tracked.outcome {
        TrackedOutcome::Winner => format!("{} WINNER! :D", headline),
        TrackedOutcome::Loser => format!("{} LOSER :O", headline),
        TrackedOutcome::Eliminated { rank, date } => {
            format!("{}º {} was eliminated on {}", rank, name, format_day(*date))
        }
        TrackedOutcome::NotFound => format!("{} was not found in the results.", name),
    };

    vec!["\n--- Tracked City Analysis ---".to_string(), line, String::new()]
}

/// Analyse a draw run over `pool_name`
///
/// Returns `None` and a fixed message when `results` is empty.
pub fn analyze(
    results: &SimulationResult,
    pool_name: &str,
    tracked_name: Option<&str>,
) -> (Option<AnalysisSummary>, String) {
    let (winner, loser) = match (results.winner(), results.loser()) {
        (Some(w), Some(l)) => (w, l),
        _ => return (None, NO_RESULTS_MESSAGE.to_string()),
    };

    let tracked = tracked_name.map(|name| TrackedAnalysis {
        city_name: name.to_string(),
        outcome: classify(results, name),
    });

    let mut lines = Vec::new();
    if let Some(tracked) = &tracked {
        lines.extend(tracked_lines(tracked, pool_name));
    }

    let pool_upper = pool_name.to_uppercase();
    lines.push("--- Overall Analysis ---".to_string());
    lines.push(format!(
        "ULTIMATE {} WINNER: {} on {}",
        pool_upper,
        winner.entity.name,
        format_day(winner.date)
    ));
    lines.push(format!(
        "ULTIMATE {} LOSER: {} on {}",
        pool_upper,
        loser.entity.name,
        format_day(loser.date)
    ));

    let summary = AnalysisSummary {
        name: pool_name.to_string(),
        total_cities: results.len(),
        winner: winner.clone(),
        loser: loser.clone(),
        start_date: loser.date,
        end_date: winner.date,
        tracked_city_analysis: tracked,
    };

    (Some(summary), lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Entity;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn abc() -> SimulationResult {
        SimulationResult::from_records(vec![
            EliminationRecord::new(day(3), Entity::new("A")),
            EliminationRecord::new(day(2), Entity::new("B")),
            EliminationRecord::new(day(1), Entity::new("C")),
        ])
    }

    #[test]
    fn test_empty_results() {
        let (summary, text) = analyze(&SimulationResult::empty(), "Canada", Some("A"));
        assert!(summary.is_none());
        assert_eq!(text, NO_RESULTS_MESSAGE);
    }

    #[test]
    fn test_classify_positions() {
        let results = abc();
        assert_eq!(classify(&results, "A"), TrackedOutcome::Winner);
        assert_eq!(classify(&results, "c"), TrackedOutcome::Loser);
        assert_eq!(
            classify(&results, "B"),
            TrackedOutcome::Eliminated { rank: 2, date: day(2) }
        );
        assert_eq!(classify(&results, "Z"), TrackedOutcome::NotFound);
    }

    #[test]
    fn test_single_entity_tracked_is_winner() {
        let results = SimulationResult::from_records(vec![EliminationRecord::new(day(1), Entity::new("Solo"))]);
        assert_eq!(classify(&results, "solo"), TrackedOutcome::Winner);
    }

    #[test]
    fn test_summary_fields() {
        let (summary, _) = analyze(&abc(), "Canada", None);
        let summary = summary.unwrap();

        assert_eq!(summary.name, "Canada");
        assert_eq!(summary.total_cities, 3);
        assert_eq!(summary.winner.entity.name, "A");
        assert_eq!(summary.loser.entity.name, "C");
        assert_eq!(summary.start_date, day(1));
        assert_eq!(summary.end_date, day(3));
        assert!(summary.tracked_city_analysis.is_none());
    }

    #[test]
    fn test_report_text_without_tracking() {
        let (_, text) = analyze(&abc(), "Canada", None);
        assert_eq!(
            text,
            "--- Overall Analysis ---\n\
             ULTIMATE CANADA WINNER: A on 03-05-2024\n\
             ULTIMATE CANADA LOSER: C on 01-05-2024"
        );
    }

    #[test]
    fn test_report_text_for_eliminated() {
        let (_, text) = analyze(&abc(), "Canada", Some("B"));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "--- Tracked City Analysis ---");
        assert_eq!(lines[2], "2º B was eliminated on 02-05-2024");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "--- Overall Analysis ---");
    }

    #[test]
    fn test_report_text_for_winner_and_loser() {
        let (_, text) = analyze(&abc(), "World", Some("A"));
        assert!(text.contains("A is the ULTIMATE WORLD WINNER! :D"));

        let (_, text) = analyze(&abc(), "World", Some("C"));
        assert!(text.contains("C is the ULTIMATE WORLD LOSER :O"));

        let (_, text) = analyze(&abc(), "World", Some("Z"));
        assert!(text.contains("Z was not found in the results."));
    }

    #[test]
    fn test_analysis_is_repeatable() {
        let results = abc();
        let first = analyze(&results, "Canada", Some("B"));
        let second = analyze(&results, "Canada", Some("B"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_json_shape() {
        let (summary, _) = analyze(&abc(), "Canada", Some("B"));
        let json: serde_json::Value = serde_json::from_str(&summary.unwrap().to_json()).unwrap();

        assert_eq!(json["name"], "Canada");
        assert_eq!(json["start_date"], "2024-05-01");
        assert_eq!(json["tracked_city_analysis"]["outcome"], "eliminated");
        assert_eq!(json["tracked_city_analysis"]["elimination_index"], 2);
        assert_eq!(json["tracked_city_analysis"]["elimination_date"], "2024-05-02");
        assert_eq!(json["winner"]["entity"]["name"], "A");
    }
}
