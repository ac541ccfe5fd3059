//! Repeat a country royale until the tracked city wins

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::error::Result;
use crate::royale::analysis::TrackedOutcome;
use crate::royale::runner::{RoyaleOutcome, RoyaleRunner, RunOptions};

/// Attempts between progress log lines
pub const PROGRESS_INTERVAL: u32 = 100;

/// Result of a retry run
#[derive(Debug, Clone)]
pub struct RetryOutcome {
    pub attempts: u32,
    /// The run the tracked city won, if any
    pub winning: Option<RoyaleOutcome>,
}

impl RetryOutcome {
    pub fn won(&self) -> bool {
        self.winning.is_some()
    }
}

/// Run `country_name` royales until `tracked_name` wins
///
/// Attempt `n` draws with its own `ChaCha8Rng` seeded from `seed + n`, so
/// attempts share no state and a given seed replays the same sequence.
/// `threshold` of `Some(n)` with `n > 0` gives up after `n` attempts, while
/// `None` and `Some(0)` never give up. A country that resolves to no draw, or
/// a tracked city missing from its pool, stops after the first attempt.
pub fn run_until_winner(
    runner: &RoyaleRunner<'_>,
    country_name: &str,
    tracked_name: &str,
    threshold: Option<u32>,
    seed: u64,
) -> Result<RetryOutcome> {
    let runner = runner.with_options(RunOptions::quiet());
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(u64::from(attempts)));
        let outcome = runner.run_country(None, country_name, Some(tracked_name), &mut rng)?;

        if outcome.is_empty() {
            tracing::warn!("{} has no draw to win, stopping", country_name);
            return Ok(RetryOutcome { attempts, winning: None });
        }

        if outcome.tracked_outcome() == Some(&TrackedOutcome::Winner) {
            tracing::info!("{} won after {} attempts!", tracked_name, attempts);
            return Ok(RetryOutcome {
                attempts,
                winning: Some(outcome),
            });
        }

        if outcome.tracked_outcome() == Some(&TrackedOutcome::NotFound) {
            tracing::warn!("{} is not a city of {}, stopping", tracked_name, country_name);
            return Ok(RetryOutcome { attempts, winning: None });
        }

        if matches!(threshold, Some(limit) if limit > 0 && attempts == limit) {
            tracing::info!("After {} attempts, {} did not win. Stopping now.", attempts, tracked_name);
            return Ok(RetryOutcome { attempts, winning: None });
        }

        if attempts % PROGRESS_INTERVAL == 0 {
            tracing::info!("Attempts so far: {}", attempts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Entity;
    use crate::data::reference::{Country, WorldData};
    use crate::data::report::NullSink;

    fn world() -> WorldData {
        let mut data = WorldData::default();
        data.insert_country(
            Country::new("Canada", "CA"),
            vec![Entity::new("Vancouver"), Entity::new("Toronto"), Entity::new("Montreal")],
        );
        data.insert_country(Country::new("Solo", "SO"), vec![Entity::new("Only")]);
        data
    }

    #[test]
    fn test_eventually_wins() {
        let data = world();
        let runner = RoyaleRunner::new(&data, &NullSink, &NullSink);

        let outcome = run_until_winner(&runner, "Canada", "Vancouver", Some(10_000), 42).unwrap();

        assert!(outcome.won());
        let winning = outcome.winning.unwrap();
        assert!(winning.winner().unwrap().name_matches("vancouver"));
    }

    #[test]
    fn test_single_city_wins_first_try() {
        let data = world();
        let runner = RoyaleRunner::new(&data, &NullSink, &NullSink);

        let outcome = run_until_winner(&runner, "Solo", "only", None, 0).unwrap();
        assert_eq!(outcome.attempts, 1);
        assert!(outcome.won());
    }

    #[test]
    fn test_city_outside_pool_stops_immediately() {
        let data = world();
        let runner = RoyaleRunner::new(&data, &NullSink, &NullSink);

        let outcome = run_until_winner(&runner, "Canada", "Ottawa", None, 42).unwrap();
        assert_eq!(outcome.attempts, 1);
        assert!(!outcome.won());
    }

    #[test]
    fn test_threshold_caps_attempts() {
        let data = world();
        let runner = RoyaleRunner::new(&data, &NullSink, &NullSink);

        for seed in 0..20 {
            let outcome = run_until_winner(&runner, "Canada", "Montreal", Some(3), seed).unwrap();
            assert!(outcome.attempts >= 1 && outcome.attempts <= 3);
            assert!(outcome.won() || outcome.attempts == 3);
        }
    }

    #[test]
    fn test_zero_threshold_is_uncapped() {
        let data = world();
        let runner = RoyaleRunner::new(&data, &NullSink, &NullSink);

        let outcome = run_until_winner(&runner, "Canada", "Vancouver", Some(0), 42).unwrap();
        assert!(outcome.won());
        assert!(outcome.attempts >= 1);
    }

    #[test]
    fn test_unknown_country_stops_immediately() {
        let data = world();
        let runner = RoyaleRunner::new(&data, &NullSink, &NullSink);

        let outcome = run_until_winner(&runner, "Narnia", "Cair Paravel", None, 42).unwrap();
        assert_eq!(outcome.attempts, 1);
        assert!(!outcome.won());
    }

    #[test]
    fn test_same_seed_same_attempt_count() {
        let data = world();
        let runner = RoyaleRunner::new(&data, &NullSink, &NullSink);

        let first = run_until_winner(&runner, "Canada", "Toronto", Some(10_000), 7).unwrap();
        let second = run_until_winner(&runner, "Canada", "Toronto", Some(10_000), 7).unwrap();
        assert_eq!(first.attempts, second.attempts);
    }
}
