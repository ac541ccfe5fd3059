//! Draw engine
//!
//! Removes one uniformly random entity per day until the pool is exhausted.

use chrono::NaiveDate;
use rand::Rng;

use crate::core::calendar::Calendar;
use crate::core::types::{EliminationRecord, Entity, SimulationResult};

/// Run the elimination draw over `pool`
///
/// The first entity removed is dated `starting_date` (today when absent) and
/// each later removal one day after the previous one. The returned result is
/// winner-first: the last entity removed sits at the front.
///
/// `pool` is only read; the draw consumes a private copy.
pub fn run_simulation<R: Rng + ?Sized>(
    starting_date: Option<NaiveDate>,
    pool: &[Entity],
    rng: &mut R,
) -> SimulationResult {
    let mut calendar = Calendar::starting(starting_date);
    let mut remaining = pool.to_vec();
    let mut eliminated = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let index = rng.gen_range(0..remaining.len());
        // Order of the survivors carries no meaning, so swap_remove keeps each draw O(1)
        let draw = remaining.swap_remove(index);

        eliminated.push(EliminationRecord::new(calendar.current_day(), draw));
        calendar.advance();
    }
    eliminated.reverse();

    tracing::debug!(
        "Draw finished: {} entities, {} to {}",
        eliminated.len(),
        eliminated.last().map(|r| r.date.to_string()).unwrap_or_default(),
        eliminated.first().map(|r| r.date.to_string()).unwrap_or_default(),
    );

    SimulationResult::from_records(eliminated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pool(names: &[&str]) -> Vec<Entity> {
        names.iter().map(|n| Entity::new(*n)).collect()
    }

    #[test]
    fn test_empty_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let result = run_simulation(Some(day(2024, 1, 1)), &[], &mut rng);
        assert!(result.is_empty());
    }

    #[test]
    fn test_single_entity_is_winner_on_start_day() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let result = run_simulation(Some(day(2024, 1, 1)), &pool(&["Solo"]), &mut rng);

        assert_eq!(result.len(), 1);
        let winner = result.winner().unwrap();
        assert_eq!(winner.date, day(2024, 1, 1));
        assert_eq!(winner.entity.name, "Solo");
    }

    #[test]
    fn test_every_entity_drawn_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let names = ["A", "B", "C", "D", "E", "F", "G"];
        let result = run_simulation(Some(day(2024, 1, 1)), &pool(&names), &mut rng);

        let mut drawn: Vec<_> = result.iter().map(|r| r.entity.name.as_str()).collect();
        drawn.sort();
        assert_eq!(drawn, names);
    }

    #[test]
    fn test_duplicate_names_all_kept() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let result = run_simulation(Some(day(2024, 1, 1)), &pool(&["X", "X", "Y"]), &mut rng);
        let xs = result.iter().filter(|r| r.entity.name == "X").count();
        assert_eq!(xs, 2);
    }

    #[test]
    fn test_dates_step_one_day_from_loser() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let start = day(2024, 2, 27);
        let result = run_simulation(Some(start), &pool(&["A", "B", "C", "D"]), &mut rng);

        let dates: Vec<_> = result.iter().rev().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![day(2024, 2, 27), day(2024, 2, 28), day(2024, 2, 29), day(2024, 3, 1)]
        );
    }

    #[test]
    fn test_input_pool_untouched() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let original = pool(&["A", "B", "C"]);
        let snapshot = original.clone();
        let _ = run_simulation(None, &original, &mut rng);
        assert_eq!(original, snapshot);
    }

    #[test]
    fn test_same_seed_same_order() {
        let entities = pool(&["A", "B", "C", "D", "E"]);
        let a = run_simulation(Some(day(2024, 1, 1)), &entities, &mut ChaCha8Rng::seed_from_u64(9));
        let b = run_simulation(Some(day(2024, 1, 1)), &entities, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_start_defaults_to_today() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let before = crate::core::calendar::today();
        let result = run_simulation(None, &pool(&["Only"]), &mut rng);
        let after = crate::core::calendar::today();

        let date = result.winner().unwrap().date;
        assert!(date == before || date == after);
    }

    #[test]
    fn test_winner_distribution_roughly_uniform() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let entities = pool(&["A", "B", "C", "D"]);
        let mut wins: HashMap<String, u32> = HashMap::new();

        for _ in 0..4000 {
            let result = run_simulation(Some(day(2024, 1, 1)), &entities, &mut rng);
            *wins.entry(result.winner().unwrap().entity.name.clone()).or_default() += 1;
        }

        // Expect ~1000 each
        for name in ["A", "B", "C", "D"] {
            let count = wins.get(name).copied().unwrap_or(0);
            assert!((800..1200).contains(&count), "{} won {} times", name, count);
        }
    }
}
