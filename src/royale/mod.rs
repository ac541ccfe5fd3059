//! City Royale
//!
//! One city is drawn out of a pool per day until a single winner remains.
//! Country royales draw among one country's cities; the world royale either
//! pools every city or first crowns one winner per country.

pub mod analysis;
pub mod draw;
pub mod retry;
pub mod runner;
pub mod strategy;

pub use analysis::{analyze, classify, AnalysisSummary, TrackedAnalysis, TrackedOutcome};
pub use draw::run_simulation;
pub use retry::{run_until_winner, RetryOutcome};
pub use runner::{RoyaleOutcome, RoyaleRunner, RunOptions, WORLD_POOL_NAME};
pub use strategy::{Composition, CompositionStrategy};
