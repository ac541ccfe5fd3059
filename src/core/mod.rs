pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::{format_day, today};
pub use config::RoyaleConfig;
pub use error::{Result, RoyaleError};
pub use types::{EliminationRecord, Entity, SimulationResult};
