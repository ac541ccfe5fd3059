//! City Royale - random elimination draws over the world's cities

pub mod core;
pub mod data;
pub mod royale;
