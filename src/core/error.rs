use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoyaleError {
    #[error("Country '{0}' not found.")]
    PoolNotFound(String),

    #[error("No cities found for {0}.")]
    EmptyPool(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RoyaleError {
    /// Pool conditions the orchestrators absorb into a default outcome
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RoyaleError::PoolNotFound(_) | RoyaleError::EmptyPool(_))
    }
}

pub type Result<T> = std::result::Result<T, RoyaleError>;
