use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Upstream API error: {0}")]
    Upstream(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Permission denied: {0}")]
    Permission(String),

    #[error("Internal error: {0}")]
    Internal(#[from] eyre::Report),
}

impl BotError {
    /// Whether the error came from a direct message the recipient refused
    pub fn is_delivery(&self) -> bool {
        matches!(self, BotError::Delivery(_))
    }
}

pub type BotResult<T> = Result<T, BotError>;
