use thiserror::Error;

#[derive(Error, Debug)]
pub enum HypixelError {
    #[error("Hypixel API key is not configured")]
    MissingApiKey,

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Hypixel API error: {cause}")]
    Api { cause: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

pub type HypixelResult<T> = Result<T, HypixelError>;
