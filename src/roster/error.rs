use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    /// A record input without an `id`. Carries the item's position in its batch.
    #[error("Malformed record at position {position}: missing id")]
    MalformedRecord { position: usize },

    /// A filter rule input without an `id`. Carries the item's position in its batch.
    #[error("Malformed filter rule at position {position}: missing id")]
    MalformedFilterRule { position: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Bootstrap error: {0}")]
    Bootstrap(String),

    #[error("Render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;
