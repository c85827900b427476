use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotekeeperError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Malformed document {key}: {reason}")]
    MalformedDocument { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, NotekeeperError>;
