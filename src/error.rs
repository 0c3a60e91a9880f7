use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("{0}")]
    MissingCredential(&'static str),
    #[error("RAWG API error ({resource}): Status {status}")]
    Fetch { resource: String, status: u16 },
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
