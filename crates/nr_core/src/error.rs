use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid rule set: {0}")]
    InvalidRules(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Errors caused by the caller's request rather than by this service or
    /// the upstream provider.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::MissingParameter(_) | Error::InvalidParameter(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
