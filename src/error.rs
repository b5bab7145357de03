//! Error types for elspot-proxy

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Upstream transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Upstream request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("Upstream returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    #[error("Upstream body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("Failed to decode upstream body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(err)
        } else {
            Error::Transport(err)
        }
    }
}
