// crates/metsample-core/src/error.rs

use thiserror::Error;

/// Failure talking to either collection endpoint.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RemoteError {
    pub fn url(&self) -> &str {
        match self {
            RemoteError::Transport { url, .. }
            | RemoteError::Status { url, .. }
            | RemoteError::Decode { url, .. } => url,
        }
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Chart rendering failed: {0}")]
    Visualize(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
