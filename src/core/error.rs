//! Error types for rate lookups.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// A request that cannot be turned into a URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("{0} is not a supported currency")]
    UnsupportedCurrency(String),

    /// Not "latest" and not 10 characters long.
    #[error("a date in the YYYY-MM-DD format was not entered: {0:?}")]
    WrongLength(String),

    #[error("no valid date was found in {0:?}")]
    NoDateFound(String),

    #[error("{0} is not a real calendar date")]
    NotACalendarDate(String),
}

/// Errors surfaced by [`crate::client::RatesClient`].
#[derive(Debug, Error)]
pub enum RatesError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error("rates service returned HTTP {status} for {url}")]
    Remote { status: StatusCode, url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be built, e.g. from a bad proxy URL.
    #[error("failed to set up HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to parse rates response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The cache file holds non-empty content that is not JSON.
    #[error("cache file {} is corrupt: {source}", .path.display())]
    CacheCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cache file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RatesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RatesError::Io {
            path: path.into(),
            source,
        }
    }
}
