//! Remote movie data source.
//!
//! Talks to an OMDb-style HTTP API: keyword search is paginated
//! server-side, identifier lookups return a single record with full
//! metadata. API-level errors arrive embedded in an otherwise-successful
//! response body and are mapped to distinguishable error kinds here.

mod omdb;

pub use omdb::{OmdbClient, OmdbConfig};

use async_trait::async_trait;
use thiserror::Error;

use crate::movie::{Movie, MovieSearchResult};

/// Errors from the remote movie source.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP/network failure (propagated as-is).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API reported no match for the query. The API's own message is
    /// preserved verbatim (e.g. "Movie not found!") so callers can render
    /// a distinct empty state.
    #[error("{0}")]
    NotFound(String),

    /// The API reported an error other than "not found".
    #[error("API error: {0}")]
    Api(String),

    /// A required field was missing or unparsable in the response.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

impl RemoteError {
    /// Classify an API-reported error message. Anything that reads as
    /// "not found" stays distinguishable from generic API errors.
    pub fn from_api_message(message: String) -> Self {
        if message.to_ascii_lowercase().contains("not found") {
            RemoteError::NotFound(message)
        } else {
            RemoteError::Api(message)
        }
    }
}

/// Trait for movie sources.
///
/// Implemented by the HTTP client and by the cache-merging repository,
/// so consumers depend on one seam regardless of caching.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Keyword search, paginated server-side (pages are 1-based).
    async fn search(&self, keyword: &str, page: u32) -> Result<MovieSearchResult, RemoteError>;

    /// Fetch a single movie with full metadata by identifier.
    async fn get_movie(&self, id: &str) -> Result<Movie, RemoteError>;
}
