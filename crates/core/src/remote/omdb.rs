//! OMDb API client.
//!
//! A single GET endpoint serves both keyword search (`s` + `page`) and
//! identifier lookup (`i` + `plot=full`). Errors are reported inside a
//! 200 response body as `{"Response": "False", "Error": "..."}`.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{MovieSource, RemoteError};
use crate::movie::{Movie, MovieDetails, MovieKind, MovieSearchResult};

/// OMDb API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    /// OMDb API key (required).
    pub api_key: String,
    /// Base URL (default: https://www.omdbapi.com).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

/// OMDb API client.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Create a new OMDb client.
    pub fn new(config: OmdbConfig) -> Result<Self, RemoteError> {
        if config.api_key.is_empty() {
            return Err(RemoteError::NotConfigured(
                "OMDb API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://www.omdbapi.com".to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }
}

#[async_trait::async_trait]
impl MovieSource for OmdbClient {
    async fn search(&self, keyword: &str, page: u32) -> Result<MovieSearchResult, RemoteError> {
        debug!("OMDb search: keyword='{}', page={}", keyword, page);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("s", keyword),
                ("page", &page.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: OmdbSearchResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Malformed(format!("undecodable search response: {}", e)))?;

        body.try_into()
    }

    async fn get_movie(&self, id: &str) -> Result<Movie, RemoteError> {
        debug!("OMDb lookup: id={}", id);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("i", id),
                ("plot", "full"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: OmdbMovieResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Malformed(format!("undecodable movie response: {}", e)))?;

        body.try_into()
    }
}

// ============================================================================
// OMDb wire types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Search")]
    search: Option<Vec<OmdbSearchItem>>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Type")]
    kind: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbMovieResponse {
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Type")]
    kind: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "imdbRating")]
    rating: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
}

/// The API uses the literal string "N/A" for absent values.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != "N/A")
}

fn required(value: Option<String>, field: &str) -> Result<String, RemoteError> {
    value.ok_or_else(|| RemoteError::Malformed(format!("missing field {}", field)))
}

// ============================================================================
// Conversions
// ============================================================================

impl TryFrom<OmdbSearchItem> for Movie {
    type Error = RemoteError;

    fn try_from(item: OmdbSearchItem) -> Result<Self, RemoteError> {
        Ok(Movie {
            id: required(item.imdb_id, "imdbID")?,
            title: required(item.title, "Title")?,
            year: required(item.year, "Year")?,
            kind: item
                .kind
                .map(|t| MovieKind::parse(&t))
                .unwrap_or(MovieKind::Other),
            poster_url: present(item.poster),
            details: None,
        })
    }
}

impl TryFrom<OmdbSearchResponse> for MovieSearchResult {
    type Error = RemoteError;

    fn try_from(body: OmdbSearchResponse) -> Result<Self, RemoteError> {
        if let Some(message) = body.error {
            return Err(RemoteError::from_api_message(message));
        }

        let items = body
            .search
            .ok_or_else(|| RemoteError::Malformed("missing field Search".to_string()))?;

        let total_raw = required(body.total_results, "totalResults")?;
        let total_results = total_raw.parse().map_err(|_| {
            RemoteError::Malformed(format!("totalResults is not numeric: {}", total_raw))
        })?;

        let movies = items
            .into_iter()
            .map(Movie::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MovieSearchResult {
            movies,
            total_results,
        })
    }
}

impl TryFrom<OmdbMovieResponse> for Movie {
    type Error = RemoteError;

    fn try_from(body: OmdbMovieResponse) -> Result<Self, RemoteError> {
        if let Some(message) = body.error {
            return Err(RemoteError::from_api_message(message));
        }

        Ok(Movie {
            id: required(body.imdb_id, "imdbID")?,
            title: required(body.title, "Title")?,
            year: required(body.year, "Year")?,
            kind: body
                .kind
                .map(|t| MovieKind::parse(&t))
                .unwrap_or(MovieKind::Other),
            poster_url: present(body.poster),
            details: Some(MovieDetails {
                rating: present(body.rating),
                plot: present(body.plot),
                actors: present(body.actors),
                director: present(body.director),
                genre: present(body.genre),
                runtime: present(body.runtime),
            }),
        })
    }
}
