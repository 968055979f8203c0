//! Core movie types.

use serde::{Deserialize, Serialize};

/// Kind of title as reported by the movie API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieKind {
    Movie,
    Series,
    /// Anything the API reports that is neither "movie" nor "series"
    /// (episodes, games, ...).
    Other,
}

impl MovieKind {
    /// Parse the API's free-form type string.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "movie" => MovieKind::Movie,
            "series" => MovieKind::Series,
            _ => MovieKind::Other,
        }
    }
}

/// A single movie record.
///
/// Identity is the `id`; equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Unique identifier assigned by the movie API.
    pub id: String,
    /// Title.
    pub title: String,
    /// Release year as reported by the API. Kept as a string because
    /// series report ranges ("2008-2013").
    pub year: String,
    /// Movie, series or other.
    pub kind: MovieKind,
    /// Poster URL, if the API has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    /// Extended metadata, present on identifier lookups only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<MovieDetails>,
}

/// Extended metadata returned by identifier lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
}

/// One page of keyword search results plus the server-reported total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSearchResult {
    /// Movies on this page, in server order.
    pub movies: Vec<Movie>,
    /// Total matching results across all pages, as reported by the server.
    pub total_results: u32,
}

impl MovieSearchResult {
    /// Total page count: ceiling division by `page_size`, at least 1,
    /// capped at `max_pages`.
    pub fn total_pages(&self, page_size: u32, max_pages: u32) -> u32 {
        self.total_results.div_ceil(page_size).clamp(1, max_pages)
    }
}
