//! Movie cache - stores single-movie lookups from previous fetches.
//!
//! The cache is not a source of truth: entries are written on every
//! successful remote lookup and read back before the next one, with the
//! repository deciding staleness. On a schema change the whole cache is
//! dropped and rebuilt (destructive migration).

mod sqlite;

pub use sqlite::SqliteMovieCache;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::movie::Movie;

/// A cached movie plus the time it was fetched from the remote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub movie: Movie,
    /// When the record was fetched from the remote source.
    pub recorded_at: DateTime<Utc>,
}

/// Cache statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cached movies.
    pub entries: u64,
    /// Oldest recorded_at among cached entries, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest_recorded_at: Option<DateTime<Utc>>,
}

/// Errors from the movie cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),
}

/// Trait for movie cache storage.
pub trait MovieCache: Send + Sync {
    /// Look up a cached movie by identifier.
    fn get(&self, id: &str) -> Result<Option<CacheEntry>, CacheError>;

    /// Store a movie, overwriting any existing entry for the same id.
    fn put(&self, movie: &Movie, recorded_at: DateTime<Utc>) -> Result<(), CacheError>;

    /// Remove all cached entries.
    fn clear(&self) -> Result<u32, CacheError>;

    /// Get cache statistics.
    fn stats(&self) -> Result<CacheStats, CacheError>;
}
