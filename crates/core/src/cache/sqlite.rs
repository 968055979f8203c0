//! SQLite-backed movie cache implementation.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use super::{CacheEntry, CacheError, CacheStats, MovieCache};
use crate::movie::{Movie, MovieDetails, MovieKind};

/// Bump on any schema change. The table is dropped and recreated when the
/// stored version differs - this is a cache, not authoritative storage.
const SCHEMA_VERSION: i64 = 1;

/// SQLite-backed movie cache.
pub struct SqliteMovieCache {
    conn: Mutex<Connection>,
}

impl SqliteMovieCache {
    /// Open the cache, creating the database file and table if needed.
    pub fn new(path: &Path) -> Result<Self, CacheError> {
        let conn = Connection::open(path).map_err(|e| CacheError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory cache (useful for testing).
    pub fn in_memory() -> Result<Self, CacheError> {
        let conn =
            Connection::open_in_memory().map_err(|e| CacheError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), CacheError> {
        let version: i64 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .map_err(|e| CacheError::Database(e.to_string()))?;

        if version != 0 && version != SCHEMA_VERSION {
            info!(
                "Cache schema version {} != {}, dropping cached data",
                version, SCHEMA_VERSION
            );
            conn.execute_batch("DROP TABLE IF EXISTS movie_cache;")
                .map_err(|e| CacheError::Database(e.to_string()))?;
        }

        conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS movie_cache (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                year TEXT NOT NULL,
                kind TEXT NOT NULL,
                poster_url TEXT,
                rating TEXT,
                plot TEXT,
                actors TEXT,
                director TEXT,
                genre TEXT,
                runtime TEXT,
                has_details INTEGER NOT NULL DEFAULT 0,
                recorded_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_movie_cache_recorded ON movie_cache(recorded_at);

            PRAGMA user_version = {};
            "#,
            SCHEMA_VERSION
        ))
        .map_err(|e| CacheError::Database(e.to_string()))?;

        Ok(())
    }

    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<CacheEntry> {
        let kind_str: String = row.get(3)?;
        let has_details: bool = row.get(11)?;
        let recorded_at_str: String = row.get(12)?;

        // An unreadable timestamp must read as stale, never fresh, so a
        // corrupt row gets refreshed from the remote instead of pinned.
        let recorded_at = DateTime::parse_from_rfc3339(&recorded_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        let details = if has_details {
            Some(MovieDetails {
                rating: row.get(5)?,
                plot: row.get(6)?,
                actors: row.get(7)?,
                director: row.get(8)?,
                genre: row.get(9)?,
                runtime: row.get(10)?,
            })
        } else {
            None
        };

        Ok(CacheEntry {
            movie: Movie {
                id: row.get(0)?,
                title: row.get(1)?,
                year: row.get(2)?,
                kind: MovieKind::parse(&kind_str),
                poster_url: row.get(4)?,
                details,
            },
            recorded_at,
        })
    }

    fn kind_to_str(kind: MovieKind) -> &'static str {
        match kind {
            MovieKind::Movie => "movie",
            MovieKind::Series => "series",
            MovieKind::Other => "other",
        }
    }
}

impl MovieCache for SqliteMovieCache {
    fn get(&self, id: &str) -> Result<Option<CacheEntry>, CacheError> {
        let conn = self.conn.lock().unwrap();

        conn.query_row(
            "SELECT id, title, year, kind, poster_url, rating, plot, actors,
                    director, genre, runtime, has_details, recorded_at
             FROM movie_cache WHERE id = ?",
            params![id],
            Self::row_to_entry,
        )
        .optional()
        .map_err(|e| CacheError::Database(e.to_string()))
    }

    fn put(&self, movie: &Movie, recorded_at: DateTime<Utc>) -> Result<(), CacheError> {
        let conn = self.conn.lock().unwrap();
        let details = movie.details.clone().unwrap_or_default();

        conn.execute(
            "INSERT OR REPLACE INTO movie_cache
                 (id, title, year, kind, poster_url, rating, plot, actors,
                  director, genre, runtime, has_details, recorded_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                movie.id,
                movie.title,
                movie.year,
                Self::kind_to_str(movie.kind),
                movie.poster_url,
                details.rating,
                details.plot,
                details.actors,
                details.director,
                details.genre,
                details.runtime,
                movie.details.is_some(),
                recorded_at.to_rfc3339(),
            ],
        )
        .map_err(|e| CacheError::Database(e.to_string()))?;

        Ok(())
    }

    fn clear(&self) -> Result<u32, CacheError> {
        let conn = self.conn.lock().unwrap();
        let removed = conn
            .execute("DELETE FROM movie_cache", [])
            .map_err(|e| CacheError::Database(e.to_string()))?;
        Ok(removed as u32)
    }

    fn stats(&self) -> Result<CacheStats, CacheError> {
        let conn = self.conn.lock().unwrap();

        let entries: u64 = conn
            .query_row("SELECT COUNT(*) FROM movie_cache", [], |row| row.get(0))
            .map_err(|e| CacheError::Database(e.to_string()))?;

        let oldest: Option<String> = conn
            .query_row("SELECT MIN(recorded_at) FROM movie_cache", [], |row| {
                row.get(0)
            })
            .map_err(|e| CacheError::Database(e.to_string()))?;

        let oldest_recorded_at = oldest
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Ok(CacheStats {
            entries,
            oldest_recorded_at,
        })
    }
}
