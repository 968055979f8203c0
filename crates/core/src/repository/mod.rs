//! Movie repository - merges the cache and the remote source behind the
//! `MovieSource` seam.
//!
//! Keyword searches always go to the remote source. Identifier lookups go
//! through the cache: a fresh entry is served locally, anything else falls
//! back to the remote and refreshes the cache. Cache failures on either
//! path are absorbed here; only remote failures reach the caller.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::{debug, warn};

use crate::cache::MovieCache;
use crate::movie::{Movie, MovieSearchResult};
use crate::remote::{MovieSource, RemoteError};

/// Default staleness window for cached lookups.
pub const DEFAULT_STALENESS_MINS: i64 = 5;

/// Cache-merging movie repository.
pub struct MovieRepository {
    remote: Arc<dyn MovieSource>,
    cache: Arc<dyn MovieCache>,
    staleness: Duration,
}

impl MovieRepository {
    /// Create a repository with the default staleness window.
    pub fn new(remote: Arc<dyn MovieSource>, cache: Arc<dyn MovieCache>) -> Self {
        Self::with_staleness(remote, cache, DEFAULT_STALENESS_MINS)
    }

    /// Create a repository with a custom staleness window in minutes.
    pub fn with_staleness(
        remote: Arc<dyn MovieSource>,
        cache: Arc<dyn MovieCache>,
        staleness_mins: i64,
    ) -> Self {
        Self {
            remote,
            cache,
            staleness: Duration::minutes(staleness_mins),
        }
    }
}

#[async_trait]
impl MovieSource for MovieRepository {
    async fn search(&self, keyword: &str, page: u32) -> Result<MovieSearchResult, RemoteError> {
        self.remote.search(keyword, page).await
    }

    async fn get_movie(&self, id: &str) -> Result<Movie, RemoteError> {
        match self.cache.get(id) {
            Ok(Some(entry)) if Utc::now() - entry.recorded_at < self.staleness => {
                debug!("Cache hit for movie {}", id);
                return Ok(entry.movie);
            }
            Ok(Some(_)) => debug!("Cache entry for movie {} is stale", id),
            Ok(None) => debug!("Cache miss for movie {}", id),
            // A broken cache read is a miss, never a caller-visible error
            Err(e) => warn!("Cache read failed for movie {}: {}", id, e),
        }

        let movie = self.remote.get_movie(id).await?;

        // Best-effort write-back: a full cache must not fail the read
        if let Err(e) = self.cache.put(&movie, Utc::now()) {
            warn!("Cache write failed for movie {}: {}", id, e);
        }

        Ok(movie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockMovieCache, MockMovieSource};

    fn repository(
        remote: Arc<MockMovieSource>,
        cache: Arc<MockMovieCache>,
    ) -> MovieRepository {
        MovieRepository::new(remote, cache)
    }

    #[tokio::test]
    async fn test_fresh_cache_entry_skips_remote() {
        let remote = Arc::new(MockMovieSource::new());
        let cache = Arc::new(MockMovieCache::new());
        let movie = fixtures::movie_with_details("tt0133093", "The Matrix");

        cache
            .put(&movie, Utc::now() - Duration::minutes(4))
            .unwrap();

        let repo = repository(Arc::clone(&remote), Arc::clone(&cache));
        let fetched = repo.get_movie("tt0133093").await.unwrap();

        assert_eq!(fetched, movie);
        assert_eq!(remote.get_movie_count("tt0133093").await, 0);
    }

    #[tokio::test]
    async fn test_stale_cache_entry_refreshes_from_remote() {
        let remote = Arc::new(MockMovieSource::new());
        let cache = Arc::new(MockMovieCache::new());
        let stale = fixtures::movie("tt0133093", "The Matrix (old)");
        let fresh = fixtures::movie_with_details("tt0133093", "The Matrix");

        cache.put(&stale, Utc::now() - Duration::minutes(6)).unwrap();
        remote.set_movie(fresh.clone()).await;

        let repo = repository(Arc::clone(&remote), Arc::clone(&cache));
        let fetched = repo.get_movie("tt0133093").await.unwrap();

        assert_eq!(fetched, fresh);
        assert_eq!(remote.get_movie_count("tt0133093").await, 1);
        // Cache was overwritten with the refreshed record
        let entry = cache.get("tt0133093").unwrap().unwrap();
        assert_eq!(entry.movie, fresh);
    }

    #[tokio::test]
    async fn test_cache_miss_fetches_and_writes_back() {
        let remote = Arc::new(MockMovieSource::new());
        let cache = Arc::new(MockMovieCache::new());
        let movie = fixtures::movie_with_details("tt0083658", "Blade Runner");
        remote.set_movie(movie.clone()).await;

        let repo = repository(Arc::clone(&remote), Arc::clone(&cache));
        let fetched = repo.get_movie("tt0083658").await.unwrap();

        assert_eq!(fetched, movie);
        assert!(cache.get("tt0083658").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cache_read_error_falls_back_to_remote() {
        let remote = Arc::new(MockMovieSource::new());
        let cache = Arc::new(MockMovieCache::new());
        let movie = fixtures::movie("tt0083658", "Blade Runner");
        remote.set_movie(movie.clone()).await;
        cache.fail_reads(true);

        let repo = repository(Arc::clone(&remote), Arc::clone(&cache));
        let fetched = repo.get_movie("tt0083658").await.unwrap();

        assert_eq!(fetched, movie);
    }

    #[tokio::test]
    async fn test_cache_write_error_does_not_fail_read() {
        let remote = Arc::new(MockMovieSource::new());
        let cache = Arc::new(MockMovieCache::new());
        let movie = fixtures::movie("tt0083658", "Blade Runner");
        remote.set_movie(movie.clone()).await;
        cache.fail_writes(true);

        let repo = repository(Arc::clone(&remote), Arc::clone(&cache));
        let fetched = repo.get_movie("tt0083658").await.unwrap();

        assert_eq!(fetched, movie);
    }

    #[tokio::test]
    async fn test_remote_error_propagates() {
        let remote = Arc::new(MockMovieSource::new());
        let cache = Arc::new(MockMovieCache::new());
        remote
            .set_movie_error("tt0000000", RemoteError::NotFound("Movie not found!".to_string()))
            .await;

        let repo = repository(Arc::clone(&remote), Arc::clone(&cache));
        let err = repo.get_movie("tt0000000").await.unwrap_err();

        match err {
            RemoteError::NotFound(msg) => assert_eq!(msg, "Movie not found!"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_delegates_to_remote() {
        let remote = Arc::new(MockMovieSource::new());
        let cache = Arc::new(MockMovieCache::new());
        remote
            .set_page("matrix", 1, fixtures::search_result(vec![fixtures::movie("a", "A")], 1))
            .await;

        let repo = repository(Arc::clone(&remote), Arc::clone(&cache));
        let result = repo.search("matrix", 1).await.unwrap();

        assert_eq!(result.movies.len(), 1);
        assert_eq!(remote.search_count("matrix", 1).await, 1);
    }
}
