//! Mock movie source for testing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify, RwLock};

use crate::movie::{Movie, MovieSearchResult};
use crate::remote::{MovieSource, RemoteError};

/// Mock implementation of the `MovieSource` trait.
///
/// Provides controllable behavior for testing:
/// - Per-(keyword, page) search results and per-id movies
/// - One-shot error injection, per page or per id
/// - Call recording for count assertions
/// - A gate to hold the next request open, for cancellation tests
///
/// # Example
///
/// ```rust,ignore
/// use marquee_core::testing::{fixtures, MockMovieSource};
///
/// let source = MockMovieSource::new();
/// source.set_page("matrix", 1, fixtures::page_of("matrix", 1, 10, 43)).await;
///
/// let result = source.search("matrix", 1).await?;
/// assert_eq!(result.movies.len(), 10);
/// assert_eq!(source.search_count("matrix", 1).await, 1);
/// ```
pub struct MockMovieSource {
    /// Configured search results by (keyword, page).
    pages: RwLock<HashMap<(String, u32), MovieSearchResult>>,
    /// One-shot search errors by (keyword, page); consumed on delivery.
    page_errors: Mutex<HashMap<(String, u32), RemoteError>>,
    /// Configured movies by id.
    movies: RwLock<HashMap<String, Movie>>,
    /// One-shot lookup errors by id; consumed on delivery.
    movie_errors: Mutex<HashMap<String, RemoteError>>,
    /// Recorded search calls.
    searches: RwLock<Vec<(String, u32)>>,
    /// Recorded lookup calls.
    lookups: RwLock<Vec<String>>,
    /// If set, the next request blocks until the gate is released.
    gate: Mutex<Option<Arc<Notify>>>,
}

impl Default for MockMovieSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMovieSource {
    /// Create a new mock source with no configured responses.
    pub fn new() -> Self {
        Self {
            pages: RwLock::new(HashMap::new()),
            page_errors: Mutex::new(HashMap::new()),
            movies: RwLock::new(HashMap::new()),
            movie_errors: Mutex::new(HashMap::new()),
            searches: RwLock::new(Vec::new()),
            lookups: RwLock::new(Vec::new()),
            gate: Mutex::new(None),
        }
    }

    /// Configure the result for a (keyword, page) search.
    pub async fn set_page(&self, keyword: &str, page: u32, result: MovieSearchResult) {
        self.pages
            .write()
            .await
            .insert((keyword.to_string(), page), result);
    }

    /// Configure the next search for (keyword, page) to fail once.
    pub async fn set_page_error(&self, keyword: &str, page: u32, error: RemoteError) {
        self.page_errors
            .lock()
            .await
            .insert((keyword.to_string(), page), error);
    }

    /// Configure the movie returned for its own id.
    pub async fn set_movie(&self, movie: Movie) {
        self.movies.write().await.insert(movie.id.clone(), movie);
    }

    /// Configure the next lookup of `id` to fail once.
    pub async fn set_movie_error(&self, id: &str, error: RemoteError) {
        self.movie_errors.lock().await.insert(id.to_string(), error);
    }

    /// Hold the next request open until the returned gate is notified.
    pub async fn hold_next_request(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().await = Some(Arc::clone(&notify));
        notify
    }

    /// Number of searches issued for a specific (keyword, page).
    pub async fn search_count(&self, keyword: &str, page: u32) -> usize {
        self.searches
            .read()
            .await
            .iter()
            .filter(|(k, p)| k == keyword && *p == page)
            .count()
    }

    /// Total number of searches issued.
    pub async fn total_search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    /// Number of lookups issued for an id.
    pub async fn get_movie_count(&self, id: &str) -> usize {
        self.lookups.read().await.iter().filter(|l| *l == id).count()
    }

    async fn wait_if_held(&self) {
        let gate = self.gate.lock().await.take();
        if let Some(notify) = gate {
            notify.notified().await;
        }
    }
}

#[async_trait]
impl MovieSource for MockMovieSource {
    async fn search(&self, keyword: &str, page: u32) -> Result<MovieSearchResult, RemoteError> {
        self.searches
            .write()
            .await
            .push((keyword.to_string(), page));

        self.wait_if_held().await;

        let key = (keyword.to_string(), page);
        if let Some(err) = self.page_errors.lock().await.remove(&key) {
            return Err(err);
        }

        self.pages
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound("Movie not found!".to_string()))
    }

    async fn get_movie(&self, id: &str) -> Result<Movie, RemoteError> {
        self.lookups.write().await.push(id.to_string());

        self.wait_if_held().await;

        if let Some(err) = self.movie_errors.lock().await.remove(id) {
            return Err(err);
        }

        self.movies
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound("Movie not found!".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_configured_page_returned() {
        let source = MockMovieSource::new();
        source
            .set_page("matrix", 1, fixtures::page_of("matrix", 1, 10, 43))
            .await;

        let result = source.search("matrix", 1).await.unwrap();
        assert_eq!(result.movies.len(), 10);
        assert_eq!(result.total_results, 43);
    }

    #[tokio::test]
    async fn test_unconfigured_search_is_not_found() {
        let source = MockMovieSource::new();
        let err = source.search("nothing", 1).await.unwrap_err();
        assert!(matches!(err, RemoteError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_error_injection_is_one_shot() {
        let source = MockMovieSource::new();
        source
            .set_page("matrix", 2, fixtures::page_of("matrix", 2, 10, 43))
            .await;
        source
            .set_page_error("matrix", 2, RemoteError::Api("boom".to_string()))
            .await;

        assert!(source.search("matrix", 2).await.is_err());
        assert!(source.search("matrix", 2).await.is_ok());
        assert_eq!(source.search_count("matrix", 2).await, 2);
    }

    #[tokio::test]
    async fn test_call_recording() {
        let source = MockMovieSource::new();
        let _ = source.search("a", 1).await;
        let _ = source.search("a", 2).await;
        let _ = source.get_movie("tt1").await;

        assert_eq!(source.search_count("a", 1).await, 1);
        assert_eq!(source.total_search_count().await, 2);
        assert_eq!(source.get_movie_count("tt1").await, 1);
    }

    #[tokio::test]
    async fn test_gate_holds_request() {
        let source = Arc::new(MockMovieSource::new());
        source
            .set_page("matrix", 1, fixtures::page_of("matrix", 1, 10, 10))
            .await;
        let gate = source.hold_next_request().await;

        let source_clone = Arc::clone(&source);
        let task = tokio::spawn(async move { source_clone.search("matrix", 1).await });

        // The call is recorded but not yet resolved
        tokio::task::yield_now().await;
        assert_eq!(source.search_count("matrix", 1).await, 1);
        assert!(!task.is_finished());

        gate.notify_one();
        assert!(task.await.unwrap().is_ok());
    }
}
