//! Search session - drives keyword search, pagination and retry.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::types::{PageFooter, SearchFailure, SearchPhase, SearchResults, SearchViewState};
use crate::remote::{MovieSource, RemoteError};

/// Server-side page size of the movie API.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Hard page cap; pagination never proceeds past this page.
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Publishes view states, discarding writes from superseded operations.
///
/// Aborting a task stops it at its next await point, but a task that has
/// already passed its last await can still reach its publish call. The
/// generation check under the same lock that bumps it closes that window:
/// once `bump` returns, no publish from an older generation can land.
struct Publisher {
    state: watch::Sender<SearchViewState>,
    generation: Mutex<u64>,
}

impl Publisher {
    fn new() -> Self {
        Self {
            state: watch::Sender::new(SearchViewState::idle()),
            generation: Mutex::new(0),
        }
    }

    /// Invalidate all in-flight operations and return the new generation.
    fn bump(&self) -> u64 {
        let mut generation = self.generation.lock().unwrap();
        *generation += 1;
        *generation
    }

    /// Atomically flip the footer to Loading if a next page can be loaded.
    ///
    /// The snapshot, the guard checks and the footer publish happen under
    /// the generation lock, so two concurrent callers cannot both pass the
    /// `footer == Loading` check and request the same page twice.
    fn begin_page_load(&self) -> Option<(u64, String, SearchResults)> {
        let generation = self.generation.lock().unwrap();
        let current = self.state.borrow().clone();
        let SearchPhase::Success(results) = current.phase else {
            return None;
        };
        if results.footer == PageFooter::Loading || results.page >= results.total_pages {
            return None;
        }

        let mut loading = results.clone();
        loading.footer = PageFooter::Loading;
        self.state.send_replace(SearchViewState {
            keyword: current.keyword.clone(),
            phase: SearchPhase::Success(loading),
        });
        Some((*generation, current.keyword, results))
    }

    /// Publish `state` if `generation` is still current.
    fn publish(&self, generation: u64, state: SearchViewState) -> bool {
        let current = self.generation.lock().unwrap();
        if *current != generation {
            return false;
        }
        self.state.send_replace(state);
        true
    }

    fn snapshot(&self) -> SearchViewState {
        self.state.borrow().clone()
    }
}

/// Drives keyword search and pagination into a single observable state.
///
/// At most one search or page load is in flight at a time. `search` and
/// `reset` cancel whatever was running unconditionally; `load_next_page`
/// refuses to start while another page load is pending. Methods are
/// non-blocking; results arrive through the watch channel.
pub struct SearchSession {
    source: Arc<dyn MovieSource>,
    page_size: u32,
    max_pages: u32,
    publisher: Arc<Publisher>,
    inflight: Mutex<Option<JoinHandle<()>>>,
}

impl SearchSession {
    /// Create a session with the default page size and page cap.
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        Self::with_limits(source, DEFAULT_PAGE_SIZE, DEFAULT_MAX_PAGES)
    }

    /// Create a session with explicit page limits.
    pub fn with_limits(source: Arc<dyn MovieSource>, page_size: u32, max_pages: u32) -> Self {
        Self {
            source,
            page_size,
            max_pages,
            publisher: Arc::new(Publisher::new()),
            inflight: Mutex::new(None),
        }
    }

    /// Subscribe to view-state updates.
    pub fn subscribe(&self) -> watch::Receiver<SearchViewState> {
        self.state_sender().subscribe()
    }

    /// Current view-state snapshot.
    pub fn state(&self) -> SearchViewState {
        self.publisher.snapshot()
    }

    /// Start a new keyword search, cancelling any in-flight operation.
    ///
    /// Transitions to Loading immediately; the result of the page-1 fetch
    /// arrives as Success or Failure. Results of the superseded operation
    /// are discarded, never published.
    pub fn search(&self, keyword: &str) {
        let generation = self.publisher.bump();
        self.abort_inflight();

        let keyword = keyword.to_string();
        debug!("Search started: '{}'", keyword);
        self.publisher.publish(
            generation,
            SearchViewState {
                keyword: keyword.clone(),
                phase: SearchPhase::Loading,
            },
        );

        let source = Arc::clone(&self.source);
        let publisher = Arc::clone(&self.publisher);
        let (page_size, max_pages) = (self.page_size, self.max_pages);

        let handle = tokio::spawn(async move {
            let phase = match source.search(&keyword, 1).await {
                Ok(result) => {
                    let total_pages = result.total_pages(page_size, max_pages);
                    SearchPhase::Success(SearchResults {
                        movies: result.movies,
                        footer: PageFooter::None,
                        page: 1,
                        total_pages,
                    })
                }
                Err(RemoteError::NotFound(message)) => {
                    SearchPhase::Failure(SearchFailure::NotFound(message))
                }
                Err(e) => {
                    warn!("Search '{}' failed: {}", keyword, e);
                    SearchPhase::Failure(SearchFailure::Other(e.to_string()))
                }
            };
            publisher.publish(generation, SearchViewState { keyword, phase });
        });

        self.store_inflight(handle);
    }

    /// Cancel any in-flight operation and return to Idle immediately.
    pub fn reset(&self) {
        let generation = self.publisher.bump();
        self.abort_inflight();
        debug!("Search reset");
        self.publisher.publish(generation, SearchViewState::idle());
    }

    /// Request the next page of the current results.
    ///
    /// No-op unless the session is in Success, no page load is already
    /// pending, and there are pages left. While the fetch runs the loaded
    /// list stays visible with a loading footer. On failure the footer
    /// flips to Retry and a later call re-requests the same page.
    pub fn load_next_page(&self) {
        let Some((generation, keyword, results)) = self.publisher.begin_page_load() else {
            return;
        };
        let next_page = results.page + 1;

        debug!("Loading page {} for '{}'", next_page, keyword);

        let source = Arc::clone(&self.source);
        let publisher = Arc::clone(&self.publisher);
        let (page_size, max_pages) = (self.page_size, self.max_pages);

        let handle = tokio::spawn(async move {
            let phase = match source.search(&keyword, next_page).await {
                Ok(result) => {
                    // The server-reported total can shift between pages;
                    // never let it drop below the page we just loaded.
                    let total_pages = result.total_pages(page_size, max_pages).max(next_page);
                    let mut movies = results.movies;
                    movies.extend(result.movies);
                    SearchPhase::Success(SearchResults {
                        movies,
                        footer: PageFooter::None,
                        page: next_page,
                        total_pages,
                    })
                }
                Err(e) => {
                    warn!("Page {} load failed for '{}': {}", next_page, keyword, e);
                    let mut retry = results;
                    retry.footer = PageFooter::Retry;
                    SearchPhase::Success(retry)
                }
            };
            publisher.publish(generation, SearchViewState { keyword, phase });
        });

        self.store_inflight(handle);
    }

    fn state_sender(&self) -> &watch::Sender<SearchViewState> {
        &self.publisher.state
    }

    fn abort_inflight(&self) {
        if let Some(handle) = self.inflight.lock().unwrap().take() {
            handle.abort();
        }
    }

    fn store_inflight(&self, handle: JoinHandle<()>) {
        *self.inflight.lock().unwrap() = Some(handle);
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.abort_inflight();
    }
}
