//! View-state types published by the search session.

use serde::{Deserialize, Serialize};

use crate::movie::Movie;

/// The observable state of a search session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchViewState {
    /// Current keyword ("" while idle).
    pub keyword: String,
    /// What the session is doing with that keyword.
    pub phase: SearchPhase,
}

impl SearchViewState {
    pub fn idle() -> Self {
        Self {
            keyword: String::new(),
            phase: SearchPhase::Idle,
        }
    }
}

impl Default for SearchViewState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Phase of the search session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SearchPhase {
    /// No search has been issued (or the session was reset).
    Idle,
    /// A new search is in flight; no results to show yet.
    Loading,
    /// Results are available (possibly with a page load in progress).
    Success(SearchResults),
    /// The search failed; no results to show.
    Failure(SearchFailure),
}

/// Rendered search results.
///
/// Invariants: `total_pages >= 1`, `page <= total_pages`, and the footer
/// is a single value so loading/retry can never show together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    /// All movies loaded so far, in server order across pages.
    pub movies: Vec<Movie>,
    /// Trailing list footer.
    pub footer: PageFooter,
    /// Last fully loaded page (1-based).
    pub page: u32,
    /// Total page count (clamped to at least 1 and at most the page cap).
    pub total_pages: u32,
}

/// State of the synthetic trailing list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PageFooter {
    /// No footer: nothing to load or nothing pending.
    #[default]
    None,
    /// The next page is being fetched.
    Loading,
    /// The last page fetch failed; offer a retry.
    Retry,
}

/// Why a search failed.
///
/// "Not found" is kept separate from every other failure so the UI can
/// render a distinct empty state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum SearchFailure {
    /// The API reported no match; the message is preserved verbatim.
    NotFound(String),
    /// Any other failure, collapsed to its message.
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle() {
        let state = SearchViewState::default();
        assert!(state.keyword.is_empty());
        assert_eq!(state.phase, SearchPhase::Idle);
    }

    #[test]
    fn test_failure_kinds_are_distinguishable() {
        let not_found = SearchFailure::NotFound("Movie not found!".to_string());
        let other = SearchFailure::Other("Movie not found!".to_string());
        assert_ne!(not_found, other);
    }
}
