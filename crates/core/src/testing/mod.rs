//! Testing utilities and mock implementations.
//!
//! Mocks for the `MovieSource` and `MovieCache` seams, allowing the
//! repository and search session to be exercised without network or disk.

mod mock_cache;
mod mock_source;

pub use mock_cache::MockMovieCache;
pub use mock_source::MockMovieSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::movie::{Movie, MovieDetails, MovieKind, MovieSearchResult};

    /// Create a test movie with reasonable defaults.
    pub fn movie(id: &str, title: &str) -> Movie {
        Movie {
            id: id.to_string(),
            title: title.to_string(),
            year: "1999".to_string(),
            kind: MovieKind::Movie,
            poster_url: Some(format!("https://example.com/{}.jpg", id)),
            details: None,
        }
    }

    /// Create a test movie carrying full metadata.
    pub fn movie_with_details(id: &str, title: &str) -> Movie {
        let mut m = movie(id, title);
        m.details = Some(MovieDetails {
            rating: Some("8.0".to_string()),
            plot: Some(format!("A story about {}.", title.to_lowercase())),
            actors: Some("Some Actor, Another Actor".to_string()),
            director: Some("A Director".to_string()),
            genre: Some("Drama".to_string()),
            runtime: Some("120 min".to_string()),
        });
        m
    }

    /// Create a search result from explicit movies and a total.
    pub fn search_result(movies: Vec<Movie>, total_results: u32) -> MovieSearchResult {
        MovieSearchResult {
            movies,
            total_results,
        }
    }

    /// Create a full page of `count` numbered movies for a keyword.
    pub fn page_of(keyword: &str, page: u32, count: u32, total_results: u32) -> MovieSearchResult {
        let movies = (0..count)
            .map(|i| {
                let n = (page - 1) * 10 + i + 1;
                movie(&format!("tt{:07}", n), &format!("{} {}", keyword, n))
            })
            .collect();
        search_result(movies, total_results)
    }
}
