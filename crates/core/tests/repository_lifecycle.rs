//! Integration tests for the repository over a real SQLite cache file.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tempfile::TempDir;
use tokio_test::assert_ok;

use marquee_core::testing::{fixtures, MockMovieSource};
use marquee_core::{MovieCache, MovieRepository, MovieSource, SqliteMovieCache};

fn sqlite_cache(dir: &TempDir) -> SqliteMovieCache {
    SqliteMovieCache::new(&dir.path().join("movies.db")).unwrap()
}

#[tokio::test]
async fn test_lookup_populates_cache_file() {
    let dir = TempDir::new().unwrap();
    let cache = Arc::new(sqlite_cache(&dir));
    let remote = Arc::new(MockMovieSource::new());
    let movie = fixtures::movie_with_details("tt0133093", "The Matrix");
    remote.set_movie(movie.clone()).await;

    let repo = MovieRepository::new(Arc::clone(&remote) as Arc<dyn MovieSource>, cache.clone());

    let fetched = assert_ok!(repo.get_movie("tt0133093").await);
    assert_eq!(fetched, movie);

    // Entry landed on disk with a current timestamp
    let entry = cache.get("tt0133093").unwrap().unwrap();
    assert_eq!(entry.movie, movie);
    assert!(Utc::now() - entry.recorded_at < Duration::minutes(1));
}

#[tokio::test]
async fn test_second_lookup_served_from_disk() {
    let dir = TempDir::new().unwrap();
    let cache = Arc::new(sqlite_cache(&dir));
    let remote = Arc::new(MockMovieSource::new());
    let movie = fixtures::movie_with_details("tt0083658", "Blade Runner");
    remote.set_movie(movie.clone()).await;

    let repo = MovieRepository::new(Arc::clone(&remote) as Arc<dyn MovieSource>, cache);

    repo.get_movie("tt0083658").await.unwrap();
    let second = repo.get_movie("tt0083658").await.unwrap();

    assert_eq!(second, movie);
    assert_eq!(remote.get_movie_count("tt0083658").await, 1);
}

#[tokio::test]
async fn test_cache_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("movies.db");
    let remote = Arc::new(MockMovieSource::new());
    let movie = fixtures::movie_with_details("tt0133093", "The Matrix");
    remote.set_movie(movie.clone()).await;

    {
        let cache = Arc::new(SqliteMovieCache::new(&db_path).unwrap());
        let repo =
            MovieRepository::new(Arc::clone(&remote) as Arc<dyn MovieSource>, cache);
        repo.get_movie("tt0133093").await.unwrap();
    }

    // New process, same file: the lookup still avoids the remote
    let cache = Arc::new(SqliteMovieCache::new(&db_path).unwrap());
    let repo = MovieRepository::new(Arc::clone(&remote) as Arc<dyn MovieSource>, cache);
    let fetched = repo.get_movie("tt0133093").await.unwrap();

    assert_eq!(fetched, movie);
    assert_eq!(remote.get_movie_count("tt0133093").await, 1);
}

#[tokio::test]
async fn test_stale_disk_entry_refreshed() {
    let dir = TempDir::new().unwrap();
    let cache = Arc::new(sqlite_cache(&dir));
    let remote = Arc::new(MockMovieSource::new());
    let stale = fixtures::movie("tt0133093", "The Matrix (old)");
    let fresh = fixtures::movie_with_details("tt0133093", "The Matrix");

    cache.put(&stale, Utc::now() - Duration::minutes(6)).unwrap();
    remote.set_movie(fresh.clone()).await;

    let repo = MovieRepository::new(Arc::clone(&remote) as Arc<dyn MovieSource>, cache.clone());
    let fetched = repo.get_movie("tt0133093").await.unwrap();

    assert_eq!(fetched, fresh);
    assert_eq!(cache.get("tt0133093").unwrap().unwrap().movie, fresh);
}
