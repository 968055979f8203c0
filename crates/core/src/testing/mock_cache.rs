//! Mock movie cache for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::cache::{CacheEntry, CacheError, CacheStats, MovieCache};
use crate::movie::Movie;

/// Mock implementation of the `MovieCache` trait.
///
/// In-memory map with switches to make reads or writes fail, for testing
/// the repository's absorb-cache-errors behavior.
#[derive(Default)]
pub struct MockMovieCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    read_failure: AtomicBool,
    write_failure: AtomicBool,
}

impl MockMovieCache {
    /// Create an empty mock cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make all subsequent reads fail.
    pub fn fail_reads(&self, fail: bool) {
        self.read_failure.store(fail, Ordering::SeqCst);
    }

    /// Make all subsequent writes fail.
    pub fn fail_writes(&self, fail: bool) {
        self.write_failure.store(fail, Ordering::SeqCst);
    }
}

impl MovieCache for MockMovieCache {
    fn get(&self, id: &str) -> Result<Option<CacheEntry>, CacheError> {
        if self.read_failure.load(Ordering::SeqCst) {
            return Err(CacheError::Database("injected read failure".to_string()));
        }
        Ok(self.entries.lock().unwrap().get(id).cloned())
    }

    fn put(&self, movie: &Movie, recorded_at: DateTime<Utc>) -> Result<(), CacheError> {
        if self.write_failure.load(Ordering::SeqCst) {
            return Err(CacheError::Database("injected write failure".to_string()));
        }
        self.entries.lock().unwrap().insert(
            movie.id.clone(),
            CacheEntry {
                movie: movie.clone(),
                recorded_at,
            },
        );
        Ok(())
    }

    fn clear(&self) -> Result<u32, CacheError> {
        let mut entries = self.entries.lock().unwrap();
        let removed = entries.len() as u32;
        entries.clear();
        Ok(removed)
    }

    fn stats(&self) -> Result<CacheStats, CacheError> {
        let entries = self.entries.lock().unwrap();
        Ok(CacheStats {
            entries: entries.len() as u64,
            oldest_recorded_at: entries.values().map(|e| e.recorded_at).min(),
        })
    }
}
