//! Movie domain records shared across the remote client, cache and search.

mod types;

pub use types::*;
