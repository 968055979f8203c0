//! Keyword search state machine.
//!
//! A `SearchSession` turns keyword input and pagination requests into a
//! single observable view state. At most one search or page-load is in
//! flight at a time: a new search cancels and discards whatever was
//! running before it.

mod session;
mod types;

pub use session::{SearchSession, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};
pub use types::*;
