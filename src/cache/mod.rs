//! Cache module for avoiding repeated index downloads
//!
//! Rankings are stored per architecture alongside the freshness token of the
//! index they were computed from.

mod store;

pub use store::{validate, Cache, CacheEntry, CacheStore};

/// Status of a single cached architecture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntryStatus {
    pub architecture: String,
    pub last_modified: String,
    pub count: usize,
}
