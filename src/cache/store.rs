//! Per-architecture ranking cache

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::arch::Architecture;
use crate::cache::CacheEntryStatus;
use crate::contents::RankedCounts;
use crate::error::{DebtopError, Result};

/// Cached ranking for one architecture
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Freshness token the ranking was computed against
    pub last_modified: String,
    /// Ranked package counts, highest first
    pub packages: RankedCounts,
}

/// The whole cache document, keyed by architecture identifier
pub type Cache = BTreeMap<String, CacheEntry>;

/// Reads and writes the cache document
pub struct CacheStore {
    cache_file: PathBuf,
}

impl CacheStore {
    /// Create a store backed by `cache_file`
    pub fn new(cache_file: impl Into<PathBuf>) -> Self {
        Self {
            cache_file: cache_file.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.cache_file
    }

    /// Load the cache document
    ///
    /// A missing or empty file is an empty cache. Anything else that fails to
    /// parse is reported as corruption.
    pub fn load(&self) -> Result<Cache> {
        let data = match fs::read_to_string(&self.cache_file) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Cache::new()),
            Err(e) => return Err(e.into()),
        };

        if data.trim().is_empty() {
            return Ok(Cache::new());
        }

        serde_json::from_str(&data).map_err(|e| DebtopError::corrupt_cache(&self.cache_file, e))
    }

    /// Insert or overwrite the entry for `arch` and persist the whole document
    pub fn store(&self, cache: &mut Cache, arch: Architecture, entry: CacheEntry) -> Result<()> {
        cache.insert(arch.as_str().to_string(), entry);
        self.write(cache)
    }

    /// Drop the entry for `arch`, returning whether one existed
    pub fn remove(&self, arch: Architecture) -> Result<bool> {
        let mut cache = self.load()?;
        let removed = cache.remove(arch.as_str()).is_some();
        if removed {
            self.write(&cache)?;
        }
        Ok(removed)
    }

    /// Reset the cache document to empty
    pub fn clear(&self) -> Result<()> {
        if self.cache_file.exists() {
            fs::write(&self.cache_file, "")?;
        }
        Ok(())
    }

    /// Summarize every cached architecture
    pub fn status(&self) -> Result<Vec<CacheEntryStatus>> {
        let cache = self.load()?;
        Ok(cache
            .iter()
            .map(|(arch, entry)| CacheEntryStatus {
                architecture: arch.clone(),
                last_modified: entry.last_modified.clone(),
                count: entry.packages.len(),
            })
            .collect())
    }

    fn write(&self, cache: &Cache) -> Result<()> {
        if let Some(parent) = self.cache_file.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(cache)?;
        fs::write(&self.cache_file, json)?;
        tracing::debug!(path = %self.cache_file.display(), entries = cache.len(), "Cache written");

        Ok(())
    }
}

/// Whether a cached entry can be shown instead of re-downloading the index
///
/// The entry must carry the same, non-empty freshness token the server
/// reports now and hold at least `show_count` packages.
pub fn validate(entry: Option<&CacheEntry>, server_token: &str, show_count: usize) -> bool {
    let Some(entry) = entry else {
        return false;
    };

    if server_token.is_empty() || entry.last_modified != server_token {
        return false;
    }

    entry.packages.len() >= show_count
}
