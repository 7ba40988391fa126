//! Caller-owned memo of the load + normalize step.
//!
//! The cache holds at most one dataset, keyed on the identity of its source
//! file (path, modification time, byte length). A lookup reloads when the file
//! changed, when the optional TTL elapsed, or after [`DatasetCache::invalidate`].
//! Failed loads never touch the cached entry.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use crate::data::loader::LoadError;
use crate::data::model::Dataset;

/// Identity of a source file at the time it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceKey {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl SourceKey {
    /// Stat the file. Missing or unreadable files are a [`LoadError::Io`].
    pub fn probe(path: &Path) -> Result<Self, LoadError> {
        let meta = std::fs::metadata(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

struct CacheEntry {
    key: SourceKey,
    dataset: Arc<Dataset>,
    loaded_at: Instant,
}

/// Single-entry dataset cache.
#[derive(Default)]
pub struct DatasetCache {
    entry: Option<CacheEntry>,
    ttl: Option<Duration>,
}

impl DatasetCache {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self { entry: None, ttl }
    }

    /// Return the cached dataset for `path` if still fresh, otherwise run `load`
    /// and remember its result.
    pub fn get_or_load<F>(&mut self, path: &Path, load: F) -> Result<Arc<Dataset>, LoadError>
    where
        F: FnOnce(&Path) -> Result<Dataset, LoadError>,
    {
        let key = SourceKey::probe(path)?;

        if let Some(entry) = &self.entry {
            if self.is_fresh(entry, &key) {
                log::debug!("dataset cache hit for {}", path.display());
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        log::debug!("dataset cache miss for {}", path.display());
        let dataset = Arc::new(load(path)?);
        self.entry = Some(CacheEntry {
            key,
            dataset: Arc::clone(&dataset),
            loaded_at: Instant::now(),
        });
        Ok(dataset)
    }

    /// Whether a lookup for `path` right now would be served from the cache.
    pub fn is_cached(&self, path: &Path) -> bool {
        let Ok(key) = SourceKey::probe(path) else {
            return false;
        };
        self.entry
            .as_ref()
            .is_some_and(|entry| self.is_fresh(entry, &key))
    }

    /// Drop the cached dataset; the next lookup reloads.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    fn is_fresh(&self, entry: &CacheEntry, key: &SourceKey) -> bool {
        if entry.key != *key {
            return false;
        }
        match self.ttl {
            Some(ttl) => entry.loaded_at.elapsed() < ttl,
            None => true,
        }
    }
}
