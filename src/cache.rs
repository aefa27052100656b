//! In-process memo of repository activity times

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::repository::RepoId;

/// Seconds since the Unix epoch.
pub type Timestamp = i64;

/// Shared memo of resolved activity times, keyed by repository identity.
///
/// Only non-zero times are stored. A zero or missing time means the source has
/// not been found yet, so it is looked up again on the next access.
///
/// Cloning the cache shares the underlying map, so one cache may back several
/// resolvers or threads. Concurrent first-time resolution of the same
/// repository is harmless: both writers store the same value.
#[derive(Debug, Clone, Default)]
pub struct ModTimeCache {
    cache: Arc<Mutex<HashMap<RepoId, Timestamp>>>,
}

impl ModTimeCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock still holds a consistent map of scalars.
    fn lock(&self) -> MutexGuard<'_, HashMap<RepoId, Timestamp>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Return the memoized time, or run `resolve` and memoize a non-zero result
    pub fn get_or_resolve<F>(&self, id: &RepoId, resolve: F) -> Option<Timestamp>
    where
        F: FnOnce() -> Option<Timestamp>,
    {
        if let Some(cached) = self.get(id) {
            return Some(cached);
        }

        // Resolve outside the lock; sources may touch the filesystem.
        let resolved = resolve().filter(|t| *t != 0)?;
        self.insert(id.clone(), resolved);
        Some(resolved)
    }

    /// Manually record a time. Zero is ignored.
    pub fn insert(&self, id: RepoId, time: Timestamp) {
        if time != 0 {
            self.lock().insert(id, time);
        }
    }

    /// Get a memoized time without resolving
    pub fn get(&self, id: &RepoId) -> Option<Timestamp> {
        self.lock().get(id).copied()
    }

    /// Check if a repository has a memoized time
    pub fn contains(&self, id: &RepoId) -> bool {
        self.lock().contains_key(id)
    }

    /// Forget every memoized time
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
