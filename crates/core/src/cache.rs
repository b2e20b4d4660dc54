//! In-memory result cache with TTL and capacity eviction.
//!
//! Rendered results are cached per canonical page URL so revisiting a
//! listing within the expiry window skips re-extraction. Entries expire
//! after a fixed window and the oldest-inserted entry is evicted once
//! capacity is exceeded. Timing uses `tokio::time::Instant` so tests can
//! run against a paused clock.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use tokio::time::Instant;

/// A cached rendered result.
#[derive(Debug, Clone)]
struct CacheEntry {
    /// Rendered panel HTML.
    value: String,

    /// Time when this entry was inserted.
    cached_at: Instant,
}

/// Insertion-ordered cache of rendered results, keyed by canonical URL.
///
/// Expired entries are evicted lazily on read; [`ResultCache::purge_expired`]
/// sweeps them eagerly.
#[derive(Debug)]
pub struct ResultCache {
    entries: HashMap<String, CacheEntry>,
    insertion_order: VecDeque<String>,
    capacity: usize,
    ttl: Duration,
}

impl ResultCache {
    /// Create a cache with the given capacity and entry lifetime.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self { entries: HashMap::new(), insertion_order: VecDeque::new(), capacity, ttl }
    }

    /// Insert a rendered result, evicting the oldest entry if over capacity.
    ///
    /// Re-inserting an existing key refreshes its value and timestamp but
    /// keeps its original insertion position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let entry = CacheEntry { value: value.into(), cached_at: Instant::now() };

        if self.entries.insert(key.clone(), entry).is_none() {
            self.insertion_order.push_back(key);
        }

        while self.entries.len() > self.capacity {
            match self.insertion_order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                    tracing::debug!("cache evicted oldest entry: {}", oldest);
                }
                None => break,
            }
        }
    }

    /// Look up a cached result, removing and skipping it when expired.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let entry = self.entries.get(key)?;

        if entry.cached_at.elapsed() >= self.ttl {
            tracing::debug!("cache entry expired: {}", key);
            self.remove(key);
            return None;
        }

        Some(entry.value.clone())
    }

    /// Number of entries currently held (expired entries included until purged).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all expired entries, returning how many were dropped.
    pub fn purge_expired(&mut self) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.cached_at.elapsed() >= self.ttl)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove(key);
        }

        expired.len()
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.insertion_order.retain(|k| k != key);
    }
}
