//! Get-or-fetch map with at most one in-flight fetch per key.
//!
//! A miss inserts an in-flight slot whose lock is held by the fetching task
//! for the duration of the fetch. Concurrent callers for the same key wait on
//! that lock and read the published result. Successes become ready entries;
//! failures are handed to every waiter and then forgotten, so the next call
//! fetches again.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::lock::{Mutex as AsyncMutex, OwnedMutexGuard};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::Result;

type Slot<V> = Arc<AsyncMutex<Option<Result<Arc<V>>>>>;

enum CacheEntry<V> {
    Ready(Arc<V>),
    InFlight(Slot<V>),
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a ready entry.
    pub hits: u64,
    /// Lookups that started a fetch.
    pub misses: u64,
    /// Lookups that joined a fetch already in flight.
    pub coalesced: u64,
}

#[derive(Debug, Default)]
struct AtomicCacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    coalesced: AtomicU64,
}

impl AtomicCacheStats {
    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
        }
    }
}

/// String-keyed cache of shared values with request coalescing.
pub struct CoalescingCache<V> {
    name: &'static str,
    entries: Mutex<FxHashMap<String, CacheEntry<V>>>,
    stats: AtomicCacheStats,
}

impl<V> std::fmt::Debug for CoalescingCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoalescingCache")
            .field("name", &self.name)
            .field("len", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}

enum Action<V> {
    Hit(Arc<V>),
    Wait(Slot<V>),
    Fetch(OwnedMutexGuard<Option<Result<Arc<V>>>>),
}

impl<V> CoalescingCache<V> {
    /// Creates an empty cache; `name` tags its log events.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Mutex::new(FxHashMap::default()),
            stats: AtomicCacheStats::default(),
        }
    }

    fn lock_entries(&self) -> MutexGuard<'_, FxHashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached value for `key`, or runs `fetch` to produce it.
    ///
    /// `fetch` runs at most once per call and only when no other caller is
    /// already fetching `key`; in that case this call waits for and shares
    /// the other caller's result.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<Arc<V>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let mut guard = loop {
            let action = {
                let mut entries = self.lock_entries();
                match entries.get(key) {
                    Some(CacheEntry::Ready(value)) => {
                        self.stats.hits.fetch_add(1, Ordering::Relaxed);
                        Action::Hit(value.clone())
                    }
                    Some(CacheEntry::InFlight(slot)) => {
                        self.stats.coalesced.fetch_add(1, Ordering::Relaxed);
                        Action::Wait(slot.clone())
                    }
                    None => {
                        let slot: Slot<V> = Arc::new(AsyncMutex::new(None));
                        // A fresh lock is always free; claim it before publishing the slot.
                        let Some(guard) = slot.try_lock_owned() else {
                            continue;
                        };
                        entries.insert(key.to_owned(), CacheEntry::InFlight(slot));
                        self.stats.misses.fetch_add(1, Ordering::Relaxed);
                        Action::Fetch(guard)
                    }
                }
            };

            match action {
                Action::Hit(value) => return Ok(value),
                Action::Wait(slot) => {
                    debug!(cache = self.name, key, "joining in-flight fetch");
                    let published = slot.lock().await;
                    if let Some(result) = published.as_ref() {
                        return result.clone();
                    }
                    drop(published);

                    // The fetching task was dropped before it published.
                    let mut entries = self.lock_entries();
                    let orphaned = matches!(
                        entries.get(key),
                        Some(CacheEntry::InFlight(current)) if Arc::ptr_eq(current, &slot)
                    );
                    if orphaned {
                        entries.remove(key);
                    }
                    drop(entries);
                    debug!(cache = self.name, key, "in-flight fetch abandoned, retrying");
                }
                Action::Fetch(guard) => break guard,
            }
        };

        debug!(cache = self.name, key, "cache miss, fetching");
        let result = fetch().await.map(Arc::new);
        *guard = Some(result.clone());
        drop(guard);

        let mut entries = self.lock_entries();
        match &result {
            Ok(value) => {
                entries.insert(key.to_owned(), CacheEntry::Ready(value.clone()));
                debug!(cache = self.name, key, "published");
            }
            Err(err) => {
                entries.remove(key);
                debug!(cache = self.name, key, error = %err, "fetch failed, not cached");
            }
        }
        result
    }

    /// Inserts `value` unless `key` is already cached or being fetched.
    ///
    /// Returns true if the value was inserted.
    pub fn seed(&self, key: impl Into<String>, value: V) -> bool {
        let mut entries = self.lock_entries();
        match entries.entry(key.into()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(CacheEntry::Ready(Arc::new(value)));
                true
            }
        }
    }

    /// Returns the ready value for `key` without fetching.
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        match self.lock_entries().get(key) {
            Some(CacheEntry::Ready(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Returns true if a ready value is cached for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of ready entries.
    pub fn len(&self) -> usize {
        self.lock_entries()
            .values()
            .filter(|entry| matches!(entry, CacheEntry::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}
