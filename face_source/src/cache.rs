// Copyright 2026 the Face Source Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A bounded, thread-safe, least-recently-used cache with at-most-once value creation.

use core::fmt::{Debug, Formatter};
use core::hash::Hash;
use core::num::NonZeroUsize;
use std::sync::{Arc, OnceLock};

use hashbrown::HashMap;
use lru::LruCache;
use parking_lot::Mutex;

/// A slot is shared between the cache and every caller waiting on its value, so eviction never
/// takes a value away from someone who is still reading it.
type Slot<V> = Arc<OnceLock<V>>;

struct Inner<K, V> {
    /// Slots whose value has been created.
    entries: LruCache<K, Slot<V>>,
    /// Slots whose value is still being created. These are not subject to eviction.
    pending: HashMap<K, Slot<V>>,
    hits: u64,
    misses: u64,
}

/// A snapshot of a cache's occupancy and lookup statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of entries.
    pub len: usize,
    /// Maximum number of entries.
    pub capacity: usize,
    /// Lookups that found an existing entry.
    pub hits: u64,
    /// Lookups that had to create an entry.
    pub misses: u64,
}

/// A least-recently-used cache whose values are created lazily, at most once per key.
///
/// The cache lock is only held for bookkeeping; values are computed outside of it, so creating
/// values for different keys never blocks. Concurrent requests for a key whose value is being
/// created wait for that one creation instead of starting their own, however many other keys
/// are inserted in the meantime.
///
/// `compute` must not request its own key from the same cache again.
pub struct KeyedCache<K, V> {
    inner: Mutex<Inner<K, V>>,
}

impl<K: Hash + Eq + Clone, V: Clone> KeyedCache<K, V> {
    /// Creates a cache holding at most `capacity` entries. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                pending: HashMap::new(),
                hits: 0,
                misses: 0,
            }),
        }
    }

    /// Returns the value for `key`, creating it with `compute` if it isn't present.
    ///
    /// `compute` returns the value and whether it may be retained. A value that may not be
    /// retained is still returned (to this caller and to any caller that was waiting on the same
    /// creation) but no entry is kept, so the next request computes it again.
    ///
    /// A created value enters the cache once it is complete. If the cache is full at that point
    /// the least recently used entry is evicted.
    pub fn get_or_create(&self, key: K, compute: impl FnOnce() -> (V, bool)) -> V {
        let slot = {
            let mut inner = self.inner.lock();
            let mut found = inner.entries.get(&key).cloned();
            if found.is_none() {
                found = inner.pending.get(&key).cloned();
            }
            match found {
                Some(slot) => {
                    inner.hits += 1;
                    slot
                }
                None => {
                    inner.misses += 1;
                    let slot = Slot::default();
                    inner.pending.insert(key.clone(), Arc::clone(&slot));
                    slot
                }
            }
        };

        let mut created = None;
        let value = slot
            .get_or_init(|| {
                let (value, cacheable) = compute();
                created = Some(cacheable);
                value
            })
            .clone();

        // Only the caller whose `compute` ran moves the slot out of `pending`.
        if let Some(cacheable) = created {
            let mut inner = self.inner.lock();
            if inner
                .pending
                .get(&key)
                .is_some_and(|current| Arc::ptr_eq(current, &slot))
            {
                inner.pending.remove(&key);
            }
            if cacheable {
                // `push` hands back the least recently used entry when full.
                if inner.entries.push(key, slot).is_some() {
                    log::trace!("evicted the least recently used entry");
                }
            } else {
                log::trace!("discarding a value that declined to be cached");
            }
        }
        value
    }

    /// Returns the value for `key` if it is present and fully created, marking it as recently
    /// used.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().entries.get(key)?.get().cloned()
    }

    /// Returns `true` if `key` has an entry. This does not affect recency.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().entries.contains(key)
    }

    /// Returns the number of entries. Values still being created are not counted.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Returns `true` if the cache has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.inner.lock().entries.cap().get()
    }

    /// Number of lookups that found an existing entry.
    pub fn hits(&self) -> u64 {
        self.inner.lock().hits
    }

    /// Number of lookups that had to create an entry.
    pub fn misses(&self) -> u64 {
        self.inner.lock().misses
    }

    /// Returns occupancy and hit statistics, read under a single lock.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            len: inner.entries.len(),
            capacity: inner.entries.cap().get(),
            hits: inner.hits,
            misses: inner.misses,
        }
    }

    /// Removes every entry. Values still being created are added once they are complete. Hit and
    /// miss statistics are kept.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }
}

impl<K: Hash + Eq, V> Debug for KeyedCache<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("KeyedCache")
            .field("len", &inner.entries.len())
            .field("capacity", &inner.entries.cap())
            .field("hits", &inner.hits)
            .field("misses", &inner.misses)
            .finish_non_exhaustive()
    }
}
