// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Build-once cache: an [`RcuMap`] of published values plus a per-key gate.
//!
//! A miss installs an `Arc<OnceLock<V>>` gate in a [`DashMap`]. Exactly one
//! caller runs the build inside the gate, concurrent callers for the same
//! key block on it. The value is published into the RCU table before the
//! gate opens, and every caller holding the gate retires it from the map
//! afterwards. Later readers hit the table without locking.
//!
//! A build must not request its own key (the gate is not reentrant).

use super::rcu::RcuMap;
use dashmap::DashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LookupStats {
    /// Lookups served from the published table.
    pub hits: u64,
    /// Lookups that went through a build gate.
    pub misses: u64,
    /// Builds actually executed.
    pub builds: u64,
    /// Published entries.
    pub entries: usize,
    /// Slot count of the published table.
    pub capacity: usize,
}

pub struct OnceCache<K, V> {
    published: RcuMap<K, V>,
    pending: DashMap<K, Arc<OnceLock<V>>>,
    hits: AtomicU64,
    misses: AtomicU64,
    builds: AtomicU64,
}

impl<K, V> OnceCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            published: RcuMap::with_capacity(capacity),
            pending: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            builds: AtomicU64::new(0),
        }
    }

    /// Return the value for `key`, building it exactly once across all threads.
    pub fn get_or_build<F>(&self, key: K, build: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(hit) = self.published.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return hit;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.resolve(key, build)
    }

    /// Slow path: go through the per-key gate.
    fn resolve<F>(&self, key: K, build: F) -> V
    where
        F: FnOnce() -> V,
    {
        let gate = Arc::clone(
            self.pending
                .entry(key.clone())
                .or_insert_with(|| Arc::new(OnceLock::new()))
                .value(),
        );

        let mut built_here = false;
        let value = gate
            .get_or_init(|| {
                // The previous gate may have been retired between our miss and
                // installing this one; the value is published by then.
                if let Some(hit) = self.published.get(&key) {
                    return hit;
                }
                built_here = true;
                let value = build();
                // Published before the gate opens.
                self.published.insert(key.clone(), value.clone());
                value
            })
            .clone();

        if built_here {
            self.builds.fetch_add(1, Ordering::Relaxed);
        } else {
            log::trace!("[cache] gate resolved without building");
        }
        self.pending.remove_if(&key, |_, g| Arc::ptr_eq(g, &gate));
        value
    }

    pub fn len(&self) -> usize {
        self.published.len()
    }

    #[must_use]
    pub fn stats(&self) -> LookupStats {
        LookupStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            builds: self.builds.load(Ordering::Relaxed),
            entries: self.published.len(),
            capacity: self.published.capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_hit_after_build() {
        let cache = OnceCache::with_capacity(4);
        assert_eq!(cache.get_or_build(1u32, || "one"), "one");
        assert_eq!(cache.get_or_build(1u32, || "other"), "one");
        let stats = cache.stats();
        assert_eq!(stats.builds, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.capacity, 4);
    }

    #[test]
    fn test_concurrent_first_use_builds_once() {
        const THREADS: usize = 8;
        let cache = Arc::new(OnceCache::with_capacity(4));
        let calls = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cache.get_or_build("key", || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(20));
                        Arc::new(42u64)
                    })
                })
            })
            .collect();

        let values: Vec<Arc<u64>> = handles
            .into_iter()
            .map(|h| h.join().expect("builder thread panicked"))
            .collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(values.iter().all(|v| Arc::ptr_eq(v, &values[0])));
        assert_eq!(cache.stats().builds, 1);
        assert!(cache.pending.is_empty());
    }

    #[test]
    fn test_gate_resolved_from_table_is_retired() {
        let cache = OnceCache::with_capacity(4);
        assert_eq!(cache.get_or_build(7u32, || "built"), "built");
        assert!(cache.pending.is_empty());

        // A caller that missed just before publication reaches the gate
        // after the builder retired its own.
        assert_eq!(cache.resolve(7u32, || "rebuilt"), "built");
        assert!(cache.pending.is_empty());
        assert_eq!(cache.stats().builds, 1);
    }

    #[test]
    fn test_distinct_keys_build_independently() {
        let cache = OnceCache::with_capacity(2);
        for i in 0..100u32 {
            assert_eq!(cache.get_or_build(i, || i + 1), i + 1);
        }
        assert_eq!(cache.len(), 100);
        assert_eq!(cache.stats().builds, 100);
    }
}
