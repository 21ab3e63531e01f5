// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read-copy-update hash table.
//!
//! Readers load the current snapshot through [`ArcSwap`] and probe it
//! without taking any lock. A single writer (serialized by a mutex) copies
//! the snapshot, inserts into the copy and swaps it in. Past the load
//! factor the copy is rehashed into a table twice as large; readers still
//! holding the old snapshot are never blocked by that.
//!
//! Entries are never removed.

use crate::config::{table_capacity, RCU_MAX_LOAD_FACTOR};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

/// Open-addressing (linear probing) snapshot.
#[derive(Clone)]
struct Table<K, V> {
    slots: Box<[Option<(u64, K, V)>]>,
    len: usize,
}

impl<K: Eq + Clone, V: Clone> Table<K, V> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            len: 0,
        }
    }

    #[inline]
    fn mask(&self) -> usize {
        self.slots.len() - 1
    }

    fn find(&self, hash: u64, key: &K) -> Option<&V> {
        let mask = self.mask();
        let mut idx = (hash as usize) & mask;
        for _ in 0..self.slots.len() {
            match &self.slots[idx] {
                None => return None,
                Some((h, k, v)) if *h == hash && k == key => return Some(v),
                Some(_) => idx = (idx + 1) & mask,
            }
        }
        None
    }

    /// Insert or replace; the caller guarantees a free slot exists.
    fn put(&mut self, hash: u64, key: K, value: V) -> Option<V> {
        let mask = self.mask();
        let mut idx = (hash as usize) & mask;
        loop {
            match &mut self.slots[idx] {
                slot @ None => {
                    *slot = Some((hash, key, value));
                    self.len += 1;
                    return None;
                }
                Some((h, k, v)) if *h == hash && *k == key => {
                    return Some(std::mem::replace(v, value));
                }
                Some(_) => idx = (idx + 1) & mask,
            }
        }
    }

    fn rehashed(&self, capacity: usize) -> Self {
        let mut next = Self::with_capacity(capacity);
        for (hash, key, value) in self.slots.iter().flatten() {
            next.put(*hash, key.clone(), value.clone());
        }
        next
    }

    fn needs_growth(&self) -> bool {
        (self.len + 1) as f64 > self.slots.len() as f64 * RCU_MAX_LOAD_FACTOR
    }
}

/// Concurrent map with wait-free reads and a single serialized writer.
pub struct RcuMap<K, V> {
    table: ArcSwap<Table<K, V>>,
    writer: Mutex<()>,
    hasher: RandomState,
}

impl<K, V> RcuMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a map whose first snapshot holds `capacity` slots (rounded up to a power of two).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: ArcSwap::from_pointee(Table::with_capacity(table_capacity(capacity))),
            writer: Mutex::new(()),
            hasher: RandomState::new(),
        }
    }

    /// Look up `key` in the current snapshot.
    pub fn get(&self, key: &K) -> Option<V> {
        let hash = self.hasher.hash_one(key);
        self.table.load().find(hash, key).cloned()
    }

    /// Insert or replace, returning the replaced value.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let _writer = self.writer.lock();
        self.publish(key, value)
    }

    /// Number of entries in the current snapshot.
    pub fn len(&self) -> usize {
        self.table.load().len
    }

    /// Slot count of the current snapshot.
    pub fn capacity(&self) -> usize {
        self.table.load().slots.len()
    }

    /// Copy, modify and swap. Must be called with the writer lock held.
    fn publish(&self, key: K, value: V) -> Option<V> {
        let hash = self.hasher.hash_one(&key);
        let current = self.table.load_full();
        let mut next = if current.needs_growth() {
            current.rehashed(current.slots.len() * 2)
        } else {
            Table::clone(&current)
        };
        let previous = next.put(hash, key, value);
        self.table.store(Arc::new(next));
        previous
    }
}
