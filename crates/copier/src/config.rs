// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Engine tunables.
//!
//! - **Level 1 (Static)**: compile-time constants for the cache tables
//! - **Level 2 (Instance)**: [`EngineConfig`] for explicitly built [`Copier`](crate::Copier)s
//!
//! Per-call behaviour (deep copy, directive overrides) lives in
//! [`Options`](crate::Options), not here.

/// Initial slot count of a copy-on-write cache table.
///
/// Must be a power of two; slots are addressed with `hash & (capacity - 1)`.
pub const RCU_INITIAL_CAPACITY: usize = 256;

/// Maximum fill ratio before a table is rehashed into one twice as large.
pub const RCU_MAX_LOAD_FACTOR: f64 = 0.5;

/// Initial capacity of the process-wide type registry table.
pub const REGISTRY_INITIAL_CAPACITY: usize = 1024;

/// Sizing of the caches owned by one [`Copier`](crate::Copier).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Initial slot count of the converter table (rounded up to a power of two).
    pub converter_capacity: usize,
    /// Initial slot count of the struct metadata table (rounded up to a power of two).
    pub struct_capacity: usize,
}

impl EngineConfig {
    /// Start from the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn converter_capacity(mut self, slots: usize) -> Self {
        self.converter_capacity = slots;
        self
    }

    #[must_use]
    pub fn struct_capacity(mut self, slots: usize) -> Self {
        self.struct_capacity = slots;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            converter_capacity: RCU_INITIAL_CAPACITY,
            struct_capacity: RCU_INITIAL_CAPACITY,
        }
    }
}

/// Normalize a requested table size: at least 2 slots, power of two.
pub(crate) fn table_capacity(requested: usize) -> usize {
    requested.max(2).next_power_of_two()
}
