// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concurrent cache primitives shared by the type registry, the struct
//! metadata cache and the converter cache.

mod once;
mod rcu;

pub use once::{LookupStats, OnceCache};
