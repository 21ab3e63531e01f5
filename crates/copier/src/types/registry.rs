// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Process-wide descriptor registry.
//!
//! Descriptors are built once per `TypeId`, leaked, and live for the rest of
//! the process, so identical runtime types always yield the same
//! `&'static TypeDescriptor`.

use super::{Reflect, TypeDescriptor, TypeRef};
use crate::cache::OnceCache;
use crate::config::REGISTRY_INITIAL_CAPACITY;
use std::any::TypeId;
use std::sync::OnceLock;

static REGISTRY: OnceLock<OnceCache<TypeId, TypeRef>> = OnceLock::new();

fn registry() -> &'static OnceCache<TypeId, TypeRef> {
    REGISTRY.get_or_init(|| OnceCache::with_capacity(REGISTRY_INITIAL_CAPACITY))
}

/// Return the interned descriptor of `T`, running `build` on first use.
///
/// `build` must describe `T` itself and must not intern `T` again.
pub fn intern<T: Reflect>(build: impl FnOnce() -> TypeDescriptor) -> TypeRef {
    registry().get_or_build(TypeId::of::<T>(), || {
        let descriptor = build();
        debug_assert_eq!(descriptor.id(), TypeId::of::<T>());
        let descriptor: TypeRef = Box::leak(Box::new(descriptor));
        log::trace!("[types] interned {} ({})", descriptor.name(), descriptor.kind());
        descriptor
    })
}

/// Number of descriptors interned so far.
pub fn registered_types() -> usize {
    registry().len()
}
