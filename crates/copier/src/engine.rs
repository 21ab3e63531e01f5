// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Copy orchestrator: argument checks, indirection, converter lookup.

use crate::cache::{LookupStats, OnceCache};
use crate::config::EngineConfig;
use crate::convert::{Converter, Session, ValueMut, ValueRef};
use crate::error::{Error, Result};
use crate::meta::{StructInfo, StructInfoCache};
use crate::options::Options;
use crate::types::{registered_types, Reflect, TypeKind, TypeRef};
use std::any::TypeId;
use std::fmt;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Copier> = OnceLock::new();

/// Cache counters of one [`Copier`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopierStats {
    pub converters: LookupStats,
    pub structs: LookupStats,
    /// Descriptors interned process-wide.
    pub types: usize,
}

/// Conversion engine: converter cache plus struct metadata cache.
///
/// The free functions [`copy`](crate::copy), [`copy_with_options`](crate::copy_with_options)
/// and [`deep_copy`](crate::deep_copy) use [`Copier::global`]. A separately
/// constructed `Copier` has caches of its own.
///
/// # Example
///
/// ```rust
/// use copier::{Copier, Reflect};
///
/// #[derive(Reflect, Default)]
/// struct Celsius {
///     value: f64,
/// }
///
/// #[derive(Reflect, Default)]
/// struct Reading {
///     value: i32,
/// }
///
/// let copier = Copier::new();
/// let mut reading = Reading::default();
/// copier.copy(&mut reading, &Celsius { value: 21.7 }).unwrap();
/// assert_eq!(reading.value, 21);
/// ```
pub struct Copier {
    converters: OnceCache<(TypeId, TypeId), Converter>,
    structs: StructInfoCache,
}

impl Copier {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            converters: OnceCache::with_capacity(config.converter_capacity),
            structs: StructInfoCache::with_capacity(config.struct_capacity),
        }
    }

    /// Process-wide instance behind the free functions.
    pub fn global() -> &'static Copier {
        GLOBAL.get_or_init(Copier::new)
    }

    /// Copy `src` into `dst`, converting field by field.
    pub fn copy<D: Reflect, S: Reflect>(&self, dst: &mut D, src: &S) -> Result<()> {
        self.copy_with_options(dst, src, &Options::default())
    }

    pub fn copy_with_options<D: Reflect, S: Reflect>(
        &self,
        dst: &mut D,
        src: &S,
        options: &Options,
    ) -> Result<()> {
        let dst: &mut dyn Reflect = dst;
        let src: &dyn Reflect = src;
        self.convert(Some(dst), Some(src), options)
    }

    /// Copy without aliasing any shared pointer.
    pub fn deep_copy<D: Reflect, S: Reflect>(&self, dst: &mut D, src: &S) -> Result<()> {
        self.copy_with_options(dst, src, &Options::new().deep_copy(true))
    }

    /// Type-erased entry point.
    ///
    /// Leading pointer layers on both sides are followed before the
    /// converter for the innermost pair runs. Fails with
    /// [`Error::InvalidDestination`] when `dst` is absent or its pointer
    /// chain ends in a nil or shared pointer, and with
    /// [`Error::InvalidSource`] when `src` is absent or its chain ends in nil.
    pub fn convert(
        &self,
        dst: Option<&mut dyn Reflect>,
        src: Option<&dyn Reflect>,
        options: &Options,
    ) -> Result<()> {
        let dst = dst.ok_or(Error::InvalidDestination)?;
        let dst = indirect_mut(ValueMut::of(dst)).ok_or(Error::InvalidDestination)?;

        let src = src.ok_or(Error::InvalidSource)?;
        let src = indirect(ValueRef::of(src)).ok_or(Error::InvalidSource)?;

        self.converter(src.ty(), dst.ty())
            .run(src, dst, &Session::new(self, options))
    }

    /// Cached converter for `src -> dst`, built on first request.
    pub fn converter(&self, src: TypeRef, dst: TypeRef) -> Converter {
        self.converters.get_or_build((src.id(), dst.id()), || {
            Converter::build(src, dst, &self.structs)
        })
    }

    /// Cached field list of a struct type; `None` for other kinds.
    pub fn struct_info(&self, ty: TypeRef) -> Option<Arc<StructInfo>> {
        self.structs.get(ty)
    }

    pub fn stats(&self) -> CopierStats {
        CopierStats {
            converters: self.converters.stats(),
            structs: self.structs.stats(),
            types: registered_types(),
        }
    }
}

impl Default for Copier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Copier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Copier")
            .field("converters", &self.converters.len())
            .field("structs", &self.structs.stats().entries)
            .finish()
    }
}

/// Follow pointers to the innermost value; `None` on a nil pointer.
fn indirect(mut handle: ValueRef<'_>) -> Option<ValueRef<'_>> {
    loop {
        let ty = handle.ty();
        let TypeKind::Pointer(p) = ty.type_kind() else {
            return Some(handle);
        };
        let target = (p.get)(handle.value())?;
        handle = ValueRef::unchecked(p.elem(), target);
    }
}

/// Follow pointers to the innermost writable value; `None` on a nil or
/// shared pointer.
fn indirect_mut(mut handle: ValueMut<'_>) -> Option<ValueMut<'_>> {
    loop {
        let ty = handle.ty();
        let TypeKind::Pointer(p) = ty.type_kind() else {
            return Some(handle);
        };
        let target = (p.get_mut)(handle.into_value())?;
        handle = ValueMut::unchecked(p.elem(), target);
    }
}
