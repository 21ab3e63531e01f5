// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Converters: resolved, cached operators for one (source, destination) pair.
//!
//! A [`Converter`] is built once per ordered type pair by the
//! [`Copier`](crate::Copier) and published in its cache. Compound
//! converters never build their children eagerly; they hold [`Link`]s that
//! look the child up on first execution, so a recursive type such as a
//! linked list resolves without re-entering its own build.

mod dispatch;
mod handle;

pub use handle::{ValueMut, ValueRef};

use crate::engine::Copier;
use crate::error::{Error, Result};
use crate::meta::{Directive, FieldInfo, StructInfo, StructInfoCache};
use crate::ops::maps::MapPlan;
use crate::ops::structs::{MapToStructPlan, StructPlan, StructToMapPlan};
use crate::ops::{self, PrimitiveOp};
use crate::options::Options;
use crate::types::TypeRef;
use dispatch::Route;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Lazily resolved child converter.
pub(crate) struct Link {
    src: TypeRef,
    dst: TypeRef,
    resolved: OnceLock<Converter>,
}

impl Link {
    pub(crate) fn new(src: TypeRef, dst: TypeRef) -> Self {
        Self {
            src,
            dst,
            resolved: OnceLock::new(),
        }
    }

    /// Converter for the linked pair, looked up on first use.
    pub(crate) fn get(&self, cx: &Session<'_>) -> &Converter {
        self.resolved
            .get_or_init(|| cx.converter(self.src, self.dst))
    }
}

/// Whether `src -> dst` and every pair nested under it has an operator.
pub(crate) fn convertible(src: TypeRef, dst: TypeRef) -> bool {
    let route = dispatch::route(src, dst);
    dispatch::supported(&route, src, dst)
}

/// Per-call execution context.
pub(crate) struct Session<'a> {
    copier: &'a Copier,
    options: &'a Options,
}

impl<'a> Session<'a> {
    pub(crate) fn new(copier: &'a Copier, options: &'a Options) -> Self {
        Self { copier, options }
    }

    pub(crate) fn converter(&self, src: TypeRef, dst: TypeRef) -> Converter {
        self.copier.converter(src, dst)
    }

    pub(crate) fn deep_copy(&self) -> bool {
        self.options.is_deep_copy()
    }

    pub(crate) fn has_overrides(&self, owner: &StructInfo) -> bool {
        self.options.has_overrides(owner.ty().id())
    }

    /// Effective directive of `field`: the per-call override if any, else its annotation.
    pub(crate) fn directive<'f>(&'f self, owner: &StructInfo, field: &'f FieldInfo) -> &'f Directive {
        self.options
            .directive_for(owner.ty().id(), field.field_name())
            .unwrap_or(field.directive())
    }
}

enum Op {
    Unsupported,
    Primitive { name: &'static str, op: PrimitiveOp },
    Sequence(Link),
    StructToStruct(StructPlan),
    StructToMap(StructToMapPlan),
    MapToStruct(MapToStructPlan),
    MapToMap(MapPlan),
    Repoint(Link),
    Deref(Link),
    AddrOf(Link),
    Unbox,
    Boxed(Link),
}

impl Op {
    fn name(&self) -> &'static str {
        match self {
            Op::Unsupported => "unsupported",
            Op::Primitive { name, .. } => *name,
            Op::Sequence(_) => "sequence",
            Op::StructToStruct(_) => "struct->struct",
            Op::StructToMap(_) => "struct->map",
            Op::MapToStruct(_) => "map->struct",
            Op::MapToMap(_) => "map->map",
            Op::Repoint(_) => "ptr->ptr",
            Op::Deref(_) => "ptr->t",
            Op::AddrOf(_) => "t->ptr",
            Op::Unbox => "dyn->t",
            Op::Boxed(_) => "t->dyn",
        }
    }
}

struct Inner {
    src: TypeRef,
    dst: TypeRef,
    op: Op,
}

/// Cached conversion routine for one (source, destination) type pair.
///
/// Cheap to clone. A converter for an unsupported pair exists too; running
/// it fails with [`Error::Unsupported`].
#[derive(Clone)]
pub struct Converter(Arc<Inner>);

impl Converter {
    pub(crate) fn build(src: TypeRef, dst: TypeRef, structs: &StructInfoCache) -> Self {
        let route = dispatch::route(src, dst);
        let op = if dispatch::supported(&route, src, dst) {
            Self::plan(route, src, dst, structs)
        } else {
            Op::Unsupported
        };
        log::debug!(
            "[convert] built {} -> {} ({})",
            src.name(),
            dst.name(),
            op.name()
        );
        Self(Arc::new(Inner { src, dst, op }))
    }

    fn plan(route: Route, src: TypeRef, dst: TypeRef, structs: &StructInfoCache) -> Op {
        match route {
            Route::Unsupported => Op::Unsupported,
            Route::Primitive(name, op) => Op::Primitive { name, op },
            Route::Sequence { src_elem, dst_elem } => Op::Sequence(Link::new(src_elem, dst_elem)),
            Route::StructToStruct => match (structs.get(src), structs.get(dst)) {
                (Some(from), Some(to)) => Op::StructToStruct(StructPlan::new(from, to)),
                _ => Op::Unsupported,
            },
            Route::StructToMap => match (structs.get(src), dst.key_value()) {
                (Some(from), Some((_, value))) => Op::StructToMap(StructToMapPlan::new(from, value)),
                _ => Op::Unsupported,
            },
            Route::MapToStruct => match (src.key_value(), structs.get(dst)) {
                (Some((_, value)), Some(to)) => Op::MapToStruct(MapToStructPlan::new(value, to)),
                _ => Op::Unsupported,
            },
            Route::MapToMap { keys, values } => Op::MapToMap(MapPlan::new(keys, values)),
            Route::PtrToPtr { src_elem, dst_elem } => Op::Repoint(Link::new(src_elem, dst_elem)),
            Route::PtrToT { elem } => Op::Deref(Link::new(elem, dst)),
            Route::TToPtr { elem } => Op::AddrOf(Link::new(src, elem)),
            Route::DynToT => Op::Unbox,
            Route::TToDyn => Op::Boxed(Link::new(src, src)),
        }
    }

    pub fn source(&self) -> TypeRef {
        self.0.src
    }

    pub fn destination(&self) -> TypeRef {
        self.0.dst
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self.0.op, Op::Unsupported)
    }

    /// Short name of the selected operator, e.g. `"int->string"`.
    pub fn operator(&self) -> &'static str {
        self.0.op.name()
    }

    /// Convert `src` into `dst`. Both handles must carry this converter's types.
    pub(crate) fn run(&self, src: ValueRef<'_>, dst: ValueMut<'_>, cx: &Session<'_>) -> Result<()> {
        debug_assert_eq!(src.ty().id(), self.0.src.id());
        debug_assert_eq!(dst.ty().id(), self.0.dst.id());

        // @audit-ok: Operator dispatch (one arm per operator family)
        match &self.0.op {
            Op::Unsupported => Err(Error::Unsupported {
                src: self.0.src.name(),
                dst: self.0.dst.name(),
            }),
            Op::Primitive { op, .. } => op(src, dst),
            Op::Sequence(elem) => ops::seq::convert(src, dst, elem, cx),
            Op::StructToStruct(plan) => plan.convert(src, dst, cx),
            Op::StructToMap(plan) => plan.convert(src, dst, cx),
            Op::MapToStruct(plan) => plan.convert(src, dst, cx),
            Op::MapToMap(plan) => plan.convert(src, dst, cx),
            Op::Repoint(elem) => ops::indirect::repoint(src, dst, elem, cx),
            Op::Deref(elem) => ops::indirect::deref(src, dst, elem, cx),
            Op::AddrOf(elem) => ops::indirect::addr_of(src, dst, elem, cx),
            Op::Unbox => ops::indirect::unbox(src, dst, cx),
            Op::Boxed(same) => ops::indirect::boxed(src, dst, same, cx),
        }
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("src", &self.0.src.name())
            .field("dst", &self.0.dst.name())
            .field("op", &self.0.op.name())
            .finish()
    }
}
