// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Pointer and dynamic-value operators.

use super::shape_mismatch;
use crate::convert::{Converter, Link, Session, ValueMut, ValueRef};
use crate::error::Result;
use crate::types::{Dynamic, PointerDescriptor, TypeKind, TypeRef};

fn pointer(ty: TypeRef) -> Result<&'static PointerDescriptor> {
    match ty.type_kind() {
        TypeKind::Pointer(p) => Ok(p),
        _ => Err(shape_mismatch("pointer", ty)),
    }
}

/// Pointer on both sides: convert the source pointee into the destination
/// pointee.
///
/// A nil source resets the destination. Identical shared pointer types
/// alias the source allocation unless the call asks for a deep copy.
pub(crate) fn repoint(
    src: ValueRef<'_>,
    mut dst: ValueMut<'_>,
    elem: &Link,
    cx: &Session<'_>,
) -> Result<()> {
    let p = pointer(src.ty())?;
    let Some(target) = (p.get)(src.value()) else {
        dst.reset();
        return Ok(());
    };

    if let Some(share) = p.share {
        if !cx.deep_copy() && src.ty().id() == dst.ty().id() && share(src.value(), dst.value_mut()) {
            return Ok(());
        }
    }

    let converter = elem.get(cx);
    write_through(
        ValueRef::unchecked(converter.source(), target),
        dst,
        converter,
        cx,
    )
}

/// Pointer source: convert the pointee. A nil source resets the destination.
pub(crate) fn deref(
    src: ValueRef<'_>,
    mut dst: ValueMut<'_>,
    elem: &Link,
    cx: &Session<'_>,
) -> Result<()> {
    let p = pointer(src.ty())?;
    let Some(target) = (p.get)(src.value()) else {
        dst.reset();
        return Ok(());
    };
    let converter = elem.get(cx);
    converter.run(ValueRef::unchecked(converter.source(), target), dst, cx)
}

/// Pointer destination: convert into the pointee.
pub(crate) fn addr_of(
    src: ValueRef<'_>,
    dst: ValueMut<'_>,
    elem: &Link,
    cx: &Session<'_>,
) -> Result<()> {
    write_through(src, dst, elem.get(cx), cx)
}

/// Write through a uniquely owned pointee; otherwise build a fresh one and
/// point the destination at it.
fn write_through(
    src: ValueRef<'_>,
    mut dst: ValueMut<'_>,
    converter: &Converter,
    cx: &Session<'_>,
) -> Result<()> {
    let p = pointer(dst.ty())?;
    let target_ty = converter.destination();

    if let Some(target) = (p.get_mut)(dst.value_mut()) {
        return converter.run(src, ValueMut::unchecked(target_ty, target), cx);
    }

    let mut fresh = target_ty.new_value();
    converter.run(src, ValueMut::of(&mut *fresh), cx)?;
    if (p.install)(dst.value_mut(), fresh.into_any()) {
        Ok(())
    } else {
        Err(shape_mismatch("pointer", dst.ty()))
    }
}

/// Dynamic source: convert the held value by its concrete type.
pub(crate) fn unbox(src: ValueRef<'_>, mut dst: ValueMut<'_>, cx: &Session<'_>) -> Result<()> {
    let dynamic = src
        .value()
        .downcast_ref::<Dynamic>()
        .ok_or_else(|| shape_mismatch("Dynamic", src.ty()))?;
    let Some(inner) = dynamic.get() else {
        dst.reset();
        return Ok(());
    };
    cx.converter(inner.reflect_type(), dst.ty())
        .run(ValueRef::of(inner), dst, cx)
}

/// Dynamic destination: store a converted copy of the source value.
pub(crate) fn boxed(
    src: ValueRef<'_>,
    mut dst: ValueMut<'_>,
    same: &Link,
    cx: &Session<'_>,
) -> Result<()> {
    let mut fresh = src.ty().new_value();
    same.get(cx).run(src, ValueMut::of(&mut *fresh), cx)?;

    let ty = dst.ty();
    let slot = dst
        .value_mut()
        .downcast_mut::<Dynamic>()
        .ok_or_else(|| shape_mismatch("Dynamic", ty))?;
    slot.set(fresh);
    Ok(())
}
