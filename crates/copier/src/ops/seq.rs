// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Slice and array operators.

use super::shape_mismatch;
use crate::convert::{Link, Session, ValueMut, ValueRef};
use crate::error::{Error, Result};
use crate::types::{SequenceDescriptor, TypeKind, TypeRef};

fn sequence(ty: TypeRef) -> Result<&'static SequenceDescriptor> {
    match ty.type_kind() {
        TypeKind::Slice(s) | TypeKind::Array(s) => Ok(s),
        _ => Err(shape_mismatch("slice or array", ty)),
    }
}

/// Element-wise conversion.
///
/// A slice destination gets fresh storage sized to the source. An array
/// destination keeps its length; elements past the shorter side are left
/// untouched.
pub(crate) fn convert(
    src: ValueRef<'_>,
    mut dst: ValueMut<'_>,
    elem: &Link,
    cx: &Session<'_>,
) -> Result<()> {
    let from = sequence(src.ty())?;
    let to = sequence(dst.ty())?;

    let len = (from.len)(src.value());
    let count = match to.rebuild {
        Some(rebuild) => {
            rebuild(dst.value_mut(), len);
            len
        }
        None => len.min((to.len)(dst.value())),
    };
    if count == 0 {
        return Ok(());
    }

    let converter = elem.get(cx);
    let (src_elem, dst_elem) = (converter.source(), converter.destination());
    for index in 0..count {
        let item = (from.get)(src.value(), index).ok_or_else(|| shape_mismatch("element", src.ty()))?;
        let slot = (to.get_mut)(dst.value_mut(), index)
            .ok_or_else(|| shape_mismatch("element", dst_elem))?;
        converter
            .run(
                ValueRef::unchecked(src_elem, item),
                ValueMut::unchecked(dst_elem, slot),
                cx,
            )
            .map_err(|e| Error::element(index, e))?;
    }
    Ok(())
}
