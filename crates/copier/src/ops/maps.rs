// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Map to map operator.

use super::shape_mismatch;
use crate::convert::{Link, Session, ValueMut, ValueRef};
use crate::error::{Error, Result};
use crate::types::{MapDescriptor, TypeKind, TypeRef};

pub(crate) fn map_of(ty: TypeRef) -> Result<&'static MapDescriptor> {
    match ty.type_kind() {
        TypeKind::Map(m) => Ok(m),
        _ => Err(shape_mismatch("map", ty)),
    }
}

/// Key and value converters of a map to map conversion.
pub(crate) struct MapPlan {
    key: Link,
    value: Link,
}

impl MapPlan {
    pub(crate) fn new(keys: (TypeRef, TypeRef), values: (TypeRef, TypeRef)) -> Self {
        Self {
            key: Link::new(keys.0, keys.1),
            value: Link::new(values.0, values.1),
        }
    }

    /// Convert every entry and merge it into the destination map.
    ///
    /// Keys and values are built in fresh zero values, never in place. A
    /// failing key aborts with [`Error::MapKey`]; entries inserted before
    /// it stay.
    pub(crate) fn convert(
        &self,
        src: ValueRef<'_>,
        mut dst: ValueMut<'_>,
        cx: &Session<'_>,
    ) -> Result<()> {
        let from = map_of(src.ty())?;
        let to = map_of(dst.ty())?;

        let entries = (from.entries)(src.value());
        if entries.is_empty() {
            return Ok(());
        }

        let keys = self.key.get(cx);
        let values = self.value.get(cx);
        for (k, v) in entries {
            let mut key = keys.destination().new_value();
            keys.run(
                ValueRef::unchecked(keys.source(), k),
                ValueMut::of(&mut *key),
                cx,
            )
            .map_err(|e| Error::MapKey {
                source: Box::new(e),
            })?;

            let mut value = values.destination().new_value();
            values.run(
                ValueRef::unchecked(values.source(), v),
                ValueMut::of(&mut *value),
                cx,
            )?;

            if !(to.insert)(dst.value_mut(), key.into_any(), value.into_any()) {
                return Err(shape_mismatch("map", dst.ty()));
            }
        }
        Ok(())
    }
}
