// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed, non-owning views over values.

use crate::error::{Error, Result};
use crate::meta::FieldInfo;
use crate::types::{Kind, Reflect, Scalar, TypeKind, TypeRef};
use std::any::Any;
use std::fmt;

/// Read-only view: a descriptor plus the value it describes.
#[derive(Clone, Copy)]
pub struct ValueRef<'a> {
    ty: TypeRef,
    value: &'a dyn Any,
}

/// Writable view: a descriptor plus the value it describes.
pub struct ValueMut<'a> {
    ty: TypeRef,
    value: &'a mut dyn Any,
}

impl<'a> ValueRef<'a> {
    pub fn of(value: &'a dyn Reflect) -> Self {
        Self {
            ty: value.reflect_type(),
            value: value.as_any(),
        }
    }

    /// View produced by walking a descriptor (field, element, pointee).
    pub(crate) fn unchecked(ty: TypeRef, value: &'a dyn Any) -> Self {
        debug_assert_eq!(Any::type_id(value), ty.id(), "handle for {}", ty.name());
        Self { ty, value }
    }

    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    pub fn value(&self) -> &'a dyn Any {
        self.value
    }

    /// Fail unless the view holds a value of `ty`.
    pub(crate) fn expect(&self, ty: TypeRef) -> Result<()> {
        if Any::type_id(self.value) == ty.id() {
            Ok(())
        } else {
            Err(Error::TypeMismatch {
                expected: ty.name(),
                found: self.ty.name(),
            })
        }
    }

    /// Read a primitive as a width-erased scalar.
    pub(crate) fn scalar(&self) -> Result<Scalar<'a>> {
        self.ty
            .primitive()
            .and_then(|p| p.load(self.value))
            .ok_or(Error::TypeMismatch {
                expected: "primitive",
                found: self.ty.name(),
            })
    }

    /// Nil pointer or empty dynamic value.
    pub(crate) fn is_nil(&self) -> bool {
        match self.ty.type_kind() {
            TypeKind::Pointer(p) => (p.get)(self.value).is_none(),
            TypeKind::Dynamic => self
                .value
                .downcast_ref::<crate::Dynamic>()
                .map_or(true, |d| d.is_empty()),
            _ => false,
        }
    }

    /// View of a struct field through its cached offset.
    ///
    /// `self` must hold the struct `field` was collected from; struct
    /// operators check this with [`expect`](Self::expect) on entry.
    pub(crate) fn field(&self, field: &FieldInfo) -> ValueRef<'a> {
        debug_assert_eq!(self.ty.kind(), Kind::Struct);
        let base = (self.value as *const dyn Any).cast::<u8>();
        // SAFETY: `self.value` is a live value of the struct type whose
        // descriptor produced `field`, and `field.offset()` was taken with
        // `offset_of!` on that type (through at most one embedded struct), so
        // the address is in bounds, aligned, and holds an initialized
        // `field.ty()` that lives as long as the struct borrow `'a`.
        let value = unsafe { &*field.ty().erase(base.add(field.offset())) };
        Self::unchecked(field.ty(), value)
    }
}

impl<'a> ValueMut<'a> {
    pub fn of(value: &'a mut dyn Reflect) -> Self {
        let ty = value.reflect_type();
        Self {
            ty,
            value: value.as_any_mut(),
        }
    }

    pub(crate) fn unchecked(ty: TypeRef, value: &'a mut dyn Any) -> Self {
        debug_assert_eq!(Any::type_id(&*value), ty.id(), "handle for {}", ty.name());
        Self { ty, value }
    }

    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    pub fn value(&self) -> &dyn Any {
        &*self.value
    }

    pub fn value_mut(&mut self) -> &mut dyn Any {
        &mut *self.value
    }

    pub(crate) fn into_value(self) -> &'a mut dyn Any {
        self.value
    }

    /// Shorter-lived view of the same value.
    pub(crate) fn reborrow(&mut self) -> ValueMut<'_> {
        ValueMut {
            ty: self.ty,
            value: &mut *self.value,
        }
    }

    pub(crate) fn expect(&self, ty: TypeRef) -> Result<()> {
        if Any::type_id(&*self.value) == ty.id() {
            Ok(())
        } else {
            Err(Error::TypeMismatch {
                expected: ty.name(),
                found: self.ty.name(),
            })
        }
    }

    /// Write a width-erased scalar into a primitive.
    pub(crate) fn store(&mut self, scalar: Scalar<'_>) -> Result<()> {
        match self.ty.primitive() {
            Some(p) => p.store(&mut *self.value, scalar),
            None => Err(Error::TypeMismatch {
                expected: "primitive",
                found: self.ty.name(),
            }),
        }
    }

    /// Overwrite with the zero value.
    pub(crate) fn reset(&mut self) {
        self.ty.reset(&mut *self.value);
    }

    /// Writable view of a struct field through its cached offset.
    pub(crate) fn field(&mut self, field: &FieldInfo) -> ValueMut<'_> {
        debug_assert_eq!(self.ty.kind(), Kind::Struct);
        let base = (&mut *self.value as *mut dyn Any).cast::<u8>();
        // SAFETY: as for `ValueRef::field`; the field borrow is derived from
        // the exclusive borrow of `self`, so no other view of it exists while
        // the returned handle lives.
        let value = unsafe { &mut *field.ty().erase_mut(base.add(field.offset())) };
        ValueMut::unchecked(field.ty(), value)
    }
}

impl fmt::Debug for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueRef({})", self.ty.name())
    }
}

impl fmt::Debug for ValueMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueMut({})", self.ty.name())
    }
}
