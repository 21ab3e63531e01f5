// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type information consumed by the conversion engine.
//!
//! A type takes part in conversions by implementing [`Reflect`]. The crate
//! implements it for the primitives, `String`, `Vec<T>`, `[T; N]`,
//! `HashMap`, `BTreeMap`, `Option<T>`, `Box<T>`, `Arc<T>`, [`Complex`] and
//! [`Dynamic`]; structs with named fields use `#[derive(Reflect)]`.
//!
//! # Example
//!
//! ```rust
//! use copier::{Kind, Reflect};
//!
//! #[derive(Reflect)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let ty = Point::type_ref();
//! assert_eq!(ty.kind(), Kind::Struct);
//! assert_eq!(ty.fields().len(), 2);
//! assert!(std::ptr::eq(ty, Point::type_ref()));
//! ```

use std::any::Any;

/// Expands to the object-safe accessor methods of [`Reflect`].
macro_rules! reflect_methods {
    () => {
        fn reflect_type(&self) -> $crate::TypeRef {
            <Self as $crate::Reflect>::type_ref()
        }

        fn as_any(&self) -> &dyn ::std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
            self
        }

        fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
            self
        }
    };
}

mod complex;
mod descriptor;
mod dynamic;
mod impls;
mod registry;
mod scalar;

pub use complex::{Complex, Complex32, Complex64};
pub use descriptor::{
    FieldDescriptor, Kind, MapDescriptor, PointerDescriptor, PrimitiveKind, SequenceDescriptor,
    StructDescriptor, TypeDescriptor, TypeKind, TypeRef,
};
pub use dynamic::Dynamic;
pub use registry::{intern, registered_types};
pub(crate) use scalar::Scalar;

/// A type whose values the engine can read, write and allocate at run time.
///
/// # Safety
///
/// The engine accesses struct fields by byte offset. Implementations must:
/// - return from [`type_ref`](Reflect::type_ref) a descriptor built with
///   [`TypeDescriptor::new::<Self>`] or [`TypeDescriptor::structure::<Self>`];
/// - for structs, describe every listed field with its real type and the
///   offset reported by `core::mem::offset_of!`, and every such offset
///   must be suitably aligned for the field type (no `repr(packed)`);
/// - return `Self::type_ref()` from [`reflect_type`](Reflect::reflect_type).
///
/// `#[derive(Reflect)]` upholds all of this.
pub unsafe trait Reflect: Any + Send + Sync + 'static {
    /// Interned descriptor of `Self`.
    fn type_ref() -> TypeRef
    where
        Self: Sized;

    /// Zero value of `Self` (empty containers, nil pointers, zero numbers).
    fn zero() -> Self
    where
        Self: Sized;

    /// Descriptor of the concrete type behind `self`.
    fn reflect_type(&self) -> TypeRef;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl dyn Reflect {
    /// True if the concrete type is `T`.
    pub fn is<T: Reflect>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl std::fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.reflect_type().name())
    }
}
