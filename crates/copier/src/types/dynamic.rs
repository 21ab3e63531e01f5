// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Boxed value of any reflected type.

use super::{Reflect, TypeRef};
use std::fmt;

/// A slot that holds a value of any [`Reflect`] type, or nothing.
///
/// Converting *from* a `Dynamic` unwraps the held value and converts it by
/// its concrete type; converting *into* one boxes a fresh copy of the
/// source value.
#[derive(Default)]
pub struct Dynamic(Option<Box<dyn Reflect>>);

impl Dynamic {
    /// Wrap `value`.
    pub fn new<T: Reflect>(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    /// The empty (nil) value.
    pub const fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn get(&self) -> Option<&dyn Reflect> {
        self.0.as_deref()
    }

    pub fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.0.as_deref_mut()
    }

    /// Replace the held value.
    pub fn set(&mut self, value: Box<dyn Reflect>) {
        self.0 = Some(value);
    }

    pub fn take(&mut self) -> Option<Box<dyn Reflect>> {
        self.0.take()
    }

    /// Descriptor of the held value.
    pub fn held_type(&self) -> Option<TypeRef> {
        self.0.as_ref().map(|v| v.reflect_type())
    }

    pub fn is<T: Reflect>(&self) -> bool {
        self.get().is_some_and(|v| v.is::<T>())
    }

    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.get()?.downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        self.get_mut()?.downcast_mut::<T>()
    }
}

impl From<Box<dyn Reflect>> for Dynamic {
    fn from(value: Box<dyn Reflect>) -> Self {
        Self(Some(value))
    }
}

impl fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => write!(f, "Dynamic({})", value.reflect_type().name()),
            None => f.write_str("Dynamic(nil)"),
        }
    }
}
