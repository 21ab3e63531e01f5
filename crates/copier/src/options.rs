// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-call copy options.

use crate::meta::Directive;
use crate::types::Reflect;
use std::any::TypeId;
use std::collections::HashMap;

/// Options for one [`copy_with_options`](crate::copy_with_options) call.
///
/// # Example
///
/// ```rust
/// use copier::{Directive, Options, Reflect};
///
/// #[derive(Reflect, Default)]
/// struct User {
///     name: String,
///     token: String,
/// }
///
/// let opts = Options::new()
///     .deep_copy(true)
///     .field_directive::<User>("token", Directive::skip());
///
/// let src = User { name: "ada".into(), token: "secret".into() };
/// let mut dst = User::default();
/// copier::copy_with_options(&mut dst, &src, &opts).unwrap();
/// assert_eq!(dst.name, "ada");
/// assert!(dst.token.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Options {
    deep_copy: bool,
    /// Struct type -> declared field name -> directive.
    directives: HashMap<TypeId, HashMap<String, Directive>>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never alias shared pointers; every pointee is copied.
    #[must_use]
    pub fn deep_copy(mut self, enabled: bool) -> Self {
        self.deep_copy = enabled;
        self
    }

    /// Replace the annotation of field `field` (declared name) on struct `T`.
    #[must_use]
    pub fn field_directive<T: Reflect>(mut self, field: &str, directive: Directive) -> Self {
        self.directives
            .entry(TypeId::of::<T>())
            .or_default()
            .insert(field.to_owned(), directive);
        self
    }

    pub fn is_deep_copy(&self) -> bool {
        self.deep_copy
    }

    /// Override registered for `field` of the struct `owner`.
    pub fn directive_for(&self, owner: TypeId, field: &str) -> Option<&Directive> {
        self.directives.get(&owner)?.get(field)
    }

    /// True if any field of `owner` has an override.
    pub(crate) fn has_overrides(&self, owner: TypeId) -> bool {
        self.directives
            .get(&owner)
            .is_some_and(|fields| !fields.is_empty())
    }
}
