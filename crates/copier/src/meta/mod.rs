// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural metadata cache.
//!
//! For each struct type the cache holds the ordered field list with parsed
//! directives, cumulative byte offsets and resolved field types. Fields of
//! an embedded (`#[copier(flatten)]`) struct are promoted one level into the
//! parent list:
//!
//! - a field declared directly on the struct shadows promoted fields with
//!   the same match name;
//! - promoted fields sharing a match name with each other are ambiguous and
//!   dropped.

mod directive;

pub use directive::{Directive, Requirement};

use crate::cache::{LookupStats, OnceCache};
use crate::types::{FieldDescriptor, Kind, TypeRef};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

/// One matchable field of a struct.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    name: String,
    field_name: &'static str,
    directive: Directive,
    offset: usize,
    ty: TypeRef,
    promoted_from: Option<&'static str>,
}

impl FieldInfo {
    fn from_descriptor(field: &FieldDescriptor, base: usize, via: Option<&'static str>) -> Self {
        let directive = Directive::parse(field.raw_tag());
        Self {
            name: directive.match_name(field.name()).to_owned(),
            field_name: field.name(),
            directive,
            offset: base + field.offset(),
            ty: field.ty(),
            promoted_from: via,
        }
    }

    /// Name the field is matched under (rename target or declared name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name as declared in the Rust struct.
    pub fn field_name(&self) -> &'static str {
        self.field_name
    }

    pub fn directive(&self) -> &Directive {
        &self.directive
    }

    /// Byte offset from the start of the owning struct.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    /// Declared name of the embedded field this one was promoted through.
    pub fn promoted_from(&self) -> Option<&'static str> {
        self.promoted_from
    }
}

/// Cached field list of one struct type.
#[derive(Debug)]
pub struct StructInfo {
    ty: TypeRef,
    fields: Vec<FieldInfo>,
    by_name: HashMap<String, usize>,
}

impl StructInfo {
    /// Flatten and index the declared fields of `ty`.
    fn build(ty: TypeRef) -> Self {
        let mut direct = Vec::new();
        let mut promoted = Vec::new();

        for field in ty.fields() {
            let field_ty = field.ty();
            if field.is_embedded() && field_ty.kind() == Kind::Struct {
                for inner in field_ty.fields() {
                    promoted.push(FieldInfo::from_descriptor(
                        inner,
                        field.offset(),
                        Some(field.name()),
                    ));
                }
            } else {
                direct.push(FieldInfo::from_descriptor(field, 0, None));
            }
        }

        let mut promoted_count: HashMap<&str, usize> = HashMap::new();
        for f in &promoted {
            *promoted_count.entry(f.name.as_str()).or_default() += 1;
        }
        let shadowed: Vec<bool> = promoted
            .iter()
            .map(|f| {
                promoted_count.get(f.name.as_str()).copied().unwrap_or(0) > 1
                    || direct.iter().any(|d| d.name == f.name)
            })
            .collect();

        let mut fields = direct;
        for (f, drop) in promoted.into_iter().zip(shadowed) {
            if drop {
                log::debug!(
                    "[meta] {}: promoted field {} is shadowed or ambiguous, dropped",
                    ty.name(),
                    f.name
                );
            } else {
                fields.push(f);
            }
        }

        let mut by_name = HashMap::with_capacity(fields.len());
        for (idx, f) in fields.iter().enumerate() {
            by_name.entry(f.name.clone()).or_insert(idx);
        }

        Self {
            ty,
            fields,
            by_name,
        }
    }

    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    pub fn name(&self) -> &'static str {
        self.ty.name()
    }

    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Index of the field matched under `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Field matched under `name`.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.position(name).map(|idx| &self.fields[idx])
    }
}

/// Process-lifetime cache of [`StructInfo`], one build per struct type.
pub(crate) struct StructInfoCache {
    cache: OnceCache<TypeId, Arc<StructInfo>>,
}

impl StructInfoCache {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: OnceCache::with_capacity(capacity),
        }
    }

    /// Field list of `ty`, or `None` if `ty` is not a struct.
    pub(crate) fn get(&self, ty: TypeRef) -> Option<Arc<StructInfo>> {
        if ty.kind() != Kind::Struct {
            return None;
        }
        Some(self.cache.get_or_build(ty.id(), || {
            let info = StructInfo::build(ty);
            log::debug!(
                "[meta] built {} ({} fields)",
                info.name(),
                info.fields.len()
            );
            Arc::new(info)
        }))
    }

    pub(crate) fn stats(&self) -> LookupStats {
        self.cache.stats()
    }
}
