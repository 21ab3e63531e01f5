// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Struct operators: struct to struct, struct to map and map to struct.
//!
//! Fields are matched by their effective name (rename target, or the
//! declared name). Field pairs are resolved when the converter is built;
//! calls that carry per-field overrides for either struct type match names
//! again at run time.

use super::maps::map_of;
use crate::convert::{convertible, Link, Session, ValueMut, ValueRef};
use crate::error::{Error, Result};
use crate::meta::{FieldInfo, Requirement, StructInfo};
use crate::types::{Scalar, TypeRef};
use std::sync::Arc;

/// Link for `from -> to`, or `None` if the pair has no operator.
fn link(from: TypeRef, to: TypeRef) -> Option<Link> {
    convertible(from, to).then(|| Link::new(from, to))
}

/// Fill one destination field under `requirement`.
///
/// `value` is the matched source value (`None` when the source has no
/// counterpart), `link` the converter for the pair (`None` when
/// unsupported).
fn fill(
    owner: &StructInfo,
    field: &FieldInfo,
    requirement: Requirement,
    value: Option<ValueRef<'_>>,
    link: Option<&Link>,
    mut slot: ValueMut<'_>,
    cx: &Session<'_>,
) -> Result<()> {
    let Some(value) = value else {
        return missing(owner, field, requirement, slot);
    };
    if requirement != Requirement::Optional && value.is_nil() {
        return missing(owner, field, requirement, slot);
    }

    let Some(link) = link else {
        return match requirement {
            Requirement::Optional => Ok(()),
            Requirement::Required => Err(Error::field(
                owner.name(),
                field.field_name(),
                Error::Unsupported {
                    src: value.ty().name(),
                    dst: field.ty().name(),
                },
            )),
            Requirement::RequiredNoFail => {
                slot.reset();
                Ok(())
            }
        };
    };

    // Dynamic values are only resolved here, so an unsupported pair can
    // still surface at run time.
    match link.get(cx).run(value, slot.reborrow(), cx) {
        Ok(()) => Ok(()),
        Err(e) if requirement == Requirement::Optional && e.is_unsupported() => Ok(()),
        Err(_) if requirement == Requirement::RequiredNoFail => {
            slot.reset();
            Ok(())
        }
        Err(e) => Err(Error::field(owner.name(), field.field_name(), e)),
    }
}

/// No usable source value for `field`.
fn missing(
    owner: &StructInfo,
    field: &FieldInfo,
    requirement: Requirement,
    mut slot: ValueMut<'_>,
) -> Result<()> {
    match requirement {
        Requirement::Optional => Ok(()),
        Requirement::Required => Err(Error::RequiredFieldMissing {
            owner: owner.name(),
            field: field.field_name(),
        }),
        Requirement::RequiredNoFail => {
            slot.reset();
            Ok(())
        }
    }
}

/// Index of the field of `info` matched under `name`, honoring overrides.
fn lookup(info: &StructInfo, name: &str, cx: &Session<'_>) -> Option<usize> {
    if !cx.has_overrides(info) {
        return info.position(name);
    }
    info.fields().iter().position(|f| {
        let directive = cx.directive(info, f);
        !directive.is_skip() && directive.match_name(f.field_name()) == name
    })
}

// ============================================================================
// Struct -> Struct
// ============================================================================

struct FieldPair {
    dst: usize,
    src: Option<usize>,
    link: Option<Link>,
}

/// Field pairing between two struct types.
pub(crate) struct StructPlan {
    src: Arc<StructInfo>,
    dst: Arc<StructInfo>,
    pairs: Vec<FieldPair>,
}

impl StructPlan {
    pub(crate) fn new(src: Arc<StructInfo>, dst: Arc<StructInfo>) -> Self {
        let pairs = dst
            .fields()
            .iter()
            .enumerate()
            .filter(|(_, to)| !to.directive().is_skip())
            .map(|(idx, to)| {
                let from = src
                    .position(to.name())
                    .filter(|&j| !src.fields()[j].directive().is_skip());
                FieldPair {
                    dst: idx,
                    src: from,
                    link: from.and_then(|j| link(src.fields()[j].ty(), to.ty())),
                }
            })
            .collect();
        Self { src, dst, pairs }
    }

    pub(crate) fn convert(
        &self,
        src: ValueRef<'_>,
        mut dst: ValueMut<'_>,
        cx: &Session<'_>,
    ) -> Result<()> {
        src.expect(self.src.ty())?;
        dst.expect(self.dst.ty())?;

        if cx.has_overrides(&self.src) || cx.has_overrides(&self.dst) {
            return self.convert_with_overrides(src, dst, cx);
        }

        for pair in &self.pairs {
            let to = &self.dst.fields()[pair.dst];
            let value = pair.src.map(|j| src.field(&self.src.fields()[j]));
            fill(
                &self.dst,
                to,
                to.directive().requirement(),
                value,
                pair.link.as_ref(),
                dst.field(to),
                cx,
            )?;
        }
        Ok(())
    }

    fn convert_with_overrides(
        &self,
        src: ValueRef<'_>,
        mut dst: ValueMut<'_>,
        cx: &Session<'_>,
    ) -> Result<()> {
        for to in self.dst.fields() {
            let directive = cx.directive(&self.dst, to);
            if directive.is_skip() {
                continue;
            }
            let from = lookup(&self.src, directive.match_name(to.field_name()), cx)
                .map(|j| &self.src.fields()[j]);
            let pair = from.and_then(|f| link(f.ty(), to.ty()));
            fill(
                &self.dst,
                to,
                directive.requirement(),
                from.map(|f| src.field(f)),
                pair.as_ref(),
                dst.field(to),
                cx,
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Struct -> Map
// ============================================================================

/// One map entry per non-skipped field, keyed by effective name.
pub(crate) struct StructToMapPlan {
    src: Arc<StructInfo>,
    value: TypeRef,
    links: Vec<Option<Link>>,
}

impl StructToMapPlan {
    pub(crate) fn new(src: Arc<StructInfo>, value: TypeRef) -> Self {
        let links = src.fields().iter().map(|f| link(f.ty(), value)).collect();
        Self { src, value, links }
    }

    /// Fields whose type does not convert to the map value type are skipped.
    pub(crate) fn convert(
        &self,
        src: ValueRef<'_>,
        mut dst: ValueMut<'_>,
        cx: &Session<'_>,
    ) -> Result<()> {
        src.expect(self.src.ty())?;
        let to = map_of(dst.ty())?;
        let key_ty = to.key();

        for (field, link) in self.src.fields().iter().zip(&self.links) {
            let directive = cx.directive(&self.src, field);
            let Some(link) = link else { continue };
            if directive.is_skip() {
                continue;
            }

            let mut value = self.value.new_value();
            link.get(cx)
                .run(src.field(field), ValueMut::of(&mut *value), cx)
                .map_err(|e| Error::field(self.src.name(), field.field_name(), e))?;

            let mut key = key_ty.new_value();
            ValueMut::of(&mut *key).store(Scalar::Str(directive.match_name(field.field_name())))?;

            if !(to.insert)(dst.value_mut(), key.into_any(), value.into_any()) {
                return Err(super::shape_mismatch("map", dst.ty()));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Map -> Struct
// ============================================================================

/// Assign map entries to the fields whose effective name equals the key.
pub(crate) struct MapToStructPlan {
    value: TypeRef,
    dst: Arc<StructInfo>,
    links: Vec<Option<Link>>,
}

impl MapToStructPlan {
    pub(crate) fn new(value: TypeRef, dst: Arc<StructInfo>) -> Self {
        let links = dst.fields().iter().map(|f| link(value, f.ty())).collect();
        Self { value, dst, links }
    }

    /// Unmatched keys are ignored. Required fields without an entry are
    /// checked once all entries are assigned.
    pub(crate) fn convert(
        &self,
        src: ValueRef<'_>,
        mut dst: ValueMut<'_>,
        cx: &Session<'_>,
    ) -> Result<()> {
        dst.expect(self.dst.ty())?;
        let from = map_of(src.ty())?;
        let key_ty = from.key();

        let fields = self.dst.fields();
        let mut filled = vec![false; fields.len()];
        for (k, v) in (from.entries)(src.value()) {
            let Scalar::Str(name) = ValueRef::unchecked(key_ty, k).scalar()? else {
                continue;
            };
            let Some(idx) = lookup(&self.dst, name, cx) else {
                continue;
            };
            let to = &fields[idx];
            let directive = cx.directive(&self.dst, to);
            if directive.is_skip() {
                continue;
            }
            filled[idx] = true;
            fill(
                &self.dst,
                to,
                directive.requirement(),
                Some(ValueRef::unchecked(self.value, v)),
                self.links[idx].as_ref(),
                dst.field(to),
                cx,
            )?;
        }

        for (idx, to) in fields.iter().enumerate() {
            let directive = cx.directive(&self.dst, to);
            if filled[idx] || directive.is_skip() || !directive.is_required() {
                continue;
            }
            fill(
                &self.dst,
                to,
                directive.requirement(),
                None,
                None,
                dst.field(to),
                cx,
            )?;
        }
        Ok(())
    }
}
