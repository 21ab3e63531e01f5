// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dispatch table: which operator handles a (source, destination) pair.
//!
//! Widths are collapsed into [`Kind`] classes before matching. Pointer and
//! dynamic wrappers are peeled first (a pointer pair as a unit, then source
//! side before destination side), then the kind matrix decides.

use crate::ops::{self, PrimitiveOp};
use crate::types::{Kind, PrimitiveKind, TypeKind, TypeRef};
use std::any::TypeId;
use std::collections::HashSet;

/// Operator family selected for a pair, with the nested pairs it needs.
pub(crate) enum Route {
    Unsupported,
    Primitive(&'static str, PrimitiveOp),
    /// Slice or array on both sides.
    Sequence { src_elem: TypeRef, dst_elem: TypeRef },
    StructToStruct,
    StructToMap,
    MapToStruct,
    MapToMap {
        keys: (TypeRef, TypeRef),
        values: (TypeRef, TypeRef),
    },
    /// Pointer on both sides: pointee into pointee.
    PtrToPtr { src_elem: TypeRef, dst_elem: TypeRef },
    /// Dereference the source pointer.
    PtrToT { elem: TypeRef },
    /// Convert into the destination pointee.
    TToPtr { elem: TypeRef },
    DynToT,
    TToDyn,
}

macro_rules! primitive {
    ($name:literal, $op:path) => {
        Route::Primitive($name, $op)
    };
}

fn elem_primitive(ty: TypeRef) -> Option<PrimitiveKind> {
    match ty.type_kind() {
        TypeKind::Slice(s) => s.elem().primitive(),
        _ => None,
    }
}

fn key_kind(ty: TypeRef) -> Option<Kind> {
    ty.key_value().map(|(k, _)| k.kind())
}

/// Select the route for `src -> dst`.
// @audit-ok: Dispatch table (cyclo 40+, cogni low) - one arm per kind pair
pub(crate) fn route(src: TypeRef, dst: TypeRef) -> Route {
    use Kind::*;

    match (src.type_kind(), dst.type_kind()) {
        (TypeKind::Pointer(s), TypeKind::Pointer(d)) => {
            return Route::PtrToPtr {
                src_elem: s.elem(),
                dst_elem: d.elem(),
            }
        }
        (TypeKind::Pointer(p), _) => return Route::PtrToT { elem: p.elem() },
        (_, TypeKind::Pointer(p)) => return Route::TToPtr { elem: p.elem() },
        (TypeKind::Dynamic, _) => return Route::DynToT,
        (_, TypeKind::Dynamic) => return Route::TToDyn,
        _ => {}
    }

    let src_char = src.primitive() == Some(PrimitiveKind::Char);
    let dst_char = dst.primitive() == Some(PrimitiveKind::Char);

    match (src.kind(), dst.kind()) {
        (Uint, String) if src_char => primitive!("char->string", ops::text::char_to_string),
        (String, Uint) if dst_char => primitive!("string->char", ops::text::string_to_char),

        (Int | Uint, Int | Uint) => primitive!("int->int", ops::scalar::integer_to_integer),
        (Int | Uint, Float) => primitive!("int->float", ops::scalar::integer_to_float),
        (Int | Uint, String) => primitive!("int->string", ops::scalar::integer_to_string),
        (Int | Uint, Bool) => primitive!("int->bool", ops::scalar::integer_to_bool),

        (Float, Int | Uint) => primitive!("float->int", ops::scalar::float_to_integer),
        (Float, Float) => primitive!("float->float", ops::scalar::float_to_float),
        (Float, Bool) => primitive!("float->bool", ops::scalar::float_to_bool),

        (Complex, Complex) => primitive!("complex->complex", ops::scalar::complex_to_complex),

        (Bool, Int | Uint) => primitive!("bool->int", ops::scalar::bool_to_integer),
        (Bool, Float) => primitive!("bool->float", ops::scalar::bool_to_float),
        (Bool, String) => primitive!("bool->string", ops::scalar::bool_to_string),
        (Bool, Bool) => primitive!("bool->bool", ops::scalar::bool_to_bool),

        (String, Int | Uint) => primitive!("string->int", ops::text::string_to_integer),
        (String, Float) => primitive!("string->float", ops::text::string_to_float),
        (String, Bool) => primitive!("string->bool", ops::text::string_to_bool),
        (String, String) => primitive!("string->string", ops::text::string_to_string),
        (String, Slice) => match elem_primitive(dst) {
            Some(PrimitiveKind::U8) => primitive!("string->bytes", ops::text::string_to_bytes),
            Some(PrimitiveKind::Char) => primitive!("string->runes", ops::text::string_to_runes),
            _ => Route::Unsupported,
        },
        (Slice, String) => match elem_primitive(src) {
            Some(PrimitiveKind::U8) => primitive!("bytes->string", ops::text::bytes_to_string),
            Some(PrimitiveKind::Char) => primitive!("runes->string", ops::text::runes_to_string),
            _ => Route::Unsupported,
        },

        (Slice | Array, Slice | Array) => match (src.elem(), dst.elem()) {
            (Some(src_elem), Some(dst_elem)) => Route::Sequence { src_elem, dst_elem },
            _ => Route::Unsupported,
        },

        (Struct, Struct) => Route::StructToStruct,
        (Struct, Map) if key_kind(dst) == Some(String) => Route::StructToMap,
        (Map, Struct) if key_kind(src) == Some(String) => Route::MapToStruct,
        (Map, Map) => match (src.key_value(), dst.key_value()) {
            (Some((sk, sv)), Some((dk, dv))) => Route::MapToMap {
                keys: (sk, dk),
                values: (sv, dv),
            },
            _ => Route::Unsupported,
        },

        _ => Route::Unsupported,
    }
}

impl Route {
    /// Nested pairs that must themselves be convertible.
    ///
    /// Struct routes list none: unsupported fields are skipped (or rejected
    /// by `must`) at execution time.
    fn children(&self, src: TypeRef, dst: TypeRef) -> Vec<(TypeRef, TypeRef)> {
        match self {
            Route::Sequence { src_elem, dst_elem } => vec![(*src_elem, *dst_elem)],
            Route::MapToMap { keys, values } => vec![*keys, *values],
            Route::PtrToPtr { src_elem, dst_elem } => vec![(*src_elem, *dst_elem)],
            Route::PtrToT { elem } => vec![(*elem, dst)],
            Route::TToPtr { elem } => vec![(src, *elem)],
            _ => Vec::new(),
        }
    }

    pub(crate) fn is_supported(&self) -> bool {
        !matches!(self, Route::Unsupported)
    }
}

/// Whether `route` (selected for `src -> dst`) and every pair nested under
/// it have an operator. Pairs already on the walk count as supported so
/// recursive types terminate.
pub(crate) fn supported(route: &Route, src: TypeRef, dst: TypeRef) -> bool {
    let mut seen = HashSet::new();
    seen.insert((src.id(), dst.id()));
    route.is_supported()
        && route
            .children(src, dst)
            .into_iter()
            .all(|(s, d)| convertible(s, d, &mut seen))
}

fn convertible(src: TypeRef, dst: TypeRef, seen: &mut HashSet<(TypeId, TypeId)>) -> bool {
    if !seen.insert((src.id(), dst.id())) {
        return true;
    }
    let route = route(src, dst);
    route.is_supported()
        && route
            .children(src, dst)
            .into_iter()
            .all(|(s, d)| convertible(s, d, seen))
}
