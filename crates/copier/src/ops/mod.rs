// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Operator library.
//!
//! One function per (source kind, destination kind) pair. Operators write
//! only into destination memory. Compound operators fetch nested
//! converters through [`Link`](crate::convert::Link)s, which resolve
//! against the converter cache on first use.

pub(crate) mod indirect;
pub(crate) mod maps;
pub(crate) mod scalar;
pub(crate) mod seq;
pub(crate) mod structs;
pub(crate) mod text;

use crate::convert::{ValueMut, ValueRef};
use crate::error::{Error, Result};
use crate::types::TypeRef;

/// Operator over two primitives (no nested conversions).
pub(crate) type PrimitiveOp = fn(ValueRef<'_>, ValueMut<'_>) -> Result<()>;

/// The descriptor of `found` does not have the shape an operator expects.
pub(crate) fn shape_mismatch(expected: &'static str, found: TypeRef) -> Error {
    Error::TypeMismatch {
        expected,
        found: found.name(),
    }
}
