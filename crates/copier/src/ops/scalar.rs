// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Numeric and boolean operators.

use super::shape_mismatch;
use crate::convert::{ValueMut, ValueRef};
use crate::error::Result;
use crate::types::{Kind, PrimitiveKind, Scalar};

fn float_of(src: &ValueRef<'_>) -> Result<f64> {
    match src.scalar()? {
        Scalar::Float(v) => Ok(v),
        _ => Err(shape_mismatch("float", src.ty())),
    }
}

fn bool_of(src: &ValueRef<'_>) -> Result<bool> {
    match src.scalar()? {
        Scalar::Bool(v) => Ok(v),
        _ => Err(shape_mismatch("bool", src.ty())),
    }
}

/// Truncating reinterpret across signed and unsigned widths.
pub(crate) fn integer_to_integer(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    match src.scalar()? {
        s @ (Scalar::Int(_) | Scalar::Uint(_)) => dst.store(s),
        _ => Err(shape_mismatch("integer", src.ty())),
    }
}

pub(crate) fn integer_to_float(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    let v = match src.scalar()? {
        Scalar::Int(v) => v as f64,
        Scalar::Uint(v) => v as f64,
        _ => return Err(shape_mismatch("integer", src.ty())),
    };
    dst.store(Scalar::Float(v))
}

/// Decimal text.
pub(crate) fn integer_to_string(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    let text = match src.scalar()? {
        Scalar::Int(v) => v.to_string(),
        Scalar::Uint(v) => v.to_string(),
        _ => return Err(shape_mismatch("integer", src.ty())),
    };
    dst.store(Scalar::Str(text.as_str()))
}

pub(crate) fn integer_to_bool(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    let nonzero = match src.scalar()? {
        Scalar::Int(v) => v != 0,
        Scalar::Uint(v) => v != 0,
        _ => return Err(shape_mismatch("integer", src.ty())),
    };
    dst.store(Scalar::Bool(nonzero))
}

/// Truncate toward zero; out-of-range values saturate, NaN becomes 0.
pub(crate) fn float_to_integer(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    let mut v = float_of(&src)?.trunc();
    if let Some((lo, hi)) = dst.ty().primitive().and_then(PrimitiveKind::integer_bounds) {
        v = v.clamp(lo, hi);
    }
    let scalar = if dst.ty().kind() == Kind::Uint {
        Scalar::Uint(v as u64)
    } else {
        Scalar::Int(v as i64)
    };
    dst.store(scalar)
}

pub(crate) fn float_to_float(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    dst.store(Scalar::Float(float_of(&src)?))
}

pub(crate) fn float_to_bool(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    dst.store(Scalar::Bool(float_of(&src)? != 0.0))
}

/// Real and imaginary parts converted independently.
pub(crate) fn complex_to_complex(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    match src.scalar()? {
        s @ Scalar::Complex(..) => dst.store(s),
        _ => Err(shape_mismatch("complex", src.ty())),
    }
}

pub(crate) fn bool_to_integer(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    dst.store(Scalar::Int(i64::from(bool_of(&src)?)))
}

pub(crate) fn bool_to_float(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    dst.store(Scalar::Float(if bool_of(&src)? { 1.0 } else { 0.0 }))
}

pub(crate) fn bool_to_string(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    dst.store(Scalar::Str(if bool_of(&src)? { "true" } else { "false" }))
}

pub(crate) fn bool_to_bool(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    dst.store(Scalar::Bool(bool_of(&src)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Complex32, Complex64, Reflect};

    fn run<S: Reflect, D: Reflect>(
        op: crate::ops::PrimitiveOp,
        src: &S,
        dst: &mut D,
    ) -> crate::Result<()> {
        op(ValueRef::of(src), ValueMut::of(dst))
    }

    #[test]
    fn test_integer_truncating_reinterpret() {
        let mut d = 0u8;
        run(integer_to_integer, &-1i32, &mut d).expect("convert");
        assert_eq!(d, 255);

        let mut d = 0i16;
        run(integer_to_integer, &70000u32, &mut d).expect("convert");
        assert_eq!(d, 70000u32 as i16);
    }

    #[test]
    fn test_float_truncates_toward_zero() {
        let mut d = 0i32;
        run(float_to_integer, &3.9f64, &mut d).expect("convert");
        assert_eq!(d, 3);
        run(float_to_integer, &-3.9f64, &mut d).expect("convert");
        assert_eq!(d, -3);

        let mut u = 7u32;
        run(float_to_integer, &-3.9f32, &mut u).expect("convert");
        assert_eq!(u, 0);
    }

    #[test]
    fn test_float_saturates_to_destination_width() {
        let mut d = 0i32;
        run(float_to_integer, &1e10f64, &mut d).expect("convert");
        assert_eq!(d, i32::MAX);
        run(float_to_integer, &-1e10f64, &mut d).expect("convert");
        assert_eq!(d, i32::MIN);

        let mut u = 0u8;
        run(float_to_integer, &300.5f64, &mut u).expect("convert");
        assert_eq!(u, 255);
        run(float_to_integer, &f64::NAN, &mut u).expect("convert");
        assert_eq!(u, 0);
    }

    #[test]
    fn test_bool_conversions() {
        let mut i = 0i64;
        run(bool_to_integer, &true, &mut i).expect("convert");
        assert_eq!(i, 1);

        let mut s = String::new();
        run(bool_to_string, &false, &mut s).expect("convert");
        assert_eq!(s, "false");

        let mut b = false;
        run(integer_to_bool, &-2i8, &mut b).expect("convert");
        assert!(b);
        run(float_to_bool, &0.0f64, &mut b).expect("convert");
        assert!(!b);
    }

    #[test]
    fn test_integer_to_string_is_decimal() {
        let mut s = String::from("stale");
        run(integer_to_string, &-42i64, &mut s).expect("convert");
        assert_eq!(s, "-42");
        run(integer_to_string, &u64::MAX, &mut s).expect("convert");
        assert_eq!(s, "18446744073709551615");
    }

    #[test]
    fn test_complex_narrowing() {
        let mut c = Complex32::default();
        run(complex_to_complex, &Complex64::new(1.5, -2.25), &mut c).expect("convert");
        assert_eq!(c, Complex32::new(1.5, -2.25));
    }
}
