// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Width-erased primitive values.
//!
//! Operators read a primitive as a [`Scalar`] of its class and write a
//! `Scalar` back into any width of the destination class; narrowing
//! truncates the way an `as` cast does.

use super::{Complex32, Complex64, PrimitiveKind};
use crate::error::{Error, Result};
use std::any::{type_name, Any};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Int(i64),
    Uint(u64),
    Float(f64),
    Complex(f64, f64),
    Bool(bool),
    Str(&'a str),
}

impl Scalar<'_> {
    fn label(&self) -> &'static str {
        match self {
            Scalar::Int(_) => "int",
            Scalar::Uint(_) => "uint",
            Scalar::Float(_) => "float",
            Scalar::Complex(..) => "complex",
            Scalar::Bool(_) => "bool",
            Scalar::Str(_) => "string",
        }
    }
}

fn slot<T: Any>(value: &mut dyn Any) -> Result<&mut T> {
    value.downcast_mut::<T>().ok_or(Error::TypeMismatch {
        expected: type_name::<T>(),
        found: "value of another type",
    })
}

fn mismatch<T>(scalar: Scalar<'_>) -> Error {
    Error::TypeMismatch {
        expected: type_name::<T>(),
        found: scalar.label(),
    }
}

macro_rules! load_as {
    ($value:expr, $t:ty) => {
        *$value.downcast_ref::<$t>()?
    };
}

macro_rules! store_int {
    ($value:expr, $scalar:expr, $t:ty) => {
        match $scalar {
            Scalar::Int(v) => *slot::<$t>($value)? = v as $t,
            Scalar::Uint(v) => *slot::<$t>($value)? = v as $t,
            other => return Err(mismatch::<$t>(other)),
        }
    };
}

impl PrimitiveKind {
    /// Read a primitive of this kind. `None` if `value` is not of this kind.
    pub(crate) fn load(self, value: &dyn Any) -> Option<Scalar<'_>> {
        let scalar = match self {
            Self::I8 => Scalar::Int(i64::from(load_as!(value, i8))),
            Self::I16 => Scalar::Int(i64::from(load_as!(value, i16))),
            Self::I32 => Scalar::Int(i64::from(load_as!(value, i32))),
            Self::I64 => Scalar::Int(load_as!(value, i64)),
            Self::Isize => Scalar::Int(load_as!(value, isize) as i64),
            Self::U8 => Scalar::Uint(u64::from(load_as!(value, u8))),
            Self::U16 => Scalar::Uint(u64::from(load_as!(value, u16))),
            Self::U32 => Scalar::Uint(u64::from(load_as!(value, u32))),
            Self::U64 => Scalar::Uint(load_as!(value, u64)),
            Self::Usize => Scalar::Uint(load_as!(value, usize) as u64),
            Self::Char => Scalar::Uint(u64::from(u32::from(load_as!(value, char)))),
            Self::F32 => Scalar::Float(f64::from(load_as!(value, f32))),
            Self::F64 => Scalar::Float(load_as!(value, f64)),
            Self::C32 => {
                let c = value.downcast_ref::<Complex32>()?;
                Scalar::Complex(f64::from(c.re), f64::from(c.im))
            }
            Self::C64 => {
                let c = value.downcast_ref::<Complex64>()?;
                Scalar::Complex(c.re, c.im)
            }
            Self::Bool => Scalar::Bool(load_as!(value, bool)),
            Self::String => Scalar::Str(value.downcast_ref::<String>()?.as_str()),
        };
        Some(scalar)
    }

    /// Value range of a fixed-width integer kind, as floats.
    pub(crate) fn integer_bounds(self) -> Option<(f64, f64)> {
        let bounds = match self {
            Self::I8 => (f64::from(i8::MIN), f64::from(i8::MAX)),
            Self::I16 => (f64::from(i16::MIN), f64::from(i16::MAX)),
            Self::I32 => (f64::from(i32::MIN), f64::from(i32::MAX)),
            Self::I64 => (i64::MIN as f64, i64::MAX as f64),
            Self::Isize => (isize::MIN as f64, isize::MAX as f64),
            Self::U8 => (0.0, f64::from(u8::MAX)),
            Self::U16 => (0.0, f64::from(u16::MAX)),
            Self::U32 => (0.0, f64::from(u32::MAX)),
            Self::U64 => (0.0, u64::MAX as f64),
            Self::Usize => (0.0, usize::MAX as f64),
            _ => return None,
        };
        Some(bounds)
    }

    /// Write `scalar` into a primitive of this kind.
    ///
    /// Integer classes accept both `Int` and `Uint` and truncate to width.
    pub(crate) fn store(self, value: &mut dyn Any, scalar: Scalar<'_>) -> Result<()> {
        match self {
            Self::I8 => store_int!(value, scalar, i8),
            Self::I16 => store_int!(value, scalar, i16),
            Self::I32 => store_int!(value, scalar, i32),
            Self::I64 => store_int!(value, scalar, i64),
            Self::Isize => store_int!(value, scalar, isize),
            Self::U8 => store_int!(value, scalar, u8),
            Self::U16 => store_int!(value, scalar, u16),
            Self::U32 => store_int!(value, scalar, u32),
            Self::U64 => store_int!(value, scalar, u64),
            Self::Usize => store_int!(value, scalar, usize),
            Self::Char => {
                let code = match scalar {
                    Scalar::Int(v) => u32::try_from(v).ok(),
                    Scalar::Uint(v) => u32::try_from(v).ok(),
                    other => return Err(mismatch::<char>(other)),
                };
                let Some(c) = code.and_then(char::from_u32) else {
                    let shown = match scalar {
                        Scalar::Int(v) => v.to_string(),
                        Scalar::Uint(v) => v.to_string(),
                        _ => String::new(),
                    };
                    return Err(Error::parse(&shown, "char", "not a Unicode scalar value"));
                };
                *slot::<char>(value)? = c;
            }
            Self::F32 => match scalar {
                Scalar::Float(v) => *slot::<f32>(value)? = v as f32,
                other => return Err(mismatch::<f32>(other)),
            },
            Self::F64 => match scalar {
                Scalar::Float(v) => *slot::<f64>(value)? = v,
                other => return Err(mismatch::<f64>(other)),
            },
            Self::C32 => match scalar {
                Scalar::Complex(re, im) => {
                    *slot::<Complex32>(value)? = Complex32::new(re as f32, im as f32);
                }
                other => return Err(mismatch::<Complex32>(other)),
            },
            Self::C64 => match scalar {
                Scalar::Complex(re, im) => *slot::<Complex64>(value)? = Complex64::new(re, im),
                other => return Err(mismatch::<Complex64>(other)),
            },
            Self::Bool => match scalar {
                Scalar::Bool(v) => *slot::<bool>(value)? = v,
                other => return Err(mismatch::<bool>(other)),
            },
            Self::String => match scalar {
                Scalar::Str(s) => *slot::<String>(value)? = s.to_owned(),
                other => return Err(mismatch::<String>(other)),
            },
        }
        Ok(())
    }
}
