// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! String operators: parsing, formatting, byte and character sequences.

use super::shape_mismatch;
use crate::convert::{ValueMut, ValueRef};
use crate::error::{Error, Result};
use crate::types::{Kind, Scalar};

fn text_of<'a>(src: &ValueRef<'a>) -> Result<&'a str> {
    match src.scalar()? {
        Scalar::Str(s) => Ok(s),
        _ => Err(shape_mismatch("string", src.ty())),
    }
}

/// Parse decimal text; the destination class picks signed or unsigned parsing.
pub(crate) fn string_to_integer(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    let text = text_of(&src)?;
    let scalar = if dst.ty().kind() == Kind::Uint {
        Scalar::Uint(
            text.parse::<u64>()
                .map_err(|e| Error::parse(text, dst.ty().name(), e))?,
        )
    } else {
        Scalar::Int(
            text.parse::<i64>()
                .map_err(|e| Error::parse(text, dst.ty().name(), e))?,
        )
    };
    dst.store(scalar)
}

pub(crate) fn string_to_float(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    let text = text_of(&src)?;
    let v = text
        .parse::<f64>()
        .map_err(|e| Error::parse(text, dst.ty().name(), e))?;
    dst.store(Scalar::Float(v))
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub(crate) fn string_to_bool(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    let text = text_of(&src)?;
    let v = match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
        "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
        _ => return Err(Error::parse(text, "bool", "invalid syntax")),
    };
    dst.store(Scalar::Bool(v))
}

pub(crate) fn string_to_string(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    dst.store(Scalar::Str(text_of(&src)?))
}

pub(crate) fn char_to_string(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    let c = src
        .value()
        .downcast_ref::<char>()
        .ok_or_else(|| shape_mismatch("char", src.ty()))?;
    dst.store(Scalar::Str(c.encode_utf8(&mut [0u8; 4])))
}

/// Exactly one character.
pub(crate) fn string_to_char(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    let text = text_of(&src)?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => dst.store(Scalar::Uint(u64::from(u32::from(c)))),
        _ => Err(Error::parse(text, "char", "expected exactly one character")),
    }
}

pub(crate) fn string_to_bytes(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    let text = text_of(&src)?;
    let ty = dst.ty();
    let bytes = dst
        .value_mut()
        .downcast_mut::<Vec<u8>>()
        .ok_or_else(|| shape_mismatch("Vec<u8>", ty))?;
    *bytes = text.as_bytes().to_vec();
    Ok(())
}

/// Invalid UTF-8 sequences become U+FFFD.
pub(crate) fn bytes_to_string(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    let bytes = src
        .value()
        .downcast_ref::<Vec<u8>>()
        .ok_or_else(|| shape_mismatch("Vec<u8>", src.ty()))?;
    dst.store(Scalar::Str(&String::from_utf8_lossy(bytes)))
}

pub(crate) fn string_to_runes(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    let text = text_of(&src)?;
    let ty = dst.ty();
    let runes = dst
        .value_mut()
        .downcast_mut::<Vec<char>>()
        .ok_or_else(|| shape_mismatch("Vec<char>", ty))?;
    *runes = text.chars().collect();
    Ok(())
}

pub(crate) fn runes_to_string(src: ValueRef<'_>, mut dst: ValueMut<'_>) -> Result<()> {
    let runes = src
        .value()
        .downcast_ref::<Vec<char>>()
        .ok_or_else(|| shape_mismatch("Vec<char>", src.ty()))?;
    let text: String = runes.iter().collect();
    dst.store(Scalar::Str(&text))
}
