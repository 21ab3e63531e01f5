// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # copier - runtime value conversion and deep copy
//!
//! Copies a value of one reflected type into a value of another, converting
//! field by field: numbers between widths and signedness, numbers and
//! booleans to and from text, slices and arrays element-wise, maps entry by
//! entry, structs by field name, structs to and from string-keyed maps,
//! through any number of `Option`/`Box`/`Arc` layers and through
//! [`Dynamic`] values.
//!
//! ## Quick Start
//!
//! ```rust
//! use copier::Reflect;
//!
//! #[derive(Reflect, Default)]
//! struct User {
//!     name: String,
//!     age: i32,
//!     #[copier("-")]
//!     password: String,
//! }
//!
//! #[derive(Reflect, Default)]
//! struct UserView {
//!     name: String,
//!     age: i64,
//!     password: String,
//! }
//!
//! let user = User { name: "ada".into(), age: 36, password: "hunter2".into() };
//! let mut view = UserView::default();
//! copier::copy(&mut view, &user)?;
//!
//! assert_eq!(view.name, "ada");
//! assert_eq!(view.age, 36);
//! assert!(view.password.is_empty());
//! # Ok::<(), copier::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +-------------------------------------------------------------+
//! |  copy / copy_with_options / deep_copy        (engine)       |
//! |  argument checks, pointer indirection, one converter run    |
//! +-------------------------------------------------------------+
//! |  Converter cache (src, dst) -> Converter     (convert)      |
//! |  dispatch by kind, lazy child links                         |
//! +------------------------------+------------------------------+
//! |  Operator library  (ops)     |  Struct metadata  (meta)     |
//! |  scalar, text, seq, maps,    |  flattened fields, offsets,  |
//! |  structs, indirect           |  parsed directives           |
//! +------------------------------+------------------------------+
//! |  Runtime type information (types) + RCU/once caches (cache) |
//! +-------------------------------------------------------------+
//! ```
//!
//! ## Field Annotations
//!
//! | Annotation                    | Effect                                      |
//! |-------------------------------|---------------------------------------------|
//! | `#[copier("-")]`              | field is never read or written              |
//! | `#[copier("must")]`           | copy fails if the field cannot be filled    |
//! | `#[copier("must,nopanic")]`   | as `must`, but the field is zeroed instead  |
//! | `#[copier("Name")]`           | match the field under `Name`                |
//! | `#[copier(flatten)]`          | promote the fields of an embedded struct    |
//!
//! Fields are accessed in place, so packed structs cannot derive `Reflect`:
//!
//! ```compile_fail
//! use copier::Reflect;
//!
//! #[derive(Reflect)]
//! #[repr(C, packed)]
//! struct Packed {
//!     a: u8,
//!     b: u64,
//! }
//! ```
//!
//! ```compile_fail
//! use copier::Reflect;
//!
//! #[derive(Reflect)]
//! #[repr(packed(2))]
//! struct Packed {
//!     a: u8,
//!     b: u32,
//! }
//! ```
//!
//! ## Sharing
//!
//! [`copy`] writes every converted value into destination storage, except
//! that an `Arc<T>` copied onto an `Arc<T>` shares the source allocation.
//! [`deep_copy`] never shares.

// Allow the derive macro to work inside this crate's tests
extern crate self as copier;

mod cache;
/// Tunables and cache sizing.
pub mod config;
mod convert;
mod engine;
mod error;
/// Struct metadata: flattened field lists and directives.
pub mod meta;
mod ops;
mod options;
/// Runtime type information.
pub mod types;

pub use cache::LookupStats;
pub use config::EngineConfig;
pub use convert::{Converter, ValueMut, ValueRef};
pub use engine::{Copier, CopierStats};
pub use error::{Error, Result};
pub use meta::{Directive, FieldInfo, Requirement, StructInfo};
pub use options::Options;
pub use types::{
    Complex, Complex32, Complex64, Dynamic, FieldDescriptor, Kind, PrimitiveKind, Reflect,
    TypeDescriptor, TypeKind, TypeRef,
};

// Derive macro (same name as the trait, distinct namespace)
pub use copier_codegen::Reflect;

/// Copy `src` into `dst` with the process-wide [`Copier`].
///
/// Only an `Arc<T>` copied onto an `Arc<T>` shares storage with `src`.
pub fn copy<D: Reflect, S: Reflect>(dst: &mut D, src: &S) -> Result<()> {
    Copier::global().copy(dst, src)
}

/// [`copy`] with per-call [`Options`].
pub fn copy_with_options<D: Reflect, S: Reflect>(
    dst: &mut D,
    src: &S,
    options: &Options,
) -> Result<()> {
    Copier::global().copy_with_options(dst, src, options)
}

/// [`copy`] without any shared storage between `dst` and `src`.
pub fn deep_copy<D: Reflect, S: Reflect>(dst: &mut D, src: &S) -> Result<()> {
    Copier::global().deep_copy(dst, src)
}
