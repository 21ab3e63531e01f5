// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors for runtime type information.
//!
//! A [`TypeDescriptor`] is built once per concrete type, interned in the
//! process-wide registry and handed out as a `&'static` reference
//! ([`TypeRef`]). Container descriptors refer to their element, key and
//! value types through `fn() -> TypeRef` so that recursive types resolve
//! lazily.

use super::Reflect;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Interned, process-lifetime type descriptor.
pub type TypeRef = &'static TypeDescriptor;

/// Coarse type category used by the dispatch table (widths collapsed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Int,
    Uint,
    Float,
    Complex,
    Bool,
    String,
    Slice,
    Array,
    Map,
    Struct,
    Pointer,
    Dynamic,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Complex => "complex",
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::Slice => "slice",
            Kind::Array => "array",
            Kind::Map => "map",
            Kind::Struct => "struct",
            Kind::Pointer => "pointer",
            Kind::Dynamic => "dynamic",
        };
        f.write_str(name)
    }
}

/// Primitive type kinds (exact width).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    Char,
    F32,
    F64,
    C32,
    C64,
    Bool,
    String,
}

impl PrimitiveKind {
    /// Dispatch class of this primitive.
    pub fn class(self) -> Kind {
        match self {
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::Isize => Kind::Int,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::Usize | Self::Char => Kind::Uint,
            Self::F32 | Self::F64 => Kind::Float,
            Self::C32 | Self::C64 => Kind::Complex,
            Self::Bool => Kind::Bool,
            Self::String => Kind::String,
        }
    }

    /// Rust spelling of the primitive.
    pub fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::Char => "char",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::C32 => "Complex32",
            Self::C64 => "Complex64",
            Self::Bool => "bool",
            Self::String => "String",
        }
    }
}

/// Element access for slices (`Vec<T>`) and arrays (`[T; N]`).
pub struct SequenceDescriptor {
    pub(crate) elem: fn() -> TypeRef,
    pub(crate) len: fn(&dyn Any) -> usize,
    pub(crate) get: fn(&dyn Any, usize) -> Option<&dyn Any>,
    pub(crate) get_mut: fn(&mut dyn Any, usize) -> Option<&mut dyn Any>,
    /// Replace the storage with `n` zero elements. `None` for fixed-size arrays.
    pub(crate) rebuild: Option<fn(&mut dyn Any, usize)>,
}

impl SequenceDescriptor {
    pub fn elem(&self) -> TypeRef {
        (self.elem)()
    }
}

/// Entry access for maps.
pub struct MapDescriptor {
    pub(crate) key: fn() -> TypeRef,
    pub(crate) value: fn() -> TypeRef,
    pub(crate) entries: fn(&dyn Any) -> Vec<(&dyn Any, &dyn Any)>,
    /// Insert an owned key and value; `false` if either box holds the wrong type.
    pub(crate) insert: fn(&mut dyn Any, Box<dyn Any>, Box<dyn Any>) -> bool,
}

impl MapDescriptor {
    pub fn key(&self) -> TypeRef {
        (self.key)()
    }

    pub fn value(&self) -> TypeRef {
        (self.value)()
    }
}

/// Access to the pointee of `Option<T>`, `Box<T>` and `Arc<T>`.
pub struct PointerDescriptor {
    pub(crate) elem: fn() -> TypeRef,
    pub(crate) nullable: bool,
    pub(crate) get: fn(&dyn Any) -> Option<&dyn Any>,
    /// `None` when nil or when the pointee is shared with another owner.
    pub(crate) get_mut: fn(&mut dyn Any) -> Option<&mut dyn Any>,
    /// Point at a freshly built pointee.
    pub(crate) install: fn(&mut dyn Any, Box<dyn Any>) -> bool,
    /// Alias the source allocation (shared pointers only).
    pub(crate) share: Option<fn(&dyn Any, &mut dyn Any) -> bool>,
}

impl PointerDescriptor {
    pub fn elem(&self) -> TypeRef {
        (self.elem)()
    }

    /// Whether the pointer has a nil state.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether several owners may point at the same allocation.
    pub fn is_shared(&self) -> bool {
        self.share.is_some()
    }
}

/// Declared fields of a struct, in declaration order.
pub struct StructDescriptor {
    pub(crate) fields: Vec<FieldDescriptor>,
}

impl StructDescriptor {
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

/// One declared struct field, as emitted by `#[derive(Reflect)]`.
pub struct FieldDescriptor {
    name: &'static str,
    tag: &'static str,
    offset: usize,
    ty: fn() -> TypeRef,
    embedded: bool,
}

impl FieldDescriptor {
    /// Field `name` of type `F` located `offset` bytes into its struct.
    #[must_use]
    pub fn new<F: Reflect>(name: &'static str, offset: usize) -> Self {
        Self {
            name,
            tag: "",
            offset,
            ty: <F as Reflect>::type_ref,
            embedded: false,
        }
    }

    /// Attach the raw `#[copier("...")]` annotation text.
    #[must_use]
    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }

    /// Mark the field as embedded (`#[copier(flatten)]`).
    #[must_use]
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn raw_tag(&self) -> &'static str {
        self.tag
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn ty(&self) -> TypeRef {
        (self.ty)()
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("offset", &self.offset)
            .field("embedded", &self.embedded)
            .finish_non_exhaustive()
    }
}

/// Shape-specific part of a descriptor.
pub enum TypeKind {
    Primitive(PrimitiveKind),
    Slice(SequenceDescriptor),
    Array(SequenceDescriptor),
    Map(MapDescriptor),
    Struct(StructDescriptor),
    Pointer(PointerDescriptor),
    Dynamic,
}

/// Runtime description of one concrete type.
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
    size: usize,
    kind: TypeKind,
    alloc: fn() -> Box<dyn Reflect>,
    reset: fn(&mut dyn Any),
    erase: fn(*const u8) -> *const dyn Any,
    erase_mut: fn(*mut u8) -> *mut dyn Any,
}

impl TypeDescriptor {
    /// Descriptor of `T` with the given shape.
    #[must_use]
    pub fn new<T: Reflect>(kind: TypeKind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            size: std::mem::size_of::<T>(),
            kind,
            alloc: alloc_zero::<T>,
            reset: reset_zero::<T>,
            erase: erase::<T>,
            erase_mut: erase_mut::<T>,
        }
    }

    /// Descriptor of the struct `T` with its declared fields.
    #[must_use]
    pub fn structure<T: Reflect>(fields: Vec<FieldDescriptor>) -> Self {
        Self::new::<T>(TypeKind::Struct(StructDescriptor { fields }))
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn type_kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Coarse category used by dispatch.
    pub fn kind(&self) -> Kind {
        match &self.kind {
            TypeKind::Primitive(p) => p.class(),
            TypeKind::Slice(_) => Kind::Slice,
            TypeKind::Array(_) => Kind::Array,
            TypeKind::Map(_) => Kind::Map,
            TypeKind::Struct(_) => Kind::Struct,
            TypeKind::Pointer(_) => Kind::Pointer,
            TypeKind::Dynamic => Kind::Dynamic,
        }
    }

    pub fn primitive(&self) -> Option<PrimitiveKind> {
        match &self.kind {
            TypeKind::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Element type of a slice, array or pointer.
    pub fn elem(&self) -> Option<TypeRef> {
        match &self.kind {
            TypeKind::Slice(s) | TypeKind::Array(s) => Some(s.elem()),
            TypeKind::Pointer(p) => Some(p.elem()),
            _ => None,
        }
    }

    /// Key and value types of a map.
    pub fn key_value(&self) -> Option<(TypeRef, TypeRef)> {
        match &self.kind {
            TypeKind::Map(m) => Some((m.key(), m.value())),
            _ => None,
        }
    }

    /// Declared fields of a struct (empty for other kinds).
    pub fn fields(&self) -> &[FieldDescriptor] {
        match &self.kind {
            TypeKind::Struct(s) => s.fields(),
            _ => &[],
        }
    }

    /// Allocate a zero value of this type.
    pub fn new_value(&self) -> Box<dyn Reflect> {
        (self.alloc)()
    }

    /// Overwrite `value` with the zero value of this type.
    pub(crate) fn reset(&self, value: &mut dyn Any) {
        (self.reset)(value);
    }

    /// Reinterpret a field address as this type.
    pub(crate) fn erase(&self, ptr: *const u8) -> *const dyn Any {
        (self.erase)(ptr)
    }

    pub(crate) fn erase_mut(&self, ptr: *mut u8) -> *mut dyn Any {
        (self.erase_mut)(ptr)
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn alloc_zero<T: Reflect>() -> Box<dyn Reflect> {
    Box::new(T::zero())
}

fn reset_zero<T: Reflect>(value: &mut dyn Any) {
    if let Some(value) = value.downcast_mut::<T>() {
        *value = T::zero();
    }
}

fn erase<T: Reflect>(ptr: *const u8) -> *const dyn Any {
    ptr.cast::<T>() as *const dyn Any
}

fn erase_mut<T: Reflect>(ptr: *mut u8) -> *mut dyn Any {
    ptr.cast::<T>() as *mut dyn Any
}
