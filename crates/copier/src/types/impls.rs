// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `Reflect` for standard library types.

use super::{
    intern, Complex32, Complex64, Dynamic, MapDescriptor, PointerDescriptor, PrimitiveKind,
    Reflect, SequenceDescriptor, TypeDescriptor, TypeKind, TypeRef,
};
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::Arc;

// ============================================================================
// Primitives
// ============================================================================

macro_rules! impl_primitive {
    ($($ty:ty => $kind:ident, $zero:expr;)*) => {
        $(
            // SAFETY: the descriptor is built for `Self`.
            unsafe impl Reflect for $ty {
                fn type_ref() -> TypeRef {
                    intern::<Self>(|| {
                        TypeDescriptor::new::<Self>(TypeKind::Primitive(PrimitiveKind::$kind))
                    })
                }

                fn zero() -> Self {
                    $zero
                }

                reflect_methods!();
            }
        )*
    };
}

impl_primitive! {
    i8 => I8, 0;
    i16 => I16, 0;
    i32 => I32, 0;
    i64 => I64, 0;
    isize => Isize, 0;
    u8 => U8, 0;
    u16 => U16, 0;
    u32 => U32, 0;
    u64 => U64, 0;
    usize => Usize, 0;
    char => Char, '\0';
    f32 => F32, 0.0;
    f64 => F64, 0.0;
    Complex32 => C32, Complex32::new(0.0, 0.0);
    Complex64 => C64, Complex64::new(0.0, 0.0);
    bool => Bool, false;
    String => String, String::new();
}

// ============================================================================
// Sequences
// ============================================================================

/// Contiguous element storage behind `Vec<T>` and `[T; N]`.
trait Sequence: Reflect + Sized {
    type Elem: Reflect;

    fn items(&self) -> &[Self::Elem];

    fn items_mut(&mut self) -> &mut [Self::Elem];
}

impl<T: Reflect> Sequence for Vec<T> {
    type Elem = T;

    fn items(&self) -> &[T] {
        self
    }

    fn items_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Reflect, const N: usize> Sequence for [T; N] {
    type Elem = T;

    fn items(&self) -> &[T] {
        self
    }

    fn items_mut(&mut self) -> &mut [T] {
        self
    }
}

fn seq_len<S: Sequence>(value: &dyn Any) -> usize {
    value.downcast_ref::<S>().map_or(0, |s| s.items().len())
}

fn seq_get<S: Sequence>(value: &dyn Any, index: usize) -> Option<&dyn Any> {
    let item = value.downcast_ref::<S>()?.items().get(index)?;
    Some(item as &dyn Any)
}

fn seq_get_mut<S: Sequence>(value: &mut dyn Any, index: usize) -> Option<&mut dyn Any> {
    let item = value.downcast_mut::<S>()?.items_mut().get_mut(index)?;
    Some(item as &mut dyn Any)
}

fn vec_rebuild<T: Reflect>(value: &mut dyn Any, len: usize) {
    if let Some(vec) = value.downcast_mut::<Vec<T>>() {
        let mut fresh = Vec::with_capacity(len);
        fresh.resize_with(len, T::zero);
        *vec = fresh;
    }
}

fn sequence<S: Sequence>(rebuild: Option<fn(&mut dyn Any, usize)>) -> SequenceDescriptor {
    SequenceDescriptor {
        elem: <S::Elem as Reflect>::type_ref,
        len: seq_len::<S>,
        get: seq_get::<S>,
        get_mut: seq_get_mut::<S>,
        rebuild,
    }
}

// SAFETY: the descriptor is built for `Self`.
unsafe impl<T: Reflect> Reflect for Vec<T> {
    fn type_ref() -> TypeRef {
        intern::<Self>(|| {
            TypeDescriptor::new::<Self>(TypeKind::Slice(sequence::<Self>(Some(vec_rebuild::<T>))))
        })
    }

    fn zero() -> Self {
        Vec::new()
    }

    reflect_methods!();
}

// SAFETY: the descriptor is built for `Self`.
unsafe impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn type_ref() -> TypeRef {
        intern::<Self>(|| TypeDescriptor::new::<Self>(TypeKind::Array(sequence::<Self>(None))))
    }

    fn zero() -> Self {
        std::array::from_fn(|_| T::zero())
    }

    reflect_methods!();
}

// ============================================================================
// Maps
// ============================================================================

trait Map: Reflect + Sized {
    type Key: Reflect;
    type Value: Reflect;

    fn pairs(&self) -> Vec<(&dyn Any, &dyn Any)>;

    fn put(&mut self, key: Self::Key, value: Self::Value);
}

impl<K: Reflect + Eq + Hash, V: Reflect> Map for HashMap<K, V> {
    type Key = K;
    type Value = V;

    fn pairs(&self) -> Vec<(&dyn Any, &dyn Any)> {
        self.iter()
            .map(|(k, v)| (k as &dyn Any, v as &dyn Any))
            .collect()
    }

    fn put(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

impl<K: Reflect + Ord, V: Reflect> Map for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn pairs(&self) -> Vec<(&dyn Any, &dyn Any)> {
        self.iter()
            .map(|(k, v)| (k as &dyn Any, v as &dyn Any))
            .collect()
    }

    fn put(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

fn map_entries<M: Map>(value: &dyn Any) -> Vec<(&dyn Any, &dyn Any)> {
    value.downcast_ref::<M>().map(M::pairs).unwrap_or_default()
}

fn map_insert<M: Map>(value: &mut dyn Any, key: Box<dyn Any>, item: Box<dyn Any>) -> bool {
    let Some(map) = value.downcast_mut::<M>() else {
        return false;
    };
    match (key.downcast::<M::Key>(), item.downcast::<M::Value>()) {
        (Ok(key), Ok(item)) => {
            map.put(*key, *item);
            true
        }
        _ => false,
    }
}

fn map<M: Map>() -> MapDescriptor {
    MapDescriptor {
        key: <M::Key as Reflect>::type_ref,
        value: <M::Value as Reflect>::type_ref,
        entries: map_entries::<M>,
        insert: map_insert::<M>,
    }
}

// SAFETY: the descriptor is built for `Self`.
unsafe impl<K: Reflect + Eq + Hash, V: Reflect> Reflect for HashMap<K, V> {
    fn type_ref() -> TypeRef {
        intern::<Self>(|| TypeDescriptor::new::<Self>(TypeKind::Map(map::<Self>())))
    }

    fn zero() -> Self {
        HashMap::new()
    }

    reflect_methods!();
}

// SAFETY: the descriptor is built for `Self`.
unsafe impl<K: Reflect + Ord, V: Reflect> Reflect for BTreeMap<K, V> {
    fn type_ref() -> TypeRef {
        intern::<Self>(|| TypeDescriptor::new::<Self>(TypeKind::Map(map::<Self>())))
    }

    fn zero() -> Self {
        BTreeMap::new()
    }

    reflect_methods!();
}

// ============================================================================
// Pointers
// ============================================================================

trait Pointer: Reflect + Sized {
    type Target: Reflect;
    const NULLABLE: bool;

    fn target(&self) -> Option<&Self::Target>;

    fn target_mut(&mut self) -> Option<&mut Self::Target>;

    fn install(&mut self, target: Box<Self::Target>);
}

impl<T: Reflect> Pointer for Option<T> {
    type Target = T;
    const NULLABLE: bool = true;

    fn target(&self) -> Option<&T> {
        self.as_ref()
    }

    fn target_mut(&mut self) -> Option<&mut T> {
        self.as_mut()
    }

    fn install(&mut self, target: Box<T>) {
        *self = Some(*target);
    }
}

impl<T: Reflect> Pointer for Box<T> {
    type Target = T;
    const NULLABLE: bool = false;

    fn target(&self) -> Option<&T> {
        Some(&**self)
    }

    fn target_mut(&mut self) -> Option<&mut T> {
        Some(&mut **self)
    }

    fn install(&mut self, target: Box<T>) {
        *self = target;
    }
}

impl<T: Reflect> Pointer for Arc<T> {
    type Target = T;
    const NULLABLE: bool = false;

    fn target(&self) -> Option<&T> {
        Some(&**self)
    }

    /// Only a uniquely owned pointee may be written through.
    fn target_mut(&mut self) -> Option<&mut T> {
        Arc::get_mut(self)
    }

    fn install(&mut self, target: Box<T>) {
        *self = Arc::from(target);
    }
}

fn ptr_get<P: Pointer>(value: &dyn Any) -> Option<&dyn Any> {
    let target = value.downcast_ref::<P>()?.target()?;
    Some(target as &dyn Any)
}

fn ptr_get_mut<P: Pointer>(value: &mut dyn Any) -> Option<&mut dyn Any> {
    let target = value.downcast_mut::<P>()?.target_mut()?;
    Some(target as &mut dyn Any)
}

fn ptr_install<P: Pointer>(value: &mut dyn Any, target: Box<dyn Any>) -> bool {
    match (value.downcast_mut::<P>(), target.downcast::<P::Target>()) {
        (Some(ptr), Ok(target)) => {
            ptr.install(target);
            true
        }
        _ => false,
    }
}

fn arc_share<T: Reflect>(src: &dyn Any, dst: &mut dyn Any) -> bool {
    match (src.downcast_ref::<Arc<T>>(), dst.downcast_mut::<Arc<T>>()) {
        (Some(src), Some(dst)) => {
            *dst = Arc::clone(src);
            true
        }
        _ => false,
    }
}

fn pointer<P: Pointer>(share: Option<fn(&dyn Any, &mut dyn Any) -> bool>) -> PointerDescriptor {
    PointerDescriptor {
        elem: <P::Target as Reflect>::type_ref,
        nullable: P::NULLABLE,
        get: ptr_get::<P>,
        get_mut: ptr_get_mut::<P>,
        install: ptr_install::<P>,
        share,
    }
}

// SAFETY: the descriptor is built for `Self`.
unsafe impl<T: Reflect> Reflect for Option<T> {
    fn type_ref() -> TypeRef {
        intern::<Self>(|| TypeDescriptor::new::<Self>(TypeKind::Pointer(pointer::<Self>(None))))
    }

    fn zero() -> Self {
        None
    }

    reflect_methods!();
}

// SAFETY: the descriptor is built for `Self`.
unsafe impl<T: Reflect> Reflect for Box<T> {
    fn type_ref() -> TypeRef {
        intern::<Self>(|| TypeDescriptor::new::<Self>(TypeKind::Pointer(pointer::<Self>(None))))
    }

    fn zero() -> Self {
        Box::new(T::zero())
    }

    reflect_methods!();
}

// SAFETY: the descriptor is built for `Self`.
unsafe impl<T: Reflect> Reflect for Arc<T> {
    fn type_ref() -> TypeRef {
        intern::<Self>(|| {
            TypeDescriptor::new::<Self>(TypeKind::Pointer(pointer::<Self>(Some(arc_share::<T>))))
        })
    }

    fn zero() -> Self {
        Arc::new(T::zero())
    }

    reflect_methods!();
}

// ============================================================================
// Dynamic
// ============================================================================

// SAFETY: the descriptor is built for `Self`.
unsafe impl Reflect for Dynamic {
    fn type_ref() -> TypeRef {
        intern::<Self>(|| TypeDescriptor::new::<Self>(TypeKind::Dynamic))
    }

    fn zero() -> Self {
        Dynamic::empty()
    }

    reflect_methods!();
}
