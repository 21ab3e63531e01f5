// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::cast_possible_truncation)] // Test parameters
#![allow(clippy::cast_sign_loss)] // Test data conversions
#![allow(clippy::cast_possible_wrap)] // Test conversions
#![allow(clippy::float_cmp)] // Test assertions with constants
#![allow(clippy::unreadable_literal)] // Large test constants
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::items_after_statements)] // Test helpers
#![allow(clippy::too_many_lines)] // Example/test code
#![allow(clippy::similar_names)] // Test variable naming
#![allow(clippy::redundant_closure_for_method_calls)] // Test code clarity
#![allow(dead_code)] // Fixture fields exist to be copied, not read

//! Nil handling, pointer layers, shared pointers and dynamic values.

use copier::{Copier, Dynamic, Error, Options, Reflect};
use std::sync::Arc;

#[derive(Reflect, Debug, Default)]
struct Maybe {
    value: Option<i32>,
    boxed: Option<Box<String>>,
}

#[derive(Reflect, Debug, Default)]
struct MaybeWide {
    value: Option<i64>,
    boxed: Option<String>,
}

#[derive(Reflect, Debug, Default)]
struct Plain {
    value: i64,
    boxed: String,
}

#[test]
fn test_nil_source_resets_pointer_destination() {
    let mut dst = MaybeWide {
        value: Some(5),
        boxed: Some("old".into()),
    };
    copier::copy(&mut dst, &Maybe::default()).expect("copy");
    assert_eq!(dst.value, None);
    assert_eq!(dst.boxed, None);
}

#[test]
fn test_nil_source_zeroes_plain_destination() {
    let mut dst = Plain {
        value: 5,
        boxed: "old".into(),
    };
    copier::copy(&mut dst, &Maybe::default()).expect("copy");
    assert_eq!(dst.value, 0);
    assert!(dst.boxed.is_empty());
}

#[test]
fn test_values_flow_through_pointer_layers() {
    let src = Maybe {
        value: Some(-7),
        boxed: Some(Box::new("hi".into())),
    };
    let mut wide = MaybeWide::default();
    copier::copy(&mut wide, &src).expect("ptr -> ptr");
    assert_eq!(wide.value, Some(-7));
    assert_eq!(wide.boxed.as_deref(), Some("hi"));

    let mut plain = Plain::default();
    copier::copy(&mut plain, &src).expect("ptr -> value");
    assert_eq!(plain.value, -7);
    assert_eq!(plain.boxed, "hi");

    let mut again = Maybe::default();
    copier::copy(&mut again, &plain).expect("value -> ptr");
    assert_eq!(again.value, Some(-7));
    assert_eq!(again.boxed.as_deref().map(String::as_str), Some("hi"));
}

#[test]
fn test_top_level_pointers_are_followed() {
    let src: Box<Option<u16>> = Box::new(Some(9));
    let mut dst = String::new();
    copier::copy(&mut dst, &src).expect("copy");
    assert_eq!(dst, "9");

    let mut boxed = Box::new(0.0f64);
    copier::copy(&mut boxed, &Arc::new(3u8)).expect("copy");
    assert_eq!(*boxed, 3.0);
}

#[test]
fn test_invalid_arguments() {
    let mut none: Option<i32> = None;
    assert!(matches!(
        copier::copy(&mut none, &1i32),
        Err(Error::InvalidDestination)
    ));

    let nil: Option<Box<i32>> = None;
    let mut n = 4i32;
    assert!(matches!(copier::copy(&mut n, &nil), Err(Error::InvalidSource)));
    assert_eq!(n, 4);

    let copier = Copier::new();
    assert!(matches!(
        copier.convert(None, None, &Options::default()),
        Err(Error::InvalidDestination)
    ));
}

#[derive(Reflect, Debug, Default, Clone)]
struct Shared {
    data: Arc<Vec<i32>>,
    note: Option<Arc<String>>,
}

#[test]
fn test_shallow_copy_shares_arc() {
    let src = Shared {
        data: Arc::new(vec![1, 2, 3]),
        note: Some(Arc::new("n".into())),
    };
    let mut dst = Shared::default();
    copier::copy(&mut dst, &src).expect("copy");
    assert!(Arc::ptr_eq(&dst.data, &src.data));
    assert!(Arc::ptr_eq(
        dst.note.as_ref().expect("note"),
        src.note.as_ref().expect("note")
    ));
}

#[test]
fn test_deep_copy_never_shares_arc() {
    let src = Shared {
        data: Arc::new(vec![1, 2, 3]),
        note: Some(Arc::new("n".into())),
    };
    let mut dst = Shared::default();
    copier::deep_copy(&mut dst, &src).expect("copy");
    assert!(!Arc::ptr_eq(&dst.data, &src.data));
    assert_eq!(*dst.data, vec![1, 2, 3]);
    let note = dst.note.as_ref().expect("note");
    assert!(!Arc::ptr_eq(note, src.note.as_ref().expect("note")));
    assert_eq!(note.as_str(), "n");

    // A destination Arc held elsewhere is replaced, not mutated.
    let held = Arc::clone(&dst.data);
    let src = Shared {
        data: Arc::new(vec![4]),
        note: None,
    };
    copier::deep_copy(&mut dst, &src).expect("copy");
    assert_eq!(*held, vec![1, 2, 3]);
    assert_eq!(*dst.data, vec![4]);
    assert!(dst.note.is_none());
}

#[test]
fn test_arc_of_other_type_is_converted() {
    #[derive(Reflect, Default)]
    struct Narrow {
        data: Arc<Vec<u8>>,
    }
    let src = Shared {
        data: Arc::new(vec![300, 2]),
        note: None,
    };
    let mut dst = Narrow::default();
    copier::copy(&mut dst, &src).expect("copy");
    assert_eq!(*dst.data, vec![44, 2]);
}

#[test]
fn test_dynamic_unboxes_by_concrete_type() {
    let mut n = 0i32;
    copier::copy(&mut n, &Dynamic::new("42".to_string())).expect("copy");
    assert_eq!(n, 42);

    let mut s = String::from("old");
    copier::copy(&mut s, &Dynamic::default()).expect("empty dynamic");
    assert!(s.is_empty());
}

#[test]
fn test_dynamic_destination_holds_copy() {
    let mut d = Dynamic::default();
    copier::copy(&mut d, &vec![1u8, 2]).expect("copy");
    assert_eq!(d.downcast_ref::<Vec<u8>>(), Some(&vec![1, 2]));

    let mut other = Dynamic::new(0u8);
    copier::copy(&mut other, &d).expect("dynamic -> dynamic");
    assert_eq!(other.downcast_ref::<Vec<u8>>(), Some(&vec![1, 2]));
}

#[test]
fn test_dynamic_fields() {
    #[derive(Reflect, Default)]
    struct Loose {
        id: Dynamic,
        tags: Dynamic,
    }
    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Tight {
        id: u64,
        tags: Vec<String>,
    }

    let loose = Loose {
        id: Dynamic::new(7i8),
        tags: Dynamic::new(vec![1i32, 2]),
    };
    let mut tight = Tight::default();
    copier::copy(&mut tight, &loose).expect("unbox");
    assert_eq!(
        tight,
        Tight {
            id: 7,
            tags: vec!["1".into(), "2".into()]
        }
    );

    let mut back = Loose::default();
    copier::copy(&mut back, &tight).expect("box");
    assert_eq!(back.id.downcast_ref::<u64>(), Some(&7));
    assert!(back.tags.is::<Vec<String>>());
}
