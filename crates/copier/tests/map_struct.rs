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

//! Struct to map, map to struct and map to map conversions.

use copier::{Dynamic, Error, Reflect};
use std::collections::{BTreeMap, HashMap};

#[derive(Reflect, Debug, Default, PartialEq)]
struct Profile {
    #[copier("Name")]
    name: String,
    age: u8,
    #[copier("-")]
    secret: String,
    score: f32,
}

#[test]
fn test_struct_to_map_keys_are_effective_names() {
    let profile = Profile {
        name: "ada".into(),
        age: 36,
        secret: "x".into(),
        score: 9.5,
    };
    let mut map: HashMap<String, Dynamic> = HashMap::new();
    copier::copy(&mut map, &profile).expect("copy");

    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["Name", "age", "score"]);
    assert_eq!(map["Name"].downcast_ref::<String>(), Some(&"ada".to_string()));
    assert_eq!(map["age"].downcast_ref::<u8>(), Some(&36));
}

#[test]
fn test_struct_to_typed_map_skips_unconvertible_fields() {
    #[derive(Reflect, Default)]
    struct Mixed {
        a: i32,
        b: String,
        c: Vec<u8>,
    }
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    copier::copy(
        &mut map,
        &Mixed {
            a: 1,
            b: "two".into(),
            c: vec![3],
        },
    )
    .expect("copy");
    // Vec<u8> converts to String as bytes; every field is present.
    assert_eq!(map.get("a").map(String::as_str), Some("1"));
    assert_eq!(map.get("b").map(String::as_str), Some("two"));
    assert_eq!(map.get("c").map(String::as_str), Some("\u{3}"));

    let mut counts: BTreeMap<String, i64> = BTreeMap::new();
    copier::copy(
        &mut counts,
        &Mixed {
            a: 4,
            b: "5".into(),
            c: vec![],
        },
    )
    .expect("copy");
    assert_eq!(counts.len(), 2);
    assert_eq!(counts["a"], 4);
    assert_eq!(counts["b"], 5);
}

#[test]
fn test_map_to_struct_leaves_missing_fields() {
    let mut map: HashMap<String, Dynamic> = HashMap::new();
    map.insert("Name".into(), Dynamic::new("grace".to_string()));
    map.insert("age".into(), Dynamic::new(85i64));
    map.insert("unknown".into(), Dynamic::new(true));
    map.insert("secret".into(), Dynamic::new("leak".to_string()));

    let mut profile = Profile {
        score: 1.25,
        ..Profile::default()
    };
    copier::copy(&mut profile, &map).expect("copy");
    assert_eq!(profile.name, "grace");
    assert_eq!(profile.age, 85);
    assert!(profile.secret.is_empty());
    assert_eq!(profile.score, 1.25);
}

#[test]
fn test_dynamic_value_of_unsupported_type_is_skipped() {
    #[derive(Reflect, Default, Debug)]
    struct Person {
        name: String,
        age: i32,
    }

    let mut map: HashMap<String, Dynamic> = HashMap::new();
    map.insert("name".into(), Dynamic::new("x".to_string()));
    map.insert("age".into(), Dynamic::new(vec![true, false]));

    let mut dst = Person {
        age: 3,
        ..Person::default()
    };
    copier::copy(&mut dst, &map).expect("optional field skipped");
    assert_eq!(dst.name, "x");
    assert_eq!(dst.age, 3);

    #[derive(Reflect, Default)]
    struct Holder {
        age: Dynamic,
        name: String,
    }
    let holder = Holder {
        age: Dynamic::new(HashMap::from([("a".to_string(), 1i32)])),
        name: "y".into(),
    };
    let mut dst = Person {
        age: 5,
        ..Person::default()
    };
    copier::copy(&mut dst, &holder).expect("optional field skipped");
    assert_eq!(dst.name, "y");
    assert_eq!(dst.age, 5);
}

#[test]
fn test_dynamic_value_of_unsupported_type_on_required_fields() {
    #[derive(Reflect, Default)]
    struct Strict {
        #[copier("must")]
        age: i32,
    }
    #[derive(Reflect, Default)]
    struct Lenient {
        #[copier("must,nopanic")]
        age: i32,
    }

    let mut map: HashMap<String, Dynamic> = HashMap::new();
    map.insert("age".into(), Dynamic::new(vec![true]));

    let err = copier::copy(&mut Strict::default(), &map).expect_err("must escalates");
    assert!(matches!(err, Error::Field { field: "age", .. }));
    assert!(err.is_unsupported());

    let mut lenient = Lenient { age: 9 };
    copier::copy(&mut lenient, &map).expect("reset instead");
    assert_eq!(lenient.age, 0);
}

#[test]
fn test_map_to_struct_required_missing() {
    #[derive(Reflect, Default, Debug)]
    struct Strict {
        #[copier("must")]
        id: u32,
        label: String,
    }

    let mut map: HashMap<String, String> = HashMap::new();
    map.insert("label".into(), "x".into());
    let mut dst = Strict::default();
    let err = copier::copy(&mut dst, &map).expect_err("id missing");
    assert!(matches!(err, Error::RequiredFieldMissing { field: "id", .. }));
    assert_eq!(dst.label, "x");

    map.insert("id".into(), "17".into());
    copier::copy(&mut dst, &map).expect("copy");
    assert_eq!(dst.id, 17);
}

#[test]
fn test_struct_map_struct_round_trip() {
    let profile = Profile {
        name: "lin".into(),
        age: 20,
        secret: String::new(),
        score: -0.5,
    };
    let mut map: HashMap<String, Dynamic> = HashMap::new();
    let mut back = Profile::default();
    copier::copy(&mut map, &profile).expect("to map");
    copier::copy(&mut back, &map).expect("from map");
    assert_eq!(back, profile);
}

#[test]
fn test_map_to_map_merges_and_converts() {
    let mut src: HashMap<String, i32> = HashMap::new();
    src.insert("1".into(), 10);
    src.insert("2".into(), 20);

    let mut dst: BTreeMap<u8, String> = BTreeMap::new();
    dst.insert(9, "kept".into());
    copier::copy(&mut dst, &src).expect("copy");
    assert_eq!(dst.len(), 3);
    assert_eq!(dst[&1], "10");
    assert_eq!(dst[&2], "20");
    assert_eq!(dst[&9], "kept");
}

#[test]
fn test_map_key_error_is_reported() {
    let mut src: HashMap<String, i32> = HashMap::new();
    src.insert("not-a-number".into(), 1);

    let mut dst: HashMap<i32, i32> = HashMap::new();
    let err = copier::copy(&mut dst, &src).expect_err("bad key");
    match &err {
        Error::MapKey { source } => assert!(matches!(**source, Error::Parse { .. })),
        other => panic!("unexpected error: {other}"),
    }
    assert!(dst.is_empty());
}

#[test]
fn test_map_of_structs() {
    #[derive(Reflect, Default, Debug, PartialEq)]
    struct V1 {
        x: i32,
    }
    #[derive(Reflect, Default, Debug, PartialEq)]
    struct V2 {
        x: f64,
    }

    let mut src: BTreeMap<String, V1> = BTreeMap::new();
    src.insert("a".into(), V1 { x: 3 });
    let mut dst: HashMap<String, V2> = HashMap::new();
    copier::copy(&mut dst, &src).expect("copy");
    assert_eq!(dst["a"], V2 { x: 3.0 });
}
