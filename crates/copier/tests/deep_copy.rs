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

//! Deep copies: isolation from the source and recursive types.

use copier::Reflect;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Reflect, Debug, Default, Clone, PartialEq)]
struct Node {
    value: i32,
    next: Option<Box<Node>>,
}

#[derive(Reflect, Debug, Default, PartialEq)]
struct WideNode {
    value: i64,
    next: Option<Box<WideNode>>,
}

fn list(values: &[i32]) -> Option<Box<Node>> {
    values.iter().rev().fold(None, |next, &value| {
        Some(Box::new(Node { value, next }))
    })
}

fn collect(mut node: Option<&WideNode>) -> Vec<i64> {
    let mut out = Vec::new();
    while let Some(n) = node {
        out.push(n.value);
        node = n.next.as_deref();
    }
    out
}

#[test]
fn test_recursive_list_converts() {
    let head = list(&[1, 2, 3, 4]).map(|b| *b).expect("head");
    let mut wide = WideNode::default();
    copier::copy(&mut wide, &head).expect("copy");
    assert_eq!(collect(Some(&wide)), vec![1, 2, 3, 4]);

    let mut back = Node::default();
    copier::copy(&mut back, &wide).expect("copy back");
    assert_eq!(back, head);
}

#[test]
fn test_shorter_source_truncates_list() {
    let mut wide = WideNode::default();
    copier::copy(&mut wide, &list(&[1, 2, 3]).map(|b| *b).expect("head")).expect("copy");
    copier::copy(&mut wide, &list(&[9]).map(|b| *b).expect("head")).expect("copy");
    assert_eq!(collect(Some(&wide)), vec![9]);
}

#[derive(Reflect, Debug, Default, Clone)]
struct Inventory {
    items: Vec<String>,
    counts: HashMap<String, u32>,
    owner: Option<Box<String>>,
    shared: Arc<Vec<u8>>,
}

#[test]
fn test_deep_copy_is_isolated_from_source() {
    let mut src = Inventory {
        items: vec!["a".into(), "b".into()],
        counts: HashMap::from([("a".to_string(), 1)]),
        owner: Some(Box::new("me".into())),
        shared: Arc::new(vec![1, 2]),
    };
    let mut dst = Inventory::default();
    copier::deep_copy(&mut dst, &src).expect("copy");

    src.items.push("c".into());
    src.counts.insert("b".into(), 2);
    **src.owner.as_mut().expect("owner") = "you".into();
    Arc::get_mut(&mut src.shared).expect("unique").push(3);

    assert_eq!(dst.items, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(dst.counts.len(), 1);
    assert_eq!(dst.counts["a"], 1);
    assert_eq!(dst.owner.as_deref().map(String::as_str), Some("me"));
    assert_eq!(*dst.shared, vec![1, 2]);
}

#[test]
fn test_nested_collections_deep_copy() {
    let src: Vec<HashMap<String, Vec<Option<i32>>>> = vec![
        HashMap::from([("x".to_string(), vec![Some(1), None])]),
        HashMap::new(),
    ];
    let mut dst: Vec<HashMap<String, Vec<Option<i64>>>> = Vec::new();
    copier::deep_copy(&mut dst, &src).expect("copy");
    assert_eq!(dst.len(), 2);
    assert_eq!(dst[0]["x"], vec![Some(1), None]);
    assert!(dst[1].is_empty());
}
