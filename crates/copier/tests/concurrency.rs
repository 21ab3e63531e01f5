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

//! Concurrent first use of a fresh engine.

use copier::{Copier, Reflect};
use std::sync::{Arc, Barrier};
use std::thread;

#[derive(Reflect, Debug, Default, Clone, PartialEq)]
struct Order {
    id: u64,
    lines: Vec<Line>,
    note: Option<String>,
}

#[derive(Reflect, Debug, Default, Clone, PartialEq)]
struct Line {
    sku: String,
    qty: u16,
}

#[derive(Reflect, Debug, Default, PartialEq)]
struct OrderView {
    id: String,
    lines: Vec<LineView>,
    note: String,
}

#[derive(Reflect, Debug, Default, PartialEq)]
struct LineView {
    sku: String,
    qty: i64,
}

const THREADS: usize = 8;

#[test]
fn test_concurrent_copies_build_each_converter_once() {
    let copier = Arc::new(Copier::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let copier = Arc::clone(&copier);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let order = Order {
                    id: t as u64,
                    lines: vec![Line {
                        sku: format!("sku-{t}"),
                        qty: 2,
                    }],
                    note: Some("n".into()),
                };
                barrier.wait();
                for _ in 0..100 {
                    let mut view = OrderView::default();
                    copier.copy(&mut view, &order).expect("copy");
                    assert_eq!(view.id, t.to_string());
                    assert_eq!(view.lines[0].sku, format!("sku-{t}"));
                    assert_eq!(view.lines[0].qty, 2);
                    assert_eq!(view.note, "n");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let stats = copier.stats();
    assert_eq!(stats.converters.builds, stats.converters.entries as u64);
    assert_eq!(stats.structs.builds, 4);

    let before = stats.converters.builds;
    let mut view = OrderView::default();
    copier.copy(&mut view, &Order::default()).expect("copy");
    assert_eq!(copier.stats().converters.builds, before);
}

#[test]
fn test_independent_engines_have_independent_caches() {
    let a = Copier::new();
    let b = Copier::new();
    let mut out = 0i64;
    a.copy(&mut out, &1u8).expect("copy");
    assert_eq!(a.stats().converters.entries, 1);
    assert_eq!(b.stats().converters.entries, 0);
}

#[test]
fn test_global_engine_is_shared() {
    assert!(std::ptr::eq(Copier::global(), Copier::global()));
    let mut out = String::new();
    copier::copy(&mut out, &12u32).expect("copy");
    assert!(Copier::global().stats().converters.entries >= 1);
}
