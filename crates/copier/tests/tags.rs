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

//! Field annotations and per-call overrides.

use copier::{Directive, Error, Options, Reflect, Requirement};

#[derive(Reflect, Debug, Default)]
struct Partial {
    name: String,
    nickname: Option<String>,
}

#[derive(Reflect, Debug, Default)]
struct Strict {
    #[copier("must")]
    name: String,
    #[copier("must")]
    email: String,
}

#[derive(Reflect, Debug, Default)]
struct Lenient {
    name: String,
    #[copier("must,nopanic")]
    email: String,
    #[copier("must,nopanic")]
    nickname: String,
}

#[derive(Reflect, Debug, Default)]
struct Account {
    name: String,
    email: String,
    token: String,
}

#[test]
fn test_required_field_missing_fails() {
    let src = Partial {
        name: "ada".into(),
        nickname: None,
    };
    let mut dst = Strict::default();
    let err = copier::copy(&mut dst, &src).expect_err("email has no counterpart");
    match err {
        Error::RequiredFieldMissing { field, .. } => assert_eq!(field, "email"),
        other => panic!("unexpected error: {other}"),
    }
    // Fields before the failing one were already written.
    assert_eq!(dst.name, "ada");
}

#[test]
fn test_required_no_fail_zeroes_instead() {
    let src = Partial {
        name: "ada".into(),
        nickname: None,
    };
    let mut dst = Lenient {
        name: String::new(),
        email: "stale@example.com".into(),
        nickname: "stale".into(),
    };
    copier::copy(&mut dst, &src).expect("no error");
    assert_eq!(dst.name, "ada");
    assert!(dst.email.is_empty());
    assert!(dst.nickname.is_empty());

    let src = Partial {
        name: "ada".into(),
        nickname: Some("countess".into()),
    };
    copier::copy(&mut dst, &src).expect("no error");
    assert_eq!(dst.nickname, "countess");
}

#[test]
fn test_required_no_fail_swallows_conversion_errors() {
    #[derive(Reflect, Default)]
    struct Text {
        count: String,
    }
    #[derive(Reflect, Default)]
    struct Number {
        #[copier("must,nopanic")]
        count: i32,
    }

    let mut dst = Number { count: 12 };
    copier::copy(
        &mut dst,
        &Text {
            count: "twelve".into(),
        },
    )
    .expect("swallowed");
    assert_eq!(dst.count, 0);
}

#[test]
fn test_override_skips_field() {
    let src = Account {
        name: "ada".into(),
        email: "ada@example.com".into(),
        token: "secret".into(),
    };
    let opts = Options::new().field_directive::<Account>("token", Directive::skip());
    let mut dst = Account::default();
    copier::copy_with_options(&mut dst, &src, &opts).expect("copy");
    assert_eq!(dst.name, "ada");
    assert_eq!(dst.email, "ada@example.com");
    assert!(dst.token.is_empty());

    // Without options the annotation-free field copies normally.
    copier::copy(&mut dst, &src).expect("copy");
    assert_eq!(dst.token, "secret");
}

#[test]
fn test_override_renames_and_requires() {
    #[derive(Reflect, Default)]
    struct Login {
        user: String,
    }

    let src = Account {
        name: "ada".into(),
        ..Account::default()
    };
    let opts = Options::new().field_directive::<Login>("user", Directive::rename("name"));
    let mut dst = Login::default();
    copier::copy_with_options(&mut dst, &src, &opts).expect("copy");
    assert_eq!(dst.user, "ada");

    let opts = Options::new().field_directive::<Login>("user", Directive::required());
    let err = copier::copy_with_options(&mut Login::default(), &src, &opts)
        .expect_err("user missing on Account");
    assert!(matches!(err, Error::RequiredFieldMissing { field: "user", .. }));
}

#[test]
fn test_override_replaces_annotation() {
    let src = Partial::default();
    let opts = Options::new()
        .field_directive::<Strict>("email", Directive::copy())
        .field_directive::<Strict>(
            "name",
            Directive::copy().with_requirement(Requirement::RequiredNoFail),
        );
    let mut dst = Strict {
        name: "old".into(),
        email: "kept".into(),
    };
    copier::copy_with_options(&mut dst, &src, &opts).expect("relaxed");
    assert!(dst.name.is_empty());
    assert_eq!(dst.email, "kept");
}

#[test]
fn test_directive_parsing() {
    assert!(Directive::parse("-").is_skip());
    assert_eq!(Directive::parse("must").requirement(), Requirement::Required);
    assert_eq!(
        Directive::parse("must,nopanic").requirement(),
        Requirement::RequiredNoFail
    );
    assert_eq!(Directive::parse("Other").renamed_to(), Some("Other"));
    assert_eq!(Directive::parse("").requirement(), Requirement::Optional);
}
