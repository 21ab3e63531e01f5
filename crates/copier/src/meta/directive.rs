// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-field copy directives.
//!
//! Annotation text is a comma separated token list:
//!
//! | Token      | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `-`        | never read or written                                   |
//! | `must`     | conversion fails when the field cannot be filled        |
//! | `nopanic`  | with `must`: leave the zero value instead of failing    |
//! | `override` | recorded, no effect                                     |
//! | any other  | match the field under this name (first one wins)        |

use std::fmt;

/// How strictly a destination field must be filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Requirement {
    #[default]
    Optional,
    /// Missing, nil, unsupported or failing sources are errors.
    Required,
    /// Like `Required`, but failures reset the field to its zero value.
    RequiredNoFail,
}

/// Parsed field directive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Directive {
    skip: bool,
    requirement: Requirement,
    rename: Option<String>,
    override_marker: bool,
}

impl Directive {
    /// Copy the field as-is.
    #[must_use]
    pub fn copy() -> Self {
        Self::default()
    }

    /// Never read or write the field.
    #[must_use]
    pub fn skip() -> Self {
        Self {
            skip: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn required() -> Self {
        Self {
            requirement: Requirement::Required,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn required_no_fail() -> Self {
        Self {
            requirement: Requirement::RequiredNoFail,
            ..Self::default()
        }
    }

    /// Match the field under `name` instead of its declared name.
    #[must_use]
    pub fn rename(name: impl Into<String>) -> Self {
        Self::default().with_rename(name)
    }

    #[must_use]
    pub fn with_rename(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    /// Parse `#[copier("...")]` annotation text.
    pub fn parse(tag: &str) -> Self {
        let mut directive = Self::default();
        let mut must = false;
        let mut no_panic = false;
        for token in tag.split(',').map(str::trim) {
            match token {
                "" => {}
                "-" => directive.skip = true,
                "must" => must = true,
                "nopanic" => no_panic = true,
                "override" => directive.override_marker = true,
                name => {
                    if directive.rename.is_none() {
                        directive.rename = Some(name.to_owned());
                    }
                }
            }
        }
        directive.requirement = match (must, no_panic) {
            (true, true) => Requirement::RequiredNoFail,
            (true, false) => Requirement::Required,
            _ => Requirement::Optional,
        };
        directive
    }

    pub fn is_skip(&self) -> bool {
        self.skip
    }

    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    /// `Required` or `RequiredNoFail`.
    pub fn is_required(&self) -> bool {
        self.requirement != Requirement::Optional
    }

    pub fn renamed_to(&self) -> Option<&str> {
        self.rename.as_deref()
    }

    /// The reserved `override` token was present.
    pub fn has_override(&self) -> bool {
        self.override_marker
    }

    /// Name under which a field declared as `declared` is matched.
    pub fn match_name<'a>(&'a self, declared: &'a str) -> &'a str {
        self.rename.as_deref().unwrap_or(declared)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens: Vec<&str> = Vec::new();
        if self.skip {
            tokens.push("-");
        }
        if let Some(name) = &self.rename {
            tokens.push(name);
        }
        match self.requirement {
            Requirement::Optional => {}
            Requirement::Required => tokens.push("must"),
            Requirement::RequiredNoFail => tokens.extend(["must", "nopanic"]),
        }
        if self.override_marker {
            tokens.push("override");
        }
        f.write_str(&tokens.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_is_copy() {
        assert_eq!(Directive::parse(""), Directive::copy());
        assert!(!Directive::parse("").is_required());
    }

    #[test]
    fn test_parse_skip() {
        assert!(Directive::parse("-").is_skip());
    }

    #[test]
    fn test_parse_requirements() {
        assert_eq!(Directive::parse("must").requirement(), Requirement::Required);
        assert_eq!(
            Directive::parse("must,nopanic").requirement(),
            Requirement::RequiredNoFail
        );
        assert_eq!(
            Directive::parse("nopanic, must").requirement(),
            Requirement::RequiredNoFail
        );
        // nopanic alone does not make a field required
        assert_eq!(Directive::parse("nopanic").requirement(), Requirement::Optional);
    }

    #[test]
    fn test_parse_rename() {
        let d = Directive::parse("ID");
        assert_eq!(d.renamed_to(), Some("ID"));
        assert_eq!(d.match_name("target_id"), "ID");

        let d = Directive::parse("Name,must,Other");
        assert_eq!(d.renamed_to(), Some("Name"));
        assert!(d.is_required());
    }

    #[test]
    fn test_parse_override_is_recorded_only() {
        let d = Directive::parse("override");
        assert!(d.has_override());
        assert!(!d.is_skip());
        assert!(!d.is_required());
        assert_eq!(d.renamed_to(), None);
    }

    #[test]
    fn test_display_round_trip() {
        for tag in ["-", "must", "must,nopanic", "Name,must", "override"] {
            let d = Directive::parse(tag);
            assert_eq!(Directive::parse(&d.to_string()), d, "tag {tag:?}");
        }
    }
}
