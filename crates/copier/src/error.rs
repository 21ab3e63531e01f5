// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type for conversion and copy operations.
//!
//! Propagation is not transactional: a failed copy leaves every field or
//! element written before the failure in place.

use std::fmt;

/// Errors returned by [`copy`](crate::copy) and friends.
#[derive(Debug)]
pub enum Error {
    // ========================================================================
    // Argument Errors
    // ========================================================================
    /// Destination is absent, or its pointer chain ends in a nil or shared pointer.
    InvalidDestination,
    /// Source is absent, or its pointer chain ends in a nil pointer.
    InvalidSource,

    // ========================================================================
    // Conversion Errors
    // ========================================================================
    /// No operator exists for this (source, destination) type pair.
    Unsupported {
        src: &'static str,
        dst: &'static str,
    },
    /// Converting a struct field failed.
    Field {
        owner: &'static str,
        field: &'static str,
        source: Box<Error>,
    },
    /// A `must` field has no counterpart (or only a nil one) on the source side.
    RequiredFieldMissing {
        owner: &'static str,
        field: &'static str,
    },
    /// Converting a slice or array element failed.
    Element { index: usize, source: Box<Error> },
    /// Converting a map key failed.
    MapKey { source: Box<Error> },
    /// Text could not be parsed into the target primitive.
    Parse {
        input: String,
        target: &'static str,
        reason: String,
    },
    /// A handle did not carry the value its descriptor announced.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl Error {
    pub(crate) fn field(owner: &'static str, field: &'static str, source: Error) -> Self {
        Error::Field {
            owner,
            field,
            source: Box::new(source),
        }
    }

    pub(crate) fn element(index: usize, source: Error) -> Self {
        Error::Element {
            index,
            source: Box::new(source),
        }
    }

    pub(crate) fn parse(input: &str, target: &'static str, reason: impl fmt::Display) -> Self {
        Error::Parse {
            input: input.to_owned(),
            target,
            reason: reason.to_string(),
        }
    }

    /// Innermost error once field, element and key context is peeled off.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Field { source, .. }
            | Error::Element { source, .. }
            | Error::MapKey { source } => source.root_cause(),
            other => other,
        }
    }

    /// True for [`Error::Unsupported`], possibly wrapped in field or element context.
    pub fn is_unsupported(&self) -> bool {
        matches!(self.root_cause(), Error::Unsupported { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDestination => write!(f, "Invalid copy destination"),
            Error::InvalidSource => write!(f, "Invalid copy source"),
            Error::Unsupported { src, dst } => {
                write!(f, "Unsupported conversion: {} -> {}", src, dst)
            }
            Error::Field {
                owner,
                field,
                source,
            } => write!(f, "Field {}.{}: {}", owner, field, source),
            Error::RequiredFieldMissing { owner, field } => {
                write!(f, "Required field {}.{} has no source value", owner, field)
            }
            Error::Element { index, source } => write!(f, "Element [{}]: {}", index, source),
            Error::MapKey { source } => write!(f, "Map key: {}", source),
            Error::Parse {
                input,
                target,
                reason,
            } => write!(f, "Cannot parse {:?} as {}: {}", input, target, reason),
            Error::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Field { source, .. }
            | Error::Element { source, .. }
            | Error::MapKey { source } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Convenient alias for results using the crate [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
