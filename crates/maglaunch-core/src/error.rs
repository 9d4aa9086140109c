//! # Error Module
//!
//! Error taxonomy for parameter handling.
//!
//! Everything here is a caller error: the static declaration table is
//! validated once at construction, and supplied values are checked
//! against it before any command line is derived.

use crate::params::ParamType;
use thiserror::Error;

/// Errors raised while validating parameter declarations or
/// caller-supplied values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// Two declarations share the same name.
    #[error("duplicate parameter name: {0}")]
    DuplicateParam(String),

    /// A supplied value does not correspond to any declaration.
    #[error("unknown parameter: {0}")]
    UnknownParam(String),

    /// A supplied value has the wrong type for its declaration.
    #[error("parameter `{name}` expects a {expected} value")]
    TypeMismatch {
        /// The parameter name.
        name: String,
        /// The declared type.
        expected: ParamType,
    },

    /// A required parameter was not supplied.
    #[error("required parameter `{0}` was not supplied")]
    MissingRequired(String),
}
