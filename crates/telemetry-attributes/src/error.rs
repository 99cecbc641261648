//! Error types for typed read-back of owned attribute values.

use crate::value::OwnedAttributeType;
use thiserror::Error;

/// Errors that can occur when reading an owned attribute value back as a
/// concrete Rust type.
///
/// Conversion, map insertion and hashing never fail; only the typed accessors
/// (`TryFrom<&OwnedAttributeValue>`) can.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// The value holds a different alternative than the one requested.
    #[error("attribute type mismatch: expected {expected:?}, found {found:?}")]
    TypeMismatch {
        expected: OwnedAttributeType,
        found: OwnedAttributeType,
    },
}

/// Convenience alias used throughout telemetry-attributes.
pub type Result<T> = std::result::Result<T, AttributeError>;
