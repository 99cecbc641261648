//! The attribute value model.
//!
//! Two closed enums describe every value an attribute can carry:
//!
//! - [`AttributeValue`] is the borrowed form handed over by instrumentation
//!   at recording time. It may point into memory owned by the caller and is
//!   only valid for the duration of that call.
//! - [`OwnedAttributeValue`] is the self-contained counterpart stored in the
//!   attribute maps. Every text and slice payload is copied.
//!
//! The unsigned 64-bit scalar, its sequence and the byte sequence are not
//! attribute types of the OpenTelemetry data model; they are kept as
//! reserved alternatives so instrumentation that already produces them is
//! not lossy.

use std::ffi::CStr;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AttributeError, Result};

/// A non-owning attribute value as supplied by instrumentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeValue<'a> {
    Bool(bool),
    Int(i32),
    UInt(u32),
    Int64(i64),
    UInt64(u64),
    Double(f64),
    /// A borrowed text view.
    Str(&'a str),
    /// Raw null-terminated text, e.g. received over an FFI boundary.
    CStr(&'a CStr),
    BoolSlice(&'a [bool]),
    IntSlice(&'a [i32]),
    UIntSlice(&'a [u32]),
    Int64Slice(&'a [i64]),
    UInt64Slice(&'a [u64]),
    DoubleSlice(&'a [f64]),
    StrSlice(&'a [&'a str]),
    ByteSlice(&'a [u8]),
}

impl From<bool> for AttributeValue<'_> {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for AttributeValue<'_> {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for AttributeValue<'_> {
    fn from(v: u32) -> Self {
        Self::UInt(v)
    }
}

impl From<i64> for AttributeValue<'_> {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<u64> for AttributeValue<'_> {
    fn from(v: u64) -> Self {
        Self::UInt64(v)
    }
}

impl From<f64> for AttributeValue<'_> {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl<'a> From<&'a str> for AttributeValue<'a> {
    fn from(v: &'a str) -> Self {
        Self::Str(v)
    }
}

impl<'a> From<&'a String> for AttributeValue<'a> {
    fn from(v: &'a String) -> Self {
        Self::Str(v.as_str())
    }
}

impl<'a> From<&'a CStr> for AttributeValue<'a> {
    fn from(v: &'a CStr) -> Self {
        Self::CStr(v)
    }
}

impl<'a> From<&'a [bool]> for AttributeValue<'a> {
    fn from(v: &'a [bool]) -> Self {
        Self::BoolSlice(v)
    }
}

impl<'a> From<&'a [i32]> for AttributeValue<'a> {
    fn from(v: &'a [i32]) -> Self {
        Self::IntSlice(v)
    }
}

impl<'a> From<&'a [u32]> for AttributeValue<'a> {
    fn from(v: &'a [u32]) -> Self {
        Self::UIntSlice(v)
    }
}

impl<'a> From<&'a [i64]> for AttributeValue<'a> {
    fn from(v: &'a [i64]) -> Self {
        Self::Int64Slice(v)
    }
}

impl<'a> From<&'a [u64]> for AttributeValue<'a> {
    fn from(v: &'a [u64]) -> Self {
        Self::UInt64Slice(v)
    }
}

impl<'a> From<&'a [f64]> for AttributeValue<'a> {
    fn from(v: &'a [f64]) -> Self {
        Self::DoubleSlice(v)
    }
}

impl<'a> From<&'a [&'a str]> for AttributeValue<'a> {
    fn from(v: &'a [&'a str]) -> Self {
        Self::StrSlice(v)
    }
}

impl<'a> From<&'a [u8]> for AttributeValue<'a> {
    fn from(v: &'a [u8]) -> Self {
        Self::ByteSlice(v)
    }
}

/// An attribute value that owns all of its data.
///
/// Variant order follows [`OwnedAttributeType`]; the reserved alternatives
/// come last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OwnedAttributeValue {
    Bool(bool),
    Int(i32),
    UInt(u32),
    Int64(i64),
    Double(f64),
    String(String),
    BoolArray(Vec<bool>),
    IntArray(Vec<i32>),
    UIntArray(Vec<u32>),
    Int64Array(Vec<i64>),
    DoubleArray(Vec<f64>),
    StringArray(Vec<String>),
    UInt64(u64),
    UInt64Array(Vec<u64>),
    ByteArray(Vec<u8>),
}

/// Discriminant of [`OwnedAttributeValue`], one variant per alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnedAttributeType {
    Bool,
    Int,
    UInt,
    Int64,
    Double,
    String,
    BoolArray,
    IntArray,
    UIntArray,
    Int64Array,
    DoubleArray,
    StringArray,
    UInt64,
    UInt64Array,
    ByteArray,
}

impl OwnedAttributeValue {
    /// Returns which alternative this value holds.
    pub const fn kind(&self) -> OwnedAttributeType {
        match self {
            Self::Bool(_) => OwnedAttributeType::Bool,
            Self::Int(_) => OwnedAttributeType::Int,
            Self::UInt(_) => OwnedAttributeType::UInt,
            Self::Int64(_) => OwnedAttributeType::Int64,
            Self::Double(_) => OwnedAttributeType::Double,
            Self::String(_) => OwnedAttributeType::String,
            Self::BoolArray(_) => OwnedAttributeType::BoolArray,
            Self::IntArray(_) => OwnedAttributeType::IntArray,
            Self::UIntArray(_) => OwnedAttributeType::UIntArray,
            Self::Int64Array(_) => OwnedAttributeType::Int64Array,
            Self::DoubleArray(_) => OwnedAttributeType::DoubleArray,
            Self::StringArray(_) => OwnedAttributeType::StringArray,
            Self::UInt64(_) => OwnedAttributeType::UInt64,
            Self::UInt64Array(_) => OwnedAttributeType::UInt64Array,
            Self::ByteArray(_) => OwnedAttributeType::ByteArray,
        }
    }

    /// Whether this value is one of the sequence alternatives.
    pub const fn is_array(&self) -> bool {
        matches!(
            self.kind(),
            OwnedAttributeType::BoolArray
                | OwnedAttributeType::IntArray
                | OwnedAttributeType::UIntArray
                | OwnedAttributeType::Int64Array
                | OwnedAttributeType::DoubleArray
                | OwnedAttributeType::StringArray
                | OwnedAttributeType::UInt64Array
                | OwnedAttributeType::ByteArray
        )
    }
}

/// Renders the value with the same rules as [`crate::StringConverter`].
impl fmt::Display for OwnedAttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::converter::render_owned(self))
    }
}

impl From<AttributeValue<'_>> for OwnedAttributeValue {
    fn from(value: AttributeValue<'_>) -> Self {
        crate::converter::to_owned_value(&value)
    }
}

// Typed read-back of scalars.
macro_rules! impl_try_from_owned {
    ($($variant:ident => $target:ty;)*) => {
        $(
            impl<'a> TryFrom<&'a OwnedAttributeValue> for $target {
                type Error = AttributeError;

                fn try_from(value: &'a OwnedAttributeValue) -> Result<Self> {
                    match value {
                        OwnedAttributeValue::$variant(v) => Ok(*v),
                        other => Err(AttributeError::TypeMismatch {
                            expected: OwnedAttributeType::$variant,
                            found: other.kind(),
                        }),
                    }
                }
            }
        )*
    };
}

impl_try_from_owned! {
    Bool => bool;
    Int => i32;
    UInt => u32;
    Int64 => i64;
    UInt64 => u64;
    Double => f64;
}

// Text and sequences are read back as borrows of the stored value.
macro_rules! impl_try_from_owned_ref {
    ($($variant:ident => $target:ty, $method:ident;)*) => {
        $(
            impl<'a> TryFrom<&'a OwnedAttributeValue> for &'a $target {
                type Error = AttributeError;

                fn try_from(value: &'a OwnedAttributeValue) -> Result<Self> {
                    match value {
                        OwnedAttributeValue::$variant(v) => Ok(v.$method()),
                        other => Err(AttributeError::TypeMismatch {
                            expected: OwnedAttributeType::$variant,
                            found: other.kind(),
                        }),
                    }
                }
            }
        )*
    };
}

impl_try_from_owned_ref! {
    String => str, as_str;
    BoolArray => [bool], as_slice;
    IntArray => [i32], as_slice;
    UIntArray => [u32], as_slice;
    Int64Array => [i64], as_slice;
    DoubleArray => [f64], as_slice;
    StringArray => [String], as_slice;
    UInt64Array => [u64], as_slice;
    ByteArray => [u8], as_slice;
}
