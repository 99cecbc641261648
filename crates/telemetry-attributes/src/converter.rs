//! Converters from borrowed attribute values.
//!
//! [`OwnedValueConverter`] produces the [`OwnedAttributeValue`] of matching
//! kind; [`StringConverter`] flattens any value into a single `String`. Both
//! match every [`AttributeValue`] alternative without a wildcard arm, so
//! adding an alternative fails to compile until both are extended.
//!
//! # Text rendering
//!
//! - booleans render as `true` / `false`
//! - integers render as base-10 digits
//! - doubles render in fixed-point with six fractional digits; non-finite
//!   values render as `inf`, `-inf`, `nan` and `-nan`
//! - sequences render each element followed by a single space, so `[1, 2]`
//!   becomes `"1 2 "`
//!
//! The sequence format, trailing space included, is relied upon by callers
//! that use the text map as a grouping key.

use std::fmt::Display;

use crate::value::{AttributeValue, OwnedAttributeValue};

/// Converts a borrowed attribute value into some owned representation.
pub trait AttributeConverter {
    type Output;

    fn convert(&self, value: &AttributeValue<'_>) -> Self::Output;
}

/// Produces an [`OwnedAttributeValue`] of the same logical kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnedValueConverter;

impl AttributeConverter for OwnedValueConverter {
    type Output = OwnedAttributeValue;

    fn convert(&self, value: &AttributeValue<'_>) -> OwnedAttributeValue {
        to_owned_value(value)
    }
}

/// Produces a text rendering of any attribute value.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringConverter;

impl AttributeConverter for StringConverter {
    type Output = String;

    fn convert(&self, value: &AttributeValue<'_>) -> String {
        to_text(value)
    }
}

/// Copy a borrowed value into an [`OwnedAttributeValue`].
///
/// Scalars are copied, text is cloned into a `String` (raw C strings are
/// decoded lossily) and slices are copied element by element, preserving
/// order and length.
///
/// # Examples
///
/// ```
/// use telemetry_attributes::{to_owned_value, AttributeValue, OwnedAttributeValue};
///
/// let tags = ["db", "cache"];
/// let owned = to_owned_value(&AttributeValue::StrSlice(&tags));
/// assert_eq!(
///     owned,
///     OwnedAttributeValue::StringArray(vec!["db".to_string(), "cache".to_string()])
/// );
/// ```
pub fn to_owned_value(value: &AttributeValue<'_>) -> OwnedAttributeValue {
    match *value {
        AttributeValue::Bool(v) => OwnedAttributeValue::Bool(v),
        AttributeValue::Int(v) => OwnedAttributeValue::Int(v),
        AttributeValue::UInt(v) => OwnedAttributeValue::UInt(v),
        AttributeValue::Int64(v) => OwnedAttributeValue::Int64(v),
        AttributeValue::UInt64(v) => OwnedAttributeValue::UInt64(v),
        AttributeValue::Double(v) => OwnedAttributeValue::Double(v),
        AttributeValue::Str(v) => OwnedAttributeValue::String(v.to_owned()),
        AttributeValue::CStr(v) => OwnedAttributeValue::String(v.to_string_lossy().into_owned()),
        AttributeValue::BoolSlice(v) => OwnedAttributeValue::BoolArray(v.to_vec()),
        AttributeValue::IntSlice(v) => OwnedAttributeValue::IntArray(v.to_vec()),
        AttributeValue::UIntSlice(v) => OwnedAttributeValue::UIntArray(v.to_vec()),
        AttributeValue::Int64Slice(v) => OwnedAttributeValue::Int64Array(v.to_vec()),
        AttributeValue::UInt64Slice(v) => OwnedAttributeValue::UInt64Array(v.to_vec()),
        AttributeValue::DoubleSlice(v) => OwnedAttributeValue::DoubleArray(v.to_vec()),
        AttributeValue::StrSlice(v) => {
            OwnedAttributeValue::StringArray(v.iter().map(|s| (*s).to_owned()).collect())
        }
        AttributeValue::ByteSlice(v) => OwnedAttributeValue::ByteArray(v.to_vec()),
    }
}

/// Render a borrowed value as text.
///
/// # Examples
///
/// ```
/// use telemetry_attributes::{to_text, AttributeValue};
///
/// assert_eq!(to_text(&AttributeValue::Bool(true)), "true");
/// assert_eq!(to_text(&AttributeValue::IntSlice(&[1, 2])), "1 2 ");
/// assert_eq!(to_text(&AttributeValue::Double(1.5)), "1.500000");
/// ```
pub fn to_text(value: &AttributeValue<'_>) -> String {
    match *value {
        AttributeValue::Bool(v) => render_bool(v).to_owned(),
        AttributeValue::Int(v) => v.to_string(),
        AttributeValue::UInt(v) => v.to_string(),
        AttributeValue::Int64(v) => v.to_string(),
        AttributeValue::UInt64(v) => v.to_string(),
        AttributeValue::Double(v) => render_double(v),
        AttributeValue::Str(v) => v.to_owned(),
        AttributeValue::CStr(v) => v.to_string_lossy().into_owned(),
        AttributeValue::BoolSlice(v) => join_spaced(v.iter().map(|b| render_bool(*b))),
        AttributeValue::IntSlice(v) => join_spaced(v),
        AttributeValue::UIntSlice(v) => join_spaced(v),
        AttributeValue::Int64Slice(v) => join_spaced(v),
        AttributeValue::UInt64Slice(v) => join_spaced(v),
        AttributeValue::DoubleSlice(v) => join_spaced(v.iter().map(|d| render_double(*d))),
        AttributeValue::StrSlice(v) => join_spaced(v),
        AttributeValue::ByteSlice(v) => join_spaced(v),
    }
}

/// Owned counterpart of [`to_text`], backing `Display for OwnedAttributeValue`.
pub(crate) fn render_owned(value: &OwnedAttributeValue) -> String {
    match value {
        OwnedAttributeValue::Bool(v) => render_bool(*v).to_owned(),
        OwnedAttributeValue::Int(v) => v.to_string(),
        OwnedAttributeValue::UInt(v) => v.to_string(),
        OwnedAttributeValue::Int64(v) => v.to_string(),
        OwnedAttributeValue::UInt64(v) => v.to_string(),
        OwnedAttributeValue::Double(v) => render_double(*v),
        OwnedAttributeValue::String(v) => v.clone(),
        OwnedAttributeValue::BoolArray(v) => join_spaced(v.iter().map(|b| render_bool(*b))),
        OwnedAttributeValue::IntArray(v) => join_spaced(v),
        OwnedAttributeValue::UIntArray(v) => join_spaced(v),
        OwnedAttributeValue::Int64Array(v) => join_spaced(v),
        OwnedAttributeValue::UInt64Array(v) => join_spaced(v),
        OwnedAttributeValue::DoubleArray(v) => join_spaced(v.iter().map(|d| render_double(*d))),
        OwnedAttributeValue::StringArray(v) => join_spaced(v),
        OwnedAttributeValue::ByteArray(v) => join_spaced(v),
    }
}

fn render_bool(v: bool) -> &'static str {
    if v {
        "true"
    } else {
        "false"
    }
}

fn render_double(v: f64) -> String {
    if v.is_nan() {
        let nan = if v.is_sign_negative() { "-nan" } else { "nan" };
        return nan.to_owned();
    }
    format!("{v:.6}")
}

/// Every element followed by one space, including the last.
fn join_spaced<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut out = String::new();
    for item in items {
        out.push_str(&item.to_string());
        out.push(' ');
    }
    out
}
