//! # telemetry-attributes
//!
//! Owned attribute storage and deterministic attribute fingerprints for a
//! telemetry SDK.
//!
//! Instrumentation records attributes as borrowed [`AttributeValue`]s that
//! may point into caller memory. This crate copies them into self-contained
//! maps and computes a 64-bit FNV-1a based fingerprint over a map, used as an
//! identity key when aggregating or deduplicating attribute sets.
//!
//! ## Quick start
//!
//! ```rust
//! use telemetry_attributes::{
//!     hash_attribute_map, hash_filtered_attributes, AttributeValue, OrderedAttributeMap,
//!     OwnedAttributeValue,
//! };
//!
//! let codes = [200, 404];
//! let recorded = [
//!     ("http.method", AttributeValue::Str("GET")),
//!     ("http.status_codes", AttributeValue::IntSlice(&codes)),
//!     ("net.peer.ip", AttributeValue::Str("10.0.0.7")),
//! ];
//!
//! let map = OrderedAttributeMap::from_iterable(&recorded);
//! assert_eq!(
//!     map.get("http.status_codes"),
//!     Some(&OwnedAttributeValue::IntArray(vec![200, 404]))
//! );
//!
//! // Fingerprint only the low-cardinality keys, straight from the source.
//! let fingerprint = hash_filtered_attributes(&recorded, |key| key.starts_with("http."));
//! let expected: OrderedAttributeMap = recorded[..2].iter().copied().collect();
//! assert_eq!(fingerprint, hash_attribute_map(&expected));
//! ```
//!
//! ## Modules
//!
//! - [`value`] — borrowed and owned attribute value enums
//! - [`iterable`] — `KeyValueIterable`, the enumerable attribute source
//! - [`converter`] — borrowed → owned and borrowed → text conversion
//! - [`map`] — `StringAttributeMap`, `AttributeMap`, `OrderedAttributeMap`
//! - [`hash`] — FNV-1a and the seed-mixing fingerprint
//! - [`error`] — Error type for typed read-back of owned values

pub mod converter;
pub mod error;
pub mod hash;
pub mod iterable;
pub mod map;
pub mod value;

pub use converter::{
    to_owned_value, to_text, AttributeConverter, OwnedValueConverter, StringConverter,
};
pub use error::AttributeError;
pub use hash::{hash_attribute_map, hash_filtered_attributes, HashableAttributes};
pub use iterable::KeyValueIterable;
pub use map::{AttributeMap, OrderedAttributeMap, StringAttributeMap};
pub use value::{AttributeValue, OwnedAttributeType, OwnedAttributeValue};
