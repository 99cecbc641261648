//! Attribute map variants.
//!
//! Each map wraps a standard container and only grows through
//! `set_attribute`, which converts the borrowed value and stores it under an
//! owned copy of the key. A later write to the same key silently replaces the
//! earlier one.
//!
//! | Map                     | Value                   | Iteration order |
//! |-------------------------|-------------------------|-----------------|
//! | [`StringAttributeMap`]  | `String`                | unspecified     |
//! | [`AttributeMap`]        | [`OwnedAttributeValue`] | unspecified     |
//! | [`OrderedAttributeMap`] | [`OwnedAttributeValue`] | by key bytes    |
//!
//! Only [`OrderedAttributeMap`] yields a fingerprint that is independent of
//! insertion order; see [`crate::hash`].

use std::collections::{btree_map, hash_map, BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::converter::{AttributeConverter, OwnedValueConverter, StringConverter};
use crate::iterable::KeyValueIterable;
use crate::value::{AttributeValue, OwnedAttributeValue};

/// Push every pair of `source` through `set`, in source order.
fn populate<S>(source: &S, mut set: impl FnMut(&str, &AttributeValue<'_>))
where
    S: KeyValueIterable + ?Sized,
{
    let mut pairs = 0usize;
    source.for_each_key_value(&mut |key, value| {
        set(key, &value);
        pairs += 1;
        true
    });
    trace!(pairs, advertised = source.size(), "populated attribute map from source");
}

// ---------------------------------------------------------------------------
// StringAttributeMap
// ---------------------------------------------------------------------------

/// Attribute map that flattens every value to text.
///
/// Values go through [`StringConverter`], so `[1, 2]` is stored as `"1 2 "`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringAttributeMap {
    attributes: HashMap<String, String>,
}

impl StringAttributeMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map holding a copy of every pair in `source`.
    pub fn from_iterable<S: KeyValueIterable + ?Sized>(source: &S) -> Self {
        let mut map = Self::new();
        populate(source, |key, value| map.set_attribute(key, value));
        map
    }

    /// Like [`Self::from_iterable`], but an absent source yields an empty map.
    pub fn from_optional<S: KeyValueIterable + ?Sized>(source: Option<&S>) -> Self {
        source.map(Self::from_iterable).unwrap_or_default()
    }

    /// Render `value` as text and store it under `key`, replacing any
    /// previous entry.
    pub fn set_attribute(&mut self, key: &str, value: &AttributeValue<'_>) {
        self.attributes
            .insert(key.to_owned(), StringConverter.convert(value));
    }

    /// The underlying container.
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, String> {
        self.attributes.iter()
    }

    pub fn keys(&self) -> hash_map::Keys<'_, String, String> {
        self.attributes.keys()
    }
}

impl<'a> IntoIterator for &'a StringAttributeMap {
    type Item = (&'a String, &'a String);
    type IntoIter = hash_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

impl<'v, K: AsRef<str>> Extend<(K, AttributeValue<'v>)> for StringAttributeMap {
    fn extend<T: IntoIterator<Item = (K, AttributeValue<'v>)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set_attribute(key.as_ref(), &value);
        }
    }
}

impl<'v, K: AsRef<str>> FromIterator<(K, AttributeValue<'v>)> for StringAttributeMap {
    fn from_iter<T: IntoIterator<Item = (K, AttributeValue<'v>)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

// ---------------------------------------------------------------------------
// AttributeMap
// ---------------------------------------------------------------------------

/// Unordered map of owned attribute values.
///
/// Iteration order is whatever the inner `HashMap` produces and may differ
/// between two maps holding the same entries, so its fingerprint is only
/// stable for a single map instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap {
    attributes: HashMap<String, OwnedAttributeValue>,
}

impl AttributeMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map holding an owned copy of every pair in `source`.
    pub fn from_iterable<S: KeyValueIterable + ?Sized>(source: &S) -> Self {
        let mut map = Self::new();
        populate(source, |key, value| map.set_attribute(key, value));
        map
    }

    /// Like [`Self::from_iterable`], but an absent source yields an empty map.
    pub fn from_optional<S: KeyValueIterable + ?Sized>(source: Option<&S>) -> Self {
        source.map(Self::from_iterable).unwrap_or_default()
    }

    /// Copy `value` and store it under `key`, replacing any previous entry.
    pub fn set_attribute(&mut self, key: &str, value: &AttributeValue<'_>) {
        self.attributes
            .insert(key.to_owned(), OwnedValueConverter.convert(value));
    }

    /// The underlying container.
    pub fn attributes(&self) -> &HashMap<String, OwnedAttributeValue> {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&OwnedAttributeValue> {
        self.attributes.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, OwnedAttributeValue> {
        self.attributes.iter()
    }

    pub fn keys(&self) -> hash_map::Keys<'_, String, OwnedAttributeValue> {
        self.attributes.keys()
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = (&'a String, &'a OwnedAttributeValue);
    type IntoIter = hash_map::Iter<'a, String, OwnedAttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

impl<'v, K: AsRef<str>> Extend<(K, AttributeValue<'v>)> for AttributeMap {
    fn extend<T: IntoIterator<Item = (K, AttributeValue<'v>)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set_attribute(key.as_ref(), &value);
        }
    }
}

impl<'v, K: AsRef<str>> FromIterator<(K, AttributeValue<'v>)> for AttributeMap {
    fn from_iter<T: IntoIterator<Item = (K, AttributeValue<'v>)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

// ---------------------------------------------------------------------------
// OrderedAttributeMap
// ---------------------------------------------------------------------------

/// Map of owned attribute values iterated in key order.
///
/// Two maps holding the same entries always iterate identically, whatever
/// order the entries were inserted in. Use this variant when the fingerprint
/// must be reproducible.
///
/// # Examples
///
/// ```
/// use telemetry_attributes::{AttributeValue, OrderedAttributeMap};
///
/// let map: OrderedAttributeMap = [
///     ("service", AttributeValue::Str("checkout")),
///     ("attempt", AttributeValue::Int(2)),
/// ]
/// .into_iter()
/// .collect();
///
/// let keys: Vec<&str> = map.keys().map(String::as_str).collect();
/// assert_eq!(keys, ["attempt", "service"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedAttributeMap {
    attributes: BTreeMap<String, OwnedAttributeValue>,
}

impl OrderedAttributeMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map holding an owned copy of every pair in `source`.
    pub fn from_iterable<S: KeyValueIterable + ?Sized>(source: &S) -> Self {
        let mut map = Self::new();
        populate(source, |key, value| map.set_attribute(key, value));
        map
    }

    /// Like [`Self::from_iterable`], but an absent source yields an empty map.
    pub fn from_optional<S: KeyValueIterable + ?Sized>(source: Option<&S>) -> Self {
        source.map(Self::from_iterable).unwrap_or_default()
    }

    /// Copy `value` and store it under `key`, replacing any previous entry.
    pub fn set_attribute(&mut self, key: &str, value: &AttributeValue<'_>) {
        self.attributes
            .insert(key.to_owned(), OwnedValueConverter.convert(value));
    }

    /// The underlying container.
    pub fn attributes(&self) -> &BTreeMap<String, OwnedAttributeValue> {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&OwnedAttributeValue> {
        self.attributes.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, OwnedAttributeValue> {
        self.attributes.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, String, OwnedAttributeValue> {
        self.attributes.keys()
    }
}

impl<'a> IntoIterator for &'a OrderedAttributeMap {
    type Item = (&'a String, &'a OwnedAttributeValue);
    type IntoIter = btree_map::Iter<'a, String, OwnedAttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

impl<'v, K: AsRef<str>> Extend<(K, AttributeValue<'v>)> for OrderedAttributeMap {
    fn extend<T: IntoIterator<Item = (K, AttributeValue<'v>)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set_attribute(key.as_ref(), &value);
        }
    }
}

impl<'v, K: AsRef<str>> FromIterator<(K, AttributeValue<'v>)> for OrderedAttributeMap {
    fn from_iter<T: IntoIterator<Item = (K, AttributeValue<'v>)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
