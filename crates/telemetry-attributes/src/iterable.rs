//! Enumerable key/value attribute sources.
//!
//! Instrumentation hands attributes over as a [`KeyValueIterable`]: a source
//! that pushes each `(key, value)` pair into a callback. Nothing is
//! materialized and the maps in this crate never keep a reference to the
//! source after construction.

use std::collections::BTreeMap;

use crate::value::AttributeValue;

/// A source of borrowed attribute pairs, traversed through a callback.
pub trait KeyValueIterable {
    /// Call `callback` for every pair, in the source's own order.
    ///
    /// Traversal stops as soon as the callback returns `false`. Returns
    /// `true` if every pair was visited, `false` if traversal was stopped.
    fn for_each_key_value(
        &self,
        callback: &mut dyn FnMut(&str, AttributeValue<'_>) -> bool,
    ) -> bool;

    /// Number of pairs the source advertises.
    fn size(&self) -> usize;
}

impl<K: AsRef<str>> KeyValueIterable for [(K, AttributeValue<'_>)] {
    fn for_each_key_value(
        &self,
        callback: &mut dyn FnMut(&str, AttributeValue<'_>) -> bool,
    ) -> bool {
        for (key, value) in self {
            if !callback(key.as_ref(), *value) {
                return false;
            }
        }
        true
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<K: AsRef<str>, const N: usize> KeyValueIterable for [(K, AttributeValue<'_>); N] {
    fn for_each_key_value(
        &self,
        callback: &mut dyn FnMut(&str, AttributeValue<'_>) -> bool,
    ) -> bool {
        self.as_slice().for_each_key_value(callback)
    }

    fn size(&self) -> usize {
        N
    }
}

impl<K: AsRef<str>> KeyValueIterable for Vec<(K, AttributeValue<'_>)> {
    fn for_each_key_value(
        &self,
        callback: &mut dyn FnMut(&str, AttributeValue<'_>) -> bool,
    ) -> bool {
        self.as_slice().for_each_key_value(callback)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<K: AsRef<str> + Ord> KeyValueIterable for BTreeMap<K, AttributeValue<'_>> {
    fn for_each_key_value(
        &self,
        callback: &mut dyn FnMut(&str, AttributeValue<'_>) -> bool,
    ) -> bool {
        for (key, value) in self {
            if !callback(key.as_ref(), *value) {
                return false;
            }
        }
        true
    }

    fn size(&self) -> usize {
        self.len()
    }
}
