//! Tests for the three attribute map variants and the enumerable source
//! they are populated from.

use std::collections::BTreeMap;

use telemetry_attributes::{
    AttributeMap, AttributeValue, KeyValueIterable, OrderedAttributeMap, OwnedAttributeValue,
    StringAttributeMap,
};

// ============================================================================
// Helpers
// ============================================================================

/// A typical set of attributes recorded on an HTTP server span.
fn http_attributes() -> Vec<(&'static str, AttributeValue<'static>)> {
    vec![
        ("http.method", AttributeValue::Str("POST")),
        ("http.status_code", AttributeValue::Int(201)),
        ("http.retry", AttributeValue::Bool(false)),
        ("http.ports", AttributeValue::IntSlice(&[80, 443])),
    ]
}

/// A source that counts how many pairs it handed out.
struct CountingSource<'a> {
    pairs: &'a [(&'a str, AttributeValue<'a>)],
    visited: std::cell::Cell<usize>,
}

impl KeyValueIterable for CountingSource<'_> {
    fn for_each_key_value(
        &self,
        callback: &mut dyn FnMut(&str, AttributeValue<'_>) -> bool,
    ) -> bool {
        for (key, value) in self.pairs {
            self.visited.set(self.visited.get() + 1);
            if !callback(key, *value) {
                return false;
            }
        }
        true
    }

    fn size(&self) -> usize {
        self.pairs.len()
    }
}

// ============================================================================
// 1. Construction
// ============================================================================

#[test]
fn new_maps_are_empty() {
    assert!(StringAttributeMap::new().is_empty());
    assert!(AttributeMap::new().is_empty());
    assert_eq!(OrderedAttributeMap::new().len(), 0);
}

#[test]
fn absent_source_yields_empty_maps() {
    let none: Option<&[(&str, AttributeValue<'_>)]> = None;
    assert_eq!(StringAttributeMap::from_optional(none).len(), 0);
    assert_eq!(AttributeMap::from_optional(none).len(), 0);
    assert_eq!(OrderedAttributeMap::from_optional(none).len(), 0);
}

#[test]
fn present_optional_source_is_copied() {
    let attrs = http_attributes();
    let map = AttributeMap::from_optional(Some(attrs.as_slice()));
    assert_eq!(map.len(), 4);
}

#[test]
fn from_iterable_copies_every_pair() {
    let attrs = http_attributes();
    let map = AttributeMap::from_iterable(&attrs);

    assert_eq!(map.len(), 4);
    assert_eq!(
        map.get("http.method"),
        Some(&OwnedAttributeValue::String("POST".into()))
    );
    assert_eq!(
        map.get("http.ports"),
        Some(&OwnedAttributeValue::IntArray(vec![80, 443]))
    );
}

#[test]
fn from_iterable_visits_whole_source_once() {
    let pairs = http_attributes();
    let source = CountingSource {
        pairs: &pairs,
        visited: std::cell::Cell::new(0),
    };
    let map = OrderedAttributeMap::from_iterable(&source);
    assert_eq!(source.visited.get(), 4);
    assert_eq!(map.len(), 4);
}

#[test]
fn map_outlives_borrowed_source() {
    let map = {
        let method = String::from("DELETE");
        let codes = vec![500u32, 503];
        let source = [
            ("http.method", AttributeValue::Str(&method)),
            ("http.codes", AttributeValue::UIntSlice(&codes)),
        ];
        OrderedAttributeMap::from_iterable(&source)
    };
    assert_eq!(
        map.get("http.method"),
        Some(&OwnedAttributeValue::String("DELETE".into()))
    );
    assert_eq!(
        map.get("http.codes"),
        Some(&OwnedAttributeValue::UIntArray(vec![500, 503]))
    );
}

#[test]
fn literal_pairs_collect_into_map() {
    let map: AttributeMap = [
        ("k1", AttributeValue::Int64(1)),
        ("k2", AttributeValue::Double(2.0)),
    ]
    .into_iter()
    .collect();
    assert_eq!(map.get("k1"), Some(&OwnedAttributeValue::Int64(1)));
    assert_eq!(map.get("k2"), Some(&OwnedAttributeValue::Double(2.0)));
}

#[test]
fn extend_applies_set_attribute_per_pair() {
    let mut map = OrderedAttributeMap::new();
    map.extend(vec![
        (String::from("a"), AttributeValue::Int(1)),
        (String::from("a"), AttributeValue::Int(2)),
    ]);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("a"), Some(&OwnedAttributeValue::Int(2)));
}

// ============================================================================
// 2. SetAttribute overwrite semantics
// ============================================================================

#[test]
fn set_attribute_twice_keeps_count_and_second_value() {
    let mut map = AttributeMap::new();
    map.set_attribute("region", &AttributeValue::Str("us-east-1"));
    map.set_attribute("region", &AttributeValue::Str("eu-west-1"));

    assert_eq!(map.len(), 1);
    assert_eq!(
        map.get("region"),
        Some(&OwnedAttributeValue::String("eu-west-1".into()))
    );
}

#[test]
fn overwrite_may_change_value_kind() {
    let mut map = OrderedAttributeMap::new();
    map.set_attribute("shard", &AttributeValue::Int(3));
    map.set_attribute("shard", &AttributeValue::StrSlice(&["3a", "3b"]));

    assert_eq!(map.len(), 1);
    assert_eq!(
        map.get("shard"),
        Some(&OwnedAttributeValue::StringArray(vec!["3a".into(), "3b".into()]))
    );
}

#[test]
fn duplicate_keys_in_source_keep_last() {
    let source = [
        ("env", AttributeValue::Str("staging")),
        ("env", AttributeValue::Str("prod")),
    ];
    let map = StringAttributeMap::from_iterable(&source);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("env"), Some("prod"));
}

// ============================================================================
// 3. Read access
// ============================================================================

#[test]
fn contains_key_and_get_agree() {
    let map = AttributeMap::from_iterable(&http_attributes());
    assert!(map.contains_key("http.retry"));
    assert!(!map.contains_key("http.route"));
    assert_eq!(map.get("http.route"), None);
}

#[test]
fn ordered_map_iterates_in_key_byte_order() {
    let mut map = OrderedAttributeMap::new();
    for key in ["zeta", "Alpha", "alpha", "beta", "_x"] {
        map.set_attribute(key, &AttributeValue::Bool(true));
    }
    let keys: Vec<&str> = map.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["Alpha", "_x", "alpha", "beta", "zeta"]);
}

#[test]
fn unordered_map_exposes_all_entries() {
    let map = AttributeMap::from_iterable(&http_attributes());
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    assert_eq!(
        keys,
        ["http.method", "http.ports", "http.retry", "http.status_code"]
    );
    assert_eq!((&map).into_iter().count(), map.attributes().len());
}

// ============================================================================
// 4. StringAttributeMap rendering
// ============================================================================

#[test]
fn string_map_stores_text_renderings() {
    let map = StringAttributeMap::from_iterable(&http_attributes());
    assert_eq!(map.get("http.method"), Some("POST"));
    assert_eq!(map.get("http.status_code"), Some("201"));
    assert_eq!(map.get("http.retry"), Some("false"));
    assert_eq!(map.get("http.ports"), Some("80 443 "));
}

#[test]
fn string_map_underlying_container_holds_strings() {
    let mut map = StringAttributeMap::new();
    map.set_attribute("ratio", &AttributeValue::Double(0.25));
    assert_eq!(
        map.attributes().get("ratio").map(String::as_str),
        Some("0.250000")
    );
}

// ============================================================================
// 5. Enumerable sources
// ============================================================================

#[test]
fn slice_source_stops_when_callback_returns_false() {
    let attrs = http_attributes();
    let mut seen = Vec::new();
    let completed = attrs.for_each_key_value(&mut |key, _| {
        seen.push(key.to_string());
        seen.len() < 2
    });
    assert!(!completed);
    assert_eq!(seen, ["http.method", "http.status_code"]);
}

#[test]
fn slice_source_reports_completion() {
    let attrs = http_attributes();
    assert!(attrs.for_each_key_value(&mut |_, _| true));
    assert_eq!(attrs.size(), 4);
}

#[test]
fn btree_source_enumerates_in_key_order() {
    let mut source = BTreeMap::new();
    source.insert("b", AttributeValue::Int(2));
    source.insert("a", AttributeValue::Int(1));

    let mut keys = Vec::new();
    source.for_each_key_value(&mut |key, _| {
        keys.push(key.to_string());
        true
    });
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(KeyValueIterable::size(&source), 2);
}

// ============================================================================
// 6. Serialization
// ============================================================================

#[test]
fn ordered_map_serializes_as_plain_object() {
    let map: OrderedAttributeMap = [
        ("b", AttributeValue::Bool(true)),
        ("a", AttributeValue::UInt(1)),
    ]
    .into_iter()
    .collect();
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"a":{"UInt":1},"b":{"Bool":true}}"#);
}

#[test]
fn string_map_roundtrips_through_json() {
    let map = StringAttributeMap::from_iterable(&http_attributes());
    let json = serde_json::to_string(&map).unwrap();
    let back: StringAttributeMap = serde_json::from_str(&json).unwrap();
    assert_eq!(back, map);
}
