//! Deterministic attribute fingerprints.
//!
//! Every argument (a key, a scalar value or one sequence element) is hashed
//! with 64-bit FNV-1a and folded into a running seed:
//!
//! ```text
//! seed ^= h + 0x9e3779b9 + (seed << 6) + (seed >> 2)      (wrapping u64)
//! ```
//!
//! The fold is order-sensitive. A map fingerprint is therefore only
//! reproducible across maps when entries are visited in a fixed order, which
//! [`OrderedAttributeMap`] guarantees and the hash-map backed variants do not.
//!
//! # Text fallback
//!
//! Arguments without a natural byte form are rendered as text and the text is
//! hashed: integers as decimal digits, `bool` as `1` / `0`, `f64` in the
//! C stream default form (`%g`: six significant digits, trailing zeros
//! dropped, `e+NN` / `e-NN` exponent outside `1e-4 ..< 1e6`). Values of
//! different kinds that render identically collide (`Int(1)`, `UInt(1)` and
//! `Bool(true)` all hash as `"1"`), and doubles agreeing in their first six
//! significant digits collide too (`0.1 + 0.2` hashes as `"0.3"`). Bytes of a
//! byte sequence are hashed as the raw byte.
//!
//! The float rendering is part of the fingerprint and must stay as it is:
//! fingerprints computed elsewhere with the same rules have to keep matching.

use std::fmt::{self, Write as _};

use tracing::trace;

use crate::converter::{AttributeConverter, OwnedValueConverter};
use crate::iterable::KeyValueIterable;
use crate::map::{AttributeMap, OrderedAttributeMap, StringAttributeMap};
use crate::value::OwnedAttributeValue;

/// FNV-1a 64-bit offset basis.
pub const FNV_OFFSET_BASIS: u64 = 14_695_981_039_346_656_037;

/// FNV-1a 64-bit prime.
pub const FNV_64_PRIME: u64 = 1_099_511_628_211;

const SEED_INCREMENT: u64 = 0x9e37_79b9;

/// 64-bit FNV-1a over `bytes`.
///
/// ```
/// use telemetry_attributes::hash::{fnv1a_hash, FNV_OFFSET_BASIS};
///
/// assert_eq!(fnv1a_hash(b""), FNV_OFFSET_BASIS);
/// assert_eq!(fnv1a_hash(b"a"), 0xaf63_dc4c_8601_ec8c);
/// ```
pub fn fnv1a_hash(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_64_PRIME);
    }
    hash
}

/// Streams rendered text straight into an FNV-1a accumulator.
struct Fnv1aWriter(u64);

impl fmt::Write for Fnv1aWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            self.0 ^= u64::from(byte);
            self.0 = self.0.wrapping_mul(FNV_64_PRIME);
        }
        Ok(())
    }
}

/// FNV-1a over the `Display` rendering of `value`.
fn fnv1a_display<T: fmt::Display + ?Sized>(value: &T) -> u64 {
    let mut writer = Fnv1aWriter(FNV_OFFSET_BASIS);
    // Fnv1aWriter never fails and std Display impls only forward its errors.
    let _ = write!(writer, "{value}");
    writer.0
}

/// A single hash argument.
pub trait Fnv1a {
    fn fnv1a(&self) -> u64;
}

impl Fnv1a for str {
    fn fnv1a(&self) -> u64 {
        fnv1a_hash(self.as_bytes())
    }
}

impl Fnv1a for String {
    fn fnv1a(&self) -> u64 {
        fnv1a_hash(self.as_bytes())
    }
}

impl Fnv1a for bool {
    fn fnv1a(&self) -> u64 {
        fnv1a_hash(if *self { b"1" } else { b"0" })
    }
}

impl Fnv1a for u8 {
    fn fnv1a(&self) -> u64 {
        fnv1a_hash(&[*self])
    }
}

impl Fnv1a for i32 {
    fn fnv1a(&self) -> u64 {
        fnv1a_display(self)
    }
}

impl Fnv1a for u32 {
    fn fnv1a(&self) -> u64 {
        fnv1a_display(self)
    }
}

impl Fnv1a for i64 {
    fn fnv1a(&self) -> u64 {
        fnv1a_display(self)
    }
}

impl Fnv1a for u64 {
    fn fnv1a(&self) -> u64 {
        fnv1a_display(self)
    }
}

impl Fnv1a for f64 {
    fn fnv1a(&self) -> u64 {
        fnv1a_display(&GeneralFloat(*self))
    }
}

/// `%g` rendering with six significant digits.
///
/// `1.5` → `1.5`, `1.0 / 3.0` → `0.333333`, `1e21` → `1e+21`,
/// `1e-5` → `1e-05`, `-0.0` → `-0`, NaN → `nan`.
struct GeneralFloat(f64);

impl GeneralFloat {
    const PRECISION: i32 = 6;
}

impl fmt::Display for GeneralFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            return f.write_str(if v.is_sign_negative() { "-nan" } else { "nan" });
        }
        if v.is_infinite() {
            return f.write_str(if v < 0.0 { "-inf" } else { "inf" });
        }

        // The exponent is taken after rounding to the target precision.
        let scientific = format!("{:.*e}", (Self::PRECISION - 1) as usize, v);
        let Some((mantissa, exponent)) = scientific
            .split_once('e')
            .and_then(|(m, e)| Some((m, e.parse::<i32>().ok()?)))
        else {
            return f.write_str(&scientific);
        };

        if exponent < -4 || exponent >= Self::PRECISION {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(
                f,
                "{}e{sign}{:02}",
                trim_fraction(mantissa),
                exponent.unsigned_abs()
            )
        } else {
            let decimals = (Self::PRECISION - 1 - exponent) as usize;
            f.write_str(trim_fraction(&format!("{v:.decimals$}")))
        }
    }
}

/// Drop trailing zeros of a fraction, and the point if nothing is left.
fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

/// Fingerprint of a single argument.
pub fn hash_value<T: Fnv1a + ?Sized>(arg: &T) -> u64 {
    arg.fnv1a()
}

/// Fold the hash of `arg` into `seed`.
///
/// ```
/// use telemetry_attributes::hash::{fnv1a_hash, hash_combine};
///
/// let mut seed = 0;
/// hash_combine(&mut seed, "http.method");
/// assert_eq!(seed, fnv1a_hash(b"http.method").wrapping_add(0x9e37_79b9));
/// ```
pub fn hash_combine<T: Fnv1a + ?Sized>(seed: &mut u64, arg: &T) {
    mix(seed, arg.fnv1a());
}

fn mix(seed: &mut u64, hash: u64) {
    *seed ^= hash
        .wrapping_add(SEED_INCREMENT)
        .wrapping_add(*seed << 6)
        .wrapping_add(*seed >> 2);
}

/// Fold an owned value into `seed`.
///
/// Scalars are a single argument. Sequences fold each element in order, so
/// `IntArray([1, 2])` folds like the two arguments `1` then `2`.
pub fn hash_combine_value(seed: &mut u64, value: &OwnedAttributeValue) {
    match value {
        OwnedAttributeValue::Bool(v) => hash_combine(seed, v),
        OwnedAttributeValue::Int(v) => hash_combine(seed, v),
        OwnedAttributeValue::UInt(v) => hash_combine(seed, v),
        OwnedAttributeValue::Int64(v) => hash_combine(seed, v),
        OwnedAttributeValue::UInt64(v) => hash_combine(seed, v),
        OwnedAttributeValue::Double(v) => hash_combine(seed, v),
        OwnedAttributeValue::String(v) => hash_combine(seed, v.as_str()),
        OwnedAttributeValue::BoolArray(v) => combine_all(seed, v),
        OwnedAttributeValue::IntArray(v) => combine_all(seed, v),
        OwnedAttributeValue::UIntArray(v) => combine_all(seed, v),
        OwnedAttributeValue::Int64Array(v) => combine_all(seed, v),
        OwnedAttributeValue::UInt64Array(v) => combine_all(seed, v),
        OwnedAttributeValue::DoubleArray(v) => combine_all(seed, v),
        OwnedAttributeValue::StringArray(v) => combine_all(seed, v),
        OwnedAttributeValue::ByteArray(v) => combine_all(seed, v),
    }
}

fn combine_all<T: Fnv1a>(seed: &mut u64, args: &[T]) {
    for arg in args {
        hash_combine(seed, arg);
    }
}

/// An attribute container that can fold its entries into a seed.
pub trait HashableAttributes {
    /// Fold every entry's key, then its value, in iteration order.
    fn fold_entries(&self, seed: &mut u64);
}

impl HashableAttributes for StringAttributeMap {
    fn fold_entries(&self, seed: &mut u64) {
        for (key, value) in self {
            hash_combine(seed, key.as_str());
            hash_combine(seed, value.as_str());
        }
    }
}

impl HashableAttributes for AttributeMap {
    fn fold_entries(&self, seed: &mut u64) {
        for (key, value) in self {
            hash_combine(seed, key.as_str());
            hash_combine_value(seed, value);
        }
    }
}

impl HashableAttributes for OrderedAttributeMap {
    fn fold_entries(&self, seed: &mut u64) {
        for (key, value) in self {
            hash_combine(seed, key.as_str());
            hash_combine_value(seed, value);
        }
    }
}

/// Fingerprint of every key and value in `map`, starting from seed zero.
///
/// # Examples
///
/// ```
/// use telemetry_attributes::{hash_attribute_map, AttributeValue, OrderedAttributeMap};
///
/// let mut ab = OrderedAttributeMap::new();
/// ab.set_attribute("a", &AttributeValue::Int(1));
/// ab.set_attribute("b", &AttributeValue::Int(2));
///
/// let mut ba = OrderedAttributeMap::new();
/// ba.set_attribute("b", &AttributeValue::Int(2));
/// ba.set_attribute("a", &AttributeValue::Int(1));
///
/// assert_eq!(hash_attribute_map(&ab), hash_attribute_map(&ba));
/// ```
pub fn hash_attribute_map<M: HashableAttributes + ?Sized>(map: &M) -> u64 {
    let mut seed = 0;
    map.fold_entries(&mut seed);
    seed
}

/// Fingerprint of the pairs of `source` whose key `is_key_present` accepts.
///
/// Pairs are visited in source order and values are converted to their owned
/// form before hashing, so the result equals [`hash_attribute_map`] over a map
/// that iterates the accepted pairs in the same order. Duplicate keys are
/// folded every time they occur, unlike a map which keeps only the last.
pub fn hash_filtered_attributes<S, P>(source: &S, mut is_key_present: P) -> u64
where
    S: KeyValueIterable + ?Sized,
    P: FnMut(&str) -> bool,
{
    let mut seed = 0;
    source.for_each_key_value(&mut |key, value| {
        if !is_key_present(key) {
            trace!(key, "skipping attribute excluded from fingerprint");
            return true;
        }
        hash_combine(&mut seed, key);
        hash_combine_value(&mut seed, &OwnedValueConverter.convert(&value));
        true
    });
    seed
}
