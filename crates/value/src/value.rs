//! The [`Value`] tagged union.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::kind::ValueKind;

/// Ordered key-value map used by [`Value::Object`].
///
/// Insertion order is preserved; equality is order-insensitive.
pub type Object = IndexMap<String, Value>;

/// An owned, untyped value.
///
/// Every shape the schema model can describe has a variant here. Values
/// are plain data: cloning is deep, equality is structural, and nothing
/// aliases — an output built from a `Value` never shares containers with
/// the input it was built from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    /// The explicit null sentinel.
    #[default]
    Null,
    /// Boolean value.
    Boolean(bool),
    /// Floating-point number (IEEE 754 double).
    Number(f64),
    /// Integer value with no floating semantics.
    BigInt(i128),
    /// UTF-8 text.
    String(String),
    /// Raw byte sequence.
    Bytes(Vec<u8>),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// Ordered key-value map.
    Object(Object),
}

impl Value {
    // ==================== Constructors ====================

    /// Creates the null sentinel.
    #[must_use]
    pub const fn null() -> Self {
        Self::Null
    }

    /// Creates a boolean value.
    #[must_use]
    pub const fn boolean(v: bool) -> Self {
        Self::Boolean(v)
    }

    /// Creates a floating-point number value.
    #[must_use]
    pub const fn number(v: f64) -> Self {
        Self::Number(v)
    }

    /// Creates an integer value.
    #[must_use]
    pub const fn bigint(v: i128) -> Self {
        Self::BigInt(v)
    }

    /// Creates a string value.
    #[must_use]
    pub fn string(v: impl Into<String>) -> Self {
        Self::String(v.into())
    }

    /// Creates a byte-sequence value.
    #[must_use]
    pub fn bytes(v: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(v.into())
    }

    /// Creates an array value from any iterator of values.
    #[must_use]
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Array(items.into_iter().collect())
    }

    /// Creates an object value from `(key, value)` pairs, preserving
    /// iteration order.
    #[must_use]
    pub fn object<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    // ==================== Type queries ====================

    /// The runtime kind of this value.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Number(_) => ValueKind::Number,
            Self::BigInt(_) => ValueKind::BigInt,
            Self::String(_) => ValueKind::String,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// Checks for the null sentinel.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Checks for a boolean.
    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    /// Checks for a floating-point number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Checks for an integer.
    #[inline]
    #[must_use]
    pub const fn is_bigint(&self) -> bool {
        matches!(self, Self::BigInt(_))
    }

    /// Checks for a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Checks for a byte sequence.
    #[inline]
    #[must_use]
    pub const fn is_bytes(&self) -> bool {
        matches!(self, Self::Bytes(_))
    }

    /// Checks for an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Checks for an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    // ==================== Accessors (as_*) ====================

    /// Borrows as a boolean, if this is one.
    #[inline]
    #[must_use]
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrows as a floating-point number, if this is one.
    #[inline]
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrows as an integer, if this is one.
    #[inline]
    #[must_use]
    pub const fn as_bigint(&self) -> Option<i128> {
        match self {
            Self::BigInt(i) => Some(*i),
            _ => None,
        }
    }

    /// Borrows as a string slice, if this is a string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrows as a byte slice, if this is a byte sequence.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Borrows as an array slice, if this is an array.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrows as an object map, if this is an object.
    #[inline]
    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }
}

// ==================== Conversions (From) ====================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<i128> for Value {
    fn from(v: i128) -> Self {
        Self::BigInt(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Self::Object(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::BigInt(i) => write!(f, "{i}n"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Value::null().kind(), ValueKind::Null);
        assert_eq!(Value::number(1.5).kind(), ValueKind::Number);
        assert_eq!(Value::bigint(7).kind(), ValueKind::BigInt);
        assert_eq!(Value::bytes(vec![1, 2]).kind(), ValueKind::Bytes);
    }

    #[test]
    fn nan_is_not_equal_to_itself() {
        assert_ne!(Value::number(f64::NAN), Value::number(f64::NAN));
    }

    #[test]
    fn number_and_bigint_are_distinct() {
        assert_ne!(Value::number(5.0), Value::bigint(5));
    }

    #[test]
    fn object_equality_ignores_key_order() {
        let a = Value::object([("x", Value::from(1.0)), ("y", Value::from(2.0))]);
        let b = Value::object([("y", Value::from(2.0)), ("x", Value::from(1.0))]);
        assert_eq!(a, b);
    }

    #[test]
    fn object_preserves_insertion_order() {
        let Value::Object(map) =
            Value::object([("b", Value::Null), ("a", Value::Null)])
        else {
            panic!("expected object");
        };
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn accessors_return_none_on_mismatch() {
        assert_eq!(Value::from("text").as_number(), None);
        assert_eq!(Value::number(1.0).as_str(), None);
        assert_eq!(Value::from("text").as_str(), Some("text"));
    }

    #[test]
    fn display_renders_compact() {
        let value = Value::object([("xs", Value::array([Value::from(1.0)]))]);
        assert_eq!(value.to_string(), "{\"xs\": [1]}");
    }

    #[test]
    fn clone_is_deep() {
        let original = Value::array([Value::from("a")]);
        let mut copy = original.clone();
        if let Value::Array(items) = &mut copy {
            items.push(Value::from("b"));
        }
        assert_eq!(original.as_array().map(<[Value]>::len), Some(1));
    }
}
