//! Conversions between [`Value`] and `serde_json::Value`.
//!
//! JSON is the wire format most subjects arrive in, but it is narrower
//! than the engine's value model: it has no byte strings and no integer
//! type wider than `i64`/`f64`. The conversions here are as lossless as
//! the formats allow:
//!
//! - JSON numbers become [`Value::Number`] (JSON has no bigint).
//! - [`Value::Bytes`] serializes as an array of integers.
//! - [`Value::BigInt`] serializes as a JSON number when it fits `i64`,
//!   otherwise as a decimal string.

use crate::value::Value;

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(b),
            // `as_f64` is total for standard (non-arbitrary-precision)
            // JSON numbers; the fallback never fires there.
            serde_json::Value::Number(n) => {
                Self::Number(n.as_f64().unwrap_or(f64::NAN))
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Boolean(b) => Self::Bool(b),
            Value::Number(n) => serde_json::Number::from_f64(n)
                .map_or(Self::Null, Self::Number),
            Value::BigInt(i) => i64::try_from(i)
                .map_or_else(|_| Self::String(i.to_string()), Self::from),
            Value::String(s) => Self::String(s),
            Value::Bytes(b) => {
                Self::Array(b.into_iter().map(Self::from).collect())
            }
            Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            Value::Object(map) => Self::Object(
                map.into_iter().map(|(k, v)| (k, Self::from(v))).collect(),
            ),
        }
    }
}
