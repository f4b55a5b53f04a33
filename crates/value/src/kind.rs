//! Runtime kind of a [`Value`](crate::Value), used for type-mismatch
//! reporting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The runtime kind of a value.
///
/// A fieldless mirror of the [`Value`](crate::Value) variants. Error
/// reports name kinds rather than carrying full values when only the
/// shape matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueKind {
    /// The explicit null sentinel.
    Null,
    /// `true` / `false`.
    Boolean,
    /// IEEE 754 double-precision number.
    Number,
    /// Arbitrary-width integer (integer arithmetic, no floating semantics).
    #[serde(rename = "bigint")]
    BigInt,
    /// UTF-8 text.
    String,
    /// Raw byte sequence.
    Bytes,
    /// Ordered sequence of values.
    Array,
    /// Ordered key-value map.
    Object,
}

impl ValueKind {
    /// Lowercase name of the kind, as it appears in error output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::BigInt => "bigint",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
