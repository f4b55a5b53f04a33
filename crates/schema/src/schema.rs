//! The schema data model: pure data describing accepted value shapes.
//!
//! A [`Schema`] pairs one [`SchemaKind`] (what shape the subject must
//! have) with the cross-cutting modifiers every kind supports
//! (`optional`, `nullable`, `description`, `brand`, and — for leaves —
//! `default`). Schema values are immutable once constructed: the builder
//! layer produces a new value for every modifier applied and never
//! mutates an existing one.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use conform_value::Value;

use crate::error::Violations;
use crate::{parse, validate};

/// Ordered map of declared object fields.
pub type Fields = IndexMap<String, Schema>;

/// Inert nominal-typing marker.
///
/// A brand makes two otherwise-identical schemas distinct to a typed
/// construction layer. It round-trips through construction and serde but
/// participates in zero runtime comparisons — both traversal engines
/// ignore it entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    /// Marker namespace.
    pub key: String,
    /// Marker value.
    pub value: String,
}

/// A declarative, immutable description of an accepted value shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// The accepted shape and its kind-specific constraints.
    #[serde(flatten)]
    pub kind: SchemaKind,

    /// Accepts absence of the subject.
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub optional: bool,

    /// Accepts the explicit null sentinel.
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub nullable: bool,

    /// Documentation only; inert at runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Inert nominal-typing marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,

    /// Fallback applied in parse mode when the subject is absent.
    ///
    /// Only populated together with `optional`, and only on leaf kinds.
    /// The fallback is checked against this schema's own constraints
    /// lazily, at the moment it is applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// The closed set of accepted shapes.
///
/// Every traversal site matches on this exhaustively, so adding a kind
/// is a compile error until each engine handles it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SchemaKind {
    /// UTF-8 text with optional length bounds (in Unicode scalar values).
    String {
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    /// Floating-point number with optional inclusive bounds.
    Number { min: Option<f64>, max: Option<f64> },
    /// Integer with optional inclusive bounds; no floating semantics.
    #[serde(rename = "bigint")]
    BigInt { min: Option<i128>, max: Option<i128> },
    /// `true` / `false`.
    Boolean,
    /// Byte sequence with optional length bounds.
    Bytes {
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    /// A fixed scalar the subject must equal exactly.
    Literal { of: Value },
    /// Ordered, non-empty set of allowed strings.
    StringUnion { of: Vec<String> },
    /// Ordered, non-empty set of allowed numbers.
    NumberUnion { of: Vec<f64> },
    /// Homogeneous sequence; length bounds apply to the traversal output.
    Array {
        of: Box<Schema>,
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    /// Declared key-to-schema mapping; undeclared subject keys are
    /// ignored and never copied to the output.
    Object { of: Fields },
    /// Data-driven map: one value schema applied to every present key,
    /// with an optional key-shape constraint.
    Record {
        of: Box<Schema>,
        key: Option<Box<Schema>>,
    },
    /// Fixed-arity positional sequence, one schema per position.
    Tuple { of: Vec<Schema> },
    /// Ordered alternatives; the first structural match wins.
    Union { of: Vec<Schema> },
}

impl SchemaKind {
    /// Lowercase kind name, as it appears in logs and error output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::String { .. } => "string",
            Self::Number { .. } => "number",
            Self::BigInt { .. } => "bigint",
            Self::Boolean => "boolean",
            Self::Bytes { .. } => "bytes",
            Self::Literal { .. } => "literal",
            Self::StringUnion { .. } => "stringUnion",
            Self::NumberUnion { .. } => "numberUnion",
            Self::Array { .. } => "array",
            Self::Object { .. } => "object",
            Self::Record { .. } => "record",
            Self::Tuple { .. } => "tuple",
            Self::Union { .. } => "union",
        }
    }

    /// True for kinds with no nested sub-schemas.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        !matches!(
            self,
            Self::Array { .. }
                | Self::Object { .. }
                | Self::Record { .. }
                | Self::Tuple { .. }
                | Self::Union { .. }
        )
    }
}

impl Schema {
    /// Wraps a kind with no modifiers set.
    #[must_use]
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            optional: false,
            nullable: false,
            description: None,
            brand: None,
            default: None,
        }
    }

    /// Lowercase kind name.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// True when the kind has no nested sub-schemas.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }

    /// Coercing traversal: applies defaults and treats null as absence
    /// for optional schemas. See [`parse::parse`].
    pub fn parse<'a>(
        &self,
        subject: impl Into<Option<&'a Value>>,
    ) -> Result<Option<Value>, Violations> {
        parse::parse(self, subject)
    }

    /// Non-coercing structural check. See [`validate::validate`].
    pub fn validate<'a>(
        &self,
        subject: impl Into<Option<&'a Value>>,
    ) -> Result<Option<Value>, Violations> {
        validate::validate(self, subject)
    }

    /// True iff [`Schema::validate`] succeeds.
    pub fn guard<'a>(&self, subject: impl Into<Option<&'a Value>>) -> bool {
        validate::guard(self, subject)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::builder::{array, number, object, string};

    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!(Schema::new(SchemaKind::Boolean).kind_name(), "boolean");
        let s: Schema = array(string()).into();
        assert_eq!(s.kind_name(), "array");
    }

    #[test]
    fn leaf_query() {
        assert!(Schema::new(SchemaKind::Boolean).is_leaf());
        let s: Schema = object([("n", number())]).into();
        assert!(!s.is_leaf());
    }

    #[test]
    fn serde_tags_with_type_field() {
        let s: Schema = string().min_length(2).optional().into();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["type"], "string");
        assert_eq!(json["minLength"], 2);
        assert_eq!(json["optional"], true);
        assert!(json.get("nullable").is_none());
    }

    #[test]
    fn serde_roundtrip_composite() {
        let s: Schema = object([
            ("name", Schema::from(string().min_length(1))),
            ("tags", Schema::from(array(string()).max_length(4))),
        ])
        .into();
        let json = serde_json::to_string(&s).unwrap();
        let back: Schema = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn brand_is_inert_for_equality_of_output() {
        // Branded and unbranded schemas accept exactly the same subjects.
        let plain: Schema = string().into();
        let branded: Schema = string().brand("unit", "meters").into();
        let subject = conform_value::Value::from("5");
        assert_eq!(
            plain.validate(&subject).is_ok(),
            branded.validate(&subject).is_ok()
        );
    }
}
