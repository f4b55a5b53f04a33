//! Fluent schema construction.
//!
//! One factory function per schema kind ([`string`], [`number`],
//! [`array`], …), each returning a kind-specific builder. Builders
//! consume `self` and return a new value on every call — a schema is
//! immutable once constructed, and a chain never mutates an earlier
//! link. Constraint methods exist only where they make sense
//! (`min_length` on strings/bytes/arrays, `min`/`max` on numerics,
//! `key` on records); the cross-cutting modifiers (`optional`,
//! `nullable`, `description`, `brand`) exist everywhere, and
//! `default_value` only on leaves.
//!
//! Setting the same field twice in one chain is a programmer error and
//! panics; subject data never does.
//!
//! ```rust
//! use conform_schema::builder::{object, string, number};
//! use conform_schema::Schema;
//! use conform_value::Value;
//!
//! let user = object([
//!     ("name", Schema::from(string().min_length(1))),
//!     ("age", Schema::from(number().min(0.0).optional())),
//! ]);
//! let subject = Value::object([("name", Value::from("ada"))]);
//! assert!(user.guard(&subject));
//! ```

use conform_value::Value;

use crate::error::Violations;
use crate::schema::{Brand, Schema, SchemaKind};

// ============================================================================
// BUILDER MACROS
// ============================================================================

/// Declares a builder struct wrapping a [`Schema`], with the
/// cross-cutting modifier methods, `Into<Schema>` conversion, and bound
/// `parse`/`validate`/`guard` passthroughs.
macro_rules! builder {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            schema: Schema,
        }

        impl $name {
            /// Accepts absence of the subject.
            ///
            /// # Panics
            ///
            /// Panics if `optional` is already set in this chain.
            #[must_use]
            pub fn optional(mut self) -> Self {
                assert!(
                    !self.schema.optional,
                    concat!(stringify!($name), ": optional is already set")
                );
                self.schema.optional = true;
                self
            }

            /// Accepts the explicit null sentinel.
            ///
            /// # Panics
            ///
            /// Panics if `nullable` is already set in this chain.
            #[must_use]
            pub fn nullable(mut self) -> Self {
                assert!(
                    !self.schema.nullable,
                    concat!(stringify!($name), ": nullable is already set")
                );
                self.schema.nullable = true;
                self
            }

            /// Attaches documentation. Inert at runtime.
            ///
            /// # Panics
            ///
            /// Panics if a description is already set in this chain.
            #[must_use]
            pub fn description(mut self, text: impl Into<String>) -> Self {
                assert!(
                    self.schema.description.is_none(),
                    concat!(stringify!($name), ": description is already set")
                );
                self.schema.description = Some(text.into());
                self
            }

            /// Attaches an inert nominal-typing marker.
            ///
            /// # Panics
            ///
            /// Panics if a brand is already set in this chain.
            #[must_use]
            pub fn brand(
                mut self,
                key: impl Into<String>,
                value: impl Into<String>,
            ) -> Self {
                assert!(
                    self.schema.brand.is_none(),
                    concat!(stringify!($name), ": brand is already set")
                );
                self.schema.brand = Some(Brand {
                    key: key.into(),
                    value: value.into(),
                });
                self
            }

            /// Finishes the chain, yielding the immutable schema value.
            #[must_use]
            pub fn into_schema(self) -> Schema {
                self.schema
            }

            /// Bound [`parse`](crate::parse::parse) on the built schema.
            pub fn parse<'a>(
                &self,
                subject: impl Into<Option<&'a Value>>,
            ) -> Result<Option<Value>, Violations> {
                self.schema.parse(subject)
            }

            /// Bound [`validate`](crate::validate::validate) on the built schema.
            pub fn validate<'a>(
                &self,
                subject: impl Into<Option<&'a Value>>,
            ) -> Result<Option<Value>, Violations> {
                self.schema.validate(subject)
            }

            /// Bound [`guard`](crate::validate::guard) on the built schema.
            pub fn guard<'a>(&self, subject: impl Into<Option<&'a Value>>) -> bool {
                self.schema.guard(subject)
            }
        }

        impl From<$name> for Schema {
            fn from(builder: $name) -> Self {
                builder.schema
            }
        }
    };
}

/// Adds `default_value` to a leaf builder.
macro_rules! leaf_default {
    ($name:ident) => {
        impl $name {
            /// Fallback applied in parse mode when the subject is
            /// absent. The fallback is checked against this schema's own
            /// constraints lazily, when it is actually applied.
            ///
            /// # Panics
            ///
            /// Panics unless `optional` was set earlier in the chain, or
            /// if a default is already set.
            #[must_use]
            pub fn default_value(mut self, value: impl Into<Value>) -> Self {
                assert!(
                    self.schema.optional,
                    concat!(stringify!($name), ": default requires optional")
                );
                assert!(
                    self.schema.default.is_none(),
                    concat!(stringify!($name), ": default is already set")
                );
                self.schema.default = Some(value.into());
                self
            }
        }
    };
}

/// Adds a set-at-most-once constraint setter targeting one field of the
/// builder's kind variant.
macro_rules! constraint {
    (
        $(#[$meta:meta])*
        $name:ident :: $method:ident($ty:ty) => $variant:ident . $field:ident
    ) => {
        impl $name {
            $(#[$meta])*
            ///
            /// # Panics
            ///
            /// Panics if this bound is already set in this chain.
            #[must_use]
            pub fn $method(mut self, bound: $ty) -> Self {
                match &mut self.schema.kind {
                    SchemaKind::$variant { $field, .. } => {
                        assert!(
                            $field.is_none(),
                            concat!(
                                stringify!($name),
                                ": ",
                                stringify!($method),
                                " is already set"
                            )
                        );
                        *$field = Some(bound);
                    }
                    _ => unreachable!(concat!(
                        stringify!($name),
                        " always wraps a ",
                        stringify!($variant),
                        " kind"
                    )),
                }
                self
            }
        }
    };
}

// ============================================================================
// LEAF BUILDERS
// ============================================================================

builder! {
    /// Builds a string schema.
    StringSchema
}
leaf_default!(StringSchema);
constraint! {
    /// Minimum length, in Unicode scalar values.
    StringSchema::min_length(usize) => String.min_length
}
constraint! {
    /// Maximum length, in Unicode scalar values.
    StringSchema::max_length(usize) => String.max_length
}

/// Starts a string schema.
#[must_use]
pub fn string() -> StringSchema {
    StringSchema {
        schema: Schema::new(SchemaKind::String {
            min_length: None,
            max_length: None,
        }),
    }
}

builder! {
    /// Builds a floating-point number schema.
    NumberSchema
}
leaf_default!(NumberSchema);
constraint! {
    /// Inclusive lower bound.
    NumberSchema::min(f64) => Number.min
}
constraint! {
    /// Inclusive upper bound.
    NumberSchema::max(f64) => Number.max
}

/// Starts a number schema.
#[must_use]
pub fn number() -> NumberSchema {
    NumberSchema {
        schema: Schema::new(SchemaKind::Number {
            min: None,
            max: None,
        }),
    }
}

builder! {
    /// Builds an integer schema.
    BigIntSchema
}
leaf_default!(BigIntSchema);
constraint! {
    /// Inclusive lower bound.
    BigIntSchema::min(i128) => BigInt.min
}
constraint! {
    /// Inclusive upper bound.
    BigIntSchema::max(i128) => BigInt.max
}

/// Starts an integer schema.
#[must_use]
pub fn bigint() -> BigIntSchema {
    BigIntSchema {
        schema: Schema::new(SchemaKind::BigInt {
            min: None,
            max: None,
        }),
    }
}

builder! {
    /// Builds a boolean schema.
    BooleanSchema
}
leaf_default!(BooleanSchema);

/// Starts a boolean schema.
#[must_use]
pub fn boolean() -> BooleanSchema {
    BooleanSchema {
        schema: Schema::new(SchemaKind::Boolean),
    }
}

builder! {
    /// Builds a byte-sequence schema.
    BytesSchema
}
leaf_default!(BytesSchema);
constraint! {
    /// Minimum length in bytes.
    BytesSchema::min_length(usize) => Bytes.min_length
}
constraint! {
    /// Maximum length in bytes.
    BytesSchema::max_length(usize) => Bytes.max_length
}

/// Starts a byte-sequence schema.
#[must_use]
pub fn bytes() -> BytesSchema {
    BytesSchema {
        schema: Schema::new(SchemaKind::Bytes {
            min_length: None,
            max_length: None,
        }),
    }
}

builder! {
    /// Builds a literal schema: the subject must equal the given scalar
    /// exactly.
    LiteralSchema
}
leaf_default!(LiteralSchema);

/// Starts a literal schema.
///
/// # Panics
///
/// Panics if the value is not a scalar (boolean, number, bigint, or
/// string).
#[must_use]
pub fn literal(value: impl Into<Value>) -> LiteralSchema {
    let value = value.into();
    assert!(
        matches!(
            value,
            Value::Boolean(_) | Value::Number(_) | Value::BigInt(_) | Value::String(_)
        ),
        "literal: value must be a scalar"
    );
    LiteralSchema {
        schema: Schema::new(SchemaKind::Literal { of: value }),
    }
}

builder! {
    /// Builds an enumerated string-set schema.
    StringUnionSchema
}
leaf_default!(StringUnionSchema);

/// Starts an enumerated string-set schema.
///
/// # Panics
///
/// Panics if `members` is empty.
#[must_use]
pub fn string_union<M>(members: impl IntoIterator<Item = M>) -> StringUnionSchema
where
    M: Into<String>,
{
    let of: Vec<String> = members.into_iter().map(Into::into).collect();
    assert!(!of.is_empty(), "stringUnion: members must be non-empty");
    StringUnionSchema {
        schema: Schema::new(SchemaKind::StringUnion { of }),
    }
}

builder! {
    /// Builds an enumerated number-set schema.
    NumberUnionSchema
}
leaf_default!(NumberUnionSchema);

/// Starts an enumerated number-set schema.
///
/// # Panics
///
/// Panics if `members` is empty.
#[must_use]
pub fn number_union(members: impl IntoIterator<Item = f64>) -> NumberUnionSchema {
    let of: Vec<f64> = members.into_iter().collect();
    assert!(!of.is_empty(), "numberUnion: members must be non-empty");
    NumberUnionSchema {
        schema: Schema::new(SchemaKind::NumberUnion { of }),
    }
}

// ============================================================================
// COMPOSITE BUILDERS
// ============================================================================

builder! {
    /// Builds a homogeneous array schema.
    ArraySchema
}
constraint! {
    /// Minimum number of elements in the traversal output.
    ArraySchema::min_length(usize) => Array.min_length
}
constraint! {
    /// Maximum number of elements in the traversal output.
    ArraySchema::max_length(usize) => Array.max_length
}

/// Starts an array schema over an element schema.
#[must_use]
pub fn array(element: impl Into<Schema>) -> ArraySchema {
    ArraySchema {
        schema: Schema::new(SchemaKind::Array {
            of: Box::new(element.into()),
            min_length: None,
            max_length: None,
        }),
    }
}

builder! {
    /// Builds an object schema from declared fields.
    ObjectSchema
}

/// Starts an object schema from `(name, schema)` pairs; declaration
/// order is preserved and drives error ordering.
#[must_use]
pub fn object<K, S>(fields: impl IntoIterator<Item = (K, S)>) -> ObjectSchema
where
    K: Into<String>,
    S: Into<Schema>,
{
    ObjectSchema {
        schema: Schema::new(SchemaKind::Object {
            of: fields
                .into_iter()
                .map(|(name, schema)| (name.into(), schema.into()))
                .collect(),
        }),
    }
}

builder! {
    /// Builds a record schema: one value schema for every present key.
    RecordSchema
}

impl RecordSchema {
    /// Constrains the shape of every key.
    ///
    /// # Panics
    ///
    /// Panics if a key schema is already set in this chain.
    #[must_use]
    pub fn key(mut self, key_schema: impl Into<Schema>) -> Self {
        match &mut self.schema.kind {
            SchemaKind::Record { key, .. } => {
                assert!(key.is_none(), "RecordSchema: key is already set");
                *key = Some(Box::new(key_schema.into()));
            }
            _ => unreachable!("RecordSchema always wraps a Record kind"),
        }
        self
    }
}

/// Starts a record schema over a value schema.
#[must_use]
pub fn record(values: impl Into<Schema>) -> RecordSchema {
    RecordSchema {
        schema: Schema::new(SchemaKind::Record {
            of: Box::new(values.into()),
            key: None,
        }),
    }
}

builder! {
    /// Builds a fixed-arity positional tuple schema.
    TupleSchema
}

/// Starts a tuple schema from positional schemas.
///
/// # Panics
///
/// Panics if `items` is empty — tuple arity is at least one.
#[must_use]
pub fn tuple<S>(items: impl IntoIterator<Item = S>) -> TupleSchema
where
    S: Into<Schema>,
{
    let of: Vec<Schema> = items.into_iter().map(Into::into).collect();
    assert!(!of.is_empty(), "tuple: arity must be at least 1");
    TupleSchema {
        schema: Schema::new(SchemaKind::Tuple { of }),
    }
}

builder! {
    /// Builds an ordered-alternatives union schema.
    UnionSchema
}

/// Starts a union schema from ordered alternatives; the first
/// structural match wins.
///
/// # Panics
///
/// Panics if `alternatives` is empty.
#[must_use]
pub fn union<S>(alternatives: impl IntoIterator<Item = S>) -> UnionSchema
where
    S: Into<Schema>,
{
    let of: Vec<Schema> = alternatives.into_iter().map(Into::into).collect();
    assert!(!of.is_empty(), "union: alternatives must be non-empty");
    UnionSchema {
        schema: Schema::new(SchemaKind::Union { of }),
    }
}

// ============================================================================
// TESTS
// ============================================================================
