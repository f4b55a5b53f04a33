//! Error taxonomy and accumulation.
//!
//! Every failure the engine can report is an [`Invalid`] record: an
//! [`ErrorCode`], the schema that rejected the subject, the local
//! offending value, and the exact [`Path`] where the mismatch occurred.
//! [`Violations`] collects records in traversal order — it doubles as
//! the accumulation buffer inside the engines and, non-empty by
//! construction, as the failure payload of every public operation.
//!
//! Failure is always represented in-band: nothing here is thrown during
//! normal operation, however malformed the subject is.

use serde::{Deserialize, Serialize};

use conform_value::Value;

use crate::path::Path;
use crate::schema::Schema;

/// Machine-readable failure code.
///
/// Codes are the whole error message — there is no localized text layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    /// Wrong runtime shape or type for the schema, including failed
    /// unions, wrong container kinds, and wrong tuple arity.
    InvalidType,
    /// Length or numeric lower bound violated after the type check passed.
    MinRange,
    /// Length or numeric upper bound violated after the type check passed.
    MaxRange,
    /// Subject is NaN where a finite number is required.
    NotANumber,
    /// Subject is positive or negative infinity.
    Infinity,
    /// Type-correct value absent from an enumerated set.
    NotInUnion,
    /// A declared default violates its own schema's lower bound.
    SchemaDefaultMinRange,
    /// A declared default violates its own schema's upper bound.
    SchemaDefaultMaxRange,
    /// A declared default is absent from its own enumerated set.
    SchemaDefaultNotInUnion,
}

impl ErrorCode {
    /// The code's wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidType => "invalidType",
            Self::MinRange => "minRange",
            Self::MaxRange => "maxRange",
            Self::NotANumber => "notANumber",
            Self::Infinity => "infinity",
            Self::NotInUnion => "notInUnion",
            Self::SchemaDefaultMinRange => "schemaDefaultMinRange",
            Self::SchemaDefaultMaxRange => "schemaDefaultMaxRange",
            Self::SchemaDefaultNotInUnion => "schemaDefaultNotInUnion",
        }
    }

    /// True for the bound-violation codes.
    #[must_use]
    pub const fn is_range(self) -> bool {
        matches!(
            self,
            Self::MinRange
                | Self::MaxRange
                | Self::SchemaDefaultMinRange
                | Self::SchemaDefaultMaxRange
        )
    }

    /// True for the codes blaming a schema's own default.
    #[must_use]
    pub const fn is_schema_default(self) -> bool {
        matches!(
            self,
            Self::SchemaDefaultMinRange
                | Self::SchemaDefaultMaxRange
                | Self::SchemaDefaultNotInUnion
        )
    }

    /// Re-codes an ordinary verification failure as a failure of the
    /// schema's own default. Callers can then tell "your input is bad"
    /// apart from "your schema's default is bad". Codes without a
    /// default-specific counterpart pass through unchanged.
    #[must_use]
    pub const fn into_schema_default(self) -> Self {
        match self {
            Self::MinRange => Self::SchemaDefaultMinRange,
            Self::MaxRange => Self::SchemaDefaultMaxRange,
            Self::NotInUnion => Self::SchemaDefaultNotInUnion,
            other => other,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structural failure, produced at the exact node where the
/// mismatch occurred.
///
/// The record owns clones of the offending schema and the *local* value
/// at `path` (not the root input); `subject` is `None` when the failure
/// is about absence itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{code} at {path}")]
pub struct Invalid {
    /// What went wrong.
    pub code: ErrorCode,
    /// The schema node that rejected the subject.
    pub schema: Schema,
    /// The local offending value; `None` when the subject was absent.
    pub subject: Option<Value>,
    /// Where the mismatch occurred, relative to the traversal root.
    pub path: Path,
}

impl Invalid {
    /// Builds a record, cloning the schema and local subject.
    #[must_use]
    pub fn new(
        code: ErrorCode,
        schema: &Schema,
        subject: Option<&Value>,
        path: &Path,
    ) -> Self {
        Self {
            code,
            schema: schema.clone(),
            subject: subject.cloned(),
            path: path.clone(),
        }
    }
}

/// Ordered collection of [`Invalid`] records.
///
/// Ordering follows traversal order: object keys as declared, indices
/// ascending, depth-first. The engines accumulate into a fresh
/// `Violations` per call and convert at the boundary via
/// [`Violations::into_result`], so a caller-visible `Violations` is
/// never empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
#[error("validation failed with {count} violation(s)", count = .list.len())]
pub struct Violations {
    list: Vec<Invalid>,
}

impl Violations {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection holding exactly one record.
    #[must_use]
    pub fn single(invalid: Invalid) -> Self {
        Self {
            list: vec![invalid],
        }
    }

    /// Appends one record.
    pub fn push(&mut self, invalid: Invalid) {
        self.list.push(invalid);
    }

    /// Appends every record of another collection, preserving order.
    pub fn merge(&mut self, other: Self) {
        self.list.extend(other.list);
    }

    /// True when no record has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Number of collected records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// The records, in traversal order.
    #[must_use]
    pub fn as_slice(&self) -> &[Invalid] {
        &self.list
    }

    /// First record, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Invalid> {
        self.list.first()
    }

    /// Iterates the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Invalid> {
        self.list.iter()
    }

    /// Boundary conversion: success when nothing was collected, the
    /// (then non-empty) collection otherwise.
    #[must_use = "validation outcome must be checked"]
    pub fn into_result<T>(self, ok: T) -> Result<T, Self> {
        if self.is_empty() { Ok(ok) } else { Err(self) }
    }
}

impl FromIterator<Invalid> for Violations {
    fn from_iter<I: IntoIterator<Item = Invalid>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Violations {
    type Item = Invalid;
    type IntoIter = std::vec::IntoIter<Invalid>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Invalid;
    type IntoIter = std::slice::Iter<'a, Invalid>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::builder::string;

    use super::*;

    fn sample(code: ErrorCode) -> Invalid {
        Invalid::new(
            code,
            &Schema::from(string()),
            Some(&Value::from("x")),
            &Path::root().child_key("field"),
        )
    }

    #[test]
    fn code_wire_names() {
        assert_eq!(ErrorCode::InvalidType.as_str(), "invalidType");
        assert_eq!(
            ErrorCode::SchemaDefaultNotInUnion.to_string(),
            "schemaDefaultNotInUnion"
        );
    }

    #[test]
    fn code_serde_matches_wire_names() {
        let json = serde_json::to_string(&ErrorCode::NotANumber).unwrap();
        assert_eq!(json, "\"notANumber\"");
    }

    #[test]
    fn schema_default_mapping() {
        assert_eq!(
            ErrorCode::MinRange.into_schema_default(),
            ErrorCode::SchemaDefaultMinRange
        );
        assert_eq!(
            ErrorCode::NotInUnion.into_schema_default(),
            ErrorCode::SchemaDefaultNotInUnion
        );
        // No default-specific counterpart: passes through.
        assert_eq!(
            ErrorCode::InvalidType.into_schema_default(),
            ErrorCode::InvalidType
        );
    }

    #[test]
    fn invalid_display_names_code_and_path() {
        let message = sample(ErrorCode::MinRange).to_string();
        assert_eq!(message, "minRange at field");
    }

    #[test]
    fn into_result_empty_is_ok() {
        let empty = Violations::new();
        assert_eq!(empty.into_result(7), Ok(7));
    }

    #[test]
    fn into_result_nonempty_is_err() {
        let mut violations = Violations::new();
        violations.push(sample(ErrorCode::InvalidType));
        let err = violations.into_result(()).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.first().map(|i| i.code), Some(ErrorCode::InvalidType));
    }

    #[test]
    fn merge_preserves_order() {
        let mut left = Violations::single(sample(ErrorCode::MinRange));
        let right = Violations::single(sample(ErrorCode::MaxRange));
        left.merge(right);
        let codes: Vec<_> = left.iter().map(|i| i.code).collect();
        assert_eq!(codes, [ErrorCode::MinRange, ErrorCode::MaxRange]);
    }
}
