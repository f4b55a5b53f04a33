//! Primitive verifier: checks a single leaf schema against a present
//! subject.
//!
//! Pure and total — every outcome is `Ok` or an [`ErrorCode`], never a
//! panic, for any well-formed schema/subject pair. The verifier has no
//! path awareness and no absence handling: the traversal engines resolve
//! the absence/null short-circuits *before* delegating here, and wrap
//! the returned code with the current path.
//!
//! Check order per leaf: type first, then (for floating numbers) the
//! non-finite checks, then range/membership. A range failure therefore
//! implies the type check already passed.

use conform_value::Value;

use crate::error::ErrorCode;
use crate::schema::{Schema, SchemaKind};

/// Checks a present subject against a leaf schema.
///
/// Only called with leaf kinds; composite kinds are driven by the
/// traversal engines and never reach this function.
pub(crate) fn verify(schema: &Schema, subject: &Value) -> Result<(), ErrorCode> {
    match &schema.kind {
        SchemaKind::String {
            min_length,
            max_length,
        } => {
            let Value::String(text) = subject else {
                return Err(ErrorCode::InvalidType);
            };
            length_in_bounds(text.chars().count(), *min_length, *max_length)
        }
        SchemaKind::Number { min, max } => {
            let Value::Number(number) = subject else {
                return Err(ErrorCode::InvalidType);
            };
            if number.is_nan() {
                return Err(ErrorCode::NotANumber);
            }
            if number.is_infinite() {
                return Err(ErrorCode::Infinity);
            }
            if min.is_some_and(|bound| *number < bound) {
                return Err(ErrorCode::MinRange);
            }
            if max.is_some_and(|bound| *number > bound) {
                return Err(ErrorCode::MaxRange);
            }
            Ok(())
        }
        SchemaKind::BigInt { min, max } => {
            let Value::BigInt(integer) = subject else {
                return Err(ErrorCode::InvalidType);
            };
            if min.is_some_and(|bound| *integer < bound) {
                return Err(ErrorCode::MinRange);
            }
            if max.is_some_and(|bound| *integer > bound) {
                return Err(ErrorCode::MaxRange);
            }
            Ok(())
        }
        SchemaKind::Boolean => match subject {
            Value::Boolean(_) => Ok(()),
            _ => Err(ErrorCode::InvalidType),
        },
        SchemaKind::Bytes {
            min_length,
            max_length,
        } => {
            let Value::Bytes(bytes) = subject else {
                return Err(ErrorCode::InvalidType);
            };
            length_in_bounds(bytes.len(), *min_length, *max_length)
        }
        SchemaKind::Literal { of } => {
            // Strict equality; a NaN literal matches nothing.
            if subject == of {
                Ok(())
            } else {
                Err(ErrorCode::InvalidType)
            }
        }
        SchemaKind::StringUnion { of } => {
            let Value::String(text) = subject else {
                return Err(ErrorCode::InvalidType);
            };
            if of.iter().any(|member| member == text) {
                Ok(())
            } else {
                Err(ErrorCode::NotInUnion)
            }
        }
        SchemaKind::NumberUnion { of } => {
            let Value::Number(number) = subject else {
                return Err(ErrorCode::InvalidType);
            };
            if of.iter().any(|member| member == number) {
                Ok(())
            } else {
                Err(ErrorCode::NotInUnion)
            }
        }
        SchemaKind::Array { .. }
        | SchemaKind::Object { .. }
        | SchemaKind::Record { .. }
        | SchemaKind::Tuple { .. }
        | SchemaKind::Union { .. } => {
            unreachable!("composite kinds are traversed, not verified")
        }
    }
}

fn length_in_bounds(
    length: usize,
    min: Option<usize>,
    max: Option<usize>,
) -> Result<(), ErrorCode> {
    if min.is_some_and(|bound| length < bound) {
        return Err(ErrorCode::MinRange);
    }
    if max.is_some_and(|bound| length > bound) {
        return Err(ErrorCode::MaxRange);
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::builder::{
        bigint, boolean, bytes, literal, number, number_union, string, string_union,
    };

    use super::*;

    fn check(schema: impl Into<Schema>, subject: &Value) -> Result<(), ErrorCode> {
        verify(&schema.into(), subject)
    }

    #[rstest]
    #[case::null(Value::Null)]
    #[case::number(Value::number(1.0))]
    #[case::array(Value::array([]))]
    fn string_rejects_other_kinds(#[case] subject: Value) {
        assert_eq!(check(string(), &subject), Err(ErrorCode::InvalidType));
    }

    #[test]
    fn string_length_is_counted_in_chars() {
        // Three scalar values, nine bytes.
        let subject = Value::from("日本語");
        assert_eq!(check(string().min_length(3), &subject), Ok(()));
        assert_eq!(
            check(string().min_length(4), &subject),
            Err(ErrorCode::MinRange)
        );
    }

    #[test]
    fn string_bounds() {
        assert_eq!(
            check(string().min_length(2), &Value::from("a")),
            Err(ErrorCode::MinRange)
        );
        assert_eq!(
            check(string().max_length(2), &Value::from("abc")),
            Err(ErrorCode::MaxRange)
        );
        assert_eq!(check(string().min_length(1).max_length(3), &Value::from("ab")), Ok(()));
    }

    #[test]
    fn number_nan_is_distinct_from_range() {
        // NaN trips the dedicated code even when bounds exist.
        assert_eq!(
            check(number().min(0.0), &Value::number(f64::NAN)),
            Err(ErrorCode::NotANumber)
        );
    }

    #[rstest]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn number_infinity_is_distinct(#[case] subject: f64) {
        assert_eq!(
            check(number().max(10.0), &Value::number(subject)),
            Err(ErrorCode::Infinity)
        );
    }

    #[test]
    fn number_bounds_are_inclusive() {
        assert_eq!(check(number().min(1.0).max(2.0), &Value::number(1.0)), Ok(()));
        assert_eq!(check(number().min(1.0).max(2.0), &Value::number(2.0)), Ok(()));
        assert_eq!(
            check(number().min(1.0), &Value::number(0.5)),
            Err(ErrorCode::MinRange)
        );
        assert_eq!(
            check(number().max(2.0), &Value::number(2.5)),
            Err(ErrorCode::MaxRange)
        );
    }

    #[test]
    fn number_rejects_bigint_subject() {
        assert_eq!(check(number(), &Value::bigint(1)), Err(ErrorCode::InvalidType));
    }

    #[test]
    fn bigint_bounds() {
        assert_eq!(check(bigint().min(0).max(10), &Value::bigint(10)), Ok(()));
        assert_eq!(
            check(bigint().min(0), &Value::bigint(-1)),
            Err(ErrorCode::MinRange)
        );
        assert_eq!(
            check(bigint().max(10), &Value::bigint(11)),
            Err(ErrorCode::MaxRange)
        );
    }

    #[test]
    fn boolean_accepts_both_values() {
        assert_eq!(check(boolean(), &Value::boolean(true)), Ok(()));
        assert_eq!(check(boolean(), &Value::boolean(false)), Ok(()));
        assert_eq!(check(boolean(), &Value::from("true")), Err(ErrorCode::InvalidType));
    }

    #[test]
    fn bytes_bounds() {
        let subject = Value::bytes(vec![1, 2, 3]);
        assert_eq!(check(bytes().min_length(3), &subject), Ok(()));
        assert_eq!(
            check(bytes().min_length(4), &subject),
            Err(ErrorCode::MinRange)
        );
        assert_eq!(
            check(bytes().max_length(2), &subject),
            Err(ErrorCode::MaxRange)
        );
    }

    #[test]
    fn literal_requires_exact_equality() {
        assert_eq!(check(literal("on"), &Value::from("on")), Ok(()));
        assert_eq!(check(literal("on"), &Value::from("off")), Err(ErrorCode::InvalidType));
        // Same digits, different kind.
        assert_eq!(check(literal(5.0), &Value::bigint(5)), Err(ErrorCode::InvalidType));
    }

    #[test]
    fn string_union_membership() {
        let schema = string_union(["red", "green"]);
        assert_eq!(check(schema.clone(), &Value::from("green")), Ok(()));
        assert_eq!(
            check(schema.clone(), &Value::from("blue")),
            Err(ErrorCode::NotInUnion)
        );
        // Wrong type beats membership.
        assert_eq!(check(schema, &Value::number(1.0)), Err(ErrorCode::InvalidType));
    }

    #[test]
    fn number_union_membership() {
        let schema = number_union([1.0, 2.0]);
        assert_eq!(check(schema.clone(), &Value::number(2.0)), Ok(()));
        assert_eq!(
            check(schema, &Value::number(3.0)),
            Err(ErrorCode::NotInUnion)
        );
    }
}
