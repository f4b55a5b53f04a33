//! Structural traversal: validate without coercion.
//!
//! Validate mode shares the parse engine's shape but none of its
//! leniency: no defaults are applied, and null is an ordinary value —
//! an optional schema accepts only true absence, while null passes only
//! where `nullable` says so. Output is still rebuilt fresh, so callers
//! may mutate the result without touching the subject.

use conform_value::Value;

use crate::error::{ErrorCode, Invalid, Violations};
use crate::path::Path;
use crate::schema::{Fields, Schema, SchemaKind};
use crate::verify;

/// Checks `subject` against `schema` structurally.
///
/// `Ok(None)` means the subject was validly absent (optional schema).
/// On failure the returned [`Violations`] lists every problem found, in
/// traversal order.
pub fn validate<'a>(
    schema: &Schema,
    subject: impl Into<Option<&'a Value>>,
) -> Result<Option<Value>, Violations> {
    let subject = subject.into();
    let outcome = traverse(schema, subject, &Path::root());
    match &outcome {
        Ok(_) => tracing::trace!(schema = schema.kind_name(), "validate ok"),
        Err(violations) => tracing::trace!(
            schema = schema.kind_name(),
            violations = violations.len(),
            "validate failed"
        ),
    }
    outcome
}

/// True iff [`validate`] succeeds; the type-narrowing predicate form.
pub fn guard<'a>(schema: &Schema, subject: impl Into<Option<&'a Value>>) -> bool {
    validate(schema, subject).is_ok()
}

fn reject(
    code: ErrorCode,
    schema: &Schema,
    subject: Option<&Value>,
    path: &Path,
) -> Violations {
    Violations::single(Invalid::new(code, schema, subject, path))
}

fn traverse(
    schema: &Schema,
    subject: Option<&Value>,
    path: &Path,
) -> Result<Option<Value>, Violations> {
    match subject {
        Some(Value::Null) if schema.nullable => Ok(Some(Value::Null)),
        // Validate mode: only true absence is absence. Null falls
        // through to the ordinary checks below and fails unless the
        // schema kind itself accepts it.
        None if schema.optional => Ok(None),
        None => {
            if let SchemaKind::Union { of } = &schema.kind {
                // A union is as absence-tolerant as its alternatives:
                // the inner sub-traversal decides.
                traverse_union(schema, of, None, path)
            } else {
                Err(reject(ErrorCode::InvalidType, schema, None, path))
            }
        }
        Some(value) => traverse_present(schema, value, path),
    }
}

fn traverse_present(
    schema: &Schema,
    value: &Value,
    path: &Path,
) -> Result<Option<Value>, Violations> {
    match &schema.kind {
        SchemaKind::Array {
            of,
            min_length,
            max_length,
        } => traverse_array(schema, of, *min_length, *max_length, value, path),
        SchemaKind::Object { of } => traverse_object(schema, of, value, path),
        SchemaKind::Record { of, key } => {
            traverse_record(schema, of, key.as_deref(), value, path)
        }
        SchemaKind::Tuple { of } => traverse_tuple(schema, of, value, path),
        SchemaKind::Union { of } => traverse_union(schema, of, Some(value), path),
        _ => match verify::verify(schema, value) {
            Ok(()) => Ok(Some(value.clone())),
            Err(code) => Err(reject(code, schema, Some(value), path)),
        },
    }
}

fn traverse_array(
    schema: &Schema,
    of: &Schema,
    min_length: Option<usize>,
    max_length: Option<usize>,
    value: &Value,
    path: &Path,
) -> Result<Option<Value>, Violations> {
    let Value::Array(items) = value else {
        return Err(reject(ErrorCode::InvalidType, schema, Some(value), path));
    };
    let mut output = Vec::with_capacity(items.len());
    let mut violations = Violations::new();
    for (index, item) in items.iter().enumerate() {
        match traverse(of, Some(item), &path.child_index(index)) {
            Ok(Some(element)) => output.push(element),
            Ok(None) => {}
            Err(child) => violations.merge(child),
        }
    }
    if !violations.is_empty() {
        return Err(violations);
    }
    // Length bounds apply to the resulting length, after every element
    // has individually passed.
    if min_length.is_some_and(|bound| output.len() < bound) {
        return Err(reject(ErrorCode::MinRange, schema, Some(value), path));
    }
    if max_length.is_some_and(|bound| output.len() > bound) {
        return Err(reject(ErrorCode::MaxRange, schema, Some(value), path));
    }
    Ok(Some(Value::Array(output)))
}

fn traverse_object(
    schema: &Schema,
    fields: &Fields,
    value: &Value,
    path: &Path,
) -> Result<Option<Value>, Violations> {
    let Value::Object(map) = value else {
        return Err(reject(ErrorCode::InvalidType, schema, Some(value), path));
    };
    let mut output = conform_value::Object::with_capacity(fields.len());
    let mut violations = Violations::new();
    for (name, child_schema) in fields {
        match traverse(child_schema, map.get(name), &path.child_key(name.as_str())) {
            Ok(Some(member)) => {
                output.insert(name.clone(), member);
            }
            // Present members keep their presence; absent optional
            // members stay absent.
            Ok(None) => {}
            Err(child) => violations.merge(child),
        }
    }
    // Subject keys not declared in the schema are dropped silently.
    violations.into_result(Some(Value::Object(output)))
}

fn traverse_record(
    schema: &Schema,
    of: &Schema,
    key_schema: Option<&Schema>,
    value: &Value,
    path: &Path,
) -> Result<Option<Value>, Violations> {
    let Value::Object(map) = value else {
        return Err(reject(ErrorCode::InvalidType, schema, Some(value), path));
    };
    let mut output = conform_value::Object::with_capacity(map.len());
    let mut violations = Violations::new();
    for (name, member) in map {
        let member_path = path.child_key(name.as_str());
        if let Some(key_schema) = key_schema {
            let key_value = Value::string(name.clone());
            if let Err(child) = traverse(key_schema, Some(&key_value), &member_path) {
                violations.merge(child);
            }
        }
        match traverse(of, Some(member), &member_path) {
            Ok(Some(member)) => {
                output.insert(name.clone(), member);
            }
            Ok(None) => {}
            Err(child) => violations.merge(child),
        }
    }
    violations.into_result(Some(Value::Object(output)))
}

fn traverse_tuple(
    schema: &Schema,
    of: &[Schema],
    value: &Value,
    path: &Path,
) -> Result<Option<Value>, Violations> {
    let Value::Array(items) = value else {
        return Err(reject(ErrorCode::InvalidType, schema, Some(value), path));
    };
    // Arity is part of the tuple's type; a mismatch is fatal for the
    // subtree and positions are not descended into.
    if items.len() != of.len() {
        return Err(reject(ErrorCode::InvalidType, schema, Some(value), path));
    }
    let mut output = Vec::with_capacity(of.len());
    let mut violations = Violations::new();
    for (index, (slot_schema, item)) in of.iter().zip(items).enumerate() {
        match traverse(slot_schema, Some(item), &path.child_index(index)) {
            Ok(Some(element)) => output.push(element),
            Ok(None) => output.push(Value::Null),
            Err(child) => violations.merge(child),
        }
    }
    violations.into_result(Some(Value::Array(output)))
}

fn traverse_union(
    schema: &Schema,
    alternatives: &[Schema],
    subject: Option<&Value>,
    path: &Path,
) -> Result<Option<Value>, Violations> {
    for alternative in alternatives {
        if let Ok(output) = traverse(alternative, subject, path) {
            return Ok(output);
        }
    }
    // Alternative-internal errors are deliberately discarded; the union
    // reports a single failure at its own path.
    Err(reject(ErrorCode::InvalidType, schema, subject, path))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::builder::{array, boolean, number, object, record, string, union};

    use super::*;

    #[test]
    fn optional_accepts_only_true_absence() {
        let schema: Schema = string().optional().into();
        assert_eq!(validate(&schema, None), Ok(None));
        // Null is an ordinary value here, and a string it is not.
        let violations = validate(&schema, &Value::Null).unwrap_err();
        assert_eq!(violations.first().map(|i| i.code), Some(ErrorCode::InvalidType));
    }

    #[test]
    fn nullable_accepts_null() {
        let schema: Schema = string().nullable().into();
        assert_eq!(validate(&schema, &Value::Null), Ok(Some(Value::Null)));
    }

    #[test]
    fn defaults_are_not_applied() {
        let schema: Schema = number().optional().default_value(3.0).into();
        assert_eq!(validate(&schema, None), Ok(None));
    }

    #[test]
    fn present_values_pass_through() {
        let schema: Schema = boolean().into();
        assert_eq!(
            validate(&schema, &Value::boolean(true)),
            Ok(Some(Value::boolean(true)))
        );
    }

    #[test]
    fn object_requires_map_shape() {
        let schema: Schema = object([("a", string())]).into();
        let violations = validate(&schema, &Value::array([])).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert!(violations.first().unwrap().path.is_root());
    }

    #[test]
    fn null_member_fails_optional_object_field() {
        // The asymmetry with parse mode: a null member is not absence.
        let schema: Schema = object([("a", string().optional())]).into();
        let subject = Value::object([("a", Value::Null)]);
        let violations = validate(&schema, &subject).unwrap_err();
        assert_eq!(violations.first().map(|i| i.path.to_string()), Some("a".into()));
    }

    #[test]
    fn union_resolves_in_declared_order() {
        let schema: Schema = union([number(), number().min(0.0)]).into();
        assert_eq!(
            validate(&schema, &Value::number(-1.0)),
            Ok(Some(Value::number(-1.0)))
        );
    }

    #[test]
    fn union_forwards_absence_to_alternatives() {
        let schema: Schema = union([string().optional()]).into();
        assert_eq!(validate(&schema, None), Ok(None));
        // Null is not absence here; no alternative takes it.
        assert!(validate(&schema, &Value::Null).is_err());
    }

    #[test]
    fn record_rebuilds_all_members() {
        let schema: Schema = record(number()).into();
        let subject = Value::object([("a", Value::number(1.0)), ("b", Value::number(2.0))]);
        assert_eq!(validate(&schema, &subject), Ok(Some(subject.clone())));
    }

    #[test]
    fn guard_is_validate_as_predicate() {
        let schema: Schema = array(string()).into();
        assert!(guard(&schema, &Value::array([Value::from("a")])));
        assert!(!guard(&schema, &Value::from("not an array")));
        assert!(!guard(&schema, None));
    }

    #[test]
    fn validated_output_is_deep_equal_not_aliased() {
        let schema: Schema = array(number()).into();
        let subject = Value::array([Value::number(1.0), Value::number(2.0)]);
        let output = validate(&schema, &subject).unwrap();
        assert_eq!(output, Some(subject));
    }
}
