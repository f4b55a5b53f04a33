//! Coercing traversal: validate, apply defaults, rebuild.
//!
//! Parse mode walks the schema and the subject together, depth-first.
//! It diverges from [`validate`](crate::validate) on exactly one
//! semantic axis: absence. Here an optional schema treats `null` the
//! same as a missing value, and a declared default replaces the absent
//! subject (after being checked against the schema's own constraints).
//!
//! Failure accumulates: once a composite's own container shape is
//! confirmed, every child is visited and all child failures are
//! collected before the subtree reports. Output is always freshly
//! allocated — no container of the result aliases the input.

use conform_value::Value;

use crate::error::{ErrorCode, Invalid, Violations};
use crate::path::Path;
use crate::schema::{Fields, Schema, SchemaKind};
use crate::verify;

/// Checks `subject` against `schema`, applying defaults and treating
/// null as absence for optional schemas.
///
/// `Ok(None)` means the subject was validly absent (optional schema, no
/// default). On failure the returned [`Violations`] lists every problem
/// found, in traversal order.
pub fn parse<'a>(
    schema: &Schema,
    subject: impl Into<Option<&'a Value>>,
) -> Result<Option<Value>, Violations> {
    let subject = subject.into();
    let outcome = traverse(schema, subject, &Path::root());
    match &outcome {
        Ok(_) => tracing::trace!(schema = schema.kind_name(), "parse ok"),
        Err(violations) => tracing::trace!(
            schema = schema.kind_name(),
            violations = violations.len(),
            "parse failed"
        ),
    }
    outcome
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
        // Parse mode: undefined and null are both "absent".
        None | Some(Value::Null) => {
            if schema.optional {
                match &schema.default {
                    Some(fallback) => default_value(schema, fallback, path),
                    None => Ok(None),
                }
            } else if let SchemaKind::Union { of } = &schema.kind {
                // A union is as absence-tolerant as its alternatives:
                // the inner sub-traversal decides.
                traverse_union(schema, of, subject, path)
            } else {
                Err(reject(ErrorCode::InvalidType, schema, subject, path))
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

/// Applies a declared default, checking it against the schema's own
/// constraints first. A failing default is the schema author's bug, not
/// the caller's, and is re-coded accordingly.
fn default_value(
    schema: &Schema,
    fallback: &Value,
    path: &Path,
) -> Result<Option<Value>, Violations> {
    match verify::verify(schema, fallback) {
        Ok(()) => Ok(Some(fallback.clone())),
        Err(code) => Err(reject(
            code.into_schema_default(),
            schema,
            Some(fallback),
            path,
        )),
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
            // Validly-absent elements are dropped from the rebuilt array.
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
            // Optional-and-absent members are omitted, not set to null.
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
            // An optional value schema lets record members opt out
            // individually; absent members are dropped.
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
            // Null keeps the slot occupied so arity survives.
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
