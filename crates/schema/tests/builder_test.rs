//! Builder-layer behavior: fluent chains, mutation-by-copy, the
//! set-at-most-once guards, and the declarative wire shape of built
//! schemas.

use pretty_assertions::assert_eq;
use serde_json::json;

use conform_schema::prelude::*;

#[test]
fn chain_builds_the_expected_wire_shape() {
    let schema: Schema = string()
        .min_length(1)
        .max_length(64)
        .optional()
        .description("display name")
        .into();

    assert_eq!(
        serde_json::to_value(&schema).unwrap(),
        json!({
            "type": "string",
            "minLength": 1,
            "maxLength": 64,
            "optional": true,
            "description": "display name",
        })
    );
}

#[test]
fn composite_wire_shape_nests_declaratively() {
    let schema: Schema = object([
        ("kind", Schema::from(literal("point"))),
        ("coords", Schema::from(tuple([number(), number()]))),
    ])
    .into();

    assert_eq!(
        serde_json::to_value(&schema).unwrap(),
        json!({
            "type": "object",
            "of": {
                "kind": { "type": "literal", "of": { "String": "point" } },
                "coords": {
                    "type": "tuple",
                    "of": [
                        { "type": "number", "min": null, "max": null },
                        { "type": "number", "min": null, "max": null },
                    ],
                },
            },
        })
    );
}

#[test]
fn deserialized_schema_validates_like_the_built_one() {
    let built: Schema = object([("n", number().min(0.0))]).into();
    let wire = serde_json::to_string(&built).unwrap();
    let loaded: Schema = serde_json::from_str(&wire).unwrap();

    let good = Value::object([("n", Value::from(1.0))]);
    let bad = Value::object([("n", Value::from(-1.0))]);
    assert_eq!(built.guard(&good), loaded.guard(&good));
    assert_eq!(built.guard(&bad), loaded.guard(&bad));
}

#[test]
fn brand_round_trips_but_changes_nothing_at_runtime() {
    let branded: Schema = bigint().brand("entity", "user-id").into();
    let wire = serde_json::to_value(&branded).unwrap();
    assert_eq!(wire["brand"], json!({ "key": "entity", "value": "user-id" }));

    let plain: Schema = bigint().into();
    let subject = Value::bigint(42);
    assert_eq!(plain.parse(&subject), branded.parse(&subject));
}

#[test]
fn builders_never_mutate_earlier_links() {
    let base = number().min(0.0);
    let capped = base.clone().max(5.0);

    let loose: Schema = base.into();
    let strict: Schema = capped.into();

    let seven = Value::number(7.0);
    assert!(loose.guard(&seven));
    assert!(!strict.guard(&seven));
}

#[test]
fn record_key_constraint_is_chainable() {
    let ids = record(boolean()).key(string().min_length(3));
    assert!(ids.guard(&Value::object([("abc", Value::boolean(true))])));
    assert!(!ids.guard(&Value::object([("ab", Value::boolean(true))])));
}

#[test]
fn default_requires_optional_first() {
    // The happy path: optional before default.
    let schema: Schema = number().optional().default_value(1.5).into();
    assert_eq!(schema.parse(None), Ok(Some(Value::number(1.5))));
}

#[test]
#[should_panic(expected = "default requires optional")]
fn default_before_optional_panics() {
    let _ = number().default_value(1.5);
}

#[test]
#[should_panic(expected = "nullable is already set")]
fn repeated_nullable_panics() {
    let _ = boolean().nullable().nullable();
}

#[test]
#[should_panic(expected = "brand is already set")]
fn repeated_brand_panics() {
    let _ = string().brand("a", "b").brand("c", "d");
}

#[test]
#[should_panic(expected = "max is already set")]
fn repeated_numeric_bound_panics() {
    let _ = number().max(1.0).max(2.0);
}

#[test]
#[should_panic(expected = "alternatives must be non-empty")]
fn empty_union_panics() {
    let _ = union(Vec::<Schema>::new());
}

#[test]
#[should_panic(expected = "members must be non-empty")]
fn empty_number_union_panics() {
    let _ = number_union([]);
}
