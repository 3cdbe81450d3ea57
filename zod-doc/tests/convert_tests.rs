//! Integration tests for the conversion engine.

use serde_json::{json, Value};

use zod_doc::schema::z::{self, SchemaExt};
use zod_doc::schema::{DefaultValue, EnumValue, Primitive, Schema, SchemaKind, SchemaRef};
use zod_doc::{convert_schemas, ConvertError, ExportedSchema, ModelKind};

fn to_json(exports: &[ExportedSchema]) -> Value {
    serde_json::to_value(convert_schemas(exports).unwrap()).unwrap()
}

// =============================================================================
// End-to-end
// =============================================================================

#[test]
fn test_user_example() {
    let user = z::object()
        .field("id", z::string().uuid())
        .field("age", z::number().min(0.0).optional())
        .field("tags", z::array(z::string()).max(5));

    let exports = vec![ExportedSchema::new("User", "models.ts", user)];

    assert_eq!(
        to_json(&exports),
        json!([{
            "name": "User",
            "path": "models.ts",
            "type": "object",
            "fields": [
                {
                    "key": "id",
                    "required": true,
                    "kind": "model",
                    "model": { "type": "string", "validations": ["uuid"] }
                },
                {
                    "key": "age",
                    "required": false,
                    "kind": "model",
                    "model": { "type": "number", "validations": [["gte", 0]] }
                },
                {
                    "key": "tags",
                    "required": true,
                    "kind": "model",
                    "model": {
                        "type": "array",
                        "items": { "kind": "model", "model": { "type": "string" } },
                        "validations": [["max", 5]]
                    }
                }
            ]
        }])
    );
}

#[test]
fn test_output_order_follows_input() {
    let exports = vec![
        ExportedSchema::new("C", "c.ts", z::boolean()),
        ExportedSchema::new("A", "a.ts", z::date()),
        ExportedSchema::anonymous("b.ts", z::never()),
    ];
    let models = convert_schemas(&exports).unwrap();
    let paths: Vec<_> = models.iter().map(|model| model.path.as_str()).collect();
    assert_eq!(paths, ["c.ts", "a.ts", "b.ts"]);
}

// =============================================================================
// References
// =============================================================================

#[test]
fn test_ref_substitution() {
    let address: SchemaRef = z::object()
        .field("street", z::string())
        .field("city", z::string())
        .into();
    let user = z::object()
        .field("home", address.clone())
        .field("work", address.clone().optional());

    let exports = vec![
        ExportedSchema::new("Address", "address.ts", address),
        ExportedSchema::new("User", "user.ts", user),
    ];
    let json = to_json(&exports);

    assert_eq!(
        json[1]["fields"],
        json!([
            {
                "key": "home",
                "required": true,
                "kind": "ref",
                "ref": { "name": "Address", "path": "address.ts" }
            },
            {
                "key": "work",
                "required": false,
                "kind": "ref",
                "ref": { "name": "Address", "path": "address.ts" }
            }
        ])
    );
}

#[test]
fn test_ref_in_union_keeps_optional_meta() {
    let id: SchemaRef = z::string().uuid().into();
    let lookup = z::union([id.clone().optional(), z::number().int().into()]);

    let exports = vec![
        ExportedSchema::new("Id", "ids.ts", id),
        ExportedSchema::new("Lookup", "ids.ts", lookup),
    ];
    let json = to_json(&exports);

    assert_eq!(
        json[1]["options"][0],
        json!({ "kind": "ref", "ref": { "name": "Id", "path": "ids.ts", "optional": true } })
    );
    assert_eq!(
        json[1]["options"][1],
        json!({ "kind": "model", "model": { "type": "number", "validations": ["int"] } })
    );
    assert_eq!(json[1]["optional"], true);
}

#[test]
fn test_anonymous_export_ref_has_no_name() {
    let config: SchemaRef = z::record(z::string(), z::unknown());
    let exports = vec![
        ExportedSchema::anonymous("config.ts", config.clone()),
        ExportedSchema::new("App", "app.ts", z::object().field("config", config)),
    ];
    let json = to_json(&exports);
    assert_eq!(
        json[1]["fields"][0]["ref"],
        json!({ "path": "config.ts" })
    );
}

#[test]
fn test_described_alias_collapses_to_ref() {
    let email: SchemaRef = z::string().email().into();
    let contact = z::object()
        .field("primary", email.clone().describe("Primary address"))
        .field("backup", email.clone().describe("Backup address").nullable());

    let exports = vec![
        ExportedSchema::new("Email", "email.ts", email),
        ExportedSchema::new("Contact", "contact.ts", contact),
    ];
    let json = to_json(&exports);

    assert_eq!(
        json[1]["fields"][0],
        json!({
            "key": "primary",
            "required": true,
            "kind": "ref",
            "ref": { "name": "Email", "path": "email.ts", "description": "Primary address" }
        })
    );
    assert_eq!(
        json[1]["fields"][1]["ref"],
        json!({
            "name": "Email",
            "path": "email.ts",
            "description": "Backup address",
            "nullable": true
        })
    );
}

#[test]
fn test_independent_copy_is_inlined() {
    let email: SchemaRef = z::string().email().into();
    let exports = vec![
        ExportedSchema::new("Email", "email.ts", email),
        ExportedSchema::new(
            "Contact",
            "contact.ts",
            z::object().field("email", z::string().email()),
        ),
    ];
    let json = to_json(&exports);
    assert_eq!(json[1]["fields"][0]["kind"], "model");
}

#[test]
fn test_plain_leaf_is_not_captured_by_a_described_export() {
    let exports = vec![
        ExportedSchema::new("Name", "a.ts", z::string().describe("A person's name")),
        ExportedSchema::new("User", "a.ts", z::object().field("nickname", z::string())),
    ];
    assert_eq!(
        to_json(&exports)[1]["fields"][0],
        json!({ "key": "nickname", "required": true, "kind": "model", "model": { "type": "string" } })
    );
}

#[test]
fn test_described_leaf_is_not_captured_by_an_equal_export() {
    let exports = vec![
        ExportedSchema::new("Count", "a.ts", z::number().int()),
        ExportedSchema::new(
            "Person",
            "a.ts",
            z::object().field("age", z::number().int().describe("Age in years")),
        ),
    ];
    assert_eq!(
        to_json(&exports)[1]["fields"][0],
        json!({
            "key": "age",
            "required": true,
            "kind": "model",
            "model": { "type": "number", "validations": ["int"], "description": "Age in years" }
        })
    );
}

#[test]
fn test_optional_field_keeps_description() {
    let schema = z::object().field("name", z::string().describe("Display name").optional());
    let exports = vec![ExportedSchema::new("Profile", "p.ts", schema)];
    assert_eq!(
        to_json(&exports)[0]["fields"][0],
        json!({
            "key": "name",
            "required": false,
            "kind": "model",
            "model": { "type": "string", "description": "Display name" }
        })
    );
}

// =============================================================================
// Validations
// =============================================================================

#[test]
fn test_trim_only_string_has_no_validations() {
    let exports = vec![ExportedSchema::new("Name", "a.ts", z::string().trim())];
    assert_eq!(to_json(&exports), json!([{ "name": "Name", "path": "a.ts", "type": "string" }]));
}

#[test]
fn test_string_validation_shapes() {
    let schema = z::string()
        .min(1)
        .max(10)
        .to_lower_case()
        .regex("^[a-z]+$")
        .starts_with("a")
        .datetime(true, Some(3))
        .ip(None);
    let exports = vec![ExportedSchema::new("S", "s.ts", schema)];
    assert_eq!(
        to_json(&exports)[0]["validations"],
        json!([
            ["min", 1],
            ["max", 10],
            ["regex", "^[a-z]+$"],
            ["startsWith", "a"],
            ["datetime", { "offset": true, "precision": 3 }],
            ["ip", {}]
        ])
    );
}

#[test]
fn test_number_and_bigint_bounds() {
    let exports = vec![
        ExportedSchema::new("N", "n.ts", z::number().gt(0.0).lte(1.5).multiple_of(0.5).finite()),
        ExportedSchema::new("B", "b.ts", z::bigint().gte(-10).lt(10)),
    ];
    let json = to_json(&exports);
    assert_eq!(
        json[0]["validations"],
        json!([["gt", 0], ["lte", 1.5], ["multipleOf", 0.5], "finite"])
    );
    assert_eq!(json[1]["type"], "bigint");
    assert_eq!(json[1]["validations"], json!([["gte", -10], ["lt", 10]]));
}

#[test]
fn test_array_length_validations() {
    let exports = vec![ExportedSchema::new(
        "Pair",
        "p.ts",
        z::array(z::number()).min(1).max(4).length(2),
    )];
    assert_eq!(
        to_json(&exports)[0]["validations"],
        json!([["min", 1], ["max", 4], ["length", 2]])
    );
}

// =============================================================================
// Modifiers & meta
// =============================================================================

#[test]
fn test_default_and_readonly() {
    let settings = z::object()
        .field("theme", z::enumeration(["light", "dark"]).default_value(json!("light")))
        .field("tags", z::array(z::string()).readonly());

    let exports = vec![ExportedSchema::new("Settings", "s.ts", settings)];
    let json = to_json(&exports);

    assert_eq!(
        json[0]["fields"][0],
        json!({
            "key": "theme",
            "required": false,
            "kind": "model",
            "model": { "type": "enum", "values": ["light", "dark"], "default": "light" }
        })
    );
    assert_eq!(
        json[0]["fields"][1]["model"],
        json!({
            "type": "array",
            "items": { "kind": "model", "model": { "type": "string" } },
            "readonly": true
        })
    );
}

#[test]
fn test_default_resolver_is_invoked_per_conversion() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let schema = z::number().default_with(DefaultValue::new(move || {
        json!(counter.fetch_add(1, Ordering::SeqCst))
    }));
    let exports = vec![ExportedSchema::new("Counter", "c.ts", schema)];

    assert_eq!(to_json(&exports)[0]["default"], 0);
    assert_eq!(to_json(&exports)[0]["default"], 1);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_field_meta_never_carries_optional() {
    let schema = z::object()
        .field("a", z::string().optional())
        .field("b", z::any())
        .field("c", z::string().nullish().describe("C"))
        .field("d", z::undefined());
    let exports = vec![ExportedSchema::new("O", "o.ts", schema)];
    let models = convert_schemas(&exports).unwrap();

    let ModelKind::Object { fields } = &models[0].model.kind else {
        panic!("expected object");
    };
    for field in fields {
        assert!(!field.required, "{} should not be required", field.key);
        assert!(!field.target.meta().optional, "{} carries optional", field.key);
    }
    assert!(fields[1].target.meta().nullable);
    assert_eq!(fields[2].target.meta().description.as_deref(), Some("C"));
}

#[test]
fn test_wrappers_are_peeled() {
    let schema = z::string()
        .max(3)
        .brand()
        .transform()
        .pipe(z::number().int())
        .readonly();
    let exports = vec![ExportedSchema::new("P", "p.ts", schema)];
    assert_eq!(
        to_json(&exports),
        json!([{
            "name": "P",
            "path": "p.ts",
            "type": "number",
            "validations": ["int"],
            "readonly": true
        }])
    );
}

// =============================================================================
// Composite shapes
// =============================================================================

#[test]
fn test_composite_shapes() {
    let exports = vec![
        ExportedSchema::new(
            "Fn",
            "f.ts",
            z::function([z::string()], z::promise(z::void())),
        ),
        ExportedSchema::new(
            "Tuple",
            "t.ts",
            z::tuple_with_rest([z::boolean()], z::null()),
        ),
        ExportedSchema::new("Both", "i.ts", z::intersection(z::symbol(), z::date())),
        ExportedSchema::new(
            "Direction",
            "d.ts",
            z::native_enum([
                ("Up", EnumValue::Number(0.0)),
                ("Down", EnumValue::String("down".to_string())),
            ]),
        ),
        ExportedSchema::new("Yes", "y.ts", z::literal(Primitive::Boolean(true))),
    ];
    let json = to_json(&exports);

    assert_eq!(
        json[0],
        json!({
            "name": "Fn",
            "path": "f.ts",
            "type": "function",
            "parameters": [{ "kind": "model", "model": { "type": "string" } }],
            "returnValue": {
                "kind": "model",
                "model": {
                    "type": "promise",
                    "resolvedValue": { "kind": "model", "model": { "type": "void", "optional": true } }
                }
            }
        })
    );
    assert_eq!(
        json[1]["rest"],
        json!({ "kind": "model", "model": { "type": "null", "nullable": true } })
    );
    assert_eq!(json[2]["parts"][0]["model"]["type"], "symbol");
    assert_eq!(json[2]["parts"][1]["model"]["type"], "date");
    assert_eq!(json[3]["enum"], json!({ "Up": 0, "Down": "down" }));
    assert_eq!(json[4]["value"], true);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_unknown_variant_fails_the_pass() {
    let lazy = SchemaRef::new(Schema::new(SchemaKind::Unrecognized {
        type_name: Some("ZodLazy".to_string()),
    }));
    let exports = vec![
        ExportedSchema::new("Fine", "fine.ts", z::string()),
        ExportedSchema::new("Tree", "tree.ts", z::array(lazy)),
    ];

    let err = convert_schemas(&exports).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Zod type ZodLazy is not supported (in export 'tree.ts')"
    );
    assert!(matches!(err, ConvertError::UnsupportedSchemaKind { .. }));
}
