//! Integration tests for focus_on, validate_at, schema_at and resolved_schema_at.

use serde_json::json;
use yop::{
    ErrorCode, JsonPath, SchemaErrors, SchemaKind, SchemaLike, ValidationOptions,
    ValidationResult, Yop,
};

fn unwrap_failure(v: ValidationResult<()>) -> SchemaErrors {
    v.into_result().unwrap_err()
}

fn path(s: &str) -> JsonPath {
    JsonPath::parse(s).unwrap()
}

fn family() -> yop::ObjectSchema {
    Yop::object()
        .field("name", Yop::string().required())
        .field(
            "children",
            Yop::array(
                Yop::object()
                    .field("name", Yop::string().required())
                    .field("age", Yop::number().min(1.0)),
            ),
        )
}

#[test]
fn test_focus_on_reports_only_focused_errors() {
    let schema = Yop::object()
        .field("children", Yop::array(Yop::number().min(1.0)))
        .focus_on(path("children[0]"));

    let errors = unwrap_failure(schema.validate(&json!({"children": [0, 0, 0]})));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().path.to_string(), "children[0]");

    assert!(schema.validate(&json!({"children": [1, 0, 0]})).is_success());
}

#[test]
fn test_focus_skips_unrelated_fields() {
    let schema = family().focus_on(path("children[1].name"));
    let value = json!({"children": [{"age": 0}, {"age": 3}]});

    let errors = unwrap_failure(schema.validate(&value));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().path.to_string(), "children[1].name");
    assert_eq!(errors.first().code, ErrorCode::Required);
}

#[test]
fn test_focused_container_can_be_ignored() {
    let schema = Yop::object()
        .field("a", Yop::number().min(5.0))
        .ignored()
        .focus_on(path("a"));
    assert!(schema.validate(&json!({"a": 1})).is_success());

    let schema = Yop::object()
        .field("skip", Yop::boolean())
        .field("a", Yop::number().min(5.0))
        .ignored_when(|ctx| {
            ctx.value().and_then(|v| v.get("skip")) == Some(&json!(true))
        })
        .focus_on(path("a"));
    assert!(schema.validate(&json!({"skip": true, "a": 1})).is_success());

    let errors = unwrap_failure(schema.validate(&json!({"skip": false, "a": 1})));
    assert_eq!(errors.first().code, ErrorCode::Min);
    assert_eq!(errors.first().path.to_string(), "a");
}

#[test]
fn test_focused_container_checks_its_own_type() {
    let schema = Yop::object()
        .field("a", Yop::number().required())
        .focus_on(path("a"));

    let errors = unwrap_failure(schema.validate(&json!("not an object")));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, ErrorCode::Type);
    assert!(errors.first().path.is_root());
}

#[test]
fn test_focused_container_checks_presence() {
    let schema = Yop::object()
        .field("a", Yop::number().min(5.0))
        .required()
        .focus_on(path("a"));

    let errors = unwrap_failure(schema.validate_with(None, &ValidationOptions::default()));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, ErrorCode::Required);
    assert!(errors.first().path.is_root());

    // a present container still only reports the focused field
    let errors = unwrap_failure(schema.validate(&json!({"a": 1})));
    assert_eq!(errors.first().path.to_string(), "a");
}

#[test]
fn test_validate_at() {
    let schema = family();
    let value = json!({"children": [{"name": "Ann", "age": 0}, {"age": 5}]});

    let errors = unwrap_failure(schema.validate_at(&path("children[0]"), &value).unwrap());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().path.to_string(), "children[0].age");

    assert!(schema
        .validate_at(&path("children[1].age"), &value)
        .unwrap()
        .is_success());

    let errors = unwrap_failure(schema.validate_at(&path("name"), &value).unwrap());
    assert_eq!(errors.first().path.to_string(), "name");
}

#[test]
fn test_validate_at_unknown_path() {
    let schema = family();
    let value = json!({});
    assert!(schema.validate_at(&path("nope"), &value).is_none());
    assert!(schema.validate_at(&path("children.name"), &value).is_none());
    assert!(schema.validate_at(&path("name.first"), &value).is_none());

    // known schema, no data: exists but passes
    let result = schema.validate_at(&path("children[9].age"), &value);
    assert!(result.unwrap().is_success());
}

#[test]
fn test_validate_at_resolves_conditions_on_the_way() {
    let schema = Yop::object()
        .field("country", Yop::string())
        .field(
            "address",
            Yop::object().field("zip", Yop::string()).when(|ctx, schema| {
                if ctx.sibling("country") == Some(&json!("FR")) {
                    schema.field("zip", Yop::string().required())
                } else {
                    schema.clone()
                }
            }),
        );

    let value = json!({"country": "FR", "address": {}});
    let errors = unwrap_failure(schema.validate_at(&path("address.zip"), &value).unwrap());
    assert_eq!(errors.first().code, ErrorCode::Required);
    assert_eq!(errors.first().path.to_string(), "address.zip");

    let value = json!({"country": "US", "address": {}});
    assert!(schema.validate_at(&path("address.zip"), &value).unwrap().is_success());
}

#[test]
fn test_schema_at() {
    let schema = family();
    assert_eq!(schema.schema_at(&JsonPath::root()).unwrap().kind(), SchemaKind::Object);
    assert_eq!(schema.schema_at(&path("children")).unwrap().kind(), SchemaKind::Array);
    assert_eq!(
        schema.schema_at(&path("children[0].age")).unwrap().kind(),
        SchemaKind::Number
    );
    assert!(schema.schema_at(&path("children[0].nope")).is_none());
    assert!(schema.schema_at(&path("name[0]")).is_none());
}

#[test]
fn test_resolved_schema_at_applies_transforms() {
    let schema = Yop::object()
        .field("flag", Yop::boolean())
        .field(
            "value",
            Yop::string().when(|ctx, schema| {
                if ctx.sibling("flag") == Some(&json!(true)) {
                    schema.required()
                } else {
                    schema.clone()
                }
            }),
        );

    let options = ValidationOptions::default();
    let value = json!({"flag": true});
    let node = schema
        .resolved_schema_at(&path("value"), Some(&value), &options)
        .unwrap();
    assert_eq!(node.kind(), SchemaKind::String);

    let catalog = options.catalog();
    let ctx = yop::ValidationContext::root(None, None, catalog.as_ref());
    assert_eq!(node.validate_resolved(&ctx).len(), 1);

    let static_node = schema.schema_at(&path("value")).unwrap();
    assert!(static_node.validate_in_context(&ctx).is_empty());
}
