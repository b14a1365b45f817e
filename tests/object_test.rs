//! Integration tests for object schema validation.

use serde_json::json;
use yop::{ErrorCode, SchemaErrors, SchemaLike, ValidationResult, Yop};

fn unwrap_failure(v: ValidationResult<()>) -> SchemaErrors {
    v.into_result().unwrap_err()
}

fn user_schema() -> yop::ObjectSchema {
    Yop::object()
        .field("name", Yop::string().required().min(2))
        .field("email", Yop::string().required().email())
        .field("age", Yop::number().min(18.0))
        .field(
            "address",
            Yop::object()
                .field("city", Yop::string().required())
                .field("zip", Yop::string().matches(r"^\d{5}$").unwrap()),
        )
}

#[test]
fn test_valid_object() {
    let value = json!({
        "name": "Alice",
        "email": "alice@example.com",
        "age": 30,
        "address": {"city": "Paris", "zip": "75001"}
    });
    assert!(user_schema().validate(&value).is_success());
}

#[test]
fn test_errors_accumulate_across_fields() {
    let value = json!({
        "name": "A",
        "email": "nope",
        "age": 12,
        "address": {"zip": "7500"}
    });
    let errors = unwrap_failure(user_schema().validate(&value));

    let found: Vec<(String, ErrorCode)> = errors
        .iter()
        .map(|e| (e.path.to_string(), e.code))
        .collect();
    assert_eq!(
        found,
        vec![
            ("name".to_string(), ErrorCode::Min),
            ("email".to_string(), ErrorCode::Email),
            ("age".to_string(), ErrorCode::Min),
            ("address.city".to_string(), ErrorCode::Required),
            ("address.zip".to_string(), ErrorCode::Matches),
        ]
    );
}

#[test]
fn test_missing_fields_are_undefined() {
    let errors = unwrap_failure(user_schema().validate(&json!({})));
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.value.is_none()));
    assert_eq!(errors.at_path(&"email".parse().unwrap()).len(), 1);
}

#[test]
fn test_nested_path_construction() {
    let schema = Yop::object().field(
        "a",
        Yop::object().field("b", Yop::array(Yop::number().min(1.0))),
    );
    let errors = unwrap_failure(schema.validate(&json!({"a": {"b": [0]}})));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().path_string().as_deref(), Some("a.b[0]"));
    assert_eq!(errors.first().code, "min");
}

#[test]
fn test_not_an_object() {
    let errors = unwrap_failure(user_schema().validate(&json!([1, 2])));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, ErrorCode::Type);
    assert_eq!(errors.first().message, "Must be an object");
}

#[test]
fn test_required_object() {
    let schema = Yop::object().required().field("a", Yop::string().required());
    let errors = unwrap_failure(schema.validate(&json!(null)));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().path_string(), None);
}

#[test]
fn test_cross_field_test_runs_last() {
    let schema = Yop::object()
        .field("password", Yop::string().required().min(8))
        .field("confirm", Yop::string().required())
        .test(|ctx| {
            let value = ctx.value();
            value.and_then(|v| v.get("password")) == value.and_then(|v| v.get("confirm"))
        })
        .error("passwords differ");

    assert!(schema
        .validate(&json!({"password": "secret123", "confirm": "secret123"}))
        .is_success());

    let errors = unwrap_failure(schema.validate(&json!({"password": "secret123", "confirm": "other"})));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().message, "passwords differ");

    let errors = unwrap_failure(schema.validate(&json!({"password": "short", "confirm": "other"})));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, ErrorCode::Min);
}

#[test]
fn test_ignored_bypasses_everything() {
    let schema = user_schema().ignored();
    assert!(schema.validate(&json!({"name": 3})).is_success());
    assert!(schema.validate(&json!("not even an object")).is_success());

    let field = Yop::object().field("secret", Yop::number().required().min(5.0).ignored());
    assert!(field.validate(&json!({"secret": "x"})).is_success());
}

#[test]
fn test_ignored_kind() {
    let schema = Yop::object()
        .field("meta", Yop::ignored())
        .field("id", Yop::number().required());
    assert!(schema.validate(&json!({"id": 1, "meta": [null, {"x": true}]})).is_success());
    assert_eq!(schema.schema_at(&"meta".parse().unwrap()).unwrap().kind().as_str(), "ignored");
}

#[test]
fn test_shared_base_schema() {
    let base = Yop::string().min(2);
    let schema = Yop::object()
        .field("optional", base.clone())
        .field("mandatory", base.required());

    let errors = unwrap_failure(schema.validate(&json!({})));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().path.to_string(), "mandatory");
}
