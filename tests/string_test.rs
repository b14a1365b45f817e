//! Integration tests for string and time schema validation.

use serde_json::json;
use yop::{ConstraintKind, ErrorCode, SchemaErrors, SchemaLike, TimeOfDay, ValidationResult, Yop};

/// Helper to extract the error value from a Validation
fn unwrap_failure(v: ValidationResult<()>) -> SchemaErrors {
    v.into_result().unwrap_err()
}

#[test]
fn test_string_factory_checks_type() {
    let schema = Yop::string();
    assert!(schema.validate(&json!("test")).is_success());

    let errors = unwrap_failure(schema.validate(&json!(42)));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, "type");
    assert_eq!(errors.first().message, "Must be a string");
    assert_eq!(errors.first().value, Some(json!(42)));
    assert_eq!(errors.first().path_string(), None);
}

#[test]
fn test_min_rejects_short_strings() {
    let schema = Yop::string().min(5);

    assert!(schema.validate(&json!("abcde")).is_success());

    let errors = unwrap_failure(schema.validate(&json!("abcd")));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, "min");
    assert_eq!(errors.first().message, "Minimum 5 characters");
}

#[test]
fn test_max_rejects_long_strings() {
    let schema = Yop::string().max(10);

    assert!(schema.validate(&json!("1234567890")).is_success());

    let errors = unwrap_failure(schema.validate(&json!("12345678901")));
    assert_eq!(errors.first().code, ErrorCode::Max);
    assert_eq!(errors.first().message, "Maximum 10 characters");
}

#[test]
fn test_min_replaced_not_stacked() {
    let schema = Yop::string().min(10).min(2);
    assert!(schema.validate(&json!("abc")).is_success());
}

#[test]
fn test_length_is_exact() {
    let schema = Yop::string().length(3);
    assert!(schema.validate(&json!("abc")).is_success());
    assert_eq!(unwrap_failure(schema.validate(&json!("ab"))).first().code, ErrorCode::Min);
    assert_eq!(unwrap_failure(schema.validate(&json!("abcd"))).first().code, ErrorCode::Max);
}

#[test]
fn test_type_mismatch_never_reports_bounds() {
    let schema = Yop::string().min(5).max(1);
    let errors = unwrap_failure(schema.validate(&json!(["a"])));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, ErrorCode::Type);
}

#[test]
fn test_null_and_empty_are_absent() {
    let schema = Yop::string().min(3).email();
    assert!(schema.validate(&json!(null)).is_success());
    assert!(schema.validate(&json!("")).is_success());

    let required = schema.required();
    for value in [json!(null), json!("")] {
        let errors = unwrap_failure(required.validate(&value));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().code, ErrorCode::Required);
        assert_eq!(errors.first().message, "Required field");
    }
}

#[test]
fn test_allow_empty_string() {
    let schema = Yop::string().required().allow_empty();
    assert!(schema.validate(&json!("")).is_success());
    assert!(schema.validate(&json!(null)).is_failure());
}

#[test]
fn test_matches() {
    let schema = Yop::string().matches(r"^[A-Z]{2}\d{3}$").unwrap();
    assert!(schema.validate(&json!("AB123")).is_success());

    let errors = unwrap_failure(schema.validate(&json!("ab123")));
    assert_eq!(errors.first().code, ErrorCode::Matches);
    assert_eq!(errors.first().message, "Invalid format");
}

#[test]
fn test_invalid_regex_is_an_error() {
    assert!(Yop::string().matches(r"([a-z]").is_err());
}

#[test]
fn test_email() {
    let schema = Yop::string().email();
    assert!(schema.validate(&json!("jane@example.com")).is_success());

    let errors = unwrap_failure(schema.validate(&json!("jane@")));
    assert_eq!(errors.first().code, "email");
    assert_eq!(errors.first().message, "Invalid email format");
}

#[test]
fn test_bounds_run_before_patterns() {
    let schema = Yop::string().email().min(50);
    let errors = unwrap_failure(schema.validate(&json!("bad")));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, ErrorCode::Min);
}

#[test]
fn test_one_of_strings() {
    let schema = Yop::string().one_of(["red", "green", "blue"]);
    assert!(schema.validate(&json!("green")).is_success());

    let errors = unwrap_failure(schema.validate(&json!("pink")));
    assert_eq!(errors.first().code, ErrorCode::OneOf);
    assert_eq!(errors.first().message, "Must be one of: red, green, blue");
}

#[test]
fn test_custom_error_message_targets_last_constraint() {
    let schema = Yop::string()
        .min(3)
        .error("too short")
        .max(5)
        .error("too long");

    assert_eq!(unwrap_failure(schema.validate(&json!("ab"))).first().message, "too short");
    assert_eq!(unwrap_failure(schema.validate(&json!("abcdef"))).first().message, "too long");
    assert_eq!(unwrap_failure(schema.validate(&json!(1))).first().message, "Must be a string");
}

#[test]
fn test_dynamic_message() {
    let schema = Yop::string().min(3).error_with(|ctx| {
        format!("'{}' is too short", ctx.value().and_then(|v| v.as_str()).unwrap_or(""))
    });
    let errors = unwrap_failure(schema.validate(&json!("ab")));
    assert_eq!(errors.first().message, "'ab' is too short");
}

#[test]
fn test_time_format_and_bounds() {
    let schema = Yop::time()
        .min(TimeOfDay::parse("08:00").unwrap())
        .max(TimeOfDay::parse("18:00").unwrap());

    assert!(schema.validate(&json!("08:00")).is_success());
    assert!(schema.validate(&json!("12:30:15")).is_success());

    let errors = unwrap_failure(schema.validate(&json!("07:59:59")));
    assert_eq!(errors.first().code, ErrorCode::Min);
    assert_eq!(errors.first().message, "Must be after or equal to 08:00");

    for bad in ["8:00", "24:00", "12:60", "noon"] {
        let errors = unwrap_failure(schema.validate(&json!(bad)));
        assert_eq!(errors.len(), 1, "{}", bad);
        assert_eq!(errors.first().code, ErrorCode::Time, "{}", bad);
    }
}

#[test]
fn test_time_requires_ascii_digits() {
    let schema = Yop::time();
    assert!(schema.validate(&json!("12:34")).is_success());

    let errors = unwrap_failure(schema.validate(&json!("١٢:٣٤")));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, ErrorCode::Time);
}

#[test]
fn test_length_message_covers_both_bounds() {
    let schema = Yop::string().length(5).error("five characters please");
    for text in ["abc", "abcdefg"] {
        let errors = unwrap_failure(schema.validate(&json!(text)));
        assert_eq!(errors.first().message, "five characters please", "{}", text);
    }
    assert!(schema.validate(&json!("abcde")).is_success());
}

#[test]
fn test_time_format_check_cannot_be_removed() {
    let schema = Yop::time().without(ConstraintKind::Time);
    assert!(schema.constraints().contains(ConstraintKind::Time));
    assert_eq!(unwrap_failure(schema.validate(&json!("noon"))).first().code, ErrorCode::Time);

    let schema = Yop::string().time().without(ConstraintKind::Time);
    assert!(schema.validate(&json!("noon")).is_failure());
}

#[test]
fn test_string_to_time_conversion() {
    let schema = Yop::string().required().time();
    assert!(schema.validate(&json!("23:59")).is_success());
    assert_eq!(unwrap_failure(schema.validate(&json!(""))).first().code, ErrorCode::Required);
    assert_eq!(unwrap_failure(schema.validate(&json!("23h59"))).first().code, ErrorCode::Time);
}
