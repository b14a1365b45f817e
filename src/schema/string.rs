//! String and time-of-day schemas.
//!
//! This module provides [`StringSchema`] for validating string values with
//! length bounds, regex patterns and the email format, and [`TimeSchema`]
//! for `HH:MM[:SS]` strings bounded by time of day.

use regex::Regex;
use serde_json::Value;

use crate::constraint::{Bound, Constraint, ConstraintKind, Param, Rule, TimeOfDay};

use super::node::Schema;
use super::traits::{Bounded, Kind};
use super::SchemaKind;

/// Kind data of a string schema.
#[derive(Debug, Clone, Default)]
pub struct StringKind {
    variant: Option<&'static str>,
    allow_empty: bool,
}

impl Kind for StringKind {
    fn schema_kind(&self) -> SchemaKind {
        SchemaKind::String
    }

    fn variant(&self) -> Option<&'static str> {
        self.variant
    }

    fn is_type(&self, value: &Value) -> bool {
        value.is_string()
    }

    fn measure(&self, value: &Value) -> Option<Bound> {
        value.as_str().map(|s| Bound::Length(s.chars().count()))
    }

    fn is_null(&self, value: Option<&Value>) -> bool {
        match value {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty() && !self.allow_empty,
            Some(_) => false,
        }
    }
}

impl Bounded for StringKind {
    type Unit = usize;
}

/// A schema for validating string values.
///
/// The empty string counts as null unless [`allow_empty`](Self::allow_empty)
/// is set, so `required()` rejects it and bounds are not checked against it.
/// Length bounds count Unicode scalar values.
///
/// # Example
///
/// ```rust
/// use yop::{SchemaLike, Yop};
/// use serde_json::json;
///
/// let schema = Yop::string().required().min(3).max(20);
///
/// assert!(schema.validate(&json!("hello")).is_success());
/// assert!(schema.validate(&json!("hi")).is_failure());
/// assert!(schema.validate(&json!("")).is_failure());
/// ```
pub type StringSchema = Schema<StringKind>;

impl Schema<StringKind> {
    /// Creates a string schema with no constraints besides the type check.
    pub fn new() -> Self {
        Self::from_kind(StringKind::default())
    }

    /// Requires exactly `length` characters.
    ///
    /// Adds a min and a max bound; a following [`error`](Schema::error)
    /// sets the message of both.
    pub fn length(&self, length: usize) -> Self {
        let bound = Bound::Length(length);
        self.with_constraints([
            Constraint::new(Rule::Min(Param::Static(bound.clone()))),
            Constraint::new(Rule::Max(Param::Static(bound))),
        ])
    }

    /// Requires a match of the regex `pattern`.
    ///
    /// Returns an error if the pattern is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use yop::{SchemaLike, Yop};
    /// use serde_json::json;
    ///
    /// let schema = Yop::string().matches(r"^\d+$").unwrap();
    ///
    /// assert!(schema.validate(&json!("12345")).is_success());
    /// assert!(schema.validate(&json!("abc")).is_failure());
    /// ```
    pub fn matches(&self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        Ok(self.matches_regex(regex))
    }

    /// Requires a match of an already compiled regex.
    pub fn matches_regex(&self, regex: Regex) -> Self {
        self.with_constraint(Constraint::new(Rule::Matches(regex)))
    }

    /// Requires an email address and selects the email messages.
    pub fn email(&self) -> Self {
        self.with_constraint(Constraint::new(Rule::Email))
            .map_kind(|kind| kind.variant = Some("email"))
    }

    /// Treats the empty string as a value rather than as null.
    pub fn allow_empty(&self) -> Self {
        self.map_kind(|kind| kind.allow_empty = true)
    }

    /// Converts to a time-of-day schema.
    ///
    /// Presence, allow-list, pattern and custom-test constraints carry
    /// over. Length bounds, the email check and any conditional transform
    /// are dropped.
    pub fn time(&self) -> TimeSchema {
        let constraints = self
            .constraints()
            .without(ConstraintKind::Min)
            .without(ConstraintKind::Max)
            .without(ConstraintKind::Email)
            .with(Constraint::new(Rule::Time));
        let kind = TimeKind {
            allow_empty: self.kind_data().allow_empty,
        };
        Schema::from_parts(kind, constraints)
    }
}

impl Default for Schema<StringKind> {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind data of a time-of-day schema.
#[derive(Debug, Clone, Default)]
pub struct TimeKind {
    allow_empty: bool,
}

impl Kind for TimeKind {
    fn schema_kind(&self) -> SchemaKind {
        SchemaKind::Time
    }

    fn is_type(&self, value: &Value) -> bool {
        value.is_string()
    }

    fn measure(&self, value: &Value) -> Option<Bound> {
        let time = TimeOfDay::parse(value.as_str()?).ok()?;
        Some(Bound::Time(time))
    }

    fn is_null(&self, value: Option<&Value>) -> bool {
        match value {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty() && !self.allow_empty,
            Some(_) => false,
        }
    }

    fn pinned(&self) -> &'static [ConstraintKind] {
        &[ConstraintKind::Time]
    }
}

impl Bounded for TimeKind {
    type Unit = TimeOfDay;
}

/// A schema for `HH:MM` or `HH:MM:SS` strings.
///
/// Bounds are times of day. A malformed time is reported with the `time`
/// error code; bounds are not checked against it.
///
/// # Example
///
/// ```rust
/// use yop::{SchemaLike, TimeOfDay, Yop};
/// use serde_json::json;
///
/// let opening = Yop::time().min(TimeOfDay::parse("08:00").unwrap());
///
/// assert!(opening.validate(&json!("09:30")).is_success());
/// assert!(opening.validate(&json!("07:59")).is_failure());
/// assert!(opening.validate(&json!("9h30")).is_failure());
/// ```
pub type TimeSchema = Schema<TimeKind>;

impl Schema<TimeKind> {
    /// Creates a time schema.
    pub fn new() -> Self {
        Self::from_parts(
            TimeKind::default(),
            crate::constraint::Constraints::new().with(Constraint::new(Rule::Time)),
        )
    }
}

impl Default for Schema<TimeKind> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaLike;
    use crate::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_length_counts_chars() {
        let schema = StringSchema::new().max(3);
        assert!(schema.validate(&json!("héé")).is_success());
        assert!(schema.validate(&json!("héé!")).is_failure());
    }

    #[test]
    fn test_empty_string_is_null() {
        let kind = StringKind::default();
        assert!(kind.is_null(Some(&json!(""))));
        assert!(!StringSchema::new().allow_empty().kind_data().is_null(Some(&json!(""))));
    }

    #[test]
    fn test_allow_empty_keeps_bounds() {
        let schema = StringSchema::new().allow_empty().min(1);
        let errors = schema.validate(&json!("")).into_result().unwrap_err();
        assert_eq!(errors.first().code, ErrorCode::Min);
    }

    #[test]
    fn test_email_variant() {
        let schema = StringSchema::new().email();
        assert_eq!(schema.kind_data().variant(), Some("email"));
        let errors = schema.validate(&json!("nope")).into_result().unwrap_err();
        assert_eq!(errors.first().code, ErrorCode::Email);
    }

    #[test]
    fn test_time_conversion_drops_length_bounds() {
        let time = StringSchema::new().required().min(10).time();
        assert!(time.constraints().contains(ConstraintKind::Required));
        assert!(time.constraints().contains(ConstraintKind::Time));
        assert!(!time.constraints().contains(ConstraintKind::Min));
        assert!(time.validate(&json!("12:00")).is_success());
    }

    #[test]
    fn test_malformed_time_reports_time_code() {
        let schema = TimeSchema::new().max(TimeOfDay::new(18, 0, 0).unwrap());
        let errors = schema.validate(&json!("25:00")).into_result().unwrap_err();
        assert_eq!(errors.first().code, ErrorCode::Time);
        let errors = schema.validate(&json!("18:30")).into_result().unwrap_err();
        assert_eq!(errors.first().code, ErrorCode::Max);
    }
}
