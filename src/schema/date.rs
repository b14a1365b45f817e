//! Date schemas.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::constraint::Bound;

use super::node::Schema;
use super::traits::{Bounded, Kind};
use super::SchemaKind;

/// Parses the date formats accepted in JSON input.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS` (taken as UTC), and
/// plain `YYYY-MM-DD` dates (midnight UTC).
///
/// # Example
///
/// ```rust
/// use yop::schema::parse_date;
///
/// assert!(parse_date("2024-02-29").is_some());
/// assert!(parse_date("2024-02-30").is_none());
/// assert!(parse_date("2024-02-29T10:00:00+02:00").is_some());
/// ```
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    let day = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0)?))
}

/// Kind data of a date schema.
#[derive(Debug, Clone, Default)]
pub struct DateKind;

impl Kind for DateKind {
    fn schema_kind(&self) -> SchemaKind {
        SchemaKind::Date
    }

    fn is_type(&self, value: &Value) -> bool {
        value.as_str().and_then(parse_date).is_some()
    }

    fn measure(&self, value: &Value) -> Option<Bound> {
        value.as_str().and_then(parse_date).map(Bound::Date)
    }
}

impl Bounded for DateKind {
    type Unit = DateTime<Utc>;
}

/// A schema for date strings.
///
/// Strings that do not parse as a date fail the type check.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use yop::{SchemaLike, Yop};
/// use serde_json::json;
///
/// let schema = Yop::date().min(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
///
/// assert!(schema.validate(&json!("2024-06-01")).is_success());
/// assert!(schema.validate(&json!("2023-12-31")).is_failure());
/// assert!(schema.validate(&json!("yesterday")).is_failure());
/// ```
pub type DateSchema = Schema<DateKind>;

impl Schema<DateKind> {
    /// Creates a date schema.
    pub fn new() -> Self {
        Self::from_kind(DateKind)
    }
}

impl Default for Schema<DateKind> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats_agree() {
        let a = parse_date("2024-05-01").unwrap();
        let b = parse_date("2024-05-01T00:00:00").unwrap();
        let c = parse_date("2024-05-01T02:00:00+02:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_date("").is_none());
        assert!(parse_date("01/05/2024").is_none());
        assert!(!DateKind.is_type(&Value::from(20240501)));
    }
}
