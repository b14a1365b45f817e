//! Machine-readable error codes.

use std::fmt::{self, Display};

/// The taxonomy of data-validation failures.
///
/// Every [`SchemaError`](crate::SchemaError) carries exactly one code. The
/// string form (see [`ErrorCode::as_str`]) is also the key used by message
/// catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Value is null/undefined where disallowed.
    Required,
    /// Value's runtime type or shape does not match the schema kind.
    Type,
    /// Lower bound violation (length, magnitude, count, date, size or time).
    Min,
    /// Upper bound violation.
    Max,
    /// Value absent from an explicit allow-list.
    OneOf,
    /// String does not match a regular expression.
    Matches,
    /// String is not an email address.
    Email,
    /// String is not a `HH:MM[:SS]` time.
    Time,
    /// Custom predicate failure.
    Test,
}

impl ErrorCode {
    /// Returns the canonical string code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Required => "required",
            ErrorCode::Type => "type",
            ErrorCode::Min => "min",
            ErrorCode::Max => "max",
            ErrorCode::OneOf => "oneOf",
            ErrorCode::Matches => "matches",
            ErrorCode::Email => "email",
            ErrorCode::Time => "time",
            ErrorCode::Test => "test",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<&str> for ErrorCode {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
