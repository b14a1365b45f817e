//! Schema validation error types.
//!
//! This module provides [`SchemaError`] for single validation failures and
//! [`SchemaErrors`] for accumulating multiple errors.

use std::fmt::{self, Display};

use serde_json::Value;
use stillwater::prelude::*;

use crate::error::ErrorCode;
use crate::path::JsonPath;

/// A single validation error with full context.
///
/// `SchemaError` captures all relevant information about a validation failure:
/// - **path**: Where in the data structure the error occurred
/// - **value**: The offending value (`None` when it was undefined)
/// - **code**: Machine-readable error code
/// - **message**: Human-readable, localized description of the failure
///
/// # Example
///
/// ```rust
/// use yop::{ErrorCode, JsonPath, SchemaError};
/// use serde_json::json;
///
/// let error = SchemaError::new(
///     JsonPath::root().push_field("email"),
///     ErrorCode::Email,
///     "Invalid email format",
/// )
/// .with_value(json!("not-an-email"));
///
/// assert_eq!(error.code, ErrorCode::Email);
/// assert_eq!(error.path_string().as_deref(), Some("email"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// The path to the value that failed validation.
    pub path: JsonPath,
    /// The value that failed validation, `None` if it was undefined.
    pub value: Option<Value>,
    /// Machine-readable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
}

impl SchemaError {
    /// Creates a new schema error with the given path, code and message.
    pub fn new(path: JsonPath, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            path,
            value: None,
            code,
            message: message.into(),
        }
    }

    /// Sets the offending value and returns self for chaining.
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Returns the path as a string, or `None` for an error on the root value.
    pub fn path_string(&self) -> Option<String> {
        if self.path.is_root() {
            None
        } else {
            Some(self.path.to_string())
        }
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = self.path_string().unwrap_or_else(|| "(root)".to_string());
        write!(f, "{}: {} [{}]", path_str, self.message, self.code)?;

        if let Some(ref value) = self.value {
            write!(f, " (got: {})", value)?;
        }

        Ok(())
    }
}

impl std::error::Error for SchemaError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaError>();
    assert_sync::<SchemaError>();
};

/// A non-empty collection of schema validation errors.
///
/// `SchemaErrors` wraps a `NonEmptyVec<SchemaError>` to guarantee that at least
/// one error is present, which is what a `Validation::Failure` must carry.
/// Errors keep traversal order.
///
/// # Combining Errors
///
/// ```rust
/// use yop::{ErrorCode, JsonPath, SchemaError, SchemaErrors};
/// use stillwater::prelude::*;
///
/// let errors1 = SchemaErrors::single(
///     SchemaError::new(JsonPath::from_field("name"), ErrorCode::Required, "Required field")
/// );
/// let errors2 = SchemaErrors::single(
///     SchemaError::new(JsonPath::from_field("email"), ErrorCode::Email, "Invalid email")
/// );
///
/// let combined = errors1.combine(errors2);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors(NonEmptyVec<SchemaError>);

impl SchemaErrors {
    /// Creates a `SchemaErrors` containing a single error.
    pub fn single(error: SchemaError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `SchemaErrors` from a `NonEmptyVec` of errors.
    pub fn from_non_empty(errors: NonEmptyVec<SchemaError>) -> Self {
        Self(errors)
    }

    /// Creates a `SchemaErrors` from a `Vec<SchemaError>`.
    ///
    /// Returns `None` if the vec is empty.
    pub fn from_vec(errors: Vec<SchemaError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns false since this collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.0.iter()
    }

    /// Returns all errors at the specified path.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns all errors with the specified error code.
    pub fn with_code(&self, code: ErrorCode) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &SchemaError {
        self.0.head()
    }

    /// Converts this collection into a `Vec<SchemaError>`.
    pub fn into_vec(self) -> Vec<SchemaError> {
        self.0.into_vec()
    }

    /// Returns a reference to the underlying `NonEmptyVec`.
    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<SchemaError> {
        &self.0
    }
}

impl Semigroup for SchemaErrors {
    fn combine(self, other: Self) -> Self {
        SchemaErrors(self.0.combine(other.0))
    }
}

impl Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a SchemaErrors {
    type Item = &'a SchemaError;
    type IntoIter = Box<dyn Iterator<Item = &'a SchemaError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaErrors>();
    assert_sync::<SchemaErrors>();
};
