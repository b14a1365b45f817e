//! Schema definitions for validation.
//!
//! This module provides the schema node types. Every node couples a
//! type-specific [`Kind`] with a priority-ordered constraint pipeline, and
//! every builder call returns a new node, so schemas are immutable values
//! that can be shared and specialized freely.
//!
//! # Example
//!
//! ```rust
//! use yop::{SchemaLike, Yop};
//! use serde_json::json;
//!
//! let schema = Yop::object()
//!     .field("a", Yop::object().field("b", Yop::array(Yop::number().min(1.0))));
//!
//! let errors = schema
//!     .validate(&json!({"a": {"b": [0]}}))
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(errors.first().path.to_string(), "a.b[0]");
//! assert_eq!(errors.first().code.as_str(), "min");
//! ```

mod array;
mod date;
mod file;
mod ignored;
mod node;
mod numeric;
mod object;
mod string;
mod traits;
mod traversal;

use std::fmt::{self, Display};

pub use array::{ArrayKind, ArraySchema};
pub use date::{parse_date, DateKind, DateSchema};
pub use file::{FileKind, FileSchema};
pub use ignored::IgnoredSchema;
pub use node::{Schema, Transform};
pub use numeric::{BooleanKind, BooleanSchema, NumberKind, NumberSchema};
pub use object::{ObjectKind, ObjectSchema};
pub use string::{StringKind, StringSchema, TimeKind, TimeSchema};
pub use traits::{Bounded, Kind, SchemaLike};

/// The node type of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// Strings.
    String,
    /// `HH:MM[:SS]` strings.
    Time,
    /// Numbers.
    Number,
    /// Booleans.
    Boolean,
    /// Date strings.
    Date,
    /// File descriptors.
    File,
    /// Arrays.
    Array,
    /// Objects.
    Object,
    /// Always valid.
    Ignored,
}

impl SchemaKind {
    /// Returns the lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Time => "time",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Date => "date",
            SchemaKind::File => "file",
            SchemaKind::Array => "array",
            SchemaKind::Object => "object",
            SchemaKind::Ignored => "ignored",
        }
    }
}

impl Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry point for creating validation schemas.
///
/// `Yop` provides one factory method per schema kind. Each returned schema
/// only checks the value's type until constraints are added through its
/// builder methods; null and undefined values pass unless `required()` or
/// `defined()` is set.
///
/// # Example
///
/// ```rust
/// use yop::{SchemaLike, Yop};
/// use serde_json::json;
///
/// let user = Yop::object()
///     .field("email", Yop::string().required().email())
///     .field("age", Yop::number().min(18.0))
///     .field("tags", Yop::array(Yop::string()).max(3));
///
/// assert!(user.validate(&json!({"email": "a@b.io", "age": 20})).is_success());
/// ```
pub struct Yop;

impl Yop {
    /// Creates a string schema.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a time-of-day schema.
    pub fn time() -> TimeSchema {
        TimeSchema::new()
    }

    /// Creates a number schema.
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    /// Creates a boolean schema.
    pub fn boolean() -> BooleanSchema {
        BooleanSchema::new()
    }

    /// Creates a date schema.
    pub fn date() -> DateSchema {
        DateSchema::new()
    }

    /// Creates a file schema.
    pub fn file() -> FileSchema {
        FileSchema::new()
    }

    /// Creates an array schema whose elements follow `elements`.
    pub fn array<S>(elements: S) -> ArraySchema
    where
        S: SchemaLike + 'static,
    {
        ArraySchema::new(elements)
    }

    /// Creates an object schema with no properties.
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Creates a schema that accepts everything.
    pub fn ignored() -> IgnoredSchema {
        IgnoredSchema
    }
}
