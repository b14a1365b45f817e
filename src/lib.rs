//! # Yop
//!
//! A schema-based validation engine for JSON data.
//!
//! ## Overview
//!
//! A schema is an immutable tree of nodes, one per position in the value's
//! shape. Each node runs a priority-ordered pipeline of constraints
//! (`ignored`, `required`, type check, bounds, allow-lists, patterns, custom
//! tests) and then validates its children. Constraints, bounds and messages
//! may depend on the validation context (the value, its parent, the root and
//! caller-supplied data), and a node may swap itself for a context-derived
//! variant through [`Schema::when`].
//!
//! ## Core Types
//!
//! - [`Yop`]: Entry point for creating validation schemas
//! - [`SchemaLike`]: The contract every schema node implements
//! - [`JsonPath`]: Paths to values in nested structures (e.g., `users[0].email`)
//! - [`SchemaError`]: A single validation error (path, value, code, message)
//! - [`SchemaErrors`]: A non-empty collection of validation errors
//! - [`ValidationOptions`]: Per-call user context and message locale
//!
//! ## Example
//!
//! ```rust
//! use yop::{ErrorCode, SchemaLike, Yop};
//! use serde_json::json;
//!
//! let schema = Yop::object()
//!     .field("name", Yop::string().required())
//!     .field("age", Yop::number().required_when(|ctx| {
//!         ctx.sibling("name") == Some(&json!("Joe"))
//!     }));
//!
//! assert!(schema.validate(&json!({"name": "Jack"})).is_success());
//!
//! let errors = schema
//!     .validate(&json!({"name": "Joe"}))
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors.first().code, ErrorCode::Required);
//! assert_eq!(errors.first().path_string().as_deref(), Some("age"));
//! ```

pub mod batch;
pub mod constraint;
pub mod error;
pub mod messages;
pub mod path;
pub mod registry;
pub mod schema;
pub mod validation;

pub use batch::validate_batch;
pub use constraint::{Bound, ConstraintKind, Param, TimeOfDay, TimeParseError};
pub use error::{ErrorCode, SchemaError, SchemaErrors};
pub use path::{parent_path, JsonPath, PathError, PathSegment};
pub use registry::{CatalogRegistry, RegistryError};
pub use schema::{
    ArraySchema, BooleanSchema, DateSchema, FileSchema, IgnoredSchema, NumberSchema,
    ObjectSchema, Schema, SchemaKind, SchemaLike, StringSchema, TimeSchema, Yop,
};
pub use validation::{ValidationContext, ValidationOptions};

/// Type alias for validation results using SchemaErrors
pub type ValidationResult<T> = stillwater::Validation<T, SchemaErrors>;
