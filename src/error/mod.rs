//! Error types for validation failures.
//!
//! This module provides types for representing validation errors with their
//! path, offending value, error code and rendered message.

mod code;
mod schema_error;

pub use code::ErrorCode;
pub use schema_error::{SchemaError, SchemaErrors};
