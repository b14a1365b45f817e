//! Number and boolean schemas.
//!
//! This module provides [`NumberSchema`] for validating numbers against
//! bounds and allow-lists, and the unbounded [`BooleanSchema`].

use serde_json::Value;

use crate::constraint::Bound;

use super::node::Schema;
use super::traits::{Bounded, Kind};
use super::SchemaKind;

/// Kind data of a number schema.
#[derive(Debug, Clone, Default)]
pub struct NumberKind;

impl Kind for NumberKind {
    fn schema_kind(&self) -> SchemaKind {
        SchemaKind::Number
    }

    fn is_type(&self, value: &Value) -> bool {
        value.is_number()
    }

    fn measure(&self, value: &Value) -> Option<Bound> {
        value.as_f64().map(Bound::Number)
    }

    // 2 and 2.0 are the same number
    fn same_value(&self, value: &Value, candidate: &Value) -> bool {
        match (value.as_f64(), candidate.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => value == candidate,
        }
    }
}

impl Bounded for NumberKind {
    type Unit = f64;
}

/// A schema for validating numbers.
///
/// Integers and floats are both accepted; bounds compare as `f64`.
///
/// # Example
///
/// ```rust
/// use yop::{SchemaLike, Yop};
/// use serde_json::json;
///
/// let schema = Yop::number().min(0.0).max(100.0);
///
/// assert!(schema.validate(&json!(42)).is_success());
/// assert!(schema.validate(&json!(-50)).is_failure());
/// assert!(schema.validate(&json!("42")).is_failure());
/// ```
pub type NumberSchema = Schema<NumberKind>;

impl Schema<NumberKind> {
    /// Creates a number schema.
    pub fn new() -> Self {
        Self::from_kind(NumberKind)
    }

    /// Requires a value strictly greater than zero.
    pub fn positive(&self) -> Self {
        self.and_test(|ctx| ctx.value().and_then(Value::as_f64).map_or(true, |n| n > 0.0))
    }

    /// Requires an integral value.
    pub fn integer(&self) -> Self {
        self.and_test(|ctx| {
            ctx.value()
                .and_then(Value::as_f64)
                .map_or(true, |n| n.fract() == 0.0)
        })
    }
}

impl Default for Schema<NumberKind> {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind data of a boolean schema.
#[derive(Debug, Clone, Default)]
pub struct BooleanKind;

impl Kind for BooleanKind {
    fn schema_kind(&self) -> SchemaKind {
        SchemaKind::Boolean
    }

    fn is_type(&self, value: &Value) -> bool {
        value.is_boolean()
    }
}

/// A schema for validating booleans.
pub type BooleanSchema = Schema<BooleanKind>;

impl Schema<BooleanKind> {
    /// Creates a boolean schema.
    pub fn new() -> Self {
        Self::from_kind(BooleanKind)
    }
}

impl Default for Schema<BooleanKind> {
    fn default() -> Self {
        Self::new()
    }
}
