//! Array schema validation.
//!
//! This module provides [`ArraySchema`] for validating arrays whose elements
//! all follow one shared element schema, with element-count bounds.

use std::sync::Arc;

use serde_json::Value;

use crate::constraint::Bound;
use crate::error::SchemaError;
use crate::path::PathSegment;
use crate::validation::ValidationContext;

use super::node::Schema;
use super::traits::{Bounded, Kind, SchemaLike};
use super::SchemaKind;

/// Kind data of an array schema: the shared element schema.
#[derive(Clone)]
pub struct ArrayKind {
    elements: Arc<dyn SchemaLike>,
}

impl ArrayKind {
    /// The schema every element is validated against.
    pub fn elements(&self) -> &Arc<dyn SchemaLike> {
        &self.elements
    }
}

impl Kind for ArrayKind {
    fn schema_kind(&self) -> SchemaKind {
        SchemaKind::Array
    }

    fn is_type(&self, value: &Value) -> bool {
        value.is_array()
    }

    fn measure(&self, value: &Value) -> Option<Bound> {
        value.as_array().map(|items| Bound::Length(items.len()))
    }

    fn validate_children(&self, ctx: &ValidationContext<'_>) -> Vec<SchemaError> {
        let Some(items) = ctx.value().and_then(Value::as_array) else {
            return Vec::new();
        };

        (0..items.len())
            .flat_map(|index| {
                self.elements
                    .validate_in_context(&ctx.child(PathSegment::Index(index)))
            })
            .collect()
    }

    fn child(&self, segment: &PathSegment) -> Option<Arc<dyn SchemaLike>> {
        match segment {
            PathSegment::Index(_) => Some(Arc::clone(&self.elements)),
            PathSegment::Field(_) => None,
        }
    }
}

impl Bounded for ArrayKind {
    type Unit = usize;
}

/// A schema for validating arrays.
///
/// Every element is validated against the element schema and all element
/// errors are reported. `min`/`max` bound the element count. Custom tests
/// on the array run only once every element is valid.
///
/// # Example
///
/// ```rust
/// use yop::{SchemaLike, Yop};
/// use serde_json::json;
///
/// let schema = Yop::array(Yop::number().min(1.0)).min(1);
///
/// assert!(schema.validate(&json!([1, 2])).is_success());
/// assert!(schema.validate(&json!([])).is_failure());
///
/// let errors = schema.validate(&json!([0, 5, -1])).into_result().unwrap_err();
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors.first().path.to_string(), "[0]");
/// ```
pub type ArraySchema = Schema<ArrayKind>;

impl Schema<ArrayKind> {
    /// Creates an array schema with the given element schema.
    pub fn new<S>(elements: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        Self::of_shared(Arc::new(elements))
    }

    /// Creates an array schema around an already shared element schema.
    pub fn of_shared(elements: Arc<dyn SchemaLike>) -> Self {
        Self::from_kind(ArrayKind { elements })
    }

    /// Rejects empty arrays.
    pub fn non_empty(&self) -> Self {
        self.min(1)
    }
}
