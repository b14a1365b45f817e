//! The ignored schema.

use std::sync::Arc;

use crate::error::SchemaError;
use crate::path::PathSegment;
use crate::validation::ValidationContext;

use super::traits::SchemaLike;
use super::SchemaKind;

/// A schema that accepts every value, including everything below it.
///
/// It has no builder methods, so it cannot be customized.
///
/// # Example
///
/// ```rust
/// use yop::{SchemaLike, Yop};
/// use serde_json::json;
///
/// let schema = Yop::object().field("legacy", Yop::ignored());
/// assert!(schema.validate(&json!({"legacy": {"any": ["thing"]}})).is_success());
/// ```
#[derive(Debug, Default)]
pub struct IgnoredSchema;

impl SchemaLike for IgnoredSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Ignored
    }

    fn resolve(&self, _ctx: &ValidationContext<'_>) -> Arc<dyn SchemaLike> {
        Arc::new(IgnoredSchema)
    }

    fn validate_resolved(&self, _ctx: &ValidationContext<'_>) -> Vec<SchemaError> {
        Vec::new()
    }

    fn child(&self, _segment: &PathSegment) -> Option<Arc<dyn SchemaLike>> {
        None
    }

    fn shared(&self) -> Arc<dyn SchemaLike> {
        Arc::new(IgnoredSchema)
    }
}
