//! Traits for schema polymorphism.
//!
//! This module provides the [`SchemaLike`] trait implemented by every schema
//! node, and the [`Kind`] trait describing what distinguishes one node type
//! from another (type check, measurement, children).

use std::sync::Arc;

use serde_json::Value;

use crate::constraint::{Bound, ConstraintKind};
use crate::error::SchemaError;
use crate::path::{JsonPath, PathSegment};
use crate::validation::{collect_errors, ValidationContext, ValidationOptions};
use crate::ValidationResult;

use super::traversal;
use super::SchemaKind;

/// A schema node that can validate JSON values.
///
/// `SchemaLike` is object safe so nodes of different kinds can be composed
/// as `Arc<dyn SchemaLike>` children of arrays and objects. The `Send + Sync`
/// bounds allow a schema to be shared across threads.
///
/// Implementors provide the five required methods; validation entry points
/// and path navigation are built on top of them.
///
/// # Example
///
/// ```rust
/// use yop::{JsonPath, SchemaLike, Yop};
/// use serde_json::json;
///
/// let schema = Yop::object()
///     .field("name", Yop::string().required())
///     .field("tags", Yop::array(Yop::string().min(2)));
///
/// let value = json!({"name": "Joe", "tags": ["ok", "x"]});
/// let errors = schema.validate(&value).into_result().unwrap_err();
/// assert_eq!(errors.first().path.to_string(), "tags[1]");
///
/// let tags = JsonPath::parse("tags[0]").unwrap();
/// assert!(schema.validate_at(&tags, &value).unwrap().is_success());
/// ```
pub trait SchemaLike: Send + Sync {
    /// The node type.
    fn kind(&self) -> SchemaKind;

    /// Applies any conditional transform for `ctx` and freezes every
    /// context-dependent parameter.
    ///
    /// The returned node carries no transform, so resolving it again yields
    /// an equivalent node.
    fn resolve(&self, ctx: &ValidationContext<'_>) -> Arc<dyn SchemaLike>;

    /// Validates `ctx`'s value against an already-resolved node.
    fn validate_resolved(&self, ctx: &ValidationContext<'_>) -> Vec<SchemaError>;

    /// The schema of the child addressed by `segment`, if this node has one.
    fn child(&self, segment: &PathSegment) -> Option<Arc<dyn SchemaLike>>;

    /// Returns a shared handle to this node.
    fn shared(&self) -> Arc<dyn SchemaLike>;

    /// Resolves the node for `ctx`, then validates.
    fn validate_in_context(&self, ctx: &ValidationContext<'_>) -> Vec<SchemaError> {
        self.resolve(ctx).validate_resolved(ctx)
    }

    /// Validates a value with default options.
    fn validate(&self, value: &Value) -> ValidationResult<()> {
        self.validate_with(Some(value), &ValidationOptions::default())
    }

    /// Validates a possibly undefined value with `options`.
    fn validate_with(
        &self,
        value: Option<&Value>,
        options: &ValidationOptions<'_>,
    ) -> ValidationResult<()> {
        let catalog = options.catalog();
        let ctx = ValidationContext::root(value, options.user_context(), catalog.as_ref());
        let errors = self.validate_in_context(&ctx);
        tracing::debug!(
            kind = %self.kind(),
            locale = %ctx.locale(),
            errors = errors.len(),
            "validated value"
        );
        collect_errors(errors)
    }

    /// Validates only the value at `path` against the schema governing it.
    ///
    /// Conditional transforms along the way see their real contexts, and
    /// reported paths are absolute. Returns `None` if the schema has no node
    /// for `path`.
    fn validate_at(&self, path: &JsonPath, value: &Value) -> Option<ValidationResult<()>> {
        self.validate_at_with(path, Some(value), &ValidationOptions::default())
    }

    /// [`validate_at`](Self::validate_at) with explicit options.
    fn validate_at_with(
        &self,
        path: &JsonPath,
        value: Option<&Value>,
        options: &ValidationOptions<'_>,
    ) -> Option<ValidationResult<()>> {
        let catalog = options.catalog();
        let ctx = ValidationContext::root(value, options.user_context(), catalog.as_ref());
        let errors = traversal::descend(self, &ctx, path.as_slice())?;
        tracing::debug!(path = %path, errors = errors.len(), "validated value at path");
        Some(collect_errors(errors))
    }

    /// The statically declared node at `path`.
    ///
    /// Conditional transforms are not applied. Returns `None` if `path`
    /// leaves the schema.
    fn schema_at(&self, path: &JsonPath) -> Option<Arc<dyn SchemaLike>> {
        path.segments()
            .try_fold(self.shared(), |node, segment| node.child(segment))
    }

    /// The node at `path` as resolved against `value`.
    ///
    /// Every node along the way is resolved with its real context, so
    /// conditional transforms are reflected in the result.
    fn resolved_schema_at(
        &self,
        path: &JsonPath,
        value: Option<&Value>,
        options: &ValidationOptions<'_>,
    ) -> Option<Arc<dyn SchemaLike>> {
        let catalog = options.catalog();
        let mut ctx = ValidationContext::root(value, options.user_context(), catalog.as_ref());
        let mut node = self.resolve(&ctx);
        for segment in path.segments() {
            let child = node.child(segment)?;
            ctx = ctx.child(segment.clone());
            node = child.resolve(&ctx);
        }
        Some(node)
    }
}

/// The type-specific half of a schema node.
///
/// A [`Schema`](super::Schema) pairs a `Kind` with a constraint pipeline.
/// The kind decides what counts as the right type, how values are measured
/// for bounds, what counts as null, and how children are validated.
pub trait Kind: Clone + Send + Sync + 'static {
    /// The node type tag.
    fn schema_kind(&self) -> SchemaKind;

    /// A refinement used to pick messages, such as `email` for strings.
    fn variant(&self) -> Option<&'static str> {
        None
    }

    /// Returns true if `value` has this kind's runtime type.
    fn is_type(&self, value: &Value) -> bool;

    /// Measures a value for `min`/`max`, `None` if it has no measure.
    fn measure(&self, _value: &Value) -> Option<Bound> {
        None
    }

    /// Returns true if `value` counts as absent.
    fn is_null(&self, value: Option<&Value>) -> bool {
        value.map_or(true, Value::is_null)
    }

    /// Constraint kinds that cannot be removed from nodes of this kind.
    fn pinned(&self) -> &'static [ConstraintKind] {
        &[]
    }

    /// Returns true if `value` matches the allow-list entry `candidate`.
    fn same_value(&self, value: &Value, candidate: &Value) -> bool {
        value == candidate
    }

    /// Validates the children of `ctx`'s value.
    fn validate_children(&self, _ctx: &ValidationContext<'_>) -> Vec<SchemaError> {
        Vec::new()
    }

    /// The schema of the child addressed by `segment`.
    fn child(&self, _segment: &PathSegment) -> Option<Arc<dyn SchemaLike>> {
        None
    }

    /// A sub-path validation is restricted to.
    fn focus(&self) -> Option<&JsonPath> {
        None
    }

    /// Removes any focus.
    fn clear_focus(&mut self) {}
}

/// A kind whose values can be bounded with `min` and `max`.
pub trait Bounded: Kind {
    /// The type bounds are expressed in.
    type Unit: Into<Bound> + Clone + Send + Sync + 'static;
}
