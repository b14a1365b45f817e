//! Path-directed descent through a schema tree.

use crate::error::SchemaError;
use crate::path::PathSegment;
use crate::validation::ValidationContext;

use super::SchemaLike;

/// Resolves `node` for `ctx`, then follows `segments` down to the target
/// node and validates the value there.
///
/// Returns `None` if a segment has no matching child schema.
pub(crate) fn descend<S>(
    node: &S,
    ctx: &ValidationContext<'_>,
    segments: &[PathSegment],
) -> Option<Vec<SchemaError>>
where
    S: SchemaLike + ?Sized,
{
    let resolved = node.resolve(ctx);
    descend_resolved(resolved.as_ref(), ctx, segments)
}

/// Like [`descend`] for a node already resolved against `ctx`.
pub(crate) fn descend_resolved<S>(
    node: &S,
    ctx: &ValidationContext<'_>,
    segments: &[PathSegment],
) -> Option<Vec<SchemaError>>
where
    S: SchemaLike + ?Sized,
{
    match segments.split_first() {
        None => Some(node.validate_resolved(ctx)),
        Some((segment, rest)) => {
            let child = node.child(segment)?;
            let child_ctx = ctx.child(segment.clone());
            descend(child.as_ref(), &child_ctx, rest)
        }
    }
}
