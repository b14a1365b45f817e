//! The generic schema node and its common builders.

use std::sync::Arc;

use serde_json::Value;

use crate::constraint::{Bound, Constraint, ConstraintFilter, ConstraintKind, Constraints, Param, Rule};
use crate::error::SchemaError;
use crate::path::PathSegment;
use crate::validation::ValidationContext;

use super::traits::{Bounded, Kind, SchemaLike};
use super::traversal;
use super::SchemaKind;

/// A conditional transform: derives the schema in effect for a context.
pub type Transform<K> =
    Arc<dyn Fn(&ValidationContext<'_>, &Schema<K>) -> Schema<K> + Send + Sync>;

const TESTS: &[ConstraintKind] = &[ConstraintKind::Test];

// Checks a focused container still runs before descending.
const GUARDS: &[ConstraintKind] = &[
    ConstraintKind::Ignored,
    ConstraintKind::Defined,
    ConstraintKind::Required,
    ConstraintKind::Type,
];

/// A schema node: a [`Kind`] plus a constraint pipeline.
///
/// Every builder method returns a new schema and leaves the receiver
/// untouched, so a schema can be shared and specialized freely.
///
/// Validation runs the node's own constraints in priority order first
/// (custom tests excepted). If they pass, children are validated, and only
/// when the children are valid do the custom tests run.
///
/// # Example
///
/// ```rust
/// use yop::{SchemaLike, Yop};
/// use serde_json::json;
///
/// let base = Yop::string().min(2);
/// let strict = base.required();
///
/// assert!(base.validate(&json!(null)).is_success());
/// assert!(strict.validate(&json!(null)).is_failure());
/// ```
#[derive(Clone)]
pub struct Schema<K> {
    kind: K,
    constraints: Constraints,
    transform: Option<Transform<K>>,
}

impl<K: Kind> Schema<K> {
    pub(crate) fn from_parts(kind: K, constraints: Constraints) -> Self {
        Self {
            kind,
            constraints,
            transform: None,
        }
    }

    pub(crate) fn from_kind(kind: K) -> Self {
        Self::from_parts(kind, Constraints::new())
    }

    /// The constraint pipeline of this node.
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// The type-specific part of this node.
    pub fn kind_data(&self) -> &K {
        &self.kind
    }

    /// Returns true if a conditional transform is attached.
    pub fn is_conditional(&self) -> bool {
        self.transform.is_some()
    }

    pub(crate) fn with_constraint(&self, constraint: Constraint) -> Self {
        let mut next = self.clone();
        next.constraints = self.constraints.with(constraint);
        next
    }

    pub(crate) fn with_constraints(&self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        let mut next = self.clone();
        next.constraints = self.constraints.with_group(constraints);
        next
    }

    pub(crate) fn map_kind(&self, f: impl FnOnce(&mut K)) -> Self {
        let mut next = self.clone();
        f(&mut next.kind);
        next
    }

    /// Rejects null and undefined values.
    pub fn required(&self) -> Self {
        self.with_constraint(Constraint::new(Rule::Required(Param::Static(true))))
    }

    /// Rejects null and undefined values when `condition` holds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use yop::{SchemaLike, Yop};
    /// use serde_json::json;
    ///
    /// let schema = Yop::object()
    ///     .field("kind", Yop::string())
    ///     .field("vat", Yop::string().required_when(|ctx| {
    ///         ctx.sibling("kind") == Some(&json!("company"))
    ///     }));
    ///
    /// assert!(schema.validate(&json!({"kind": "person"})).is_success());
    /// assert!(schema.validate(&json!({"kind": "company"})).is_failure());
    /// ```
    pub fn required_when<F>(&self, condition: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.with_constraint(Constraint::new(Rule::Required(Param::dynamic(condition))))
    }

    /// Rejects undefined values but accepts null.
    pub fn defined(&self) -> Self {
        self.with_constraint(Constraint::new(Rule::Defined(Param::Static(true))))
    }

    /// Rejects undefined values when `condition` holds.
    pub fn defined_when<F>(&self, condition: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.with_constraint(Constraint::new(Rule::Defined(Param::dynamic(condition))))
    }

    /// Drops the required and defined checks.
    pub fn optional(&self) -> Self {
        let mut next = self.clone();
        next.constraints = self
            .constraints
            .without(ConstraintKind::Required)
            .without(ConstraintKind::Defined);
        next
    }

    /// Skips validation of this node and everything below it.
    pub fn ignored(&self) -> Self {
        self.with_constraint(Constraint::new(Rule::Ignored(Param::Static(true))))
    }

    /// Skips validation of this node when `condition` holds.
    pub fn ignored_when<F>(&self, condition: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.with_constraint(Constraint::new(Rule::Ignored(Param::dynamic(condition))))
    }

    /// Restricts values to an allow-list.
    pub fn one_of<I, V>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.with_constraint(Constraint::new(Rule::OneOf(Param::Static(values))))
    }

    /// Restricts values to an allow-list computed from the context.
    pub fn one_of_with<F>(&self, values: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> Vec<Value> + Send + Sync + 'static,
    {
        self.with_constraint(Constraint::new(Rule::OneOf(Param::dynamic(values))))
    }

    /// Replaces all custom tests with `predicate`.
    ///
    /// Custom tests run last, after every other constraint and every child
    /// passed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use yop::{SchemaLike, Yop};
    /// use serde_json::json;
    ///
    /// let even = Yop::number()
    ///     .test(|ctx| ctx.value().and_then(|v| v.as_i64()).map_or(false, |n| n % 2 == 0))
    ///     .error("must be even");
    ///
    /// assert!(even.validate(&json!(4)).is_success());
    /// let errors = even.validate(&json!(3)).into_result().unwrap_err();
    /// assert_eq!(errors.first().message, "must be even");
    /// ```
    pub fn test<F>(&self, predicate: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> bool + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.constraints = self
            .constraints
            .with_only(Constraint::new(Rule::Test(Arc::new(predicate))));
        next
    }

    /// Adds `predicate` to the existing custom tests.
    ///
    /// All tests run together and each failure is reported.
    pub fn and_test<F>(&self, predicate: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.with_constraint(Constraint::new(Rule::Test(Arc::new(predicate))))
    }

    /// Sets the message of the most recently added constraint.
    ///
    /// Before any constraint is added, sets the type error message.
    pub fn error(&self, message: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.constraints = self
            .constraints
            .with_last_message(Param::Static(message.into()));
        next
    }

    /// Like [`error`](Self::error) with a message computed from the context.
    pub fn error_with<F>(&self, message: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> String + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.constraints = self.constraints.with_last_message(Param::dynamic(message));
        next
    }

    /// Removes every constraint of `kind`.
    ///
    /// The type check and any rule the node kind pins (such as the format
    /// check of a time schema) are kept.
    pub fn without(&self, kind: ConstraintKind) -> Self {
        if self.kind.pinned().contains(&kind) {
            return self.clone();
        }
        let mut next = self.clone();
        next.constraints = self.constraints.without(kind);
        next
    }

    /// Attaches a conditional transform.
    ///
    /// At validation time `transform` receives the context and this schema
    /// and returns the schema to apply instead. A later call replaces an
    /// earlier one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use yop::{SchemaLike, Yop};
    /// use serde_json::json;
    ///
    /// let zip = Yop::string().when(|ctx, schema| {
    ///     if ctx.sibling("country") == Some(&json!("FR")) {
    ///         schema.required().length(5)
    ///     } else {
    ///         schema.clone()
    ///     }
    /// });
    /// let schema = Yop::object().field("country", Yop::string()).field("zip", zip);
    ///
    /// assert!(schema.validate(&json!({"country": "US"})).is_success());
    /// assert!(schema.validate(&json!({"country": "FR", "zip": "123"})).is_failure());
    /// ```
    pub fn when<F>(&self, transform: F) -> Self
    where
        F: Fn(&ValidationContext<'_>, &Schema<K>) -> Schema<K> + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.transform = Some(Arc::new(transform));
        next
    }

    /// The schema in effect for `ctx`: transform applied, parameters frozen.
    pub fn resolved(&self, ctx: &ValidationContext<'_>) -> Self {
        let mut schema = match &self.transform {
            Some(transform) => transform(ctx, self),
            None => self.clone(),
        };
        schema.transform = None;
        schema.constraints = schema.constraints.resolve(ctx);
        schema
    }
}

impl<K: Bounded> Schema<K> {
    /// Sets the lower bound.
    pub fn min(&self, min: K::Unit) -> Self {
        self.with_constraint(Constraint::new(Rule::Min(Param::Static(min.into()))))
    }

    /// Sets a lower bound computed from the context.
    pub fn min_with<F>(&self, min: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> K::Unit + Send + Sync + 'static,
    {
        let bound = Param::dynamic(min).map(Into::<Bound>::into);
        self.with_constraint(Constraint::new(Rule::Min(bound)))
    }

    /// Sets the upper bound.
    pub fn max(&self, max: K::Unit) -> Self {
        self.with_constraint(Constraint::new(Rule::Max(Param::Static(max.into()))))
    }

    /// Sets an upper bound computed from the context.
    pub fn max_with<F>(&self, max: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> K::Unit + Send + Sync + 'static,
    {
        let bound = Param::dynamic(max).map(Into::<Bound>::into);
        self.with_constraint(Constraint::new(Rule::Max(bound)))
    }
}

impl<K: Kind> SchemaLike for Schema<K> {
    fn kind(&self) -> SchemaKind {
        self.kind.schema_kind()
    }

    fn resolve(&self, ctx: &ValidationContext<'_>) -> Arc<dyn SchemaLike> {
        Arc::new(self.resolved(ctx))
    }

    fn validate_resolved(&self, ctx: &ValidationContext<'_>) -> Vec<SchemaError> {
        if let Some(focus) = self.kind.focus().filter(|path| !path.is_root()) {
            if let Some(errors) =
                self.constraints
                    .validate_filtered(&self.kind, ctx, ConstraintFilter::Include(GUARDS))
            {
                return errors;
            }
            let mut unfocused = self.clone();
            unfocused.kind.clear_focus();
            return traversal::descend_resolved(&unfocused, ctx, focus.as_slice())
                .unwrap_or_default();
        }

        if let Some(errors) =
            self.constraints
                .validate_filtered(&self.kind, ctx, ConstraintFilter::Exclude(TESTS))
        {
            return errors;
        }

        let errors = self.kind.validate_children(ctx);
        if !errors.is_empty() {
            return errors;
        }

        self.constraints
            .validate_filtered(&self.kind, ctx, ConstraintFilter::Include(TESTS))
            .unwrap_or_default()
    }

    fn child(&self, segment: &PathSegment) -> Option<Arc<dyn SchemaLike>> {
        self.kind.child(segment)
    }

    fn shared(&self) -> Arc<dyn SchemaLike> {
        Arc::new(self.clone())
    }
}
