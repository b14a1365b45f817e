//! Constraints: single prioritized rules evaluated against a context.
//!
//! A [`Constraint`] is one rule (required, type check, min, a custom test,
//! ...) identified by its [`ConstraintKind`]. The kind fixes the rule's
//! priority, whether several instances may coexist, and whether the rule
//! still runs on null values. Constraints are grouped and executed by
//! [`Constraints`](pipeline::Constraints).

mod bound;
pub mod pipeline;

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::{ErrorCode, SchemaError};
use crate::messages::{MessageKey, MessageParams};
use crate::schema::Kind;
use crate::validation::ValidationContext;

pub use bound::{Bound, TimeOfDay, TimeParseError};
pub use pipeline::{ConstraintFilter, Constraints};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email pattern is a valid regex")
});

/// A closure computing a value from the live validation context.
pub type ContextFn<T> = Arc<dyn Fn(&ValidationContext<'_>) -> T + Send + Sync>;

/// A custom predicate over the validation context.
pub type Predicate = ContextFn<bool>;

/// A constraint parameter: a fixed value or a function of the context.
///
/// Dynamic parameters are evaluated once per context when the schema is
/// resolved, and the frozen value is used for the rest of that pass.
#[derive(Clone)]
pub enum Param<T> {
    /// A fixed value.
    Static(T),
    /// A value computed from the context.
    Dynamic(ContextFn<T>),
}

impl<T: Clone + 'static> Param<T> {
    /// Wraps a context function.
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> T + Send + Sync + 'static,
    {
        Param::Dynamic(Arc::new(f))
    }

    /// Returns the value for `ctx`.
    pub fn get(&self, ctx: &ValidationContext<'_>) -> T {
        match self {
            Param::Static(value) => value.clone(),
            Param::Dynamic(f) => f(ctx),
        }
    }

    /// Evaluates a dynamic parameter into a static one.
    pub fn freeze(&self, ctx: &ValidationContext<'_>) -> Self {
        match self {
            Param::Static(_) => self.clone(),
            Param::Dynamic(f) => Param::Static(f(ctx)),
        }
    }

    /// Returns true if the parameter does not depend on the context.
    pub fn is_static(&self) -> bool {
        matches!(self, Param::Static(_))
    }

    pub(crate) fn map<U, F>(self, f: F) -> Param<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        match self {
            Param::Static(value) => Param::Static(f(value)),
            Param::Dynamic(g) => {
                Param::Dynamic(Arc::new(move |ctx: &ValidationContext<'_>| f(g(ctx))))
            }
        }
    }
}

/// Identity of a rule class.
///
/// Used as the slot key in a [`Constraints`] pipeline: adding a rule of a
/// singleton kind replaces the existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Bypasses the whole node when its condition holds.
    Ignored,
    /// Value must not be undefined.
    Defined,
    /// Value must not be null or undefined.
    Required,
    /// Value must have the node's runtime type.
    Type,
    /// Lower bound.
    Min,
    /// Upper bound.
    Max,
    /// Allow-list membership.
    OneOf,
    /// Regular expression match.
    Matches,
    /// Email address format.
    Email,
    /// `HH:MM[:SS]` time format.
    Time,
    /// Custom predicate.
    Test,
}

impl ConstraintKind {
    /// Evaluation order; lower runs first.
    pub fn priority(self) -> u32 {
        match self {
            ConstraintKind::Ignored => 0,
            ConstraintKind::Defined => 1,
            ConstraintKind::Required => 2,
            ConstraintKind::Type => 3,
            ConstraintKind::Min => 10,
            ConstraintKind::Max => 11,
            ConstraintKind::OneOf => 12,
            ConstraintKind::Matches | ConstraintKind::Email | ConstraintKind::Time => 13,
            ConstraintKind::Test => 100,
        }
    }

    /// Whether several constraints of this kind may coexist in one pipeline.
    pub fn multiple(self) -> bool {
        matches!(self, ConstraintKind::Test)
    }

    /// Whether the constraint runs when the value is null-ish.
    pub fn accepts_null(self) -> bool {
        matches!(
            self,
            ConstraintKind::Ignored | ConstraintKind::Defined | ConstraintKind::Required
        )
    }
}

#[derive(Clone)]
pub(crate) enum Rule {
    Ignored(Param<bool>),
    Defined(Param<bool>),
    Required(Param<bool>),
    Type,
    Min(Param<Bound>),
    Max(Param<Bound>),
    OneOf(Param<Vec<Value>>),
    Matches(Regex),
    Email,
    Time,
    Test(Predicate),
}

/// One rule plus its optional custom message.
#[derive(Clone)]
pub struct Constraint {
    rule: Rule,
    message: Option<Param<String>>,
}

impl Constraint {
    pub(crate) fn new(rule: Rule) -> Self {
        Self {
            rule,
            message: None,
        }
    }

    /// The rule class of this constraint.
    pub fn kind(&self) -> ConstraintKind {
        match self.rule {
            Rule::Ignored(_) => ConstraintKind::Ignored,
            Rule::Defined(_) => ConstraintKind::Defined,
            Rule::Required(_) => ConstraintKind::Required,
            Rule::Type => ConstraintKind::Type,
            Rule::Min(_) => ConstraintKind::Min,
            Rule::Max(_) => ConstraintKind::Max,
            Rule::OneOf(_) => ConstraintKind::OneOf,
            Rule::Matches(_) => ConstraintKind::Matches,
            Rule::Email => ConstraintKind::Email,
            Rule::Time => ConstraintKind::Time,
            Rule::Test(_) => ConstraintKind::Test,
        }
    }

    /// True if a custom message replaces the catalog message.
    pub fn has_message(&self) -> bool {
        self.message.is_some()
    }

    pub(crate) fn with_message(mut self, message: Param<String>) -> Self {
        self.message = Some(message);
        self
    }

    /// Freezes every dynamic parameter and message against `ctx`.
    pub(crate) fn resolve(&self, ctx: &ValidationContext<'_>) -> Self {
        let rule = match &self.rule {
            Rule::Ignored(condition) => Rule::Ignored(condition.freeze(ctx)),
            Rule::Defined(condition) => Rule::Defined(condition.freeze(ctx)),
            Rule::Required(condition) => Rule::Required(condition.freeze(ctx)),
            Rule::Min(bound) => Rule::Min(bound.freeze(ctx)),
            Rule::Max(bound) => Rule::Max(bound.freeze(ctx)),
            Rule::OneOf(values) => Rule::OneOf(values.freeze(ctx)),
            other => other.clone(),
        };
        Self {
            rule,
            message: self.message.as_ref().map(|m| m.freeze(ctx)),
        }
    }

    /// Evaluates the constraint.
    ///
    /// `None` means the rule does not apply and the pipeline continues.
    /// `Some(vec![])` approves the value and stops the pipeline; a non-empty
    /// vec holds the errors found and also stops it.
    pub(crate) fn evaluate<K: Kind>(
        &self,
        kind: &K,
        ctx: &ValidationContext<'_>,
    ) -> Option<Vec<SchemaError>> {
        let value = ctx.value();
        match &self.rule {
            Rule::Ignored(condition) => condition.get(ctx).then(Vec::new),
            Rule::Defined(condition) => (condition.get(ctx) && value.is_none())
                .then(|| self.fail(kind, ctx, ErrorCode::Required, MessageParams::default())),
            Rule::Required(condition) => (condition.get(ctx) && kind.is_null(value))
                .then(|| self.fail(kind, ctx, ErrorCode::Required, MessageParams::default())),
            Rule::Type => {
                let value = value?;
                (!kind.is_type(value))
                    .then(|| self.fail(kind, ctx, ErrorCode::Type, MessageParams::default()))
            }
            Rule::Min(bound) => {
                let measured = kind.measure(value?)?;
                let min = bound.get(ctx);
                (measured < min).then(|| {
                    let params = MessageParams {
                        min: Some(min),
                        ..Default::default()
                    };
                    self.fail(kind, ctx, ErrorCode::Min, params)
                })
            }
            Rule::Max(bound) => {
                let measured = kind.measure(value?)?;
                let max = bound.get(ctx);
                (measured > max).then(|| {
                    let params = MessageParams {
                        max: Some(max),
                        ..Default::default()
                    };
                    self.fail(kind, ctx, ErrorCode::Max, params)
                })
            }
            Rule::OneOf(values) => {
                let value = value?;
                let allowed = values.get(ctx);
                let listed = allowed.iter().any(|candidate| kind.same_value(value, candidate));
                (!listed).then(|| {
                    let params = MessageParams {
                        one_of: Some(allowed),
                        ..Default::default()
                    };
                    self.fail(kind, ctx, ErrorCode::OneOf, params)
                })
            }
            Rule::Matches(regex) => {
                let text = value?.as_str()?;
                (!regex.is_match(text))
                    .then(|| self.fail(kind, ctx, ErrorCode::Matches, MessageParams::default()))
            }
            Rule::Email => {
                let text = value?.as_str()?;
                (!EMAIL_PATTERN.is_match(text))
                    .then(|| self.fail(kind, ctx, ErrorCode::Email, MessageParams::default()))
            }
            Rule::Time => {
                let text = value?.as_str()?;
                TimeOfDay::parse(text)
                    .is_err()
                    .then(|| self.fail(kind, ctx, ErrorCode::Time, MessageParams::default()))
            }
            Rule::Test(predicate) => (!predicate(ctx))
                .then(|| self.fail(kind, ctx, ErrorCode::Test, MessageParams::default())),
        }
    }

    fn fail<K: Kind>(
        &self,
        kind: &K,
        ctx: &ValidationContext<'_>,
        code: ErrorCode,
        mut params: MessageParams,
    ) -> Vec<SchemaError> {
        params.value = ctx.value().cloned();
        let message = match &self.message {
            Some(message) => message.get(ctx),
            None => ctx.message(
                &MessageKey {
                    kind: kind.schema_kind(),
                    variant: kind.variant(),
                    code,
                },
                &params,
            ),
        };

        let error = SchemaError::new(ctx.path().clone(), code, message);
        vec![match params.value {
            Some(value) => error.with_value(value),
            None => error,
        }]
    }
}
