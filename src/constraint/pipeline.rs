//! Ordered constraint pipelines.
//!
//! This module provides [`Constraints`], the priority-ordered list of rules a
//! schema node runs, and [`ConstraintFilter`] for running only part of it.

use crate::error::SchemaError;
use crate::schema::Kind;
use crate::validation::ValidationContext;

use super::{Constraint, ConstraintKind, Param, Rule};

/// Selects which constraint kinds a pipeline run considers.
#[derive(Debug, Clone, Copy)]
pub enum ConstraintFilter<'f> {
    /// Every constraint.
    All,
    /// Only the listed kinds.
    Include(&'f [ConstraintKind]),
    /// Everything except the listed kinds.
    Exclude(&'f [ConstraintKind]),
}

impl ConstraintFilter<'_> {
    fn accepts(&self, kind: ConstraintKind) -> bool {
        match self {
            ConstraintFilter::All => true,
            ConstraintFilter::Include(kinds) => kinds.contains(&kind),
            ConstraintFilter::Exclude(kinds) => !kinds.contains(&kind),
        }
    }
}

/// A priority-ordered list of constraints.
///
/// Constraints are kept stably sorted by [`ConstraintKind::priority`]. A
/// constraint of a singleton kind replaces the existing one in place; kinds
/// marked [`multiple`](ConstraintKind::multiple) accumulate. Every pipeline
/// holds exactly one type check.
///
/// All operations return a new pipeline and leave the receiver untouched.
#[derive(Clone)]
pub struct Constraints {
    items: Vec<Constraint>,
    last: Vec<ConstraintKind>,
}

impl Constraints {
    /// Creates a pipeline holding only the type check.
    pub fn new() -> Self {
        Self {
            items: vec![Constraint::new(Rule::Type)],
            last: Vec::new(),
        }
    }

    /// Adds `constraint`, replacing an existing singleton of the same kind.
    pub fn with(&self, constraint: Constraint) -> Self {
        let kind = constraint.kind();
        let mut next = self.clone();
        let existing = (!kind.multiple())
            .then(|| next.items.iter().position(|c| c.kind() == kind))
            .flatten();

        match existing {
            Some(index) => next.items[index] = constraint,
            None => {
                next.items.push(constraint);
                next.items.sort_by_key(|c| c.kind().priority());
            }
        }
        next.last = vec![kind];
        next
    }

    /// Adds several constraints as one step.
    ///
    /// A following [`with_last_message`](Self::with_last_message) applies to
    /// all of them.
    pub(crate) fn with_group(&self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        let mut kinds = Vec::new();
        let mut next = constraints.into_iter().fold(self.clone(), |acc, constraint| {
            kinds.push(constraint.kind());
            acc.with(constraint)
        });
        next.last = kinds;
        next
    }

    /// Removes every constraint of `kind` before adding `constraint`.
    pub fn with_only(&self, constraint: Constraint) -> Self {
        self.without(constraint.kind()).with(constraint)
    }

    /// Removes every constraint of `kind`. The type check cannot be removed.
    pub fn without(&self, kind: ConstraintKind) -> Self {
        if kind == ConstraintKind::Type {
            return self.clone();
        }
        let mut next = self.clone();
        next.items.retain(|c| c.kind() != kind);
        next.last.retain(|k| *k != kind);
        next
    }

    /// Sets the message of the most recently added constraints.
    ///
    /// Falls back to the type check when nothing has been added yet.
    pub(crate) fn with_last_message(&self, message: Param<String>) -> Self {
        let targets = if self.last.is_empty() {
            vec![ConstraintKind::Type]
        } else {
            self.last.clone()
        };
        let mut next = self.clone();
        for target in targets {
            if let Some(constraint) = next.items.iter_mut().rev().find(|c| c.kind() == target) {
                *constraint = constraint.clone().with_message(message.clone());
            }
        }
        next
    }

    /// Returns true if any constraint of `kind` is present.
    pub fn contains(&self, kind: ConstraintKind) -> bool {
        self.items.iter().any(|c| c.kind() == kind)
    }

    /// Returns the constraint kinds in evaluation order.
    pub fn kinds(&self) -> Vec<ConstraintKind> {
        self.items.iter().map(Constraint::kind).collect()
    }

    /// Returns an iterator over the constraints in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.items.iter()
    }

    /// Returns the number of constraints.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: a pipeline holds at least its type check.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Freezes all dynamic parameters against `ctx`.
    pub(crate) fn resolve(&self, ctx: &ValidationContext<'_>) -> Self {
        Self {
            items: self.items.iter().map(|c| c.resolve(ctx)).collect(),
            last: self.last.clone(),
        }
    }

    /// Runs every constraint and returns the errors found.
    pub fn validate<K: Kind>(&self, kind: &K, ctx: &ValidationContext<'_>) -> Vec<SchemaError> {
        self.validate_filtered(kind, ctx, ConstraintFilter::All)
            .unwrap_or_default()
    }

    /// Runs the constraints accepted by `filter`, in priority order.
    ///
    /// Stops at the first constraint with a defined outcome. Adjacent
    /// constraints of a multiple kind are evaluated together and their errors
    /// merged. On a null-ish value only null-accepting kinds run. Returns
    /// `None` if nothing produced an outcome.
    pub fn validate_filtered<K: Kind>(
        &self,
        kind: &K,
        ctx: &ValidationContext<'_>,
        filter: ConstraintFilter<'_>,
    ) -> Option<Vec<SchemaError>> {
        let is_null = kind.is_null(ctx.value());
        let mut candidates = self
            .items
            .iter()
            .filter(|c| filter.accepts(c.kind()))
            .filter(|c| !is_null || c.kind().accepts_null())
            .peekable();

        while let Some(constraint) = candidates.next() {
            let current = constraint.kind();
            let mut outcome = constraint.evaluate(kind, ctx);

            if current.multiple() {
                while let Some(sibling) = candidates.next_if(|c| c.kind() == current) {
                    if let Some(errors) = sibling.evaluate(kind, ctx) {
                        outcome.get_or_insert_with(Vec::new).extend(errors);
                    }
                }
            }

            if let Some(errors) = outcome {
                tracing::trace!(
                    path = %ctx.path(),
                    constraint = ?current,
                    errors = errors.len(),
                    "constraint stopped pipeline"
                );
                return Some(errors);
            }
        }

        None
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Bound;
    use crate::messages::TemplateCatalog;
    use crate::schema::StringKind;
    use serde_json::json;
    use std::sync::Arc;

    fn rule_min(n: usize) -> Constraint {
        Constraint::new(Rule::Min(Param::Static(Bound::Length(n))))
    }

    fn rule_test(pass: bool) -> Constraint {
        Constraint::new(Rule::Test(Arc::new(move |_: &ValidationContext<'_>| pass)))
    }

    #[test]
    fn test_sorted_by_priority() {
        let constraints = Constraints::new()
            .with(rule_test(true))
            .with(rule_min(1))
            .with(Constraint::new(Rule::Required(Param::Static(true))));
        assert_eq!(
            constraints.kinds(),
            vec![
                ConstraintKind::Required,
                ConstraintKind::Type,
                ConstraintKind::Min,
                ConstraintKind::Test
            ]
        );
    }

    #[test]
    fn test_singletons_replace_and_tests_accumulate() {
        let constraints = Constraints::new()
            .with(rule_min(1))
            .with(rule_min(5))
            .with(rule_test(true))
            .with(rule_test(false));
        assert_eq!(constraints.len(), 4);

        let only = constraints.with_only(rule_test(true));
        assert_eq!(only.len(), 3);
    }

    #[test]
    fn test_type_check_is_permanent() {
        let constraints = Constraints::new().without(ConstraintKind::Type);
        assert!(constraints.contains(ConstraintKind::Type));
        assert!(!constraints.is_empty());
    }

    #[test]
    fn test_first_failing_constraint_stops() {
        let catalog = TemplateCatalog::english();
        let value = json!("ab");
        let ctx = ValidationContext::root(Some(&value), None, &catalog);
        let constraints = Constraints::new().with(rule_min(5)).with(rule_test(false));

        let errors = constraints.validate(&StringKind::default(), &ctx);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code.as_str(), "min");
    }

    #[test]
    fn test_adjacent_tests_merge_errors() {
        let catalog = TemplateCatalog::english();
        let value = json!("abc");
        let ctx = ValidationContext::root(Some(&value), None, &catalog);
        let constraints = Constraints::new()
            .with(rule_test(false))
            .with(rule_test(true))
            .with(rule_test(false));

        let errors = constraints.validate(&StringKind::default(), &ctx);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_null_skips_non_null_constraints() {
        let catalog = TemplateCatalog::english();
        let ctx = ValidationContext::root(None, None, &catalog);
        let constraints = Constraints::new().with(rule_min(5)).with(rule_test(false));
        assert!(constraints.validate(&StringKind::default(), &ctx).is_empty());
    }

    #[test]
    fn test_filtered_run_reports_no_outcome() {
        let catalog = TemplateCatalog::english();
        let value = json!("abcdef");
        let ctx = ValidationContext::root(Some(&value), None, &catalog);
        let constraints = Constraints::new().with(rule_min(5));

        let outcome = constraints.validate_filtered(
            &StringKind::default(),
            &ctx,
            ConstraintFilter::Exclude(&[ConstraintKind::Test]),
        );
        assert!(outcome.is_none());
    }

    #[test]
    fn test_group_message_covers_every_member() {
        let catalog = TemplateCatalog::english();
        let constraints = Constraints::new()
            .with_group([rule_min(3), Constraint::new(Rule::Max(Param::Static(Bound::Length(3))))])
            .with_last_message(Param::Static("exactly three".into()));

        for text in ["ab", "abcd"] {
            let value = json!(text);
            let ctx = ValidationContext::root(Some(&value), None, &catalog);
            let errors = constraints.validate(&StringKind::default(), &ctx);
            assert_eq!(errors[0].message, "exactly three", "{}", text);
        }
    }

    #[test]
    fn test_last_message_targets_latest_kind() {
        let catalog = TemplateCatalog::english();
        let value = json!(3);
        let ctx = ValidationContext::root(Some(&value), None, &catalog);

        let constraints = Constraints::new().with_last_message(Param::Static("not text".into()));
        let errors = constraints.validate(&StringKind::default(), &ctx);
        assert_eq!(errors[0].message, "not text");
    }
}
