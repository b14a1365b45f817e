//! Validation context and per-call options.
//!
//! This module provides the [`ValidationContext`] threaded through a
//! traversal and the [`ValidationOptions`] a caller configures a validation
//! call with. A context is built fresh for the root value and for every
//! child field or element, and is never mutated.

use std::sync::Arc;

use serde_json::Value;

use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::messages::{MessageCatalog, MessageKey, MessageParams};
use crate::path::{JsonPath, PathSegment};
use crate::registry::CatalogRegistry;
use crate::ValidationResult;

/// Per-node bundle of everything a constraint may look at.
///
/// `value` is `None` when the value is undefined (e.g. a missing property),
/// which is distinct from `Some(Value::Null)`.
///
/// # Example
///
/// ```rust
/// use yop::{SchemaLike, Yop};
/// use serde_json::json;
///
/// let schema = Yop::object()
///     .field("name", Yop::string())
///     .field("age", Yop::number().required_when(|ctx| {
///         ctx.sibling("name") == Some(&json!("Joe"))
///     }));
///
/// assert!(schema.validate(&json!({"name": "Joe"})).is_failure());
/// assert!(schema.validate(&json!({"name": "Jack"})).is_success());
/// ```
#[derive(Clone)]
pub struct ValidationContext<'a> {
    value: Option<&'a Value>,
    parent: Option<&'a Value>,
    root: Option<&'a Value>,
    path: JsonPath,
    user_context: Option<&'a Value>,
    messages: &'a dyn MessageCatalog,
}

impl<'a> ValidationContext<'a> {
    /// Creates the context for a top-level value.
    pub fn root(
        value: Option<&'a Value>,
        user_context: Option<&'a Value>,
        messages: &'a dyn MessageCatalog,
    ) -> Self {
        Self {
            value,
            parent: None,
            root: value,
            path: JsonPath::root(),
            user_context,
            messages,
        }
    }

    /// Creates the context for the value addressed by `segment` inside this
    /// context's value.
    pub fn child(&self, segment: PathSegment) -> Self {
        let value = self.value.and_then(|container| segment.lookup(container));
        Self {
            value,
            parent: self.value,
            root: self.root,
            path: self.path.push(segment),
            user_context: self.user_context,
            messages: self.messages,
        }
    }

    /// The value being checked, `None` if undefined.
    pub fn value(&self) -> Option<&'a Value> {
        self.value
    }

    /// The immediate structural container of the value.
    pub fn parent(&self) -> Option<&'a Value> {
        self.parent
    }

    /// The original top-level input.
    pub fn root_value(&self) -> Option<&'a Value> {
        self.root
    }

    /// The address of the value from the root.
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// Caller-supplied data, passed unchanged through the whole traversal.
    pub fn user_context(&self) -> Option<&'a Value> {
        self.user_context
    }

    /// Reads a property of the parent object.
    pub fn sibling(&self, name: &str) -> Option<&'a Value> {
        self.parent?.as_object()?.get(name)
    }

    /// Renders a catalog message for this context's locale.
    pub fn message(&self, key: &MessageKey<'_>, params: &MessageParams) -> String {
        self.messages.message(key, params)
    }

    /// The locale messages are rendered in.
    pub fn locale(&self) -> &str {
        self.messages.locale()
    }
}

/// Options for a single validation call.
///
/// The default options carry no user context and render messages with the
/// built-in catalogs in their default locale (`en-US`).
///
/// # Example
///
/// ```rust
/// use yop::{SchemaLike, ValidationOptions, Yop};
/// use serde_json::json;
///
/// let schema = Yop::string().required();
/// let options = ValidationOptions::new().with_locale("fr-FR");
///
/// let errors = schema
///     .validate_with(Some(&json!(null)), &options)
///     .into_result()
///     .unwrap_err();
/// assert_eq!(errors.first().message, "Champ obligatoire");
/// ```
#[derive(Clone)]
pub struct ValidationOptions<'a> {
    user_context: Option<&'a Value>,
    locale: Option<String>,
    catalogs: CatalogRegistry,
}

impl<'a> ValidationOptions<'a> {
    /// Creates default options.
    pub fn new() -> Self {
        Self {
            user_context: None,
            locale: None,
            catalogs: CatalogRegistry::builtin(),
        }
    }

    /// Sets the caller data exposed as [`ValidationContext::user_context`].
    pub fn with_user_context(mut self, user_context: &'a Value) -> Self {
        self.user_context = Some(user_context);
        self
    }

    /// Selects the message locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Uses `catalogs` instead of the built-in registry.
    pub fn with_catalogs(mut self, catalogs: CatalogRegistry) -> Self {
        self.catalogs = catalogs;
        self
    }

    /// The caller data, if any.
    pub fn user_context(&self) -> Option<&'a Value> {
        self.user_context
    }

    /// The catalog messages will be rendered with.
    pub fn catalog(&self) -> Arc<dyn MessageCatalog> {
        self.catalogs.resolve(self.locale.as_deref())
    }
}

impl Default for ValidationOptions<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns the errors of a traversal into a validation result.
pub fn collect_errors(errors: Vec<SchemaError>) -> ValidationResult<()> {
    match SchemaErrors::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::TemplateCatalog;
    use serde_json::json;

    #[test]
    fn test_child_contexts() {
        let catalog = TemplateCatalog::english();
        let value = json!({"a": {"b": [1, 2]}});
        let user = json!({"role": "admin"});
        let root = ValidationContext::root(Some(&value), Some(&user), &catalog);

        let a = root.child(PathSegment::field("a"));
        let b = a.child(PathSegment::field("b"));
        let second = b.child(PathSegment::index(1));

        assert_eq!(second.value(), Some(&json!(2)));
        assert_eq!(second.parent(), Some(&json!([1, 2])));
        assert_eq!(second.root_value(), Some(&value));
        assert_eq!(second.path().to_string(), "a.b[1]");
        assert_eq!(second.user_context(), Some(&user));

        let missing = b.child(PathSegment::index(7));
        assert_eq!(missing.value(), None);
        assert_eq!(missing.parent(), Some(&json!([1, 2])));
    }

    #[test]
    fn test_sibling_lookup() {
        let catalog = TemplateCatalog::english();
        let value = json!({"name": "Joe", "age": 3});
        let root = ValidationContext::root(Some(&value), None, &catalog);
        let age = root.child(PathSegment::field("age"));
        assert_eq!(age.sibling("name"), Some(&json!("Joe")));
        assert_eq!(age.sibling("nope"), None);
        assert_eq!(root.sibling("name"), None);
    }

    #[test]
    fn test_collect_errors() {
        assert!(collect_errors(Vec::new()).is_success());
        let error = SchemaError::new(JsonPath::root(), crate::ErrorCode::Test, "nope");
        assert!(collect_errors(vec![error]).is_failure());
    }

    #[test]
    fn test_options_locale() {
        let options = ValidationOptions::new().with_locale("fr");
        assert_eq!(options.catalog().locale(), "fr-FR");
        assert_eq!(ValidationOptions::default().catalog().locale(), "en-US");
    }
}
