//! Object schema validation.
//!
//! This module provides [`ObjectSchema`] for validating JSON objects
//! property by property, in declaration order, and for restricting
//! validation to one subtree with [`focus_on`](ObjectSchema::focus_on).

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::SchemaError;
use crate::path::{JsonPath, PathSegment};
use crate::validation::ValidationContext;

use super::node::Schema;
use super::traits::{Kind, SchemaLike};
use super::SchemaKind;

/// Kind data of an object schema: its properties and optional focus.
#[derive(Clone, Default)]
pub struct ObjectKind {
    properties: IndexMap<String, Arc<dyn SchemaLike>>,
    focus: Option<JsonPath>,
}

impl ObjectKind {
    /// The declared properties, in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Arc<dyn SchemaLike>)> {
        self.properties.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    /// The schema of property `name`.
    pub fn property(&self, name: &str) -> Option<&Arc<dyn SchemaLike>> {
        self.properties.get(name)
    }
}

impl Kind for ObjectKind {
    fn schema_kind(&self) -> SchemaKind {
        SchemaKind::Object
    }

    fn is_type(&self, value: &Value) -> bool {
        value.is_object()
    }

    fn validate_children(&self, ctx: &ValidationContext<'_>) -> Vec<SchemaError> {
        if !ctx.value().is_some_and(Value::is_object) {
            return Vec::new();
        }

        self.properties
            .iter()
            .flat_map(|(name, schema)| {
                schema.validate_in_context(&ctx.child(PathSegment::Field(name.clone())))
            })
            .collect()
    }

    fn child(&self, segment: &PathSegment) -> Option<Arc<dyn SchemaLike>> {
        match segment {
            PathSegment::Field(name) => self.properties.get(name).cloned(),
            PathSegment::Index(_) => None,
        }
    }

    fn focus(&self) -> Option<&JsonPath> {
        self.focus.as_ref()
    }

    fn clear_focus(&mut self) {
        self.focus = None;
    }
}

/// A schema for validating JSON objects.
///
/// Each declared property is validated against its own schema, with its
/// conditional transform resolved for that property's context. Properties
/// not declared in the schema are not checked. Errors of every property
/// are reported; custom tests on the object run only once every property
/// is valid.
///
/// # Example
///
/// ```rust
/// use yop::{SchemaLike, Yop};
/// use serde_json::json;
///
/// let schema = Yop::object()
///     .field("name", Yop::string().required())
///     .field("age", Yop::number().min(0.0));
///
/// assert!(schema.validate(&json!({"name": "Alice", "age": 30})).is_success());
///
/// let errors = schema.validate(&json!({"age": -1})).into_result().unwrap_err();
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors.first().path.to_string(), "name");
/// ```
pub type ObjectSchema = Schema<ObjectKind>;

impl Schema<ObjectKind> {
    /// Creates an object schema with no properties.
    pub fn new() -> Self {
        Self::from_kind(ObjectKind::default())
    }

    /// Declares property `name`, replacing an earlier declaration in place.
    pub fn field<S>(&self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.field_shared(name, Arc::new(schema))
    }

    /// Declares property `name` with an already shared schema.
    pub fn field_shared(&self, name: impl Into<String>, schema: Arc<dyn SchemaLike>) -> Self {
        let name = name.into();
        self.map_kind(|kind| {
            kind.properties.insert(name, schema);
        })
    }

    /// Removes property `name`, keeping the order of the others.
    pub fn without_field(&self, name: &str) -> Self {
        self.map_kind(|kind| {
            kind.properties.shift_remove(name);
        })
    }

    /// Restricts validation to the subtree at `path`.
    ///
    /// Only the node at `path` is validated, with conditional transforms
    /// resolved along the way; errors still carry their full path. A path
    /// with no matching schema validates nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use yop::{JsonPath, SchemaLike, Yop};
    /// use serde_json::json;
    ///
    /// let schema = Yop::object()
    ///     .field("children", Yop::array(Yop::number().min(1.0)))
    ///     .focus_on(JsonPath::parse("children[0]").unwrap());
    ///
    /// let errors = schema
    ///     .validate(&json!({"children": [0, 0, 0]}))
    ///     .into_result()
    ///     .unwrap_err();
    /// assert_eq!(errors.len(), 1);
    /// assert_eq!(errors.first().path.to_string(), "children[0]");
    /// ```
    pub fn focus_on(&self, path: JsonPath) -> Self {
        self.map_kind(|kind| kind.focus = Some(path))
    }

    /// The declared property names, in order.
    pub fn property_names(&self) -> Vec<&str> {
        self.kind_data().properties.keys().map(String::as_str).collect()
    }
}

impl Default for Schema<ObjectKind> {
    fn default() -> Self {
        Self::new()
    }
}
