//! Localized validation messages.
//!
//! The engine decides *whether* a value is invalid on its own; a
//! [`MessageCatalog`] only turns an error code plus the resolved constraint
//! parameters into text. [`TemplateCatalog`] is the stock implementation:
//! literal templates with `${name}` placeholders, or formatting closures for
//! locale-sensitive rendering of numbers, dates and lists.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::constraint::Bound;
use crate::error::ErrorCode;
use crate::schema::SchemaKind;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{(\w+)\}").expect("placeholder pattern is a valid regex"));

/// Identifies which message to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageKey<'a> {
    /// Kind of the schema node that produced the error.
    pub kind: SchemaKind,
    /// Optional kind variant, e.g. `"email"` for email strings.
    pub variant: Option<&'a str>,
    /// The error code.
    pub code: ErrorCode,
}

/// Parameters available to message templates.
///
/// Placeholders are `${min}`, `${max}`, `${value}` and `${oneOfValues}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageParams {
    /// Resolved lower bound, for `min` errors.
    pub min: Option<Bound>,
    /// Resolved upper bound, for `max` errors.
    pub max: Option<Bound>,
    /// The offending value.
    pub value: Option<Value>,
    /// Resolved allow-list, for `oneOf` errors.
    pub one_of: Option<Vec<Value>>,
}

impl MessageParams {
    /// Returns the default textual rendering of a named parameter.
    pub fn get(&self, name: &str) -> Option<String> {
        match name {
            "min" => self.min.as_ref().map(ToString::to_string),
            "max" => self.max.as_ref().map(ToString::to_string),
            "value" => self.value.as_ref().map(display_value),
            "oneOfValues" => self
                .one_of
                .as_ref()
                .map(|values| values.iter().map(display_value).collect::<Vec<_>>().join(", ")),
            _ => None,
        }
    }
}

/// Renders a JSON value for humans: strings without quotes, everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Substitutes `${name}` placeholders from `params`; unknown names are left as-is.
pub fn render_template(template: &str, params: &MessageParams) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            params.get(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// The consumed message collaborator.
pub trait MessageCatalog: Send + Sync {
    /// The locale this catalog renders, e.g. `en-US`.
    fn locale(&self) -> &str;

    /// Renders the message for `key`.
    fn message(&self, key: &MessageKey<'_>, params: &MessageParams) -> String;
}

/// Formatting closure used by [`MessageTemplate::Format`].
pub type FormatFn = Arc<dyn Fn(&MessageParams) -> String + Send + Sync>;

/// A single catalog entry.
#[derive(Clone)]
pub enum MessageTemplate {
    /// Literal text with `${name}` placeholders.
    Text(Cow<'static, str>),
    /// Custom formatting, for locale-sensitive rendering.
    Format(FormatFn),
}

impl MessageTemplate {
    /// Wraps a formatting closure.
    pub fn format<F>(f: F) -> Self
    where
        F: Fn(&MessageParams) -> String + Send + Sync + 'static,
    {
        MessageTemplate::Format(Arc::new(f))
    }

    /// Produces the final text.
    pub fn render(&self, params: &MessageParams) -> String {
        match self {
            MessageTemplate::Text(text) => render_template(text, params),
            MessageTemplate::Format(f) => f(params),
        }
    }
}

impl From<&'static str> for MessageTemplate {
    fn from(text: &'static str) -> Self {
        MessageTemplate::Text(Cow::Borrowed(text))
    }
}

impl From<String> for MessageTemplate {
    fn from(text: String) -> Self {
        MessageTemplate::Text(Cow::Owned(text))
    }
}

type EntryKey = (SchemaKind, Option<String>, ErrorCode);

/// A catalog backed by per-kind templates.
///
/// Lookup order: `(kind, variant, code)`, then `(kind, code)`, then the
/// per-code default, then the bare code.
///
/// # Example
///
/// ```rust
/// use yop::messages::{MessageCatalog, MessageKey, MessageParams, TemplateCatalog};
/// use yop::{Bound, ErrorCode, SchemaKind};
///
/// let catalog = TemplateCatalog::new("en-GB")
///     .with(SchemaKind::String, ErrorCode::Min, "At least ${min} characters, please");
///
/// let key = MessageKey { kind: SchemaKind::String, variant: None, code: ErrorCode::Min };
/// let params = MessageParams { min: Some(Bound::Length(3)), ..Default::default() };
/// assert_eq!(catalog.message(&key, &params), "At least 3 characters, please");
/// ```
#[derive(Clone)]
pub struct TemplateCatalog {
    locale: String,
    entries: HashMap<EntryKey, MessageTemplate>,
    defaults: HashMap<ErrorCode, MessageTemplate>,
}

impl TemplateCatalog {
    /// Creates an empty catalog for `locale`.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: HashMap::new(),
            defaults: HashMap::new(),
        }
    }

    /// Adds a template for a kind and code.
    pub fn with(
        mut self,
        kind: SchemaKind,
        code: ErrorCode,
        template: impl Into<MessageTemplate>,
    ) -> Self {
        self.entries.insert((kind, None, code), template.into());
        self
    }

    /// Adds a template for a kind variant and code.
    pub fn with_variant(
        mut self,
        kind: SchemaKind,
        variant: impl Into<String>,
        code: ErrorCode,
        template: impl Into<MessageTemplate>,
    ) -> Self {
        self.entries
            .insert((kind, Some(variant.into()), code), template.into());
        self
    }

    /// Adds the fallback template for a code.
    pub fn with_default(mut self, code: ErrorCode, template: impl Into<MessageTemplate>) -> Self {
        self.defaults.insert(code, template.into());
        self
    }

    fn lookup(&self, key: &MessageKey<'_>) -> Option<&MessageTemplate> {
        key.variant
            .and_then(|variant| {
                self.entries
                    .get(&(key.kind, Some(variant.to_string()), key.code))
            })
            .or_else(|| self.entries.get(&(key.kind, None, key.code)))
            .or_else(|| self.defaults.get(&key.code))
    }

    /// The built-in `en-US` catalog.
    pub fn english() -> Self {
        use ErrorCode::*;
        use SchemaKind as K;

        Self::new("en-US")
            .with_default(Required, "Required field")
            .with_default(Type, "Invalid value type")
            .with_default(Min, "Must be at least ${min}")
            .with_default(Max, "Must be at most ${max}")
            .with_default(OneOf, "Must be one of: ${oneOfValues}")
            .with_default(Matches, "Invalid format")
            .with_default(Email, "Invalid email format")
            .with_default(Time, "Invalid time format (HH:MM or HH:MM:SS)")
            .with_default(Test, "Invalid value")
            .with(K::String, Type, "Must be a string")
            .with(K::String, Min, "Minimum ${min} characters")
            .with(K::String, Max, "Maximum ${max} characters")
            .with(K::Time, Type, "Must be a time string")
            .with(K::Time, Min, "Must be after or equal to ${min}")
            .with(K::Time, Max, "Must be before or equal to ${max}")
            .with(K::Number, Type, "Must be a number")
            .with(K::Number, Min, "Must be greater or equal to ${min}")
            .with(K::Number, Max, "Must be less or equal to ${max}")
            .with(K::Boolean, Type, "Must be a boolean")
            .with(K::Date, Type, "Invalid date")
            .with(K::Date, Min, "Date must be greater or equal to ${min}")
            .with(K::Date, Max, "Date must be less or equal to ${max}")
            .with(K::File, Type, "Must be a file")
            .with(K::File, Min, "File must be at least ${min} bytes")
            .with(K::File, Max, "File must be at most ${max} bytes")
            .with(K::Array, Type, "Must be an array")
            .with(K::Array, Min, "At least ${min} element(s)")
            .with(K::Array, Max, "At most ${max} element(s)")
            .with(K::Object, Type, "Must be an object")
    }

    /// The built-in `fr-FR` catalog.
    pub fn french() -> Self {
        use ErrorCode::*;
        use SchemaKind as K;

        Self::new("fr-FR")
            .with_default(Required, "Champ obligatoire")
            .with_default(Type, "Type de valeur invalide")
            .with_default(
                Min,
                MessageTemplate::format(|p| format!("Doit être au moins {}", french_bound(&p.min))),
            )
            .with_default(
                Max,
                MessageTemplate::format(|p| format!("Doit être au plus {}", french_bound(&p.max))),
            )
            .with_default(
                OneOf,
                MessageTemplate::format(|p| {
                    format!("Doit être l'une des valeurs : {}", french_list(&p.one_of))
                }),
            )
            .with_default(Matches, "Format invalide")
            .with_default(Email, "Adresse e-mail invalide")
            .with_default(Time, "Format d'heure invalide (HH:MM ou HH:MM:SS)")
            .with_default(Test, "Valeur invalide")
            .with(K::String, Type, "Doit être une chaîne de caractères")
            .with(K::String, Min, "Minimum ${min} caractères")
            .with(K::String, Max, "Maximum ${max} caractères")
            .with(K::Time, Min, "Doit être après ou égal à ${min}")
            .with(K::Time, Max, "Doit être avant ou égal à ${max}")
            .with(K::Number, Type, "Doit être un nombre")
            .with(
                K::Number,
                Min,
                MessageTemplate::format(|p| {
                    format!("Doit être supérieur ou égal à {}", french_bound(&p.min))
                }),
            )
            .with(
                K::Number,
                Max,
                MessageTemplate::format(|p| {
                    format!("Doit être inférieur ou égal à {}", french_bound(&p.max))
                }),
            )
            .with(K::Boolean, Type, "Doit être un booléen")
            .with(K::Date, Type, "Date invalide")
            .with(
                K::Date,
                Min,
                MessageTemplate::format(|p| {
                    format!("La date doit être postérieure ou égale au {}", french_bound(&p.min))
                }),
            )
            .with(
                K::Date,
                Max,
                MessageTemplate::format(|p| {
                    format!("La date doit être antérieure ou égale au {}", french_bound(&p.max))
                }),
            )
            .with(K::File, Type, "Doit être un fichier")
            .with(K::File, Min, "Le fichier doit faire au moins ${min} octets")
            .with(K::File, Max, "Le fichier doit faire au plus ${max} octets")
            .with(K::Array, Type, "Doit être une liste")
            .with(K::Array, Min, "Au moins ${min} élément(s)")
            .with(K::Array, Max, "Au plus ${max} élément(s)")
            .with(K::Object, Type, "Doit être un objet")
    }
}

impl MessageCatalog for TemplateCatalog {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn message(&self, key: &MessageKey<'_>, params: &MessageParams) -> String {
        match self.lookup(key) {
            Some(template) => template.render(params),
            None => key.code.as_str().to_string(),
        }
    }
}

fn french_bound(bound: &Option<Bound>) -> String {
    match bound {
        Some(Bound::Number(n)) => n.to_string().replace('.', ","),
        Some(Bound::Date(d)) => d.format("%d/%m/%Y").to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn french_list(values: &Option<Vec<Value>>) -> String {
    let rendered: Vec<String> = values
        .iter()
        .flatten()
        .map(display_value)
        .collect();
    match rendered.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} ou {}", rest.join(", "), last),
        _ => rendered.join(""),
    }
}
