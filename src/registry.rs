//! Locale registry for message catalogs.
//!
//! This module provides the [`CatalogRegistry`] type that stores one
//! [`MessageCatalog`] per locale and picks the catalog used to render
//! validation messages.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::messages::{MessageCatalog, TemplateCatalog};

/// Type alias for the catalog storage map.
type CatalogMap = Arc<RwLock<HashMap<String, Arc<dyn MessageCatalog>>>>;

static BUILTIN: Lazy<CatalogRegistry> = Lazy::new(CatalogRegistry::with_builtin);

/// A thread-safe registry of message catalogs keyed by locale.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can render messages concurrently (read-only access)
/// - Registration operations are serialized (write access)
///
/// Clones share the same storage.
///
/// # Example
///
/// ```rust
/// use yop::CatalogRegistry;
/// use yop::messages::TemplateCatalog;
///
/// let registry = CatalogRegistry::new();
/// registry.register(TemplateCatalog::english()).unwrap();
///
/// // Duplicate registration fails
/// assert!(registry.register(TemplateCatalog::english()).is_err());
///
/// // Language-prefix fallback: "en" resolves to "en-US"
/// assert_eq!(registry.resolve(Some("en")).locale(), "en-US");
/// ```
#[derive(Clone)]
pub struct CatalogRegistry {
    catalogs: CatalogMap,
    default_locale: String,
}

impl CatalogRegistry {
    /// Creates an empty registry whose default locale is `en-US`.
    pub fn new() -> Self {
        Self {
            catalogs: Arc::new(RwLock::new(HashMap::new())),
            default_locale: "en-US".to_string(),
        }
    }

    /// Creates a registry holding the built-in `en-US` and `fr-FR` catalogs.
    pub fn with_builtin() -> Self {
        let registry = Self::new();
        registry.replace(TemplateCatalog::english());
        registry.replace(TemplateCatalog::french());
        registry
    }

    /// Returns the process-wide registry of built-in catalogs.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Sets the locale used when a requested locale is unknown.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::LocaleNotFound` if no catalog is registered
    /// for `locale`.
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Result<Self, RegistryError> {
        let locale = locale.into();
        if !self.catalogs.read().contains_key(&locale) {
            return Err(RegistryError::LocaleNotFound(locale));
        }
        self.default_locale = locale;
        Ok(self)
    }

    /// Returns the default locale.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Registers a catalog under its own locale.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateLocale` if the locale is already registered.
    pub fn register<C>(&self, catalog: C) -> Result<(), RegistryError>
    where
        C: MessageCatalog + 'static,
    {
        let locale = catalog.locale().to_string();
        let mut catalogs = self.catalogs.write();

        if catalogs.contains_key(&locale) {
            return Err(RegistryError::DuplicateLocale(locale));
        }

        tracing::debug!(locale = %locale, "registering message catalog");
        catalogs.insert(locale, Arc::new(catalog));
        Ok(())
    }

    /// Registers a catalog, replacing any catalog with the same locale.
    pub fn replace<C>(&self, catalog: C)
    where
        C: MessageCatalog + 'static,
    {
        let locale = catalog.locale().to_string();
        tracing::debug!(locale = %locale, "replacing message catalog");
        self.catalogs.write().insert(locale, Arc::new(catalog));
    }

    /// Retrieves the catalog registered for exactly `locale`.
    pub fn get(&self, locale: &str) -> Option<Arc<dyn MessageCatalog>> {
        self.catalogs.read().get(locale).cloned()
    }

    /// Picks the catalog for `locale`.
    ///
    /// Tries the exact locale, then any catalog sharing its language prefix
    /// (`fr` matches `fr-FR`), then the default locale, and finally the
    /// built-in English catalog.
    pub fn resolve(&self, locale: Option<&str>) -> Arc<dyn MessageCatalog> {
        let catalogs = self.catalogs.read();

        if let Some(locale) = locale {
            if let Some(catalog) = catalogs.get(locale) {
                return Arc::clone(catalog);
            }

            let language = locale.split(['-', '_']).next().unwrap_or(locale);
            let mut by_language: Vec<_> = catalogs
                .iter()
                .filter(|(key, _)| key.split(['-', '_']).next() == Some(language))
                .collect();
            by_language.sort_by(|a, b| a.0.cmp(b.0));
            if let Some((_, catalog)) = by_language.first() {
                return Arc::clone(catalog);
            }

            tracing::warn!(
                locale = %locale,
                fallback = %self.default_locale,
                "no message catalog for locale, using default"
            );
        }

        match catalogs.get(&self.default_locale) {
            Some(catalog) => Arc::clone(catalog),
            None => Arc::new(TemplateCatalog::english()),
        }
    }

    /// Returns the registered locales, sorted.
    pub fn locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.catalogs.read().keys().cloned().collect();
        locales.sort();
        locales
    }
}

impl Default for CatalogRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a catalog for a locale that already has one.
    #[error("message catalog for locale '{0}' already registered")]
    DuplicateLocale(String),

    /// Referenced a locale that has no catalog.
    #[error("no message catalog registered for locale '{0}'")]
    LocaleNotFound(String),
}
