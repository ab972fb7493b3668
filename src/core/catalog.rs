//! Runtime message catalog.
//!
//! A `Catalog` is built once (from bundles in memory or from disk) and is
//! immutable afterwards. Lookups go through a [`Translator`] bound to one
//! locale, optionally scoped to a namespace.
//!
//! Lookups never panic. The strict `try_t` reports every failure; `t` and
//! `t_with` log the failure and degrade: first to the fallback locale's
//! string, then to the key itself.

use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result};
use glob::Pattern;
use rayon::prelude::*;

use super::{
    KeyPath, LocaleBundle,
    interpolate::{SubstitutionPolicy, Substitutions},
    namespace::{NamespaceError, extract_namespace},
    parsers::json::scan_message_files,
    resolve::{ResolveError, check_key, resolve},
    schema::MessageSchema,
};

#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    /// Locale used when a lookup fails in the requested locale.
    /// Defaults to the canonical locale.
    pub fallback_locale: Option<String>,
    pub policy: SubstitutionPolicy,
    /// Message files to skip when loading from disk.
    pub ignores: Vec<Pattern>,
}

#[derive(Debug)]
pub struct Catalog {
    schema: MessageSchema,
    /// Non-canonical bundles; the canonical bundle lives in the schema.
    bundles: BTreeMap<String, LocaleBundle>,
    fallback_locale: String,
    policy: SubstitutionPolicy,
}

impl Catalog {
    /// Build a catalog from a derived schema and the other locales' bundles.
    ///
    /// Bundles that drift from the schema are kept; the drift is logged and
    /// affected lookups fall back.
    pub fn new(
        schema: MessageSchema,
        bundles: impl IntoIterator<Item = LocaleBundle>,
        options: CatalogOptions,
    ) -> Self {
        let canonical = schema.canonical_locale().to_string();
        let bundles: BTreeMap<String, LocaleBundle> = bundles
            .into_iter()
            .filter(|bundle| bundle.locale != canonical)
            .map(|bundle| (bundle.locale.clone(), bundle))
            .collect();

        let drift: Vec<(&str, usize)> = bundles
            .par_iter()
            .map(|(locale, bundle)| (locale.as_str(), schema.check(bundle).len()))
            .collect();
        for (locale, mismatches) in drift {
            if mismatches > 0 {
                tracing::warn!(
                    locale,
                    mismatches,
                    "Messages do not match the '{}' schema; affected lookups will fall back",
                    canonical
                );
            }
        }

        let fallback_locale = match options.fallback_locale {
            Some(locale) if locale == canonical || bundles.contains_key(&locale) => locale,
            Some(locale) => {
                tracing::warn!(
                    "Fallback locale '{}' is not loaded; using '{}'",
                    locale,
                    canonical
                );
                canonical
            }
            None => canonical,
        };

        Self {
            schema,
            bundles,
            fallback_locale,
            policy: options.policy,
        }
    }

    /// Load every locale under `messages_root` and derive the schema from
    /// `canonical_locale`.
    ///
    /// Unreadable locale files are skipped with a warning. A canonical locale
    /// that is missing or not a valid schema is an error.
    pub fn load(
        messages_root: impl AsRef<Path>,
        canonical_locale: &str,
        options: CatalogOptions,
    ) -> Result<Self> {
        let messages_root = messages_root.as_ref();
        let scan = scan_message_files(messages_root, &options.ignores)?;
        for warning in &scan.warnings {
            tracing::warn!("Skipping {}: {}", warning.file_path, warning.error);
        }

        let mut messages = scan.messages;
        let canonical = messages.remove(canonical_locale).with_context(|| {
            format!(
                "Canonical locale '{}' messages not found in '{}'",
                canonical_locale,
                messages_root.display()
            )
        })?;
        let schema = MessageSchema::derive(canonical)?;
        tracing::debug!(
            locales = messages.len() + 1,
            keys = schema.keys().len(),
            "Loaded message catalog"
        );

        Ok(Self::new(schema, messages.into_values(), options))
    }

    pub fn schema(&self) -> &MessageSchema {
        &self.schema
    }

    pub fn fallback_locale(&self) -> &str {
        &self.fallback_locale
    }

    pub fn policy(&self) -> SubstitutionPolicy {
        self.policy
    }

    /// All loaded locales, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.bundles.keys().map(String::as_str).collect();
        locales.push(self.schema.canonical_locale());
        locales.sort_unstable();
        locales
    }

    pub fn bundle(&self, locale: &str) -> Option<&LocaleBundle> {
        if locale == self.schema.canonical_locale() {
            Some(self.schema.canonical())
        } else {
            self.bundles.get(locale)
        }
    }

    /// Pick the loaded locale that best serves `requested`.
    ///
    /// Exact match first, then the language part alone (`es-MX` -> `es`),
    /// then the fallback locale.
    ///
    /// ```
    /// # use intlkeys::core::{Catalog, CatalogOptions, LocaleBundle, MessageSchema};
    /// # use intlkeys::core::parsers::json::parse_json_document;
    /// let es = parse_json_document(r#"{"a": {"b": "c"}}"#, "es.json").unwrap();
    /// let en = parse_json_document(r#"{"a": {"b": "d"}}"#, "en.json").unwrap();
    /// let schema = MessageSchema::derive(LocaleBundle::new("es", es)).unwrap();
    /// let catalog = Catalog::new(schema, [LocaleBundle::new("en", en)], CatalogOptions::default());
    ///
    /// assert_eq!(catalog.negotiate("en"), "en");
    /// assert_eq!(catalog.negotiate("en-US"), "en");
    /// assert_eq!(catalog.negotiate("fr"), "es");
    /// ```
    pub fn negotiate(&self, requested: &str) -> &str {
        if let Some(bundle) = self.bundle(requested) {
            return &bundle.locale;
        }
        let language = requested
            .split(['-', '_'])
            .next()
            .unwrap_or(requested);
        if let Some(bundle) = self.bundle(language) {
            return &bundle.locale;
        }
        &self.fallback_locale
    }

    /// A translator for the best available match of `locale`.
    pub fn translator(&self, locale: &str) -> Translator<'_> {
        let negotiated = self.negotiate(locale);
        if negotiated != locale {
            tracing::debug!("Serving locale '{}' as '{}'", locale, negotiated);
        }
        Translator {
            catalog: self,
            locale: negotiated.to_string(),
            namespace: None,
        }
    }
}

/// Lookups in one locale, optionally relative to a namespace.
#[derive(Debug, Clone)]
pub struct Translator<'a> {
    catalog: &'a Catalog,
    locale: String,
    namespace: Option<KeyPath>,
}

impl<'a> Translator<'a> {
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn current_namespace(&self) -> Option<&str> {
        self.namespace.as_ref().map(KeyPath::as_str)
    }

    /// Scope the translator to a namespace; keys passed afterwards are
    /// relative to it. Nests when already scoped.
    pub fn namespace(&self, name: &str) -> Result<Translator<'a>, NamespaceError> {
        let full = KeyPath::join(self.namespace.as_ref(), name);
        extract_namespace(self.catalog.schema(), full.as_str())?;
        Ok(Translator {
            catalog: self.catalog,
            locale: self.locale.clone(),
            namespace: Some(full),
        })
    }

    fn full_key(&self, key: &str) -> KeyPath {
        KeyPath::join(self.namespace.as_ref(), key)
    }

    /// Strict lookup.
    pub fn try_t(
        &self,
        key: &str,
        substitutions: Option<&Substitutions>,
    ) -> Result<String, ResolveError> {
        let full = self.full_key(key);
        check_key(self.catalog.schema().keys(), full.as_str())?;
        let bundle = self
            .catalog
            .bundle(&self.locale)
            .ok_or_else(|| ResolveError::KeyNotFound {
                locale: self.locale.clone(),
                key: full.to_string(),
            })?;
        resolve(bundle, full.as_str(), substitutions, self.catalog.policy())
    }

    /// Lookup that always produces a string.
    pub fn t(&self, key: &str) -> String {
        self.lookup(key, None)
    }

    pub fn t_with(&self, key: &str, substitutions: &Substitutions) -> String {
        self.lookup(key, Some(substitutions))
    }

    fn lookup(&self, key: &str, substitutions: Option<&Substitutions>) -> String {
        let err = match self.try_t(key, substitutions) {
            Ok(message) => return message,
            Err(err) => err,
        };
        tracing::warn!(locale = %self.locale, "{}", err);

        let full = self.full_key(key);
        let lenient = |bundle: &LocaleBundle| {
            resolve(
                bundle,
                full.as_str(),
                substitutions,
                SubstitutionPolicy::KeepToken,
            )
            .ok()
        };

        if let ResolveError::MissingSubstitution { .. } = err
            && let Some(message) = self.catalog.bundle(&self.locale).and_then(lenient)
        {
            return message;
        }

        if self.locale != self.catalog.fallback_locale()
            && let Some(message) = self
                .catalog
                .bundle(self.catalog.fallback_locale())
                .and_then(lenient)
        {
            tracing::debug!(
                "Using '{}' message for '{}'",
                self.catalog.fallback_locale(),
                full
            );
            return message;
        }

        full.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::tree::test_support::bundle;
    use std::fs;
    use tempfile::tempdir;

    fn catalog(policy: SubstitutionPolicy) -> Catalog {
        let es = bundle(
            "es",
            r#"{"common": {"search": "Buscar", "close": "Cerrar", "greeting": "Hola {name}"}, "home": {"hero": {"title": "Bienvenidos"}}}"#,
        );
        let en = bundle(
            "en",
            r#"{"common": {"search": "Search", "greeting": "Hi {name}"}, "home": {"hero": {"title": "Welcome"}}}"#,
        );
        Catalog::new(
            MessageSchema::derive(es).unwrap(),
            [en],
            CatalogOptions {
                policy,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_locales_and_negotiation() {
        let catalog = catalog(SubstitutionPolicy::Fail);
        assert_eq!(catalog.locales(), vec!["en", "es"]);
        assert_eq!(catalog.negotiate("es-MX"), "es");
        assert_eq!(catalog.negotiate("en_GB"), "en");
        assert_eq!(catalog.negotiate("de"), "es");
        assert_eq!(catalog.fallback_locale(), "es");
    }

    #[test]
    fn test_try_t() {
        let catalog = catalog(SubstitutionPolicy::Fail);
        let en = catalog.translator("en");
        assert_eq!(en.try_t("common.search", None).unwrap(), "Search");
        assert!(matches!(
            en.try_t("common.close", None),
            Err(ResolveError::KeyNotFound { .. })
        ));
        assert!(matches!(
            en.try_t("common.nope", None),
            Err(ResolveError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_t_falls_back() {
        let catalog = catalog(SubstitutionPolicy::Fail);
        let en = catalog.translator("en");
        // Missing in en: canonical value.
        assert_eq!(en.t("common.close"), "Cerrar");
        // Unknown everywhere: the key itself.
        assert_eq!(en.t("common.nope"), "common.nope");
    }

    #[test]
    fn test_t_with_missing_substitution_keeps_token() {
        let catalog = catalog(SubstitutionPolicy::Fail);
        let en = catalog.translator("en");
        assert_eq!(
            en.t_with("common.greeting", &Substitutions::new().with("name", "Ana")),
            "Hi Ana"
        );
        assert_eq!(en.t_with("common.greeting", &Substitutions::new()), "Hi {name}");
        assert!(matches!(
            en.try_t("common.greeting", Some(&Substitutions::new())),
            Err(ResolveError::MissingSubstitution { .. })
        ));
    }

    #[test]
    fn test_empty_policy() {
        let catalog = catalog(SubstitutionPolicy::Empty);
        let es = catalog.translator("es");
        assert_eq!(es.t_with("common.greeting", &Substitutions::new()), "Hola ");
    }

    #[test]
    fn test_namespace_scoping() {
        let catalog = catalog(SubstitutionPolicy::Fail);
        let common = catalog.translator("en").namespace("common").unwrap();
        assert_eq!(common.current_namespace(), Some("common"));
        assert_eq!(common.t("search"), "Search");

        let hero = catalog
            .translator("es")
            .namespace("home")
            .unwrap()
            .namespace("hero")
            .unwrap();
        assert_eq!(hero.t("title"), "Bienvenidos");

        let err = catalog.translator("es").namespace("blog").unwrap_err();
        assert!(err.to_string().contains("available: common, home"));
    }

    #[test]
    fn test_unknown_fallback_locale_uses_canonical() {
        let es = bundle("es", r#"{"a": {"b": "c"}}"#);
        let catalog = Catalog::new(
            MessageSchema::derive(es).unwrap(),
            Vec::new(),
            CatalogOptions {
                fallback_locale: Some("fr".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(catalog.fallback_locale(), "es");
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("es.json"), r#"{"common": {"search": "Buscar"}}"#).unwrap();
        fs::write(dir.path().join("en.json"), r#"{"common": {"search": "Search"}}"#).unwrap();
        fs::write(dir.path().join("fr.json"), r#"{ broken"#).unwrap();

        let catalog = Catalog::load(dir.path(), "es", CatalogOptions::default()).unwrap();
        assert_eq!(catalog.locales(), vec!["en", "es"]);
        assert_eq!(catalog.translator("fr").t("common.search"), "Buscar");
    }

    #[test]
    fn test_load_missing_canonical() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("en.json"), r#"{"common": {"search": "Search"}}"#).unwrap();
        let err = Catalog::load(dir.path(), "es", CatalogOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Canonical locale 'es'"));
    }

    #[test]
    fn test_load_invalid_canonical() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("es.json"), r#"{"common": {}}"#).unwrap();
        let err = Catalog::load(dir.path(), "es", CatalogOptions::default()).unwrap_err();
        assert!(err.to_string().contains("namespace '(root)' has no messages"));
    }
}
