//! Locale registry: the ordered set of known locales.
//!
//! The registry is loaded from a [`LocaleSource`] table and can be adjusted at
//! runtime with [`LocaleRegistry::add`] and [`LocaleRegistry::forget`]. Codes
//! keep their insertion order, which is also the order rule expansion uses.

use crate::config::LocalesConfig;
use crate::error::{Error, Result};
use crate::i18n::source::{LocaleColumns, LocaleResolver, LocaleSource};
use crate::i18n::Locale;
use indexmap::IndexMap;
use tracing::debug;

/// Separator used when none is configured
pub const DEFAULT_SEPARATOR: &str = "-";

/// Registry of known locale codes and their ids.
pub struct LocaleRegistry {
    config: LocalesConfig,
    source: Box<dyn LocaleSource + Send + Sync>,
    resolver: Option<Box<dyn LocaleResolver + Send + Sync>>,
    /// code -> id
    locales: IndexMap<String, String>,
}

impl LocaleRegistry {
    /// Create an empty registry backed by `source`.
    ///
    /// Nothing is read until [`load`](Self::load) is called.
    pub fn new(config: LocalesConfig, source: impl LocaleSource + Send + Sync + 'static) -> Self {
        Self {
            config,
            source: Box::new(source),
            resolver: None,
            locales: IndexMap::new(),
        }
    }

    /// Create a registry and load it from `source` immediately.
    ///
    /// # Errors
    /// * [`Error::LocalesNotDefined`] if the table or column names are missing
    /// * [`Error::Source`] if the table could not be read
    pub fn from_source(
        config: LocalesConfig,
        source: impl LocaleSource + Send + Sync + 'static,
    ) -> Result<Self> {
        let mut registry = Self::new(config, source);
        registry.load()?;
        Ok(registry)
    }

    /// Use `resolver` to determine the caller's locale in [`current`](Self::current).
    pub fn with_resolver(mut self, resolver: impl LocaleResolver + Send + Sync + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Replace the registry contents with the rows of the configured table.
    ///
    /// The configuration is checked and the whole table is read before the
    /// current mapping is replaced; on error the registry is left as it was.
    /// Rows with a null id map the code to itself.
    pub fn load(&mut self) -> Result<()> {
        let table = required(&self.config.table, "locales_table")?;
        let code_column = required(&self.config.code_column, "locales_table_column")?;
        let id_column = required(&self.config.id_column, "locales_lang_id_column")?;

        let rows = self.source.fetch(
            table,
            LocaleColumns {
                code: code_column,
                id: id_column,
            },
        )?;

        let mut locales = IndexMap::with_capacity(rows.len());
        for row in rows {
            let id = row.id.unwrap_or_else(|| row.code.clone());
            locales.insert(row.code, id);
        }

        self.locales = locales;
        debug!(
            table,
            count = self.len(),
            self_identified = self.iter().filter(|l| l.is_self_identified()).count(),
            "Loaded locales"
        );
        Ok(())
    }

    /// Register `locale` with itself as id, overwriting any previous id.
    pub fn add(&mut self, locale: impl Into<String>) {
        let locale = locale.into();
        self.locales.insert(locale.clone(), locale);
    }

    /// Register a plain locale code. Same as [`add`](Self::add).
    pub fn add_simple(&mut self, locale: impl Into<String>) {
        self.add(locale);
    }

    /// Register the composite locale built from `language` and `country`.
    pub fn add_composite(&mut self, language: &str, country: &str) {
        let locale = self.get_country_locale(language, country);
        self.add(locale);
    }

    /// Remove `locale` if present. Remaining locales keep their order.
    pub fn forget(&mut self, locale: &str) {
        self.locales.shift_remove(locale);
    }

    /// Check if `locale` is registered.
    pub fn has(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// The id registered for `locale`
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.locales.get(locale).map(String::as_str)
    }

    /// All locale codes in insertion order.
    pub fn all(&self) -> Vec<String> {
        self.locales.keys().cloned().collect()
    }

    /// Iterate over registered locales in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Locale<'_>> {
        self.locales
            .iter()
            .map(|(code, id)| Locale::new(code.as_str(), id.as_str()))
    }

    /// Number of registered locales
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Whether no locale is registered
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// The caller's current locale.
    ///
    /// Uses the resolver's value when it is non-empty and the configured
    /// default otherwise. Known codes are mapped to their id; unknown values
    /// are returned as they are.
    pub fn current(&self) -> String {
        let locale = self
            .resolver
            .as_ref()
            .and_then(|resolver| resolver.resolve())
            .filter(|locale| !locale.is_empty())
            .unwrap_or_else(|| self.config.default_locale.clone());

        match self.locales.get(&locale) {
            Some(id) => id.clone(),
            None => locale,
        }
    }

    /// Separator between language and country.
    ///
    /// # Returns
    /// The configured separator, or [`DEFAULT_SEPARATOR`] when it is unset or empty.
    pub fn locale_separator(&self) -> &str {
        self.config
            .separator
            .as_deref()
            .filter(|separator| !separator.is_empty())
            .unwrap_or(DEFAULT_SEPARATOR)
    }

    /// Join `language` and `country` with the locale separator (e.g. "en-US").
    pub fn get_country_locale(&self, language: &str, country: &str) -> String {
        format!("{}{}{}", language, self.locale_separator(), country)
    }

    /// The language part of a composite locale ("en-US" -> "en").
    pub fn get_language_from_country_based_locale<'a>(&self, locale: &'a str) -> &'a str {
        locale
            .split_once(self.locale_separator())
            .map_or(locale, |(language, _)| language)
    }

    /// Check if `locale` is a composite locale (contains the separator).
    pub fn is_locale_country_based(&self, locale: &str) -> bool {
        locale.contains(self.locale_separator())
    }
}

impl<'a> IntoIterator for &'a LocaleRegistry {
    type Item = Locale<'a>;
    type IntoIter = Box<dyn Iterator<Item = Locale<'a>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl std::fmt::Debug for LocaleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleRegistry")
            .field("config", &self.config)
            .field("locales", &self.locales)
            .finish_non_exhaustive()
    }
}

fn required<'a>(value: &'a Option<String>, option: &'static str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|value| !value.is_empty())
        .ok_or(Error::LocalesNotDefined { option })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::source::{FixedLocale, LocaleRow, MemorySource};
    use proptest::prelude::*;

    // ==================== Helper Functions ====================

    fn test_config() -> LocalesConfig {
        LocalesConfig {
            table: Some("languages".to_string()),
            code_column: Some("code".to_string()),
            id_column: Some("id".to_string()),
            ..LocalesConfig::default()
        }
    }

    fn test_source() -> MemorySource {
        MemorySource::new().with_table(
            "languages",
            vec![
                LocaleRow::new("en", "1"),
                LocaleRow::new("fr", "2"),
                LocaleRow::new("de", "3"),
            ],
        )
    }

    fn loaded_registry() -> LocaleRegistry {
        LocaleRegistry::from_source(test_config(), test_source()).expect("Should load")
    }

    fn empty_registry() -> LocaleRegistry {
        LocaleRegistry::new(LocalesConfig::default(), MemorySource::new())
    }

    // ==================== Load Tests ====================

    #[test]
    fn test_load_reads_rows_in_order() {
        let registry = loaded_registry();

        assert_eq!(registry.all(), vec!["en", "fr", "de"]);
        assert_eq!(registry.get("fr"), Some("2"));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_load_replaces_previous_locales() {
        let mut registry = loaded_registry();
        registry.add("es");

        registry.load().expect("Should reload");

        assert!(!registry.has("es"));
        assert_eq!(registry.all(), vec!["en", "fr", "de"]);
    }

    #[test]
    fn test_load_empty_table_clears_registry() {
        let source = MemorySource::new().with_table("languages", Vec::new());
        let mut registry = LocaleRegistry::new(test_config(), source);
        registry.add("en");

        registry.load().expect("Should load");

        assert!(registry.is_empty());
        assert!(registry.all().is_empty());
    }

    #[test]
    fn test_load_duplicate_codes_keep_last_id() {
        let source = MemorySource::new().with_table(
            "languages",
            vec![
                LocaleRow::new("en", "1"),
                LocaleRow::new("fr", "2"),
                LocaleRow::new("en", "5"),
            ],
        );
        let registry = LocaleRegistry::from_source(test_config(), source).expect("Should load");

        assert_eq!(registry.all(), vec!["en", "fr"]);
        assert_eq!(registry.get("en"), Some("5"));
    }

    #[test]
    fn test_load_null_id_maps_to_code() {
        let source = MemorySource::new().with_table(
            "languages",
            vec![LocaleRow {
                code: "it".to_string(),
                id: None,
            }],
        );
        let registry = LocaleRegistry::from_source(test_config(), source).expect("Should load");

        assert_eq!(registry.get("it"), Some("it"));
    }

    #[test]
    fn test_load_missing_table_config() {
        let config = LocalesConfig {
            table: None,
            ..test_config()
        };
        let mut registry = LocaleRegistry::new(config, test_source());
        registry.add("en");

        let err = registry.load().unwrap_err();

        assert!(matches!(
            err,
            Error::LocalesNotDefined {
                option: "locales_table"
            }
        ));
        assert_eq!(registry.all(), vec!["en"]);
    }

    #[test]
    fn test_load_empty_code_column_config() {
        let config = LocalesConfig {
            code_column: Some(String::new()),
            ..test_config()
        };
        let err = LocaleRegistry::from_source(config, test_source()).unwrap_err();
        assert!(matches!(
            err,
            Error::LocalesNotDefined {
                option: "locales_table_column"
            }
        ));
    }

    #[test]
    fn test_load_missing_id_column_config() {
        let config = LocalesConfig {
            id_column: None,
            ..test_config()
        };
        let err = LocaleRegistry::from_source(config, test_source()).unwrap_err();
        assert!(err.to_string().contains("locales_lang_id_column"));
    }

    #[test]
    fn test_load_source_failure_keeps_previous_locales() {
        let config = LocalesConfig {
            table: Some("missing".to_string()),
            ..test_config()
        };
        let mut registry = LocaleRegistry::new(config, test_source());
        registry.add("en");

        let result = registry.load();

        assert!(matches!(result, Err(Error::Source(_))));
        assert_eq!(registry.all(), vec!["en"]);
    }

    // ==================== Mutation Tests ====================

    #[test]
    fn test_add_registers_self_identified_locale() {
        let mut registry = empty_registry();
        registry.add("en");

        assert!(registry.has("en"));
        assert_eq!(registry.get("en"), Some("en"));
        assert!(registry.iter().all(|l| l.is_self_identified()));
    }

    #[test]
    fn test_loaded_locales_are_not_self_identified() {
        let registry = loaded_registry();
        assert_eq!(registry.iter().filter(|l| l.is_self_identified()).count(), 0);
    }

    #[test]
    fn test_add_overwrites_loaded_id_in_place() {
        let mut registry = loaded_registry();
        registry.add("fr");

        assert_eq!(registry.get("fr"), Some("fr"));
        assert_eq!(registry.all(), vec!["en", "fr", "de"]);
    }

    #[test]
    fn test_add_simple_and_composite() {
        let mut registry = empty_registry();
        registry.add_simple("en");
        registry.add_composite("en", "US");

        assert_eq!(registry.all(), vec!["en", "en-US"]);
        assert_eq!(registry.get("en-US"), Some("en-US"));
    }

    #[test]
    fn test_forget_removes_locale_and_keeps_order() {
        let mut registry = loaded_registry();
        registry.forget("en");

        assert!(!registry.has("en"));
        assert_eq!(registry.get("en"), None);
        assert_eq!(registry.all(), vec!["fr", "de"]);
    }

    #[test]
    fn test_forget_unknown_locale_is_noop() {
        let mut registry = loaded_registry();
        registry.forget("xx");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_iter_yields_codes_and_ids() {
        let registry = loaded_registry();
        let locales: Vec<(&str, &str)> = registry.iter().map(|l| (l.code(), l.id())).collect();

        assert_eq!(locales, vec![("en", "1"), ("fr", "2"), ("de", "3")]);
        assert_eq!((&registry).into_iter().count(), 3);
    }

    // ==================== Current Locale Tests ====================

    #[test]
    fn test_current_uses_default_locale_id() {
        let registry = loaded_registry();
        assert_eq!(registry.current(), "1");
    }

    #[test]
    fn test_current_prefers_resolver() {
        let registry = loaded_registry().with_resolver(FixedLocale("de".to_string()));
        assert_eq!(registry.current(), "3");
    }

    #[test]
    fn test_current_empty_resolver_falls_back_to_default() {
        let registry = loaded_registry().with_resolver(|| Some(String::new()));
        assert_eq!(registry.current(), "1");
    }

    #[test]
    fn test_current_unknown_locale_passes_through() {
        let registry = loaded_registry().with_resolver(FixedLocale("pt-BR".to_string()));
        assert_eq!(registry.current(), "pt-BR");
    }

    // ==================== Composite Locale Tests ====================

    #[test]
    fn test_default_separator() {
        assert_eq!(empty_registry().locale_separator(), "-");
    }

    #[test]
    fn test_empty_separator_uses_default() {
        let config = LocalesConfig {
            separator: Some(String::new()),
            ..LocalesConfig::default()
        };
        let registry = LocaleRegistry::new(config, MemorySource::new());
        assert_eq!(registry.locale_separator(), "-");
    }

    #[test]
    fn test_custom_separator() {
        let config = LocalesConfig {
            separator: Some("_".to_string()),
            ..LocalesConfig::default()
        };
        let registry = LocaleRegistry::new(config, MemorySource::new());

        assert_eq!(registry.get_country_locale("de", "AT"), "de_AT");
        assert!(registry.is_locale_country_based("de_AT"));
        assert!(!registry.is_locale_country_based("de-AT"));
        assert_eq!(registry.get_language_from_country_based_locale("de_AT"), "de");
    }

    #[test]
    fn test_language_from_simple_locale() {
        let registry = empty_registry();
        assert_eq!(registry.get_language_from_country_based_locale("en"), "en");
    }

    #[test]
    fn test_language_from_locale_with_multiple_separators() {
        let registry = empty_registry();
        assert_eq!(
            registry.get_language_from_country_based_locale("zh-Hant-TW"),
            "zh"
        );
    }

    proptest! {
        #[test]
        fn prop_country_locale_round_trips_language(
            language in "[a-z]{2,3}",
            country in "[A-Z]{2}",
        ) {
            let registry = empty_registry();
            let composite = registry.get_country_locale(&language, &country);

            prop_assert_eq!(&composite, &format!("{}-{}", language, country));
            prop_assert!(registry.is_locale_country_based(&composite));
            prop_assert_eq!(
                registry.get_language_from_country_based_locale(&composite),
                language.as_str()
            );
        }

        #[test]
        fn prop_country_based_iff_contains_separator(code in "[a-zA-Z_-]{0,8}") {
            let registry = empty_registry();
            prop_assert_eq!(registry.is_locale_country_based(&code), code.contains('-'));
        }

        #[test]
        fn prop_add_then_forget(code in "[a-z]{2}(-[A-Z]{2})?") {
            let mut registry = empty_registry();
            registry.add(code.clone());
            prop_assert!(registry.has(&code));
            prop_assert_eq!(registry.get(&code), Some(code.as_str()));

            registry.forget(&code);
            prop_assert!(!registry.has(&code));
        }
    }
}
