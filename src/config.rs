use crate::validation::RuleFormat;
use anyhow::{Context, Result};

/// Describes where locales come from and how composite locales are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalesConfig {
    /// Table holding one row per locale
    pub table: Option<String>,
    /// Column holding the locale code (e.g. "en", "en-US")
    pub code_column: Option<String>,
    /// Column holding the locale id
    pub id_column: Option<String>,
    /// Separator between language and country in composite locales
    pub separator: Option<String>,
    /// Locale used by `current()` when no resolver value is available
    pub default_locale: String,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            table: None,
            code_column: None,
            id_column: None,
            separator: None,
            default_locale: "en".to_string(),
        }
    }
}

/// Defaults for the validation rule factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFactoryConfig {
    pub format: RuleFormat,
    pub prefix: String,
    pub suffix: String,
}

impl Default for RuleFactoryConfig {
    fn default() -> Self {
        Self {
            format: RuleFormat::Array,
            prefix: "%".to_string(),
            suffix: "%".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub locales: LocalesConfig,
    pub rule_factory: RuleFactoryConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = RuleFactoryConfig::default();

        Ok(Self {
            locales: LocalesConfig {
                // Left unset here; `LocaleRegistry::load` reports them as missing
                table: non_empty_var("TRANSLATABLE_LOCALES_TABLE"),
                code_column: non_empty_var("TRANSLATABLE_LOCALES_TABLE_COLUMN"),
                id_column: non_empty_var("TRANSLATABLE_LOCALES_LANG_ID_COLUMN"),
                separator: non_empty_var("TRANSLATABLE_LOCALE_SEPARATOR"),
                default_locale: std::env::var("TRANSLATABLE_LOCALE")
                    .unwrap_or_else(|_| "en".to_string()),
            },
            rule_factory: RuleFactoryConfig {
                format: match std::env::var("TRANSLATABLE_RULE_FORMAT") {
                    Ok(value) => value
                        .parse()
                        .context("TRANSLATABLE_RULE_FORMAT is invalid")?,
                    Err(_) => defaults.format,
                },
                prefix: std::env::var("TRANSLATABLE_RULE_PREFIX").unwrap_or(defaults.prefix),
                suffix: std::env::var("TRANSLATABLE_RULE_SUFFIX").unwrap_or(defaults.suffix),
            },
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
