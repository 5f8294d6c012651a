//! Expands translatable validation rules into one rule per locale.
//!
//! A key is translatable when it contains both the placeholder prefix and
//! suffix, e.g. `%name%` with the default `%` delimiters. For every active
//! locale the placeholder is rewritten according to the [`RuleFormat`]:
//!
//! | Format  | `%name%` for `en` |
//! |---------|-------------------|
//! | `Array` | `en.name`         |
//! | `Key`   | `name:en`         |
//!
//! Placeholders inside the rule values (e.g. `required_with:%title%`) are
//! rewritten the same way.

use crate::config::RuleFactoryConfig;
use crate::error::{Error, Result};
use crate::i18n::LocaleRegistry;
use crate::validation::placeholder::Placeholder;
use crate::validation::rules::{RuleDeclaration, RuleSpec};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Clause separator inside a rule string
const RULE_SEPARATOR: char = '|';

/// How a placeholder is rewritten for a locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RuleFormat {
    /// `locale.name`
    #[default]
    Array,
    /// `name:locale`
    Key,
}

impl RuleFormat {
    pub(crate) fn apply(self, locale: &str, name: &str) -> String {
        match self {
            RuleFormat::Array => format!("{}.{}", locale, name),
            RuleFormat::Key => format!("{}:{}", name, locale),
        }
    }
}

impl FromStr for RuleFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "array" => Ok(RuleFormat::Array),
            "key" => Ok(RuleFormat::Key),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for RuleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleFormat::Array => f.write_str("array"),
            RuleFormat::Key => f.write_str("key"),
        }
    }
}

/// Per-call overrides; unset fields fall back to [`RuleFactoryConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOptions {
    pub format: Option<RuleFormat>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl RuleOptions {
    /// Override the rule format
    pub fn format(mut self, format: RuleFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Override the placeholder prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Override the placeholder suffix
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }
}

/// Expands rule declarations for a selection of registry locales.
#[derive(Debug)]
pub struct RuleFactory<'a> {
    registry: &'a LocaleRegistry,
    format: RuleFormat,
    placeholder: Placeholder,
    locales: Vec<String>,
}

impl<'a> RuleFactory<'a> {
    /// Create a factory targeting every locale currently in `registry`.
    pub fn new(
        registry: &'a LocaleRegistry,
        defaults: &RuleFactoryConfig,
        options: RuleOptions,
    ) -> Result<Self> {
        let prefix = options.prefix.unwrap_or_else(|| defaults.prefix.clone());
        let suffix = options.suffix.unwrap_or_else(|| defaults.suffix.clone());

        Ok(Self {
            registry,
            format: options.format.unwrap_or(defaults.format),
            placeholder: Placeholder::new(&prefix, &suffix)?,
            locales: registry.all(),
        })
    }

    /// Build a factory, select `locales` and parse `rules` in one call.
    pub fn make(
        registry: &'a LocaleRegistry,
        defaults: &RuleFactoryConfig,
        rules: &RuleDeclaration,
        options: RuleOptions,
        locales: Option<&[&str]>,
    ) -> Result<RuleDeclaration> {
        let mut factory = Self::new(registry, defaults, options)?;
        factory.set_locales(locales)?;
        Ok(factory.parse(rules))
    }

    /// Select the locales rules are expanded for.
    ///
    /// `None` selects every locale in the registry. An explicit list must
    /// only contain registered locales; an empty list expands translatable
    /// keys to nothing. On error the previous selection is kept.
    pub fn set_locales(&mut self, locales: Option<&[&str]>) -> Result<&mut Self> {
        let Some(locales) = locales else {
            self.locales = self.registry.all();
            return Ok(self);
        };

        if let Some(missing) = locales.iter().find(|locale| !self.registry.has(locale)) {
            warn!(locale = %missing, "Rejected locale not defined in registry");
            return Err(Error::InvalidLocale(missing.to_string()));
        }

        self.locales = locales.iter().map(|locale| locale.to_string()).collect();
        Ok(self)
    }

    /// Expand `input`: translatable keys are repeated once per active
    /// locale, every other entry is copied as is.
    pub fn parse(&self, input: &RuleDeclaration) -> RuleDeclaration {
        let mut rules = RuleDeclaration::with_capacity(input.len());

        for (key, value) in input {
            if !self.placeholder.is_translatable(key) {
                rules.insert(key.clone(), value.clone());
                continue;
            }

            for locale in &self.locales {
                rules.insert(self.format_key(locale, key), self.format_rule(locale, value));
            }
        }

        debug!(
            input = input.len(),
            output = rules.len(),
            locales = self.locales.len(),
            "Expanded translatable rules"
        );
        rules
    }

    /// Rewrite the placeholders of a field key for `locale`.
    pub fn format_key(&self, locale: &str, key: &str) -> String {
        self.placeholder.replace(key, self.format, locale)
    }

    /// Rewrite a rule spec for `locale`, clause by clause and element by
    /// element.
    pub fn format_rule(&self, locale: &str, rule: &RuleSpec) -> RuleSpec {
        match rule {
            RuleSpec::Rules(rules) if rules.contains(RULE_SEPARATOR) => RuleSpec::Rules(
                rules
                    .split(RULE_SEPARATOR)
                    .map(|clause| self.placeholder.replace(clause, self.format, locale))
                    .collect::<Vec<_>>()
                    .join("|"),
            ),
            RuleSpec::Rules(rules) => {
                RuleSpec::Rules(self.placeholder.replace(rules, self.format, locale))
            }
            RuleSpec::List(list) => RuleSpec::List(
                list.iter()
                    .map(|rule| self.format_rule(locale, rule))
                    .collect(),
            ),
            RuleSpec::Scalar(_) => rule.clone(),
        }
    }

    /// The format placeholders are rewritten with
    pub fn format(&self) -> RuleFormat {
        self.format
    }

    /// Placeholder prefix
    pub fn prefix(&self) -> &str {
        self.placeholder.prefix()
    }

    /// Placeholder suffix
    pub fn suffix(&self) -> &str {
        self.placeholder.suffix()
    }

    /// The active locales, in expansion order
    pub fn locales(&self) -> &[String] {
        &self.locales
    }
}
