//! Expand locale-agnostic validation rules into per-locale rules.
//!
//! ```rust,ignore
//! use translatable_rules::config::Config;
//! use translatable_rules::i18n::{LocaleRegistry, SqliteSource};
//! use translatable_rules::validation::{RuleDeclaration, RuleFactory, RuleOptions};
//!
//! let config = Config::from_env()?;
//! let locales = LocaleRegistry::from_source(config.locales, SqliteSource::open("locales.db")?)?;
//!
//! let rules: RuleDeclaration = serde_json::from_str(r#"{"%title%": "required|max:120"}"#)?;
//! let expanded = RuleFactory::make(&locales, &config.rule_factory, &rules, RuleOptions::default(), None)?;
//! // {"en.title": "required|max:120", "fr.title": "required|max:120", ...}
//! ```

pub mod config;
pub mod error;
pub mod i18n;
pub mod validation;

pub use error::{Error, Result};
