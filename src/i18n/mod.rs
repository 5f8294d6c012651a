//! Locale registry and its collaborators.
//!
//! # Architecture
//!
//! - `registry`: The ordered set of known locales, loaded from a locale table
//! - `locale`: Borrowed view of a registered locale (code and id)
//! - `source`: Where locale rows come from and how the active locale is resolved
//!
//! # Example
//!
//! ```rust,ignore
//! use translatable_rules::i18n::{LocaleRegistry, SqliteSource};
//!
//! let source = SqliteSource::open("data/locales.db")?;
//! let mut locales = LocaleRegistry::from_source(config.locales, source)?;
//!
//! locales.add_composite("en", "US");
//! assert!(locales.has("en-US"));
//! ```

mod locale;
mod registry;
mod source;

pub use locale::Locale;
pub use registry::{LocaleRegistry, DEFAULT_SEPARATOR};
pub use source::{
    FixedLocale, LocaleColumns, LocaleResolver, LocaleRow, LocaleSource, MemorySource,
    SqliteSource,
};
