//! Error types for locale loading and rule expansion.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The locale table configuration is missing or empty.
    #[error("locales are not defined: `{option}` must be configured before loading locales")]
    LocalesNotDefined { option: &'static str },

    /// A locale passed to the rule factory is not known to the registry.
    #[error("The locale [{0}] is not defined in available locales.")]
    InvalidLocale(String),

    /// The locale data source could not be read.
    #[error("locale source error: {0}")]
    Source(String),

    /// The placeholder pattern built from prefix and suffix did not compile.
    #[error("invalid placeholder pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Unrecognized rule format name.
    #[error("unknown rule format '{0}', expected 'array' or 'key'")]
    InvalidFormat(String),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Source(err.to_string())
    }
}
