//! Placeholder tokens inside rule keys and rule strings.

use crate::error::Result;
use crate::validation::RuleFormat;
use regex::{Captures, Regex};

/// Separator between the locale and the attribute in array-style keys
const KEY_SEPARATOR: char = '.';

/// Matches `prefix NAME suffix`, where NAME is one or more characters other
/// than `.` or any character of the prefix or suffix.
#[derive(Debug, Clone)]
pub struct Placeholder {
    prefix: String,
    suffix: String,
    pattern: Regex,
}

impl Placeholder {
    /// Compile the pattern for `prefix` and `suffix`.
    ///
    /// # Errors
    /// [`Error::Pattern`](crate::Error::Pattern) if the pattern does not compile.
    pub fn new(prefix: &str, suffix: &str) -> Result<Self> {
        let mut excluded = String::new();
        for c in std::iter::once(KEY_SEPARATOR).chain(prefix.chars()).chain(suffix.chars()) {
            // \x{..} is valid inside a class for any character
            excluded.push_str(&format!("\\x{{{:X}}}", c as u32));
        }

        let pattern = Regex::new(&format!(
            "{}([^{}]+){}",
            regex::escape(prefix),
            excluded,
            regex::escape(suffix)
        ))?;

        Ok(Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            pattern,
        })
    }

    /// The configured prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The configured suffix
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Whether `key` contains both the prefix and the suffix.
    pub fn is_translatable(&self, key: &str) -> bool {
        key.contains(&self.prefix) && key.contains(&self.suffix)
    }

    /// Rewrite every placeholder in `text` for `locale`.
    pub fn replace(&self, text: &str, format: RuleFormat, locale: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures<'_>| format.apply(locale, &caps[1]))
            .into_owned()
    }
}
