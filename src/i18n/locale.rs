//! Locale type: a registered locale code and its id.

use serde::Serialize;

/// A locale as stored in the registry.
///
/// The id is whatever the locale source supplied for the code, or the code
/// itself for locales registered at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Locale<'a> {
    code: &'a str,
    id: &'a str,
}

impl<'a> Locale<'a> {
    pub(crate) fn new(code: &'a str, id: &'a str) -> Self {
        Self { code, id }
    }

    /// The locale code (e.g. "en", "en-US")
    pub fn code(&self) -> &'a str {
        self.code
    }

    /// The id supplied by the locale source
    pub fn id(&self) -> &'a str {
        self.id
    }

    /// Whether the locale was registered without a separate id
    pub fn is_self_identified(&self) -> bool {
        self.code == self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_accessors() {
        let locale = Locale::new("en", "1");
        assert_eq!(locale.code(), "en");
        assert_eq!(locale.id(), "1");
        assert!(!locale.is_self_identified());
    }

    #[test]
    fn test_locale_self_identified() {
        assert!(Locale::new("fr", "fr").is_self_identified());
    }

    #[test]
    fn test_locale_serializes_code_and_id() {
        let json = serde_json::to_value(Locale::new("en-US", "9")).expect("Should serialize");
        assert_eq!(json, serde_json::json!({ "code": "en-US", "id": "9" }));
    }
}
