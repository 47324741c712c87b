//! Language type: validated language code.
//!
//! A `Language` can only be built from a code present and enabled in the
//! registry, so every value carries its registry metadata.

use crate::i18n::{LanguageConfig, LanguageRegistry, ScriptRange};
use anyhow::{bail, Result};
use std::fmt;

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "fr", "en", "ar")
    code: &'static str,
}

impl Language {
    pub const FRENCH: Language = Language { code: "fr" };
    pub const ENGLISH: Language = Language { code: "en" };
    pub const ARABIC: Language = Language { code: "ar" };

    /// Create a Language from a language code string.
    ///
    /// The code is matched case-insensitively after trimming.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is registered and enabled
    /// * `Err` if the code is not found or the language is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let normalized = code.trim().to_lowercase();

        match LanguageRegistry::get().get_by_code(&normalized) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// The pivot language used for two-hop translation (English).
    pub fn pivot() -> Language {
        Language {
            code: LanguageRegistry::get().pivot().code,
        }
    }

    /// Languages with lexicon and detector data, in priority order.
    pub fn with_lexicon() -> Vec<Language> {
        LanguageRegistry::get()
            .list_lexicon()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for values built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// The script a translation into this language must contain, if any.
    pub fn script(&self) -> Option<ScriptRange> {
        self.config().script
    }

    pub fn is_pivot(&self) -> bool {
        self.config().is_pivot
    }

    pub fn has_lexicon(&self) -> bool {
        self.config().has_lexicon
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(Language::FRENCH.code(), "fr");
        assert_eq!(Language::ENGLISH.code(), "en");
        assert_eq!(Language::ARABIC.code(), "ar");
        assert_eq!(Language::ARABIC.native_name(), "العربية");
    }

    #[test]
    fn test_from_code_normalizes_input() {
        assert_eq!(Language::from_code(" FR ").ok(), Some(Language::FRENCH));
        assert_eq!(Language::from_code("ar").ok(), Some(Language::ARABIC));
    }

    #[test]
    fn test_from_code_remote_only_language() {
        let spanish = Language::from_code("es").expect("Spanish is registered");
        assert_eq!(spanish.name(), "Spanish");
        assert!(!spanish.has_lexicon());
        assert!(spanish.script().is_none());
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("klingon");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
        assert!(Language::from_code("").is_err());
    }

    #[test]
    fn test_pivot_is_english() {
        assert_eq!(Language::pivot(), Language::ENGLISH);
        assert!(Language::ENGLISH.is_pivot());
        assert!(!Language::FRENCH.is_pivot());
    }

    #[test]
    fn test_with_lexicon_order() {
        assert_eq!(
            Language::with_lexicon(),
            vec![Language::FRENCH, Language::ENGLISH, Language::ARABIC]
        );
    }

    #[test]
    fn test_script_only_for_arabic() {
        assert_eq!(Language::ARABIC.script(), Some(ScriptRange::ARABIC));
        assert!(Language::FRENCH.script().is_none());
    }

    #[test]
    fn test_display_is_code() {
        assert_eq!(Language::ARABIC.to_string(), "ar");
        assert_eq!(format!("{}→{}", Language::FRENCH, Language::ENGLISH), "fr→en");
    }
}
