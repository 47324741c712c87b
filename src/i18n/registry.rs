//! Language registry: Single source of truth for all supported languages.
//!
//! The registry is built once on first access (`OnceLock`) and is immutable
//! afterwards. Only languages flagged `has_lexicon` carry dictionary and
//! detector data; the others are accepted structurally and resolve through
//! the cache and remote paths only.

use std::sync::OnceLock;

/// A contiguous block of Unicode code points used by a writing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptRange {
    /// Human readable script name (e.g., "Arabic")
    pub name: &'static str,

    /// First code point of the block (inclusive)
    pub start: char,

    /// Last code point of the block (inclusive)
    pub end: char,
}

impl ScriptRange {
    /// The Arabic block, U+0600 to U+06FF.
    pub const ARABIC: ScriptRange = ScriptRange {
        name: "Arabic",
        start: '\u{0600}',
        end: '\u{06FF}',
    };

    /// Check whether a character falls inside this block.
    pub fn contains(&self, c: char) -> bool {
        (self.start..=self.end).contains(&c)
    }

    /// Count the characters of `text` that fall inside this block.
    pub fn count_in(&self, text: &str) -> usize {
        text.chars().filter(|c| self.contains(*c)).count()
    }
}

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "fr", "en", "ar")
    pub code: &'static str,

    /// English name of the language (e.g., "French", "Arabic")
    pub name: &'static str,

    /// Native name of the language (e.g., "Français", "العربية")
    pub native_name: &'static str,

    /// Script a translation into this language must contain, if any
    pub script: Option<ScriptRange>,

    /// Whether the bundled lexicon and detector know this language
    pub has_lexicon: bool,

    /// Whether this is the pivot language for two-hop translation (only one should be true)
    pub is_pivot: bool,

    /// Whether this language is enabled for use
    pub enabled: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in registry order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Languages that carry lexicon and detector data, in priority order.
    ///
    /// This order is also the order in which alternate source languages are
    /// tried when a caller passes identical source and target languages.
    pub fn list_lexicon(&self) -> Vec<&LanguageConfig> {
        self.languages
            .iter()
            .filter(|lang| lang.enabled && lang.has_lexicon)
            .collect()
    }

    /// Get the pivot language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one pivot language
    /// (this indicates a configuration error in `default_languages`).
    pub fn pivot(&self) -> &LanguageConfig {
        let pivots: Vec<_> = self.languages.iter().filter(|lang| lang.is_pivot).collect();

        match pivots.len() {
            0 => panic!("No pivot language found in registry"),
            1 => pivots[0],
            _ => panic!("Multiple pivot languages found in registry"),
        }
    }
}

/// Default language configurations.
///
/// French, English and Arabic are fully supported. Spanish, German and
/// Italian are remote-only.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            script: None,
            has_lexicon: true,
            is_pivot: false,
            enabled: true,
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            script: None,
            has_lexicon: true,
            is_pivot: true,
            enabled: true,
        },
        LanguageConfig {
            code: "ar",
            name: "Arabic",
            native_name: "العربية",
            script: Some(ScriptRange::ARABIC),
            has_lexicon: true,
            is_pivot: false,
            enabled: true,
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            script: None,
            has_lexicon: false,
            is_pivot: false,
            enabled: true,
        },
        LanguageConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            script: None,
            has_lexicon: false,
            is_pivot: false,
            enabled: true,
        },
        LanguageConfig {
            code: "it",
            name: "Italian",
            native_name: "Italiano",
            script: None,
            has_lexicon: false,
            is_pivot: false,
            enabled: true,
        },
    ]
}
