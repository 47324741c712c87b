use crate::i18n::Language;

/// Identity of a translation request: `(text, source, target)`.
///
/// `new` keeps the caller's casing (trimmed only) and is used for the
/// cache; `folded` lowercases as well and is used for lexicon lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationKey {
    text: String,
    source: Language,
    target: Language,
}

impl TranslationKey {
    pub fn new(text: &str, source: Language, target: Language) -> Self {
        Self {
            text: text.trim().to_string(),
            source,
            target,
        }
    }

    pub fn folded(text: &str, source: Language, target: Language) -> Self {
        Self {
            text: text.trim().to_lowercase(),
            source,
            target,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> Language {
        self.source
    }

    pub fn target(&self) -> Language {
        self.target
    }
}

/// Which strategy produced a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Lexicon,
    RemoteDirect,
    RemotePivot,
}

/// An accepted translation.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationCandidate {
    text: String,
    quality_score: f64,
    origin: Origin,
}

impl TranslationCandidate {
    /// Scores outside `0.0..=1.0` are clamped; NaN becomes `0.0`.
    pub fn new(text: impl Into<String>, quality_score: f64, origin: Origin) -> Self {
        let quality_score = if quality_score.is_nan() {
            0.0
        } else {
            quality_score.clamp(0.0, 1.0)
        };

        Self {
            text: text.into(),
            quality_score,
            origin,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn quality_score(&self) -> f64 {
        self.quality_score
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// The same translation, re-labelled as served from the cache.
    pub fn served_from_cache(self) -> Self {
        Self {
            origin: Origin::Cache,
            ..self
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
