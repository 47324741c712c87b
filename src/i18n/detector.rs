//! Offline, heuristic language detection.
//!
//! Detection runs a fixed cascade of cheap signals and stops at the first
//! one that fires:
//!
//! 1. script share (Arabic letters above 30% of all letters)
//! 2. French diacritics
//! 3. French elision (`j'`, `l'`, `d'`, ...)
//! 4. a single known French word
//! 5. function-word voting, French first, then English
//!
//! When nothing fires the configured default language is returned.

use crate::i18n::text::strip_symbols;
use crate::i18n::{Language, ScriptRange};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Share of letters that must belong to a script for the script to win.
const SCRIPT_SHARE_THRESHOLD: f64 = 0.3;

/// Texts with at most this many tokens need only one function word.
const SHORT_TEXT_TOKENS: usize = 5;

const FRENCH_DIACRITICS: [char; 13] = [
    'é', 'è', 'ê', 'ë', 'à', 'â', 'ù', 'û', 'ç', 'ô', 'î', 'ï', 'ü',
];

const FRENCH_SINGLE_WORDS: &[&str] = &[
    "bonjour", "salut", "merci", "bienvenue", "oui", "non", "bien", "bonsoir", "comment",
    "pourquoi", "aussi", "alors", "toujours", "jamais", "peut", "tous", "très", "même", "encore",
    "ici", "matin", "soir", "jour", "nuit", "homme", "femme", "enfant", "maison", "travail",
    "école", "voiture", "ville", "pays", "communauté", "groupe", "profil", "message", "emploi",
    "recherche", "formation", "événement", "nouveau", "nouvelle", "petit", "grand", "monde",
    "temps", "année", "chose", "gens", "avoir", "être", "faire", "aller", "venir", "prendre",
    "mettre", "donner", "parler", "partir", "aimer", "voir", "savoir", "pouvoir", "vouloir",
    "devoir", "falloir", "aujourd", "demain", "hier", "maintenant", "bientôt", "beaucoup",
    "quelque", "chaque", "autre", "plusieurs",
];

const FRENCH_FUNCTION_WORDS: &[&str] = &[
    "le", "la", "les", "de", "du", "des", "un", "une", "est", "et", "en", "que", "qui", "pour",
    "dans", "sur", "avec", "pas", "ce", "je", "tu", "il", "elle", "nous", "vous", "ils",
    "elles", "on", "ne", "se", "au", "aux", "son", "sa", "ses", "mon", "ma", "mes", "ton", "ta",
    "tes", "notre", "votre", "leur", "leurs", "mais", "ou", "donc", "car", "ni", "très", "plus",
    "moins", "cette", "ces", "cet", "comme", "tout", "tous", "toute",
];

const ENGLISH_FUNCTION_WORDS: &[&str] = &[
    "the", "is", "are", "was", "were", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "can", "this", "that", "these", "those", "with", "from", "into",
    "about", "than", "been", "being", "which", "what", "where", "when",
];

static ELISION_REGEX: OnceLock<Regex> = OnceLock::new();
static TOKEN_SPLIT_REGEX: OnceLock<Regex> = OnceLock::new();

/// Function words voting for one language.
struct FunctionWords {
    language: Language,
    words: HashSet<&'static str>,
}

/// Heuristic classifier mapping raw text to a supported language.
pub struct LanguageDetector {
    default_language: Language,
    script_languages: Vec<(Language, ScriptRange)>,
    single_words: HashSet<&'static str>,
    function_words: Vec<FunctionWords>,
}

impl LanguageDetector {
    /// Build a detector that falls back to `default_language` when no signal
    /// is found.
    pub fn new(default_language: Language) -> Self {
        Self {
            default_language,
            script_languages: vec![(Language::ARABIC, ScriptRange::ARABIC)],
            single_words: FRENCH_SINGLE_WORDS.iter().copied().collect(),
            function_words: vec![
                FunctionWords {
                    language: Language::FRENCH,
                    words: FRENCH_FUNCTION_WORDS.iter().copied().collect(),
                },
                FunctionWords {
                    language: Language::ENGLISH,
                    words: ENGLISH_FUNCTION_WORDS.iter().copied().collect(),
                },
            ],
        }
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    /// Detect the language of `text`. Never fails.
    pub fn detect(&self, text: &str) -> Language {
        let cleaned = strip_symbols(text);
        if cleaned.is_empty() {
            return self.default_language;
        }

        if let Some(language) = self.detect_script(&cleaned) {
            return language;
        }

        let lower = cleaned.to_lowercase();

        if lower.chars().any(|c| FRENCH_DIACRITICS.contains(&c)) {
            return Language::FRENCH;
        }

        let elision = ELISION_REGEX.get_or_init(|| Regex::new(r"\b[jldcnqs]'\w+").unwrap());
        if elision.is_match(&lower) {
            return Language::FRENCH;
        }

        if !lower.contains(char::is_whitespace) && self.single_words.contains(lower.as_str()) {
            return Language::FRENCH;
        }

        self.vote_function_words(&lower).unwrap_or(self.default_language)
    }

    fn detect_script(&self, cleaned: &str) -> Option<Language> {
        let total_letters = cleaned.chars().filter(|c| c.is_alphabetic()).count();
        if total_letters == 0 {
            return None;
        }

        self.script_languages
            .iter()
            .find(|(_, script)| {
                script.count_in(cleaned) as f64 > total_letters as f64 * SCRIPT_SHARE_THRESHOLD
            })
            .map(|(language, _)| *language)
    }

    fn vote_function_words(&self, lower: &str) -> Option<Language> {
        let splitter = TOKEN_SPLIT_REGEX.get_or_init(|| Regex::new(r"[\s']+").unwrap());
        let tokens: Vec<&str> = splitter.split(lower).filter(|t| !t.is_empty()).collect();
        let short_text = tokens.len() <= SHORT_TEXT_TOKENS;

        let mut higher_priority_hits = 0;
        for (priority, candidate) in self.function_words.iter().enumerate() {
            let count = tokens
                .iter()
                .filter(|token| candidate.words.contains(**token))
                .count();

            let threshold_met = count >= 2 || (count >= 1 && short_text);
            // Past the first language, one hit wins if every earlier language scored zero.
            let uncontested = priority > 0 && count >= 1 && higher_priority_hits == 0;
            if threshold_met || uncontested {
                return Some(candidate.language);
            }
            higher_priority_hits += count;
        }

        None
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(Language::FRENCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> Language {
        LanguageDetector::default().detect(text)
    }

    // ==================== Documented scenarios ====================

    #[test]
    fn test_french_sentence() {
        assert_eq!(detect("Bonjour tout le monde"), Language::FRENCH);
    }

    #[test]
    fn test_english_sentence() {
        assert_eq!(detect("Hello, how are you?"), Language::ENGLISH);
    }

    #[test]
    fn test_arabic_sentence() {
        assert_eq!(detect("مرحبا بكم"), Language::ARABIC);
    }

    #[test]
    fn test_empty_returns_default() {
        assert_eq!(detect(""), Language::FRENCH);
        assert_eq!(detect("   "), Language::FRENCH);
    }

    #[test]
    fn test_contraction_rule() {
        assert_eq!(detect("j'adore"), Language::FRENCH);
    }

    // ==================== Individual signals ====================

    #[test]
    fn test_emoji_only_returns_default() {
        let detector = LanguageDetector::new(Language::ENGLISH);
        assert_eq!(detector.detect("🎉🔥👍"), Language::ENGLISH);
    }

    #[test]
    fn test_arabic_mixed_with_latin_above_threshold() {
        assert_eq!(detect("مرحبا my friend"), Language::ARABIC);
    }

    #[test]
    fn test_arabic_below_threshold_is_ignored() {
        // 1 Arabic letter out of 33 letters
        assert_eq!(
            detect("this is what we were talking about with ب"),
            Language::ENGLISH
        );
    }

    #[test]
    fn test_diacritics() {
        assert_eq!(detect("Deja vu a la cafe crème"), Language::FRENCH);
    }

    #[test]
    fn test_single_french_word() {
        assert_eq!(
            LanguageDetector::new(Language::ENGLISH).detect("Merci"),
            Language::FRENCH
        );
    }

    #[test]
    fn test_single_word_with_emoji() {
        assert_eq!(
            LanguageDetector::new(Language::ENGLISH).detect("salut 👋"),
            Language::FRENCH
        );
    }

    #[test]
    fn test_short_text_single_french_function_word() {
        assert_eq!(
            LanguageDetector::new(Language::ENGLISH).detect("pour Marie"),
            Language::FRENCH
        );
    }

    #[test]
    fn test_long_english_text_single_function_word() {
        assert_eq!(
            detect("I really love this place so much today"),
            Language::ENGLISH
        );
    }

    #[test]
    fn test_long_text_two_english_function_words() {
        assert_eq!(
            detect("Where is the meeting happening next Monday morning"),
            Language::ENGLISH
        );
    }

    #[test]
    fn test_no_signal_returns_default() {
        assert_eq!(detect("xyz123 qwerty"), Language::FRENCH);
        assert_eq!(
            LanguageDetector::new(Language::ARABIC).detect("xyz123"),
            Language::ARABIC
        );
    }

    #[test]
    fn test_default_language_accessor() {
        assert_eq!(
            LanguageDetector::new(Language::ENGLISH).default_language(),
            Language::ENGLISH
        );
    }
}
