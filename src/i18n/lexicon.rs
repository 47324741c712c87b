//! Curated bidirectional phrase dictionary.
//!
//! The bundled table covers greetings and platform vocabulary for French,
//! English and Arabic. It is built once, never mutated, and matched exactly
//! on the trimmed, lowercased phrase.

use crate::i18n::Language;
use crate::translation::TranslationKey;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

const FR: Language = Language::FRENCH;
const EN: Language = Language::ENGLISH;
const AR: Language = Language::ARABIC;

/// `(phrase, source, target, translation)`
const BUILTIN_ENTRIES: &[(&str, Language, Language, &str)] = &[
    // French → Arabic
    ("bonjour", FR, AR, "مرحبا"),
    ("bonsoir", FR, AR, "مساء الخير"),
    ("salut", FR, AR, "أهلاً"),
    ("merci", FR, AR, "شكراً"),
    ("bienvenue", FR, AR, "أهلاً وسهلاً"),
    ("oui", FR, AR, "نعم"),
    ("non", FR, AR, "لا"),
    ("comment allez-vous", FR, AR, "كيف حالك"),
    ("au revoir", FR, AR, "مع السلامة"),
    ("s'il vous plaît", FR, AR, "من فضلك"),
    ("excusez-moi", FR, AR, "عذراً"),
    ("je suis", FR, AR, "أنا"),
    ("bien", FR, AR, "جيد"),
    ("très bien", FR, AR, "جيد جداً"),
    ("comment", FR, AR, "كيف"),
    ("pourquoi", FR, AR, "لماذا"),
    ("quand", FR, AR, "متى"),
    ("travail", FR, AR, "عمل"),
    ("formation", FR, AR, "تدريب"),
    ("emploi", FR, AR, "وظيفة"),
    ("recherche", FR, AR, "بحث"),
    ("communauté", FR, AR, "مجتمع"),
    ("message", FR, AR, "رسالة"),
    ("groupe", FR, AR, "مجموعة"),
    ("événement", FR, AR, "حدث"),
    ("profil", FR, AR, "ملف شخصي"),
    // French → English
    ("bonjour", FR, EN, "Hello"),
    ("bonsoir", FR, EN, "Good evening"),
    ("salut", FR, EN, "Hi"),
    ("merci", FR, EN, "Thank you"),
    ("bienvenue", FR, EN, "Welcome"),
    ("oui", FR, EN, "Yes"),
    ("non", FR, EN, "No"),
    ("au revoir", FR, EN, "Goodbye"),
    ("comment allez-vous", FR, EN, "How are you"),
    ("bien", FR, EN, "Good"),
    ("très bien", FR, EN, "Very good"),
    ("travail", FR, EN, "Work"),
    ("formation", FR, EN, "Training"),
    ("emploi", FR, EN, "Job"),
    ("recherche", FR, EN, "Search"),
    // English → Arabic
    ("hello", EN, AR, "مرحبا"),
    ("hi", EN, AR, "أهلاً"),
    ("good morning", EN, AR, "صباح الخير"),
    ("good evening", EN, AR, "مساء الخير"),
    ("thank you", EN, AR, "شكراً"),
    ("yes", EN, AR, "نعم"),
    ("no", EN, AR, "لا"),
    ("goodbye", EN, AR, "مع السلامة"),
    ("please", EN, AR, "من فضلك"),
    ("welcome", EN, AR, "أهلاً وسهلاً"),
    ("how are you", EN, AR, "كيف حالك"),
    ("good", EN, AR, "جيد"),
    ("work", EN, AR, "عمل"),
    ("training", EN, AR, "تدريب"),
    ("job", EN, AR, "وظيفة"),
    ("search", EN, AR, "بحث"),
    ("community", EN, AR, "مجتمع"),
    // English → French
    ("hello", EN, FR, "Bonjour"),
    ("hi", EN, FR, "Salut"),
    ("thank you", EN, FR, "Merci"),
    ("yes", EN, FR, "Oui"),
    ("no", EN, FR, "Non"),
    ("goodbye", EN, FR, "Au revoir"),
    ("welcome", EN, FR, "Bienvenue"),
    ("good", EN, FR, "Bien"),
    // Arabic → French
    ("مرحبا", AR, FR, "Bonjour"),
    ("شكراً", AR, FR, "Merci"),
    ("نعم", AR, FR, "Oui"),
    ("لا", AR, FR, "Non"),
    ("أهلاً", AR, FR, "Salut"),
    ("مع السلامة", AR, FR, "Au revoir"),
    // Arabic → English
    ("مرحبا", AR, EN, "Hello"),
    ("شكراً", AR, EN, "Thank you"),
    ("نعم", AR, EN, "Yes"),
    ("لا", AR, EN, "No"),
];

static BUILTIN: OnceLock<Arc<LocalLexicon>> = OnceLock::new();

/// Static dictionary keyed by case-folded `(phrase, source, target)`.
#[derive(Debug, Clone, Default)]
pub struct LocalLexicon {
    entries: HashMap<TranslationKey, String>,
}

impl LocalLexicon {
    /// The bundled dictionary, built on first use and shared afterwards.
    pub fn builtin() -> Arc<LocalLexicon> {
        BUILTIN
            .get_or_init(|| {
                Arc::new(Self::from_entries(BUILTIN_ENTRIES.iter().map(
                    |(phrase, source, target, translation)| {
                        (*phrase, *source, *target, *translation)
                    },
                )))
            })
            .clone()
    }

    /// A dictionary without any entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a dictionary from `(phrase, source, target, translation)` rows.
    /// Later rows overwrite earlier ones with the same key.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Language, Language, &'a str)>,
    {
        let entries = entries
            .into_iter()
            .map(|(phrase, source, target, translation)| {
                (
                    TranslationKey::folded(phrase, source, target),
                    translation.to_string(),
                )
            })
            .collect();

        Self { entries }
    }

    /// Exact lookup of the trimmed, lowercased phrase.
    pub fn lookup(&self, text: &str, source: Language, target: Language) -> Option<&str> {
        self.entries
            .get(&TranslationKey::folded(text, source, target))
            .map(String::as_str)
    }

    pub fn contains(&self, text: &str, source: Language, target: Language) -> bool {
        self.lookup(text, source, target).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
