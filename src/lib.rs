//! Layered text translation with offline language detection.
//!
//! A `TranslationResolver` answers from its LRU cache, then the bundled
//! lexicon, then a remote provider directly, then through English as a pivot
//! language, and falls back to the input text. Remote candidates and cached
//! entries pass a quality gate before they are returned.

pub mod config;
pub mod i18n;
pub mod retry;
pub mod translation;

pub use i18n::{Language, LanguageDetector};
pub use translation::{ResolverOptions, TranslationResolver};
