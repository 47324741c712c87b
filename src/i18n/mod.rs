//! Language support: registry, detection, dictionary and quality checks.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported languages and their metadata
//! - `language`: Validated `Language` type built on the registry
//! - `detector`: Offline heuristic language detection
//! - `lexicon`: Curated phrase dictionary consulted before any remote call
//! - `validator`: Quality gate applied to cached and remote translations
//! - `metrics`: Per-resolver translation counters
//!
//! # Example
//!
//! ```rust,ignore
//! use polyglot_resolver::i18n::{Language, LanguageDetector};
//!
//! let detector = LanguageDetector::new(Language::FRENCH);
//! assert_eq!(detector.detect("مرحبا بكم"), Language::ARABIC);
//! ```

mod detector;
mod language;
mod lexicon;
mod metrics;
mod registry;
pub mod text;
mod validator;

pub use detector::LanguageDetector;
pub use language::Language;
pub use lexicon::LocalLexicon;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageConfig, LanguageRegistry, ScriptRange};
pub use validator::{QualityValidator, Rejection, UPSTREAM_WARNING_MARKER};
