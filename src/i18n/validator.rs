//! Translation quality gate.
//!
//! Every candidate coming from the cache or the remote provider passes
//! through `QualityValidator` before it reaches a caller. Lexicon entries are
//! curated and skip this check.

use crate::i18n::text::strip_symbols;
use crate::i18n::Language;
use thiserror::Error;

/// Sentinel the upstream provider embeds in place of a translation when it
/// rate-limits or refuses a request.
pub const UPSTREAM_WARNING_MARKER: &str = "MYMEMORY WARNING";

/// Fragments that indicate a leaked technical payload rather than prose.
const TECHNICAL_FRAGMENTS: [&str; 4] = ["http", "@", "<", ">"];

/// Why a candidate translation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("candidate is blank")]
    Blank,

    #[error("candidate is identical to the original text")]
    Identity,

    #[error("candidate contains the upstream warning marker")]
    UpstreamWarning,

    #[error("candidate contains technical fragment '{0}'")]
    TechnicalPayload(&'static str),

    #[error("candidate is {length} chars, limit is {limit}")]
    Oversized { length: usize, limit: usize },

    #[error("candidate has no {script} characters")]
    MissingScript { script: &'static str },
}

/// Validator for translation quality.
pub struct QualityValidator;

impl QualityValidator {
    /// Check whether `candidate` is an acceptable translation of `original`
    /// into `target`.
    pub fn is_valid(candidate: &str, original: &str, target: Language) -> bool {
        Self::assess(candidate, original, target).is_ok()
    }

    /// Like `is_valid`, but reports the first rule the candidate broke.
    pub fn assess(candidate: &str, original: &str, target: Language) -> Result<(), Rejection> {
        if candidate.trim().is_empty() {
            return Err(Rejection::Blank);
        }

        let clean_candidate = strip_symbols(candidate);
        let clean_original = strip_symbols(original);

        if clean_candidate.to_lowercase() == clean_original.to_lowercase() {
            return Err(Rejection::Identity);
        }

        if candidate.to_uppercase().contains(UPSTREAM_WARNING_MARKER) {
            return Err(Rejection::UpstreamWarning);
        }

        if let Some(fragment) = TECHNICAL_FRAGMENTS
            .iter()
            .find(|fragment| candidate.contains(**fragment))
        {
            return Err(Rejection::TechnicalPayload(fragment));
        }

        let length = clean_candidate.chars().count();
        let limit = clean_original.chars().count() * 5 + 50;
        if length > limit {
            return Err(Rejection::Oversized { length, limit });
        }

        if let Some(script) = target.script() {
            if script.count_in(candidate) == 0 {
                return Err(Rejection::MissingScript {
                    script: script.name,
                });
            }
        }

        Ok(())
    }
}
