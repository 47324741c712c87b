//! Picking one translation out of a provider response.
//!
//! Machine translations win over translation-memory recalls because memory
//! entries are crowd-sourced and often attached to unrelated segments.

use crate::i18n::text::strip_symbols;
use crate::i18n::{Language, QualityValidator};
use crate::translation::remote::{Provenance, RemoteCandidates, ScoredCandidate};
use tracing::debug;

/// Minimum score for a translation-memory candidate to be used.
pub const MIN_MEMORY_SCORE: f64 = 0.3;

// NaN scores rank below every real score.
fn rank(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

/// Choose the best acceptable candidate for `source_text` translated into
/// `target`, or `None` when nothing in the response is usable.
pub fn select_candidate(
    response: &RemoteCandidates,
    source_text: &str,
    target: Language,
) -> Option<ScoredCandidate> {
    let clean_source = strip_symbols(source_text).to_lowercase();

    let acceptable = |candidate: &&ScoredCandidate| {
        let text = candidate.text.trim();
        !text.is_empty()
            && text.to_lowercase() != clean_source
            && QualityValidator::is_valid(text, source_text, target)
    };

    let best_of = |provenance: Provenance| {
        response
            .matches
            .iter()
            .filter(|candidate| candidate.provenance == provenance)
            .filter(acceptable)
            .fold(None::<&ScoredCandidate>, |best, candidate| match best {
                Some(current) if rank(current.score) >= rank(candidate.score) => Some(current),
                _ => Some(candidate),
            })
    };

    if let Some(machine) = best_of(Provenance::MachineTranslation) {
        debug!("Using MT result (score={}): '{}'", machine.score, machine.text);
        return Some(machine.clone());
    }

    if let Some(memory) = best_of(Provenance::TranslationMemory) {
        if memory.score >= MIN_MEMORY_SCORE {
            debug!("Using TM result (score={}): '{}'", memory.score, memory.text);
            return Some(memory.clone());
        }
        debug!(
            "Best TM result below threshold (score={} < {})",
            memory.score, MIN_MEMORY_SCORE
        );
    }

    response
        .primary
        .as_ref()
        .filter(acceptable)
        .inspect(|primary| debug!("Using primary translation: '{}'", primary.text))
        .cloned()
}
