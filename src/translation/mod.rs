//! Layered translation resolution.
//!
//! # Architecture
//!
//! - `key`: Request identity and accepted-translation types
//! - `cache`: Bounded LRU cache of accepted translations
//! - `remote`: The `RemoteTranslationClient` seam and small adapters
//! - `selection`: Picks one candidate out of a provider response
//! - `mymemory`: HTTP client for the MyMemory translation API
//!
//! `TranslationResolver::translate` tries, in order: cache, local lexicon,
//! a direct remote call, a two-hop remote call through the pivot language,
//! and finally returns the input unchanged. It never fails.
//!
//! # Example
//!
//! ```rust,ignore
//! use polyglot_resolver::i18n::Language;
//! use polyglot_resolver::translation::{OfflineClient, TranslationResolver};
//!
//! let resolver = TranslationResolver::new(OfflineClient);
//! let text = resolver.translate("bonjour", Language::FRENCH, Language::ARABIC).await;
//! assert_eq!(text, "مرحبا");
//! ```

mod cache;
mod key;
mod mymemory;
mod remote;
mod selection;

pub use cache::{TranslationCache, DEFAULT_CACHE_CAPACITY};
pub use key::{Origin, TranslationCandidate, TranslationKey};
pub use mymemory::{MyMemoryClient, RemoteError};
pub use remote::{
    FnClient, OfflineClient, Provenance, RemoteCandidates, RemoteTranslationClient,
    ScoredCandidate,
};
pub use selection::{select_candidate, MIN_MEMORY_SCORE};

use crate::config::Config;
use crate::i18n::text::{fold, preview};
use crate::i18n::{
    Language, LanguageDetector, LocalLexicon, QualityValidator, TranslationMetrics,
};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

const LOG_PREVIEW_CHARS: usize = 30;

/// Behaviour switches for a resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    /// When source and target are equal, guess the real source language
    /// instead of returning the text untouched.
    pub auto_correct_source: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            auto_correct_source: true,
        }
    }
}

pub struct TranslationResolver<C> {
    client: C,
    cache: Arc<TranslationCache>,
    lexicon: Arc<LocalLexicon>,
    detector: LanguageDetector,
    metrics: TranslationMetrics,
    options: ResolverOptions,
}

impl TranslationResolver<MyMemoryClient> {
    /// Resolver backed by MyMemory, configured from the environment.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = MyMemoryClient::new(config)?;

        Ok(Self::new(client)
            .with_cache(Arc::new(TranslationCache::with_capacity(
                config.cache_capacity,
            )))
            .with_detector(LanguageDetector::new(config.default_language))
            .with_options(ResolverOptions {
                auto_correct_source: config.auto_correct_source,
            }))
    }
}

impl<C: RemoteTranslationClient> TranslationResolver<C> {
    /// A resolver with its own empty cache and the bundled lexicon.
    pub fn new(client: C) -> Self {
        Self {
            client,
            cache: Arc::new(TranslationCache::new()),
            lexicon: LocalLexicon::builtin(),
            detector: LanguageDetector::default(),
            metrics: TranslationMetrics::new(),
            options: ResolverOptions::default(),
        }
    }

    pub fn with_cache(mut self, cache: Arc<TranslationCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_lexicon(mut self, lexicon: Arc<LocalLexicon>) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn with_detector(mut self, detector: LanguageDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }

    pub fn lexicon(&self) -> &LocalLexicon {
        &self.lexicon
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    /// Heuristic, offline language detection.
    pub fn detect(&self, text: &str) -> Language {
        self.detector.detect(text)
    }

    /// Drop every cached translation so the next requests are resolved again.
    pub fn clear_cache(&self) {
        let dropped = self.cache.len();
        self.cache.clear();
        info!("Translation cache cleared ({} entries dropped)", dropped);
    }

    /// Translate `text` from `source` to `target`.
    ///
    /// Never fails: when no strategy produces an acceptable translation the
    /// input is returned unchanged.
    pub async fn translate(&self, text: &str, source: Language, target: Language) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let requested = TranslationKey::new(text, source, target);
        let mut source = source;

        if source == target {
            if !self.options.auto_correct_source {
                debug!("Source equals target ({}), returning text as-is", target);
                return text.to_string();
            }

            match self.correct_source(text, target) {
                Some(corrected) => {
                    info!(
                        "Auto-corrected source {} → {} for '{}'",
                        source,
                        corrected,
                        preview(text, LOG_PREVIEW_CHARS)
                    );
                    source = corrected;
                }
                None => return self.try_alternate_sources(text, target).await,
            }
        }

        let key = TranslationKey::new(text, source, target);

        if let Some(cached) = self.lookup_cache(&key, text) {
            return cached.into_text();
        }

        if let Some(hit) = self.lookup_lexicon(text, source, target) {
            self.metrics.record_lexicon_hit();
            info!(
                "Lexicon hit {}→{}: '{}'",
                source,
                target,
                preview(text, LOG_PREVIEW_CHARS)
            );
            return self.store(&requested, &key, hit);
        }

        if let Some(direct) = self.translate_direct(text, source, target).await {
            return self.store(&requested, &key, direct);
        }

        if let Some(pivoted) = self.translate_via_pivot(text, source, target).await {
            self.metrics.record_pivot_success();
            return self.store(&requested, &key, pivoted);
        }

        self.metrics.record_exhausted();
        warn!(
            "All translation strategies failed {}→{}, returning original: '{}'",
            source,
            target,
            preview(text, LOG_PREVIEW_CHARS)
        );
        text.to_string()
    }

    /// Find another lexicon language whose dictionary knows `text` as a
    /// phrase translating into `target`.
    fn correct_source(&self, text: &str, target: Language) -> Option<Language> {
        let cleaned = fold(text);

        Language::with_lexicon()
            .into_iter()
            .filter(|language| *language != target)
            .find(|language| self.lexicon.contains(&cleaned, *language, target))
    }

    /// Ask the remote client for `text` in `target` from every other lexicon
    /// language in turn. Returns the original text when none answers.
    async fn try_alternate_sources(&self, text: &str, target: Language) -> String {
        let alternates: Vec<Language> = Language::with_lexicon()
            .into_iter()
            .filter(|language| *language != target)
            .collect();

        for alternate in &alternates {
            let key = TranslationKey::new(text, *alternate, target);
            if let Some(cached) = self.lookup_cache(&key, text) {
                return cached.into_text();
            }
        }

        for alternate in alternates {
            if let Some(candidate) = self.remote_candidate(text, alternate, target).await {
                info!(
                    "Alternate source {}→{} succeeded for '{}'",
                    alternate,
                    target,
                    preview(text, LOG_PREVIEW_CHARS)
                );
                let key = TranslationKey::new(text, alternate, target);
                let candidate = TranslationCandidate::new(
                    candidate.text,
                    candidate.score,
                    Origin::RemoteDirect,
                );
                self.cache.put(key, candidate.clone());
                return candidate.into_text();
            }
        }

        debug!(
            "No alternate source produced a translation into {} for '{}'",
            target,
            preview(text, LOG_PREVIEW_CHARS)
        );
        text.to_string()
    }

    /// Cached translation for `key`, re-validated against `original`.
    /// Entries that no longer pass validation are evicted.
    fn lookup_cache(&self, key: &TranslationKey, original: &str) -> Option<TranslationCandidate> {
        let Some(cached) = self.cache.get(key) else {
            self.metrics.record_cache_miss();
            return None;
        };

        match QualityValidator::assess(cached.text(), original, key.target()) {
            Ok(()) => {
                self.metrics.record_cache_hit();
                debug!(
                    "Cache hit {}→{}: '{}'",
                    key.source(),
                    key.target(),
                    preview(original, LOG_PREVIEW_CHARS)
                );
                Some(cached.served_from_cache())
            }
            Err(rejection) => {
                self.cache.invalidate(key);
                self.metrics.record_cache_invalidation();
                self.metrics.record_cache_miss();
                debug!(
                    "Evicted cached translation for '{}': {}",
                    preview(original, LOG_PREVIEW_CHARS),
                    rejection
                );
                None
            }
        }
    }

    /// Exact folded phrase first, then the phrase with symbols stripped.
    fn lookup_lexicon(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Option<TranslationCandidate> {
        let hit = self.lexicon.lookup(text, source, target).or_else(|| {
            let cleaned = fold(text);
            if cleaned != text.trim().to_lowercase() {
                self.lexicon.lookup(&cleaned, source, target)
            } else {
                None
            }
        })?;

        Some(TranslationCandidate::new(hit, 1.0, Origin::Lexicon))
    }

    /// One remote round trip reduced to the best acceptable candidate.
    async fn remote_candidate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Option<ScoredCandidate> {
        self.metrics.record_api_call();

        let selected = self
            .client
            .translate_via_api(text, source, target)
            .await
            .and_then(|response| select_candidate(&response, text, target));

        if selected.is_none() {
            self.metrics.record_api_unavailable();
            info!(
                "Remote translation unavailable {}→{} for '{}'",
                source,
                target,
                preview(text, LOG_PREVIEW_CHARS)
            );
        }

        selected
    }

    async fn translate_direct(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Option<TranslationCandidate> {
        let candidate = self.remote_candidate(text, source, target).await?;
        Some(TranslationCandidate::new(
            candidate.text,
            candidate.score,
            Origin::RemoteDirect,
        ))
    }

    /// Two hops through the pivot language. Skipped when either side already
    /// is the pivot.
    async fn translate_via_pivot(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Option<TranslationCandidate> {
        let pivot = Language::pivot();
        if source == pivot || target == pivot {
            return None;
        }

        info!(
            "Trying pivot {}→{}→{} for '{}'",
            source,
            pivot,
            target,
            preview(text, LOG_PREVIEW_CHARS)
        );

        let first = self.pivot_hop(text, source, pivot).await?;
        if let Err(rejection) = QualityValidator::assess(first.text(), text, pivot) {
            debug!("Pivot first hop rejected: {}", rejection);
            return None;
        }

        let second = self.pivot_hop(first.text(), pivot, target).await?;
        if let Err(rejection) = QualityValidator::assess(second.text(), text, target) {
            debug!("Pivot second hop rejected: {}", rejection);
            return None;
        }

        info!("Pivot translation succeeded {}→{}→{}", source, pivot, target);

        let score = first.quality_score() * second.quality_score();
        Some(TranslationCandidate::new(
            second.into_text(),
            score,
            Origin::RemotePivot,
        ))
    }

    async fn pivot_hop(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Option<TranslationCandidate> {
        if let Some(hit) = self.lookup_lexicon(text, source, target) {
            debug!("Pivot hop {}→{} served by lexicon", source, target);
            return Some(hit);
        }

        self.translate_direct(text, source, target).await
    }

    /// Cache under the resolved key and, when the source was corrected, under
    /// the key the caller asked for as well.
    fn store(
        &self,
        requested: &TranslationKey,
        resolved: &TranslationKey,
        candidate: TranslationCandidate,
    ) -> String {
        if requested != resolved {
            self.cache.put(requested.clone(), candidate.clone());
        }
        self.cache.put(resolved.clone(), candidate.clone());
        candidate.into_text()
    }
}
