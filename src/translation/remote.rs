//! Boundary to the remote machine-translation provider.
//!
//! The resolver only sees `RemoteTranslationClient`. Implementations own
//! transport, timeouts and provider quirks, and must turn every failure into
//! `None`.

use crate::i18n::Language;
use std::future::{self, Future};
use std::sync::Arc;

/// Where a remote candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Produced by a machine translation engine
    MachineTranslation,
    /// Recalled from a (possibly crowd-sourced) translation memory
    TranslationMemory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub text: String,
    pub score: f64,
    pub provenance: Provenance,
}

impl ScoredCandidate {
    pub fn machine(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
            provenance: Provenance::MachineTranslation,
        }
    }

    pub fn memory(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
            provenance: Provenance::TranslationMemory,
        }
    }
}

/// Everything a provider returned for one request. `matches` is unordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteCandidates {
    pub matches: Vec<ScoredCandidate>,

    /// The provider's single headline answer, if it has one
    pub primary: Option<ScoredCandidate>,
}

impl RemoteCandidates {
    pub fn new(matches: Vec<ScoredCandidate>) -> Self {
        Self {
            matches,
            primary: None,
        }
    }

    pub fn with_primary(mut self, primary: ScoredCandidate) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.primary.is_none()
    }
}

/// A remote translation provider.
///
/// One call is one round trip. `None` and an empty result both mean the
/// provider had nothing to offer; neither is an error for the caller.
pub trait RemoteTranslationClient: Send + Sync {
    fn translate_via_api(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> impl Future<Output = Option<RemoteCandidates>> + Send;
}

impl<T: RemoteTranslationClient> RemoteTranslationClient for Arc<T> {
    fn translate_via_api(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> impl Future<Output = Option<RemoteCandidates>> + Send {
        (**self).translate_via_api(text, source, target)
    }
}

/// Adapts a plain function into a client.
///
/// ```rust,ignore
/// let client = FnClient::new(|text, _source, _target| {
///     Some(RemoteCandidates::new(vec![ScoredCandidate::machine(text.to_uppercase(), 0.9)]))
/// });
/// ```
pub struct FnClient<F>(F);

impl<F> FnClient<F>
where
    F: Fn(&str, Language, Language) -> Option<RemoteCandidates> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> RemoteTranslationClient for FnClient<F>
where
    F: Fn(&str, Language, Language) -> Option<RemoteCandidates> + Send + Sync,
{
    fn translate_via_api(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> impl Future<Output = Option<RemoteCandidates>> + Send {
        future::ready((self.0)(text, source, target))
    }
}

/// A client for offline operation: it never has an answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineClient;

impl RemoteTranslationClient for OfflineClient {
    fn translate_via_api(
        &self,
        _text: &str,
        _source: Language,
        _target: Language,
    ) -> impl Future<Output = Option<RemoteCandidates>> + Send {
        future::ready(None)
    }
}
