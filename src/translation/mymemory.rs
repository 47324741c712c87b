//! MyMemory translation API client.
//!
//! `GET {api_url}?q=<text>&langpair=<src>|<tgt>&mt=1[&de=<email>]`
//!
//! Transient failures (network, HTTP 429, HTTP 5xx) are retried with
//! exponential backoff. Every failure that survives the retries is logged and
//! reported to the resolver as `None`.

use crate::config::Config;
use crate::i18n::text::{preview, strip_symbols};
use crate::i18n::Language;
use crate::retry::{with_retry_if, RetryConfig};
use crate::translation::remote::{
    Provenance, RemoteCandidates, RemoteTranslationClient, ScoredCandidate,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::future::Future;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Why a MyMemory call failed.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The provider answered 200 but flagged the request itself
    #[error("provider rejected request ({status}): {details}")]
    Rejected { status: u16, details: String },

    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl RemoteError {
    /// Network failures, rate limiting and server errors are worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            RemoteError::Request(_) => true,
            RemoteError::Status { status, .. } => *status == 429 || *status >= 500,
            RemoteError::Rejected { .. } | RemoteError::Decode(_) => false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    response_data: ResponseData,

    #[serde(default, deserialize_with = "lenient_matches")]
    matches: Vec<ApiMatch>,

    // Number or string depending on the endpoint version
    #[serde(default)]
    response_status: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    #[serde(default)]
    translated_text: Option<String>,

    #[serde(default, rename = "match", deserialize_with = "lenient_score")]
    score: f64,
}

#[derive(Debug, Deserialize)]
struct ApiMatch {
    #[serde(default)]
    translation: Option<String>,

    #[serde(default, rename = "match", deserialize_with = "lenient_score")]
    score: f64,

    #[serde(default, rename = "created-by")]
    created_by: Option<String>,
}

/// Scores arrive as numbers, numeric strings or null. Anything that is not
/// a finite number counts as 0.
fn lenient_score<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let score = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(score.filter(|score| score.is_finite()).unwrap_or(0.0))
}

/// `matches` is an empty string instead of an empty array when nothing was
/// found; entries that do not parse are dropped.
fn lenient_matches<'de, D>(deserializer: D) -> std::result::Result<Vec<ApiMatch>, D::Error>
where
    D: Deserializer<'de>,
{
    let matches = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    };

    Ok(matches)
}

impl ApiResponse {
    fn status_code(&self) -> Option<u16> {
        match self.response_status.as_ref()? {
            Value::Number(number) => number.as_u64().and_then(|n| u16::try_from(n).ok()),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    fn into_candidates(self) -> RemoteCandidates {
        let matches = self
            .matches
            .into_iter()
            .filter_map(|entry| {
                let text = entry.translation?;
                let provenance = if entry.created_by.as_deref().unwrap_or("").contains("MT") {
                    Provenance::MachineTranslation
                } else {
                    Provenance::TranslationMemory
                };

                Some(ScoredCandidate {
                    text,
                    score: entry.score,
                    provenance,
                })
            })
            .collect();

        let primary_score = self.response_data.score;
        let primary = self
            .response_data
            .translated_text
            .filter(|text| !text.trim().is_empty())
            .map(|text| ScoredCandidate::machine(text, primary_score));

        RemoteCandidates { matches, primary }
    }
}

/// HTTP client for the public MyMemory endpoint.
#[derive(Debug, Clone)]
pub struct MyMemoryClient {
    http: reqwest::Client,
    api_url: String,
    email: Option<String>,
    retry: RetryConfig,
}

impl MyMemoryClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.request_timeout)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build MyMemory HTTP client")?;

        Ok(Self {
            http,
            api_url: config.mymemory_api_url.clone(),
            email: config.mymemory_email.clone(),
            retry: RetryConfig::api_call(),
        })
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn fetch(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> std::result::Result<ApiResponse, RemoteError> {
        let langpair = format!("{}|{}", source, target);
        let mut query = vec![("q", text), ("langpair", langpair.as_str()), ("mt", "1")];
        if let Some(email) = &self.email {
            query.push(("de", email.as_str()));
        }

        let response = self
            .http
            .get(&self.api_url)
            .query(&query)
            .send()
            .await
            .map_err(RemoteError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ApiResponse = response.json().await.map_err(RemoteError::Decode)?;

        match parsed.status_code() {
            Some(code) if code != 200 => Err(RemoteError::Rejected {
                status: code,
                details: parsed.response_data.translated_text.unwrap_or_default(),
            }),
            _ => Ok(parsed),
        }
    }
}

impl RemoteTranslationClient for MyMemoryClient {
    fn translate_via_api(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> impl Future<Output = Option<RemoteCandidates>> + Send {
        async move {
            let clean_text = strip_symbols(text);
            if clean_text.is_empty() {
                warn!("Text is empty after cleaning, not calling MyMemory");
                return None;
            }

            debug!(
                "MyMemory call {}→{}: '{}'",
                source,
                target,
                preview(&clean_text, 30)
            );

            let operation = format!("MyMemory {}→{}", source, target);
            let result = with_retry_if(
                &self.retry,
                &operation,
                || self.fetch(&clean_text, source, target),
                RemoteError::is_retryable,
            )
            .await;

            match result {
                Ok(response) => {
                    let candidates = response.into_candidates();
                    debug!(
                        "MyMemory returned {} matches (primary: {})",
                        candidates.matches.len(),
                        candidates.primary.is_some()
                    );
                    Some(candidates)
                }
                Err(e) => {
                    error!("MyMemory API error: {}", e);
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    // ==================== Helper Functions ====================

    fn create_test_client(server: &MockServer) -> MyMemoryClient {
        let config = Config {
            mymemory_api_url: format!("{}/get", server.uri()),
            request_timeout: Duration::from_secs(2),
            ..Config::default()
        };

        MyMemoryClient::new(&config)
            .expect("Client should build")
            .with_retry(RetryConfig::new(3, Duration::from_millis(10)))
    }

    fn success_body() -> serde_json::Value {
        serde_json::json!({
            "responseData": {
                "translatedText": "Bonjour le monde",
                "match": 0.85
            },
            "responseStatus": 200,
            "matches": [
                {
                    "translation": "Bonjour le monde",
                    "match": 0.85,
                    "created-by": "MT!"
                },
                {
                    "translation": "Salut tout le monde",
                    "match": "0.7",
                    "created-by": "Anonymous"
                }
            ]
        })
    }

    // ==================== Request Tests ====================

    #[tokio::test]
    async fn test_request_parameters_and_parsing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/get"))
            .and(query_param("q", "Hello world"))
            .and(query_param("langpair", "en|fr"))
            .and(query_param("mt", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        let result = client
            .translate_via_api("Hello world 🌍", Language::ENGLISH, Language::FRENCH)
            .await
            .expect("Should return candidates");

        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].provenance, Provenance::MachineTranslation);
        assert_eq!(result.matches[1].provenance, Provenance::TranslationMemory);
        assert_eq!(result.matches[1].score, 0.7);

        let primary = result.primary.expect("Primary should be present");
        assert_eq!(primary.text, "Bonjour le monde");
        assert_eq!(primary.score, 0.85);
    }

    #[tokio::test]
    async fn test_contact_email_is_sent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("de", "ops@example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config {
            mymemory_api_url: format!("{}/get", server.uri()),
            mymemory_email: Some("ops@example.com".to_string()),
            ..Config::default()
        };
        let client = MyMemoryClient::new(&config).unwrap();

        assert!(client
            .translate_via_api("Hello world", Language::ENGLISH, Language::FRENCH)
            .await
            .is_some());
    }

    #[tokio::test]
    async fn test_symbol_only_text_is_not_sent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(0)
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        assert!(client
            .translate_via_api("👍🎉 !!", Language::ENGLISH, Language::FRENCH)
            .await
            .is_none());
    }

    // ==================== Response Shape Tests ====================

    #[tokio::test]
    async fn test_empty_string_matches_are_tolerated() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "responseData": { "translatedText": "مرحبا", "match": null },
                "responseStatus": "200",
                "matches": ""
            })))
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        let result = client
            .translate_via_api("Hello", Language::ENGLISH, Language::ARABIC)
            .await
            .expect("Should return candidates");

        assert!(result.matches.is_empty());
        assert_eq!(result.primary.unwrap().text, "مرحبا");
    }

    #[tokio::test]
    async fn test_non_finite_string_scores_become_zero() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "responseData": { "translatedText": "Bonne soirée", "match": "inf" },
                "responseStatus": 200,
                "matches": [
                    { "translation": "Bonne soirée", "match": 0.95, "created-by": "MT!" },
                    { "translation": "Soir", "match": "NaN", "created-by": "MT!" }
                ]
            })))
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        let result = client
            .translate_via_api("Good evening", Language::ENGLISH, Language::FRENCH)
            .await
            .expect("Should return candidates");

        assert_eq!(result.matches[1].score, 0.0);
        assert_eq!(result.primary.as_ref().unwrap().score, 0.0);

        let picked = crate::translation::select_candidate(&result, "Good evening", Language::FRENCH)
            .expect("Should pick a candidate");
        assert_eq!(picked.text, "Bonne soirée");
    }

    #[tokio::test]
    async fn test_provider_rejection_in_body_returns_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "responseData": { "translatedText": "'XX' IS AN INVALID TARGET LANGUAGE" },
                "responseStatus": 403,
                "matches": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        assert!(client
            .translate_via_api("Hello", Language::ENGLISH, Language::FRENCH)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_malformed_json_returns_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        assert!(client
            .translate_via_api("Hello", Language::ENGLISH, Language::FRENCH)
            .await
            .is_none());
    }

    // ==================== Retry Tests ====================

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        assert!(client
            .translate_via_api("Hello world", Language::ENGLISH, Language::FRENCH)
            .await
            .is_some());
    }

    #[tokio::test]
    async fn test_rate_limit_exhausts_retries() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .expect(3)
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        assert!(client
            .translate_via_api("Hello", Language::ENGLISH, Language::FRENCH)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad langpair"))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        assert!(client
            .translate_via_api("Hello", Language::ENGLISH, Language::FRENCH)
            .await
            .is_none());
    }

    #[test]
    fn test_retryable_classification() {
        let status = |status| RemoteError::Status {
            status,
            body: String::new(),
        };

        assert!(status(429).is_retryable());
        assert!(status(500).is_retryable());
        assert!(status(503).is_retryable());
        assert!(!status(400).is_retryable());
        assert!(!status(404).is_retryable());
        assert!(!RemoteError::Rejected {
            status: 403,
            details: String::new()
        }
        .is_retryable());
    }
}
