use crate::i18n::Language;
use crate::translation::DEFAULT_CACHE_CAPACITY;
use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_MYMEMORY_API_URL: &str = "https://api.mymemory.translated.net/get";
pub const DEFAULT_USER_AGENT: &str = "polyglot-resolver/0.1";
const DEFAULT_TIMEOUT_SECS: u64 = 8;

#[derive(Debug, Clone)]
pub struct Config {
    // MyMemory
    pub mymemory_api_url: String,
    pub mymemory_email: Option<String>,

    // HTTP
    pub request_timeout: Duration,
    pub user_agent: String,

    // Resolver
    pub cache_capacity: usize,
    pub default_language: Language,
    pub auto_correct_source: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            // MyMemory
            mymemory_api_url: std::env::var("MYMEMORY_API_URL")
                .unwrap_or(defaults.mymemory_api_url),
            mymemory_email: std::env::var("MYMEMORY_EMAIL")
                .ok()
                .filter(|v| !v.trim().is_empty()),

            // HTTP
            request_timeout: std::env::var("TRANSLATION_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            user_agent: std::env::var("TRANSLATION_USER_AGENT")
                .unwrap_or(defaults.user_agent),

            // Resolver
            cache_capacity: std::env::var("TRANSLATION_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|capacity| *capacity > 0)
                .unwrap_or(defaults.cache_capacity),
            default_language: match std::env::var("DEFAULT_LANGUAGE") {
                Ok(code) => Language::from_code(&code).context("Invalid DEFAULT_LANGUAGE")?,
                Err(_) => defaults.default_language,
            },
            auto_correct_source: std::env::var("TRANSLATION_AUTO_CORRECT")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.auto_correct_source),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mymemory_api_url: DEFAULT_MYMEMORY_API_URL.to_string(),
            mymemory_email: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            default_language: Language::FRENCH,
            auto_correct_source: true,
        }
    }
}

// Anything but an explicit "off" value keeps the flag enabled.
fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "MYMEMORY_API_URL",
        "MYMEMORY_EMAIL",
        "TRANSLATION_TIMEOUT_SECS",
        "TRANSLATION_USER_AGENT",
        "TRANSLATION_CACHE_CAPACITY",
        "DEFAULT_LANGUAGE",
        "TRANSLATION_AUTO_CORRECT",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.mymemory_api_url, DEFAULT_MYMEMORY_API_URL);
        assert_eq!(config.mymemory_email, None);
        assert_eq!(config.request_timeout, Duration::from_secs(8));
        assert_eq!(config.user_agent, "polyglot-resolver/0.1");
        assert_eq!(config.cache_capacity, 100);
        assert_eq!(config.default_language, Language::FRENCH);
        assert!(config.auto_correct_source);
    }

    #[test]
    #[serial]
    fn test_reads_overrides() {
        clear_env();
        std::env::set_var("MYMEMORY_API_URL", "http://localhost:9999/get");
        std::env::set_var("MYMEMORY_EMAIL", "ops@example.com");
        std::env::set_var("TRANSLATION_TIMEOUT_SECS", "3");
        std::env::set_var("TRANSLATION_CACHE_CAPACITY", "250");
        std::env::set_var("DEFAULT_LANGUAGE", " EN ");
        std::env::set_var("TRANSLATION_AUTO_CORRECT", "off");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.mymemory_api_url, "http://localhost:9999/get");
        assert_eq!(config.mymemory_email.as_deref(), Some("ops@example.com"));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.cache_capacity, 250);
        assert_eq!(config.default_language, Language::ENGLISH);
        assert!(!config.auto_correct_source);
    }

    #[test]
    #[serial]
    fn test_invalid_numbers_fall_back_to_defaults() {
        clear_env();
        std::env::set_var("TRANSLATION_TIMEOUT_SECS", "soon");
        std::env::set_var("TRANSLATION_CACHE_CAPACITY", "0");
        std::env::set_var("MYMEMORY_EMAIL", "  ");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.request_timeout, Duration::from_secs(8));
        assert_eq!(config.cache_capacity, 100);
        assert_eq!(config.mymemory_email, None);
    }

    #[test]
    #[serial]
    fn test_unknown_default_language_is_an_error() {
        clear_env();
        std::env::set_var("DEFAULT_LANGUAGE", "klingon");

        let result = Config::from_env();
        clear_env();

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("DEFAULT_LANGUAGE"));
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("FALSE"));
        assert!(!parse_flag(" 0 "));
        assert!(!parse_flag("off"));
    }
}
