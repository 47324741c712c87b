use anyhow::{bail, Result};
use polyglot_resolver::config::Config;
use polyglot_resolver::i18n::{Language, LanguageRegistry};
use polyglot_resolver::translation::TranslationResolver;
use tracing::info;

fn usage() -> String {
    let codes: Vec<&str> = LanguageRegistry::get()
        .list_enabled()
        .iter()
        .map(|lang| lang.code)
        .collect();

    format!(
        "Usage: polyglot <target-language> <text...> (languages: {})",
        codes.join(", ")
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("polyglot_resolver=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(target_code) = args.next() else {
        bail!(usage());
    };
    let text = args.collect::<Vec<_>>().join(" ");
    if text.trim().is_empty() {
        bail!(usage());
    }

    let target = Language::from_code(&target_code)?;
    let config = Config::from_env()?;
    let resolver = TranslationResolver::from_config(&config)?;

    let source = resolver.detect(&text);
    info!("Detected source language: {} ({})", source.name(), source);

    let translated = resolver.translate(&text, source, target).await;
    println!("{}", translated);

    let report = resolver.metrics().report();
    info!("Translation metrics: {}", serde_json::to_string(&report)?);

    Ok(())
}
