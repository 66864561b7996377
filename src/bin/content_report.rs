//! Content report binary - checks content and dictionaries without serving
//!
//! Usage:
//!   cargo run --bin content-report
//!
//! Reads the same environment as the server (CONTENT_DIR, DICTIONARY_DIR).
//! Prints every locale's article listing, the slugs each locale serves only
//! through fallback, and dictionary parity against the default locale.
//! Exits non-zero when any article fails to load or a dictionary is missing
//! keys.

use anyhow::{bail, Context, Result};
use portfolio_site::articles::ArticleRepository;
use portfolio_site::articles::ContentIndex;
use portfolio_site::config::Config;
use portfolio_site::i18n::{DictionaryLoader, DictionaryValidator, Locale};
use std::collections::BTreeSet;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("content_report=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let index = ContentIndex::scan(&config.content_dir).context("Failed to scan content")?;
    let repo = ArticleRepository::new(index);
    let mut problems = 0;

    // Articles
    let all_slugs: BTreeSet<String> = repo
        .index()
        .entries_for(Locale::default_locale())
        .iter()
        .map(|entry| entry.slug.clone())
        .collect();

    for locale in Locale::all() {
        let articles = repo
            .list_articles(locale)
            .await
            .with_context(|| format!("Failed to list {} articles", locale))?;

        println!("\n=== {} ({} articles) ===", locale.name(), articles.len());
        for article in &articles {
            println!("  {}  {}  {}", article.date, article.slug, article.title);
        }

        let direct: BTreeSet<String> = repo
            .index()
            .entries_for(locale)
            .iter()
            .map(|entry| entry.slug.clone())
            .collect();
        let untranslated: Vec<_> = all_slugs.difference(&direct).collect();
        if !locale.is_default() && !untranslated.is_empty() {
            println!("  served via fallback: {:?}", untranslated);
        }
    }

    // Dictionaries
    let loader = DictionaryLoader::new(&config.dictionary_dir);
    let reference = loader
        .load_exact(Locale::default_locale())
        .await
        .context("Default dictionary is unavailable")?;

    for locale in Locale::all().into_iter().filter(|l| !l.is_default()) {
        let candidate = match loader.load_exact(locale).await {
            Ok(dictionary) => dictionary,
            Err(e) => {
                warn!("Dictionary for {} unavailable: {}", locale, e);
                problems += 1;
                continue;
            }
        };

        let report = DictionaryValidator::validate(&reference, &candidate);
        for error in &report.errors {
            println!("  [{}] error: {}", locale, error);
        }
        for warning in &report.warnings {
            println!("  [{}] warning: {}", locale, warning);
        }
        if report.has_errors() {
            problems += 1;
        }
    }

    if problems > 0 {
        bail!("{} problem(s) found", problems);
    }

    info!("✓ Content and dictionaries look consistent");
    Ok(())
}
