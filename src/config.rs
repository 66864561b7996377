use crate::error::SiteError;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{error, warn};

/// Base URL used when `SITE_URL` is not configured.
pub const FALLBACK_SITE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "production" || v == "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Site
    pub base_url: String,
    pub site_name: String,
    pub environment: Environment,

    // Content
    pub content_dir: PathBuf,
    pub dictionary_dir: PathBuf,

    // Locale negotiation
    pub locale_cookie: String,

    // Server
    pub port: u16,
}

impl Config {
    /// Build a config for the given base URL with every other field defaulted.
    pub fn new(base_url: &str) -> Result<Self, SiteError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            site_name: "Lenildo Luan".to_string(),
            environment: Environment::Development,
            content_dir: PathBuf::from("content/articles"),
            dictionary_dir: PathBuf::from("dictionaries"),
            locale_cookie: "NEXT_LOCALE".to_string(),
            port: 3000,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    ///
    /// A missing `SITE_URL` degrades to [`FALLBACK_SITE_URL`] and is logged
    /// (as an error in production). A malformed one is rejected.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::parse(lookup("SITE_ENV").as_deref());

        let base_url = match lookup("SITE_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => normalize_base_url(&url).context("SITE_URL is invalid")?,
            None => {
                if environment == Environment::Production {
                    error!(
                        "SITE_URL is not set in production; falling back to {}",
                        FALLBACK_SITE_URL
                    );
                } else {
                    warn!(
                        "SITE_URL is not set. Using fallback: {}",
                        FALLBACK_SITE_URL
                    );
                }
                FALLBACK_SITE_URL.to_string()
            }
        };

        Ok(Self {
            base_url,
            site_name: lookup("SITE_NAME").unwrap_or_else(|| "Lenildo Luan".to_string()),
            environment,

            content_dir: lookup("CONTENT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("content/articles")),
            dictionary_dir: lookup("DICTIONARY_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("dictionaries")),

            locale_cookie: lookup("LOCALE_COOKIE").unwrap_or_else(|| "NEXT_LOCALE".to_string()),

            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

/// Require an absolute http(s) URL and drop trailing slashes.
fn normalize_base_url(raw: &str) -> Result<String, SiteError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));

    match host {
        Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => {
            Ok(trimmed.to_string())
        }
        _ => Err(SiteError::Configuration(format!(
            "base URL must be an absolute http(s) URL, got '{}'",
            raw
        ))),
    }
}
