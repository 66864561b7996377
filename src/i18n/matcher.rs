//! Locale negotiation from request signals.
//!
//! Priority: an exact cookie value, then the first header tag (in declared
//! order) that maps onto a supported locale. Header weights are never used
//! for ranking.

use crate::i18n::{Locale, LocaleRegistry};
use axum::http::header::{ACCEPT_LANGUAGE, COOKIE};
use axum::http::HeaderMap;

/// Raw, untrusted locale preferences carried by one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleSignal {
    /// Value of the locale preference cookie, if any
    pub cookie: Option<String>,

    /// Raw language-preference header, if any
    pub accept_language: Option<String>,
}

impl LocaleSignal {
    pub fn new(cookie: Option<&str>, accept_language: Option<&str>) -> Self {
        Self {
            cookie: cookie.map(str::to_string),
            accept_language: accept_language.map(str::to_string),
        }
    }

    /// Extract the signal from request headers, reading `cookie_name` from
    /// the `Cookie` header.
    pub fn from_headers(headers: &HeaderMap, cookie_name: &str) -> Self {
        let cookie = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|header| cookie_value(header, cookie_name));

        let accept_language = headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Self {
            cookie,
            accept_language,
        }
    }
}

/// Find a cookie by name in a `Cookie` header (`a=1; b=2`).
fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name).then(|| value.trim().to_string())
    })
}

/// Split a language-preference header into tags, preserving order.
///
/// A tag is the text before its first `;`, trimmed and lowercased. Weight
/// suffixes are discarded whether or not they are well formed.
pub fn parse_language_tags(header: &str) -> Vec<String> {
    header
        .split(',')
        .map(|entry| {
            let tag = entry.split(';').next().unwrap_or(entry);
            tag.trim().to_lowercase()
        })
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Pick the best supported locale for a signal.
///
/// Returns `None` when nothing matches; callers substitute
/// [`Locale::default_locale`].
pub fn match_locale(signal: &LocaleSignal) -> Option<Locale> {
    let registry = LocaleRegistry::get();

    // Cookie values must be an exact locale code, no family mapping
    if let Some(cookie) = signal.cookie.as_deref() {
        if registry.is_valid(cookie) {
            return Locale::from_code(cookie).ok();
        }
    }

    let header = signal.accept_language.as_deref()?;
    parse_language_tags(header)
        .iter()
        .find_map(|tag| registry.match_language_tag(tag))
        .and_then(|config| Locale::from_code(config.code).ok())
}

/// [`match_locale`] with the default locale applied.
pub fn resolve_locale(signal: &LocaleSignal) -> Locale {
    match_locale(signal).unwrap_or_else(Locale::default_locale)
}
