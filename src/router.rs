//! Locale-prefix routing.
//!
//! Every page lives under `/{locale}/...`. Requests without a locale segment
//! are redirected to the negotiated locale, except for paths in the excluded
//! zones (API, runtime assets, well-known root files, static files).

use crate::i18n::{match_locale, Locale, LocaleRegistry, LocaleSignal};

/// Namespaces that never receive a locale prefix. Matched on whole segments.
pub const EXCLUDED_PREFIXES: &[&str] = &[
    "/api",
    "/_next/static",
    "/_next/image",
    "/_next/data",
    "/static",
];

/// Root files that never receive a locale prefix.
pub const EXCLUDED_FILES: &[&str] = &["/favicon.ico", "/robots.txt", "/sitemap.xml"];

/// Static file extensions that never receive a locale prefix.
pub const STATIC_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "svg", "ico", "webp", "avif", "css", "js", "woff", "woff2",
    "ttf", "eot",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Serve the request as-is
    PassThrough,
    /// Redirect to this path (query string preserved)
    Redirect(String),
}

fn starts_with_segment(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Whether a path is outside the locale-routed zone.
pub fn is_excluded_path(path: &str) -> bool {
    if EXCLUDED_FILES.contains(&path) {
        return true;
    }
    if EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| starts_with_segment(path, prefix))
    {
        return true;
    }

    let last = path.rsplit('/').next().unwrap_or(path);
    match last.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            STATIC_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        }
        _ => false,
    }
}

/// The locale named by the path's first segment, if it is one.
///
/// Exact segment match: `/en` and `/en/about` qualify, `/english` does not.
pub fn path_locale(path: &str) -> Option<Locale> {
    let segment = path.strip_prefix('/')?.split('/').next()?;
    if LocaleRegistry::get().is_valid(segment) {
        Locale::from_code(segment).ok()
    } else {
        None
    }
}

/// Decide how to route one request path.
pub fn route_request(path: &str, query: Option<&str>, signal: &LocaleSignal) -> RouteDecision {
    if is_excluded_path(path) {
        return RouteDecision::PassThrough;
    }

    if let Some(locale) = path_locale(path) {
        // locale home is served without the trailing slash
        if path.len() == locale.code().len() + 2 && path.ends_with('/') {
            return RouteDecision::Redirect(localized_path(locale, "/", query));
        }
        return RouteDecision::PassThrough;
    }

    let locale = match_locale(signal).unwrap_or_else(Locale::default_locale);
    RouteDecision::Redirect(localized_path(locale, path, query))
}

/// Prepend the locale segment to a path; `/` maps to the bare locale root.
pub fn localized_path(locale: Locale, path: &str, query: Option<&str>) -> String {
    let mut target = if path.is_empty() || path == "/" {
        format!("/{}", locale.code())
    } else if path.starts_with('/') {
        format!("/{}{}", locale.code(), path)
    } else {
        format!("/{}/{}", locale.code(), path)
    };

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }
    target
}
