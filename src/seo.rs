//! Canonical URLs, hreflang alternates and Open Graph locale tags.
//!
//! Every function here is pure over the base URL it was built with.

use crate::config::Config;
use crate::i18n::Locale;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    base_url: String,
}

impl UrlBuilder {
    /// `base_url` is expected without a trailing slash, as `Config` stores it.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{locale}{path}`, with a leading `/` added to `path` if missing.
    ///
    /// An empty path yields `{base}/{locale}/`, which the server redirects to
    /// the bare locale root ([`UrlBuilder::locale_root`]).
    pub fn localized_url(&self, locale: Locale, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}/{}{}", self.base_url, locale.code(), path)
        } else {
            format!("{}/{}/{}", self.base_url, locale.code(), path)
        }
    }

    /// `{base}/{locale}`, the locale's home page.
    pub fn locale_root(&self, locale: Locale) -> String {
        format!("{}/{}", self.base_url, locale.code())
    }

    /// `{base}/{locale}/feed.xml`, the locale's RSS feed.
    pub fn feed_url(&self, locale: Locale) -> String {
        format!("{}/feed.xml", self.locale_root(locale))
    }

    /// One entry per supported locale, keyed by its hreflang tag.
    pub fn alternate_languages(&self, path: &str) -> BTreeMap<String, String> {
        Locale::all()
            .into_iter()
            .map(|locale| {
                (
                    locale.hreflang().to_string(),
                    self.localized_url(locale, path),
                )
            })
            .collect()
    }

    /// Alternates for a locale root, without the trailing slash.
    pub fn alternate_roots(&self) -> BTreeMap<String, String> {
        Locale::all()
            .into_iter()
            .map(|locale| (locale.hreflang().to_string(), self.locale_root(locale)))
            .collect()
    }

    /// Metadata block for a page at `path` (empty for the locale root).
    pub fn page_metadata(&self, locale: Locale, path: &str) -> PageMetadata {
        let (canonical, alternates) = if path.is_empty() {
            (self.locale_root(locale), self.alternate_roots())
        } else {
            (
                self.localized_url(locale, path),
                self.alternate_languages(path),
            )
        };

        PageMetadata {
            title: None,
            description: None,
            canonical,
            alternates,
            feed: self.feed_url(locale),
            html_lang: html_lang(locale).to_string(),
            open_graph_locale: open_graph_locale(locale).to_string(),
            alternate_open_graph_locales: alternate_open_graph_locales(locale),
        }
    }
}

/// Metadata handed to the rendering layer alongside page data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    /// Document title, `"{page} - {site}"` or the bare site name
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical: String,
    pub alternates: BTreeMap<String, String>,
    /// `application/rss+xml` alternate
    pub feed: String,
    pub html_lang: String,
    pub open_graph_locale: String,
    pub alternate_open_graph_locales: Vec<&'static str>,
}

impl PageMetadata {
    /// Fill in title and description.
    ///
    /// A page title is rendered through the `"%s - {site}"` template; without
    /// one the title is the site name alone (the home page).
    pub fn with_copy(
        mut self,
        site_name: &str,
        page_title: Option<&str>,
        description: Option<&str>,
    ) -> Self {
        self.title = Some(match page_title {
            Some(title) => format!("{} - {}", title, site_name),
            None => site_name.to_string(),
        });
        self.description = description.map(str::to_string);
        self
    }
}

/// Value of the HTML `lang` attribute.
pub fn html_lang(locale: Locale) -> &'static str {
    locale.hreflang()
}

pub fn open_graph_locale(locale: Locale) -> &'static str {
    locale.open_graph()
}

/// Open Graph forms of every other supported locale, in registry order.
pub fn alternate_open_graph_locales(locale: Locale) -> Vec<&'static str> {
    Locale::all()
        .into_iter()
        .filter(|other| *other != locale)
        .map(|other| other.open_graph())
        .collect()
}

/// The single alternate Open Graph locale of a two-locale site.
pub fn alternate_open_graph_locale(locale: Locale) -> Option<&'static str> {
    alternate_open_graph_locales(locale).first().copied()
}

/// Rewrite a locale-prefixed path for another locale (language switcher).
///
/// `/en/articles/x` becomes `/pt-br/articles/x`. Paths without the current
/// locale's segment get the target locale prepended.
pub fn switch_locale_path(path: &str, current: Locale, target: Locale) -> String {
    let prefix = format!("/{}", current.code());
    let rest = match path.strip_prefix(&prefix) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    };
    let rest = if rest.is_empty() || rest == "/" { "" } else { rest };
    format!("/{}{}", target.code(), rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BASE: &str = "https://lenildoluan.com";

    fn urls() -> UrlBuilder {
        UrlBuilder::new(BASE)
    }

    // ==================== localized_url Tests ====================

    #[test]
    fn test_localized_url_with_leading_slash() {
        assert_eq!(
            urls().localized_url(Locale::PT_BR, "/about"),
            "https://lenildoluan.com/pt-br/about"
        );
    }

    #[test]
    fn test_localized_url_adds_leading_slash() {
        assert_eq!(
            urls().localized_url(Locale::EN, "articles"),
            "https://lenildoluan.com/en/articles"
        );
    }

    #[test]
    fn test_localized_url_empty_path() {
        assert_eq!(urls().localized_url(Locale::EN, ""), "https://lenildoluan.com/en/");
        assert_eq!(urls().locale_root(Locale::EN), "https://lenildoluan.com/en");
    }

    // ==================== Alternates Tests ====================

    #[test]
    fn test_alternate_languages_about() {
        let alternates = urls().alternate_languages("/about");
        let expected: BTreeMap<String, String> = [
            ("pt-BR".to_string(), format!("{}/pt-br/about", BASE)),
            ("en".to_string(), format!("{}/en/about", BASE)),
        ]
        .into_iter()
        .collect();
        assert_eq!(alternates, expected);
    }

    #[test]
    fn test_alternates_share_path_suffix() {
        let alternates = urls().alternate_languages("/articles/hello");
        assert_eq!(alternates.len(), Locale::all().len());
        assert!(alternates.values().all(|url| url.ends_with("/articles/hello")));
    }

    // ==================== Open Graph Tests ====================

    #[test]
    fn test_open_graph_locale() {
        assert_eq!(open_graph_locale(Locale::PT_BR), "pt_BR");
        assert_eq!(open_graph_locale(Locale::EN), "en_US");
    }

    #[test]
    fn test_alternate_open_graph_locale_swaps() {
        assert_eq!(alternate_open_graph_locale(Locale::PT_BR), Some("en_US"));
        assert_eq!(alternate_open_graph_locale(Locale::EN), Some("pt_BR"));
    }

    #[test]
    fn test_alternate_open_graph_locales_exclude_current() {
        assert_eq!(alternate_open_graph_locales(Locale::PT_BR), vec!["en_US"]);
        assert_eq!(alternate_open_graph_locales(Locale::EN), vec!["pt_BR"]);
    }

    #[test]
    fn test_html_lang() {
        assert_eq!(html_lang(Locale::PT_BR), "pt-BR");
        assert_eq!(html_lang(Locale::EN), "en");
    }

    // ==================== Page Metadata Tests ====================

    #[test]
    fn test_page_metadata_for_article() {
        let meta = urls().page_metadata(Locale::EN, "/articles/hello");
        assert_eq!(meta.canonical, format!("{}/en/articles/hello", BASE));
        assert_eq!(meta.html_lang, "en");
        assert_eq!(meta.open_graph_locale, "en_US");
        assert_eq!(meta.alternate_open_graph_locales, vec!["pt_BR"]);
        assert_eq!(meta.alternates["pt-BR"], format!("{}/pt-br/articles/hello", BASE));
    }

    #[test]
    fn test_page_metadata_for_home() {
        let meta = urls().page_metadata(Locale::PT_BR, "");
        assert_eq!(meta.canonical, format!("{}/pt-br", BASE));
        assert_eq!(meta.alternates["en"], format!("{}/en", BASE));
    }

    #[test]
    fn test_page_metadata_advertises_locale_feed() {
        assert_eq!(urls().page_metadata(Locale::EN, "/about").feed, format!("{}/en/feed.xml", BASE));
        assert_eq!(urls().feed_url(Locale::PT_BR), format!("{}/pt-br/feed.xml", BASE));
    }

    #[test]
    fn test_with_copy_applies_title_template() {
        let meta = urls()
            .page_metadata(Locale::EN, "/uses")
            .with_copy("Lenildo Luan", Some("Uses"), Some("What I use every day."));
        assert_eq!(meta.title.as_deref(), Some("Uses - Lenildo Luan"));
        assert_eq!(meta.description.as_deref(), Some("What I use every day."));

        let home = urls().page_metadata(Locale::EN, "").with_copy("Lenildo Luan", None, None);
        assert_eq!(home.title.as_deref(), Some("Lenildo Luan"));
        assert!(home.description.is_none());
    }

    #[test]
    fn test_page_metadata_without_copy() {
        let meta = urls().page_metadata(Locale::EN, "/about");
        assert!(meta.title.is_none());
        assert!(meta.description.is_none());
    }

    // ==================== Language Switcher Tests ====================

    #[test]
    fn test_switch_locale_path() {
        assert_eq!(switch_locale_path("/en/articles/x", Locale::EN, Locale::PT_BR), "/pt-br/articles/x");
        assert_eq!(switch_locale_path("/en", Locale::EN, Locale::PT_BR), "/pt-br");
        assert_eq!(switch_locale_path("/en/", Locale::EN, Locale::PT_BR), "/pt-br");
        assert_eq!(switch_locale_path("/pt-br/about", Locale::PT_BR, Locale::PT_BR), "/pt-br/about");
    }

    #[test]
    fn test_switch_locale_path_only_strips_whole_segment() {
        // "/english" does not start with the "/en" segment
        assert_eq!(switch_locale_path("/english", Locale::EN, Locale::PT_BR), "/pt-br/english");
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_localized_url_is_idempotent(path in "[a-z/]{0,20}") {
            let builder = urls();
            for locale in Locale::all() {
                prop_assert_eq!(builder.localized_url(locale, &path), builder.localized_url(locale, &path));
            }
        }

        #[test]
        fn prop_localized_url_shape(path in "/?[a-z0-9-]{0,12}(/[a-z0-9-]{1,12}){0,3}") {
            let url = urls().localized_url(Locale::EN, &path);
            let prefix = format!("{}/en/", BASE);
            prop_assert!(url.starts_with(&prefix));
            prop_assert!(url.ends_with(path.trim_start_matches('/')));
        }
    }
}
