//! `sitemap.xml` and `robots.txt` generation.

use crate::articles::ArticleRepository;
use crate::error::SiteError;
use crate::i18n::Locale;
use crate::seo::UrlBuilder;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Static routes present in every locale ("" is the locale root).
pub const STATIC_ROUTES: &[&str] = &["", "/about", "/articles", "/projects", "/speaking", "/uses"];

/// Paths crawlers are asked to skip.
pub const DISALLOWED_PATHS: &[&str] = &["/api/", "/thank-you"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
    /// hreflang tag -> URL
    pub alternates: BTreeMap<String, String>,
}

/// Build sitemap entries: every static route in every locale, then every
/// article each locale lists.
///
/// Articles follow the listing rules of `list_articles`, so per-slug
/// fallbacks never appear here.
pub async fn build_sitemap(
    urls: &UrlBuilder,
    repo: &ArticleRepository,
    now: DateTime<Utc>,
) -> Result<Vec<SitemapEntry>, SiteError> {
    let mut entries = Vec::new();

    for route in STATIC_ROUTES {
        for locale in Locale::all() {
            let (url, alternates) = if route.is_empty() {
                (urls.locale_root(locale), urls.alternate_roots())
            } else {
                (
                    urls.localized_url(locale, route),
                    urls.alternate_languages(route),
                )
            };

            entries.push(SitemapEntry {
                url,
                last_modified: now,
                change_frequency: if route.is_empty() || *route == "/articles" {
                    ChangeFrequency::Weekly
                } else {
                    ChangeFrequency::Monthly
                },
                priority: if route.is_empty() { 1.0 } else { 0.8 },
                alternates,
            });
        }
    }

    for locale in Locale::all() {
        for article in repo.list_articles(locale).await? {
            let path = format!("/articles/{}", article.slug);
            entries.push(SitemapEntry {
                url: urls.localized_url(locale, &path),
                last_modified: article.published,
                change_frequency: ChangeFrequency::Monthly,
                priority: 0.7,
                alternates: urls.alternate_languages(&path),
            });
        }
    }

    Ok(entries)
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render entries as a sitemap with `xhtml:link` alternates.
pub fn render_sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" \
xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    );

    for entry in entries {
        xml.push_str("<url>\n");
        let _ = writeln!(xml, "<loc>{}</loc>", escape_xml(&entry.url));
        for (lang, href) in &entry.alternates {
            let _ = writeln!(
                xml,
                "<xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\" />",
                escape_xml(lang),
                escape_xml(href)
            );
        }
        let _ = writeln!(
            xml,
            "<lastmod>{}</lastmod>",
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
        let _ = writeln!(
            xml,
            "<changefreq>{}</changefreq>",
            entry.change_frequency.as_str()
        );
        let _ = writeln!(xml, "<priority>{:.1}</priority>", entry.priority);
        xml.push_str("</url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Allow everything except the API namespace and the thank-you page.
pub fn robots_txt(urls: &UrlBuilder) -> String {
    let mut body = String::from("User-Agent: *\nAllow: /\n");
    for path in DISALLOWED_PATHS {
        let _ = writeln!(body, "Disallow: {}", path);
    }
    let _ = write!(body, "\nSitemap: {}/sitemap.xml\n", urls.base_url());
    body
}
