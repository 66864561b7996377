//! Per-slug content resolution with default-locale fallback.
//!
//! Finer-grained than the whole-locale fallback in
//! [`ArticleRepository::list_articles`]: a single untranslated slug falls back
//! on its own even when the locale has other translated articles.

use crate::articles::{ArticleDocument, ArticleRepository};
use crate::error::SiteError;
use crate::i18n::{FallbackNotice, Locale};
use serde::Serialize;
use tracing::debug;

/// The content that will actually render for a `(slug, locale)` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedContent {
    pub article: ArticleDocument,
    /// Locale the content came from
    pub locale: Locale,
    pub requested_locale: Locale,
    /// True only when `locale` is the default and differs from the request
    pub is_fallback: bool,
}

impl ResolvedContent {
    /// Notice for the presentation layer, present only on fallback.
    pub fn notice(&self) -> Option<FallbackNotice> {
        self.is_fallback
            .then(|| FallbackNotice::new(self.requested_locale, self.locale))
    }
}

/// Resolve `slug` for `requested`.
///
/// Returns `Ok(None)` when the slug exists in neither the requested nor the
/// default locale. Load failures of an existing item are errors.
pub async fn resolve(
    repo: &ArticleRepository,
    slug: &str,
    requested: Locale,
) -> Result<Option<ResolvedContent>, SiteError> {
    if let Some(article) = repo.load(slug, requested).await? {
        return Ok(Some(ResolvedContent {
            article,
            locale: requested,
            requested_locale: requested,
            is_fallback: false,
        }));
    }

    let default = Locale::default_locale();
    if requested == default {
        return Ok(None);
    }

    match repo.load(slug, default).await? {
        Some(article) => {
            debug!("Serving '{}' in {} for {} request", slug, default, requested);
            Ok(Some(ResolvedContent {
                article,
                locale: default,
                requested_locale: requested,
                is_fallback: true,
            }))
        }
        None => Ok(None),
    }
}

/// [`resolve`], with a missing slug turned into `SiteError::NotFound`.
pub async fn resolve_or_not_found(
    repo: &ArticleRepository,
    slug: &str,
    requested: Locale,
) -> Result<ResolvedContent, SiteError> {
    resolve(repo, slug, requested)
        .await?
        .ok_or_else(|| SiteError::NotFound(format!("article '{}' ({})", slug, requested)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::articles::ContentIndex;

    fn doc(title: &str) -> String {
        format!(
            "---\ntitle: {}\ndescription: D\nauthor: A\ndate: '2024-01-01'\n---\nBody of {}\n",
            title, title
        )
    }

    fn repo() -> ArticleRepository {
        // "x" exists only in pt-br; "y" exists in both
        ArticleRepository::new(ContentIndex::from_documents(vec![
            ("x/page.pt-br.mdx", doc("X pt")),
            ("y/page.pt-br.mdx", doc("Y pt")),
            ("y/page.en.mdx", doc("Y en")),
        ]))
    }

    #[tokio::test]
    async fn test_untranslated_slug_falls_back() {
        let resolved = resolve(&repo(), "x", Locale::EN).await.unwrap().unwrap();
        assert_eq!(resolved.locale, Locale::PT_BR);
        assert_eq!(resolved.requested_locale, Locale::EN);
        assert!(resolved.is_fallback);
        assert_eq!(resolved.article.article.title, "X pt");
    }

    #[tokio::test]
    async fn test_exact_match_is_not_fallback() {
        let resolved = resolve(&repo(), "x", Locale::PT_BR).await.unwrap().unwrap();
        assert_eq!(resolved.locale, Locale::PT_BR);
        assert!(!resolved.is_fallback);
        assert!(resolved.notice().is_none());
    }

    #[tokio::test]
    async fn test_translated_slug_served_in_requested_locale() {
        let resolved = resolve(&repo(), "y", Locale::EN).await.unwrap().unwrap();
        assert_eq!(resolved.locale, Locale::EN);
        assert!(!resolved.is_fallback);
        assert_eq!(resolved.article.article.title, "Y en");
    }

    #[tokio::test]
    async fn test_missing_everywhere_is_not_found() {
        assert!(resolve(&repo(), "missing", Locale::EN).await.unwrap().is_none());
        assert!(resolve(&repo(), "missing", Locale::PT_BR).await.unwrap().is_none());

        let err = resolve_or_not_found(&repo(), "missing", Locale::EN)
            .await
            .unwrap_err();
        assert!(matches!(err, SiteError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_english_only_slug_not_found_in_default() {
        let repo = ArticleRepository::new(ContentIndex::from_documents(vec![(
            "z/page.en.mdx",
            doc("Z en"),
        )]));
        assert!(resolve(&repo, "z", Locale::PT_BR).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fallback_notice_present() {
        let resolved = resolve(&repo(), "x", Locale::EN).await.unwrap().unwrap();
        let notice = resolved.notice().unwrap();
        assert_eq!(notice.requested_locale, Locale::EN);
        assert_eq!(notice.fallback_locale, Locale::PT_BR);
    }

    #[tokio::test]
    async fn test_broken_item_is_error_not_fallback() {
        let repo = ArticleRepository::new(ContentIndex::from_documents(vec![
            ("x/page.pt-br.mdx", doc("X pt")),
            ("x/page.en.mdx", "broken".to_string()),
        ]));
        let err = resolve(&repo, "x", Locale::EN).await.unwrap_err();
        assert!(matches!(err, SiteError::ContentIntegrity { .. }));
    }

    #[tokio::test]
    async fn test_listing_and_resolution_fallbacks_coexist() {
        // en has one translated article and one untranslated one
        let repo = repo();

        let listed = repo.list_articles(Locale::EN).await.unwrap();
        let listed: Vec<_> = listed.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(listed, vec!["y"]);

        // the untranslated slug is still reachable directly, as a fallback
        let resolved = resolve(&repo, "x", Locale::EN).await.unwrap().unwrap();
        assert!(resolved.is_fallback);
    }
}
