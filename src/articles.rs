//! Article discovery, loading and listing.
//!
//! Articles live at `<content dir>/<slug>/page.<locale>.mdx`, each starting
//! with a YAML front matter block. The directory is scanned once into a
//! [`ContentIndex`] keyed by `(slug, locale)`; listing and resolution are then
//! lookups over that index followed by concurrent loads.

use crate::error::SiteError;
use crate::i18n::Locale;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use futures::future::try_join_all;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Article metadata from front matter plus the derived slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub author: String,
    /// Date exactly as written in the front matter
    pub date: String,
    #[serde(skip)]
    pub published: DateTime<Utc>,
}

/// An article together with its body (everything after the front matter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleDocument {
    #[serde(flatten)]
    pub article: Article,
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct FrontMatter {
    title: String,
    description: String,
    author: String,
    date: String,
}

#[derive(Debug, Clone)]
enum Source {
    File(PathBuf),
    Memory(Arc<str>),
}

/// One `(slug, locale)` entry of the content index.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// Storage key relative to the content root (e.g., "hello/page.en.mdx")
    pub key: String,
    pub slug: String,
    pub locale: Locale,
    source: Source,
}

impl IndexEntry {
    /// Read and parse this entry.
    ///
    /// Any failure is a content integrity error naming the storage key.
    pub async fn load(&self) -> Result<ArticleDocument, SiteError> {
        let raw = match &self.source {
            Source::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| SiteError::integrity(&self.key, e.to_string()))?,
            Source::Memory(text) => text.to_string(),
        };
        parse_document(&self.key, &self.slug, &raw)
    }
}

// Storage key pattern: "<slug>/page.<locale>.mdx"
static KEY_REGEX: OnceLock<Regex> = OnceLock::new();
// Routing suffix and locale marker stripped to obtain the slug
static SUFFIX_REGEX: OnceLock<Regex> = OnceLock::new();

fn key_regex() -> &'static Regex {
    KEY_REGEX.get_or_init(|| {
        Regex::new(r"^[^/]+/page\.(?P<locale>[a-z]{2}(?:-[a-z]{2})?)\.mdx$")
            .expect("valid storage key regex")
    })
}

fn suffix_regex() -> &'static Regex {
    SUFFIX_REGEX.get_or_init(|| {
        Regex::new(r"(/page)?(\.[a-z]{2}(-[a-z]{2})?)?\.mdx$").expect("valid suffix regex")
    })
}

/// Strip the routing suffix and locale marker from a storage key.
///
/// `"hello-world/page.pt-br.mdx"` becomes `"hello-world"`.
pub fn derive_slug(key: &str) -> String {
    suffix_regex().replace(key, "").into_owned()
}

/// Parse a storage key into `(slug, locale)`.
///
/// Returns `None` for keys that do not follow the naming scheme or name an
/// unsupported locale.
pub fn parse_storage_key(key: &str) -> Option<(String, Locale)> {
    let captures = key_regex().captures(key)?;
    let locale = Locale::from_code(&captures["locale"]).ok()?;
    Some((derive_slug(key), locale))
}

/// Storage key for a `(slug, locale)` pair.
pub fn storage_key(slug: &str, locale: Locale) -> String {
    format!("{}/page.{}.mdx", slug, locale.code())
}

/// Split `---` fenced front matter from the body.
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let rest = rest.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse an ISO date (`YYYY-MM-DD`) or an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// Parse a raw document into an [`ArticleDocument`].
pub fn parse_document(key: &str, slug: &str, raw: &str) -> Result<ArticleDocument, SiteError> {
    let (yaml, body) =
        split_front_matter(raw).ok_or_else(|| SiteError::integrity(key, "missing front matter"))?;

    let front: FrontMatter = serde_yaml::from_str(yaml)
        .map_err(|e| SiteError::integrity(key, format!("invalid front matter: {}", e)))?;

    let published = parse_date(&front.date)
        .ok_or_else(|| SiteError::integrity(key, format!("unparseable date '{}'", front.date)))?;

    Ok(ArticleDocument {
        article: Article {
            slug: slug.to_string(),
            title: front.title,
            description: front.description,
            author: front.author,
            date: front.date,
            published,
        },
        body: body.trim_start_matches(['\r', '\n']).to_string(),
    })
}

/// Content-addressed lookup table built once at startup.
///
/// Entry order is the enumeration order (file names sorted), which is the
/// tie-break order for articles sharing a date.
#[derive(Debug, Clone, Default)]
pub struct ContentIndex {
    entries: Vec<IndexEntry>,
    by_key: HashMap<(String, Locale), usize>,
}

impl ContentIndex {
    /// Scan a content directory. A missing directory yields an empty index.
    pub fn scan(dir: &Path) -> Result<Self, SiteError> {
        let mut index = ContentIndex::default();

        if !dir.exists() {
            warn!("Content directory {} does not exist", dir.display());
            return Ok(index);
        }

        for entry in WalkDir::new(dir)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(dir) else {
                continue;
            };
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            match parse_storage_key(&key) {
                Some((slug, locale)) => {
                    index.insert(key, slug, locale, Source::File(entry.path().to_path_buf()))
                }
                None => debug!("Ignoring content file {}", key),
            }
        }

        info!(
            "Indexed {} content items from {}",
            index.len(),
            dir.display()
        );
        Ok(index)
    }

    /// Build an index from in-memory `(storage key, raw text)` pairs.
    pub fn from_documents<I, K, T>(documents: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<String>,
    {
        let mut index = ContentIndex::default();
        for (key, text) in documents {
            let key = key.into();
            match parse_storage_key(&key) {
                Some((slug, locale)) => {
                    let text: String = text.into();
                    index.insert(key, slug, locale, Source::Memory(Arc::from(text)))
                }
                None => debug!("Ignoring content key {}", key),
            }
        }
        index
    }

    fn insert(&mut self, key: String, slug: String, locale: Locale, source: Source) {
        let id = (slug.clone(), locale);
        if self.by_key.contains_key(&id) {
            warn!("Duplicate content entry {}; keeping the first", key);
            return;
        }
        self.by_key.insert(id, self.entries.len());
        self.entries.push(IndexEntry {
            key,
            slug,
            locale,
            source,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries stored under `locale`, in enumeration order.
    pub fn entries_for(&self, locale: Locale) -> Vec<&IndexEntry> {
        self.entries.iter().filter(|e| e.locale == locale).collect()
    }

    pub fn get(&self, slug: &str, locale: Locale) -> Option<&IndexEntry> {
        self.by_key
            .get(&(slug.to_string(), locale))
            .map(|&i| &self.entries[i])
    }
}

/// Locale-aware article access over a shared [`ContentIndex`].
#[derive(Debug, Clone)]
pub struct ArticleRepository {
    index: Arc<ContentIndex>,
}

impl ArticleRepository {
    pub fn new(index: ContentIndex) -> Self {
        Self {
            index: Arc::new(index),
        }
    }

    pub fn index(&self) -> &ContentIndex {
        &self.index
    }

    /// List a locale's articles, newest first.
    ///
    /// A locale with no content at all is served the default locale's full
    /// list. A locale with at least one item gets only its own items. Loads
    /// run concurrently; any failed item fails the whole call.
    pub async fn list_articles(&self, locale: Locale) -> Result<Vec<Article>, SiteError> {
        let mut entries = self.index.entries_for(locale);

        if entries.is_empty() && !locale.is_default() {
            let default = Locale::default_locale();
            debug!("No articles for {}; listing {} articles", locale, default);
            entries = self.index.entries_for(default);
        }

        let documents = try_join_all(entries.into_iter().map(|entry| entry.load())).await?;

        let mut articles: Vec<Article> = documents.into_iter().map(|d| d.article).collect();
        // sort_by is stable: equal dates keep enumeration order
        articles.sort_by(|a, b| b.published.cmp(&a.published));
        Ok(articles)
    }

    /// Load exactly `(slug, locale)`, with no fallback.
    pub async fn load(&self, slug: &str, locale: Locale) -> Result<Option<ArticleDocument>, SiteError> {
        match self.index.get(slug, locale) {
            Some(entry) => entry.load().await.map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn doc(title: &str, date: &str) -> String {
        format!(
            "---\ntitle: {}\ndescription: About {}\nauthor: Lenildo Luan\ndate: '{}'\n---\n\n# {}\n",
            title, title, date, title
        )
    }

    // ==================== Slug Tests ====================

    #[test]
    fn test_derive_slug_strips_suffixes() {
        assert_eq!(derive_slug("hello-world/page.pt-br.mdx"), "hello-world");
        assert_eq!(derive_slug("hello-world/page.en.mdx"), "hello-world");
        assert_eq!(derive_slug("hello-world/page.mdx"), "hello-world");
    }

    #[test]
    fn test_parse_storage_key() {
        assert_eq!(
            parse_storage_key("hello/page.en.mdx"),
            Some(("hello".to_string(), Locale::EN))
        );
        assert_eq!(
            parse_storage_key("hello/page.pt-br.mdx"),
            Some(("hello".to_string(), Locale::PT_BR))
        );
    }

    #[test]
    fn test_parse_storage_key_rejects_other_files() {
        assert_eq!(parse_storage_key("hello/page.fr.mdx"), None);
        assert_eq!(parse_storage_key("hello/page.mdx"), None);
        assert_eq!(parse_storage_key("hello/cover.png"), None);
        assert_eq!(parse_storage_key("a/b/page.en.mdx"), None);
    }

    #[test]
    fn test_storage_key_round_trips_through_parse() {
        let key = storage_key("my-post", Locale::PT_BR);
        assert_eq!(key, "my-post/page.pt-br.mdx");
        assert_eq!(parse_storage_key(&key), Some(("my-post".to_string(), Locale::PT_BR)));
    }

    // ==================== Front Matter Tests ====================

    #[test]
    fn test_parse_document() {
        let parsed = parse_document("x/page.en.mdx", "x", &doc("Hello", "2024-01-01")).unwrap();
        assert_eq!(parsed.article.slug, "x");
        assert_eq!(parsed.article.title, "Hello");
        assert_eq!(parsed.article.description, "About Hello");
        assert_eq!(parsed.article.author, "Lenildo Luan");
        assert_eq!(parsed.article.date, "2024-01-01");
        assert_eq!(parsed.body, "# Hello\n");
    }

    #[test]
    fn test_parse_document_crlf() {
        let raw = "---\r\ntitle: T\r\ndescription: D\r\nauthor: A\r\ndate: '2024-02-03'\r\n---\r\nBody";
        let parsed = parse_document("x/page.en.mdx", "x", raw).unwrap();
        assert_eq!(parsed.article.title, "T");
        assert_eq!(parsed.body, "Body");
    }

    #[test]
    fn test_parse_document_missing_front_matter() {
        let err = parse_document("x/page.en.mdx", "x", "# Just markdown").unwrap_err();
        assert!(matches!(err, SiteError::ContentIntegrity { .. }));
    }

    #[test]
    fn test_parse_document_missing_field() {
        let raw = "---\ntitle: T\nauthor: A\ndate: '2024-01-01'\n---\n";
        let err = parse_document("x/page.en.mdx", "x", raw).unwrap_err();
        assert!(err.to_string().contains("x/page.en.mdx"));
    }

    #[test]
    fn test_parse_document_bad_date() {
        let err = parse_document("x/page.en.mdx", "x", &doc("T", "yesterday")).unwrap_err();
        assert!(err.to_string().contains("unparseable date"));
    }

    #[test]
    fn test_parse_date_formats() {
        let day = parse_date("2025-06-01").unwrap();
        assert_eq!(day.to_rfc3339(), "2025-06-01T00:00:00+00:00");

        let ts = parse_date("2025-06-01T12:30:00-03:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-06-01T15:30:00+00:00");

        assert!(parse_date("2025-13-01").is_none());
        assert!(parse_date("").is_none());
    }

    // ==================== Index Tests ====================

    #[test]
    fn test_from_documents_ignores_unknown_keys() {
        let index = ContentIndex::from_documents(vec![
            ("a/page.pt-br.mdx", doc("A", "2024-01-01")),
            ("a/page.fr.mdx", doc("A", "2024-01-01")),
            ("notes.txt", "nothing".to_string()),
        ]);
        assert_eq!(index.len(), 1);
        assert!(index.get("a", Locale::PT_BR).is_some());
        assert!(index.get("a", Locale::EN).is_none());
    }

    #[test]
    fn test_scan_directory() {
        let dir = TempDir::new().unwrap();
        for (slug, locale) in [("beta", "pt-br"), ("alpha", "pt-br"), ("alpha", "en")] {
            let folder = dir.path().join(slug);
            std::fs::create_dir_all(&folder).unwrap();
            std::fs::write(folder.join(format!("page.{}.mdx", locale)), doc(slug, "2024-01-01")).unwrap();
        }
        std::fs::write(dir.path().join("alpha").join("cover.png"), b"png").unwrap();

        let index = ContentIndex::scan(dir.path()).unwrap();
        assert_eq!(index.len(), 3);

        let pt: Vec<_> = index.entries_for(Locale::PT_BR).iter().map(|e| e.slug.clone()).collect();
        assert_eq!(pt, vec!["alpha", "beta"]);
        assert_eq!(index.get("alpha", Locale::EN).unwrap().key, "alpha/page.en.mdx");
    }

    #[test]
    fn test_scan_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let index = ContentIndex::scan(&dir.path().join("nope")).unwrap();
        assert!(index.is_empty());
    }

    // ==================== Listing Tests ====================

    #[tokio::test]
    async fn test_list_sorted_newest_first() {
        let repo = ArticleRepository::new(ContentIndex::from_documents(vec![
            ("a/page.pt-br.mdx", doc("A", "2024-01-01")),
            ("b/page.pt-br.mdx", doc("B", "2025-06-01")),
            ("c/page.pt-br.mdx", doc("C", "2023-12-31")),
        ]));

        let dates: Vec<_> = repo
            .list_articles(Locale::PT_BR)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.date)
            .collect();
        assert_eq!(dates, vec!["2025-06-01", "2024-01-01", "2023-12-31"]);
    }

    #[tokio::test]
    async fn test_list_ties_keep_enumeration_order() {
        let repo = ArticleRepository::new(ContentIndex::from_documents(vec![
            ("first/page.pt-br.mdx", doc("First", "2024-05-05")),
            ("second/page.pt-br.mdx", doc("Second", "2024-05-05")),
            ("third/page.pt-br.mdx", doc("Third", "2024-05-05")),
        ]));

        let slugs: Vec<_> = repo
            .list_articles(Locale::PT_BR)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.slug)
            .collect();
        assert_eq!(slugs, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_empty_locale_gets_default_list() {
        let repo = ArticleRepository::new(ContentIndex::from_documents(vec![
            ("a/page.pt-br.mdx", doc("A", "2024-01-01")),
            ("b/page.pt-br.mdx", doc("B", "2024-02-01")),
        ]));

        let articles = repo.list_articles(Locale::EN).await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].slug, "b");
    }

    #[tokio::test]
    async fn test_partially_translated_locale_is_not_backfilled() {
        let repo = ArticleRepository::new(ContentIndex::from_documents(vec![
            ("a/page.pt-br.mdx", doc("A", "2024-01-01")),
            ("b/page.pt-br.mdx", doc("B", "2024-02-01")),
            ("a/page.en.mdx", doc("A (en)", "2024-01-01")),
        ]));

        let articles = repo.list_articles(Locale::EN).await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "A (en)");
    }

    #[tokio::test]
    async fn test_empty_default_locale_is_empty() {
        let repo = ArticleRepository::new(ContentIndex::from_documents(vec![(
            "a/page.en.mdx",
            doc("A", "2024-01-01"),
        )]));

        assert!(repo.list_articles(Locale::PT_BR).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_one_broken_item_fails_whole_listing() {
        let repo = ArticleRepository::new(ContentIndex::from_documents(vec![
            ("a/page.pt-br.mdx", doc("A", "2024-01-01")),
            ("b/page.pt-br.mdx", "no front matter".to_string()),
        ]));

        let err = repo.list_articles(Locale::PT_BR).await.unwrap_err();
        match err {
            SiteError::ContentIntegrity { key, .. } => assert_eq!(key, "b/page.pt-br.mdx"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_load_is_exact() {
        let repo = ArticleRepository::new(ContentIndex::from_documents(vec![(
            "a/page.pt-br.mdx",
            doc("A", "2024-01-01"),
        )]));

        assert!(repo.load("a", Locale::PT_BR).await.unwrap().is_some());
        assert!(repo.load("a", Locale::EN).await.unwrap().is_none());
    }
}
