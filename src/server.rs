//! HTTP surface.
//!
//! Pages return their assembled data as JSON for the rendering layer. Every
//! request first passes the locale-prefix middleware.

use crate::articles::{Article, ArticleRepository, ContentIndex};
use crate::config::Config;
use crate::content::{resolve_or_not_found, ResolvedContent};
use crate::error::SiteError;
use crate::feed::{build_feed, render_feed, FEED_CACHE_CONTROL, FEED_CONTENT_TYPE};
use crate::i18n::{Dictionary, DictionaryLoader, FallbackNotice, Locale, LocaleSignal};
use crate::router::{route_request, RouteDecision};
use crate::seo::{html_lang, PageMetadata, UrlBuilder};
use crate::sitemap::{build_sitemap, render_sitemap_xml, robots_txt};
use axum::extract::{Path, Request, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Static pages served under every locale.
pub const STATIC_PAGES: &[&str] = &["about", "projects", "speaking", "uses", "thank-you"];

/// Number of recent articles shown on the home page.
pub const HOME_ARTICLE_LIMIT: usize = 4;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub articles: ArticleRepository,
    pub dictionaries: DictionaryLoader,
    pub urls: UrlBuilder,
}

impl AppState {
    pub fn new(config: Config, index: ContentIndex) -> Self {
        Self {
            urls: UrlBuilder::from_config(&config),
            dictionaries: DictionaryLoader::new(config.dictionary_dir.clone()),
            articles: ArticleRepository::new(index),
            config: Arc::new(config),
        }
    }

    /// Scan the configured content directory and build the state.
    pub fn load(config: Config) -> Result<Self, SiteError> {
        let index = ContentIndex::scan(&config.content_dir)?;
        Ok(Self::new(config, index))
    }
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/robots.txt", get(robots))
        .route("/sitemap.xml", get(sitemap))
        .route("/api/health", get(health))
        .route("/:locale", get(home))
        .route("/:locale/articles", get(article_index))
        .route("/:locale/articles/:slug", get(article_page))
        .route("/:locale/feed.xml", get(feed));

    for &page in STATIC_PAGES {
        router = router.route(
            &format!("/:locale/{}", page),
            get(move |state: State<AppState>, locale: Path<String>| {
                static_page(state, locale, page)
            }),
        );
    }

    router
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), locale_redirect))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Redirect requests lacking a locale segment to the negotiated locale.
async fn locale_redirect(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let signal = LocaleSignal::from_headers(request.headers(), &state.config.locale_cookie);

    match route_request(request.uri().path(), request.uri().query(), &signal) {
        RouteDecision::PassThrough => next.run(request).await,
        RouteDecision::Redirect(target) => {
            debug!("Redirecting {} to {}", request.uri().path(), target);
            Redirect::temporary(&target).into_response()
        }
    }
}

fn parse_locale(code: &str) -> Result<Locale, SiteError> {
    Locale::from_code(code).map_err(|_| SiteError::NotFound(format!("locale '{}'", code)))
}

/// Site name for title templates, from the dictionary when present.
fn site_name<'a>(state: &'a AppState, dictionary: &'a Dictionary) -> &'a str {
    dictionary
        .get("pages.home.name")
        .unwrap_or(state.config.site_name.as_str())
}

/// Dictionary section for a route segment: `thank-you` reads `pages.thankYou`.
fn page_key(page: &str) -> String {
    let mut key = String::with_capacity(page.len());
    let mut upper = false;
    for c in page.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            key.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            key.push(c);
        }
    }
    key
}

/// `metaTitle` and `metaDescription` of a page's dictionary section.
fn page_copy<'a>(dictionary: &'a Dictionary, page: &str) -> (Option<&'a str>, Option<&'a str>) {
    let key = page_key(page);
    (
        dictionary.get(&format!("pages.{}.metaTitle", key)),
        dictionary.get(&format!("pages.{}.metaDescription", key)),
    )
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub locale: Locale,
    pub metadata: PageMetadata,
    pub dictionary: Value,
    pub articles: Vec<Article>,
}

#[derive(Debug, Serialize)]
pub struct ArticleIndexPage {
    pub locale: Locale,
    pub metadata: PageMetadata,
    pub dictionary: Value,
    pub articles: Vec<Article>,
}

#[derive(Debug, Serialize)]
pub struct ArticlePage {
    pub locale: Locale,
    pub metadata: PageMetadata,
    /// `lang` of the content itself, which differs from the page on fallback
    pub content_lang: &'static str,
    pub content: ResolvedContent,
    pub notice: Option<FallbackNotice>,
    pub dictionary: Value,
}

#[derive(Debug, Serialize)]
pub struct StaticPage {
    pub locale: Locale,
    pub page: &'static str,
    pub metadata: PageMetadata,
    pub dictionary: Value,
}

async fn home(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> Result<Json<HomePage>, SiteError> {
    let locale = parse_locale(&locale)?;
    let dictionary = state.dictionaries.load(locale).await?;
    let mut articles = state.articles.list_articles(locale).await?;
    articles.truncate(HOME_ARTICLE_LIMIT);

    Ok(Json(HomePage {
        locale,
        metadata: state.urls.page_metadata(locale, "").with_copy(
            site_name(&state, &dictionary),
            None,
            dictionary.get("pages.home.intro"),
        ),
        dictionary: dictionary.as_value().clone(),
        articles,
    }))
}

async fn article_index(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> Result<Json<ArticleIndexPage>, SiteError> {
    let locale = parse_locale(&locale)?;
    let dictionary = state.dictionaries.load(locale).await?;
    let articles = state.articles.list_articles(locale).await?;
    let (title, description) = page_copy(&dictionary, "articles");

    Ok(Json(ArticleIndexPage {
        locale,
        metadata: state.urls.page_metadata(locale, "/articles").with_copy(
            site_name(&state, &dictionary),
            title,
            description,
        ),
        dictionary: dictionary.as_value().clone(),
        articles,
    }))
}

async fn article_page(
    State(state): State<AppState>,
    Path((locale, slug)): Path<(String, String)>,
) -> Result<Json<ArticlePage>, SiteError> {
    let locale = parse_locale(&locale)?;
    let dictionary = state.dictionaries.load(locale).await?;
    let content = resolve_or_not_found(&state.articles, &slug, locale).await?;

    let article = &content.article.article;
    let metadata = state
        .urls
        .page_metadata(locale, &format!("/articles/{}", slug))
        .with_copy(
            site_name(&state, &dictionary),
            Some(article.title.as_str()),
            Some(article.description.as_str()),
        );

    Ok(Json(ArticlePage {
        locale,
        metadata,
        content_lang: html_lang(content.locale),
        notice: content.notice(),
        content,
        dictionary: dictionary.as_value().clone(),
    }))
}

async fn static_page(
    State(state): State<AppState>,
    Path(locale): Path<String>,
    page: &'static str,
) -> Result<Json<StaticPage>, SiteError> {
    let locale = parse_locale(&locale)?;
    let dictionary = state.dictionaries.load(locale).await?;
    let (title, description) = page_copy(&dictionary, page);

    Ok(Json(StaticPage {
        locale,
        page,
        metadata: state
            .urls
            .page_metadata(locale, &format!("/{}", page))
            .with_copy(site_name(&state, &dictionary), title, description),
        dictionary: dictionary.as_value().clone(),
    }))
}

async fn feed(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> Result<Response, SiteError> {
    let locale = parse_locale(&locale)?;
    let dictionary = state.dictionaries.load(locale).await?;
    let articles = state.articles.list_articles(locale).await?;
    let channel = build_feed(&state.urls, locale, &dictionary, &articles, Utc::now())?;

    Ok((
        [
            (CONTENT_TYPE, FEED_CONTENT_TYPE),
            (CACHE_CONTROL, FEED_CACHE_CONTROL),
        ],
        render_feed(&channel),
    )
        .into_response())
}

async fn sitemap(State(state): State<AppState>) -> Result<Response, SiteError> {
    let entries = build_sitemap(&state.urls, &state.articles, Utc::now()).await?;
    Ok((
        [(CONTENT_TYPE, "application/xml; charset=utf-8")],
        render_sitemap_xml(&entries),
    )
        .into_response())
}

async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_txt(&state.urls),
    )
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "site": state.config.site_name,
        "production": state.config.is_production(),
    }))
}

async fn not_found(request: Request) -> SiteError {
    SiteError::NotFound(request.uri().path().to_string())
}
