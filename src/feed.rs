use crate::articles::Article;
use crate::error::SiteError;
use crate::i18n::{Dictionary, Locale};
use crate::seo::UrlBuilder;
use chrono::{DateTime, Datelike, Utc};
use rss::{Channel, ChannelBuilder, GuidBuilder, ImageBuilder, Item, ItemBuilder};

/// Content type served for feeds
pub const FEED_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// Feeds change only on deploy
pub const FEED_CACHE_CONTROL: &str = "s-maxage=31556952";

/// Build the RSS 2.0 channel for one locale.
///
/// `articles` is expected to be the locale's listing, newest first. Channel
/// copy comes from the locale's dictionary; `now` sets the copyright year.
pub fn build_feed(
    urls: &UrlBuilder,
    locale: Locale,
    dictionary: &Dictionary,
    articles: &[Article],
    now: DateTime<Utc>,
) -> Result<Channel, SiteError> {
    let name = dictionary.require("pages.home.name")?;
    let email = dictionary.require("social.email")?;
    let meta_title = dictionary.require("pages.articles.metaTitle")?;
    let meta_description = dictionary.require("pages.articles.metaDescription")?;
    let rights = dictionary.require("footer.allRightsReserved")?;

    let home = urls.locale_root(locale);
    let favicon = format!("{}/favicon.ico", urls.base_url());
    let author = format!("{} ({})", email, name);
    let title = format!("{} - {}", name, meta_title);

    let items: Vec<Item> = articles
        .iter()
        .map(|article| {
            let public_url = urls.localized_url(locale, &format!("/articles/{}", article.slug));
            ItemBuilder::default()
                .title(Some(article.title.clone()))
                .link(Some(public_url.clone()))
                .guid(Some(
                    GuidBuilder::default()
                        .value(public_url)
                        .permalink(true)
                        .build(),
                ))
                .description(Some(article.description.clone()))
                .author(Some(author.clone()))
                .pub_date(Some(article.published.to_rfc2822()))
                .build()
        })
        .collect();

    Ok(ChannelBuilder::default()
        .title(title.clone())
        .link(home.clone())
        .description(meta_description.to_string())
        .language(Some(locale.hreflang().to_string()))
        .copyright(Some(format!("{} {} {}", rights, now.year(), name)))
        .managing_editor(Some(author.clone()))
        .image(Some(
            ImageBuilder::default()
                .url(favicon)
                .title(title)
                .link(home)
                .build(),
        ))
        .last_build_date(articles.first().map(|a| a.published.to_rfc2822()))
        .items(items)
        .build())
}

/// Serialize a channel to RSS XML.
pub fn render_feed(channel: &Channel) -> String {
    channel.to_string()
}
