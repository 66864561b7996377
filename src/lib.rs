pub mod articles;
pub mod config;
pub mod content;
pub mod error;
pub mod feed;
pub mod i18n;
pub mod router;
pub mod seo;
pub mod server;
pub mod sitemap;

pub use error::SiteError;
