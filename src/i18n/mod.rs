//! Internationalization (i18n) module for the localized site.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported locales and their external forms
//! - `locale`: Type-safe `Locale` handle validated against the registry
//! - `matcher`: Locale negotiation from cookie and language-preference header
//! - `dictionary`: Per-locale translation dictionaries with silent default fallback
//! - `strings`: Built-in localized strings (fallback notice)
//! - `validator`: Structural parity checks between dictionaries
//!
//! # Example
//!
//! ```rust,ignore
//! use portfolio_site::i18n::{match_locale, Locale, LocaleSignal};
//!
//! let signal = LocaleSignal::new(None, Some("en-US,pt;q=0.5"));
//! let locale = match_locale(&signal).unwrap_or_else(Locale::default_locale);
//! assert_eq!(locale, Locale::EN);
//! ```

mod dictionary;
mod locale;
mod matcher;
mod registry;
mod strings;
mod validator;

pub use dictionary::{Dictionary, DictionaryLoader};
pub use locale::Locale;
pub use matcher::{match_locale, parse_language_tags, resolve_locale, LocaleSignal};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use strings::{FallbackNotice, LocaleStrings};
pub use validator::{DictionaryValidator, ValidationReport};
