//! Locale registry: Single source of truth for all supported locales.
//!
//! The registry is a lazily-initialized singleton behind `OnceLock`. It is
//! immutable once built; exactly one locale is marked as the default.

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Internal code used in URL segments and content keys (e.g., "pt-br", "en")
    pub code: &'static str,

    /// External tag used for hreflang and the HTML lang attribute (e.g., "pt-BR")
    pub hreflang: &'static str,

    /// Region-qualified Open Graph form (e.g., "pt_BR", "en_US")
    pub open_graph: &'static str,

    /// Human-readable name in the locale's own language (e.g., "Português")
    pub name: &'static str,

    /// Short label for the language switcher (e.g., "PT")
    pub label: &'static str,

    /// Whether this is the default locale (only one should be true)
    pub is_default: bool,

    /// Lowercase language tags from a client header that map onto this locale
    pub language_tags: &'static [&'static str],
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its exact internal code.
    ///
    /// Matching is case-sensitive: "PT-BR" is not "pt-br".
    ///
    /// # Arguments
    /// * `code` - The internal locale code (e.g., "pt-br", "en")
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the locale is supported
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// All supported locales, in declaration order.
    pub fn list(&self) -> &[LocaleConfig] {
        &self.locales
    }

    /// Get the default locale configuration.
    ///
    /// The default locale is served when no preference matches and is the
    /// fallback target for missing translations and dictionaries.
    ///
    /// # Returns
    /// A reference to the default locale configuration.
    ///
    /// # Panics
    /// Panics if zero or several locales are marked as default. This is a
    /// static table error, not a runtime condition.
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }

    /// Check whether a string is exactly one of the supported locale codes.
    ///
    /// # Arguments
    /// * `code` - Any string, typically a URL segment or cookie value
    ///
    /// # Returns
    /// `true` only for an exact, case-sensitive match.
    pub fn is_valid(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// Map a lowercase language tag (e.g., "en-gb") to its supported locale.
    pub fn match_language_tag(&self, tag: &str) -> Option<&LocaleConfig> {
        self.locales
            .iter()
            .find(|locale| locale.language_tags.contains(&tag))
    }
}

/// Default locale configurations: Brazilian Portuguese (default) and English.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "pt-br",
            hreflang: "pt-BR",
            open_graph: "pt_BR",
            name: "Português",
            label: "PT",
            is_default: true,
            // pt-pt is served the Brazilian content until a European variant exists
            language_tags: &["pt", "pt-br", "pt-pt"],
        },
        LocaleConfig {
            code: "en",
            hreflang: "en",
            open_graph: "en_US",
            name: "English",
            label: "EN",
            is_default: false,
            language_tags: &["en", "en-us", "en-gb", "en-ca", "en-au"],
        },
    ]
}
