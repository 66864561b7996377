//! Locale type: validated handle onto a registry entry.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use anyhow::{bail, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// A supported locale.
///
/// Only codes present in the registry can be turned into a `Locale`, so every
/// accessor below is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    /// Internal code (e.g., "pt-br", "en")
    code: &'static str,
}

impl Locale {
    /// Brazilian Portuguese, the default locale.
    pub const PT_BR: Locale = Locale { code: "pt-br" };

    /// English.
    pub const EN: Locale = Locale { code: "en" };

    /// Create a Locale from its exact internal code.
    ///
    /// # Arguments
    /// * `code` - The internal locale code (e.g., "pt-br", "en")
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is a supported locale
    /// * `Err` otherwise (including case mismatches such as "PT-BR")
    pub fn from_code(code: &str) -> Result<Locale> {
        match LocaleRegistry::get().get_by_code(code) {
            Some(config) => Ok(Locale { code: config.code }),
            None => bail!("Unknown locale code: '{}'", code),
        }
    }

    /// The default locale; the universal fallback value.
    ///
    /// # Returns
    /// The locale marked as default in the registry (`pt-br`).
    pub fn default_locale() -> Locale {
        Locale {
            code: LocaleRegistry::get().default_locale().code,
        }
    }

    /// Every supported locale, in registry order.
    ///
    /// # Returns
    /// A vector with the default locale first, followed by the others.
    pub fn all() -> Vec<Locale> {
        LocaleRegistry::get()
            .list()
            .iter()
            .map(|config| Locale { code: config.code })
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// # Panics
    /// Never for values built through `from_code`, the constants, or `all`.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn label(&self) -> &'static str {
        self.config().label
    }

    /// External tag for hreflang maps and the HTML `lang` attribute.
    pub fn hreflang(&self) -> &'static str {
        self.config().hreflang
    }

    pub fn open_graph(&self) -> &'static str {
        self.config().open_graph
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_pt_br_constant() {
        let locale = Locale::PT_BR;
        assert_eq!(locale.code(), "pt-br");
        assert_eq!(locale.name(), "Português");
        assert!(locale.is_default());
    }

    #[test]
    fn test_en_constant() {
        let locale = Locale::EN;
        assert_eq!(locale.code(), "en");
        assert_eq!(locale.name(), "English");
        assert!(!locale.is_default());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_valid() {
        assert_eq!(Locale::from_code("pt-br").unwrap(), Locale::PT_BR);
        assert_eq!(Locale::from_code("en").unwrap(), Locale::EN);
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Locale::from_code("fr");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_is_exact() {
        assert!(Locale::from_code("PT-BR").is_err());
        assert!(Locale::from_code("pt").is_err());
        assert!(Locale::from_code(" en").is_err());
        assert!(Locale::from_code("").is_err());
    }

    // ==================== Accessor Tests ====================

    #[test]
    fn test_default_locale_is_pt_br() {
        assert_eq!(Locale::default_locale(), Locale::PT_BR);
    }

    #[test]
    fn test_all_in_registry_order() {
        assert_eq!(Locale::all(), vec![Locale::PT_BR, Locale::EN]);
    }

    #[test]
    fn test_external_forms() {
        assert_eq!(Locale::PT_BR.hreflang(), "pt-BR");
        assert_eq!(Locale::EN.hreflang(), "en");
        assert_eq!(Locale::PT_BR.open_graph(), "pt_BR");
        assert_eq!(Locale::EN.open_graph(), "en_US");
        assert_eq!(Locale::PT_BR.label(), "PT");
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_display_uses_code() {
        assert_eq!(Locale::PT_BR.to_string(), "pt-br");
        assert_eq!(format!("/{}/about", Locale::EN), "/en/about");
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&Locale::PT_BR).unwrap();
        assert_eq!(json, "\"pt-br\"");
    }
}
