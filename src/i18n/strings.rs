use crate::i18n::Locale;
use serde::Serialize;

/// Built-in strings that must exist even when no dictionary can be read.
///
/// Placeholders: `{requested}` and `{fallback}` are replaced with language
/// names from the registry.
#[derive(Debug, Clone)]
pub struct LocaleStrings {
    // ==================== Fallback Notice ====================
    /// Heading of the notice shown when an article is served in another locale
    pub fallback_title: &'static str,

    /// Body of the notice. Placeholders: {requested}, {fallback}
    pub fallback_message: &'static str,

    // ==================== Errors ====================
    /// Short message for not-found responses
    pub not_found: &'static str,
}

pub const PORTUGUESE_STRINGS: LocaleStrings = LocaleStrings {
    fallback_title: "Tradução não disponível",
    fallback_message: "Este artigo ainda não está disponível em {requested}. \
Você está vendo a versão em {fallback}.",
    not_found: "Página não encontrada",
};

pub const ENGLISH_STRINGS: LocaleStrings = LocaleStrings {
    fallback_title: "Translation not available",
    fallback_message: "This article is not yet available in {requested}. \
You're viewing the {fallback} version.",
    not_found: "Page not found",
};

impl LocaleStrings {
    pub fn for_locale(locale: Locale) -> &'static LocaleStrings {
        match locale.code() {
            "en" => &ENGLISH_STRINGS,
            _ => &PORTUGUESE_STRINGS,
        }
    }
}

/// Notice rendered above an article served from the fallback locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackNotice {
    pub requested_locale: Locale,
    pub fallback_locale: Locale,
    pub title: String,
    pub message: String,
}

impl FallbackNotice {
    /// Compose the notice in the requested locale's language.
    pub fn new(requested: Locale, fallback: Locale) -> Self {
        let strings = LocaleStrings::for_locale(requested);
        Self {
            requested_locale: requested,
            fallback_locale: fallback,
            title: strings.fallback_title.to_string(),
            message: strings
                .fallback_message
                .replace("{requested}", requested.name())
                .replace("{fallback}", fallback.name()),
        }
    }
}
