//! Translation dictionaries: one JSON document per locale.
//!
//! Keys are addressed by dotted paths (`pages.home.name`). Loading falls back
//! to the default locale silently; the caller never learns that it happened.

use crate::error::SiteError;
use crate::i18n::Locale;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// A nested key/value translation table for one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    root: Value,
}

impl Dictionary {
    /// Parse a dictionary from JSON text. The root must be an object.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let root: serde_json::Map<String, Value> = serde_json::from_str(text)?;
        Ok(Self {
            root: Value::Object(root),
        })
    }

    /// Look up a string by dotted key path.
    pub fn get(&self, key_path: &str) -> Option<&str> {
        key_path
            .split('.')
            .try_fold(&self.root, |node, segment| node.get(segment))?
            .as_str()
    }

    /// Like [`Dictionary::get`], but a missing key is a configuration error.
    pub fn require(&self, key_path: &str) -> Result<&str, SiteError> {
        self.get(key_path).ok_or_else(|| {
            SiteError::Configuration(format!("dictionary key '{}' is missing", key_path))
        })
    }

    /// Every dotted path that leads to a leaf value.
    pub fn key_paths(&self) -> BTreeSet<String> {
        let mut paths = BTreeSet::new();
        collect_paths(&self.root, String::new(), &mut paths);
        paths
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }
}

fn collect_paths(node: &Value, prefix: String, out: &mut BTreeSet<String>) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                collect_paths(child, path, out);
            }
        }
        _ => {
            if !prefix.is_empty() {
                out.insert(prefix);
            }
        }
    }
}

/// Reads `<dir>/<locale>.json` on demand.
#[derive(Debug, Clone)]
pub struct DictionaryLoader {
    dir: PathBuf,
}

impl DictionaryLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, locale: Locale) -> PathBuf {
        self.dir.join(format!("{}.json", locale.code()))
    }

    /// Load one locale's dictionary with no fallback.
    pub async fn load_exact(&self, locale: Locale) -> Result<Dictionary, SiteError> {
        let path = self.path_for(locale);
        debug!("Loading dictionary {}", path.display());

        let text = tokio::fs::read_to_string(&path).await?;
        Dictionary::from_json_str(&text)
            .map_err(|e| SiteError::integrity(path.display().to_string(), e.to_string()))
    }

    /// Load a locale's dictionary, substituting the default locale's one if
    /// it cannot be read.
    ///
    /// # Errors
    /// `SiteError::Configuration` when neither dictionary is available.
    pub async fn load(&self, locale: Locale) -> Result<Dictionary, SiteError> {
        let err = match self.load_exact(locale).await {
            Ok(dictionary) => return Ok(dictionary),
            Err(e) => e,
        };
        error!("Failed to load dictionary for locale {}: {}", locale, err);

        let default = Locale::default_locale();
        if locale == default {
            return Err(SiteError::Configuration(format!(
                "failed to load default dictionary ({}); check i18n configuration",
                locale
            )));
        }

        warn!("Falling back to default locale dictionary: {}", default);
        self.load_exact(default).await.map_err(|fallback_err| {
            error!(
                "Failed to load fallback dictionary {}: {}",
                default, fallback_err
            );
            SiteError::Configuration(
                "failed to load dictionaries; check i18n configuration".to_string(),
            )
        })
    }
}
