//! Dictionary parity validation.
//!
//! The rendering layer addresses every dictionary through the same key paths,
//! so each locale must expose the key set of the default locale's dictionary.
//! The loader does not enforce this; the validator reports it.

use crate::i18n::Dictionary;

/// Validation report containing errors and warnings about a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Key paths the rendering layer needs but the candidate lacks
    pub errors: Vec<String>,

    /// Non-critical findings (extra keys, empty strings)
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub struct DictionaryValidator;

impl DictionaryValidator {
    /// Compare a candidate dictionary against the reference key set.
    ///
    /// - a key path present in `reference` but not in `candidate` is an error
    /// - a key path only in `candidate` is a warning
    /// - an empty string value in `candidate` is a warning
    pub fn validate(reference: &Dictionary, candidate: &Dictionary) -> ValidationReport {
        let mut report = ValidationReport::new();
        let expected = reference.key_paths();
        let actual = candidate.key_paths();

        for missing in expected.difference(&actual) {
            report.errors.push(format!("Missing key: {}", missing));
        }

        for extra in actual.difference(&expected) {
            report.warnings.push(format!("Unexpected key: {}", extra));
        }

        for path in &actual {
            if candidate.get(path).is_some_and(|value| value.trim().is_empty()) {
                report.warnings.push(format!("Empty value: {}", path));
            }
        }

        report
    }
}
