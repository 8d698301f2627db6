//! Catalog validation.
//!
//! Every key the default catalog defines must exist in every other catalog,
//! and translated values must keep the `{placeholders}` of the reference
//! value. Key gaps are errors; placeholder drift and extra keys are
//! warnings.

use crate::i18n::{Catalog, I18nError};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Result of comparing a catalog against the reference catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityReport {
    /// Locale code of the catalog that was checked
    pub locale: String,

    /// Keys present in the reference but absent here (sorted)
    pub missing: Vec<String>,

    /// Non-critical findings: extra keys, placeholder mismatches
    pub warnings: Vec<String>,
}

impl ParityReport {
    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.missing.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    /// Turn missing keys into an error.
    ///
    /// # Errors
    /// Returns `I18nError::ParityViolation` if any reference key is missing.
    pub fn into_result(self) -> Result<Self, I18nError> {
        if self.has_errors() {
            Err(I18nError::ParityViolation {
                locale: self.locale,
                missing: self.missing,
            })
        } else {
            Ok(self)
        }
    }
}

/// Validator for catalog key parity.
pub struct CatalogValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl CatalogValidator {
    /// Compare `other` against `reference`.
    pub fn check_parity(reference: &Catalog, other: &Catalog) -> ParityReport {
        let reference_keys: BTreeSet<&str> = reference.keys().collect();
        let other_keys: BTreeSet<&str> = other.keys().collect();

        let missing = reference_keys
            .difference(&other_keys)
            .map(|key| key.to_string())
            .collect();

        let mut warnings: Vec<String> = other_keys
            .difference(&reference_keys)
            .map(|key| format!("Extra key '{}' not present in '{}'", key, reference.locale()))
            .collect();

        for key in reference_keys.intersection(&other_keys) {
            let (Ok(expected), Ok(actual)) = (reference.get(key), other.get(key)) else {
                continue;
            };
            let expected = Self::extract_placeholders(expected);
            let actual = Self::extract_placeholders(actual);
            if expected != actual {
                warnings.push(format!(
                    "Placeholder mismatch for '{}': '{}' has {:?}, '{}' has {:?}",
                    key,
                    reference.locale(),
                    expected,
                    other.locale(),
                    actual
                ));
            }
        }

        ParityReport {
            locale: other.locale().code().to_string(),
            missing,
            warnings,
        }
    }

    /// Extract the set of `{name}` placeholders in a value.
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex is valid"));

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LocaleRegistry;
    use serde_json::{json, Value};

    fn catalogs(ca: Value, es: Value) -> (Catalog, Catalog) {
        let registry = LocaleRegistry::colmena();
        (
            Catalog::from_json(registry.locale("ca").unwrap(), &ca.to_string()).unwrap(),
            Catalog::from_json(registry.locale("es").unwrap(), &es.to_string()).unwrap(),
        )
    }

    #[test]
    fn test_identical_keys_are_clean() {
        let (ca, es) = catalogs(
            json!({ "hero": { "title": "Juga" } }),
            json!({ "hero": { "title": "Juega" } }),
        );
        let report = CatalogValidator::check_parity(&ca, &es);
        assert!(report.is_clean());
        assert_eq!(report.locale, "es");
    }

    #[test]
    fn test_missing_key_is_error() {
        let (ca, es) = catalogs(
            json!({ "hero": { "title": "Juga", "subtitle": "Connecta" } }),
            json!({ "hero": { "title": "Juega" } }),
        );
        let report = CatalogValidator::check_parity(&ca, &es);
        assert!(report.has_errors());
        assert_eq!(report.missing, vec!["hero.subtitle"]);
    }

    #[test]
    fn test_missing_array_entry_is_error() {
        let (ca, es) = catalogs(
            json!({ "steps": ["u", "dos", "tres"] }),
            json!({ "steps": ["uno", "dos"] }),
        );
        let report = CatalogValidator::check_parity(&ca, &es);
        assert_eq!(report.missing, vec!["steps.2"]);
    }

    #[test]
    fn test_extra_key_is_warning() {
        let (ca, es) = catalogs(
            json!({ "a": "1" }),
            json!({ "a": "1", "b": "2" }),
        );
        let report = CatalogValidator::check_parity(&ca, &es);
        assert!(!report.has_errors());
        assert!(report.has_warnings());
        assert!(report.warnings[0].contains("Extra key 'b'"));
    }

    #[test]
    fn test_placeholder_mismatch_is_warning() {
        let (ca, es) = catalogs(
            json!({ "copyright": "© {year} Colmena" }),
            json!({ "copyright": "© Colmena" }),
        );
        let report = CatalogValidator::check_parity(&ca, &es);
        assert!(!report.has_errors());
        assert!(report.warnings[0].contains("Placeholder mismatch"));
    }

    #[test]
    fn test_into_result_reports_violation() {
        let (ca, es) = catalogs(json!({ "a": "1", "b": "2" }), json!({ "a": "1" }));
        let err = CatalogValidator::check_parity(&ca, &es).into_result().unwrap_err();
        match err {
            I18nError::ParityViolation { locale, missing } => {
                assert_eq!(locale, "es");
                assert_eq!(missing, vec!["b"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extract_placeholders() {
        let found = CatalogValidator::extract_placeholders("{year} and {name}, not { spaced }");
        let expected: BTreeSet<String> = ["name", "year"].iter().map(|s| s.to_string()).collect();
        assert_eq!(found, expected);
    }
}
