//! Locale registry: the authoritative set of locales the site is served in.
//!
//! The registry is built once at startup and shared read-only (behind an
//! `Arc`) by the router, the resolver and the catalog loader. Construction
//! validates the set so that every later lookup can rely on it being
//! non-empty with exactly one default.

use crate::i18n::{I18nError, Locale};
use std::collections::HashSet;

/// Configuration for a supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Short locale code used as the first path segment (e.g., "ca", "es")
    pub code: &'static str,

    /// Label shown in the language selector (e.g., "CAT", "ESP")
    pub name: &'static str,

    /// Native name of the language (e.g., "Català", "Español")
    pub native_name: &'static str,

    /// Whether this is the default locale (exactly one must be true)
    pub is_default: bool,
}

/// Immutable registry of supported locales.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
    default_index: usize,
}

impl LocaleRegistry {
    /// Build a registry from a list of locale configurations.
    ///
    /// # Errors
    /// Returns `I18nError::InvalidRegistry` if the list is empty, contains a
    /// duplicate code, or does not mark exactly one locale as default.
    pub fn new(locales: Vec<LocaleConfig>) -> Result<Self, I18nError> {
        if locales.is_empty() {
            return Err(I18nError::InvalidRegistry(
                "at least one locale is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for config in &locales {
            if !seen.insert(config.code) {
                return Err(I18nError::InvalidRegistry(format!(
                    "duplicate locale code '{}'",
                    config.code
                )));
            }
        }

        let defaults: Vec<usize> = locales
            .iter()
            .enumerate()
            .filter(|(_, config)| config.is_default)
            .map(|(i, _)| i)
            .collect();

        let default_index = match defaults.as_slice() {
            [index] => *index,
            [] => {
                return Err(I18nError::InvalidRegistry(
                    "no default locale configured".to_string(),
                ))
            }
            _ => {
                return Err(I18nError::InvalidRegistry(format!(
                    "{} locales are marked as default, expected exactly one",
                    defaults.len()
                )))
            }
        };

        Ok(Self {
            locales,
            default_index,
        })
    }

    /// The site's registry: Catalan (default) and Spanish.
    pub fn colmena() -> Self {
        Self {
            locales: default_locales(),
            default_index: 0,
        }
    }

    /// Get a locale configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|config| config.code == code)
    }

    /// Get the validated `Locale` for a code, if it is registered.
    pub fn locale(&self, code: &str) -> Option<Locale> {
        self.get_by_code(code).map(|config| Locale::new(config.code))
    }

    /// All registered locales, in registration order. Never empty.
    pub fn list_locales(&self) -> Vec<Locale> {
        self.locales
            .iter()
            .map(|config| Locale::new(config.code))
            .collect()
    }

    /// All locale configurations, in registration order.
    pub fn configs(&self) -> &[LocaleConfig] {
        &self.locales
    }

    /// The default locale.
    pub fn default_locale(&self) -> Locale {
        Locale::new(self.locales[self.default_index].code)
    }

    /// Check if a locale code is registered.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self::colmena()
    }
}

/// Locales the site ships with. The default must stay first.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "ca",
            name: "CAT",
            native_name: "Català",
            is_default: true,
        },
        LocaleConfig {
            code: "es",
            name: "ESP",
            native_name: "Español",
            is_default: false,
        },
    ]
}
