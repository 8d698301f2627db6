//! Locale type: a locale code that has been checked against the registry.

use std::fmt;

/// A registered locale.
///
/// Only the `LocaleRegistry` hands these out, so holding a `Locale` means the
/// code is one the site is served in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    /// Short locale code (e.g., "ca", "es")
    code: &'static str,
}

impl Locale {
    pub(crate) fn new(code: &'static str) -> Self {
        Self { code }
    }

    /// Get the locale code.
    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use crate::i18n::LocaleRegistry;

    #[test]
    fn test_display_is_code() {
        let locale = LocaleRegistry::colmena().default_locale();
        assert_eq!(locale.to_string(), "ca");
    }

    #[test]
    fn test_equality_across_lookups() {
        let registry = LocaleRegistry::colmena();
        assert_eq!(registry.locale("es"), registry.locale("es"));
        assert_ne!(registry.locale("es"), Some(registry.default_locale()));
    }
}
