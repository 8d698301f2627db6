//! Locale resolver: decides, per request path, whether to serve the page,
//! redirect to the default locale, or report that the route does not exist.
//!
//! Locale detection from client signals is disabled. A path without a
//! locale segment always goes to the default locale, whatever the browser
//! asks for.

use crate::i18n::{Locale, LocaleRegistry};
use crate::routing::match_path;
use std::sync::Arc;

/// Terminal outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Serve the page for `remainder` in `locale`
    Accept { locale: Locale, remainder: String },
    /// Send the client to `target`
    Redirect { target: String },
    /// The first segment looks like a locale but is not registered
    NotFound,
}

/// Stateless resolver over an immutable registry.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    registry: Arc<LocaleRegistry>,
}

impl LocaleResolver {
    pub fn new(registry: Arc<LocaleRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    /// Resolve a request path.
    pub fn resolve(&self, path: &str) -> Outcome {
        let matched = match_path(path);

        match matched.candidate {
            Some(code) => match self.registry.locale(code) {
                Some(locale) => Outcome::Accept {
                    locale,
                    remainder: matched.remainder,
                },
                None => Outcome::NotFound,
            },
            None => Outcome::Redirect {
                target: format!("/{}{}", self.registry.default_locale(), matched.remainder),
            },
        }
    }

    /// Resolve a request path together with the client's language
    /// preference. The preference is deliberately ignored.
    pub fn resolve_request(&self, path: &str, _accept_language: Option<&str>) -> Outcome {
        self.resolve(path)
    }
}

/// Path of the same page in another locale (used by the language selector).
pub fn switch_locale_path(remainder: &str, locale: Locale) -> String {
    if remainder.is_empty() || remainder == "/" {
        format!("/{}", locale)
    } else {
        format!("/{}{}", locale, remainder)
    }
}
