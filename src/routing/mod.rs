//! Locale routing: which paths are intercepted, how a path splits into a
//! locale and a remainder, and what happens to it.

mod matcher;
mod resolver;

pub use matcher::{is_locale_shaped, match_path, PathMatch};
pub use resolver::{switch_locale_path, LocaleResolver, Outcome};

/// Which request paths go through locale resolution.
///
/// Everything is intercepted except paths under one of the bypass prefixes
/// and paths whose last segment looks like a file (`/logo.png`).
#[derive(Debug, Clone)]
pub struct RouteMatcherConfig {
    bypass_prefixes: Vec<String>,
}

impl RouteMatcherConfig {
    pub fn new(bypass_prefixes: Vec<String>) -> Self {
        Self { bypass_prefixes }
    }

    /// Whether the locale middleware handles `path`.
    pub fn intercepts(&self, path: &str) -> bool {
        let under_prefix = self.bypass_prefixes.iter().any(|prefix| {
            path == prefix
                || path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        });
        if under_prefix {
            return false;
        }

        let last_segment = path.rsplit('/').next().unwrap_or_default();
        !last_segment.contains('.')
    }
}

impl Default for RouteMatcherConfig {
    fn default() -> Self {
        Self::new(
            ["/api", "/health", "/assets"]
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
        )
    }
}
