//! Path matcher: splits a request path into a locale-shaped first segment
//! and the rest. Purely syntactic; whether the code is registered is the
//! resolver's concern.

use regex::Regex;
use std::sync::OnceLock;

/// Result of matching a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch<'a> {
    /// First segment, if it looks like a locale code
    pub candidate: Option<&'a str>,

    /// Path without the candidate segment; always starts with `/`
    pub remainder: String,
}

static LOCALE_SHAPE: OnceLock<Regex> = OnceLock::new();

/// Check whether a path segment has the shape of a locale code: two
/// lowercase letters, optionally followed by a two-letter region
/// (`ca`, `es`, `pt-BR`).
pub fn is_locale_shaped(segment: &str) -> bool {
    let regex = LOCALE_SHAPE
        .get_or_init(|| Regex::new(r"^[a-z]{2}(?:-[A-Za-z]{2})?$").expect("locale shape regex is valid"));
    regex.is_match(segment)
}

/// Split `path` into an optional locale candidate and the remainder.
///
/// `/es/contact` → (`es`, `/contact`), `/es` → (`es`, `/`),
/// `/about` → (none, `/about`), `` → (none, `/`).
pub fn match_path(path: &str) -> PathMatch<'_> {
    let normalized = if path.is_empty() { "/" } else { path };
    let trimmed = normalized.strip_prefix('/').unwrap_or(normalized);

    let (first, rest) = match trimmed.find('/') {
        Some(index) => (&trimmed[..index], &trimmed[index..]),
        None => (trimmed, ""),
    };

    if !first.is_empty() && is_locale_shaped(first) {
        let remainder = if rest.is_empty() { "/" } else { rest };
        return PathMatch {
            candidate: Some(first),
            remainder: remainder.to_string(),
        };
    }

    PathMatch {
        candidate: None,
        remainder: normalized.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_no_candidate() {
        let m = match_path("/");
        assert_eq!(m.candidate, None);
        assert_eq!(m.remainder, "/");
    }

    #[test]
    fn test_empty_path_is_root() {
        let m = match_path("");
        assert_eq!(m.candidate, None);
        assert_eq!(m.remainder, "/");
    }

    #[test]
    fn test_locale_with_rest() {
        let m = match_path("/es/contact");
        assert_eq!(m.candidate, Some("es"));
        assert_eq!(m.remainder, "/contact");
    }

    #[test]
    fn test_locale_only() {
        let m = match_path("/ca");
        assert_eq!(m.candidate, Some("ca"));
        assert_eq!(m.remainder, "/");
    }

    #[test]
    fn test_locale_with_trailing_slash() {
        let m = match_path("/ca/");
        assert_eq!(m.candidate, Some("ca"));
        assert_eq!(m.remainder, "/");
    }

    #[test]
    fn test_unregistered_code_still_matches() {
        let m = match_path("/fr/contact");
        assert_eq!(m.candidate, Some("fr"));
        assert_eq!(m.remainder, "/contact");
    }

    #[test]
    fn test_non_locale_segment() {
        let m = match_path("/about/team");
        assert_eq!(m.candidate, None);
        assert_eq!(m.remainder, "/about/team");
    }

    #[test]
    fn test_deep_rest_is_kept() {
        let m = match_path("/es/a/b/c");
        assert_eq!(m.remainder, "/a/b/c");
    }

    #[test]
    fn test_locale_shape() {
        assert!(is_locale_shaped("ca"));
        assert!(is_locale_shaped("pt-BR"));
        assert!(!is_locale_shaped("CA"));
        assert!(!is_locale_shaped("cat"));
        assert!(!is_locale_shaped("c"));
        assert!(!is_locale_shaped("about"));
        assert!(!is_locale_shaped(""));
    }
}
