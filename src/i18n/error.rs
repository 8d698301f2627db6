use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the locale registry and the message catalogs.
#[derive(Debug, Error)]
pub enum I18nError {
    /// The locale list cannot be used as a registry
    #[error("invalid locale registry: {0}")]
    InvalidRegistry(String),

    /// A registered locale has no catalog asset
    #[error("no message catalog for locale '{locale}' (looked in {})", path.display())]
    CatalogMissing { locale: String, path: PathBuf },

    /// The catalog asset exists but could not be read
    #[error("failed to read message catalog for locale '{locale}' at {}", path.display())]
    CatalogRead {
        locale: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog asset exists but is not a JSON object
    #[error("message catalog for locale '{locale}' is invalid: {reason}")]
    CatalogParse { locale: String, reason: String },

    /// A lookup for a key the catalog does not define
    #[error("missing translation key '{key}' in locale '{locale}'")]
    MissingKey { locale: String, key: String },

    /// Catalogs of different locales do not define the same keys
    #[error("locale '{locale}' is missing {} key(s) present in the default catalog: {}", missing.len(), missing.join(", "))]
    ParityViolation { locale: String, missing: Vec<String> },
}
