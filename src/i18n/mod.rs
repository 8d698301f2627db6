//! Internationalization: supported locales and their message catalogs.
//!
//! # Architecture
//!
//! - `registry`: the fixed set of locales and the default one
//! - `locale`: `Locale`, a code validated against the registry
//! - `catalog`: flat key → text map for one locale
//! - `loader`: reads catalog documents and caches them per locale
//! - `validator`: key and placeholder parity between catalogs
//! - `metrics`: catalog cache counters
//!
//! # Example
//!
//! ```rust,ignore
//! use colmena_site::i18n::{CatalogLoader, LocaleRegistry};
//!
//! let registry = LocaleRegistry::colmena();
//! let loader = CatalogLoader::from_dir("messages");
//! loader.preload(&registry).await?;
//!
//! let catalog = loader.load(registry.default_locale()).await?;
//! let title = catalog.text("hero.title");
//! ```

mod catalog;
mod error;
mod loader;
mod locale;
mod metrics;
mod registry;
mod validator;

pub use catalog::{flatten_json, missing_marker, Catalog};
pub use error::I18nError;
pub use loader::{CatalogLoader, CatalogSource};
pub use locale::Locale;
pub use metrics::{CatalogMetrics, MetricsReport};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use validator::{CatalogValidator, ParityReport};
