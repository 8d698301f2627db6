//! Message catalog loading and caching.
//!
//! Catalogs are read from one JSON document per locale and kept for the
//! lifetime of the process. Two requests racing on the first load of the
//! same locale both read the asset; whichever inserts last wins, and both
//! computed the same catalog.

use crate::i18n::{
    Catalog, CatalogMetrics, CatalogValidator, I18nError, Locale, LocaleRegistry, MetricsReport,
};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Where catalog documents come from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// `{dir}/{code}.json` per locale
    Directory(PathBuf),
    /// Documents held in memory, keyed by locale code
    Documents(HashMap<String, String>),
}

/// Loads catalogs on demand and caches them per locale.
#[derive(Debug)]
pub struct CatalogLoader {
    source: CatalogSource,
    cache: RwLock<HashMap<&'static str, Arc<Catalog>>>,
    metrics: CatalogMetrics,
}

impl CatalogLoader {
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
            metrics: CatalogMetrics::default(),
        }
    }

    /// Loader reading `{code}.json` files from `dir`.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(CatalogSource::Directory(dir.into()))
    }

    /// Loader serving in-memory documents.
    pub fn from_documents(documents: HashMap<String, String>) -> Self {
        Self::new(CatalogSource::Documents(documents))
    }

    /// Get the catalog for a locale, reading it on first access.
    ///
    /// # Errors
    /// `CatalogMissing` if no asset exists for the locale, `CatalogRead` if it
    /// exists but cannot be read, `CatalogParse` if the asset is not a valid
    /// catalog.
    pub async fn load(&self, locale: Locale) -> Result<Arc<Catalog>, I18nError> {
        if let Some(catalog) = self.cached(locale) {
            self.metrics.record_cache_hit();
            return Ok(catalog);
        }
        self.metrics.record_cache_miss();

        let catalog = match self.read(locale).await {
            Ok(catalog) => Arc::new(catalog),
            Err(e) => {
                self.metrics.record_load_failure();
                return Err(e);
            }
        };
        self.metrics.record_load();
        debug!("Loaded catalog for '{}' ({} keys)", locale, catalog.len());

        let mut cache = self.cache.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.insert(locale.code(), Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Load every registered locale and check key parity against the
    /// default catalog.
    ///
    /// Meant to run at startup: any error means the registry and the
    /// catalog assets have drifted apart.
    pub async fn preload(&self, registry: &LocaleRegistry) -> Result<(), I18nError> {
        let locales = registry.list_locales();
        let catalogs = futures::future::try_join_all(locales.iter().map(|l| self.load(*l))).await?;

        let reference = self.load(registry.default_locale()).await?;
        for catalog in catalogs.iter().filter(|c| c.locale() != reference.locale()) {
            let report = CatalogValidator::check_parity(&reference, catalog).into_result()?;
            for warning in &report.warnings {
                warn!("Catalog '{}': {}", report.locale, warning);
            }
        }

        info!(
            "✓ Loaded {} catalogs ({} keys in default '{}')",
            catalogs.len(),
            reference.len(),
            reference.locale()
        );
        Ok(())
    }

    /// Cache statistics.
    pub fn metrics(&self) -> MetricsReport {
        self.metrics.report()
    }

    fn cached(&self, locale: Locale) -> Option<Arc<Catalog>> {
        let cache = self.cache.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.get(locale.code()).cloned()
    }

    async fn read(&self, locale: Locale) -> Result<Catalog, I18nError> {
        let text = match &self.source {
            CatalogSource::Directory(dir) => read_catalog_file(dir, locale).await?,
            CatalogSource::Documents(documents) => documents
                .get(locale.code())
                .cloned()
                .ok_or_else(|| I18nError::CatalogMissing {
                    locale: locale.code().to_string(),
                    path: PathBuf::from(format!("<memory>/{}", locale)),
                })?,
        };

        Catalog::from_json(locale, &text)
    }
}

async fn read_catalog_file(dir: &Path, locale: Locale) -> Result<String, I18nError> {
    let path = dir.join(format!("{}.json", locale));
    match tokio::fs::read_to_string(&path).await {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(I18nError::CatalogMissing {
            locale: locale.code().to_string(),
            path,
        }),
        Err(source) => Err(I18nError::CatalogRead {
            locale: locale.code().to_string(),
            path,
            source,
        }),
    }
}
