//! Catalog check binary - verifies that every locale's catalog defines the
//! same keys as the default locale's catalog.
//!
//! Usage:
//!   cargo run --bin check-catalogs               # Check ./messages
//!   cargo run --bin check-catalogs -- path/to/dir
//!
//! Exits with an error if a catalog is missing, unparsable, or lacks keys.
//! Placeholder drift and extra keys are reported as warnings.

use anyhow::{bail, Context, Result};
use colmena_site::i18n::{CatalogLoader, CatalogValidator, LocaleRegistry};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("check_catalogs=info".parse()?),
        )
        .init();

    let dir = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("MESSAGES_DIR").ok())
        .unwrap_or_else(|| "messages".to_string());

    info!("Checking message catalogs in {}", dir);

    let registry = LocaleRegistry::colmena();
    let loader = CatalogLoader::from_dir(&dir);

    let reference = loader
        .load(registry.default_locale())
        .await
        .context("Failed to load default catalog")?;
    info!("Default catalog '{}' has {} keys", reference.locale(), reference.len());

    let mut failed = false;
    for locale in registry.list_locales() {
        if locale == reference.locale() {
            continue;
        }

        let catalog = loader
            .load(locale)
            .await
            .with_context(|| format!("Failed to load catalog '{}'", locale))?;
        let report = CatalogValidator::check_parity(&reference, &catalog);

        for key in &report.missing {
            warn!("[{}] missing key: {}", locale, key);
        }
        for warning in &report.warnings {
            warn!("[{}] {}", locale, warning);
        }

        if report.has_errors() {
            failed = true;
        } else {
            info!("✓ '{}' matches the default catalog", locale);
        }
    }

    if failed {
        bail!("Catalog parity check failed");
    }

    info!("✓ All catalogs are in sync");
    Ok(())
}
