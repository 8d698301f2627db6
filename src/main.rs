use anyhow::{Context, Result};
use colmena_site::{
    config::Config,
    contact::ContactClient,
    i18n::{CatalogLoader, LocaleRegistry},
    server::{self, AppState},
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("colmena_site=info".parse()?),
        )
        .init();

    info!("Starting Colmena Experience site");

    // Load configuration from environment
    let config = Config::from_env()?;

    let registry = Arc::new(LocaleRegistry::colmena());

    // A registry/catalog mismatch is a deployment defect: refuse to start
    let catalogs = CatalogLoader::from_dir(&config.messages_dir);
    catalogs.preload(&registry).await.with_context(|| {
        format!(
            "Message catalogs in {} do not match the locale registry",
            config.messages_dir.display()
        )
    })?;

    let contact = ContactClient::new(&config.contact_endpoint, config.contact_timeout)
        .context("Failed to create contact client")?;

    let state = Arc::new(AppState::new(registry, catalogs, contact));
    let app = server::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("✓ Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
