use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Formcarry form that receives contact submissions.
pub const DEFAULT_CONTACT_ENDPOINT: &str = "https://formcarry.com/s/emyGEYl2TiY";

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Catalogs
    pub messages_dir: PathBuf,

    // Contact relay
    pub contact_endpoint: String,
    pub contact_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: match std::env::var("PORT") {
                Ok(v) => v.parse().with_context(|| format!("PORT must be a port number, got '{}'", v))?,
                Err(_) => 3000,
            },

            messages_dir: std::env::var("MESSAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("messages")),

            contact_endpoint: std::env::var("CONTACT_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_CONTACT_ENDPOINT.to_string()),
            contact_timeout: Duration::from_secs(
                std::env::var("CONTACT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
        })
    }
}
