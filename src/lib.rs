//! Colmena Experience marketing site.
//!
//! Library surface used by the binaries and the integration tests.

pub mod config;
pub mod contact;
pub mod i18n;
pub mod render;
pub mod routing;
pub mod server;
