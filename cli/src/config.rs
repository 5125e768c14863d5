//! Configuration management for the booking CLI.
//!
//! Loads configuration from environment variables with sensible defaults.

use cinema_booking_core::{Catalog, CatalogError};
use std::env;
use std::path::PathBuf;

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TOML catalog to load (`BOOKING_CATALOG_PATH`); the reference catalog when unset
    pub catalog_path: Option<PathBuf>,
    /// Log filter (`RUST_LOG`, default `info`)
    pub log_level: String,
    /// Prompt printed before each command (`BOOKING_PROMPT`, default `"> "`)
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            catalog_path: lookup("BOOKING_CATALOG_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            prompt: lookup("BOOKING_PROMPT").unwrap_or_else(|| "> ".to_string()),
        }
    }

    /// Build the catalog this configuration points at.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the configured file cannot be read, parsed
    /// or validated.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading catalog file");
                Catalog::load(path).inspect_err(|error| {
                    tracing::warn!(path = %path.display(), %error, "Failed to load catalog");
                })
            }
            None => Ok(Catalog::reference()),
        }
    }
}
