//! Application configuration loaded from an optional TOML file.
//!
//! Everything in the file is optional: a missing file yields the defaults,
//! while a file that exists but does not parse is a configuration error.

use super::database::get_database_url;
use super::seed::{CompanySeed, default_company_seeds};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default config file location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Structure of the config file
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Overrides `DATABASE_URL`
    #[serde(default)]
    pub database_url: Option<String>,
    /// Replaces the built-in seed companies when non-empty
    #[serde(default)]
    pub companies: Vec<CompanySeed>,
}

impl AppConfig {
    /// Database URL from the file, else the environment, else the default.
    #[must_use]
    pub fn database_url(&self) -> String {
        self.database_url.clone().unwrap_or_else(get_database_url)
    }

    /// Seed companies from the file, else the built-in list.
    #[must_use]
    pub fn company_seeds(&self) -> Vec<CompanySeed> {
        if self.companies.is_empty() {
            default_company_seeds()
        } else {
            self.companies.clone()
        }
    }
}

/// Loads configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        tracing::debug!("No config file at {:?}, using defaults", path_ref);
        return Ok(AppConfig::default());
    }

    tracing::debug!("Loading configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse TOML from config file {path_ref:?}: {e}"),
    })
}

/// Loads configuration from `LTTR_CONFIG`, or `config.toml` when unset.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path =
        std::env::var("LTTR_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(&path)?;
    tracing::info!(
        "Configuration loaded ({} seed companies)",
        config.company_seeds().len()
    );
    Ok(config)
}
