//! Configuration service implementation.
//!
//! Loads the client configuration from `config.toml`, writing a default file
//! on first run, then applies environment overrides:
//!
//! - `EKA_BASE_URL`
//! - `EKA_REQUEST_TIMEOUT_SECS`

use crate::paths::EkaPaths;
use crate::storage::AtomicTomlFile;
use eka_core::config::ClientConfig;
use eka_core::error::{EkaError, Result};
use std::sync::{Arc, PoisonError, RwLock};

pub const ENV_BASE_URL: &str = "EKA_BASE_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "EKA_REQUEST_TIMEOUT_SECS";

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: EkaPaths,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(paths: EkaPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<ClientConfig> {
        if let Some(cached) = self
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(cached.clone());
        }

        let loaded = apply_overrides(self.load_from_file()?, |key| std::env::var(key).ok())?;

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());

        Ok(loaded)
    }

    fn load_from_file(&self) -> Result<ClientConfig> {
        let file = AtomicTomlFile::<ClientConfig>::new(self.paths.config_file()?);

        match file.load()? {
            Some(config) => Ok(config),
            None => {
                let config = ClientConfig::default();
                file.save(&config)?;
                tracing::info!(path = %file.path().display(), "Wrote default configuration");
                Ok(config)
            }
        }
    }
}

/// Applies environment overrides on top of a file configuration.
///
/// `lookup` resolves a variable name to its value.
pub fn apply_overrides<F>(mut config: ClientConfig, lookup: F) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
        config.base_url = base_url.trim().to_string();
    }

    if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
        config.request_timeout_secs = raw.trim().parse().map_err(|_| {
            EkaError::config(format!(
                "{} must be a whole number of seconds, got '{}'",
                ENV_REQUEST_TIMEOUT_SECS, raw
            ))
        })?;
    }

    Ok(config)
}
