//! Unified path management for eka configuration and state files.
//!
//! ```text
//! ~/.config/eka/               # Config directory (platform config dir + "eka")
//! ├── config.toml              # Client configuration
//! ├── client_state.toml        # Storage scope: session id + access token
//! └── logs/                    # Application logs
//!     └── eka.log.YYYY-MM-DD
//! ```
//!
//! Every path can be rebased onto an explicit directory, which is how tests
//! and alternate storage scopes are created.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "eka";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for eka_core::EkaError {
    fn from(err: PathError) -> Self {
        eka_core::EkaError::config(err.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct EkaPaths {
    base: Option<PathBuf>,
}

impl EkaPaths {
    /// Creates a path resolver.
    ///
    /// # Arguments
    ///
    /// * `base` - Directory to use instead of the platform config directory.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the eka configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the storage-scope file.
    ///
    /// Holds the bearer token, so it is written with owner-only permissions
    /// on Unix.
    pub fn state_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("client_state.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_dir() {
        // Hosts without a home directory have no platform config dir
        if let Ok(config_dir) = EkaPaths::default().config_dir() {
            assert!(config_dir.ends_with("eka"));
        }
    }

    #[test]
    fn test_files_live_under_base() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EkaPaths::new(Some(temp_dir.path()));

        let config_file = paths.config_file().unwrap();
        let state_file = paths.state_file().unwrap();
        let logs_dir = paths.logs_dir().unwrap();

        assert_eq!(config_file, temp_dir.path().join("config.toml"));
        assert_eq!(state_file, temp_dir.path().join("client_state.toml"));
        assert!(logs_dir.starts_with(temp_dir.path()));
        assert!(logs_dir.ends_with("logs"));
    }
}
