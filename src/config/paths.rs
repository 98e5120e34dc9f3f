//! Path management for settleup-summary
//!
//! ## Path Resolution Order
//!
//! 1. `SETTLEUP_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/settleup-summary` or `~/.config/settleup-summary`
//! 3. Windows: `%APPDATA%\settleup-summary`

use std::path::PathBuf;

use crate::error::SummaryError;

/// Environment variable that overrides the config directory
pub const CONFIG_DIR_ENV: &str = "SETTLEUP_CONFIG_DIR";

/// Manages the paths used by settleup-summary
#[derive(Debug, Clone)]
pub struct SettleUpPaths {
    /// Base directory for the configuration
    base_dir: PathBuf,
}

impl SettleUpPaths {
    /// Resolve the configuration directory
    ///
    /// # Errors
    ///
    /// Returns an error if neither the override nor a home directory is available.
    pub fn new() -> Result<Self, SummaryError> {
        let base_dir = if let Ok(custom) = std::env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SettleUpPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), SummaryError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SummaryError::Io(format!("Failed to create config directory: {}", e)))
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SummaryError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                SummaryError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("settleup-summary"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SummaryError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SummaryError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("settleup-summary"))
}
