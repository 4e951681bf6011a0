//! Host configuration, loaded from and saved to TOML.
//!
//! ```toml
//! [search]
//! timeout_seconds = 10
//! page_delay_ms = 1000
//! disabled_providers = ["wolfram_alpha"]
//!
//! [session]
//! delivery = "buffered"
//! event_capacity = 256
//! ```

use std::path::{Path, PathBuf};

use linkscout_search::SearchConfig;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// How a session hands results to its client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Emit results as each provider finishes. Duplicate URLs are won by
    /// whichever provider finished first.
    #[default]
    Incremental,
    /// Wait for the whole batch, then emit. Duplicate URLs are won by the
    /// provider launched first.
    Buffered,
}

/// Per-session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub delivery: DeliveryMode,
    /// Capacity of the outbound event queue between a session and its writer.
    pub event_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            delivery: DeliveryMode::default(),
            event_capacity: 256,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    /// Check every section.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.search
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        if self.session.event_capacity == 0 {
            return Err(AppError::Config(
                "session.event_capacity must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/linkscout/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("linkscout").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("linkscout")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/linkscout-config/config.toml")
        }
    }

    /// Load `path` if given, else the default path if it exists, else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file cannot be loaded, or if
    /// the resulting configuration is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_config_path();
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }
}
