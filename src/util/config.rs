//! Configuration file support.
//!
//! An installation root may carry an optional `config.toml`:
//!
//! ```toml
//! [net]
//! mirror = "https://archive.apache.org/dist/zookeeper"
//! ```
//!
//! The `MENAGERIE_MIRROR` environment variable takes precedence over the
//! file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::fs::read_to_string;

/// Environment variable overriding the mirror base URL.
pub const MIRROR_ENV: &str = "MENAGERIE_MIRROR";

/// Menagerie configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Network settings
    pub net: NetConfig,
}

/// Network settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    /// Base URL of the directory holding `zookeeper-<version>/` release
    /// directories. When unset, the preferred mirror is resolved through
    /// the ASF closer service.
    pub mirror: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load configuration with fallback to defaults if the file is absent.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Resolve the effective mirror override, if any.
    pub fn mirror(&self) -> Option<String> {
        std::env::var(MIRROR_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.net.mirror.clone())
    }
}
