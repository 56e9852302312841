//! Global context for menagerie operations.
//!
//! Provides centralized access to the installation root and the directory
//! layout derived from it:
//!
//! ```text
//! <root>/
//! ├── catalog.toml               # Persisted catalog
//! ├── catalog.lock               # Advisory lock file
//! ├── config.toml                # Optional configuration
//! ├── download/                  # Fetched archives
//! ├── unpack/                    # Extracted distributions, one per version
//! │   └── zookeeper-<version>/
//! └── install/                   # Private directories, one per installation
//!     └── <number>/
//! ```

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use directories::ProjectDirs;

use crate::error::Result;
use crate::util::fs::{ensure_dir, normalize_path};

static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("dev", "menagerie", "menagerie"));

/// Context containing the installation root and its derived paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Installation root this context operates on
    root: PathBuf,
}

impl GlobalContext {
    /// Create a context rooted at the user's default data directory.
    pub fn new() -> Self {
        let root = if let Some(dirs) = PROJECT_DIRS.as_ref() {
            dirs.data_local_dir().to_path_buf()
        } else {
            // Fallback to ~/.menagerie
            fallback_root()
        };

        GlobalContext { root }
    }

    /// Create a context rooted at a specific directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        GlobalContext {
            root: normalize_path(&root.into()),
        }
    }

    /// Get the installation root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the directory archives are downloaded into.
    pub fn download_dir(&self) -> PathBuf {
        self.root.join("download")
    }

    /// Get the shared unpack root holding extracted distributions.
    pub fn unpack_dir(&self) -> PathBuf {
        self.root.join("unpack")
    }

    /// Get the root of the per-installation private directories.
    pub fn install_dir(&self) -> PathBuf {
        self.root.join("install")
    }

    /// Get the extracted distribution directory for a version.
    pub fn distribution_dir(&self, version: &str) -> PathBuf {
        self.unpack_dir().join(format!("zookeeper-{version}"))
    }

    /// Get the private directory for an installation number.
    pub fn installation_dir(&self, number: u64) -> PathBuf {
        self.install_dir().join(number.to_string())
    }

    /// Get the optional configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Create the root layout if any of it is missing.
    pub fn ensure_layout(&self) -> Result<()> {
        ensure_dir(&self.root)?;
        ensure_dir(&self.download_dir())?;
        ensure_dir(&self.unpack_dir())?;
        ensure_dir(&self.install_dir())?;
        Ok(())
    }
}

impl Default for GlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

fn fallback_root() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".menagerie"))
        .unwrap_or_else(|| PathBuf::from(".menagerie"))
}
