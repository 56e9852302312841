//! Persisted installation catalog.
//!
//! One catalog lives in each installation root directory and is the single
//! source of truth for which archives have been downloaded, which named
//! installations exist, and whether each one is running. All access goes
//! through the scoped [`Catalog::update`] / [`Catalog::read`] transactions,
//! which serialize concurrent processes with an advisory lock on a sibling
//! `catalog.lock` file and persist the data file atomically
//! (write-to-temp-then-rename).

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Catalog data file name, relative to the installation root.
pub const CATALOG_FILE: &str = "catalog.toml";

/// Lock file name. Locking a sibling file keeps the advisory lock clear of
/// the rename that replaces the data file.
pub const LOCK_FILE: &str = "catalog.lock";

/// Newest catalog format this build can read.
pub const CATALOG_FORMAT: u32 = 1;

/// A downloaded distribution archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRecord {
    /// Where the archive landed on disk.
    pub archive: PathBuf,

    /// SHA-256 of the archive bytes as fetched.
    pub sha256: String,
}

/// One named, numbered, versioned installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installation {
    /// Identifier of the private install directory. Immutable once assigned;
    /// never reused, even after uninstall.
    pub number: u64,

    /// Distribution version this installation runs.
    pub version: String,

    /// Opaque configuration recorded at install time.
    #[serde(default)]
    pub configuration: BTreeMap<String, String>,

    /// Desired-state flag maintained by start/stop/kill.
    #[serde(default)]
    pub running: bool,
}

/// Persisted catalog state for one installation root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    format: u32,

    #[serde(default)]
    downloaded: BTreeMap<String, DownloadRecord>,

    #[serde(default)]
    installed: BTreeMap<String, Installation>,

    #[serde(default)]
    next_number: u64,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            format: CATALOG_FORMAT,
            downloaded: BTreeMap::new(),
            installed: BTreeMap::new(),
            next_number: 0,
        }
    }
}

impl Catalog {
    /// Run `f` against the catalog for `root` under an exclusive lock.
    ///
    /// The state is loaded (or initialized empty), handed to `f` for
    /// mutation, and persisted atomically when `f` returns `Ok`. When `f`
    /// fails nothing is written and the error propagates. The lock is held
    /// by an owned file handle and released when that handle drops, so
    /// release happens on every exit path.
    pub fn update<T>(root: &Path, f: impl FnOnce(&mut Catalog) -> Result<T>) -> Result<T> {
        let lock = open_lock_file(root)?;
        lock.lock_exclusive()
            .map_err(|e| Error::io(root.join(LOCK_FILE), e))?;

        let path = root.join(CATALOG_FILE);
        let mut catalog = Catalog::load(&path)?;
        let value = f(&mut catalog)?;
        catalog.persist(&path)?;
        Ok(value)
    }

    /// Run `f` against a read-only view of the catalog for `root`.
    ///
    /// Takes a shared lock, which is enough to never observe a writer
    /// mid-transaction. No write-back occurs on exit.
    pub fn read<T>(root: &Path, f: impl FnOnce(&Catalog) -> Result<T>) -> Result<T> {
        let lock = open_lock_file(root)?;
        lock.lock_shared()
            .map_err(|e| Error::io(root.join(LOCK_FILE), e))?;

        let catalog = Catalog::load(&root.join(CATALOG_FILE))?;
        f(&catalog)
    }

    fn load(path: &Path) -> Result<Catalog> {
        if !path.exists() {
            return Ok(Catalog::default());
        }

        let contents =
            std::fs::read_to_string(path).map_err(|e| Error::io(path.to_path_buf(), e))?;
        let catalog: Catalog = toml::from_str(&contents).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        if catalog.format > CATALOG_FORMAT {
            return Err(Error::Format {
                found: catalog.format,
                supported: CATALOG_FORMAT,
            });
        }

        Ok(catalog)
    }

    /// Serialize to a temp file in the same directory, then rename over the
    /// data file. A reader without the lock can still never observe a
    /// truncated catalog.
    fn persist(&self, path: &Path) -> Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let body = toml::to_string_pretty(self)?;

        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|e| Error::io(dir.to_path_buf(), e))?;
        tmp.write_all(body.as_bytes())
            .map_err(|e| Error::io(tmp.path().to_path_buf(), e))?;
        tmp.persist(path)
            .map_err(|e| Error::io(path.to_path_buf(), e.error))?;
        Ok(())
    }

    /// Look up the download record for a version.
    pub fn download(&self, version: &str) -> Result<&DownloadRecord> {
        self.downloaded
            .get(version)
            .ok_or_else(|| Error::NotDownloaded(version.to_string()))
    }

    /// Whether an archive for `version` has been recorded.
    pub fn is_downloaded(&self, version: &str) -> bool {
        self.downloaded.contains_key(version)
    }

    /// Record a downloaded archive for `version`.
    pub fn record_download(&mut self, version: &str, record: DownloadRecord) {
        self.downloaded.insert(version.to_string(), record);
    }

    /// Look up an installation by name.
    pub fn installation(&self, name: &str) -> Result<&Installation> {
        self.installed
            .get(name)
            .ok_or_else(|| Error::UnknownInstallation(name.to_string()))
    }

    /// Whether an installation named `name` exists.
    pub fn has_installation(&self, name: &str) -> bool {
        self.installed.contains_key(name)
    }

    /// Look up an installation by name, mutably.
    pub fn installation_mut(&mut self, name: &str) -> Result<&mut Installation> {
        self.installed
            .get_mut(name)
            .ok_or_else(|| Error::UnknownInstallation(name.to_string()))
    }

    /// Record a new installation under `name`.
    pub fn add_installation(&mut self, name: &str, installation: Installation) -> Result<()> {
        if self.installed.contains_key(name) {
            return Err(Error::DuplicateInstallation(name.to_string()));
        }
        self.installed.insert(name.to_string(), installation);
        Ok(())
    }

    /// Remove and return the installation under `name`.
    pub fn remove_installation(&mut self, name: &str) -> Result<Installation> {
        self.installed
            .remove(name)
            .ok_or_else(|| Error::UnknownInstallation(name.to_string()))
    }

    /// All installations, ordered by name.
    pub fn installations(&self) -> impl Iterator<Item = (&str, &Installation)> {
        self.installed.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All recorded downloads, ordered by version.
    pub fn downloads(&self) -> impl Iterator<Item = (&str, &DownloadRecord)> {
        self.downloaded.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether any installation references `version`.
    pub fn version_in_use(&self, version: &str) -> bool {
        self.installed.values().any(|i| i.version == version)
    }

    /// Allocate the next installation number.
    ///
    /// The counter is persisted alongside the maps rather than derived from
    /// `installed`, so a number can never be handed out twice across the
    /// catalog's history.
    pub fn allocate_number(&mut self) -> u64 {
        self.next_number += 1;
        self.next_number
    }
}

fn open_lock_file(root: &Path) -> Result<File> {
    std::fs::create_dir_all(root).map_err(|e| Error::io(root.to_path_buf(), e))?;

    let path = root.join(LOCK_FILE);
    OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(&path)
        .map_err(|e| Error::io(path, e))
}
