//! Source trait - common interface for distribution providers.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A provider of ZooKeeper distribution archives.
pub trait Source {
    /// Get the source name for display.
    fn name(&self) -> &str;

    /// Enumerate the versions this source can install.
    fn list_versions(&self) -> Result<BTreeSet<String>>;

    /// Download the archive for `version` into `dest_dir` and return its
    /// path.
    ///
    /// Implementations validate `version` against [`list_versions`] first
    /// and fail with [`Error::InvalidVersion`] before requesting the
    /// archive.
    ///
    /// [`list_versions`]: Source::list_versions
    /// [`Error::InvalidVersion`]: crate::Error::InvalidVersion
    fn fetch(&self, version: &str, dest_dir: &Path) -> Result<PathBuf>;
}
