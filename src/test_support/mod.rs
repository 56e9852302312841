//! Test doubles for menagerie unit tests.
//!
//! This module is only compiled for tests. It provides a stub [`Source`]
//! that serves distribution archives built in memory, so the install
//! pipeline can be exercised without a network or a real mirror.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{Error, Result};
use crate::sources::mirror::sorted_versions;
use crate::sources::Source;

/// A [`Source`] with a fixed version set, serving generated archives.
pub struct StubSource {
    versions: BTreeSet<String>,
    fetches: RefCell<usize>,
}

impl StubSource {
    /// Create a stub offering the given versions.
    pub fn new<'a>(versions: impl IntoIterator<Item = &'a str>) -> Self {
        StubSource {
            versions: versions.into_iter().map(|v| v.to_string()).collect(),
            fetches: RefCell::new(0),
        }
    }

    /// How many archive fetches have been performed.
    pub fn fetch_count(&self) -> usize {
        *self.fetches.borrow()
    }
}

impl Source for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    fn list_versions(&self) -> Result<BTreeSet<String>> {
        Ok(self.versions.clone())
    }

    fn fetch(&self, version: &str, dest_dir: &Path) -> Result<PathBuf> {
        if !self.versions.contains(version) {
            return Err(Error::InvalidVersion {
                version: version.to_string(),
                available: sorted_versions(&self.versions),
            });
        }

        *self.fetches.borrow_mut() += 1;

        std::fs::create_dir_all(dest_dir).map_err(|e| Error::io(dest_dir.to_path_buf(), e))?;
        let dest = dest_dir.join(format!("zookeeper-{version}.tar.gz"));
        std::fs::write(&dest, distribution_archive(version))
            .map_err(|e| Error::io(dest.clone(), e))?;

        Ok(dest)
    }
}

/// Build a minimal but shape-correct distribution tarball for `version`:
/// the server jar at the top level, a couple of dependency jars under
/// `lib/`, and a sample config.
pub fn distribution_archive(version: &str) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    let top = format!("zookeeper-{version}");
    let files = [
        (format!("{top}/zookeeper-{version}.jar"), "server"),
        (format!("{top}/lib/slf4j-api-1.7.30.jar"), "slf4j"),
        (format!("{top}/lib/netty-handler-4.1.105.jar"), "netty"),
        (format!("{top}/conf/zoo_sample.cfg"), "tickTime=2000\n"),
    ];

    for (name, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, data.as_bytes())
            .unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_stub_rejects_unknown_versions_without_fetching() {
        let tmp = TempDir::new().unwrap();
        let source = StubSource::new(["3.9.2"]);

        let err = source.fetch("0.0.0", tmp.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidVersion { .. }));
        assert_eq!(source.fetch_count(), 0);
    }

    #[test]
    fn test_stub_serves_an_extractable_archive() {
        let tmp = TempDir::new().unwrap();
        let source = StubSource::new(["3.9.2"]);

        let archive = source.fetch("3.9.2", tmp.path()).unwrap();
        assert!(archive.exists());

        crate::sources::archive::extract_archive(&archive, &tmp.path().join("unpack")).unwrap();
        assert!(tmp
            .path()
            .join("unpack/zookeeper-3.9.2/zookeeper-3.9.2.jar")
            .exists());
    }
}
