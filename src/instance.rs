//! Service handle over one named installation.
//!
//! A [`Service`] is an ephemeral view reconstructed by [`ops::load`]; it
//! never caches catalog state. Every lifecycle call is one catalog
//! transaction keyed by the installation's name, so concurrent processes
//! holding handles to the same root stay consistent.
//!
//! [`ops::load`]: crate::ops::load

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::{Catalog, Installation};
use crate::error::{Error, Result};

/// Handle bound to one named installation.
#[derive(Debug, Clone)]
pub struct Service {
    name: String,
    root: PathBuf,
    dist_dir: PathBuf,
    home_dir: PathBuf,
}

impl Service {
    pub(crate) fn new(
        name: impl Into<String>,
        root: impl Into<PathBuf>,
        dist_dir: impl Into<PathBuf>,
        home_dir: impl Into<PathBuf>,
    ) -> Self {
        Service {
            name: name.into(),
            root: root.into(),
            dist_dir: dist_dir.into(),
            home_dir: home_dir.into(),
        }
    }

    /// The installation name this handle addresses.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shared extracted distribution directory.
    pub fn distribution_dir(&self) -> &Path {
        &self.dist_dir
    }

    /// The installation's private directory.
    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    /// Mark the installation as running.
    ///
    /// This records desired state in the catalog; process supervision is
    /// the business of whatever consumes the flag.
    pub fn start(&self) -> Result<()> {
        self.set_running(true)
    }

    /// Mark the installation as stopped.
    ///
    /// `timeout` is accepted for interface parity and ignored; there is no
    /// supervised shutdown to wait on.
    pub fn stop(&self, timeout: Option<Duration>) -> Result<()> {
        let _ = timeout;
        self.set_running(false)
    }

    /// Mark the installation as stopped, immediately.
    pub fn kill(&self) -> Result<()> {
        self.set_running(false)
    }

    /// Read the persisted running flag.
    pub fn running(&self) -> Result<bool> {
        Catalog::read(&self.root, |c| Ok(c.installation(&self.name)?.running))
    }

    /// Read the full installation record.
    pub fn installation(&self) -> Result<Installation> {
        Catalog::read(&self.root, |c| c.installation(&self.name).cloned())
    }

    /// Compute the classpath needed to run this distribution: the
    /// `zookeeper-*.jar` at the distribution root plus every jar under
    /// `lib/`. Ordering follows glob order; treat it as a set across
    /// platforms.
    pub fn classpath(&self) -> Result<Vec<PathBuf>> {
        let mut jars = glob_jars(&self.dist_dir.join("zookeeper-*.jar"))?;
        jars.extend(glob_jars(&self.dist_dir.join("lib").join("*.jar"))?);
        Ok(jars)
    }

    fn set_running(&self, running: bool) -> Result<()> {
        Catalog::update(&self.root, |c| {
            c.installation_mut(&self.name)?.running = running;
            Ok(())
        })?;
        tracing::debug!(
            "Marked `{}` {}",
            self.name,
            if running { "running" } else { "stopped" }
        );
        Ok(())
    }
}

fn glob_jars(pattern: &Path) -> Result<Vec<PathBuf>> {
    let pattern = pattern.to_string_lossy().into_owned();

    let mut results = Vec::new();
    for entry in glob::glob(&pattern).map_err(|e| Error::Pattern {
        pattern: pattern.clone(),
        source: e,
    })? {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    results.push(path);
                }
            }
            Err(e) => {
                tracing::warn!("glob error: {}", e);
            }
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use tempfile::TempDir;

    use crate::catalog::Installation;

    fn seeded_service(tmp: &TempDir) -> Service {
        let root = tmp.path();

        Catalog::update(root, |c| {
            let number = c.allocate_number();
            c.add_installation(
                "alpha",
                Installation {
                    number,
                    version: "3.9.2".to_string(),
                    configuration: Default::default(),
                    running: false,
                },
            )
        })
        .unwrap();

        let dist_dir = root.join("unpack/zookeeper-3.9.2");
        std::fs::create_dir_all(dist_dir.join("lib")).unwrap();
        std::fs::write(dist_dir.join("zookeeper-3.9.2.jar"), "jar").unwrap();
        std::fs::write(dist_dir.join("lib/slf4j-api-1.7.30.jar"), "jar").unwrap();
        std::fs::write(dist_dir.join("lib/netty-handler-4.1.105.jar"), "jar").unwrap();
        std::fs::write(dist_dir.join("lib/NOTICE.txt"), "not a jar").unwrap();

        let home_dir = root.join("install/1");
        std::fs::create_dir_all(&home_dir).unwrap();

        Service::new("alpha", root, dist_dir, home_dir)
    }

    #[test]
    fn test_start_stop_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let service = seeded_service(&tmp);

        assert!(!service.running().unwrap());

        service.start().unwrap();
        assert!(service.running().unwrap());

        service.stop(None).unwrap();
        assert!(!service.running().unwrap());
    }

    #[test]
    fn test_stop_twice_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        let service = seeded_service(&tmp);

        service.start().unwrap();
        service.stop(Some(Duration::from_secs(5))).unwrap();
        service.stop(None).unwrap();
        assert!(!service.running().unwrap());
    }

    #[test]
    fn test_kill_marks_stopped() {
        let tmp = TempDir::new().unwrap();
        let service = seeded_service(&tmp);

        service.start().unwrap();
        service.kill().unwrap();
        assert!(!service.running().unwrap());
    }

    #[test]
    fn test_classpath_collects_root_and_lib_jars() {
        let tmp = TempDir::new().unwrap();
        let service = seeded_service(&tmp);

        let classpath = service.classpath().unwrap();
        let names: BTreeSet<String> = classpath
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();

        let expected: BTreeSet<String> = [
            "zookeeper-3.9.2.jar",
            "slf4j-api-1.7.30.jar",
            "netty-handler-4.1.105.jar",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        assert_eq!(names, expected);
        for jar in &classpath {
            assert!(jar.exists(), "{} should exist", jar.display());
        }
    }

    #[test]
    fn test_lifecycle_on_missing_name_fails() {
        let tmp = TempDir::new().unwrap();
        let service = Service::new(
            "ghost",
            tmp.path(),
            tmp.path().join("unpack/zookeeper-3.9.2"),
            tmp.path().join("install/1"),
        );

        let err = service.start().unwrap_err();
        assert!(matches!(err, Error::UnknownInstallation(name) if name == "ghost"));
    }
}
