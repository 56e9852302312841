//! Apache mirror source.
//!
//! The ASF publishes a `closer.cgi` endpoint that answers with the caller's
//! preferred mirror. Versions are enumerated by fetching that mirror's
//! zookeeper directory listing and pulling the `zookeeper-<version>/`
//! anchor links out of it; archives live one level below, at
//! `zookeeper-<version>/zookeeper-<version>.tar.gz`.

use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::sources::Source;

/// ASF mirror resolution endpoint for the zookeeper project.
pub const CLOSER_URL: &str = "https://www.apache.org/dyn/closer.cgi/zookeeper/?as_json=1";

/// Release directory anchors in a mirror directory listing.
static VERSION_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="zookeeper-([^"/]+)/""#).unwrap());

#[derive(Debug, Deserialize)]
struct CloserResponse {
    preferred: String,
}

/// Distribution source backed by the Apache mirror network.
pub struct ApacheMirror {
    closer_url: String,
    base_override: Option<Url>,
    client: reqwest::blocking::Client,
}

impl ApacheMirror {
    /// Create a mirror source that resolves the preferred mirror on demand.
    pub fn new() -> Self {
        ApacheMirror {
            closer_url: CLOSER_URL.to_string(),
            base_override: None,
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Create a mirror source pinned to `base`, skipping mirror resolution.
    ///
    /// `base` is the directory that contains the `zookeeper-<version>/`
    /// release directories.
    pub fn with_base_url(base: Url) -> Self {
        let mut mirror = ApacheMirror::new();
        mirror.base_override = Some(ensure_trailing_slash(base));
        mirror
    }

    /// Resolve the directory URL that holds the release directories.
    pub fn distribution_url(&self) -> Result<Url> {
        if let Some(base) = &self.base_override {
            return Ok(base.clone());
        }

        tracing::debug!("Resolving preferred mirror via {}", self.closer_url);
        let body = self
            .client
            .get(&self.closer_url)
            .send()?
            .error_for_status()?
            .text()?;
        let response: CloserResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Mirror(format!("closer response is not the expected JSON: {e}")))?;

        let base = format!("{}/zookeeper/", response.preferred.trim_end_matches('/'));
        Url::parse(&base).map_err(|e| {
            Error::Mirror(format!(
                "preferred mirror `{}` is not a valid URL: {}",
                response.preferred, e
            ))
        })
    }

    fn archive_url(&self, base: &Url, version: &str) -> Result<Url> {
        let relative = format!("zookeeper-{version}/zookeeper-{version}.tar.gz");
        base.join(&relative)
            .map_err(|e| Error::Mirror(format!("cannot address archive for `{version}`: {e}")))
    }
}

impl Default for ApacheMirror {
    fn default() -> Self {
        ApacheMirror::new()
    }
}

impl Source for ApacheMirror {
    fn name(&self) -> &str {
        "apache-mirror"
    }

    fn list_versions(&self) -> Result<BTreeSet<String>> {
        let url = self.distribution_url()?;
        tracing::debug!("Listing versions at {}", url);

        let listing = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .text()?;

        Ok(parse_versions(&listing))
    }

    fn fetch(&self, version: &str, dest_dir: &Path) -> Result<PathBuf> {
        let versions = self.list_versions()?;
        if !versions.contains(version) {
            return Err(Error::InvalidVersion {
                version: version.to_string(),
                available: sorted_versions(&versions),
            });
        }

        let base = self.distribution_url()?;
        let url = self.archive_url(&base, version)?;
        tracing::info!("Downloading {}", url);

        std::fs::create_dir_all(dest_dir).map_err(|e| Error::io(dest_dir.to_path_buf(), e))?;
        let dest = dest_dir.join(format!("zookeeper-{version}.tar.gz"));

        let response = self.client.get(url.clone()).send()?.error_for_status()?;

        let pb = ProgressBar::new(response.content_length().unwrap_or(0));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message(format!("zookeeper-{version}"));

        let mut reader = pb.wrap_read(response);
        let mut out = File::create(&dest).map_err(|e| Error::io(dest.clone(), e))?;
        io::copy(&mut reader, &mut out).map_err(|e| Error::Download {
            url: url.to_string(),
            source: e,
        })?;
        pb.finish_and_clear();

        tracing::debug!("Downloaded {}", dest.display());
        Ok(dest)
    }
}

/// Pull version identifiers out of a mirror directory listing.
pub fn parse_versions(listing: &str) -> BTreeSet<String> {
    VERSION_LINK
        .captures_iter(listing)
        .map(|capture| capture[1].to_string())
        .collect()
}

/// Order versions oldest-first for display.
///
/// ZooKeeper releases parse as semver; anything that does not sorts
/// lexicographically ahead of the parseable ones.
pub fn sorted_versions(versions: &BTreeSet<String>) -> Vec<String> {
    let mut out: Vec<String> = versions.iter().cloned().collect();
    out.sort_by(|a, b| {
        match (semver::Version::parse(a), semver::Version::parse(b)) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            (Ok(_), Err(_)) => std::cmp::Ordering::Greater,
            (Err(_), Ok(_)) => std::cmp::Ordering::Less,
            (Err(_), Err(_)) => a.cmp(b),
        }
    });
    out
}

fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
<html><body>
<a href="../">Parent Directory</a>
<a href="zookeeper-3.8.4/">zookeeper-3.8.4/</a>
<a href="zookeeper-3.9.2/">zookeeper-3.9.2/</a>
<a href="current/">current/</a>
<a href="KEYS">KEYS</a>
</body></html>
"#;

    #[test]
    fn test_parse_versions() {
        let versions = parse_versions(LISTING);
        assert_eq!(versions.len(), 2);
        assert!(versions.contains("3.8.4"));
        assert!(versions.contains("3.9.2"));
    }

    #[test]
    fn test_parse_versions_ignores_unrelated_links() {
        let versions = parse_versions(r#"<a href="KEYS">KEYS</a> <a href="hbase-2.0/">x</a>"#);
        assert!(versions.is_empty());
    }

    #[test]
    fn test_sorted_versions() {
        let versions: BTreeSet<String> = ["3.10.0", "3.9.2", "3.8.4"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(
            sorted_versions(&versions),
            vec!["3.8.4", "3.9.2", "3.10.0"]
        );
    }

    #[test]
    fn test_base_override_skips_mirror_resolution() {
        let mirror =
            ApacheMirror::with_base_url(Url::parse("https://mirror.example.com/zookeeper").unwrap());

        let base = mirror.distribution_url().unwrap();
        assert_eq!(base.as_str(), "https://mirror.example.com/zookeeper/");
    }

    #[test]
    fn test_archive_url() {
        let mirror =
            ApacheMirror::with_base_url(Url::parse("https://mirror.example.com/zookeeper/").unwrap());

        let base = mirror.distribution_url().unwrap();
        let url = mirror.archive_url(&base, "3.9.2").unwrap();
        assert_eq!(
            url.as_str(),
            "https://mirror.example.com/zookeeper/zookeeper-3.9.2/zookeeper-3.9.2.tar.gz"
        );
    }
}
