//! Version enumeration and installation.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::catalog::{Catalog, DownloadRecord, Installation};
use crate::error::{Error, Result};
use crate::sources::{archive, Source};
use crate::util::fs::ensure_dir;
use crate::util::GlobalContext;

/// Enumerate the versions installable from `source`.
pub fn versions(source: &dyn Source) -> Result<BTreeSet<String>> {
    source.list_versions()
}

/// Install `version` under `name`.
///
/// Runs as one exclusive catalog transaction:
/// 1. refuse a name that is already installed;
/// 2. fetch the archive unless this root has already downloaded the
///    version, recording its path and digest;
/// 3. extract into the shared unpack root (idempotent over an existing
///    tree);
/// 4. allocate a fresh installation number and create the private
///    directory;
/// 5. record the installation, stopped.
///
/// If any step fails the transaction is discarded, so the catalog never
/// names an installation whose directories were not set up.
pub fn install(
    ctx: &GlobalContext,
    source: &dyn Source,
    name: &str,
    version: &str,
    configuration: Option<BTreeMap<String, String>>,
) -> Result<Installation> {
    ctx.ensure_layout()?;

    Catalog::update(ctx.root(), |catalog| {
        if catalog.has_installation(name) {
            return Err(Error::DuplicateInstallation(name.to_string()));
        }

        if !catalog.is_downloaded(version) {
            let archive_path = source.fetch(version, &ctx.download_dir())?;
            let sha256 = sha256_file(&archive_path)?;
            tracing::debug!("Archive digest {}", &sha256[..16]);
            catalog.record_download(
                version,
                DownloadRecord {
                    archive: archive_path,
                    sha256,
                },
            );
        }

        let record = catalog.download(version)?.clone();
        archive::extract_archive(&record.archive, &ctx.unpack_dir())?;

        let number = catalog.allocate_number();
        ensure_dir(&ctx.installation_dir(number))?;

        let installation = Installation {
            number,
            version: version.to_string(),
            configuration: configuration.unwrap_or_default(),
            running: false,
        };
        catalog.add_installation(name, installation.clone())?;

        tracing::info!("Installed `{name}` (zookeeper {version}, number {number})");
        Ok(installation)
    })
}

/// Compute the SHA-256 digest of a file.
fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| Error::io(path.to_path_buf(), e))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| Error::io(path.to_path_buf(), e))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}
