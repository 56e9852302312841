//! Distribution archive extraction.

use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path};

use flate2::read::GzDecoder;
use tar::Archive;

use crate::error::{Error, Result};

/// Extract a gzip-compressed tar archive into `dest`.
///
/// Entries are unpacked under `dest` exactly as named in the archive, so a
/// distribution tarball produces its own `zookeeper-<version>/` directory.
/// Re-extracting over an existing tree overwrites in place. Entries that
/// would land outside `dest` are refused.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive).map_err(|e| Error::io(archive.to_path_buf(), e))?;
    let decoder = GzDecoder::new(BufReader::new(file));
    let mut entries = Archive::new(decoder);

    std::fs::create_dir_all(dest).map_err(|e| Error::io(dest.to_path_buf(), e))?;

    let refused = |message: String| Error::Archive {
        path: archive.to_path_buf(),
        message,
    };

    for entry in entries
        .entries()
        .map_err(|e| refused(format!("unreadable archive: {e}")))?
    {
        let mut entry = entry.map_err(|e| refused(format!("unreadable entry: {e}")))?;
        let entry_path = entry
            .path()
            .map_err(|e| refused(format!("entry has an unusable path: {e}")))?
            .into_owned();

        if entry_path.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        }) {
            return Err(refused(format!(
                "entry `{}` escapes the destination directory",
                entry_path.display()
            )));
        }

        let output_path = dest.join(&entry_path);
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent.to_path_buf(), e))?;
        }

        let entry_type = entry.header().entry_type();
        match entry_type {
            tar::EntryType::Directory => {
                std::fs::create_dir_all(&output_path)
                    .map_err(|e| Error::io(output_path.clone(), e))?;
            }
            tar::EntryType::Regular | tar::EntryType::Continuous | tar::EntryType::Link => {
                entry.unpack(&output_path).map_err(|e| {
                    refused(format!("cannot unpack `{}`: {e}", entry_path.display()))
                })?;
            }
            tar::EntryType::Symlink => {
                #[cfg(unix)]
                {
                    if let Ok(Some(target)) = entry.link_name() {
                        // Re-extraction must not trip over the previous link.
                        if output_path.symlink_metadata().is_ok() {
                            std::fs::remove_file(&output_path)
                                .map_err(|e| Error::io(output_path.clone(), e))?;
                        }
                        std::os::unix::fs::symlink(target.as_ref(), &output_path)
                            .map_err(|e| Error::io(output_path.clone(), e))?;
                    }
                }
                #[cfg(windows)]
                {
                    tracing::debug!("Skipping symlink on Windows: {}", entry_path.display());
                }
            }
            _ => {
                tracing::debug!(
                    "Skipping unsupported entry type {:?}: {}",
                    entry_type,
                    entry_path.display()
                );
            }
        }
    }

    Ok(())
}
