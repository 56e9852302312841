//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| Error::io(path.to_path_buf(), e))?;
    }
    Ok(())
}

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path).map_err(|e| Error::io(path.to_path_buf(), e))?;
    }
    Ok(())
}

/// Read a file to string, keeping the offending path on failure.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path.to_path_buf(), e))
}

/// Canonicalize a path, but don't fail if it doesn't exist yet.
/// Returns the path as-is if canonicalization fails.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a/b/c");

        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_remove_dir_all_if_exists() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("victim");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("nested/file.txt"), "x").unwrap();

        remove_dir_all_if_exists(&dir).unwrap();
        assert!(!dir.exists());

        // Absent path is not an error.
        remove_dir_all_if_exists(&dir).unwrap();
    }

    #[test]
    fn test_read_to_string_reports_path() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.txt");

        let err = read_to_string(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }
}
