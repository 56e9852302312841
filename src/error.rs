//! Error types for catalog, source, and installation operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Error raised by catalog, source, and installation operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Requested version is not in the source's enumeration. Raised before
    /// any archive request is made.
    #[error("version `{version}` is not available; known versions: {}", .available.join(", "))]
    InvalidVersion {
        version: String,
        available: Vec<String>,
    },

    /// Catalog lookup miss on `installed[name]`.
    #[error("no installation named `{0}` in the catalog")]
    UnknownInstallation(String),

    /// Catalog lookup miss on `downloaded[version]`.
    #[error("version `{0}` has not been downloaded")]
    NotDownloaded(String),

    /// `install` refused because the name is already taken.
    #[error("an installation named `{0}` already exists")]
    DuplicateInstallation(String),

    /// Mirror resolution, listing, or archive request failed.
    #[error("mirror request failed")]
    Transport(#[from] reqwest::Error),

    /// Streaming an archive body to disk failed.
    #[error("failed to download {url}")]
    Download {
        url: String,
        #[source]
        source: io::Error,
    },

    /// The mirror answered, but with something we cannot use.
    #[error("unusable mirror response: {0}")]
    Mirror(String),

    /// Filesystem operation failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Archive extraction failed or was refused.
    #[error("failed to extract {}: {message}", .path.display())]
    Archive { path: PathBuf, message: String },

    /// A persisted TOML file (catalog or config) did not parse.
    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Catalog state failed to serialize.
    #[error("failed to encode catalog")]
    Encode(#[from] toml::ser::Error),

    /// The catalog file was written by a newer build.
    #[error("catalog format {found} is newer than this build supports (max {supported})")]
    Format { found: u32, supported: u32 },

    /// A classpath glob pattern was rejected.
    #[error("invalid classpath pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

impl Error {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
