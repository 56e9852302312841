//! Menagerie - an installer and lifecycle catalog for local ZooKeeper
//! distributions.
//!
//! This crate downloads distribution archives from the Apache mirror
//! network, extracts them under an installation root, and tracks named
//! installations and their running state in a file-locked, file-backed
//! catalog.

pub mod catalog;
pub mod error;
pub mod instance;
pub mod ops;
pub mod sources;
pub mod util;

/// Test doubles for menagerie unit tests.
///
/// Only available when compiling tests. Provides a stub distribution
/// source serving archives built in memory.
#[cfg(test)]
pub mod test_support;

pub use catalog::{Catalog, Installation};
pub use error::{Error, Result};
pub use instance::Service;
pub use sources::{ApacheMirror, Source};
pub use util::GlobalContext;
