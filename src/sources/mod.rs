//! Distribution sources.
//!
//! Sources are responsible for enumerating installable ZooKeeper versions
//! and fetching their archives. The one production implementation resolves
//! an Apache mirror; tests substitute a stub.

pub mod archive;
pub mod mirror;
pub mod source;

pub use mirror::ApacheMirror;
pub use source::Source;
