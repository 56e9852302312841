//! Installation removal.

use crate::catalog::{Catalog, Installation};
use crate::error::Result;
use crate::util::fs::remove_dir_all_if_exists;
use crate::util::GlobalContext;

/// Remove the installation under `name` and return its record.
///
/// Deletes the private install directory; the shared unpacked distribution
/// stays, other installations may reference the same version. Fails with
/// [`Error::UnknownInstallation`] when the name is absent.
///
/// [`Error::UnknownInstallation`]: crate::Error::UnknownInstallation
pub fn uninstall(ctx: &GlobalContext, name: &str) -> Result<Installation> {
    Catalog::update(ctx.root(), |catalog| {
        let installation = catalog.remove_installation(name)?;
        remove_dir_all_if_exists(&ctx.installation_dir(installation.number))?;

        tracing::info!("Uninstalled `{name}` (number {})", installation.number);
        if !catalog.version_in_use(&installation.version) {
            tracing::debug!(
                "No remaining installation references zookeeper {}; its unpack directory is kept",
                installation.version
            );
        }
        Ok(installation)
    })
}
