//! Reconstructing service handles from the catalog.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::instance::Service;
use crate::util::GlobalContext;

/// Build a [`Service`] handle for the installation under `name`.
///
/// Read-only catalog access; fails with [`Error::UnknownInstallation`] when
/// the name is absent. The handle is bound to the unpack directory for the
/// installation's version and to its private install directory.
///
/// [`Error::UnknownInstallation`]: crate::Error::UnknownInstallation
pub fn load(ctx: &GlobalContext, name: &str) -> Result<Service> {
    Catalog::read(ctx.root(), |catalog| {
        let installation = catalog.installation(name)?;
        Ok(Service::new(
            name,
            ctx.root(),
            ctx.distribution_dir(&installation.version),
            ctx.installation_dir(installation.number),
        ))
    })
}
