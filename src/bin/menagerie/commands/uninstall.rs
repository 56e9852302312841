//! `menagerie uninstall` command

use anyhow::Result;

use menagerie::ops;
use menagerie::util::GlobalContext;

use crate::cli::UninstallArgs;

pub fn execute(ctx: &GlobalContext, args: UninstallArgs) -> Result<()> {
    let installation = ops::uninstall(ctx, &args.name)?;

    eprintln!(
        " Uninstalled `{}` (zookeeper {}, number {})",
        args.name, installation.version, installation.number
    );
    Ok(())
}
