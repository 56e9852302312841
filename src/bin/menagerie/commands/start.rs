//! `menagerie start` command

use anyhow::Result;

use menagerie::ops;
use menagerie::util::GlobalContext;

use crate::cli::StartArgs;

pub fn execute(ctx: &GlobalContext, args: StartArgs) -> Result<()> {
    let service = ops::load(ctx, &args.name)?;
    service.start()?;

    eprintln!("     Started `{}`", args.name);
    Ok(())
}
