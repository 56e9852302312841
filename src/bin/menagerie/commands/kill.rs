//! `menagerie kill` command

use anyhow::Result;

use menagerie::ops;
use menagerie::util::GlobalContext;

use crate::cli::KillArgs;

pub fn execute(ctx: &GlobalContext, args: KillArgs) -> Result<()> {
    let service = ops::load(ctx, &args.name)?;
    service.kill()?;

    eprintln!("      Killed `{}`", args.name);
    Ok(())
}
