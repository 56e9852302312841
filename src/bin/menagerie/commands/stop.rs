//! `menagerie stop` command

use std::time::Duration;

use anyhow::Result;

use menagerie::ops;
use menagerie::util::GlobalContext;

use crate::cli::StopArgs;

pub fn execute(ctx: &GlobalContext, args: StopArgs) -> Result<()> {
    let service = ops::load(ctx, &args.name)?;
    service.stop(args.timeout.map(Duration::from_secs))?;

    eprintln!("     Stopped `{}`", args.name);
    Ok(())
}
