//! `menagerie versions` command

use anyhow::Result;

use menagerie::ops;
use menagerie::sources::mirror::sorted_versions;
use menagerie::util::GlobalContext;

use crate::cli::VersionsArgs;

pub fn execute(ctx: &GlobalContext, _args: VersionsArgs) -> Result<()> {
    let source = super::mirror(ctx)?;
    let versions = ops::versions(&source)?;

    for version in sorted_versions(&versions) {
        println!("{version}");
    }

    Ok(())
}
