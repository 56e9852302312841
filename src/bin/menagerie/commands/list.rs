//! `menagerie list` command

use anyhow::Result;

use menagerie::util::GlobalContext;
use menagerie::Catalog;

use crate::cli::ListArgs;

pub fn execute(ctx: &GlobalContext, _args: ListArgs) -> Result<()> {
    let rows = Catalog::read(ctx.root(), |catalog| {
        Ok(catalog
            .installations()
            .map(|(name, installation)| {
                (
                    name.to_string(),
                    installation.number,
                    installation.version.clone(),
                    installation.running,
                )
            })
            .collect::<Vec<_>>())
    })?;

    if rows.is_empty() {
        eprintln!("no installations in {}", ctx.root().display());
        return Ok(());
    }

    for (name, number, version, running) in rows {
        let state = if running { "running" } else { "stopped" };
        println!("{name}\t{number}\t{version}\t{state}");
    }

    Ok(())
}
