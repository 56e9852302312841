//! `menagerie install` command

use std::collections::BTreeMap;

use anyhow::{bail, Result};

use menagerie::ops;
use menagerie::util::GlobalContext;

use crate::cli::InstallArgs;

pub fn execute(ctx: &GlobalContext, args: InstallArgs) -> Result<()> {
    let source = super::mirror(ctx)?;
    let configuration = parse_config(&args.config)?;

    let installation = ops::install(ctx, &source, &args.name, &args.version, configuration)?;

    eprintln!(
        "   Installed `{}` (zookeeper {}, number {})",
        args.name, installation.version, installation.number
    );
    Ok(())
}

fn parse_config(entries: &[String]) -> Result<Option<BTreeMap<String, String>>> {
    if entries.is_empty() {
        return Ok(None);
    }

    let mut configuration = BTreeMap::new();
    for entry in entries {
        let Some((key, value)) = entry.split_once('=') else {
            bail!("expected KEY=VALUE, got `{entry}`");
        };
        configuration.insert(key.to_string(), value.to_string());
    }
    Ok(Some(configuration))
}
