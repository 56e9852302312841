//! `menagerie status` command

use anyhow::Result;

use menagerie::ops;
use menagerie::util::GlobalContext;

use crate::cli::StatusArgs;

pub fn execute(ctx: &GlobalContext, args: StatusArgs) -> Result<()> {
    let service = ops::load(ctx, &args.name)?;
    let installation = service.installation()?;

    println!("name: {}", args.name);
    println!("number: {}", installation.number);
    println!("version: {}", installation.version);
    println!(
        "state: {}",
        if installation.running {
            "running"
        } else {
            "stopped"
        }
    );
    println!("distribution: {}", service.distribution_dir().display());
    println!("home: {}", service.home_dir().display());

    if !installation.configuration.is_empty() {
        println!("configuration:");
        for (key, value) in &installation.configuration {
            println!("  {key} = {value}");
        }
    }

    Ok(())
}
