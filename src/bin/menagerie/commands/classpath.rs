//! `menagerie classpath` command

use anyhow::Result;

use menagerie::ops;
use menagerie::util::GlobalContext;

use crate::cli::ClasspathArgs;

/// Java classpath separator for the current platform.
fn separator() -> &'static str {
    if cfg!(target_os = "windows") {
        ";"
    } else {
        ":"
    }
}

pub fn execute(ctx: &GlobalContext, args: ClasspathArgs) -> Result<()> {
    let service = ops::load(ctx, &args.name)?;
    let classpath = service.classpath()?;

    if args.lines {
        for jar in &classpath {
            println!("{}", jar.display());
        }
    } else {
        let joined = classpath
            .iter()
            .map(|jar| jar.display().to_string())
            .collect::<Vec<_>>()
            .join(separator());
        println!("{joined}");
    }

    Ok(())
}
