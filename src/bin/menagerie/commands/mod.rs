//! Command implementations

pub mod classpath;
pub mod completions;
pub mod install;
pub mod kill;
pub mod list;
pub mod start;
pub mod status;
pub mod stop;
pub mod uninstall;
pub mod versions;

use anyhow::{Context, Result};
use url::Url;

use menagerie::util::{Config, GlobalContext};
use menagerie::ApacheMirror;

use crate::cli::Cli;

/// Build the operation context from the global flags.
pub fn context(cli: &Cli) -> GlobalContext {
    match &cli.root {
        Some(root) => GlobalContext::with_root(root.clone()),
        None => GlobalContext::new(),
    }
}

/// Build the mirror source, honoring the root's mirror override.
pub fn mirror(ctx: &GlobalContext) -> Result<ApacheMirror> {
    let config = Config::load_or_default(&ctx.config_path());

    match config.mirror() {
        Some(base) => {
            let url = Url::parse(&base)
                .with_context(|| format!("invalid mirror URL `{base}`"))?;
            Ok(ApacheMirror::with_base_url(url))
        }
        None => Ok(ApacheMirror::new()),
    }
}
