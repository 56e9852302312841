//! Menagerie CLI - install and track local ZooKeeper distributions

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("menagerie=debug")
    } else {
        EnvFilter::new("menagerie=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let ctx = commands::context(&cli);

    // Execute command
    match cli.command {
        Commands::Versions(args) => commands::versions::execute(&ctx, args),
        Commands::Install(args) => commands::install::execute(&ctx, args),
        Commands::Uninstall(args) => commands::uninstall::execute(&ctx, args),
        Commands::List(args) => commands::list::execute(&ctx, args),
        Commands::Start(args) => commands::start::execute(&ctx, args),
        Commands::Stop(args) => commands::stop::execute(&ctx, args),
        Commands::Kill(args) => commands::kill::execute(&ctx, args),
        Commands::Status(args) => commands::status::execute(&ctx, args),
        Commands::Classpath(args) => commands::classpath::execute(&ctx, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
