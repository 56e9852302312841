//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Menagerie - install and track local ZooKeeper distributions
#[derive(Parser)]
#[command(name = "menagerie")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Installation root (defaults to the user data directory)
    #[arg(long, global = true, env = "MENAGERIE_ROOT")]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the versions available from the mirror
    Versions(VersionsArgs),

    /// Download, extract, and register a named installation
    Install(InstallArgs),

    /// Remove a named installation
    Uninstall(UninstallArgs),

    /// List the installations in the catalog
    List(ListArgs),

    /// Mark an installation running
    Start(StartArgs),

    /// Mark an installation stopped
    Stop(StopArgs),

    /// Mark an installation stopped, immediately
    Kill(KillArgs),

    /// Show one installation's record and running state
    Status(StatusArgs),

    /// Print the classpath for an installation
    Classpath(ClasspathArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct VersionsArgs {}

#[derive(Args)]
pub struct InstallArgs {
    /// Installation name
    pub name: String,

    /// Distribution version (e.g. 3.9.2)
    pub version: String,

    /// Configuration entries recorded with the installation
    #[arg(long = "config", value_name = "KEY=VALUE")]
    pub config: Vec<String>,
}

#[derive(Args)]
pub struct UninstallArgs {
    /// Installation name
    pub name: String,
}

#[derive(Args)]
pub struct ListArgs {}

#[derive(Args)]
pub struct StartArgs {
    /// Installation name
    pub name: String,
}

#[derive(Args)]
pub struct StopArgs {
    /// Installation name
    pub name: String,

    /// Accepted for interface parity; shutdown is not supervised
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

#[derive(Args)]
pub struct KillArgs {
    /// Installation name
    pub name: String,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Installation name
    pub name: String,
}

#[derive(Args)]
pub struct ClasspathArgs {
    /// Installation name
    pub name: String,

    /// Print one path per line instead of a `:`-joined string
    #[arg(long)]
    pub lines: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
