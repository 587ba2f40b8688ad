//! CLI commands module

pub mod inspect;
pub mod list;
pub mod logs;
pub mod protect;
pub mod remove;
pub mod status;

use clap::{Parser, Subcommand};

/// fastpass - Cloudflare Access in 60 seconds
#[derive(Parser, Debug)]
#[command(name = "fastpass")]
#[command(version)]
#[command(about = "Cloudflare Access in 60 seconds.", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Bare invocation runs the protect wizard
    #[command(flatten)]
    pub protect: protect::ProtectArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Protect a domain with Cloudflare Access
    Protect(protect::ProtectArgs),

    /// List protected domains
    List,

    /// Remove protection from a domain
    Remove(remove::RemoveArgs),

    /// Show Access overview: team, apps, IdPs, and recent activity
    Status,

    /// Show recent access events
    Logs(logs::LogsArgs),

    /// Show detailed configuration for an Access application
    Inspect(inspect::InspectArgs),
}
