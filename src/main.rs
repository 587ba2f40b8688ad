//! fastpass - Cloudflare Access in 60 seconds
//!
//! Protect a domain behind Cloudflare Access from the command line:
//! identity providers, access policy, and application in one wizard.

mod access;
mod api;
mod auth;
mod cli;
mod error;
mod idp;
mod output;
mod prompt;
#[cfg(test)]
mod testutil;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::AccessClient;
use crate::cli::{Cli, Commands};
use crate::error::Error;
use crate::prompt::TermPrompter;

#[tokio::main]
async fn main() {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        report_error(&err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let prompter = TermPrompter::new();

    if matches!(cli.command, None | Some(Commands::Protect(_))) {
        output::banner();
    }

    let credentials = auth::resolve_credentials().await?;
    let api = AccessClient::new(credentials)?;

    match cli.command {
        None => cli::protect::execute(&api, &prompter, cli.protect).await,
        Some(Commands::Protect(args)) => cli::protect::execute(&api, &prompter, args).await,
        Some(Commands::List) => cli::list::execute(&api).await,
        Some(Commands::Remove(args)) => cli::remove::execute(&api, &prompter, args).await,
        Some(Commands::Status) => cli::status::execute(&api).await,
        Some(Commands::Logs(args)) => cli::logs::execute(&api, args).await,
        Some(Commands::Inspect(args)) => cli::inspect::execute(&api, &prompter, args).await,
    }
}

/// Translate an error into a human-readable message plus any guidance the
/// kind calls for. The process exits 1 afterwards.
fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<Error>() {
        Some(Error::CredentialsMissing) => {
            output::error("No Cloudflare credentials found");
            eprintln!();
            eprintln!("  {}", "Set an API token:".bold());
            eprintln!();
            eprintln!("     {}", "export CLOUDFLARE_API_TOKEN=<your-token>".bold());
            eprintln!();
            eprintln!(
                "     Create one at: {}",
                "https://dash.cloudflare.com/profile/api-tokens".dimmed()
            );
            eprintln!("     Required permissions:");
            eprintln!(
                "       {} Access: Organizations, Identity Providers, and Groups — Edit",
                "•".dimmed()
            );
            eprintln!("       {} Access: Apps and Policies — Edit", "•".dimmed());
            eprintln!();
        }
        Some(Error::AccountUnavailable) => {
            output::error("Could not determine your Cloudflare account ID.");
            eprintln!(
                "  Set {} in your environment.",
                "CLOUDFLARE_ACCOUNT_ID".bold()
            );
        }
        Some(Error::TeamUnavailable) => {
            output::error("Could not determine your Access team name.");
            eprintln!("  Make sure Access is enabled in your Cloudflare dashboard.");
        }
        Some(Error::DomainNotFound { domain }) => {
            output::error(&format!(
                "Domain \"{}\" not found in your Cloudflare account.",
                domain
            ));
            eprintln!("  Make sure the domain is added to your Cloudflare dashboard.");
        }
        Some(api_err @ Error::Api { messages, .. }) => {
            output::error(&format!("Cloudflare API error: {}", messages));
            if api_err.is_permission_denied() {
                eprintln!(
                    "  {}",
                    "Your API token may not have the required permissions.".yellow()
                );
                eprintln!(
                    "  Needed scopes: Access: Organizations + Identity Providers + Apps and Policies (Edit)"
                );
            }
        }
        _ => {
            output::error(&format!("{}", err));
        }
    }
}
