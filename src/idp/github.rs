//! GitHub OAuth identity provider

use owo_colors::OwoColorize;
use serde_json::json;

use crate::api::types::IdentityProvider;
use crate::api::AccessApi;
use crate::error::Result;
use crate::idp::{callback_url, create_provider, find_existing, IdpKind};
use crate::output;
use crate::prompt::{ask_until, Prompter};

/// Ensure a GitHub OAuth provider exists, walking the operator through
/// registering an OAuth app when it does not.
pub async fn ensure_github<A, P>(api: &A, team: &str, prompter: &P) -> Result<IdentityProvider>
where
    A: AccessApi + ?Sized,
    P: Prompter + ?Sized,
{
    if let Some(existing) = find_existing(api, IdpKind::Github).await? {
        output::success("GitHub login already configured.");
        return Ok(existing);
    }

    let callback = callback_url(team);
    let homepage = format!("https://{}.cloudflareaccess.com", team);

    println!();
    println!("  {}", "GitHub OAuth Setup".bold());
    println!(
        "  {}",
        "You need to create a GitHub OAuth app. It takes about 30 seconds.".dimmed()
    );
    println!();
    println!(
        "  1. Go to {}",
        "https://github.com/settings/developers".cyan()
    );
    println!("  2. Click \"New OAuth App\"");
    println!("  3. Application name: {}", "Cloudflare Access".bold());
    println!("  4. Homepage URL:     {}", homepage.bold());
    println!("  5. Callback URL:     {}", callback.bold());
    println!("  6. Click \"Register application\"");
    println!("  7. Generate a client secret");
    println!();

    let client_id = ask_until(prompter, "GitHub Client ID:", "Required", |v| !v.is_empty())?;
    let client_secret = ask_until(prompter, "GitHub Client Secret:", "Required", |v| {
        !v.is_empty()
    })?;

    output::info("Creating GitHub identity provider...");
    let created = create_provider(
        api,
        IdpKind::Github,
        "GitHub",
        json!({
            "client_id": client_id,
            "client_secret": client_secret,
        }),
    )
    .await?;

    output::success("GitHub login enabled.");
    Ok(created)
}
