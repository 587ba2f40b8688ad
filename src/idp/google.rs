//! Google OAuth identity provider

use owo_colors::OwoColorize;
use serde_json::json;

use crate::api::types::IdentityProvider;
use crate::api::AccessApi;
use crate::error::Result;
use crate::idp::{callback_url, create_provider, find_existing, IdpKind};
use crate::output;
use crate::prompt::{ask_until, Prompter};

/// Ensure a Google OAuth provider exists, walking the operator through
/// creating an OAuth client when it does not.
pub async fn ensure_google<A, P>(api: &A, team: &str, prompter: &P) -> Result<IdentityProvider>
where
    A: AccessApi + ?Sized,
    P: Prompter + ?Sized,
{
    if let Some(existing) = find_existing(api, IdpKind::Google).await? {
        output::success("Google login already configured.");
        return Ok(existing);
    }

    let callback = callback_url(team);

    println!();
    println!("  {}", "Google OAuth Setup".bold());
    println!(
        "  {}",
        "You need to create a Google OAuth client. It takes about a minute.".dimmed()
    );
    println!();
    println!(
        "  1. Go to {}",
        "https://console.cloud.google.com/apis/credentials".cyan()
    );
    println!("  2. Click \"Create Credentials\" → \"OAuth client ID\"");
    println!("  3. Application type: \"Web application\"");
    println!("  4. Name: {}", "Cloudflare Access".bold());
    println!("  5. Authorized redirect URI: {}", callback.bold());
    println!("  6. Click \"Create\"");
    println!();

    let client_id = ask_until(prompter, "Google Client ID:", "Required", |v| !v.is_empty())?;
    let client_secret = ask_until(prompter, "Google Client Secret:", "Required", |v| {
        !v.is_empty()
    })?;

    output::info("Creating Google identity provider...");
    let created = create_provider(
        api,
        IdpKind::Google,
        "Google",
        json!({
            "client_id": client_id,
            "client_secret": client_secret,
        }),
    )
    .await?;

    output::success("Google login enabled.");
    Ok(created)
}
