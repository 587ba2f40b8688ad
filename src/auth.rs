//! Credential resolution
//!
//! Token:    `CLOUDFLARE_API_TOKEN`, falling back to wrangler's stored OAuth token
//! Account:  `CLOUDFLARE_ACCOUNT_ID`, or discovered via the `/accounts` API

use std::env;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::api::{AccessApi, ApiResponse};
use crate::api::client::CF_API_BASE;
use crate::api::types::{Account, Organization};
use crate::error::{Error, Result};
use crate::output;

/// Resolved API credentials, threaded explicitly through the client.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub token: String,
    pub account_id: String,
}

/// Resolve a token and account ID, or fail with guidance.
pub async fn resolve_credentials() -> Result<Credentials> {
    let token = match env::var("CLOUDFLARE_API_TOKEN") {
        Ok(t) if !t.trim().is_empty() => t,
        _ => wrangler_oauth_token().ok_or(Error::CredentialsMissing)?,
    };

    let account_id = match env::var("CLOUDFLARE_ACCOUNT_ID") {
        Ok(id) if !id.trim().is_empty() => id,
        _ => fetch_account_id(&token).await?,
    };

    Ok(Credentials { token, account_id })
}

/// Discover the account ID from the API. Several accounts on one token is
/// recoverable: warn and take the first.
async fn fetch_account_id(token: &str) -> Result<String> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/accounts?per_page=5", CF_API_BASE))
        .bearer_auth(token)
        .send()
        .await?;

    let envelope: ApiResponse<Vec<Account>> = response.json().await?;

    let accounts = match envelope.result {
        Some(accounts) if envelope.success && !accounts.is_empty() => accounts,
        _ => return Err(Error::AccountUnavailable),
    };

    if accounts.len() > 1 {
        output::warning(&format!(
            "Multiple Cloudflare accounts found. Using: {}",
            accounts[0].name.as_deref().unwrap_or(&accounts[0].id)
        ));
        output::warning("Set CLOUDFLARE_ACCOUNT_ID to choose a specific account.");
    }

    Ok(accounts[0].id.clone())
}

/// Fetch the Access team name (needed for IdP callback URLs).
pub async fn get_team_name<A: AccessApi + ?Sized>(api: &A) -> Result<Option<String>> {
    let response = api.get("/access/organizations").await?;

    let org: Option<Organization> = response
        .result
        .map(serde_json::from_value)
        .transpose()?;

    Ok(org.and_then(|o| o.team_name()))
}

#[derive(Debug, Deserialize)]
struct WranglerConfig {
    oauth_token: Option<String>,
}

/// Wrangler keeps an OAuth token at `<config>/.wrangler/config/default.toml`.
fn wrangler_oauth_token() -> Option<String> {
    for base in [dirs::config_dir(), dirs::home_dir()] {
        let Some(path) = base.map(|b| b.join(".wrangler/config/default.toml")) else {
            continue;
        };
        if let Some(token) = read_wrangler_token(&path) {
            debug!("Using wrangler OAuth token from {:?}", path);
            return Some(token);
        }
    }
    None
}

fn read_wrangler_token(path: &PathBuf) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let config: WranglerConfig = toml::from_str(&contents).ok()?;
    config.oauth_token.filter(|t| !t.trim().is_empty())
}
