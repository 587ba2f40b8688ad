//! Identity provider setup
//!
//! One ensure operation per supported login method. All three share the same
//! shape: look the provider up by type, return it if registered, otherwise
//! gather config and create it. No duplicate provider is ever created.

pub mod email_otp;
pub mod github;
pub mod google;

use serde_json::{json, Value};

use crate::api::types::IdentityProvider;
use crate::api::AccessApi;
use crate::error::{Error, Result};
use crate::prompt::Prompter;

/// Login methods fastpass can configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdpKind {
    EmailOtp,
    Github,
    Google,
}

impl IdpKind {
    /// Token accepted by the `--auth` flag.
    pub fn from_flag(token: &str) -> Option<Self> {
        match token {
            "email" => Some(IdpKind::EmailOtp),
            "github" => Some(IdpKind::Github),
            "google" => Some(IdpKind::Google),
            _ => None,
        }
    }

    /// Provider type string in the Access API.
    pub fn api_type(self) -> &'static str {
        match self {
            IdpKind::EmailOtp => "onetimepin",
            IdpKind::Github => "github",
            IdpKind::Google => "google",
        }
    }

    /// Menu label for the interactive wizard.
    pub fn label(self) -> &'static str {
        match self {
            IdpKind::EmailOtp => "Email code (easiest, no setup)",
            IdpKind::Github => "GitHub",
            IdpKind::Google => "Google",
        }
    }

    /// Short label for the confirmation summary.
    pub fn short_label(self) -> &'static str {
        match self {
            IdpKind::EmailOtp => "Email code",
            IdpKind::Github => "GitHub",
            IdpKind::Google => "Google",
        }
    }

    /// True when setup needs the team's OAuth callback URL.
    pub fn needs_team(self) -> bool {
        !matches!(self, IdpKind::EmailOtp)
    }
}

/// Ensure the provider for `kind` exists, creating it if absent.
pub async fn ensure<A, P>(
    kind: IdpKind,
    api: &A,
    team: Option<&str>,
    prompter: &P,
) -> Result<IdentityProvider>
where
    A: AccessApi + ?Sized,
    P: Prompter + ?Sized,
{
    match kind {
        IdpKind::EmailOtp => email_otp::ensure_email_otp(api).await,
        IdpKind::Github => {
            let team = team.ok_or(Error::TeamUnavailable)?;
            github::ensure_github(api, team, prompter).await
        }
        IdpKind::Google => {
            let team = team.ok_or(Error::TeamUnavailable)?;
            google::ensure_google(api, team, prompter).await
        }
    }
}

/// OAuth callback URL Access serves for a team.
pub fn callback_url(team: &str) -> String {
    format!("https://{}.cloudflareaccess.com/cdn-cgi/access/callback", team)
}

/// Fetch all registered identity providers for the account.
pub async fn list_providers<A: AccessApi + ?Sized>(api: &A) -> Result<Vec<IdentityProvider>> {
    let response = api.get("/access/identity_providers").await?;
    let idps = response
        .result
        .map(serde_json::from_value)
        .transpose()?
        .unwrap_or_default();
    Ok(idps)
}

pub(crate) async fn find_existing<A: AccessApi + ?Sized>(
    api: &A,
    kind: IdpKind,
) -> Result<Option<IdentityProvider>> {
    let idps = list_providers(api).await?;
    Ok(idps.into_iter().find(|idp| idp.kind == kind.api_type()))
}

pub(crate) async fn create_provider<A: AccessApi + ?Sized>(
    api: &A,
    kind: IdpKind,
    name: &str,
    config: Value,
) -> Result<IdentityProvider> {
    let response = api
        .post(
            "/access/identity_providers",
            json!({
                "type": kind.api_type(),
                "name": name,
                "config": config,
            }),
        )
        .await?;

    let created = response
        .result
        .map(serde_json::from_value)
        .transpose()?
        .ok_or_else(|| Error::Api {
            status: reqwest::StatusCode::OK,
            messages: "Identity provider create returned no result".to_string(),
        })?;

    Ok(created)
}
