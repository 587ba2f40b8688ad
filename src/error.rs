//! Typed errors for the fastpass flows

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No Cloudflare credentials found")]
    CredentialsMissing,

    #[error("Could not determine your Cloudflare account ID")]
    AccountUnavailable,

    #[error("Domain \"{domain}\" not found in your Cloudflare account")]
    DomainNotFound { domain: String },

    #[error("Could not determine your Access team name")]
    TeamUnavailable,

    #[error("Unknown auth method: {method}. Use: email, github, or google")]
    UnknownAuthMethod { method: String },

    #[error("Invalid date: {input}")]
    InvalidDate { input: String },

    #[error("Cloudflare API error: {messages}")]
    Api { status: StatusCode, messages: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Terminal input failed: {0}")]
    Prompt(#[from] std::io::Error),
}

impl Error {
    /// True when the remote rejected the request for lack of token scopes.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status == StatusCode::FORBIDDEN)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
