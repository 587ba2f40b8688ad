//! Remote record types returned by the Access endpoints

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cloudflare account summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: Option<String>,
}

/// Zone summary (used to verify domain ownership)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

/// Access organization (team)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub name: Option<String>,
    pub auth_domain: Option<String>,
}

impl Organization {
    /// Team name is the auth domain minus the `.cloudflareaccess.com` suffix.
    pub fn team_name(&self) -> Option<String> {
        self.auth_domain
            .as_deref()
            .map(|d| d.trim_end_matches(".cloudflareaccess.com").to_string())
    }
}

/// Registered identity provider.
///
/// `kind` stays a free string on read: accounts may hold provider types
/// fastpass does not manage (Okta, SAML, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityProvider {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Access application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessApp {
    pub id: String,
    pub name: Option<String>,
    pub domain: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub session_duration: Option<String>,
    #[serde(default)]
    pub allowed_idps: Vec<String>,
    #[serde(default)]
    pub policies: Vec<AppPolicy>,
}

impl AccessApp {
    pub fn is_self_hosted(&self) -> bool {
        self.kind.as_deref() == Some("self_hosted")
    }

    /// Preferred human label: domain, falling back to name, then id.
    pub fn label(&self) -> &str {
        self.domain
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.id)
    }
}

/// Policy attached to an application.
///
/// Include rules are kept as raw JSON: the remote supports many rule shapes
/// beyond the ones fastpass writes, and inspect must render them all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppPolicy {
    pub name: Option<String>,
    pub decision: Option<String>,
    #[serde(default)]
    pub include: Vec<Value>,
}

/// One entry from the access request log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessEvent {
    pub user_email: Option<String>,
    pub app_domain: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub allowed: bool,
}
