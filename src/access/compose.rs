//! Application request composition

use serde::Serialize;

use crate::access::rules::{build_include_rules, AccessSelector, IncludeRule};
use crate::api::types::IdentityProvider;

/// Fixed session length for created applications.
pub const SESSION_DURATION: &str = "24h";

/// Create body for `POST /access/apps`.
#[derive(Debug, Clone, Serialize)]
pub struct AppRequest {
    pub name: String,
    pub domain: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub session_duration: &'static str,
    pub allowed_idps: Vec<String>,
    pub auto_redirect_to_identity: bool,
    pub policies: Vec<PolicyRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyRequest {
    pub name: String,
    pub decision: &'static str,
    pub include: Vec<IncludeRule>,
    pub precedence: u32,
}

/// Assemble the full "protect this domain" request.
///
/// With exactly one provider attached the login page is skipped and the user
/// is sent straight to it.
pub fn compose_application(
    domain: &str,
    idps: &[IdentityProvider],
    selector: &AccessSelector,
) -> AppRequest {
    let allowed_idps: Vec<String> = idps.iter().map(|idp| idp.id.clone()).collect();

    AppRequest {
        name: domain.to_string(),
        domain: domain.to_string(),
        kind: "self_hosted",
        session_duration: SESSION_DURATION,
        auto_redirect_to_identity: allowed_idps.len() == 1,
        allowed_idps,
        policies: vec![PolicyRequest {
            name: format!("Allow — {}", domain),
            decision: "allow",
            include: build_include_rules(selector),
            precedence: 1,
        }],
    }
}
