//! One-Time PIN (email code) identity provider

use serde_json::json;

use crate::api::types::IdentityProvider;
use crate::api::AccessApi;
use crate::error::Result;
use crate::idp::{create_provider, find_existing, IdpKind};
use crate::output;

/// Ensure the One-Time PIN provider exists. Needs no external configuration.
pub async fn ensure_email_otp<A: AccessApi + ?Sized>(api: &A) -> Result<IdentityProvider> {
    if let Some(existing) = find_existing(api, IdpKind::EmailOtp).await? {
        output::success("Email Login already configured.");
        return Ok(existing);
    }

    output::info("Setting up Email Login...");
    let created = create_provider(api, IdpKind::EmailOtp, "Email Login", json!({})).await?;

    output::success("Email Login enabled.");
    Ok(created)
}
