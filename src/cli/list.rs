//! List command

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::api::types::AccessApp;
use crate::api::AccessApi;
use crate::output;

pub async fn execute<A: AccessApi + ?Sized>(api: &A) -> Result<()> {
    let response = api.get("/access/apps").await?;
    let apps: Vec<AccessApp> = response
        .result
        .map(serde_json::from_value)
        .transpose()?
        .unwrap_or_default();

    if apps.is_empty() {
        println!("\n  {}\n", "No Access applications found.".dimmed());
        println!(
            "  Run {} to get started.\n",
            "fastpass protect <domain>".cyan()
        );
        return Ok(());
    }

    // Only self-hosted apps - the ones fastpass creates.
    let apps: Vec<AccessApp> = apps.into_iter().filter(AccessApp::is_self_hosted).collect();

    if apps.is_empty() {
        println!("\n  {}\n", "No self-hosted Access applications found.".dimmed());
        return Ok(());
    }

    println!("\n  {}\n", "Protected domains".bold());

    let max_domain = apps
        .iter()
        .map(|a| a.domain.as_deref().unwrap_or("n/a").len())
        .max()
        .unwrap_or(0)
        .max(6);

    println!(
        "  {}{}{}",
        output::cell("Domain", max_domain).dimmed(),
        format!("{:<18}", "Auth").dimmed(),
        "Session".dimmed()
    );
    println!("  {}", "─".repeat(max_domain + 2 + 18 + 10).dimmed());

    for app in &apps {
        let domain = output::cell(app.domain.as_deref().unwrap_or("n/a"), max_domain);
        let auth = if app.allowed_idps.is_empty() {
            "any".to_string()
        } else {
            format!("{} provider(s)", app.allowed_idps.len())
        };
        let session = app.session_duration.as_deref().unwrap_or("default");

        println!("  {}{:<18}{}", domain, auth, session);
    }

    println!("\n  {}\n", format!("{} application(s)", apps.len()).dimmed());

    Ok(())
}
