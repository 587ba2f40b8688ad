//! Status command - Access overview dashboard

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::api::types::{AccessApp, AccessEvent, IdentityProvider, Organization};
use crate::api::AccessApi;
use crate::output;

pub async fn execute<A: AccessApi + ?Sized>(api: &A) -> Result<()> {
    // Read-only lookups with no ordering dependency - fetch them together.
    let (org, apps, idps) = tokio::try_join!(
        api.get("/access/organizations"),
        api.get("/access/apps"),
        api.get("/access/identity_providers"),
    )?;

    let org: Option<Organization> = org.result.map(serde_json::from_value).transpose()?;
    let apps: Vec<AccessApp> = apps
        .result
        .map(serde_json::from_value)
        .transpose()?
        .unwrap_or_default();
    let idps: Vec<IdentityProvider> = idps
        .result
        .map(serde_json::from_value)
        .transpose()?
        .unwrap_or_default();

    let auth_domain = org
        .as_ref()
        .and_then(|o| o.auth_domain.as_deref())
        .unwrap_or("n/a");
    let team_name = org
        .as_ref()
        .and_then(|o| o.team_name())
        .unwrap_or_else(|| "unknown".to_string());

    output::heading("Team");
    println!("  Auth domain: {}", auth_domain);
    println!("  Team name:   {}", team_name);

    let self_hosted: Vec<&AccessApp> = apps.iter().filter(|a| a.is_self_hosted()).collect();
    output::heading(&format!("Protected Apps ({})", self_hosted.len()));
    if self_hosted.is_empty() {
        println!("  {}", "None".dimmed());
    } else {
        for app in &self_hosted {
            println!("  {}", app.label());
        }
    }

    output::heading(&format!("Identity Providers ({})", idps.len()));
    if idps.is_empty() {
        println!("  {}", "None".dimmed());
    } else {
        let max_name = idps.iter().map(|p| p.name.len()).max().unwrap_or(0).max(4);
        println!(
            "  {}{}",
            output::cell("Name", max_name).dimmed(),
            "Type".dimmed()
        );
        for idp in &idps {
            println!("  {}{}", output::cell(&idp.name, max_name), idp.kind);
        }
    }

    output::heading("Recent Activity");
    match api
        .get("/access/logs/access_requests?limit=50&direction=desc")
        .await
    {
        Ok(response) => {
            let events: Vec<AccessEvent> = response
                .result
                .map(serde_json::from_value)
                .transpose()?
                .unwrap_or_default();

            if events.is_empty() {
                println!("  {}", "No recent events".dimmed());
            } else {
                let allowed = events.iter().filter(|e| e.allowed).count();
                let denied = events.len() - allowed;
                println!(
                    "  Allowed: {}  Denied: {}  (last {} events)",
                    allowed.to_string().green(),
                    denied.to_string().red(),
                    events.len()
                );
            }
        }
        Err(_) => {
            println!(
                "  {}",
                "Unable to fetch logs (token may lack Access: Audit Logs permission)".dimmed()
            );
        }
    }

    println!();
    Ok(())
}
