//! Inspect command - detailed application view

use anyhow::{anyhow, Result};
use clap::Args;
use owo_colors::OwoColorize;
use std::collections::HashMap;

use crate::api::types::{AccessApp, IdentityProvider};
use crate::api::AccessApi;
use crate::output;
use crate::prompt::Prompter;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Domain of the application to inspect
    pub domain: Option<String>,
}

pub async fn execute<A, P>(api: &A, prompter: &P, args: InspectArgs) -> Result<()>
where
    A: AccessApi + ?Sized,
    P: Prompter + ?Sized,
{
    output::info("Loading application details");
    let (apps, idps) = tokio::try_join!(
        api.get("/access/apps"),
        api.get("/access/identity_providers"),
    )?;

    let apps: Vec<AccessApp> = apps
        .result
        .map(serde_json::from_value::<Vec<AccessApp>>)
        .transpose()?
        .unwrap_or_default()
        .into_iter()
        .filter(AccessApp::is_self_hosted)
        .collect();
    let idps: Vec<IdentityProvider> = idps
        .result
        .map(serde_json::from_value)
        .transpose()?
        .unwrap_or_default();

    if apps.is_empty() {
        println!("\n  {}\n", "No Access applications found.".dimmed());
        return Ok(());
    }

    let idp_map: HashMap<&str, &IdentityProvider> =
        idps.iter().map(|idp| (idp.id.as_str(), idp)).collect();

    let target = match args.domain {
        Some(ref domain) => apps
            .iter()
            .find(|app| app.domain.as_deref() == Some(domain.as_str()))
            .ok_or_else(|| anyhow!("No Access application found for domain: {}", domain))?,
        None => {
            let labels: Vec<String> = apps
                .iter()
                .map(|app| format!("{} ({})", app.label(), app.id))
                .collect();
            let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();
            let picked =
                prompter.ask_choice("Which application do you want to inspect?", &label_refs)?;
            &apps[picked]
        }
    };

    output::heading("Application");
    println!("  Domain:           {}", target.domain.as_deref().unwrap_or("n/a"));
    println!("  Type:             {}", target.kind.as_deref().unwrap_or("n/a"));
    println!(
        "  Session duration: {}",
        target.session_duration.as_deref().unwrap_or("default")
    );
    println!("  App ID:           {}", target.id.dimmed());

    output::heading("Identity Providers");
    if target.allowed_idps.is_empty() {
        println!("  {}", "Any provider".dimmed());
    } else {
        for idp_id in &target.allowed_idps {
            match idp_map.get(idp_id.as_str()) {
                Some(idp) => println!("  {} ({})", idp.name, idp.kind),
                None => println!("  {} (unknown)", idp_id.dimmed()),
            }
        }
    }

    output::heading("Policies");
    if target.policies.is_empty() {
        println!("  {}", "No policies configured".dimmed());
    } else {
        for policy in &target.policies {
            println!(
                "  {} — {}",
                policy.name.as_deref().unwrap_or("Unnamed").cyan(),
                policy.decision.as_deref().unwrap_or("n/a")
            );
            for rule in &policy.include {
                println!("    {}", output::describe_rule(rule));
            }
        }
    }

    println!();
    Ok(())
}
