//! Protect command - the main wizard

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use serde_json::Value;

use crate::access::{compose_application, resolve_access, AccessSelector};
use crate::api::types::{AccessApp, IdentityProvider, Zone};
use crate::api::AccessApi;
use crate::auth::get_team_name;
use crate::error::Error;
use crate::idp::{self, IdpKind};
use crate::output;
use crate::prompt::{ask_until, Prompter};

#[derive(Args, Debug, Default)]
pub struct ProtectArgs {
    /// Domain to protect (e.g. app.example.com)
    pub domain: Option<String>,

    /// Auth method(s): email, github, google (comma-separated for multiple)
    #[arg(long)]
    pub auth: Option<String>,

    /// Who can access: email list, *@domain.com, org:NAME, or "everyone"
    #[arg(long)]
    pub allow: Option<String>,
}

pub async fn execute<A, P>(api: &A, prompter: &P, args: ProtectArgs) -> Result<()>
where
    A: AccessApi + ?Sized,
    P: Prompter + ?Sized,
{
    let domain_flag_given = args.domain.is_some();
    let domain = match args.domain {
        Some(d) => d.trim().to_string(),
        None => ask_until(
            prompter,
            "What domain do you want to protect?",
            "Enter a valid domain (e.g. app.example.com)",
            |v| v.contains('.'),
        )?,
    };

    output::info(&format!("Verifying {}...", domain));
    validate_domain(api, &domain).await?;

    if check_existing_app(api, &domain).await.is_some() {
        already_protected_notice(&domain);
        return Ok(());
    }

    let methods = collect_auth_methods(args.auth.as_deref(), prompter)?;
    let selector = resolve_access(args.allow.as_deref(), prompter)?;

    let team = get_team_name(api).await?;
    if team.is_none() && methods.iter().any(|m| m.needs_team()) {
        return Err(Error::TeamUnavailable.into());
    }

    let mut idps: Vec<IdentityProvider> = Vec::with_capacity(methods.len());
    for method in &methods {
        let record = idp::ensure(*method, api, team.as_deref(), prompter).await?;
        idps.push(record);
    }

    // Skip the summary when everything came from flags - one-liner mode.
    let all_flags_provided = domain_flag_given && args.auth.is_some() && args.allow.is_some();
    if !all_flags_provided && !confirm_summary(prompter, &domain, &methods, &selector)? {
        println!("  {}", "Cancelled.".dimmed());
        return Ok(());
    }

    let request = compose_application(&domain, &idps, &selector);
    output::info(&format!("Creating Access application for {}...", domain.bold()));

    let app_id = match api.post("/access/apps", serde_json::to_value(&request)?).await {
        Ok(response) => response
            .result
            .as_ref()
            .and_then(|r| r.get("id"))
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string(),
        Err(Error::Api { ref messages, .. }) if messages.contains("application_already_exists") => {
            output::error(&format!("Failed to create Access application for {}", domain));
            already_protected_notice(&domain);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    output::success(&format!("Protected {}", domain.bold()));
    println!();
    println!("  {} Try visiting:", "Your app is protected!".bold());
    println!("  {}", format!("https://{}", domain).cyan());
    println!();
    println!("  Manage it: {}", "https://one.dash.cloudflare.com".dimmed());
    println!("  App ID:    {}", app_id.dimmed());
    println!();

    Ok(())
}

/// Verify the domain's zone exists in the account. The lookup uses the root
/// domain (last two labels), since Access apps usually sit on subdomains.
async fn validate_domain<A: AccessApi + ?Sized>(api: &A, domain: &str) -> Result<()> {
    let parts: Vec<&str> = domain.split('.').collect();
    let root = if parts.len() >= 2 {
        parts[parts.len() - 2..].join(".")
    } else {
        domain.to_string()
    };

    let response = api.get(&format!("/zones?name={}", root)).await?;
    let zones: Vec<Zone> = response
        .result
        .map(serde_json::from_value)
        .transpose()?
        .unwrap_or_default();

    if zones.is_empty() {
        return Err(Error::DomainNotFound { domain: root }.into());
    }

    Ok(())
}

/// Look for an existing self-hosted app on the domain. Lookup failures are
/// treated as "none found" - the create call is the authority.
async fn check_existing_app<A: AccessApi + ?Sized>(api: &A, domain: &str) -> Option<AccessApp> {
    let response = api.get("/access/apps").await.ok()?;
    let apps: Vec<AccessApp> = response
        .result
        .map(serde_json::from_value)
        .transpose()
        .ok()??;

    apps.into_iter()
        .find(|app| app.is_self_hosted() && app.domain.as_deref() == Some(domain))
}

fn collect_auth_methods<P: Prompter + ?Sized>(
    auth: Option<&str>,
    prompter: &P,
) -> Result<Vec<IdpKind>> {
    if let Some(flag) = auth {
        return flag
            .split(',')
            .map(str::trim)
            .map(|token| {
                IdpKind::from_flag(token).ok_or_else(|| {
                    Error::UnknownAuthMethod {
                        method: token.to_string(),
                    }
                    .into()
                })
            })
            .collect();
    }

    let kinds = [IdpKind::EmailOtp, IdpKind::Github, IdpKind::Google];
    let labels: Vec<&str> = kinds.iter().map(|k| k.label()).collect();
    let picked = prompter.ask_choice("How should people log in?", &labels)?;
    Ok(vec![kinds[picked]])
}

fn confirm_summary<P: Prompter + ?Sized>(
    prompter: &P,
    domain: &str,
    methods: &[IdpKind],
    selector: &AccessSelector,
) -> Result<bool> {
    let login = methods
        .iter()
        .map(|m| m.short_label())
        .collect::<Vec<_>>()
        .join(", ");

    println!();
    println!("  {}  {}", "Domain:".bold(), domain);
    println!("  {}   {}", "Login:".bold(), login);
    println!("  {}  {}", "Access:".bold(), selector.describe());
    println!();

    Ok(prompter.ask_confirm("Create this Access application?", true)?)
}

fn already_protected_notice(domain: &str) {
    println!();
    println!("  {}", "This domain is already protected by Access.".yellow());
    println!();
    println!(
        "  Run {} to view its configuration.",
        format!("fastpass inspect {}", domain).cyan()
    );
    println!(
        "  Run {} to remove it first.",
        format!("fastpass remove {}", domain).cyan()
    );
    println!();
}
