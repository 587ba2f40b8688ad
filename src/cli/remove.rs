//! Remove command

use anyhow::{anyhow, Result};
use clap::Args;
use owo_colors::OwoColorize;

use crate::api::types::AccessApp;
use crate::api::AccessApi;
use crate::prompt::Prompter;

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Domain to remove protection from
    pub domain: Option<String>,
}

pub async fn execute<A, P>(api: &A, prompter: &P, args: RemoveArgs) -> Result<()>
where
    A: AccessApi + ?Sized,
    P: Prompter + ?Sized,
{
    let response = api.get("/access/apps").await?;
    let apps: Vec<AccessApp> = response
        .result
        .map(serde_json::from_value::<Vec<AccessApp>>)
        .transpose()?
        .unwrap_or_default()
        .into_iter()
        .filter(AccessApp::is_self_hosted)
        .collect();

    if apps.is_empty() {
        println!("\n  {}\n", "No Access applications to remove.".dimmed());
        return Ok(());
    }

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
                prompter.ask_choice("Which application do you want to remove?", &label_refs)?;
            &apps[picked]
        }
    };

    let ok = prompter.ask_confirm(
        &format!("Remove Access protection from {}?", target.label().bold()),
        false,
    )?;

    if !ok {
        println!("  {}", "Cancelled.".dimmed());
        return Ok(());
    }

    println!("  Removing {}...", target.label().bold());
    api.delete(&format!("/access/apps/{}", target.id)).await?;
    println!("  {}\n", "Removed.".green());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakeApi, ScriptedPrompter};

    #[tokio::test]
    async fn removes_app_matched_by_domain() {
        let api = FakeApi::new().with_app("app-1", "app.example.com");
        let prompter = ScriptedPrompter::new().confirm(true);

        execute(
            &api,
            &prompter,
            RemoveArgs {
                domain: Some("app.example.com".into()),
            },
        )
        .await
        .unwrap();

        assert_eq!(api.calls_to("DELETE /access/apps/app-1"), 1);
    }

    #[tokio::test]
    async fn declined_confirmation_deletes_nothing() {
        let api = FakeApi::new().with_app("app-1", "app.example.com");
        let prompter = ScriptedPrompter::new().confirm(false);

        execute(
            &api,
            &prompter,
            RemoveArgs {
                domain: Some("app.example.com".into()),
            },
        )
        .await
        .unwrap();

        assert_eq!(api.calls_to("DELETE /access/apps/app-1"), 0);
    }

    #[tokio::test]
    async fn unknown_domain_is_an_error() {
        let api = FakeApi::new().with_app("app-1", "app.example.com");
        let prompter = ScriptedPrompter::new();

        let err = execute(
            &api,
            &prompter,
            RemoveArgs {
                domain: Some("other.example.com".into()),
            },
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("other.example.com"));
    }

    #[tokio::test]
    async fn interactive_selection_targets_chosen_app() {
        let api = FakeApi::new()
            .with_app("app-1", "a.example.com")
            .with_app("app-2", "b.example.com");
        let prompter = ScriptedPrompter::new().choice(1).confirm(true);

        execute(&api, &prompter, RemoveArgs { domain: None })
            .await
            .unwrap();

        assert_eq!(api.calls_to("DELETE /access/apps/app-2"), 1);
    }
}
