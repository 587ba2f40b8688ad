//! Logs command - recent access events

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, SecondsFormat, Utc};
use clap::Args;
use owo_colors::OwoColorize;

use crate::api::types::AccessEvent;
use crate::api::AccessApi;
use crate::error::Error;
use crate::output;

#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Only show events for this domain
    pub domain: Option<String>,

    /// Number of events to show
    #[arg(long, default_value_t = 25)]
    pub limit: u32,

    /// Only show events after this date (ISO 8601)
    #[arg(long)]
    pub since: Option<String>,
}

pub async fn execute<A: AccessApi + ?Sized>(api: &A, args: LogsArgs) -> Result<()> {
    // Validate --since before any network call.
    let since = args.since.as_deref().map(parse_since).transpose()?;

    let mut path = format!(
        "/access/logs/access_requests?limit={}&direction=desc",
        args.limit
    );
    if let Some(since) = since {
        path.push_str(&format!(
            "&since={}",
            since.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }

    output::info("Fetching access events");
    let response = api.get(&path).await?;
    let events: Vec<AccessEvent> = response
        .result
        .map(serde_json::from_value)
        .transpose()?
        .unwrap_or_default();

    if events.is_empty() {
        println!("\n  {}\n", "No access events found.".dimmed());
        return Ok(());
    }

    // The log endpoint has no domain filter; apply it client-side.
    let events: Vec<AccessEvent> = match args.domain {
        Some(ref domain) => events
            .into_iter()
            .filter(|e| e.app_domain.as_deref() == Some(domain.as_str()))
            .collect(),
        None => events,
    };

    if events.is_empty() {
        println!(
            "\n  {}\n",
            format!(
                "No events found for domain: {}",
                args.domain.as_deref().unwrap_or("")
            )
            .dimmed()
        );
        return Ok(());
    }

    let title = match args.domain {
        Some(ref domain) => format!("Recent Access Events — {}", domain),
        None => "Recent Access Events".to_string(),
    };
    println!("\n  {}\n", title.bold());

    let col_time = events
        .iter()
        .map(|e| format_time(e.created_at.as_deref()).len())
        .max()
        .unwrap_or(0)
        .max(4);
    let col_email = events
        .iter()
        .map(|e| e.user_email.as_deref().unwrap_or("n/a").len())
        .max()
        .unwrap_or(0)
        .max(5);
    let col_domain = events
        .iter()
        .map(|e| e.app_domain.as_deref().unwrap_or("n/a").len())
        .max()
        .unwrap_or(0)
        .max(6);

    println!(
        "  {}{}{}{}{}",
        output::cell("Time", col_time).dimmed(),
        output::cell("Email", col_email).dimmed(),
        output::cell("Domain", col_domain).dimmed(),
        format!("{:<5}", "OK").dimmed(),
        "IP".dimmed()
    );
    println!(
        "  {}",
        "─".repeat(col_time + col_email + col_domain + 6 + 5 + 15).dimmed()
    );

    for event in &events {
        let line = format!(
            "  {}{}{}{}{}",
            output::cell(&format_time(event.created_at.as_deref()), col_time),
            output::cell(event.user_email.as_deref().unwrap_or("n/a"), col_email),
            output::cell(event.app_domain.as_deref().unwrap_or("n/a"), col_domain),
            format!("{:<5}", if event.allowed { "✓" } else { "✗" }),
            event.ip_address.as_deref().unwrap_or("n/a")
        );
        if event.allowed {
            println!("{}", line);
        } else {
            println!("{}", line.red());
        }
    }

    println!("\n  {}\n", format!("{} event(s)", events.len()).dimmed());

    Ok(())
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates.
fn parse_since(input: &str) -> Result<DateTime<Utc>, Error> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(Error::InvalidDate {
        input: input.to_string(),
    })
}

fn format_time(iso: Option<&str>) -> String {
    let Some(iso) = iso else {
        return "n/a".to_string();
    };
    match DateTime::parse_from_rfc3339(iso) {
        Ok(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => iso.to_string(),
    }
}
