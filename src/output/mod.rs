//! Output formatting module

use owo_colors::OwoColorize;
use serde_json::Value;

/// Print success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Print warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

/// Print info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}

/// Print a bold section heading with a separator line.
pub fn heading(text: &str) {
    println!("\n  {}", text.bold());
    println!("  {}", "─".repeat(40).dimmed());
}

/// Banner shown before the protect wizard.
pub fn banner() {
    println!();
    println!("  {}: protect your app in 60 seconds", "fastpass".bold());
    println!();
}

/// Pad a cell to `width` columns (plus a two-space gutter).
pub fn cell(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width + 2)
}

/// Human description of a policy include rule.
///
/// Covers the rule shapes fastpass writes; anything else renders as raw JSON.
pub fn describe_rule(rule: &Value) -> String {
    if let Some(email) = rule
        .get("email")
        .and_then(|r| r.get("email"))
        .and_then(Value::as_str)
    {
        return email.to_string();
    }
    if let Some(domain) = rule
        .get("email_domain")
        .and_then(|r| r.get("domain"))
        .and_then(Value::as_str)
    {
        return format!("Anyone with an @{} email", domain);
    }
    if let Some(name) = rule
        .get("github-organization")
        .and_then(|r| r.get("name"))
        .and_then(Value::as_str)
    {
        return format!("Members of GitHub org \"{}\"", name);
    }
    if rule.get("everyone").is_some() {
        return "Everyone (any logged-in user)".to_string();
    }
    rule.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn describes_each_rule_shape() {
        assert_eq!(describe_rule(&json!({"email": {"email": "a@b.com"}})), "a@b.com");
        assert_eq!(
            describe_rule(&json!({"email_domain": {"domain": "corp.com"}})),
            "Anyone with an @corp.com email"
        );
        assert_eq!(
            describe_rule(&json!({"github-organization": {"name": "my-org"}})),
            "Members of GitHub org \"my-org\""
        );
        assert_eq!(
            describe_rule(&json!({"everyone": {}})),
            "Everyone (any logged-in user)"
        );
    }

    #[test]
    fn unknown_rule_falls_back_to_json() {
        let rule = json!({"ip": {"ip": "10.0.0.0/8"}});
        assert_eq!(describe_rule(&rule), rule.to_string());
    }
}
