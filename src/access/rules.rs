//! Access rule resolution and policy compilation
//!
//! Turns "who can access this" — a `--allow` expression or an interactive
//! answer — into the include rules the Access API expects.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::prompt::{ask_until, Prompter};

/// Who a policy admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrincipalKind {
    Emails,
    Domain,
    GithubOrg,
    Everyone,
}

impl PrincipalKind {
    /// Map a selection key to a kind. Unrecognized keys fall open to
    /// `Everyone` — documented default, matching the policy compiler.
    pub fn from_key(key: &str) -> Self {
        match key {
            "me" | "emails" => PrincipalKind::Emails,
            "domain" => PrincipalKind::Domain,
            "github_org" => PrincipalKind::GithubOrg,
            _ => PrincipalKind::Everyone,
        }
    }
}

/// Normalized access selection: the principal list plus its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessSelector {
    pub include: Vec<String>,
    pub kind: PrincipalKind,
}

impl AccessSelector {
    /// One-line description for the confirmation summary.
    pub fn describe(&self) -> String {
        match self.kind {
            PrincipalKind::Emails => self.include.join(", "),
            PrincipalKind::Domain => format!("*@{}", self.first()),
            PrincipalKind::GithubOrg => format!("GitHub org: {}", self.first()),
            PrincipalKind::Everyone => "Everyone (any logged-in user)".to_string(),
        }
    }

    fn first(&self) -> &str {
        self.include.first().map(String::as_str).unwrap_or("")
    }
}

/// Include rule variants consumed by the Access API.
///
/// Externally tagged serde gives the exact wire shapes:
/// `{"email":{"email":..}}`, `{"email_domain":{"domain":..}}`,
/// `{"github-organization":{"name":..}}`, `{"everyone":{}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncludeRule {
    Email { email: String },
    EmailDomain { domain: String },
    #[serde(rename = "github-organization")]
    GithubOrganization { name: String },
    Everyone {},
}

/// Parse a `--allow` expression.
///
/// Grammar: `*@DOMAIN` | `org:NAME` | `everyone` | `email1,email2,...`.
/// No validation beyond the structural parse — malformed entries go through
/// verbatim and the remote API is the authority.
pub fn parse_allow_rule(allow: &str) -> AccessSelector {
    if let Some(domain) = allow.strip_prefix("*@") {
        return AccessSelector {
            include: vec![domain.to_string()],
            kind: PrincipalKind::Domain,
        };
    }
    if let Some(org) = allow.strip_prefix("org:") {
        return AccessSelector {
            include: vec![org.to_string()],
            kind: PrincipalKind::GithubOrg,
        };
    }
    if allow == "everyone" {
        return AccessSelector {
            include: Vec::new(),
            kind: PrincipalKind::Everyone,
        };
    }
    AccessSelector {
        include: allow.split(',').map(|e| e.trim().to_string()).collect(),
        kind: PrincipalKind::Emails,
    }
}

const ACCESS_CHOICES: &[(&str, &str)] = &[
    ("me", "Just me (enter your email)"),
    ("domain", "Anyone with a specific email domain (@company.com)"),
    ("github_org", "Members of a GitHub organization"),
    ("emails", "Specific email addresses"),
    ("everyone", "Everyone (just require login)"),
];

/// Resolve who gets access: parse the flag when present, otherwise ask.
pub fn resolve_access<P: Prompter + ?Sized>(
    allow: Option<&str>,
    prompter: &P,
) -> Result<AccessSelector> {
    if let Some(flag) = allow {
        return Ok(parse_allow_rule(flag));
    }

    let labels: Vec<&str> = ACCESS_CHOICES.iter().map(|(_, label)| *label).collect();
    let picked = prompter.ask_choice("Who should have access?", &labels)?;
    let kind = PrincipalKind::from_key(ACCESS_CHOICES[picked].0);

    let include = match ACCESS_CHOICES[picked].0 {
        "me" => {
            let email = ask_until(prompter, "Your email address:", "Enter a valid email", |v| {
                v.contains('@')
            })?;
            vec![email]
        }
        "domain" => {
            let domain = ask_until(
                prompter,
                "Email domain (e.g. company.com):",
                "Enter a valid domain",
                |v| v.contains('.'),
            )?;
            vec![domain]
        }
        "github_org" => {
            let org = ask_until(
                prompter,
                "GitHub organization name:",
                "Enter a GitHub org name",
                |v| !v.is_empty(),
            )?;
            vec![org]
        }
        "emails" => {
            let emails = ask_until(
                prompter,
                "Email addresses (comma-separated):",
                "Enter at least one email",
                |v| v.contains('@'),
            )?;
            emails.split(',').map(|e| e.trim().to_string()).collect()
        }
        _ => Vec::new(),
    };

    Ok(AccessSelector { include, kind })
}

/// Compile a selector into the policy include rules.
///
/// One rule per email; exactly one rule for every other kind.
pub fn build_include_rules(selector: &AccessSelector) -> Vec<IncludeRule> {
    match selector.kind {
        PrincipalKind::Emails => selector
            .include
            .iter()
            .map(|email| IncludeRule::Email {
                email: email.clone(),
            })
            .collect(),
        PrincipalKind::Domain => vec![IncludeRule::EmailDomain {
            domain: selector.first().to_string(),
        }],
        PrincipalKind::GithubOrg => vec![IncludeRule::GithubOrganization {
            name: selector.first().to_string(),
        }],
        PrincipalKind::Everyone => vec![IncludeRule::Everyone {}],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_wildcard_domain() {
        let selector = parse_allow_rule("*@company.com");
        assert_eq!(selector.include, vec!["company.com"]);
        assert_eq!(selector.kind, PrincipalKind::Domain);
    }

    #[test]
    fn parses_github_org() {
        let selector = parse_allow_rule("org:my-org");
        assert_eq!(selector.include, vec!["my-org"]);
        assert_eq!(selector.kind, PrincipalKind::GithubOrg);
    }

    #[test]
    fn parses_everyone_literal() {
        let selector = parse_allow_rule("everyone");
        assert!(selector.include.is_empty());
        assert_eq!(selector.kind, PrincipalKind::Everyone);
    }

    #[test]
    fn parses_email_list_with_whitespace() {
        let selector = parse_allow_rule("a@b.com, c@d.com");
        assert_eq!(selector.include, vec!["a@b.com", "c@d.com"]);
        assert_eq!(selector.kind, PrincipalKind::Emails);
    }

    #[test]
    fn single_email_is_emails_kind() {
        let selector = parse_allow_rule("me@example.com");
        assert_eq!(selector.include, vec!["me@example.com"]);
        assert_eq!(selector.kind, PrincipalKind::Emails);
    }

    #[test]
    fn malformed_entries_pass_through() {
        let selector = parse_allow_rule("not-an-email");
        assert_eq!(selector.include, vec!["not-an-email"]);
        assert_eq!(selector.kind, PrincipalKind::Emails);
    }

    #[test]
    fn unknown_choice_key_falls_open_to_everyone() {
        assert_eq!(PrincipalKind::from_key("bogus"), PrincipalKind::Everyone);
    }

    #[test]
    fn compiles_one_rule_per_email() {
        let selector = AccessSelector {
            include: vec!["a@b.com".into(), "c@d.com".into()],
            kind: PrincipalKind::Emails,
        };
        assert_eq!(
            build_include_rules(&selector),
            vec![
                IncludeRule::Email {
                    email: "a@b.com".into()
                },
                IncludeRule::Email {
                    email: "c@d.com".into()
                },
            ]
        );
    }

    #[test]
    fn compiles_single_domain_rule() {
        let selector = AccessSelector {
            include: vec!["company.com".into(), "ignored.com".into()],
            kind: PrincipalKind::Domain,
        };
        assert_eq!(
            build_include_rules(&selector),
            vec![IncludeRule::EmailDomain {
                domain: "company.com".into()
            }]
        );
    }

    #[test]
    fn compiles_everyone_rule_ignoring_principals() {
        let selector = AccessSelector {
            include: vec!["stray@entry.com".into()],
            kind: PrincipalKind::Everyone,
        };
        assert_eq!(build_include_rules(&selector), vec![IncludeRule::Everyone {}]);
    }

    #[test]
    fn rules_serialize_to_api_wire_shapes() {
        assert_eq!(
            serde_json::to_value(IncludeRule::Email {
                email: "a@b.com".into()
            })
            .unwrap(),
            json!({"email": {"email": "a@b.com"}})
        );
        assert_eq!(
            serde_json::to_value(IncludeRule::EmailDomain {
                domain: "company.com".into()
            })
            .unwrap(),
            json!({"email_domain": {"domain": "company.com"}})
        );
        assert_eq!(
            serde_json::to_value(IncludeRule::GithubOrganization {
                name: "my-org".into()
            })
            .unwrap(),
            json!({"github-organization": {"name": "my-org"}})
        );
        assert_eq!(
            serde_json::to_value(IncludeRule::Everyone {}).unwrap(),
            json!({"everyone": {}})
        );
    }

    #[test]
    fn describes_selectors_for_summary() {
        assert_eq!(parse_allow_rule("a@b.com,c@d.com").describe(), "a@b.com, c@d.com");
        assert_eq!(parse_allow_rule("*@corp.com").describe(), "*@corp.com");
        assert_eq!(parse_allow_rule("org:acme").describe(), "GitHub org: acme");
        assert_eq!(
            parse_allow_rule("everyone").describe(),
            "Everyone (any logged-in user)"
        );
    }
}
