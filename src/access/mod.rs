//! Access policy core: who gets in, expressed as Cloudflare include rules

pub mod compose;
pub mod rules;

pub use compose::{compose_application, AppRequest, SESSION_DURATION};
pub use rules::{build_include_rules, parse_allow_rule, resolve_access};
pub use rules::{AccessSelector, IncludeRule, PrincipalKind};
