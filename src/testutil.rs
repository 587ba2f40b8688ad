//! Test fakes: an in-memory Access API and a scripted prompter.
//!
//! `FakeApi` serves the same fixtures the real endpoints would and records
//! every call, so flow tests can assert exactly which requests were issued.
//! Created identity providers are appended to the fixture state, which makes
//! ensure-idempotence observable across calls.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::api::{AccessApi, ApiResponse};
use crate::error::{Error, Result};
use crate::prompt::Prompter;

#[derive(Default)]
struct FakeState {
    zones: Vec<Value>,
    apps: Vec<Value>,
    idps: Vec<Value>,
    events: Vec<Value>,
    team: Option<String>,
    calls: Vec<String>,
    posts: Vec<(String, Value)>,
    created_idp_kinds: Vec<String>,
    failures: Vec<(String, StatusCode, String)>,
    next_id: u32,
}

pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState::default()),
        }
    }

    pub fn with_zone(self, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .zones
            .push(json!({"id": format!("zone-{}", name), "name": name}));
        self
    }

    pub fn with_app(self, id: &str, domain: &str) -> Self {
        self.state.lock().unwrap().apps.push(json!({
            "id": id,
            "name": domain,
            "domain": domain,
            "type": "self_hosted",
            "session_duration": "24h",
            "allowed_idps": [],
            "policies": [{
                "name": format!("Allow — {}", domain),
                "decision": "allow",
                "include": [{"everyone": {}}],
            }],
        }));
        self
    }

    pub fn with_idp(self, id: &str, name: &str, kind: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .idps
            .push(json!({"id": id, "name": name, "type": kind}));
        self
    }

    pub fn with_team(self, team: &str) -> Self {
        self.state.lock().unwrap().team = Some(team.to_string());
        self
    }

    pub fn with_event(self, email: &str, domain: &str, allowed: bool) -> Self {
        self.state.lock().unwrap().events.push(json!({
            "user_email": email,
            "app_domain": domain,
            "ip_address": "203.0.113.7",
            "created_at": "2025-01-15T10:30:00Z",
            "allowed": allowed,
        }));
        self
    }

    /// Fail any POST whose path starts with `path`.
    pub fn failing_post(self, path: &str, status: u16, message: &str) -> Self {
        self.fail("POST", path, status, message)
    }

    /// Fail any GET whose path starts with `path`.
    pub fn failing_get(self, path: &str, status: u16, message: &str) -> Self {
        self.fail("GET", path, status, message)
    }

    fn fail(self, method: &str, path: &str, status: u16, message: &str) -> Self {
        self.state.lock().unwrap().failures.push((
            format!("{} {}", method, path),
            StatusCode::from_u16(status).unwrap(),
            message.to_string(),
        ));
        self
    }

    pub fn calls_to(&self, call: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.as_str() == call)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    pub fn last_post_body(&self, path: &str) -> Option<Value> {
        self.state
            .lock()
            .unwrap()
            .posts
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
    }

    /// Provider types created via POST, in creation order.
    pub fn created_idp_kinds(&self) -> Vec<String> {
        self.state.lock().unwrap().created_idp_kinds.clone()
    }

    fn record(&self, method: &str, path: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("{} {}", method, path));

        let key = format!("{} {}", method, path);
        for (prefix, status, message) in &state.failures {
            if key.starts_with(prefix.as_str()) {
                return Err(Error::Api {
                    status: *status,
                    messages: message.clone(),
                });
            }
        }
        Ok(())
    }

    fn ok(result: Value) -> ApiResponse<Value> {
        ApiResponse {
            success: true,
            errors: Vec::new(),
            messages: Vec::new(),
            result: Some(result),
        }
    }
}

#[async_trait]
impl AccessApi for FakeApi {
    async fn get(&self, path: &str) -> Result<ApiResponse<Value>> {
        self.record("GET", path)?;
        let state = self.state.lock().unwrap();

        if path.starts_with("/zones") {
            let name = path.split("name=").nth(1).unwrap_or("");
            let zones: Vec<Value> = state
                .zones
                .iter()
                .filter(|z| z["name"] == name)
                .cloned()
                .collect();
            return Ok(Self::ok(Value::Array(zones)));
        }
        if path.starts_with("/access/identity_providers") {
            return Ok(Self::ok(Value::Array(state.idps.clone())));
        }
        if path.starts_with("/access/apps") {
            return Ok(Self::ok(Value::Array(state.apps.clone())));
        }
        if path.starts_with("/access/organizations") {
            return Ok(match &state.team {
                Some(team) => Self::ok(json!({
                    "name": team,
                    "auth_domain": format!("{}.cloudflareaccess.com", team),
                })),
                // A real `"result": null` body deserializes to `None`, not
                // `Some(Value::Null)` — model that faithfully.
                None => ApiResponse {
                    success: true,
                    errors: Vec::new(),
                    messages: Vec::new(),
                    result: None,
                },
            });
        }
        if path.starts_with("/access/logs/access_requests") {
            return Ok(Self::ok(Value::Array(state.events.clone())));
        }

        Ok(Self::ok(Value::Null))
    }

    async fn post(&self, path: &str, body: Value) -> Result<ApiResponse<Value>> {
        self.record("POST", path)?;
        let mut state = self.state.lock().unwrap();
        state.posts.push((path.to_string(), body.clone()));
        state.next_id += 1;
        let id = state.next_id;

        if path == "/access/identity_providers" {
            let created = json!({
                "id": format!("idp-gen-{}", id),
                "name": body["name"],
                "type": body["type"],
            });
            state.idps.push(created.clone());
            state
                .created_idp_kinds
                .push(body["type"].as_str().unwrap_or("").to_string());
            return Ok(Self::ok(created));
        }
        if path == "/access/apps" {
            let mut created = body;
            created["id"] = json!(format!("app-gen-{}", id));
            state.apps.push(created.clone());
            return Ok(Self::ok(created));
        }

        Ok(Self::ok(Value::Null))
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse<Value>> {
        self.record("DELETE", path)?;
        let mut state = self.state.lock().unwrap();

        if let Some(id) = path.strip_prefix("/access/apps/") {
            state.apps.retain(|app| app["id"] != id);
        }

        Ok(Self::ok(Value::Null))
    }
}

enum Answer {
    Text(String),
    Choice(usize),
    Confirm(bool),
}

/// Prompter fed from a queue of scripted answers.
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Answer>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self {
            answers: Mutex::new(VecDeque::new()),
        }
    }

    pub fn text(self, answer: &str) -> Self {
        self.answers
            .lock()
            .unwrap()
            .push_back(Answer::Text(answer.to_string()));
        self
    }

    pub fn choice(self, index: usize) -> Self {
        self.answers
            .lock()
            .unwrap()
            .push_back(Answer::Choice(index));
        self
    }

    pub fn confirm(self, answer: bool) -> Self {
        self.answers
            .lock()
            .unwrap()
            .push_back(Answer::Confirm(answer));
        self
    }

    fn next(&self, expected: &str) -> Answer {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer left for {}", expected))
    }
}

impl Prompter for ScriptedPrompter {
    fn ask_text(&self, message: &str) -> Result<String> {
        match self.next(message) {
            Answer::Text(answer) => Ok(answer),
            _ => panic!("scripted answer mismatch for text prompt: {}", message),
        }
    }

    fn ask_choice(&self, message: &str, choices: &[&str]) -> Result<usize> {
        match self.next(message) {
            Answer::Choice(index) => {
                assert!(index < choices.len(), "choice out of range: {}", message);
                Ok(index)
            }
            _ => panic!("scripted answer mismatch for choice prompt: {}", message),
        }
    }

    fn ask_confirm(&self, message: &str, _default: bool) -> Result<bool> {
        match self.next(message) {
            Answer::Confirm(answer) => Ok(answer),
            _ => panic!("scripted answer mismatch for confirm prompt: {}", message),
        }
    }
}
