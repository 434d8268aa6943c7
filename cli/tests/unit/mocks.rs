//! Shared mock infrastructure for unit tests.
//!
//! `MockTransport` is generated with `mockall`; the remaining ports are small
//! hand-written fakes so each test file doesn't re-define the same boilerplate.

#![allow(dead_code, clippy::expect_used)]

use std::cell::RefCell;
use std::collections::HashMap;

use agentspace_registrar::application::ports::{
    ApiRequest, ApiResponse, Environment, HttpTransport, ProgressReporter, Prompter,
    TokenProvider,
};
use agentspace_registrar::application::services::resolver::resolve_values;
use agentspace_registrar::domain::{
    Action, ActionSpec, CliArgs, ConfigValues, ParameterKey, ResolvedConfig, Service,
};
use anyhow::Result;
use mockall::mock;

// ── HTTP transport ───────────────────────────────────────────────────────────

mock! {
    pub Transport {}

    impl HttpTransport for Transport {
        fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
    }
}

pub fn ok(body: &str) -> ApiResponse {
    ApiResponse {
        status: 200,
        body: body.to_string(),
    }
}

pub fn status(code: u16, body: &str) -> ApiResponse {
    ApiResponse {
        status: code,
        body: body.to_string(),
    }
}

// ── Credentials ──────────────────────────────────────────────────────────────

pub struct StaticToken;

impl TokenProvider for StaticToken {
    fn name(&self) -> &str {
        "static"
    }

    fn access_token(&self) -> Result<String> {
        Ok("test-token".to_string())
    }
}

// ── Environment ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MapEnv(pub HashMap<String, String>);

impl MapEnv {
    pub fn with(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }
}

impl Environment for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

// ── Prompter ─────────────────────────────────────────────────────────────────

/// A prompter with no terminal attached.
pub struct NoTerminal;

impl Prompter for NoTerminal {
    fn is_interactive(&self) -> bool {
        false
    }

    fn prompt(&self, key: ParameterKey) -> Result<String> {
        anyhow::bail!("prompt for {key} not expected in this test")
    }

    fn confirm(&self, _: &str, _: bool) -> Result<bool> {
        anyhow::bail!("confirm not expected in this test")
    }
}

/// A terminal that answers prompts from a script and records what was asked.
pub struct ScriptedTerminal {
    answers: HashMap<ParameterKey, String>,
    pub asked: RefCell<Vec<ParameterKey>>,
}

impl ScriptedTerminal {
    pub fn new(answers: &[(ParameterKey, &str)]) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(k, v)| (*k, (*v).to_string()))
                .collect(),
            asked: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedTerminal {
    fn is_interactive(&self) -> bool {
        true
    }

    fn prompt(&self, key: ParameterKey) -> Result<String> {
        self.asked.borrow_mut().push(key);
        Ok(self.answers.get(&key).cloned().unwrap_or_default())
    }

    fn confirm(&self, _: &str, default: bool) -> Result<bool> {
        Ok(default)
    }
}

// ── Progress reporter ────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingReporter {
    pub events: RefCell<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.events.borrow_mut().push(format!("step: {message}"));
    }

    fn success(&self, message: &str) {
        self.events.borrow_mut().push(format!("success: {message}"));
    }

    fn warn(&self, message: &str) {
        self.events.borrow_mut().push(format!("warn: {message}"));
    }
}

// ── Resolution helpers ───────────────────────────────────────────────────────

pub fn cli(pairs: &[(ParameterKey, &str)]) -> CliArgs {
    pairs
        .iter()
        .map(|(k, v)| (*k, (*v).to_string()))
        .collect()
}

pub fn config(pairs: &[(&str, &str)]) -> ConfigValues {
    ConfigValues::from_entries(
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string())),
    )
    .0
}

/// Resolve `(service, action)` from CLI values only, with defaults applied.
pub fn resolved(service: Service, action: Action, pairs: &[(ParameterKey, &str)]) -> ResolvedConfig {
    let spec = ActionSpec::lookup(service, action).expect("action in catalog");
    resolve_values(
        spec,
        &cli(pairs),
        &ConfigValues::default(),
        &MapEnv::default(),
        "AGENTSPACE",
        &NoTerminal,
    )
    .expect("resolution succeeds")
}
