//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{ConfigValues, ParameterKey};

// ── Value Types ───────────────────────────────────────────────────────────────

/// Where to look for the JSON config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    /// The default path; a missing file means "no config".
    Default(PathBuf),
    /// A path the user asked for; a missing file is an error.
    Explicit(PathBuf),
}

impl ConfigLocation {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Default(p) | Self::Explicit(p) => p,
        }
    }

    #[must_use]
    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }
}

/// HTTP method used by the remote services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully-built request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    #[must_use]
    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.push((key.to_string(), value.into()));
        self
    }

    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Value of the first query parameter named `key`.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value of the first header named `key` (case-insensitive).
    #[must_use]
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a completed HTTP exchange (any status code).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ── Configuration Ports ───────────────────────────────────────────────────────

/// Loads the flat key/value config file.
pub trait ConfigStore {
    /// Load config values from `location`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::FileNotFound` for a missing explicit path and
    /// `ConfigError::Malformed` for invalid JSON. A missing default path
    /// yields empty values.
    fn load(&self, location: &ConfigLocation) -> Result<ConfigValues>;
}

/// Read-only view of process environment variables.
pub trait Environment {
    /// Value of `name`, or `None` when unset or not valid UTF-8.
    fn var(&self, name: &str) -> Option<String>;
}

/// Interactive terminal input.
pub trait Prompter {
    /// Whether prompting is possible (TTY attached and not disabled).
    fn is_interactive(&self) -> bool;

    /// Ask for a value for `key`. Secret keys are read without echo.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal read fails.
    fn prompt(&self, key: ParameterKey) -> Result<String>;

    /// Ask a yes/no question.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal read fails.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

// ── Remote Ports ──────────────────────────────────────────────────────────────

/// Performs HTTP exchanges. Implementations return non-2xx responses as
/// `Ok(ApiResponse)` and reserve `Err` for transport failures.
pub trait HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// Supplies OAuth bearer tokens from ambient credentials.
pub trait TokenProvider {
    /// Short description for diagnostics, e.g. `"gcloud CLI"`.
    fn name(&self) -> &str;

    /// Obtain an access token.
    ///
    /// # Errors
    ///
    /// Returns an error if no token can be obtained from this provider.
    fn access_token(&self) -> Result<String>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so credential helpers can be mocked.
pub trait CommandRunner {
    /// Run a program and capture its output, killing it after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    fn run_with_timeout(&self, program: &str, args: &[&str], timeout: Duration)
    -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
