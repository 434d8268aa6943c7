//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::param::ParameterKey;

// ── Configuration errors ──────────────────────────────────────────────────────

/// Missing or invalid parameters and config-file problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Missing required parameter '{key}'.\n\nProvide it with {flag}, the '{key}' entry in the config file, or the {env} environment variable."
    )]
    MissingRequired {
        key: ParameterKey,
        flag: String,
        env: String,
    },

    #[error("No value entered for required parameter '{0}'.")]
    EmptyPrompt(ParameterKey),

    #[error("Config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Cannot read config file {}: {message}", .path.display())]
    Unreadable { path: PathBuf, message: String },

    #[error("Malformed config file {}: {message}", .path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("Invalid value for '{key}' in config file: {reason}")]
    InvalidEntry { key: String, reason: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: ParameterKey,
        value: String,
        reason: String,
    },

    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("'{action}' is not supported for {service}.")]
    UnsupportedAction { service: String, action: String },

    #[error(
        "No fields to update. Pass at least one of --display-name, --description, --tool-description, --adk-deployment-id, --auth-id, --icon-uri."
    )]
    EmptyPatch,

    #[error("Refusing to delete '{0}' without confirmation. Re-run with --force.")]
    ConfirmationRequired(String),
}

// ── Authentication errors ─────────────────────────────────────────────────────

/// Failure to obtain an access token from ambient credentials.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to obtain access token.\n\nTried:\n{}", .attempts.join("\n"))]
    NoCredentials { attempts: Vec<String> },
}

// ── Remote service errors ─────────────────────────────────────────────────────

/// Failures talking to the registry, engine or authorization APIs.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Invalid JSON response from {url}: {message}")]
    InvalidResponse { url: String, message: String },
}

impl RemoteError {
    /// HTTP status for non-2xx responses.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ── Classification ────────────────────────────────────────────────────────────

/// Top-level error category, used for exit codes and JSON error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Authentication,
    RemoteService,
    Other,
}

impl ErrorKind {
    /// Classify an error by walking its source chain for a typed domain error.
    #[must_use]
    pub fn classify(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if cause.is::<ConfigError>() {
                return Self::Configuration;
            }
            if cause.is::<AuthError>() {
                return Self::Authentication;
            }
            if cause.is::<RemoteError>() {
                return Self::RemoteService;
            }
        }
        Self::Other
    }

    /// Process exit code for this category.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Configuration => 2,
            Self::Authentication => 3,
            Self::RemoteService => 4,
            Self::Other => 1,
        }
    }

    /// Machine-readable code used by `--json` error output.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Configuration => "configuration_error",
            Self::Authentication => "authentication_error",
            Self::RemoteService => "remote_service_error",
            Self::Other => "error",
        }
    }
}
