//! Infrastructure implementations of the `TokenProvider` port.
//!
//! Tokens come from an explicit environment variable first, then from the
//! gcloud CLI (application-default credentials, then the user login).

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, Environment, TokenProvider};
use crate::domain::AuthError;

/// Environment variables checked for a ready-made access token.
pub const TOKEN_ENV_VARS: [&str; 2] = ["AGENTSPACE_ACCESS_TOKEN", "GOOGLE_OAUTH_ACCESS_TOKEN"];

/// Timeout for a single `gcloud` invocation.
pub const GCLOUD_TIMEOUT: Duration = Duration::from_secs(15);

/// Token taken verbatim from the environment.
pub struct EnvTokenProvider<E> {
    env: E,
}

impl<E: Environment> EnvTokenProvider<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }
}

impl<E: Environment> TokenProvider for EnvTokenProvider<E> {
    fn name(&self) -> &str {
        "environment (AGENTSPACE_ACCESS_TOKEN, GOOGLE_OAUTH_ACCESS_TOKEN)"
    }

    fn access_token(&self) -> Result<String> {
        TOKEN_ENV_VARS
            .iter()
            .filter_map(|name| self.env.var(name))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
            .ok_or_else(|| anyhow::anyhow!("no access token variable set"))
    }
}

/// Token printed by one `gcloud auth ... print-access-token` command.
pub struct GcloudTokenProvider<R> {
    runner: R,
    label: &'static str,
    args: &'static [&'static str],
}

impl<R: CommandRunner> GcloudTokenProvider<R> {
    /// `gcloud auth application-default print-access-token`.
    pub fn application_default(runner: R) -> Self {
        Self {
            runner,
            label: "gcloud application-default credentials",
            args: &["auth", "application-default", "print-access-token"],
        }
    }

    /// `gcloud auth print-access-token` (the logged-in user).
    pub fn user(runner: R) -> Self {
        Self {
            runner,
            label: "gcloud user credentials",
            args: &["auth", "print-access-token"],
        }
    }
}

impl<R: CommandRunner> TokenProvider for GcloudTokenProvider<R> {
    fn name(&self) -> &str {
        self.label
    }

    fn access_token(&self) -> Result<String> {
        let output = self
            .runner
            .run_with_timeout("gcloud", self.args, GCLOUD_TIMEOUT)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr.lines().find(|l| !l.trim().is_empty()).unwrap_or("no output");
            anyhow::bail!("gcloud exited with {}: {}", output.status, reason.trim());
        }
        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        anyhow::ensure!(!token.is_empty(), "gcloud printed an empty token");
        Ok(token)
    }
}

/// Tries each provider in order; the first token wins.
pub struct ChainTokenProvider {
    providers: Vec<Box<dyn TokenProvider>>,
}

impl ChainTokenProvider {
    #[must_use]
    pub fn new(providers: Vec<Box<dyn TokenProvider>>) -> Self {
        Self { providers }
    }
}

impl TokenProvider for ChainTokenProvider {
    fn name(&self) -> &str {
        "ambient credentials"
    }

    fn access_token(&self) -> Result<String> {
        let mut attempts = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            match provider.access_token() {
                Ok(token) => {
                    tracing::debug!(provider = provider.name(), "obtained access token");
                    return Ok(token);
                }
                Err(e) => {
                    tracing::debug!(provider = provider.name(), error = %e, "token provider failed");
                    attempts.push(format!("  - {}: {e}", provider.name()));
                }
            }
        }
        Err(AuthError::NoCredentials { attempts }.into())
    }
}
