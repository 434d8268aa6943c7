//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;
use registrar_types::{Agent, AgentList, Authorization, AuthorizationList, EngineAgentList};
use serde_json::Value;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::application::services::authorization::RefreshOutcome;
use crate::domain::{ActionSpec, ParameterKey, ResolvedConfig};

/// Placeholder printed instead of secret values.
pub const MASK: &str = "********";

/// Value as it may be shown to the user: secrets are masked.
#[must_use]
pub fn display_value(key: ParameterKey, value: &str) -> String {
    if key.is_secret() && !value.is_empty() {
        MASK.to_string()
    } else {
        value.to_string()
    }
}

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether stderr is a TTY (spinners draw there).
    pub stderr_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            stderr_tty: Term::stderr().is_term(),
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.stderr_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓` to stderr. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            eprintln!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠` to stderr. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            eprintln!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ` to stderr. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            eprintln!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header.
    pub fn header(&self, msg: &str) {
        println!("  {}", msg.style(self.styles.header));
    }

    /// Print a key-value pair with the key dimmed.
    pub fn kv(&self, key: &str, value: &str) {
        println!("  {:<22} {value}", key.style(self.styles.dim));
    }
}

/// Picks human or JSON rendering for command results.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn agent(&self, agent: &Agent) -> Result<()> {
        match self {
            Self::Human(h) => {
                h.render_agent(agent);
                Ok(())
            }
            Self::Json(j) => j.render(agent),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn agent_list(&self, list: &AgentList) -> Result<()> {
        match self {
            Self::Human(h) => {
                h.render_agent_list(list);
                Ok(())
            }
            Self::Json(j) => j.render(list),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn engine_list(&self, list: &EngineAgentList) -> Result<()> {
        match self {
            Self::Human(h) => {
                h.render_engine_list(list);
                Ok(())
            }
            Self::Json(j) => j.render(list),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn authorization(&self, auth: &Authorization) -> Result<()> {
        match self {
            Self::Human(h) => {
                h.render_authorization(auth);
                Ok(())
            }
            Self::Json(j) => j.render(&masked_authorization(auth)),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn authorization_list(&self, list: &AuthorizationList) -> Result<()> {
        match self {
            Self::Human(h) => {
                h.render_authorization_list(list);
                Ok(())
            }
            Self::Json(j) => {
                let masked = AuthorizationList {
                    authorizations: list
                        .authorizations
                        .iter()
                        .map(masked_authorization)
                        .collect(),
                    next_page_token: None,
                };
                j.render(&masked)
            }
        }
    }

    /// Delete responses and other free-form bodies.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn message(&self, body: &Value) -> Result<()> {
        match self {
            Self::Human(h) => {
                h.render_message(body);
                Ok(())
            }
            Self::Json(j) => j.render(body),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn refresh(&self, outcome: &RefreshOutcome) -> Result<()> {
        match self {
            Self::Human(h) => {
                h.render_refresh(outcome);
                Ok(())
            }
            Self::Json(j) => j.render(&serde_json::json!({
                "created": masked_authorization(&outcome.created),
                "deleted": outcome.deleted,
                "message": outcome.message,
            })),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn resolved(
        &self,
        spec: &ActionSpec,
        resolved: &ResolvedConfig,
        config_path: &std::path::Path,
    ) -> Result<()> {
        match self {
            Self::Human(h) => {
                h.render_resolved(spec, resolved, config_path);
                Ok(())
            }
            Self::Json(j) => {
                let values: serde_json::Map<String, Value> = resolved
                    .iter()
                    .map(|(key, v)| {
                        (
                            key.as_str().to_string(),
                            serde_json::json!({
                                "value": display_value(key, &v.value),
                                "source": v.source.as_str(),
                            }),
                        )
                    })
                    .collect();
                j.render(&serde_json::json!({
                    "service": spec.service.as_str(),
                    "action": spec.action.as_str(),
                    "config_file": config_path.display().to_string(),
                    "values": values,
                }))
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(h) => {
                h.render_version(version);
                Ok(())
            }
            Self::Json(j) => j.render(&serde_json::json!({ "version": version })),
        }
    }
}

/// Copy of `auth` with the client secret masked (the API normally omits it).
fn masked_authorization(auth: &Authorization) -> Authorization {
    let mut auth = auth.clone();
    if let Some(oauth) = auth.server_side_oauth2.as_mut()
        && let Some(secret) = oauth.client_secret.as_mut()
    {
        *secret = display_value(ParameterKey::OauthClientSecret, secret);
    }
    auth
}
