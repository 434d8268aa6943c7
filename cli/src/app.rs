//! Application context: unified state passed to every command handler.
//!
//! `AppContext` owns the production port implementations (config store,
//! environment, prompter, HTTP transport, credential chain) together with the
//! global flags, so command handlers only deal with their own arguments.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::{ConfigLocation, Prompter};
use crate::application::services::api::ApiClient;
use crate::application::services::resolver::Resolver;
use crate::domain::{
    Action, ActionSpec, CliArgs, ConfigError, DEFAULT_ENV_PREFIX, ParameterKey, ResolvedConfig,
    Service,
};
use crate::infra::command_runner::StdCommandRunner;
use crate::infra::config::{DEFAULT_CONFIG_FILE, JsonConfigStore};
use crate::infra::credentials::{ChainTokenProvider, EnvTokenProvider, GcloudTokenProvider};
use crate::infra::env::ProcessEnvironment;
use crate::infra::http::UreqTransport;
use crate::infra::prompt::DialoguerPrompter;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `AGENTSPACE_YES` env vars).
    pub yes: bool,
}

/// Parameter-resolution flags.
pub struct ResolutionFlags {
    /// Explicit config file; a missing file is then an error.
    pub config: Option<PathBuf>,
    /// Prefix of `<PREFIX>_<KEY>` environment variables.
    pub env_prefix: String,
}

impl Default for ResolutionFlags {
    fn default() -> Self {
        Self {
            config: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
    /// Config file and environment options.
    pub resolution: ResolutionFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// When `true`, never prompt.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `AGENTSPACE_YES`
    /// environment variables are present.
    pub non_interactive: bool,
    /// Config file to read.
    pub config_location: ConfigLocation,
    /// Prefix of `<PREFIX>_<KEY>` environment variables.
    pub env_prefix: String,
    pub config_store: JsonConfigStore,
    pub env: ProcessEnvironment,
    pub prompter: DialoguerPrompter,
    pub transport: UreqTransport,
    pub tokens: ChainTokenProvider,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEntry` for an empty `--env-prefix`.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("AGENTSPACE_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let env_prefix = flags.resolution.env_prefix.trim().trim_end_matches('_');
        if env_prefix.is_empty() {
            return Err(ConfigError::InvalidEntry {
                key: "env-prefix".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        let config_location = match &flags.resolution.config {
            Some(path) => ConfigLocation::Explicit(path.clone()),
            None => ConfigLocation::Default(PathBuf::from(DEFAULT_CONFIG_FILE)),
        };

        let tokens = ChainTokenProvider::new(vec![
            Box::new(EnvTokenProvider::new(ProcessEnvironment)),
            Box::new(GcloudTokenProvider::application_default(StdCommandRunner)),
            Box::new(GcloudTokenProvider::user(StdCommandRunner)),
        ]);

        Ok(Self {
            // JSON mode keeps stdout/stderr free of status lines.
            output: OutputContext::new(
                flags.output.no_color,
                flags.output.quiet || flags.output.json,
            ),
            mode,
            non_interactive,
            config_location,
            env_prefix: env_prefix.to_uppercase(),
            config_store: JsonConfigStore,
            env: ProcessEnvironment,
            prompter: DialoguerPrompter::new(non_interactive),
            transport: UreqTransport::default(),
            tokens,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Progress reporter for application services.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Resolve the parameters of `(service, action)`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unsupported actions, config-file
    /// problems, or unresolved required keys.
    pub fn resolve(
        &self,
        service: Service,
        action: Action,
        cli: &CliArgs,
    ) -> Result<(&'static ActionSpec, ResolvedConfig)> {
        let spec = ActionSpec::lookup(service, action)?;
        let resolver = Resolver::new(&self.config_store, &self.env, &self.prompter);
        let resolved = resolver.resolve(spec, cli, &self.config_location, &self.env_prefix)?;
        Ok((spec, resolved))
    }

    /// API client billed to the resolved `project_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if `project_id` was not resolved.
    pub fn client(
        &self,
        resolved: &ResolvedConfig,
    ) -> Result<ApiClient<'_, UreqTransport, ChainTokenProvider>> {
        let project = resolved.require(ParameterKey::ProjectId)?;
        Ok(ApiClient::new(&self.transport, &self.tokens, project))
    }

    /// Confirm a destructive action.
    ///
    /// `force` skips the question. Without a terminal to ask on, refusing is
    /// a configuration error rather than a silent default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfirmationRequired` in non-interactive mode
    /// without `force`, or an error if the terminal prompt fails.
    pub fn confirm_delete(&self, target: &str, force: bool) -> Result<bool> {
        if force {
            return Ok(true);
        }
        if self.non_interactive || !self.prompter.is_interactive() {
            return Err(ConfigError::ConfirmationRequired(target.to_string()).into());
        }
        self.prompter.confirm(&format!("Delete {target}?"), false)
    }
}
