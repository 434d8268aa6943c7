//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags, ResolutionFlags};
use crate::commands;
use crate::domain::DEFAULT_ENV_PREFIX;

/// Register ADK agents in Agentspace and manage Agent Engine deployments
/// and OAuth authorizations.
///
/// Parameters are taken from flags, then the JSON config file, then
/// `<PREFIX>_<KEY>` environment variables, then built-in defaults; missing
/// required values are prompted for on a terminal.
#[derive(Parser)]
#[command(
    name = "agentspace-registrar",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Never prompt (also set by the CI or AGENTSPACE_YES environment variables)
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// JSON config file; a missing file is an error [default: ./config.json, optional]
    #[arg(long, global = true, value_name = "PATH", env = "AGENTSPACE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Prefix of the <PREFIX>_<KEY> environment variables
    #[arg(long, global = true, value_name = "PREFIX", default_value = DEFAULT_ENV_PREFIX)]
    pub env_prefix: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage agents in the Agentspace agent gallery
    #[command(subcommand)]
    Registry(commands::registry::RegistryCommand),

    /// Inspect and delete Agent Engine (reasoning engine) deployments
    #[command(subcommand)]
    Engine(commands::engine::EngineCommand),

    /// Manage OAuth authorizations used by agents
    #[command(subcommand)]
    Auth(commands::auth::AuthCommand),

    /// Inspect parameter resolution
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Flags for `AppContext::new`.
    #[must_use]
    pub fn app_flags(&self) -> AppFlags {
        AppFlags {
            output: OutputFlags {
                no_color: self.no_color,
                quiet: self.quiet,
                json: self.json,
            },
            behaviour: BehaviourFlags { yes: self.yes },
            resolution: ResolutionFlags {
                config: self.config.clone(),
                env_prefix: self.env_prefix.clone(),
            },
        }
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns configuration, authentication or remote service errors from
    /// the command.
    pub fn run(self) -> Result<ExitCode> {
        let app = AppContext::new(&self.app_flags())?;
        match &self.command {
            Command::Registry(cmd) => commands::registry::run(&app, cmd),
            Command::Engine(cmd) => commands::engine::run(&app, cmd),
            Command::Auth(cmd) => commands::auth::run(&app, cmd),
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
