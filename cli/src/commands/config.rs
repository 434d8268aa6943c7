//! `agentspace-registrar config`: inspect parameter resolution.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use owo_colors::OwoColorize as _;

use crate::app::AppContext;
use crate::domain::{Action, CliArgs, ConfigError, ParameterKey, Service};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ServiceArg {
    Registry,
    Engine,
    Auth,
}

impl From<ServiceArg> for Service {
    fn from(arg: ServiceArg) -> Self {
        match arg {
            ServiceArg::Registry => Self::Registry,
            ServiceArg::Engine => Self::Engine,
            ServiceArg::Auth => Self::Auth,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ActionArg {
    Create,
    List,
    Get,
    Update,
    #[value(alias = "get_by_name", alias = "list-by-name")]
    GetByName,
    Delete,
    Refresh,
}

impl From<ActionArg> for Action {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Create => Self::Create,
            ActionArg::List => Self::List,
            ActionArg::Get => Self::Get,
            ActionArg::Update => Self::Update,
            ActionArg::GetByName => Self::GetByName,
            ActionArg::Delete => Self::Delete,
            ActionArg::Refresh => Self::Refresh,
        }
    }
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the resolved parameters of an action and where each came from
    Show {
        /// Target service
        service: ServiceArg,
        /// Action of that service
        action: ActionArg,
        /// Simulate a CLI value, e.g. `--set display_name=Helper`
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
    /// List recognized parameter keys with their config and environment names
    Keys,
}

/// Run the config command.
///
/// # Errors
///
/// Returns a configuration error for bad `--set` entries, unsupported
/// actions, or resolution failures.
pub fn run(app: &AppContext, cmd: &ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show {
            service,
            action,
            set,
        } => show(app, (*service).into(), (*action).into(), set),
        ConfigCommand::Keys => keys(app),
    }
}

/// Parses `KEY=VALUE` pairs into CLI values.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEntry` for entries without `=` and
/// `ConfigError::UnknownKey` for unrecognized keys.
pub fn parse_set(entries: &[String]) -> Result<CliArgs> {
    let mut args = CliArgs::new();
    for entry in entries {
        let Some((key, value)) = entry.split_once('=') else {
            return Err(ConfigError::InvalidEntry {
                key: entry.clone(),
                reason: "expected KEY=VALUE".to_string(),
            }
            .into());
        };
        let key: ParameterKey = key.trim().parse()?;
        args.insert(key, value.to_string());
    }
    Ok(args)
}

fn show(app: &AppContext, service: Service, action: Action, set: &[String]) -> Result<ExitCode> {
    let cli = parse_set(set)?;
    let (spec, resolved) = app.resolve(service, action, &cli)?;
    app.renderer()
        .resolved(spec, &resolved, app.config_location.path())?;
    Ok(ExitCode::SUCCESS)
}

fn keys(app: &AppContext) -> Result<ExitCode> {
    if app.is_json() {
        let keys: Vec<_> = ParameterKey::ALL
            .iter()
            .map(|k| {
                let mut env = vec![k.env_var(&app.env_prefix)];
                env.extend(k.env_aliases().iter().map(|a| (*a).to_string()));
                let mut config = vec![k.as_str()];
                config.extend(k.config_aliases());
                serde_json::json!({
                    "key": k.as_str(),
                    "flag": k.flag(),
                    "config": config,
                    "env": env,
                    "secret": k.is_secret(),
                })
            })
            .collect();
        crate::output::JsonRenderer.render(&keys)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "  {:<22} {:<38} {}",
        "KEY".style(app.output.styles.bold),
        "ENVIRONMENT".style(app.output.styles.bold),
        "CONFIG ALIASES".style(app.output.styles.bold)
    );
    for key in ParameterKey::ALL {
        let mut env = key.env_var(&app.env_prefix);
        for alias in key.env_aliases() {
            env.push_str(", ");
            env.push_str(alias);
        }
        let aliases = key.config_aliases().join(", ");
        let marker = if key.is_secret() { " (secret)" } else { "" };
        println!(
            "  {:<22} {:<38} {}{marker}",
            key.as_str(),
            env,
            if aliases.is_empty() { "-" } else { aliases.as_str() }
        );
    }
    Ok(ExitCode::SUCCESS)
}
