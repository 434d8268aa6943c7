//! `agentspace-registrar engine`: inspect and delete Agent Engine deployments.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::engine;
use crate::commands::{ForceArgs, LocationArgs, ProjectArgs, put};
use crate::domain::{Action, CliArgs, ParameterKey as K, Service};

#[derive(Args, Clone, Debug, Default)]
pub struct ScopeArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
    #[command(flatten)]
    pub location: LocationArgs,
}

impl ScopeArgs {
    fn collect(&self, args: &mut CliArgs) {
        self.project.collect(args);
        self.location.collect(args);
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct GetArgs {
    /// Reasoning engine ID (last segment of its resource name)
    #[arg(value_name = "RESOURCE_ID")]
    pub re_resource_id: Option<String>,
    #[command(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Args, Clone, Debug, Default)]
pub struct ListByNameArgs {
    /// Exact display name to look up
    #[arg(value_name = "DISPLAY_NAME")]
    pub re_display_name: Option<String>,
    #[command(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Args, Clone, Debug, Default)]
pub struct DeleteArgs {
    /// Full resource name: projects/<p>/locations/<l>/reasoningEngines/<id>
    #[arg(value_name = "RESOURCE_NAME")]
    pub re_resource_name: Option<String>,
    #[command(flatten)]
    pub scope: ScopeArgs,
    #[command(flatten)]
    pub force: ForceArgs,
}

/// Engine subcommands.
#[derive(Subcommand)]
pub enum EngineCommand {
    /// List deployed reasoning engines
    List(ScopeArgs),
    /// Show one reasoning engine
    Get(GetArgs),
    /// Find reasoning engines by exact display name
    ListByName(ListByNameArgs),
    /// Delete a reasoning engine
    Delete(DeleteArgs),
}

impl EngineCommand {
    /// Action and CLI values of this invocation.
    #[must_use]
    pub fn cli_args(&self) -> (Action, CliArgs) {
        let mut args = CliArgs::new();
        let action = match self {
            Self::List(a) => {
                a.collect(&mut args);
                Action::List
            }
            Self::Get(a) => {
                a.scope.collect(&mut args);
                put(&mut args, K::ReResourceId, a.re_resource_id.as_ref());
                Action::Get
            }
            Self::ListByName(a) => {
                a.scope.collect(&mut args);
                put(&mut args, K::ReDisplayName, a.re_display_name.as_ref());
                Action::GetByName
            }
            Self::Delete(a) => {
                a.scope.collect(&mut args);
                put(&mut args, K::ReResourceName, a.re_resource_name.as_ref());
                Action::Delete
            }
        };
        (action, args)
    }
}

/// Run an engine subcommand.
///
/// # Errors
///
/// Returns configuration, authentication or remote service errors.
pub fn run(app: &AppContext, cmd: &EngineCommand) -> Result<ExitCode> {
    let (action, cli) = cmd.cli_args();
    let (_, resolved) = app.resolve(Service::Engine, action, &cli)?;
    let client = app.client(&resolved)?;
    let renderer = app.renderer();

    match cmd {
        EngineCommand::List(_) => renderer.engine_list(&engine::list_engines(&client, &resolved)?)?,
        EngineCommand::Get(_) => renderer.engine_list(&engine::get_engine(&client, &resolved)?)?,
        EngineCommand::ListByName(_) => {
            renderer.engine_list(&engine::list_engines_by_name(&client, &resolved)?)?;
        }
        EngineCommand::Delete(args) => {
            let name = resolved.require(K::ReResourceName)?;
            if !app.confirm_delete(&format!("reasoning engine {name}"), args.force.force)? {
                app.output.info("Cancelled.");
                return Ok(ExitCode::SUCCESS);
            }
            let reporter = app.reporter();
            renderer.message(&engine::delete_engine(&client, &resolved, &reporter)?)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
