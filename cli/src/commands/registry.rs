//! `agentspace-registrar registry`: manage agents in the Agentspace gallery.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::registry;
use crate::commands::{ForceArgs, ProjectArgs, put};
use crate::domain::{Action, CliArgs, ParameterKey as K, Service};

/// `--app-id` / `--api-location` shared by registry commands.
#[derive(Args, Clone, Debug, Default)]
pub struct AppArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Discovery Engine app (engine) ID
    #[arg(long, value_name = "ID")]
    pub app_id: Option<String>,

    /// Discovery Engine API location [default: global]
    #[arg(long, value_name = "LOCATION")]
    pub api_location: Option<String>,
}

impl AppArgs {
    fn collect(&self, args: &mut CliArgs) {
        self.project.collect(args);
        put(args, K::AppId, self.app_id.as_ref());
        put(args, K::ApiLocation, self.api_location.as_ref());
    }
}

/// Agent definition fields. On `create` they are required; on `update` only
/// the supplied ones are patched and an empty value clears the field.
#[derive(Args, Clone, Debug, Default)]
pub struct AgentFieldArgs {
    /// Display name shown in the agent gallery
    #[arg(long, value_name = "NAME")]
    pub display_name: Option<String>,

    /// Agent description
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Description the assistant uses to decide when to call the agent
    #[arg(long, value_name = "TEXT")]
    pub tool_description: Option<String>,

    /// Reasoning Engine ID of the deployed ADK agent
    #[arg(long, value_name = "ID")]
    pub adk_deployment_id: Option<String>,

    /// Authorization ID to attach
    #[arg(long, value_name = "ID")]
    pub auth_id: Option<String>,

    /// Icon URI
    #[arg(long, value_name = "URI")]
    pub icon_uri: Option<String>,

    /// Location of the reasoning engine [default: global]
    #[arg(long, value_name = "LOCATION")]
    pub re_location: Option<String>,
}

impl AgentFieldArgs {
    fn collect(&self, args: &mut CliArgs) {
        put(args, K::DisplayName, self.display_name.as_ref());
        put(args, K::Description, self.description.as_ref());
        put(args, K::ToolDescription, self.tool_description.as_ref());
        put(args, K::AdkDeploymentId, self.adk_deployment_id.as_ref());
        put(args, K::AuthId, self.auth_id.as_ref());
        put(args, K::IconUri, self.icon_uri.as_ref());
        put(args, K::ReLocation, self.re_location.as_ref());
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct CreateArgs {
    #[command(flatten)]
    pub app: AppArgs,
    #[command(flatten)]
    pub fields: AgentFieldArgs,
}

#[derive(Args, Clone, Debug, Default)]
pub struct AgentArgs {
    /// Agent ID (last segment of the agent resource name)
    #[arg(value_name = "AGENT_ID")]
    pub agent_id: Option<String>,
    #[command(flatten)]
    pub app: AppArgs,
}

#[derive(Args, Clone, Debug, Default)]
pub struct UpdateArgs {
    /// Agent ID (last segment of the agent resource name)
    #[arg(value_name = "AGENT_ID")]
    pub agent_id: Option<String>,
    #[command(flatten)]
    pub app: AppArgs,
    #[command(flatten)]
    pub fields: AgentFieldArgs,
}

#[derive(Args, Clone, Debug, Default)]
pub struct GetByNameArgs {
    /// Exact display name to look up
    #[arg(value_name = "DISPLAY_NAME")]
    pub display_name: Option<String>,
    #[command(flatten)]
    pub app: AppArgs,
}

#[derive(Args, Clone, Debug, Default)]
pub struct DeleteArgs {
    /// Agent ID (last segment of the agent resource name)
    #[arg(value_name = "AGENT_ID")]
    pub agent_id: Option<String>,
    #[command(flatten)]
    pub app: AppArgs,
    #[command(flatten)]
    pub force: ForceArgs,
}

/// Registry subcommands.
#[derive(Subcommand)]
pub enum RegistryCommand {
    /// Register an agent backed by a deployed ADK reasoning engine
    Create(CreateArgs),
    /// List agents registered in an app
    List(AppArgs),
    /// Show one agent
    Get(AgentArgs),
    /// Patch fields of an agent; only supplied fields change
    Update(UpdateArgs),
    /// Find agents by exact display name
    GetByName(GetByNameArgs),
    /// Remove an agent
    Delete(DeleteArgs),
}

impl RegistryCommand {
    /// Action and CLI values of this invocation.
    #[must_use]
    pub fn cli_args(&self) -> (Action, CliArgs) {
        let mut args = CliArgs::new();
        let action = match self {
            Self::Create(a) => {
                a.app.collect(&mut args);
                a.fields.collect(&mut args);
                Action::Create
            }
            Self::List(a) => {
                a.collect(&mut args);
                Action::List
            }
            Self::Get(a) => {
                a.app.collect(&mut args);
                put(&mut args, K::AgentId, a.agent_id.as_ref());
                Action::Get
            }
            Self::Update(a) => {
                a.app.collect(&mut args);
                a.fields.collect(&mut args);
                put(&mut args, K::AgentId, a.agent_id.as_ref());
                Action::Update
            }
            Self::GetByName(a) => {
                a.app.collect(&mut args);
                put(&mut args, K::DisplayName, a.display_name.as_ref());
                Action::GetByName
            }
            Self::Delete(a) => {
                a.app.collect(&mut args);
                put(&mut args, K::AgentId, a.agent_id.as_ref());
                Action::Delete
            }
        };
        (action, args)
    }
}

/// Run a registry subcommand.
///
/// # Errors
///
/// Returns configuration, authentication or remote service errors.
pub fn run(app: &AppContext, cmd: &RegistryCommand) -> Result<ExitCode> {
    let (action, cli) = cmd.cli_args();
    let (_, resolved) = app.resolve(Service::Registry, action, &cli)?;
    let client = app.client(&resolved)?;
    let reporter = app.reporter();
    let renderer = app.renderer();

    match cmd {
        RegistryCommand::Create(_) => {
            renderer.agent(&registry::create_agent(&client, &resolved, &reporter)?)?;
        }
        RegistryCommand::List(_) => {
            renderer.agent_list(&registry::list_agents(&client, &resolved)?)?;
        }
        RegistryCommand::Get(_) => {
            renderer.agent(&registry::get_agent(&client, &resolved)?)?;
        }
        RegistryCommand::Update(_) => {
            renderer.agent(&registry::update_agent(&client, &resolved, &reporter)?)?;
        }
        RegistryCommand::GetByName(_) => {
            let list = registry::get_agents_by_name(&client, &resolved)?;
            renderer.agent_list(&list)?;
        }
        RegistryCommand::Delete(args) => {
            let id = resolved.require(K::AgentId)?;
            if !app.confirm_delete(&format!("agent {id}"), args.force.force)? {
                app.output.info("Cancelled.");
                return Ok(ExitCode::SUCCESS);
            }
            renderer.message(&registry::delete_agent(&client, &resolved, &reporter)?)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
