//! `agentspace-registrar auth`: manage OAuth authorizations for agents.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::authorization;
use crate::commands::{ForceArgs, LocationArgs, OauthArgs, ProjectArgs, put};
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
pub struct CreateArgs {
    /// Authorization ID [default: a generated UUID]
    #[arg(value_name = "AUTHORIZATION_ID")]
    pub authorization_id: Option<String>,
    #[command(flatten)]
    pub scope: ScopeArgs,
    #[command(flatten)]
    pub oauth: OauthArgs,
}

#[derive(Args, Clone, Debug, Default)]
pub struct DeleteArgs {
    /// Authorization ID
    #[arg(value_name = "AUTHORIZATION_ID")]
    pub authorization_id: Option<String>,
    #[command(flatten)]
    pub scope: ScopeArgs,
    #[command(flatten)]
    pub force: ForceArgs,
}

#[derive(Args, Clone, Debug, Default)]
pub struct RefreshArgs {
    /// Authorization ID to replace
    #[arg(value_name = "OLD_AUTHORIZATION_ID")]
    pub authorization_id: Option<String>,

    /// ID for the replacement [default: a generated UUID]
    #[arg(long, value_name = "ID")]
    pub new_authorization_id: Option<String>,

    #[command(flatten)]
    pub scope: ScopeArgs,
    #[command(flatten)]
    pub oauth: OauthArgs,
}

/// Auth subcommands.
#[derive(Subcommand)]
pub enum AuthCommand {
    /// Create a server-side OAuth authorization
    Create(CreateArgs),
    /// List authorizations
    List(ScopeArgs),
    /// Delete an authorization
    Delete(DeleteArgs),
    /// Replace an authorization with a new one and delete the old
    Refresh(RefreshArgs),
}

impl AuthCommand {
    /// Action and CLI values of this invocation.
    #[must_use]
    pub fn cli_args(&self) -> (Action, CliArgs) {
        let mut args = CliArgs::new();
        let action = match self {
            Self::Create(a) => {
                a.scope.collect(&mut args);
                a.oauth.collect(&mut args);
                put(&mut args, K::AuthorizationId, a.authorization_id.as_ref());
                Action::Create
            }
            Self::List(a) => {
                a.collect(&mut args);
                Action::List
            }
            Self::Delete(a) => {
                a.scope.collect(&mut args);
                put(&mut args, K::AuthorizationId, a.authorization_id.as_ref());
                Action::Delete
            }
            Self::Refresh(a) => {
                a.scope.collect(&mut args);
                a.oauth.collect(&mut args);
                put(&mut args, K::AuthorizationId, a.authorization_id.as_ref());
                put(
                    &mut args,
                    K::NewAuthorizationId,
                    a.new_authorization_id.as_ref(),
                );
                Action::Refresh
            }
        };
        (action, args)
    }
}

/// Run an auth subcommand.
///
/// # Errors
///
/// Returns configuration, authentication or remote service errors.
pub fn run(app: &AppContext, cmd: &AuthCommand) -> Result<ExitCode> {
    let (action, cli) = cmd.cli_args();
    let (_, resolved) = app.resolve(Service::Auth, action, &cli)?;
    let client = app.client(&resolved)?;
    let reporter = app.reporter();
    let renderer = app.renderer();

    match cmd {
        AuthCommand::Create(_) => {
            let created = authorization::create_authorization(&client, &resolved, &reporter)?;
            renderer.authorization(&created)?;
        }
        AuthCommand::List(_) => {
            renderer.authorization_list(&authorization::list_authorizations(&client, &resolved)?)?;
        }
        AuthCommand::Delete(args) => {
            let id = resolved.require(K::AuthorizationId)?;
            if !app.confirm_delete(&format!("authorization {id}"), args.force.force)? {
                app.output.info("Cancelled.");
                return Ok(ExitCode::SUCCESS);
            }
            let response = authorization::delete_authorization(&client, &resolved, &reporter)?;
            renderer.message(&response)?;
        }
        AuthCommand::Refresh(_) => {
            let outcome = authorization::refresh_authorization(&client, &resolved, &reporter)?;
            renderer.refresh(&outcome)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
