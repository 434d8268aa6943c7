//! Command implementations
//!
//! Every handler turns its clap arguments into `CliArgs`, lets `AppContext`
//! resolve the remaining parameters, calls one application service and
//! renders the result.

pub mod auth;
pub mod config;
pub mod engine;
pub mod registry;
pub mod version;

use clap::Args;

use crate::domain::{CliArgs, ParameterKey};

/// Records a supplied flag. `None` (flag absent) leaves the key to lower
/// precedence sources.
pub(crate) fn put(args: &mut CliArgs, key: ParameterKey, value: Option<&String>) {
    if let Some(value) = value {
        args.insert(key, value.clone());
    }
}

/// `--project-id` shared by every command.
#[derive(Args, Clone, Debug, Default)]
pub struct ProjectArgs {
    /// Google Cloud project ID (also used as the quota project)
    #[arg(long, value_name = "ID")]
    pub project_id: Option<String>,
}

impl ProjectArgs {
    pub(crate) fn collect(&self, args: &mut CliArgs) {
        put(args, ParameterKey::ProjectId, self.project_id.as_ref());
    }
}

/// `--location` for engine and authorization commands.
#[derive(Args, Clone, Debug, Default)]
pub struct LocationArgs {
    /// Location of the resources [default: us-central1 for engines, us for authorizations]
    #[arg(long, value_name = "LOCATION")]
    pub location: Option<String>,
}

impl LocationArgs {
    pub(crate) fn collect(&self, args: &mut CliArgs) {
        put(args, ParameterKey::Location, self.location.as_ref());
    }
}

/// OAuth client settings shared by `auth create` and `auth refresh`.
#[derive(Args, Clone, Debug, Default)]
pub struct OauthArgs {
    /// OAuth client ID (also read from OAUTH_CLIENT_ID)
    #[arg(long, value_name = "ID")]
    pub oauth_client_id: Option<String>,

    /// OAuth client secret (also read from OAUTH_CLIENT_SECRET)
    #[arg(long, value_name = "SECRET")]
    pub oauth_client_secret: Option<String>,

    /// OAuth scopes; repeat or separate with commas [default: email]
    #[arg(long, value_name = "SCOPE", value_delimiter = ',')]
    pub scopes: Vec<String>,
}

impl OauthArgs {
    pub(crate) fn collect(&self, args: &mut CliArgs) {
        put(args, ParameterKey::OauthClientId, self.oauth_client_id.as_ref());
        put(
            args,
            ParameterKey::OauthClientSecret,
            self.oauth_client_secret.as_ref(),
        );
        let scopes: Vec<&str> = self
            .scopes
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if !scopes.is_empty() {
            args.insert(ParameterKey::Scopes, scopes.join(","));
        }
    }
}

/// `--force` for delete commands.
#[derive(Args, Clone, Debug, Default)]
pub struct ForceArgs {
    /// Delete without asking for confirmation
    #[arg(short, long)]
    pub force: bool,
}
