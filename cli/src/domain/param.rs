//! Parameter keys and the sources they can be resolved from.
//!
//! Pure types only: no I/O.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ConfigError;

/// Prefix for environment variables when `--env-prefix` is not given.
pub const DEFAULT_ENV_PREFIX: &str = "AGENTSPACE";

/// A named configuration field recognized by one or more actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParameterKey {
    ProjectId,
    AppId,
    ApiLocation,
    ReLocation,
    Location,
    DisplayName,
    Description,
    ToolDescription,
    AdkDeploymentId,
    AuthId,
    IconUri,
    AgentId,
    ReResourceId,
    ReResourceName,
    ReDisplayName,
    AuthorizationId,
    NewAuthorizationId,
    Scopes,
    OauthClientId,
    OauthClientSecret,
}

impl ParameterKey {
    pub const ALL: [ParameterKey; 20] = [
        Self::ProjectId,
        Self::AppId,
        Self::ApiLocation,
        Self::ReLocation,
        Self::Location,
        Self::DisplayName,
        Self::Description,
        Self::ToolDescription,
        Self::AdkDeploymentId,
        Self::AuthId,
        Self::IconUri,
        Self::AgentId,
        Self::ReResourceId,
        Self::ReResourceName,
        Self::ReDisplayName,
        Self::AuthorizationId,
        Self::NewAuthorizationId,
        Self::Scopes,
        Self::OauthClientId,
        Self::OauthClientSecret,
    ];

    /// Canonical snake_case name, used as the primary config-file key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProjectId => "project_id",
            Self::AppId => "app_id",
            Self::ApiLocation => "api_location",
            Self::ReLocation => "re_location",
            Self::Location => "location",
            Self::DisplayName => "display_name",
            Self::Description => "description",
            Self::ToolDescription => "tool_description",
            Self::AdkDeploymentId => "adk_deployment_id",
            Self::AuthId => "auth_id",
            Self::IconUri => "icon_uri",
            Self::AgentId => "agent_id",
            Self::ReResourceId => "re_resource_id",
            Self::ReResourceName => "re_resource_name",
            Self::ReDisplayName => "re_display_name",
            Self::AuthorizationId => "authorization_id",
            Self::NewAuthorizationId => "new_authorization_id",
            Self::Scopes => "scopes",
            Self::OauthClientId => "oauth_client_id",
            Self::OauthClientSecret => "oauth_client_secret",
        }
    }

    /// Additional config-file keys accepted for this parameter, checked after
    /// the canonical name.
    #[must_use]
    pub fn config_aliases(self) -> &'static [&'static str] {
        match self {
            Self::DisplayName => &["ars_display_name"],
            _ => &[],
        }
    }

    /// Unprefixed environment variables accepted after `<PREFIX>_<KEY>`.
    #[must_use]
    pub fn env_aliases(self) -> &'static [&'static str] {
        match self {
            Self::OauthClientId => &["OAUTH_CLIENT_ID"],
            Self::OauthClientSecret => &["OAUTH_CLIENT_SECRET"],
            _ => &[],
        }
    }

    /// Environment variable name for this key: `<PREFIX>_<KEY_UPPER>`.
    #[must_use]
    pub fn env_var(self, prefix: &str) -> String {
        let key = self.as_str().to_ascii_uppercase();
        if prefix.is_empty() {
            key
        } else {
            format!("{prefix}_{key}")
        }
    }

    /// Long CLI flag carrying this key, e.g. `--project-id`.
    #[must_use]
    pub fn flag(self) -> String {
        format!("--{}", self.as_str().replace('_', "-"))
    }

    /// Human label used when prompting.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ProjectId => "Google Cloud project ID",
            Self::AppId => "Discovery Engine app ID",
            Self::ApiLocation => "Discovery Engine API location",
            Self::ReLocation => "Reasoning Engine location",
            Self::Location => "Location",
            Self::DisplayName => "Agent display name",
            Self::Description => "Agent description",
            Self::ToolDescription => "Tool description",
            Self::AdkDeploymentId => "Reasoning Engine ID of the ADK deployment",
            Self::AuthId => "Authorization ID",
            Self::IconUri => "Icon URI",
            Self::AgentId => "Agent ID",
            Self::ReResourceId => "Reasoning Engine resource ID",
            Self::ReResourceName => "Reasoning Engine resource name",
            Self::ReDisplayName => "Reasoning Engine display name",
            Self::AuthorizationId => "Authorization ID",
            Self::NewAuthorizationId => "New authorization ID",
            Self::Scopes => "OAuth scopes",
            Self::OauthClientId => "OAuth client ID",
            Self::OauthClientSecret => "OAuth client secret",
        }
    }

    /// Secret values are masked in output and never logged.
    #[must_use]
    pub fn is_secret(self) -> bool {
        matches!(self, Self::OauthClientSecret)
    }

    /// Looks up a key by a config-file name (canonical or alias).
    #[must_use]
    pub fn from_config_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == name || k.config_aliases().contains(&name))
    }
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownKey {
                key: s.to_string(),
                valid: Self::ALL.map(Self::as_str).join(", "),
            })
    }
}

/// Where a resolved value came from, in precedence order (highest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParameterSource {
    CliArgument,
    ConfigFile,
    EnvironmentVariable,
    DefaultValue,
    InteractivePrompt,
}

impl ParameterSource {
    /// Probe order used by the resolver.
    pub const PRECEDENCE: [ParameterSource; 5] = [
        Self::CliArgument,
        Self::ConfigFile,
        Self::EnvironmentVariable,
        Self::DefaultValue,
        Self::InteractivePrompt,
    ];

    /// Sources that may feed a partial patch on update actions.
    pub const PATCH_SOURCES: [ParameterSource; 2] = [Self::CliArgument, Self::ConfigFile];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CliArgument => "cli",
            Self::ConfigFile => "config file",
            Self::EnvironmentVariable => "environment",
            Self::DefaultValue => "default",
            Self::InteractivePrompt => "prompt",
        }
    }
}

impl fmt::Display for ParameterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
