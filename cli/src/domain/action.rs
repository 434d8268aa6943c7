//! Action catalog: which parameters each `(service, action)` pair needs.

use std::fmt;

use crate::domain::error::ConfigError;
use crate::domain::param::ParameterKey;

/// Remote sub-service an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Agentspace agent gallery (Discovery Engine agents).
    Registry,
    /// Vertex AI Agent Engine (reasoning engines).
    Engine,
    /// Discovery Engine OAuth authorizations.
    Auth,
}

impl Service {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registry => "registry",
            Self::Engine => "engine",
            Self::Auth => "auth",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    List,
    Get,
    Update,
    GetByName,
    Delete,
    Refresh,
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::List => "list",
            Self::Get => "get",
            Self::Update => "update",
            Self::GetByName => "get_by_name",
            Self::Delete => "delete",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an action treats a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Must resolve, prompting if needed.
    Required,
    /// Resolves to a default or stays absent.
    Optional,
    /// Part of an update's partial patch: CLI and config file only, empty
    /// means clear, absent means leave unchanged.
    Patch,
}

/// One parameter of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySpec {
    pub key: ParameterKey,
    pub requirement: Requirement,
    pub default: Option<&'static str>,
}

const fn required(key: ParameterKey) -> KeySpec {
    KeySpec {
        key,
        requirement: Requirement::Required,
        default: None,
    }
}

const fn optional(key: ParameterKey) -> KeySpec {
    KeySpec {
        key,
        requirement: Requirement::Optional,
        default: None,
    }
}

const fn defaulted(key: ParameterKey, default: &'static str) -> KeySpec {
    KeySpec {
        key,
        requirement: Requirement::Optional,
        default: Some(default),
    }
}

const fn patch(key: ParameterKey) -> KeySpec {
    KeySpec {
        key,
        requirement: Requirement::Patch,
        default: None,
    }
}

/// Declares the parameters one action requires, accepts, or patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    pub service: Service,
    pub action: Action,
    pub keys: &'static [KeySpec],
}

impl ActionSpec {
    /// Looks up the spec for a `(service, action)` pair.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedAction` when the pair is not in the
    /// catalog.
    pub fn lookup(service: Service, action: Action) -> Result<&'static ActionSpec, ConfigError> {
        CATALOG
            .iter()
            .find(|spec| spec.service == service && spec.action == action)
            .ok_or_else(|| ConfigError::UnsupportedAction {
                service: service.to_string(),
                action: action.to_string(),
            })
    }

    /// All catalogued actions.
    #[must_use]
    pub fn all() -> &'static [ActionSpec] {
        CATALOG
    }

    /// `true` when the action sends a partial patch.
    #[must_use]
    pub fn is_update(&self) -> bool {
        self.keys.iter().any(|k| k.requirement == Requirement::Patch)
    }

    #[must_use]
    pub fn key_spec(&self, key: ParameterKey) -> Option<&KeySpec> {
        self.keys.iter().find(|k| k.key == key)
    }

    /// Keys this action declares as required.
    pub fn required_keys(&self) -> impl Iterator<Item = ParameterKey> + '_ {
        self.keys
            .iter()
            .filter(|k| k.requirement == Requirement::Required)
            .map(|k| k.key)
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

use ParameterKey as K;

const REGISTRY_LOCATION: KeySpec = defaulted(K::ApiLocation, "global");
const REGISTRY_RE_LOCATION: KeySpec = defaulted(K::ReLocation, "global");
const ENGINE_LOCATION: KeySpec = defaulted(K::Location, "us-central1");
const AUTH_LOCATION: KeySpec = defaulted(K::Location, "us");
const AUTH_SCOPES: KeySpec = defaulted(K::Scopes, "email");

static CATALOG: &[ActionSpec] = &[
    // Agent registry
    ActionSpec {
        service: Service::Registry,
        action: Action::Create,
        keys: &[
            required(K::ProjectId),
            required(K::AppId),
            required(K::DisplayName),
            required(K::Description),
            required(K::ToolDescription),
            required(K::AdkDeploymentId),
            REGISTRY_LOCATION,
            REGISTRY_RE_LOCATION,
            optional(K::AuthId),
            optional(K::IconUri),
        ],
    },
    ActionSpec {
        service: Service::Registry,
        action: Action::List,
        keys: &[required(K::ProjectId), required(K::AppId), REGISTRY_LOCATION],
    },
    ActionSpec {
        service: Service::Registry,
        action: Action::Get,
        keys: &[
            required(K::ProjectId),
            required(K::AppId),
            required(K::AgentId),
            REGISTRY_LOCATION,
        ],
    },
    ActionSpec {
        service: Service::Registry,
        action: Action::Update,
        keys: &[
            required(K::ProjectId),
            required(K::AppId),
            required(K::AgentId),
            REGISTRY_LOCATION,
            REGISTRY_RE_LOCATION,
            patch(K::DisplayName),
            patch(K::Description),
            patch(K::ToolDescription),
            patch(K::AdkDeploymentId),
            patch(K::AuthId),
            patch(K::IconUri),
        ],
    },
    ActionSpec {
        service: Service::Registry,
        action: Action::GetByName,
        keys: &[
            required(K::ProjectId),
            required(K::AppId),
            required(K::DisplayName),
            REGISTRY_LOCATION,
        ],
    },
    ActionSpec {
        service: Service::Registry,
        action: Action::Delete,
        keys: &[
            required(K::ProjectId),
            required(K::AppId),
            required(K::AgentId),
            REGISTRY_LOCATION,
        ],
    },
    // Agent engine
    ActionSpec {
        service: Service::Engine,
        action: Action::List,
        keys: &[required(K::ProjectId), ENGINE_LOCATION],
    },
    ActionSpec {
        service: Service::Engine,
        action: Action::Get,
        keys: &[
            required(K::ProjectId),
            required(K::ReResourceId),
            ENGINE_LOCATION,
        ],
    },
    ActionSpec {
        service: Service::Engine,
        action: Action::GetByName,
        keys: &[
            required(K::ProjectId),
            required(K::ReDisplayName),
            ENGINE_LOCATION,
        ],
    },
    ActionSpec {
        service: Service::Engine,
        action: Action::Delete,
        keys: &[
            required(K::ProjectId),
            required(K::ReResourceName),
            ENGINE_LOCATION,
        ],
    },
    // Authorizations
    ActionSpec {
        service: Service::Auth,
        action: Action::Create,
        keys: &[
            required(K::ProjectId),
            required(K::OauthClientId),
            required(K::OauthClientSecret),
            AUTH_LOCATION,
            AUTH_SCOPES,
            optional(K::AuthorizationId),
        ],
    },
    ActionSpec {
        service: Service::Auth,
        action: Action::List,
        keys: &[required(K::ProjectId), AUTH_LOCATION],
    },
    ActionSpec {
        service: Service::Auth,
        action: Action::Delete,
        keys: &[
            required(K::ProjectId),
            required(K::AuthorizationId),
            AUTH_LOCATION,
        ],
    },
    ActionSpec {
        service: Service::Auth,
        action: Action::Refresh,
        keys: &[
            required(K::ProjectId),
            required(K::AuthorizationId),
            required(K::OauthClientId),
            required(K::OauthClientSecret),
            AUTH_LOCATION,
            AUTH_SCOPES,
            optional(K::NewAuthorizationId),
        ],
    },
];
