//! Endpoint URLs, resource names and request bodies for the remote APIs.
//!
//! Pure functions only: no I/O, no network access.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use registrar_types::{
    AdkAgentDefinition, Agent, AgentIcon, Authorization, ProvisionedReasoningEngine,
    ServerSideOauth2, ToolSettings,
};

use crate::domain::error::ConfigError;
use crate::domain::param::ParameterKey;
use crate::domain::resolved::FieldUpdate;

pub const DEFAULT_COLLECTION: &str = "default_collection";
pub const DEFAULT_ASSISTANT: &str = "default_assistant";
pub const GOOGLE_OAUTH_AUTHORIZE_URI: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_OAUTH_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

#[allow(clippy::expect_used)] // pattern is a compile-time constant
static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid regex"));

#[allow(clippy::expect_used)] // pattern is a compile-time constant
static ENGINE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^projects/[^/]+/locations/([^/]+)/reasoningEngines/[^/]+$").expect("valid regex")
});

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a value that is interpolated as a single URL path segment
/// (project, app, agent, location and authorization ids).
///
/// # Errors
///
/// Returns an error if the value is empty or contains characters that would
/// change the request path.
pub fn validate_segment(key: ParameterKey, value: &str) -> Result<()> {
    if !SEGMENT_RE.is_match(value) {
        return Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "Expected letters, digits, '.', '_' or '-' (no slashes or spaces).".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Validates a full reasoning-engine resource name and returns its location.
///
/// # Errors
///
/// Returns an error unless the name has the form
/// `projects/*/locations/*/reasoningEngines/*` with a plain location segment.
pub fn validate_engine_resource_name(value: &str) -> Result<&str> {
    let Some(location) = ENGINE_NAME_RE
        .captures(value)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    else {
        return Err(ConfigError::InvalidValue {
            key: ParameterKey::ReResourceName,
            value: value.to_string(),
            reason: "Expected projects/<project>/locations/<location>/reasoningEngines/<id>."
                .to_string(),
        }
        .into());
    };
    validate_segment(ParameterKey::Location, location)?;
    Ok(location)
}

/// Splits a scopes value (`"email, profile openid"`) into individual scopes.
#[must_use]
pub fn parse_scopes(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ── Resource names ───────────────────────────────────────────────────────────

#[must_use]
pub fn reasoning_engine_name(project_id: &str, location: &str, engine_id: &str) -> String {
    format!("projects/{project_id}/locations/{location}/reasoningEngines/{engine_id}")
}

#[must_use]
pub fn authorization_name(project_id: &str, location: &str, authorization_id: &str) -> String {
    format!("projects/{project_id}/locations/{location}/authorizations/{authorization_id}")
}

// ── Endpoints ────────────────────────────────────────────────────────────────

/// Location parameters of an agent registry collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryScope {
    pub project_id: String,
    pub app_id: String,
    pub api_location: String,
}

impl RegistryScope {
    /// `https://{prefix}discoveryengine.googleapis.com/v1alpha/.../agents`,
    /// where `prefix` is empty for `global` and `{location}-` otherwise.
    #[must_use]
    pub fn agents_url(&self) -> String {
        let prefix = if self.api_location == "global" {
            String::new()
        } else {
            format!("{}-", self.api_location)
        };
        format!(
            "https://{prefix}discoveryengine.googleapis.com/v1alpha/projects/{}/locations/{}/collections/{DEFAULT_COLLECTION}/engines/{}/assistants/{DEFAULT_ASSISTANT}/agents",
            self.project_id, self.api_location, self.app_id
        )
    }

    #[must_use]
    pub fn agent_url(&self, agent_id: &str) -> String {
        format!("{}/{agent_id}", self.agents_url())
    }
}

/// `https://{location}-aiplatform.googleapis.com/v1`.
#[must_use]
pub fn aiplatform_base(location: &str) -> String {
    format!("https://{location}-aiplatform.googleapis.com/v1")
}

#[must_use]
pub fn reasoning_engines_url(project_id: &str, location: &str) -> String {
    format!(
        "{}/projects/{project_id}/locations/{location}/reasoningEngines",
        aiplatform_base(location)
    )
}

/// Discovery Engine host for authorization calls: multi-region `us`/`eu`
/// locations use a regional endpoint, everything else the global one.
#[must_use]
pub fn authorization_host(location: &str) -> String {
    match location.get(..2) {
        Some(region @ ("us" | "eu")) => format!("{region}-discoveryengine.googleapis.com"),
        _ => "discoveryengine.googleapis.com".to_string(),
    }
}

#[must_use]
pub fn authorizations_url(project_id: &str, location: &str) -> String {
    format!(
        "https://{}/v1alpha/projects/{project_id}/locations/{location}/authorizations",
        authorization_host(location)
    )
}

/// `displayName="..."` style filter with embedded quotes escaped.
#[must_use]
pub fn display_name_filter(field: &str, display_name: &str) -> String {
    let escaped = display_name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("{field}=\"{escaped}\"")
}

// ── Registry bodies ──────────────────────────────────────────────────────────

/// Inputs for registering a new agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAgent {
    pub display_name: String,
    pub description: String,
    pub tool_description: String,
    pub adk_deployment_id: String,
    pub auth_id: Option<String>,
    pub icon_uri: Option<String>,
    pub re_location: String,
}

/// Body for `POST .../agents`.
#[must_use]
pub fn create_agent_body(scope: &RegistryScope, agent: &NewAgent) -> Agent {
    let authorizations = agent
        .auth_id
        .as_deref()
        .map(|id| vec![authorization_name(&scope.project_id, &scope.api_location, id)])
        .unwrap_or_default();

    Agent {
        display_name: Some(agent.display_name.clone()),
        description: Some(agent.description.clone()),
        icon: agent.icon_uri.as_ref().map(|uri| AgentIcon {
            uri: Some(uri.clone()),
        }),
        adk_agent_definition: Some(AdkAgentDefinition {
            tool_settings: Some(ToolSettings {
                tool_description: Some(agent.tool_description.clone()),
            }),
            provisioned_reasoning_engine: Some(ProvisionedReasoningEngine {
                reasoning_engine: Some(reasoning_engine_name(
                    &scope.project_id,
                    &agent.re_location,
                    &agent.adk_deployment_id,
                )),
            }),
            authorizations: Some(authorizations),
            ..AdkAgentDefinition::default()
        }),
        ..Agent::default()
    }
}

/// Partial update of a registered agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentPatch {
    pub display_name: FieldUpdate,
    pub description: FieldUpdate,
    pub tool_description: FieldUpdate,
    pub adk_deployment_id: FieldUpdate,
    pub auth_id: FieldUpdate,
    pub icon_uri: FieldUpdate,
}

/// A patch body together with its `updateMask`.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchRequest {
    pub body: Agent,
    pub update_mask: Vec<&'static str>,
}

impl PatchRequest {
    #[must_use]
    pub fn mask_param(&self) -> String {
        self.update_mask.join(",")
    }
}

fn scalar(update: &FieldUpdate) -> Option<String> {
    match update {
        FieldUpdate::Keep => None,
        FieldUpdate::Clear => Some(String::new()),
        FieldUpdate::Set(v) => Some(v.clone()),
    }
}

impl AgentPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            &self.display_name,
            &self.description,
            &self.tool_description,
            &self.adk_deployment_id,
            &self.auth_id,
            &self.icon_uri,
        ]
        .iter()
        .all(|u| u.is_keep())
    }

    /// Builds the sparse body and update mask. Fields left as `Keep` appear in
    /// neither.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyPatch` when every field is `Keep`.
    pub fn to_request(
        &self,
        scope: &RegistryScope,
        re_location: &str,
    ) -> Result<PatchRequest, ConfigError> {
        if self.is_empty() {
            return Err(ConfigError::EmptyPatch);
        }

        let mut body = Agent::default();
        let mut mask = Vec::new();
        let mut adk = AdkAgentDefinition::default();

        if let Some(v) = scalar(&self.display_name) {
            body.display_name = Some(v);
            mask.push("displayName");
        }
        if let Some(v) = scalar(&self.description) {
            body.description = Some(v);
            mask.push("description");
        }
        if let Some(v) = scalar(&self.tool_description) {
            adk.tool_settings = Some(ToolSettings {
                tool_description: Some(v),
            });
            mask.push("adk_agent_definition.tool_settings.tool_description");
        }
        if let Some(v) = scalar(&self.adk_deployment_id) {
            let engine = if v.is_empty() {
                v
            } else {
                reasoning_engine_name(&scope.project_id, re_location, &v)
            };
            adk.provisioned_reasoning_engine = Some(ProvisionedReasoningEngine {
                reasoning_engine: Some(engine),
            });
            mask.push("adk_agent_definition.provisioned_reasoning_engine.reasoning_engine");
        }
        match &self.auth_id {
            FieldUpdate::Keep => {}
            FieldUpdate::Clear => {
                adk.authorizations = Some(Vec::new());
                mask.push("adk_agent_definition.authorizations");
            }
            FieldUpdate::Set(id) => {
                adk.authorizations = Some(vec![authorization_name(
                    &scope.project_id,
                    &scope.api_location,
                    id,
                )]);
                mask.push("adk_agent_definition.authorizations");
            }
        }
        if let Some(v) = scalar(&self.icon_uri) {
            body.icon = Some(AgentIcon { uri: Some(v) });
            mask.push("icon.uri");
        }

        if adk != AdkAgentDefinition::default() {
            body.adk_agent_definition = Some(adk);
        }

        Ok(PatchRequest {
            body,
            update_mask: mask,
        })
    }
}

// ── Authorization bodies ─────────────────────────────────────────────────────

/// Google OAuth consent URL for a server-side authorization.
#[must_use]
pub fn consent_uri(client_id: &str, scopes: &[String]) -> String {
    let params = [
        ("client_id", client_id.to_string()),
        ("scope", scopes.join(" ")),
        ("include_granted_scopes", "true".to_string()),
        ("response_type", "code".to_string()),
        ("access_type", "offline".to_string()),
        ("prompt", "consent".to_string()),
    ];
    let query = params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{GOOGLE_OAUTH_AUTHORIZE_URI}?{query}")
}

/// Inputs for a new server-side OAuth authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthorization {
    pub authorization_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub scopes: Vec<String>,
}

/// Body for `POST .../authorizations?authorizationId=...`.
#[must_use]
pub fn create_authorization_body(
    project_id: &str,
    location: &str,
    auth: &NewAuthorization,
) -> Authorization {
    Authorization {
        name: authorization_name(project_id, location, &auth.authorization_id),
        server_side_oauth2: Some(ServerSideOauth2 {
            client_id: auth.client_id.clone(),
            client_secret: Some(auth.client_secret.clone()),
            authorization_uri: consent_uri(&auth.client_id, &auth.scopes),
            token_uri: GOOGLE_OAUTH_TOKEN_URI.to_string(),
        }),
        ..Authorization::default()
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
