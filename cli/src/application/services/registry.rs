//! Application service: agent registry use-cases.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};
use registrar_types::{Agent, AgentList};
use serde_json::Value;

use crate::application::ports::{ApiRequest, HttpTransport, Method, ProgressReporter, TokenProvider};
use crate::application::services::api::ApiClient;
use crate::domain::resources::{
    self, AgentPatch, NewAgent, RegistryScope, create_agent_body, display_name_filter,
};
use crate::domain::{ParameterKey as K, ResolvedConfig};

/// Builds and validates the registry collection scope.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for ids that are not single path
/// segments.
pub fn scope(resolved: &ResolvedConfig) -> Result<RegistryScope> {
    let scope = RegistryScope {
        project_id: resolved.require(K::ProjectId)?.to_string(),
        app_id: resolved.require(K::AppId)?.to_string(),
        api_location: resolved.get(K::ApiLocation).unwrap_or("global").to_string(),
    };
    resources::validate_segment(K::ProjectId, &scope.project_id)?;
    resources::validate_segment(K::AppId, &scope.app_id)?;
    resources::validate_segment(K::ApiLocation, &scope.api_location)?;
    Ok(scope)
}

fn agent_id(resolved: &ResolvedConfig) -> Result<&str> {
    let id = resolved.require(K::AgentId)?;
    resources::validate_segment(K::AgentId, id)?;
    Ok(id)
}

fn re_location(resolved: &ResolvedConfig) -> Result<&str> {
    let location = resolved.get(K::ReLocation).unwrap_or("global");
    resources::validate_segment(K::ReLocation, location)?;
    Ok(location)
}

/// Register a new agent backed by a deployed reasoning engine.
///
/// # Errors
///
/// Returns an error on invalid ids or a failed remote call.
pub fn create_agent(
    client: &ApiClient<'_, impl HttpTransport, impl TokenProvider>,
    resolved: &ResolvedConfig,
    reporter: &impl ProgressReporter,
) -> Result<Agent> {
    let scope = scope(resolved)?;
    let deployment = resolved.require(K::AdkDeploymentId)?;
    resources::validate_segment(K::AdkDeploymentId, deployment)?;
    let auth_id = resolved.get(K::AuthId).filter(|v| !v.is_empty());
    if let Some(id) = auth_id {
        resources::validate_segment(K::AuthId, id)?;
    }

    let agent = NewAgent {
        display_name: resolved.require(K::DisplayName)?.to_string(),
        description: resolved.require(K::Description)?.to_string(),
        tool_description: resolved.require(K::ToolDescription)?.to_string(),
        adk_deployment_id: deployment.to_string(),
        auth_id: auth_id.map(str::to_string),
        icon_uri: resolved
            .get(K::IconUri)
            .filter(|v| !v.is_empty())
            .map(str::to_string),
        re_location: re_location(resolved)?.to_string(),
    };
    let body = serde_json::to_value(create_agent_body(&scope, &agent))?;

    reporter.step(&format!("registering agent '{}'...", agent.display_name));
    let created: Agent = client
        .execute_as(ApiRequest::new(Method::Post, scope.agents_url()).json(body))
        .context("failed to create agent")?;
    reporter.success(&format!("agent '{}' registered", agent.display_name));
    Ok(created)
}

/// List every agent registered in the app.
///
/// # Errors
///
/// Returns an error on invalid ids or a failed remote call.
pub fn list_agents(
    client: &ApiClient<'_, impl HttpTransport, impl TokenProvider>,
    resolved: &ResolvedConfig,
) -> Result<AgentList> {
    let scope = scope(resolved)?;
    let agents = client
        .list_all_as(&ApiRequest::new(Method::Get, scope.agents_url()), "agents")
        .context("failed to list agents")?;
    Ok(AgentList {
        agents,
        next_page_token: None,
    })
}

/// Fetch one agent by id.
///
/// # Errors
///
/// Returns an error on invalid ids or a failed remote call.
pub fn get_agent(
    client: &ApiClient<'_, impl HttpTransport, impl TokenProvider>,
    resolved: &ResolvedConfig,
) -> Result<Agent> {
    let scope = scope(resolved)?;
    let id = agent_id(resolved)?;
    client
        .execute_as(ApiRequest::new(Method::Get, scope.agent_url(id)))
        .with_context(|| format!("failed to get agent {id}"))
}

/// Apply a partial patch to an agent. Only supplied fields are sent and
/// listed in `updateMask`.
///
/// # Errors
///
/// Returns `ConfigError::EmptyPatch` when no updatable field was supplied,
/// or an error from the remote call.
pub fn update_agent(
    client: &ApiClient<'_, impl HttpTransport, impl TokenProvider>,
    resolved: &ResolvedConfig,
    reporter: &impl ProgressReporter,
) -> Result<Agent> {
    let scope = scope(resolved)?;
    let id = agent_id(resolved)?;

    let patch = AgentPatch {
        display_name: resolved.field_update(K::DisplayName),
        description: resolved.field_update(K::Description),
        tool_description: resolved.field_update(K::ToolDescription),
        adk_deployment_id: resolved.field_update(K::AdkDeploymentId),
        auth_id: resolved.field_update(K::AuthId),
        icon_uri: resolved.field_update(K::IconUri),
    };
    let request = patch.to_request(&scope, re_location(resolved)?)?;
    let mask = request.mask_param();
    tracing::debug!(update_mask = %mask, "patching agent");

    reporter.step(&format!("updating agent {id}..."));
    let updated: Agent = client
        .execute_as(
            ApiRequest::new(Method::Patch, scope.agent_url(id))
                .query("updateMask", mask)
                .json(serde_json::to_value(&request.body)?),
        )
        .with_context(|| format!("failed to update agent {id}"))?;
    reporter.success(&format!("agent {id} updated"));
    Ok(updated)
}

/// Find agents whose display name matches exactly.
///
/// # Errors
///
/// Returns an error on invalid ids or a failed remote call.
pub fn get_agents_by_name(
    client: &ApiClient<'_, impl HttpTransport, impl TokenProvider>,
    resolved: &ResolvedConfig,
) -> Result<AgentList> {
    let scope = scope(resolved)?;
    let name = resolved.require(K::DisplayName)?;
    let request = ApiRequest::new(Method::Get, scope.agents_url())
        .query("filter", display_name_filter("displayName", name));
    let agents: Vec<Agent> = client
        .list_all_as(&request, "agents")
        .with_context(|| format!("failed to look up agent '{name}'"))?;

    // Some API versions ignore the filter; match locally as well.
    let agents = agents
        .into_iter()
        .filter(|a| a.display_name.as_deref() == Some(name))
        .collect();
    Ok(AgentList {
        agents,
        next_page_token: None,
    })
}

/// Remove an agent from the registry.
///
/// # Errors
///
/// Returns an error on invalid ids or a failed remote call.
pub fn delete_agent(
    client: &ApiClient<'_, impl HttpTransport, impl TokenProvider>,
    resolved: &ResolvedConfig,
    reporter: &impl ProgressReporter,
) -> Result<Value> {
    let scope = scope(resolved)?;
    let id = agent_id(resolved)?;
    reporter.step(&format!("deleting agent {id}..."));
    let response = client
        .execute(ApiRequest::new(Method::Delete, scope.agent_url(id)))
        .with_context(|| format!("failed to delete agent {id}"))?;
    reporter.success(&format!("agent {id} deleted"));
    Ok(response)
}
