//! Application service: Agent Engine (reasoning engine) use-cases.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};
use registrar_types::{EngineAgentList, EngineAgentSummary, ReasoningEngine};
use serde_json::Value;

use crate::application::ports::{ApiRequest, HttpTransport, Method, ProgressReporter, TokenProvider};
use crate::application::services::api::ApiClient;
use crate::domain::resources::{self, aiplatform_base, display_name_filter, reasoning_engines_url};
use crate::domain::{ConfigError, ParameterKey as K, ParameterSource, ResolvedConfig};

fn base(resolved: &ResolvedConfig) -> Result<String> {
    let project = resolved.require(K::ProjectId)?;
    let location = resolved.get(K::Location).unwrap_or("us-central1");
    resources::validate_segment(K::ProjectId, project)?;
    resources::validate_segment(K::Location, location)?;
    Ok(reasoning_engines_url(project, location))
}

fn summarize(engines: &[ReasoningEngine]) -> EngineAgentList {
    EngineAgentList {
        agents: engines.iter().map(EngineAgentSummary::from).collect(),
    }
}

/// List every deployed reasoning engine in the location.
///
/// # Errors
///
/// Returns an error on invalid ids or a failed remote call.
pub fn list_engines(
    client: &ApiClient<'_, impl HttpTransport, impl TokenProvider>,
    resolved: &ResolvedConfig,
) -> Result<EngineAgentList> {
    let url = base(resolved)?;
    let engines: Vec<ReasoningEngine> = client
        .list_all_as(&ApiRequest::new(Method::Get, url), "reasoningEngines")
        .context("failed to list reasoning engines")?;
    Ok(summarize(&engines))
}

/// Fetch one reasoning engine by its short id.
///
/// # Errors
///
/// Returns an error on invalid ids or a failed remote call.
pub fn get_engine(
    client: &ApiClient<'_, impl HttpTransport, impl TokenProvider>,
    resolved: &ResolvedConfig,
) -> Result<EngineAgentList> {
    let url = base(resolved)?;
    let id = resolved.require(K::ReResourceId)?;
    resources::validate_segment(K::ReResourceId, id)?;
    let engine: ReasoningEngine = client
        .execute_as(ApiRequest::new(Method::Get, format!("{url}/{id}")))
        .with_context(|| format!("failed to get reasoning engine {id}"))?;
    Ok(summarize(std::slice::from_ref(&engine)))
}

/// List reasoning engines whose display name matches exactly.
///
/// # Errors
///
/// Returns an error on invalid ids or a failed remote call.
pub fn list_engines_by_name(
    client: &ApiClient<'_, impl HttpTransport, impl TokenProvider>,
    resolved: &ResolvedConfig,
) -> Result<EngineAgentList> {
    let url = base(resolved)?;
    let name = resolved.require(K::ReDisplayName)?;
    let request = ApiRequest::new(Method::Get, url)
        .query("filter", display_name_filter("display_name", name));
    let engines: Vec<ReasoningEngine> = client
        .list_all_as(&request, "reasoningEngines")
        .with_context(|| format!("failed to look up reasoning engine '{name}'"))?;
    Ok(summarize(&engines))
}

/// Delete a reasoning engine by its full resource name.
///
/// # Errors
///
/// The regional host comes from the location inside the resource name.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` when `re_resource_name` is not a
/// full `projects/*/locations/*/reasoningEngines/*` name or when an
/// explicitly supplied `location` names a different region, or an error
/// from the remote call.
pub fn delete_engine(
    client: &ApiClient<'_, impl HttpTransport, impl TokenProvider>,
    resolved: &ResolvedConfig,
    reporter: &impl ProgressReporter,
) -> Result<Value> {
    let name = resolved.require(K::ReResourceName)?;
    let location = resources::validate_engine_resource_name(name)?;
    if let Some(explicit) = resolved
        .get(K::Location)
        .filter(|_| resolved.source(K::Location) != Some(ParameterSource::DefaultValue))
        .filter(|explicit| *explicit != location)
    {
        return Err(ConfigError::InvalidValue {
            key: K::Location,
            value: explicit.to_string(),
            reason: format!("The resource name is in location '{location}'."),
        }
        .into());
    }

    reporter.step(&format!("deleting reasoning engine {name}..."));
    let response = client
        .execute(ApiRequest::new(
            Method::Delete,
            format!("{}/{name}", aiplatform_base(location)),
        ))
        .with_context(|| format!("failed to delete reasoning engine {name}"))?;
    reporter.success(&format!(
        "reasoning engine {} deleted",
        registrar_types::resource_id(name)
    ));
    Ok(response)
}
