//! Application service: OAuth authorization use-cases.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};
use registrar_types::{Authorization, AuthorizationList};
use serde::Serialize;
use serde_json::Value;

use crate::application::ports::{ApiRequest, HttpTransport, Method, ProgressReporter, TokenProvider};
use crate::application::services::api::ApiClient;
use crate::domain::resources::{
    self, NewAuthorization, authorizations_url, create_authorization_body, parse_scopes,
};
use crate::domain::{ConfigError, ParameterKey as K, ResolvedConfig};

/// Result of `auth refresh`: the replacement and the removed authorization.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshOutcome {
    pub created: Authorization,
    pub deleted: Value,
    pub message: String,
}

fn base(resolved: &ResolvedConfig) -> Result<(String, String, String)> {
    let project = resolved.require(K::ProjectId)?;
    let location = resolved.get(K::Location).unwrap_or("us");
    resources::validate_segment(K::ProjectId, project)?;
    resources::validate_segment(K::Location, location)?;
    Ok((
        project.to_string(),
        location.to_string(),
        authorizations_url(project, location),
    ))
}

/// A supplied id, or a fresh UUIDv4 when absent.
fn id_or_generated(resolved: &ResolvedConfig, key: K) -> Result<String> {
    match resolved.get(key).filter(|v| !v.is_empty()) {
        Some(id) => {
            resources::validate_segment(key, id)?;
            Ok(id.to_string())
        }
        None => {
            let id = uuid::Uuid::new_v4().to_string();
            tracing::debug!(%id, "generated authorization id");
            Ok(id)
        }
    }
}

fn new_authorization(resolved: &ResolvedConfig, id_key: K) -> Result<NewAuthorization> {
    let scopes = parse_scopes(resolved.get(K::Scopes).unwrap_or("email"));
    if scopes.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: K::Scopes,
            value: resolved.get(K::Scopes).unwrap_or_default().to_string(),
            reason: "At least one OAuth scope is required.".to_string(),
        }
        .into());
    }
    Ok(NewAuthorization {
        authorization_id: id_or_generated(resolved, id_key)?,
        client_id: resolved.require(K::OauthClientId)?.to_string(),
        client_secret: resolved.require(K::OauthClientSecret)?.to_string(),
        scopes,
    })
}

fn post_authorization(
    client: &ApiClient<'_, impl HttpTransport, impl TokenProvider>,
    project: &str,
    location: &str,
    url: &str,
    auth: &NewAuthorization,
) -> Result<Authorization> {
    let body = serde_json::to_value(create_authorization_body(project, location, auth))?;
    client
        .execute_as(
            ApiRequest::new(Method::Post, url)
                .query("authorizationId", auth.authorization_id.clone())
                .json(body),
        )
        .with_context(|| format!("failed to create authorization {}", auth.authorization_id))
}

/// Create a server-side OAuth authorization.
///
/// # Errors
///
/// Returns an error on invalid ids or scopes, or a failed remote call.
pub fn create_authorization(
    client: &ApiClient<'_, impl HttpTransport, impl TokenProvider>,
    resolved: &ResolvedConfig,
    reporter: &impl ProgressReporter,
) -> Result<Authorization> {
    let (project, location, url) = base(resolved)?;
    let auth = new_authorization(resolved, K::AuthorizationId)?;
    reporter.step(&format!("creating authorization {}...", auth.authorization_id));
    let created = post_authorization(client, &project, &location, &url, &auth)?;
    reporter.success(&format!("authorization {} created", auth.authorization_id));
    Ok(created)
}

/// List every authorization in the location.
///
/// # Errors
///
/// Returns an error on invalid ids or a failed remote call.
pub fn list_authorizations(
    client: &ApiClient<'_, impl HttpTransport, impl TokenProvider>,
    resolved: &ResolvedConfig,
) -> Result<AuthorizationList> {
    let (_, _, url) = base(resolved)?;
    let authorizations = client
        .list_all_as(&ApiRequest::new(Method::Get, url), "authorizations")
        .context("failed to list authorizations")?;
    Ok(AuthorizationList {
        authorizations,
        next_page_token: None,
    })
}

fn delete_by_id(
    client: &ApiClient<'_, impl HttpTransport, impl TokenProvider>,
    url: &str,
    id: &str,
) -> Result<Value> {
    client
        .execute(ApiRequest::new(Method::Delete, format!("{url}/{id}")))
        .with_context(|| format!("failed to delete authorization {id}"))
}

/// Delete an authorization by id.
///
/// # Errors
///
/// Returns an error on invalid ids or a failed remote call.
pub fn delete_authorization(
    client: &ApiClient<'_, impl HttpTransport, impl TokenProvider>,
    resolved: &ResolvedConfig,
    reporter: &impl ProgressReporter,
) -> Result<Value> {
    let (_, _, url) = base(resolved)?;
    let id = resolved.require(K::AuthorizationId)?;
    resources::validate_segment(K::AuthorizationId, id)?;
    reporter.step(&format!("deleting authorization {id}..."));
    let response = delete_by_id(client, &url, id)?;
    reporter.success(&format!("authorization {id} deleted"));
    Ok(response)
}

/// Replace an authorization: create a new one with fresh credentials, then
/// delete the old one. The old one is left in place if creation fails.
///
/// # Errors
///
/// Returns an error if either call fails. A delete failure after a
/// successful create names the new id so it can be cleaned up.
pub fn refresh_authorization(
    client: &ApiClient<'_, impl HttpTransport, impl TokenProvider>,
    resolved: &ResolvedConfig,
    reporter: &impl ProgressReporter,
) -> Result<RefreshOutcome> {
    let (project, location, url) = base(resolved)?;
    let old_id = resolved.require(K::AuthorizationId)?;
    resources::validate_segment(K::AuthorizationId, old_id)?;
    let replacement = new_authorization(resolved, K::NewAuthorizationId)?;
    anyhow::ensure!(
        replacement.authorization_id != old_id,
        ConfigError::InvalidValue {
            key: K::NewAuthorizationId,
            value: replacement.authorization_id.clone(),
            reason: "The new authorization id must differ from the one being replaced."
                .to_string(),
        }
    );

    reporter.step(&format!(
        "creating authorization {}...",
        replacement.authorization_id
    ));
    let created = post_authorization(client, &project, &location, &url, &replacement)?;

    reporter.step(&format!("deleting authorization {old_id}..."));
    let deleted = delete_by_id(client, &url, old_id).with_context(|| {
        format!(
            "authorization {} was created but {old_id} could not be deleted",
            replacement.authorization_id
        )
    })?;

    let message = format!(
        "Authorization {old_id} replaced by {}",
        replacement.authorization_id
    );
    reporter.success(&message);
    Ok(RefreshOutcome {
        created,
        deleted,
        message,
    })
}
