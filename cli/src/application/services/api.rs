//! Application service: authenticated JSON calls against the remote APIs.
//!
//! Every request gets a bearer token, `Content-Type: application/json` and
//! the `X-Goog-User-Project` quota header. Non-2xx responses become
//! `RemoteError::Status`; list calls follow `nextPageToken`.

use anyhow::{Context, Result};
use registrar_types::GoogleErrorEnvelope;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::application::ports::{ApiRequest, ApiResponse, HttpTransport, Method, TokenProvider};
use crate::domain::RemoteError;

/// Upper bound on followed pages; a server that keeps returning tokens is a bug.
const MAX_PAGES: usize = 100;

/// Shared client for one invocation, bound to the quota project.
pub struct ApiClient<'a, T, P> {
    transport: &'a T,
    tokens: &'a P,
    project_id: String,
}

impl<'a, T, P> ApiClient<'a, T, P>
where
    T: HttpTransport,
    P: TokenProvider,
{
    pub fn new(transport: &'a T, tokens: &'a P, project_id: impl Into<String>) -> Self {
        Self {
            transport,
            tokens,
            project_id: project_id.into(),
        }
    }

    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Sends `request` with auth headers and returns the decoded JSON body.
    /// An empty body (204, or DELETE with no content) yields
    /// `{"message": "<resource> deleted successfully"}`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` when no token is available, `RemoteError::Transport`
    /// on network failure, `RemoteError::Status` on non-2xx, and
    /// `RemoteError::InvalidResponse` when the body is not JSON.
    pub fn execute(&self, request: ApiRequest) -> Result<Value> {
        let token = self.tokens.access_token()?;
        let request = request
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .header("X-Goog-User-Project", self.project_id.clone());

        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = self.transport.send(&request)?;
        tracing::debug!(status = response.status, "received response");

        decode(&request, response)
    }

    /// Like [`execute`](Self::execute), deserializing into `R`.
    ///
    /// # Errors
    ///
    /// Same as `execute`, plus `RemoteError::InvalidResponse` when the body
    /// does not match `R`.
    pub fn execute_as<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        let url = request.url.clone();
        let value = self.execute(request)?;
        serde_json::from_value(value).map_err(|e| {
            RemoteError::InvalidResponse {
                url,
                message: e.to_string(),
            }
            .into()
        })
    }

    /// GETs every page of a list endpoint, concatenating the `items_field`
    /// arrays.
    ///
    /// # Errors
    ///
    /// Same as `execute`.
    pub fn list_all(&self, request: &ApiRequest, items_field: &str) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        for page in 0..MAX_PAGES {
            let mut req = request.clone();
            if let Some(token) = page_token.take() {
                req = req.query("pageToken", token);
            }
            let body = self.execute(req)?;
            if let Some(Value::Array(batch)) = body.get(items_field) {
                items.extend(batch.iter().cloned());
            }
            match body.get("nextPageToken").and_then(Value::as_str) {
                Some(token) if !token.is_empty() => {
                    tracing::debug!(page = page + 1, "following nextPageToken");
                    page_token = Some(token.to_string());
                }
                _ => return Ok(items),
            }
        }

        tracing::warn!(max = MAX_PAGES, "page limit reached; list may be incomplete");
        Ok(items)
    }

    /// [`list_all`](Self::list_all), deserializing each item into `R`.
    ///
    /// # Errors
    ///
    /// Same as `list_all`, plus `RemoteError::InvalidResponse` for items
    /// that do not match `R`.
    pub fn list_all_as<R: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        items_field: &str,
    ) -> Result<Vec<R>> {
        self.list_all(request, items_field)?
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|e| {
                    RemoteError::InvalidResponse {
                        url: request.url.clone(),
                        message: e.to_string(),
                    }
                    .into()
                })
            })
            .collect()
    }
}

fn decode(request: &ApiRequest, response: ApiResponse) -> Result<Value> {
    if !response.is_success() {
        let message = GoogleErrorEnvelope::message_from_body(&response.body)
            .unwrap_or_else(|| response.body.trim().to_string());
        return Err(RemoteError::Status {
            status: response.status,
            message,
        }
        .into());
    }

    if response.body.trim().is_empty() {
        let resource = request.url.rsplit('/').next().unwrap_or_default();
        let verb = if request.method == Method::Delete {
            "deleted"
        } else {
            "completed"
        };
        return Ok(serde_json::json!({
            "message": format!("{resource} {verb} successfully"),
        }));
    }

    serde_json::from_str(&response.body)
        .map_err(|e| RemoteError::InvalidResponse {
            url: request.url.clone(),
            message: e.to_string(),
        })
        .with_context(|| format!("{} {}", request.method.as_str(), request.url))
}
