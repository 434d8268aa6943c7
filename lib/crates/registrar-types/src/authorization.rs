//! Discovery Engine OAuth authorization resources.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_side_oauth2: Option<ServerSideOauth2>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Server-side OAuth 2.0 client configuration of an authorization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSideOauth2 {
    pub client_id: String,
    /// Write-only; the API never returns it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    pub authorization_uri: String,
    pub token_uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationList {
    #[serde(default)]
    pub authorizations: Vec<Authorization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}
