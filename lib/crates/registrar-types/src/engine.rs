//! Vertex AI Agent Engine (reasoning engine) resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::resource_id;

/// A deployed reasoning engine as returned by the `aiplatform` API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasoningEngine {
    /// Full resource name: `projects/*/locations/*/reasoningEngines/*`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasoningEngineList {
    #[serde(default)]
    pub reasoning_engines: Vec<ReasoningEngine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Condensed view of a reasoning engine printed by the `engine` commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineAgentSummary {
    /// Short resource id.
    pub name: String,
    pub display_name: Option<String>,
    pub resource_name: String,
    pub create_time: Option<DateTime<Utc>>,
}

impl From<&ReasoningEngine> for EngineAgentSummary {
    fn from(engine: &ReasoningEngine) -> Self {
        Self {
            name: resource_id(&engine.name).to_string(),
            display_name: engine.display_name.clone(),
            resource_name: engine.name.clone(),
            create_time: engine.create_time,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineAgentList {
    pub agents: Vec<EngineAgentSummary>,
}
