pub mod authorization;
pub mod engine;
pub mod error;
pub mod registry;

pub use authorization::{Authorization, AuthorizationList, ServerSideOauth2};
pub use engine::{EngineAgentList, EngineAgentSummary, ReasoningEngine, ReasoningEngineList};
pub use error::{GoogleError, GoogleErrorEnvelope};
pub use registry::{
    AdkAgentDefinition, Agent, AgentIcon, AgentList, ProvisionedReasoningEngine, ToolSettings,
};

/// Returns the last `/`-separated segment of a resource name.
///
/// `projects/p/locations/l/reasoningEngines/123` yields `123`; a bare id is
/// returned unchanged.
#[must_use]
pub fn resource_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}
