//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;
use registrar_types::{
    Agent, AgentList, Authorization, AuthorizationList, EngineAgentList, resource_id,
};
use serde_json::Value;

use crate::application::services::authorization::RefreshOutcome;
use crate::domain::{ActionSpec, Requirement, ResolvedConfig};
use crate::output::{OutputContext, display_value};

/// Renders results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        println!("agentspace-registrar {version}");
    }

    /// Render one registered agent.
    pub fn render_agent(&self, agent: &Agent) {
        let name = agent.name.as_deref().unwrap_or_default();
        self.ctx.header(or_dash(agent.display_name.as_deref()));
        self.ctx.kv("ID:", or_dash(Some(resource_id(name))));
        self.ctx.kv("Name:", or_dash(Some(name)));
        self.ctx.kv("Description:", or_dash(agent.description.as_deref()));
        self.ctx.kv("State:", or_dash(agent.state.as_deref()));

        let adk = agent.adk_agent_definition.as_ref();
        let tool = adk
            .and_then(|a| a.tool_settings.as_ref())
            .and_then(|t| t.tool_description.as_deref());
        let engine = adk
            .and_then(|a| a.provisioned_reasoning_engine.as_ref())
            .and_then(|p| p.reasoning_engine.as_deref());
        self.ctx.kv("Tool description:", or_dash(tool));
        self.ctx.kv("Reasoning engine:", or_dash(engine));

        let auths = adk
            .and_then(|a| a.authorizations.as_ref())
            .filter(|a| !a.is_empty())
            .map(|a| a.join(", "));
        self.ctx.kv("Authorizations:", or_dash(auths.as_deref()));

        let icon = agent.icon.as_ref().and_then(|i| i.uri.as_deref());
        self.ctx.kv("Icon:", or_dash(icon));
    }

    /// Render the agents in an app.
    pub fn render_agent_list(&self, list: &AgentList) {
        if list.agents.is_empty() {
            self.ctx.info("No agents found.");
            return;
        }

        println!(
            "  {:<22} {:<32} {}",
            "ID".style(self.ctx.styles.bold),
            "DISPLAY NAME".style(self.ctx.styles.bold),
            "STATE".style(self.ctx.styles.bold)
        );
        for agent in &list.agents {
            let id = resource_id(agent.name.as_deref().unwrap_or_default());
            println!(
                "  {:<22} {:<32} {}",
                id.style(self.ctx.styles.id),
                or_dash(agent.display_name.as_deref()),
                or_dash(agent.state.as_deref())
            );
        }
        self.ctx.info(&format!("{} agent(s)", list.agents.len()));
    }

    /// Render reasoning engine summaries.
    pub fn render_engine_list(&self, list: &EngineAgentList) {
        if list.agents.is_empty() {
            self.ctx.info("No reasoning engines found.");
            return;
        }

        println!(
            "  {:<22} {:<32} {:<22} {}",
            "ID".style(self.ctx.styles.bold),
            "DISPLAY NAME".style(self.ctx.styles.bold),
            "CREATED".style(self.ctx.styles.bold),
            "RESOURCE NAME".style(self.ctx.styles.bold)
        );
        for engine in &list.agents {
            let created = engine
                .create_time
                .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string());
            println!(
                "  {:<22} {:<32} {:<22} {}",
                engine.name.style(self.ctx.styles.id),
                or_dash(engine.display_name.as_deref()),
                or_dash(created.as_deref()),
                engine.resource_name.style(self.ctx.styles.dim)
            );
        }
    }

    /// Render one authorization.
    pub fn render_authorization(&self, auth: &Authorization) {
        self.ctx.header(resource_id(&auth.name));
        self.ctx.kv("Name:", &auth.name);
        if let Some(oauth) = &auth.server_side_oauth2 {
            self.ctx.kv("Client ID:", &oauth.client_id);
            self.ctx.kv("Token URI:", &oauth.token_uri);
            self.ctx.kv("Authorization URI:", &oauth.authorization_uri);
        }
    }

    /// Render the authorizations in a location.
    pub fn render_authorization_list(&self, list: &AuthorizationList) {
        if list.authorizations.is_empty() {
            self.ctx.info("No authorizations found.");
            return;
        }

        println!(
            "  {:<38} {}",
            "ID".style(self.ctx.styles.bold),
            "CLIENT ID".style(self.ctx.styles.bold)
        );
        for auth in &list.authorizations {
            let client = auth
                .server_side_oauth2
                .as_ref()
                .map(|o| o.client_id.as_str());
            println!(
                "  {:<38} {}",
                resource_id(&auth.name).style(self.ctx.styles.id),
                or_dash(client)
            );
        }
    }

    /// Render a free-form response, usually `{"message": ...}` from a delete.
    pub fn render_message(&self, body: &Value) {
        match body.get("message").and_then(Value::as_str) {
            Some(message) => println!("{message}"),
            None if body.as_object().is_some_and(serde_json::Map::is_empty) => {
                println!("Done.");
            }
            None => match serde_json::to_string_pretty(body) {
                Ok(text) => println!("{text}"),
                Err(_) => println!("{body}"),
            },
        }
    }

    /// Render an authorization refresh.
    pub fn render_refresh(&self, outcome: &RefreshOutcome) {
        println!("{}", outcome.message);
        self.render_authorization(&outcome.created);
    }

    /// Render the resolved parameters of an action with their sources.
    pub fn render_resolved(
        &self,
        spec: &ActionSpec,
        resolved: &ResolvedConfig,
        config_path: &std::path::Path,
    ) {
        self.ctx
            .header(&format!("{} {}", spec.service, spec.action));
        self.ctx.kv("config file:", &config_path.display().to_string());
        println!();

        for key_spec in spec.keys {
            let key = key_spec.key;
            let (value, source) = match (resolved.get(key), resolved.source(key)) {
                (Some(value), Some(source)) => (display_value(key, value), source.as_str()),
                _ => match key_spec.requirement {
                    Requirement::Patch => ("(unchanged)".to_string(), "-"),
                    _ => ("(not set)".to_string(), "-"),
                },
            };
            let shown = if value.is_empty() {
                "(clear)".to_string()
            } else {
                value
            };
            println!(
                "  {:<22} {:<48} {}",
                key.as_str(),
                shown,
                source.style(self.ctx.styles.source)
            );
        }
    }
}
