//! Precedence laws of the layered resolver.
//!
//! Uses `proptest` for the ordering invariants and plain tests for the
//! prompt and patch-field edge cases.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use agentspace_registrar::application::services::resolver::resolve_values;
use agentspace_registrar::domain::{
    Action, ActionSpec, ConfigError, ConfigValues, FieldUpdate, ParameterKey as K,
    ParameterSource, Service,
};
use proptest::prelude::*;

use crate::mocks::{MapEnv, NoTerminal, ScriptedTerminal, cli, config};

fn engine_list() -> &'static ActionSpec {
    ActionSpec::lookup(Service::Engine, Action::List).unwrap()
}

fn value() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,20}"
}

// ============================================================================
// Precedence properties
// ============================================================================

proptest! {
    /// A CLI value wins over config, environment and default.
    #[test]
    fn prop_cli_beats_every_other_source(a in value(), b in value(), c in value()) {
        let resolved = resolve_values(
            engine_list(),
            &cli(&[(K::ProjectId, &a), (K::Location, &a)]),
            &config(&[("project_id", &b), ("location", &b)]),
            &MapEnv::with(&[("AGENTSPACE_PROJECT_ID", &c), ("AGENTSPACE_LOCATION", &c)]),
            "AGENTSPACE",
            &NoTerminal,
        ).unwrap();
        prop_assert_eq!(resolved.get(K::ProjectId), Some(a.as_str()));
        prop_assert_eq!(resolved.source(K::Location), Some(ParameterSource::CliArgument));
    }

    /// Without a CLI value, the config file wins over the environment.
    #[test]
    fn prop_config_beats_environment(b in value(), c in value()) {
        let resolved = resolve_values(
            engine_list(),
            &cli(&[]),
            &config(&[("project_id", &b)]),
            &MapEnv::with(&[("AGENTSPACE_PROJECT_ID", &c)]),
            "AGENTSPACE",
            &NoTerminal,
        ).unwrap();
        prop_assert_eq!(resolved.get(K::ProjectId), Some(b.as_str()));
        prop_assert_eq!(resolved.source(K::ProjectId), Some(ParameterSource::ConfigFile));
    }

    /// The environment variable name follows the configured prefix.
    #[test]
    fn prop_environment_uses_prefix(prefix in "[A-Z]{2,8}", c in value()) {
        let var = format!("{prefix}_PROJECT_ID");
        let resolved = resolve_values(
            engine_list(),
            &cli(&[]),
            &ConfigValues::default(),
            &MapEnv::with(&[(var.as_str(), c.as_str())]),
            &prefix,
            &NoTerminal,
        ).unwrap();
        prop_assert_eq!(resolved.get(K::ProjectId), Some(c.as_str()));
        prop_assert_eq!(
            resolved.source(K::ProjectId),
            Some(ParameterSource::EnvironmentVariable)
        );
    }

    /// Resolving twice from the same inputs gives the same result.
    #[test]
    fn prop_resolution_is_deterministic(a in value(), b in value()) {
        let args = cli(&[(K::ProjectId, &a)]);
        let values = config(&[("location", &b)]);
        let env = MapEnv::default();
        let first = resolve_values(engine_list(), &args, &values, &env, "AGENTSPACE", &NoTerminal).unwrap();
        let second = resolve_values(engine_list(), &args, &values, &env, "AGENTSPACE", &NoTerminal).unwrap();
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// Empty values and defaults
// ============================================================================

#[test]
fn test_empty_cli_value_falls_through_for_non_patch_keys() {
    let resolved = resolve_values(
        engine_list(),
        &cli(&[(K::ProjectId, "p"), (K::Location, "")]),
        &config(&[("location", "europe-west1")]),
        &MapEnv::default(),
        "AGENTSPACE",
        &NoTerminal,
    )
    .unwrap();
    assert_eq!(resolved.get(K::Location), Some("europe-west1"));
    assert_eq!(resolved.source(K::Location), Some(ParameterSource::ConfigFile));
}

#[test]
fn test_default_applies_when_no_source_supplies_value() {
    let resolved = resolve_values(
        engine_list(),
        &cli(&[(K::ProjectId, "p")]),
        &ConfigValues::default(),
        &MapEnv::default(),
        "AGENTSPACE",
        &NoTerminal,
    )
    .unwrap();
    assert_eq!(resolved.get(K::Location), Some("us-central1"));
    assert_eq!(resolved.source(K::Location), Some(ParameterSource::DefaultValue));
}

#[test]
fn test_unprefixed_oauth_env_alias_is_accepted() {
    let spec = ActionSpec::lookup(Service::Auth, Action::Create).unwrap();
    let resolved = resolve_values(
        spec,
        &cli(&[(K::ProjectId, "p")]),
        &ConfigValues::default(),
        &MapEnv::with(&[("OAUTH_CLIENT_ID", "cid"), ("OAUTH_CLIENT_SECRET", "shh")]),
        "AGENTSPACE",
        &NoTerminal,
    )
    .unwrap();
    assert_eq!(resolved.get(K::OauthClientId), Some("cid"));
    assert_eq!(resolved.get(K::OauthClientSecret), Some("shh"));
    assert_eq!(resolved.get(K::Scopes), Some("email"));
}

// ============================================================================
// Missing values and prompting
// ============================================================================

#[test]
fn test_missing_required_without_terminal_names_flag_and_env() {
    let err = resolve_values(
        engine_list(),
        &cli(&[]),
        &ConfigValues::default(),
        &MapEnv::default(),
        "MYAPP",
        &NoTerminal,
    )
    .unwrap_err();
    let config_err = err.downcast_ref::<ConfigError>().expect("config error");
    assert!(matches!(
        config_err,
        ConfigError::MissingRequired { key: K::ProjectId, .. }
    ));
    let msg = err.to_string();
    assert!(msg.contains("--project-id"), "got: {msg}");
    assert!(msg.contains("MYAPP_PROJECT_ID"), "got: {msg}");
}

#[test]
fn test_undeclared_key_error_names_active_prefix() {
    let resolved = resolve_values(
        engine_list(),
        &cli(&[(K::ProjectId, "p")]),
        &ConfigValues::default(),
        &MapEnv::default(),
        "MYAPP",
        &NoTerminal,
    )
    .unwrap();
    assert_eq!(resolved.env_prefix(), "MYAPP");
    let msg = resolved.require(K::AgentId).unwrap_err().to_string();
    assert!(msg.contains("MYAPP_AGENT_ID"), "got: {msg}");
}

#[test]
fn test_prompt_fills_missing_required_key_only() {
    let terminal = ScriptedTerminal::new(&[(K::ProjectId, "  prompted  ")]);
    let resolved = resolve_values(
        engine_list(),
        &cli(&[]),
        &ConfigValues::default(),
        &MapEnv::default(),
        "AGENTSPACE",
        &terminal,
    )
    .unwrap();
    assert_eq!(resolved.get(K::ProjectId), Some("prompted"));
    assert_eq!(
        resolved.source(K::ProjectId),
        Some(ParameterSource::InteractivePrompt)
    );
    // Location has a default, so it is never asked for.
    assert_eq!(*terminal.asked.borrow(), vec![K::ProjectId]);
}

#[test]
fn test_empty_prompt_answer_is_an_error() {
    let terminal = ScriptedTerminal::new(&[]);
    let err = resolve_values(
        engine_list(),
        &cli(&[]),
        &ConfigValues::default(),
        &MapEnv::default(),
        "AGENTSPACE",
        &terminal,
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::EmptyPrompt(K::ProjectId))
    ));
}

// ============================================================================
// Patch fields of registry update
// ============================================================================

#[test]
fn test_patch_fields_ignore_environment_and_keep_empty_values() {
    let spec = ActionSpec::lookup(Service::Registry, Action::Update).unwrap();
    let resolved = resolve_values(
        spec,
        &cli(&[
            (K::ProjectId, "p"),
            (K::AppId, "app"),
            (K::AgentId, "42"),
            (K::IconUri, ""),
        ]),
        &config(&[("description", "from config")]),
        &MapEnv::with(&[("AGENTSPACE_DISPLAY_NAME", "from env")]),
        "AGENTSPACE",
        &NoTerminal,
    )
    .unwrap();
    assert_eq!(resolved.field_update(K::DisplayName), FieldUpdate::Keep);
    assert_eq!(
        resolved.field_update(K::Description),
        FieldUpdate::Set("from config".to_string())
    );
    assert_eq!(resolved.field_update(K::IconUri), FieldUpdate::Clear);
    assert_eq!(resolved.field_update(K::ToolDescription), FieldUpdate::Keep);
}

#[test]
fn test_config_alias_for_display_name() {
    let spec = ActionSpec::lookup(Service::Registry, Action::GetByName).unwrap();
    let resolved = resolve_values(
        spec,
        &cli(&[(K::ProjectId, "p"), (K::AppId, "app")]),
        &config(&[("ars_display_name", "Helper")]),
        &MapEnv::default(),
        "AGENTSPACE",
        &NoTerminal,
    )
    .unwrap();
    assert_eq!(resolved.get(K::DisplayName), Some("Helper"));
}
