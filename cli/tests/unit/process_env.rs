//! `ProcessEnvironment` against the real process environment.
//!
//! Tests that mutate env vars are serialized with `serial_test`.

#![allow(clippy::expect_used, clippy::unwrap_used, unsafe_code)]

use agentspace_registrar::application::ports::Environment;
use agentspace_registrar::application::services::resolver::resolve_values;
use agentspace_registrar::domain::{
    Action, ActionSpec, ConfigValues, ParameterKey as K, ParameterSource, Service,
};
use agentspace_registrar::infra::env::ProcessEnvironment;
use serial_test::serial;

use crate::mocks::{NoTerminal, cli};

const VAR: &str = "REGISTRAR_TEST_PROJECT_ID";

#[test]
#[serial]
fn test_reads_set_variable() {
    // SAFETY: env mutation is serialized by #[serial]
    unsafe { std::env::set_var(VAR, "from-process") };
    let value = ProcessEnvironment.var(VAR);
    unsafe { std::env::remove_var(VAR) };
    assert_eq!(value.as_deref(), Some("from-process"));
}

#[test]
#[serial]
fn test_unset_variable_is_none() {
    unsafe { std::env::remove_var(VAR) };
    assert_eq!(ProcessEnvironment.var(VAR), None);
}

#[test]
#[serial]
fn test_custom_prefix_resolves_from_process_env() {
    unsafe { std::env::set_var(VAR, "env-proj") };
    let spec = ActionSpec::lookup(Service::Engine, Action::List).unwrap();
    let resolved = resolve_values(
        spec,
        &cli(&[]),
        &ConfigValues::default(),
        &ProcessEnvironment,
        "REGISTRAR_TEST",
        &NoTerminal,
    );
    unsafe { std::env::remove_var(VAR) };

    let resolved = resolved.unwrap();
    assert_eq!(resolved.get(K::ProjectId), Some("env-proj"));
    assert_eq!(
        resolved.source(K::ProjectId),
        Some(ParameterSource::EnvironmentVariable)
    );
}
