//! `JsonConfigStore` against real files, and the resolver on top of it.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use agentspace_registrar::application::ports::{ConfigLocation, ConfigStore};
use agentspace_registrar::application::services::resolver::Resolver;
use agentspace_registrar::domain::{
    Action, ActionSpec, ConfigError, ErrorKind, ParameterKey as K, ParameterSource, Service,
};
use agentspace_registrar::infra::config::JsonConfigStore;
use tempfile::TempDir;

use crate::mocks::{MapEnv, NoTerminal, cli};

fn write(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.json");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_missing_default_file_yields_no_values() {
    let dir = TempDir::new().unwrap();
    let location = ConfigLocation::Default(dir.path().join("config.json"));
    assert!(JsonConfigStore.load(&location).unwrap().is_empty());
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let location = ConfigLocation::Explicit(dir.path().join("absent.json"));
    let err = JsonConfigStore.load(&location).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::FileNotFound(_))
    ));
    assert_eq!(ErrorKind::classify(&err), ErrorKind::Configuration);
}

#[test]
fn test_malformed_file_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "{\"project_id\": ");
    let err = JsonConfigStore
        .load(&ConfigLocation::Default(path))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Malformed { .. })
    ));
    assert_eq!(ErrorKind::classify(&err).exit_code(), 2);
}

#[test]
fn test_resolver_reads_file_values_below_cli() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        r#"{"project_id": "file-proj", "app_id": "file-app", "api_location": "eu"}"#,
    );
    let spec = ActionSpec::lookup(Service::Registry, Action::List).unwrap();
    let env = MapEnv::with(&[("AGENTSPACE_APP_ID", "env-app")]);
    let resolver = Resolver::new(&JsonConfigStore, &env, &NoTerminal);

    let resolved = resolver
        .resolve(
            spec,
            &cli(&[(K::ProjectId, "cli-proj")]),
            &ConfigLocation::Explicit(path),
            "AGENTSPACE",
        )
        .unwrap();

    assert_eq!(resolved.get(K::ProjectId), Some("cli-proj"));
    assert_eq!(resolved.get(K::AppId), Some("file-app"));
    assert_eq!(resolved.source(K::AppId), Some(ParameterSource::ConfigFile));
    assert_eq!(resolved.get(K::ApiLocation), Some("eu"));
}
