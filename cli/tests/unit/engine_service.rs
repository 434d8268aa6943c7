//! Agent Engine use-cases against a mocked transport.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use agentspace_registrar::application::ports::Method;
use agentspace_registrar::application::services::api::ApiClient;
use agentspace_registrar::application::services::engine;
use agentspace_registrar::domain::{Action, ConfigError, ParameterKey as K, Service};
use serde_json::json;

use crate::mocks::{MockTransport, RecordingReporter, StaticToken, ok, resolved};

const ENGINES_URL: &str =
    "https://us-central1-aiplatform.googleapis.com/v1/projects/proj/locations/us-central1/reasoningEngines";

#[test]
fn test_list_engines_summarizes_each_engine() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|req| req.method == Method::Get && req.url == ENGINES_URL)
        .times(1)
        .returning(|_| {
            Ok(ok(r#"{"reasoningEngines":[
                {"name":"projects/proj/locations/us-central1/reasoningEngines/111","displayName":"Alpha","createTime":"2025-01-02T03:04:05Z"},
                {"name":"projects/proj/locations/us-central1/reasoningEngines/222"}
            ]}"#))
        });

    let resolved = resolved(Service::Engine, Action::List, &[(K::ProjectId, "proj")]);
    let client = ApiClient::new(&transport, &StaticToken, "proj");

    let list = engine::list_engines(&client, &resolved).unwrap();
    assert_eq!(list.agents.len(), 2);
    assert_eq!(list.agents[0].name, "111");
    assert_eq!(list.agents[0].display_name.as_deref(), Some("Alpha"));
    assert!(list.agents[0].create_time.is_some());
    assert_eq!(
        list.agents[1].resource_name,
        "projects/proj/locations/us-central1/reasoningEngines/222"
    );
}

#[test]
fn test_get_engine_uses_short_id() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|req| req.url == format!("{ENGINES_URL}/111"))
        .times(1)
        .returning(|_| {
            Ok(ok(
                r#"{"name":"projects/proj/locations/us-central1/reasoningEngines/111","displayName":"Alpha"}"#,
            ))
        });

    let resolved = resolved(
        Service::Engine,
        Action::Get,
        &[(K::ProjectId, "proj"), (K::ReResourceId, "111")],
    );
    let client = ApiClient::new(&transport, &StaticToken, "proj");

    let list = engine::get_engine(&client, &resolved).unwrap();
    assert_eq!(list.agents.len(), 1);
    assert_eq!(list.agents[0].name, "111");
}

#[test]
fn test_list_by_name_sends_display_name_filter() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|req| req.query_value("filter") == Some("display_name=\"My \\\"quoted\\\" engine\""))
        .times(1)
        .returning(|_| Ok(ok(r#"{"reasoningEngines":[]}"#)));

    let resolved = resolved(
        Service::Engine,
        Action::GetByName,
        &[(K::ProjectId, "proj"), (K::ReDisplayName, "My \"quoted\" engine")],
    );
    let client = ApiClient::new(&transport, &StaticToken, "proj");

    assert!(engine::list_engines_by_name(&client, &resolved).unwrap().agents.is_empty());
}

#[test]
fn test_delete_engine_uses_full_resource_name() {
    let name = "projects/proj/locations/europe-west4/reasoningEngines/333";
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(move |req| {
            req.method == Method::Delete
                && req.url == format!("https://europe-west4-aiplatform.googleapis.com/v1/{name}")
        })
        .times(1)
        .returning(|_| Ok(ok(r#"{"name":"operations/op-1","done":false}"#)));

    let resolved = resolved(
        Service::Engine,
        Action::Delete,
        &[
            (K::ProjectId, "proj"),
            (K::Location, "europe-west4"),
            (K::ReResourceName, name),
        ],
    );
    let client = ApiClient::new(&transport, &StaticToken, "proj");

    let response = engine::delete_engine(&client, &resolved, &RecordingReporter::default()).unwrap();
    assert_eq!(response, json!({"name": "operations/op-1", "done": false}));
}

#[test]
fn test_delete_engine_targets_region_of_resource_name() {
    let name = "projects/proj/locations/europe-west1/reasoningEngines/9";
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(move |req| {
            req.method == Method::Delete
                && req.url == format!("https://europe-west1-aiplatform.googleapis.com/v1/{name}")
        })
        .times(1)
        .returning(|_| Ok(ok("{}")));

    let resolved = resolved(
        Service::Engine,
        Action::Delete,
        &[(K::ProjectId, "proj"), (K::ReResourceName, name)],
    );
    assert_eq!(resolved.get(K::Location), Some("us-central1"));
    let client = ApiClient::new(&transport, &StaticToken, "proj");

    engine::delete_engine(&client, &resolved, &RecordingReporter::default()).unwrap();
}

#[test]
fn test_delete_engine_rejects_conflicting_explicit_location() {
    let transport = MockTransport::new();
    let resolved = resolved(
        Service::Engine,
        Action::Delete,
        &[
            (K::ProjectId, "proj"),
            (K::Location, "us-east1"),
            (K::ReResourceName, "projects/proj/locations/europe-west1/reasoningEngines/9"),
        ],
    );
    let client = ApiClient::new(&transport, &StaticToken, "proj");

    let err = engine::delete_engine(&client, &resolved, &RecordingReporter::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidValue { key: K::Location, .. })
    ));
    assert!(err.to_string().contains("europe-west1"), "got: {err}");
}

#[test]
fn test_delete_engine_rejects_short_id() {
    let transport = MockTransport::new();
    let resolved = resolved(
        Service::Engine,
        Action::Delete,
        &[(K::ProjectId, "proj"), (K::ReResourceName, "333")],
    );
    let client = ApiClient::new(&transport, &StaticToken, "proj");

    let err = engine::delete_engine(&client, &resolved, &RecordingReporter::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidValue { key: K::ReResourceName, .. })
    ));
}
