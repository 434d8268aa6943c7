//! OAuth authorization use-cases against a mocked transport.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use agentspace_registrar::application::ports::Method;
use agentspace_registrar::application::services::api::ApiClient;
use agentspace_registrar::application::services::authorization;
use agentspace_registrar::domain::{Action, ConfigError, ParameterKey as K, RemoteError, Service};
use mockall::Sequence;

use crate::mocks::{MockTransport, RecordingReporter, StaticToken, ok, resolved, status};

const AUTH_URL: &str =
    "https://us-discoveryengine.googleapis.com/v1alpha/projects/proj/locations/us/authorizations";

fn oauth() -> Vec<(K, &'static str)> {
    vec![
        (K::ProjectId, "proj"),
        (K::OauthClientId, "client-1"),
        (K::OauthClientSecret, "secret-1"),
    ]
}

fn created(id: &str) -> String {
    format!(
        r#"{{"name":"projects/proj/locations/us/authorizations/{id}","serverSideOauth2":{{"clientId":"client-1","authorizationUri":"https://accounts.google.com/o/oauth2/v2/auth","tokenUri":"https://oauth2.googleapis.com/token"}}}}"#
    )
}

#[test]
fn test_create_without_id_generates_uuid() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|req| {
            let id = req.query_value("authorizationId").unwrap_or_default();
            let body = req.body.clone().unwrap_or_default();
            req.method == Method::Post
                && req.url == AUTH_URL
                && uuid::Uuid::parse_str(id).is_ok()
                && body["serverSideOauth2"]["clientSecret"] == "secret-1"
                && body["serverSideOauth2"]["authorizationUri"]
                    .as_str()
                    .is_some_and(|uri| uri.contains("scope=email"))
        })
        .times(1)
        .returning(|req| {
            let id = req.query_value("authorizationId").unwrap_or_default();
            Ok(ok(&created(id)))
        });

    let resolved = resolved(Service::Auth, Action::Create, &oauth());
    let client = ApiClient::new(&transport, &StaticToken, "proj");

    let auth = authorization::create_authorization(&client, &resolved, &RecordingReporter::default())
        .unwrap();
    assert!(auth.name.starts_with("projects/proj/locations/us/authorizations/"));
}

#[test]
fn test_create_with_blank_scopes_is_rejected() {
    let transport = MockTransport::new();
    let mut pairs = oauth();
    pairs.push((K::Scopes, " , "));
    let resolved = resolved(Service::Auth, Action::Create, &pairs);
    let client = ApiClient::new(&transport, &StaticToken, "proj");

    let err = authorization::create_authorization(&client, &resolved, &RecordingReporter::default())
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidValue { key: K::Scopes, .. })
    ));
}

#[test]
fn test_global_location_uses_global_host() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|req| {
            req.url
                == "https://discoveryengine.googleapis.com/v1alpha/projects/proj/locations/global/authorizations"
        })
        .times(1)
        .returning(|_| Ok(ok(r#"{"authorizations":[]}"#)));

    let resolved = resolved(
        Service::Auth,
        Action::List,
        &[(K::ProjectId, "proj"), (K::Location, "global")],
    );
    let client = ApiClient::new(&transport, &StaticToken, "proj");

    let list = authorization::list_authorizations(&client, &resolved).unwrap();
    assert!(list.authorizations.is_empty());
}

#[test]
fn test_refresh_creates_before_deleting() {
    let mut transport = MockTransport::new();
    let mut seq = Sequence::new();
    transport
        .expect_send()
        .withf(|req| req.method == Method::Post && req.query_value("authorizationId") == Some("new-1"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(ok(&created("new-1"))));
    transport
        .expect_send()
        .withf(|req| req.method == Method::Delete && req.url == format!("{AUTH_URL}/old-1"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(ok("")));

    let mut pairs = oauth();
    pairs.extend([(K::AuthorizationId, "old-1"), (K::NewAuthorizationId, "new-1")]);
    let resolved = resolved(Service::Auth, Action::Refresh, &pairs);
    let client = ApiClient::new(&transport, &StaticToken, "proj");
    let reporter = RecordingReporter::default();

    let outcome = authorization::refresh_authorization(&client, &resolved, &reporter).unwrap();
    assert_eq!(
        outcome.created.name,
        "projects/proj/locations/us/authorizations/new-1"
    );
    assert_eq!(outcome.message, "Authorization old-1 replaced by new-1");
    assert_eq!(outcome.deleted["message"], "old-1 deleted successfully");
}

#[test]
fn test_refresh_keeps_old_authorization_when_create_fails() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|req| req.method == Method::Post)
        .times(1)
        .returning(|_| Ok(status(409, r#"{"error":{"message":"already exists"}}"#)));
    transport
        .expect_send()
        .withf(|req| req.method == Method::Delete)
        .never();

    let mut pairs = oauth();
    pairs.extend([(K::AuthorizationId, "old-1"), (K::NewAuthorizationId, "new-1")]);
    let resolved = resolved(Service::Auth, Action::Refresh, &pairs);
    let client = ApiClient::new(&transport, &StaticToken, "proj");

    let err = authorization::refresh_authorization(&client, &resolved, &RecordingReporter::default())
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<RemoteError>().and_then(RemoteError::status),
        Some(409)
    );
}

#[test]
fn test_refresh_delete_failure_names_new_authorization() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|req| req.method == Method::Post)
        .returning(|_| Ok(ok(&created("new-1"))));
    transport
        .expect_send()
        .withf(|req| req.method == Method::Delete)
        .returning(|_| Ok(status(403, "forbidden")));

    let mut pairs = oauth();
    pairs.extend([(K::AuthorizationId, "old-1"), (K::NewAuthorizationId, "new-1")]);
    let resolved = resolved(Service::Auth, Action::Refresh, &pairs);
    let client = ApiClient::new(&transport, &StaticToken, "proj");

    let err = authorization::refresh_authorization(&client, &resolved, &RecordingReporter::default())
        .unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("new-1 was created"), "got: {msg}");
    assert!(msg.contains("forbidden"), "got: {msg}");
}

#[test]
fn test_refresh_rejects_identical_ids() {
    let transport = MockTransport::new();
    let mut pairs = oauth();
    pairs.extend([(K::AuthorizationId, "same"), (K::NewAuthorizationId, "same")]);
    let resolved = resolved(Service::Auth, Action::Refresh, &pairs);
    let client = ApiClient::new(&transport, &StaticToken, "proj");

    let err = authorization::refresh_authorization(&client, &resolved, &RecordingReporter::default())
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidValue { key: K::NewAuthorizationId, .. })
    ));
}
