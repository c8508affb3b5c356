use std::sync::Arc;
use std::time::Duration;

use dealflow_models::{RegistrationForm, Role};
use dealflow_session::{
    AuthFailure, AuthOutcome, BACKEND_UNAVAILABLE_MESSAGE, FileSessionStore, MemorySessionStore,
    RegistrationOutcome, RemoteIdentityClient, SessionAuthority,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> RemoteIdentityClient {
    RemoteIdentityClient::new(server.uri(), Duration::from_millis(500)).unwrap()
}

fn form(username: &str) -> RegistrationForm {
    RegistrationForm {
        username: username.to_string(),
        password: "s3cret!".to_string(),
        confirm_password: "s3cret!".to_string(),
        email: "founder@acme.test".to_string(),
        name: "Acme Founder".to_string(),
        role: Role::Seller,
    }
}

async fn remote_authority(server: &MockServer, fixture: bool) -> SessionAuthority {
    let authority = SessionAuthority::builder(Arc::new(MemorySessionStore::new()))
        .fixture_users(fixture)
        .remote(client(server))
        .build();
    authority.initialize().await;
    authority
}

#[tokio::test]
async fn test_remote_login_establishes_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"username": "acme", "password": "s3cret!"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "username": "acme",
            "name": "Acme Founder",
            "email": "founder@acme.test",
            "type": "company"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let authority = remote_authority(&server, true).await;
    let outcome = authority.authenticate("acme", "s3cret!").await.unwrap();

    let session = outcome.session().cloned().unwrap();
    assert_eq!(session.id, "3");
    assert_eq!(session.role, Role::Seller);
    assert_eq!(session.contact_address, "founder@acme.test");
}

#[tokio::test]
async fn test_remote_rejection_is_no_match() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid username or password"})),
        )
        .mount(&server)
        .await;

    let authority = remote_authority(&server, false).await;
    let outcome = authority.authenticate("acme", "nope").await.unwrap();
    assert_eq!(outcome, AuthOutcome::Rejected(AuthFailure::InvalidCredentials));
    assert_eq!(authority.current_session(), None);
}

#[tokio::test]
async fn test_fixture_takes_precedence_over_remote() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let authority = remote_authority(&server, true).await;
    let outcome = authority.authenticate("muser", "muser").await.unwrap();
    assert_eq!(outcome.session().map(|s| s.id.as_str()), Some("1"));
}

#[tokio::test]
async fn test_remote_failures_degrade_to_no_match() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let authority = remote_authority(&server, true).await;
    let outcome = authority.authenticate("acme", "s3cret!").await.unwrap();
    assert_eq!(outcome, AuthOutcome::Rejected(AuthFailure::InvalidCredentials));

    // Fixture users still work with a broken backend.
    let outcome = authority.authenticate("mpe", "mpe").await.unwrap();
    assert!(outcome.session().is_some());
}

#[tokio::test]
async fn test_remote_timeout_degrades_to_no_match() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let authority = SessionAuthority::builder(Arc::new(MemorySessionStore::new()))
        .remote(RemoteIdentityClient::new(server.uri(), Duration::from_millis(100)).unwrap())
        .build();
    authority.initialize().await;

    let outcome = authority.authenticate("acme", "s3cret!").await.unwrap();
    assert_eq!(outcome, AuthOutcome::Rejected(AuthFailure::InvalidCredentials));
}

#[tokio::test]
async fn test_remote_registration() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .and(body_json(json!({
            "username": "acme",
            "password": "s3cret!",
            "email": "founder@acme.test",
            "name": "Acme Founder",
            "type": "company"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"message": "User registered successfully"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Username already exists"})),
        )
        .mount(&server)
        .await;

    let authority = remote_authority(&server, true).await;

    assert_eq!(authority.register(form("acme")).await, RegistrationOutcome::Registered);
    assert_eq!(
        authority.register(form("muser")).await,
        RegistrationOutcome::Rejected("Username already exists".to_string())
    );
    assert_eq!(authority.current_session(), None);
}

#[tokio::test]
async fn test_registration_rejection_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let outcome = client(&server)
        .register_account(&form("acme").into_request())
        .await
        .unwrap();
    assert_eq!(
        outcome,
        RegistrationOutcome::Rejected("Something went wrong".to_string())
    );
}

#[tokio::test]
async fn test_unreachable_registrar() {
    // Nothing listens on port 9 of localhost.
    let authority = SessionAuthority::builder(Arc::new(MemorySessionStore::new()))
        .remote(RemoteIdentityClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap())
        .build();

    assert_eq!(
        authority.register(form("acme")).await,
        RegistrationOutcome::Rejected(BACKEND_UNAVAILABLE_MESSAGE.to_string())
    );
}

#[tokio::test]
async fn test_file_store_round_trip_across_authorities() {
    let dir = tempfile::tempdir().unwrap();
    let build = || {
        SessionAuthority::builder(Arc::new(FileSessionStore::new(dir.path())))
            .fixture_users(true)
            .build()
    };

    let first = build();
    first.initialize().await;
    first.authenticate("muser", "muser").await.unwrap();

    let second = build();
    let restored = second.initialize().await.unwrap();
    assert_eq!(restored.username, "muser");
    assert_eq!(restored.role, Role::Seller);

    second.end_session().await.unwrap();

    let third = build();
    assert_eq!(third.initialize().await, None);
}

#[tokio::test]
async fn test_corrupt_file_means_no_session() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("user.json"), "{\"id\": ").unwrap();

    let authority = SessionAuthority::builder(Arc::new(FileSessionStore::new(dir.path())))
        .fixture_users(true)
        .build();

    assert_eq!(authority.initialize().await, None);
    assert!(!dir.path().join("user.json").exists());
}
