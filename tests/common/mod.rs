#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use dealflow::modules::identity::lookup::DbCredentialLookup;
use dealflow::router::init_router;
use dealflow::state::AppState;
use dealflow_config::{CorsConfig, DatabaseConfig};
use dealflow_db::{SqlitePool, init_db_pool, run_migrations, seed_demo_users};
use dealflow_session::{MemorySessionStore, SessionAuthority, SessionStore};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// A migrated in-memory identity store holding the demo users.
pub async fn test_pool() -> SqlitePool {
    let pool = init_db_pool(&DatabaseConfig::in_memory()).await.unwrap();
    run_migrations(&pool).await.unwrap();
    seed_demo_users(&pool).await.unwrap();
    pool
}

/// An authority that only consults the database, so tests exercise the
/// same credential path as registered users.
pub fn database_authority(pool: &SqlitePool, store: Arc<dyn SessionStore>) -> SessionAuthority {
    SessionAuthority::builder(store)
        .provider(DbCredentialLookup::new(pool.clone()))
        .build()
}

pub fn app_with(pool: SqlitePool, authority: SessionAuthority) -> Router {
    init_router(AppState {
        db: pool,
        authority: Arc::new(authority),
        cors_config: CorsConfig::from_list("http://localhost:5173"),
    })
}

/// Router with a ready authority over an in-memory session store.
pub async fn setup_test_app() -> Router {
    let pool = test_pool().await;
    let authority = database_authority(&pool, Arc::new(MemorySessionStore::new()));
    authority.initialize().await;
    app_with(pool, authority)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Sends one request; empty or non-JSON bodies come back as `Value::Null`.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
