use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use dealflow_session::SessionStatus;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::state::AppState;

pub const LOG_DIR: &str = "storage/logs";

/// `(user_id, role)` fields for a request log line.
fn principal_fields(status: &SessionStatus) -> (String, String) {
    match status {
        SessionStatus::Authenticated(session) => (session.id.clone(), session.role.to_string()),
        SessionStatus::Anonymous => ("-".to_string(), "anonymous".to_string()),
        SessionStatus::Undetermined => ("-".to_string(), "undetermined".to_string()),
    }
}

/// Logs each request with the principal the authority holds once the
/// handler has run, so logins and logouts show their outcome.
pub async fn logging_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let request_id = uuid::Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %matched_path,
        "Incoming request"
    );

    let response = next.run(req).await;
    let latency_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();
    let (user_id, role) = principal_fields(&state.authority.status());

    match status {
        400..=499 => warn!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms = %latency_ms,
            user_id = %user_id,
            role = %role,
            "Client error"
        ),
        500..=599 => error!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms = %latency_ms,
            user_id = %user_id,
            role = %role,
            "Server error"
        ),
        _ => info!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms = %latency_ms,
            user_id = %user_id,
            role = %role,
            "Request completed"
        ),
    }

    response
}

/// Console output plus daily-rolling files under [`LOG_DIR`]: a plain file
/// for errors and a JSON file for structured ingestion.
pub fn init_tracing() -> std::io::Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt;

    std::fs::create_dir_all(LOG_DIR)?;

    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info,dealflow_session=info,dealflow_db=info,tower_http=warn,axum::rejection=trace",
            env!("CARGO_CRATE_NAME")
        ))
    });

    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    let file_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "dealflow.log");

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "dealflow.json");

    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .init();

    Ok(())
}
