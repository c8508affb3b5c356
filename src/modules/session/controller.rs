use axum::Json;
use axum::extract::{Query, State};
use dealflow_core::AppError;
use dealflow_models::{ErrorResponse, LoginRequest, MessageResponse, Role, Session};
use dealflow_session::{AuthFailure, AuthOutcome, SessionError, SessionStatus};
use tracing::instrument;

use super::model::{AuthorizeParams, DecisionResponse};
use crate::metrics::{track_user_login_failure, track_user_login_success};
use crate::state::AppState;
use crate::validator::ValidatedJson;

pub const LOGGED_OUT_MESSAGE: &str = "You have been successfully logged out";
pub const UNDETERMINED_MESSAGE: &str = "Session state not yet determined";

pub fn not_ready(err: SessionError) -> AppError {
    match err {
        SessionError::NotReady(_) => AppError::service_unavailable(UNDETERMINED_MESSAGE),
    }
}

/// Log in and establish the session
#[utoipa::path(
    post,
    path = "/api/session/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session established", body = Session),
        (status = 400, description = "Username or password missing", body = ErrorResponse),
        (status = 401, description = "Invalid username or password", body = ErrorResponse),
        (status = 503, description = "Session state not yet determined", body = ErrorResponse)
    ),
    tag = "Session"
)]
#[instrument(skip(state, dto), fields(username = %dto.username))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<Session>, AppError> {
    let outcome = state
        .authority
        .authenticate(&dto.username, &dto.password)
        .await
        .map_err(not_ready)?;

    match outcome {
        AuthOutcome::Authenticated(session) => {
            track_user_login_success(session.role.as_str());
            Ok(Json(session))
        }
        AuthOutcome::Rejected(failure) => {
            track_user_login_failure(failure.reason());
            Err(match failure {
                AuthFailure::InvalidCredentials => AppError::unauthorized(failure.to_string()),
                AuthFailure::MissingCredentials => AppError::bad_request(failure.to_string()),
            })
        }
    }
}

/// End the session
#[utoipa::path(
    post,
    path = "/api/session/logout",
    responses(
        (status = 200, description = "Session ended", body = MessageResponse),
        (status = 503, description = "Session state not yet determined", body = ErrorResponse)
    ),
    tag = "Session"
)]
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Result<Json<MessageResponse>, AppError> {
    state.authority.end_session().await.map_err(not_ready)?;
    Ok(Json(MessageResponse::new(LOGGED_OUT_MESSAGE)))
}

/// Get the current session
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Current session", body = Session),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 503, description = "Session state not yet determined", body = ErrorResponse)
    ),
    tag = "Session"
)]
pub async fn current(State(state): State<AppState>) -> Result<Json<Session>, AppError> {
    match state.authority.status() {
        SessionStatus::Authenticated(session) => Ok(Json(session)),
        SessionStatus::Anonymous => Err(AppError::unauthorized("Not logged in")),
        SessionStatus::Undetermined => Err(AppError::service_unavailable(UNDETERMINED_MESSAGE)),
    }
}

/// Ask whether the current session may enter a route requiring `role`
#[utoipa::path(
    get,
    path = "/api/session/authorize",
    params(AuthorizeParams),
    responses(
        (status = 200, description = "Route decision", body = DecisionResponse),
        (status = 400, description = "Unparseable role", body = ErrorResponse)
    ),
    tag = "Session"
)]
pub async fn authorize(
    State(state): State<AppState>,
    Query(params): Query<AuthorizeParams>,
) -> Result<Json<DecisionResponse>, AppError> {
    let required = params
        .role
        .as_deref()
        .map(str::parse::<Role>)
        .transpose()
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    let decision = state.authority.authorize(required.as_ref());
    Ok(Json(decision.into()))
}
