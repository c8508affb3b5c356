use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use dealflow_core::AppError;
use dealflow_models::{ErrorResponse, LoginRequest, MessageResponse, Principal, RegisterRequest};
use dealflow_session::AuthFailure;
use tracing::instrument;

use super::service::IdentityService;
use crate::metrics::{track_user_login_failure, track_user_login_success, track_user_registered};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Metric label for a failed login, shared with the session endpoint.
fn login_failure_reason(status: StatusCode) -> &'static str {
    match status {
        StatusCode::UNAUTHORIZED => AuthFailure::InvalidCredentials.reason(),
        StatusCode::BAD_REQUEST => AuthFailure::MissingCredentials.reason(),
        _ => "internal_error",
    }
}

/// Verify a username/password pair against the identity store
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = Principal),
        (status = 400, description = "Username or password missing", body = ErrorResponse),
        (status = 401, description = "Invalid username or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Identity"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<Principal>, AppError> {
    match IdentityService::login(&state.db, dto).await {
        Ok(principal) => {
            track_user_login_success(principal.role.as_str());
            Ok(Json(principal))
        }
        Err(e) => {
            track_user_login_failure(login_failure_reason(e.status));
            Err(e)
        }
    }
}

/// Create an account in the identity store
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Missing field or username already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Identity"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let user_type = IdentityService::register(&state.db, dto).await?;
    track_user_registered(&user_type);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_failure_reason_matches_session_labels() {
        assert_eq!(
            login_failure_reason(StatusCode::UNAUTHORIZED),
            "invalid_credentials"
        );
        assert_eq!(
            login_failure_reason(StatusCode::BAD_REQUEST),
            "missing_credentials"
        );
        assert_eq!(
            login_failure_reason(StatusCode::INTERNAL_SERVER_ERROR),
            "internal_error"
        );
    }
}
