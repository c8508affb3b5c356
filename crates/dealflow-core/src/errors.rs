//! HTTP-aware application error.
//!
//! Handlers return `Result<_, AppError>`; the error renders as
//! `{"error": "<message>"}` with the carried status code.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    fn with_message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, anyhow::anyhow!(message.into()))
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::UNAUTHORIZED, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    /// The message rendered to clients.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        }

        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers_set_status() {
        assert_eq!(AppError::bad_request("x").status, StatusCode::BAD_REQUEST);
        assert_eq!(AppError::unauthorized("x").status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::unprocessable("x").status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::service_unavailable("x").status,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_message_is_preserved() {
        let err = AppError::unauthorized("Invalid username or password");
        assert_eq!(err.message(), "Invalid username or password");
    }

    #[test]
    fn test_from_anyhow_is_internal() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::unprocessable("nope").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
