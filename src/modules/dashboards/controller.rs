use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use dealflow_models::{ErrorResponse, Session};
use dealflow_session::routes::LOGIN_ROUTE;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    #[schema(example = "company")]
    pub dashboard: String,
    #[schema(example = "Welcome back, Mock Company Owner!")]
    pub welcome: String,
}

/// The guard has already allowed the request; a session ended since then
/// goes back to the login page.
fn render(session: Option<Session>, dashboard: &str) -> Response {
    match session {
        Some(session) => Json(DashboardResponse {
            dashboard: dashboard.to_string(),
            welcome: format!("Welcome back, {}!", session.name),
        })
        .into_response(),
        None => Redirect::to(LOGIN_ROUTE).into_response(),
    }
}

/// Seller dashboard
#[utoipa::path(
    get,
    path = "/company-dashboard",
    responses(
        (status = 200, description = "Seller session entered", body = DashboardResponse),
        (status = 303, description = "Redirect to login or to the session's own dashboard"),
        (status = 503, description = "Session state not yet determined", body = ErrorResponse)
    ),
    tag = "Dashboards"
)]
pub async fn company_dashboard(State(state): State<AppState>) -> Response {
    render(state.authority.current_session(), "company")
}

/// Investor dashboard
#[utoipa::path(
    get,
    path = "/investor-dashboard",
    responses(
        (status = 200, description = "Investor session entered", body = DashboardResponse),
        (status = 303, description = "Redirect to login or to the session's own dashboard"),
        (status = 503, description = "Session state not yet determined", body = ErrorResponse)
    ),
    tag = "Dashboards"
)]
pub async fn investor_dashboard(State(state): State<AppState>) -> Response {
    render(state.authority.current_session(), "investor")
}
