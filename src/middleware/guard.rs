//! Role guards for page routes.
//!
//! Each guard asks the session authority for a decision and acts on it:
//! `allow` runs the handler, `redirect` answers `303 See Other`, and
//! `pending` answers `503` so the client retries instead of being sent to
//! the login page.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use dealflow_core::AppError;
use dealflow_models::Role;
use dealflow_session::AccessDecision;
use tracing::debug;

use crate::metrics::track_access_decision;
use crate::modules::session::controller::UNDETERMINED_MESSAGE;
use crate::state::AppState;

pub async fn require_role(
    state: &AppState,
    req: Request,
    next: Next,
    role: Role,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();

    match state.authority.authorize(Some(&role)) {
        AccessDecision::Allow => {
            track_access_decision(&path, "allow");
            Ok(next.run(req).await)
        }
        AccessDecision::Redirect { redirect_to } => {
            debug!(path = %path, redirect_to = %redirect_to, "Guard redirect");
            track_access_decision(&path, "redirect");
            Ok(Redirect::to(&redirect_to).into_response())
        }
        AccessDecision::Pending => {
            track_access_decision(&path, "pending");
            Err(AppError::service_unavailable(UNDETERMINED_MESSAGE))
        }
    }
}

pub async fn require_seller(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_role(&state, req, next, Role::Seller).await
}

pub async fn require_investor(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_role(&state, req, next, Role::Investor).await
}
