use axum::{Router, routing::post};

use super::controller::{login, register};
use crate::state::AppState;

pub fn init_identity_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}
