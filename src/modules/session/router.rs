use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{authorize, current, login, logout};
use crate::state::AppState;

pub fn init_session_router() -> Router<AppState> {
    Router::new()
        .route("/", get(current))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/authorize", get(authorize))
}
