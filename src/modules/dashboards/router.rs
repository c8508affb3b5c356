use axum::{Router, middleware, routing::get};
use dealflow_session::routes::{INVESTOR_HOME_ROUTE, SELLER_HOME_ROUTE};

use super::controller::{company_dashboard, investor_dashboard};
use crate::middleware::guard::{require_investor, require_seller};
use crate::state::AppState;

pub fn init_dashboards_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            SELLER_HOME_ROUTE,
            get(company_dashboard)
                .route_layer(middleware::from_fn_with_state(state.clone(), require_seller)),
        )
        .route(
            INVESTOR_HOME_ROUTE,
            get(investor_dashboard)
                .route_layer(middleware::from_fn_with_state(state, require_investor)),
        )
}
