use utoipa::OpenApi;

use crate::modules::dashboards::DashboardResponse;
use crate::modules::session::model::DecisionResponse;
use dealflow_models::{
    ErrorResponse, LoginRequest, MessageResponse, Principal, RegisterRequest, Session,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::identity::controller::login,
        crate::modules::identity::controller::register,
        crate::modules::session::controller::login,
        crate::modules::session::controller::logout,
        crate::modules::session::controller::current,
        crate::modules::session::controller::authorize,
        crate::modules::dashboards::controller::company_dashboard,
        crate::modules::dashboards::controller::investor_dashboard,
    ),
    components(
        schemas(
            LoginRequest,
            RegisterRequest,
            Principal,
            Session,
            MessageResponse,
            ErrorResponse,
            DecisionResponse,
            DashboardResponse,
        )
    ),
    tags(
        (name = "Identity", description = "Credential verification and account registration"),
        (name = "Session", description = "The process-wide session authority"),
        (name = "Dashboards", description = "Role-gated dashboards")
    ),
    info(
        title = "DealFlow API",
        version = "0.1.0",
        description = "Identity API and role-based session authority for the DealFlow deal-sourcing platform.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
