use dealflow_session::AccessDecision;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuthorizeParams {
    /// Role the route requires: `seller` (alias `company`) or `investor`.
    /// Omitted means any authenticated session is allowed.
    pub role: Option<String>,
}

/// A route guard verdict: `allow`, `redirect` (with `redirectTo`) or `pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DecisionResponse {
    #[schema(example = "redirect")]
    pub decision: String,
    #[serde(rename = "redirectTo", skip_serializing_if = "Option::is_none")]
    #[schema(example = "/investor-dashboard")]
    pub redirect_to: Option<String>,
}

impl From<AccessDecision> for DecisionResponse {
    fn from(decision: AccessDecision) -> Self {
        let (name, redirect_to) = match decision {
            AccessDecision::Allow => ("allow", None),
            AccessDecision::Redirect { redirect_to } => ("redirect", Some(redirect_to)),
            AccessDecision::Pending => ("pending", None),
        };

        Self {
            decision: name.to_string(),
            redirect_to,
        }
    }
}
