//! Route paths the authority hands back in redirect decisions.

use dealflow_models::Role;

pub const LOGIN_ROUTE: &str = "/login";
pub const SELLER_HOME_ROUTE: &str = "/company-dashboard";
pub const INVESTOR_HOME_ROUTE: &str = "/investor-dashboard";

/// The dashboard a role lands on, or `None` for roles without one.
pub fn home_route(role: &Role) -> Option<&'static str> {
    match role {
        Role::Seller => Some(SELLER_HOME_ROUTE),
        Role::Investor => Some(INVESTOR_HOME_ROUTE),
        Role::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_routes() {
        assert_eq!(home_route(&Role::Seller), Some("/company-dashboard"));
        assert_eq!(home_route(&Role::Investor), Some("/investor-dashboard"));
        assert_eq!(home_route(&Role::Other("admin".into())), None);
    }
}
