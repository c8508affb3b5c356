//! Principal roles.
//!
//! A role decides which protected views a session may reach. The set is
//! closed today (`seller`, `investor`) but identity backends may hand back
//! roles this build does not know; those parse into [`Role::Other`] instead
//! of failing so that access decisions can still be made.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    /// Company owner listing a business.
    Seller,
    /// Private-equity reviewer on the capital side.
    Investor,
    /// A role reported by a backend that this build does not recognise.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("role cannot be empty")]
pub struct RoleParseError;

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Seller => "seller",
            Role::Investor => "investor",
            Role::Other(name) => name,
        }
    }

    /// The identity API's name for this role, as stored in `user_type`.
    pub fn user_type(&self) -> &str {
        match self {
            Role::Seller => "company",
            other => other.as_str(),
        }
    }

    /// True for the roles this build knows how to route.
    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Other(_))
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "" => Err(RoleParseError),
            // "company" is the identity API's name for sellers
            "seller" | "company" => Ok(Role::Seller),
            "investor" => Ok(Role::Investor),
            _ => Ok(Role::Other(normalized)),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = RoleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!("seller".parse::<Role>().unwrap(), Role::Seller);
        assert_eq!("investor".parse::<Role>().unwrap(), Role::Investor);
        assert_eq!("Investor".parse::<Role>().unwrap(), Role::Investor);
    }

    #[test]
    fn test_company_is_seller() {
        assert_eq!("company".parse::<Role>().unwrap(), Role::Seller);
    }

    #[test]
    fn test_user_type_uses_identity_api_names() {
        assert_eq!(Role::Seller.user_type(), "company");
        assert_eq!(Role::Investor.user_type(), "investor");
        assert_eq!(Role::Other("admin".to_string()).user_type(), "admin");
    }

    #[test]
    fn test_unknown_role_is_kept() {
        let role: Role = "admin".parse().unwrap();
        assert_eq!(role, Role::Other("admin".to_string()));
        assert!(!role.is_known());
    }

    #[test]
    fn test_empty_role_rejected() {
        assert!("  ".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_uses_plain_strings() {
        assert_eq!(serde_json::to_string(&Role::Seller).unwrap(), r#""seller""#);
        let role: Role = serde_json::from_str(r#""company""#).unwrap();
        assert_eq!(role, Role::Seller);
        assert!(serde_json::from_str::<Role>(r#""""#).is_err());
    }
}
