//! Principal identities and the sessions established from them.

use dealflow_core::serde::deserialize_string_or_number;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

use crate::role::Role;

/// A principal as returned by the identity API's login endpoint.
///
/// Field names and values follow the identity API wire format: the role
/// travels as `type` using the API's words (`company`, `investor`) and ids
/// may be numeric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    #[serde(deserialize_with = "deserialize_string_or_number")]
    #[schema(value_type = String, example = "1")]
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "type", serialize_with = "serialize_user_type")]
    #[schema(value_type = String, example = "company")]
    pub role: Role,
}

fn serialize_user_type<S>(role: &Role, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(role.user_type())
}

/// The currently authenticated principal.
///
/// This is also the persisted form: it never carries a secret. Older
/// persisted records used `type`/`email` instead of `role`/`contactAddress`;
/// both spellings are accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(deserialize_with = "deserialize_string_or_number")]
    #[schema(value_type = String, example = "1")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    pub name: String,
    #[serde(alias = "type")]
    #[schema(value_type = String, example = "investor")]
    pub role: Role,
    #[serde(alias = "email")]
    pub contact_address: String,
}

impl From<Principal> for Session {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.id,
            username: principal.username,
            name: principal.name,
            role: principal.role,
            contact_address: principal.email,
        }
    }
}
