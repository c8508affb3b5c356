//! Identity API request and response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::role::Role;

/// Login request with username and password.
///
/// Both fields default to empty so that a missing field is reported as
/// "Username and password are required" rather than as a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "muser")]
    pub username: String,
    #[serde(default)]
    #[schema(example = "muser")]
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

/// Registration request accepted by the identity API.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "username cannot be empty"))]
    #[schema(example = "jdoe")]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "s3cret!")]
    pub password: String,
    #[validate(email(message = "email is invalid"))]
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "name cannot be empty"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_account_type"))]
    #[schema(example = "company")]
    pub account_type: String,
}

impl RegisterRequest {
    /// The role requested by `account_type`, if it is one this build routes.
    pub fn role(&self) -> Option<Role> {
        self.account_type.parse::<Role>().ok().filter(Role::is_known)
    }
}

fn validate_account_type(value: &str) -> Result<(), ValidationError> {
    match value.parse::<Role>() {
        Ok(role) if role.is_known() => Ok(()),
        _ => Err(ValidationError::new("account_type")
            .with_message("type must be one of: company, seller, investor".into())),
    }
}

/// Generic success message response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body rendered by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
