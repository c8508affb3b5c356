//! Client-side registration form.
//!
//! The form is checked locally before anything is sent to the identity
//! API, producing one human-readable reason per failure.

use crate::auth::RegisterRequest;
use crate::role::Role;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Passwords don't match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl RegistrationForm {
    /// Checks run in a fixed order; the first failure wins.
    pub fn check(&self) -> Result<(), RegistrationError> {
        let required = [&self.username, &self.password, &self.email, &self.name];
        if required.iter().any(|field| field.is_empty()) {
            return Err(RegistrationError::MissingFields);
        }

        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(RegistrationError::PasswordTooShort);
        }

        Ok(())
    }

    pub fn into_request(self) -> RegisterRequest {
        let account_type = self.role.user_type().to_string();

        RegisterRequest {
            username: self.username,
            password: self.password,
            email: self.email,
            name: self.name,
            account_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegistrationForm {
        RegistrationForm {
            username: "jdoe".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            email: "jdoe@example.com".to_string(),
            name: "Jane Doe".to_string(),
            role: Role::Investor,
        }
    }

    #[test]
    fn test_valid_form() {
        assert_eq!(form().check(), Ok(()));
    }

    #[test]
    fn test_missing_field() {
        let mut f = form();
        f.name.clear();
        assert_eq!(f.check(), Err(RegistrationError::MissingFields));
        assert_eq!(
            RegistrationError::MissingFields.to_string(),
            "All fields are required"
        );
    }

    #[test]
    fn test_missing_fields_reported_before_mismatch() {
        let mut f = form();
        f.email.clear();
        f.confirm_password = "different".to_string();
        assert_eq!(f.check(), Err(RegistrationError::MissingFields));
    }

    #[test]
    fn test_password_mismatch() {
        let mut f = form();
        f.confirm_password = "secret2".to_string();
        assert_eq!(f.check(), Err(RegistrationError::PasswordMismatch));
    }

    #[test]
    fn test_password_too_short() {
        let mut f = form();
        f.password = "abc".to_string();
        f.confirm_password = "abc".to_string();
        assert_eq!(f.check(), Err(RegistrationError::PasswordTooShort));
    }

    #[test]
    fn test_into_request_maps_seller_to_company() {
        let mut f = form();
        f.role = Role::Seller;
        let request = f.into_request();
        assert_eq!(request.account_type, "company");
        assert_eq!(request.role(), Some(Role::Seller));
    }
}
