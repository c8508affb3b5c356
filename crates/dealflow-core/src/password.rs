//! bcrypt password hashing.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Returns `Ok(false)` on mismatch; `Err` only when `hashed` is not a bcrypt hash.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    verify(password, hashed)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("muser").unwrap();
        assert_ne!(hash, "muser");
        assert!(verify_password("muser", &hash).unwrap());
        assert!(!verify_password("mpe", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same").unwrap();
        let second = hash_password("same").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_non_bcrypt_hash() {
        assert!(verify_password("secret", "not_a_valid_bcrypt_hash").is_err());
    }

    #[test]
    fn test_verify_is_case_sensitive() {
        let hash = hash_password("Password123").unwrap();
        assert!(!verify_password("password123", &hash).unwrap());
    }
}
